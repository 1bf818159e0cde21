//! Errors raised while decoding or executing a program

use thiserror::Error;

use crate::opcode::{Arity, Opcode};

/// Every way a run can fail. None of these are recoverable: the machine stops
/// at the faulting instruction and keeps reporting the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// The stack's extreme pointer reached the heap pointer.
    #[error("stack overflow: extreme pointer {ep} reached heap pointer {np}")]
    StackOverflow { ep: isize, np: isize },
    /// Mnemonic without a defined instruction.
    #[error("unknown instruction: {0}")]
    UnknownInstruction(String),
    /// Wrong number of arguments for an instruction.
    #[error("{opcode} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        opcode: Opcode,
        expected: Arity,
        got: usize,
    },
    /// An argument is out of the range the instruction accepts.
    #[error("invalid argument {value} for {opcode}")]
    InvalidArgument { opcode: Opcode, value: i32 },
    #[error("division by zero")]
    DivisionByZero,
    #[error("address {address} is outside of memory (capacity {capacity})")]
    AddressOutOfBounds { address: isize, capacity: usize },
    /// A push or allocation would run past the last memory cell.
    #[error("out of memory: cell {requested} requested, capacity {capacity}")]
    MemoryExhausted { requested: isize, capacity: usize },
    /// Read below the bottom of the stack.
    #[error("stack underflow")]
    StackUnderflow,
    #[error("invalid jump target {target}")]
    InvalidJump { target: i64 },
    #[error("return without call")]
    ReturnWithoutCall,
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },
    #[error("program is already finished")]
    AlreadyFinished,
}

pub type VmResult<T> = Result<T, VmError>;
