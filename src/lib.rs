//! C-machine (CMa) is a stack-based abstract machine executing pre-resolved bytecode.
//!
//! A single array of integer cells is shared by the operand stack, the activation
//! frames and the heap. The stack grows upward from address 0, the heap grows
//! downward from the last cell.
//!
//! # Example
//!
//! ```
//! use cma::{BinaryOp, HaltConvention, Instruction::*, Machine, MachineConfig};
//!
//! let program = vec![LoadC(3), LoadC(4), Binary(BinaryOp::Add), Halt];
//! let config = MachineConfig::default().with_halt(HaltConvention::StackTop);
//!
//! let mut vm = Machine::with_config(program, config);
//! assert_eq!(vm.run().unwrap(), 7);
//! ```
//!
//! # Instructions
//!
//! | Instruction | Usage      | Brief |
//! |-------------|------------|-------|
//! | LoadC       | LOADC _c_  | Push the constant `c`. |
//! | Load        | LOAD [_n_] | Replace the address on top with the `n` words stored there (one by default). |
//! | Store       | STORE [_n_]| Copy the `n` words below the address on top to that address, then pop the address. |
//! | LoadA       | LOADA _a_  | Push the word at address `a`. |
//! | StoreA      | STOREA _a_ | Write the top word to address `a`. The word stays on the stack. |
//! | LoadR       | LOADR _j_  | Push the word at `fp + j`. |
//! | StoreR      | STORER _j_ | Write the top word to `fp + j`. |
//! | LoadRC      | LOADRC _j_ | Push the address `fp + j`. |
//! | Pop         | POP [_n_]  | Discard the top word, or the top `n` words. |
//! | Dup         | DUP        | Push a copy of the top word. |
//! | Jump        | JUMP _t_   | Continue at instruction `t`. |
//! | JumpZ       | JUMPZ _t_  | Pop a value, continue at `t` if it is `0`. |
//! | JumpI       | JUMPI _b_  | Pop an offset `k`, continue at `b + k`. Used for jump tables. |
//! | Alloc       | ALLOC _n_  | Reserve `n` uninitialized cells on the stack. |
//! | New         | NEW        | Pop a size, allocate that many heap cells and push the block's address. |
//! | Mark        | MARK       | Push `ep` and `fp`. |
//! | Call        | CALL       | Jump to the address on top, replacing it with the return address. `fp` points to that slot. |
//! | Enter       | ENTER _q_  | Set `ep = sp + q`. Fails if the stack would reach the heap. |
//! | Slide       | SLIDE _m_  | Remove the `m` words below the top word. |
//! | Return      | RETURN     | Restore `pc`, `ep` and `fp` from the frame and drop it. |
//! | Halt        | HALT       | Stop. |
//! | Binary      | ADD SUB MUL DIV MOD AND OR XOR | Pop two values and push `lhs <op> rhs`, `lhs` being pushed first. |
//! | Binary      | EQ NEQ LE LEQ GR GEQ | Compare two values, push `1` or `0`. `LE` is less-than, `GR` greater-than. |
//! | Unary       | NOT NEG    | Logical not, arithmetic negation of the top word. |
//!
//! # Calling convention
//!
//! ```text
//! caller:  ALLOC 1          ; cell receiving the result
//!          <push arguments>
//!          ALLOC 1          ; return value slot, fp - 3
//!          MARK             ; ep at fp - 2, fp at fp - 1
//!          LOADC f
//!          CALL             ; return address at fp
//!          SLIDE m          ; drop m arguments, the result lands in the reserved cell
//! callee:  ENTER q
//!          ...              ; arguments at fp - 4, fp - 5, ..., locals at fp + 1, ...
//!          STORER -3
//!          RETURN
//! ```
//!
//! # Important notes
//!
//! - `DIV` truncates toward zero. `MOD` takes the sign of the divisor.
//! - Arithmetic wraps on overflow.
//! - A collision between stack and heap is only detected by `ENTER` and `RETURN`.
//! - The result of a run is read from cell 0 by default, or from the top of the stack
//!   with [`HaltConvention::StackTop`].

pub mod bytecode;
pub mod config;
pub mod error;
pub mod opcode;
pub mod state;
pub mod vm;


/// Content of one memory cell
pub type Word = i32;

pub use bytecode::{Instruction, Program};
pub use config::{HaltConvention, MachineConfig};
pub use error::{VmError, VmResult};
pub use opcode::{Arity, BinaryOp, Opcode, UnaryOp};
pub use state::{MachineState, Registers};
pub use vm::{Machine, Step};
