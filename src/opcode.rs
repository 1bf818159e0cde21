//! Instruction set: the closed set of operation kinds and their operator tables

use std::{fmt, str::FromStr};

use crate::{
    error::{VmError, VmResult},
    Word,
};

/// Number of arguments an opcode takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    /// Zero up to the given number of arguments
    AtMost(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtMost(n) => count <= n,
        }
    }

}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtMost(1) => f.write_str("0 or 1"),
            Arity::AtMost(n) => write!(f, "0 to {n}"),
        }
    }
}

// Generates `Opcode` together with its mnemonic and arity tables from one list,
// so adding an opcode in one place keeps the lookups in sync.
macro_rules! impl_opcodes {
    ($($(#[doc = $doc:expr])* $variant:ident => $mnemonic:literal, $arity:expr;)*) => {
        /// Operation kind of an instruction
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $($(#[doc = $doc])* $variant,)*
        }

        impl Opcode {
            /// All opcodes in table order
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];

            /// Upper-case mnemonic of the opcode
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$variant => $mnemonic,)*
                }
            }

            pub const fn arity(self) -> Arity {
                match self {
                    $(Opcode::$variant => $arity,)*
                }
            }
        }

        impl FromStr for Opcode {
            type Err = VmError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name.to_ascii_uppercase().as_str() {
                    $($mnemonic => Ok(Opcode::$variant),)*
                    _ => Err(VmError::UnknownInstruction(name.to_string())),
                }
            }
        }
    };
}

impl_opcodes! {
    /// LOADC c ; push c
    LoadC => "LOADC", Arity::Exactly(1);
    /// LOAD [n] ; replace the address on top with the n words stored there
    Load => "LOAD", Arity::AtMost(1);
    /// STORE [n] ; copy the n words below the address on top to that address
    Store => "STORE", Arity::AtMost(1);
    /// LOADA a ; push the word at address a
    LoadA => "LOADA", Arity::Exactly(1);
    /// STOREA a ; write the top word to address a
    StoreA => "STOREA", Arity::Exactly(1);
    /// LOADR j ; push the word at fp + j
    LoadR => "LOADR", Arity::Exactly(1);
    /// STORER j ; write the top word to fp + j
    StoreR => "STORER", Arity::Exactly(1);
    /// LOADRC j ; push the address fp + j
    LoadRC => "LOADRC", Arity::Exactly(1);
    /// POP [n] ; discard the top word, or the top n words
    Pop => "POP", Arity::AtMost(1);
    /// DUP ; push a copy of the top word
    Dup => "DUP", Arity::Exactly(0);
    /// JUMP t ; continue at t
    Jump => "JUMP", Arity::Exactly(1);
    /// JUMPZ t ; pop, continue at t if the value was zero
    JumpZ => "JUMPZ", Arity::Exactly(1);
    /// JUMPI b ; pop an offset k, continue at b + k
    JumpI => "JUMPI", Arity::Exactly(1);
    /// ALLOC n ; reserve n uninitialized stack cells
    Alloc => "ALLOC", Arity::Exactly(1);
    /// NEW ; replace the size on top with the base address of a fresh heap block
    New => "NEW", Arity::Exactly(0);
    /// MARK ; push ep and fp
    Mark => "MARK", Arity::Exactly(0);
    /// CALL ; jump to the address on top, leaving the return address in its place
    Call => "CALL", Arity::Exactly(0);
    /// ENTER q ; set ep = sp + q and check it against the heap
    Enter => "ENTER", Arity::Exactly(1);
    /// SLIDE m ; drop the m words below the top word
    Slide => "SLIDE", Arity::Exactly(1);
    /// RETURN ; tear down the current frame
    Return => "RETURN", Arity::Exactly(0);
    /// HALT ; stop the machine
    Halt => "HALT", Arity::Exactly(0);
    Add => "ADD", Arity::Exactly(0);
    Sub => "SUB", Arity::Exactly(0);
    Mul => "MUL", Arity::Exactly(0);
    Div => "DIV", Arity::Exactly(0);
    Mod => "MOD", Arity::Exactly(0);
    And => "AND", Arity::Exactly(0);
    Or => "OR", Arity::Exactly(0);
    Xor => "XOR", Arity::Exactly(0);
    Eq => "EQ", Arity::Exactly(0);
    Neq => "NEQ", Arity::Exactly(0);
    /// LE ; less than
    Le => "LE", Arity::Exactly(0);
    Leq => "LEQ", Arity::Exactly(0);
    /// GR ; greater than
    Gr => "GR", Arity::Exactly(0);
    Geq => "GEQ", Arity::Exactly(0);
    Not => "NOT", Arity::Exactly(0);
    Neg => "NEG", Arity::Exactly(0);
}

impl Opcode {
    /// Binary operator computed by this opcode, if it is one
    pub fn binary_op(self) -> Option<BinaryOp> {
        let op = match self {
            Opcode::Add => BinaryOp::Add,
            Opcode::Sub => BinaryOp::Sub,
            Opcode::Mul => BinaryOp::Mul,
            Opcode::Div => BinaryOp::Div,
            Opcode::Mod => BinaryOp::Mod,
            Opcode::And => BinaryOp::And,
            Opcode::Or => BinaryOp::Or,
            Opcode::Xor => BinaryOp::Xor,
            Opcode::Eq => BinaryOp::Eq,
            Opcode::Neq => BinaryOp::Neq,
            Opcode::Le => BinaryOp::Le,
            Opcode::Leq => BinaryOp::Leq,
            Opcode::Gr => BinaryOp::Gr,
            Opcode::Geq => BinaryOp::Geq,
            _ => return None,
        };
        Some(op)
    }

    pub fn unary_op(self) -> Option<UnaryOp> {
        match self {
            Opcode::Not => Some(UnaryOp::Not),
            Opcode::Neg => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    /// Checks `count` against the opcode's arity
    pub fn check_arity(self, count: usize) -> VmResult<()> {
        let arity = self.arity();
        if arity.accepts(count) {
            Ok(())
        } else {
            Err(VmError::ArityMismatch {
                opcode: self,
                expected: arity,
                got: count,
            })
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Two-operand integer operators. Comparisons produce 1 or 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Truncates toward zero
    Div,
    /// Floored: the result has the sign of the divisor
    Mod,
    And,
    Or,
    Xor,
    Eq,
    Neq,
    Le,
    Leq,
    Gr,
    Geq,
}

impl BinaryOp {
    /// Computes `lhs <op> rhs`, where `lhs` is the operand pushed first.
    /// Arithmetic wraps on overflow.
    pub fn apply(self, lhs: Word, rhs: Word) -> VmResult<Word> {
        let value = match self {
            BinaryOp::Add => lhs.wrapping_add(rhs),
            BinaryOp::Sub => lhs.wrapping_sub(rhs),
            BinaryOp::Mul => lhs.wrapping_mul(rhs),
            BinaryOp::Div => {
                if rhs == 0 {
                    return Err(VmError::DivisionByZero);
                }
                lhs.wrapping_div(rhs)
            }
            BinaryOp::Mod => {
                if rhs == 0 {
                    return Err(VmError::DivisionByZero);
                }
                let rem = lhs.wrapping_rem(rhs);
                if rem != 0 && (rem < 0) != (rhs < 0) {
                    rem + rhs
                } else {
                    rem
                }
            }
            BinaryOp::And => lhs & rhs,
            BinaryOp::Or => lhs | rhs,
            BinaryOp::Xor => lhs ^ rhs,
            BinaryOp::Eq => (lhs == rhs) as Word,
            BinaryOp::Neq => (lhs != rhs) as Word,
            BinaryOp::Le => (lhs < rhs) as Word,
            BinaryOp::Leq => (lhs <= rhs) as Word,
            BinaryOp::Gr => (lhs > rhs) as Word,
            BinaryOp::Geq => (lhs >= rhs) as Word,
        };
        Ok(value)
    }

    pub fn opcode(self) -> Opcode {
        match self {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::Mod => Opcode::Mod,
            BinaryOp::And => Opcode::And,
            BinaryOp::Or => Opcode::Or,
            BinaryOp::Xor => Opcode::Xor,
            BinaryOp::Eq => Opcode::Eq,
            BinaryOp::Neq => Opcode::Neq,
            BinaryOp::Le => Opcode::Le,
            BinaryOp::Leq => Opcode::Leq,
            BinaryOp::Gr => Opcode::Gr,
            BinaryOp::Geq => Opcode::Geq,
        }
    }
}

/// Single-operand operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// 0 becomes 1, anything else becomes 0
    Not,
    Neg,
}

impl UnaryOp {
    pub fn apply(self, value: Word) -> Word {
        match self {
            UnaryOp::Not => (value == 0) as Word,
            UnaryOp::Neg => value.wrapping_neg(),
        }
    }

    pub fn opcode(self) -> Opcode {
        match self {
            UnaryOp::Not => Opcode::Not,
            UnaryOp::Neg => Opcode::Neg,
        }
    }
}
