//! Decoded instructions and programs

use anyhow::Context;
use std::ops::Index;

use crate::{
    error::{VmError, VmResult},
    opcode::{BinaryOp, Opcode, UnaryOp},
    Word,
};

/// A single decoded instruction. Jump targets are absolute indices into the program.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Instruction {
    /// Push a constant
    LoadC(Word),
    /// Replace the address on top with the given number of words stored there
    Load(usize),
    /// Copy the given number of words below the address on top to that address, then pop the address
    Store(usize),
    /// Push the word at an absolute address
    LoadA(Word),
    /// Write the top word to an absolute address
    StoreA(Word),
    /// Push the word at `fp + offset`
    LoadR(Word),
    /// Write the top word to `fp + offset`
    StoreR(Word),
    /// Push the address `fp + offset`
    LoadRC(Word),
    /// Discard the given number of words
    Pop(usize),
    Dup,
    Jump(usize),
    JumpZ(usize),
    /// Pop an offset and jump to `base + offset`
    JumpI(usize),
    /// Reserve uninitialized stack cells
    Alloc(usize),
    /// Allocate a heap block, its size is taken from the top of the stack
    New,
    Mark,
    Call,
    /// Reserve room for the frame and check for a collision with the heap
    Enter(usize),
    /// Drop words below the top word
    Slide(usize),
    Return,
    Halt,
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl Instruction {
    /// Decode an instruction from its opcode and raw arguments.
    ///
    /// Fails when the argument count doesn't match the opcode's arity, or when a
    /// count or jump target is negative.
    pub fn new(opcode: Opcode, args: &[Word]) -> VmResult<Self> {
        opcode.check_arity(args.len())?;

        let arg = args.first().copied();
        // Counts and targets can't be negative
        let unsigned = |default: usize| -> VmResult<usize> {
            match arg {
                None => Ok(default),
                Some(value) => {
                    usize::try_from(value).map_err(|_| VmError::InvalidArgument { opcode, value })
                }
            }
        };
        let signed = arg.unwrap_or_default();

        let instruction = match opcode {
            Opcode::LoadC => Instruction::LoadC(signed),
            Opcode::Load => Instruction::Load(unsigned(1)?),
            Opcode::Store => Instruction::Store(unsigned(1)?),
            Opcode::LoadA => Instruction::LoadA(signed),
            Opcode::StoreA => Instruction::StoreA(signed),
            Opcode::LoadR => Instruction::LoadR(signed),
            Opcode::StoreR => Instruction::StoreR(signed),
            Opcode::LoadRC => Instruction::LoadRC(signed),
            Opcode::Pop => Instruction::Pop(unsigned(1)?),
            Opcode::Dup => Instruction::Dup,
            Opcode::Jump => Instruction::Jump(unsigned(0)?),
            Opcode::JumpZ => Instruction::JumpZ(unsigned(0)?),
            Opcode::JumpI => Instruction::JumpI(unsigned(0)?),
            Opcode::Alloc => Instruction::Alloc(unsigned(0)?),
            Opcode::New => Instruction::New,
            Opcode::Mark => Instruction::Mark,
            Opcode::Call => Instruction::Call,
            Opcode::Enter => Instruction::Enter(unsigned(0)?),
            Opcode::Slide => Instruction::Slide(unsigned(0)?),
            Opcode::Return => Instruction::Return,
            Opcode::Halt => Instruction::Halt,
            // Every opcode left over is an operator
            other => match (other.binary_op(), other.unary_op()) {
                (Some(op), _) => Instruction::Binary(op),
                (_, Some(op)) => Instruction::Unary(op),
                (None, None) => return Err(VmError::UnknownInstruction(other.to_string())),
            },
        };

        Ok(instruction)
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::LoadC(_) => Opcode::LoadC,
            Instruction::Load(_) => Opcode::Load,
            Instruction::Store(_) => Opcode::Store,
            Instruction::LoadA(_) => Opcode::LoadA,
            Instruction::StoreA(_) => Opcode::StoreA,
            Instruction::LoadR(_) => Opcode::LoadR,
            Instruction::StoreR(_) => Opcode::StoreR,
            Instruction::LoadRC(_) => Opcode::LoadRC,
            Instruction::Pop(_) => Opcode::Pop,
            Instruction::Dup => Opcode::Dup,
            Instruction::Jump(_) => Opcode::Jump,
            Instruction::JumpZ(_) => Opcode::JumpZ,
            Instruction::JumpI(_) => Opcode::JumpI,
            Instruction::Alloc(_) => Opcode::Alloc,
            Instruction::New => Opcode::New,
            Instruction::Mark => Opcode::Mark,
            Instruction::Call => Opcode::Call,
            Instruction::Enter(_) => Opcode::Enter,
            Instruction::Slide(_) => Opcode::Slide,
            Instruction::Return => Opcode::Return,
            Instruction::Halt => Opcode::Halt,
            Instruction::Binary(op) => op.opcode(),
            Instruction::Unary(op) => op.opcode(),
        }
    }

    /// Arguments in their raw form. Optional arguments are always spelled out.
    pub fn args(&self) -> Vec<Word> {
        match *self {
            Instruction::LoadC(v)
            | Instruction::LoadA(v)
            | Instruction::StoreA(v)
            | Instruction::LoadR(v)
            | Instruction::StoreR(v)
            | Instruction::LoadRC(v) => vec![v],
            Instruction::Load(n)
            | Instruction::Store(n)
            | Instruction::Pop(n)
            | Instruction::Jump(n)
            | Instruction::JumpZ(n)
            | Instruction::JumpI(n)
            | Instruction::Alloc(n)
            | Instruction::Enter(n)
            | Instruction::Slide(n) => vec![n as Word],
            _ => Vec::new(),
        }
    }
}

/// Index-addressed sequence of instructions, immutable once built
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program { instructions }
    }

    /// Build a program from mnemonic and argument pairs, e.g. `("LOADC", &[3])`.
    pub fn from_mnemonics(lines: &[(&str, &[Word])]) -> anyhow::Result<Self> {
        let instructions = lines
            .iter()
            .enumerate()
            .map(|(index, (name, args))| {
                let opcode: Opcode = name
                    .parse()
                    .with_context(|| format!("instruction {index}"))?;
                Instruction::new(opcode, args)
                    .with_context(|| format!("instruction {index} ({opcode})"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Program { instructions })
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Program::new(instructions)
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Self::Output {
        &self.instructions[index]
    }
}
