//! Machine state: the shared memory array, the registers and the stack primitives
//! every instruction is built from.
//!
//! Memory layout, low to high addresses:
//!
//! ```text
//! 0 .. sp          stack, grows upward; activation frames live inside it
//! sp+1 .. np-1     free
//! np .. N-1        heap, grows downward
//! ```

use crate::{
    error::{VmError, VmResult},
    Word,
};

/// The five machine registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Index of the next instruction
    pub pc: usize,
    /// Address of the top of the stack, -1 when empty
    pub sp: isize,
    /// Address of the current frame's return address slot
    pub fp: isize,
    /// Highest address the current frame may use
    pub ep: isize,
    /// Lowest heap address in use, decreases on allocation
    pub np: isize,
}

impl Registers {
    fn new(memory_size: usize) -> Self {
        Registers {
            pc: 0,
            sp: -1,
            fp: -1,
            ep: -1,
            np: memory_size as isize - 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub memory: Vec<Word>,
    pub regs: Registers,
}

impl MachineState {
    /// Zero-filled memory of `memory_size` cells with registers at their initial values
    pub fn new(memory_size: usize) -> Self {
        MachineState {
            memory: vec![0; memory_size],
            regs: Registers::new(memory_size),
        }
    }

    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    /// Validates `address` and converts it to an index
    fn index(&self, address: isize) -> VmResult<usize> {
        if address < 0 || address as usize >= self.memory.len() {
            return Err(VmError::AddressOutOfBounds {
                address,
                capacity: self.memory.len(),
            });
        }
        Ok(address as usize)
    }

    /// Validates the `len` cells starting at `address`
    fn range(&self, address: isize, len: usize) -> VmResult<std::ops::Range<usize>> {
        let start = self.index(address)?;
        if len > 0 {
            self.index(address + len as isize - 1)?;
        }
        Ok(start..start + len)
    }

    pub fn read(&self, address: isize) -> VmResult<Word> {
        Ok(self.memory[self.index(address)?])
    }

    pub fn write(&mut self, address: isize, value: Word) -> VmResult<()> {
        let index = self.index(address)?;
        self.memory[index] = value;
        Ok(())
    }

    /// Sets the stack pointer, checking it stays between an empty stack and the last cell
    fn set_sp(&mut self, sp: isize) -> VmResult<()> {
        if sp < -1 {
            return Err(VmError::StackUnderflow);
        }
        if sp >= self.memory.len() as isize {
            return Err(VmError::MemoryExhausted {
                requested: sp,
                capacity: self.memory.len(),
            });
        }
        self.regs.sp = sp;
        Ok(())
    }

    pub fn push(&mut self, value: Word) -> VmResult<()> {
        self.set_sp(self.regs.sp + 1)?;
        self.memory[self.regs.sp as usize] = value;
        Ok(())
    }

    pub fn pop(&mut self) -> VmResult<Word> {
        let value = self.peek()?;
        self.regs.sp -= 1;
        Ok(value)
    }

    pub fn peek(&self) -> VmResult<Word> {
        if self.regs.sp < 0 {
            return Err(VmError::StackUnderflow);
        }
        self.read(self.regs.sp)
    }

    pub fn replace_top(&mut self, value: Word) -> VmResult<()> {
        if self.regs.sp < 0 {
            return Err(VmError::StackUnderflow);
        }
        self.write(self.regs.sp, value)
    }

    /// Replaces the address on top with the `n` words stored at that address.
    /// With `n == 0` the address is just consumed.
    pub fn block_load(&mut self, n: usize) -> VmResult<()> {
        let address = self.peek()? as isize;
        if n == 0 {
            return self.set_sp(self.regs.sp - 1);
        }

        let source = self.range(address, n)?;
        let sp = self.regs.sp;
        let dest = self.range(sp, n).map_err(|_| VmError::MemoryExhausted {
            requested: sp + n as isize - 1,
            capacity: self.memory.len(),
        })?;
        self.memory.copy_within(source, dest.start);
        self.regs.sp += n as isize - 1;
        Ok(())
    }

    /// Copies the `n` words directly below the address on top to that address,
    /// then pops the address. The copied words stay on the stack.
    pub fn block_store(&mut self, n: usize) -> VmResult<()> {
        let address = self.peek()? as isize;
        let sp = self.regs.sp;
        if sp - (n as isize) < 0 {
            return Err(VmError::StackUnderflow);
        }

        if n > 0 {
            let source = self.range(sp - n as isize, n)?;
            let dest = self.range(address, n)?;
            self.memory.copy_within(source, dest.start);
        }
        self.regs.sp -= 1;
        Ok(())
    }

    /// Reserves `n` uninitialized cells on top of the stack
    pub fn alloc(&mut self, n: usize) -> VmResult<()> {
        self.set_sp(self.regs.sp + n as isize)
    }

    /// Drops the top `n` cells without touching memory
    pub fn discard(&mut self, n: usize) -> VmResult<()> {
        self.set_sp(self.regs.sp - n as isize)
    }

    /// Stack contents from the bottom up to `sp`
    pub fn stack(&self) -> &[Word] {
        &self.memory[..(self.regs.sp + 1) as usize]
    }
}
