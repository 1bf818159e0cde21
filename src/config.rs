//! Machine configuration

/// Where the final result of a run is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltConvention {
    /// The word on top of the stack. Programs without function calls use this.
    StackTop,
    /// A fixed memory cell, by convention cell 0
    ReturnCell(usize),
}

impl Default for HaltConvention {
    fn default() -> Self {
        HaltConvention::ReturnCell(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of cells shared by the stack and the heap
    pub memory_size: usize,
    pub halt: HaltConvention,
    /// Maximum number of instructions to execute, unbounded if `None`
    pub step_limit: Option<u64>,
}

impl MachineConfig {
    pub const DEFAULT_MEMORY_SIZE: usize = 200;

    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn with_halt(mut self, halt: HaltConvention) -> Self {
        self.halt = halt;
        self
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            memory_size: Self::DEFAULT_MEMORY_SIZE,
            halt: HaltConvention::default(),
            step_limit: None,
        }
    }
}
