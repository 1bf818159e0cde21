//! Virtual machine that runs the bytecode

use tracing::{debug, trace, warn};

use crate::{
    bytecode::{Instruction, Program},
    config::{HaltConvention, MachineConfig},
    error::{VmError, VmResult},
    opcode::Opcode,
    state::{MachineState, Registers},
    Word,
};

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The program halted or ran past its last instruction
    Finished(Word),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Running,
    Finished(Word),
    Failed(VmError),
}

/// Whether execution goes on after an instruction
enum Flow {
    Next,
    Halt,
}

/// Virtual machine representation
#[derive(Debug, Clone)]
pub struct Machine {
    program: Program,
    config: MachineConfig,
    state: MachineState,
    status: Status,
    steps: u64,
}

impl Machine {
    pub fn new(program: impl Into<Program>) -> Self {
        Self::with_config(program, MachineConfig::default())
    }

    pub fn with_config(program: impl Into<Program>, config: MachineConfig) -> Self {
        Machine {
            program: program.into(),
            state: MachineState::new(config.memory_size),
            config,
            status: Status::Running,
            steps: 0,
        }
    }

    /// Run until the program finishes and return its result
    pub fn run(&mut self) -> VmResult<Word> {
        loop {
            if let Step::Finished(result) = self.step()? {
                return Ok(result);
            }
        }
    }

    /// Execute exactly one instruction.
    ///
    /// A failed machine keeps returning the error it failed with.
    pub fn step(&mut self) -> VmResult<Step> {
        match &self.status {
            Status::Running => {}
            Status::Finished(_) => return Err(VmError::AlreadyFinished),
            Status::Failed(err) => return Err(err.clone()),
        }

        match self.next_instruction() {
            Ok(Step::Continue) => Ok(Step::Continue),
            Ok(Step::Finished(result)) => {
                debug!(result, steps = self.steps, "machine finished");
                self.status = Status::Finished(result);
                Ok(Step::Finished(result))
            }
            Err(err) => {
                warn!(pc = self.state.regs.pc, error = %err, "machine failed");
                self.status = Status::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn registers(&self) -> Registers {
        self.state.regs
    }

    pub fn memory(&self) -> &[Word] {
        &self.state.memory
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Number of instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Final result, once the program has finished
    pub fn result(&self) -> Option<Word> {
        match self.status {
            Status::Finished(result) => Some(result),
            _ => None,
        }
    }

    fn next_instruction(&mut self) -> VmResult<Step> {
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(VmError::StepLimitExceeded { limit });
            }
        }

        let pc = self.state.regs.pc;
        let instruction = match self.program.get(pc) {
            Some(&instruction) => instruction,
            None => return self.finish(),
        };

        trace!(pc, ?instruction, sp = self.state.regs.sp, "execute");
        self.state.regs.pc += 1;
        self.steps += 1;

        match self.execute(instruction)? {
            Flow::Halt => self.finish(),
            Flow::Next if self.state.regs.pc >= self.program.len() => self.finish(),
            Flow::Next => Ok(Step::Continue),
        }
    }

    fn finish(&self) -> VmResult<Step> {
        let result = match self.config.halt {
            HaltConvention::StackTop => self.state.peek()?,
            HaltConvention::ReturnCell(address) => self.state.read(address as isize)?,
        };
        Ok(Step::Finished(result))
    }

    fn execute(&mut self, instruction: Instruction) -> VmResult<Flow> {
        match instruction {
            Instruction::LoadC(value) => self.state.push(value)?,
            Instruction::Load(n) => self.state.block_load(n)?,
            Instruction::Store(n) => self.state.block_store(n)?,
            Instruction::LoadA(address) => {
                self.state.push(address)?;
                self.state.block_load(1)?;
            }
            Instruction::StoreA(address) => {
                self.state.push(address)?;
                self.state.block_store(1)?;
            }
            Instruction::LoadR(offset) => {
                self.ins_loadrc(offset)?;
                self.state.block_load(1)?;
            }
            Instruction::StoreR(offset) => {
                self.ins_loadrc(offset)?;
                self.state.block_store(1)?;
            }
            Instruction::LoadRC(offset) => self.ins_loadrc(offset)?,
            Instruction::Pop(n) => self.state.discard(n)?,
            Instruction::Dup => {
                let value = self.state.peek()?;
                self.state.push(value)?;
            }
            Instruction::Jump(target) => self.ins_jump(target as i64)?,
            Instruction::JumpZ(target) => {
                if self.state.pop()? == 0 {
                    self.ins_jump(target as i64)?;
                }
            }
            Instruction::JumpI(base) => {
                let offset = self.state.pop()?;
                self.ins_jump(base as i64 + offset as i64)?;
            }
            Instruction::Alloc(n) => self.state.alloc(n)?,
            Instruction::New => self.ins_new()?,
            Instruction::Mark => {
                let Registers { ep, fp, .. } = self.state.regs;
                self.state.push(ep as Word)?;
                self.state.push(fp as Word)?;
            }
            Instruction::Call => self.ins_call()?,
            Instruction::Enter(size) => self.ins_enter(size)?,
            Instruction::Slide(m) => self.ins_slide(m)?,
            Instruction::Return => self.ins_return()?,
            Instruction::Halt => return Ok(Flow::Halt),
            Instruction::Binary(op) => {
                let rhs = self.state.pop()?;
                let lhs = self.state.peek()?;
                self.state.replace_top(op.apply(lhs, rhs)?)?;
            }
            Instruction::Unary(op) => {
                let value = self.state.peek()?;
                self.state.replace_top(op.apply(value))?;
            }
        }

        Ok(Flow::Next)
    }

    /// Push the frame-relative address `fp + offset`
    fn ins_loadrc(&mut self, offset: Word) -> VmResult<()> {
        let address = self.state.regs.fp + offset as isize;
        self.state.push(address as Word)
    }

    /// Jump to an absolute instruction index. Jumping to the end of the program finishes it.
    fn ins_jump(&mut self, target: i64) -> VmResult<()> {
        if target < 0 || target > self.program.len() as i64 {
            return Err(VmError::InvalidJump { target });
        }

        self.state.regs.pc = target as usize;
        Ok(())
    }

    /// Allocate a heap block of the size on top of the stack and replace the size
    /// with the block's base address. The heap is never checked against the stack here.
    fn ins_new(&mut self) -> VmResult<()> {
        let size = self.state.peek()?;
        // np only ever moves down
        if size < 0 {
            return Err(VmError::InvalidArgument {
                opcode: Opcode::New,
                value: size,
            });
        }

        let np = self.state.regs.np - size as isize;
        let address = Word::try_from(np).map_err(|_| VmError::AddressOutOfBounds {
            address: np,
            capacity: self.state.capacity(),
        })?;
        self.state.regs.np = np;
        debug!(size, np, "heap allocation");
        self.state.replace_top(address)
    }

    /// Jump to the function whose address is on top, leaving the return address in its slot.
    /// The slot becomes the new frame pointer.
    fn ins_call(&mut self) -> VmResult<()> {
        let address = self.state.peek()?;
        self.state.replace_top(self.state.regs.pc as Word)?;
        self.state.regs.fp = self.state.regs.sp;
        debug!(address, fp = self.state.regs.fp, "call");
        self.ins_jump(address as i64)
    }

    /// Reserve `size` words for the frame. This and `RETURN` are the only places a
    /// stack/heap collision is detected.
    fn ins_enter(&mut self, size: usize) -> VmResult<()> {
        self.state.regs.ep = self.state.regs.sp + size as isize;
        debug!(ep = self.state.regs.ep, np = self.state.regs.np, "enter");
        self.check_overflow()
    }

    /// Remove `m` words below the top word, keeping the top word
    fn ins_slide(&mut self, m: usize) -> VmResult<()> {
        if m == 0 {
            return Ok(());
        }

        let top = self.state.pop()?;
        self.state.discard(m)?;
        self.state.replace_top(top)
    }

    /// Restore the caller's registers from the frame.
    ///
    /// Frame layout, relative to `fp`:
    ///
    /// ```text
    /// fp      return address
    /// fp - 1  caller's fp
    /// fp - 2  caller's ep
    /// fp - 3  new top of stack after return
    /// ```
    fn ins_return(&mut self) -> VmResult<()> {
        let fp = self.state.regs.fp;
        if fp < 2 {
            return Err(VmError::ReturnWithoutCall);
        }

        let return_address = self.state.read(fp)?;
        self.ins_jump(return_address as i64)?;
        self.state.regs.ep = self.state.read(fp - 2)? as isize;
        self.check_overflow()?;
        self.state.regs.sp = fp - 3;
        self.state.regs.fp = self.state.read(fp - 1)? as isize;
        debug!(pc = self.state.regs.pc, fp = self.state.regs.fp, "return");
        Ok(())
    }

    fn check_overflow(&self) -> VmResult<()> {
        let Registers { ep, np, .. } = self.state.regs;
        if ep >= np {
            return Err(VmError::StackOverflow { ep, np });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::{BinaryOp, UnaryOp};
    use std::mem::discriminant;
    use Instruction::*;

    fn stack_top() -> MachineConfig {
        MachineConfig::default().with_halt(HaltConvention::StackTop)
    }

    /// Step until `instruction` is next, execute it, and hand back the machine
    fn run_until_instruction(program: Vec<Instruction>, instruction: Instruction) -> Machine {
        let mut vm = Machine::with_config(program, stack_top());
        loop {
            let next = vm.program.get(vm.state.regs.pc).copied();
            vm.step().unwrap();
            if next.map(|next| discriminant(&next)) == Some(discriminant(&instruction)) {
                return vm;
            }
            assert!(vm.result().is_none(), "process is halted unexpectedly");
        }
    }

    fn run(program: Vec<Instruction>) -> VmResult<Word> {
        Machine::with_config(program, stack_top()).run()
    }

    #[test]
    fn load() {
        let vm = run_until_instruction(vec![LoadC(10), LoadC(20), Halt], LoadC(0));
        assert_eq!(vm.state().stack(), &[10]);

        let vm = run_until_instruction(vec![LoadC(10), LoadC(20), Dup, Halt], Dup);
        assert_eq!(vm.state().stack(), &[10, 20, 20]);
        assert_eq!(vm.registers().sp, 2);
    }

    #[test]
    fn add_then_halt() {
        assert_eq!(
            run(vec![LoadC(3), LoadC(4), Binary(BinaryOp::Add), Halt]),
            Ok(7)
        );
    }

    #[test]
    fn arithmetic() {
        let base = [LoadC(6), LoadC(4)];
        let cases = [
            (BinaryOp::Sub, 2),
            (BinaryOp::Mul, 24),
            (BinaryOp::Div, 1),
            (BinaryOp::Mod, 2),
            (BinaryOp::Gr, 1),
            (BinaryOp::Leq, 0),
        ];
        for (op, expected) in cases {
            let mut program = base.to_vec();
            program.push(Binary(op));
            let vm = run_until_instruction(program, Binary(op));
            assert_eq!(vm.state().stack(), &[expected], "{op:?}");
        }

        assert_eq!(run(vec![LoadC(-7), LoadC(2), Binary(BinaryOp::Div)]), Ok(-3));
        assert_eq!(run(vec![LoadC(-7), LoadC(2), Binary(BinaryOp::Mod)]), Ok(1));
        assert_eq!(run(vec![LoadC(0), Unary(UnaryOp::Not)]), Ok(1));
        assert_eq!(run(vec![LoadC(9), Unary(UnaryOp::Neg)]), Ok(-9));
    }

    #[test]
    fn division_by_zero() {
        let mut vm = Machine::with_config(
            vec![LoadC(1), LoadC(0), Binary(BinaryOp::Div), Halt],
            stack_top(),
        );
        assert_eq!(vm.run(), Err(VmError::DivisionByZero));
        // The machine stays failed
        assert_eq!(vm.step(), Err(VmError::DivisionByZero));
        assert_eq!(vm.steps(), 3);
    }

    #[test]
    fn store_and_load_absolute() {
        // x = 42 at address 7, then read it back through LOAD
        let program = vec![
            Alloc(8),
            LoadC(42),
            StoreA(7),
            Pop(1),
            LoadC(7),
            Load(1),
            Halt,
        ];
        let mut vm = Machine::with_config(program, stack_top());
        assert_eq!(vm.run(), Ok(42));
        assert_eq!(vm.memory()[7], 42);
        assert_eq!(vm.registers().sp, 8);

        assert_eq!(
            run(vec![LoadC(5), StoreA(3), LoadA(3), Binary(BinaryOp::Add)]),
            Ok(10)
        );
    }

    #[test]
    fn block_copy() {
        // Copy two words from 0..2 to 5..7 and load them back
        let program = vec![
            LoadC(11),
            LoadC(22),
            LoadC(5),
            Store(2),
            Pop(2),
            LoadC(5),
            Load(2),
            Halt,
        ];
        let mut vm = Machine::with_config(program, stack_top());
        assert_eq!(vm.run(), Ok(22));
        assert_eq!(&vm.memory()[5..7], &[11, 22]);
        assert_eq!(vm.state().stack(), &[11, 22]);
    }

    #[test]
    fn pop() {
        let vm = run_until_instruction(vec![LoadC(1), LoadC(2), LoadC(3), Pop(2)], Pop(0));
        assert_eq!(vm.registers().sp, 0);
        // Memory above the stack is untouched
        assert_eq!(&vm.memory()[..3], &[1, 2, 3]);

        assert_eq!(run(vec![LoadC(1), Pop(2)]), Err(VmError::StackUnderflow));
    }

    #[test]
    fn jumps() {
        let vm = run_until_instruction(vec![Jump(2), LoadC(1), LoadC(2), Halt], Jump(0));
        assert_eq!(vm.registers().pc, 2);

        // if 0 then 10 else 20
        let program = |cond| {
            vec![
                LoadC(cond),
                JumpZ(4),
                LoadC(10),
                Halt,
                LoadC(20),
                Halt,
            ]
        };
        assert_eq!(run(program(1)), Ok(10));
        assert_eq!(run(program(0)), Ok(20));

        assert_eq!(
            run(vec![Jump(9), Halt]),
            Err(VmError::InvalidJump { target: 9 })
        );
    }

    #[test]
    fn computed_jump() {
        let program = |case| {
            vec![
                LoadC(case),
                JumpI(3),
                Halt,
                Jump(6),
                Jump(8),
                Jump(10),
                LoadC(100),
                Halt,
                LoadC(200),
                Halt,
                LoadC(300),
                Halt,
            ]
        };
        assert_eq!(run(program(0)), Ok(100));
        assert_eq!(run(program(1)), Ok(200));
        assert_eq!(run(program(2)), Ok(300));

        let vm = run_until_instruction(program(2), JumpI(0));
        assert_eq!(vm.registers().pc, 5);
        assert_eq!(vm.registers().sp, -1);

        assert_eq!(run(program(-4)), Err(VmError::InvalidJump { target: -1 }));
    }

    #[test]
    fn loop_counts_down() {
        // i = 5; sum = 0; while i { sum += i; i -= 1 } ; cells 0 and 1
        let program = vec![
            Alloc(2),
            LoadC(5),
            StoreA(0),
            Pop(1),
            LoadA(0),
            JumpZ(18),
            LoadA(1),
            LoadA(0),
            Binary(BinaryOp::Add),
            StoreA(1),
            Pop(1),
            LoadA(0),
            LoadC(1),
            Binary(BinaryOp::Sub),
            StoreA(0),
            Pop(1),
            Jump(4),
            Halt,
            LoadA(1),
            Halt,
        ];
        assert_eq!(run(program), Ok(15));
    }

    #[test]
    fn heap_allocation() {
        let program = vec![LoadC(3), New, LoadC(4), New, Halt];
        let mut vm = Machine::with_config(program, stack_top());
        assert_eq!(vm.run(), Ok(192));
        assert_eq!(vm.state().stack(), &[196, 192]);
        assert_eq!(vm.registers().np, 192);
    }

    #[test]
    fn heap_store_and_load() {
        // p = new(2) kept in cell 0; *p = 9; return *p
        let program = vec![
            LoadC(2),
            New,
            LoadC(9),
            LoadA(0),
            Store(1),
            Pop(1),
            LoadA(0),
            Load(1),
            Halt,
        ];
        let mut vm = Machine::with_config(program, stack_top());
        assert_eq!(vm.run(), Ok(9));
        assert_eq!(vm.memory()[197], 9);
        assert_eq!(vm.registers().np, 197);
    }

    #[test]
    fn heap_allocation_rejects_negative_size() {
        let mut vm = Machine::with_config(vec![LoadC(i32::MIN), New, Halt], stack_top());
        let err = VmError::InvalidArgument {
            opcode: Opcode::New,
            value: i32::MIN,
        };
        assert_eq!(vm.run(), Err(err.clone()));
        assert_eq!(vm.registers().np, 199);
        assert_eq!(vm.state().stack(), &[i32::MIN]);
        assert_eq!(vm.step(), Err(err));

        assert_eq!(
            run(vec![LoadC(-1), New, Halt]).unwrap_err().to_string(),
            "invalid argument -1 for NEW"
        );
    }

    #[test]
    fn heap_address_past_word_range() {
        let program = vec![LoadC(i32::MAX), New, LoadC(i32::MAX), New, Halt];
        let mut vm = Machine::with_config(program, stack_top());
        assert_eq!(
            vm.run(),
            Err(VmError::AddressOutOfBounds {
                address: 199 - 2 * i32::MAX as isize,
                capacity: 200,
            })
        );
        assert_eq!(vm.registers().np, 199 - i32::MAX as isize);
        assert_eq!(vm.state().stack(), &[199 - i32::MAX, i32::MAX]);
    }

    /// square(x) with x = 5 through the full calling convention
    fn square_program() -> Vec<Instruction> {
        vec![
            Alloc(1), // result cell 0
            LoadC(5), // x
            Alloc(1), // return value slot
            Mark,
            LoadC(8),
            Call,
            Slide(1),
            Halt,
            // square
            Enter(2),
            LoadR(-4),
            LoadR(-4),
            Binary(BinaryOp::Mul),
            StoreR(-3),
            Return,
        ]
    }

    #[test]
    fn call_and_return() {
        let mut vm = Machine::new(square_program());
        // The caller reserves the result cell before the call sequence starts,
        // so the registers are compared from that point on
        vm.step().unwrap();
        let before = vm.registers();

        assert_eq!(vm.run(), Ok(25));
        let after = vm.registers();
        assert_eq!(after.sp, before.sp);
        assert_eq!(after.fp, before.fp);
        assert_eq!(after.ep, before.ep);
        assert_eq!(vm.memory()[0], 25);
    }

    #[test]
    fn frame_layout() {
        let mut vm = Machine::new(square_program());
        // Up to and including ENTER
        for _ in 0..7 {
            vm.step().unwrap();
        }

        let regs = vm.registers();
        assert_eq!(regs.pc, 9);
        assert_eq!(regs.fp, 5);
        assert_eq!(regs.sp, 5);
        assert_eq!(regs.ep, 7);
        // return address, caller's fp, caller's ep, return slot, parameter
        assert_eq!(vm.memory()[5], 6);
        assert_eq!(vm.memory()[4], -1);
        assert_eq!(vm.memory()[3], -1);
        assert_eq!(vm.memory()[1], 5);

        vm.step().unwrap();
        assert_eq!(vm.state().stack().last(), Some(&5));
    }

    #[test]
    fn frame_relative_address() {
        let program = vec![
            Alloc(1),
            Mark,
            LoadC(5),
            Call,
            Halt,
            LoadRC(2),
            LoadRC(-2),
            Halt,
        ];
        let mut vm = Machine::with_config(program, stack_top());
        assert_eq!(vm.run(), Ok(1));
        assert_eq!(vm.registers().fp, 3);
        assert_eq!(vm.state().stack()[4], 5);
    }

    /// fac(5), each level calls itself with n - 1
    fn factorial_program(n: Word) -> Vec<Instruction> {
        vec![
            Alloc(1),
            LoadC(n),
            Alloc(1),
            Mark,
            LoadC(9),
            Call,
            Slide(1),
            Pop(1),
            Halt,
            // fac
            Enter(7),
            LoadR(-4),
            LoadC(1),
            Binary(BinaryOp::Leq),
            JumpZ(18),
            LoadC(1),
            StoreR(-3),
            Pop(1),
            Return,
            LoadR(-4),
            Alloc(1),
            LoadR(-4),
            LoadC(1),
            Binary(BinaryOp::Sub),
            Alloc(1),
            Mark,
            LoadC(9),
            Call,
            Slide(1),
            Binary(BinaryOp::Mul),
            StoreR(-3),
            Pop(1),
            Return,
        ]
    }

    #[test]
    fn recursive_factorial() {
        let mut vm = Machine::new(factorial_program(5));
        loop {
            if vm.program()[vm.registers().pc] == Halt {
                break;
            }
            vm.step().unwrap();
        }
        let regs = vm.registers();
        assert_eq!(regs.sp, -1);
        assert_eq!(regs.fp, -1);
        assert_eq!(regs.ep, -1);

        assert_eq!(vm.step(), Ok(Step::Finished(120)));
        assert_eq!(vm.result(), Some(120));
        assert_eq!(vm.step(), Err(VmError::AlreadyFinished));
    }

    #[test]
    fn deep_recursion_overflows() {
        let mut vm = Machine::new(factorial_program(40));
        assert!(matches!(vm.run(), Err(VmError::StackOverflow { .. })));
        assert!(vm.registers().ep >= vm.registers().np);
    }

    #[test]
    fn heap_exhaustion_overflows_on_enter() {
        let program = vec![
            LoadC(20),
            New,
            Pop(1),
            Alloc(1),
            Mark,
            LoadC(9),
            Call,
            Pop(1),
            Jump(0),
            Enter(2),
            Return,
        ];
        let mut vm = Machine::new(program);
        assert_eq!(vm.run(), Err(VmError::StackOverflow { ep: 5, np: -1 }));
        assert_eq!(vm.registers().np, -1);
    }

    #[test]
    fn heap_growth_overflows_on_return() {
        let program = vec![
            Enter(50),
            Alloc(1),
            Mark,
            LoadC(6),
            Call,
            Halt,
            Enter(1),
            LoadC(160),
            New,
            Pop(1),
            Return,
        ];
        let mut vm = Machine::new(program);
        assert_eq!(vm.run(), Err(VmError::StackOverflow { ep: 49, np: 39 }));
    }

    #[test]
    fn return_without_call() {
        assert_eq!(run(vec![Return]), Err(VmError::ReturnWithoutCall));
    }

    #[test]
    fn slide() {
        let program = vec![LoadC(1), LoadC(2), LoadC(3), LoadC(4), Slide(2)];
        let vm = run_until_instruction(program, Slide(0));
        // The word below the removed ones is overwritten by the top word
        assert_eq!(vm.state().stack(), &[4]);

        let vm = run_until_instruction(vec![LoadC(1), LoadC(2), Slide(0)], Slide(0));
        assert_eq!(vm.state().stack(), &[1, 2]);
    }

    #[test]
    fn running_off_the_end() {
        assert_eq!(run(vec![LoadC(3), LoadC(4)]), Ok(4));

        let mut vm = Machine::with_config(vec![LoadC(3)], stack_top());
        assert_eq!(vm.step(), Ok(Step::Finished(3)));

        assert_eq!(run(vec![]), Err(VmError::StackUnderflow));
        assert_eq!(Machine::new(Program::default()).run(), Ok(0));
    }

    #[test]
    fn return_cell_out_of_bounds() {
        let config = MachineConfig::default().with_halt(HaltConvention::ReturnCell(500));
        assert_eq!(
            Machine::with_config(vec![Halt], config).run(),
            Err(VmError::AddressOutOfBounds {
                address: 500,
                capacity: 200
            })
        );
    }

    #[test]
    fn step_limit() {
        let config = stack_top().with_step_limit(10);
        let mut vm = Machine::with_config(vec![LoadC(1), Jump(0)], config);
        assert_eq!(vm.run(), Err(VmError::StepLimitExceeded { limit: 10 }));
        assert_eq!(vm.steps(), 10);
    }

    #[test]
    fn memory_size() {
        let config = stack_top().with_memory_size(2);
        assert_eq!(
            Machine::with_config(vec![LoadC(1), LoadC(2), LoadC(3)], config).run(),
            Err(VmError::MemoryExhausted {
                requested: 2,
                capacity: 2
            })
        );
    }
}
