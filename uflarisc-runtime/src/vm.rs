//! The step loop: fetch, decode, dispatch, execute, write-back.

use crate::error::{Result, RuntimeError};
use crate::execute;
use crate::memory::DataMemory;
use crate::state::{MachineState, StopReason};
use tracing::{debug, trace};
use uflarisc_isa::{decode, ExecUnit, Opcode, Program};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Step budget: the run loop executes at most this many cycles before
    /// forcing a [`StopReason::StepLimit`] stop
    pub max_steps: u64,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self { max_steps: 1000 }
    }
}

/// Outcome of a run: how far it got and why it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of completed steps
    pub steps: u64,
    /// Why the engine stopped
    pub stop: StopReason,
}

/// UFLA-RISC virtual machine: one engine exclusively owns one machine state
pub struct Vm {
    program: Program,
    state: MachineState,
    data: DataMemory,
    config: VmConfig,
}

impl Vm {
    /// Create an engine over a loaded program. PC and base address start at
    /// the program's resolved start address; registers and data memory are
    /// zeroed.
    pub fn new(program: Program, config: VmConfig) -> Self {
        let state = MachineState::new(program.start());
        Self {
            program,
            state,
            data: DataMemory::new(),
            config,
        }
    }

    /// Run until the engine stops or an instruction fails to decode or
    /// execute. State remains inspectable afterwards in either case.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        let mut steps = 0;
        while !self.state.is_stopped() {
            if steps >= self.config.max_steps {
                self.state.stop(StopReason::StepLimit { steps });
                break;
            }
            self.step()?;
            steps += 1;
        }

        let stop = self
            .state
            .stopped()
            .cloned()
            .unwrap_or(StopReason::StepLimit { steps });
        debug!(steps, %stop, "run finished");
        Ok(ExecutionResult { steps, stop })
    }

    /// One full cycle. Clean terminations mark the state stopped and return
    /// `Ok`; only undecodable/unexecutable instructions return `Err`.
    fn step(&mut self) -> Result<()> {
        // fetch: running off the instruction store is a clean stop
        let pc = self.state.pc;
        let Some(word) = self.program.word(pc) else {
            self.state.stop(StopReason::PcOutOfRange { pc });
            return Ok(());
        };

        // decode via the shared table
        let decoded = decode(word).map_err(|_| RuntimeError::InvalidOpcode { pc, word })?;
        trace!(pc, op = decoded.opcode.mnemonic(), "step");

        // halt stops the engine before dispatch
        if decoded.opcode == Opcode::Halt {
            self.state.stop(StopReason::Halt { pc });
            return Ok(());
        }

        // dispatch + execute
        let staged = match decoded.opcode.unit() {
            ExecUnit::Branch => {
                execute::branch_unit(&decoded, &mut self.state)?;
                None
            }
            ExecUnit::Memory => execute::memory_unit(&decoded, &mut self.state, &mut self.data)?,
            ExecUnit::Register => {
                execute::register_unit(&decoded, &mut self.state, &mut self.data)?
            }
        };

        // a data-store fault mid-instruction stops the engine at the fault
        // point: no write-back, PC left on the faulting instruction
        if self.state.is_stopped() {
            return Ok(());
        }

        // write-back: commit the staged result into field3, then advance the
        // PC for everything the branch unit didn't already redirect
        if let Some(value) = staged {
            self.state.set(decoded.field3, value)?;
        }
        if !decoded.opcode.is_control_flow() {
            self.state.pc = self.state.pc.wrapping_add(1);
        }

        Ok(())
    }

    /// Current machine state (registers, PC, base, stop reason)
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Data store contents
    pub fn data(&self) -> &DataMemory {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uflarisc_isa::encoding::{
        encode_imm16, encode_target24, encode_three_reg, HALT_WORD,
    };

    fn run_program(code: &[u32]) -> (Vm, ExecutionResult) {
        let program = Program::from_words(code, 0);
        let mut vm = Vm::new(program, VmConfig::default());
        let result = vm.run().expect("execution failed");
        (vm, result)
    }

    #[test]
    fn test_basic_add() {
        let (vm, result) = run_program(&[
            encode_imm16(Opcode::Lcl, 1, 10),
            encode_imm16(Opcode::Lcl, 2, 20),
            encode_three_reg(Opcode::Add, 3, 1, 2),
            HALT_WORD,
        ]);

        assert_eq!(vm.state().registers[3], 30);
        assert_eq!(result.stop, StopReason::Halt { pc: 3 });
        assert_eq!(result.steps, 4);
    }

    #[test]
    fn test_step_budget() {
        // infinite loop: j 0
        let program = Program::from_words(&[encode_target24(Opcode::J, 0)], 0);
        let mut vm = Vm::new(program, VmConfig { max_steps: 25 });
        let result = vm.run().unwrap();
        assert_eq!(result.stop, StopReason::StepLimit { steps: 25 });
        assert_eq!(result.steps, 25);
    }

    #[test]
    fn test_running_off_the_store_is_clean() {
        // one add at the last valid address, no halt: the next fetch is out
        // of range and must stop the engine, not crash it
        let program = Program::from_words(&[encode_three_reg(Opcode::Add, 1, 0, 0)], 32767);
        let mut vm = Vm::new(program, VmConfig::default());
        let result = vm.run().unwrap();
        assert_eq!(result.stop, StopReason::PcOutOfRange { pc: 32768 });
        assert_eq!(result.steps, 2);
    }

    #[test]
    fn test_invalid_opcode_is_an_error() {
        let program = Program::from_words(&[0x0D00_0000], 0);
        let mut vm = Vm::new(program, VmConfig::default());
        let err = vm.run().unwrap_err();
        assert_eq!(
            err,
            RuntimeError::InvalidOpcode {
                pc: 0,
                word: 0x0D00_0000,
            }
        );
    }

    #[test]
    fn test_state_inspectable_after_budget_stop() {
        let program = Program::from_words(&[encode_target24(Opcode::J, 0)], 0);
        let mut vm = Vm::new(program, VmConfig { max_steps: 3 });
        let _ = vm.run().unwrap();
        assert_eq!(vm.state().pc, 0);
        assert!(vm.state().is_stopped());
    }
}
