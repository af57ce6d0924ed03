//! Per-instruction execution, split by dispatch unit.
//!
//! Register-unit instructions stage their result for the write-back stage
//! (destination is always operand field3); the stack ops and `pop` commit
//! their own register/memory effects directly. The branch unit sets the PC
//! itself and stages nothing.
//!
//! All arithmetic wraps to 32 bits. Division by zero yields 0. The four
//! shift variants (`asl`, `asr`, `lsl`, `lsr`) all perform the same plain
//! 1-bit shift; `ret` reads r31 directly without popping, asymmetric with
//! `call`/`push`. Both behaviors are fixed points of this ISA, not bugs to
//! repair.

use crate::error::{Result, RuntimeError};
use crate::memory::DataMemory;
use crate::state::{MachineState, StopReason};
use tracing::debug;
use uflarisc_isa::{Address, Decoded, Opcode, Register, Word};

const LOW_HALF: Word = 0x0000_FFFF;
const HIGH_HALF: Word = 0xFFFF_0000;

/// Register/ALU unit. Returns the staged write-back value, if any.
pub(crate) fn register_unit(
    decoded: &Decoded,
    state: &mut MachineState,
    data: &mut DataMemory,
) -> Result<Option<Word>> {
    let Decoded {
        opcode,
        field1,
        field2,
        field3,
        ..
    } = *decoded;

    let staged = match opcode {
        Opcode::Add => Some(state.get(field1)?.wrapping_add(state.get(field2)?)),
        Opcode::Sub => Some(state.get(field1)?.wrapping_sub(state.get(field2)?)),
        Opcode::Xor => Some(state.get(field1)? ^ state.get(field2)?),
        Opcode::Or => Some(state.get(field1)? | state.get(field2)?),
        Opcode::And => Some(state.get(field1)? & state.get(field2)?),
        Opcode::Mult => Some(state.get(field1)?.wrapping_mul(state.get(field2)?)),
        Opcode::Div => {
            let divisor = state.get(field2)?;
            Some(if divisor == 0 {
                0
            } else {
                state.get(field1)? / divisor
            })
        }
        Opcode::Inc => Some(state.get(field3)?.wrapping_add(1)),
        Opcode::Dec => Some(state.get(field3)?.wrapping_sub(1)),
        Opcode::Zeros => Some(0),
        Opcode::PassNotA => Some(!state.get(field1)?),
        Opcode::PassA => Some(state.get(field1)?),
        Opcode::Lcl => {
            let imm = imm16(field1, field2);
            Some((state.get(field3)? & HIGH_HALF) | imm)
        }
        Opcode::Lch => {
            let imm = imm16(field1, field2);
            Some((imm << 16) | (state.get(field3)? & LOW_HALF))
        }
        // all four shift variants collapse to the same 1-bit shift
        Opcode::Asl | Opcode::Lsl => Some(state.get(field1)? << 1),
        Opcode::Asr | Opcode::Lsr => Some(state.get(field1)? >> 1),
        Opcode::Push => {
            push(state, data, field1)?;
            None
        }
        Opcode::Pop => {
            pop(state, data, field2)?;
            None
        }
        Opcode::Call => {
            call(state, data, field1)?;
            None
        }
        Opcode::Cmp => {
            return Err(RuntimeError::Unimplemented {
                mnemonic: opcode.mnemonic(),
                pc: state.pc,
            })
        }
        _ => unreachable!("{opcode} dispatched to the register unit"),
    };

    Ok(staged)
}

/// Memory unit (load, store). `load` stages the read value for write-back.
pub(crate) fn memory_unit(
    decoded: &Decoded,
    state: &mut MachineState,
    data: &mut DataMemory,
) -> Result<Option<Word>> {
    match decoded.opcode {
        Opcode::Load => {
            let address = state.base.wrapping_add(state.get(decoded.field1)?);
            Ok(load_or_fault(state, data, address))
        }
        Opcode::Store => {
            let address = state.base.wrapping_add(state.get(decoded.field3)?);
            let value = state.get(decoded.field1)?;
            store_or_fault(state, data, address, value);
            Ok(None)
        }
        other => unreachable!("{other} dispatched to the memory unit"),
    }
}

/// Branch/jump unit: sets the PC itself; the write-back stage leaves it be.
pub(crate) fn branch_unit(decoded: &Decoded, state: &mut MachineState) -> Result<()> {
    // decode always supplies an in-word target for j/jal/beq/bne
    let target = decoded.target.unwrap_or(0);

    match decoded.opcode {
        Opcode::J => state.pc = state.base.wrapping_add(target),
        Opcode::Jal => {
            state.write(Register::SP, state.pc.wrapping_add(1));
            state.pc = state.base.wrapping_add(target);
        }
        Opcode::Jr => state.pc = state.base.wrapping_add(state.get(decoded.field1)?),
        Opcode::Beq => {
            let a = state.get(decoded.field1)?;
            let b = state.get(decoded.field2)?;
            debug!(a, b, taken = (a == b), "beq");
            if a == b {
                state.pc = state.base.wrapping_add(target);
            } else {
                state.pc = state.pc.wrapping_add(1);
            }
        }
        Opcode::Bne => {
            let a = state.get(decoded.field1)?;
            let b = state.get(decoded.field2)?;
            debug!(a, b, taken = (a != b), "bne");
            if a != b {
                state.pc = state.base.wrapping_add(target);
            } else {
                state.pc = state.pc.wrapping_add(1);
            }
        }
        // r31 is treated as the return address itself; nothing is popped
        Opcode::Ret => state.pc = state.base.wrapping_add(state.read(Register::SP)),
        other => unreachable!("{other} dispatched to the branch unit"),
    }

    Ok(())
}

#[inline]
const fn imm16(field1: u8, field2: u8) -> Word {
    ((field1 as Word) << 8) | field2 as Word
}

/// push ra: decrement r31, then store through it
fn push(state: &mut MachineState, data: &mut DataMemory, field1: u8) -> Result<()> {
    let value = state.get(field1)?;
    let sp = state.read(Register::SP).wrapping_sub(1);
    state.write(Register::SP, sp);
    store_or_fault(state, data, sp, value);
    Ok(())
}

/// pop rc: read through r31 into rc, then increment r31
fn pop(state: &mut MachineState, data: &mut DataMemory, field2: u8) -> Result<()> {
    let sp = state.read(Register::SP);
    let Some(value) = load_or_fault(state, data, sp) else {
        return Ok(());
    };
    state.set(field2, value)?;
    state.write(Register::SP, sp.wrapping_add(1));
    Ok(())
}

/// call ra: push the return address, then jump to the absolute register
/// content (no base offset). Runs on the register unit, so write-back still
/// bumps the PC afterwards.
fn call(state: &mut MachineState, data: &mut DataMemory, field1: u8) -> Result<()> {
    let sp = state.read(Register::SP).wrapping_sub(1);
    state.write(Register::SP, sp);
    let link = state.pc.wrapping_add(1);
    if data.store(sp, link).is_none() {
        state.stop(StopReason::AddressFault {
            address: sp,
            pc: state.pc,
        });
        return Ok(());
    }
    state.pc = state.get(field1)?;
    Ok(())
}

fn load_or_fault(state: &mut MachineState, data: &DataMemory, address: Address) -> Option<Word> {
    let value = data.load(address);
    if value.is_none() {
        state.stop(StopReason::AddressFault {
            address,
            pc: state.pc,
        });
    }
    value
}

fn store_or_fault(state: &mut MachineState, data: &mut DataMemory, address: Address, value: Word) {
    if data.store(address, value).is_none() {
        state.stop(StopReason::AddressFault {
            address,
            pc: state.pc,
        });
    }
}
