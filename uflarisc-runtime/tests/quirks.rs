//! Pins for the ISA's deliberate oddities. These behaviors look like bugs
//! and are not: they are part of the instruction set's contract and must
//! survive any refactor.

use uflarisc_assembler::{assemble, AssemblerError};
use uflarisc_loader::load;
use uflarisc_isa::encoding::{
    encode_bare, encode_imm16, encode_pop, encode_reg_pair, encode_src_reg, HALT_WORD,
};
use uflarisc_isa::{Opcode, Program};
use uflarisc_runtime::{RuntimeError, StopReason, Vm, VmConfig};

fn run_words(code: &[u32]) -> Vm {
    let program = Program::from_words(code, 0);
    let mut vm = Vm::new(program, VmConfig::default());
    vm.run().expect("execution failed");
    vm
}

#[test]
fn shift_variants_all_collapse_to_one_bit_shifts() {
    // asl/asr have no assembly form, so build the words directly
    let asl = encode_reg_pair(Opcode::Asl, 1, 2);
    let asr = encode_reg_pair(Opcode::Asr, 1, 3);

    let vm = run_words(&[encode_imm16(Opcode::Lcl, 1, 5), asl, asr, HALT_WORD]);
    // "arithmetic" left and right are plain single-bit shifts
    assert_eq!(vm.state().registers[2], 10);
    assert_eq!(vm.state().registers[3], 2);

    // and the logical variants behave identically
    let binary = assemble("lcl r1, 5\nlsl r2, r1, r0\nlsr r3, r1, r0\nhalt\n").unwrap();
    let mut vm = Vm::new(load(&binary).unwrap(), VmConfig::default());
    vm.run().unwrap();
    assert_eq!(vm.state().registers[2], 10);
    assert_eq!(vm.state().registers[3], 2);
}

#[test]
fn ret_reads_the_stack_pointer_without_popping() {
    // r31 itself is the return address: no data-store read, no increment
    let vm = run_words(&[
        encode_imm16(Opcode::Lcl, 31, 2),
        encode_bare(Opcode::Ret), // PC = base + r31 = 2
        HALT_WORD,
    ]);

    assert_eq!(vm.state().stopped(), Some(&StopReason::Halt { pc: 2 }));
    assert_eq!(vm.state().registers[31], 2);
    assert_eq!(vm.data().iter_non_zero().count(), 0);
}

#[test]
fn call_pushes_the_link_then_lands_one_past_the_target() {
    // call runs on the register unit, so write-back still bumps the PC:
    // execution resumes at reg[ra] + 1, not reg[ra]
    let mut code = vec![
        encode_imm16(Opcode::Lcl, 1, 10),  // 0: target register
        encode_imm16(Opcode::Lcl, 31, 100), // 1: stack pointer
        encode_src_reg(Opcode::Call, 1),   // 2: link = 3, PC -> 10, then +1
    ];
    code.resize(11, 0);
    code.push(HALT_WORD); // address 11

    let vm = run_words(&code);
    assert_eq!(vm.state().stopped(), Some(&StopReason::Halt { pc: 11 }));
    // the return address went through the data store, call-style...
    assert_eq!(vm.state().registers[31], 99);
    assert_eq!(vm.data().load(99), Some(3));
}

#[test]
fn cmp_is_encodable_but_not_executable() {
    // the table carries cmp and the assembler accepts it
    let binary = assemble("cmp r3, r1, r2\n").unwrap();
    let program = load(&binary).unwrap();

    // the engine has no semantics for it
    let mut vm = Vm::new(program, VmConfig::default());
    let err = vm.run().unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Unimplemented {
            mnemonic: "cmp",
            pc: 0,
        }
    );
}

#[test]
fn asl_and_asr_have_no_assembly_form() {
    for source in ["asl r1, r2, r3\n", "asr r1, r2, r3\n"] {
        let err = assemble(source).unwrap_err();
        assert!(matches!(err, AssemblerError::NotEncodable { line: 1, .. }));
    }
}

#[test]
fn halt_decodes_from_the_opcode_field_alone() {
    // the canonical halt is all ones, but any word with the halt opcode
    // byte stops the engine the same way
    let vm = run_words(&[0xFF00_0001]);
    assert_eq!(vm.state().stopped(), Some(&StopReason::Halt { pc: 0 }));
}

#[test]
fn pop_destination_comes_from_field2() {
    let vm = run_words(&[
        encode_imm16(Opcode::Lcl, 31, 50),
        encode_imm16(Opcode::Lcl, 1, 77),
        encode_src_reg(Opcode::Push, 1),
        encode_pop(4),
        HALT_WORD,
    ]);
    assert_eq!(vm.state().registers[4], 77);
    assert_eq!(vm.state().registers[31], 50);
}
