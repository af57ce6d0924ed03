//! Cross-crate agreement tests: the assembler, loader, and engine must see
//! the same instructions through the one shared ISA table.

use uflarisc_assembler::assemble;
use uflarisc_isa::{decode, Opcode};
use uflarisc_loader::load;

/// Assemble one instruction line and hand back its decoded word.
fn decode_one(line: &str) -> uflarisc_isa::Decoded {
    let binary = assemble(line).expect("assembly failed");
    let program = load(&binary).expect("load failed");
    let word = program.word(0).unwrap();
    decode(word).expect("decode failed")
}

#[test]
fn test_encode_decode_round_trip_per_class() {
    // three-register ALU
    let decoded = decode_one("add r3, r1, r2\n");
    assert_eq!(decoded.opcode, Opcode::Add);
    assert_eq!((decoded.field1, decoded.field2, decoded.field3), (1, 2, 3));

    // destination-only
    let decoded = decode_one("inc r9\n");
    assert_eq!(decoded.opcode, Opcode::Inc);
    assert_eq!(decoded.field3, 9);

    // stack
    let decoded = decode_one("push r4\n");
    assert_eq!((decoded.opcode, decoded.field1), (Opcode::Push, 4));
    let decoded = decode_one("pop r4\n");
    assert_eq!((decoded.opcode, decoded.field2), (Opcode::Pop, 4));

    // register pair
    let decoded = decode_one("passa r6, r7\n");
    assert_eq!(decoded.opcode, Opcode::PassA);
    assert_eq!((decoded.field1, decoded.field2, decoded.field3), (7, 0, 6));

    // 16-bit immediate
    let decoded = decode_one("lch r2, 4660\n");
    assert_eq!(decoded.opcode, Opcode::Lch);
    assert_eq!((decoded.field1, decoded.field2), (0x12, 0x34));
    assert_eq!(decoded.field3, 2);

    // control flow
    let decoded = decode_one("j 4660\n");
    assert_eq!((decoded.opcode, decoded.target), (Opcode::J, Some(4660)));
    let decoded = decode_one("beq r1, r2, 99\n");
    assert_eq!((decoded.opcode, decoded.target), (Opcode::Beq, Some(99)));
    let decoded = decode_one("jr r5\n");
    assert_eq!((decoded.opcode, decoded.target), (Opcode::Jr, None));

    // memory
    let decoded = decode_one("load r3, r4\n");
    assert_eq!((decoded.field1, decoded.field3), (4, 3));
    let decoded = decode_one("store r3, r4\n");
    assert_eq!((decoded.field1, decoded.field3), (3, 4));
}

#[test]
fn test_every_assembled_mnemonic_decodes_to_itself() {
    let lines = [
        ("add r1, r2, r3", Opcode::Add),
        ("sub r1, r2, r3", Opcode::Sub),
        ("zeros r1", Opcode::Zeros),
        ("xor r1, r2, r3", Opcode::Xor),
        ("or r1, r2, r3", Opcode::Or),
        ("passnota r1, r2", Opcode::PassNotA),
        ("and r1, r2, r3", Opcode::And),
        ("lsl r1, r2, r3", Opcode::Lsl),
        ("lsr r1, r2, r3", Opcode::Lsr),
        ("passa r1, r2", Opcode::PassA),
        ("lch r1, 1", Opcode::Lch),
        ("lcl r1, 1", Opcode::Lcl),
        ("load r1, r2", Opcode::Load),
        ("store r1, r2", Opcode::Store),
        ("jal 1", Opcode::Jal),
        ("jr r1", Opcode::Jr),
        ("beq r1, r2, 1", Opcode::Beq),
        ("bne r1, r2, 1", Opcode::Bne),
        ("j 1", Opcode::J),
        ("mult r1, r2, r3", Opcode::Mult),
        ("div r1, r2, r3", Opcode::Div),
        ("cmp r1, r2, r3", Opcode::Cmp),
        ("inc r1", Opcode::Inc),
        ("dec r1", Opcode::Dec),
        ("push r1", Opcode::Push),
        ("pop r1", Opcode::Pop),
        ("call 1", Opcode::Call),
        ("ret", Opcode::Ret),
        ("halt", Opcode::Halt),
    ];

    for (line, expected) in lines {
        let decoded = decode_one(&format!("{line}\n"));
        assert_eq!(decoded.opcode, expected, "{line}");
        assert_eq!(decoded.opcode.mnemonic(), expected.mnemonic());
    }
}

#[test]
fn test_loader_and_assembler_strip_comments_identically() {
    let asm_binary = assemble("halt # end\n").unwrap();
    let annotated = format!("# prologue\n{} # word\n", asm_binary.trim());
    let program = load(&annotated).unwrap();
    assert_eq!(program.word(0), Some(u32::MAX));
}
