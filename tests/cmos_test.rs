//! Tests for the 65C02 extensions and for the NMOS handling of the same bytes.

use lib6502::{CpuConfig, FlatMemory, MemoryBus, Variant, CPU};

fn setup(variant: Variant) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let config = CpuConfig {
        variant,
        ..CpuConfig::default()
    };
    let mut cpu = CPU::with_config(memory, config);
    cpu.reset();
    cpu
}

fn setup_cmos() -> CPU<FlatMemory> {
    setup(Variant::Cmos65C02)
}

// ========== BRA / JMP (abs,X) ==========

#[test]
fn test_bra_always_taken() {
    let mut cpu = setup_cmos();

    cpu.memory_mut().write(0x8000, 0x80);
    cpu.memory_mut().write(0x8001, 0x10);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8012);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_bra_page_cross() {
    let mut cpu = setup_cmos();

    cpu.memory_mut().write(0x8000, 0x80);
    cpu.memory_mut().write(0x8001, 0x80); // -128

    cpu.step();

    assert_eq!(cpu.pc(), 0x7F82);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_jmp_absolute_indexed_indirect() {
    let mut cpu = setup_cmos();

    // JMP ($3000,X)
    cpu.memory_mut().load(0x8000, &[0x7C, 0x00, 0x30]).unwrap();
    cpu.memory_mut().write(0x3006, 0x78);
    cpu.memory_mut().write(0x3007, 0x56);
    cpu.set_x(0x06);

    cpu.step();

    assert_eq!(cpu.pc(), 0x5678);
    assert_eq!(cpu.cycles(), 6);
}

// ========== Stack extensions ==========

#[test]
fn test_phx_ply_moves_x_into_y() {
    let mut cpu = setup_cmos();

    // PHX ; PLY
    cpu.memory_mut().load(0x8000, &[0xDA, 0x7A]).unwrap();
    cpu.set_x(0x80);

    cpu.step();
    assert_eq!(cpu.sp(), 0xFC);

    cpu.step();
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 3 + 4);
}

#[test]
fn test_phy_plx() {
    let mut cpu = setup_cmos();

    // PHY ; PLX
    cpu.memory_mut().load(0x8000, &[0x5A, 0xFA]).unwrap();
    cpu.set_y(0x00);
    cpu.set_x(0x33);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

// ========== STZ ==========

#[test]
fn test_stz_all_forms() {
    let mut cpu = setup_cmos();

    // STZ $10 ; STZ $10,X ; STZ $2000 ; STZ $2000,X
    cpu.memory_mut()
        .load(
            0x8000,
            &[0x64, 0x10, 0x74, 0x10, 0x9C, 0x00, 0x20, 0x9E, 0x00, 0x20],
        )
        .unwrap();
    for addr in [0x0010, 0x0012, 0x2000, 0x2002] {
        cpu.memory_mut().write(addr, 0xFF);
    }
    cpu.set_x(0x02);

    for _ in 0..4 {
        cpu.step();
    }

    for addr in [0x0010, 0x0012, 0x2000, 0x2002] {
        assert_eq!(cpu.memory().read(addr), 0x00, "${:04X}", addr);
    }
    assert_eq!(cpu.cycles(), 3 + 4 + 4 + 5);
}

// ========== TSB / TRB ==========

#[test]
fn test_tsb_sets_bits_and_tests() {
    let mut cpu = setup_cmos();

    // TSB $10
    cpu.memory_mut().load(0x8000, &[0x04, 0x10]).unwrap();
    cpu.memory_mut().write(0x0010, 0xF0);
    cpu.set_a(0x0F);

    cpu.step();

    assert_eq!(cpu.memory().read(0x0010), 0xFF);
    assert!(cpu.flag_z()); // 0xF0 & 0x0F == 0
    assert_eq!(cpu.a(), 0x0F);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_trb_clears_bits_and_tests() {
    let mut cpu = setup_cmos();

    // TRB $2000
    cpu.memory_mut().load(0x8000, &[0x1C, 0x00, 0x20]).unwrap();
    cpu.memory_mut().write(0x2000, 0xFF);
    cpu.set_a(0x81);

    cpu.step();

    assert_eq!(cpu.memory().read(0x2000), 0x7E);
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 6);
}

// ========== Accumulator INC / DEC ==========

#[test]
fn test_inc_dec_accumulator() {
    let mut cpu = setup_cmos();

    // INC A ; DEC A ; DEC A
    cpu.memory_mut().load(0x8000, &[0x1A, 0x3A, 0x3A]).unwrap();
    cpu.set_a(0xFF);

    cpu.step();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.step();
    cpu.step();
    assert_eq!(cpu.a(), 0xFE);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 6);
}

// ========== BIT extensions ==========

#[test]
fn test_bit_immediate_only_touches_zero() {
    let mut cpu = setup_cmos();

    cpu.memory_mut().load(0x8000, &[0x89, 0xC0]).unwrap();
    cpu.set_a(0x01);
    cpu.set_flag_n(false);
    cpu.set_flag_v(false);

    cpu.step();

    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_bit_absolute_x_page_cross() {
    let mut cpu = setup_cmos();

    // BIT $20FF,X
    cpu.memory_mut().load(0x8000, &[0x3C, 0xFF, 0x20]).unwrap();
    cpu.memory_mut().write(0x2100, 0x40);
    cpu.set_x(0x01);
    cpu.set_a(0x40);

    cpu.step();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

// ========== Zero page indirect ==========

#[test]
fn test_lda_sta_zero_page_indirect() {
    let mut cpu = setup_cmos();

    // LDA ($20) ; STA ($22)
    cpu.memory_mut().load(0x8000, &[0xB2, 0x20, 0x92, 0x22]).unwrap();
    cpu.memory_mut().load(0x0020, &[0x00, 0x30, 0x00, 0x40]).unwrap();
    cpu.memory_mut().write(0x3000, 0x5A);

    cpu.step();
    assert_eq!(cpu.a(), 0x5A);

    cpu.step();
    assert_eq!(cpu.memory().read(0x4000), 0x5A);
    assert_eq!(cpu.cycles(), 10);
}

#[test]
fn test_indexed_indirect_pointer_at_page_end() {
    // LDA ($FF,X) with X=0: pointer bytes at $FF and then $00 (NMOS) or $100 (65C02)
    for (variant, expected) in [(Variant::Nmos6502, 0x11), (Variant::Cmos65C02, 0x22)] {
        let mut cpu = setup(variant);
        cpu.memory_mut().load(0x8000, &[0xA1, 0xFF]).unwrap();
        cpu.memory_mut().write(0x00FF, 0x00);
        cpu.memory_mut().write(0x0000, 0x30);
        cpu.memory_mut().write(0x0100, 0x40);
        cpu.memory_mut().write(0x3000, 0x11);
        cpu.memory_mut().write(0x4000, 0x22);

        cpu.step();

        assert_eq!(cpu.a(), expected, "{:?}", variant);
    }
}

#[test]
fn test_indirect_indexed_pointer_at_page_end() {
    // LDA ($FF),Y with Y=0
    for (variant, expected) in [(Variant::Nmos6502, 0x11), (Variant::Cmos65C02, 0x22)] {
        let mut cpu = setup(variant);
        cpu.memory_mut().load(0x8000, &[0xB1, 0xFF]).unwrap();
        cpu.memory_mut().write(0x00FF, 0x00);
        cpu.memory_mut().write(0x0000, 0x30);
        cpu.memory_mut().write(0x0100, 0x40);
        cpu.memory_mut().write(0x3000, 0x11);
        cpu.memory_mut().write(0x4000, 0x22);

        cpu.step();

        assert_eq!(cpu.a(), expected, "{:?}", variant);
    }
}

// ========== Rockwell bit instructions ==========

#[test]
fn test_rmb_smb() {
    let mut cpu = setup_cmos();

    // RMB3 $10 ; SMB7 $10
    cpu.memory_mut().load(0x8000, &[0x37, 0x10, 0xF7, 0x10]).unwrap();
    cpu.memory_mut().write(0x0010, 0x0F);
    let status = cpu.status();

    cpu.step();
    assert_eq!(cpu.memory().read(0x0010), 0x07);

    cpu.step();
    assert_eq!(cpu.memory().read(0x0010), 0x87);
    assert_eq!(cpu.status(), status);
    assert_eq!(cpu.cycles(), 10);
}

#[test]
fn test_bbr_taken_when_bit_clear() {
    let mut cpu = setup_cmos();

    // BBR0 $10,+$05
    cpu.memory_mut().load(0x8000, &[0x0F, 0x10, 0x05]).unwrap();
    cpu.memory_mut().write(0x0010, 0xFE);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8008);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_bbs_not_taken_when_bit_clear() {
    let mut cpu = setup_cmos();

    // BBS6 $10,+$05
    cpu.memory_mut().load(0x8000, &[0xEF, 0x10, 0x05]).unwrap();
    cpu.memory_mut().write(0x0010, 0xBF);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_bbs_taken_across_page() {
    let mut cpu = setup_cmos();

    // BBS7 $10,-$10 from $8000: next is $8003, target $7FF3
    cpu.memory_mut().load(0x8000, &[0xFF, 0x10, 0xF0]).unwrap();
    cpu.memory_mut().write(0x0010, 0x80);

    cpu.step();

    assert_eq!(cpu.pc(), 0x7FF3);
    assert_eq!(cpu.cycles(), 7);
}

// ========== NOPs ==========

#[test]
fn test_cmos_nop_lengths_and_costs() {
    // (opcode, bytes, cycles)
    for (opcode, bytes, cycles) in [
        (0x03u8, 1u16, 1u64),
        (0x02, 2, 2),
        (0x44, 2, 3),
        (0xF4, 2, 4),
        (0x5C, 3, 8),
        (0xDC, 3, 4),
    ] {
        let mut cpu = setup_cmos();
        cpu.memory_mut().write(0x8000, opcode);
        let a = cpu.a();

        cpu.step();

        assert_eq!(cpu.pc(), 0x8000 + bytes, "opcode {:02X}", opcode);
        assert_eq!(cpu.cycles(), cycles, "opcode {:02X}", opcode);
        assert_eq!(cpu.a(), a);
    }
}

#[test]
fn test_nmos_undocumented_opcode_is_two_cycle_nop() {
    let mut cpu = setup(Variant::Nmos6502);

    // $1A is INC A on the 65C02 but undocumented on NMOS
    cpu.memory_mut().write(0x8000, 0x1A);
    cpu.set_a(0x10);
    let status = cpu.status();

    cpu.step();

    assert_eq!(cpu.a(), 0x10);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
    assert_eq!(cpu.status(), status);
}
