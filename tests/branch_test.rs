//! Tests for the conditional branch instructions.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page

use lib6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu
}

#[test]
fn test_bcc_not_taken() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x90);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.set_flag_c(true);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_bcc_taken_forward() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x90);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.set_flag_c(false);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8012);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_bne_taken_backward() {
    let mut cpu = setup_cpu();

    cpu.set_pc(0x8010);
    cpu.memory_mut().write(0x8010, 0xD0);
    cpu.memory_mut().write(0x8011, 0xFC); // -4
    cpu.set_flag_z(false);

    cpu.step();

    assert_eq!(cpu.pc(), 0x800E);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_beq_taken_page_cross() {
    let mut cpu = setup_cpu();

    cpu.set_pc(0x80F0);
    cpu.memory_mut().write(0x80F0, 0xF0);
    cpu.memory_mut().write(0x80F1, 0x20);
    cpu.set_flag_z(true);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8112);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_bmi_backward_page_cross() {
    let mut cpu = setup_cpu();

    // Next instruction at $8002; offset -4 lands in page $7F
    cpu.memory_mut().write(0x8000, 0x30);
    cpu.memory_mut().write(0x8001, 0xFC);
    cpu.set_flag_n(true);

    cpu.step();

    assert_eq!(cpu.pc(), 0x7FFE);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_every_condition() {
    // (opcode, flag setter, value that takes the branch)
    let cases: [(u8, fn(&mut CPU<FlatMemory>, bool), bool); 8] = [
        (0x90, CPU::<FlatMemory>::set_flag_c, false),
        (0xB0, CPU::<FlatMemory>::set_flag_c, true),
        (0xD0, CPU::<FlatMemory>::set_flag_z, false),
        (0xF0, CPU::<FlatMemory>::set_flag_z, true),
        (0x10, CPU::<FlatMemory>::set_flag_n, false),
        (0x30, CPU::<FlatMemory>::set_flag_n, true),
        (0x50, CPU::<FlatMemory>::set_flag_v, false),
        (0x70, CPU::<FlatMemory>::set_flag_v, true),
    ];

    for (opcode, set_flag, taken_when) in cases {
        for flag in [false, true] {
            let mut cpu = setup_cpu();
            cpu.memory_mut().write(0x8000, opcode);
            cpu.memory_mut().write(0x8001, 0x04);
            set_flag(&mut cpu, flag);

            cpu.step();

            let expected = if flag == taken_when { 0x8006 } else { 0x8002 };
            assert_eq!(cpu.pc(), expected, "opcode {:02X} flag {}", opcode, flag);
        }
    }
}

#[test]
fn test_branch_wraps_address_space() {
    let mut cpu = setup_cpu();

    cpu.set_pc(0xFFF0);
    cpu.memory_mut().write(0xFFF0, 0x10); // BPL +$20
    cpu.memory_mut().write(0xFFF1, 0x20);
    cpu.set_flag_n(false);

    cpu.step();

    assert_eq!(cpu.pc(), 0x0012);
    assert_eq!(cpu.cycles(), 4);
}
