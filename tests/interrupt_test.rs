//! Integration tests for host-raised interrupts and the WAI/STP run states.
//!
//! These tests verify:
//! - 7-cycle NMI/IRQ service sequence
//! - I flag respect for IRQ, none for NMI
//! - Handler round trips through RTI
//! - WAI wake-up and STP halting (65C02)

use lib6502::{CpuConfig, FlatMemory, MemoryBus, RunState, Variant, CPU};

fn setup(variant: Variant) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFA, 0x00); // NMI -> $A000
    memory.write(0xFFFB, 0xA0);
    memory.write(0xFFFC, 0x00); // RESET -> $8000
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00); // IRQ/BRK -> $9000
    memory.write(0xFFFF, 0x90);

    let config = CpuConfig {
        variant,
        ..CpuConfig::default()
    };
    let mut cpu = CPU::with_config(memory, config);
    cpu.reset();
    cpu
}

#[test]
fn test_irq_masked_by_interrupt_disable() {
    let mut cpu = setup(Variant::Nmos6502);
    assert!(cpu.flag_i());

    cpu.raise_irq();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn test_irq_service_sequence() {
    let mut cpu = setup(Variant::Nmos6502);
    cpu.set_flag_i(false);
    cpu.set_pc(0x8456);

    cpu.raise_irq();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFA);
    assert!(cpu.flag_i());
    assert_eq!(cpu.status() & 0x10, 0);
    assert_eq!(cpu.cycles(), 7);

    // Return address is PC itself, and B is clear in the pushed status
    assert_eq!(cpu.memory().read(0x01FD), 0x84);
    assert_eq!(cpu.memory().read(0x01FC), 0x56);
    assert_eq!(cpu.memory().read(0x01FB) & 0x30, 0x20);
}

#[test]
fn test_nmi_round_trip_through_rti() {
    let mut cpu = setup(Variant::Nmos6502);

    // Main: NOP ; NOP. NMI handler at $A000: INX ; RTI
    cpu.memory_mut().load(0x8000, &[0xEA, 0xEA]).unwrap();
    cpu.memory_mut().load(0xA000, &[0xE8, 0x40]).unwrap();

    cpu.step();
    cpu.raise_nmi();
    assert_eq!(cpu.pc(), 0xA000);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.x(), 0x01);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.flag_i()); // restored from before the NMI
    assert_eq!(cpu.cycles(), 2 + 7 + 2 + 6);
}

#[test]
fn test_reset_restarts_cycle_count() {
    let mut cpu = setup(Variant::Nmos6502);
    cpu.memory_mut().load(0x8000, &[0xEA, 0xEA, 0xEA]).unwrap();

    cpu.run_for_cycles(6);
    assert_eq!(cpu.cycles(), 6);

    cpu.reset();
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_wai_halts_until_irq() {
    let mut cpu = setup(Variant::Cmos65C02);

    // CLI ; WAI ; INY. Handler at $9000: INX ; RTI
    cpu.memory_mut().load(0x8000, &[0x58, 0xCB, 0xC8]).unwrap();
    cpu.memory_mut().load(0x9000, &[0xE8, 0x40]).unwrap();

    cpu.step();
    cpu.step();
    assert_eq!(cpu.run_state(), RunState::Waiting);
    let cycles = cpu.cycles();

    // Stepping while waiting does nothing
    cpu.step();
    assert_eq!(cpu.cycles(), cycles);
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.run_for_cycles(100), 0);

    cpu.raise_irq();
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0x9000);

    cpu.step(); // INX
    cpu.step(); // RTI
    cpu.step(); // INY

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.y(), 1);
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_wai_with_irq_masked_resumes_inline() {
    let mut cpu = setup(Variant::Cmos65C02);

    // WAI ; INY with I still set from reset
    cpu.memory_mut().load(0x8000, &[0xCB, 0xC8]).unwrap();

    cpu.step();
    cpu.raise_irq();

    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0x8001);

    cpu.step();
    assert_eq!(cpu.y(), 1);
}

#[test]
fn test_wai_woken_by_nmi() {
    let mut cpu = setup(Variant::Cmos65C02);

    // CLI ; WAI ; INY. NMI handler at $A000: INX ; RTI
    cpu.memory_mut().load(0x8000, &[0x58, 0xCB, 0xC8]).unwrap();
    cpu.memory_mut().load(0xA000, &[0xE8, 0x40]).unwrap();

    cpu.step();
    cpu.step();
    assert_eq!(cpu.run_state(), RunState::Waiting);
    let cycles = cpu.cycles();

    cpu.raise_nmi();

    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.cycles(), cycles + 7);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);

    cpu.step(); // INX
    cpu.step(); // RTI
    cpu.step(); // INY

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.y(), 1);
    assert_eq!(cpu.pc(), 0x8003);
    assert!(!cpu.flag_i());
}

#[test]
fn test_wai_woken_by_nmi_with_irq_masked() {
    let mut cpu = setup(Variant::Cmos65C02);

    // WAI ; INY with I still set from reset. NMI handler: INX ; RTI
    cpu.memory_mut().load(0x8000, &[0xCB, 0xC8]).unwrap();
    cpu.memory_mut().load(0xA000, &[0xE8, 0x40]).unwrap();

    cpu.step();
    assert_eq!(cpu.run_state(), RunState::Waiting);
    assert!(cpu.flag_i());
    let cycles = cpu.cycles();

    cpu.raise_nmi();

    // Taken despite I, unlike a masked IRQ which resumes inline
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.sp(), 0xFA);
    assert_eq!(cpu.cycles(), cycles + 7);

    cpu.step(); // INX
    cpu.step(); // RTI
    assert_eq!(cpu.pc(), 0x8001);
    assert!(cpu.flag_i());

    cpu.step(); // INY
    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.y(), 1);
}

#[test]
fn test_wai_woken_by_reset() {
    let mut cpu = setup(Variant::Cmos65C02);

    // NOP ; WAI
    cpu.memory_mut().load(0x8000, &[0xEA, 0xCB]).unwrap();

    cpu.step();
    cpu.step();
    assert_eq!(cpu.run_state(), RunState::Waiting);
    assert_eq!(cpu.pc(), 0x8002);

    cpu.reset();

    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 0);

    cpu.step();
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_stp_only_reset_resumes() {
    let mut cpu = setup(Variant::Cmos65C02);

    cpu.memory_mut().load(0x8000, &[0xDB, 0xEA]).unwrap();

    cpu.step();
    assert_eq!(cpu.run_state(), RunState::Stopped);
    assert_eq!(cpu.cycles(), 3);

    cpu.raise_nmi();
    cpu.raise_irq();
    cpu.step();
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.run_state(), RunState::Stopped);

    cpu.reset();
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_wai_stp_are_nops_on_nmos() {
    let mut cpu = setup(Variant::Nmos6502);

    cpu.memory_mut().load(0x8000, &[0xCB, 0xDB]).unwrap();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 4);
}
