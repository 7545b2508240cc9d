//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary CPU state and memory neighbourhood in either variant, then
//! executes a short burst of instructions (and optionally an interrupt) looking
//! for panics or broken invariants.

#![no_main]

use arbitrary::Arbitrary;
use lib6502::{CpuConfig, FlatMemory, MemoryBus, RunState, Variant, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzVariant {
    Nmos,
    Cmos,
}

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    variant: FuzzVariant,
    bcd_enabled: bool,
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    /// Packed NV-BDIZC byte, loaded with PLP semantics
    status: u8,
}

#[derive(Debug, Arbitrary)]
enum FuzzInterrupt {
    None,
    Nmi,
    Irq,
    Reset,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Bytes written at PC
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    vectors: [u8; 6],
    interrupt: FuzzInterrupt,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.zero_page).unwrap();
    memory.load(0x0100, &input.stack_page).unwrap();
    memory.load(0xFFFA, &input.vectors).unwrap();

    let state = &input.cpu_state;
    for (i, &byte) in input.program.iter().enumerate() {
        memory.write(state.pc.wrapping_add(i as u16), byte);
    }

    let variant = match state.variant {
        FuzzVariant::Nmos => Variant::Nmos6502,
        FuzzVariant::Cmos => Variant::Cmos65C02,
    };
    let config = CpuConfig {
        variant,
        bcd_enabled: state.bcd_enabled,
    };
    let mut cpu = CPU::with_config(memory, config);

    cpu.set_a(state.a);
    cpu.set_x(state.x);
    cpu.set_y(state.y);
    cpu.set_sp(state.sp);
    cpu.set_pc(state.pc);
    cpu.set_status(state.status);

    let steps = (input.steps % 8) as usize + 1;
    for i in 0..steps {
        let before = cpu.cycles();
        let stalled = cpu.run_state() != RunState::Running;

        cpu.step();

        if stalled {
            assert_eq!(cpu.cycles(), before);
        } else {
            let spent = cpu.cycles() - before;
            assert!((1..=8).contains(&spent), "spent {} cycles", spent);
        }
        assert_eq!(cpu.status() & 0x30, 0x20);

        if i == 0 {
            match input.interrupt {
                FuzzInterrupt::None => {}
                FuzzInterrupt::Nmi => cpu.raise_nmi(),
                FuzzInterrupt::Irq => cpu.raise_irq(),
                FuzzInterrupt::Reset => {
                    cpu.reset();
                    assert_eq!(cpu.cycles(), 0);
                    assert_eq!(cpu.run_state(), RunState::Running);
                }
            }
        }
    }

    // The snapshot is read-only
    let snapshot = cpu.debug_snapshot();
    assert_eq!(snapshot, cpu.debug_snapshot());
    assert_eq!(snapshot.p & 0x10, 0);
});
