//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! ADC and SBC switch to BCD arithmetic when the D flag is set and the CPU has
//! decimal mode enabled. The NMOS part derives N and Z from intermediate values in
//! decimal mode; the 65C02 derives them from the final accumulator and spends one
//! extra cycle doing so.

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Updates N, V, Z and C.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `mode` - Addressing mode of the operand
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);

    if cpu.bcd_enabled && cpu.flag_d {
        adc_decimal(cpu, value);
    } else {
        adc_binary(cpu, value);
    }
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the borrow (inverted carry) from the accumulator.
/// Updates N, V, Z and C; C is set when no borrow occurred.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `mode` - Addressing mode of the operand
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);

    if cpu.bcd_enabled && cpu.flag_d {
        if cpu.variant.is_65c02() {
            sbc_decimal_cmos(cpu, value);
        } else {
            sbc_decimal_nmos(cpu, value);
        }
    } else {
        // Binary SBC is ADC of the one's complement
        adc_binary(cpu, !value);
    }
}

fn adc_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let result16 = a as u16 + value as u16 + cpu.flag_c as u16;
    let result = result16 as u8;

    // Overflow: both operands share a sign the result does not
    cpu.flag_v = (!(a ^ value) & (a ^ result) & 0x80) != 0;
    cpu.flag_c = result16 > 0xFF;
    cpu.set_zero_negative(result);
    cpu.a = result;
}

fn adc_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.flag_c as u8;

    // Low nibble with +6 correction
    let mut al = (a & 0x0F) + (value & 0x0F) + carry_in;
    if al > 9 {
        al += 0x06;
    }

    // High nibble, taking the carry out of the low nibble
    let mut ah = (a >> 4) + (value >> 4) + (al > 0x0F) as u8;

    // NMOS: Z from the binary sum, N from the (low-corrected) high nibble
    let binary = a.wrapping_add(value).wrapping_add(carry_in);
    cpu.flag_z = binary == 0;
    cpu.flag_n = binary != 0 && (ah & 0x08) != 0;
    cpu.flag_v = (!(a ^ value) & (a ^ (ah << 4)) & 0x80) != 0;

    if ah > 9 {
        ah += 0x06;
    }
    cpu.flag_c = ah > 0x0F;
    cpu.a = (ah << 4) | (al & 0x0F);

    if cpu.variant.is_65c02() {
        cpu.set_zero_negative(cpu.a);
        cpu.cycles += 1;
    }
}

fn sbc_decimal_nmos<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let borrow = !cpu.flag_c as u8;

    let result = (a as u16)
        .wrapping_sub(value as u16)
        .wrapping_sub(borrow as u16);

    let mut al = (a & 0x0F).wrapping_sub(value & 0x0F).wrapping_sub(borrow);
    if al & 0x80 != 0 {
        al = al.wrapping_sub(0x06);
    }

    let mut ah = (a >> 4).wrapping_sub(value >> 4).wrapping_sub(al >> 7);

    // Flags come from the binary difference
    cpu.flag_z = result & 0xFF == 0;
    cpu.flag_n = !cpu.flag_z && result & 0x80 != 0;
    cpu.flag_v = ((a as u16 ^ value as u16) & (a as u16 ^ result) & 0x80) != 0;
    cpu.flag_c = result & 0xFF00 == 0;

    if ah & 0x80 != 0 {
        ah = ah.wrapping_sub(0x06);
    }
    cpu.a = (ah << 4) | (al & 0x0F);
}

fn sbc_decimal_cmos<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry = cpu.flag_c as i16;

    let al = (a & 0x0F) as i16 - (value & 0x0F) as i16 + carry - 1;
    let mut result = a as i16 - value as i16 + carry - 1;

    // C and V match the binary subtraction
    let binary = result as u8;
    cpu.flag_c = result >= 0;
    cpu.flag_v = ((a ^ value) & (a ^ binary) & 0x80) != 0;

    if result < 0 {
        result -= 0x60;
    }
    if al < 0 {
        result -= 0x06;
    }

    cpu.a = result as u8;
    cpu.set_zero_negative(cpu.a);
    cpu.cycles += 1;
}

/// Executes the AND (Logical AND) instruction.
///
/// Performs a bitwise AND between the accumulator and the operand. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a &= value;
    cpu.set_zero_negative(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a |= value;
    cpu.set_zero_negative(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a ^= value;
    cpu.set_zero_negative(cpu.a);
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// Computes `A - M` without storing it:
/// - C: Set if A >= M (unsigned)
/// - Z: Set if A == M
/// - N: Bit 7 of the difference
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let register = cpu.a;
    compare(cpu, register, mode);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let register = cpu.x;
    compare(cpu, register, mode);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let register = cpu.y;
    compare(cpu, register, mode);
}

fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.flag_c = register >= value;
    cpu.set_zero_negative(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Tests the operand against the accumulator without modifying either:
/// - Z: Set if (A & M) == 0
/// - N: Bit 7 of M
/// - V: Bit 6 of M
///
/// The 65C02 immediate form (`BIT #imm`) only affects Z, since there is no memory
/// byte whose high bits would be meaningful.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.flag_z = (cpu.a & value) == 0;

    if mode != AddressingMode::Immediate {
        cpu.flag_n = (value & 0x80) != 0;
        cpu.flag_v = (value & 0x40) != 0;
    }
}
