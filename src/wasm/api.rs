//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, interrupt lines, state
//! inspection and per-instruction tracing.

use crate::{CpuConfig, FlatMemory, MemoryBus, Variant, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// A CPU over 64KB of flat RAM, driven from JavaScript.
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<FlatMemory>,
    on_trace: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create a new emulator; `cmos` selects the 65C02 instead of the NMOS 6502.
    #[wasm_bindgen(constructor)]
    pub fn new(cmos: bool) -> Self {
        let config = CpuConfig {
            variant: if cmos {
                Variant::Cmos65C02
            } else {
                Variant::Nmos6502
            },
            ..CpuConfig::default()
        };

        Emulator6502 {
            cpu: CPU::with_config(FlatMemory::new(), config),
            on_trace: None,
        }
    }

    /// Execute a single instruction
    pub fn step(&mut self) {
        if let Some(callback) = &self.on_trace {
            let line = self.cpu.debug_snapshot().to_string();
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&line));
        }
        self.cpu.step();
    }

    /// Execute whole instructions until `cycles` have elapsed; returns cycles consumed
    pub fn run_for_cycles(&mut self, cycles: u32) -> u32 {
        if self.on_trace.is_none() {
            return self.cpu.run_for_cycles(cycles as u64) as u32;
        }

        let start = self.cpu.cycles();
        let target = start + cycles as u64;
        while self.cpu.cycles() < target && self.cpu.run_state() == crate::RunState::Running {
            self.step();
        }
        (self.cpu.cycles() - start) as u32
    }

    /// Reset the CPU through the vector at $FFFC. Memory is preserved.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Assert NMI for one instruction boundary
    pub fn nmi(&mut self) {
        self.cpu.raise_nmi();
    }

    /// Assert IRQ for one instruction boundary
    pub fn irq(&mut self) {
        self.cpu.raise_irq();
    }

    /// Install a callback receiving one trace line per instruction
    pub fn set_trace_callback(&mut self, callback: js_sys::Function) {
        self.on_trace = Some(callback);
    }

    /// Remove the trace callback
    pub fn clear_trace_callback(&mut self) {
        self.on_trace = None;
    }

    /// The trace line for the instruction about to execute
    pub fn trace_line(&self) -> String {
        self.cpu.debug_snapshot().to_string()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Cycle count as f64 (JavaScript numbers are exact up to 2^53)
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn waiting(&self) -> bool {
        self.cpu.run_state() == crate::RunState::Waiting
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.cpu.run_state() == crate::RunState::Stopped
    }

    /// Set program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    /// Read a single byte of memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte of memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy one 256-byte page of memory into a typed array
    pub fn get_memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let base = (page as u16) << 8;
        let bytes: Vec<u8> = (0..=0xFFu16)
            .map(|offset| self.cpu.memory().read(base | offset))
            .collect();
        js_sys::Uint8Array::from(bytes.as_slice())
    }

    /// Load a binary image at `start_addr`
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) -> Result<(), JsError> {
        self.cpu
            .memory_mut()
            .load(start_addr, program)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
