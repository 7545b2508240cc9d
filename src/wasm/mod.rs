//! JavaScript bindings, built with the `wasm` feature.
//!
//! [`Emulator6502`] owns a CPU over [`FlatMemory`](crate::FlatMemory) and exposes
//! stepping, interrupt lines, register and memory inspection, and a per-instruction
//! trace callback.

pub mod api;

pub use api::Emulator6502;
