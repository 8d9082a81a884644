//! NES 2A03 (6502) instruction-level CPU core with a flat 64 KiB memory
//! image, a decode table for official and common unofficial opcodes, and
//! debugger plumbing for headless runs.

pub mod config;
pub mod cpu;
pub mod debugger;
pub mod error;
pub mod instruction;
pub mod mapper;
pub mod snapshot;

pub use cpu::{Cpu, StatusFlags};
pub use error::{CpuError, MapperError, SnapshotError};
