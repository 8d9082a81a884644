use std::fmt;

/// Failures reported by [`crate::cpu::Cpu::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at PC has no implementation. Nothing was mutated.
    UnknownOpcode(u8),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnknownOpcode(opcode) => write!(f, "unknown opcode: 0x{:02X}", opcode),
        }
    }
}

impl std::error::Error for CpuError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperError {
    /// NROM carries either 16 KiB or 32 KiB of PRG data.
    UnexpectedPrgSize(usize),
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperError::UnexpectedPrgSize(size) => write!(
                f,
                "unexpected NROM PRG size: {} bytes (expected 16384 or 32768)",
                size
            ),
        }
    }
}

impl std::error::Error for MapperError {}

#[derive(Debug)]
pub enum SnapshotError {
    Encode(bincode::Error),
    Decode(bincode::Error),
    RamSize(usize),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Encode(e) => write!(f, "failed to encode snapshot: {}", e),
            SnapshotError::Decode(e) => write!(f, "failed to decode snapshot: {}", e),
            SnapshotError::RamSize(size) => {
                write!(f, "snapshot RAM is {} bytes, expected 65536", size)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Encode(e) | SnapshotError::Decode(e) => Some(&**e),
            SnapshotError::RamSize(_) => None,
        }
    }
}
