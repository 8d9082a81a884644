use serde::{Deserialize, Serialize};

use crate::cpu::{Cpu, StatusFlags, RAM_SIZE};
use crate::error::SnapshotError;

/// Complete CPU state at an instruction boundary, kept in memory so a
/// session can rewind to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
    pub sp: u8,
    pub status: u8,
    pub cycles: u64,

    // Full 64 KiB address space
    pub ram: Vec<u8>,
}

impl CpuSnapshot {
    pub fn capture(cpu: &Cpu) -> Self {
        Self {
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            pc: cpu.pc,
            sp: cpu.sp,
            status: cpu.status.bits(),
            cycles: cpu.cycles,
            ram: cpu.ram.to_vec(),
        }
    }

    /// Writes the snapshot back into `cpu`. Fails without touching `cpu`
    /// when the RAM image is not exactly 64 KiB.
    pub fn restore(&self, cpu: &mut Cpu) -> Result<(), SnapshotError> {
        if self.ram.len() != RAM_SIZE {
            return Err(SnapshotError::RamSize(self.ram.len()));
        }

        cpu.a = self.a;
        cpu.x = self.x;
        cpu.y = self.y;
        cpu.pc = self.pc;
        cpu.sp = self.sp;
        cpu.status = StatusFlags::from_bits_retain(self.status);
        cpu.cycles = self.cycles;
        cpu.ram.copy_from_slice(&self.ram);
        log::debug!("restored snapshot at PC=${:04X} CYC:{}", self.pc, self.cycles);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(data).map_err(SnapshotError::Decode)
    }
}
