//! Populates the CPU's flat address space from a program image.

use crate::cpu::Cpu;
use crate::error::MapperError;

pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const PRG_BASE: u16 = 0x8000;
const PRG_MIRROR: usize = 0xC000;

/// Maps an NROM PRG image into `$8000-$FFFF`.
///
/// A 16 KiB image appears twice (`$8000` and `$C000`); a 32 KiB image fills
/// the whole window. PC is left at `$8000`; run [`Cpu::power_on`] afterwards
/// to start from the image's reset vector instead.
pub fn load_nrom(cpu: &mut Cpu, prg: &[u8]) -> Result<(), MapperError> {
    let base = PRG_BASE as usize;
    match prg.len() {
        PRG_BANK_SIZE => {
            cpu.ram[base..base + PRG_BANK_SIZE].copy_from_slice(prg);
            cpu.ram[PRG_MIRROR..PRG_MIRROR + PRG_BANK_SIZE].copy_from_slice(prg);
        }
        len if len == 2 * PRG_BANK_SIZE => {
            cpu.ram[base..].copy_from_slice(prg);
        }
        len => return Err(MapperError::UnexpectedPrgSize(len)),
    }

    cpu.pc = PRG_BASE;
    log::debug!("mapped {} KiB NROM image at ${:04X}", prg.len() / 1024, PRG_BASE);
    Ok(())
}

/// Copies `bytes` into memory starting at `addr`, wrapping past `$FFFF`.
pub fn load_at(cpu: &mut Cpu, addr: u16, bytes: &[u8]) {
    for (i, &byte) in bytes.iter().enumerate() {
        cpu.write_u8(addr.wrapping_add(i as u16), byte);
    }
    log::debug!("loaded {} bytes at ${:04X}", bytes.len(), addr);
}

/// True when `len` is a PRG size [`load_nrom`] accepts.
pub fn is_nrom_size(len: usize) -> bool {
    len == PRG_BANK_SIZE || len == 2 * PRG_BANK_SIZE
}
