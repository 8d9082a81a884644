//! Operand resolution for the thirteen addressing modes.
//!
//! Everything here is read-only with respect to the CPU so inspection tools can
//! use the same code to show effective addresses without executing anything.
//! Zero-page arithmetic wraps at 8 bits and absolute arithmetic at 16 bits;
//! the flat RAM buffer enforces neither.

use super::Cpu;
use crate::instruction::AddressingMode;

/// What an instruction operates on once its addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    /// Effective address. `page_crossed` is set when indexing moved the
    /// address into a different page than the unindexed base.
    Memory { address: u16, page_crossed: bool },
    /// Signed branch displacement, relative to the following instruction.
    Relative(i8),
}

impl Operand {
    pub fn address(self) -> Option<u16> {
        match self {
            Operand::Memory { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn page_crossed(self) -> bool {
        matches!(self, Operand::Memory { page_crossed: true, .. })
    }
}

/// True when `base` and `addr` are on different 256-byte pages.
pub fn page_crossed(base: u16, addr: u16) -> bool {
    (base & 0xFF00) != (addr & 0xFF00)
}

fn memory(address: u16) -> Operand {
    Operand::Memory {
        address,
        page_crossed: false,
    }
}

impl Cpu {
    /// Resolves the operand of the instruction whose opcode is at `pc`.
    pub fn resolve_operand(&self, mode: AddressingMode, pc: u16) -> Operand {
        let operand_byte = self.read_u8(pc.wrapping_add(1));
        let operand_word = self.read_u16(pc.wrapping_add(1));

        match mode {
            AddressingMode::Implied => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(operand_byte),
            AddressingMode::ZeroPage => memory(operand_byte as u16),
            AddressingMode::ZeroPageX => memory(self.zero_page_x_address(operand_byte)),
            AddressingMode::ZeroPageY => memory(self.zero_page_y_address(operand_byte)),
            AddressingMode::Absolute => memory(operand_word),
            AddressingMode::AbsoluteX => self.indexed(operand_word, self.x),
            AddressingMode::AbsoluteY => self.indexed(operand_word, self.y),
            AddressingMode::Indirect => memory(self.read_indirect_u16(operand_word)),
            AddressingMode::IndirectX => memory(self.indirect_x_address(operand_byte)),
            AddressingMode::IndirectY => {
                let (address, page_crossed) = self.indirect_y_address(operand_byte);
                Operand::Memory {
                    address,
                    page_crossed,
                }
            }
            AddressingMode::Relative => Operand::Relative(operand_byte as i8),
        }
    }

    fn indexed(&self, base: u16, index: u8) -> Operand {
        let address = base.wrapping_add(index as u16);
        Operand::Memory {
            address,
            page_crossed: page_crossed(base, address),
        }
    }

    pub fn zero_page_x_address(&self, offset: u8) -> u16 {
        offset.wrapping_add(self.x) as u16
    }

    pub fn zero_page_y_address(&self, offset: u8) -> u16 {
        offset.wrapping_add(self.y) as u16
    }

    /// Two-byte pointer stored in the zero page at `offset`. The high byte
    /// comes from `offset + 1` wrapped within the zero page.
    pub fn read_zero_page_pointer(&self, offset: u8) -> u16 {
        let low = self.read_u8(offset as u16) as u16;
        let high = self.read_u8(offset.wrapping_add(1) as u16) as u16;
        (high << 8) | low
    }

    /// `($nn,X)`: the pointer lives at `$nn + X`, wrapped to the zero page.
    pub fn indirect_x_address(&self, offset: u8) -> u16 {
        self.read_zero_page_pointer(offset.wrapping_add(self.x))
    }

    /// `($nn),Y`: zero-page pointer plus Y with a full 16-bit add.
    pub fn indirect_y_address(&self, offset: u8) -> (u16, bool) {
        let base = self.read_zero_page_pointer(offset);
        let address = base.wrapping_add(self.y as u16);
        (address, page_crossed(base, address))
    }

    /// Word read used by `JMP ($nnnn)`. A pointer at $xxFF takes its high
    /// byte from $xx00, not from the next page.
    pub fn read_indirect_u16(&self, addr: u16) -> u16 {
        if addr & 0x00FF == 0x00FF {
            let low = self.read_u8(addr) as u16;
            let high = self.read_u8(addr & 0xFF00) as u16;
            (high << 8) | low
        } else {
            self.read_u16(addr)
        }
    }
}
