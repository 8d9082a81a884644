//! Static opcode decode table and instruction-boundary helpers.
//!
//! The table covers every documented 2A03 opcode plus the unofficial ones that
//! nestest exercises (SLO/RLA/SRE/RRA/DCP/ISC/LAX/SAX, the IGN/SKB/NOP skips
//! and the `$EB` SBC alias). Slots outside that set decode to `None`.

use std::fmt;

use crate::cpu::RAM_SIZE;

/// Every operation the engine knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Unofficial
    Slo,
    Rla,
    Sre,
    Rra,
    Dcp,
    Isc,
    Lax,
    Sax,
    Ign,
    Skb,
}

impl Operation {
    pub const fn mnemonic(self) -> &'static str {
        use Operation::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Slo => "SLO",
            Rla => "RLA",
            Sre => "SRE",
            Rra => "RRA",
            Dcp => "DCP",
            Isc => "ISC",
            Lax => "LAX",
            Sax => "SAX",
            Ign => "IGN",
            Skb => "SKB",
        }
    }

    /// Operations that only read their memory operand. These are the ones
    /// whose indexed forms finish a cycle early when no page is crossed.
    pub const fn is_read(self) -> bool {
        use Operation::*;
        matches!(
            self,
            Adc | And | Cmp | Eor | Lda | Ldx | Ldy | Ora | Sbc | Lax | Ign
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `JMP ($nnnn)` only.
    Indirect,
    /// `($nn,X)`, pre-indexed.
    IndirectX,
    /// `($nn),Y`, post-indexed.
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Encoded length of an instruction using this mode, opcode included.
    pub const fn instruction_bytes(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 1,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY | Relative => 2,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
        }
    }

    pub const fn is_indexed(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectY
        )
    }
}

/// Immutable descriptor for one decode-table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
    pub bytes: u8,
    /// Cost without branch or page-cross extras.
    pub base_cycles: u8,
}

impl Instruction {
    const fn new(opcode: u8, operation: Operation, addressing_mode: AddressingMode, base_cycles: u8) -> Self {
        Instruction {
            opcode,
            operation,
            addressing_mode,
            bytes: addressing_mode.instruction_bytes(),
            base_cycles,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }

    /// True when crossing a page while indexing costs one extra cycle.
    /// Stores and read-modify-write forms already carry the worst case.
    pub fn pays_page_cross(&self) -> bool {
        self.addressing_mode.is_indexed() && self.operation.is_read()
    }

    pub fn is_official(&self) -> bool {
        !matches!(
            self.operation,
            Operation::Slo
                | Operation::Rla
                | Operation::Sre
                | Operation::Rra
                | Operation::Dcp
                | Operation::Isc
                | Operation::Lax
                | Operation::Sax
                | Operation::Ign
                | Operation::Skb
        ) && !matches!(self.opcode, 0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA | 0xEB)
    }
}

use AddressingMode::{
    Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Accumulator as Acc, Immediate as Imm,
    Implied as Imp, Indirect as Ind, IndirectX as Izx, IndirectY as Izy, Relative as Rel,
    ZeroPage as Zp, ZeroPageX as Zpx, ZeroPageY as Zpy,
};
use Operation::*;

// (opcode, operation, addressing mode, base cycles)
#[rustfmt::skip]
const OPCODES: &[(u8, Operation, AddressingMode, u8)] = &[
    (0x00, Brk, Imp, 7), (0x01, Ora, Izx, 6), (0x03, Slo, Izx, 8), (0x04, Ign, Zp, 3),
    (0x05, Ora, Zp, 3),  (0x06, Asl, Zp, 5),  (0x07, Slo, Zp, 5),  (0x08, Php, Imp, 3),
    (0x09, Ora, Imm, 2), (0x0A, Asl, Acc, 2), (0x0C, Ign, Abs, 4), (0x0D, Ora, Abs, 4),
    (0x0E, Asl, Abs, 6), (0x0F, Slo, Abs, 6),

    (0x10, Bpl, Rel, 2), (0x11, Ora, Izy, 5), (0x13, Slo, Izy, 8), (0x14, Ign, Zpx, 4),
    (0x15, Ora, Zpx, 4), (0x16, Asl, Zpx, 6), (0x17, Slo, Zpx, 6), (0x18, Clc, Imp, 2),
    (0x19, Ora, Aby, 4), (0x1A, Nop, Imp, 2), (0x1B, Slo, Aby, 7), (0x1C, Ign, Abx, 4),
    (0x1D, Ora, Abx, 4), (0x1E, Asl, Abx, 7), (0x1F, Slo, Abx, 7),

    (0x20, Jsr, Abs, 6), (0x21, And, Izx, 6), (0x23, Rla, Izx, 8), (0x24, Bit, Zp, 3),
    (0x25, And, Zp, 3),  (0x26, Rol, Zp, 5),  (0x27, Rla, Zp, 5),  (0x28, Plp, Imp, 4),
    (0x29, And, Imm, 2), (0x2A, Rol, Acc, 2), (0x2C, Bit, Abs, 4), (0x2D, And, Abs, 4),
    (0x2E, Rol, Abs, 6), (0x2F, Rla, Abs, 6),

    (0x30, Bmi, Rel, 2), (0x31, And, Izy, 5), (0x33, Rla, Izy, 8), (0x34, Ign, Zpx, 4),
    (0x35, And, Zpx, 4), (0x36, Rol, Zpx, 6), (0x37, Rla, Zpx, 6), (0x38, Sec, Imp, 2),
    (0x39, And, Aby, 4), (0x3A, Nop, Imp, 2), (0x3B, Rla, Aby, 7), (0x3C, Ign, Abx, 4),
    (0x3D, And, Abx, 4), (0x3E, Rol, Abx, 7), (0x3F, Rla, Abx, 7),

    (0x40, Rti, Imp, 6), (0x41, Eor, Izx, 6), (0x43, Sre, Izx, 8), (0x44, Ign, Zp, 3),
    (0x45, Eor, Zp, 3),  (0x46, Lsr, Zp, 5),  (0x47, Sre, Zp, 5),  (0x48, Pha, Imp, 3),
    (0x49, Eor, Imm, 2), (0x4A, Lsr, Acc, 2), (0x4C, Jmp, Abs, 3), (0x4D, Eor, Abs, 4),
    (0x4E, Lsr, Abs, 6), (0x4F, Sre, Abs, 6),

    (0x50, Bvc, Rel, 2), (0x51, Eor, Izy, 5), (0x53, Sre, Izy, 8), (0x54, Ign, Zpx, 4),
    (0x55, Eor, Zpx, 4), (0x56, Lsr, Zpx, 6), (0x57, Sre, Zpx, 6), (0x58, Cli, Imp, 2),
    (0x59, Eor, Aby, 4), (0x5A, Nop, Imp, 2), (0x5B, Sre, Aby, 7), (0x5C, Ign, Abx, 4),
    (0x5D, Eor, Abx, 4), (0x5E, Lsr, Abx, 7), (0x5F, Sre, Abx, 7),

    (0x60, Rts, Imp, 6), (0x61, Adc, Izx, 6), (0x63, Rra, Izx, 8), (0x64, Ign, Zp, 3),
    (0x65, Adc, Zp, 3),  (0x66, Ror, Zp, 5),  (0x67, Rra, Zp, 5),  (0x68, Pla, Imp, 4),
    (0x69, Adc, Imm, 2), (0x6A, Ror, Acc, 2), (0x6C, Jmp, Ind, 5), (0x6D, Adc, Abs, 4),
    (0x6E, Ror, Abs, 6), (0x6F, Rra, Abs, 6),

    (0x70, Bvs, Rel, 2), (0x71, Adc, Izy, 5), (0x73, Rra, Izy, 8), (0x74, Ign, Zpx, 4),
    (0x75, Adc, Zpx, 4), (0x76, Ror, Zpx, 6), (0x77, Rra, Zpx, 6), (0x78, Sei, Imp, 2),
    (0x79, Adc, Aby, 4), (0x7A, Nop, Imp, 2), (0x7B, Rra, Aby, 7), (0x7C, Ign, Abx, 4),
    (0x7D, Adc, Abx, 4), (0x7E, Ror, Abx, 7), (0x7F, Rra, Abx, 7),

    (0x80, Skb, Imm, 2), (0x81, Sta, Izx, 6), (0x82, Skb, Imm, 2), (0x83, Sax, Izx, 6),
    (0x84, Sty, Zp, 3),  (0x85, Sta, Zp, 3),  (0x86, Stx, Zp, 3),  (0x87, Sax, Zp, 3),
    (0x88, Dey, Imp, 2), (0x89, Skb, Imm, 2), (0x8A, Txa, Imp, 2), (0x8C, Sty, Abs, 4),
    (0x8D, Sta, Abs, 4), (0x8E, Stx, Abs, 4), (0x8F, Sax, Abs, 4),

    (0x90, Bcc, Rel, 2), (0x91, Sta, Izy, 6), (0x94, Sty, Zpx, 4), (0x95, Sta, Zpx, 4),
    (0x96, Stx, Zpy, 4), (0x97, Sax, Zpy, 4), (0x98, Tya, Imp, 2), (0x99, Sta, Aby, 5),
    (0x9A, Txs, Imp, 2), (0x9D, Sta, Abx, 5),

    (0xA0, Ldy, Imm, 2), (0xA1, Lda, Izx, 6), (0xA2, Ldx, Imm, 2), (0xA3, Lax, Izx, 6),
    (0xA4, Ldy, Zp, 3),  (0xA5, Lda, Zp, 3),  (0xA6, Ldx, Zp, 3),  (0xA7, Lax, Zp, 3),
    (0xA8, Tay, Imp, 2), (0xA9, Lda, Imm, 2), (0xAA, Tax, Imp, 2), (0xAC, Ldy, Abs, 4),
    (0xAD, Lda, Abs, 4), (0xAE, Ldx, Abs, 4), (0xAF, Lax, Abs, 4),

    (0xB0, Bcs, Rel, 2), (0xB1, Lda, Izy, 5), (0xB3, Lax, Izy, 5), (0xB4, Ldy, Zpx, 4),
    (0xB5, Lda, Zpx, 4), (0xB6, Ldx, Zpy, 4), (0xB7, Lax, Zpy, 4), (0xB8, Clv, Imp, 2),
    (0xB9, Lda, Aby, 4), (0xBA, Tsx, Imp, 2), (0xBC, Ldy, Abx, 4), (0xBD, Lda, Abx, 4),
    (0xBE, Ldx, Aby, 4), (0xBF, Lax, Aby, 4),

    (0xC0, Cpy, Imm, 2), (0xC1, Cmp, Izx, 6), (0xC2, Skb, Imm, 2), (0xC3, Dcp, Izx, 8),
    (0xC4, Cpy, Zp, 3),  (0xC5, Cmp, Zp, 3),  (0xC6, Dec, Zp, 5),  (0xC7, Dcp, Zp, 5),
    (0xC8, Iny, Imp, 2), (0xC9, Cmp, Imm, 2), (0xCA, Dex, Imp, 2), (0xCC, Cpy, Abs, 4),
    (0xCD, Cmp, Abs, 4), (0xCE, Dec, Abs, 6), (0xCF, Dcp, Abs, 6),

    (0xD0, Bne, Rel, 2), (0xD1, Cmp, Izy, 5), (0xD3, Dcp, Izy, 8), (0xD4, Ign, Zpx, 4),
    (0xD5, Cmp, Zpx, 4), (0xD6, Dec, Zpx, 6), (0xD7, Dcp, Zpx, 6), (0xD8, Cld, Imp, 2),
    (0xD9, Cmp, Aby, 4), (0xDA, Nop, Imp, 2), (0xDB, Dcp, Aby, 7), (0xDC, Ign, Abx, 4),
    (0xDD, Cmp, Abx, 4), (0xDE, Dec, Abx, 7), (0xDF, Dcp, Abx, 7),

    (0xE0, Cpx, Imm, 2), (0xE1, Sbc, Izx, 6), (0xE2, Skb, Imm, 2), (0xE3, Isc, Izx, 8),
    (0xE4, Cpx, Zp, 3),  (0xE5, Sbc, Zp, 3),  (0xE6, Inc, Zp, 5),  (0xE7, Isc, Zp, 5),
    (0xE8, Inx, Imp, 2), (0xE9, Sbc, Imm, 2), (0xEA, Nop, Imp, 2), (0xEB, Sbc, Imm, 2),
    (0xEC, Cpx, Abs, 4), (0xED, Sbc, Abs, 4), (0xEE, Inc, Abs, 6), (0xEF, Isc, Abs, 6),

    (0xF0, Beq, Rel, 2), (0xF1, Sbc, Izy, 5), (0xF3, Isc, Izy, 8), (0xF4, Ign, Zpx, 4),
    (0xF5, Sbc, Zpx, 4), (0xF6, Inc, Zpx, 6), (0xF7, Isc, Zpx, 6), (0xF8, Sed, Imp, 2),
    (0xF9, Sbc, Aby, 4), (0xFA, Nop, Imp, 2), (0xFB, Isc, Aby, 7), (0xFC, Ign, Abx, 4),
    (0xFD, Sbc, Abx, 4), (0xFE, Inc, Abx, 7), (0xFF, Isc, Abx, 7),
];

const fn build_table() -> [Option<Instruction>; 256] {
    let mut table: [Option<Instruction>; 256] = [None; 256];
    let mut i = 0;
    while i < OPCODES.len() {
        let (opcode, operation, mode, cycles) = OPCODES[i];
        table[opcode as usize] = Some(Instruction::new(opcode, operation, mode, cycles));
        i += 1;
    }
    table
}

/// The decode table, indexed by opcode byte.
pub static INSTRUCTIONS: [Option<Instruction>; 256] = build_table();

pub fn decode(opcode: u8) -> Option<Instruction> {
    INSTRUCTIONS[opcode as usize]
}

/// Encoded length of the instruction starting with `opcode`. Unknown opcodes
/// count as one byte so a scan can always make progress.
pub fn instruction_size(opcode: u8) -> u16 {
    decode(opcode).map_or(1, |ins| ins.bytes as u16)
}

/// Address of the instruction following the one at `addr`.
pub fn next_instruction(ram: &[u8; RAM_SIZE], addr: u16) -> u16 {
    addr.wrapping_add(instruction_size(ram[addr as usize]))
}

/// Moves a cursor by `n` whole instructions; negative `n` rewinds. Each
/// backward step is the size of the instruction currently under the cursor,
/// since 6502 code can't be decoded backwards unambiguously.
pub fn advance(ram: &[u8; RAM_SIZE], addr: u16, n: i32) -> u16 {
    let mut cursor = addr;
    for _ in 0..n.unsigned_abs() {
        let size = instruction_size(ram[cursor as usize]);
        cursor = if n < 0 {
            cursor.wrapping_sub(size)
        } else {
            cursor.wrapping_add(size)
        };
    }
    cursor
}

/// Raw bytes of the instruction at `addr` (opcode first).
pub fn encoding(ram: &[u8; RAM_SIZE], addr: u16) -> Vec<u8> {
    let size = instruction_size(ram[addr as usize]);
    (0..size)
        .map(|i| ram[addr.wrapping_add(i) as usize])
        .collect()
}

/// Index of the instruction at or overlapping `addr`, counting whole
/// instructions from `$0000`. An address inside a multi-byte instruction
/// maps to that instruction.
pub fn instruction_count(ram: &[u8; RAM_SIZE], addr: u16) -> usize {
    let target = addr as usize;
    let mut cursor = 0usize;
    let mut count = 0;
    while cursor < target {
        cursor += instruction_size(ram[cursor]) as usize;
        count += 1;
    }

    // Overshot: `addr` is an operand byte of the last instruction stepped over.
    if cursor > target {
        count - 1
    } else {
        count
    }
}

/// Address of the `n`-th instruction counted from `$0000`; the inverse of
/// [`instruction_count`] on instruction boundaries.
pub fn instruction_address(ram: &[u8; RAM_SIZE], n: usize) -> u16 {
    (0..n).fold(0, |cursor, _| next_instruction(ram, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_slots_match_their_index() {
        for (index, slot) in INSTRUCTIONS.iter().enumerate() {
            if let Some(ins) = slot {
                assert_eq!(ins.opcode as usize, index, "slot {:02X}", index);
                assert!((1..=3).contains(&ins.bytes));
                assert!(ins.base_cycles >= 2);
            }
        }
    }

    #[test]
    fn test_decode_known_and_unknown() {
        let lda = decode(0xBD).unwrap();
        assert_eq!(lda.operation, Operation::Lda);
        assert_eq!(lda.addressing_mode, AddressingMode::AbsoluteX);
        assert_eq!(lda.bytes, 3);
        assert_eq!(lda.base_cycles, 4);
        assert!(lda.pays_page_cross());

        let sta = decode(0x9D).unwrap();
        assert_eq!(sta.base_cycles, 5);
        assert!(!sta.pays_page_cross());

        for opcode in [0x02, 0x12, 0x0B, 0x4B, 0x6B, 0x8B, 0x93, 0x9B, 0x9C, 0x9E, 0x9F, 0xAB, 0xBB, 0xCB] {
            assert!(decode(opcode).is_none(), "opcode {:02X}", opcode);
        }
    }

    #[test]
    fn test_official_opcode_count() {
        let official = INSTRUCTIONS
            .iter()
            .flatten()
            .filter(|ins| ins.is_official())
            .count();
        assert_eq!(official, 151);
    }

    #[test]
    fn test_instruction_size_fallback() {
        assert_eq!(instruction_size(0x4C), 3);
        assert_eq!(instruction_size(0xA9), 2);
        assert_eq!(instruction_size(0xEA), 1);
        assert_eq!(instruction_size(0x02), 1);
    }

    #[test]
    fn test_advance_and_rewind() {
        let mut ram = Box::new([0u8; RAM_SIZE]);
        // LDA #$01; JMP $8000; <unknown>; NOP
        ram[0x8000..0x8007].copy_from_slice(&[0xA9, 0x01, 0x4C, 0x00, 0x80, 0x02, 0xEA]);

        assert_eq!(next_instruction(&ram, 0x8000), 0x8002);
        assert_eq!(advance(&ram, 0x8000, 2), 0x8005);
        assert_eq!(advance(&ram, 0x8000, 3), 0x8006);
        assert_eq!(advance(&ram, 0x8000, 0), 0x8000);
        // Rewinding steps back by the size under the cursor.
        assert_eq!(advance(&ram, 0x8006, -1), 0x8005);
        assert_eq!(advance(&ram, 0x8002, -1), 0x7FFF);
    }

    #[test]
    fn test_advance_wraps_address_space() {
        let mut ram = Box::new([0u8; RAM_SIZE]);
        ram[0xFFFF] = 0x4C;
        assert_eq!(advance(&ram, 0xFFFF, 1), 0x0002);
    }

    #[test]
    fn test_encoding_bytes() {
        let mut ram = Box::new([0u8; RAM_SIZE]);
        ram[0x10..0x13].copy_from_slice(&[0x6C, 0xFF, 0x30]);
        assert_eq!(encoding(&ram, 0x10), vec![0x6C, 0xFF, 0x30]);
        ram[0x20] = 0x02;
        assert_eq!(encoding(&ram, 0x20), vec![0x02]);
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(decode(0x00).unwrap().mnemonic(), "BRK");
        assert_eq!(decode(0xEB).unwrap().mnemonic(), "SBC");
        assert_eq!(Operation::Isc.to_string(), "ISC");
    }

    fn boundary_ram() -> Box<[u8; RAM_SIZE]> {
        let mut ram = Box::new([0u8; RAM_SIZE]);
        // LDA #$01 ; STA $0200 ; (unknown $02) ; NOP
        ram[0..7].copy_from_slice(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0x02, 0xEA]);
        ram
    }

    #[test]
    fn test_instruction_count_on_boundaries() {
        let ram = boundary_ram();

        assert_eq!(instruction_count(&ram, 0x0000), 0);
        assert_eq!(instruction_count(&ram, 0x0002), 1);
        assert_eq!(instruction_count(&ram, 0x0005), 2);
        assert_eq!(instruction_count(&ram, 0x0007), 4);
    }

    #[test]
    fn test_instruction_count_inside_instruction() {
        let ram = boundary_ram();

        // Operand bytes belong to the instruction that contains them
        assert_eq!(instruction_count(&ram, 0x0001), 0);
        assert_eq!(instruction_count(&ram, 0x0003), 1);
        assert_eq!(instruction_count(&ram, 0x0004), 1);
    }

    #[test]
    fn test_unknown_byte_counts_as_one_instruction() {
        let ram = boundary_ram();

        assert_eq!(instruction_count(&ram, 0x0006), 3);
        assert_eq!(instruction_address(&ram, 3), 0x0006);
        assert_eq!(instruction_address(&ram, 4), 0x0007);
    }

    #[test]
    fn test_instruction_address_inverts_count() {
        let ram = boundary_ram();

        assert_eq!(instruction_address(&ram, 0), 0x0000);
        assert_eq!(instruction_address(&ram, 1), 0x0002);
        assert_eq!(instruction_address(&ram, 2), 0x0005);
        for n in 0..16 {
            assert_eq!(instruction_count(&ram, instruction_address(&ram, n)), n);
        }
    }
}
