//! Operation semantics for every decoded instruction.

use super::addressing::{page_crossed, Operand};
use super::{Cpu, StatusFlags};
use crate::error::CpuError;
use crate::instruction::{Instruction, Operation};

impl Cpu {
    /// Runs one decoded instruction: mutates registers, flags and memory,
    /// moves PC and returns the cycles spent including conditional extras.
    pub(super) fn execute(&mut self, instruction: &Instruction) -> Result<u8, CpuError> {
        let operand = self.resolve_operand(instruction.addressing_mode, self.pc);
        let next_pc = self.pc.wrapping_add(instruction.bytes as u16);

        let mut cycles = instruction.base_cycles;
        if instruction.pays_page_cross() && operand.page_crossed() {
            cycles += 1;
        }

        // Set by control transfers; everything else falls through to next_pc.
        let mut jump: Option<u16> = None;

        match instruction.operation {
            // Loads and stores
            Operation::Lda => {
                self.a = self.load(operand);
                self.set_zero_negative(self.a);
            }
            Operation::Ldx => {
                self.x = self.load(operand);
                self.set_zero_negative(self.x);
            }
            Operation::Ldy => {
                self.y = self.load(operand);
                self.set_zero_negative(self.y);
            }
            Operation::Sta => self.store(operand, self.a),
            Operation::Stx => self.store(operand, self.x),
            Operation::Sty => self.store(operand, self.y),

            // Transfers
            Operation::Tax => {
                self.x = self.a;
                self.set_zero_negative(self.x);
            }
            Operation::Tay => {
                self.y = self.a;
                self.set_zero_negative(self.y);
            }
            Operation::Txa => {
                self.a = self.x;
                self.set_zero_negative(self.a);
            }
            Operation::Tya => {
                self.a = self.y;
                self.set_zero_negative(self.a);
            }
            Operation::Tsx => {
                self.x = self.sp;
                self.set_zero_negative(self.x);
            }
            // TXS leaves the flags alone.
            Operation::Txs => self.sp = self.x,

            // Logic and arithmetic
            Operation::And => {
                self.a &= self.load(operand);
                self.set_zero_negative(self.a);
            }
            Operation::Ora => {
                self.a |= self.load(operand);
                self.set_zero_negative(self.a);
            }
            Operation::Eor => {
                self.a ^= self.load(operand);
                self.set_zero_negative(self.a);
            }
            Operation::Adc => {
                let value = self.load(operand);
                self.add_with_carry(value);
            }
            Operation::Sbc => {
                let value = self.load(operand);
                self.subtract_with_carry(value);
            }
            Operation::Cmp => {
                let value = self.load(operand);
                self.compare(self.a, value);
            }
            Operation::Cpx => {
                let value = self.load(operand);
                self.compare(self.x, value);
            }
            Operation::Cpy => {
                let value = self.load(operand);
                self.compare(self.y, value);
            }
            Operation::Bit => {
                let value = self.load(operand);
                self.status.set(StatusFlags::ZERO, self.a & value == 0);
                self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
                self.status.set(StatusFlags::OVERFLOW, value & 0x40 != 0);
            }

            // Increments and decrements
            Operation::Inc => {
                let value = self.load(operand).wrapping_add(1);
                self.store(operand, value);
                self.set_zero_negative(value);
            }
            Operation::Dec => {
                let value = self.load(operand).wrapping_sub(1);
                self.store(operand, value);
                self.set_zero_negative(value);
            }
            Operation::Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_zero_negative(self.x);
            }
            Operation::Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_zero_negative(self.y);
            }
            Operation::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_zero_negative(self.x);
            }
            Operation::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_zero_negative(self.y);
            }

            // Shifts and rotates, on A or memory
            Operation::Asl => {
                let value = self.load(operand);
                let result = self.asl(value);
                self.store(operand, result);
            }
            Operation::Lsr => {
                let value = self.load(operand);
                let result = self.lsr(value);
                self.store(operand, result);
            }
            Operation::Rol => {
                let value = self.load(operand);
                let result = self.rol(value);
                self.store(operand, result);
            }
            Operation::Ror => {
                let value = self.load(operand);
                let result = self.ror(value);
                self.store(operand, result);
            }

            // Flag instructions
            Operation::Clc => self.status.remove(StatusFlags::CARRY),
            Operation::Sec => self.status.insert(StatusFlags::CARRY),
            Operation::Cli => self.status.remove(StatusFlags::INTERRUPT_DISABLE),
            Operation::Sei => self.status.insert(StatusFlags::INTERRUPT_DISABLE),
            Operation::Clv => self.status.remove(StatusFlags::OVERFLOW),
            // The 2A03 has no decimal mode; D is stored but never consulted.
            Operation::Cld => self.status.remove(StatusFlags::DECIMAL),
            Operation::Sed => self.status.insert(StatusFlags::DECIMAL),

            // Stack
            Operation::Pha => self.push(self.a),
            Operation::Php => self.push((self.status | StatusFlags::PUSH_BITS).bits()),
            Operation::Pla => {
                self.a = self.pull();
                self.set_zero_negative(self.a);
            }
            Operation::Plp => self.pull_status(),

            // Control transfer
            Operation::Jmp => jump = operand.address(),
            Operation::Jsr => {
                // Return address minus one: the last byte of the JSR itself.
                self.push_u16(next_pc.wrapping_sub(1));
                jump = operand.address();
            }
            Operation::Rts => {
                let return_addr = self.pull_u16();
                jump = Some(return_addr.wrapping_add(instruction.bytes as u16));
            }
            Operation::Rti => {
                self.pull_status();
                jump = Some(self.pull_u16());
            }

            Operation::Bpl => cycles += self.branch(!self.flag(StatusFlags::NEGATIVE), operand, next_pc, &mut jump),
            Operation::Bmi => cycles += self.branch(self.flag(StatusFlags::NEGATIVE), operand, next_pc, &mut jump),
            Operation::Bvc => cycles += self.branch(!self.flag(StatusFlags::OVERFLOW), operand, next_pc, &mut jump),
            Operation::Bvs => cycles += self.branch(self.flag(StatusFlags::OVERFLOW), operand, next_pc, &mut jump),
            Operation::Bcc => cycles += self.branch(!self.flag(StatusFlags::CARRY), operand, next_pc, &mut jump),
            Operation::Bcs => cycles += self.branch(self.flag(StatusFlags::CARRY), operand, next_pc, &mut jump),
            Operation::Bne => cycles += self.branch(!self.flag(StatusFlags::ZERO), operand, next_pc, &mut jump),
            Operation::Beq => cycles += self.branch(self.flag(StatusFlags::ZERO), operand, next_pc, &mut jump),

            // Skips: the operand is fetched (or not) and discarded.
            Operation::Nop | Operation::Ign | Operation::Skb => {}

            // Unofficial combined operations
            Operation::Slo => {
                let value = self.load(operand);
                let shifted = self.asl(value);
                self.store(operand, shifted);
                self.a |= shifted;
                self.set_zero_negative(self.a);
            }
            Operation::Rla => {
                let value = self.load(operand);
                let rotated = self.rol(value);
                self.store(operand, rotated);
                self.a &= rotated;
                self.set_zero_negative(self.a);
            }
            Operation::Sre => {
                let value = self.load(operand);
                let shifted = self.lsr(value);
                self.store(operand, shifted);
                self.a ^= shifted;
                self.set_zero_negative(self.a);
            }
            Operation::Rra => {
                let value = self.load(operand);
                let rotated = self.ror(value);
                self.store(operand, rotated);
                // ADC consumes the carry ROR just produced.
                self.add_with_carry(rotated);
            }
            Operation::Dcp => {
                let value = self.load(operand).wrapping_sub(1);
                self.store(operand, value);
                self.compare(self.a, value);
            }
            Operation::Isc => {
                let value = self.load(operand).wrapping_add(1);
                self.store(operand, value);
                self.subtract_with_carry(value);
            }
            Operation::Lax => {
                let value = self.load(operand);
                self.a = value;
                self.x = value;
                self.set_zero_negative(value);
            }
            Operation::Sax => self.store(operand, self.a & self.x),

            // BRK needs the interrupt sequence, which this core does not model.
            // Nothing has been written yet, so PC still points at the opcode.
            Operation::Brk => {
                log::error!("BRK is not supported (PC ${:04X})", self.pc);
                return Err(CpuError::UnknownOpcode(instruction.opcode));
            }
        }

        self.pc = jump.unwrap_or(next_pc);
        Ok(cycles)
    }

    fn load(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Accumulator => self.a,
            Operand::Immediate(value) => value,
            Operand::Memory { address, .. } => self.read_u8(address),
            Operand::Implied | Operand::Relative(_) => 0,
        }
    }

    fn store(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Accumulator => self.a = value,
            Operand::Memory { address, .. } => self.write_u8(address, value),
            Operand::Implied | Operand::Immediate(_) | Operand::Relative(_) => {}
        }
    }

    /// Returns the extra cycles: one for a taken branch, one more when the
    /// target is on a different page than the next instruction.
    fn branch(&self, condition: bool, operand: Operand, next_pc: u16, jump: &mut Option<u16>) -> u8 {
        let Operand::Relative(offset) = operand else {
            return 0;
        };
        if !condition {
            return 0;
        }

        let target = next_pc.wrapping_add(offset as u16);
        *jump = Some(target);
        if page_crossed(next_pc, target) {
            2
        } else {
            1
        }
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.status.set(StatusFlags::CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.set_zero_negative(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.status.set(StatusFlags::CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.set_zero_negative(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = self.status.contains(StatusFlags::CARRY) as u8;
        self.status.set(StatusFlags::CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.set_zero_negative(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = self.status.contains(StatusFlags::CARRY) as u8;
        self.status.set(StatusFlags::CARRY, value & 0x01 != 0);
        let result = (value >> 1) | (carry_in << 7);
        self.set_zero_negative(result);
        result
    }
}
