use bitflags::bitflags;

use crate::error::CpuError;
use crate::instruction::decode;

mod addressing;
mod execute;

pub use addressing::Operand;


pub const RAM_SIZE: usize = 0x10000;
pub const STACK_BASE: u16 = 0x0100;
pub const RESET_VECTOR: u16 = 0xFFFC;

// Registers cleared at power-on (APU and I/O).
const IO_REGISTERS: std::ops::RangeInclusive<usize> = 0x4000..=0x4017;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        /// Bit 4. Only meaningful in the copy pushed to the stack.
        const BREAK = 0b00010000;
        /// Bit 5. Always set when pushed.
        const UNUSED = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

impl StatusFlags {
    /// OR'd into P whenever PHP (or BRK) pushes it.
    pub const PUSH_BITS: StatusFlags = StatusFlags::BREAK.union(StatusFlags::UNUSED);

    /// P at power-on: I and bit 5, matching Nintendulator/nestest logs
    /// rather than the documented $34.
    pub const POWER_ON: StatusFlags = StatusFlags::INTERRUPT_DISABLE.union(StatusFlags::UNUSED);
}

/// The 2A03 CPU together with the flat 64 KiB address space it executes from.
///
/// The mapper collaborator populates `ram` before the first step; the core
/// makes no distinction between RAM, ROM and registers.
#[derive(Clone)]
pub struct Cpu {
    pub a: u8,      // Accumulator
    pub x: u8,      // X register
    pub y: u8,      // Y register
    pub sp: u8,     // Stack pointer, offset into $0100-$01FF
    pub pc: u16,    // Program counter
    pub status: StatusFlags,
    pub ram: Box<[u8; RAM_SIZE]>,
    /// Cycles elapsed since power-on.
    pub cycles: u64,
}

impl Cpu {
    /// A zeroed CPU. Call [`Cpu::power_on`] to bring it to a defined state.
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: StatusFlags::empty(),
            ram: Box::new([0; RAM_SIZE]),
            cycles: 0,
        }
    }

    pub fn power_on(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = StatusFlags::POWER_ON;

        self.ram[IO_REGISTERS].fill(0);

        self.pc = self.read_u16(RESET_VECTOR);
        self.cycles = 7;
        log::debug!("power on: PC=${:04X} from reset vector", self.pc);
    }

    /// Warm reset. Unlike the power-on path, registers keep their values;
    /// the stack pointer drops by three as if an interrupt frame had been
    /// pushed, and execution restarts at the reset vector.
    pub fn reset(&mut self) {
        self.sp = self.sp.wrapping_sub(3);
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        self.pc = self.read_u16(RESET_VECTOR);
        self.cycles += 7;
        log::debug!("reset: PC=${:04X} SP=${:02X}", self.pc, self.sp);
    }

    /// Executes the instruction at PC and returns the cycles it took.
    ///
    /// Unknown opcodes fail before anything is mutated, so PC still points
    /// at the offending byte afterwards.
    pub fn step(&mut self) -> Result<u8, CpuError> {
        let opcode = self.read_u8(self.pc);
        let instruction = match decode(opcode) {
            Some(instruction) => instruction,
            None => {
                log::error!("unknown opcode 0x{:02X} at PC ${:04X}", opcode, self.pc);
                return Err(CpuError::UnknownOpcode(opcode));
            }
        };

        let cycles = self.execute(&instruction)?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    pub fn read_u8(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    pub fn write_u8(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    /// Little-endian word at `addr`; the high byte comes from `addr + 1`
    /// wrapping at $FFFF.
    pub fn read_u16(&self, addr: u16) -> u16 {
        let low = self.read_u8(addr) as u16;
        let high = self.read_u8(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    pub fn flag(&self, flag: StatusFlags) -> bool {
        self.status.contains(flag)
    }

    pub fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        self.status.set(flag, value);
    }

    pub fn set_zero_negative(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    fn push(&mut self, value: u8) {
        let addr = STACK_BASE | self.sp as u16;
        self.write_u8(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = STACK_BASE | self.sp as u16;
        self.read_u8(addr)
    }

    fn push_u16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    fn pull_u16(&mut self) -> u16 {
        let low = self.pull() as u16;
        let high = self.pull() as u16;
        (high << 8) | low
    }

    /// PLP/RTI: bits 4 and 5 keep their live values; only the other six
    /// come from the stack.
    fn pull_status(&mut self) {
        let pulled = self.pull() & !StatusFlags::PUSH_BITS.bits();
        let kept = self.status.bits() & StatusFlags::PUSH_BITS.bits();
        self.status = StatusFlags::from_bits_retain(pulled | kept);
    }

    /// Shared by ADC and SBC (which passes the one's complement).
    fn add_with_carry(&mut self, value: u8) {
        let carry = self.status.contains(StatusFlags::CARRY) as u16;
        let result = self.a as u16 + value as u16 + carry;

        self.status.set(StatusFlags::CARRY, result > 0xFF);
        self.status.set(
            StatusFlags::OVERFLOW,
            (self.a ^ result as u8) & (value ^ result as u8) & 0x80 != 0,
        );

        self.a = result as u8;
        self.set_zero_negative(self.a);
    }

    fn subtract_with_carry(&mut self, value: u8) {
        self.add_with_carry(!value);
    }

    fn compare(&mut self, reg: u8, value: u8) {
        let result = reg.wrapping_sub(value);
        self.status.set(StatusFlags::CARRY, reg >= value);
        self.status.set(StatusFlags::ZERO, reg == value);
        self.status.set(StatusFlags::NEGATIVE, result & 0x80 != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
