use std::collections::{btree_map, BTreeMap, VecDeque};
use std::fmt;

use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::instruction::{decode, encoding};

const DEFAULT_HISTORY_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub address: u16,
    pub enabled: bool,
    pub hit_count: u32,
}

/// Breakpoint addresses, kept in address order.
#[derive(Debug, Clone, Default)]
pub struct Breakpoints {
    entries: BTreeMap<u16, Breakpoint>,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an enabled breakpoint. Re-adding an address re-enables it and
    /// keeps its hit count.
    pub fn add(&mut self, address: u16) {
        self.entries
            .entry(address)
            .and_modify(|bp| bp.enabled = true)
            .or_insert(Breakpoint {
                address,
                enabled: true,
                hit_count: 0,
            });
        log::debug!("breakpoint added at ${:04X}", address);
    }

    pub fn remove(&mut self, address: u16) -> bool {
        let removed = self.entries.remove(&address).is_some();
        if removed {
            log::debug!("breakpoint removed from ${:04X}", address);
        }
        removed
    }

    /// Removes the breakpoint at `address` if there is one, otherwise adds
    /// it. Returns true when a breakpoint is set afterwards.
    pub fn toggle(&mut self, address: u16) -> bool {
        if self.remove(address) {
            false
        } else {
            self.add(address);
            true
        }
    }

    /// Enables or disables an existing breakpoint without losing its hit
    /// count. Returns false when no breakpoint exists at `address`.
    pub fn set_enabled(&mut self, address: u16, enabled: bool) -> bool {
        match self.entries.get_mut(&address) {
            Some(bp) => {
                bp.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// True for an enabled breakpoint at `address`.
    pub fn contains(&self, address: u16) -> bool {
        self.entries.get(&address).is_some_and(|bp| bp.enabled)
    }

    pub fn get(&self, address: u16) -> Option<&Breakpoint> {
        self.entries.get(&address)
    }

    pub fn iter(&self) -> btree_map::Values<'_, u16, Breakpoint> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // Counts the hit when an enabled breakpoint sits at `pc`.
    fn check(&mut self, pc: u16) -> bool {
        match self.entries.get_mut(&pc) {
            Some(bp) if bp.enabled => {
                bp.hit_count += 1;
                log::debug!("breakpoint hit at ${:04X} (hit count: {})", pc, bp.hit_count);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Continue,
    StepInstruction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub p: u8,
}

impl RegisterSnapshot {
    pub fn capture(cpu: &Cpu) -> Self {
        Self {
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
            p: cpu.status.bits(),
        }
    }
}

impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            self.a, self.x, self.y, self.p, self.sp
        )
    }
}

/// CPU state just before an instruction executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub pc: u16,
    pub bytes: Vec<u8>,
    pub mnemonic: &'static str,
    pub registers: RegisterSnapshot,
    pub cycle_count: u64,
}

impl TraceEntry {
    pub fn capture(cpu: &Cpu) -> Self {
        let opcode = cpu.read_u8(cpu.pc);
        Self {
            pc: cpu.pc,
            bytes: encoding(&cpu.ram, cpu.pc),
            mnemonic: decode(opcode).map_or("???", |ins| ins.mnemonic()),
            registers: RegisterSnapshot::capture(cpu),
            cycle_count: cpu.cycles,
        }
    }
}

impl fmt::Display for TraceEntry {
    // C000  4C F5 C5  JMP  A:00 X:00 Y:00 P:24 SP:FD CYC:7
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self
            .bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{:04X}  {:<8}  {}  {} CYC:{}",
            self.pc, bytes, self.mnemonic, self.registers, self.cycle_count
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// PC reached an enabled breakpoint; the instruction there has not run.
    Breakpoint(u16),
    /// One instruction ran in [`StepMode::StepInstruction`].
    Stepped,
    /// The step budget ran out.
    StepLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Breakpoint(addr) => write!(f, "breakpoint at ${:04X}", addr),
            StopReason::Stepped => write!(f, "single step"),
            StopReason::StepLimit => write!(f, "step limit reached"),
        }
    }
}

/// Drives a [`Cpu`] one instruction at a time, stopping on breakpoints and
/// keeping a bounded history of executed instructions.
pub struct Debugger {
    breakpoints: Breakpoints,
    step_mode: StepMode,
    tracing: bool,
    trace_buffer: VecDeque<TraceEntry>,
    history_size: usize,
    instruction_count: u64,
}

impl Debugger {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_history(history_size: usize) -> Self {
        Self {
            breakpoints: Breakpoints::new(),
            step_mode: StepMode::Continue,
            tracing: false,
            trace_buffer: VecDeque::with_capacity(history_size.min(DEFAULT_HISTORY_SIZE)),
            history_size,
            instruction_count: 0,
        }
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints {
        &mut self.breakpoints
    }

    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    pub fn set_step_mode(&mut self, mode: StepMode) {
        self.step_mode = mode;
    }

    /// Records every executed instruction into the trace history.
    pub fn set_tracing(&mut self, enabled: bool) {
        self.tracing = enabled;
    }

    pub fn trace(&self) -> impl Iterator<Item = &TraceEntry> {
        self.trace_buffer.iter()
    }

    pub fn clear_trace(&mut self) {
        self.trace_buffer.clear();
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// Executes exactly one instruction.
    pub fn step(&mut self, cpu: &mut Cpu) -> Result<u8, CpuError> {
        if self.tracing || log::log_enabled!(log::Level::Trace) {
            let entry = TraceEntry::capture(cpu);
            log::trace!("{}", entry);
            if self.tracing {
                self.record(entry);
            }
        }

        let cycles = cpu.step()?;
        self.instruction_count += 1;
        Ok(cycles)
    }

    /// Steps until PC lands on a breakpoint, the step mode asks to stop,
    /// or `max_steps` instructions have run. A breakpoint at the starting
    /// PC does not stop the first instruction.
    pub fn run(&mut self, cpu: &mut Cpu, max_steps: u64) -> Result<StopReason, CpuError> {
        for _ in 0..max_steps {
            self.step(cpu)?;

            if self.breakpoints.check(cpu.pc) {
                return Ok(StopReason::Breakpoint(cpu.pc));
            }
            if self.step_mode == StepMode::StepInstruction {
                return Ok(StopReason::Stepped);
            }
        }
        Ok(StopReason::StepLimit)
    }

    fn record(&mut self, entry: TraceEntry) {
        if self.history_size == 0 {
            return;
        }
        if self.trace_buffer.len() == self.history_size {
            self.trace_buffer.pop_front();
        }
        self.trace_buffer.push_back(entry);
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}
