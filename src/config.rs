//! Runner settings taken from the environment, read once per process.

use std::sync::OnceLock;

pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_u64_hex_or_dec(&v))
        .unwrap_or(default)
}

/// NES_CPU_TRACE: keep a per-instruction trace and log it.
pub fn trace() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| env_flag("NES_CPU_TRACE", false))
}

/// NES_CPU_QUIET: suppress the runner's summary output.
pub fn quiet() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| env_flag("NES_CPU_QUIET", false))
}

/// NES_CPU_MAX_STEPS: instruction budget when `--steps` is not given.
pub fn max_steps() -> u64 {
    static STEPS: OnceLock<u64> = OnceLock::new();
    *STEPS.get_or_init(|| env_u64("NES_CPU_MAX_STEPS", DEFAULT_MAX_STEPS))
}

/// Accepts `0x1F`, `$1F` or decimal `31`.
pub fn parse_u64_hex_or_dec(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(stripped, 16).ok()
    } else if let Some(stripped) = s.strip_prefix('$') {
        u64::from_str_radix(stripped, 16).ok()
    } else {
        s.parse::<u64>().ok()
    }
}

pub fn parse_u16_hex_or_dec(s: &str) -> Option<u16> {
    parse_u64_hex_or_dec(s).and_then(|n| u16::try_from(n).ok())
}
