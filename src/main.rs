use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use nes_cpu::config::{self, parse_u16_hex_or_dec, parse_u64_hex_or_dec};
use nes_cpu::cpu::Cpu;
use nes_cpu::debugger::{Debugger, RegisterSnapshot, StopReason};
use nes_cpu::mapper::{self, PRG_BASE};

const USAGE: &str = "Usage: nes-cpu [--load ADDR] [--pc ADDR] [--steps N] [--break ADDR]... [--trace] <image>";

struct Options {
    image: PathBuf,
    load: Option<u16>,
    pc: Option<u16>,
    steps: Option<u64>,
    breakpoints: Vec<u16>,
    trace: bool,
}

fn usage_error(msg: &str) -> ! {
    eprintln!("{}", msg);
    eprintln!("{}", USAGE);
    process::exit(2);
}

fn address_arg(flag: &str, value: Option<String>) -> u16 {
    match value.as_deref().map(parse_u16_hex_or_dec) {
        Some(Some(addr)) => addr,
        Some(None) => usage_error(&format!("{}: expected an address like 0x8000 or $8000", flag)),
        None => usage_error(&format!("{} requires a value", flag)),
    }
}

fn parse_args() -> Options {
    let mut args = env::args().skip(1);
    let mut image: Option<PathBuf> = None;
    let mut opts = Options {
        image: PathBuf::new(),
        load: None,
        pc: None,
        steps: None,
        breakpoints: Vec::new(),
        trace: false,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!("Images of exactly 16 or 32 KiB are mapped as NROM PRG unless --load is given.");
                process::exit(0);
            }
            "--load" => opts.load = Some(address_arg("--load", args.next())),
            "--pc" => opts.pc = Some(address_arg("--pc", args.next())),
            "--break" | "-b" => opts.breakpoints.push(address_arg("--break", args.next())),
            "--steps" => match args.next().as_deref().map(parse_u64_hex_or_dec) {
                Some(Some(n)) => opts.steps = Some(n),
                Some(None) => usage_error("--steps: expected a number"),
                None => usage_error("--steps requires a value"),
            },
            "--trace" => opts.trace = true,
            s if s.starts_with('-') => usage_error(&format!("Unknown option: {}", s)),
            s => {
                if image.is_some() {
                    usage_error(&format!("Unexpected argument: {}", s));
                }
                image = Some(PathBuf::from(s));
            }
        }
    }

    match image {
        Some(path) => opts.image = path,
        None => usage_error("Image argument missing"),
    }
    opts
}

fn run(opts: &Options) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(&opts.image)
        .map_err(|e| format!("failed to read {}: {}", opts.image.display(), e))?;

    let mut cpu = Cpu::new();
    let nrom = opts.load.is_none() && mapper::is_nrom_size(data.len());
    if nrom {
        mapper::load_nrom(&mut cpu, &data)?;
    } else {
        mapper::load_at(&mut cpu, opts.load.unwrap_or(PRG_BASE), &data);
    }
    log::info!(
        "loaded {} ({} bytes, {})",
        opts.image.display(),
        data.len(),
        if nrom { "NROM" } else { "raw" }
    );

    cpu.power_on();
    // Raw images rarely carry a reset vector; start them where they were loaded.
    let start = match (opts.pc, nrom) {
        (Some(pc), _) => Some(pc),
        (None, false) => Some(opts.load.unwrap_or(PRG_BASE)),
        (None, true) => None,
    };
    if let Some(pc) = start {
        cpu.pc = pc;
    }

    let mut debugger = Debugger::new();
    debugger.set_tracing(opts.trace || config::trace());
    for &addr in &opts.breakpoints {
        debugger.breakpoints_mut().add(addr);
    }

    let max_steps = opts.steps.unwrap_or_else(config::max_steps);
    let result = debugger.run(&mut cpu, max_steps);

    let reason = match result {
        Ok(reason) => reason,
        Err(e) => {
            log::warn!("stopped after {} instructions", debugger.instruction_count());
            for entry in debugger.trace() {
                eprintln!("{}", entry);
            }
            return Err(e.into());
        }
    };

    if reason == StopReason::StepLimit {
        log::warn!("step limit of {} reached", max_steps);
    }

    if !config::quiet() {
        println!("stopped: {}", reason);
        println!(
            "PC:{:04X} {} CYC:{} instructions:{}",
            cpu.pc,
            RegisterSnapshot::capture(&cpu),
            cpu.cycles,
            debugger.instruction_count()
        );
    }
    Ok(())
}

fn main() {
    let opts = parse_args();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if opts.trace || config::trace() {
        logger.filter_module("nes_cpu", log::LevelFilter::Trace);
    }
    logger.init();

    if let Err(e) = run(&opts) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
