//! RISC-V instruction-set simulator CLI.
//!
//! This binary drives the simulator core from the terminal. It performs:
//! 1. **Run:** Load an assembled program (JSON) and run it to completion, feeding
//!    standard input to read syscalls.
//! 2. **Debug:** A line-oriented prompt for stepping, breakpoints, undo/redo, and
//!    register inspection.
//!
//! Logging goes through `tracing` and is controlled by `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::{fs, process, thread};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rvss_core::common::error::{SimError, SimResult};
use rvss_core::sim::loader::AssembledProgram;
use rvss_core::sim::observer::ExecutionObserver;
use rvss_core::stats::STATS_SECTIONS;
use rvss_core::{Config, HaltReason, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rvss",
    author,
    version,
    about = "RISC-V RV32/RV64 IMFD instruction-set simulator",
    long_about = "Run or debug an assembled program.\n\nPrograms and configs are JSON files.\n\nExamples:\n  rvss run program.json\n  rvss run program.json --config pipelined.json --stats hazards\n  rvss debug program.json -b 12"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it exits or reaches its end.
    Run {
        /// Assembled program artifact.
        program: PathBuf,

        /// Simulator configuration; defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Breakpoint addresses; the run stops at the first one reached.
        #[arg(short, long = "break")]
        breakpoints: Vec<u64>,

        /// Statistics sections to print (summary, instruction_mix, hazards).
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Debug a program interactively.
    Debug {
        /// Assembled program artifact.
        program: PathBuf,

        /// Simulator configuration; defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Initial breakpoint addresses.
        #[arg(short, long = "break")]
        breakpoints: Vec<u64>,
    },
}

/// Observer that prints syscall output and warnings to the terminal.
struct ConsoleObserver;

impl ExecutionObserver for ConsoleObserver {
    fn on_output(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn on_warning(&mut self, error: &SimError) {
        eprintln!("[!] {error}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            program,
            config,
            breakpoints,
            stats,
            json,
        } => cmd_run(&program, config.as_deref(), &breakpoints, &stats, json),
        Commands::Debug {
            program,
            config,
            breakpoints,
        } => cmd_debug(&program, config.as_deref(), &breakpoints),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Builds a simulator with a console observer and loads `program` into it.
fn setup(
    program: &std::path::Path,
    config: Option<&std::path::Path>,
    breakpoints: &[u64],
) -> SimResult<Simulator> {
    let config = match config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let mut sim = Simulator::new(config)?;
    sim.set_observer(Box::new(ConsoleObserver));
    let summary = sim.load_program(AssembledProgram::from_file(program)?)?;
    println!(
        "[*] Loaded {} ({} bytes of text, {:?} executor)",
        program.display(),
        summary.program_size,
        sim.kind()
    );
    for &address in breakpoints {
        let _ = sim.add_breakpoint(address)?;
    }
    Ok(sim)
}

/// Runs to completion and prints statistics.
///
/// Standard input is forwarded line by line to the input queue from a helper thread.
fn cmd_run(
    program: &std::path::Path,
    config: Option<&std::path::Path>,
    breakpoints: &[u64],
    sections: &[String],
    json: bool,
) -> SimResult<i32> {
    if let Some(unknown) = sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        return Err(SimError::InvalidConfig(format!(
            "unknown stats section `{unknown}` (expected one of {STATS_SECTIONS:?})"
        )));
    }

    let mut sim = setup(program, config, breakpoints)?;
    let control = sim.control();
    let _ = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(mut line) = line else { break };
            line.push('\n');
            if control.push_input(line).is_err() {
                break;
            }
        }
    });

    let halt = sim.run()?;
    println!("\n[*] Halted: {halt}");
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(sim.stats()).map_err(SimError::from)?
        );
    } else {
        print!("{}", sim.stats().report_sections(sections));
    }
    Ok(match halt {
        HaltReason::Exit(code) => i32::try_from(code).unwrap_or(1),
        _ => 0,
    })
}

/// Interactive debugger loop.
fn cmd_debug(
    program: &std::path::Path,
    config: Option<&std::path::Path>,
    breakpoints: &[u64],
) -> SimResult<i32> {
    let mut sim = setup(program, config, breakpoints)?;
    println!("Commands: s[tep], r[un], u[ndo], redo, b <addr>, d <addr>, l <line>, dl <line>,");
    println!("          regs, input <text>, stats, reset, q[uit]");

    let stdin = io::stdin();
    loop {
        print!("(rvss {:#x}) ", sim.cpu().regs.pc());
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(0);
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        let outcome = match command {
            "s" | "step" => sim.debug_step().map(report_halt),
            "r" | "run" => sim.debug_run().map(|halt| report_halt(Some(halt))),
            "u" | "undo" => sim.undo().map(|done| {
                if !done {
                    println!("nothing to undo");
                }
            }),
            "redo" => sim.redo().map(|done| {
                if !done {
                    println!("nothing to redo");
                }
            }),
            "b" | "break" => match parse_number(arg) {
                Some(address) => sim.add_breakpoint(address).map(|_| ()),
                None => {
                    usage("b <address>");
                    Ok(())
                }
            },
            "d" | "delete" => match parse_number(arg) {
                Some(address) => {
                    if !sim.remove_breakpoint(address) {
                        println!("no breakpoint at {address:#x}");
                    }
                    Ok(())
                }
                None => {
                    usage("d <address>");
                    Ok(())
                }
            },
            "l" | "line" => match parse_line(arg) {
                Some(source_line) => sim
                    .add_line_breakpoint(source_line)
                    .map(|address| println!("breakpoint at {address:#x}")),
                None => {
                    usage("l <line>");
                    Ok(())
                }
            },
            "dl" | "delete-line" => match parse_line(arg) {
                Some(source_line) => sim.remove_line_breakpoint(source_line).map(|removed| {
                    if !removed {
                        println!("no breakpoint on line {source_line}");
                    }
                }),
                None => {
                    usage("dl <line>");
                    Ok(())
                }
            },
            "input" => {
                let text = line.trim_start()[command.len()..].trim_start();
                sim.control().push_input(format!("{text}\n"))
            }
            "regs" => {
                print!("{}", sim.cpu().regs.dump());
                Ok(())
            }
            "stats" => {
                print!("{}", sim.stats());
                Ok(())
            }
            "reset" => sim.reset(),
            "q" | "quit" => return Ok(0),
            other => {
                println!("unknown command `{other}`");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            eprintln!("[!] {e}");
        }
    }
}

fn report_halt(halt: Option<HaltReason>) {
    if let Some(halt) = halt {
        println!("halted: {halt}");
    }
}

fn usage(text: &str) {
    println!("usage: {text}");
}

/// Parses a source line number.
fn parse_line(arg: Option<&str>) -> Option<usize> {
    parse_number(arg).and_then(|n| usize::try_from(n).ok())
}

/// Parses a decimal or `0x`-prefixed hexadecimal number.
fn parse_number(arg: Option<&str>) -> Option<u64> {
    let arg = arg?;
    match arg.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => arg.parse().ok(),
    }
}
