//! UFLA-RISC command line.
//!
//! Accepts either assembly source (`.asm`: assembled, the binary text
//! written next to the source, then executed) or pre-compiled binary
//! program text (`.bin`: executed directly). Any other extension is
//! rejected before the core is touched. After the run, prints every
//! register (binary and decimal) and every non-zero data-store cell.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use uflarisc_assembler::assemble;
use uflarisc_loader::load;
use uflarisc_runtime::{DataMemory, MachineState, Vm, VmConfig};

#[derive(Parser, Debug)]
#[command(
    name = "uflarisc",
    version,
    about = "UFLA-RISC assembler and simulator",
    long_about = "Assemble and execute UFLA-RISC programs.\n\nExamples:\n  uflarisc program.asm\n  uflarisc program.bin --max-steps 100000"
)]
struct Cli {
    /// Program to run: assembly source (.asm) or binary program text (.bin)
    input: PathBuf,

    /// Step budget before execution is forcibly stopped
    #[arg(long, default_value_t = 1000)]
    max_steps: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let extension = cli
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    // reject unsupported inputs before reading anything
    let Some(extension) = extension.filter(|e| e == "asm" || e == "bin") else {
        bail!(
            "unsupported file extension (expected .asm or .bin): {}",
            cli.input.display()
        );
    };

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let binary = if extension == "asm" {
        let binary = assemble(&text).context("assembly failed")?;
        let out_path = cli.input.with_extension("bin");
        fs::write(&out_path, &binary)
            .with_context(|| format!("writing {}", out_path.display()))?;
        println!("[*] Assembled {} -> {}", cli.input.display(), out_path.display());
        binary
    } else {
        text
    };

    let program = load(&binary).context("load failed")?;
    println!("[*] Start address: {}", program.start());

    let mut vm = Vm::new(
        program,
        VmConfig {
            max_steps: cli.max_steps,
        },
    );
    let result = vm.run().context("execution failed")?;
    println!("[*] Stopped after {} steps: {}", result.steps, result.stop);

    dump_registers(vm.state());
    dump_data(vm.data());

    Ok(())
}

fn dump_registers(state: &MachineState) {
    println!("\n=== Registers ===");
    for (index, value) in state.registers.iter().enumerate() {
        println!("r{index:02}: {value:032b}  ({value})");
    }
}

fn dump_data(data: &DataMemory) {
    println!("\n=== Data memory (non-zero) ===");
    for (addr, value) in data.iter_non_zero() {
        println!("{addr:5}: {value:032b}  ({value})");
    }
}
