mod config;

use std::{
    error, fs,
    io::{self, Read, Write},
    path::Path,
};

use clap::Parser;
use disasm::listing::{Listing, LongBranch, fuse_thumb_long_branch};
use disasm::{Instruction, InstructionKind, Mode};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use config::{CleanConfig, Input, RawConfig};

fn main() {
    let config = match RawConfig::parse().clean() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let _guard = match init_tracing(config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cannot open log file: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        tracing::error!("{e}");
        eprintln!("{e}");
        std::process::exit(2);
    }
}

/// `RUST_LOG` filters, `warn` otherwise. The returned guard flushes the log
/// file when dropped.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, io::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(fs::File::create(path)?);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(io::stderr).init();
            Ok(None)
        }
    }
}

fn run(config: &CleanConfig) -> Result<(), Box<dyn error::Error>> {
    let image = match &config.input {
        Input::Image(image) => image.clone(),
        Input::File(path) => read_file(path)?,
    };
    tracing::debug!(
        "listing {} bytes of {} code at {:#010x}",
        image.len(),
        config.mode,
        config.address
    );

    let listing = Listing::new(config.mode, &image, config.address);
    let mut out = io::stdout().lock();

    if config.json {
        let instructions = listing.collect::<Result<Vec<_>, _>>()?;
        serde_json::to_writer_pretty(&mut out, &instructions)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut previous: Option<Instruction> = None;
    for instruction in listing {
        let instruction = instruction?;
        write!(out, "{instruction}")?;

        if let Some(branch) = previous
            .as_ref()
            .and_then(|prefix| long_branch(prefix, &instruction))
        {
            let mnemonic = if branch.kind == InstructionKind::Blx {
                "BLX"
            } else {
                "BL"
            };
            write!(out, " ; {mnemonic} 0x{:08x}", branch.target)?;
        }

        writeln!(out)?;
        previous = Some(instruction);
    }

    Ok(())
}

/// Target of a Thumb `BL`/`BLX` whose prefix was the previous line.
fn long_branch(prefix: &Instruction, suffix: &Instruction) -> Option<LongBranch> {
    if prefix.mode() != Mode::Thumb || prefix.kind != InstructionKind::Unknown {
        return None;
    }

    fuse_thumb_long_branch(
        u16::try_from(prefix.opcode).ok()?,
        u16::try_from(suffix.opcode).ok()?,
        prefix.address,
    )
}

fn read_file(filepath: &Path) -> Result<Vec<u8>, Box<dyn error::Error>> {
    let mut f = fs::File::open(filepath)?;
    let mut buf = vec![];
    f.read_to_end(&mut buf)?;

    Ok(buf)
}
