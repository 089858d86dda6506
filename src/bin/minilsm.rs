//! MiniLSM Shell
//!
//! Line-oriented shell over a single in-memory engine.

use std::io::{self, BufRead, Write};

use clap::Parser;
use minilsm::protocol::Command;
use minilsm::{Config, Engine, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// MiniLSM Shell
#[derive(Parser, Debug)]
#[command(name = "minilsm")]
#[command(about = "Interactive shell for the MiniLSM memtable engine")]
#[command(version)]
struct Args {
    /// MemTable size limit in KB before rotation
    #[arg(short = 'm', long, default_value = "64")]
    memtable_kb: usize,

    /// Do not print a prompt (for piped input)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,minilsm=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("MiniLSM v{}", minilsm::VERSION);

    let config = Config::builder()
        .memtable_size_limit(args.memtable_kb * 1024)
        .build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&engine, args.quiet) {
        tracing::error!("Shell error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Shell stopped");
}

/// Read commands until EOF or `QUIT`
fn run(engine: &Engine, quiet: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if !quiet {
            write!(stdout, "minilsm> ")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        let output = match Command::parse(trimmed).and_then(|cmd| engine.execute(cmd)) {
            Ok(response) => response.render(),
            Err(e) => format!("ERR {}", e),
        };
        writeln!(stdout, "{}", output)?;
    }

    Ok(())
}
