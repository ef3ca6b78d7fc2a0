#![forbid(unsafe_code)]
//! # keystretch — PBKDF2-HMAC-SHA1 key derivation from the command line.
//!
//! Derive a key from a passphrase and a hex salt, with live progress on
//! stderr and the final hex key on stdout, or generate a fresh random salt.
//!
//! ## Examples
//! ```text
//! keystretch gen-salt --length 16
//! keystretch derive --salt-hex 73616c74 --iterations 4096 --length 20
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use keystretch::{
    DEFAULT_CHUNK_SIZE, DeriveParams, HexCase, Scheduler, Session, bytes_to_hex, generate_salt,
};
use zeroize::Zeroizing;

#[derive(Parser, Debug)]
#[command(
    name = "keystretch",
    version,
    about = "Derive keys from passphrases with PBKDF2-HMAC-SHA1"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive a key from a passphrase and salt
    Derive(DeriveArgs),
    /// Generate a random salt, hex encoded
    GenSalt(GenSaltArgs),
}

#[derive(Args, Debug)]
struct DeriveArgs {
    /// Salt, hex encoded
    #[arg(long)]
    salt_hex: String,
    /// Passphrase; read from stdin when omitted
    #[arg(long)]
    password: Option<String>,
    /// PBKDF2 iteration count
    #[arg(long, default_value_t = DeriveParams::default().iterations)]
    iterations: u32,
    /// Derived key length in bytes
    #[arg(long, default_value_t = 20)]
    length: usize,
    /// Iterations per scheduling chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk: u32,
    /// Emit uppercase hex
    #[arg(long)]
    upper: bool,
    /// Suppress progress output
    #[arg(long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct GenSaltArgs {
    /// Salt length in bytes
    #[arg(long, default_value_t = 16)]
    length: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Derive(args) => cmd_derive(args),
        Command::GenSalt(args) => cmd_gen_salt(args),
    }
}

fn cmd_derive(args: DeriveArgs) -> Result<()> {
    let salt = hex::decode(&args.salt_hex).context("salt must be valid hex")?;
    let password = Zeroizing::new(match args.password {
        Some(p) => p.into_bytes(),
        None => read_passphrase()?,
    });

    let params = DeriveParams {
        iterations: args.iterations,
        key_len: args.length,
    };
    let session =
        Session::new(&password, &salt, &params).context("invalid derivation parameters")?;
    let case = if args.upper { HexCase::Upper } else { HexCase::Lower };

    let quiet = args.quiet;
    let mut key = String::new();
    Scheduler::new(session)
        .with_chunk_size(args.chunk)
        .with_hex_case(case)
        .run(
            |pct| {
                if !quiet {
                    eprint!("\r{pct:6.2}%");
                    let _ = io::stderr().flush();
                }
            },
            |hex| key = hex,
        )?;
    if !quiet {
        eprintln!();
    }

    println!("{key}");
    Ok(())
}

fn cmd_gen_salt(args: GenSaltArgs) -> Result<()> {
    let salt = generate_salt(args.length).context("salt generation failed")?;
    println!("{}", bytes_to_hex(&salt, HexCase::Lower));
    Ok(())
}

/// Read one line from stdin as the passphrase, stripping the trailing
/// newline.
fn read_passphrase() -> Result<Vec<u8>> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read passphrase from stdin")?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    if line.is_empty() {
        bail!("empty passphrase");
    }
    Ok(line.into_bytes())
}
