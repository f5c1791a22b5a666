//! Keygen CLI — `keygen` command.
//!
//! Generates random keys from a charset sized by length or entropy,
//! and explains how a given configuration resolves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use keygen::{KeyConfig, KeyRequest, Preset};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// Keygen CLI — random keys, tokens and cookie values from any charset.
#[derive(Parser, Debug)]
#[command(
    name = "keygen",
    about = "Keygen CLI",
    version,
    long_about = "keygen — random key generator\n\nGenerates keys from an arbitrary printable charset, sized by an\nexplicit length or by a minimum entropy in bits, using the operating\nsystem's cryptographic random source."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one or more keys
    Generate {
        #[command(flatten)]
        opts: KeyOptions,

        /// Number of keys to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,

        /// Print keys as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show how a configuration resolves without generating a key
    Inspect {
        #[command(flatten)]
        opts: KeyOptions,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the predefined charsets
    Presets,
}

/// Charset and sizing options shared by subcommands.
#[derive(Args, Debug)]
struct KeyOptions {
    /// Characters to draw from (printable, no spaces, no duplicates)
    #[arg(long, conflicts_with = "preset")]
    charset: Option<String>,

    /// Predefined charset (base58, base62, rfc6265)
    #[arg(long)]
    preset: Option<Preset>,

    /// Minimum entropy in bits (default: 128)
    #[arg(long, short = 'e')]
    entropy: Option<u32>,

    /// Exact key length in characters; overrides --entropy
    #[arg(long, short = 'l')]
    length: Option<usize>,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

impl KeyOptions {
    /// Merge the config file (if any) with command-line flags.
    fn to_config(&self) -> Result<KeyConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => KeyConfig::default(),
        };

        if let Some(ref charset) = self.charset {
            config.charset = Some(charset.clone());
        }
        if let Some(preset) = self.preset {
            config.charset = Some(preset.as_str().to_string());
        }
        if let Some(bits) = self.entropy {
            config.min_entropy = Some(bits);
            // An explicit entropy flag replaces a length read from the file.
            if self.length.is_none() {
                config.key_length = None;
            }
        }
        if let Some(length) = self.length {
            config.key_length = Some(length);
        }

        Ok(config)
    }

    fn to_request(&self) -> Result<KeyRequest> {
        let config = self.to_config()?;
        KeyRequest::from_config(&config).context("invalid key configuration")
    }
}

fn read_config(path: &Path) -> Result<KeyConfig> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Resolved request, as printed by `inspect`.
#[derive(Serialize)]
struct Resolution {
    charset_size: usize,
    bits_per_draw: u32,
    key_length: usize,
    entropy_bits: f64,
}

impl From<&KeyRequest> for Resolution {
    fn from(request: &KeyRequest) -> Self {
        Self {
            charset_size: request.charset().len(),
            bits_per_draw: request.bits_per_draw(),
            key_length: request.key_length(),
            entropy_bits: request.entropy_bits(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Generate { opts, count, json } => cmd_generate(&opts, count, json, verbose),
        Commands::Inspect { opts, json } => cmd_inspect(&opts, json),
        Commands::Presets => cmd_presets(),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `keygen generate [--charset STR | --preset NAME] [--entropy BITS] [--length N] [-n COUNT]`
fn cmd_generate(opts: &KeyOptions, count: usize, json: bool, verbose: bool) -> Result<()> {
    let request = opts.to_request()?;

    if verbose {
        eprintln!("Charset:  {} characters", request.charset().len());
        eprintln!("Length:   {} characters", request.key_length());
        eprintln!("Entropy:  {:.2} bits", request.entropy_bits());
    }

    let keys = request
        .generate_batch(count)
        .context("failed to generate key")?;
    log::info!("generated {} key(s)", keys.len());

    if json {
        let values: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for key in &keys {
            println!("{}", key.as_str());
        }
    }

    Ok(())
}

/// `keygen inspect [--charset STR | --preset NAME] [--entropy BITS] [--length N]`
fn cmd_inspect(opts: &KeyOptions, json: bool) -> Result<()> {
    let request = opts.to_request()?;
    let resolution = Resolution::from(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    println!("Charset size:  {}", resolution.charset_size);
    println!("Bits per draw: {}", resolution.bits_per_draw);
    println!("Key length:    {}", resolution.key_length);
    println!("Entropy:       {:.2} bits", resolution.entropy_bits);

    Ok(())
}

/// `keygen presets`
fn cmd_presets() -> Result<()> {
    for preset in [Preset::Base58, Preset::Base62, Preset::Rfc6265] {
        let charset = preset.charset();
        println!(
            "{:<8} {:>3} chars  {:.3} bits/char  {}",
            preset.to_string(),
            charset.len(),
            charset.entropy_per_char(),
            preset.as_str()
        );
    }
    Ok(())
}
