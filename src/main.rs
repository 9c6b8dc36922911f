// nes-core - headless runner
//
// Loads an iNES image, runs it for a number of frames and reports the final
// CPU state. Optionally dumps the last frame as PNG and a disassembly listing.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nes_core::debug::format_listing;
use nes_core::emulator::{Emulator, EmulatorConfig, DEFAULT_CONFIG_FILE};

/// Range listed when only an output path for the disassembly is configured
const DEFAULT_LISTING_RANGE: AddressRange = AddressRange {
    start: 0xC000,
    end: 0xFFFF,
};

#[derive(Parser)]
#[command(name = "nes-core", version)]
#[command(about = "Run an iNES image on the NES CPU/PPU core without a display")]
struct Cli {
    /// Path to the iNES (.nes) image
    #[arg(required_unless_present = "init_config")]
    rom: Option<PathBuf>,

    /// Write a default configuration file to --config and exit
    #[arg(long)]
    init_config: bool,

    /// Frames to run (overrides the configuration)
    #[arg(short = 'n', long)]
    frames: Option<u32>,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Save the last frame as PNG
    #[arg(long)]
    screenshot: bool,

    /// Disassemble an address range, e.g. C000:FFFF
    #[arg(long, value_name = "START:END", value_parser = parse_range)]
    disassemble: Option<AddressRange>,

    /// Start execution here instead of at the reset vector
    #[arg(long, value_name = "ADDR", value_parser = parse_address)]
    start_pc: Option<u16>,

    /// Log every retired instruction (trace level)
    #[arg(long)]
    trace: bool,

    /// Print the final CPU state as JSON
    #[arg(long)]
    json: bool,

    /// Log filter (overrides RUST_LOG and the configuration)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AddressRange {
    start: u16,
    end: u16,
}

/// Parse a hex address: `C000`, `$C000` or `0xC000`
fn parse_address(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address '{}': {}", text, e))
}

fn parse_range(text: &str) -> Result<AddressRange, String> {
    let (start, end) = text
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", text))?;
    let range = AddressRange {
        start: parse_address(start)?,
        end: parse_address(end)?,
    };
    if range.start > range.end {
        return Err(format!("range start {:04X} is past its end {:04X}", range.start, range.end));
    }
    Ok(range)
}

fn init_logging(cli: &Cli, config: &EmulatorConfig) -> Result<()> {
    let mut filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.logging.level))
            .context("invalid logging.level in configuration")?,
    };
    if cli.trace || config.logging.trace_cpu {
        filter = filter.add_directive("nes_core::emulator=trace".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        EmulatorConfig::save_default(&cli.config)
            .with_context(|| format!("failed to write {}", cli.config.display()))?;
        println!("Default configuration written to {}", cli.config.display());
        return Ok(());
    }
    let Some(rom) = cli.rom.as_deref() else {
        bail!("no ROM given");
    };

    let mut config = if cli.config.exists() {
        EmulatorConfig::load(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?
    } else {
        EmulatorConfig::default()
    };
    if let Some(frames) = cli.frames {
        config.run.frames = frames;
    }
    if cli.start_pc.is_some() {
        config.run.start_pc = cli.start_pc;
    }
    config.logging.trace_cpu |= cli.trace;

    init_logging(&cli, &config)?;

    let mut emulator = Emulator::with_config(&config);
    emulator
        .load_cartridge(rom)
        .with_context(|| format!("failed to load {}", rom.display()))?;
    if !emulator.bus().cartridge().is_some_and(|c| c.borrow().has_mapper()) {
        bail!("{} uses an unsupported mapper", rom.display());
    }

    let listing_range = cli
        .disassemble
        .or_else(|| config.output.disassembly.as_ref().map(|_| DEFAULT_LISTING_RANGE));
    if let Some(range) = listing_range {
        let listing = format_listing(&emulator.disassemble(range.start, range.end));
        match &config.output.disassembly {
            Some(path) => {
                fs::write(path, listing)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Disassembly written to {}", path.display());
            }
            None => print!("{}", listing),
        }
    }

    if let Some(pc) = config.run.start_pc {
        emulator.set_program_counter(pc);
    }

    tracing::info!("Running {} frame(s)", config.run.frames);
    emulator.run_frames(config.run.frames);

    if cli.screenshot {
        let path = emulator
            .screenshot(&config.output.screenshot_dir)
            .context("failed to save screenshot")?;
        println!("Screenshot saved to {}", path.display());
    }

    let state = emulator.cpu_state();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", state);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_prefixes() {
        assert_eq!(parse_address("C000"), Ok(0xC000));
        assert_eq!(parse_address("$c000"), Ok(0xC000));
        assert_eq!(parse_address("0xC000"), Ok(0xC000));
        assert!(parse_address("G000").is_err());
        assert!(parse_address("10000").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_range("8000:80FF"),
            Ok(AddressRange {
                start: 0x8000,
                end: 0x80FF
            })
        );
        assert!(parse_range("8000").is_err());
        assert!(parse_range("9000:8000").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "nes-core",
            "game.nes",
            "--frames",
            "2",
            "--start-pc",
            "C000",
            "--disassemble",
            "C000:C010",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.frames, Some(2));
        assert_eq!(cli.start_pc, Some(0xC000));
        assert_eq!(
            cli.disassemble,
            Some(AddressRange {
                start: 0xC000,
                end: 0xC010
            })
        );
        assert!(cli.json);
        assert_eq!(cli.rom, Some(PathBuf::from("game.nes")));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_cli_rom_required_unless_init_config() {
        assert!(Cli::try_parse_from(["nes-core"]).is_err());
        let cli = Cli::try_parse_from(["nes-core", "--init-config"]).unwrap();
        assert!(cli.init_config);
        assert!(cli.rom.is_none());
    }
}
