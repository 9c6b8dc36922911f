use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for nes-core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests, optionally limited to library modules
    Test {
        #[arg(long)]
        doc: bool,
        /// Also run the nestest ROM comparison
        #[arg(long)]
        nestest: bool,
        /// Library modules to test (cpu, ppu, cartridge, bus, ...)
        modules: Vec<String>,
    },
    /// Run benchmarks
    Bench {
        /// Only run the named bench target (cpu_bench, ppu_bench)
        target: Option<String>,
    },
    /// Run a ROM headlessly and save the last frame
    Run {
        /// Path to ROM file
        rom_path: String,
        /// Frames to run
        #[arg(short = 'n', long, default_value = "60")]
        frames: u32,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            nestest,
            modules,
        } => run_test(doc, nestest, &modules),
        Commands::Bench { target } => run_bench(target.as_deref()),
        Commands::Run {
            rom_path,
            frames,
            release,
        } => run_rom(&rom_path, frames, release),
        Commands::PreCommit => run_pre_commit(),
        Commands::InstallHooks => install_hooks(),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(false, false, &[]), verbose)?;
    run_task("Doc Test", || run_test(true, false, &[]), verbose)?;

    report_elapsed("✓ CI passed in", start);
    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    report_elapsed("✓ Checks passed in", start);
    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = cargo("fmt");
    cmd.arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = cargo("clippy");
    cmd.arg("--workspace").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = cargo("build");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(doc: bool, nestest: bool, modules: &[String]) -> Result<()> {
    if doc {
        let mut cmd = cargo("test");
        cmd.arg("--doc");
        return execute_command(&mut cmd);
    }

    if nestest {
        println!("{} Running nestest...", "→".blue());
        let mut cmd = cargo("test");
        cmd.arg("--test")
            .arg("nestest")
            .arg("--")
            .arg("--ignored")
            .arg("--nocapture");
        execute_command(&mut cmd)?;
    }

    if modules.is_empty() {
        return execute_command(&mut cargo("test"));
    }

    // Run each module's tests sequentially
    let mut failed = Vec::new();
    for module in modules {
        println!("{} Running {} tests...", "→".blue(), module.bold());

        let mut cmd = cargo("test");
        cmd.arg("--lib").arg(format!("{}::", module));

        match execute_command(&mut cmd) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module),
            Err(_) => {
                println!("{} {} tests failed\n", "✗".red(), module);
                failed.push(module.as_str());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Module tests failed: {}", failed.join(", "))
    }
}

fn run_bench(target: Option<&str>) -> Result<()> {
    let mut cmd = cargo("bench");

    if let Some(target) = target {
        cmd.arg("--bench").arg(target);
    }

    execute_command(&mut cmd)
}

fn run_rom(rom_path: &str, frames: u32, release: bool) -> Result<()> {
    println!("{}", "=== ROM Run ===".bold().blue());

    if !Path::new(rom_path).exists() {
        println!(
            "{} ROM file not found: {}",
            "✗".red().bold(),
            rom_path.yellow()
        );
        anyhow::bail!("ROM file not found");
    }

    if !rom_path.to_lowercase().ends_with(".nes") {
        println!("{} File does not have .nes extension", "⚠".yellow().bold());
    }

    println!("{} ROM file: {}", "✓".green(), rom_path.cyan());
    println!("{} Frames: {}", "→".blue(), frames.to_string().bold());
    println!();

    let start = Instant::now();

    let mut cmd = cargo("run");
    if release {
        cmd.arg("--release");
    }
    cmd.arg("--")
        .arg(rom_path)
        .arg("--frames")
        .arg(frames.to_string())
        .arg("--screenshot");

    if let Err(e) = execute_command(&mut cmd) {
        println!("\n{} ROM run failed", "✗".red().bold());
        return Err(e);
    }

    report_elapsed("✓ ROM run completed in", start);
    Ok(())
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task("Test", || run_test(false, false, &[]), false)?;

    report_elapsed("✓ Pre-commit checks passed in", start);
    Ok(())
}

fn install_hooks() -> Result<()> {
    use std::fs;

    println!("{}", "Installing git hooks...".bold());

    let hook_content = r#"#!/bin/sh
# Auto-generated by cargo x install-hooks
set -e

echo "Running pre-commit checks..."
cargo x pre-commit
"#;

    let hook_path = ".git/hooks/pre-commit";
    fs::write(hook_path, hook_content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(hook_path, perms)?;
    }

    println!("{}", "✓ Git hooks installed".green());
    println!("  Pre-commit hook will run: fmt, clippy, test");

    Ok(())
}

fn cargo(subcommand: &str) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg(subcommand);
    cmd
}

fn report_elapsed(label: &str, start: Instant) {
    println!(
        "\n{} {}",
        label.green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", start.elapsed().as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
