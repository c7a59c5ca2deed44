//! rollcall - Student Record Shell
//!
//! Command-line front end for the quadratic-probing record table:
//! - Interactive menu shell (insert, search, display)
//! - Script execution, one command per line
//! - Effective configuration dump
//!
//! # Examples
//!
//! ```bash
//! # Interactive shell
//! rollcall shell
//!
//! # Run a script and print the table as JSON
//! ROLLCALL__SHELL__OUTPUT=json rollcall run seed.txt
//!
//! # Show effective settings
//! rollcall --config rollcall.toml config
//! ```

use clap::{Args, Parser, Subcommand};
use rollcall::config::{OutputFormat, Settings};
use rollcall::shell::{render, Outcome, Session};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// rollcall - Student records on a quadratic-probing hash table
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(version = rollcall::VERSION)]
#[command(about = "Student records on a quadratic-probing hash table", long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "ROLLCALL_CONFIG")]
    config: Option<PathBuf>,

    /// Log directory path (overrides config)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error; overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive shell
    Shell(ShellArgs),

    /// Execute commands from a file
    Run(RunArgs),

    /// Print the effective configuration as TOML
    Config,

    /// Show version
    Version,
}

/// Shell arguments
#[derive(Args, Debug)]
struct ShellArgs {
    /// Render results as JSON
    #[arg(long)]
    json: bool,

    /// Do not print the numbered menu
    #[arg(long)]
    no_menu: bool,
}

/// Script arguments
#[derive(Args, Debug)]
struct RunArgs {
    /// Script file, one command per line ('-' for stdin)
    input: PathBuf,

    /// Render results as JSON
    #[arg(long)]
    json: bool,

    /// Stop at the first line that fails to parse
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.log_dir {
        settings.log.dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.log.level = level.clone();
    }
    settings.validate()?;

    match cli.command {
        Commands::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        Commands::Version => {
            println!("rollcall {}", rollcall::VERSION);
            Ok(())
        }
        Commands::Shell(args) => {
            setup_logging(&settings, cli.no_color)?;
            if args.json {
                settings.shell.output = OutputFormat::Json;
            }
            if args.no_menu {
                settings.shell.show_menu = false;
            }
            shell_command(&settings)
        }
        Commands::Run(args) => {
            setup_logging(&settings, cli.no_color)?;
            if args.json {
                settings.shell.output = OutputFormat::Json;
            }
            run_command(&settings, args)
        }
    }
}

/// Setup logging with rolling files and console output
fn setup_logging(settings: &Settings, no_color: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.log.dir)?;

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &settings.log.dir,
        &settings.log.file_prefix,
    );

    let log_level = settings.log_level()?;

    let (json_file, text_file) = if settings.log.json {
        (Some(fmt::layer().json().with_writer(file_appender)), None)
    } else {
        (None, Some(fmt::layer().with_writer(file_appender).with_ansi(false)))
    };

    // stdout belongs to the shell; console logs go to stderr
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(!no_color)
                .with_target(false),
        )
        .with(json_file)
        .with(text_file)
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    Ok(())
}

/// Interactive shell over stdin
fn shell_command(settings: &Settings) -> anyhow::Result<()> {
    info!(output = ?settings.shell.output, "Starting shell");

    let mut session = Session::new(settings.shell.output);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("STUDENT DATABASE SYSTEM (HASH TABLE - QUADRATIC PROBING)");

    loop {
        if !session.is_prompting() {
            if settings.shell.show_menu {
                println!("{}", render::MENU);
            }
            print!("{}", settings.shell.prompt);
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            info!("End of input, leaving shell");
            break;
        }

        match session.execute_line(&line) {
            Some(Outcome::Continue(message)) => println!("{}", message),
            Some(Outcome::Prompt(message)) => print!("{}", message),
            Some(Outcome::Exit(message)) => {
                println!("{}", message);
                break;
            }
            None => {}
        }
    }

    Ok(())
}

/// Execute a script, echoing each result
fn run_command(settings: &Settings, args: RunArgs) -> anyhow::Result<()> {
    let reader: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    info!(input = %args.input.display(), "Running script");
    let mut session = Session::new(settings.shell.output);

    for (number, line) in reader.lines().enumerate() {
        let line = line?;

        if args.strict {
            if let Err(err) = rollcall::Command::parse(&line) {
                if !session.is_prompting() {
                    anyhow::bail!("line {}: {}", number + 1, err);
                }
            }
        }

        match session.execute_line(&line) {
            Some(Outcome::Continue(message)) | Some(Outcome::Prompt(message)) => {
                println!("{}", message)
            }
            Some(Outcome::Exit(message)) => {
                println!("{}", message);
                return Ok(());
            }
            None => {}
        }
    }

    if session.is_prompting() {
        warn!("Script ended while waiting for input");
    }
    Ok(())
}
