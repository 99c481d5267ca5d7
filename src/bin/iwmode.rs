//! iwmode - Wireless Interface Mode CLI
//!
//! Switches wireless interfaces between operating modes and reports what
//! `iw` knows about them.
//!
//! # Usage
//!
//! ```bash
//! # Put wlan0 into monitor mode (requires root)
//! sudo iwmode monitor wlan0
//!
//! # Any mode iw understands
//! sudo iwmode set-mode wlan0 managed
//!
//! # List wireless interfaces, optionally only those in a given mode
//! iwmode list --mode monitor
//!
//! # Show interface attributes as JSON
//! iwmode -o json info wlan0
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use libiwmode::validation;
use libiwmode::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "iwmode")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wireless interface mode control - switch, list and inspect interfaces via iw", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: $IWMODE_CONFIG or /etc/iwmode/iwmode.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Output format
    #[arg(short = 'o', long, default_value = "text", global = true)]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the operating mode of an interface
    SetMode {
        /// Interface name
        interface: String,
        /// Mode to set (managed, monitor, ...)
        mode: String,
    },
    /// Put an interface into monitor mode
    Monitor {
        /// Interface name
        interface: String,
    },
    /// Put an interface into managed mode
    Managed {
        /// Interface name
        interface: String,
    },
    /// List wireless interfaces
    List {
        /// Only list interfaces currently in this mode
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Show interface attributes reported by iw
    Info {
        /// Interface name
        interface: String,
    },
}

/// Initialize logging based on command-line arguments
fn init_logging(cli: &Cli) {
    let log_level = if cli.verbose {
        "debug"
    } else {
        cli.log_level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("iwmode={},libiwmode={}", log_level, log_level)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

/// Check if the current process is running as root
fn is_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

fn require_root(action: &str) -> IwmodeResult<()> {
    if is_root() {
        return Ok(());
    }

    Err(IwmodeError::PermissionDenied(format!(
        "Operation '{}' requires root privileges.\n\
         Run with sudo or as root user.",
        action
    )))
}

/// Validate user input before anything touches the system
fn validate_command(command: &Commands) -> IwmodeResult<()> {
    match command {
        Commands::SetMode { interface, mode } => {
            validation::validate_interface_name(interface)?;
            validation::validate_mode(mode)
        }
        Commands::Monitor { interface }
        | Commands::Managed { interface }
        | Commands::Info { interface } => validation::validate_interface_name(interface),
        Commands::List { mode } => match mode {
            Some(mode) => validation::validate_mode(mode),
            None => Ok(()),
        },
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns the process exit code
async fn run(cli: &Cli) -> IwmodeResult<i32> {
    validate_command(&cli.command)?;

    let config = IwmodeConfig::discover(cli.config.as_deref())?;
    debug!("Using tools ip={} iw={}", config.tools.ip.display(), config.tools.iw.display());
    let runner = SystemRunner::from_config(&config);

    match &cli.command {
        Commands::SetMode { interface, mode } => {
            handle_set_mode(runner, interface, mode, cli.output).await
        }
        Commands::Monitor { interface } => {
            handle_set_mode(runner, interface, MODE_MONITOR, cli.output).await
        }
        Commands::Managed { interface } => {
            handle_set_mode(runner, interface, MODE_MANAGED, cli.output).await
        }
        Commands::List { mode } => handle_list(runner, mode.as_deref(), cli.output).await,
        Commands::Info { interface } => handle_info(runner, interface, cli.output).await,
    }
}

async fn handle_set_mode(
    runner: SystemRunner,
    interface: &str,
    mode: &str,
    output: OutputFormat,
) -> IwmodeResult<i32> {
    require_root("set interface mode")?;

    let switcher = ModeSwitcher::new(runner);
    let code = switcher.set_mode(interface, mode).await?;

    match output {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "interface": interface,
                "mode": mode,
                "code": code,
                "success": code == 0,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text if code == 0 => {
            println!("{}: mode set to {}", interface, mode);
        }
        OutputFormat::Text => {
            eprintln!("{}: failed to set mode {} (iw exited with {})", interface, mode, code);
        }
    }

    // Exit status must stay in 1..=255 for callers to see the failure
    Ok(match code {
        0 => 0,
        1..=255 => code,
        _ => 1,
    })
}

async fn handle_list(
    runner: SystemRunner,
    mode: Option<&str>,
    output: OutputFormat,
) -> IwmodeResult<i32> {
    let scanner = InterfaceScanner::new(runner);
    let interfaces = scanner.list_interfaces(mode).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&interfaces)?),
        OutputFormat::Text => {
            for interface in &interfaces {
                println!("{}", interface);
            }
        }
    }

    Ok(0)
}

async fn handle_info(
    runner: SystemRunner,
    interface: &str,
    output: OutputFormat,
) -> IwmodeResult<i32> {
    let scanner = InterfaceScanner::new(runner);
    let info: BTreeMap<String, String> = scanner
        .get_interface_info(interface)
        .await?
        .into_iter()
        .collect();

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => {
            for (key, value) in &info {
                println!("{}: {}", key, value);
            }
        }
    }

    Ok(0)
}
