//! iwmode - Wireless Interface Mode Library
//!
//! Async library for driving wireless interfaces through `ip` and `iw`:
//! - Mode switching (managed, monitor, ...) with link down/up bracketing
//! - Wireless interface enumeration, optionally filtered by mode
//! - Per-interface attribute queries
//!
//! All system access goes through a [`CommandRunner`], injected at
//! construction, so the parsing and sequencing logic can run against a fake.

pub mod error;
pub mod config;
pub mod validation;
pub mod runner;
pub mod mode;
pub mod scanner;

// Re-export commonly used types
pub use error::{IwmodeError, IwmodeResult};
pub use config::{IwmodeConfig, RunnerSettings, ToolPaths};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use mode::{ModeSwitcher, MODE_MANAGED, MODE_MONITOR};
pub use scanner::{parse_dev_info, parse_dev_list, InterfaceRecord, InterfaceScanner};
