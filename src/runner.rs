//! External command execution
//!
//! Everything the crate learns about the system comes from running `ip`
//! and `iw`. The [`CommandRunner`] trait is the only seam between the mode
//! and scanning logic and the operating system; [`SystemRunner`] is the
//! production implementation on top of `tokio::process`.

use crate::config::{IwmodeConfig, ToolPaths};
use crate::error::{IwmodeError, IwmodeResult};
use async_trait::async_trait;
use std::fmt;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// A program invocation: bare program name plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `-signal` when the process was killed by a signal
    pub code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs a command to completion and captures its output.
///
/// An `Err` means the command could not be run at all (spawn failure,
/// timeout). A command that ran and failed is an `Ok` with a non-zero code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> IwmodeResult<CommandOutput>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, command: &CommandSpec) -> IwmodeResult<CommandOutput> {
        (**self).run(command).await
    }
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    async fn run(&self, command: &CommandSpec) -> IwmodeResult<CommandOutput> {
        (**self).run(command).await
    }
}

/// Runs commands on the host via `tokio::process`
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    tools: ToolPaths,
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &IwmodeConfig) -> Self {
        Self {
            tools: config.tools.clone(),
            timeout: config.runner.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> IwmodeResult<CommandOutput> {
        let program = self.tools.resolve(&command.program);
        debug!("Running {} ({})", command, program.display());

        let mut cmd = Command::new(&program);
        cmd.args(&command.args).kill_on_drop(true);

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| IwmodeError::Timeout(format!(
                    "'{}' did not finish within {}s", command, limit.as_secs_f32()
                )))?,
            None => cmd.output().await,
        };

        let output = result.map_err(|e| IwmodeError::CommandFailed {
            cmd: command.to_string(),
            code: None,
            stderr: e.to_string(),
        })?;

        let code = exit_code(output.status);
        debug!("{} exited with code {}", command, code);

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code,
        })
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
