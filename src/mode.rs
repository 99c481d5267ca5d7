//! Wireless interface mode switching
//!
//! Most drivers reject a type change while the interface is administratively
//! up, so every change is bracketed by `ip link set <iface> down/up`.

use crate::error::IwmodeResult;
use crate::runner::{CommandRunner, CommandSpec};
use crate::validation;
use tracing::{debug, info, warn};

pub const MODE_MONITOR: &str = "monitor";
pub const MODE_MANAGED: &str = "managed";

/// Switches interfaces between operating modes
pub struct ModeSwitcher<R> {
    runner: R,
}

impl<R: CommandRunner> ModeSwitcher<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Set the operating mode of `interface`.
    ///
    /// Runs down, set-type, up in that order, each to completion. Only the
    /// exit code of `iw <iface> set type <mode>` is returned; the link
    /// toggles are best effort and the interface is brought back up even
    /// when the type change is rejected. A command that cannot be launched
    /// at all aborts the sequence with an error.
    pub async fn set_mode(&self, interface: &str, mode: &str) -> IwmodeResult<i32> {
        debug!("Bringing {} down", interface);
        let down = self.runner.run(&link_state(interface, "down")).await?;
        if !down.success() {
            debug!("ip link set {} down exited with {}", interface, down.code);
        }

        let set_type = CommandSpec::new("iw", [interface, "set", "type", mode]);
        let result = self.runner.run(&set_type).await?;

        debug!("Bringing {} up", interface);
        let up = self.runner.run(&link_state(interface, "up")).await?;
        if !up.success() {
            debug!("ip link set {} up exited with {}", interface, up.code);
        }

        if result.success() {
            info!("Interface {} set to {} mode", interface, mode);
        } else {
            warn!(
                "Failed to set {} to {} mode (code {}): {}",
                interface,
                mode,
                result.code,
                validation::sanitize_error_message(&result.stderr)
            );
        }

        Ok(result.code)
    }

    /// Put `interface` into monitor mode
    pub async fn set_monitor(&self, interface: &str) -> IwmodeResult<i32> {
        self.set_mode(interface, MODE_MONITOR).await
    }

    /// Return `interface` to managed (station) mode
    pub async fn set_managed(&self, interface: &str) -> IwmodeResult<i32> {
        self.set_mode(interface, MODE_MANAGED).await
    }
}

fn link_state(interface: &str, state: &str) -> CommandSpec {
    CommandSpec::new("ip", ["link", "set", interface, state])
}
