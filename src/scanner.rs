//! Wireless interface discovery
//!
//! Parses `iw dev` and `iw dev <iface> info` output. Any text on stderr is
//! taken as a failed query and yields an empty result rather than an error.

use crate::error::IwmodeResult;
use crate::runner::{CommandRunner, CommandSpec};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// Attribute name to value, exactly as printed by `iw`
pub type InterfaceRecord = HashMap<String, String>;

const INTERFACE_TOKEN: &str = "Interface";
const TYPE_TOKEN: &str = "type";

/// Queries wireless interfaces through `iw`
pub struct InterfaceScanner<R> {
    runner: R,
}

impl<R: CommandRunner> InterfaceScanner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// List wireless interfaces, optionally only those in `mode`.
    ///
    /// The mode comparison lower-cases the filter, not the reported type.
    /// Returned names are unique and sorted.
    pub async fn list_interfaces(&self, mode: Option<&str>) -> IwmodeResult<Vec<String>> {
        let output = self.runner.run(&CommandSpec::new("iw", ["dev"])).await?;
        if !output.stderr.is_empty() {
            warn!("iw dev reported an error: {}", output.stderr.trim());
            return Ok(Vec::new());
        }

        let filter = mode.map(str::to_lowercase);
        let interfaces = parse_dev_list(&output.stdout, filter.as_deref());
        debug!("Found wireless interfaces: {:?}", interfaces);
        Ok(interfaces)
    }

    /// Attributes of a single interface from `iw dev <iface> info`
    pub async fn get_interface_info(&self, interface: &str) -> IwmodeResult<InterfaceRecord> {
        let output = self
            .runner
            .run(&CommandSpec::new("iw", ["dev", interface, "info"]))
            .await?;
        if !output.stderr.is_empty() {
            warn!("iw dev {} info reported an error: {}", interface, output.stderr.trim());
            return Ok(InterfaceRecord::new());
        }

        Ok(parse_dev_info(&output.stdout))
    }

    /// Current operating mode of `interface`, if `iw` reports one
    pub async fn get_interface_mode(&self, interface: &str) -> IwmodeResult<Option<String>> {
        let mut info = self.get_interface_info(interface).await?;
        Ok(info.remove(TYPE_TOKEN))
    }
}

/// Extract interface names from `iw dev` output.
///
/// `mode` must already be lower-case. Without a filter an interface is
/// emitted on the line after its `Interface` header. With a filter it is
/// emitted only when a matching `type` line follows inside its block, so a
/// block without any `type` line is never listed.
pub fn parse_dev_list(output: &str, mode: Option<&str>) -> Vec<String> {
    let mut interfaces = BTreeSet::new();
    let mut current: Option<String> = None;

    // split('\n') keeps the empty segment after a trailing newline, which
    // is what flushes the last header in the unfiltered case
    for line in output.split('\n') {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(INTERFACE_TOKEN) {
            current = Some(rest.trim().to_string()).filter(|name| !name.is_empty());
        } else if let Some(mode) = mode {
            if let Some(rest) = line.strip_prefix(TYPE_TOKEN) {
                if let Some(name) = current.as_ref().filter(|_| rest.trim() == mode) {
                    interfaces.insert(name.clone());
                }
            }
        } else if let Some(name) = current.take() {
            interfaces.insert(name);
        }
    }

    interfaces.into_iter().collect()
}

/// Build a record from `iw dev <iface> info` output.
///
/// Lines holding a colon split on the first colon. Lines without one split
/// on their first whitespace run (`type monitor`), and bare tokens are
/// skipped. Keys and values are trimmed and otherwise kept as printed;
/// repeated keys keep the last value.
pub fn parse_dev_info(output: &str) -> InterfaceRecord {
    let mut info = InterfaceRecord::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let pair = line
            .split_once(':')
            .or_else(|| line.split_once(char::is_whitespace));

        if let Some((key, value)) = pair {
            info.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    info
}
