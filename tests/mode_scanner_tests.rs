//! Integration tests for mode switching and interface discovery
//!
//! Drives the public API through a scripted runner that records every
//! command it is asked to run.

use async_trait::async_trait;
use libiwmode::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Replays canned outputs in order and records the commands it receives
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    replies: Mutex<VecDeque<IwmodeResult<CommandOutput>>>,
}

impl RecordingRunner {
    fn new() -> Self {
        Self::default()
    }

    fn reply(self, stdout: &str, stderr: &str, code: i32) -> Self {
        self.replies.lock().unwrap().push_back(Ok(CommandOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            code,
        }));
        self
    }

    fn exit(self, code: i32) -> Self {
        self.reply("", "", code)
    }

    fn fail_to_launch(self) -> Self {
        self.replies.lock().unwrap().push_back(Err(IwmodeError::CommandFailed {
            cmd: "ip".to_string(),
            code: None,
            stderr: "No such file or directory (os error 2)".to_string(),
        }));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> IwmodeResult<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command: {}", command))
    }
}

fn set_of(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Mode switching
// =============================================================================

#[tokio::test]
async fn test_set_mode_issues_three_commands_in_order() {
    let runner = RecordingRunner::new().exit(0).exit(0).exit(0);
    let switcher = ModeSwitcher::new(&runner);

    let code = switcher.set_mode("wlan0", "monitor").await.unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        runner.calls(),
        vec![
            "ip link set wlan0 down",
            "iw wlan0 set type monitor",
            "ip link set wlan0 up",
        ]
    );
}

#[tokio::test]
async fn test_set_mode_ignores_link_toggle_failures() {
    let runner = RecordingRunner::new().exit(2).exit(0).exit(2);
    let switcher = ModeSwitcher::new(&runner);

    assert_eq!(switcher.set_mode("wlan0", "monitor").await.unwrap(), 0);
    assert_eq!(runner.calls().len(), 3);
}

#[tokio::test]
async fn test_set_mode_reports_rejected_change_and_still_brings_up() {
    let runner = RecordingRunner::new()
        .exit(0)
        .reply("", "command failed: Device or resource busy (-16)\n", 7)
        .exit(0);
    let switcher = ModeSwitcher::new(&runner);

    assert_eq!(switcher.set_mode("wlan1", "managed").await.unwrap(), 7);
    assert_eq!(runner.calls().last().map(String::as_str), Some("ip link set wlan1 up"));
}

#[tokio::test]
async fn test_set_mode_launch_failure_stops_sequence() {
    let runner = RecordingRunner::new().fail_to_launch();
    let switcher = ModeSwitcher::new(&runner);

    let err = switcher.set_mode("wlan0", "monitor").await.unwrap_err();
    assert!(matches!(err, IwmodeError::CommandFailed { code: None, .. }));
    assert_eq!(runner.calls(), vec!["ip link set wlan0 down"]);
}

#[tokio::test]
async fn test_shared_runner_between_components() {
    let runner = Arc::new(
        RecordingRunner::new()
            .exit(0)
            .exit(0)
            .exit(0)
            .reply("Interface wlan0\n\ttype monitor\n\twiphy 0\n", "", 0),
    );
    let switcher = ModeSwitcher::new(Arc::clone(&runner));
    let scanner = InterfaceScanner::new(Arc::clone(&runner));

    assert_eq!(switcher.set_monitor("wlan0").await.unwrap(), 0);
    assert_eq!(
        scanner.get_interface_mode("wlan0").await.unwrap().as_deref(),
        Some("monitor")
    );
    assert_eq!(runner.calls().last().map(String::as_str), Some("iw dev wlan0 info"));
}

// =============================================================================
// Interface discovery
// =============================================================================

#[tokio::test]
async fn test_list_unfiltered_emits_every_header() {
    let runner = RecordingRunner::new().reply("Interface wlan0\ntype managed\nInterface wlan1\n", "", 0);
    let scanner = InterfaceScanner::new(&runner);

    let names: HashSet<String> = scanner.list_interfaces(None).await.unwrap().into_iter().collect();
    assert_eq!(names, set_of(&["wlan0", "wlan1"]));
    assert_eq!(runner.calls(), vec!["iw dev"]);
}

#[tokio::test]
async fn test_list_filtered_by_mode() {
    let output = "Interface wlan0\n\ttype monitor\nInterface wlan1\n\ttype managed\n";
    let runner = RecordingRunner::new().reply(output, "", 0).reply(output, "", 0);
    let scanner = InterfaceScanner::new(&runner);

    assert_eq!(scanner.list_interfaces(Some("monitor")).await.unwrap(), vec!["wlan0"]);
    assert_eq!(scanner.list_interfaces(Some("Managed")).await.unwrap(), vec!["wlan1"]);
}

#[tokio::test]
async fn test_list_filtered_omits_block_without_type() {
    let runner = RecordingRunner::new().reply("Interface wlan0\n\tifindex 3\n", "", 0);
    let scanner = InterfaceScanner::new(&runner);

    assert!(scanner.list_interfaces(Some("managed")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_error_stream_discards_stdout() {
    let runner = RecordingRunner::new().reply(
        "Interface wlan0\n\ttype monitor\n",
        "nl80211 not found.\n",
        0,
    );
    let scanner = InterfaceScanner::new(&runner);

    assert!(scanner.list_interfaces(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_twice_same_result() {
    let output = "Interface wlan0\ntype managed\nInterface wlan1\n";
    let runner = RecordingRunner::new().reply(output, "", 0).reply(output, "", 0);
    let scanner = InterfaceScanner::new(&runner);

    let first = scanner.list_interfaces(None).await.unwrap();
    let second = scanner.list_interfaces(None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_info_record() {
    let runner = RecordingRunner::new().reply("\tInterface wlan0\n\ttype monitor\n\twiphy 0\n", "", 0);
    let scanner = InterfaceScanner::new(&runner);

    let info = scanner.get_interface_info("wlan0").await.unwrap();
    let expected: HashMap<String, String> = [("Interface", "wlan0"), ("type", "monitor"), ("wiphy", "0")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(info, expected);
    assert_eq!(runner.calls(), vec!["iw dev wlan0 info"]);
}

#[tokio::test]
async fn test_info_repeated_key_last_wins() {
    let runner = RecordingRunner::new().reply("\tssid: first\n\tssid: second\n", "", 0);
    let scanner = InterfaceScanner::new(&runner);

    let info = scanner.get_interface_info("wlan0").await.unwrap();
    assert_eq!(info.get("ssid").map(String::as_str), Some("second"));
}

#[tokio::test]
async fn test_info_error_is_empty_record() {
    let runner = RecordingRunner::new().reply("", "command failed: No such device (-19)\n", 237);
    let scanner = InterfaceScanner::new(&runner);

    assert!(scanner.get_interface_info("wlan7").await.unwrap().is_empty());
}
