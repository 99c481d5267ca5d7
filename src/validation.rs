//! Input validation and sanitization
//!
//! The mode and scanning code pass names through to `ip`/`iw` untouched.
//! Front ends call these checks before handing user input to the core.

use crate::error::{IwmodeError, IwmodeResult};

/// Maximum length for interface names (Linux kernel limit is 15)
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Longest mode name accepted (iw's longest is "mesh point")
const MAX_MODE_LEN: usize = 32;

/// Maximum length for tool error text echoed to users or logs
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Validate interface name
///
/// Interface names must be alphanumeric with optional dashes, underscores
/// and dots, and no longer than 15 characters (Linux kernel limit)
pub fn validate_interface_name(name: &str) -> IwmodeResult<()> {
    if name.is_empty() {
        return Err(IwmodeError::InvalidParameter(
            "Interface name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(IwmodeError::InvalidParameter(
            format!("Interface name too long (max {} characters)", MAX_INTERFACE_NAME_LEN)
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
            return Err(IwmodeError::InvalidParameter(
                format!("Invalid interface name '{}': contains invalid character '{}'", name, c)
            ));
        }
    }

    // Don't allow names starting with dash (could be interpreted as option)
    if name.starts_with('-') {
        return Err(IwmodeError::InvalidParameter(
            "Interface name cannot start with dash".to_string()
        ));
    }

    Ok(())
}

/// Validate a mode name before it is handed to `iw <iface> set type`
///
/// Only the shape is checked. Whether the driver supports the mode is left
/// to `iw`, which reports it through its exit code.
pub fn validate_mode(mode: &str) -> IwmodeResult<()> {
    if mode.is_empty() {
        return Err(IwmodeError::InvalidParameter(
            "Mode cannot be empty".to_string()
        ));
    }

    if mode.len() > MAX_MODE_LEN {
        return Err(IwmodeError::InvalidParameter(
            format!("Mode too long (max {} characters)", MAX_MODE_LEN)
        ));
    }

    if mode.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(IwmodeError::InvalidParameter(
            format!("Invalid mode '{}': contains whitespace or control characters", mode.escape_debug())
        ));
    }

    if mode.starts_with('-') {
        return Err(IwmodeError::InvalidParameter(
            "Mode cannot start with dash".to_string()
        ));
    }

    Ok(())
}

/// Trim tool error output to a single bounded string for display
pub fn sanitize_error_message(stderr: &str) -> String {
    let trimmed = stderr.trim();

    if trimmed.chars().count() <= MAX_ERROR_MESSAGE_LEN {
        return trimmed.to_string();
    }

    let mut sanitized: String = trimmed.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
    sanitized.push_str("... (truncated)");
    sanitized
}
