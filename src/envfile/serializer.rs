//! Env file rendering
//!
//! Values are written verbatim. A value containing a line terminator will not
//! survive a round trip; no escaping is attempted.

use super::EnvMap;

/// Platform line terminator used between entries
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Platform line terminator used between entries
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Render a mapping as `name=value` lines, without a trailing terminator
pub fn render(map: &EnvMap) -> String {
    map.iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}
