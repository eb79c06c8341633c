//! CLI command implementations
//!
//! - `core` - Shared utilities (config resolution, input loading)
//! - `analyze` - JSON report output
//! - `report` - Console summary output

pub mod analyze;
pub mod core;
pub mod report;

// Re-export command functions for main.rs
pub use analyze::*;
pub use self::core::*;
pub use report::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
