//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, config, evaluation date)
//! - `goals` - Goal management (list, add, show, status, deactivate)
//! - `progress` - Recording progress and viewing history
//! - `insights` - Summary, single-goal projection, what-if
//! - `settings` - Drift thresholds
//! - `serve` - Web server command

pub mod core;
pub mod goals;
pub mod insights;
pub mod progress;
pub mod serve;
pub mod settings;

// Re-export command functions for main.rs
pub use core::*;
pub use goals::*;
pub use insights::*;
pub use progress::*;
pub use serve::*;
pub use settings::*;

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
