//! Display utilities for mohair.
//!
//! Renders relation trees for plan explain output.

mod tree;

pub use tree::{DisplayTree, TreeNode};

/// Truncate `s` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
