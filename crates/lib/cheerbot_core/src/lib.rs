//! # cheerbot_core
//!
//! Core domain logic for Cheerbot.

pub mod chat;
pub mod llm;
pub mod mood;
pub mod prompt;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
