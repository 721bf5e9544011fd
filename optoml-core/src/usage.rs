//! Token usage reporting.

use serde::{Deserialize, Serialize};

/// Token counts reported by a backend for one exchange.
///
/// Delivered to registered observers as a fire-and-forget notification after
/// the backend replies; it never affects the result of the exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u64,
    /// Tokens produced in the completion.
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Create a usage record from prompt and completion counts.
    #[must_use]
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Total tokens across prompt and completion.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }

    /// Accumulate another usage record into this one.
    pub fn merge(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total(), 150);
    }

    #[test]
    fn test_merge() {
        let mut usage = TokenUsage::new(100, 50);
        usage.merge(&TokenUsage::new(10, 5));
        assert_eq!(usage.prompt_tokens, 110);
        assert_eq!(usage.completion_tokens, 55);
        assert_eq!(usage.total(), 165);
    }
}
