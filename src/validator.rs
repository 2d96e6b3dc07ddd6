//! Precondition checks run before a transform executes.
//!
//! Validators are attached to a [`TransformMethod`](crate::method::TransformMethod)
//! at construction and run in attachment order. The first failure short-circuits
//! the chain and its message is surfaced verbatim.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::constants::messages;

/// Outcome of a single validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

type Check = dyn Fn(&str) -> ValidResult + Send + Sync;

/// A named predicate over the raw input
#[derive(Clone)]
pub struct Validator {
    name: String,
    check: Arc<Check>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

impl Validator {
    /// Creates a validator from an arbitrary check
    pub fn new<F>(name: &str, check: F) -> Self
    where
        F: Fn(&str) -> ValidResult + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self, input: &str) -> ValidResult {
        (self.check)(input)
    }

    /// Fails on empty or whitespace-only input
    pub fn required() -> Self {
        Self::new("required", |input| {
            if input.trim().is_empty() {
                ValidResult::fail(messages::REQUIRED)
            } else {
                ValidResult::ok()
            }
        })
    }

    /// Fails when the input has fewer than `min` characters
    pub fn min_length(min: usize) -> Self {
        Self::new("min_length", move |input| {
            if input.chars().count() < min {
                ValidResult::fail(format!("Input must be at least {} characters", min))
            } else {
                ValidResult::ok()
            }
        })
    }

    /// Fails when the input has more than `max` characters
    pub fn max_length(max: usize) -> Self {
        Self::new("max_length", move |input| {
            if input.chars().count() > max {
                ValidResult::fail(format!("Input must be at most {} characters", max))
            } else {
                ValidResult::ok()
            }
        })
    }

    /// Fails when the input does not match `regex`, reporting `message`
    pub fn pattern(regex: Regex, message: &str) -> Self {
        let message = message.to_string();
        Self::new("pattern", move |input| {
            if regex.is_match(input) {
                ValidResult::ok()
            } else {
                ValidResult::fail(message.clone())
            }
        })
    }
}

/// Runs the validators in order and returns the first failure, if any.
pub fn validate_all(validators: &[Validator], input: &str) -> ValidResult {
    validators
        .iter()
        .map(|v| v.validate(input))
        .find(|r| !r.valid)
        .unwrap_or_else(ValidResult::ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_required() {
        let v = Validator::required();
        assert!(v.validate("hello").valid);
        assert_eq!(
            v.validate("").message.as_deref(),
            Some("Input is required")
        );
        assert!(!v.validate(" \n\t ").valid);
    }

    #[test]
    fn test_length_bounds_count_characters() {
        let min = Validator::min_length(3);
        let max = Validator::max_length(3);
        // Three characters, nine bytes
        let text = "日本語";
        assert!(min.validate(text).valid);
        assert!(max.validate(text).valid);
        assert!(!min.validate("ab").valid);
        assert!(!max.validate("abcd").valid);
    }

    #[test]
    fn test_pattern() {
        let v = Validator::pattern(Regex::new(r"^[01\s]+$").unwrap(), "Binary digits only");
        assert!(v.validate("0101 1100").valid);
        assert_eq!(
            v.validate("0102").message.as_deref(),
            Some("Binary digits only")
        );
    }

    #[test]
    fn test_chain_short_circuits_on_first_failure() {
        static LATER_CALLS: AtomicUsize = AtomicUsize::new(0);
        let chain = vec![
            Validator::required(),
            Validator::new("spy", |_| {
                LATER_CALLS.fetch_add(1, Ordering::SeqCst);
                ValidResult::fail("spy failed")
            }),
        ];

        let result = validate_all(&chain, "");
        assert_eq!(result.message.as_deref(), Some("Input is required"));
        assert_eq!(LATER_CALLS.load(Ordering::SeqCst), 0);

        let result = validate_all(&chain, "x");
        assert_eq!(result.message.as_deref(), Some("spy failed"));
        assert_eq!(LATER_CALLS.load(Ordering::SeqCst), 1);
    }
}
