//! Fallback-aware wrapper for external lookup results.
//!
//! External data lookups in AquaGuard never fail: a timeout or transport
//! fault resolves to a documented fallback constant instead. [`Lookup`]
//! makes that substitution observable, so tests can assert a fallback was
//! actually triggered rather than inferring it from output values.

use serde::{Deserialize, Serialize};

/// A lookup result that is always usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup<T> {
    /// The resolved value (fresh or fallback).
    pub value: T,
    /// True when the value is a fallback constant substituted after an
    /// upstream failure or timeout.
    pub used_fallback: bool,
}

impl<T> Lookup<T> {
    /// Wrap a value obtained from the upstream source.
    pub const fn fresh(value: T) -> Self {
        Self {
            value,
            used_fallback: false,
        }
    }

    /// Wrap a fallback constant substituted after an upstream failure.
    pub const fn fallback(value: T) -> Self {
        Self {
            value,
            used_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_and_fallback_flags() {
        assert!(!Lookup::fresh(1.0).used_fallback);
        assert!(Lookup::fallback(5.0).used_fallback);
        assert_eq!(Lookup::fallback(5.0).value, 5.0);
    }
}
