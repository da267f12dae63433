//! Numeric policy attached to every matrix at construction.
//!
//! The policy decides which values a matrix accepts through `set` and which tolerance
//! the tolerance-aware kernels (LU pivots, symmetry checks) compare against. It is copied
//! into each matrix and never consulted from any ambient or global location.

use num_traits::Float;

use crate::error::MatrixError;

/// Default comparison tolerance.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Why a value was refused by a [`NumericPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NaN,
    NegativeInfinity,
    PositiveInfinity,
}

/// Epsilon tolerance and NaN/±Inf acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericPolicy {
    /// Comparison tolerance, always `>= 0`.
    pub epsilon: f64,
    /// Reject NaN and -Inf (and +Inf unless allowed) on write.
    pub validate_finiteness: bool,
    /// Accept +Inf as the "no path" sentinel.
    pub allow_positive_infinity: bool,
}

impl NumericPolicy {
    pub fn new(epsilon: f64, validate_finiteness: bool, allow_positive_infinity: bool) -> Self {
        Self { epsilon, validate_finiteness, allow_positive_infinity }
    }

    /// Policy used for distance matrices: +Inf is a legal value.
    pub fn distances() -> Self {
        Self { allow_positive_infinity: true, ..Self::default() }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_validation(mut self, on: bool) -> Self {
        self.validate_finiteness = on;
        self
    }

    pub fn with_positive_infinity(mut self, on: bool) -> Self {
        self.allow_positive_infinity = on;
        self
    }

    /// Reject a negative or NaN epsilon.
    pub fn validated(self) -> Result<Self, MatrixError> {
        if !(self.epsilon >= 0.0) {
            return Err(MatrixError::InvalidOption(format!(
                "epsilon must be >= 0, got {}",
                self.epsilon
            )));
        }
        Ok(self)
    }

    /// Check a candidate value against the policy.
    pub fn check<T: Float>(&self, value: T) -> Result<(), Rejection> {
        if !self.validate_finiteness {
            return Ok(());
        }
        if value.is_nan() {
            return Err(Rejection::NaN);
        }
        if value == T::neg_infinity() {
            return Err(Rejection::NegativeInfinity);
        }
        if value == T::infinity() && !self.allow_positive_infinity {
            return Err(Rejection::PositiveInfinity);
        }
        Ok(())
    }

    #[inline]
    pub fn accepts<T: Float>(&self, value: T) -> bool {
        self.check(value).is_ok()
    }

    /// `|value| <= epsilon`.
    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.epsilon
    }
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            validate_finiteness: true,
            allow_positive_infinity: false,
        }
    }
}
