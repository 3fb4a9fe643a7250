//! Error type of the factor search

use thiserror::Error;

/// Terminal failures of a factor search invocation. None of the variants is
/// retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The exponent denotes no Mersenne number
    #[error("invalid exponent {0}, expected an integer of at least 2")]
    InvalidExponent(u64),

    /// A candidate factor 2kp + 1 left the u64 range, so verdicts past this
    /// point would need wider arithmetic
    #[error("factor candidate 2*{k}*{p} + 1 overflows the u64 range")]
    FactorOverflow { p: u64, k: u64 },

    /// The cooperative stop flag was raised during the search
    #[error("the search for a factor of M{0} was interrupted")]
    Interrupted(u64),
}
