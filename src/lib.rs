mod error;
mod factor;
pub mod nt_funcs;
mod tables;

pub use error::Error;
pub use factor::{check_mersenne, FactorCandidates, Report, SearchConfig, Verdict};

pub mod detail {
    pub use super::tables::SMALL_PRIMES;
}
