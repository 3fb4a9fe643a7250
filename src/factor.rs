//! Trial-factor search for Mersenne numbers M(p) = 2^p - 1
//!
//! Every prime factor q of a Mersenne number with prime exponent p has the
//! form q = 2kp + 1 with q ≡ ±1 (mod 8), so the search only visits
//! candidates of that shape up to √(2^p - 1). A candidate divides M(p)
//! exactly when 2^p ≡ 1 (mod q).
//!
//! Reference: <https://www.mersenne.org/various/math.php>

use crate::error::Error;
use crate::nt_funcs::{is_prime, mod_pow};
use log::debug;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Search bound √(2^p - 1), clamped into the range of u64 candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    /// candidates above this value end the search
    Upto(u64),
    /// 2^p - 1 outgrows the square of any u64, every candidate is admissible
    Unreachable,
}

impl Bound {
    fn new(p: u64) -> Self {
        if p >= 128 {
            // q² < 2^128 ≤ 2^p for every u64 candidate q
            return Bound::Unreachable;
        }
        // the square root of a 127-bit number always fits in u64
        Bound::Upto(num_integer::sqrt((1u128 << p) - 1) as u64)
    }

    fn admits(self, q: u64) -> bool {
        match self {
            Bound::Upto(limit) => q <= limit,
            Bound::Unreachable => true,
        }
    }
}

/// Lazy generator of the factor candidates q = 2kp + 1 for k = 1, 2, 3, ...
///
/// Candidates with q ≢ ±1 (mod 8) are skipped, since no such q divides a
/// Mersenne number; primality of the survivors is left to the caller. The
/// stream ends once a candidate passes √(2^p - 1), and a candidate escaping
/// the u64 range surfaces as [Error::FactorOverflow] before the stream
/// fuses.
pub struct FactorCandidates {
    p: u64,
    k: u64,
    bound: Bound,
    exhausted: bool,
}

impl FactorCandidates {
    pub fn new(p: u64) -> Self {
        FactorCandidates {
            p,
            k: 1,
            bound: Bound::new(p),
            exhausted: false,
        }
    }
}

impl Iterator for FactorCandidates {
    type Item = Result<u64, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        loop {
            let k = self.k;
            self.k += 1;
            let q = match 2u64
                .checked_mul(k)
                .and_then(|kk| kk.checked_mul(self.p))
                .and_then(|kkp| kkp.checked_add(1))
            {
                Some(q) => q,
                None => {
                    // every later k overflows as well
                    self.exhausted = true;
                    return Some(Err(Error::FactorOverflow { p: self.p, k }));
                }
            };
            if !self.bound.admits(q) {
                self.exhausted = true;
                return None;
            }
            // admissible residues of a Mersenne factor modulo 8
            if q & 7 != 1 && q & 7 != 7 {
                continue;
            }
            return Some(Ok(q));
        }
    }
}

/// Verdict of one factor search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// the exponent is composite, so M(p) is composite without any search
    ExponentNotPrime,
    /// the carried candidate divides M(p), witnessing compositeness
    CompositeWithFactor(u64),
    /// no factor of the admissible form exists below √(2^p - 1)
    Prime,
}

/// Search outcome for one exponent, renderable as a descriptive line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub p: u64,
    pub verdict: Verdict,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            Verdict::ExponentNotPrime => write!(
                f,
                "M{} = 2^{}-1 is not prime (exponent not prime)",
                self.p, self.p
            ),
            Verdict::CompositeWithFactor(q) => write!(
                f,
                "M{} = 2^{}-1 is composite with factor {}",
                self.p, self.p, q
            ),
            Verdict::Prime => write!(f, "M{} = 2^{}-1 is prime", self.p, self.p),
        }
    }
}

/// Configuration for [check_mersenne]
#[derive(Clone)]
pub struct SearchConfig {
    /// cooperative stop flag, polled once per candidate; a raised flag ends
    /// the search with [Error::Interrupted]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchConfig {
    pub fn default() -> Self {
        Self { cancel: None }
    }
}

/// Decide whether the Mersenne number M(p) = 2^p - 1 is prime by searching
/// for a factor of the form 2kp + 1 below √(2^p - 1).
///
/// A composite exponent settles the verdict immediately, since M(ab) is
/// divisible by M(a). Otherwise the candidates from [FactorCandidates] are
/// tested with [is_prime] and the divisibility criterion
/// `mod_pow(2, p, q) == 1`; the first hit is returned as the factor.
///
/// Exponents below 2 are rejected with [Error::InvalidExponent].
pub fn check_mersenne(p: u64, config: Option<SearchConfig>) -> Result<Report, Error> {
    let config = config.unwrap_or(SearchConfig::default());
    if p < 2 {
        return Err(Error::InvalidExponent(p));
    }
    if !is_prime(p) {
        return Ok(Report {
            p,
            verdict: Verdict::ExponentNotPrime,
        });
    }

    for candidate in FactorCandidates::new(p) {
        if let Some(flag) = &config.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(Error::Interrupted(p));
            }
        }
        let q = candidate?;
        if !is_prime(q) {
            continue;
        }
        if mod_pow(2, p, q) == 1 {
            debug!("found factor {} of M{}", q, p);
            return Ok(Report {
                p,
                verdict: Verdict::CompositeWithFactor(q),
            });
        }
    }

    debug!("no factor of M{} below the search bound", p);
    Ok(Report {
        p,
        verdict: Verdict::Prime,
    })
}
