use num::traits::checked_pow;

use crate::error::*;

/// Parameters of the layered augmenting-path search derived from `eps`.
///
/// - `k = ceil(1/eps + 1)` bounds the augmenting path parameter `i` in `1..=k`,
/// - `r = 4k^2 (8k + 10)(k - 1)(2k)^k` is the number of outer rounds,
/// - `delta = 1 / (r (2k + 2))` is the initial density threshold of the layer search.
///
/// `r` grows exponentially in `k` and is computed with checked arithmetic; values that do not
/// fit a `u64` are rejected with `ParameterOverflow` instead of wrapping.
///
/// # Example
/// ```rust
/// use streammatch::algo::LayeredParams;
///
/// let params = LayeredParams::from_eps(0.5).unwrap();
/// assert_eq!(params.k, 3);
/// assert_eq!(params.r, 528_768);
/// assert!(LayeredParams::from_eps(0.01).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredParams {
    /// Maximum augmenting path parameter
    pub k: u64,
    /// Number of outer rounds
    pub r: u64,
    /// Initial density threshold
    pub delta: f64,
}

impl LayeredParams {
    /// Derives all parameters from `eps`; fails unless `0 < eps < 1` and `r` fits a `u64`
    pub fn from_eps(eps: f64) -> Result<Self> {
        let eps = validate_eps(eps)?;

        let k = (1.0 / eps + 1.0).ceil();
        if !k.is_finite() || k >= u32::MAX as f64 {
            return Err(MatchingError::ParameterOverflow { k: u64::MAX });
        }
        let k = k as u64;

        let r = Self::rounds(k).ok_or(MatchingError::ParameterOverflow { k })?;
        let delta = 1.0 / (r as f64 * (2 * k + 2) as f64);

        Ok(Self { k, r, delta })
    }

    /// `4k^2 (8k + 10)(k - 1)(2k)^k`, or `None` on overflow
    fn rounds(k: u64) -> Option<u64> {
        let power = checked_pow(k.checked_mul(2)?, usize::try_from(k).ok()?)?;

        [k, k, k.checked_mul(8)?.checked_add(10)?, k - 1, power]
            .into_iter()
            .try_fold(4u64, |acc, factor| acc.checked_mul(factor))
    }
}
