//! Inter-line spacing estimation
//!
//! Staff lines recur with a fixed period down the page, so the
//! autocorrelation of the horizontal projection profile peaks at the
//! line spacing.

use staffline_core::Profile;

/// Autocorrelation `A(s) = Σ p[i]·p[i+s]` for lags `0..max_lag`.
pub fn autocorrelation(profile: &Profile, max_lag: usize) -> Vec<i64> {
    let p = profile.as_slice();
    (0..max_lag)
        .map(|s| {
            p.iter()
                .zip(p.iter().skip(s))
                .map(|(&a, &b)| i64::from(a) * i64::from(b))
                .sum()
        })
        .collect()
}

/// Estimate the staff inter-line spacing in rows.
///
/// Returns the lag in `min_interline..max_lag` with the largest
/// autocorrelation (first on ties), or 0 if no lag has a positive value.
pub fn estimate_interline(profile: &Profile, max_lag: u32, min_interline: u32) -> u32 {
    let acf = autocorrelation(profile, max_lag as usize);
    let mut best = 0;
    let mut interline = 0;
    for (s, &a) in acf.iter().enumerate().skip(min_interline as usize) {
        if a > best {
            best = a;
            interline = s as u32;
        }
    }
    log::debug!("interline: {} (acf {})", interline, best);
    interline
}
