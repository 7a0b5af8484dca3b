//! Histogram of small non-negative integers
//!
//! Used to accumulate vertical run lengths when estimating line
//! thickness. Bins outside the histogram are silently ignored.

/// Fixed-length histogram with one bin per integer value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: Vec<u32>,
}

impl Histogram {
    /// Create a histogram with `len` empty bins.
    pub fn new(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check whether the histogram has no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Add one sample to `bin`. Out-of-range bins are dropped.
    pub fn increment(&mut self, bin: usize) {
        if let Some(b) = self.bins.get_mut(bin) {
            *b += 1;
        }
    }

    /// Count in `bin`; out-of-range bins count as 0.
    pub fn count(&self, bin: i64) -> u32 {
        if bin < 0 {
            return 0;
        }
        self.bins.get(bin as usize).copied().unwrap_or(0)
    }

    /// Total number of samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&b| u64::from(b)).sum()
    }

    /// Most populated bin (first on ties), or 0 if every bin is empty.
    pub fn mode(&self) -> usize {
        let mut best = 0;
        let mut best_bin = 0;
        for (i, &c) in self.bins.iter().enumerate() {
            if c > best {
                best = c;
                best_bin = i;
            }
        }
        best_bin
    }

    /// Count-weighted mean over bins `center - radius ..= center + radius`.
    ///
    /// Returns `None` when those bins hold no samples.
    pub fn weighted_mean_around(&self, center: usize, radius: usize) -> Option<f64> {
        let lo = center as i64 - radius as i64;
        let hi = center as i64 + radius as i64;
        let mut num = 0.0;
        let mut den = 0u64;
        for bin in lo..=hi {
            let c = self.count(bin);
            num += bin as f64 * f64::from(c);
            den += u64::from(c);
        }
        if den == 0 {
            return None;
        }
        Some(num / den as f64)
    }

    /// Get the bins as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.bins
    }
}
