//! Profile - A 1-D array of non-negative counts
//!
//! Horizontal projections, comb-filtered projections and per-column
//! staff evidence are all stored as `Profile`s indexed by row or column.

/// Sequence of counts indexed by row or column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    data: Vec<u32>,
}

impl Profile {
    /// Create a profile of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self { data: vec![0; len] }
    }

    /// Wrap existing counts.
    pub fn from_vec(data: Vec<u32>) -> Self {
        Self { data }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the profile has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.data.get(index).copied()
    }

    /// Get the value at a signed index; out-of-range reads as 0.
    #[inline]
    pub fn get_or_zero(&self, index: i64) -> u32 {
        if index < 0 {
            return 0;
        }
        self.data.get(index as usize).copied().unwrap_or(0)
    }

    /// Set the value at `index`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, value: u32) {
        if let Some(v) = self.data.get_mut(index) {
            *v = value;
        }
    }

    /// Get the counts as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Maximum value, or `None` if empty.
    pub fn max(&self) -> Option<u32> {
        self.data.iter().copied().max()
    }

    /// Index of the first strictly positive maximum.
    ///
    /// Returns `None` if the profile is empty or all zero.
    pub fn argmax(&self) -> Option<usize> {
        let mut best = 0;
        let mut best_idx = None;
        for (i, &v) in self.data.iter().enumerate() {
            if v > best {
                best = v;
                best_idx = Some(i);
            }
        }
        best_idx
    }
}

impl FromIterator<u32> for Profile {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl std::ops::Index<usize> for Profile {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.data[index]
    }
}
