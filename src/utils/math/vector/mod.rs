pub mod math;
pub mod serde;

use std::fmt::{self, Debug};

use num::Num;

use crate::utils::sort::radix_sort_u32_soa;

/// ZeroSpVec is a sparse vector that treats zero as the implicit element.
/// It holds `inds` (the logical index of each stored element) and `vals`
/// (the stored values) side by side.
///
/// Invariants:
/// - `inds` is strictly ascending
/// - no stored value equals zero
/// - every stored index is `< len`
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Create an all-zero vector of logical dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Create an all-zero vector with room for `nnz` stored elements
    #[inline]
    pub fn with_capacity(len: usize, nnz: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
            len,
        }
    }

    /// Build from entries in any order.
    /// Zero values are dropped. Indices must be unique and `< len`.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `inds` - element indices
    /// * `vals` - element values, aligned with `inds`
    pub fn from_unsorted(len: usize, mut inds: Vec<u32>, mut vals: Vec<N>) -> Self {
        debug_assert_eq!(inds.len(), vals.len());
        radix_sort_u32_soa(&mut inds, &mut vals);
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]), "duplicate index");
        debug_assert!(inds.last().map_or(true, |&i| (i as usize) < len));

        let mut vec = ZeroSpVec::with_capacity(len, inds.len());
        for (ind, val) in inds.into_iter().zip(vals) {
            vec.raw_push(ind, val);
        }
        vec
    }

    /// Append a stored element at `index`.
    /// `index` must be greater than every stored index. Zero is skipped.
    #[inline]
    pub(crate) fn raw_push(&mut self, index: u32, value: N) {
        debug_assert!(self.inds.last().map_or(true, |&last| last < index));
        if value != N::zero() {
            self.inds.push(index);
            self.vals.push(value);
        }
    }

    /// Logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (nonzero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// True when no element is stored
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// Element at logical `index`, or `None` when out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Stored indices, ascending
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    /// Stored values, aligned with `indices()`
    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    /// Iterate over stored `(index, value)` pairs in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Map stored values into a new vector of the same dimension.
    /// Elements mapped to zero are dropped.
    pub fn map_values<M, F>(&self, mut f: F) -> ZeroSpVec<M>
    where
        M: Num + Copy,
        F: FnMut(u32, N) -> M,
    {
        let mut out = ZeroSpVec::with_capacity(self.len, self.nnz());
        for (ind, val) in self.raw_iter() {
            out.raw_push(ind, f(ind, val));
        }
        out.shrink_to_fit();
        out
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        ZeroSpVec::new(0)
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeroSpVec")
            .field("len", &self.len)
            .field("nnz", &self.nnz())
            .field("entries", &self.raw_iter().collect::<Vec<_>>())
            .finish()
    }
}
