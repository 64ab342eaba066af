use std::cmp::Ordering;
use std::ops::AddAssign;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Dot product
    /// Walks only the stored entries of both vectors (merge join on indices).
    ///
    /// # Arguments
    /// * `other` - other vector
    ///
    /// # Returns
    /// * `R` - Σ(a_i * b_i) accumulated in `R`
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        let (a_inds, a_vals) = (self.indices(), self.values());
        let (b_inds, b_vals) = (other.indices(), other.values());

        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result += a_vals[i].into() * b_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Squared L2 norm, Σ(a_i^2)
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for &val in self.values() {
            let val: R = val.into();
            result += val * val;
        }
        result
    }

    /// L2 norm in f64
    #[inline]
    pub fn norm(&self) -> f64
    where
        N: Into<f64>,
    {
        self.norm_sq::<f64>().sqrt()
    }
}
