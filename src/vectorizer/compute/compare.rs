use num::Num;

use crate::utils::math::vector::ZeroSpVec;

pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &ZeroSpVec<N>, other: &ZeroSpVec<N>) -> f64;
    /// L2 norm
    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(vec: &ZeroSpVec<N>) -> f64;
    /// cosine similarity from a dot product and precomputed norms
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0.0 when either norm is 0
    #[inline]
    fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a * norm_b)
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot(vec: &ZeroSpVec<N>, other: &ZeroSpVec<N>) -> f64 {
        vec.dot::<f64>(other)
    }

    #[inline]
    fn norm(vec: &ZeroSpVec<N>) -> f64 {
        vec.norm()
    }
}
