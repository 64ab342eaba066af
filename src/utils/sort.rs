use num::Zero;

/// Stable LSD radix sort for sparse entries stored as struct-of-arrays.
/// - Sorts `inds` ascending
/// - Moves `vals` along with their index
/// - Equal indices keep their input order
///
/// Complexity: 4 passes, each O(n + 256)
pub fn radix_sort_u32_soa<N>(inds: &mut [u32], vals: &mut [N])
where
    N: Copy + Zero,
{
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // already sorted input is the common case (ids assigned in scan order)
    if inds.windows(2).all(|w| w[0] <= w[1]) {
        return;
    }

    if n <= 32 {
        insertion_sort_u32_soa(inds, vals);
        return;
    }

    let mut inds_tmp = vec![0u32; n];
    let mut vals_tmp = vec![N::zero(); n];

    for shift in [0u32, 8, 16, 24] {
        let mut count = [0usize; 256];
        for &k in inds.iter() {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }

        // prefix sum -> starting positions
        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for (&k, &v) in inds.iter().zip(vals.iter()) {
            let b = ((k >> shift) & 0xFF) as usize;
            let pos = count[b];
            count[b] = pos + 1;
            inds_tmp[pos] = k;
            vals_tmp[pos] = v;
        }

        inds.copy_from_slice(&inds_tmp);
        vals.copy_from_slice(&vals_tmp);
    }
}

/// insertion sort for small n (SoA)
#[inline]
fn insertion_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}
