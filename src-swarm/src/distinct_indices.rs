use rand::Rng;

/// `k` distinct indices drawn uniformly from `0..n`, all different from `exclude`
///
/// Callers guarantee `n > k`.
pub(crate) fn distinct_indices<R: Rng + ?Sized>(
    exclude: usize,
    k: usize,
    n: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(n > k, "need more than {} candidates, have {}", k, n);
    let mut out = Vec::with_capacity(k);
    while out.len() < k {
        let idx = rng.random_range(0..n);
        if idx != exclude && !out.contains(&idx) {
            out.push(idx);
        }
    }
    out
}
