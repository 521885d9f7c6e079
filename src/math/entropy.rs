/// Weighted Shannon entropy of a frequency distribution
///
/// Computes `ln(Σp) − Σ(p·ln p) / Σp` over the normalised non-zero weights,
/// which equals `−Σ p ln p` when the weights are normalised. Returns `None`
/// when the weights sum to zero (no defined distribution); callers decide how
/// to report that.
pub fn weighted_shannon_entropy(weights: &[u32]) -> Option<f64> {
    let total: u64 = weights.iter().copied().map(u64::from).sum();
    if total == 0 {
        return None;
    }

    let total = total as f64;
    let mut sum_of_weights = 0.0;
    let mut sum_of_weight_log_weights = 0.0;

    for &weight in weights {
        if weight == 0 {
            continue;
        }
        let p = f64::from(weight) / total;
        sum_of_weights += p;
        sum_of_weight_log_weights += p * p.ln();
    }

    // Rounding in the normalised sum can leave the result a few ULPs below zero
    let entropy = sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights;
    Some(entropy.max(0.0))
}
