/// In-place L2 normalization. A zero vector stays zero.
pub(crate) fn l2_normalize_in_place(v: &mut [f32]) {
    let norm_sq: f32 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

/// Cosine similarity of two embeddings.
///
/// Returns 0.0 when the lengths differ, either vector has zero magnitude,
/// or the result is not finite. Otherwise the value lies in [-1, 1].
///
/// ```
/// use semantic::compute_similarity;
///
/// assert!((compute_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
/// assert_eq!(compute_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
/// ```
pub fn compute_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_normalize_simple_vector() {
        let mut v = vec![3.0f32, 4.0];
        l2_normalize_in_place(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn l2_normalize_zero_vector() {
        let mut v = vec![0.0f32; 4];
        l2_normalize_in_place(&mut v);
        assert_eq!(v, vec![0.0; 4]);
    }

    #[test]
    fn l2_normalize_maintains_unit_length() {
        let mut v: Vec<f32> = (0..384).map(|i| i as f32 - 100.0).collect();
        l2_normalize_in_place(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![0.2f32, -0.5, 0.9];
        assert!((compute_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_have_similarity_minus_one() {
        let a = vec![1.0f32, 2.0];
        let b = vec![-1.0f32, -2.0];
        assert!((compute_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        assert_eq!(compute_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn degenerate_inputs_give_zero() {
        assert_eq!(compute_similarity(&[], &[]), 0.0);
        assert_eq!(compute_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(compute_similarity(&[0.0; 3], &[0.0; 3]), 0.0);
        assert_eq!(compute_similarity(&[f32::NAN, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = vec![0.3f32, 0.1, -0.7];
        let b = vec![0.9f32, -0.2, 0.4];
        assert_eq!(compute_similarity(&a, &b), compute_similarity(&b, &a));
    }
}
