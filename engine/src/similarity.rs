/// Cosine similarity between two vectors.
///
/// Returns a value in `[-1, 1]` where 1 means identical direction and
/// -1 means opposite direction.
///
/// Uses f64 intermediate precision and clamps the result to absorb
/// floating point error. Returns 0.0 for zero vectors or length
/// mismatches; a degenerate input can never clear a positive threshold.
pub fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for i in 0..a.len() {
        let ai = a[i] as f64;
        let bi = b[i] as f64;
        dot += ai * bi;
        norm_a += ai * ai;
        norm_b += bi * bi;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    similarity.clamp(-1.0, 1.0) as f32
}
