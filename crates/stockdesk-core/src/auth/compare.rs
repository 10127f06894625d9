//! Constant-time secret comparison.

/// Compares `provided` against `expected` without short-circuiting.
///
/// The accumulator starts as the XOR of both lengths and folds in the XOR of
/// every byte position up to the longer length, reading missing positions as
/// zero. The amount of work therefore depends only on
/// `max(expected.len(), provided.len())`, never on where the first
/// difference sits.
pub fn matches(expected: &str, provided: &str) -> bool {
    let (mismatch, _) = fold_mismatch(expected.as_bytes(), provided.as_bytes());
    mismatch == 0
}

/// Returns the final accumulator together with the number of positions visited.
fn fold_mismatch(expected: &[u8], provided: &[u8]) -> (usize, usize) {
    let max_len = expected.len().max(provided.len());
    let mut mismatch = expected.len() ^ provided.len();
    let mut visited = 0;

    for i in 0..max_len {
        let a = expected.get(i).copied().unwrap_or(0);
        let b = provided.get(i).copied().unwrap_or(0);
        mismatch |= usize::from(a ^ b);
        visited += 1;
    }

    (mismatch, visited)
}
