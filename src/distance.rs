//! Levenshtein edit distance.
//!
//! The DP only ever reads the previous row and the cell to the left, so two
//! flat rows sized to the shorter input are enough. Results are identical to
//! the full (m+1)x(n+1) table.

/// Minimum number of single-character insertions, deletions or substitutions
/// needed to turn `left` into `right`.
///
/// Characters are compared by Unicode scalar value; no case folding or
/// normalization is applied.
pub fn edit_distance(left: &str, right: &str) -> usize {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    edit_distance_slices(&left, &right)
}

/// Edit distance over arbitrary slices, for callers that already hold decoded
/// characters (the matcher decodes the query once per scan).
pub fn edit_distance_slices<T: PartialEq>(left: &[T], right: &[T]) -> usize {
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    // Distance is symmetric, so keep the rows as short as possible.
    let (long, short) = if left.len() >= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut cur = vec![0; short.len() + 1];

    for (i, cl) in long.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cs) in short.iter().enumerate() {
            let cost = usize::from(cl != cs);
            cur[j + 1] = std::cmp::min(std::cmp::min(cur[j] + 1, prev[j + 1] + 1), prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[short.len()]
}
