//! Token similarity primitives and the word-pair alignment solver.

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[u8], b: &[u8]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];
    for i in 1..=n {
        for j in 1..=m {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Levenshtein-derived similarity in `[0, 100]`, matching the classic
/// `fuzzywuzzy`/python-Levenshtein `ratio()` (insert/delete cost 1,
/// substitute cost 2, which reduces to `2*lcs/(len_a+len_b)`).
pub fn ratio(a: &str, b: &str) -> u8 {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let lcs = lcs_len(a, b);
    ((200 * lcs) as f64 / total as f64).round() as u8
}

/// Best `ratio` between the shorter string and any equal-length substring
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 100;
    }
    if short.len() == long.len() {
        return ratio(short, long);
    }
    let short_len = short.len();
    let long_bytes = long.as_bytes();
    (0..=long_bytes.len() - short_len)
        .map(|start| {
            let window = std::str::from_utf8(&long_bytes[start..start + short_len])
                .unwrap_or_default();
            ratio(short, window)
        })
        .max()
        .unwrap_or(0)
}

/// Per-pair score for two tokens per the aligner's rules: initials score
/// 100/0 on first-character equality; otherwise `max(ratio, partial_ratio)`
/// unless the first characters differ, in which case `partial_ratio` is
/// suppressed.
pub fn pairwise_score(left: &str, right: &str) -> u8 {
    if left.chars().count() == 1 || right.chars().count() == 1 {
        let lc = left.chars().next();
        let rc = right.chars().next();
        return if lc == rc { 100 } else { 0 };
    }
    let r = ratio(left, right);
    let same_first_char = left.chars().next() == right.chars().next();
    if same_first_char {
        r.max(partial_ratio(left, right))
    } else {
        r
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub left: usize,
    pub right: usize,
    pub score: u8,
}

pub type Alignment = Vec<AlignedPair>;

/// Finds the maximum-weight injective assignment between `0..left.len()`
/// and `0..right.len()`, tie-broken by the total character length of the
/// matched tokens. Real names never exceed a handful of tokens (see the
/// crate's token-count guard), so a direct backtracking search over
/// permutations is simpler than and just as fast as the Hungarian algorithm
/// at this scale.
pub fn align(left: &[&str], right: &[&str]) -> Alignment {
    let scores: Vec<Vec<u8>> = left
        .iter()
        .map(|l| right.iter().map(|r| pairwise_score(l, r)).collect())
        .collect();
    let len_of = |i: usize, j: usize| left[i].len() + right[j].len();
    align_by_scores(&scores, left.len(), right.len(), &len_of)
}

/// Finds the maximum-weight injective assignment given a precomputed score
/// matrix, tie-broken by `matched_len` (e.g. total character length, or a
/// constant closure returning 0 to disable the tie-break). Shared by the
/// word-pair aligner and the pronunciation matcher's IPA-token alignment,
/// which builds its own score matrix that blends `ratio` with carried-over
/// initial-equality scores.
pub fn align_by_scores(
    scores: &[Vec<u8>],
    left_len: usize,
    right_len: usize,
    matched_len: &dyn Fn(usize, usize) -> usize,
) -> Alignment {
    let k = left_len.min(right_len);
    if k == 0 {
        return Vec::new();
    }

    let (n, m) = (left_len, right_len);
    let (small_is_left, small_len) = if n <= m { (true, n) } else { (false, m) };

    let mut best_sum: i64 = -1;
    let mut best_len: i64 = -1;
    let mut best: Vec<(usize, usize)> = Vec::new();
    let mut used_large = vec![false; n.max(m)];
    let mut assignment: Vec<Option<usize>> = vec![None; small_len];

    fn backtrack(
        idx: usize,
        small_len: usize,
        large_len: usize,
        used_large: &mut Vec<bool>,
        assignment: &mut Vec<Option<usize>>,
        best_sum: &mut i64,
        best_len: &mut i64,
        best: &mut Vec<(usize, usize)>,
        score_at: &dyn Fn(usize, usize) -> u8,
        len_at: &dyn Fn(usize, usize) -> usize,
    ) {
        if idx == small_len {
            let mut sum: i64 = 0;
            let mut len_sum: i64 = 0;
            let mut pairs = Vec::with_capacity(small_len);
            for (small_idx, large_idx) in assignment.iter().enumerate() {
                if let Some(large_idx) = large_idx {
                    sum += score_at(small_idx, *large_idx) as i64;
                    len_sum += len_at(small_idx, *large_idx) as i64;
                    pairs.push((small_idx, *large_idx));
                }
            }
            if sum > *best_sum || (sum == *best_sum && len_sum > *best_len) {
                *best_sum = sum;
                *best_len = len_sum;
                *best = pairs;
            }
            return;
        }
        for large_idx in 0..large_len {
            if used_large[large_idx] {
                continue;
            }
            used_large[large_idx] = true;
            assignment[idx] = Some(large_idx);
            backtrack(
                idx + 1,
                small_len,
                large_len,
                used_large,
                assignment,
                best_sum,
                best_len,
                best,
                score_at,
                len_at,
            );
            assignment[idx] = None;
            used_large[large_idx] = false;
        }
    }

    let large_len = n.max(m);
    let score_at = |small_idx: usize, large_idx: usize| -> u8 {
        if small_is_left {
            scores[small_idx][large_idx]
        } else {
            scores[large_idx][small_idx]
        }
    };
    let len_at = |small_idx: usize, large_idx: usize| -> usize {
        if small_is_left {
            matched_len(small_idx, large_idx)
        } else {
            matched_len(large_idx, small_idx)
        }
    };

    backtrack(
        0,
        small_len,
        large_len,
        &mut used_large,
        &mut assignment,
        &mut best_sum,
        &mut best_len,
        &mut best,
        &score_at,
        &len_at,
    );

    best.into_iter()
        .map(|(small_idx, large_idx)| {
            let (l, r) = if small_is_left {
                (small_idx, large_idx)
            } else {
                (large_idx, small_idx)
            };
            AlignedPair {
                left: l,
                right: r,
                score: scores[l][r],
            }
        })
        .collect()
}

/// Arithmetic mean of the per-pair scores in an alignment.
pub fn alignment_averaged_score(alignment: &Alignment) -> f64 {
    if alignment.is_empty() {
        return 0.0;
    }
    let sum: u32 = alignment.iter().map(|p| p.score as u32).sum();
    sum as f64 / alignment.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_identical_strings_is_100() {
        assert_eq!(ratio("smith", "smith"), 100);
    }

    #[test]
    fn ratio_suffix_match_is_high() {
        // "o'brien" vs "brien": LCS = "brien" (5), total = 12 -> 2*5/12 = 83
        assert_eq!(ratio("o'brien", "brien"), 83);
    }

    #[test]
    fn ratio_one_substitution_of_five() {
        assert_eq!(ratio("smith", "smyth"), 80);
    }

    #[test]
    fn partial_ratio_finds_best_window() {
        assert_eq!(partial_ratio("ana", "banana"), 100);
    }

    #[test]
    fn pairwise_score_initials_exact() {
        assert_eq!(pairwise_score("a", "a"), 100);
        assert_eq!(pairwise_score("a", "b"), 0);
    }

    #[test]
    fn pairwise_score_suppresses_partial_on_first_char_mismatch() {
        // differing first char: score falls back to plain ratio.
        let score = pairwise_score("jon", "bon");
        assert_eq!(score, ratio("jon", "bon"));
    }

    #[test]
    fn align_finds_identity_assignment_for_identical_names() {
        let left = ["robert", "jones"];
        let right = ["robert", "jones"];
        let alignment = align(&left, &right);
        assert_eq!(alignment.len(), 2);
        assert!(alignment.iter().all(|p| p.score == 100));
    }

    #[test]
    fn align_prefers_higher_scoring_permutation() {
        let left = ["smith", "jones"];
        let right = ["jones", "smith"];
        let alignment = align(&left, &right);
        assert_eq!(alignment.len(), 2);
        assert!(alignment.iter().all(|p| p.score == 100));
        for pair in &alignment {
            assert_eq!(left[pair.left], right[pair.right]);
        }
    }
}
