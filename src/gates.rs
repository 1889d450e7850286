//! Short/generic/worth-continuing decision gates (§4.5, §4.9).

use ahash::AHashSet;
use compact_str::CompactString;

use crate::align::Alignment;
use crate::config::Thresholds;

/// True iff `min(|L|, |R|) < thresholds.min_token_count`.
pub fn too_short(left_len: usize, right_len: usize, thresholds: &Thresholds) -> bool {
    left_len.min(right_len) < thresholds.min_token_count
}

/// True iff the final token of the cleaned name is absent from `topSurnames`.
pub fn has_rare_surname(last_token: &str, top_surnames: &AHashSet<CompactString>) -> bool {
    !top_surnames.contains(last_token)
}

/// Too-generic iff both surnames are common and `k <= n + 1`, where `n` is
/// the number of aligned pairs with at least one side an initial.
pub fn too_generic(
    left_len: usize,
    right_len: usize,
    alignment: &Alignment,
    left_rare_surname: bool,
    right_rare_surname: bool,
    left_tokens: &[&str],
    right_tokens: &[&str],
) -> bool {
    if left_rare_surname && right_rare_surname {
        return false;
    }
    let k = left_len.min(right_len);
    let n = alignment
        .iter()
        .filter(|p| left_tokens[p.left].chars().count() == 1 || right_tokens[p.right].chars().count() == 1)
        .count();
    k <= n + 1
}

/// Worth-continuing: False iff at least one alignment pair scored 0 with an
/// initial on either side, and `k <= 3`.
pub fn is_worth_continuing(alignment: &Alignment, left_tokens: &[&str], right_tokens: &[&str]) -> bool {
    let k = left_tokens.len().min(right_tokens.len());
    let f = alignment
        .iter()
        .filter(|p| {
            p.score == 0
                && (left_tokens[p.left].chars().count() == 1 || right_tokens[p.right].chars().count() == 1)
        })
        .count();
    !(f >= 1 && k <= 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignedPair;

    #[test]
    fn too_short_requires_at_least_two_tokens() {
        let t = Thresholds::default();
        assert!(too_short(1, 3, &t));
        assert!(!too_short(2, 2, &t));
    }

    #[test]
    fn rare_surname_checks_membership() {
        let mut set = AHashSet::new();
        set.insert(CompactString::new("smith"));
        assert!(!has_rare_surname("smith", &set));
        assert!(has_rare_surname("zyzzyva", &set));
    }

    #[test]
    fn worth_continuing_false_on_initial_mismatch_with_small_k() {
        let left = ["a", "smith"];
        let right = ["b", "smith"];
        let alignment = vec![
            AlignedPair { left: 0, right: 0, score: 0 },
            AlignedPair { left: 1, right: 1, score: 100 },
        ];
        assert!(!is_worth_continuing(&alignment, &left, &right));
    }

    #[test]
    fn worth_continuing_true_without_initial_mismatch() {
        let left = ["robert", "smith"];
        let right = ["robert", "smith"];
        let alignment = vec![
            AlignedPair { left: 0, right: 0, score: 100 },
            AlignedPair { left: 1, right: 1, score: 100 },
        ];
        assert!(is_worth_continuing(&alignment, &left, &right));
    }
}
