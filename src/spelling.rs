//! Spelling Matcher (§4.7) and Consonant Skeleton fallback (§4.8).

use crate::align::{ratio, Alignment};
use crate::config::Thresholds;

/// `c` = number of alignment pairs scoring `> 80`. Matches iff `c >= 3` or
/// `c == min(|L|, |R|)`.
pub fn spelling_match(alignment: &Alignment, left_len: usize, right_len: usize, t: &Thresholds) -> bool {
    let c = alignment
        .iter()
        .filter(|p| p.score > t.spelling_ratio_floor)
        .count();
    c >= t.spelling_min_matches || c == left_len.min(right_len)
}

/// Reduces a token to its consonant skeleton: vowels become `*`, then
/// consecutive identical characters collapse to one.
pub fn consonant_skeleton(token: &str) -> String {
    let starred: String = token
        .chars()
        .map(|c| if matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y') { '*' } else { c })
        .collect();

    let mut out = String::with_capacity(starred.len());
    let mut prev: Option<char> = None;
    for c in starred.chars() {
        if prev != Some(c) {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Consonant-skeleton fallback match (§4.8), applied over the original
/// token pairs underlying `alignment`.
pub fn consonant_match(
    alignment: &Alignment,
    left_tokens: &[&str],
    right_tokens: &[&str],
    left_len: usize,
    right_len: usize,
    t: &Thresholds,
) -> bool {
    let mut count = 0usize;
    for pair in alignment {
        let left = left_tokens[pair.left];
        let right = right_tokens[pair.right];
        if pair.score <= t.skeleton_low_floor {
            continue;
        }
        let left_skel = consonant_skeleton(left);
        let right_skel = consonant_skeleton(right);
        if left.chars().count() > 1 && right.chars().count() > 1 {
            let stars_left = left_skel.chars().filter(|&c| c == '*').count();
            let stars_right = right_skel.chars().filter(|&c| c == '*').count();
            if stars_left < t.skeleton_min_stars || stars_right < t.skeleton_min_stars {
                continue;
            }
        }
        let skeleton_ratio = ratio(&left_skel, &right_skel);
        if skeleton_ratio != 100
            && (skeleton_ratio <= t.skeleton_high_ceiling || pair.score <= t.skeleton_score_ceiling)
        {
            continue;
        }
        count += 1;
    }
    count > left_len.min(right_len) || count >= t.skeleton_min_matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignedPair;

    #[test]
    fn skeleton_collapses_vowels_and_repeats() {
        assert_eq!(consonant_skeleton("smith"), "sm*th");
        assert_eq!(consonant_skeleton("mississippi"), "m*s*s*p*");
    }

    #[test]
    fn spelling_matches_with_three_high_scores() {
        let t = Thresholds::default();
        let alignment = vec![
            AlignedPair { left: 0, right: 0, score: 90 },
            AlignedPair { left: 1, right: 1, score: 85 },
            AlignedPair { left: 2, right: 2, score: 95 },
        ];
        assert!(spelling_match(&alignment, 3, 3, &t));
    }

    #[test]
    fn spelling_matches_when_all_pairs_exceed_floor_even_if_fewer_than_three() {
        let t = Thresholds::default();
        let alignment = vec![AlignedPair { left: 0, right: 0, score: 90 }];
        assert!(spelling_match(&alignment, 1, 1, &t));
    }

    #[test]
    fn spelling_fails_with_too_few_high_scores() {
        let t = Thresholds::default();
        let alignment = vec![
            AlignedPair { left: 0, right: 0, score: 90 },
            AlignedPair { left: 1, right: 1, score: 50 },
        ];
        assert!(!spelling_match(&alignment, 2, 2, &t));
    }
}
