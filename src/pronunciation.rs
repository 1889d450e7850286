//! Pronunciation Matcher (§4.14): aligns IPA transcriptions of both names
//! and applies a size-dependent score threshold.

use crate::align::{align_by_scores, ratio, AlignedPair, Alignment};
use crate::config::Thresholds;
use crate::modify::apply_rules;
use crate::phonetic::{clean_ipa, encode_token, IpaCache};
use crate::reference::ReferenceData;

pub struct PronunciationResult {
    pub matched: bool,
    pub left_ipa: String,
    pub right_ipa: String,
    pub alignment: Alignment,
}

/// Encodes both names' tokens to IPA, cleans them, applies `ipaRules`
/// jointly, aligns by `ratio`, carries over the original text alignment's
/// initial-equality scores, and applies the §4.14 threshold.
///
/// `text_tokens`/`text_alignment` are the already-computed token arrays and
/// alignment from the spelling pass over the same name pair, used only to
/// recover which index pairs were scored as initials.
pub fn pronunciation_match(
    left_tokens: &[&str],
    right_tokens: &[&str],
    text_alignment: &Alignment,
    data: &ReferenceData,
    cache: &IpaCache,
    t: &Thresholds,
) -> PronunciationResult {
    let mut left_ipa: Vec<String> = left_tokens
        .iter()
        .map(|tok| clean_ipa(&encode_token(tok, data, cache)))
        .collect();
    let mut right_ipa: Vec<String> = right_tokens
        .iter()
        .map(|tok| clean_ipa(&encode_token(tok, data, cache)))
        .collect();

    let mut left_joined = left_ipa.join(" ");
    let mut right_joined = right_ipa.join(" ");
    apply_rules(&mut left_joined, &mut right_joined, &data.ipa_rules);
    left_ipa = left_joined.split_whitespace().map(String::from).collect();
    right_ipa = right_joined.split_whitespace().map(String::from).collect();

    let initial_override: std::collections::HashMap<(usize, usize), u8> = text_alignment
        .iter()
        .filter(|p| {
            left_tokens.get(p.left).is_some_and(|w| w.chars().count() == 1)
                || right_tokens.get(p.right).is_some_and(|w| w.chars().count() == 1)
        })
        .map(|p| ((p.left, p.right), p.score))
        .collect();

    let scores: Vec<Vec<u8>> = (0..left_ipa.len())
        .map(|i| {
            (0..right_ipa.len())
                .map(|j| {
                    initial_override
                        .get(&(i, j))
                        .copied()
                        .unwrap_or_else(|| ratio(&left_ipa[i], &right_ipa[j]))
                })
                .collect()
        })
        .collect();

    let no_tiebreak = |_: usize, _: usize| 0usize;
    let alignment = align_by_scores(&scores, left_ipa.len(), right_ipa.len(), &no_tiebreak);

    let k = left_ipa.len().min(right_ipa.len());
    let lowest = alignment.iter().map(|p: &AlignedPair| p.score).min().unwrap_or(0);
    let floor = if k <= t.small_alignment_k { t.pronunciation_floor_small } else { t.pronunciation_floor_large };
    let matched = if k <= t.small_alignment_k { lowest >= floor } else { lowest > floor };

    PronunciationResult {
        matched,
        left_ipa: left_ipa.join(" "),
        right_ipa: right_ipa.join(" "),
        alignment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align, AlignedPair};

    #[test]
    fn identical_names_match_via_pronunciation() {
        let data = ReferenceData::new().unwrap();
        let cache = IpaCache::new(1000);
        let t = Thresholds::default();
        let left = ["john", "smith"];
        let right = ["jon", "smyth"];
        let text_alignment = align(&left, &right);
        let result = pronunciation_match(&left, &right, &text_alignment, &data, &cache, &t);
        assert!(result.matched);
    }

    #[test]
    fn small_alignment_uses_stricter_floor() {
        let data = ReferenceData::new().unwrap();
        let cache = IpaCache::new(1000);
        let t = Thresholds::default();
        let left = ["a", "smith"];
        let right = ["a", "smith"];
        let text_alignment = vec![
            AlignedPair { left: 0, right: 0, score: 100 },
            AlignedPair { left: 1, right: 1, score: 100 },
        ];
        let result = pronunciation_match(&left, &right, &text_alignment, &data, &cache, &t);
        assert!(result.matched);
    }
}
