//! Pipeline Controller (§4.15): the crate's public entry point.
//!
//! Orders the four comparison attempts, computes the short/generic gates
//! (advisory only — reported on [`ComparisonResult`] but never refuse the
//! cascade on their own), and assembles the diagnostic result.

use std::path::Path;

use crate::align::{align, Alignment};
use crate::clean::{clean_name, tokenize};
use crate::config::Thresholds;
use crate::error::ReferenceError;
use crate::gates::{has_rare_surname, is_worth_continuing, too_generic, too_short};
use crate::modify::modify_names;
use crate::nickname::substitute_nicknames;
use crate::pair_clean::clean_pair;
use crate::phonetic::IpaCache;
use crate::pronunciation::pronunciation_match;
use crate::reference::ReferenceData;
use crate::spelling::{consonant_match, spelling_match};

/// One cascade attempt's rendered inputs and the alignment they produced.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub left: String,
    pub right: String,
    pub alignment: Alignment,
}

/// The full diagnostic record for one `compare` call (§3).
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub matched: bool,
    pub too_short: bool,
    pub too_generic: bool,
    pub attempt1: Option<Attempt>,
    pub attempt2: Option<Attempt>,
    pub attempt3: Option<Attempt>,
    pub attempt4: Option<Attempt>,
}

/// A constructed comparator, holding the read-only reference tables, the
/// score thresholds, and the per-word IPA memoization cache.
///
/// Reference data and thresholds are immutable after construction; the IPA
/// cache uses a concurrent map internally, so a `Comparator` may be shared
/// (e.g. behind an `Arc`) across threads without external synchronization.
pub struct Comparator {
    data: ReferenceData,
    thresholds: Thresholds,
    cache: IpaCache,
}

impl Comparator {
    /// Builds a comparator from the reference data bundled into the crate.
    pub fn new() -> Result<Self, ReferenceError> {
        Ok(Self::with_thresholds(ReferenceData::new()?, Thresholds::default()))
    }

    /// Builds a comparator from reference data loaded from `dir`, overriding
    /// the bundled defaults (see [`ReferenceData::from_dir`]).
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        Ok(Self::with_thresholds(ReferenceData::from_dir(dir)?, Thresholds::default()))
    }

    /// Builds a comparator from already-loaded reference data and explicit
    /// thresholds, for callers recalibrating against a labeled dataset.
    pub fn with_thresholds(data: ReferenceData, thresholds: Thresholds) -> Self {
        let cache = IpaCache::new(thresholds.ipa_cache_capacity);
        Comparator { data, thresholds, cache }
    }

    /// Decides whether `left` and `right` plausibly name the same person.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn compare(&self, left: &str, right: &str) -> ComparisonResult {
        let cleaned_left = clean_name(left);
        let cleaned_right = clean_name(right);
        let (paired_left, paired_right) = clean_pair(&cleaned_left, &cleaned_right);

        let base_left_tokens = tokenize(&paired_left);
        let base_right_tokens = tokenize(&paired_right);

        let base_alignment = align(&base_left_tokens, &base_right_tokens);

        let too_short_result = too_short(base_left_tokens.len(), base_right_tokens.len(), &self.thresholds);

        let last_left = *base_left_tokens.last().unwrap_or(&"_");
        let last_right = *base_right_tokens.last().unwrap_or(&"_");
        let left_rare = has_rare_surname(last_left, &self.data.top_surnames);
        let right_rare = has_rare_surname(last_right, &self.data.top_surnames);
        let too_generic_result = too_generic(
            base_left_tokens.len(),
            base_right_tokens.len(),
            &base_alignment,
            left_rare,
            right_rare,
            &base_left_tokens,
            &base_right_tokens,
        );

        if too_short_result {
            tracing::trace!(too_short_result, "name pair is short, continuing anyway");
        }

        let substituted_left: Vec<String> =
            substitute_nicknames(&base_left_tokens, &base_right_tokens, &self.data);
        let substituted_left_refs: Vec<&str> = substituted_left.iter().map(String::as_str).collect();

        let alignment1 = align(&substituted_left_refs, &base_right_tokens);
        let attempt1_match = spelling_match(
            &alignment1,
            substituted_left_refs.len(),
            base_right_tokens.len(),
            &self.thresholds,
        ) || consonant_match(
            &alignment1,
            &substituted_left_refs,
            &base_right_tokens,
            substituted_left_refs.len(),
            base_right_tokens.len(),
            &self.thresholds,
        );

        let attempt1 = Attempt {
            left: substituted_left_refs.join(" "),
            right: base_right_tokens.join(" "),
            alignment: alignment1.clone(),
        };

        if attempt1_match {
            tracing::trace!(attempt = 1, "spelling match");
            return ComparisonResult {
                matched: true,
                too_short: too_short_result,
                too_generic: too_generic_result,
                attempt1: Some(attempt1),
                attempt2: None,
                attempt3: None,
                attempt4: None,
            };
        }

        if !is_worth_continuing(&alignment1, &substituted_left_refs, &base_right_tokens) {
            tracing::trace!("worth-continuing gate refused further attempts");
            return ComparisonResult {
                matched: false,
                too_short: too_short_result,
                too_generic: too_generic_result,
                attempt1: Some(attempt1),
                attempt2: None,
                attempt3: None,
                attempt4: None,
            };
        }

        let joined_left = substituted_left_refs.join(" ");
        let joined_right = base_right_tokens.join(" ");
        let (modified_left, modified_right) = modify_names(&joined_left, &joined_right, &self.data.spelling_rules);
        let mod_left_tokens = tokenize(&modified_left);
        let mod_right_tokens = tokenize(&modified_right);

        let alignment2 = align(&mod_left_tokens, &mod_right_tokens);
        let attempt2_match = spelling_match(&alignment2, mod_left_tokens.len(), mod_right_tokens.len(), &self.thresholds)
            || consonant_match(
                &alignment2,
                &mod_left_tokens,
                &mod_right_tokens,
                mod_left_tokens.len(),
                mod_right_tokens.len(),
                &self.thresholds,
            );

        let attempt2 = Attempt {
            left: mod_left_tokens.join(" "),
            right: mod_right_tokens.join(" "),
            alignment: alignment2.clone(),
        };

        if attempt2_match {
            tracing::trace!(attempt = 2, "spelling match after modification");
            return ComparisonResult {
                matched: true,
                too_short: too_short_result,
                too_generic: too_generic_result,
                attempt1: Some(attempt1),
                attempt2: Some(attempt2),
                attempt3: None,
                attempt4: None,
            };
        }

        let pron3 = pronunciation_match(
            &mod_left_tokens,
            &mod_right_tokens,
            &alignment2,
            &self.data,
            &self.cache,
            &self.thresholds,
        );
        let attempt3 = Attempt {
            left: pron3.left_ipa.clone(),
            right: pron3.right_ipa.clone(),
            alignment: pron3.alignment.clone(),
        };

        if pron3.matched {
            tracing::trace!(attempt = 3, "pronunciation match on modified names");
            return ComparisonResult {
                matched: true,
                too_short: too_short_result,
                too_generic: too_generic_result,
                attempt1: Some(attempt1),
                attempt2: Some(attempt2),
                attempt3: Some(attempt3),
                attempt4: None,
            };
        }

        let pron4 = pronunciation_match(
            &substituted_left_refs,
            &base_right_tokens,
            &alignment1,
            &self.data,
            &self.cache,
            &self.thresholds,
        );
        let attempt4 = Attempt {
            left: pron4.left_ipa.clone(),
            right: pron4.right_ipa.clone(),
            alignment: pron4.alignment.clone(),
        };

        tracing::trace!(attempt = 4, matched = pron4.matched, "pronunciation match on original names");

        ComparisonResult {
            matched: pron4.matched,
            too_short: too_short_result,
            too_generic: too_generic_result,
            attempt1: Some(attempt1),
            attempt2: Some(attempt2),
            attempt3: Some(attempt3),
            attempt4: Some(attempt4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparator() -> Comparator {
        Comparator::new().expect("bundled reference data should load")
    }

    #[test]
    fn identical_names_match_via_attempt1() {
        let cmp = comparator();
        let result = cmp.compare("John Smith", "John Smith");
        assert!(result.matched);
        assert!(result.attempt2.is_none());
        assert!(result.attempt3.is_none());
        assert!(result.attempt4.is_none());
    }

    #[test]
    fn too_short_is_advisory_not_blocking() {
        let cmp = comparator();
        // Cleans down to a single token on each side, so too_short is true,
        // but gates are advisory: the identical pair still matches on
        // attempt 1 instead of being refused outright.
        let result = cmp.compare("Prince", "Prince");
        assert!(result.too_short);
        assert!(result.matched);
        assert!(result.attempt1.is_some());
    }

    #[test]
    fn nickname_substitution_enables_attempt1_match() {
        let cmp = comparator();
        let result = cmp.compare("Robert Jones", "Bob Jones");
        assert!(result.matched);
        assert!(result.attempt1.is_some());
        assert!(result.attempt2.is_none());
    }

    #[test]
    fn spelling_variation_matches_by_attempt_two_or_three() {
        let cmp = comparator();
        let result = cmp.compare("John Smith", "Jon Smyth");
        assert!(result.matched);
    }

    #[test]
    fn irish_o_fusion_matches_on_attempt1() {
        let cmp = comparator();
        let result = cmp.compare("Mary O'Brien", "Mary Obrien");
        assert!(result.matched);
        assert!(result.attempt2.is_none());
    }

    #[test]
    fn nickname_class_crosses_languages() {
        let cmp = comparator();
        let result = cmp.compare("Guillermo Rodriguez", "William Rodriguez");
        assert!(result.matched);
    }

    #[test]
    fn dutch_fusion_and_split_word_recombination_match() {
        let cmp = comparator();
        let result = cmp.compare("Van Der Berg John", "Vanderberg John");
        assert!(result.matched);
    }

    #[test]
    fn match_verdict_is_symmetric() {
        let cmp = comparator();
        let forward = cmp.compare("John Smith", "Jon Smyth");
        let backward = cmp.compare("Jon Smyth", "John Smith");
        assert_eq!(forward.matched, backward.matched);
    }

    #[test]
    fn clearly_different_names_do_not_match() {
        let cmp = comparator();
        let result = cmp.compare("John Smith", "Maria Gonzalez");
        assert!(!result.matched);
    }
}
