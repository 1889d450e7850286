/// Score thresholds used throughout the comparison cascade.
///
/// These are the cascade's only tunables; every other decision is structural
/// (alignment shape, rule application order). Grouped here rather than left
/// as scattered magic numbers so a caller can recalibrate against a labeled
/// dataset without patching the pipeline itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum token count below which a name pair is too short to compare.
    pub min_token_count: usize,
    /// `ratio` floor for a pair to count as a spelling match.
    pub spelling_ratio_floor: u8,
    /// Minimum number of matched pairs required when fewer pairs than `minLength` exist.
    pub spelling_min_matches: usize,
    /// `ratio` ceiling below which a skeleton comparison is not attempted.
    pub skeleton_low_floor: u8,
    /// `ratio` above which a skeleton comparison is skipped as redundant.
    pub skeleton_high_ceiling: u8,
    /// Minimum number of `*` characters a skeleton must contain to be informative.
    pub skeleton_min_stars: usize,
    /// Minimum consonant-skeleton matches required to call the pair equivalent.
    pub skeleton_min_matches: usize,
    /// Original-score ceiling under which a non-exact skeleton match is still accepted.
    pub skeleton_score_ceiling: u8,
    /// IPA-alignment floor when `k <= small_alignment_k`.
    pub pronunciation_floor_small: u8,
    /// IPA-alignment floor when `k > small_alignment_k`.
    pub pronunciation_floor_large: u8,
    /// Alignment size at/under which the stricter pronunciation floor applies.
    pub small_alignment_k: usize,
    /// Per-word IPA memoization cache capacity before it is cleared wholesale.
    pub ipa_cache_capacity: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_token_count: 2,
            spelling_ratio_floor: 80,
            spelling_min_matches: 3,
            skeleton_low_floor: 30,
            skeleton_high_ceiling: 80,
            skeleton_min_stars: 2,
            skeleton_min_matches: 3,
            skeleton_score_ceiling: 60,
            pronunciation_floor_small: 80,
            pronunciation_floor_large: 75,
            small_alignment_k: 2,
            ipa_cache_capacity: 1000,
        }
    }
}
