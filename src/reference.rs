use std::path::Path;

use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::{ReferenceDataSource, ReferenceError};
use crate::rules::{self, NicknameIndex, Rule};

const IPA_ALL_NAMES: &str = include_str!("../data/_ipa_all_names.json");
const IPA_COMMON_WORD_PARTS: &str = include_str!("../data/_ipa_common_word_parts.json");
const TOP_SURNAMES: &str = include_str!("../data/_top_surnames.json");
const RULES_IPA: &str = include_str!("../data/_rules_ipa.json");
const RULES_SPELLING: &str = include_str!("../data/_rules_spelling.json");
const NICKNAME_SETS: &str = include_str!("../data/_nickname_sets.json");

/// The five reference datasets loaded once at construction and shared
/// read-only for the lifetime of a [`crate::Comparator`].
///
/// Plain owned data with no interior mutability, so it is `Send + Sync` and
/// a `Comparator` built on top of it can be wrapped in an `Arc` and shared
/// across threads.
#[derive(Debug)]
pub struct ReferenceData {
    pub names_to_ipa: AHashMap<CompactString, CompactString>,
    pub syllable_to_ipa: AHashMap<CompactString, CompactString>,
    pub top_surnames: AHashSet<CompactString>,
    pub ipa_rules: Vec<Rule>,
    pub spelling_rules: Vec<Rule>,
    pub nickname_sets: Vec<Vec<CompactString>>,
    pub nickname_index: NicknameIndex,
}

impl ReferenceData {
    /// Loads the reference data bundled into the crate binary.
    pub fn new() -> Result<Self, ReferenceError> {
        Self::from_sources(
            IPA_ALL_NAMES,
            IPA_COMMON_WORD_PARTS,
            TOP_SURNAMES,
            RULES_IPA,
            RULES_SPELLING,
            NICKNAME_SETS,
        )
    }

    /// Loads reference data from a directory holding the five files named
    /// in the external-interfaces contract, overriding the bundled defaults.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let dir = dir.as_ref();
        let read = |name: &str| -> Result<String, ReferenceError> {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| ReferenceError::ReferenceDataMissing {
                path: path.display().to_string(),
                source: ReferenceDataSource::Io(e),
            })
        };
        Self::from_sources(
            &read("_ipa_all_names.json")?,
            &read("_ipa_common_word_parts.json")?,
            &read("_top_surnames.json")?,
            &read("_rules_ipa.json")?,
            &read("_rules_spelling.json")?,
            &read("_nickname_sets.json")?,
        )
    }

    fn from_sources(
        ipa_all_names: &str,
        ipa_common_word_parts: &str,
        top_surnames: &str,
        rules_ipa: &str,
        rules_spelling: &str,
        nickname_sets: &str,
    ) -> Result<Self, ReferenceError> {
        let names_to_ipa = parse_string_map(ipa_all_names, "_ipa_all_names.json")?;
        let syllable_to_ipa = parse_string_map(ipa_common_word_parts, "_ipa_common_word_parts.json")?;
        let top_surnames = parse_top_surnames(top_surnames)?;
        let ipa_rules = rules::parse_rules(rules_ipa, "_rules_ipa.json", true)?;
        let spelling_rules = rules::parse_rules(rules_spelling, "_rules_spelling.json", false)?;
        let nickname_sets = parse_nickname_sets(nickname_sets)?;
        let nickname_index = build_nickname_index(&nickname_sets);

        Ok(ReferenceData {
            names_to_ipa,
            syllable_to_ipa,
            top_surnames,
            ipa_rules,
            spelling_rules,
            nickname_sets,
            nickname_index,
        })
    }
}

fn parse_string_map(
    json: &str,
    path: &str,
) -> Result<AHashMap<CompactString, CompactString>, ReferenceError> {
    let raw: AHashMap<String, String> =
        serde_json::from_str(json).map_err(|e| ReferenceError::ReferenceDataMissing {
            path: path.to_string(),
            source: ReferenceDataSource::Json(e),
        })?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (CompactString::from(k), CompactString::from(v)))
        .collect())
}

fn parse_top_surnames(json: &str) -> Result<AHashSet<CompactString>, ReferenceError> {
    let raw: Vec<Vec<String>> =
        serde_json::from_str(json).map_err(|e| ReferenceError::ReferenceDataMissing {
            path: "_top_surnames.json".to_string(),
            source: ReferenceDataSource::Json(e),
        })?;
    Ok(raw
        .into_iter()
        .filter_map(|tup| tup.into_iter().next())
        .map(CompactString::from)
        .collect())
}

fn parse_nickname_sets(json: &str) -> Result<Vec<Vec<CompactString>>, ReferenceError> {
    let raw: Vec<Vec<String>> =
        serde_json::from_str(json).map_err(|e| ReferenceError::ReferenceDataMissing {
            path: "_nickname_sets.json".to_string(),
            source: ReferenceDataSource::Json(e),
        })?;
    Ok(raw
        .into_iter()
        .map(|class| class.into_iter().map(CompactString::from).collect())
        .collect())
}

fn build_nickname_index(sets: &[Vec<CompactString>]) -> NicknameIndex {
    let mut index: NicknameIndex = AHashMap::new();
    for (class_idx, class) in sets.iter().enumerate() {
        for token in class {
            index
                .entry(token.clone())
                .or_insert_with(SmallVec::new)
                .push(class_idx);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bundled_defaults() {
        let data = ReferenceData::new().expect("bundled reference data should parse");
        assert!(data.names_to_ipa.contains_key("john"));
        assert!(data.top_surnames.contains("smith"));
        assert!(!data.spelling_rules.is_empty());
        assert!(!data.ipa_rules.is_empty());
    }

    #[test]
    fn nickname_index_maps_token_to_class() {
        let data = ReferenceData::new().unwrap();
        let classes = data.nickname_index.get("bob").expect("bob is a nickname");
        assert!(classes
            .iter()
            .any(|&i| data.nickname_sets[i].iter().any(|t| t == "robert")));
    }
}
