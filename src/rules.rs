use ahash::AHashMap;
use compact_str::CompactString;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ReferenceError;

/// A context-sensitive substring rewrite rule: `(meatA, meatB, bottomBreads,
/// topBreads, minLen)`. See the rule engine in [`crate::modify`].
#[derive(Debug, Clone)]
pub struct Rule {
    pub meat_a: CompactString,
    pub meat_b: CompactString,
    pub bottom_breads: Vec<CompactString>,
    pub top_breads: Vec<CompactString>,
    pub min_len: u8,
}

/// Raw on-disk shape of a rule: a JSON 5-tuple where the bread fields are
/// either a literal list of strings or a single placeholder name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBreads {
    Placeholder(String),
    Literal(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawRule(String, String, RawBreads, RawBreads, u8);

static SPELLING_CONSONANTS: Lazy<Vec<&'static str>> =
    Lazy::new(|| "b c d f g h j k l m n p q r s t v w x y z".split(' ').collect());
static SPELLING_VOWELS: Lazy<Vec<&'static str>> =
    Lazy::new(|| "a e i o u y".split(' ').collect());
static IPA_CONSONANTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    "l d z b t k n s w v ð ʒ ʧ θ h g ʤ ŋ p m ʃ f j r"
        .split(' ')
        .collect()
});
static IPA_VOWELS: Lazy<Vec<&'static str>> =
    Lazy::new(|| "ɑ a æ ɪ i ɛ e ə ɔ ʊ u o".split(' ').collect());
static LETTERS: Lazy<Vec<String>> =
    Lazy::new(|| ('a'..='z').map(|c| c.to_string()).collect());

fn placeholder_list(name: &str, is_ipa: bool) -> Option<Vec<CompactString>> {
    let list: Vec<CompactString> = match name {
        "consonant" if is_ipa => IPA_CONSONANTS.iter().map(|s| CompactString::new(s)).collect(),
        "consonant" => SPELLING_CONSONANTS.iter().map(|s| CompactString::new(s)).collect(),
        "consonant_or_break" if is_ipa => IPA_CONSONANTS
            .iter()
            .map(|s| CompactString::new(s))
            .chain(std::iter::once(CompactString::new("-")))
            .collect(),
        "consonant_or_break" => SPELLING_CONSONANTS
            .iter()
            .map(|s| CompactString::new(s))
            .chain(std::iter::once(CompactString::new("-")))
            .collect(),
        "vowel" if is_ipa => IPA_VOWELS.iter().map(|s| CompactString::new(s)).collect(),
        "vowel" => SPELLING_VOWELS.iter().map(|s| CompactString::new(s)).collect(),
        "letter" if !is_ipa => LETTERS.iter().map(|s| CompactString::new(s)).collect(),
        "letter_or_break" if !is_ipa => LETTERS
            .iter()
            .map(|s| CompactString::new(s))
            .chain(std::iter::once(CompactString::new("-")))
            .collect(),
        _ => return None,
    };
    Some(list)
}

fn resolve_breads(
    raw: RawBreads,
    table: &'static str,
    is_ipa: bool,
) -> Result<Vec<CompactString>, ReferenceError> {
    match raw {
        RawBreads::Literal(items) => Ok(items.into_iter().map(CompactString::from).collect()),
        RawBreads::Placeholder(name) => placeholder_list(&name, is_ipa).ok_or_else(|| {
            ReferenceError::InvalidRule {
                table,
                reason: format!("unrecognized placeholder `{name}`"),
            }
        }),
    }
}

pub fn parse_rules(
    json: &str,
    table: &'static str,
    is_ipa: bool,
) -> Result<Vec<Rule>, ReferenceError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| ReferenceError::ReferenceDataMissing {
            path: table.to_string(),
            source: crate::error::ReferenceDataSource::Json(e),
        })?;

    let raw: Vec<RawRule> = values
        .into_iter()
        .map(|value| {
            if !value.as_array().is_some_and(|a| a.len() == 5) {
                return Err(ReferenceError::InvalidRule {
                    table,
                    reason: "rule is not a 5-element tuple".to_string(),
                });
            }
            serde_json::from_value(value).map_err(|e| ReferenceError::InvalidRule {
                table,
                reason: e.to_string(),
            })
        })
        .collect::<Result<_, _>>()?;

    raw.into_iter()
        .map(|RawRule(meat_a, meat_b, bottom, top, min_len)| {
            Ok(Rule {
                meat_a: CompactString::from(meat_a),
                meat_b: CompactString::from(meat_b),
                bottom_breads: resolve_breads(bottom, table, is_ipa)?,
                top_breads: resolve_breads(top, table, is_ipa)?,
                min_len,
            })
        })
        .collect()
}

pub type NicknameIndex = AHashMap<CompactString, smallvec::SmallVec<[usize; 4]>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_consonant_placeholder() {
        let json = r#"[["ie","y","consonant","consonant_or_break",5]]"#;
        let rules = parse_rules(json, "test", false).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].bottom_breads.iter().any(|b| b == "b"));
        assert!(rules[0].top_breads.iter().any(|b| b == "-"));
    }

    #[test]
    fn rejects_unknown_placeholder() {
        let json = r#"[["ie","y","nonsense","vowel",5]]"#;
        let err = parse_rules(json, "test", false).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidRule { .. }));
    }

    #[test]
    fn ipa_consonants_differ_from_spelling() {
        let json = r#"[["a","b","consonant","consonant",3]]"#;
        let spelling = parse_rules(json, "test", false).unwrap();
        let ipa = parse_rules(json, "test", true).unwrap();
        assert_ne!(spelling[0].bottom_breads, ipa[0].bottom_breads);
    }
}
