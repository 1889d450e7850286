//! Single-Name Cleaner (§4.2): a pure function from raw string to
//! canonicalized string, applied to each name independently.

use once_cell::sync::Lazy;
use regex::Regex;

const WHOLE_WORD_HONORIFICS: &[&str] = &["jr", "sr", "prof", "mr", "mrs", "ms", "dr", "student", "rev"];
const SUBSTRING_HONORIFICS: &[&str] = &[
    "junior",
    "senior",
    "professor",
    "mister",
    "missus",
    "miss",
    "doctor",
    "reverend",
    "no suffix",
    "head of household",
];
const WHOLE_WORD_RELATIONS: &[&str] = &["sister", "brother", "mother", "father"];
const ROMAN_SUFFIXES: &[&str] = &["ii", "iii", "iv"];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static APOSTROPHE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'\s+").unwrap());
static IN_LAW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bin law\b").unwrap());
static THE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+the\s+").unwrap());

fn word_boundary_regexes(words: &[&str]) -> Vec<Regex> {
    words
        .iter()
        .map(|w| Regex::new(&format!(r"\b{}\b", regex::escape(w))).unwrap())
        .collect()
}

static HONORIFIC_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| word_boundary_regexes(WHOLE_WORD_HONORIFICS));
static RELATION_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| word_boundary_regexes(WHOLE_WORD_RELATIONS));
static ROMAN_SUFFIX_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| word_boundary_regexes(ROMAN_SUFFIXES));

/// Cleans a single name string per §4.2's 14-step sequence.
pub fn clean_name(raw: &str) -> String {
    if raw.is_empty() {
        return "_".to_string();
    }

    let mut s = WHITESPACE_RUN.replace_all(raw, " ").trim().to_string();

    s = deunicode::deunicode(&s).to_lowercase();

    if s.trim().is_empty() {
        return "_".to_string();
    }

    s.retain(|c| !matches!(c, '.' | ',' | '?' | ';' | '"' | '*' | '(' | ')'));

    s = APOSTROPHE_SPACE.replace_all(&s, "'").to_string();

    for re in HONORIFIC_REGEXES.iter() {
        s = re.replace_all(&s, "").to_string();
    }
    for term in SUBSTRING_HONORIFICS {
        s = s.replace(term, "");
    }
    for re in RELATION_REGEXES.iter() {
        s = re.replace_all(&s, "").to_string();
    }

    s = IN_LAW.replace_all(&s, " ").to_string();

    s = THE.replace_all(&s, " ").to_string();
    s = s.replace(" the ", " ");

    for re in ROMAN_SUFFIX_REGEXES.iter() {
        s = re.replace_all(&s, "").to_string();
    }

    s = s.replace("van de ", "vande ");
    s = s.replace("van den ", "vanden ");
    s = s.replace("van der ", "vander ");

    WHITESPACE_RUN.replace_all(s.trim(), " ").trim().to_string()
}

/// Splits a cleaned name into tokens (maximal non-space runs).
pub fn tokenize(cleaned: &str) -> Vec<&str> {
    cleaned.split(' ').filter(|t| !t.is_empty()).collect()
}
