//! Phonetic Encoder (§4.12) and IPA Cleaner (§4.13).

use compact_str::CompactString;
use dashmap::DashMap;

use crate::reference::ReferenceData;

/// IPA consonant symbols (§6), used by both the skeleton-style doubling
/// collapse in [`clean_ipa`] and as breads/meat context in `ipaRules`.
pub const IPA_CONSONANTS: &[char] = &[
    'l', 'd', 'z', 'b', 't', 'k', 'n', 's', 'w', 'v', 'ð', 'ʒ', 'ʧ', 'θ', 'h', 'g', 'ʤ', 'ŋ', 'p',
    'm', 'ʃ', 'f', 'j', 'r',
];

/// Length-1 fallback mapping used when no multi-character syllable key
/// applies (§4.12 step 2).
fn fallback_ipa(c: char) -> Option<&'static str> {
    Some(match c {
        'a' => "æ",
        'b' => "b",
        'c' => "k",
        'd' => "d",
        'e' => "ɛ",
        'f' => "f",
        'g' => "g",
        'h' => "h",
        'i' => "ɪ",
        'j' => "ʤ",
        'k' => "k",
        'l' => "l",
        'm' => "m",
        'n' => "n",
        'o' => "o",
        'p' => "p",
        'q' => "k",
        'r' => "r",
        's' => "s",
        't' => "t",
        'u' => "u",
        'v' => "v",
        'w' => "w",
        'x' => "ks",
        'y' => "j",
        'z' => "z",
        _ => return None,
    })
}

/// Per-token IPA memoization, bounded per §5/§9: cleared wholesale once it
/// exceeds the configured capacity. Eviction policy is unobservable to
/// correctness, only to latency.
pub struct IpaCache {
    entries: DashMap<CompactString, CompactString>,
    capacity: usize,
}

impl IpaCache {
    pub fn new(capacity: usize) -> Self {
        IpaCache { entries: DashMap::new(), capacity }
    }

    fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> CompactString) -> CompactString {
        if let Some(hit) = self.entries.get(key) {
            return hit.clone();
        }
        let value = compute();
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(CompactString::from(key), value.clone());
        value
    }
}

/// Encodes a single whitespace-free token to an IPA-like string.
pub fn encode_token(token: &str, data: &ReferenceData, cache: &IpaCache) -> CompactString {
    cache.get_or_insert_with(token, || encode_token_uncached(token, data))
}

fn encode_token_uncached(token: &str, data: &ReferenceData) -> CompactString {
    if let Some(whole) = data.names_to_ipa.get(token) {
        return whole.clone();
    }

    let word: Vec<char> = token.chars().collect();
    let n = word.len();
    if n == 0 {
        return CompactString::new("");
    }

    let mut consumed = vec![false; n];
    let mut slots: Vec<Option<CompactString>> = vec![None; n];

    loop {
        let mut placed = false;
        'lengths: for len in (1..=n).rev() {
            for start in 0..=(n - len) {
                let end = start + len;
                if consumed[start..end].iter().any(|&c| c) {
                    continue;
                }
                let substring: String = word[start..end].iter().collect();

                let ipa = if len == 1 {
                    match fallback_ipa(word[start]) {
                        Some(ipa) => CompactString::new(ipa),
                        None => continue,
                    }
                } else {
                    match data.syllable_to_ipa.get(substring.as_str()) {
                        Some(ipa) => ipa.clone(),
                        None => continue,
                    }
                };

                if len > 1 && ipa.chars().count() >= 2 * len {
                    continue;
                }

                let splits_th_as_prefix =
                    substring.starts_with('h') && start > 0 && word[start - 1] == 't';
                let splits_th_as_suffix = substring.ends_with('t') && end < n && word[end] == 'h';
                if splits_th_as_prefix || splits_th_as_suffix {
                    continue;
                }

                slots[start] = Some(ipa);
                for c in consumed.iter_mut().take(end).skip(start) {
                    *c = true;
                }
                placed = true;
                break 'lengths;
            }
        }
        if !placed {
            break;
        }
    }

    let mut out = CompactString::new("");
    for slot in slots.into_iter().flatten() {
        out.push_str(&slot);
    }
    out
}

/// Collapses doubled consonants to one, then applies the four fixed
/// substitutions, then drops commas (§4.13).
pub fn clean_ipa(ipa: &str) -> String {
    let mut s = ipa.to_string();
    for &c in IPA_CONSONANTS {
        let doubled: String = std::iter::repeat(c).take(2).collect();
        let single = c.to_string();
        while s.contains(&doubled) {
            s = s.replace(&doubled, &single);
        }
    }

    s = s.replace("ɛɛ", "i");
    s = s.replace("ɪɪ", "ɪ");
    s = s.replace("iɪ", "i");
    s = s.replace("ŋg", "ŋ");
    s.retain(|c| c != ',');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_shortcut_is_used_first() {
        let data = ReferenceData::new().unwrap();
        let cache = IpaCache::new(1000);
        assert_eq!(encode_token("john", &data, &cache), data.names_to_ipa.get("john").unwrap().clone());
    }

    #[test]
    fn fallback_single_chars_cover_unknown_tokens() {
        let data = ReferenceData::new().unwrap();
        let cache = IpaCache::new(1000);
        let ipa = encode_token("zzqx", &data, &cache);
        assert!(!ipa.is_empty());
    }

    #[test]
    fn cache_returns_consistent_results() {
        let data = ReferenceData::new().unwrap();
        let cache = IpaCache::new(1000);
        let first = encode_token("smithson", &data, &cache);
        let second = encode_token("smithson", &data, &cache);
        assert_eq!(first, second);
    }

    #[test]
    fn clean_ipa_collapses_doubled_consonants() {
        assert_eq!(clean_ipa("sɛnnson"), "sɛnson");
    }

    #[test]
    fn clean_ipa_applies_fixed_substitutions() {
        assert_eq!(clean_ipa("ɛɛ"), "i");
        assert_eq!(clean_ipa("ŋg"), "ŋ");
    }

    #[test]
    fn clean_ipa_drops_commas() {
        assert_eq!(clean_ipa("a,b"), "ab");
    }
}
