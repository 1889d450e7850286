//! Name Modifier (§4.10) and its rule engine (§4.11).
//!
//! Applied on a failed attempt-1, before the second spelling-matcher pass,
//! when the worth-continuing gate has not already refused.

use crate::align::{align, alignment_averaged_score, ratio};
use crate::rules::Rule;

/// Runs every step of §4.10 in order and returns the possibly rewritten pair.
pub fn modify_names(name0: &str, name1: &str, rules: &[Rule]) -> (String, String) {
    let mut n0 = name0.to_string();
    let mut n1 = name1.to_string();

    fix_ie_endings(&mut n0);
    fix_ie_endings(&mut n1);
    handle_or(&mut n0, &mut n1);
    fix_vowel_mistakes(&mut n0, &mut n1);
    fix_swapped_chars(&mut n0, &mut n1);
    fix_wrong_first_char(&mut n0, &mut n1);
    apply_rules(&mut n0, &mut n1, rules);

    (n0, n1)
}

fn tokens(name: &str) -> Vec<&str> {
    name.split_whitespace().collect()
}

fn averaged_score(name0: &str, name1: &str) -> f64 {
    let left = tokens(name0);
    let right = tokens(name1);
    alignment_averaged_score(&align(&left, &right))
}

/// Step 1: replace a token-final `ie` with `y` in both names.
fn fix_ie_endings(name: &mut String) {
    let rewritten: Vec<String> = tokens(name)
        .into_iter()
        .map(|tok| {
            if let Some(stem) = tok.strip_suffix("ie") {
                format!("{stem}y")
            } else {
                tok.to_string()
            }
        })
        .collect();
    *name = rewritten.join(" ");
}

/// Step 2: if exactly one name contains `" or "`, try dropping the word
/// before `or` and the word after `or`; keep whichever variant scores higher.
fn handle_or(name0: &mut String, name1: &mut String) {
    let has0 = name0.contains(" or ");
    let has1 = name1.contains(" or ");
    if has0 == has1 {
        return;
    }

    let (with_or, other): (&mut String, &String) = if has0 { (name0, &*name1) } else { (name1, &*name0) };

    let toks: Vec<&str> = tokens(with_or);
    let Some(or_idx) = toks.iter().position(|&t| t == "or") else {
        return;
    };
    if or_idx == 0 || or_idx + 1 >= toks.len() {
        return;
    }

    let drop_before: Vec<&str> = toks
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != or_idx - 1 && i != or_idx)
        .map(|(_, t)| t)
        .collect();
    let drop_after: Vec<&str> = toks
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != or_idx && i != or_idx + 1)
        .map(|(_, t)| t)
        .collect();

    let candidate_before = drop_before.join(" ");
    let candidate_after = drop_after.join(" ");

    let (score_before, score_after) = if has0 {
        (averaged_score(&candidate_before, other), averaged_score(&candidate_after, other))
    } else {
        (averaged_score(other, &candidate_before), averaged_score(other, &candidate_after))
    };

    *with_or = if score_before >= score_after { candidate_before } else { candidate_after };
}

const VOWEL_SWAPS: &[(char, char)] = &[('a', 'o'), ('e', 'a'), ('i', 'y')];

fn is_vowel_swap(a: char, b: char) -> bool {
    VOWEL_SWAPS.iter().any(|&(x, y)| (a, b) == (x, y) || (a, b) == (y, x))
}

/// Step 3: for each aligned pair with equal length >= 5 differing in
/// exactly one position, where the differing chars form `{ao, ea, iy}`,
/// overwrite the left token with the right token.
fn fix_vowel_mistakes(name0: &mut String, name1: &mut String) {
    let t0: Vec<String> = tokens(name0).into_iter().map(String::from).collect();
    let t1: Vec<String> = tokens(name1).into_iter().map(String::from).collect();
    let left: Vec<&str> = t0.iter().map(String::as_str).collect();
    let right: Vec<&str> = t1.iter().map(String::as_str).collect();
    let alignment = align(&left, &right);

    let mut t0 = t0;
    for pair in alignment {
        let l: Vec<char> = t0[pair.left].chars().collect();
        let r: Vec<char> = t1[pair.right].chars().collect();
        if l.len() != r.len() || l.len() < 5 {
            continue;
        }
        let diffs: Vec<usize> = (0..l.len()).filter(|&i| l[i] != r[i]).collect();
        if diffs.len() != 1 {
            continue;
        }
        let i = diffs[0];
        if is_vowel_swap(l[i], r[i]) {
            t0[pair.left] = t1[pair.right].clone();
        }
    }
    *name0 = t0.join(" ");
}

/// Step 4: for each aligned pair of length-5 tokens with ratio exactly 80
/// differing by an adjacent transposition, overwrite left with right.
fn fix_swapped_chars(name0: &mut String, name1: &mut String) {
    let t0: Vec<String> = tokens(name0).into_iter().map(String::from).collect();
    let t1: Vec<String> = tokens(name1).into_iter().map(String::from).collect();
    let left: Vec<&str> = t0.iter().map(String::as_str).collect();
    let right: Vec<&str> = t1.iter().map(String::as_str).collect();
    let alignment = align(&left, &right);

    let mut t0 = t0;
    for pair in alignment {
        let lw = &t0[pair.left];
        let rw = &t1[pair.right];
        if lw.chars().count() != 5 || rw.chars().count() != 5 {
            continue;
        }
        if ratio(lw, rw) != 80 {
            continue;
        }
        let l: Vec<char> = lw.chars().collect();
        let r: Vec<char> = rw.chars().collect();
        let diffs: Vec<usize> = (0..5).filter(|&i| l[i] != r[i]).collect();
        if diffs.len() != 2 {
            continue;
        }
        let (i, j) = (diffs[0], diffs[1]);
        if j == i + 1 && l[i] == r[j] && l[j] == r[i] {
            t0[pair.left] = rw.clone();
        }
    }
    *name0 = t0.join(" ");
}

/// Step 5: for each aligned pair of distinct tokens, both length > 4,
/// differing only at index 0, overwrite left with right. Only ever edits
/// the left side, matching the original's asymmetric behavior.
fn fix_wrong_first_char(name0: &mut String, name1: &mut String) {
    let t0: Vec<String> = tokens(name0).into_iter().map(String::from).collect();
    let t1: Vec<String> = tokens(name1).into_iter().map(String::from).collect();
    let left: Vec<&str> = t0.iter().map(String::as_str).collect();
    let right: Vec<&str> = t1.iter().map(String::as_str).collect();
    let alignment = align(&left, &right);

    let mut t0 = t0;
    for pair in alignment {
        let lw = &t0[pair.left];
        let rw = &t1[pair.right];
        if lw == rw {
            continue;
        }
        let l: Vec<char> = lw.chars().collect();
        let r: Vec<char> = rw.chars().collect();
        if l.len() <= 4 || l.len() != r.len() {
            continue;
        }
        if l[1..] != r[1..] {
            continue;
        }
        t0[pair.left] = rw.clone();
    }
    *name0 = t0.join(" ");
}

/// The rule engine shared by spelling and IPA rewriting
/// (`_replaceSubstringSandwichMeatIfMatchingBread`).
///
/// For each aligned pair of tokens, bracketed with dash sentinels so
/// `bread`/`meat` regions can sit at either edge: for every combination of
/// one bottom bread and one top bread that occurs in both tokens, look for
/// `bread1(meatA|meatB)bread2` in each; if both match, the matched spans
/// differ, and the two matches' start/end offsets differ by at most 2,
/// overwrite the meat region on *both* tokens with `meatB`.
pub fn apply_rules(name0: &mut String, name1: &mut String, rules: &[Rule]) {
    let t0: Vec<String> = tokens(name0).into_iter().map(String::from).collect();
    let t1: Vec<String> = tokens(name1).into_iter().map(String::from).collect();
    let left: Vec<&str> = t0.iter().map(String::as_str).collect();
    let right: Vec<&str> = t1.iter().map(String::as_str).collect();
    let alignment = align(&left, &right);

    let mut t0 = t0;
    let mut t1 = t1;
    for pair in alignment {
        let mut bracketed0 = format!("-{}-", t0[pair.left]);
        let mut bracketed1 = format!("-{}-", t1[pair.right]);
        for rule in rules {
            apply_rule_to_pair(&mut bracketed0, &mut bracketed1, rule);
        }
        t0[pair.left] = bracketed0.trim_matches('-').to_string();
        t1[pair.right] = bracketed1.trim_matches('-').to_string();
    }
    *name0 = t0.join(" ");
    *name1 = t1.join(" ");
}

fn apply_rule_to_pair(a: &mut String, b: &mut String, rule: &Rule) {
    if a.trim_matches('-').chars().count() < rule.min_len as usize
        || b.trim_matches('-').chars().count() < rule.min_len as usize
    {
        return;
    }

    for bottom in &rule.bottom_breads {
        for top in &rule.top_breads {
            let Some((a_start, a_end, a_is_b)) = find_sandwich(a, bottom, top, rule) else {
                continue;
            };
            let Some((b_start, b_end, b_is_b)) = find_sandwich(b, bottom, top, rule) else {
                continue;
            };
            if a_is_b == b_is_b {
                continue;
            }
            if (a_start as i64 - b_start as i64).abs() > 2 || (a_end as i64 - b_end as i64).abs() > 2 {
                continue;
            }

            *a = replace_span(a, a_start, a_end, &rule.meat_b);
            *b = replace_span(b, b_start, b_end, &rule.meat_b);
            return;
        }
    }
}

/// Finds `bottom(meatA|meatB)top` in `s`, returning the byte offsets of the
/// meat span and whether the matched meat was `meatB`.
fn find_sandwich(s: &str, bottom: &str, top: &str, rule: &Rule) -> Option<(usize, usize, bool)> {
    for (meat, is_b) in [(&rule.meat_a, false), (&rule.meat_b, true)] {
        let pattern = format!("{bottom}{meat}{top}");
        if let Some(pos) = s.find(&pattern) {
            let meat_start = pos + bottom.len();
            let meat_end = meat_start + meat.len();
            return Some((meat_start, meat_end, is_b));
        }
    }
    None
}

fn replace_span(s: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(s.len() - (end - start) + replacement.len());
    out.push_str(&s[..start]);
    out.push_str(replacement);
    out.push_str(&s[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    fn rule(meat_a: &str, meat_b: &str, bottom: &[&str], top: &[&str], min_len: u8) -> Rule {
        Rule {
            meat_a: CompactString::from(meat_a),
            meat_b: CompactString::from(meat_b),
            bottom_breads: bottom.iter().map(|s| CompactString::from(*s)).collect(),
            top_breads: top.iter().map(|s| CompactString::from(*s)).collect(),
            min_len,
        }
    }

    #[test]
    fn fix_ie_endings_replaces_final_ie_with_y() {
        let mut n = "bobbie jones".to_string();
        fix_ie_endings(&mut n);
        assert_eq!(n, "bobby jones");
    }

    #[test]
    fn fix_vowel_mistakes_copies_right_token_over_left() {
        let mut n0 = "katherine smith".to_string();
        let mut n1 = "kathorine smith".to_string();
        fix_vowel_mistakes(&mut n0, &mut n1);
        assert_eq!(n0, "kathorine smith");
    }

    #[test]
    fn fix_wrong_first_char_only_edits_left() {
        let mut n0 = "barbara jones".to_string();
        let mut n1 = "carbara jones".to_string();
        fix_wrong_first_char(&mut n0, &mut n1);
        assert_eq!(n0, "carbara jones");
        assert_eq!(n1, "carbara jones");
    }

    #[test]
    fn rule_engine_rewrites_both_sides_to_meat_b() {
        // "ie" -> "y" bracketed by a consonant on both sides.
        let r = rule("ie", "y", &["b"], &["-"], 3);
        let mut a = "-bie-".to_string();
        let mut b = "-by-".to_string();
        apply_rule_to_pair(&mut a, &mut b, &r);
        assert_eq!(a, "-by-");
        assert_eq!(b, "-by-");
    }

    #[test]
    fn rule_engine_skips_short_tokens() {
        let r = rule("ie", "y", &["b"], &["-"], 10);
        let mut a = "-bie-".to_string();
        let mut b = "-by-".to_string();
        apply_rule_to_pair(&mut a, &mut b, &r);
        assert_eq!(a, "-bie-");
        assert_eq!(b, "-by-");
    }
}
