//! Pair-Aware Cleaner (§4.3): sub-passes that look at both names together.

use crate::align::{align, alignment_averaged_score, partial_ratio, ratio};

const SCOTTISH_IRISH_PAIRS: &[(&str, &str)] = &[("mac", "mc"), ("de", "di"), ("del", "dil")];

const UNNECESSARY_PREFIXES: &[&str] = &[
    "d'", "de", "fi", "santa", "san", "de la", "de los", "del", "la", "le", "du", "dela", "los",
    "der", "den", "vanden", "vander", "vande", "van", "von",
];

const IRISH_O_SURNAMES: &[&str] = &[
    "beirne", "berry", "boyle", "bryant", "brian", "brien", "bryan", "ceallaigh", "conner",
    "connor", "conor", "daniel", "day", "dean", "dea", "doherty", "donnell", "donnel",
    "donoghue", "donohue", "donovan", "dowd", "driscoll", "fallon", "farrell", "flaherty",
    "flanagan", "flynn", "gara", "gorman", "grady", "guinn", "guin", "hagan", "haire", "hair",
    "halloran", "hanlon", "hara", "hare", "harra", "harrow", "haver", "hearn", "hern", "herron",
    "higgins", "hora", "kane", "keefe", "keeffe", "kelley", "kelly", "laughlin", "leary",
    "loughlin", "mahoney", "mahony", "maley", "malley", "mara", "mary", "meara", "melia",
    "moore", "more", "muir", "murchu", "mure", "murphy", "neall", "neal", "neill", "neil",
    "ney", "niall", "quinn", "regan", "reilly", "riley", "riordan", "roark", "rorke", "rourke",
    "ryan", "shaughnessy", "shea", "shields", "sullivan", "toole", "tool",
];

/// Runs every pair-aware sub-pass (§4.3) in order and returns the possibly
/// rewritten pair.
pub fn clean_pair(name0: &str, name1: &str) -> (String, String) {
    let mut n0 = name0.to_string();
    let mut n1 = name1.to_string();

    deal_with_dashes(&mut n0, &mut n1);
    fix_scottish_irish_prefixes(&mut n0, &mut n1);
    combine_split_words_fixed_point(&mut n0, &mut n1);
    fix_mc_mac(&mut n0, &mut n1);
    remove_irish_o(&mut n0, &mut n1);
    remove_unnecessary_prefixes(&mut n0, &mut n1);
    combine_prefix_with_surname_if_in_both(&mut n0, &mut n1);
    combine_split_words_fixed_point(&mut n0, &mut n1);

    n0 = n0.split_whitespace().collect::<Vec<_>>().join(" ");
    n1 = n1.split_whitespace().collect::<Vec<_>>().join(" ");
    (n0, n1)
}

fn tokens(name: &str) -> Vec<&str> {
    name.split_whitespace().collect()
}

fn averaged_score(name0: &str, name1: &str) -> f64 {
    let left = tokens(name0);
    let right = tokens(name1);
    let alignment = align(&left, &right);
    alignment_averaged_score(&alignment)
}

fn deal_with_dashes(name0: &mut String, name1: &mut String) {
    let has0 = name0.contains('-');
    let has1 = name1.contains('-');
    if has0 == has1 {
        return;
    }
    let original_score = averaged_score(name0, name1);
    let (dashed, other): (&mut String, &String) = if has0 {
        (name0, &*name1)
    } else {
        (name1, &*name0)
    };
    let candidate = dashed.replace('-', " ");
    let mut candidate_owned = candidate;
    let mut other_owned = other.clone();
    combine_split_words_fixed_point(&mut candidate_owned, &mut other_owned);
    let new_score = averaged_score(&candidate_owned, &other_owned);
    if new_score > original_score {
        *dashed = candidate_owned;
    }
}

fn fix_scottish_irish_prefixes(name0: &mut String, name1: &mut String) {
    for (a, b) in SCOTTISH_IRISH_PAIRS {
        let a_space = format!(" {a}");
        let b_space = format!(" {b}");
        let n0_has_a = name0.contains(&a_space) || name0.starts_with(a.as_ref() as &str);
        let n1_has_a = name1.contains(&a_space) || name1.starts_with(a.as_ref() as &str);
        let n0_has_b = name0.contains(&b_space) || name0.starts_with(b.as_ref() as &str);
        let n1_has_b = name1.contains(&b_space) || name1.starts_with(b.as_ref() as &str);

        if n0_has_b && !n0_has_a && !n1_has_b {
            *name0 = replace_prefix_form(name0, b, a);
        } else if n1_has_b && !n1_has_a && !n0_has_b {
            *name1 = replace_prefix_form(name1, b, a);
        }
    }
}

fn replace_prefix_form(name: &str, from: &str, to: &str) -> String {
    let with_space = name.replacen(&format!(" {from}"), &format!(" {to}"), 1);
    if with_space != *name {
        return with_space;
    }
    if let Some(rest) = name.strip_prefix(from) {
        return format!("{to}{rest}");
    }
    name.to_string()
}

fn fix_mc_mac(name0: &mut String, name1: &mut String) {
    for prefix in ["mc", "mac"] {
        let mut t0: Vec<String> = tokens(name0).into_iter().map(String::from).collect();
        let mut t1: Vec<String> = tokens(name1).into_iter().map(String::from).collect();
        let left = t0.iter().map(String::as_str).collect::<Vec<_>>();
        let right = t1.iter().map(String::as_str).collect::<Vec<_>>();
        let alignment = align(&left, &right);
        for pair in alignment {
            if pair.left == 0 || pair.right == 0 {
                continue; // surname position, skipped
            }
            let w0 = &t0[pair.left];
            let w1 = &t1[pair.right];
            let has0 = w0.starts_with(prefix);
            let has1 = w1.starts_with(prefix);
            if has0 == has1 {
                continue;
            }
            let min_len = w0.len().min(w1.len());
            if min_len < 3 {
                continue;
            }
            if ratio(w0, w1) > 80 {
                continue;
            }
            let (prefixed_idx, prefixed, other) = if has0 {
                (0u8, w0.clone(), w1.clone())
            } else {
                (1u8, w1.clone(), w0.clone())
            };
            let stripped = prefixed.strip_prefix(prefix).unwrap_or(&prefixed).to_string();
            if ratio(&stripped, &other) >= 75 {
                if prefixed_idx == 0 {
                    t0[pair.left] = stripped;
                } else {
                    t1[pair.right] = stripped;
                }
            }
        }
        *name0 = t0.join(" ");
        *name1 = t1.join(" ");
    }
}

fn remove_irish_o(name0: &mut String, name1: &mut String) {
    for name in [&mut *name0, &mut *name1] {
        let toks: Vec<&str> = name.split_whitespace().collect();
        let Some(last) = toks.last() else {
            continue;
        };
        let second_to_last_is_o = toks.len() >= 2 && toks[toks.len() - 2] == "o";
        if !second_to_last_is_o && !last.starts_with('o') {
            continue;
        }
        *name = collapse_irish_o_tokens(name);
    }
}

/// Collapses a trailing `o surname` (two tokens) or `osurname` (one token)
/// into `surname` when the candidate token is a strong match for a known
/// Irish-O surname. Only the last token of the name is a candidate surname:
/// an `o`-prefixed token earlier in the name is left alone.
fn collapse_irish_o_tokens(name: &str) -> String {
    let toks: Vec<&str> = name.split_whitespace().collect();
    let Some(last) = toks.len().checked_sub(1) else {
        return name.to_string();
    };

    if last > 0 && toks[last - 1] == "o" {
        if let Some(surname) = IRISH_O_SURNAMES.iter().find(|s| ratio(toks[last], s) > 75) {
            let mut out: Vec<String> = toks[..last - 1].iter().map(|s| s.to_string()).collect();
            out.push(surname.to_string());
            return out.join(" ");
        }
    }

    if let Some(rest) = toks[last].strip_prefix('o') {
        if rest.len() > 1 {
            if let Some(surname) = IRISH_O_SURNAMES.iter().find(|s| ratio(rest, s) > 75) {
                let mut out: Vec<String> = toks[..last].iter().map(|s| s.to_string()).collect();
                out.push(surname.to_string());
                return out.join(" ");
            }
        }
    }

    name.to_string()
}

fn remove_unnecessary_prefixes(name0: &mut String, name1: &mut String) {
    for prefix in UNNECESSARY_PREFIXES {
        let padded = format!(" {prefix} ");
        let n0_has = name0.contains(&padded);
        let n1_has = name1.contains(&padded);
        if n0_has == n1_has {
            continue;
        }

        let original_score = averaged_score(name0, name1);
        let original_match = spelling_matches(name0, name1);

        let (with_prefix, without): (&mut String, &String) = if n0_has {
            (name0, &*name1)
        } else {
            (name1, &*name0)
        };
        let candidate = with_prefix.replacen(&padded, " ", 1);
        let candidate_score = {
            let (a, b): (&str, &str) = if n0_has {
                (&candidate, without.as_str())
            } else {
                (without.as_str(), &candidate)
            };
            averaged_score(a, b)
        };
        let candidate_match = {
            let (a, b): (&str, &str) = if n0_has {
                (&candidate, without.as_str())
            } else {
                (without.as_str(), &candidate)
            };
            spelling_matches(a, b)
        };

        if candidate_score >= original_score + 10.0 || (candidate_match && !original_match) {
            *with_prefix = candidate;
        }
    }

    // Aligned tokens that differ only by a leading prefix: strip the prefix
    // on the prefixed side when the remainder has length > 2.
    let t0: Vec<String> = tokens(name0).into_iter().map(String::from).collect();
    let t1: Vec<String> = tokens(name1).into_iter().map(String::from).collect();
    let left: Vec<&str> = t0.iter().map(String::as_str).collect();
    let right: Vec<&str> = t1.iter().map(String::as_str).collect();
    let alignment = align(&left, &right);
    let mut t0 = t0;
    let mut t1 = t1;
    for pair in alignment {
        let w0 = t0[pair.left].clone();
        let w1 = t1[pair.right].clone();
        for prefix in UNNECESSARY_PREFIXES {
            if let Some(rest) = w0.strip_prefix(prefix) {
                if rest.len() > 2 && rest == w1 {
                    t0[pair.left] = rest.to_string();
                }
            }
            if let Some(rest) = w1.strip_prefix(prefix) {
                if rest.len() > 2 && rest == w0 {
                    t1[pair.right] = rest.to_string();
                }
            }
        }
    }
    *name0 = t0.join(" ");
    *name1 = t1.join(" ");
}

fn spelling_matches(name0: &str, name1: &str) -> bool {
    let left = tokens(name0);
    let right = tokens(name1);
    let alignment = align(&left, &right);
    let c = alignment.iter().filter(|p| p.score > 80).count();
    c >= 3 || c == left.len().min(right.len())
}

fn combine_prefix_with_surname_if_in_both(name0: &mut String, name1: &mut String) {
    for prefix in ["de", "van"] {
        let padded = format!(" {prefix} ");
        if let (Some(i0), Some(i1)) = (name0.find(&padded), name1.find(&padded)) {
            let after0 = name0[i0 + padded.len()..].chars().next();
            let after1 = name1[i1 + padded.len()..].chars().next();
            if after0.is_some() && after0 == after1 {
                *name0 = format!("{} {prefix}{}", &name0[..i0], &name0[i0 + padded.len()..]);
                *name1 = format!("{} {prefix}{}", &name1[..i1], &name1[i1 + padded.len()..]);
            }
        }
    }
}

fn combine_split_words_fixed_point(name0: &mut String, name1: &mut String) {
    loop {
        let changed_fwd = combine_split_words_once(name0, name1);
        let changed_bwd = combine_split_words_once(name1, name0);
        if !changed_fwd && !changed_bwd {
            break;
        }
    }
}

/// Tries one beneficial compound-word edit on `primary`, using `other` as
/// the alignment partner. Returns whether an edit was made.
fn combine_split_words_once(primary: &mut String, other: &mut String) -> bool {
    let primary_tokens: Vec<String> = tokens(primary).into_iter().map(String::from).collect();
    let other_tokens: Vec<String> = tokens(other).into_iter().map(String::from).collect();
    if primary_tokens.len() < 2 || other_tokens.is_empty() {
        return false;
    }

    let left: Vec<&str> = primary_tokens.iter().map(String::as_str).collect();
    let right: Vec<&str> = other_tokens.iter().map(String::as_str).collect();
    let alignment = align(&left, &right);
    let original_avg = alignment_averaged_score(&alignment);

    for pair in &alignment {
        let token = &primary_tokens[pair.left];
        if token.chars().count() <= 1 {
            continue;
        }
        let partner = &other_tokens[pair.right];
        let base_partial = partial_ratio(token, partner);
        if base_partial < 75 {
            continue;
        }

        for neighbor_idx in [pair.left.checked_sub(1), Some(pair.left + 1)].into_iter().flatten() {
            let Some(neighbor) = primary_tokens.get(neighbor_idx) else {
                continue;
            };
            if neighbor.chars().count() <= 1 {
                continue;
            }
            let neighbor_partial = partial_ratio(neighbor, partner);
            if neighbor_partial < 65 {
                continue;
            }
            let compound = if neighbor_idx < pair.left {
                format!("{neighbor}{token}")
            } else {
                format!("{token}{neighbor}")
            };
            let compound_ratio = ratio(&compound, partner);
            let original_ratio = ratio(token, partner);
            if compound_ratio < original_ratio.saturating_add(20) {
                continue;
            }
            let original_len_diff = (token.len() as i64 - partner.len() as i64).abs();
            let compound_len_diff = (compound.len() as i64 - partner.len() as i64).abs();
            if compound_len_diff > original_len_diff {
                continue;
            }

            let mut candidate_tokens = primary_tokens.clone();
            let (lo, hi) = if neighbor_idx < pair.left {
                (neighbor_idx, pair.left)
            } else {
                (pair.left, neighbor_idx)
            };
            candidate_tokens[lo] = compound.clone();
            candidate_tokens.remove(hi);
            let candidate = candidate_tokens.join(" ");

            let candidate_left: Vec<&str> = candidate_tokens.iter().map(String::as_str).collect();
            let candidate_alignment = align(&candidate_left, &right);
            let candidate_avg = alignment_averaged_score(&candidate_alignment);
            if candidate_avg - original_avg > -1.0 {
                *primary = candidate;
                return true;
            }
        }
    }
    false
}
