//! Nickname Substitution (§4.6).

use crate::reference::ReferenceData;

/// For each token in `left` that does not also appear in `right`: if it is a
/// known nickname, try each class it belongs to (in the class's stored
/// order — deterministic, unlike the original's unordered set iteration)
/// and substitute the first other class-member found in `right` that is not
/// already present in `left`. Stops after the first substitution per token.
pub fn substitute_nicknames(left: &[&str], right: &[&str], data: &ReferenceData) -> Vec<String> {
    let mut out: Vec<String> = left.iter().map(|s| s.to_string()).collect();

    for (idx, word) in left.iter().enumerate() {
        if right.contains(word) {
            continue;
        }
        let Some(class_indices) = data.nickname_index.get(*word) else {
            continue;
        };
        'classes: for &class_idx in class_indices {
            let class = &data.nickname_sets[class_idx];
            for member in class {
                if member.as_str() == *word {
                    continue;
                }
                let in_right = right.iter().any(|r| r == member);
                let in_left_already = out.iter().any(|l| l == member.as_str());
                if in_right && !in_left_already {
                    out[idx] = member.to_string();
                    break 'classes;
                }
            }
        }
    }

    out
}
