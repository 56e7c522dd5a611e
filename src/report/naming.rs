//! Suite and class name derivation

use inflector::cases::camelcase::to_camel_case;
use std::collections::VecDeque;

use crate::models::LocatedItem;

/// Default separator between ancestor names
pub const SEPARATOR: &str = " / ";

/// Join the names of every enclosing group, outermost first.
///
/// The item itself and the collection root are not part of the result, so a
/// top-level item resolves to an empty string. Unnamed groups contribute their
/// id. Returns `None` for an empty item.
pub fn parent_name(item: &LocatedItem<'_>, separator: Option<&str>) -> Option<String> {
    if item.item.is_empty() {
        return None;
    }

    // Parents are visited leaf to root
    let mut chain = VecDeque::with_capacity(item.depth());
    item.for_each_parent(|parent| chain.push_front(parent.label()));

    Some(Vec::from(chain).join(separator.unwrap_or(SEPARATOR)))
}

/// Class name for test cases: camel-cased collection name without non-word
/// characters, first letter capitalized.
///
/// Acronyms count as their own word, so `HTTPBin` becomes `HttpBin`.
pub fn class_name(collection_name: &str) -> String {
    let spaced = words(collection_name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let stripped: String = to_camel_case(&spaced)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    upper_first(&stripped)
}

/// Split on non-alphanumerics, lower-to-upper transitions and the end of an
/// uppercase run followed by a lowercase letter.
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = c.is_uppercase()
                && (prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_lower));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
