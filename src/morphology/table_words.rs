//! The correlative "table words" (kio, tiu, ĉie, nenia, ...).
//!
//! These decline irregularly, so they are never decomposed into morphemes:
//! the whole word is looked up, and any accusative or plural ending is
//! attached as a literal ending element.

use crate::dict::transliterate::{to_h_system, to_x_system};
use lazy_static::lazy_static;
use std::collections::HashSet;

const PREFIXES: &[&str] = &["ki", "ti", "i", "ĉi", "neni"];
const SUFFIXES: &[&str] = &["o", "u", "e", "a"];

/// Suffixes that decline like adjectives and so also take -j and -jn.
const ADJECTIVE_SUFFIXES: &[&str] = &["u", "a"];

lazy_static! {
    static ref TABLE_WORDS: HashSet<String> = PREFIXES
        .iter()
        .flat_map(|prefix| SUFFIXES.iter().map(move |suffix| format!("{}{}", prefix, suffix)))
        .flat_map(all_spellings)
        .collect();
    static ref ADJECTIVE_STEMS: HashSet<String> =
        PREFIXES.iter().flat_map(|prefix| all_spellings(prefix.to_string())).collect();
}

fn all_spellings(word: String) -> Vec<String> {
    let mut spellings = vec![to_h_system(&word), to_x_system(&word)];
    spellings.push(word);
    spellings.dedup();
    spellings
}

/// A bare table word in any writing system.
pub fn is_table_word(word: &str) -> bool {
    TABLE_WORDS.contains(word)
}

/// The stems (ki, ti, i, ĉi, neni) that take -u/-uj/-un/-ujn like an adjective.
pub fn is_adjective_stem(stem: &str) -> bool {
    ADJECTIVE_STEMS.contains(stem)
}

/// Split an inflected table word into the bare table word and its ending.
///
/// Returns `Some((word, ""))` for a bare table word, `-n` for any accusative
/// (kion, tien) and `-j`/`-jn` for the adjectival ones (kiuj, tiajn), so
/// plurals are split here too rather than by the adjective classifier.
pub fn split_table_word(word: &str) -> Option<(&str, &str)> {
    if is_table_word(word) {
        return Some((word, ""));
    }

    for ending in ["jn", "j", "n"] {
        let Some(base) = word.strip_suffix(ending) else {
            continue;
        };
        if !is_table_word(base) {
            continue;
        }
        if ending == "n" || ADJECTIVE_SUFFIXES.iter().any(|suffix| base.ends_with(suffix)) {
            return Some((base, ending));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_words_in_all_writing_systems() {
        assert!(is_table_word("kio"));
        assert!(is_table_word("ĉiu"));
        assert!(is_table_word("cxiu"));
        assert!(is_table_word("chiu"));
        assert!(is_table_word("nenie"));
        assert!(!is_table_word("kiel"));
        assert!(!is_table_word("hundo"));
    }

    #[test]
    fn test_split_table_word() {
        assert_eq!(split_table_word("kiu"), Some(("kiu", "")));
        assert_eq!(split_table_word("kiun"), Some(("kiu", "n")));
        assert_eq!(split_table_word("tien"), Some(("tie", "n")));
        assert_eq!(split_table_word("kiujn"), Some(("kiu", "jn")));
        assert_eq!(split_table_word("ĉiaj"), Some(("ĉia", "j")));
        // -j only follows the adjectival forms
        assert_eq!(split_table_word("kioj"), None);
        assert_eq!(split_table_word("kielo"), None);
    }

    #[test]
    fn test_adjective_stems() {
        assert!(is_adjective_stem("ki"));
        assert!(is_adjective_stem("cxi"));
        assert!(!is_adjective_stem("hund"));
    }
}
