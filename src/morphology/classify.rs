//! Recognition of Esperanto grammatical endings.
//!
//! Each classifier splits a word into `(stem, ending)` when it ends in one of
//! the endings it knows about, unless the word is listed as a known false
//! positive for that ending (prepositions, particles, exclamations, names).

use super::table_words;
use serde::Serialize;

/// Infinitive and the five finite verb forms.
const VERB_ENDINGS: &[&str] = &["i", "is", "as", "os", "us", "u"];
const ADJECTIVE_ENDINGS: &[&str] = &["a", "aj", "an", "ajn"];
/// Only valid after one of the table-word stems in `table_words::ADJECTIVE_STEMS`.
const TABLE_ADJECTIVE_ENDINGS: &[&str] = &["u", "uj", "un", "ujn"];
const NOUN_ENDINGS: &[&str] = &["o", "oj", "on", "ojn"];
const ADVERB_ENDINGS: &[&str] = &["e", "en"];

// Words ending -i that are not infinitives.
const NOT_INFINITIVE: &[&str] = &[
    // pronouns
    "mi", "vi", "li", "ŝi", "ĝi", "oni", "ili", "si", "ci", "ni",
    // adverb
    "ĉi",
    // exclamations
    "ahi", "fi",
    // abbreviation, same as ĥio
    "ĥi",
    // affix
    "-ologi",
    // comparative particle
    "pli",
];
const NOT_PAST: &[&str] = &[];
const NOT_PRESENT: &[&str] = &[];
const NOT_FUTURE: &[&str] = &[];
const NOT_CONDITIONAL: &[&str] = &["ĵus", "plus", "minus"];
// Table words are also excluded, see `is_table_word`.
const NOT_IMPERATIVE: &[&str] = &[
    // numerals
    "unu", "du",
    // particles
    "ju", "plu",
    // exclamations
    "hu", "fu",
];

const NOT_ADJECTIVE: &[&str] = &[
    // onomatopoeia, strictly "ta ta ta"
    "ta",
    // exclamations
    "hura", "pa", "aha", "ba", "ha",
    // article and particles
    "tra", "la", "ja",
];
const NOT_ADJECTIVE_PLURAL: &[&str] = &["kaj", "aj", "ajaj"];
const NOT_ADJECTIVE_ACCUSATIVE: &[&str] = &["Pan", "Johan", "Ivan"];
const NOT_ADJECTIVE_PLURAL_ACCUSATIVE: &[&str] = &["ajn"];

const NOT_NOUN: &[&str] = &[
    // exclamation
    "ho",
    // affix placeholders, which arguably end in a hyphen
    "-o", "bo-", "geo-",
    // conjunction
    "do",
    // preposition
    "po",
    // adverb
    "tro",
];
const NOT_NOUN_PLURAL: &[&str] = &[];
const NOT_NOUN_ACCUSATIVE: &[&str] = &["Simon"];
const NOT_NOUN_PLURAL_ACCUSATIVE: &[&str] = &[];

const NOT_ADVERB: &[&str] = &[
    // prepositions
    "de", "je", "ĉe",
    // exclamations
    "he", "ve", "ehe",
    // conjunction
    "ke",
    // particle
    "ne",
    "tre",
    // name
    "Kabe",
    // affix
    "tele-",
];
const NOT_ADVERB_ACCUSATIVE: &[&str] = &["en", "sen"];

const PRONOUNS: &[&str] = &["mi", "vi", "li", "ŝi", "ĝi", "oni", "ili", "si", "ci", "ni"];

/// The grammatical category a word was recognised as, with its split.
///
/// `stem + ending` always reproduces the classified word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Infinitive { stem: String, ending: String },
    DeclinableAdjective { stem: String, ending: String },
    DeclinableNoun { stem: String, ending: String },
    DeclinableAdverb { stem: String, ending: String },
    Pronoun { stem: String, ending: String },
    None,
}

impl Classification {
    /// The `(stem, ending)` split, if the word was recognised at all.
    pub fn split(&self) -> Option<(&str, &str)> {
        match self {
            Classification::Infinitive { stem, ending }
            | Classification::DeclinableAdjective { stem, ending }
            | Classification::DeclinableNoun { stem, ending }
            | Classification::DeclinableAdverb { stem, ending }
            | Classification::Pronoun { stem, ending } => Some((stem, ending)),
            Classification::None => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Classification::Infinitive { .. } => "verb",
            Classification::DeclinableAdjective { .. } => "adjective",
            Classification::DeclinableNoun { .. } => "noun",
            Classification::DeclinableAdverb { .. } => "adverb",
            Classification::Pronoun { .. } => "pronoun",
            Classification::None => "none",
        }
    }
}

/// Classify a word, trying verb, adjective, noun, adverb and finally pronoun.
pub fn classify(word: &str) -> Classification {
    if let Some((stem, ending)) = classify_verb(word) {
        return Classification::Infinitive { stem, ending };
    }
    if let Some((stem, ending)) = classify_adjective(word) {
        return Classification::DeclinableAdjective { stem, ending };
    }
    if let Some((stem, ending)) = classify_noun(word) {
        return Classification::DeclinableNoun { stem, ending };
    }
    if let Some((stem, ending)) = classify_adverb(word) {
        return Classification::DeclinableAdverb { stem, ending };
    }
    if is_pronoun(word) {
        return Classification::Pronoun {
            stem: word.to_string(),
            ending: String::new(),
        };
    }
    if let Some(stem) = word.strip_suffix('n') {
        if is_pronoun(stem) {
            return Classification::Pronoun {
                stem: stem.to_string(),
                ending: "n".to_string(),
            };
        }
    }
    Classification::None
}

pub fn classify_verb(word: &str) -> Option<(String, String)> {
    let exceptions = |ending: &str| -> &'static [&'static str] {
        match ending {
            "i" => NOT_INFINITIVE,
            "is" => NOT_PAST,
            "as" => NOT_PRESENT,
            "os" => NOT_FUTURE,
            "us" => NOT_CONDITIONAL,
            _ => NOT_IMPERATIVE,
        }
    };

    for &ending in VERB_ENDINGS {
        if let Some(split) = split_ending(word, ending) {
            if exceptions(ending).contains(&word) {
                return None;
            }
            if ending == "u" && table_words::is_table_word(word) {
                return None;
            }
            return Some(split);
        }
    }
    None
}

pub fn classify_adjective(word: &str) -> Option<(String, String)> {
    for &ending in TABLE_ADJECTIVE_ENDINGS {
        if let Some((stem, ending)) = split_ending(word, ending) {
            if table_words::is_adjective_stem(&stem) {
                return Some((stem, ending));
            }
        }
    }

    let exceptions = |ending: &str| -> &'static [&'static str] {
        match ending {
            "a" => NOT_ADJECTIVE,
            "aj" => NOT_ADJECTIVE_PLURAL,
            "an" => NOT_ADJECTIVE_ACCUSATIVE,
            _ => NOT_ADJECTIVE_PLURAL_ACCUSATIVE,
        }
    };
    first_unexcepted_split(word, ADJECTIVE_ENDINGS, exceptions)
}

pub fn classify_noun(word: &str) -> Option<(String, String)> {
    let exceptions = |ending: &str| -> &'static [&'static str] {
        match ending {
            "o" => NOT_NOUN,
            "oj" => NOT_NOUN_PLURAL,
            "on" => NOT_NOUN_ACCUSATIVE,
            _ => NOT_NOUN_PLURAL_ACCUSATIVE,
        }
    };
    first_unexcepted_split(word, NOUN_ENDINGS, exceptions)
}

pub fn classify_adverb(word: &str) -> Option<(String, String)> {
    let exceptions = |ending: &str| -> &'static [&'static str] {
        match ending {
            "e" => NOT_ADVERB,
            _ => NOT_ADVERB_ACCUSATIVE,
        }
    };
    first_unexcepted_split(word, ADVERB_ENDINGS, exceptions)
}

pub fn is_pronoun(word: &str) -> bool {
    PRONOUNS.contains(&word)
}

/// No ending in a class is a suffix of another, so at most one of them can
/// match; an excepted word is rejected for the whole class.
fn first_unexcepted_split(
    word: &str,
    endings: &[&str],
    exceptions: impl Fn(&str) -> &'static [&'static str],
) -> Option<(String, String)> {
    for &ending in endings {
        if let Some(split) = split_ending(word, ending) {
            if exceptions(ending).contains(&word) {
                return None;
            }
            return Some(split);
        }
    }
    None
}

/// Split off `ending`, requiring a non-empty stem.
fn split_ending(word: &str, ending: &str) -> Option<(String, String)> {
    match word.strip_suffix(ending) {
        Some(stem) if !stem.is_empty() => Some((stem.to_string(), ending.to_string())),
        _ => None,
    }
}
