pub mod classify;
pub mod segment;
pub mod table_words;

pub use classify::{classify, Classification};
pub use segment::{rank, score_parse, segment};

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of ranked parses `parse_morphology` keeps.
pub const MAX_PARSES: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MorphologyError {
    /// The morpheme table holds more than one entry for the same text.
    #[error("morpheme table is corrupt: {matches} entries match {text:?}")]
    AmbiguousMorpheme { text: String, matches: usize },
}

/// A known word-building unit, optionally linked to the headword it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Morpheme {
    pub text: String,
    /// Absent for the participle affixes (-ant, -it, ...) which have no entry.
    pub primary_word: Option<String>,
}

impl Morpheme {
    pub fn new(text: impl Into<String>, primary_word: Option<&str>) -> Self {
        Self {
            text: text.into(),
            primary_word: primary_word.map(str::to_string),
        }
    }
}

/// Read-only source of known morphemes.
///
/// Implementations report every stored morpheme whose text equals `text`;
/// more than one is a broken table and is rejected by the segmenter.
pub trait MorphemeOracle {
    fn find_matching(&self, text: &str) -> Vec<Morpheme>;
}

impl MorphemeOracle for [Morpheme] {
    fn find_matching(&self, text: &str) -> Vec<Morpheme> {
        self.iter().filter(|m| m.text == text).cloned().collect()
    }
}

impl MorphemeOracle for Vec<Morpheme> {
    fn find_matching(&self, text: &str) -> Vec<Morpheme> {
        self.as_slice().find_matching(text)
    }
}

/// Look up the single morpheme spelled `text`.
pub fn lookup<O: MorphemeOracle + ?Sized>(
    oracle: &O,
    text: &str,
) -> Result<Option<Morpheme>, MorphologyError> {
    let mut matches = oracle.find_matching(text);
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => Err(MorphologyError::AmbiguousMorpheme {
            text: text.to_string(),
            matches: n,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseElement {
    Morpheme(Morpheme),
    Ending(String),
}

impl ParseElement {
    pub fn text(&self) -> &str {
        match self {
            ParseElement::Morpheme(m) => &m.text,
            ParseElement::Ending(ending) => ending,
        }
    }

    pub fn primary_word(&self) -> Option<&str> {
        match self {
            ParseElement::Morpheme(m) => m.primary_word.as_deref(),
            ParseElement::Ending(_) => None,
        }
    }
}

/// Serialized as `{"vorto": <headword or null>, "parto": <text>}`.
impl Serialize for ParseElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Part<'a> {
            vorto: Option<&'a str>,
            parto: &'a str,
        }

        Part {
            vorto: self.primary_word(),
            parto: self.text(),
        }
        .serialize(serializer)
    }
}

/// One decomposition of a word, left to right, with at most one trailing ending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parse {
    elements: Vec<ParseElement>,
}

impl Parse {
    pub fn from_morphemes(morphemes: Vec<Morpheme>) -> Self {
        Self {
            elements: morphemes.into_iter().map(ParseElement::Morpheme).collect(),
        }
    }

    pub fn elements(&self) -> &[ParseElement] {
        &self.elements
    }

    pub fn morphemes(&self) -> impl Iterator<Item = &Morpheme> {
        self.elements.iter().filter_map(|element| match element {
            ParseElement::Morpheme(m) => Some(m),
            ParseElement::Ending(_) => None,
        })
    }

    pub fn ending(&self) -> Option<&str> {
        match self.elements.last() {
            Some(ParseElement::Ending(ending)) => Some(ending),
            _ => None,
        }
    }

    /// Attach a grammatical ending. An empty ending is ignored.
    pub fn with_ending(mut self, ending: &str) -> Self {
        debug_assert!(self.ending().is_none());
        if !ending.is_empty() {
            self.elements.push(ParseElement::Ending(ending.to_string()));
        }
        self
    }

    /// The concatenated surface text, which equals the parsed word.
    pub fn text(&self) -> String {
        self.elements.iter().map(ParseElement::text).collect()
    }
}

/// Elements joined by hyphens, e.g. `per-son-e`.
impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.elements.iter().map(ParseElement::text).collect();
        write!(f, "{}", parts.join("-"))
    }
}

impl Serialize for Parse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Rendered<'a> {
            rezulto: String,
            partoj: &'a [ParseElement],
        }

        Rendered {
            rezulto: self.to_string(),
            partoj: &self.elements,
        }
        .serialize(serializer)
    }
}

/// Split a word into its most plausible morpheme sequences.
///
/// Table words are looked up whole. Otherwise a recognised grammatical
/// ending is stripped, the stem segmented, and the ending re-attached to
/// every result. At most [`MAX_PARSES`] results are returned, best first.
pub fn parse_morphology<O: MorphemeOracle + ?Sized>(
    word: &str,
    oracle: &O,
) -> Result<Vec<Parse>, MorphologyError> {
    if let Some((base, ending)) = table_words::split_table_word(word) {
        match lookup(oracle, base)? {
            Some(morpheme) => {
                return Ok(vec![Parse::from_morphemes(vec![morpheme]).with_ending(ending)]);
            }
            None => warn!(word = base, "table word missing from the morpheme table"),
        }
    }

    let classification = classify(word);
    let mut parses: Vec<Parse> = match classification.split() {
        Some((stem, ending)) => segment(stem, oracle)?
            .into_iter()
            .map(|parse| parse.with_ending(ending))
            .collect(),
        None => segment(word, oracle)?,
    };
    debug!(
        word = word,
        class = classification.name(),
        candidates = parses.len(),
        "segmented"
    );

    rank(&mut parses);
    parses.truncate(MAX_PARSES);
    Ok(parses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle(entries: &[(&str, Option<&str>)]) -> Vec<Morpheme> {
        entries
            .iter()
            .map(|(text, primary)| Morpheme::new(*text, *primary))
            .collect()
    }

    fn rendered(parses: &[Parse]) -> Vec<String> {
        parses.iter().map(|p| p.to_string()).collect()
    }

    fn persone_oracle() -> Vec<Morpheme> {
        oracle(&[
            ("per", Some("per")),
            ("son", Some("soni")),
            ("soni", Some("soni")),
            ("persono", Some("persono")),
            ("person", Some("persono")),
        ])
    }

    fn dictionary_oracle() -> Vec<Morpheme> {
        oracle(&[
            ("ho", Some("ho")),
            ("hom", Some("homo")),
            ("homa", Some("homa")),
            ("mar", Some("maro")),
            ("ar", Some("-ar")),
            ("an", Some("-an")),
            ("ran", Some("rano")),
            ("hun", Some("huno")),
            ("hund", Some("hundo")),
            ("hundo", Some("hundo")),
            ("do", Some("do")),
            ("dom", Some("domo")),
            ("mal", Some("mal-")),
            ("al", Some("al")),
            ("alf", Some("alfo")),
            ("er", Some("-er")),
            ("fer", Some("fero")),
            ("ferm", Some("fermi")),
            ("mil", Some("mil")),
            ("il", Some("-il")),
            ("ripoz", Some("ripozi")),
            ("ej", Some("-ej")),
            ("ri", Some("ri")),
            ("poz", Some("pozi")),
        ])
    }

    #[test]
    fn test_persone_end_to_end() {
        let parses = parse_morphology("persone", &persone_oracle()).unwrap();
        assert_eq!(rendered(&parses), vec!["person-e", "per-son-e"]);

        let first = &parses[0];
        assert_eq!(first.elements()[0].primary_word(), Some("persono"));
        assert_eq!(first.ending(), Some("e"));
        let second = &parses[1];
        assert_eq!(second.elements()[1].primary_word(), Some("soni"));
    }

    #[test]
    fn test_homarano_prefers_affixes() {
        let parses = parse_morphology("homarano", &dictionary_oracle()).unwrap();
        assert_eq!(rendered(&parses), vec!["hom-ar-an-o", "homa-ran-o"]);
    }

    #[test]
    fn test_hundomalfermilo_top_parse() {
        let parses = parse_morphology("hundomalfermilo", &dictionary_oracle()).unwrap();
        assert_eq!(parses[0].to_string(), "hundo-mal-ferm-il-o");
        assert!(parses.len() <= MAX_PARSES);
    }

    #[test]
    fn test_ripozejo() {
        let parses = parse_morphology("ripozejo", &dictionary_oracle()).unwrap();
        assert_eq!(parses[0].to_string(), "ripoz-ej-o");
    }

    /// Roots and affixes for the ranking corpus, plus shorter or overlapping
    /// morphemes that offer a wrong split for most of its words.
    fn corpus_oracle() -> Vec<Morpheme> {
        let roots = [
            "al", "tabl", "ig", "manĝ", "il", "ar", "re", "nov", "neni", "pint", "sen", "labor",
            "ul", "ĉirkaŭ", "rigard", "ek", "silent", "inter", "miks", "iĝ", "mem", "kompren",
            "ebl", "gast", "em", "mal", "rapid", "koket", "in", "bov", "ej", "et", "kiel", "vi",
            "fart", "serĉ", "ant", "lern", "int", "vid", "ĉifr", "it", "at", "ot", "erar",
        ];
        let distractors = [
            "dal", "gas", "tig", "alt", "abl", "ne", "ni", "pin", "ki", "el", "ter", "la", "bor",
            "kom", "pren", "er", "ser", "ĉant", "kok", "ĉif", "rit",
        ];
        roots
            .iter()
            .chain(distractors.iter())
            .map(|text| Morpheme::new(*text, Some(*text)))
            .collect()
    }

    #[test]
    fn test_ranking_corpus() {
        let cases = [
            ("altabligi", "al-tabl-ig-i"),
            ("manĝilaro", "manĝ-il-ar-o"),
            ("renovigi", "re-nov-ig-i"),
            ("neniigi", "neni-ig-i"),
            ("pintigi", "pint-ig-i"),
            ("senlaborulo", "sen-labor-ul-o"),
            ("ĉirkaŭrigardi", "ĉirkaŭ-rigard-i"),
            ("eksilentigi", "ek-silent-ig-i"),
            ("intermiksiĝi", "inter-miks-iĝ-i"),
            ("memkompreneble", "mem-kompren-ebl-e"),
            ("gastigema", "gast-ig-em-a"),
            ("malrapidigi", "mal-rapid-ig-i"),
            ("koketulino", "koket-ul-in-o"),
            ("bovinejeto", "bov-in-ej-et-o"),
            ("kielvifartulo", "kiel-vi-fart-ul-o"),
            ("serĉantigis", "serĉ-ant-ig-is"),
            ("lernintulo", "lern-int-ul-o"),
            // not vi-dal-vid-a
            ("vidalvida", "vid-al-vid-a"),
            ("ĉifrita", "ĉifr-it-a"),
            ("ĉifrata", "ĉifr-at-a"),
            ("ĉifrota", "ĉifr-ot-a"),
            ("eraremulo", "erar-em-ul-o"),
        ];

        let oracle = corpus_oracle();
        for (word, expected) in cases {
            let parses = parse_morphology(word, &oracle).unwrap();
            assert_eq!(
                parses.first().map(|p| p.to_string()).as_deref(),
                Some(expected),
                "best parse of {}",
                word
            );
            assert!(parses.len() <= MAX_PARSES);
        }
    }

    #[test]
    fn test_numeral_is_not_an_imperative() {
        let parses = parse_morphology("unu", &oracle(&[("unu", Some("unu"))])).unwrap();
        assert_eq!(rendered(&parses), vec!["unu"]);
    }

    #[test]
    fn test_parses_reconstruct_the_word() {
        let oracle = dictionary_oracle();
        for word in ["homarano", "hundomalfermilo", "ripozejo", "hundo"] {
            for parse in parse_morphology(word, &oracle).unwrap() {
                assert_eq!(parse.text(), word);
            }
        }
    }

    #[test]
    fn test_unclassified_word_is_segmented_whole() {
        let parses = parse_morphology("per", &persone_oracle()).unwrap();
        assert_eq!(rendered(&parses), vec!["per"]);
        assert_eq!(parses[0].ending(), None);
    }

    #[test]
    fn test_unknown_word_has_no_parses() {
        let parses = parse_morphology("ksyzo", &persone_oracle()).unwrap();
        assert!(parses.is_empty());
    }

    #[test]
    fn test_table_words_are_not_decomposed() {
        let oracle = oracle(&[("kiu", Some("kiu")), ("ki", None), ("u", None)]);

        let parses = parse_morphology("kiu", &oracle).unwrap();
        assert_eq!(rendered(&parses), vec!["kiu"]);

        let parses = parse_morphology("kiun", &oracle).unwrap();
        assert_eq!(rendered(&parses), vec!["kiu-n"]);
        assert_eq!(parses[0].ending(), Some("n"));

        let parses = parse_morphology("kiujn", &oracle).unwrap();
        assert_eq!(rendered(&parses), vec!["kiu-jn"]);
    }

    #[test]
    fn test_ambiguous_oracle_is_an_error() {
        let oracle = oracle(&[("per", Some("per")), ("per", Some("pero"))]);
        let err = parse_morphology("pere", &oracle).unwrap_err();
        assert_eq!(
            err,
            MorphologyError::AmbiguousMorpheme {
                text: "per".to_string(),
                matches: 2,
            }
        );
    }

    #[test]
    fn test_parse_json_shape() {
        let parses = parse_morphology("persone", &persone_oracle()).unwrap();
        let json = serde_json::to_value(&parses[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rezulto": "person-e",
                "partoj": [
                    {"vorto": "persono", "parto": "person"},
                    {"vorto": null, "parto": "e"},
                ]
            })
        );
    }
}
