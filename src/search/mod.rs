pub mod dictionary;
pub mod normalize;
pub mod variations;

use crate::morphology::{parse_morphology, MorphologyError, Parse};
use crate::{Config, SearchResult};
use anyhow::Result;
use dashmap::DashMap;
use dictionary::Dictionary;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub struct Searcher {
    dictionary: Dictionary,
    max_parses: usize,
    max_variations: usize,
    max_word_length: usize,
    parse_cache: DashMap<String, Vec<Parse>>,
}

impl Searcher {
    pub fn new(config: &Config) -> Result<Self> {
        let dictionary = Dictionary::load(&config.dictionary_dir()?, &config.dictionary)?;
        Ok(Self::with_dictionary(dictionary, config))
    }

    pub fn with_dictionary(dictionary: Dictionary, config: &Config) -> Self {
        Self {
            dictionary,
            max_parses: config.max_parses,
            max_variations: config.max_variations,
            max_word_length: config.max_word_length,
            parse_cache: DashMap::new(),
        }
    }

    /// Look a term up exactly, by spelling variation, and by word building.
    pub fn search(&self, term: &str) -> Result<SearchResult> {
        let term = normalize::normalize_search_term(term);

        let precise: BTreeSet<String> = self.dictionary.words_for_variant(&term).into_iter().collect();

        let mut candidates = variations::get_spelling_variations(&term);
        if candidates.len() > self.max_variations {
            // The generator is unbounded; the lookup budget is ours to enforce.
            warn!(
                term = term.as_str(),
                generated = candidates.len(),
                kept = self.max_variations,
                "truncating spelling variations"
            );
            candidates.truncate(self.max_variations);
        }
        let imprecise: BTreeSet<String> = candidates
            .iter()
            .flat_map(|candidate| self.dictionary.words_for_variant(candidate))
            .filter(|word| !precise.contains(word))
            .collect();

        let word_building = self.parse(&term)?;

        debug!(
            term = term.as_str(),
            precise = precise.len(),
            imprecise = imprecise.len(),
            parses = word_building.len(),
            "search finished"
        );

        Ok(SearchResult {
            term,
            precise: precise.into_iter().collect(),
            imprecise: imprecise.into_iter().collect(),
            word_building,
        })
    }

    /// Word-building analysis of one word, cached across calls.
    pub fn parse(&self, word: &str) -> Result<Vec<Parse>, MorphologyError> {
        if word.is_empty() || word.chars().count() > self.max_word_length {
            debug!(word = word, "empty or too long to segment");
            return Ok(Vec::new());
        }
        if let Some(cached) = self.parse_cache.get(word) {
            return Ok(cached.value().clone());
        }

        let mut parses = parse_morphology(word, &self.dictionary)?;
        parses.truncate(self.max_parses);
        self.parse_cache.insert(word.to_string(), parses.clone());
        Ok(parses)
    }

    /// Parse many words in parallel, keeping input order.
    pub fn parse_all(&self, words: &[String]) -> Result<Vec<(String, Vec<Parse>)>, MorphologyError> {
        words
            .par_iter()
            .map(|word| self.parse(word).map(|parses| (word.clone(), parses)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn searcher(config: &Config) -> (TempDir, Searcher) {
        let dir = tempdir().unwrap();
        Dictionary::build_set(
            [
                ("per", "per"),
                ("son", "soni"),
                ("soni", "soni"),
                ("persono", "persono"),
                ("person", "persono"),
            ],
            &Dictionary::morphemes_path(dir.path(), "test"),
        )
        .unwrap();
        Dictionary::build_set(
            [
                ("hundo", "hundo"),
                ("hundoj", "hundo"),
                ("sati", "sati"),
                ("savi", "savi"),
                ("bati", "bati"),
                ("ŝati", "ŝati"),
                ("saluto", "saluto"),
                ("-eg", "-eg"),
            ],
            &Dictionary::variants_path(dir.path(), "test"),
        )
        .unwrap();
        let dictionary = Dictionary::load(dir.path(), "test").unwrap();
        (dir, Searcher::with_dictionary(dictionary, config))
    }

    #[test]
    fn test_precise_search() {
        let (_dir, searcher) = searcher(&Config::default());
        assert_eq!(searcher.search("HUNDOJ").unwrap().precise, vec!["hundo"]);
        assert_eq!(searcher.search("salut'").unwrap().precise, vec!["saluto"]);
        assert_eq!(searcher.search("salut-o").unwrap().precise, vec!["saluto"]);
        assert_eq!(searcher.search("-eg").unwrap().precise, vec!["-eg"]);
    }

    #[test]
    fn test_imprecise_search() {
        let (_dir, searcher) = searcher(&Config::default());
        assert_eq!(searcher.search("zundo").unwrap().imprecise, vec!["hundo"]);

        let result = searcher.search("sati").unwrap();
        assert_eq!(result.precise, vec!["sati"]);
        assert_eq!(result.imprecise, vec!["bati", "savi", "ŝati"]);
    }

    #[test]
    fn test_word_building() {
        let (_dir, searcher) = searcher(&Config::default());
        let result = searcher.search("persone").unwrap();
        let parses: Vec<String> = result.word_building.iter().map(|p| p.to_string()).collect();
        assert_eq!(parses, vec!["person-e", "per-son-e"]);
    }

    #[test]
    fn test_limits() {
        let config = Config {
            max_parses: 1,
            max_variations: 10,
            max_word_length: 7,
            ..Default::default()
        };
        let (_dir, searcher) = searcher(&config);

        assert_eq!(searcher.parse("personoj").unwrap(), Vec::new());
        assert_eq!(searcher.parse("persone").unwrap().len(), 1);
        // none of the first ten variations of "zundo" is "hundo"
        assert!(searcher.search("zundo").unwrap().imprecise.is_empty());
    }

    #[test]
    fn test_parse_all_keeps_order() {
        let (_dir, searcher) = searcher(&Config::default());
        let words = vec!["persone".to_string(), "xyz".to_string(), "per".to_string()];
        let parsed = searcher.parse_all(&words).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].0, "persone");
        assert_eq!(parsed[0].1.len(), 2);
        assert!(parsed[1].1.is_empty());
        assert_eq!(parsed[2].1[0].to_string(), "per");
    }
}
