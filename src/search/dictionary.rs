use crate::morphology::{Morpheme, MorphemeOracle};
use anyhow::{Context, Result};
use fst::{IntoStreamer, Set, SetBuilder, Streamer};
use memmap2::Mmap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Separates a key from the headword it belongs to in the stored sets.
const SEPARATOR: char = '\0';

/// A built dictionary: morphemes and word variants, each keyed to a headword.
///
/// Both are `fst` sets of `"<key>\0<headword>"` strings, so all the headwords
/// for a key are found with one prefix search. Participle affixes are stored
/// with an empty headword.
pub struct Dictionary {
    morphemes: Set<Mmap>,
    variants: Set<Mmap>,
}

impl Dictionary {
    /// Load the dictionary called `name` from `dir`.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let morphemes = Self::map_set(&Self::morphemes_path(dir, name))?;
        let variants = Self::map_set(&Self::variants_path(dir, name))?;
        debug!(
            name = name,
            morphemes = morphemes.len(),
            variants = variants.len(),
            "loaded dictionary"
        );
        Ok(Self {
            morphemes,
            variants,
        })
    }

    fn map_set(path: &Path) -> Result<Set<Mmap>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        // SAFETY: dictionary files are written once by `dict build` and only read afterwards.
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map dictionary: {}", path.display()))?;
        Set::new(mmap).with_context(|| format!("Failed to parse dictionary: {}", path.display()))
    }

    pub fn morphemes_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.morphemes.fst", name))
    }

    pub fn variants_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.variants.fst", name))
    }

    pub fn metadata_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.meta.json", name))
    }

    /// Headwords that have `variant` as one of their spellings.
    pub fn words_for_variant(&self, variant: &str) -> Vec<String> {
        headwords_with_key(&self.variants, variant)
    }

    pub fn morpheme_count(&self) -> usize {
        self.morphemes.len()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Write `(key, headword)` pairs as a set file at `path`.
    pub fn build_set<'a, I>(pairs: I, path: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut keys: Vec<String> = pairs
            .into_iter()
            .map(|(key, headword)| format!("{}{}{}", key, SEPARATOR, headword))
            .collect();
        keys.sort();
        keys.dedup();

        let file = File::create(path)
            .with_context(|| format!("Failed to create dictionary: {}", path.display()))?;
        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for key in &keys {
            builder
                .insert(key.as_bytes())
                .context("Failed to insert key into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(keys.len())
    }
}

impl MorphemeOracle for Dictionary {
    fn find_matching(&self, text: &str) -> Vec<Morpheme> {
        headwords_with_key(&self.morphemes, text)
            .into_iter()
            .map(|headword| {
                let primary_word = (!headword.is_empty()).then_some(headword.as_str());
                Morpheme::new(text, primary_word)
            })
            .collect()
    }
}

fn headwords_with_key(set: &Set<Mmap>, key: &str) -> Vec<String> {
    let prefix = format!("{}{}", key, SEPARATOR);
    let mut results = Vec::new();
    let mut stream = set
        .range()
        .ge(prefix.as_bytes())
        .lt(upper_bound(&prefix))
        .into_stream();

    while let Some(entry) = stream.next() {
        match std::str::from_utf8(entry) {
            Ok(entry) => results.push(entry[prefix.len()..].to_string()),
            Err(e) => warn!(key = key, error = %e, "skipping dictionary entry that is not UTF-8"),
        }
    }

    results
}

/// Smallest byte string greater than every string starting with `prefix`,
/// which ends in the separator byte and so can simply be incremented.
fn upper_bound(prefix: &str) -> Vec<u8> {
    let mut bound = prefix.as_bytes().to_vec();
    if let Some(last) = bound.last_mut() {
        *last += 1;
    }
    bound
}
