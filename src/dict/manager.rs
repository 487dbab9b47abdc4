use super::transliterate::{to_h_system, to_x_system};
use super::variants::get_variants;
use crate::morphology::classify::{classify_adjective, classify_noun};
use crate::search::dictionary::Dictionary;
use anyhow::{Context, Result};
use colored::*;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Participle affixes: they build words but have no headword of their own.
const PARTICIPLE_AFFIXES: &[&str] = &["int", "ant", "ont", "unt", "it", "at", "ot"];

/// One headword in a dictionary dump. Definitions and other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DumpEntry {
    #[serde(default)]
    pub root: Option<String>,
    /// Whether word-building results should link this entry's root to it.
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    pub name: String,
    pub source: String,
    pub sha256: String,
    pub words: usize,
    pub morphemes: usize,
    pub variants: usize,
}

/// Morpheme and variant keys, each paired with its headword.
#[derive(Debug, Default)]
pub struct DictionaryContents {
    pub morphemes: Vec<(String, String)>,
    pub variants: Vec<(String, String)>,
}

struct MorphemeTable<'a> {
    seen: HashSet<String>,
    entries: &'a mut Vec<(String, String)>,
}

impl MorphemeTable<'_> {
    /// Add `text` and its other spellings, skipping any already claimed.
    fn add_all_spellings(&mut self, text: &str, headword: &str) {
        for spelling in [text.to_string(), to_h_system(text), to_x_system(text)] {
            if self.seen.insert(spelling.clone()) {
                self.entries.push((spelling, headword.to_string()));
            }
        }
    }
}

/// Work out which morphemes and variants a set of headwords contributes.
///
/// The first headword to claim a morpheme owns it, so `entries` should be
/// in a stable order.
pub fn collect_contents(entries: &BTreeMap<String, DumpEntry>) -> Result<DictionaryContents> {
    let mut contents = DictionaryContents::default();
    let mut morphemes = MorphemeTable {
        seen: HashSet::new(),
        entries: &mut contents.morphemes,
    };

    for (word, entry) in entries {
        for variant in get_variants(word) {
            contents.variants.push((variant, word.clone()));
        }

        // roots of one letter never take part in word building
        if entry.primary {
            if let Some(root) = entry.root.as_deref() {
                if root.chars().count() > 1 && !morphemes.seen.contains(root) {
                    morphemes.add_all_spellings(root, word);
                }
            }
        }

        // nouns and adjectives can also be used whole, e.g. "dormo" in "dormoĉambro"
        let whole_word = classify_noun(word).is_some() || classify_adjective(word).is_some();
        if whole_word && !morphemes.seen.contains(word.as_str()) {
            morphemes.add_all_spellings(word, word);
        }
    }

    for affix in PARTICIPLE_AFFIXES {
        if morphemes.seen.contains(*affix) {
            anyhow::bail!("Participle affix '{}' is already defined by the dictionary", affix);
        }
        morphemes.seen.insert(affix.to_string());
        morphemes.entries.push((affix.to_string(), String::new()));
    }

    Ok(contents)
}

/// Read a JSON dump, gunzipping it if the file name ends in `.gz`.
///
/// Returns the entries and the SHA-256 of the file as stored.
pub fn read_dump(path: &Path) -> Result<(BTreeMap<String, DumpEntry>, String)> {
    let raw = fs::read(path)
        .with_context(|| format!("Failed to read dictionary dump: {}", path.display()))?;
    let sha256 = format!("{:x}", Sha256::digest(&raw));

    let json = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let mut decoded = Vec::new();
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .with_context(|| format!("Failed to decompress: {}", path.display()))?;
        decoded
    } else {
        raw
    };

    let entries = serde_json::from_slice(&json)
        .with_context(|| format!("Failed to parse dictionary dump: {}", path.display()))?;
    Ok((entries, sha256))
}

/// Build the dictionary `name` in `dir` from the dump at `source`.
pub fn build_dictionary(source: &Path, dir: &Path, name: &str) -> Result<DictionaryMetadata> {
    println!(
        "{} dictionary {} from {}...",
        "Building".cyan().bold(),
        name.yellow(),
        source.display().to_string().dimmed()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );

    pb.set_message("Reading dump...");
    let (entries, sha256) = read_dump(source)?;

    pb.set_message(format!("Collecting morphemes and variants of {} words...", entries.len()));
    let contents = collect_contents(&entries)?;
    debug!(
        words = entries.len(),
        morphemes = contents.morphemes.len(),
        variants = contents.variants.len(),
        "collected dictionary contents"
    );

    pb.set_message("Writing dictionary...");
    fs::create_dir_all(dir).context("Failed to create data directory")?;
    let morphemes = Dictionary::build_set(
        contents.morphemes.iter().map(|(k, w)| (k.as_str(), w.as_str())),
        &Dictionary::morphemes_path(dir, name),
    )?;
    let variants = Dictionary::build_set(
        contents.variants.iter().map(|(k, w)| (k.as_str(), w.as_str())),
        &Dictionary::variants_path(dir, name),
    )?;

    let metadata = DictionaryMetadata {
        name: name.to_string(),
        source: source.display().to_string(),
        sha256,
        words: entries.len(),
        morphemes,
        variants,
    };
    let metadata_path = Dictionary::metadata_path(dir, name);
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;
    pb.finish_with_message("Dictionary built");

    println!(
        "{} {} words, {} morphemes, {} variants",
        "✓".green().bold(),
        metadata.words.to_string().yellow(),
        metadata.morphemes.to_string().yellow(),
        metadata.variants.to_string().yellow()
    );

    Ok(metadata)
}

fn read_metadata(dir: &Path, name: &str) -> Result<DictionaryMetadata> {
    let path = Dictionary::metadata_path(dir, name);
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Names of the dictionaries built in `dir`.
pub fn installed_dictionaries(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(name) = file_name.strip_suffix(".meta.json") {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

pub fn list_dictionaries(dir: &Path) -> Result<()> {
    let names = installed_dictionaries(dir)?;

    if names.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to build one from a dictionary dump.",
            "vortaro dict build <dump.json>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();

    for name in &names {
        let size_kb = [
            Dictionary::morphemes_path(dir, name),
            Dictionary::variants_path(dir, name),
        ]
        .iter()
        .filter_map(|path| fs::metadata(path).ok())
        .map(|metadata| metadata.len())
        .sum::<u64>()
            / 1024;

        println!(
            "  {} {} ({})",
            "✓".green(),
            name.cyan().bold(),
            format!("{}KB", size_kb).dimmed()
        );
    }

    println!();
    println!("Data directory: {}", dir.display().to_string().dimmed());

    Ok(())
}

pub fn show_info(dir: &Path, name: &str) -> Result<()> {
    let metadata = match read_metadata(dir, name) {
        Ok(metadata) => metadata,
        Err(_) => {
            println!("{} Dictionary {} not found.", "✗".red().bold(), name.yellow());
            println!(
                "Run {} to build it.",
                format!("vortaro dict build <dump.json> --name {}", name).cyan()
            );
            return Ok(());
        }
    };

    println!("{}", format!("Dictionary: {}", name).bold());
    println!("  Directory: {}", dir.display());
    println!("  Source: {}", metadata.source);
    println!("  SHA-256: {}", metadata.sha256.dimmed());
    println!("  Words: {}", metadata.words);
    println!("  Morphemes: {}", metadata.morphemes);
    println!("  Variants: {}", metadata.variants);
    println!("  Format: FST (Finite State Transducer)");

    match Dictionary::load(dir, name) {
        Ok(dictionary) if dictionary.morpheme_count() == metadata.morphemes
            && dictionary.variant_count() == metadata.variants =>
        {
            println!("  Status: {}", "ok".green());
        }
        Ok(_) => println!("  Status: {}", "counts differ from metadata, rebuild it".yellow()),
        Err(e) => println!("  {}: {}", "Error loading dictionary".red(), e),
    }

    Ok(())
}
