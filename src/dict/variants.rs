use super::transliterate::{to_h_system, to_x_system};
use crate::morphology::classify::{
    classify_adjective, classify_adverb, classify_noun, classify_verb, is_pronoun,
};

const TENSE_ENDINGS: &[&str] = &["is", "as", "os", "us", "u"];
const DECLENSION_ENDINGS: &[&str] = &["j", "n", "jn"];

/// Every legitimate spelling of a headword: each tense or declension it
/// takes, in each of the three writing systems.
///
/// Variants are lower case, so searching them is case-insensitive. The
/// headword itself comes first and the result holds no duplicates.
pub fn get_variants(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    let mut variants = vec![word.clone()];

    if let Some((stem, ending)) = classify_verb(&word) {
        if ending == "i" {
            variants.extend(TENSE_ENDINGS.iter().map(|e| format!("{}{}", stem, e)));
        }
    } else if classify_adjective(&word).is_some() || classify_noun(&word).is_some() {
        variants.extend(DECLENSION_ENDINGS.iter().map(|e| format!("{}{}", word, e)));
    } else if classify_adverb(&word).is_some() || is_pronoun(&word) {
        variants.push(format!("{}n", word));
    }

    let mut spellings = Vec::new();
    for variant in &variants {
        spellings.push(to_x_system(variant));
        spellings.push(to_h_system(variant));
    }
    for spelling in spellings {
        if !variants.contains(&spelling) {
            variants.push(spelling);
        }
    }

    variants
}
