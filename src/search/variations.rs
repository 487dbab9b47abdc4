/// The Esperanto alphabet: 28 letters, no q, w, x or y.
pub const ALPHABET: [char; 28] = [
    'a', 'b', 'c', 'ĉ', 'd', 'e', 'f', 'g', 'ĝ', 'h', 'ĥ', 'i', 'j', 'ĵ', 'k', 'l', 'm', 'n', 'o',
    'p', 'r', 's', 'ŝ', 't', 'u', 'ŭ', 'v', 'z',
];

/// Every string one edit away from `word`, for fuzzy lookup.
///
/// Covers adjacent transpositions, deletions, insertions and replacements
/// over [`ALPHABET`], plus the word with a leading or trailing hyphen since
/// affixes are stored that way. Expects a lower-case word. Duplicates are
/// not removed.
///
/// The output grows as `57n + 29`, so callers passing it to a bulk lookup
/// with a parameter limit must cap it themselves.
pub fn get_spelling_variations(word: &str) -> Vec<String> {
    let letters: Vec<char> = word.chars().collect();
    let n = letters.len();
    let mut variations: Vec<String> = Vec::with_capacity(57 * n + 29);

    // Transpositions
    for i in 0..n.saturating_sub(1) {
        let mut new_word = letters.clone();
        new_word.swap(i, i + 1);
        variations.push(new_word.iter().collect());
    }

    // Deletions
    for i in 0..n {
        let mut new_word = letters.clone();
        new_word.remove(i);
        variations.push(new_word.iter().collect());
    }

    // Insertions
    for &letter in &ALPHABET {
        for i in 0..=n {
            let mut new_word = letters.clone();
            new_word.insert(i, letter);
            variations.push(new_word.iter().collect());
        }
    }

    variations.push(format!("{}-", word));
    variations.push(format!("-{}", word));

    // Replacements, never recreating the word itself
    for (i, &current) in letters.iter().enumerate() {
        for &letter in ALPHABET.iter().filter(|&&letter| letter != current) {
            let mut new_word = letters.clone();
            new_word[i] = letter;
            variations.push(new_word.iter().collect());
        }
    }

    variations
}
