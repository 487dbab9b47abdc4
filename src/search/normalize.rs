use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // A hyphen with a letter on both sides, as in "salut-o".
    static ref INNER_HYPHEN: Regex = Regex::new(r"(\w)-+(\w)").expect("valid regex");
}

/// Canonicalise a search term so it can be compared with stored variants.
///
/// Lower-cases, turns the elided noun ending `'` back into `o`, and drops
/// hyphens inside the word while keeping a leading or trailing one, since
/// affixes like `-eg` are stored with theirs.
pub fn normalize_search_term(term: &str) -> String {
    let mut term = term.trim().to_lowercase();

    if let Some(elided) = term.strip_suffix('\'') {
        term = format!("{}o", elided);
    }

    // Repeated so that overlapping matches ("a-b-c") are all removed.
    while INNER_HYPHEN.is_match(&term) {
        term = INNER_HYPHEN.replace_all(&term, "$1$2").into_owned();
    }

    term
}

/// Words in free text, normalised for lookup and with duplicates kept.
pub fn extract_words(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|word| word.chars().any(char::is_alphabetic))
        .map(normalize_search_term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_search_term("  SaLuTo "), "saluto");
        assert_eq!(normalize_search_term("EĤOŜANĜO"), "eĥoŝanĝo");
        assert_eq!(normalize_search_term("salut'"), "saluto");
        assert_eq!(normalize_search_term("salut-o"), "saluto");
        assert_eq!(normalize_search_term("hundo-mal-ferm-il-o"), "hundomalfermilo");
        assert_eq!(normalize_search_term("-eg"), "-eg");
        assert_eq!(normalize_search_term("bo-"), "bo-");
    }

    #[test]
    fn test_extract_words() {
        let words = extract_words("La hundo, 42 fojojn, bojis al la Luno!");
        assert_eq!(
            words,
            vec!["la", "hundo", "fojojn", "bojis", "al", "la", "luno"]
        );
    }
}
