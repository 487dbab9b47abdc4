use super::{lookup, Morpheme, MorphemeOracle, MorphologyError, Parse};
use std::collections::HashMap;

/// Affixes whose presence makes a parse more plausible.
pub const WELL_KNOWN_AFFIXES: &[&str] = &[
    "ig", "il", "ul", "ej", "in", "an", "ar", "ant", "int", "ont", "at", "it", "ot", "al", "em",
];

/// Subtracted from a parse's badness for every well-known affix it uses.
pub const AFFIX_BONUS: f64 = 0.5;

/// Every way to split `text` into consecutive known morphemes.
///
/// Results are in enumeration order: shorter first morphemes first. The
/// empty string has exactly one (empty) segmentation, and a text with no
/// valid partition has none.
pub fn segment<O: MorphemeOracle + ?Sized>(
    text: &str,
    oracle: &O,
) -> Result<Vec<Parse>, MorphologyError> {
    let mut memo = HashMap::new();
    let splits = find_roots(text, 0, oracle, &mut memo)?;
    Ok(splits.into_iter().map(Parse::from_morphemes).collect())
}

/// Segmentations of `text[offset..]`, memoised by offset since the same
/// suffix is reachable through several split paths.
fn find_roots<O: MorphemeOracle + ?Sized>(
    text: &str,
    offset: usize,
    oracle: &O,
    memo: &mut HashMap<usize, Vec<Vec<Morpheme>>>,
) -> Result<Vec<Vec<Morpheme>>, MorphologyError> {
    if offset == text.len() {
        return Ok(vec![Vec::new()]);
    }
    if let Some(known) = memo.get(&offset) {
        return Ok(known.clone());
    }

    let rest = &text[offset..];
    let split_points = rest
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .chain(std::iter::once(rest.len()));

    let mut splits = Vec::new();
    for end in split_points {
        let Some(morpheme) = lookup(oracle, &rest[..end])? else {
            continue;
        };
        for tail in find_roots(text, offset + end, oracle, memo)? {
            let mut split = Vec::with_capacity(tail.len() + 1);
            split.push(morpheme.clone());
            split.extend(tail);
            splits.push(split);
        }
    }

    memo.insert(offset, splits.clone());
    Ok(splits)
}

/// Badness of a parse; lower is better.
///
/// One point per morpheme, less [`AFFIX_BONUS`] for each well-known affix.
/// A trailing grammatical ending is not counted.
pub fn score_parse(parse: &Parse) -> f64 {
    parse
        .morphemes()
        .map(|m| {
            if WELL_KNOWN_AFFIXES.contains(&m.text.as_str()) {
                1.0 - AFFIX_BONUS
            } else {
                1.0
            }
        })
        .sum()
}

/// Sort parses best first. Equal scores keep their enumeration order.
pub fn rank(parses: &mut [Parse]) {
    parses.sort_by(|a, b| score_parse(a).total_cmp(&score_parse(b)));
}
