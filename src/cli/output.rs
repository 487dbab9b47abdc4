use crate::morphology::{Classification, Parse, ParseElement};
use crate::SearchResult;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonParsed<'a> {
    vorto: &'a str,
    vortfarado: &'a [Parse],
}

#[derive(Debug, Serialize)]
struct JsonClassification<'a> {
    vorto: &'a str,
    #[serde(flatten)]
    classification: &'a Classification,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A parse as hyphen-joined parts, headword links shown in brackets.
fn format_parse(parse: &Parse, colored_output: bool) -> String {
    let mut rendered = parse
        .elements()
        .iter()
        .map(|element| match element {
            ParseElement::Morpheme(m) if colored_output => m.text.green().to_string(),
            ParseElement::Ending(ending) if colored_output => ending.dimmed().to_string(),
            other => other.text().to_string(),
        })
        .collect::<Vec<_>>()
        .join("-");

    let links: Vec<&str> = parse.morphemes().filter_map(|m| m.primary_word.as_deref()).collect();
    if !links.is_empty() {
        let links = links.join(", ");
        if colored_output {
            rendered.push_str(&format!("  {}", format!("({})", links).dimmed()));
        } else {
            rendered.push_str(&format!("  ({})", links));
        }
    }
    rendered
}

pub fn print_search(result: &SearchResult, colored_output: bool, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        return print_json(result);
    }

    let heading = |title: &str| {
        if colored_output {
            println!("\n{}", title.bold().underline());
        } else {
            println!("\n{}", title);
        }
    };

    if result.precise.is_empty() && result.imprecise.is_empty() && result.word_building.is_empty() {
        if colored_output {
            println!("{} {}", "✗ No results for".red().bold(), result.term.yellow());
        } else {
            println!("✗ No results for {}", result.term);
        }
        return Ok(());
    }

    if !result.precise.is_empty() {
        heading("Matching words");
        for word in &result.precise {
            println!("  {}", if colored_output { word.green().bold().to_string() } else { word.clone() });
        }
    }

    if !result.imprecise.is_empty() {
        heading("Similar words");
        for word in &result.imprecise {
            println!("  {}", if colored_output { word.cyan().to_string() } else { word.clone() });
        }
    }

    if !result.word_building.is_empty() {
        heading("Word building");
        for parse in &result.word_building {
            println!("  {}", format_parse(parse, colored_output));
        }
    }

    Ok(())
}

pub fn print_parses(
    parsed: &[(String, Vec<Parse>)],
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    if let OutputFormat::Json = format {
        let json: Vec<JsonParsed> = parsed
            .iter()
            .map(|(word, parses)| JsonParsed {
                vorto: word,
                vortfarado: parses,
            })
            .collect();
        return print_json(&json);
    }

    for (word, parses) in parsed {
        let word_display = if colored_output { word.bold().to_string() } else { word.clone() };
        if parses.is_empty() {
            let arrow = if colored_output { "→".dimmed().to_string() } else { "→".to_string() };
            println!("{} {} ?", word_display, arrow);
            continue;
        }
        println!("{}", word_display);
        for parse in parses {
            println!("    {}", format_parse(parse, colored_output));
        }
    }

    Ok(())
}

pub fn print_classification(
    word: &str,
    classification: &Classification,
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    if let OutputFormat::Json = format {
        return print_json(&JsonClassification {
            vorto: word,
            classification,
        });
    }

    match classification.split() {
        Some((stem, ending)) if colored_output => println!(
            "{} {} {}-{}",
            word.bold(),
            classification.name().cyan(),
            stem.green(),
            ending.dimmed()
        ),
        Some((stem, ending)) => println!("{} {} {}-{}", word, classification.name(), stem, ending),
        None if colored_output => println!("{} {}", word.bold(), "no recognised ending".yellow()),
        None => println!("{} no recognised ending", word),
    }

    Ok(())
}

/// A plain list of strings, one per line, or a JSON array.
pub fn print_words(words: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(words),
        OutputFormat::Text => {
            for word in words {
                println!("{}", word);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::Morpheme;

    #[test]
    fn test_format_parse_plain() {
        let parse = Parse::from_morphemes(vec![
            Morpheme::new("per", Some("per")),
            Morpheme::new("son", Some("soni")),
        ])
        .with_ending("e");
        assert_eq!(format_parse(&parse, false), "per-son-e  (per, soni)");

        let parse = Parse::from_morphemes(vec![Morpheme::new("ant", None)]);
        assert_eq!(format_parse(&parse, false), "ant");
    }

    #[test]
    fn test_output_format_parsing() {
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_classification_json() {
        let classification = crate::morphology::classify("hundojn");
        let json = serde_json::to_value(JsonClassification {
            vorto: "hundojn",
            classification: &classification,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "vorto": "hundojn",
                "kind": "declinable_noun",
                "stem": "hund",
                "ending": "ojn",
            })
        );
    }
}
