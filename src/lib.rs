pub mod cli;
pub mod config;
pub mod dict;
pub mod morphology;
pub mod search;

pub use config::Config;
pub use morphology::{parse_morphology, Morpheme, MorphemeOracle, MorphologyError, Parse};
pub use search::Searcher;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    #[serde(rename = "serĉo")]
    pub term: String,
    /// Headwords with a variant spelled exactly like the term.
    #[serde(rename = "preciza")]
    pub precise: Vec<String>,
    /// Headwords one spelling mistake away.
    #[serde(rename = "malpreciza")]
    pub imprecise: Vec<String>,
    #[serde(rename = "vortfarado")]
    pub word_building: Vec<Parse>,
}
