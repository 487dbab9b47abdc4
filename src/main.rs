use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vortaro::cli::output::{self, OutputFormat};
use vortaro::morphology::classify;
use vortaro::search::normalize::{extract_words, normalize_search_term};
use vortaro::search::variations::get_spelling_variations;
use vortaro::{dict, Config, Searcher};

#[derive(Parser, Debug)]
#[command(name = "vortaro")]
#[command(version, about = "Esperanto dictionary lookup and word-building analysis", long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Dictionary to use
    #[arg(short, long, global = true)]
    dictionary: Option<String>,

    /// Directory holding built dictionaries
    #[arg(long, global = true, env = "VORTARO_DICT_DIR")]
    dict_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Look a word up exactly, by spelling mistake, and by word building
    Search {
        term: String,
    },
    /// Split words into morphemes
    Parse {
        #[arg(value_name = "WORDS")]
        words: Vec<String>,

        /// Parse every word of a text file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show the grammatical ending of a word
    Classify {
        word: String,
    },
    /// List the words one edit away
    Variations {
        word: String,

        /// Print at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List the inflected forms a headword is indexed under
    Variants {
        headword: String,
    },
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Build a dictionary from a JSON dump (optionally gzipped)
    Build {
        source: PathBuf,

        /// Name to install it under (defaults to the configured dictionary)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show dictionary info
    Info {
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "vortaro=debug" } else { "vortaro=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "vortaro", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }
    let colored_output = !cli.no_color;

    let Some(command) = cli.command else {
        anyhow::bail!("No command specified. Use --help for usage information.");
    };

    let config = Config::load(cli.dictionary.clone(), cli.dict_dir.clone())?;

    match command {
        Commands::Search { term } => {
            let searcher = Searcher::new(&config)?;
            let result = searcher.search(&term)?;
            output::print_search(&result, colored_output, cli.format)?;
        }
        Commands::Parse { words, file } => {
            let mut words: Vec<String> = words.iter().map(|w| normalize_search_term(w)).collect();
            if let Some(path) = file {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                words.extend(extract_words(&text));
            }
            if words.is_empty() {
                anyhow::bail!("No words to parse. Pass words or --file.");
            }

            let searcher = Searcher::new(&config)?;
            let parsed = searcher.parse_all(&words)?;
            output::print_parses(&parsed, colored_output, cli.format)?;
        }
        Commands::Classify { word } => {
            let word = word.to_lowercase();
            output::print_classification(&word, &classify(&word), colored_output, cli.format)?;
        }
        Commands::Variations { word, limit } => {
            let mut variations = get_spelling_variations(&word.to_lowercase());
            if let Some(limit) = limit {
                variations.truncate(limit);
            }
            output::print_words(&variations, cli.format)?;
        }
        Commands::Variants { headword } => {
            output::print_words(&dict::get_variants(&headword), cli.format)?;
        }
        Commands::Dict { action } => {
            let dir = config.dictionary_dir()?;
            match action {
                DictCommands::List => dict::manager::list_dictionaries(&dir)?,
                DictCommands::Build { source, name } => {
                    let name = name.unwrap_or_else(|| config.dictionary.clone());
                    dict::manager::build_dictionary(&source, &dir, &name)?;
                }
                DictCommands::Info { name } => {
                    let name = name.unwrap_or_else(|| config.dictionary.clone());
                    dict::manager::show_info(&dir, &name)?;
                }
            }
        }
    }

    Ok(())
}
