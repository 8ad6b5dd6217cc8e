mod duration;
mod logging;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::Parser;
use op_analysis::{analyze_frequency, repeated_words, WordFrequencyStats};
use op_core::{Error, LanguageCode, Result};
use op_extract::{ContentExtractor, ExtractionProfile, HtmlDocument};
use op_pipeline::{Pipeline, PipelineConfig, PipelineReport};
use op_translate::{ProviderKind, TranslationCache, TranslatorConfig};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use crate::duration::HumanDuration;
use crate::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "op", author, version, about = "Scrape opinion articles, translate their headlines and count words", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct TranslationArgs {
    /// Source language
    #[arg(long, default_value = "es")]
    from: LanguageCode,
    /// Target language
    #[arg(long, default_value = "en")]
    to: LanguageCode,
    /// Translation provider: rapidapi or echo. Overrides TRANSLATION_PROVIDER.
    #[arg(long)]
    provider: Option<ProviderKind>,
    /// Per-request timeout (e.g. 10s). Overrides TRANSLATION_TIMEOUT_SECS.
    #[arg(long)]
    timeout: Option<HumanDuration>,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// HTML file to read, or `-` for stdin
    input: PathBuf,
    /// Number of candidate articles to examine
    #[arg(short, long, default_value_t = 5)]
    count: usize,
    /// Length of the top-words ranking
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Report words occurring more than this many times
    #[arg(long, default_value_t = DEFAULT_REPEAT_THRESHOLD)]
    repeat_threshold: usize,
    /// Extraction profile: opinion or generic
    #[arg(long, default_value = "opinion")]
    profile: String,
    /// Maximum translations in flight
    #[arg(long, default_value_t = 5)]
    concurrency: usize,
    #[command(flatten)]
    translation: TranslationArgs,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Extract articles from an HTML page, translate titles and analyze them
    Run(RunArgs),
    /// Translate a single text
    Translate {
        text: String,
        #[command(flatten)]
        translation: TranslationArgs,
    },
    /// Word frequency analysis of a text file, or `-` for stdin
    Analyze {
        input: PathBuf,
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long, default_value_t = DEFAULT_REPEAT_THRESHOLD)]
        repeat_threshold: usize,
    },
}

const DEFAULT_REPEAT_THRESHOLD: usize = 2;

impl TranslationArgs {
    fn translator_config(&self) -> TranslatorConfig {
        let mut config = TranslatorConfig::from_env();
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(HumanDuration(timeout)) = self.timeout {
            config.timeout_secs = timeout.as_secs();
        }
        config
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Cancels `token` on the first Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing with the articles processed so far");
            token.cancel();
        }
    });
}

fn print_report(report: &PipelineReport, repeat_threshold: usize) {
    println!("--- ARTICLES IN SPANISH ---");
    for (i, record) in report.records.iter().enumerate() {
        println!("\nArticle {}:", i + 1);
        println!("Title: {}", record.title());
        println!("Content: {}", record.content());
        if !record.article_url().is_empty() {
            println!("Link: {}", record.article_url());
        }
    }

    println!("\n--- IMAGES ---");
    for (i, record) in report.records.iter().enumerate() {
        if record.image_url().is_empty() {
            println!("Article {}: no image", i + 1);
        } else {
            println!("Article {}: {}", i + 1, record.image_url());
        }
    }

    println!("\n--- TRANSLATED HEADERS ---");
    for (i, record) in report.records.iter().enumerate() {
        println!("{}. {}", i + 1, record.display_title());
    }

    print_analysis(&report.stats, &report.top_words, &report.repeated_words, repeat_threshold);

    let cache = &report.cache_stats;
    println!(
        "\nTranslations: {} provider calls, {} cache hits, {} failures",
        cache.provider_calls, cache.hits, cache.failures
    );
    if report.cancelled {
        println!("Run was interrupted; results cover the articles finished before that.");
    }
}

fn print_analysis(
    stats: &WordFrequencyStats,
    top_words: &[op_analysis::WordFrequency],
    repeated: &[op_analysis::WordFrequency],
    repeat_threshold: usize,
) {
    println!("\n--- WORD ANALYSIS ---");
    println!("{}", stats);
    for entry in top_words {
        println!("  {}", entry);
    }
    if repeated.is_empty() {
        println!("{}", no_repeats_message(repeat_threshold));
    } else {
        println!("Repeated words:");
        for entry in repeated {
            println!("  {}", entry);
        }
    }
}

fn no_repeats_message(threshold: usize) -> String {
    let times = match threshold {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{} times", n),
    };
    format!("No words repeated more than {}.", times)
}

async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let profile = ExtractionProfile::by_name(&args.profile).ok_or_else(|| {
        Error::InvalidConfiguration(format!("Unknown extraction profile: {}", args.profile))
    })?;
    let count = args.count;
    let translation = &args.translation;
    let translator_config = translation.translator_config();
    let cache = Arc::new(TranslationCache::from_config(&translator_config)?);
    let config = PipelineConfig {
        count,
        top_n: args.top,
        from: translation.from.clone(),
        to: translation.to.clone(),
        max_concurrent_translations: args.concurrency,
        repeat_threshold: args.repeat_threshold,
    };
    info!(
        profile = profile.name,
        provider = %translator_config.provider,
        count,
        "Starting pipeline"
    );
    let pipeline = Pipeline::new(ContentExtractor::new(profile), cache, config);

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let source = read_input(&args.input)?;
    let records = {
        let document = HtmlDocument::parse(&source);
        pipeline.extract(&document, count, &cancel)?
    };
    let report = pipeline.process(records, &cancel).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, pipeline.config().repeat_threshold);
    }
    Ok(())
}

async fn translate_text(text: &str, translation: &TranslationArgs) -> Result<()> {
    let cache = TranslationCache::from_config(&translation.translator_config())?;
    let translated = cache.translate(text, &translation.from, &translation.to).await;
    println!("{}", translated);
    Ok(())
}

fn analyze_text(input: &Path, top: usize, repeat_threshold: usize) -> Result<()> {
    let text = read_input(input)?;
    let ranked = analyze_frequency(&text);
    let stats = WordFrequencyStats::from_frequencies(&ranked);
    let top_words: Vec<_> = ranked.into_iter().take(top).collect();
    let repeated = repeated_words(&text, repeat_threshold);
    print_analysis(&stats, &top_words, &repeated, repeat_threshold);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run_pipeline(&args).await,
        Commands::Translate { text, translation } => translate_text(&text, &translation).await,
        Commands::Analyze {
            input,
            top,
            repeat_threshold,
        } => analyze_text(&input, top, repeat_threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::parse_from([
            "op", "-vv", "run", "page.html", "--count", "3", "--provider", "echo", "--timeout", "20s", "--to", "fr",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run(RunArgs { input, count, repeat_threshold, translation, json, .. }) => {
                assert_eq!(input, PathBuf::from("page.html"));
                assert_eq!(count, 3);
                assert_eq!(repeat_threshold, DEFAULT_REPEAT_THRESHOLD);
                assert_eq!(translation.provider, Some(ProviderKind::Echo));
                assert_eq!(translation.timeout, Some(HumanDuration(std::time::Duration::from_secs(20))));
                assert_eq!(translation.to, LanguageCode::new("fr"));
                assert_eq!(translation.from, LanguageCode::spanish());
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_repeats_message_follows_threshold() {
        assert_eq!(no_repeats_message(2), "No words repeated more than twice.");
        assert_eq!(no_repeats_message(1), "No words repeated more than once.");
        assert_eq!(no_repeats_message(4), "No words repeated more than 4 times.");

        let cli = Cli::parse_from(["op", "analyze", "-", "--repeat-threshold", "4"]);
        match cli.command {
            Commands::Analyze { repeat_threshold, .. } => assert_eq!(repeat_threshold, 4),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["op", "translate", "hola", "--provider", "bing"]).is_err());
    }
}
