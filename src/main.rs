// src/main.rs
use clap::{Parser, ValueEnum};

use filing_segmenter::config::EngineConfig;
use filing_segmenter::extractors::phrases::{FORWARD_LOOKING_STATEMENTS, VOTE_TALLY};
use filing_segmenter::extractors::SectionOrder;
use filing_segmenter::loader::{self, FilingSource};
use filing_segmenter::storage::StorageManager;
use filing_segmenter::utils::{self, AppError};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Sort markers as strings ("item 10.01" before "item 2.01")
    Lexical,
    /// Sort markers by first occurrence in the filing
    Appearance,
}

impl From<OrderArg> for SectionOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Lexical => SectionOrder::Lexical,
            OrderArg::Appearance => SectionOrder::Appearance,
        }
    }
}

/// Split a regulatory filing into its "item N.NN" sections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path or http(s) URL of the raw filing
    #[arg(short, long)]
    input: String,

    /// Treat the input as HTML (implied by a .htm/.html extension)
    #[arg(long)]
    html: bool,

    /// JSON engine config file
    #[arg(short, long)]
    config: Option<String>,

    /// Header/footer phrase set (overrides config)
    #[arg(long)]
    phrase_set: Option<String>,

    /// Section ordering strategy (overrides config)
    #[arg(long, value_enum)]
    order_by: Option<OrderArg>,

    /// Also extract forward-looking-statement and vote-tally blocks
    #[arg(long)]
    blocks: bool,

    /// Identifier used for the output directory (default: input file name)
    #[arg(long)]
    doc_id: Option<String>,

    /// Output directory for extracted sections
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Print the section map as JSON to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Debug mode - save annotated HTML of the normalized text
    #[arg(short, long)]
    debug: bool,
}

fn engine_config(args: &Args) -> Result<EngineConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(name) = &args.phrase_set {
        config.phrase_set = name.clone();
    }
    if let Some(order) = args.order_by {
        config.order_by = order.into();
    }
    if args.blocks {
        for name in [FORWARD_LOOKING_STATEMENTS, VOTE_TALLY] {
            if !config.boundaries.iter().any(|b| b == name) {
                config.boundaries.push(name.to_string());
            }
        }
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Build the pipeline from config + overrides
    let config = engine_config(&args)?;
    let pipeline = config.build_pipeline()?;
    tracing::debug!(
        "Using phrase set '{}', {} order",
        config.phrase_set,
        config.order_by.as_str()
    );

    // 4. Load the raw filing
    let source = FilingSource::parse(&args.input);
    let is_html = args.html || source.looks_like_html();
    let raw = loader::load(&source, is_html).await?;
    tracing::info!("Loaded filing ({} bytes)", raw.len());

    // 5. Normalize and segment
    let doc_id = args.doc_id.clone().unwrap_or_else(|| source.default_doc_id());
    let filing = pipeline.process(&doc_id, source.as_str(), &raw);

    if filing.sections.is_empty() {
        tracing::warn!("No section markers found in {}", doc_id);
    }

    // 6. Emit results
    if args.stdout {
        println!("{}", serde_json::to_string_pretty(&filing)?);
        return Ok(());
    }

    let storage = StorageManager::new(&args.output_dir)?;
    storage.save_sections(&filing)?;
    storage.save_metadata(&filing)?;

    if args.debug {
        let debug_path = storage.filing_dir(&filing)?.join("normalized_annotated.html");
        if let Err(e) = utils::debug_html::write_debug_html(&pipeline, &filing.normalized, &debug_path) {
            tracing::warn!("Failed to create debug HTML: {}", e);
        }
    }

    tracing::info!("Processing finished. {} sections extracted from {}", filing.sections.len(), doc_id);
    Ok(())
}
