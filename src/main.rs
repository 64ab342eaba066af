//! Batch runner: reads an event batch, vectorizes it, writes the enriched batch.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tempfile::NamedTempFile;
use tracing::info;

use event_vectorizer::document::{read_events, write_events};
use event_vectorizer::{EventVectorizer, PipelineConfig};

#[derive(Debug, Parser)]
#[command(name = "event-vectorizer")]
#[command(about = "TF-IDF vectors and cosine similarity for a batch of event documents")]
struct Args {
    /// Event batch JSON (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Where to write the enriched batch (`-` for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop stems whose corpus-wide count is at or below this
    #[arg(long)]
    frequency_floor: Option<u64>,

    /// Drop stems found in fewer documents than this
    #[arg(long)]
    min_doc_freq: Option<u64>,

    /// Drop stems found in more than floor(F * N) documents
    #[arg(long)]
    max_doc_freq_fraction: Option<f64>,

    /// Keep at most N stems, highest document frequency first
    #[arg(long, conflicts_with = "no_keep_n")]
    keep_n: Option<usize>,

    /// Do not cap the vocabulary size
    #[arg(long)]
    no_keep_n: bool,

    /// Attach a cosine similarity row to every event
    #[arg(long, conflicts_with = "no_similarity")]
    similarity: bool,

    /// Skip the similarity stage even if the config file enables it
    #[arg(long)]
    no_similarity: bool,

    /// Write the vocabulary as `id<TAB>stem<TAB>df` lines
    #[arg(long)]
    dictionary_out: Option<PathBuf>,

    /// Write a CBOR snapshot of the vocabulary and IDF table
    #[arg(long)]
    model_out: Option<PathBuf>,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(floor) = self.frequency_floor {
            config.frequency_floor = floor;
        }
        if let Some(min) = self.min_doc_freq {
            config.min_doc_freq = min;
        }
        if let Some(fraction) = self.max_doc_freq_fraction {
            config.max_doc_freq_fraction = fraction;
        }
        if self.no_keep_n {
            config.keep_n = None;
        } else if let Some(keep_n) = self.keep_n {
            config.keep_n = Some(keep_n);
        }
        if self.similarity {
            config.enable_similarity = true;
        } else if self.no_similarity {
            config.enable_similarity = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = args.pipeline_config()?;
    let vectorizer = EventVectorizer::with_config(config)?;

    let mut documents = if is_stdio(&args.input) {
        read_events(io::stdin().lock()).context("failed to read event batch from stdin")?
    } else {
        let file = fs::File::open(&args.input)
            .with_context(|| format!("failed to open {}", args.input.display()))?;
        read_events(io::BufReader::new(file))
            .with_context(|| format!("failed to read event batch from {}", args.input.display()))?
    };
    info!(events = documents.len(), "event batch loaded");

    let vectorized = vectorizer.process(&mut documents);

    // render every output before writing any of them
    let mut events_json = Vec::new();
    write_events(&mut events_json, &documents).context("failed to encode output batch")?;
    events_json.push(b'\n');

    let dictionary = match &args.dictionary_out {
        Some(path) => {
            let mut buf = Vec::new();
            vectorized
                .vocabulary
                .write_dictionary(&mut buf)
                .context("failed to render dictionary")?;
            Some((path, buf))
        }
        None => None,
    };

    let model = match &args.model_out {
        Some(path) => {
            let mut buf = Vec::new();
            vectorized.model().write_cbor(&mut buf).context("failed to encode model snapshot")?;
            Some((path, buf))
        }
        None => None,
    };

    // stage every file output next to its target; nothing becomes visible until all are staged
    let mut staged = Vec::new();
    if !is_stdio(&args.output) {
        staged.push(stage_file(&args.output, &events_json)?);
    }
    for (path, bytes) in dictionary.into_iter().chain(model) {
        staged.push(stage_file(path, &bytes)?);
    }
    for (path, file) in staged {
        file.persist(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if is_stdio(&args.output) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&events_json).context("failed to write output to stdout")?;
        stdout.flush().context("failed to write output to stdout")?;
    }

    info!(
        events = documents.len(),
        vocabulary = vectorized.vocabulary.len(),
        "batch written"
    );
    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn stage_file<'a>(path: &'a Path, bytes: &[u8]) -> Result<(&'a Path, NamedTempFile)> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok((path, file))
}
