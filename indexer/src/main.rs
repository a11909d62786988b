use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lexindex::{Bm25Params, DocId, IndexBuilder, InvertedIndex, StopwordFilter};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const PROGRESS_EVERY: usize = 100;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a BM25 inverted index over a directory of text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every file in a directory
    Build {
        /// Corpus directory
        #[arg(long)]
        input: PathBuf,
        /// Descend into subdirectories
        #[arg(long, default_value_t = false)]
        recursive: bool,
        /// Stopword list, one word per line ('#' starts a comment)
        #[arg(long)]
        stopwords: Option<PathBuf>,
        /// Term frequency saturation
        #[arg(long, default_value_t = lexindex::scoring::DEFAULT_K1)]
        k1: f64,
        /// Length normalization strength
        #[arg(long, default_value_t = lexindex::scoring::DEFAULT_B)]
        b: f64,
        /// Print the whole index as JSON to stdout
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Print the postings of a term (repeatable)
        #[arg(long = "term")]
        terms: Vec<String>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, recursive, stopwords, k1, b, json, terms } => {
            let stopwords = match stopwords {
                Some(path) => load_stopwords(&path)?,
                None => StopwordFilter::default(),
            };
            let params = Bm25Params::new(k1, b)?;
            let index = build_index(&input, recursive, stopwords, params)?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &index)?;
                writeln!(out)?;
            }
            for term in &terms {
                let report = term_report(&index, term);
                serde_json::to_writer(&mut out, &report)?;
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn load_stopwords(path: &Path) -> Result<StopwordFilter> {
    let text = fs::read_to_string(path).with_context(|| format!("reading stopword list {}", path.display()))?;
    let words = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));
    let filter = StopwordFilter::from_words(words);
    tracing::info!(path = %path.display(), words = filter.len(), "loaded stopwords");
    Ok(filter)
}

/// Regular files under `input`, sorted by name so document ids are stable across runs.
fn collect_files(input: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        bail!("input {} is not a directory", input.display());
    }
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(max_depth).sort_by_file_name() {
        match entry {
            Ok(e) if e.file_type().is_file() => files.push(e.into_path()),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "skipping unreadable entry"),
        }
    }
    Ok(files)
}

fn build_index(input: &Path, recursive: bool, stopwords: StopwordFilter, params: Bm25Params) -> Result<InvertedIndex> {
    let files = collect_files(input, recursive)?;
    tracing::info!(input = %input.display(), files = files.len(), "discovered corpus");

    let mut builder = IndexBuilder::new(stopwords, params);
    let mut processed = 0usize;
    for path in files {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping document");
                continue;
            }
        };
        // Invalid UTF-8 turns into U+FFFD, which normalization drops anyway.
        let text = String::from_utf8_lossy(&bytes);
        let name = path.strip_prefix(input).unwrap_or(&path).display().to_string();
        builder.add_document(name, &text);

        processed += 1;
        if processed % PROGRESS_EVERY == 0 {
            tracing::info!(processed, "processed files");
        }
    }

    let index = builder.build().with_context(|| format!("indexing {}", input.display()))?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.num_terms(),
        avgdl = index.stats().average_document_length(),
        "index build complete"
    );
    Ok(index)
}

#[derive(Debug, Serialize)]
struct TermReport<'a> {
    query: &'a str,
    term: String,
    document_frequency: u32,
    postings: Vec<PostingReport<'a>>,
}

#[derive(Debug, Serialize)]
struct PostingReport<'a> {
    doc_id: DocId,
    name: &'a str,
    score: f32,
}

fn term_report<'a>(index: &'a InvertedIndex, query: &'a str) -> TermReport<'a> {
    let term = lexindex::tokenizer::normalize(query);
    let postings = index
        .postings(&term)
        .unwrap_or_default()
        .iter()
        .map(|p| PostingReport {
            doc_id: p.doc_id,
            name: index.document(p.doc_id).map(|d| d.name.as_str()).unwrap_or(""),
            score: p.score,
        })
        .collect();
    let document_frequency = index.stats().document_frequency(&term).unwrap_or(0);
    TermReport { query, term, document_frequency, postings }
}
