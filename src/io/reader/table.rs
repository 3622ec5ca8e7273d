//! Tabular input.
//!
//! Tables are exported from spreadsheets as CSV (or TSV) files with a header row.
//! The column named `text` holds the content, every other column becomes a text attribute.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::Local;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use crate::corpus::{Corpus, Text};
use crate::error::Error;

lazy_static! {
    static ref MULTIPLE_SPACES: Regex = Regex::new(r"[ ]{2,}").unwrap();
}

const TEXT_COLUMN: &str = "text";

/// Column delimiter, guessed from the file extension (`.tsv` is tab-separated).
fn delimiter(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Reads a table file into a [Corpus] named after the file.
pub fn read_corpus(path: &Path) -> Result<Corpus, Error> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!("Reading document {:?}", path);
    let f = File::open(path)?;
    let corpus = read_from(name, f, delimiter(path))?;
    info!("Finished reading {:?} ({} texts)", path, corpus.len());
    Ok(corpus)
}

/// Reads a table from `rdr`.
///
/// Adds `created` and `author` corpus attributes.
pub fn read_from<R: Read>(name: String, rdr: R, delimiter: u8) -> Result<Corpus, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().replace(' ', ""))
        .collect();
    for h in &headers {
        debug!("Found attribute {}.", h);
    }

    let text_column = headers
        .iter()
        .position(|h| h.to_lowercase() == TEXT_COLUMN)
        .ok_or_else(|| Error::Custom(format!("{}: no text column", name)))?;
    debug!("Found text cell @ column {}.", text_column);

    let mut corpus = Corpus::new(name);
    corpus.attributes_mut().insert("created", Local::now());
    corpus.attributes_mut().insert("author", author());

    for record in rdr.records() {
        let record = record?;
        let mut text = Text::new();

        for (idx, cell) in record.iter().enumerate() {
            if idx == text_column {
                if !cell.is_empty() {
                    text.set_content(MULTIPLE_SPACES.replace_all(cell, " "));
                }
                continue;
            }

            if cell.is_empty() {
                continue;
            }

            match headers.get(idx) {
                Some(header) if !header.is_empty() => {
                    if let Err(e) = text.set_attribute(header.as_str(), cell) {
                        warn!("{}: line {}: {}", corpus.name(), position(&record), e);
                    }
                }
                _ => debug!(
                    "{}: line {}: ignoring cell {} without header",
                    corpus.name(),
                    position(&record),
                    idx
                ),
            }
        }

        corpus.push(text);
    }

    Ok(corpus)
}

fn position(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
