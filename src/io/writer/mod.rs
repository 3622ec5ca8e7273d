/*!
# Corpus writing

Corpora are written as annotated xml documents by an [Emitter].

Files are never written in place: documents go to a temporary file next to the destination,
which replaces the destination once the whole document has been written.
A failed emission leaves any previous file untouched.
!*/
mod emitter;
mod progress;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

pub use emitter::{emit, emit_batch, emit_with, EmitReport, Emitter};
pub use progress::{Progress, PROGRESS_INTERVAL};

use crate::corpus::Corpus;
use crate::error::Error;
use crate::speechacts::Matcher;

/// Runs `f` on a buffered temporary file, then moves it to `dst`.
pub(crate) fn atomic_write<F, T>(dst: &Path, f: F) -> Result<T, Error>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T, Error>,
{
    let dir = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    let ret = {
        let mut w = BufWriter::new(tmp.as_file_mut());
        let ret = f(&mut w)?;
        w.flush()?;
        ret
    };
    tmp.persist(dst)?;
    Ok(ret)
}

/// Writes `corpus` to `dst`.
pub fn write_corpus_file(
    dst: &Path,
    corpus: &Corpus,
    matcher: Option<&Matcher>,
) -> Result<EmitReport, Error> {
    info!("Writing document {:?}", dst);
    let report = atomic_write(dst, |w| emit_with(corpus, matcher, w))?;
    info!("XML file has been written to {:?}", dst);
    Ok(report)
}

/// Writes `corpora` as a single document to `dst`.
pub fn write_bodies_file(
    dst: &Path,
    corpora: &[Corpus],
    matcher: Option<&Matcher>,
) -> Result<EmitReport, Error> {
    info!("Writing document {:?} ({} corpora)", dst, corpora.len());
    let report = atomic_write(dst, |w| emit_batch(corpora, matcher, w))?;
    info!("XML file has been written to {:?}", dst);
    Ok(report)
}
