//! Precompiled speech-act cache.
//!
//! The whole catalog is saved as a single JSON document.
//! An existing cache is trusted: it is never compared with the definition files it was built from.
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::SpeechAct;
use crate::error::Error;

/// Bumped when the cached representation changes.
const CACHE_VERSION: u32 = 1;

#[derive(Deserialize)]
struct CacheFile {
    version: u32,
    acts: Vec<SpeechAct>,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    version: u32,
    acts: &'a [SpeechAct],
}

#[derive(Debug, Clone)]
pub struct PatternCache {
    path: PathBuf,
}

impl PatternCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the cached catalog, if there's one.
    ///
    /// Unreadable caches and caches of another version are reported and ignored.
    pub fn try_load(&self) -> Option<Vec<SpeechAct>> {
        if !self.path.is_file() {
            return None;
        }

        info!("Found precompiled speech-acts @{:?}", self.path);
        match self.read() {
            Ok(cache) if cache.version == CACHE_VERSION => Some(cache.acts),
            Ok(cache) => {
                warn!(
                    "ignoring speech-act cache {:?}: version {} (expected {})",
                    self.path, cache.version, CACHE_VERSION
                );
                None
            }
            Err(e) => {
                error!("ignoring speech-act cache {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn read(&self) -> Result<CacheFile, Error> {
        let f = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(f)?)
    }

    /// Saves the catalog, replacing any previous cache.
    pub fn store(&self, acts: &[SpeechAct]) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut w = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(
                &mut w,
                &CacheFileRef {
                    version: CACHE_VERSION,
                    acts,
                },
            )?;
            writeln!(w)?;
            w.flush()?;
        }
        tmp.persist(&self.path)?;

        info!("Saved precompiled list of speech-acts to {:?}", self.path);
        Ok(())
    }
}
