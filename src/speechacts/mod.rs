/*! Speech acts

A speech act is a named linguistic construction (apology, commitment, ...) described by a set of templates.
Templates are compiled into regular expressions ([compiler]), loaded from a directory of definition files ([loader]),
and cached between runs ([cache]).

[Matcher] holds the ready-to-use regular expressions of a catalog and finds occurrences in texts.
!*/
pub mod cache;
pub mod compiler;
mod export;
pub mod loader;
mod matcher;

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub use cache::PatternCache;
pub use compiler::{compile, Compiled};
pub use export::write_acts;
pub use loader::load_dir;
pub use matcher::{Annotation, Matcher};

/// A speech act with its compiled patterns.
///
/// The classification flags are derived from the taxonomy when the act is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechAct {
    name: String,
    taxonomy: String,
    is_emotional: bool,
    is_comment: bool,
    patterns: Vec<String>,
}

impl SpeechAct {
    pub fn new(name: String, taxonomy: String) -> Self {
        let lowered = taxonomy.to_lowercase();
        let is_emotional = lowered.contains("emotion");
        let is_comment = lowered.contains("kommentar") || lowered.contains("comment");

        Self {
            name,
            taxonomy,
            is_emotional,
            is_comment,
            patterns: Vec::new(),
        }
    }

    /// Compiles a template line and appends the resulting pattern(s).
    ///
    /// Returns the number of added patterns.
    pub fn add_template(&mut self, template: &str) -> usize {
        match compile(template) {
            Compiled::Pattern(pattern) => {
                self.patterns.push(pattern);
                1
            }
            Compiled::SingleWord(word) => {
                self.patterns.extend(compiler::single_word_patterns(&word));
                2
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn taxonomy(&self) -> &str {
        &self.taxonomy
    }

    pub fn is_emotional(&self) -> bool {
        self.is_emotional
    }

    pub fn is_comment(&self) -> bool {
        self.is_comment
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Gets the speech-act catalog for a run.
///
/// - No speech-act directory: no catalog, no annotation.
/// - A cache file exists: the cached catalog is used as is, even if the directory changed since.
/// - The directory is missing: no catalog.
/// - Otherwise, the directory is loaded and the cache (if any) is written.
pub fn load_catalog(dir: Option<&Path>, cache: Option<&PatternCache>) -> Option<Vec<SpeechAct>> {
    let dir = dir?;

    if let Some(acts) = cache.and_then(PatternCache::try_load) {
        info!("Speech-acts deserialized, using them, skipping preparation.");
        return Some(acts);
    }

    if !dir.is_dir() {
        warn!(
            "speech-act directory {:?} does not exist, texts will not be annotated",
            dir
        );
        return None;
    }

    info!("Found speech-acts directory, parsing acts.");
    let acts = load_dir(dir);
    info!("Parsed {} speech acts.", acts.len());

    if let Some(cache) = cache {
        if let Err(e) = cache.store(&acts) {
            warn!("could not save precompiled speech-acts: {}", e);
        }
    }

    Some(acts)
}
