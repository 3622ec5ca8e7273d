//! Part-of-speech tagging through an external tagger.
//!
//! The tagger is called with the path of a temporary file holding the content,
//! and is expected to write the tagged text on its standard output.
use std::ffi::OsString;
use std::io::Write;
use std::process::Command;

use log::{debug, error};

use crate::corpus::{Corpus, Text};
use crate::error::Error;

/// Default tagger command.
pub const DEFAULT_TAGGER: &str = "tag-german";

#[derive(Debug, Clone)]
pub struct Tagger {
    command: OsString,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new(DEFAULT_TAGGER)
    }
}

impl Tagger {
    pub fn new<S: Into<OsString>>(command: S) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Tags `content`, returning the tagger output.
    pub fn tag(&self, content: &str) -> Result<String, Error> {
        let mut tmp = tempfile::NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;

        debug!("Starting tagger {:?} on {:?}", self.command, tmp.path());
        let output = Command::new(&self.command).arg(tmp.path()).output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Custom(format!(
                "tagger {:?} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    /// Replaces the content of `text` with its tagged version.
    ///
    /// On failure, the content is left as is.
    pub fn tag_text(&self, text: &mut Text) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }
        let tagged = self.tag(text.content())?;
        text.set_content(tagged);
        Ok(())
    }

    /// Tags every text of `corpus`, returning the number of failures.
    pub fn tag_corpus(&self, corpus: &mut Corpus) -> usize {
        let mut failures = 0;
        for idx in 0..corpus.len() {
            if let Some(Err(e)) = corpus.update(idx, |text| self.tag_text(text)) {
                error!("{}: could not tag text #{}: {}", corpus.name(), idx + 1, e);
                failures += 1;
            }
        }
        failures
    }
}
