/*! Conversion pipeline.

1. The speech-act catalog is loaded once (from the cache if possible),
1. each input table is read into a [Corpus] (and optionally tagged),
1. corpora are written as annotated xml, either one document per table
   or a single document for a whole directory.

Failures on a given table are logged and counted, and do not stop the other tables from being converted.
!*/
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info, warn};

use crate::corpus::Corpus;
use crate::error::Error;
use crate::io::reader::read_corpus;
use crate::io::writer::{write_bodies_file, write_corpus_file, EmitReport};
use crate::speechacts::{load_catalog, write_acts, Matcher, PatternCache};
use crate::tagging::Tagger;

/// Table file extensions picked up in directories.
const TABLE_EXTENSIONS: [&str; 2] = ["csv", "tsv"];

/// What to convert.
#[derive(Debug, Clone)]
pub enum Input {
    File(PathBuf),
    Directory(PathBuf),
}

/// Run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Input,
    /// output folder. Defaults to the folder of the input.
    pub out: Option<PathBuf>,
    pub speech_acts: Option<PathBuf>,
    pub pattern_file: Option<PathBuf>,
    pub tagger: Option<Tagger>,
    /// with a directory input, write a single document.
    pub single_corpus: bool,
    pub dump_acts: Option<PathBuf>,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct Summary {
    /// corpora written
    pub corpora: usize,
    /// corpora that couldn't be read or written, plus a failed speech-act listing
    pub failures: usize,
    pub report: EmitReport,
    /// documents written
    pub outputs: Vec<PathBuf>,
}

impl Config {
    pub fn new(input: Input) -> Self {
        Self {
            input,
            out: None,
            speech_acts: None,
            pattern_file: None,
            tagger: None,
            single_corpus: false,
            dump_acts: None,
        }
    }

    /// Runs the whole conversion.
    ///
    /// Errors are returned only when nothing can be done at all (unreadable input directory, ...).
    /// Failures of single corpora are reported in [Summary::failures].
    pub fn run(&self) -> Result<Summary, Error> {
        let start = Instant::now();

        let cache = self.pattern_file.clone().map(PatternCache::new);
        let catalog = load_catalog(self.speech_acts.as_deref(), cache.as_ref());

        let mut summary = Summary::default();

        if let Some(dst) = &self.dump_acts {
            match &catalog {
                Some(acts) => {
                    if let Err(e) = write_acts(dst, acts) {
                        error!("could not write speech acts to {:?}: {}", dst, e);
                        summary.failures += 1;
                    }
                }
                None => warn!("no speech acts to write to {:?}", dst),
            }
        }

        let matcher = catalog.as_deref().map(Matcher::new);
        let inputs = self.inputs()?;
        let out_dir = self.out_dir();

        if self.single_corpus {
            self.run_single(&inputs, &out_dir, matcher.as_ref(), &mut summary);
        } else {
            for input in &inputs {
                self.run_file(input, &out_dir, matcher.as_ref(), &mut summary);
            }
        }

        info!(
            "Converted {} corpora ({} failures), {} texts written, {} left out",
            summary.corpora,
            summary.failures,
            summary.report.written,
            summary.report.skipped_empty + summary.report.failed
        );
        info!("Conversion took {}s", start.elapsed().as_secs_f64());
        Ok(summary)
    }

    fn run_file(
        &self,
        input: &Path,
        out_dir: &Path,
        matcher: Option<&Matcher>,
        summary: &mut Summary,
    ) {
        let corpus = match self.read(input) {
            Ok(corpus) => corpus,
            Err(e) => {
                error!("could not read {:?}: {}", input, e);
                summary.failures += 1;
                return;
            }
        };

        let dst = out_dir.join(output_name(input));
        match write_corpus_file(&dst, &corpus, matcher) {
            Ok(report) => {
                summary.corpora += 1;
                summary.report += report;
                summary.outputs.push(dst);
            }
            Err(e) => {
                error!("Exception during xml generation of {:?}: {}", dst, e);
                summary.failures += 1;
            }
        }
    }

    fn run_single(
        &self,
        inputs: &[PathBuf],
        out_dir: &Path,
        matcher: Option<&Matcher>,
        summary: &mut Summary,
    ) {
        info!("Generating single corpus");
        let mut corpora = Vec::with_capacity(inputs.len());
        for input in inputs {
            match self.read(input) {
                Ok(corpus) => corpora.push(corpus),
                Err(e) => {
                    error!("could not read {:?}: {}", input, e);
                    summary.failures += 1;
                }
            }
        }

        let input_path = match &self.input {
            Input::File(p) | Input::Directory(p) => p,
        };
        let dst = out_dir.join(output_name(input_path));
        match write_bodies_file(&dst, &corpora, matcher) {
            Ok(report) => {
                summary.corpora += corpora.len();
                summary.report += report;
                summary.outputs.push(dst);
            }
            Err(e) => {
                error!("Exception during xml generation of {:?}: {}", dst, e);
                summary.failures += corpora.len().max(1);
            }
        }
    }

    fn read(&self, input: &Path) -> Result<Corpus, Error> {
        let mut corpus = read_corpus(input)?;
        if let Some(tagger) = &self.tagger {
            let failures = tagger.tag_corpus(&mut corpus);
            if failures > 0 {
                warn!(
                    "{}: {} texts could not be tagged and are kept untagged",
                    corpus.name(),
                    failures
                );
            }
        }
        Ok(corpus)
    }

    /// Lists the tables to convert.
    fn inputs(&self) -> Result<Vec<PathBuf>, Error> {
        match &self.input {
            Input::File(p) => Ok(vec![p.clone()]),
            Input::Directory(dir) => {
                info!("Reading directory {:?}", dir);
                let mut paths = Vec::new();
                for ext in TABLE_EXTENSIONS {
                    let pattern = dir.join(format!("*.{}", ext));
                    let pattern = pattern
                        .to_str()
                        .ok_or_else(|| Error::Custom(format!("non utf-8 path {:?}", dir)))?;
                    for path in glob::glob(pattern)? {
                        paths.push(path?);
                    }
                }
                paths.sort();
                if paths.is_empty() {
                    warn!("no tables found in {:?}", dir);
                }
                Ok(paths)
            }
        }
    }

    fn out_dir(&self) -> PathBuf {
        if let Some(out) = &self.out {
            return out.clone();
        }
        match &self.input {
            Input::Directory(dir) => dir.clone(),
            Input::File(file) => match file.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }
}

/// `chat.csv` -> `chat.xml`
fn output_name(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "corpus".into());
    name.push(".xml");
    PathBuf::from(name)
}
