//! Speech-act definition files loading.
//!
//! Each speech act lives in its own `.dat` file:
//!
//! ```xml
//! <list>
//!   <header>
//!     <speechact_type>apology</speechact_type>
//!     <taxonomie>Expressiv</taxonomie>
//!   </header>
//!   <body>
//! Es tut mir ... leid
//! sorry
//!   </body>
//! </list>
//! ```
//!
//! Every non-empty body line is a template.
use std::path::{Path, PathBuf};

use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::SpeechAct;
use crate::error::Error;

const NAME_PATH: &str = "list/header/speechact_type";
const TAXONOMY_PATH: &str = "list/header/taxonomie";
const BODY_PATH: &str = "list/body";

/// Loads every `*.dat` file of `dir` (non-recursive), in path order.
///
/// Files that can't be read or parsed are skipped.
/// A missing directory yields no acts.
pub fn load_dir(dir: &Path) -> Vec<SpeechAct> {
    let paths = match act_files(dir) {
        Ok(paths) => paths,
        Err(e) => {
            warn!("could not list speech-act files in {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    paths
        .into_iter()
        .filter_map(|path| match load_file(&path) {
            Ok(act) => {
                debug!(
                    "{:?}: speech act {} ({} patterns)",
                    path,
                    act.name(),
                    act.patterns().len()
                );
                Some(act)
            }
            Err(e) => {
                warn!("skipping speech-act file: {}", e);
                None
            }
        })
        .collect()
}

fn act_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let pattern = dir.join("*.dat");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non utf-8 path {:?}", dir)))?;

    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    paths.retain(|p| p.is_file());
    paths.sort();
    Ok(paths)
}

/// Loads a single definition file.
pub fn load_file(path: &Path) -> Result<SpeechAct, Error> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|e| match e {
        Error::MalformedActFile { reason, .. } => Error::MalformedActFile {
            path: path.to_path_buf(),
            reason,
        },
        other => Error::MalformedActFile {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })
}

/// Parses the content of a definition file.
pub fn parse(content: &str) -> Result<SpeechAct, Error> {
    let mut reader = Reader::from_str(content);

    let mut path: Vec<String> = Vec::new();
    let mut name: Option<String> = None;
    let mut taxonomy: Option<String> = None;
    let mut body = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                collect(&path, &text, &mut name, &mut taxonomy, &mut body);
            }
            Event::CData(c) => {
                let text = c.into_inner();
                let text = String::from_utf8_lossy(&text);
                collect(&path, &text, &mut name, &mut taxonomy, &mut body);
            }
            Event::Eof => break,
            _ => (),
        }
    }

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| malformed("missing speechact_type"))?;
    let taxonomy = taxonomy
        .map(|t| t.trim().to_string())
        .ok_or_else(|| malformed("missing taxonomie"))?;

    let mut act = SpeechAct::new(name, taxonomy);
    for line in body.split(|c: char| c == '\n' || c == '\r') {
        if !line.trim().is_empty() {
            act.add_template(line);
        }
    }

    Ok(act)
}

fn collect(
    path: &[String],
    text: &str,
    name: &mut Option<String>,
    taxonomy: &mut Option<String>,
    body: &mut String,
) {
    match path.join("/").as_str() {
        NAME_PATH => name.get_or_insert_with(String::new).push_str(text),
        TAXONOMY_PATH => taxonomy.get_or_insert_with(String::new).push_str(text),
        BODY_PATH => body.push_str(text),
        _ => (),
    }
}

fn malformed(reason: &str) -> Error {
    Error::MalformedActFile {
        path: PathBuf::new(),
        reason: reason.to_string(),
    }
}
