/*! Speech-act annotation of text corpora.

Tables of texts are read into [corpus::Corpus] values, matched against a catalog of
[speechacts::SpeechAct] patterns and written as xml documents by [io::writer].

```no_run
use std::path::PathBuf;
use corporal::pipeline::{Config, Input};

let mut config = Config::new(Input::File(PathBuf::from("chat.csv")));
config.speech_acts = Some(PathBuf::from("speechacts/"));
let summary = config.run().unwrap();
println!("{} texts written", summary.report.written);
```
!*/
pub mod corpus;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod speechacts;
pub mod tagging;
