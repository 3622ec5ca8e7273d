//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use corporal::pipeline::{Config, Input};
use corporal::tagging::Tagger;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "corporal",
    about = "Converts tables of texts into speech-act annotated xml corpora."
)]
/// Holds every option of the `corporal` command.
///
/// ```sh
/// USAGE:
///     corporal [FLAGS] [OPTIONS] <--file <file>|--directory <directory>>
///
/// FLAGS:
///     -h, --help             Prints help information
///     -c, --single-corpus    Create a single corpus file in directory mode
///     -t, --tag              Tag your texts using the external tagger
///     -V, --version          Prints version information
///     -v, --verbose          Enables verbose output
/// ```
pub struct Corporal {
    #[structopt(
        short = "f",
        long = "file",
        parse(from_os_str),
        help = "input table (csv or tsv) to convert",
        required_unless = "directory",
        conflicts_with = "directory"
    )]
    pub file: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "directory",
        parse(from_os_str),
        help = "directory of tables to convert"
    )]
    pub directory: Option<PathBuf>,

    #[structopt(
        short = "o",
        long = "out",
        parse(from_os_str),
        help = "where to save resulting xml files. Defaults to the input location"
    )]
    pub out: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "speech-acts",
        parse(from_os_str),
        help = "directory of speech-act definitions (*.dat)"
    )]
    pub speech_acts: Option<PathBuf>,

    #[structopt(
        short = "p",
        long = "pattern-file",
        parse(from_os_str),
        help = "precompiled speech-acts file, created if missing"
    )]
    pub pattern_file: Option<PathBuf>,

    #[structopt(short = "t", long = "tag", help = "Tag your texts using the external tagger")]
    pub tag: bool,

    #[structopt(
        long = "tagger",
        help = "tagger command, called with a file path. Defaults to the german tagger"
    )]
    pub tagger: Option<String>,

    #[structopt(
        short = "c",
        long = "single-corpus",
        help = "Create a single corpus file in directory mode"
    )]
    pub single_corpus: bool,

    #[structopt(
        long = "dump-acts",
        parse(from_os_str),
        help = "write the compiled speech acts as xml"
    )]
    pub dump_acts: Option<PathBuf>,

    #[structopt(short = "v", long = "verbose", help = "Enables verbose output")]
    pub verbose: bool,
}

impl Corporal {
    /// Checks the input paths and builds the run configuration.
    pub fn into_config(self) -> Result<Config, String> {
        let input = match (self.file, self.directory) {
            (Some(file), _) if !file.is_file() => {
                return Err(format!("The file {:?} does not exist, I'm out.", file))
            }
            (Some(file), _) => Input::File(file),
            (None, Some(dir)) if !dir.is_dir() => {
                return Err(format!("The directory {:?} does not exist, I'm out.", dir))
            }
            (None, Some(dir)) => Input::Directory(dir),
            (None, None) => return Err("no input file or directory given".to_string()),
        };

        let mut config = Config::new(input);
        config.out = self.out;
        config.speech_acts = self.speech_acts;
        config.pattern_file = self.pattern_file;
        config.tagger = if self.tag {
            Some(self.tagger.map(Tagger::new).unwrap_or_default())
        } else {
            None
        };
        config.single_corpus = self.single_corpus;
        config.dump_acts = self.dump_acts;
        Ok(config)
    }
}
