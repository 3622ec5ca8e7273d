//! # Corporal
//!
//! Converts tables of chat/forum texts into xml corpora, annotating each text
//! with the speech acts it contains.
//!
//! ## Getting started
//!
//! ```sh
//! corporal 0.1.0
//! Converts tables of texts into speech-act annotated xml corpora.
//!
//! USAGE:
//!     corporal [FLAGS] [OPTIONS] <--file <file>|--directory <directory>>
//!
//! FLAGS:
//!     -h, --help             Prints help information
//!     -c, --single-corpus    Create a single corpus file in directory mode
//!     -t, --tag              Tag your texts using the external tagger
//!     -V, --version          Prints version information
//!     -v, --verbose          Enables verbose output
//!
//! OPTIONS:
//!     -d, --directory <directory>          directory of tables to convert
//!         --dump-acts <dump-acts>          write the compiled speech acts as xml
//!     -f, --file <file>                    input table (csv or tsv) to convert
//!     -o, --out <out>                      where to save resulting xml files
//!     -p, --pattern-file <pattern-file>    precompiled speech-acts file, created if missing
//!     -s, --speech-acts <speech-acts>      directory of speech-act definitions (*.dat)
//!         --tagger <tagger>                tagger command, called with a file path
//! ```
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), corporal::error::Error> {
    let opt = cli::Corporal::from_args();

    let level = if opt.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    debug!("cli args\n{:#?}", opt);

    let config = match opt.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let summary = config.run()?;
    for output in &summary.outputs {
        info!("Wrote {:?}", output);
    }

    if summary.failures > 0 {
        error!("{} failures during conversion, see above", summary.failures);
        std::process::exit(1);
    }
    Ok(())
}
