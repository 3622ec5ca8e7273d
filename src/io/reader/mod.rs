/*! Input reading.

Corpora are read from tables, one row per text.
!*/
mod table;

pub use table::{read_corpus, read_from};
