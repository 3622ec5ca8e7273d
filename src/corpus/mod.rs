/*! Corpus data model

A [Corpus] is an ordered collection of [Text], each of them being a row of an input table.
Both carry metadata as ordered [Attributes].

Token counts are derived: a [Text] recounts on every content change,
and a [Corpus] updates its total on every change to its texts.
!*/
mod attributes;
#[allow(clippy::module_inception)]
mod corpus;
mod text;

pub use attributes::{AttributeValue, Attributes};
pub use corpus::Corpus;
pub use text::{count_tokens, Text, TOKEN_COUNT};
