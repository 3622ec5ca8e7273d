/*!
# IO utilities

Reading tables into corpora and writing corpora as annotated xml.
!*/
pub mod reader;
pub mod writer;
