//! PPTX (Office Open XML) backend for deck templates.
//!
//! A `.pptx` file is a ZIP archive of XML parts. Slides are loaded into the
//! [`deck_core::Deck`] model and written back on save; everything else in
//! the archive is carried through untouched.

mod document;
mod package;
mod parser;
mod writer;
mod xml;

pub use document::PptxDocument;
pub use package::Package;
pub use parser::PptxParser;
