//! A loaded template: the document model plus the package it came from.

use crate::package::Package;
use crate::parser::{PptxParser, SlidePart};
use crate::writer::PptxWriter;
use deck_core::{Deck, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

/// A `.pptx` deck that can be edited through [`Deck`] and written back.
///
/// Only slide contents are rewritten on save. Masters, layouts, themes and
/// every other part are copied unchanged.
#[derive(Debug, Clone)]
pub struct PptxDocument {
    package: Package,
    deck: Deck,
    parts: Vec<SlidePart>,
}

impl PptxDocument {
    pub(crate) fn new(package: Package, deck: Deck, parts: Vec<SlidePart>) -> Self {
        Self {
            package,
            deck,
            parts,
        }
    }

    /// Load a deck from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a deck from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        PptxParser::new().parse(reader)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Write the deck to a file, replacing it if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    /// Write the deck as a `.pptx` archive.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut package = self.package.clone();
        PptxWriter::new(&mut package).write_deck(&self.deck, &self.parts)?;
        package.write(writer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write_to(Cursor::new(Vec::new()))?.into_inner())
    }
}
