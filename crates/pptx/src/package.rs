//! The ZIP container of a `.pptx` file.

use crate::xml::part_to_string;
use deck_core::{Error, Result};
use std::io::{Read, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Every part of a package, in archive order.
///
/// Parts nobody touches are written back byte for byte.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<(String, Vec<u8>)>,
}

impl Package {
    /// Read every file entry of a ZIP archive.
    pub fn read<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for idx in 0..archive.len() {
            let mut file = archive
                .by_index(idx)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", idx, e)))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;
            parts.push((name, data));
        }

        log::debug!("Read {} package parts", parts.len());
        Ok(Self { parts })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// A part decoded as UTF-8 text.
    pub fn get_str(&self, name: &str) -> Result<String> {
        let data = self
            .get(name)
            .ok_or_else(|| Error::ZipError(format!("File not found in archive '{}'", name)))?;
        part_to_string(name, data)
    }

    /// Replace a part, or add it at the end of the archive.
    pub fn set(&mut self, name: &str, data: impl Into<Vec<u8>>) {
        let data = data.into();
        match self.parts.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = data,
            None => self.parts.push((name.to_string(), data)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(n, _)| n.as_str())
    }

    /// Write every part to a new ZIP archive.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
            zip.write_all(data)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_then_read_keeps_order() {
        let mut package = Package::default();
        package.set("[Content_Types].xml", "<Types/>");
        package.set("ppt/slides/slide1.xml", "<p:sld/>");
        package.set("[Content_Types].xml", "<Types></Types>");

        let bytes = package.write(Cursor::new(Vec::new())).unwrap().into_inner();
        let read = Package::read(Cursor::new(bytes)).unwrap();

        assert_eq!(
            read.names().collect::<Vec<_>>(),
            vec!["[Content_Types].xml", "ppt/slides/slide1.xml"]
        );
        assert_eq!(read.get_str("[Content_Types].xml").unwrap(), "<Types></Types>");
        assert!(read.contains("ppt/slides/slide1.xml"));
        assert!(matches!(read.get_str("missing.xml"), Err(Error::ZipError(_))));
    }
}
