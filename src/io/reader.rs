//! Loading parsed mf2 documents
//!
//! The reader accepts the JSON an mf2 parser produced, from a file or any
//! `Read`, and optionally validates it before handing it to the query layer.

use crate::core::ParsedDocument;
use crate::error::{Mf2Error, Result};
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Configuration for the document reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to validate the document tree on read
    pub validate_on_read: bool,
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            validate_on_read: true,
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Parsed mf2 JSON reader
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a document from a file path
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedDocument> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Mf2Error::file_not_found(path));
        }

        if !path.is_file() {
            return Err(Mf2Error::validation(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;
            if metadata.len() as usize > max_size {
                return Err(Mf2Error::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        debug!("Reading mf2 document: {}", path.display());
        let content = fs::read_to_string(path)?;
        self.parse_content(&content)
    }

    /// Read a document from any reader, such as stdin
    ///
    /// At most one byte past the size limit is buffered.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<ParsedDocument> {
        let mut content = String::new();

        match self.config.max_file_size {
            Some(max_size) => {
                reader
                    .take(max_size as u64 + 1)
                    .read_to_string(&mut content)?;
                if content.len() > max_size {
                    return Err(Mf2Error::validation(format!(
                        "Input too large: more than {} bytes",
                        max_size
                    )));
                }
            }
            None => {
                let mut reader = reader;
                reader.read_to_string(&mut content)?;
            }
        }

        self.parse_content(&content)
    }

    /// Parse a document from string content
    pub fn parse_content(&self, content: &str) -> Result<ParsedDocument> {
        let document = ParsedDocument::from_json_str(content)?;

        if self.config.validate_on_read {
            document.validate()?;
        }

        debug!("Parsed document with {} items", document.items().len());
        Ok(document)
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENTRY: &str =
        r#"{"items": [{"type": ["h-entry"], "properties": {"name": ["hello"]}}], "rels": {}}"#;

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(ENTRY.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let doc = DocumentReader::new().read_file(temp_file.path()).unwrap();
        assert_eq!(doc.items().len(), 1);
    }

    #[test]
    fn test_read_from_reader() {
        let doc = DocumentReader::new().read_from(ENTRY.as_bytes()).unwrap();
        assert_eq!(doc.items()[0].types(), ["h-entry"]);
    }

    #[test]
    fn test_missing_file() {
        let result = DocumentReader::new().read_file("/nonexistent/doc.json");
        assert!(matches!(result, Err(Mf2Error::FileNotFound { .. })));
    }

    #[test]
    fn test_size_limit() {
        let reader = DocumentReader::with_config(ReaderConfig {
            max_file_size: Some(8),
            ..Default::default()
        });
        assert!(matches!(
            reader.read_from(ENTRY.as_bytes()),
            Err(Mf2Error::Validation { .. })
        ));
    }

    #[test]
    fn test_size_limit_stops_reading_early() {
        let reader = DocumentReader::with_config(ReaderConfig {
            max_file_size: Some(16),
            ..Default::default()
        });
        let endless = std::io::repeat(b' ');
        assert!(matches!(
            reader.read_from(endless),
            Err(Mf2Error::Validation { .. })
        ));
    }

    #[test]
    fn test_size_limit_allows_exact_fit() {
        let reader = DocumentReader::with_config(ReaderConfig {
            max_file_size: Some(ENTRY.len()),
            ..Default::default()
        });
        assert!(reader.read_from(ENTRY.as_bytes()).is_ok());
    }

    #[test]
    fn test_validation_toggle() {
        let bad = r#"{"items": [{"type": [], "properties": {}}], "rels": {}}"#;
        assert!(matches!(
            DocumentReader::new().parse_content(bad),
            Err(Mf2Error::InvalidDocument { .. })
        ));

        let lenient = DocumentReader::with_config(ReaderConfig {
            validate_on_read: false,
            ..Default::default()
        });
        assert!(lenient.parse_content(bad).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            DocumentReader::new().parse_content("{not json"),
            Err(Mf2Error::Json(_))
        ));
    }
}
