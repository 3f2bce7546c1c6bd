//! Output rendering with atomic file writes
//!
//! Query results leave the library as `serde_json::Value`s. The writer renders
//! them as JSON or YAML and sends them to stdout or a file; file writes go
//! through a temporary file in the target directory and are renamed into
//! place.

use crate::error::{Mf2Error, Result};
use log::debug;
use serde_json::Value as JsonValue;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Output serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Where rendered output goes
#[derive(Debug, Clone, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

/// Configuration for the output writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Use atomic writes (write to temp file first, then rename)
    pub atomic_writes: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            atomic_writes: true,
        }
    }
}

/// Renders and writes query output
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    config: WriterConfig,
}

impl OutputWriter {
    /// Create a new writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new writer with custom configuration
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Render a value in the configured format
    pub fn render(&self, value: &JsonValue) -> Result<String> {
        let rendered = match self.config.format {
            OutputFormat::Json if self.config.pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?
                .trim_start_matches("---\n")
                .trim_end()
                .to_string(),
        };
        Ok(rendered)
    }

    /// Render a value and send it to `target`
    pub fn write(&self, value: &JsonValue, target: &OutputTarget) -> Result<()> {
        let mut content = self.render(value)?;
        content.push('\n');

        match target {
            OutputTarget::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(content.as_bytes())?;
                handle.flush()?;
                Ok(())
            }
            OutputTarget::File(path) => self.write_to_file(path, &content),
        }
    }

    fn write_to_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        debug!("Writing output to {}", path.display());
        if self.config.atomic_writes {
            self.write_atomic(path, content)
        } else {
            Ok(fs::write(path, content)?)
        }
    }

    /// Write file atomically using temporary file
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(path).map_err(|e| {
            Mf2Error::Io(std::io::Error::other(format!(
                "Failed to persist temporary file: {}",
                e
            )))
        })?;

        Ok(())
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_render_json() {
        let compact = OutputWriter::with_config(WriterConfig {
            pretty: false,
            ..Default::default()
        });
        assert_eq!(
            compact.render(&json!({"type": "h-entry"})).unwrap(),
            r#"{"type":"h-entry"}"#
        );
    }

    #[test]
    fn test_render_yaml() {
        let writer = OutputWriter::with_config(WriterConfig {
            format: OutputFormat::Yaml,
            ..Default::default()
        });
        let rendered = writer
            .render(&json!({"type": "h-entry", "category": ["a", "b"]}))
            .unwrap();
        assert_eq!(rendered, "category:\n- a\n- b\ntype: h-entry");
    }

    #[test]
    fn test_atomic_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/jf2.json");

        OutputWriter::new()
            .write(&json!({"name": "hello"}), &OutputTarget::File(path.clone()))
            .unwrap();

        let written: JsonValue = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({"name": "hello"}));
    }

    #[test]
    fn test_direct_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jf2.json");
        let writer = OutputWriter::with_config(WriterConfig {
            atomic_writes: false,
            pretty: false,
            ..Default::default()
        });

        writer
            .write(&json!(["a"]), &OutputTarget::File(path.clone()))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\"a\"]\n");
    }
}
