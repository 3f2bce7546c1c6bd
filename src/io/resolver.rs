//! File resolution for batch processing
//!
//! Expands files and directories given on the command line into the list of
//! parsed-mf2 JSON files to load.

use crate::error::{Mf2Error, Result};
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for file resolution
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum recursion depth for directory traversal
    pub max_depth: Option<usize>,
    /// Include hidden files (starting with .)
    pub include_hidden: bool,
    /// Extensions picked up when walking a directory
    pub include_extensions: Vec<String>,
    /// Patterns to exclude (glob-style, `*` and `?`)
    pub exclude_patterns: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
            include_hidden: false,
            include_extensions: vec!["json".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

/// File resolver for handling multiple files and directories
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    config: ResolverConfig,
}

impl FileResolver {
    /// Create a new resolver with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new resolver with custom configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve paths to a sorted, de-duplicated list of files
    ///
    /// Files named explicitly are kept whatever their extension; the
    /// extension filter only applies inside directories.
    pub fn resolve_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<PathBuf>> {
        let excludes = self.compile_excludes()?;
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let files = if path.is_file() {
                vec![path.to_path_buf()]
            } else if path.is_dir() {
                self.traverse_directory(path)?
            } else {
                return Err(Mf2Error::file_not_found(path));
            };

            for file in files {
                let file_str = file.to_string_lossy();
                if excludes.iter().any(|re| re.is_match(&file_str)) {
                    debug!("Excluded by pattern: {}", file.display());
                    continue;
                }
                if seen.insert(file.clone()) {
                    resolved.push(file);
                }
            }
        }

        resolved.sort();
        Ok(resolved)
    }

    fn traverse_directory(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(dir_path)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = entry.map_err(|e| {
                Mf2Error::path_resolution(format!("Error traversing directory: {}", e))
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }
            if !self.config.include_hidden && is_hidden_file(path) {
                continue;
            }
            if !self.has_included_extension(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    fn has_included_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        self.config.include_extensions.contains(&ext)
    }

    /// Translate the glob-style exclude patterns to anchored regexes
    fn compile_excludes(&self) -> Result<Vec<Regex>> {
        self.config
            .exclude_patterns
            .iter()
            .map(|pattern| -> Result<Regex> {
                let regex_pattern = regex::escape(pattern)
                    .replace(r"\*", ".*")
                    .replace(r"\?", ".");
                Ok(Regex::new(&format!("^{}$", regex_pattern))?)
            })
            .collect()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
