// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::PropsError;
use crate::ast::Document;
use crate::dialect::Dialect;
use crate::parser::Parser;

mod access;
mod conversion;
mod helpers;
mod validation;

/// A parsed props.txt dump together with the raw text it came from.
///
/// The raw text is kept for error reporting only: typed-access failures
/// are enhanced with the source line the offending key sits on. The tree
/// itself is built once and never mutated; `into_document` hands it to
/// the caller outright.
pub struct PropsTree {
    doc: Document,
    raw_content: String,
    dialect: Dialect,
}

impl PropsTree {
    /// Load and parse a props.txt file with the default (modern) dialect.
    ///
    /// # Example
    /// ```ignore
    /// let props = PropsTree::from_file("SM_Rock01.props.txt")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PropsError> {
        Self::from_file_with_dialect(path, Dialect::default())
    }

    /// Load and parse a props.txt file with an explicit dialect. Use
    /// [`Dialect::legacy`] for dumps from older UModel builds.
    pub fn from_file_with_dialect<P: AsRef<Path>>(
        path: P,
        dialect: Dialect,
    ) -> Result<Self, PropsError> {
        let resolved = expand_home(path.as_ref());
        debug!("parsing {}", resolved.display());

        let content = fs::read_to_string(&resolved).map_err(|e| PropsError::FileError {
            message: format!("Failed to read file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        Self::from_parts(content, dialect)
    }

    /// Parse a props.txt dump from a string (no file I/O).
    pub fn from_str(content: &str) -> Result<Self, PropsError> {
        Self::from_parts(content.to_string(), Dialect::default())
    }

    pub fn from_str_with_dialect(content: &str, dialect: Dialect) -> Result<Self, PropsError> {
        Self::from_parts(content.to_string(), dialect)
    }

    fn from_parts(content: String, dialect: Dialect) -> Result<Self, PropsError> {
        let mut parser = Parser::with_dialect(&content, dialect)?;
        let doc = parser.parse_document()?;

        Ok(Self {
            doc,
            raw_content: content,
            dialect,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Consume the tree, handing ownership of the document to the caller.
    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn raw_content(&self) -> &str {
        &self.raw_content
    }
}

/// Expand "~/" against the home directory; other paths pass through.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests;
