//! Types for code generation.
//!
//! Defines the generated artifacts and the contexts handed to the
//! Handlebars templates.
//!
//! # Examples
//!
//! ```
//! use route_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new("src/routes.ts", "export const routes = {} as const;\n"));
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use route_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of code generation containing all generated files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files, primary module first
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty generated code container.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file to the collection.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Finds a generated file by path.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    /// Writes every file to disk, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailed`] for the first file that could not
    /// be written.
    pub fn write_all(&self) -> Result<()> {
        for file in &self.files {
            file.write_to_disk()?;
        }
        Ok(())
    }
}

/// A single generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Destination path
    pub path: PathBuf,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Creates a generated file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Writes the file atomically.
    ///
    /// Content goes to a sibling temp file that is then renamed over the
    /// destination. On failure the temp file is removed and the
    /// destination keeps its previous content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailed`] if the parent directory cannot be
    /// created or the file cannot be written or renamed.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_codegen::GeneratedFile;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let file = GeneratedFile::new(dir.path().join("gen/routes.ts"), "export {};\n");
    /// file.write_to_disk().unwrap();
    ///
    /// let written = std::fs::read_to_string(dir.path().join("gen/routes.ts")).unwrap();
    /// assert_eq!(written, "export {};\n");
    /// ```
    pub fn write_to_disk(&self) -> Result<()> {
        let failed = |source| Error::WriteFailed {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(failed)?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &self.content) {
            let _ = fs::remove_file(&temp_path);
            return Err(failed(e));
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(failed(e));
        }

        debug!("Wrote {} ({} bytes)", self.path.display(), self.content.len());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Template context for the route module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutesContext {
    /// Input directory the routes were discovered in
    pub source: String,
    /// Dialect name
    pub dialect: String,
    /// Whether any route declares a query contract
    pub has_query: bool,
    /// Top-level namespace nodes
    pub nodes: Vec<NodeContext>,
    /// Rendered `RoutePath` union
    pub route_path_type: String,
}

/// Template context for one key of the routes object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeContext {
    /// Object key, quoted when not an identifier
    pub key: String,
    /// Leading whitespace for this nesting depth
    pub indent: String,
    /// Whether the key holds a nested object
    pub is_group: bool,
    /// Builder arrow function; empty for groups
    pub builder: String,
    /// Nested keys; empty for builders
    pub children: Vec<NodeContext>,
}

impl NodeContext {
    /// Creates a builder node.
    #[must_use]
    pub fn leaf(key: String, depth: usize, builder: String) -> Self {
        Self {
            key,
            indent: indent(depth),
            is_group: false,
            builder,
            children: Vec::new(),
        }
    }

    /// Creates a nested object node.
    #[must_use]
    pub fn group(key: String, depth: usize, children: Vec<Self>) -> Self {
        Self {
            key,
            indent: indent(depth),
            is_group: true,
            builder: String::new(),
            children,
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth + 1)
}

/// Template context for the emitted test suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSuiteContext {
    /// Quoted module specifier of the route module
    pub import_path: String,
    /// One assertion per case
    pub cases: Vec<TestCase>,
}

/// One assertion of the emitted test suite. All fields are TypeScript
/// source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// Quoted test title
    pub title: String,
    /// Builder call expression
    pub call: String,
    /// Quoted expected path
    pub expected: String,
}

/// Template context for the API helper module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiContext {
    /// Quoted module specifier of the route module
    pub import_path: String,
    /// One helper per `/api` route
    pub endpoints: Vec<Endpoint>,
}

/// One fetch helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Helper name
    pub key: String,
    /// Parameter declarations, ending with the request options
    pub declarations: String,
    /// Builder call producing the request path
    pub call: String,
}
