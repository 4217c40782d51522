//! Test-file loader.
//!
//! Test files are declarative YAML or JSON:
//!
//! ```yaml
//! baseurl: https://jsonplaceholder.typicode.com
//! tests:
//!   - GET /posts should return 200
//!   - instruction: Create a post
//!     method: POST
//!     payload: { title: foo }
//!   - instruction: Fetch a user from the other API
//!     baseurl: https://reqres.in/api
//! ```
//!
//! A file is loaded completely or not at all.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tstai_application::InstructionRegistry;
use tstai_domain::{DeclarationOptions, HttpMethod, Payload, TestDeclaration};

/// Test file used by `tstai run` without an argument.
pub const DEFAULT_TEST_FILE: &str = "tests/example.tests.yaml";

const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Loader errors. All of them stop the run before any test executes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file at the given path.
    #[error("Test file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exceeds the maximum allowed size.
    #[error("Test file too large: {size} bytes exceeds maximum of {max} bytes")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        max: u64,
    },

    /// The file exists but cannot be read.
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The extension is neither YAML nor JSON.
    #[error("Unsupported test file {}: expected .yaml, .yml or .json", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Syntax error or unexpected structure.
    #[error("Invalid test file {}: {message}", .path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A declaration cannot be run.
    #[error("Invalid test #{number} in {}: {message}", .path.display())]
    InvalidDeclaration {
        /// File involved.
        path: PathBuf,
        /// 1-based position in the file.
        number: usize,
        /// What is wrong.
        message: String,
    },
}

/// Supported test file syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFileFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl TestFileFormat {
    /// Detects the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TestFile {
    #[serde(default)]
    baseurl: Option<String>,
    #[serde(default)]
    tests: Vec<TestEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TestEntry {
    Instruction(String),
    Detailed(DetailedEntry),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DetailedEntry {
    instruction: String,
    #[serde(default)]
    baseurl: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default, alias = "body")]
    payload: Option<Payload>,
}

impl TestEntry {
    fn into_declaration(self, default_baseurl: Option<&str>) -> Result<TestDeclaration, String> {
        let entry = match self {
            Self::Instruction(instruction) => DetailedEntry {
                instruction,
                baseurl: None,
                method: None,
                payload: None,
            },
            Self::Detailed(entry) => entry,
        };

        let baseurl = entry
            .baseurl
            .as_deref()
            .or(default_baseurl)
            .unwrap_or_default();
        let mut options = DeclarationOptions::new(baseurl);
        if let Some(method) = &entry.method {
            options = options.with_method(HttpMethod::from_str(method).map_err(|e| e.to_string())?);
        }
        if let Some(payload) = entry.payload {
            options = options.with_payload(payload);
        }
        TestDeclaration::new(entry.instruction, options).map_err(|e| e.to_string())
    }
}

/// Reads test files into an [`InstructionRegistry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TestFileLoader;

impl TestFileLoader {
    /// Creates a new loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads `path` and appends its declarations to `registry`.
    ///
    /// Returns the number of declarations added.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`]; the registry is left untouched in that case.
    pub async fn load_into(
        &self,
        path: &Path,
        registry: &mut InstructionRegistry,
    ) -> Result<usize, LoadError> {
        let format = TestFileFormat::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

        let io_error = |source: std::io::Error| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        };

        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(LoadError::TooLarge {
                size: metadata.len(),
                max: MAX_FILE_SIZE,
            });
        }
        let content = tokio::fs::read_to_string(path).await.map_err(io_error)?;

        let declarations = self.parse(path, &content, format)?;
        let added = declarations.len();
        for declaration in declarations {
            registry.push(declaration);
        }
        tracing::debug!(path = %path.display(), added, "loaded test file");
        Ok(added)
    }

    /// Parses file content into validated declarations.
    ///
    /// # Errors
    ///
    /// `Parse` for syntax or structure problems, `InvalidDeclaration` for
    /// entries that cannot run.
    pub fn parse(
        &self,
        path: &Path,
        content: &str,
        format: TestFileFormat,
    ) -> Result<Vec<TestDeclaration>, LoadError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parse_error = |message: String| LoadError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let file: TestFile = match format {
            TestFileFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            TestFileFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let default_baseurl = file.baseurl.as_deref();
        file.tests
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .into_declaration(default_baseurl)
                    .map_err(|message| LoadError::InvalidDeclaration {
                        path: path.to_path_buf(),
                        number: index + 1,
                        message,
                    })
            })
            .collect()
    }
}
