use crate::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_START_DELIMITER: &str = "<<<<<<<<<<<<<<<response<<<<<<<<<<<<<<<";
pub const DEFAULT_END_DELIMITER: &str = ">>>>>>>>>>>>>>>response>>>>>>>>>>>>>>>";
pub const DEFAULT_ERROR_PREFIX: &str = "ERR: ";
pub const DEFAULT_CONFIG_FILE: &str = "fnwrap.toml";

/// Status code used when the handler does not pick one (202 Accepted).
pub const DEFAULT_STATUS: u16 = 202;

/// Optional settings file. Every field may also come from the command line
/// or environment, which take precedence.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct FileConfig {
    pub framing: Option<String>,
    pub start_delimiter: Option<String>,
    pub end_delimiter: Option<String>,
    pub bytes_status: Option<u16>,
    pub error_body: Option<String>,
    pub unclassified: Option<String>,
    pub error_prefix: Option<String>,
}

impl FileConfig {
    /// Load the file at `path`, or `./fnwrap.toml` when no path is given.
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if path.exists() {
            let content = std::fs::read_to_string(&path).unwrap_or_default();
            toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Framing {
    /// Pretty JSON response between two marker lines on stdout.
    Delimited { start: String, end: String },
    /// Body text alone on stdout.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBody {
    Include,
    Suppress,
}

/// How to treat status codes that are neither 2xx nor 4xx/5xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unclassified {
    Success,
    Error,
}

/// The active output contract. One adapter serves every variant; only this
/// structure differs between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub framing: Framing,
    pub bytes_status: u16,
    pub error_body: ErrorBody,
    pub unclassified: Unclassified,
    pub error_prefix: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            framing: Framing::Delimited {
                start: DEFAULT_START_DELIMITER.into(),
                end: DEFAULT_END_DELIMITER.into(),
            },
            bytes_status: DEFAULT_STATUS,
            error_body: ErrorBody::Include,
            unclassified: Unclassified::Success,
            error_prefix: DEFAULT_ERROR_PREFIX.into(),
        }
    }
}

impl Policy {
    /// Merge explicit overrides over the file settings over the defaults.
    pub fn resolve(overrides: FileConfig, file: FileConfig) -> Result<Self> {
        let framing = match overrides
            .framing
            .or(file.framing)
            .as_deref()
            .unwrap_or("framed")
        {
            "framed" | "delimited" => Framing::Delimited {
                start: non_empty(overrides.start_delimiter)
                    .or(non_empty(file.start_delimiter))
                    .unwrap_or_else(|| DEFAULT_START_DELIMITER.into()),
                end: non_empty(overrides.end_delimiter)
                    .or(non_empty(file.end_delimiter))
                    .unwrap_or_else(|| DEFAULT_END_DELIMITER.into()),
            },
            "plain" => Framing::Plain,
            other => {
                return Err(AdapterError::Config(format!(
                    "Unknown framing '{other}'. Valid values: framed, plain"
                )));
            }
        };

        let bytes_status = overrides
            .bytes_status
            .or(file.bytes_status)
            .unwrap_or(DEFAULT_STATUS);
        if bytes_status != 200 && bytes_status != 202 {
            return Err(AdapterError::Config(format!(
                "Unsupported bytes status {bytes_status}. Valid values: 200, 202"
            )));
        }

        let error_body = match overrides
            .error_body
            .or(file.error_body)
            .as_deref()
            .unwrap_or("include")
        {
            "include" => ErrorBody::Include,
            "suppress" => ErrorBody::Suppress,
            other => {
                return Err(AdapterError::Config(format!(
                    "Unknown error body mode '{other}'. Valid values: include, suppress"
                )));
            }
        };

        let unclassified = match overrides
            .unclassified
            .or(file.unclassified)
            .as_deref()
            .unwrap_or("success")
        {
            "success" => Unclassified::Success,
            "error" => Unclassified::Error,
            other => {
                return Err(AdapterError::Config(format!(
                    "Unknown unclassified mode '{other}'. Valid values: success, error"
                )));
            }
        };

        let error_prefix = overrides
            .error_prefix
            .or(file.error_prefix)
            .unwrap_or_else(|| DEFAULT_ERROR_PREFIX.into());

        Ok(Self {
            framing,
            bytes_status,
            error_body,
            unclassified,
            error_prefix,
        })
    }
}

// An empty delimiter variable counts as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
