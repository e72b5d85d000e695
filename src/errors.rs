// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{fmt, io};

#[derive(Debug)]
pub enum ProteinScapeError {
    Io(io::Error),
    Format(String),
    EmptyInput,
    InvalidCharacter { found: char, position: usize },
    SequenceTooLong { len: usize, max: usize },
    PredictionRequest(String),
    InvalidStyle(String),
    MalformedStructure(String),
}

impl ProteinScapeError {
    // True for errors that reject the input itself (as opposed to a failure further down the
    // pipeline). In batch mode these become "skipped" entries.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            ProteinScapeError::EmptyInput
                | ProteinScapeError::InvalidCharacter { .. }
                | ProteinScapeError::SequenceTooLong { .. }
        )
    }
}

// These allow conversion to ProteinScapeError, required for main() to return Result<()> and for
// '?' to work.

impl From<io::Error> for ProteinScapeError {
    fn from(e: io::Error) -> Self {
        ProteinScapeError::Io(e)
    }
}

impl From<String> for ProteinScapeError {
    fn from(s: String) -> Self {
        ProteinScapeError::Format(s)
    }
}

impl From<serde_json::Error> for ProteinScapeError {
    fn from(e: serde_json::Error) -> Self {
        ProteinScapeError::Format(format!("JSON: {}", e))
    }
}

impl From<reqwest::Error> for ProteinScapeError {
    fn from(e: reqwest::Error) -> Self {
        let cause = if e.is_timeout() {
            format!("request timed out ({})", e)
        } else if let Some(status) = e.status() {
            format!("server returned {}", status)
        } else {
            e.to_string()
        };
        ProteinScapeError::PredictionRequest(cause)
    }
}

impl fmt::Display for ProteinScapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProteinScapeError::Io(e) => write!(f, "I/O error: {}", e),
            ProteinScapeError::Format(msg) => write!(f, "Format error: {}", msg),
            ProteinScapeError::EmptyInput => write!(f, "No sequence supplied"),
            ProteinScapeError::InvalidCharacter { found, position } => write!(
                f,
                "Invalid character {:?} at position {} (only the 20 standard amino acids are allowed)",
                found,
                position + 1
            ),
            ProteinScapeError::SequenceTooLong { len, max } => {
                write!(f, "Sequence is too long ({} characters, max: {})", len, max)
            }
            ProteinScapeError::PredictionRequest(cause) => {
                write!(f, "Error during prediction: {}", cause)
            }
            ProteinScapeError::InvalidStyle(name) => write!(
                f,
                "Unsupported visualization style '{}' (expected 'cartoon' or 'stick')",
                name
            ),
            ProteinScapeError::MalformedStructure(msg) => {
                write!(f, "Malformed structure: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProteinScapeError {}
