// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::ProteinScapeError;

/// The 20 standard amino acids, one-letter codes.
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Longest sequence accepted in batch mode.
pub const MAX_BATCH_LEN: usize = 1500;

fn amino_acid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ACDEFGHIKLMNPQRSTVWYacdefghiklmnpqrstvwy]+$").expect("valid regex")
    })
}

fn is_amino_acid(c: char) -> bool {
    AMINO_ACIDS.contains(c.to_ascii_uppercase()) && c.is_ascii_alphabetic()
}

/// True iff `sequence` is non-empty and made only of standard amino-acid codes (either case).
pub fn validate(sequence: &str) -> bool {
    amino_acid_re().is_match(sequence)
}

/// Like `validate()`, but says what is wrong.
pub fn check_sequence(sequence: &str) -> Result<(), ProteinScapeError> {
    if sequence.is_empty() {
        return Err(ProteinScapeError::EmptyInput);
    }
    if validate(sequence) {
        return Ok(());
    }
    let (position, found) = sequence
        .chars()
        .enumerate()
        .find(|&(_, c)| !is_amino_acid(c))
        .ok_or_else(|| ProteinScapeError::Format(String::from("validation mismatch")))?;
    Err(ProteinScapeError::InvalidCharacter { found, position })
}

/// Batch entries are also length-limited. Length is checked first, so an overlong entry is
/// reported as such whatever its contents.
pub fn check_batch_entry(sequence: &str) -> Result<(), ProteinScapeError> {
    let len = sequence.chars().count();
    if len > MAX_BATCH_LEN {
        return Err(ProteinScapeError::SequenceTooLong {
            len,
            max: MAX_BATCH_LEN,
        });
    }
    check_sequence(sequence)
}
