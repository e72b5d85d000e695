// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::collections::HashMap;

use log::debug;

use crate::errors::ProteinScapeError;
use crate::predict::{StructurePredictor, StructureText};

/// Everything that survives from one submission to the next: the predictor, the results already
/// obtained (keyed by the exact sequence text), the last structure, and a position counter.
///
/// The cache lives as long as the session; nothing is shared between sessions.
pub struct Session<P: StructurePredictor> {
    predictor: P,
    cache: HashMap<String, StructureText>,
    last_structure: Option<StructureText>,
    position: usize,
}

impl<P: StructurePredictor> Session<P> {
    pub fn new(predictor: P) -> Self {
        Session {
            predictor,
            cache: HashMap::new(),
            last_structure: None,
            position: 0,
        }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Predicts `sequence`, or returns the memoized result of an earlier call. Failures are not
    /// cached, so a later call tries again.
    pub fn predict(&mut self, sequence: &str) -> Result<StructureText, ProteinScapeError> {
        if let Some(hit) = self.cache.get(sequence) {
            debug!("cache hit ({} residues)", sequence.chars().count());
            return Ok(hit.clone());
        }
        let structure = self.predictor.predict(sequence)?;
        self.cache.insert(String::from(sequence), structure.clone());
        Ok(structure)
    }

    pub fn is_cached(&self, sequence: &str) -> bool {
        self.cache.contains_key(sequence)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn evict(&mut self, sequence: &str) -> Option<StructureText> {
        self.cache.remove(sequence)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn last_structure(&self) -> Option<&StructureText> {
        self.last_structure.as_ref()
    }

    pub fn set_last_structure(&mut self, structure: StructureText) {
        self.last_structure = Some(structure);
    }

    // Position counter: number of sequences handled so far in the current batch.

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn advance(&mut self) -> usize {
        self.position += 1;
        self.position
    }

    pub fn reset_position(&mut self) {
        self.position = 0;
    }
}
