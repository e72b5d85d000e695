// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::collections::HashMap;

/// Residue counts, in order of first appearance in the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    counts: Vec<(char, usize)>,
}

pub fn describe_composition(sequence: &str) -> Composition {
    let mut counts: Vec<(char, usize)> = Vec::new();
    let mut slot: HashMap<char, usize> = HashMap::new();
    for c in sequence.chars().flat_map(char::to_uppercase) {
        match slot.get(&c) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(c, counts.len());
                counts.push((c, 1));
            }
        }
    }
    Composition { counts }
}

impl Composition {
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().copied()
    }

    pub fn as_slice(&self) -> &[(char, usize)] {
        &self.counts
    }

    // Lookup is case-insensitive, like the counting.
    pub fn get(&self, residue: char) -> usize {
        let key = residue.to_ascii_uppercase();
        self.counts
            .iter()
            .find(|(c, _)| *c == key)
            .map(|&(_, n)| n)
            .unwrap_or(0)
    }

    /// Number of distinct residues.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, n)| n).sum()
    }

    pub fn fraction(&self, residue: char) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(residue) as f64 / total as f64
        }
    }
}
