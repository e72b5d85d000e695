// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::cell::RefCell;

use proteinscape::{
    errors::ProteinScapeError,
    predict::{StructurePredictor, StructureText},
    seq::{fasta, file::SeqFile},
    session::Session,
};

pub const TINY_PDB: &str = include_str!("../data/tiny.pdb");

// Stands in for the remote service. Sequences listed in `fail_on` get a simulated network error;
// every request is recorded.
#[allow(dead_code)]
pub struct FakePredictor {
    pub requests: RefCell<Vec<String>>,
    fail_on: Vec<String>,
}

#[allow(dead_code)]
impl FakePredictor {
    pub fn new() -> Self {
        FakePredictor {
            requests: RefCell::new(Vec::new()),
            fail_on: Vec::new(),
        }
    }

    pub fn failing_on(seqs: &[&str]) -> Self {
        FakePredictor {
            requests: RefCell::new(Vec::new()),
            fail_on: seqs.iter().map(|s| String::from(*s)).collect(),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl StructurePredictor for FakePredictor {
    fn predict(&self, sequence: &str) -> Result<StructureText, ProteinScapeError> {
        self.requests.borrow_mut().push(String::from(sequence));
        if self.fail_on.iter().any(|s| s == sequence) {
            return Err(ProteinScapeError::PredictionRequest(String::from(
                "error sending request: connection refused",
            )));
        }
        Ok(StructureText::new(String::from(TINY_PDB)))
    }
}

#[allow(dead_code)]
pub fn session_with(predictor: FakePredictor) -> Session<FakePredictor> {
    Session::new(predictor)
}

#[allow(dead_code)]
pub fn read_test_fasta(path: &str) -> SeqFile {
    fasta::read_fasta_file(path).expect("Test file not found")
}
