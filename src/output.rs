// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;

use crate::errors::ProteinScapeError;
use crate::predict::StructureText;

const STEM: &str = "predicted_structure";

// File names depend only on the position in the batch (1-based in names), or are fixed for a
// single submission.
fn file_stem(position: Option<usize>) -> String {
    match position {
        None => String::from(STEM),
        Some(idx) => format!("{}_sequence_{}", STEM, idx + 1),
    }
}

pub fn structure_file_name(position: Option<usize>) -> String {
    format!("{}.pdb", file_stem(position))
}

pub fn viewer_file_name(position: Option<usize>) -> String {
    format!("{}.html", file_stem(position))
}

pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self, ProteinScapeError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(OutputDir { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the structure verbatim.
    pub fn write_structure(
        &self,
        position: Option<usize>,
        structure: &StructureText,
    ) -> Result<PathBuf, ProteinScapeError> {
        let path = self.root.join(structure_file_name(position));
        fs::write(&path, structure.as_str())?;
        info!("wrote {}", path.display());
        Ok(path)
    }

    pub fn write_viewer(
        &self,
        position: Option<usize>,
        html: &str,
    ) -> Result<PathBuf, ProteinScapeError> {
        let path = self.root.join(viewer_file_name(position));
        fs::write(&path, html)?;
        info!("wrote {}", path.display());
        Ok(path)
    }
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> Result<(), ProteinScapeError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path.as_ref(), text + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_names() {
        assert_eq!(structure_file_name(None), "predicted_structure.pdb");
        assert_eq!(
            structure_file_name(Some(0)),
            "predicted_structure_sequence_1.pdb"
        );
        assert_eq!(
            viewer_file_name(Some(11)),
            "predicted_structure_sequence_12.html"
        );
    }

    #[test]
    fn test_structure_written_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = OutputDir::create(dir.path().join("nested/out")).expect("create");
        let text = "ATOM      1  N   MET A   1\r\nEND\n";
        let path = out
            .write_structure(Some(2), &StructureText::new(String::from(text)))
            .expect("write");
        assert!(path.ends_with("predicted_structure_sequence_3.pdb"));
        assert_eq!(fs::read_to_string(path).expect("read back"), text);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.json");
        write_json(&json!({ "total": 3 }), &path).expect("write");
        let back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(back["total"], 3);
    }
}
