// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

pub mod barchart;
pub mod composition;
pub mod svg;
mod viewer;

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use log::debug;

use crate::errors::ProteinScapeError;
use crate::predict::StructureText;

pub use composition::{describe_composition, Composition};
pub use viewer::{Viewer, ViewerOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderStyle {
    #[default]
    #[clap(name = "cartoon")]
    Cartoon,
    #[clap(name = "stick")]
    Stick,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderStyle::Cartoon => "cartoon",
            RenderStyle::Stick => "stick",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RenderStyle {
    type Err = ProteinScapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cartoon" => Ok(RenderStyle::Cartoon),
            "stick" => Ok(RenderStyle::Stick),
            _ => Err(ProteinScapeError::InvalidStyle(String::from(s))),
        }
    }
}

/// Builds a 3D view of `structure`: spectrum colouring, white background, camera fitted to the
/// whole model, continuous spin. Payloads without a single atom record are refused rather than
/// shown as an empty scene.
pub fn render(structure: &StructureText, style: RenderStyle) -> Result<Viewer, ProteinScapeError> {
    let atoms = structure.atom_count();
    if atoms == 0 {
        return Err(ProteinScapeError::MalformedStructure(format!(
            "no ATOM or HETATM records in {} bytes of response",
            structure.as_str().len()
        )));
    }
    debug!("rendering {} atoms as {}", atoms, style);
    Ok(Viewer::new(structure.clone(), style, ViewerOptions::default()))
}
