// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{fs, path::Path, path::PathBuf};

use hex_color::HexColor;
use log::warn;
use ratatui::style::Color;
use serde_json::Value;

use crate::errors::ProteinScapeError;
use crate::render::RenderStyle;

pub const CONFIG_FILE_NAME: &str = ".proteinscapeconfig";

/// Settings from `.proteinscapeconfig` (JSON). Every key is optional; command-line flags take
/// precedence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProteinScapeConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub out_dir: Option<PathBuf>,
    pub style: Option<RenderStyle>,
    pub bar_color: Option<(u8, u8, u8)>,
}

impl ProteinScapeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ProteinScapeError> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_value(&value)
    }

    // Unknown keys are ignored. A key with the wrong type is an error, except `bar_color`, which
    // just falls back to the default with a warning.
    pub fn from_value(value: &Value) -> Result<Self, ProteinScapeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ProteinScapeError::Format(String::from("config must be a JSON object")))?;
        let mut config = ProteinScapeConfig::default();

        if let Some(v) = obj.get("endpoint") {
            let url = v
                .as_str()
                .ok_or_else(|| ProteinScapeError::Format(String::from("'endpoint' must be a string")))?;
            config.endpoint = Some(String::from(url));
        }
        if let Some(v) = obj.get("timeout_secs") {
            let secs = v.as_u64().filter(|&s| s > 0).ok_or_else(|| {
                ProteinScapeError::Format(String::from("'timeout_secs' must be a positive integer"))
            })?;
            config.timeout_secs = Some(secs);
        }
        if let Some(v) = obj.get("out_dir") {
            let dir = v
                .as_str()
                .ok_or_else(|| ProteinScapeError::Format(String::from("'out_dir' must be a string")))?;
            config.out_dir = Some(PathBuf::from(dir));
        }
        if let Some(v) = obj.get("style") {
            let name = v
                .as_str()
                .ok_or_else(|| ProteinScapeError::InvalidStyle(v.to_string()))?;
            config.style = Some(name.parse()?);
        }
        if let Some(v) = obj.get("bar_color").and_then(|v| v.as_str()) {
            match HexColor::parse(v) {
                Ok(c) => config.bar_color = Some((c.r, c.g, c.b)),
                Err(e) => warn!("ignoring bar_color {:?}: {}", v, e),
            }
        }
        Ok(config)
    }

    pub fn bar_color(&self) -> Option<Color> {
        self.bar_color.map(|(r, g, b)| Color::Rgb(r, g, b))
    }
}

pub fn find_config() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
