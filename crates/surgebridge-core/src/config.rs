// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.
//
// Nothing here can change the library manifest; names and order are fixed
// at build time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Device profile for the desktop stub backend.
    pub desktop: DesktopProfile,
}

/// What the desktop stub pretends the device looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopProfile {
    /// Directories searched for `lib<name>.so` when loading libraries.
    pub library_dirs: Vec<PathBuf>,
    /// Declared system features (e.g. `android.software.leanback`).
    pub system_features: Vec<String>,
    /// Reported SDK level. 0 means "not an Android runtime".
    pub sdk_version: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            desktop: DesktopProfile::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }
}
