//
// config.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The server URI that means "launch a Jupyter server locally".
pub const LOCAL_LAUNCH_SERVER_URI: &str = "local";

/// Settings that affect kernel selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorConfig {
    /// The Jupyter server to connect to, or "local" to launch one.
    pub jupyter_server_uri: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            jupyter_server_uri: LOCAL_LAUNCH_SERVER_URI.to_string(),
        }
    }
}

impl SelectorConfig {
    /// Read settings from a JSON file; missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Whether the configured server is launched locally.
    pub fn is_local_launch(&self) -> bool {
        self.jupyter_server_uri
            .eq_ignore_ascii_case(LOCAL_LAUNCH_SERVER_URI)
    }
}
