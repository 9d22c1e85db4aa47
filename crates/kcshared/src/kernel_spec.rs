//
// kernel_spec.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The placeholder Jupyter substitutes with the path to the connection file
/// when it launches a kernel.
pub const CONNECTION_FILE_PLACEHOLDER: &str = "{connection_file}";

/// A discovered kernel spec.
///
/// From the Jupyter documentation for [Kernel Specs](https://jupyter-client.readthedocs.io/en/stable/kernels.html#kernel-specs),
/// plus the identity fields (`name`, `path`, `spec_file`) that only exist once
/// the spec has been found on disk or reported by a server.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    /// The kernel name; for specs on disk, the name of the directory holding
    /// `kernel.json`
    #[serde(default)]
    pub name: String,

    /// The executable that launches the kernel (normally `argv[0]`)
    pub path: Option<String>,

    /// The kernel name as it should be displayed in the UI
    pub display_name: Option<String>,

    /// The kernel's language
    #[serde(default)]
    pub language: String,

    /// List of command line arguments to be used to start the kernel
    #[serde(default)]
    pub argv: Vec<String>,

    /// Environment variables to set for the kernel
    #[serde(default)]
    pub env: serde_json::Map<String, Value>,

    /// Free-form metadata (e.g. the interpreter the spec was registered for)
    pub metadata: Option<Value>,

    /// The `kernel.json` file this spec was read from, if any
    pub spec_file: Option<String>,
}

impl KernelSpec {
    /// Create a kernel spec with the given name and language; all other fields
    /// are empty.
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        KernelSpec {
            name: name.into(),
            path: None,
            display_name: None,
            language: language.into(),
            argv: Vec::new(),
            env: serde_json::Map::new(),
            metadata: None,
            spec_file: None,
        }
    }

    /// Parse a kernel spec from a `kernel.json` file.
    ///
    /// The kernel name is taken from the directory containing the file, and
    /// the path defaults to the first element of `argv`.
    pub fn from_file<P: AsRef<Path>>(spec_file: P) -> Result<Self, anyhow::Error> {
        let spec_file = spec_file.as_ref();
        let file = File::open(spec_file)?;
        let reader = BufReader::new(file);
        let mut spec: KernelSpec = serde_json::from_reader(reader)?;

        if spec.name.is_empty() {
            spec.name = spec_file
                .parent()
                .and_then(|dir| dir.file_name())
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
        }
        if spec.path.is_none() {
            spec.path = spec.argv.first().cloned();
        }
        spec.spec_file = Some(spec_file.to_string_lossy().to_string());

        log::trace!(
            "Read kernel spec '{}' ({}) from {}",
            spec.name,
            spec.display_name.as_deref().unwrap_or(""),
            spec_file.display()
        );
        Ok(spec)
    }

    /// The name to show the user: the display name if there is one, otherwise
    /// the kernel name.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display_name) if !display_name.is_empty() => display_name,
            _ => &self.name,
        }
    }
}
