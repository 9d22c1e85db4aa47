//
// notebook_metadata.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The kernel a notebook document declares it was last saved with.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclaredKernelSpec {
    /// The kernel spec name
    #[serde(default)]
    pub name: String,

    /// The kernel spec's display name
    pub display_name: Option<String>,

    /// The kernel's language
    pub language: Option<String>,

    /// The ID of the live kernel the notebook was attached to, used to
    /// reattach to a running remote session
    pub id: Option<String>,
}

/// Language information saved with a notebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    #[serde(default)]
    pub name: String,
}

/// The kernel-related part of a notebook's metadata.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    pub kernelspec: Option<DeclaredKernelSpec>,
    pub language_info: Option<LanguageInfo>,
}

#[derive(Deserialize)]
struct NotebookDocument {
    #[serde(default)]
    metadata: NotebookMetadata,
}

impl NotebookMetadata {
    /// Read the metadata of an `.ipynb` document. Cells and every other
    /// field are ignored.
    pub fn from_notebook_file<P: AsRef<Path>>(notebook: P) -> Result<Self, anyhow::Error> {
        let file = File::open(notebook)?;
        let reader = BufReader::new(file);
        let document: NotebookDocument = serde_json::from_reader(reader)?;
        Ok(document.metadata)
    }

    /// The declared kernel display name, if any.
    pub fn declared_display_name(&self) -> Option<&str> {
        self.kernelspec
            .as_ref()
            .and_then(|spec| spec.display_name.as_deref())
    }

    /// The declared live kernel ID, if any.
    pub fn live_kernel_id(&self) -> Option<&str> {
        self.kernelspec.as_ref().and_then(|spec| spec.id.as_deref())
    }
}
