//
// selection.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::fmt;

use kcshared::interpreter::InterpreterDescriptor;
use kcshared::kernel_spec::KernelSpec;
use kcshared::live_kernel::LiveKernelModel;
use serde::{Deserialize, Serialize};

/// How a kernel is (or will be) connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionType {
    /// Launched and managed directly, without a Jupyter server
    Raw,
    /// Through a Jupyter server (local or remote)
    Jupyter,
    /// No connection is available
    NoConnection,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnectionType::Raw => write!(f, "raw"),
            ConnectionType::Jupyter => write!(f, "jupyter"),
            ConnectionType::NoConnection => write!(f, "noConnection"),
        }
    }
}

/// The outcome of a kernel selection.
///
/// The three fields inform each other rather than exclude each other; a live
/// kernel selection still carries a best-guess interpreter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_spec: Option<KernelSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<InterpreterDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_model: Option<LiveKernelModel>,
}

impl SelectionResult {
    /// An empty result; nothing was selected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kernel_spec.is_none() && self.interpreter.is_none() && self.kernel_model.is_none()
    }

    /// The language of the selected kernel, if it is known.
    pub fn language(&self) -> Option<&str> {
        if let Some(spec) = &self.kernel_spec {
            if !spec.language.is_empty() {
                return Some(&spec.language);
            }
        }
        self.kernel_model
            .as_ref()
            .and_then(|model| model.language.as_deref())
    }
}

/// The payload of a kernel suggestion: whatever the user would be choosing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_spec: Option<KernelSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<InterpreterDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_model: Option<LiveKernelModel>,
}

/// An item in the kernel picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSuggestion {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub selection: KernelSelection,
}

impl KernelSuggestion {
    /// Suggest an installed kernel spec.
    pub fn for_kernel_spec(spec: KernelSpec) -> Self {
        KernelSuggestion {
            label: spec.label().to_string(),
            description: spec.path.clone(),
            selection: KernelSelection {
                kernel_spec: Some(spec),
                ..Default::default()
            },
        }
    }

    /// Suggest using an interpreter as a kernel.
    pub fn for_interpreter(interpreter: InterpreterDescriptor) -> Self {
        KernelSuggestion {
            label: interpreter.label().to_string(),
            description: Some(interpreter.path.clone()),
            selection: KernelSelection {
                interpreter: Some(interpreter),
                ..Default::default()
            },
        }
    }

    /// Suggest attaching to a running kernel.
    pub fn for_live_kernel(model: LiveKernelModel) -> Self {
        KernelSuggestion {
            label: model.label().to_string(),
            description: Some(format!(
                "{} connection(s), last active {}",
                model.number_of_connections,
                model.last_activity_time.to_rfc3339()
            )),
            selection: KernelSelection {
                kernel_model: Some(model),
                ..Default::default()
            },
        }
    }
}

/// The two identities of a kernel connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelIdentity {
    /// The stable kernel ID
    pub id: String,
    /// The transient ID of the client connected to the kernel
    pub client_id: String,
}

impl KernelIdentity {
    pub fn new(id: impl Into<String>, client_id: impl Into<String>) -> Self {
        KernelIdentity {
            id: id.into(),
            client_id: client_id.into(),
        }
    }
}

/// Something an interpreter can be matched against.
#[derive(Debug, Clone, Copy)]
pub enum KernelRef<'a> {
    Spec(&'a KernelSpec),
    Live(&'a LiveKernelModel),
}

impl<'a> KernelRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            KernelRef::Spec(spec) => &spec.name,
            KernelRef::Live(model) => &model.name,
        }
    }
}
