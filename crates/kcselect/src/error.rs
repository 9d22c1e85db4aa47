//
// error.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

use std::fmt;

use log::error;

/// Errors surfaced by the kernel selector.
///
/// Missing kernels are not errors; they are reported as empty or partial
/// selection results.
#[derive(Debug)]
pub enum SelectError {
    /// Registering a kernel spec for an interpreter failed.
    RegistrationFailed {
        interpreter: String,
        source: anyhow::Error,
    },

    /// A `kernel.json` file could not be read.
    InvalidKernelSpec { path: String, reason: String },

    /// Any other collaborator call failed.
    Collaborator(anyhow::Error),
}

impl SelectError {
    /// The stable numeric code of the error, shown as `KS-<code>`.
    pub fn code(&self) -> u8 {
        match self {
            SelectError::RegistrationFailed { .. } => 0,
            SelectError::InvalidKernelSpec { .. } => 1,
            SelectError::Collaborator(_) => 2,
        }
    }

    pub fn log(&self) {
        error!("{}", self);
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error KS-{}: ", self.code())?;
        match self {
            SelectError::RegistrationFailed {
                interpreter,
                source,
            } => {
                write!(
                    f,
                    "Failed to register a kernel for interpreter {}: {}",
                    interpreter, source
                )
            }
            SelectError::InvalidKernelSpec { path, reason } => {
                write!(f, "Invalid kernel spec {}: {}", path, reason)
            }
            SelectError::Collaborator(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectError::RegistrationFailed { source, .. } => Some(source.as_ref()),
            SelectError::Collaborator(err) => Some(err.as_ref()),
            SelectError::InvalidKernelSpec { .. } => None,
        }
    }
}

impl From<anyhow::Error> for SelectError {
    fn from(err: anyhow::Error) -> Self {
        SelectError::Collaborator(err)
    }
}
