//
// interpreter.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A language runtime version. Only the major and minor components are
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<u32>,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Version {
            major,
            minor,
            patch: None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    /// Parses versions of the form `3`, `3.9` or `3.10.4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let major = match parts.next() {
            Some(major) if !major.is_empty() => major.parse::<u32>()?,
            _ => return Err(anyhow::anyhow!("Empty version string")),
        };
        let minor = match parts.next() {
            Some(minor) => minor.parse::<u32>()?,
            None => 0,
        };
        let patch = match parts.next() {
            Some(patch) => Some(patch.parse::<u32>()?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(anyhow::anyhow!("Too many components in version '{}'", s));
        }
        Ok(Version {
            major,
            minor,
            patch,
        })
    }
}

/// A snapshot of an interpreter reported by the interpreter discovery
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpreterDescriptor {
    /// The path to the interpreter executable
    pub path: String,

    /// The interpreter version, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    /// The name to show the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl InterpreterDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        InterpreterDescriptor {
            path: path.into(),
            version: None,
            display_name: None,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// The display name, falling back to the interpreter path.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.path)
    }
}
