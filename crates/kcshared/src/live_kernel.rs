//
// live_kernel.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kernel of a running session, as reported by a Jupyter server's
/// sessions API.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveKernel {
    /// The kernel ID
    pub id: String,

    /// The kernel spec name the kernel was started from
    pub name: String,

    /// The last time the kernel was active, as an ISO 8601 timestamp
    pub last_activity: Option<String>,

    /// The number of clients connected to the kernel. Servers report this as
    /// a number, but some report it as a string.
    pub connections: Option<Value>,

    /// The kernel's execution state ("idle", "busy", ...)
    pub execution_state: Option<String>,
}

/// A running session on a Jupyter server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSession {
    /// The session ID
    pub id: String,

    /// The path of the document the session belongs to
    #[serde(default)]
    pub path: String,

    /// The session name
    #[serde(default)]
    pub name: String,

    /// The session type (e.g. "notebook")
    #[serde(default, rename = "type")]
    pub session_type: String,

    /// The kernel backing the session
    pub kernel: LiveKernel,
}

/// A reference to the session that owns a live kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSessionRef {
    pub id: String,
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub session_type: String,
}

/// A running kernel, viewed as a kernel spec enriched with session state.
///
/// Becomes stale once the owning session ends; it is a snapshot, not a
/// handle.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveKernelModel {
    /// The stable kernel ID
    pub id: String,

    /// The transient ID of the client connection, when known
    pub client_id: Option<String>,

    /// The kernel spec name
    pub name: String,

    /// The display name of the kernel spec, when known
    pub display_name: Option<String>,

    /// The kernel's language, when known
    pub language: Option<String>,

    /// When the kernel was last active
    pub last_activity_time: DateTime<Utc>,

    /// How many clients are connected to the kernel
    pub number_of_connections: u32,

    /// The session that owns the kernel
    pub session: Option<LiveSessionRef>,
}

impl LiveKernelModel {
    /// Wrap the kernel of a running session.
    ///
    /// The last activity time falls back to the current time when the server
    /// does not report one (or reports one that can't be parsed), and the
    /// connection count falls back to 0.
    pub fn from_session(session: &LiveSession) -> Self {
        let kernel = &session.kernel;
        let last_activity_time = match kernel.last_activity.as_deref() {
            Some(timestamp) => match DateTime::parse_from_rfc3339(timestamp) {
                Ok(time) => time.with_timezone(&Utc),
                Err(err) => {
                    log::debug!(
                        "[kernel {}] Ignoring unparsable last activity time '{}': {}",
                        kernel.id,
                        timestamp,
                        err
                    );
                    Utc::now()
                }
            },
            None => Utc::now(),
        };

        LiveKernelModel {
            id: kernel.id.clone(),
            client_id: None,
            name: kernel.name.clone(),
            display_name: None,
            language: None,
            last_activity_time,
            number_of_connections: parse_connection_count(kernel.connections.as_ref()),
            session: Some(LiveSessionRef {
                id: session.id.clone(),
                path: session.path.clone(),
                name: session.name.clone(),
                session_type: session.session_type.clone(),
            }),
        }
    }

    /// The name to show the user.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display_name) if !display_name.is_empty() => display_name,
            _ => &self.name,
        }
    }
}

/// Parse a reported connection count.
///
/// Accepts numbers and strings; strings are read up to the first non-digit
/// (so "3 clients" is 3). Anything else, including negative counts, is 0.
pub fn parse_connection_count(value: Option<&Value>) -> u32 {
    let text = match value {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text.clone(),
        _ => return 0,
    };
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().unwrap_or(0)
}
