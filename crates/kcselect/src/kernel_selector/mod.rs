//
// mod.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! Chooses the kernel that backs a notebook.
//!
//! The selector works down a chain of fallbacks: the kernel spec the notebook
//! declares, the active interpreter used as a kernel, a running remote
//! session, the kernel picker, and finally registering a new kernel spec.

mod local;
mod prompt;
mod registration;
mod remote;
mod utils;

use std::sync::Arc;
use std::time::Instant;

use kcshared::kernel_spec::KernelSpec;
use tokio::task::JoinHandle;
use url::Url;

use crate::collaborators::{
    Collaborators, ConnectionKind, ServerConnection, SessionEvent, SessionManager,
};
use crate::config::SelectorConfig;
use crate::ignore_list::IgnoreList;
use crate::messages;
use crate::selection::{ConnectionType, KernelIdentity, SelectionResult};
use crate::SelectError;

pub use utils::default_kernel_spec;

/// The kernel selector.
///
/// Must be created inside a tokio runtime: construction subscribes to the
/// session factory's restart-session notifications on a background task,
/// which runs until the selector is dropped.
pub struct KernelSelector {
    collaborators: Collaborators,
    config: SelectorConfig,
    ignore_list: IgnoreList,
    lifecycle_listener: JoinHandle<()>,
}

impl KernelSelector {
    pub fn new(collaborators: Collaborators, config: SelectorConfig) -> Self {
        let ignore_list = IgnoreList::new();
        let events = collaborators.session_factory.subscribe();

        let listener_ignore_list = ignore_list.clone();
        let lifecycle_listener = tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                match event {
                    SessionEvent::RestartSessionCreated(kernel) => {
                        listener_ignore_list.add(&kernel);
                    }
                    SessionEvent::RestartSessionUsed(kernel) => {
                        listener_ignore_list.remove(&kernel);
                    }
                }
            }
            log::trace!("Restart session notifications closed");
        });

        KernelSelector {
            collaborators,
            config,
            ignore_list,
            lifecycle_listener,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// The registry of kernels hidden from the picker.
    pub fn ignore_list(&self) -> &IgnoreList {
        &self.ignore_list
    }

    /// Hide a kernel (by both of its identities) from every suggestion list.
    pub fn add_kernel_to_ignore_list(&self, kernel: &KernelIdentity) {
        self.ignore_list.add(kernel);
    }

    /// Let a previously hidden kernel be suggested again.
    pub fn remove_kernel_from_ignore_list(&self, kernel: &KernelIdentity) {
        self.ignore_list.remove(kernel);
    }

    /// Tell the user that a kernel failed to start and offer to pick another
    /// one.
    ///
    /// Returns `None` if the user cancels or dismisses the message.
    pub async fn ask_for_local_kernel(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        kernel_spec: Option<&KernelSpec>,
    ) -> Result<Option<SelectionResult>, SelectError> {
        let display_name = kernel_spec
            .map(|spec| spec.label().to_string())
            .unwrap_or_default();

        let choice = self
            .collaborators
            .prompt
            .show_error_message(
                messages::session_start_failed(&display_name),
                vec![
                    messages::SELECT_DIFFERENT_KERNEL.to_string(),
                    messages::CANCEL.to_string(),
                ],
            )
            .await?;

        match choice.as_deref() {
            Some(messages::SELECT_DIFFERENT_KERNEL) => {
                let selection = self
                    .select_local_kernel(
                        resource,
                        connection_type,
                        Instant::now(),
                        None,
                        None,
                        Some(&display_name),
                    )
                    .await?;
                Ok(Some(selection))
            }
            _ => Ok(None),
        }
    }

    /// Let the user pick a kernel for a Jupyter connection, local or remote.
    ///
    /// Returns `None` if the connection is neither local nor a remote Jupyter
    /// server.
    pub async fn select_jupyter_kernel(
        &self,
        resource: Option<&Url>,
        connection: Option<&ServerConnection>,
        connection_type: ConnectionType,
        current_kernel_display_name: Option<&str>,
    ) -> Result<Option<SelectionResult>, SelectError> {
        let is_local = match connection.and_then(|c| c.local_launch) {
            Some(local_launch) => local_launch,
            None => self.config.is_local_launch(),
        };

        if is_local {
            let selection = self
                .select_local_kernel(
                    resource,
                    connection_type,
                    Instant::now(),
                    None,
                    None,
                    current_kernel_display_name,
                )
                .await?;
            return Ok(Some(selection));
        }

        match connection {
            Some(connection) if connection.kind == ConnectionKind::Jupyter => {
                let session = self
                    .collaborators
                    .session_factory
                    .create(connection)
                    .await?;
                let selection = self
                    .select_remote_kernel(
                        resource,
                        Instant::now(),
                        Some(session.as_ref()),
                        None,
                        current_kernel_display_name,
                    )
                    .await;
                Self::dispose_session(session).await;
                Ok(Some(selection?))
            }
            _ => Ok(None),
        }
    }

    async fn dispose_session(session: Arc<dyn SessionManager>) {
        if let Err(err) = session.dispose().await {
            log::debug!("Failed to dispose of session manager: {}", err);
        }
    }
}

impl Drop for KernelSelector {
    fn drop(&mut self) {
        self.lifecycle_listener.abort();
    }
}
