//
// local.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! Selection for kernels launched on this machine.

use std::time::Instant;

use kcshared::notebook_metadata::{DeclaredKernelSpec, NotebookMetadata};
use url::Url;

use super::utils::{log_selection, spawn_detached};
use super::KernelSelector;
use crate::cancellation::{is_cancelled, CancelToken};
use crate::collaborators::SessionManager;
use crate::selection::{ConnectionType, KernelRef, SelectionResult};
use crate::suggestion_filter::filter_suggestions;
use crate::SelectError;

impl KernelSelector {
    /// Choose a kernel for a notebook that runs on a local connection.
    ///
    /// Always starts warming up the local suggestion list in the background,
    /// whatever the connection type.
    pub async fn get_kernel_for_local_connection(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        session: Option<&dyn SessionManager>,
        notebook_metadata: Option<&NotebookMetadata>,
        disable_ui: bool,
        cancel: Option<&CancelToken>,
    ) -> Result<SelectionResult, SelectError> {
        let stop_watch = Instant::now();
        self.prewarm_local_suggestions(resource, connection_type, cancel);

        let declared = notebook_metadata.and_then(|metadata| metadata.kernelspec.as_ref());
        let selection = match connection_type {
            ConnectionType::Jupyter => match declared {
                Some(declared) => {
                    self.select_declared_jupyter_kernel(
                        resource, declared, session, disable_ui, cancel,
                    )
                    .await?
                }
                None => {
                    self.select_undeclared_jupyter_kernel(resource, disable_ui, cancel)
                        .await?
                }
            },
            ConnectionType::Raw => self.select_raw_kernel(resource, declared, cancel).await?,
            ConnectionType::NoConnection => SelectionResult::empty(),
        };

        log_selection("local connection", &selection, stop_watch);
        Ok(selection)
    }

    /// Let the user pick from the local kernels.
    pub async fn select_local_kernel(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        stop_watch: Instant,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
        current_kernel_display_name: Option<&str>,
    ) -> Result<SelectionResult, SelectError> {
        let selection = self
            .pick_local_kernel(
                resource,
                connection_type,
                session,
                cancel,
                current_kernel_display_name,
            )
            .await?;
        log_selection("local picker", &selection, stop_watch);
        Ok(selection)
    }

    /// The local picker without the selection log; callers log the outcome.
    async fn pick_local_kernel(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
        current_kernel_display_name: Option<&str>,
    ) -> Result<SelectionResult, SelectError> {
        let suggestions = self
            .collaborators
            .suggestions
            .local_suggestions(resource, connection_type, cancel)
            .await?;
        let suggestions = filter_suggestions(suggestions, &self.ignore_list);

        self.select_kernel(
            resource,
            connection_type,
            suggestions,
            session,
            cancel,
            current_kernel_display_name,
        )
        .await
    }

    /// The notebook declares a kernel spec: use it if it's installed, else
    /// fall back to the active interpreter, else ask the user.
    async fn select_declared_jupyter_kernel(
        &self,
        resource: Option<&Url>,
        declared: &DeclaredKernelSpec,
        session: Option<&dyn SessionManager>,
        disable_ui: bool,
        cancel: Option<&CancelToken>,
    ) -> Result<SelectionResult, SelectError> {
        let spec = self
            .collaborators
            .discovery
            .find_kernel_spec(resource, Some(declared), cancel)
            .await?;

        if let Some(spec) = spec {
            let interpreter = self
                .collaborators
                .interpreters
                .find_matching_interpreter(KernelRef::Spec(&spec), cancel)
                .await?;
            self.collaborators
                .environment
                .update_kernel_environment(interpreter.as_ref(), &spec, cancel)
                .await?;
            return Ok(SelectionResult {
                kernel_spec: Some(spec),
                interpreter,
                kernel_model: None,
            });
        }

        if is_cancelled(cancel) {
            log::debug!(
                "[select] Kernel '{}' not found; selection cancelled",
                declared.name
            );
            return Ok(SelectionResult::empty());
        }

        let active = self
            .collaborators
            .interpreters
            .get_active_interpreter(resource)
            .await?;
        match active {
            Some(active) => {
                log::debug!(
                    "[select] Kernel '{}' not found; using interpreter {} instead",
                    declared.name,
                    active.path
                );
                self.use_interpreter_as_kernel(
                    resource,
                    &active,
                    ConnectionType::Jupyter,
                    declared.display_name.as_deref(),
                    session,
                    disable_ui,
                    cancel,
                )
                .await
            }
            None => {
                log::debug!(
                    "[select] Kernel '{}' not found and there is no active interpreter; asking the user",
                    declared.name
                );
                self.pick_local_kernel(resource, ConnectionType::Jupyter, session, cancel, None)
                    .await
            }
        }
    }

    /// The notebook declares no kernel: register (or reuse) one for the
    /// active interpreter. Without an active interpreter nothing is selected.
    async fn select_undeclared_jupyter_kernel(
        &self,
        resource: Option<&Url>,
        disable_ui: bool,
        cancel: Option<&CancelToken>,
    ) -> Result<SelectionResult, SelectError> {
        if is_cancelled(cancel) {
            return Ok(SelectionResult::empty());
        }

        let active = self
            .collaborators
            .interpreters
            .get_active_interpreter(resource)
            .await?;
        match active {
            Some(active) => {
                let spec = self
                    .collaborators
                    .registrar
                    .search_and_register_kernel(&active, disable_ui, cancel)
                    .await
                    .map_err(|source| SelectError::RegistrationFailed {
                        interpreter: active.path.clone(),
                        source,
                    })?;
                Ok(SelectionResult {
                    kernel_spec: spec,
                    interpreter: Some(active),
                    kernel_model: None,
                })
            }
            None => {
                log::debug!(
                    "[select] Notebook declares no kernel and there is no active interpreter"
                );
                Ok(SelectionResult::empty())
            }
        }
    }

    /// Raw kernels only use a spec found on disk; there is no fallback.
    async fn select_raw_kernel(
        &self,
        resource: Option<&Url>,
        declared: Option<&DeclaredKernelSpec>,
        cancel: Option<&CancelToken>,
    ) -> Result<SelectionResult, SelectError> {
        let spec = self
            .collaborators
            .discovery
            .find_kernel_spec(resource, declared, cancel)
            .await?;

        match spec {
            Some(spec) => {
                let interpreter = self
                    .collaborators
                    .interpreters
                    .find_matching_interpreter(KernelRef::Spec(&spec), cancel)
                    .await?;
                Ok(SelectionResult {
                    kernel_spec: Some(spec),
                    interpreter,
                    kernel_model: None,
                })
            }
            None => Ok(SelectionResult::empty()),
        }
    }

    /// Start building the local suggestion list so the picker opens quickly
    /// later.
    pub(super) fn prewarm_local_suggestions(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        cancel: Option<&CancelToken>,
    ) {
        let suggestions = self.collaborators.suggestions.clone();
        let resource = resource.cloned();
        let cancel = cancel.cloned();
        spawn_detached("suggestion warm-up", async move {
            suggestions
                .local_suggestions(resource.as_ref(), connection_type, cancel.as_ref())
                .await?;
            Ok(())
        });
    }
}
