//
// remote.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! Selection for kernels on a remote Jupyter server.

use std::time::Instant;

use kcshared::live_kernel::LiveKernelModel;
use kcshared::notebook_metadata::NotebookMetadata;
use url::Url;

use super::utils::log_selection;
use super::KernelSelector;
use crate::cancellation::CancelToken;
use crate::collaborators::SessionManager;
use crate::matcher::find_best_match;
use crate::selection::{ConnectionType, SelectionResult};
use crate::suggestion_filter::filter_suggestions;
use crate::SelectError;

impl KernelSelector {
    /// Choose a kernel for a notebook on a remote server.
    ///
    /// A running session whose kernel is the one the notebook was last
    /// attached to always wins; otherwise the best-scoring kernel spec is
    /// used.
    pub async fn get_kernel_for_remote_connection(
        &self,
        resource: Option<&Url>,
        session: Option<&dyn SessionManager>,
        notebook_metadata: Option<&NotebookMetadata>,
        cancel: Option<&CancelToken>,
    ) -> Result<SelectionResult, SelectError> {
        let stop_watch = Instant::now();

        let (interpreter, specs, sessions) = tokio::try_join!(
            self.collaborators
                .interpreters
                .get_active_interpreter(resource),
            self.collaborators.discovery.get_kernel_specs(session, cancel),
            async {
                match session {
                    Some(session) => session.get_running_sessions().await,
                    None => Ok(Vec::new()),
                }
            },
        )?;

        if let Some(kernel_id) = notebook_metadata.and_then(|m| m.live_kernel_id()) {
            if let Some(live) = sessions.iter().find(|s| s.kernel.id == kernel_id) {
                let mut model = LiveKernelModel::from_session(live);
                if let Some(spec) = specs.iter().find(|spec| spec.name == model.name) {
                    model.display_name = spec.display_name.clone();
                    model.language = Some(spec.language.clone());
                }
                log::debug!(
                    "[select] Reattaching to kernel {} in running session {}",
                    model.id,
                    live.id
                );
                let selection = SelectionResult {
                    kernel_spec: None,
                    interpreter,
                    kernel_model: Some(model),
                };
                log_selection("remote connection", &selection, stop_watch);
                return Ok(selection);
            }
        }

        let outcome = find_best_match(interpreter.as_ref(), notebook_metadata, &specs);
        log::debug!(
            "[select] Best remote kernel spec: {} (score {})",
            outcome.best.map(|spec| spec.name.as_str()).unwrap_or("none"),
            outcome.score
        );
        let selection = SelectionResult {
            kernel_spec: outcome.best.cloned(),
            interpreter,
            kernel_model: None,
        };
        log_selection("remote connection", &selection, stop_watch);
        Ok(selection)
    }

    /// Let the user pick from the kernels on a remote server.
    pub async fn select_remote_kernel(
        &self,
        resource: Option<&Url>,
        stop_watch: Instant,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
        current_kernel_display_name: Option<&str>,
    ) -> Result<SelectionResult, SelectError> {
        let suggestions = self
            .collaborators
            .suggestions
            .remote_suggestions(resource, session, cancel)
            .await?;
        let suggestions = filter_suggestions(suggestions, &self.ignore_list);

        let selection = self
            .select_kernel(
                resource,
                ConnectionType::Jupyter,
                suggestions,
                session,
                cancel,
                current_kernel_display_name,
            )
            .await?;
        log_selection("remote picker", &selection, stop_watch);
        Ok(selection)
    }
}
