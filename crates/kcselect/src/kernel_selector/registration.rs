//
// registration.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use kcshared::interpreter::InterpreterDescriptor;
use url::Url;

use super::utils::spawn_detached;
use super::KernelSelector;
use crate::cancellation::CancelToken;
use crate::collaborators::SessionManager;
use crate::messages;
use crate::selection::{ConnectionType, SelectionResult};
use crate::SelectError;

impl KernelSelector {
    /// Use an interpreter as the kernel, reusing its kernel spec when one is
    /// installed and registering a new one otherwise.
    ///
    /// When `not_found_display_name` is given (and the UI is enabled), the
    /// user is told that the notebook's own kernel was unavailable. A failed
    /// registration is returned as [`SelectError::RegistrationFailed`].
    #[allow(clippy::too_many_arguments)]
    pub async fn use_interpreter_as_kernel(
        &self,
        resource: Option<&Url>,
        interpreter: &InterpreterDescriptor,
        connection_type: ConnectionType,
        not_found_display_name: Option<&str>,
        session: Option<&dyn SessionManager>,
        disable_ui: bool,
        cancel: Option<&CancelToken>,
    ) -> Result<SelectionResult, SelectError> {
        let installed = self
            .collaborators
            .dependencies
            .are_dependencies_installed(interpreter, cancel)
            .await?;

        if installed {
            let existing = self
                .collaborators
                .discovery
                .find_spec_for_interpreter(interpreter, session, cancel)
                .await?;
            if let Some(spec) = existing {
                self.collaborators
                    .environment
                    .update_kernel_environment(Some(interpreter), &spec, cancel)
                    .await?;
                if let (Some(not_found), false) = (not_found_display_name, disable_ui) {
                    self.notify(messages::fallback_to_active_interpreter(not_found));
                }
                return Ok(SelectionResult {
                    kernel_spec: Some(spec),
                    interpreter: Some(interpreter.clone()),
                    kernel_model: None,
                });
            }
            log::debug!(
                "[select] No kernel spec for interpreter {}; registering one",
                interpreter.path
            );
        } else {
            log::debug!(
                "[select] Kernel dependencies missing for interpreter {}; registering a kernel",
                interpreter.path
            );
        }

        let spec = self
            .collaborators
            .registrar
            .register_kernel(interpreter, disable_ui, cancel)
            .await
            .map_err(|source| SelectError::RegistrationFailed {
                interpreter: interpreter.path.clone(),
                source,
            })?;
        log::info!(
            "[select] Registered kernel '{}' for interpreter {}",
            spec.name,
            interpreter.path
        );

        if let (Some(not_found), false) = (not_found_display_name, disable_ui) {
            self.notify(messages::fallback_to_register_active_interpreter(not_found));
        }

        // The new spec belongs in the picker from now on
        self.prewarm_local_suggestions(resource, connection_type, cancel);

        Ok(SelectionResult {
            kernel_spec: Some(spec),
            interpreter: Some(interpreter.clone()),
            kernel_model: None,
        })
    }

    /// Show an informational message without waiting for the user.
    fn notify(&self, message: String) {
        let prompt = self.collaborators.prompt.clone();
        spawn_detached("notification", async move {
            prompt.show_information_message(message, Vec::new()).await?;
            Ok(())
        });
    }
}
