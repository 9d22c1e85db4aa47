//
// prompt.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use url::Url;

use super::utils::default_kernel_spec;
use super::KernelSelector;
use crate::cancellation::{is_cancelled, CancelToken};
use crate::collaborators::{QuickPickOptions, SessionManager};
use crate::messages;
use crate::selection::{ConnectionType, KernelRef, KernelSuggestion, SelectionResult};
use crate::SelectError;

impl KernelSelector {
    /// Show the kernel picker and turn the user's choice into a selection.
    ///
    /// Returns an empty selection if the user dismisses the picker or the
    /// token is already cancelled.
    pub async fn select_kernel(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        suggestions: Vec<KernelSuggestion>,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
        current_kernel_display_name: Option<&str>,
    ) -> Result<SelectionResult, SelectError> {
        if is_cancelled(cancel) {
            log::debug!("[select] Not showing the kernel picker; selection cancelled");
            return Ok(SelectionResult::empty());
        }

        let options = QuickPickOptions {
            placeholder: messages::select_kernel_placeholder(current_kernel_display_name),
        };
        let picked = self
            .collaborators
            .prompt
            .show_quick_pick(suggestions, options, cancel)
            .await?;

        let selection = match picked {
            Some(picked) => picked.selection,
            None => {
                log::debug!("[select] Kernel picker dismissed");
                return Ok(SelectionResult::empty());
            }
        };

        if let Some(interpreter) = &selection.interpreter {
            match connection_type {
                ConnectionType::Jupyter => {
                    return self
                        .use_interpreter_as_kernel(
                            resource,
                            interpreter,
                            connection_type,
                            None,
                            session,
                            false,
                            cancel,
                        )
                        .await;
                }
                ConnectionType::Raw => {
                    return Ok(SelectionResult {
                        kernel_spec: Some(default_kernel_spec(Some(interpreter))),
                        interpreter: selection.interpreter.clone(),
                        kernel_model: None,
                    });
                }
                ConnectionType::NoConnection => {}
            }
        }

        if let Some(model) = &selection.kernel_model {
            let interpreter = self
                .collaborators
                .interpreters
                .find_matching_interpreter(KernelRef::Live(model), cancel)
                .await?;
            return Ok(SelectionResult {
                kernel_spec: selection.kernel_spec.clone(),
                interpreter,
                kernel_model: selection.kernel_model.clone(),
            });
        }

        if let Some(spec) = &selection.kernel_spec {
            let interpreter = self
                .collaborators
                .interpreters
                .find_matching_interpreter(KernelRef::Spec(spec), cancel)
                .await?;
            self.collaborators
                .environment
                .update_kernel_environment(interpreter.as_ref(), spec, cancel)
                .await?;
            return Ok(SelectionResult {
                kernel_spec: selection.kernel_spec.clone(),
                interpreter,
                kernel_model: None,
            });
        }

        Ok(SelectionResult::empty())
    }
}
