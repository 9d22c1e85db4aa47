//
// utils.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::future::Future;
use std::time::Instant;

use kcshared::interpreter::InterpreterDescriptor;
use kcshared::kernel_spec::{KernelSpec, CONNECTION_FILE_PLACEHOLDER};

use crate::language::compute_language;
use crate::selection::SelectionResult;

/// The display name used when a default spec has no interpreter to name it
/// after.
const DEFAULT_DISPLAY_NAME: &str = "Python 3";

/// A kernel spec that launches `ipykernel` with the given interpreter.
///
/// Used for raw connections, where the kernel is launched directly and does
/// not need a registered spec.
pub fn default_kernel_spec(interpreter: Option<&InterpreterDescriptor>) -> KernelSpec {
    let display_name = interpreter
        .and_then(|i| i.display_name.clone())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
    let executable = interpreter
        .map(|i| i.path.clone())
        .unwrap_or_else(|| String::from("python"));

    let mut spec = KernelSpec::new("python3", "python");
    spec.display_name = Some(display_name);
    spec.argv = vec![
        executable.clone(),
        String::from("-m"),
        String::from("ipykernel_launcher"),
        String::from("-f"),
        CONNECTION_FILE_PLACEHOLDER.to_string(),
    ];
    spec.path = Some(executable);
    spec
}

/// Run a best-effort task in the background. Its failure is logged and
/// otherwise ignored; the caller never waits for it.
pub(super) fn spawn_detached<F>(what: &'static str, task: F)
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = task.await {
            log::debug!("[select] Background {} failed: {}", what, err);
        }
    });
}

/// Record how a selection turned out.
pub(super) fn log_selection(flow: &str, selection: &SelectionResult, stop_watch: Instant) {
    let label = selection
        .kernel_model
        .as_ref()
        .map(|model| model.label().to_string())
        .or_else(|| selection.kernel_spec.as_ref().map(|s| s.label().to_string()))
        .or_else(|| selection.interpreter.as_ref().map(|i| i.label().to_string()));

    match label {
        Some(label) => log::info!(
            "[select] {} selected '{}' (language: {}) in {} ms",
            flow,
            label,
            compute_language(selection.language()),
            stop_watch.elapsed().as_millis()
        ),
        None => log::info!(
            "[select] {} made no selection after {} ms",
            flow,
            stop_watch.elapsed().as_millis()
        ),
    }
}
