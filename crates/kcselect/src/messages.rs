//
// messages.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! User-facing text.

pub const SELECT_DIFFERENT_KERNEL: &str = "Select a different Kernel";

pub const CANCEL: &str = "Cancel";

/// The placeholder of the kernel picker.
pub fn select_kernel_placeholder(current_kernel_display_name: Option<&str>) -> String {
    match current_kernel_display_name {
        Some(current) => format!("Select a Kernel (current: {})", current),
        None => String::from("Select a Kernel"),
    }
}

/// Shown when the notebook's kernel is missing and an existing kernel for
/// the active interpreter is used instead.
pub fn fallback_to_active_interpreter(not_found_display_name: &str) -> String {
    format!(
        "Couldn't find kernel '{}' that the notebook was created with. Using the current interpreter.",
        not_found_display_name
    )
}

/// Shown when the notebook's kernel is missing and a new kernel is
/// registered for the active interpreter.
pub fn fallback_to_register_active_interpreter(not_found_display_name: &str) -> String {
    format!(
        "Couldn't find kernel '{}' that the notebook was created with. Registering a new kernel using the current interpreter.",
        not_found_display_name
    )
}

/// Shown when a session could not be started with a kernel.
pub fn session_start_failed(kernel_display_name: &str) -> String {
    format!(
        "Failed to start a session for the Kernel '{}'.",
        kernel_display_name
    )
}
