//
// suggestion_filter.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use crate::ignore_list::IgnoreList;
use crate::selection::KernelSuggestion;

/// Drop every suggestion whose live kernel is on the ignore list, keeping
/// the order of the rest.
///
/// Suggestions without a live kernel are matched by the empty identity,
/// which the ignore list never holds.
pub fn filter_suggestions(
    suggestions: Vec<KernelSuggestion>,
    ignore_list: &IgnoreList,
) -> Vec<KernelSuggestion> {
    let total = suggestions.len();
    let kept: Vec<KernelSuggestion> = suggestions
        .into_iter()
        .filter(|suggestion| {
            let model = suggestion.selection.kernel_model.as_ref();
            let id = model.map(|m| m.id.as_str()).unwrap_or("");
            let client_id = model.and_then(|m| m.client_id.as_deref());
            !ignore_list.contains(id) && !client_id.map(|c| ignore_list.contains(c)).unwrap_or(false)
        })
        .collect();

    if kept.len() != total {
        log::debug!(
            "Hid {} of {} kernel suggestions (restart sessions)",
            total - kept.len(),
            total
        );
    }
    kept
}
