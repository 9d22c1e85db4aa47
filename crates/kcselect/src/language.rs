//
// language.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

/// Languages reported as themselves when categorizing a selection; anything
/// else is reported as "unknown".
pub const KNOWN_NOTEBOOK_LANGUAGES: &[&str] = &[
    "python", "r", "julia", "c++", "c#", "f#", "scala", "haskell", "bash", "cling", "sas",
];

/// The category used for a kernel language when logging selections.
///
/// Only used for reporting; selection never depends on it.
pub fn compute_language(language: Option<&str>) -> String {
    match language {
        Some(language)
            if KNOWN_NOTEBOOK_LANGUAGES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(language)) =>
        {
            language.to_string()
        }
        _ => String::from("unknown"),
    }
}
