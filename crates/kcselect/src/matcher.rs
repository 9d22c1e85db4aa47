//
// matcher.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! Scores kernel specs against an interpreter and a notebook's declared
//! kernel.

use kcshared::interpreter::InterpreterDescriptor;
use kcshared::kernel_spec::KernelSpec;
use kcshared::notebook_metadata::NotebookMetadata;
use once_cell::sync::Lazy;
use regex::Regex;

/// Score for a spec whose path is the interpreter's path.
pub const PATH_MATCH_SCORE: i32 = 8;

/// Score for a spec whose name carries the interpreter's major version.
pub const VERSION_MATCH_SCORE: i32 = 4;

/// Score for a spec whose display name is the one the notebook declares.
pub const DISPLAY_NAME_MATCH_SCORE: i32 = 16;

/// The score of "nothing matched yet".
pub const NO_MATCH_SCORE: i32 = -1;

static NAME_VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D+(\d+)").unwrap());

/// The best candidate and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome<'a> {
    pub best: Option<&'a KernelSpec>,
    pub score: i32,
}

/// The version digit embedded in a kernel spec name.
///
/// Only the first digit of the first run of digits that follows a non-digit
/// counts, so "python38" yields 3 and "python10" yields 1.
pub fn name_version_digit(name: &str) -> Option<u32> {
    let captures = NAME_VERSION.captures(name)?;
    captures.get(1)?.as_str().chars().next()?.to_digit(10)
}

/// Score a single candidate. Scores are additive and independent.
pub fn score_kernel_spec(
    spec: &KernelSpec,
    interpreter: Option<&InterpreterDescriptor>,
    notebook: Option<&NotebookMetadata>,
) -> i32 {
    let mut score = 0;

    if let Some(interpreter) = interpreter {
        if let Some(path) = spec.path.as_deref() {
            if !path.is_empty() && path == interpreter.path {
                score += PATH_MATCH_SCORE;
            }
        }

        if let Some(version) = &interpreter.version {
            if name_version_digit(&spec.name) == Some(version.major) {
                score += VERSION_MATCH_SCORE;
            }
        }
    }

    if let Some(display_name) = spec.display_name.as_deref() {
        if !display_name.is_empty()
            && Some(display_name) == notebook.and_then(|n| n.declared_display_name())
        {
            score += DISPLAY_NAME_MATCH_SCORE;
        }
    }

    score
}

/// Pick the best-scoring candidate.
///
/// Ties go to the earliest candidate. Any candidate beats the initial
/// [`NO_MATCH_SCORE`], so `best` is only `None` when there are no candidates.
pub fn find_best_match<'a>(
    interpreter: Option<&InterpreterDescriptor>,
    notebook: Option<&NotebookMetadata>,
    candidates: &'a [KernelSpec],
) -> MatchOutcome<'a> {
    let mut outcome = MatchOutcome {
        best: None,
        score: NO_MATCH_SCORE,
    };

    for spec in candidates {
        let score = score_kernel_spec(spec, interpreter, notebook);
        log::trace!("Kernel spec '{}' scored {}", spec.name, score);
        if score > outcome.score {
            outcome = MatchOutcome {
                best: Some(spec),
                score,
            };
        }
    }

    outcome
}
