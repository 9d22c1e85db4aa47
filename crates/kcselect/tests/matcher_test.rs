//
// matcher_test.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//

//! Tests for kernel spec scoring

#[path = "common/mod.rs"]
mod common;

use common::{declared, interpreter, spec};
use kcselect::matcher::{
    find_best_match, name_version_digit, score_kernel_spec, DISPLAY_NAME_MATCH_SCORE,
    NO_MATCH_SCORE, PATH_MATCH_SCORE, VERSION_MATCH_SCORE,
};
use kcshared::interpreter::InterpreterDescriptor;

#[test]
fn test_path_match_scores_eight() {
    let python = InterpreterDescriptor::new("/usr/bin/python3");
    let candidate = spec("custom", "", "/usr/bin/python3");
    assert_eq!(score_kernel_spec(&candidate, Some(&python), None), PATH_MATCH_SCORE);
    assert_eq!(PATH_MATCH_SCORE, 8);

    // Path comparison is exact
    let other = spec("custom", "", "/usr/bin/python3/");
    assert_eq!(score_kernel_spec(&other, Some(&python), None), 0);
}

#[test]
fn test_empty_path_never_matches() {
    let python = InterpreterDescriptor::new("");
    let candidate = spec("custom", "", "");
    assert_eq!(score_kernel_spec(&candidate, Some(&python), None), 0);
}

#[test]
fn test_version_match_scores_four() {
    let python = interpreter("/opt/python", 3, 11);
    let candidate = spec("python3", "", "");
    assert_eq!(
        score_kernel_spec(&candidate, Some(&python), None),
        VERSION_MATCH_SCORE
    );
    assert_eq!(VERSION_MATCH_SCORE, 4);

    let candidate = spec("python2", "", "");
    assert_eq!(score_kernel_spec(&candidate, Some(&python), None), 0);
}

#[test]
fn test_version_match_uses_first_digit_only() {
    assert_eq!(name_version_digit("python38"), Some(3));
    assert_eq!(name_version_digit("python3"), Some(3));
    assert_eq!(name_version_digit("python10"), Some(1));
    assert_eq!(name_version_digit("py3-kernel2"), Some(3));
    assert_eq!(name_version_digit("python"), None);

    // A name that starts with digits needs a non-digit before the run
    assert_eq!(name_version_digit("38"), None);

    // A major version of 10 is compared against the single digit '1'
    let python10 = interpreter("/opt/python10", 10, 0);
    assert_eq!(score_kernel_spec(&spec("python10", "", ""), Some(&python10), None), 0);
    let python1 = interpreter("/opt/python1", 1, 0);
    assert_eq!(
        score_kernel_spec(&spec("python10", "", ""), Some(&python1), None),
        VERSION_MATCH_SCORE
    );
}

#[test]
fn test_version_requires_interpreter_version() {
    let python = InterpreterDescriptor::new("/opt/python");
    assert_eq!(score_kernel_spec(&spec("python3", "", ""), Some(&python), None), 0);
}

#[test]
fn test_display_name_match_scores_sixteen() {
    let notebook = declared("python3", "Py3");
    let candidate = spec("anything", "Py3", "");
    assert_eq!(
        score_kernel_spec(&candidate, None, Some(&notebook)),
        DISPLAY_NAME_MATCH_SCORE
    );
    assert_eq!(DISPLAY_NAME_MATCH_SCORE, 16);

    // Comparison is case-sensitive
    let candidate = spec("anything", "py3", "");
    assert_eq!(score_kernel_spec(&candidate, None, Some(&notebook)), 0);
}

#[test]
fn test_empty_display_name_never_matches() {
    let notebook = declared("python3", "");
    let mut candidate = spec("anything", "", "");
    candidate.display_name = Some(String::new());
    assert_eq!(score_kernel_spec(&candidate, None, Some(&notebook)), 0);
}

#[test]
fn test_scores_are_additive() {
    let python = interpreter("/usr/bin/python3.9", 3, 9);
    let notebook = declared("python3", "Python 3.9");
    let candidate = spec("python3", "Python 3.9", "/usr/bin/python3.9");
    assert_eq!(score_kernel_spec(&candidate, Some(&python), Some(&notebook)), 28);
}

#[test]
fn test_display_name_beats_path_and_version() {
    let python = interpreter("/usr/bin/python3.9", 3, 9);
    let notebook = declared("py", "Py3");
    let a = spec("python38", "", "/usr/bin/python3.9");
    let b = spec("other", "Py3", "");

    assert_eq!(score_kernel_spec(&a, Some(&python), Some(&notebook)), 12);
    assert_eq!(score_kernel_spec(&b, Some(&python), Some(&notebook)), 16);

    let candidates = vec![a, b];
    let outcome = find_best_match(Some(&python), Some(&notebook), &candidates);
    assert_eq!(outcome.best.unwrap().name, "other");
    assert_eq!(outcome.score, 16);
}

#[test]
fn test_ties_keep_the_first_candidate() {
    let python = interpreter("/opt/python", 3, 12);
    let candidates = vec![
        spec("first3", "", ""),
        spec("second3", "", ""),
        spec("third3", "", ""),
    ];
    let outcome = find_best_match(Some(&python), None, &candidates);
    assert_eq!(outcome.best.unwrap().name, "first3");
    assert_eq!(outcome.score, VERSION_MATCH_SCORE);
}

#[test]
fn test_zero_score_still_beats_no_match() {
    let candidates = vec![spec("r", "R", ""), spec("julia", "Julia", "")];
    let outcome = find_best_match(None, None, &candidates);
    assert_eq!(outcome.best.unwrap().name, "r");
    assert_eq!(outcome.score, 0);
}

#[test]
fn test_no_candidates_is_no_match() {
    let python = interpreter("/opt/python", 3, 12);
    let outcome = find_best_match(Some(&python), None, &[]);
    assert!(outcome.best.is_none());
    assert_eq!(outcome.score, NO_MATCH_SCORE);
}

#[test]
fn test_strictly_highest_score_wins() {
    let python = interpreter("/usr/bin/python3", 3, 10);
    let notebook = declared("python3", "Python 3 (ipykernel)");
    let candidates = vec![
        spec("python2", "Python 2", "/usr/bin/python2"),
        spec("python3", "", "/usr/bin/python3"),
        spec("ir", "R", ""),
        spec("python3-user", "Python 3 (ipykernel)", "/usr/bin/python3"),
    ];

    let outcome = find_best_match(Some(&python), Some(&notebook), &candidates);
    let scores: Vec<i32> = candidates
        .iter()
        .map(|c| score_kernel_spec(c, Some(&python), Some(&notebook)))
        .collect();
    assert_eq!(scores, vec![0, 12, 0, 28]);
    assert_eq!(outcome.best.unwrap().name, "python3-user");
    assert_eq!(outcome.score, 28);
}
