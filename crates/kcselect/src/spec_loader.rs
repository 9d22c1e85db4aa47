//
// spec_loader.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! Reads `kernel.json` files for the command line tool.

use std::path::{Path, PathBuf};

use kcshared::kernel_spec::KernelSpec;

use crate::SelectError;

/// The Jupyter data directory of the current user.
#[cfg(target_os = "macos")]
pub fn jupyter_dir() -> Option<PathBuf> {
    // On macOS, Jupyter doesn't follow the XDG Base Directory
    // Specification; it stores its data in `~/Library/Jupyter` instead
    // of `~/Library/Application Support`.
    let base_dir = directories::BaseDirs::new()?;
    Some(base_dir.home_dir().join("Library").join("Jupyter"))
}

/// The Jupyter data directory of the current user.
#[cfg(not(target_os = "macos"))]
pub fn jupyter_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("Jupyter", "", "")?;
    Some(dir.data_dir().to_path_buf())
}

/// The directory holding the current user's kernel specs.
pub fn user_kernels_dir() -> Option<PathBuf> {
    jupyter_dir().map(|dir| dir.join("kernels"))
}

/// Read one `kernel.json` file.
pub fn load_kernel_spec<P: AsRef<Path>>(path: P) -> Result<KernelSpec, SelectError> {
    let path = path.as_ref();
    KernelSpec::from_file(path).map_err(|err| SelectError::InvalidKernelSpec {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Read every `<name>/kernel.json` under a kernels directory, sorted by
/// kernel name.
///
/// Subdirectories without a `kernel.json` are skipped; a `kernel.json` that
/// can't be parsed is an error.
pub fn load_kernels_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<KernelSpec>, SelectError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|err| SelectError::InvalidKernelSpec {
        path: dir.display().to_string(),
        reason: err.to_string(),
    })?;

    let mut specs = Vec::new();
    for entry in entries.flatten() {
        let spec_file = entry.path().join("kernel.json");
        if !spec_file.is_file() {
            log::trace!("Skipping {}; no kernel.json", entry.path().display());
            continue;
        }
        specs.push(load_kernel_spec(&spec_file)?);
    }
    specs.sort_by(|a, b| a.name.cmp(&b.name));

    log::debug!("Loaded {} kernel specs from {}", specs.len(), dir.display());
    Ok(specs)
}
