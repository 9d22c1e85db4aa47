//
// ignore_list.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::selection::KernelIdentity;

/// Identities of kernels that must never be suggested to the user.
///
/// Clones share the same set. Adding an identity twice, or removing one that
/// isn't there, does nothing.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    ids: Arc<RwLock<HashSet<String>>>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide a kernel by both of its identities. Empty identities are skipped.
    pub fn add(&self, kernel: &KernelIdentity) {
        let mut ids = self.ids.write().unwrap_or_else(|e| e.into_inner());
        for id in [&kernel.id, &kernel.client_id] {
            if !id.is_empty() {
                ids.insert(id.clone());
            }
        }
        log::trace!(
            "Ignoring kernel {} (client {}); {} ids ignored",
            kernel.id,
            kernel.client_id,
            ids.len()
        );
    }

    /// Stop hiding a kernel.
    pub fn remove(&self, kernel: &KernelIdentity) {
        let mut ids = self.ids.write().unwrap_or_else(|e| e.into_inner());
        ids.remove(&kernel.id);
        ids.remove(&kernel.client_id);
        log::trace!(
            "No longer ignoring kernel {} (client {}); {} ids ignored",
            kernel.id,
            kernel.client_id,
            ids.len()
        );
    }

    pub fn contains(&self, id: &str) -> bool {
        let ids = self.ids.read().unwrap_or_else(|e| e.into_inner());
        ids.contains(id)
    }

    pub fn len(&self) -> usize {
        let ids = self.ids.read().unwrap_or_else(|e| e.into_inner());
        ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
