//! Chooses which Jupyter kernel backs a notebook document.
//!
//! The entry point is [`KernelSelector`]; everything it talks to (kernel
//! discovery, interpreters, registration, remote sessions, prompts) is
//! injected through the traits in [`collaborators`].

#![allow(missing_docs)]

pub mod cancellation;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod ignore_list;
pub mod kernel_selector;
pub mod language;
pub mod matcher;
pub mod messages;
pub mod selection;
pub mod spec_loader;
pub mod suggestion_filter;

pub use error::SelectError;
pub use kernel_selector::KernelSelector;
