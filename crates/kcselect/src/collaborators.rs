//
// collaborators.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! The services the kernel selector relies on but does not implement.
//!
//! Discovery, interpreter lookup, registration, remote sessions and UI prompts
//! all live elsewhere; the selector only sees them through these traits.

use std::sync::Arc;

use async_channel::Receiver;
use async_trait::async_trait;
use kcshared::interpreter::InterpreterDescriptor;
use kcshared::kernel_spec::KernelSpec;
use kcshared::live_kernel::LiveSession;
use kcshared::notebook_metadata::DeclaredKernelSpec;
use url::Url;

use crate::cancellation::CancelToken;
use crate::selection::{ConnectionType, KernelIdentity, KernelRef, KernelSuggestion};

/// Finds installed kernel specs.
#[async_trait]
pub trait KernelDiscovery: Send + Sync {
    /// Find the installed kernel spec matching a notebook's declared spec.
    async fn find_kernel_spec(
        &self,
        resource: Option<&Url>,
        declared: Option<&DeclaredKernelSpec>,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSpec>>;

    /// List every kernel spec, from the given (remote) session manager when
    /// there is one.
    async fn get_kernel_specs(
        &self,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Vec<KernelSpec>>;

    /// Find an installed kernel spec that launches the given interpreter.
    async fn find_spec_for_interpreter(
        &self,
        interpreter: &InterpreterDescriptor,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSpec>>;
}

/// Looks up interpreters.
#[async_trait]
pub trait InterpreterService: Send + Sync {
    /// Find the interpreter a kernel spec or live kernel most likely runs.
    async fn find_matching_interpreter(
        &self,
        kernel: KernelRef<'_>,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<InterpreterDescriptor>>;

    /// The interpreter currently selected for a resource.
    async fn get_active_interpreter(
        &self,
        resource: Option<&Url>,
    ) -> anyhow::Result<Option<InterpreterDescriptor>>;
}

/// Keeps a kernel spec's environment in sync with its interpreter.
#[async_trait]
pub trait KernelEnvironment: Send + Sync {
    async fn update_kernel_environment(
        &self,
        interpreter: Option<&InterpreterDescriptor>,
        spec: &KernelSpec,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<()>;
}

/// Checks whether an interpreter has the packages needed to run a kernel.
#[async_trait]
pub trait DependencyChecker: Send + Sync {
    async fn are_dependencies_installed(
        &self,
        interpreter: &InterpreterDescriptor,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<bool>;
}

/// Registers interpreters as kernel specs.
#[async_trait]
pub trait KernelRegistrar: Send + Sync {
    /// Register a new kernel spec for the interpreter.
    async fn register_kernel(
        &self,
        interpreter: &InterpreterDescriptor,
        disable_ui: bool,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<KernelSpec>;

    /// Find a kernel spec for the interpreter, registering one if none exists.
    async fn search_and_register_kernel(
        &self,
        interpreter: &InterpreterDescriptor,
        disable_ui: bool,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSpec>>;
}

/// A connection to a Jupyter server's sessions.
#[async_trait]
pub trait SessionManager: Send + Sync {
    async fn get_running_sessions(&self) -> anyhow::Result<Vec<LiveSession>>;

    /// Release the connection.
    async fn dispose(&self) -> anyhow::Result<()>;
}

/// The kind of server connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Jupyter,
    Raw,
}

/// Details of a connection to a kernel host.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConnection {
    pub kind: ConnectionKind,

    /// Whether the server was launched locally; when unknown, the configured
    /// server URI decides.
    pub local_launch: Option<bool>,

    /// The server's base URL
    pub base_url: String,
}

/// Lifecycle notifications about restart sessions.
///
/// Restart sessions are kernels started in the background so that a restart
/// can swap to them quickly; they must never show up in the kernel picker.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RestartSessionCreated(KernelIdentity),
    RestartSessionUsed(KernelIdentity),
}

/// Creates session managers and publishes restart-session notifications.
#[async_trait]
pub trait SessionManagerFactory: Send + Sync {
    async fn create(&self, connection: &ServerConnection) -> anyhow::Result<Arc<dyn SessionManager>>;

    /// Subscribe to restart-session notifications.
    ///
    /// Every call must return a fresh channel that receives every event.
    /// `async_channel` receivers are multi-consumer: clones of one receiver
    /// share its events rather than each getting a copy, so handing out
    /// clones to several selectors would split the events between them.
    fn subscribe(&self) -> Receiver<SessionEvent>;
}

/// Builds the lists of kernels to offer the user.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn local_suggestions(
        &self,
        resource: Option<&Url>,
        connection_type: ConnectionType,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Vec<KernelSuggestion>>;

    async fn remote_suggestions(
        &self,
        resource: Option<&Url>,
        session: Option<&dyn SessionManager>,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Vec<KernelSuggestion>>;
}

/// Options for the kernel picker.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickPickOptions {
    pub placeholder: String,
}

/// Renders prompts to the user.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Let the user pick one of the items. `None` if they dismissed the picker.
    async fn show_quick_pick(
        &self,
        items: Vec<KernelSuggestion>,
        options: QuickPickOptions,
        cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSuggestion>>;

    /// Show an error with buttons; returns the chosen button, if any.
    async fn show_error_message(
        &self,
        message: String,
        buttons: Vec<String>,
    ) -> anyhow::Result<Option<String>>;

    /// Show an informational message with buttons; returns the chosen
    /// button, if any.
    async fn show_information_message(
        &self,
        message: String,
        buttons: Vec<String>,
    ) -> anyhow::Result<Option<String>>;
}

/// Every collaborator the selector needs.
#[derive(Clone)]
pub struct Collaborators {
    pub discovery: Arc<dyn KernelDiscovery>,
    pub interpreters: Arc<dyn InterpreterService>,
    pub environment: Arc<dyn KernelEnvironment>,
    pub dependencies: Arc<dyn DependencyChecker>,
    pub registrar: Arc<dyn KernelRegistrar>,
    pub session_factory: Arc<dyn SessionManagerFactory>,
    pub suggestions: Arc<dyn SuggestionProvider>,
    pub prompt: Arc<dyn UserPrompt>,
}
