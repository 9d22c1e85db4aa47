//
// mod.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! Scriptable stand-ins for the selector's collaborators.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use chrono::Utc;
use kcselect::cancellation::CancelToken;
use kcselect::collaborators::{
    Collaborators, DependencyChecker, InterpreterService, KernelDiscovery, KernelEnvironment,
    KernelRegistrar, QuickPickOptions, ServerConnection, SessionEvent, SessionManager,
    SessionManagerFactory, SuggestionProvider, UserPrompt,
};
use kcselect::config::SelectorConfig;
use kcselect::selection::{ConnectionType, KernelRef, KernelSuggestion};
use kcselect::KernelSelector;
use kcshared::interpreter::{InterpreterDescriptor, Version};
use kcshared::kernel_spec::KernelSpec;
use kcshared::live_kernel::{LiveKernel, LiveKernelModel, LiveSession};
use kcshared::notebook_metadata::{DeclaredKernelSpec, NotebookMetadata};
use url::Url;

/// What the fakes answer.
#[derive(Default)]
pub struct Script {
    /// Answer to `find_kernel_spec`
    pub found_spec: Option<KernelSpec>,
    /// Answer to `get_kernel_specs`
    pub kernel_specs: Vec<KernelSpec>,
    /// Answer to `find_spec_for_interpreter`
    pub spec_for_interpreter: Option<KernelSpec>,
    /// Answer to `find_matching_interpreter`
    pub matching_interpreter: Option<InterpreterDescriptor>,
    /// Answer to `get_active_interpreter`
    pub active_interpreter: Option<InterpreterDescriptor>,
    /// Answer to `are_dependencies_installed`
    pub dependencies_installed: bool,
    /// Answer to `register_kernel`; `None` makes registration fail
    pub registered_spec: Option<KernelSpec>,
    /// Answer to `search_and_register_kernel`
    pub searched_spec: Option<KernelSpec>,
    /// Sessions reported by session managers the factory creates
    pub running_sessions: Vec<LiveSession>,
    /// Answer to `local_suggestions`
    pub local_suggestions: Vec<KernelSuggestion>,
    /// Answer to `remote_suggestions`
    pub remote_suggestions: Vec<KernelSuggestion>,
    /// Label of the item the user picks; `None` dismisses the picker
    pub pick_label: Option<String>,
    /// Button the user clicks on an error message
    pub error_choice: Option<String>,
    /// Make `local_suggestions` fail
    pub fail_local_suggestions: bool,
}

/// What the fakes were asked.
#[derive(Default, Debug)]
pub struct Calls {
    pub find_kernel_spec: usize,
    pub get_kernel_specs: usize,
    pub find_spec_for_interpreter: usize,
    pub find_matching_interpreter: usize,
    pub get_active_interpreter: usize,
    pub dependency_checks: usize,
    pub register_kernel: usize,
    pub search_and_register_kernel: usize,
    pub environment_updates: Vec<String>,
    pub local_suggestions: usize,
    pub remote_suggestions: usize,
    pub quick_picks: Vec<(Vec<String>, String)>,
    pub error_messages: Vec<(String, Vec<String>)>,
    pub info_messages: Vec<String>,
    pub sessions_created: usize,
}

pub struct Fake {
    pub script: Mutex<Script>,
    pub calls: Mutex<Calls>,
    subscribers: Mutex<Vec<Sender<SessionEvent>>>,
    pub created_sessions: Mutex<Vec<Arc<FakeSessionManager>>>,
}

impl Fake {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Fake {
            script: Mutex::new(script),
            calls: Mutex::new(Calls::default()),
            subscribers: Mutex::new(Vec::new()),
            created_sessions: Mutex::new(Vec::new()),
        })
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            discovery: self.clone(),
            interpreters: self.clone(),
            environment: self.clone(),
            dependencies: self.clone(),
            registrar: self.clone(),
            session_factory: self.clone(),
            suggestions: self.clone(),
            prompt: self.clone(),
        }
    }

    pub fn selector(self: &Arc<Self>) -> KernelSelector {
        KernelSelector::new(self.collaborators(), SelectorConfig::default())
    }

    pub fn selector_with_config(self: &Arc<Self>, config: SelectorConfig) -> KernelSelector {
        KernelSelector::new(self.collaborators(), config)
    }

    pub fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }

    /// Deliver a restart-session event to every subscriber.
    pub async fn send_event(&self, event: SessionEvent) {
        let subscribers = self.subscribers.lock().unwrap().clone();
        for subscriber in subscribers {
            // A dropped selector closes its end
            let _ = subscriber.send(event.clone()).await;
        }
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }
}

#[async_trait]
impl KernelDiscovery for Fake {
    async fn find_kernel_spec(
        &self,
        _resource: Option<&Url>,
        _declared: Option<&DeclaredKernelSpec>,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSpec>> {
        self.calls().find_kernel_spec += 1;
        Ok(self.script().found_spec.clone())
    }

    async fn get_kernel_specs(
        &self,
        _session: Option<&dyn SessionManager>,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Vec<KernelSpec>> {
        self.calls().get_kernel_specs += 1;
        Ok(self.script().kernel_specs.clone())
    }

    async fn find_spec_for_interpreter(
        &self,
        _interpreter: &InterpreterDescriptor,
        _session: Option<&dyn SessionManager>,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSpec>> {
        self.calls().find_spec_for_interpreter += 1;
        Ok(self.script().spec_for_interpreter.clone())
    }
}

#[async_trait]
impl InterpreterService for Fake {
    async fn find_matching_interpreter(
        &self,
        _kernel: KernelRef<'_>,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<InterpreterDescriptor>> {
        self.calls().find_matching_interpreter += 1;
        Ok(self.script().matching_interpreter.clone())
    }

    async fn get_active_interpreter(
        &self,
        _resource: Option<&Url>,
    ) -> anyhow::Result<Option<InterpreterDescriptor>> {
        self.calls().get_active_interpreter += 1;
        Ok(self.script().active_interpreter.clone())
    }
}

#[async_trait]
impl KernelEnvironment for Fake {
    async fn update_kernel_environment(
        &self,
        _interpreter: Option<&InterpreterDescriptor>,
        spec: &KernelSpec,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<()> {
        self.calls().environment_updates.push(spec.name.clone());
        Ok(())
    }
}

#[async_trait]
impl DependencyChecker for Fake {
    async fn are_dependencies_installed(
        &self,
        _interpreter: &InterpreterDescriptor,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<bool> {
        self.calls().dependency_checks += 1;
        Ok(self.script().dependencies_installed)
    }
}

#[async_trait]
impl KernelRegistrar for Fake {
    async fn register_kernel(
        &self,
        interpreter: &InterpreterDescriptor,
        _disable_ui: bool,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<KernelSpec> {
        self.calls().register_kernel += 1;
        match self.script().registered_spec.clone() {
            Some(spec) => Ok(spec),
            None => Err(anyhow::anyhow!(
                "ipykernel could not be installed into {}",
                interpreter.path
            )),
        }
    }

    async fn search_and_register_kernel(
        &self,
        _interpreter: &InterpreterDescriptor,
        _disable_ui: bool,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSpec>> {
        self.calls().search_and_register_kernel += 1;
        Ok(self.script().searched_spec.clone())
    }
}

#[async_trait]
impl SessionManagerFactory for Fake {
    async fn create(
        &self,
        _connection: &ServerConnection,
    ) -> anyhow::Result<Arc<dyn SessionManager>> {
        self.calls().sessions_created += 1;
        let session = Arc::new(FakeSessionManager::new(
            self.script().running_sessions.clone(),
        ));
        self.created_sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }
}

#[async_trait]
impl SuggestionProvider for Fake {
    async fn local_suggestions(
        &self,
        _resource: Option<&Url>,
        _connection_type: ConnectionType,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Vec<KernelSuggestion>> {
        self.calls().local_suggestions += 1;
        let script = self.script();
        if script.fail_local_suggestions {
            return Err(anyhow::anyhow!("kernel finder exploded"));
        }
        Ok(script.local_suggestions.clone())
    }

    async fn remote_suggestions(
        &self,
        _resource: Option<&Url>,
        _session: Option<&dyn SessionManager>,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Vec<KernelSuggestion>> {
        self.calls().remote_suggestions += 1;
        Ok(self.script().remote_suggestions.clone())
    }
}

#[async_trait]
impl UserPrompt for Fake {
    async fn show_quick_pick(
        &self,
        items: Vec<KernelSuggestion>,
        options: QuickPickOptions,
        _cancel: Option<&CancelToken>,
    ) -> anyhow::Result<Option<KernelSuggestion>> {
        let labels = items.iter().map(|item| item.label.clone()).collect();
        self.calls().quick_picks.push((labels, options.placeholder));
        let pick_label = self.script().pick_label.clone();
        Ok(pick_label.and_then(|label| items.into_iter().find(|item| item.label == label)))
    }

    async fn show_error_message(
        &self,
        message: String,
        buttons: Vec<String>,
    ) -> anyhow::Result<Option<String>> {
        self.calls().error_messages.push((message, buttons));
        Ok(self.script().error_choice.clone())
    }

    async fn show_information_message(
        &self,
        message: String,
        _buttons: Vec<String>,
    ) -> anyhow::Result<Option<String>> {
        self.calls().info_messages.push(message);
        Ok(None)
    }
}

/// A session manager reporting a fixed list of sessions.
pub struct FakeSessionManager {
    pub sessions: Vec<LiveSession>,
    pub disposed: Mutex<bool>,
}

impl FakeSessionManager {
    pub fn new(sessions: Vec<LiveSession>) -> Self {
        FakeSessionManager {
            sessions,
            disposed: Mutex::new(false),
        }
    }
}

#[async_trait]
impl SessionManager for FakeSessionManager {
    async fn get_running_sessions(&self) -> anyhow::Result<Vec<LiveSession>> {
        Ok(self.sessions.clone())
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        *self.disposed.lock().unwrap() = true;
        Ok(())
    }
}

/// A session manager that can't reach its server.
pub struct BrokenSessionManager;

#[async_trait]
impl SessionManager for BrokenSessionManager {
    async fn get_running_sessions(&self) -> anyhow::Result<Vec<LiveSession>> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn spec(name: &str, display_name: &str, path: &str) -> KernelSpec {
    let mut spec = KernelSpec::new(name, "python");
    if !display_name.is_empty() {
        spec.display_name = Some(display_name.to_string());
    }
    if !path.is_empty() {
        spec.path = Some(path.to_string());
    }
    spec
}

pub fn interpreter(path: &str, major: u32, minor: u32) -> InterpreterDescriptor {
    InterpreterDescriptor::new(path)
        .with_version(Version::new(major, minor))
        .with_display_name(format!("Python {}.{}", major, minor))
}

pub fn declared(name: &str, display_name: &str) -> NotebookMetadata {
    NotebookMetadata {
        kernelspec: Some(DeclaredKernelSpec {
            name: name.to_string(),
            display_name: Some(display_name.to_string()),
            language: Some("python".to_string()),
            id: None,
        }),
        language_info: None,
    }
}

pub fn live_session(session_id: &str, kernel_id: &str, kernel_name: &str) -> LiveSession {
    LiveSession {
        id: session_id.to_string(),
        path: format!("{}.ipynb", session_id),
        name: session_id.to_string(),
        session_type: "notebook".to_string(),
        kernel: LiveKernel {
            id: kernel_id.to_string(),
            name: kernel_name.to_string(),
            last_activity: Some("2025-03-01T12:30:00Z".to_string()),
            connections: Some(serde_json::json!(2)),
            execution_state: Some("idle".to_string()),
        },
    }
}

pub fn live_model(id: &str, client_id: Option<&str>) -> LiveKernelModel {
    LiveKernelModel {
        id: id.to_string(),
        client_id: client_id.map(|c| c.to_string()),
        name: "python3".to_string(),
        display_name: Some(format!("Kernel {}", id)),
        language: Some("python".to_string()),
        last_activity_time: Utc::now(),
        number_of_connections: 1,
        session: None,
    }
}

/// Poll until `condition` holds, giving detached tasks a chance to run.
pub async fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

pub fn notebook_url() -> Url {
    Url::parse("file:///home/user/analysis.ipynb").unwrap()
}
