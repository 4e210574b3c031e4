use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::callbacks::{summary, CallbackRouter, ProjectorDialer};
use crate::connector::{self, Connector, ConnectorError};
use crate::contacts::ContactDirectory;
use crate::session::{Effect, SessionContext, SessionEvent, SessionMachine, Step};
use crate::types::{BackendEvent, CallbackReply, CallbackRequest, DialogueEvent, RecognitionEvent};
use crate::ui::{UiProjector, UiUpdate};

pub mod config;
mod consts;
mod stats;

pub use config::{Config, ConfigBuilder};
pub use stats::Stats;

pub type InputTx = mpsc::Sender<Input>;
type InputRx = mpsc::Receiver<Input>;

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("coordinator is not running")]
    NotRunning,
    #[error("coordinator input queue is full")]
    Busy,
    #[error("failed to read stats")]
    Stats,
}

impl<T> From<mpsc::error::SendError<T>> for CoordinatorError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        CoordinatorError::NotRunning
    }
}

impl<T> From<mpsc::error::TrySendError<T>> for CoordinatorError {
    fn from(e: mpsc::error::TrySendError<T>) -> Self {
        match e {
            mpsc::error::TrySendError::Full(_) => CoordinatorError::Busy,
            mpsc::error::TrySendError::Closed(_) => CoordinatorError::NotRunning,
        }
    }
}

/// A callback waiting for its reply.
#[derive(Debug)]
pub struct PendingCallback {
    request: CallbackRequest,
    reply: oneshot::Sender<CallbackReply>,
}

/// Everything the coordinator reacts to, in arrival order.
#[derive(Debug)]
pub enum Input {
    Backend(BackendEvent),
    Recognition(RecognitionEvent),
    Dialogue(DialogueEvent),
    Callback(PendingCallback),
    Connect,
    Disconnect,
    TalkPressed,
    Shutdown,
}

impl Input {
    fn name(&self) -> &'static str {
        match self {
            Input::Backend(e) => e.name(),
            Input::Recognition(e) => e.name(),
            Input::Dialogue(e) => e.name(),
            Input::Callback(_) => "callback",
            Input::Connect => "connect",
            Input::Disconnect => "disconnect",
            Input::TalkPressed => "talk_pressed",
            Input::Shutdown => "shutdown",
        }
    }
}

/// Single task owning the session machine, the callback router, the
/// connector and the projector. Inputs are handled one at a time.
pub struct Coordinator {
    config: Config,
    machine: SessionMachine,
    router: CallbackRouter,
    connector: Box<dyn Connector>,
    projector: Arc<dyn UiProjector>,
    stats: Arc<Mutex<Stats>>,
}

impl Coordinator {
    pub fn new(
        config: Config,
        router: CallbackRouter,
        connector: Box<dyn Connector>,
        projector: Arc<dyn UiProjector>,
    ) -> Self {
        Self {
            machine: SessionMachine::new(SessionContext::new(config.ptt_mode())),
            config,
            router,
            connector,
            projector,
            stats: Arc::new(Mutex::new(Stats::new())),
        }
    }

    /// Starts the actor task and returns the handle feeding it.
    pub fn spawn(self) -> (CoordinatorHandle, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(self.config.capacity());
        let handle = CoordinatorHandle::new(tx, self.config.callback_deadline(), self.stats.clone());
        let task = tokio::spawn(self.run(rx));
        (handle, task)
    }

    async fn run(mut self, mut rx: InputRx) {
        tracing::info!(endpoint = %self.config.endpoint(), language = %self.config.language(), "coordinator started");

        if let Err(e) = self.connector.set_language(self.config.language()).await {
            self.connector_failed("set_language", e);
        }
        self.projector.project(UiUpdate::TalkControl(self.machine.affordance()));

        while let Some(input) = rx.recv().await {
            tracing::trace!(input = input.name(), state = %self.machine.state(), "input");
            match input {
                Input::Shutdown => break,
                Input::Backend(event) => self.feed(event.into()).await,
                Input::Recognition(event) => self.feed(event.into()).await,
                Input::TalkPressed => self.feed(SessionEvent::TalkPressed).await,
                Input::Dialogue(event) => self.on_dialogue(event),
                Input::Callback(pending) => self.on_callback(pending),
                Input::Connect => {
                    let endpoint = self.config.endpoint();
                    if let Err(e) = self.connector.connect(&endpoint).await {
                        self.connector_failed("connect", e);
                    }
                }
                Input::Disconnect => {
                    if let Err(e) = self.connector.disconnect().await {
                        self.connector_failed("disconnect", e);
                    }
                }
            }
        }

        tracing::info!(state = %self.machine.state(), "coordinator stopped");
    }

    async fn feed(&mut self, event: SessionEvent) {
        let step = self.machine.handle(event);
        self.execute(step).await;
    }

    async fn execute(&mut self, step: Step) {
        if step.rejected.is_some() {
            self.record(Stats::record_unexpected);
        }
        for effect in step.effects {
            match effect {
                Effect::Project(update) => self.projector.project(update),
                Effect::Command(command) => {
                    if let Err(e) = connector::issue(self.connector.as_mut(), command).await {
                        self.connector_failed(command.as_str(), e);
                    }
                }
            }
        }
    }

    fn on_dialogue(&self, event: DialogueEvent) {
        tracing::debug!(event = event.name(), "dialogue event");
        let update = match event {
            DialogueEvent::ShowPopup { title, options } => UiUpdate::Popup { title, options },
            DialogueEvent::SystemUtteranceToSpeak { utterance } => UiUpdate::SystemUtterance(utterance),
            DialogueEvent::SelectedRecognition { recognition } => {
                UiUpdate::InterpretedUtterance(recognition)
            }
            DialogueEvent::ActiveDddChanged { ddd, language_code } => {
                UiUpdate::ActiveDdd { ddd, language_code }
            }
        };
        self.projector.project(update);
    }

    fn on_callback(&self, pending: PendingCallback) {
        let PendingCallback { request, reply } = pending;

        // The caller already answered fail-closed; running the handler now
        // would contradict that reply.
        if reply.is_closed() {
            tracing::warn!(kind = %request.kind(), name = request.name(), "callback abandoned before it was handled, skipping");
            self.record(Stats::record_abandoned);
            return;
        }

        let answer = if self.machine.state().is_connected() {
            self.record(Stats::record_served);
            self.router.dispatch(&request)
        } else {
            tracing::warn!(kind = %request.kind(), name = request.name(), "callback while disconnected, failing closed");
            self.record(Stats::record_rejected);
            self.projector.project(UiUpdate::CallbackSummary(format!(
                "{} (disconnected)",
                summary(&request)
            )));
            CallbackReply::fail_closed(request.kind())
        };

        if reply.send(answer).is_err() {
            tracing::warn!(kind = %request.kind(), name = request.name(), "caller stopped waiting for reply");
        }
    }

    fn connector_failed(&self, command: &str, e: ConnectorError) {
        tracing::error!(command, state = %self.machine.state(), "connector command failed: {}", e);
        self.projector.project(UiUpdate::BackendStatus(format!("Error: {e}")));
    }

    fn record(&self, update: impl FnOnce(&mut Stats)) {
        if let Ok(mut stats_guard) = self.stats.lock() {
            update(&mut stats_guard);
        } else {
            tracing::error!("failed to update stats");
        }
    }
}

/// Cloneable front of a running [`Coordinator`].
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: InputTx,
    deadline: Duration,
    stats: Arc<Mutex<Stats>>,
    runtime: tokio::runtime::Handle,
}

impl CoordinatorHandle {
    /// Must be called inside the runtime the coordinator runs on.
    fn new(tx: InputTx, deadline: Duration, stats: Arc<Mutex<Stats>>) -> Self {
        Self {
            tx,
            deadline,
            stats,
            runtime: tokio::runtime::Handle::current(),
        }
    }

    pub async fn send(&self, input: Input) -> Result<(), CoordinatorError> {
        self.tx.send(input).await?;
        Ok(())
    }

    /// Non-blocking send for threads outside the runtime.
    pub fn try_send(&self, input: Input) -> Result<(), CoordinatorError> {
        self.tx.try_send(input)?;
        Ok(())
    }

    pub async fn connect(&self) -> Result<(), CoordinatorError> {
        self.send(Input::Connect).await
    }

    pub async fn disconnect(&self) -> Result<(), CoordinatorError> {
        self.send(Input::Disconnect).await
    }

    pub async fn press_talk(&self) -> Result<(), CoordinatorError> {
        self.send(Input::TalkPressed).await
    }

    pub async fn backend(&self, event: BackendEvent) -> Result<(), CoordinatorError> {
        self.send(Input::Backend(event)).await
    }

    pub async fn recognition(&self, event: RecognitionEvent) -> Result<(), CoordinatorError> {
        self.send(Input::Recognition(event)).await
    }

    pub async fn dialogue(&self, event: DialogueEvent) -> Result<(), CoordinatorError> {
        self.send(Input::Dialogue(event)).await
    }

    pub fn try_press_talk(&self) -> Result<(), CoordinatorError> {
        self.try_send(Input::TalkPressed)
    }

    pub fn try_backend(&self, event: BackendEvent) -> Result<(), CoordinatorError> {
        self.try_send(Input::Backend(event))
    }

    pub fn try_recognition(&self, event: RecognitionEvent) -> Result<(), CoordinatorError> {
        self.try_send(Input::Recognition(event))
    }

    pub fn try_dialogue(&self, event: DialogueEvent) -> Result<(), CoordinatorError> {
        self.try_send(Input::Dialogue(event))
    }

    /// Answers one backend callback. Always yields a reply of the request's
    /// kind: the fail-closed one if the deadline passes or the coordinator
    /// is gone.
    pub async fn callback(&self, request: CallbackRequest) -> CallbackReply {
        let kind = request.kind();
        let name = request.name().to_string();
        let (reply_tx, reply_rx) = oneshot::channel();
        let pending = PendingCallback {
            request,
            reply: reply_tx,
        };

        let exchange = async {
            self.tx.send(Input::Callback(pending)).await.ok()?;
            reply_rx.await.ok()
        };

        match tokio::time::timeout(self.deadline, exchange).await {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                tracing::error!(%kind, name = %name, "coordinator gone, failing callback closed");
                CallbackReply::fail_closed(kind)
            }
            Err(_) => {
                tracing::error!(%kind, name = %name, deadline = ?self.deadline, "callback deadline missed, failing closed");
                if let Ok(mut stats_guard) = self.stats.lock() {
                    stats_guard.record_deadline_miss();
                } else {
                    tracing::error!("failed to update stats");
                }
                CallbackReply::fail_closed(kind)
            }
        }
    }

    /// [`callback`](Self::callback) for SDK threads that block until the reply
    /// is ready. Panics if called from inside an async context.
    pub fn blocking_callback(&self, request: CallbackRequest) -> CallbackReply {
        self.runtime.block_on(self.callback(request))
    }

    pub fn stats(&self) -> Result<Stats, CoordinatorError> {
        if let Ok(stats_guard) = self.stats.lock() {
            Ok(stats_guard.clone())
        } else {
            Err(CoordinatorError::Stats)
        }
    }

    /// Stops the actor after the inputs already queued.
    pub async fn shutdown(&self) -> Result<(), CoordinatorError> {
        self.send(Input::Shutdown).await
    }
}

pub fn spawn_with_config(
    config: Config,
    router: CallbackRouter,
    connector: Box<dyn Connector>,
    projector: Arc<dyn UiProjector>,
) -> (CoordinatorHandle, tokio::task::JoinHandle<()>) {
    Coordinator::new(config, router, connector, projector).spawn()
}

/// Spawns a coordinator for the example phone domain with default settings.
pub fn spawn(
    connector: Box<dyn Connector>,
    projector: Arc<dyn UiProjector>,
) -> (CoordinatorHandle, tokio::task::JoinHandle<()>) {
    let config = Config::new();
    let router = CallbackRouter::phone_domain(
        projector.clone(),
        config.unknown_actions(),
        Arc::new(ContactDirectory::example()),
        Arc::new(ProjectorDialer::new(projector.clone())),
    );
    spawn_with_config(config, router, connector, projector)
}
