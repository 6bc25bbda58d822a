//! Session adapter: owns the lifecycle of one realtime voice session.
//!
//! The adapter translates vendor session events into application-level
//! observer callbacks and exposes a small imperative control surface to
//! UI code. At most one vendor session is active per adapter; the
//! session handle is owned exclusively by the adapter and reachable
//! only through the operations below.

use crate::agent::{AgentDefinition, OutputGuardrail};
use crate::codec::Codec;
use crate::credentials::CredentialProvider;
use crate::error::AdapterError;
use crate::events::{
    INPUT_TRANSCRIPTION_COMPLETED, RESPONSE_TRANSCRIPT_DELTA, RESPONSE_TRANSCRIPT_DONE,
    SessionObserver, VendorEvent, handoff_destination,
};
use crate::status::SessionStatus;
use crate::vendor::{
    AudioConstraints, MediaEnvironment, REALTIME_MODEL, SessionFactory, SessionSettings,
    TRANSCRIPTION_MODEL, VendorSession,
};
use anyhow::anyhow;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Inputs for [`SessionAdapter::connect`].
pub struct ConnectOptions {
    /// Resolves the short-lived credential for this session.
    pub credentials: Arc<dyn CredentialProvider>,
    /// Agent definitions; the first element is the root agent.
    pub initial_agents: Vec<AgentDefinition>,
    /// Identifier of the audio output target, when the UI has one.
    pub audio_output: Option<String>,
    /// Opaque key/value context passed through to the session unmodified.
    pub extra_context: Map<String, Value>,
    /// Validation functions applied to agent output. Opaque here.
    pub output_guardrails: Vec<OutputGuardrail>,
}

impl ConnectOptions {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        initial_agents: Vec<AgentDefinition>,
    ) -> Self {
        Self {
            credentials,
            initial_agents,
            audio_output: None,
            extra_context: Map::new(),
            output_guardrails: Vec::new(),
        }
    }
}

struct ActiveSession {
    session: Box<dyn VendorSession>,
    pump: JoinHandle<()>,
}

/// Manages exactly one realtime voice session's lifecycle.
///
/// All operations run on the owner's task; suspension happens only at
/// the explicit async boundaries (permission prompt, credential fetch,
/// transport open/close). The session mutex is held across the whole
/// of `connect`, so no state permits a concurrent second `CONNECTING`
/// and a `disconnect` issued mid-connect waits for it to settle.
pub struct SessionAdapter {
    env: Arc<dyn MediaEnvironment>,
    factory: Arc<dyn SessionFactory>,
    observer: Arc<dyn SessionObserver>,
    codec: Codec,
    status_tx: watch::Sender<SessionStatus>,
    active: Mutex<Option<ActiveSession>>,
}

impl SessionAdapter {
    pub fn new(
        env: Arc<dyn MediaEnvironment>,
        factory: Arc<dyn SessionFactory>,
        observer: Arc<dyn SessionObserver>,
        codec: Codec,
    ) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Disconnected);
        Self {
            env,
            factory,
            observer,
            codec,
            status_tx,
            active: Mutex::new(None),
        }
    }

    /// Current connection status.
    pub fn status(&self) -> SessionStatus {
        *self.status_tx.borrow()
    }

    /// Read-only status subscription for UI code.
    pub fn watch_status(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    fn set_status(&self, status: SessionStatus) {
        self.status_tx.send_replace(status);
        self.observer.on_connection_change(status);
    }

    /// Opens a realtime session. A no-op if one is already active.
    ///
    /// On any failure the status rolls back to `DISCONNECTED` and the
    /// error is returned to the caller; there is no retry. After a
    /// successful return exactly one session handle exists and the
    /// status is `CONNECTED`.
    pub async fn connect(&self, options: ConnectOptions) -> Result<(), AdapterError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Ok(());
        }

        self.set_status(SessionStatus::Connecting);

        if !self.env.supports_realtime() {
            self.set_status(SessionStatus::Disconnected);
            return Err(AdapterError::Capability);
        }

        // The probe stream only confirms the permission grant; it is
        // released immediately and never held past this point.
        match self.env.request_microphone(AudioConstraints::voice()).await {
            Ok(mut stream) => stream.stop_all_tracks(),
            Err(cause) => {
                self.set_status(SessionStatus::Disconnected);
                return Err(AdapterError::Permission(cause));
            }
        }

        let key = match options.credentials.ephemeral_key().await {
            Ok(key) => key,
            Err(e) => {
                self.set_status(SessionStatus::Disconnected);
                return Err(AdapterError::Credential(e));
            }
        };

        let Some(root_agent) = options.initial_agents.into_iter().next() else {
            self.set_status(SessionStatus::Disconnected);
            return Err(AdapterError::Transport(anyhow!("no initial agent supplied")));
        };

        let audio_format = self.codec.audio_format();
        let settings = SessionSettings {
            agent: root_agent,
            model: REALTIME_MODEL.into(),
            input_audio_format: audio_format,
            output_audio_format: audio_format,
            transcription_model: TRANSCRIPTION_MODEL.into(),
            preferred_codec: self.codec,
            audio_output: options.audio_output,
            output_guardrails: options.output_guardrails,
            extra_context: options.extra_context,
        };

        let (session, events) = match self.factory.create(settings) {
            Ok(pair) => pair,
            Err(e) => {
                self.set_status(SessionStatus::Disconnected);
                return Err(AdapterError::Transport(e));
            }
        };

        if let Err(e) = session.connect(&key).await {
            self.set_status(SessionStatus::Disconnected);
            return Err(AdapterError::Transport(e));
        }

        let pump = tokio::spawn(pump_events(events, self.observer.clone()));
        *active = Some(ActiveSession { session, pump });
        self.set_status(SessionStatus::Connected);
        info!(codec = self.codec.name(), "realtime session connected");
        Ok(())
    }

    /// Closes the active session, if any. Idempotent and infallible.
    pub async fn disconnect(&self) {
        let mut active = self.active.lock().await;
        if let Some(active) = active.take() {
            active.session.close().await;
            active.pump.abort();
            info!("realtime session closed");
        }
        self.set_status(SessionStatus::Disconnected);
    }

    /// Forwards a user text message into the active session.
    pub async fn send_user_text(&self, text: &str) -> Result<(), AdapterError> {
        let active = self.active.lock().await;
        let Some(active) = active.as_ref() else {
            return Err(AdapterError::NotConnected);
        };
        active
            .session
            .send_message(text)
            .await
            .map_err(AdapterError::Transport)
    }

    /// Forwards an opaque event to the transport layer verbatim.
    /// A silent no-op without an active session.
    pub async fn send_event(&self, event: Value) {
        let active = self.active.lock().await;
        if let Some(active) = active.as_ref() {
            send_raw(active.session.as_ref(), event).await;
        }
    }

    /// Sets the local audio-send mute state. A no-op without a session.
    pub async fn mute(&self, muted: bool) {
        let active = self.active.lock().await;
        if let Some(active) = active.as_ref() {
            active.session.mute(muted).await;
        }
    }

    /// Manual turn-taking: discards buffered, uncommitted input audio
    /// so the upcoming press starts from a clean buffer.
    pub async fn push_to_talk_start(&self) {
        let active = self.active.lock().await;
        if let Some(active) = active.as_ref() {
            let session = active.session.as_ref();
            send_raw(session, json!({ "type": "input_audio_buffer.clear" })).await;
        }
    }

    /// Manual turn-taking: commits the input buffer and requests a
    /// response.
    pub async fn push_to_talk_stop(&self) {
        let active = self.active.lock().await;
        if let Some(active) = active.as_ref() {
            let session = active.session.as_ref();
            send_raw(session, json!({ "type": "input_audio_buffer.commit" })).await;
            send_raw(session, json!({ "type": "response.create" })).await;
        }
    }

    /// Stops any in-progress agent response immediately (barge-in).
    /// Safe to call regardless of connection state.
    pub async fn interrupt(&self) {
        let active = self.active.lock().await;
        if let Some(active) = active.as_ref() {
            active.session.interrupt().await;
        }
    }
}

/// Forwards one raw transport event. The adapter does not log these
/// sends itself; callers that want a client-side event trail push to
/// their own sink. Send failures on these best-effort controls are
/// logged, not surfaced.
async fn send_raw(session: &dyn VendorSession, event: Value) {
    let name = event
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_owned();
    if let Err(e) = session.send_raw(event).await {
        warn!(event = %name, error = %e, "failed to send transport event");
    }
}

/// Drains the session's event queue and forwards each event to its
/// sink, exactly once, in arrival order.
async fn pump_events(mut events: mpsc::Receiver<VendorEvent>, observer: Arc<dyn SessionObserver>) {
    while let Some(event) = events.recv().await {
        match event {
            VendorEvent::Error(message) => {
                observer.log_server_event(&json!({ "type": "error", "message": message }));
            }
            VendorEvent::AgentHandoff { history } => match handoff_destination(&history) {
                Some(name) => observer.on_agent_handoff(name),
                None => warn!("handoff event without transfer marker; skipping"),
            },
            VendorEvent::ToolStart(event) => observer.on_tool_start(&event),
            VendorEvent::ToolEnd(event) => observer.on_tool_end(&event),
            VendorEvent::HistoryUpdated(history) => observer.on_history_updated(&history),
            VendorEvent::HistoryAdded(item) => observer.on_history_added(&item),
            VendorEvent::GuardrailTripped(event) => observer.on_guardrail_tripped(&event),
            VendorEvent::Transport(raw) => route_transport_event(&raw, observer.as_ref()),
        }
    }
}

/// Routes raw transport events the session object does not handle
/// itself: transcription traffic goes to the transcript handlers,
/// everything else to the generic server log.
fn route_transport_event(event: &Value, observer: &dyn SessionObserver) {
    match event.get("type").and_then(Value::as_str) {
        Some(INPUT_TRANSCRIPTION_COMPLETED) | Some(RESPONSE_TRANSCRIPT_DONE) => {
            observer.on_transcription_completed(event);
        }
        Some(RESPONSE_TRANSCRIPT_DELTA) => observer.on_transcription_delta(event),
        _ => observer.log_server_event(event),
    }
}
