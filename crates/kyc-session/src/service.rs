//! Handle-based service surface for the host application. One
//! `VerificationService` manages any number of independent sessions; each
//! recognition pass runs as a cancellable spawned task under the configured
//! time budget.

use std::collections::HashMap;
use std::sync::Arc;

use kyc_types::{MediaType, RawDocument, VerificationConfig, VerificationRecord};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;
use verify_engine::{Verification, VerificationEngine};

use crate::error::ServiceError;
use crate::recognizer::{RecognitionError, TextRecognizer};
use crate::session::{SessionState, VerificationSession};

/// Opaque identifier for one verification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(Uuid);

impl SessionHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What subscribers receive on every state transition. The record appears
/// once the session is Scored (or Failed, as the canned failure record).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub record: Option<VerificationRecord>,
}

struct SessionShared {
    handle: SessionHandle,
    session: Mutex<VerificationSession>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SessionSnapshot>>>,
}

impl SessionShared {
    fn snapshot(session: &VerificationSession) -> SessionSnapshot {
        SessionSnapshot {
            state: session.state(),
            record: session.record(),
        }
    }

    /// Fan the current snapshot out to every live subscriber. Callers hold
    /// the session lock, so transitions publish in order.
    async fn publish(&self, session: &VerificationSession) {
        let snapshot = Self::snapshot(session);
        info!(session = %self.handle, state = %snapshot.state, "session state changed");
        self.subscribers
            .lock()
            .await
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }
}

struct SessionEntry {
    shared: Arc<SessionShared>,
    task: Option<JoinHandle<()>>,
}

impl SessionEntry {
    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct VerificationService {
    engine: VerificationEngine,
    recognizer: Arc<dyn TextRecognizer>,
    sessions: Mutex<HashMap<SessionHandle, SessionEntry>>,
}

impl VerificationService {
    pub fn new(config: VerificationConfig, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            engine: VerificationEngine::new(config),
            recognizer,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Default configuration.
    pub fn with_recognizer(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self::new(VerificationConfig::default(), recognizer)
    }

    fn check_input(&self, bytes: &[u8], media_type: MediaType) -> Result<(), ServiceError> {
        if bytes.is_empty() {
            return Err(ServiceError::InvalidInput("document is empty".to_string()));
        }
        let max = self.engine.config().max_document_bytes;
        if bytes.len() > max {
            return Err(ServiceError::InvalidInput(format!(
                "document is {} bytes, limit is {}",
                bytes.len(),
                max
            )));
        }
        if !self.recognizer.supports(media_type) {
            return Err(ServiceError::InvalidInput(format!(
                "media type {media_type} is not supported"
            )));
        }
        Ok(())
    }

    /// Start a new session. Returns immediately with a handle; recognition
    /// proceeds in the background.
    pub async fn submit(
        &self,
        bytes: Vec<u8>,
        media_type: MediaType,
    ) -> Result<SessionHandle, ServiceError> {
        self.check_input(&bytes, media_type)?;

        let handle = SessionHandle::new();
        let shared = Arc::new(SessionShared {
            handle,
            session: Mutex::new(VerificationSession::new()),
            subscribers: Mutex::new(Vec::new()),
        });

        {
            let mut session = shared.session.lock().await;
            session.upload(RawDocument::new(bytes, media_type))?;
            shared.publish(&session).await;
        }

        let task = self.spawn_recognition(Arc::clone(&shared));
        self.sessions.lock().await.insert(
            handle,
            SessionEntry {
                shared,
                task: Some(task),
            },
        );

        info!(session = %handle, "verification session created");
        Ok(handle)
    }

    /// Receive the current snapshot immediately, then one message per state
    /// transition.
    pub async fn subscribe(
        &self,
        handle: SessionHandle,
    ) -> Result<mpsc::UnboundedReceiver<SessionSnapshot>, ServiceError> {
        let shared = self.shared(handle).await?;
        let (tx, rx) = mpsc::unbounded_channel();

        let session = shared.session.lock().await;
        let _ = tx.send(SessionShared::snapshot(&session));
        shared.subscribers.lock().await.push(tx);
        Ok(rx)
    }

    /// Current state and record without subscribing.
    pub async fn snapshot(&self, handle: SessionHandle) -> Result<SessionSnapshot, ServiceError> {
        let shared = self.shared(handle).await?;
        let session = shared.session.lock().await;
        Ok(SessionShared::snapshot(&session))
    }

    /// Accept the scored result. Valid only in Scored.
    pub async fn confirm(&self, handle: SessionHandle) -> Result<(), ServiceError> {
        let shared = self.shared(handle).await?;
        let mut session = shared.session.lock().await;
        session.confirm()?;
        shared.publish(&session).await;
        Ok(())
    }

    /// Discard the scored result. Valid only in Scored.
    pub async fn reject(&self, handle: SessionHandle) -> Result<(), ServiceError> {
        let shared = self.shared(handle).await?;
        let mut session = shared.session.lock().await;
        session.reject()?;
        shared.publish(&session).await;
        Ok(())
    }

    /// Replace the document and run a fresh pass. Valid only in Scored or
    /// Failed.
    pub async fn reupload(
        &self,
        handle: SessionHandle,
        bytes: Vec<u8>,
        media_type: MediaType,
    ) -> Result<(), ServiceError> {
        self.check_input(&bytes, media_type)?;

        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(&handle)
            .ok_or(ServiceError::UnknownSession(handle))?;

        {
            let mut session = entry.shared.session.lock().await;
            session.reset()?;
            entry.shared.publish(&session).await;
            session.upload(RawDocument::new(bytes, media_type))?;
            entry.shared.publish(&session).await;
        }

        // One live document per session: any stale recognition task dies
        // before the new one starts.
        entry.abort_task();
        entry.task = Some(self.spawn_recognition(Arc::clone(&entry.shared)));
        Ok(())
    }

    /// Abort any in-flight recognition and forget the session. Subscribers
    /// see their channel close.
    pub async fn close(&self, handle: SessionHandle) -> Result<(), ServiceError> {
        let mut entry = self
            .sessions
            .lock()
            .await
            .remove(&handle)
            .ok_or(ServiceError::UnknownSession(handle))?;
        entry.abort_task();
        info!(session = %handle, "session closed");
        Ok(())
    }

    async fn shared(&self, handle: SessionHandle) -> Result<Arc<SessionShared>, ServiceError> {
        self.sessions
            .lock()
            .await
            .get(&handle)
            .map(|entry| Arc::clone(&entry.shared))
            .ok_or(ServiceError::UnknownSession(handle))
    }

    fn spawn_recognition(&self, shared: Arc<SessionShared>) -> JoinHandle<()> {
        let engine = self.engine.clone();
        let recognizer = Arc::clone(&self.recognizer);
        let budget = self.engine.config().recognition_timeout();

        tokio::spawn(async move {
            let document = { shared.session.lock().await.take_document() };
            let Some(document) = document else {
                return;
            };

            let outcome = match tokio::time::timeout(budget, recognizer.recognize(&document)).await
            {
                Ok(result) => result,
                Err(_) => Err(RecognitionError::Timeout),
            };
            drop(document);

            let mut session = shared.session.lock().await;
            match outcome {
                Ok(text) => run_pipeline(&engine, &shared, &mut session, text).await,
                Err(error) => {
                    warn!(session = %shared.handle, %error, "recognition failed");
                    if session.fail().is_ok() {
                        shared.publish(&session).await;
                    }
                }
            }
        })
    }
}

/// Parse, validate, and score on the recognition task's completion path.
/// The stages are synchronous; each transition is published in order.
async fn run_pipeline(
    engine: &VerificationEngine,
    shared: &SessionShared,
    session: &mut VerificationSession,
    text: kyc_types::RecognizedText,
) {
    if session.begin_parsing(text).is_err() {
        return;
    }
    shared.publish(session).await;

    let Some(text) = session.recognized_text() else {
        return;
    };
    let mut extraction = engine.parse(text);

    if session.begin_validating().is_err() {
        return;
    }
    shared.publish(session).await;

    let findings = engine.validate(&mut extraction);
    let risk = engine.score(findings);
    let verification = Verification {
        document_type: extraction.document_type,
        fields: extraction.fields,
        risk,
    };

    if session.complete(verification).is_err() {
        return;
    }
    shared.publish(session).await;
}
