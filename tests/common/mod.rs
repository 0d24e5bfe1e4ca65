//! Shared fakes for the form component tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use taskscope::client::{AnalysisBackend, ClientError};
use taskscope::form::{
    Handles, MemoryBuffer, MemoryForm, MemoryResults, RecordingNotifier, TaskFormClient,
};
use taskscope::models::AnalyzeRequest;

/// Backend that replays canned responses and records every request.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    requests: Mutex<Vec<AnalyzeRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: Value) -> Self {
        self.responses.lock().push_back(Ok(body));
        self
    }

    pub fn fail(self, error: ClientError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<AnalyzeRequest> {
        self.requests.lock().clone()
    }

    fn next(&self, request: &AnalyzeRequest) -> Result<Value, ClientError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .expect("No scripted response left")
    }
}

impl AnalysisBackend for ScriptedBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, ClientError> {
        self.next(request)
    }

    async fn suggest(&self, request: &AnalyzeRequest) -> Result<Value, ClientError> {
        self.next(request)
    }
}

/// Backend whose responses are released by the test, one gate per call.
#[derive(Default)]
pub struct GatedBackend {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<Value, ClientError>>>>,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a gate for the next call and return its release handle.
    pub fn gate(&self) -> oneshot::Sender<Result<Value, ClientError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push_back(rx);
        tx
    }

    async fn wait(&self) -> Result<Value, ClientError> {
        let gate = self.gates.lock().pop_front().expect("No gate queued");
        gate.await.expect("Gate dropped without a response")
    }
}

impl AnalysisBackend for GatedBackend {
    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Value, ClientError> {
        self.wait().await
    }

    async fn suggest(&self, _request: &AnalyzeRequest) -> Result<Value, ClientError> {
        self.wait().await
    }
}

/// A transport-level failure without needing a live socket.
pub fn transport_error() -> ClientError {
    ClientError::InvalidBody {
        status: reqwest::StatusCode::BAD_GATEWAY,
        source: serde_json::from_str::<Value>("<html>Bad Gateway</html>").unwrap_err(),
    }
}

pub struct Harness<B> {
    pub client: TaskFormClient<B>,
    pub form: Arc<MemoryForm>,
    pub buffer: Arc<MemoryBuffer>,
    pub results: Arc<MemoryResults>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness<B: AnalysisBackend>(backend: B) -> Harness<B> {
    let form = Arc::new(MemoryForm::new());
    let buffer = Arc::new(MemoryBuffer::new());
    let results = Arc::new(MemoryResults::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let handles = Handles {
        form: form.clone(),
        buffer: buffer.clone(),
        results: results.clone(),
        notifier: notifier.clone(),
    };

    Harness {
        client: TaskFormClient::new(backend, handles),
        form,
        buffer,
        results,
        notifier,
    }
}
