use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use taskflow_client::{Method, Request, Transport, TransportError};
use tokio::sync::Notify;

/// Canned reply for one (method, path)
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Fail(TransportError),
    /// Held until the gate is notified
    Gated(Arc<Notify>, Box<Reply>),
}

/// In-process [`Transport`] answering from a script
///
/// Replies for a route are consumed in order; the last one stays and answers
/// every later call. Unscripted routes answer 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: DashMap<(Method, String), VecDeque<Reply>>,
    log: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn json(&self, method: Method, path: &str, body: Value) -> &Self {
        self.reply(method, path, Reply::Json(body))
    }

    pub fn status(&self, method: Method, path: &str, status: u16) -> &Self {
        self.reply(
            method,
            path,
            Reply::Fail(TransportError::Status {
                method,
                path: path.to_string(),
                status,
                body: String::new(),
            }),
        )
    }

    /// Reply with `body` once `gate` is notified
    pub fn gated(&self, method: Method, path: &str, gate: Arc<Notify>, body: Value) -> &Self {
        self.reply(method, path, Reply::Gated(gate, Box::new(Reply::Json(body))))
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<Request> {
        self.log.lock().clone()
    }

    pub fn calls(&self, method: Method, path: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Most recent request to a route
    pub fn last(&self, method: Method, path: &str) -> Option<Request> {
        self.log
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut queue = self.routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

async fn resolve(reply: Reply) -> Result<Value, TransportError> {
    let mut reply = reply;
    loop {
        match reply {
            Reply::Json(value) => return Ok(value),
            Reply::Fail(err) => return Err(err),
            Reply::Gated(gate, inner) => {
                gate.notified().await;
                reply = *inner;
            }
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Value, TransportError> {
        let method = request.method;
        let path = request.path.clone();
        self.log.lock().push(request);

        match self.next_reply(method, &path) {
            Some(reply) => resolve(reply).await,
            None => Err(TransportError::Status {
                method,
                path,
                status: 404,
                body: "unscripted route".into(),
            }),
        }
    }
}
