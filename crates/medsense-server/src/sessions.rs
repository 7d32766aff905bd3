//! In-memory conversation sessions with idle expiry.
//!
//! Sessions live for the process lifetime only. Expiry is swept lazily
//! on each chat request rather than by a background task.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use medsense_chat::ChatMessage;

/// Default idle expiry: 6 hours.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Debug, Clone, Serialize)]
pub struct SessionMessage {
    pub role: String,
    pub text: Value,
    pub ts: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Profile {
    pub age: Option<i64>,
    pub lifestyle: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub messages: Vec<SessionMessage>,
    pub profile: Profile,
    pub last_active: i64,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    expiry_secs: i64,
}

impl SessionStore {
    pub fn new(expiry: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            expiry_secs: expiry.as_secs() as i64,
        }
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    /// Create a fresh session, returning its id.
    pub fn create(&self, profile: Profile) -> String {
        let sid = Uuid::new_v4().to_string();
        self.sessions.write().insert(
            sid.clone(),
            Session {
                messages: Vec::new(),
                profile,
                last_active: Self::now(),
            },
        );
        sid
    }

    pub fn exists(&self, sid: &str) -> bool {
        self.sessions.read().contains_key(sid)
    }

    /// Drop every session idle for longer than the expiry window.
    pub fn expire_idle(&self) {
        let cutoff = Self::now() - self.expiry_secs;
        self.sessions.write().retain(|_, s| s.last_active >= cutoff);
    }

    /// Append a message and refresh the idle timer.
    pub fn append(&self, sid: &str, role: &str, text: Value) {
        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.get_mut(sid) {
            let now = Self::now();
            session.messages.push(SessionMessage {
                role: role.to_string(),
                text,
                ts: now,
            });
            session.last_active = now;
        }
    }

    /// Snapshot a full session for the history endpoint.
    pub fn get(&self, sid: &str) -> Option<Session> {
        self.sessions.read().get(sid).cloned()
    }

    pub fn remove(&self, sid: &str) {
        self.sessions.write().remove(sid);
    }

    /// Conversation turns as chat messages, structured replies rendered
    /// back to JSON text.
    pub fn transcript(&self, sid: &str) -> Vec<ChatMessage> {
        self.sessions
            .read()
            .get(sid)
            .map(|session| {
                session
                    .messages
                    .iter()
                    .map(|m| ChatMessage {
                        role: m.role.clone(),
                        content: match &m.text {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        },
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY)
    }
}
