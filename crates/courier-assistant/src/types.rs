//! Wire types mirroring the remote assistant API
//!
//! Every id is an opaque string assigned by the remote service; nothing
//! here is generated locally. Unknown fields are ignored on decode and
//! missing fields take their default value, matching what the remote
//! actually omits per entity state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Run statuses that keep the polling loop going
pub const STATUS_QUEUED: &str = "queued";
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Uploaded file record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: String,
    pub object: String,
    pub purpose: String,
    pub filename: String,
    pub bytes: i64,
    pub created_at: i64,
    pub status: String,
    pub status_details: Option<Value>,
}

/// Conversation context grouping messages and runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thread {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub metadata: Option<Value>,
}

/// A message within a thread
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub thread_id: String,
    pub role: String,
    pub content: Vec<MessageContent>,
    pub file_ids: Vec<Value>,
    pub assistant_id: String,
    pub run_id: String,
    pub metadata: Option<Value>,
}

/// One content block of a message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: MessageText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageText {
    pub value: String,
    pub annotations: Vec<Value>,
}

/// An assistant execution against a thread
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub assistant_id: String,
    pub thread_id: String,
    pub status: String,
    pub started_at: Option<Value>,
    pub expires_at: i64,
    pub cancelled_at: Option<Value>,
    pub failed_at: Option<Value>,
    pub completed_at: Option<Value>,
    pub last_error: Option<Value>,
    pub model: String,
    pub instructions: String,
    pub tools: Vec<Tool>,
    pub file_ids: Vec<String>,
    pub metadata: Option<Value>,
}

impl Run {
    /// Whether this run has left the polling loop's non-terminal states
    ///
    /// The remote reports an empty status while a run is being set up;
    /// that counts as non-terminal.
    pub fn is_terminal(&self) -> bool {
        !(self.status.is_empty() || self.status == STATUS_QUEUED || self.status == STATUS_IN_PROGRESS)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
}

// -- List envelopes as the remote returns them --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileList {
    pub object: String,
    pub has_more: bool,
    pub data: Vec<File>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThreadList {
    pub object: String,
    pub data: Vec<Thread>,
    pub first_id: String,
    pub last_id: String,
    pub has_more: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageList {
    pub object: String,
    pub data: Vec<Message>,
    pub first_id: String,
    pub last_id: String,
    pub has_more: bool,
}

// -- Request bodies --

#[derive(Debug, Serialize)]
pub struct CreateMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateRun<'a> {
    pub assistant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<&'a str>,
}
