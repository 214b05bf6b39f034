//! Domain DTOs for the Sortha files and workflows API.
//!
//! # Design
//! These types mirror the backend's JSON but are defined independently of the
//! mock-server crate. Integration tests catch any schema drift between the two.
//! Responses come back as `Decoded`; use `Decoded::deserialize` to turn one
//! into these types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A folder. Root folders have no parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub parent_folder_id: Option<u64>,
}

/// A file as listed inside a folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<u64>,
    pub size: u64,
}

/// Outcome of a delete operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationStatus {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Returned when a workflow run is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionTicket {
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionStatus {
    pub request_id: String,
    pub status: String,
    #[serde(default)]
    pub result: Value,
}

/// Request payload for creating a folder. `None` creates a root folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFolder {
    pub name: String,
    pub parent_folder_id: Option<u64>,
}

/// Request payload for starting a workflow run.
///
/// `input_data` is free-form; the backend passes it straight to the
/// workflow's state constructor, e.g.
/// `{"inputs": {"transcript_file": {"type": "text", "file_id": 14}}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowExecution {
    pub workflow_id: u64,
    pub input_data: Value,
}
