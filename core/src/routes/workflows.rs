//! Routes under `/api/workflows`.

use std::fmt::Display;

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{Body, HttpMethod};
use crate::route::Route;
use crate::routes::segment;
use crate::types::WorkflowExecution;

/// `GET /api/workflows/list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAllWorkflows;

impl Route for GetAllWorkflows {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/api/workflows/list".to_string()
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `POST /api/workflows/execute/{id}` with a caller-supplied JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteWorkflow {
    workflow_id: String,
    payload: Value,
}

impl ExecuteWorkflow {
    pub fn new(workflow_id: impl Display, payload: Value) -> Self {
        Self {
            workflow_id: workflow_id.to_string(),
            payload,
        }
    }

    /// Build the `{workflow_id, input_data}` envelope the backend expects.
    pub fn with_inputs(workflow_id: u64, input_data: Value) -> Result<Self, ApiError> {
        let payload = serde_json::to_value(WorkflowExecution {
            workflow_id,
            input_data,
        })?;
        Ok(Self::new(workflow_id, payload))
    }
}

impl Route for ExecuteWorkflow {
    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        format!("/api/workflows/execute/{}", segment(&self.workflow_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(Some(Body::Json(self.payload.clone())))
    }
}

/// `GET /api/workflows/get_status/{request_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetStatus {
    request_id: String,
}

impl GetStatus {
    pub fn new(request_id: impl Display) -> Self {
        Self {
            request_id: request_id.to_string(),
        }
    }
}

impl Route for GetStatus {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/api/workflows/get_status/{}", segment(&self.request_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}
