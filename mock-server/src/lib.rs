use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    pub id: u64,
    pub name: String,
    pub parent_folder_id: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub id: u64,
    pub name: String,
    pub folder_id: Option<u64>,
    pub size: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationStatus {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize)]
pub struct CreateFolder {
    pub name: String,
    #[serde(default)]
    pub parent_folder_id: Option<u64>,
}

#[derive(Clone, Debug)]
struct StoredFile {
    record: FileRecord,
    contents: Vec<u8>,
}

#[derive(Clone, Debug)]
struct Execution {
    workflow_id: u64,
    input_data: Value,
}

/// In-memory backend state.
#[derive(Debug, Default)]
pub struct Store {
    next_folder_id: u64,
    next_file_id: u64,
    folders: BTreeMap<u64, Folder>,
    files: BTreeMap<u64, StoredFile>,
    workflows: Vec<Workflow>,
    executions: HashMap<String, Execution>,
}

impl Store {
    /// A store with the workflows the platform registers at start-up.
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.workflows.push(Workflow {
            id: 1,
            name: "TranscriptAwsToAzure".to_string(),
            description: Some(
                "Turn an AWS architecture transcript into Azure Terraform".to_string(),
            ),
        });
        store
    }

    pub fn add_folder(&mut self, name: &str, parent_folder_id: Option<u64>) -> Folder {
        self.next_folder_id += 1;
        let folder = Folder {
            id: self.next_folder_id,
            name: name.to_string(),
            parent_folder_id,
        };
        self.folders.insert(folder.id, folder.clone());
        folder
    }

    fn add_file(&mut self, name: String, folder_id: u64, contents: Vec<u8>) -> FileRecord {
        self.next_file_id += 1;
        let record = FileRecord {
            id: self.next_file_id,
            name,
            folder_id: Some(folder_id),
            size: contents.len() as u64,
        };
        self.files.insert(
            record.id,
            StoredFile {
                record: record.clone(),
                contents,
            },
        );
        record
    }

    /// Remove a folder with every sub-folder and file below it.
    fn remove_folder_tree(&mut self, folder_id: u64) {
        let children: Vec<u64> = self
            .folders
            .values()
            .filter(|f| f.parent_folder_id == Some(folder_id))
            .map(|f| f.id)
            .collect();
        for child in children {
            self.remove_folder_tree(child);
        }
        self.files
            .retain(|_, file| file.record.folder_id != Some(folder_id));
        self.folders.remove(&folder_id);
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0} not found.")]
    NotFound(&'static str),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::seeded())))
}

pub fn router(db: Db) -> Router {
    let files = Router::new()
        .route("/root_folders", get(root_folders))
        .route("/folders/{id}", get(get_folder))
        .route("/sub_folders/{id}", get(sub_folders))
        .route("/files_in_folder/{id}", get(files_in_folder))
        .route("/create_folder", post(create_folder))
        .route("/create_file", post(create_file))
        .route("/download_file/{id}", get(download_file))
        .route("/delete_file/{id}", delete(delete_file))
        .route("/delete_folder/{id}", delete(delete_folder));

    let workflows = Router::new()
        .route("/list", get(list_workflows))
        .route("/execute/{id}", post(execute_workflow))
        .route("/get_status/{request_id}", get(get_status));

    Router::new()
        .nest("/api/files", files)
        .nest("/api/workflows", workflows)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root_folders(State(db): State<Db>) -> Json<Vec<Folder>> {
    let store = db.read().await;
    Json(
        store
            .folders
            .values()
            .filter(|f| f.parent_folder_id.is_none())
            .cloned()
            .collect(),
    )
}

async fn get_folder(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Folder>, ServerError> {
    let store = db.read().await;
    store
        .folders
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ServerError::NotFound("Folder"))
}

async fn sub_folders(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Folder>> {
    let store = db.read().await;
    Json(
        store
            .folders
            .values()
            .filter(|f| f.parent_folder_id == Some(id))
            .cloned()
            .collect(),
    )
}

async fn files_in_folder(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<FileRecord>> {
    let store = db.read().await;
    Json(
        store
            .files
            .values()
            .filter(|f| f.record.folder_id == Some(id))
            .map(|f| f.record.clone())
            .collect(),
    )
}

async fn create_folder(
    State(db): State<Db>,
    Json(input): Json<CreateFolder>,
) -> Result<Json<Folder>, ServerError> {
    if input.name.is_empty() || input.name.chars().count() > 100 {
        return Err(ServerError::InvalidRequest(
            "folder name must be 1 to 100 characters".into(),
        ));
    }
    let mut store = db.write().await;
    if let Some(parent) = input.parent_folder_id {
        if !store.folders.contains_key(&parent) {
            return Err(ServerError::NotFound("Parent folder"));
        }
    }
    let folder = store.add_folder(&input.name, input.parent_folder_id);
    tracing::info!("created folder {} ({})", folder.id, folder.name);
    Ok(Json(folder))
}

async fn create_file(
    State(db): State<Db>,
    mut multipart: Multipart,
) -> Result<Json<FileRecord>, ServerError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut file_name: Option<String> = None;
    let mut parent_folder_id: Option<u64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let uploaded_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
                upload = Some((uploaded_name, bytes.to_vec()));
            }
            "file_name" => {
                file_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ServerError::InvalidRequest(e.to_string()))?,
                );
            }
            "parent_folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
                parent_folder_id = Some(text.trim().parse().map_err(|_| {
                    ServerError::InvalidRequest("parent_folder_id must be an integer".into())
                })?);
            }
            other => tracing::warn!("ignoring unknown field: {other}"),
        }
    }

    let (uploaded_name, contents) =
        upload.ok_or_else(|| ServerError::InvalidRequest("file is required".into()))?;
    let file_name =
        file_name.ok_or_else(|| ServerError::InvalidRequest("file_name is required".into()))?;
    let parent_folder_id = parent_folder_id
        .ok_or_else(|| ServerError::InvalidRequest("parent_folder_id is required".into()))?;

    let mut store = db.write().await;
    if !store.folders.contains_key(&parent_folder_id) {
        return Err(ServerError::NotFound("Parent folder"));
    }
    let record = store.add_file(
        with_upload_extension(file_name, &uploaded_name),
        parent_folder_id,
        contents,
    );
    tracing::info!("stored file {} ({} bytes)", record.name, record.size);
    Ok(Json(record))
}

/// Append the uploaded file's extension when the requested name does not end
/// with it. The extension is whatever follows the last `.`, which is the whole
/// name when there is no dot at all.
fn with_upload_extension(file_name: String, uploaded_name: &str) -> String {
    let uploaded_ext = last_dot_segment(uploaded_name);
    if last_dot_segment(&file_name) == uploaded_ext {
        file_name
    } else {
        format!("{file_name}.{uploaded_ext}")
    }
}

fn last_dot_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

async fn download_file(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Response, ServerError> {
    let store = db.read().await;
    let file = store.files.get(&id).ok_or(ServerError::NotFound("File"))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", file.record.name),
            ),
        ],
        file.contents.clone(),
    )
        .into_response())
}

async fn delete_file(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> (StatusCode, Json<OperationStatus>) {
    let mut store = db.write().await;
    match store.files.remove(&id) {
        Some(_) => (
            StatusCode::OK,
            Json(OperationStatus {
                success: true,
                message: "File deleted successfully.".to_string(),
            }),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(OperationStatus {
                success: false,
                message: "File not found.".to_string(),
            }),
        ),
    }
}

async fn delete_folder(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<OperationStatus>, ServerError> {
    let mut store = db.write().await;
    if !store.folders.contains_key(&id) {
        return Err(ServerError::NotFound("Folder"));
    }
    store.remove_folder_tree(id);
    Ok(Json(OperationStatus {
        success: true,
        message: "Folder and all its contents deleted successfully.".to_string(),
    }))
}

async fn list_workflows(State(db): State<Db>) -> Json<Vec<Workflow>> {
    Json(db.read().await.workflows.clone())
}

async fn execute_workflow(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ServerError> {
    let mut store = db.write().await;
    if !store.workflows.iter().any(|w| w.id == id) {
        return Err(ServerError::NotFound("Workflow"));
    }
    let request_id = Uuid::new_v4().to_string();
    let input_data = input.get("input_data").cloned().unwrap_or(input);
    store.executions.insert(
        request_id.clone(),
        Execution {
            workflow_id: id,
            input_data,
        },
    );
    tracing::info!("started workflow {id} as {request_id}");
    Ok(Json(json!({ "request_id": request_id })))
}

async fn get_status(
    State(db): State<Db>,
    Path(request_id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let store = db.read().await;
    let execution = store
        .executions
        .get(&request_id)
        .ok_or(ServerError::NotFound("Execution"))?;
    Ok(Json(json!({
        "request_id": request_id,
        "status": "completed",
        "result": {
            "workflow_id": execution.workflow_id,
            "inputs": execution.input_data,
        },
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_serializes_null_parent() {
        let folder = Folder {
            id: 1,
            name: "Docs".to_string(),
            parent_folder_id: None,
        };
        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Docs", "parent_folder_id": null}));
    }

    #[test]
    fn create_folder_defaults_parent_to_none() {
        let input: CreateFolder = serde_json::from_str(r#"{"name":"reports"}"#).unwrap();
        assert_eq!(input.name, "reports");
        assert!(input.parent_folder_id.is_none());
    }

    #[test]
    fn create_folder_rejects_missing_name() {
        let result: Result<CreateFolder, _> = serde_json::from_str(r#"{"parent_folder_id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn upload_extension_is_appended_when_missing() {
        assert_eq!(with_upload_extension("report".into(), "report.pdf"), "report.pdf");
        assert_eq!(with_upload_extension("a.txt".into(), "local.txt"), "a.txt");
        assert_eq!(with_upload_extension("a.md".into(), "local.txt"), "a.md.txt");
        assert_eq!(with_upload_extension("a.txt".into(), "blob"), "a.txt.blob");
        assert_eq!(with_upload_extension("pdf".into(), "scan.pdf"), "pdf");
    }

    #[test]
    fn removing_a_folder_removes_its_tree() {
        let mut store = Store::default();
        let root = store.add_folder("root", None);
        let child = store.add_folder("child", Some(root.id));
        let other = store.add_folder("other", None);
        store.add_file("a.txt".into(), child.id, b"a".to_vec());
        let kept = store.add_file("b.txt".into(), other.id, b"b".to_vec());

        store.remove_folder_tree(root.id);

        assert_eq!(store.folders.keys().copied().collect::<Vec<_>>(), [other.id]);
        assert_eq!(store.files.keys().copied().collect::<Vec<_>>(), [kept.id]);
    }

    #[test]
    fn seeded_store_has_a_workflow() {
        let store = Store::seeded();
        assert_eq!(store.workflows.len(), 1);
        assert_eq!(store.workflows[0].id, 1);
    }
}
