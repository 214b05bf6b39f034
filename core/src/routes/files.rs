//! Routes under `/api/files`.

use std::fmt::Display;

use crate::error::ApiError;
use crate::http::{Body, HttpMethod};
use crate::multipart::MultipartForm;
use crate::route::Route;
use crate::routes::segment;
use crate::types::NewFolder;

/// `GET /api/files/root_folders`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetRootFolder;

impl Route for GetRootFolder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/api/files/root_folders".to_string()
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `GET /api/files/folders/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFolder {
    folder_id: String,
}

impl GetFolder {
    pub fn new(folder_id: impl Display) -> Self {
        Self {
            folder_id: folder_id.to_string(),
        }
    }
}

impl Route for GetFolder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/api/files/folders/{}", segment(&self.folder_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `GET /api/files/sub_folders/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSubFolder {
    folder_id: String,
}

impl GetSubFolder {
    pub fn new(folder_id: impl Display) -> Self {
        Self {
            folder_id: folder_id.to_string(),
        }
    }
}

impl Route for GetSubFolder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/api/files/sub_folders/{}", segment(&self.folder_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `GET /api/files/files_in_folder/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFilesInFolder {
    folder_id: String,
}

impl GetFilesInFolder {
    pub fn new(folder_id: impl Display) -> Self {
        Self {
            folder_id: folder_id.to_string(),
        }
    }
}

impl Route for GetFilesInFolder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/api/files/files_in_folder/{}", segment(&self.folder_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `POST /api/files/create_folder` with `{name, parent_folder_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFolder {
    name: String,
    parent_folder_id: Option<u64>,
}

impl CreateFolder {
    pub fn new(name: impl Into<String>, parent_folder_id: Option<u64>) -> Self {
        Self {
            name: name.into(),
            parent_folder_id,
        }
    }
}

impl Route for CreateFolder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "/api/files/create_folder".to_string()
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        let payload = NewFolder {
            name: self.name.clone(),
            parent_folder_id: self.parent_folder_id,
        };
        Ok(Some(Body::json(&payload)?))
    }
}

/// `POST /api/files/create_file` as multipart with `file`, `file_name` and
/// `parent_folder_id`.
///
/// The `file` part carries its own file name (the name of the uploaded file)
/// next to the `file_name` field (the name to store it under). The backend
/// appends the upload's extension when the stored name lacks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFile {
    contents: Vec<u8>,
    upload_name: String,
    file_name: String,
    parent_folder_id: String,
}

impl CreateFile {
    /// Upload `contents` stored as `file_name`, which also names the file part.
    pub fn new(
        contents: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        parent_folder_id: impl Display,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            contents: contents.into(),
            upload_name: file_name.clone(),
            file_name,
            parent_folder_id: parent_folder_id.to_string(),
        }
    }

    /// Name the file part separately from the stored name, e.g. the local
    /// file's name when the caller picked a different one to store.
    pub fn upload_name(mut self, upload_name: impl Into<String>) -> Self {
        self.upload_name = upload_name.into();
        self
    }
}

impl Route for CreateFile {
    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "/api/files/create_file".to_string()
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        let form = MultipartForm::new()
            .file("file", self.upload_name.clone(), self.contents.clone())
            .text("file_name", self.file_name.clone())
            .text("parent_folder_id", self.parent_folder_id.clone());
        Ok(Some(Body::Multipart(form)))
    }
}

/// `DELETE /api/files/delete_file/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFile {
    file_id: String,
}

impl DeleteFile {
    pub fn new(file_id: impl Display) -> Self {
        Self {
            file_id: file_id.to_string(),
        }
    }
}

impl Route for DeleteFile {
    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("/api/files/delete_file/{}", segment(&self.file_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `DELETE /api/files/delete_folder/{id}`. The backend removes sub-folders
/// and files recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFolder {
    folder_id: String,
}

impl DeleteFolder {
    pub fn new(folder_id: impl Display) -> Self {
        Self {
            folder_id: folder_id.to_string(),
        }
    }
}

impl Route for DeleteFolder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("/api/files/delete_folder/{}", segment(&self.folder_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}

/// `GET /api/files/download_file/{id}`. The response is the raw file; use
/// `Request::invoke_bytes` to keep it exact, since `invoke` decodes it as
/// text (or JSON, when the file happens to be JSON).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    file_id: String,
}

impl DownloadFile {
    pub fn new(file_id: impl Display) -> Self {
        Self {
            file_id: file_id.to_string(),
        }
    }
}

impl Route for DownloadFile {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/api/files/download_file/{}", segment(&self.file_id))
    }

    fn needs_auth(&self) -> bool {
        false
    }

    fn body(&self) -> Result<Option<Body>, ApiError> {
        Ok(None)
    }
}
