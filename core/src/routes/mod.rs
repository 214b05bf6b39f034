//! One route type per backend endpoint.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub mod files;
pub mod workflows;

pub use files::{
    CreateFile, CreateFolder, DeleteFile, DeleteFolder, DownloadFile, GetFilesInFolder,
    GetFolder, GetRootFolder, GetSubFolder,
};
pub use workflows::{ExecuteWorkflow, GetAllWorkflows, GetStatus};

/// Bytes escaped when an identifier is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode `id` so it stays one path segment.
pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}
