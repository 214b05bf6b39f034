//! Full file and workflow lifecycles against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every route over
//! real HTTP through `Client` and `Request::invoke`. Validates that route
//! descriptions, request execution and decoding work end-to-end with the
//! actual server.

use serde_json::json;
use sortha_core::routes::{
    CreateFile, CreateFolder, DeleteFile, DeleteFolder, DownloadFile, ExecuteWorkflow,
    GetAllWorkflows, GetFilesInFolder, GetFolder, GetRootFolder, GetStatus, GetSubFolder,
};
use sortha_core::types::{
    ExecutionStatus, ExecutionTicket, FileEntry, Folder, OperationStatus, Workflow,
};
use sortha_core::{Anonymous, Client, Decoded, Route};

async fn start_server() -> Client {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    Client::new(&format!("http://{addr}/"), Anonymous).unwrap()
}

async fn call<R: Route>(client: &Client, route: R) -> Decoded {
    client
        .create_request(&route)
        .await
        .unwrap()
        .invoke()
        .await
        .unwrap()
}

#[tokio::test]
async fn file_tree_lifecycle() {
    let client = start_server().await;

    // Step 1: no root folders yet.
    let roots: Vec<Folder> = call(&client, GetRootFolder).await.deserialize().unwrap();
    assert!(roots.is_empty(), "expected no root folders");

    // Step 2: create a root folder and a child.
    let docs: Folder = call(&client, CreateFolder::new("Docs", None))
        .await
        .deserialize()
        .unwrap();
    assert_eq!(docs.name, "Docs");
    assert_eq!(docs.parent_folder_id, None);

    let specs: Folder = call(&client, CreateFolder::new("Specs", Some(docs.id)))
        .await
        .deserialize()
        .unwrap();
    assert_eq!(specs.parent_folder_id, Some(docs.id));

    // Step 3: fetch the folder by id.
    let fetched: Folder = call(&client, GetFolder::new(docs.id))
        .await
        .deserialize()
        .unwrap();
    assert_eq!(fetched, docs);

    // Step 4: upload a file into the child.
    let uploaded: FileEntry = call(&client, CreateFile::new(b"hello".to_vec(), "a.txt", specs.id))
        .await
        .deserialize()
        .unwrap();
    assert_eq!(uploaded.name, "a.txt");
    assert_eq!(uploaded.size, 5);
    assert_eq!(uploaded.folder_id, Some(specs.id));

    // Step 5: sub-folders and files, fetched concurrently.
    let subs_req = client.create_request(&GetSubFolder::new(docs.id)).await.unwrap();
    let files_req = client
        .create_request(&GetFilesInFolder::new(specs.id))
        .await
        .unwrap();
    let (subs, files) = tokio::join!(subs_req.invoke(), files_req.invoke());
    let subs: Vec<Folder> = subs.unwrap().deserialize().unwrap();
    let files: Vec<FileEntry> = files.unwrap().deserialize().unwrap();
    assert_eq!(subs, vec![specs.clone()]);
    assert_eq!(files, vec![uploaded.clone()]);

    // Step 6: download passes plain text through untouched.
    let contents = call(&client, DownloadFile::new(uploaded.id)).await;
    assert_eq!(contents, Decoded::Text("hello".to_string()));

    // Step 7: delete the file, then deleting it again is a 404.
    let status: OperationStatus = call(&client, DeleteFile::new(uploaded.id))
        .await
        .deserialize()
        .unwrap();
    assert!(status.success);

    let err = client
        .create_request(&DeleteFile::new(uploaded.id))
        .await
        .unwrap()
        .invoke()
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("404"));

    // Step 8: deleting the root removes the whole tree.
    let status: OperationStatus = call(&client, DeleteFolder::new(docs.id))
        .await
        .deserialize()
        .unwrap();
    assert!(status.success);

    let roots: Vec<Folder> = call(&client, GetRootFolder).await.deserialize().unwrap();
    assert!(roots.is_empty(), "expected no root folders after delete");

    let err = client
        .create_request(&GetFolder::new(specs.id))
        .await
        .unwrap()
        .invoke()
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn workflow_lifecycle() {
    let client = start_server().await;

    let workflows: Vec<Workflow> = call(&client, GetAllWorkflows).await.deserialize().unwrap();
    assert_eq!(workflows.len(), 1);
    let workflow_id = workflows[0].id;

    let inputs = json!({"inputs": {"transcript_file": {"type": "text", "file_id": 14}}});
    let route = ExecuteWorkflow::with_inputs(workflow_id, inputs.clone()).unwrap();
    let ticket: ExecutionTicket = call(&client, route).await.deserialize().unwrap();
    assert!(!ticket.request_id.is_empty());

    let status: ExecutionStatus = call(&client, GetStatus::new(&ticket.request_id))
        .await
        .deserialize()
        .unwrap();
    assert_eq!(status.request_id, ticket.request_id);
    assert_eq!(status.status, "completed");
    assert_eq!(status.result["inputs"], inputs);

    let err = client
        .create_request(&GetStatus::new("unknown"))
        .await
        .unwrap()
        .invoke()
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn upload_keeps_extension_and_bytes() {
    let client = start_server().await;
    let folder: Folder = call(&client, CreateFolder::new("Scans", None))
        .await
        .deserialize()
        .unwrap();

    // Stored name lacks the uploaded file's extension, so the backend adds it.
    let original = vec![0x25, 0x50, 0x44, 0x46, 0xff, 0x00];
    let route = CreateFile::new(original.clone(), "report", folder.id).upload_name("report.pdf");
    let stored: FileEntry = call(&client, route).await.deserialize().unwrap();
    assert_eq!(stored.name, "report.pdf");
    assert_eq!(stored.size, original.len() as u64);

    let bytes = client
        .create_request(&DownloadFile::new(stored.id))
        .await
        .unwrap()
        .invoke_bytes()
        .await
        .unwrap();
    assert_eq!(bytes, original);
}
