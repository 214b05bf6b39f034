//! Verify every route against the JSON test vectors in `test-vectors/`.
//!
//! Each case names a route, its constructor arguments, and the request the
//! client is expected to build from it. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use sortha_core::routes::{
    CreateFile, CreateFolder, DeleteFile, DeleteFolder, DownloadFile, ExecuteWorkflow,
    GetAllWorkflows, GetFilesInFolder, GetFolder, GetRootFolder, GetStatus, GetSubFolder,
};
use sortha_core::{Anonymous, Body, Client, FormPart, HttpMethod, Route};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

/// Build the route a vector case describes.
fn route_for(name: &str, args: &Value) -> Box<dyn Route> {
    match name {
        "GetRootFolder" => Box::new(GetRootFolder),
        "GetFolder" => Box::new(GetFolder::new(arg(args, "id"))),
        "GetSubFolder" => Box::new(GetSubFolder::new(arg(args, "id"))),
        "GetFilesInFolder" => Box::new(GetFilesInFolder::new(arg(args, "id"))),
        "CreateFolder" => Box::new(CreateFolder::new(
            arg(args, "name"),
            args["parent_id"].as_u64(),
        )),
        "CreateFile" => Box::new(CreateFile::new(
            arg(args, "contents").as_bytes().to_vec(),
            arg(args, "file_name"),
            arg(args, "parent_id"),
        )),
        "DeleteFile" => Box::new(DeleteFile::new(arg(args, "id"))),
        "DeleteFolder" => Box::new(DeleteFolder::new(arg(args, "id"))),
        "DownloadFile" => Box::new(DownloadFile::new(arg(args, "id"))),
        "GetAllWorkflows" => Box::new(GetAllWorkflows),
        "ExecuteWorkflow" => Box::new(ExecuteWorkflow::new(
            arg(args, "id"),
            args["payload"].clone(),
        )),
        "GetStatus" => Box::new(GetStatus::new(arg(args, "id"))),
        other => panic!("unknown route: {other}"),
    }
}

#[tokio::test]
async fn route_test_vectors() {
    let raw = include_str!("../../test-vectors/routes.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    let client = Client::new(base_url, Anonymous).unwrap();
    let cases = vectors["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 13, "every route needs at least one vector");

    for case in cases {
        let name = case["name"].as_str().unwrap();
        let route = route_for(case["route"].as_str().unwrap(), &case["args"]);
        let expected = &case["expected_request"];

        // Verify the route itself
        assert_eq!(
            route.method(),
            parse_method(expected["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(route.path(), expected["path"].as_str().unwrap(), "{name}: path");
        assert_eq!(
            route.needs_auth(),
            expected["needs_auth"].as_bool().unwrap(),
            "{name}: needs_auth"
        );

        // Verify the request the client builds from it
        let req = client.create_request(&*route).await.unwrap();
        assert_eq!(
            req.url(),
            format!("{base_url}{}", expected["path"].as_str().unwrap()),
            "{name}: url"
        );

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (
                    arr[0].as_str().unwrap().to_string(),
                    arr[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers(), expected_headers, "{name}: headers");

        match (req.body(), expected.get("multipart_fields")) {
            (Some(Body::Multipart(form)), Some(fields)) => {
                let names: Vec<&str> = form.parts().iter().map(FormPart::name).collect();
                let expected_names: Vec<&str> = fields
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|f| f.as_str().unwrap())
                    .collect();
                assert_eq!(names, expected_names, "{name}: multipart fields");
            }
            (Some(Body::Json(body)), None) => {
                assert_eq!(body, &expected["body"], "{name}: body");
            }
            (None, None) => {
                assert!(expected["body"].is_null(), "{name}: body should be None");
            }
            (body, _) => panic!("{name}: unexpected body {body:?}"),
        }
    }
}
