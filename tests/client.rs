//! End-to-end tests against an in-process HTTP server.
//!
//! The server mimics the slice of the Backlog API the client talks to,
//! including credential checking and the structured error body.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response as AxumResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use backlog::{Client, Error, IssueSearchRequest};

const API_KEY: &str = "test-key";

fn authed(query: &HashMap<String, String>) -> bool {
    query.get("apiKey").map(|k| k == API_KEY).unwrap_or(false)
}

fn unauthorized() -> AxumResponse {
    let body = json!({
        "errors": [{"message": "Authentication failure.", "code": 11, "moreInfo": ""}]
    });
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

fn issue_json(key: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "projectId": 100,
        "issueKey": key,
        "keyId": 1,
        "summary": "First issue",
        "status": {"id": 1, "name": "Open"},
        "priority": {"id": 3, "name": "Normal"},
        "createdUser": {"id": 9, "userId": "admin", "name": "admin"},
        "created": "2023-07-05T07:09:52Z",
        "updated": "2023-07-06T10:00:00Z"
    })
}

async fn get_issue(
    Path(key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> AxumResponse {
    if !authed(&query) {
        return unauthorized();
    }
    if key == "DEMO-404" {
        let body = json!({"errors": [
            {"message": "No such issue.", "code": 7, "moreInfo": "key=DEMO-404"},
            {"message": "Check the issue key.", "code": 0, "moreInfo": ""}
        ]});
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(issue_json(&key)).into_response()
}

async fn delete_issue(
    Path(_key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> AxumResponse {
    if !authed(&query) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn search_issues(Query(query): Query<HashMap<String, String>>) -> AxumResponse {
    if !authed(&query) {
        return unauthorized();
    }
    Json(json!([issue_json("DEMO-1")])).into_response()
}

async fn create_issue(
    Query(query): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> AxumResponse {
    if !authed(&query) {
        return unauthorized();
    }
    let mut issue = issue_json("DEMO-2");
    issue["summary"] = json!(form.get("summary").cloned().unwrap_or_default());
    (StatusCode::CREATED, Json(issue)).into_response()
}

async fn edit_issue(
    Path(_key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Form(_form): Form<HashMap<String, String>>,
) -> AxumResponse {
    if !authed(&query) {
        return unauthorized();
    }
    let body = json!({"errors": [
        {"message": "Assignee is not a project member.", "code": 9, "moreInfo": "assigneeId=42"}
    ]});
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

async fn broken_priorities() -> AxumResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response()
}

async fn no_content() -> AxumResponse {
    StatusCode::NO_CONTENT.into_response()
}

fn router() -> Router {
    Router::new()
        .route("/api/v2/issues", get(search_issues).post(create_issue))
        .route(
            "/api/v2/issues/{key}",
            get(get_issue).patch(edit_issue).delete(delete_issue),
        )
        .route("/api/v2/priorities", get(broken_priorities))
        .route("/api/v2/nocontent", get(no_content))
}

/// Bind an ephemeral port and return a base URL pointing at the server.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    format!("http://{addr}/api/v2/")
}

#[tokio::test]
async fn get_issue_decodes_and_reports_redacted_metadata() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let (issue, resp) = client.issues().get("DEMO-1").await.unwrap();
    assert_eq!(issue.issue_key, "DEMO-1");
    assert_eq!(issue.summary, "First issue");
    assert_eq!(issue.status.unwrap().name, "Open");
    assert_eq!(resp.status(), 200);

    // The request carried the credential, but the surfaced URL never does.
    assert!(resp.url().path().ends_with("issues/DEMO-1"));
    let api_key_param: Vec<(String, String)> = resp
        .url()
        .query_pairs()
        .filter(|(k, _)| k == "apiKey")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        api_key_param,
        vec![("apiKey".to_string(), "REDACTED".to_string())]
    );
}

#[tokio::test]
async fn caller_supplied_http_client_is_used() {
    let base = spawn_server().await;
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap();
    let client = Client::with_http_client(http, &base, API_KEY).unwrap();

    let (issue, resp) = client.issues().get("DEMO-1").await.unwrap();
    assert_eq!(issue.issue_key, "DEMO-1");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn wrong_api_key_yields_structured_unauthorized_error() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, "wrong-key").unwrap();

    let err = client.issues().get("DEMO-1").await.unwrap_err();
    match &err {
        Error::Api { status, url, errors, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert!(!url.as_str().contains("wrong-key"));
            assert!(url.as_str().contains("apiKey=REDACTED"));
            assert_eq!(errors.details()[0].code, 11);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_preserves_error_triples_in_body_order() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let err = client.issues().get("DEMO-404").await.unwrap_err();
    let errors = err.api_errors().expect("an Api error");
    let details = errors.details();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].message, "No such issue.");
    assert_eq!(details[0].code, 7);
    assert_eq!(details[0].more_info, "key=DEMO-404");
    assert_eq!(details[1].message, "Check the issue key.");
}

#[tokio::test]
async fn rejected_edit_exposes_validation_triples() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let request = backlog::IssueRequest {
        assignee_id: Some(42),
        ..Default::default()
    };
    let err = client.issues().edit("DEMO-1", &request).await.unwrap_err();
    match &err {
        Error::Api { status, errors, .. } => {
            assert_eq!(status.as_u16(), 422);
            let details = errors.details();
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].code, 9);
            assert_eq!(details[0].more_info, "assigneeId=42");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_yields_empty_detail_list() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let err = client.space().list_priorities().await.unwrap_err();
    match &err {
        Error::Api { status, errors, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert!(errors.details().is_empty());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_succeeds_on_no_content() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let resp = client.issues().delete("DEMO-1").await.unwrap();
    assert_eq!(resp.status(), 204);
}

#[tokio::test]
async fn empty_body_with_target_shape_is_a_no_op_decode() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let req = client
        .build_request(reqwest::Method::GET, "nocontent", None)
        .unwrap();
    let (decoded, resp) = client.execute::<backlog::Issue>(req).await.unwrap();
    assert!(decoded.is_none());
    assert_eq!(resp.status(), 204);
}

#[tokio::test]
async fn create_issue_sends_form_encoded_fields() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let request = backlog::IssueRequest {
        project_id: Some(100),
        issue_type_id: Some(2),
        summary: Some("Crash on startup".to_string()),
        ..Default::default()
    };
    let (issue, resp) = client.issues().create(&request).await.unwrap();
    assert_eq!(issue.summary, "Crash on startup");
    assert_eq!(resp.status(), 201);
}

#[tokio::test]
async fn search_returns_matching_issues() {
    let base = spawn_server().await;
    let client = Client::with_base_url(&base, API_KEY).unwrap();

    let request = IssueSearchRequest {
        status_ids: vec![2],
        sort: Some("created".to_string()),
        count: Some(10),
        ..Default::default()
    };
    let (issues, _) = client.issues().search(&request).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_key, "DEMO-1");
}

#[tokio::test]
async fn transport_errors_never_expose_the_api_key() {
    // Nothing listens on the discard port; the connection is refused.
    let client = Client::with_base_url("http://127.0.0.1:9/api/v2/", "sekret-token").unwrap();

    let err = client.issues().get("DEMO-1").await.unwrap_err();
    let text = err.to_string();
    assert!(!text.contains("sekret-token"), "leaked credential: {text}");
    match err {
        Error::Network(inner) => {
            if let Some(url) = inner.url() {
                assert!(!url.as_str().contains("sekret-token"));
            }
        }
        other => panic!("expected Network error, got {other:?}"),
    }
}
