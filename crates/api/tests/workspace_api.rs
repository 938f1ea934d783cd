//! HTTP-level tests for workspaces and their nodes and edges.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, post_raw, put_json_auth, test_token};
use nodeloom_db::memory::MemoryStore;
use nodeloom_db::StoreResponse;
use serde_json::{json, Value};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    store: Arc<MemoryStore>,
    token: String,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            token: test_token(),
        }
    }

    fn app(&self) -> axum::Router {
        common::build_test_app(self.store.clone())
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = post_json_auth(self.app(), uri, body, &self.token).await;
        (response.status(), body_json(response).await)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = get_auth(self.app(), uri, &self.token).await;
        (response.status(), body_json(response).await)
    }

    async fn delete(&self, uri: &str) -> StatusCode {
        delete_auth(self.app(), uri, &self.token).await.status()
    }

    /// Create a workspace and return its id.
    async fn workspace(&self, name: &str) -> String {
        let (status, json) = self.post("/api/v1/workspaces", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_str().unwrap().to_string()
    }

    async fn node(&self, ws: &str, label: &str) -> String {
        let (status, json) = self
            .post(
                &format!("/api/v1/workspaces/{ws}/nodes"),
                json!({ "type": "INPUT", "label": label, "position": { "x": 0.0, "y": 0.0 } }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_str().unwrap().to_string()
    }
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_fetch_is_empty() {
    let h = Harness::new();

    let (status, created) = h.post("/api/v1/workspaces", json!({ "name": "Demo" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());

    let (status, fetched) = h.get(&format!("/api/v1/workspaces/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Demo");
    assert_eq!(fetched["data"]["nodes"], json!([]));
    assert_eq!(fetched["data"]["edges"], json!([]));
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let h = Harness::new();
    let (status, json) = h.post("/api/v1/workspaces", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(h.store.call_count(), 0);
}

#[tokio::test]
async fn list_returns_all_workspaces() {
    let h = Harness::new();
    h.workspace("One").await;
    h.workspace("Two").await;

    let (status, json) = h.get("/api/v1/workspaces").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_workspace_is_not_found() {
    let h = Harness::new();
    let (status, json) = h
        .get(&format!("/api/v1/workspaces/{}", Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_workspace_id_is_bad_request() {
    let h = Harness::new();
    let (status, json) = h.get("/api/v1/workspaces/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid workspace ID");
    assert_eq!(h.store.call_count(), 0);
}

#[tokio::test]
async fn rename_updates_name() {
    let h = Harness::new();
    let id = h.workspace("Old").await;

    let response = put_json_auth(
        h.app(),
        &format!("/api/v1/workspaces/{id}"),
        json!({ "name": "New" }),
        &h.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "New");

    let (_, fetched) = h.get(&format!("/api/v1/workspaces/{id}")).await;
    assert_eq!(fetched["data"]["name"], "New");
}

#[tokio::test]
async fn rename_missing_workspace_is_not_found() {
    let h = Harness::new();
    let response = put_json_auth(
        h.app(),
        &format!("/api/v1/workspaces/{}", Uuid::new_v4()),
        json!({ "name": "New" }),
        &h.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_leaves_nodes_orphaned() {
    let h = Harness::new();
    let id = h.workspace("Demo").await;
    h.node(&id, "Start").await;

    let status = h.delete(&format!("/api/v1/workspaces/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = h.get(&format!("/api/v1/workspaces/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let orphans = h.store.rows("nodes");
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0]["workspace_id"], id);
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn added_node_is_returned_with_workspace() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;

    let (status, created) = h
        .post(
            &format!("/api/v1/workspaces/{ws}/nodes"),
            json!({ "type": "INPUT", "label": "Start", "position": { "x": 0.0, "y": 0.0 } }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["type"], "INPUT");
    assert_eq!(created["data"]["data"], json!({}));

    let (_, fetched) = h.get(&format!("/api/v1/workspaces/{ws}")).await;
    let nodes = fetched["data"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["label"], "Start");
    assert_eq!(nodes[0]["type"], "INPUT");
    assert_eq!(nodes[0]["position"], json!({ "x": 0.0, "y": 0.0 }));
}

#[tokio::test]
async fn node_data_is_stored_as_given() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;
    let data = json!({ "threshold": 0.75, "tags": ["a", "b"], "nested": { "on": true } });

    let (status, created) = h
        .post(
            &format!("/api/v1/workspaces/{ws}/nodes"),
            json!({
                "type": "PROCESS",
                "label": "Filter",
                "data": data,
                "position": { "x": 10.5, "y": -4.0 }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["data"], data);
}

#[tokio::test]
async fn unknown_node_type_is_bad_request() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;
    let calls_before = h.store.call_count();

    let (status, _) = h
        .post(
            &format!("/api/v1/workspaces/{ws}/nodes"),
            json!({ "type": "SINK", "label": "x", "position": { "x": 0.0, "y": 0.0 } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.store.call_count(), calls_before);
}

#[tokio::test]
async fn removed_node_is_gone() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;
    let node = h.node(&ws, "Start").await;

    let status = h.delete(&format!("/api/v1/workspaces/{ws}/nodes/{node}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = h.get(&format!("/api/v1/workspaces/{ws}")).await;
    assert_eq!(fetched["data"]["nodes"], json!([]));
}

#[tokio::test]
async fn malformed_node_id_is_bad_request() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;
    let status = h.delete(&format!("/api/v1/workspaces/{ws}/nodes/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edges_connect_and_disconnect() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;
    let a = h.node(&ws, "A").await;
    let b = h.node(&ws, "B").await;

    let (status, created) = h
        .post(
            &format!("/api/v1/workspaces/{ws}/edges"),
            json!({ "source": a, "target": b }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let edge = created["data"]["id"].as_str().unwrap().to_string();

    let (_, fetched) = h.get(&format!("/api/v1/workspaces/{ws}")).await;
    let edges = fetched["data"]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["source"], a);
    assert_eq!(edges[0]["target"], b);

    let status = h.delete(&format!("/api/v1/workspaces/{ws}/edges/{edge}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = h.get(&format!("/api/v1/workspaces/{ws}")).await;
    assert_eq!(fetched["data"]["edges"], json!([]));
}

#[tokio::test]
async fn edge_with_non_uuid_endpoint_is_bad_request() {
    let h = Harness::new();
    let ws = h.workspace("Demo").await;
    let (status, _) = h
        .post(
            &format!("/api/v1/workspaces/{ws}/edges"),
            json!({ "source": "a", "target": "b" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Failure mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_never_reaches_the_store() {
    let h = Harness::new();
    let response = post_raw(h.app(), "/api/v1/workspaces", "{name: Demo}", Some(&h.token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.store.call_count(), 0);
}

#[tokio::test]
async fn upstream_failure_is_sanitized_500() {
    let h = Harness::new();
    h.store.respond_next(StoreResponse::new(
        503,
        r#"{"message":"connection to db-7.internal refused"}"#,
    ));

    let (status, json) = h.get("/api/v1/workspaces").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(!json.to_string().contains("db-7"));
}
