//! Route-level tests: drive the router with in-memory requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use pulldown_common::Record;
use pulldown_data::{Dataset, LoadReport};
use pulldown_string::{InteractionNetwork, LookupError};
use pulldown_web::config::Config;
use pulldown_web::router::build_router;
use pulldown_web::state::AppState;

const NETWORK_URL: &str = "https://version-11-5.string-db.org/cgi/network?networkId=test";

struct CountingNetwork {
    calls: AtomicUsize,
}

#[async_trait]
impl InteractionNetwork for CountingNetwork {
    async fn network_link(&self, _genes: &[String]) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(NETWORK_URL.to_string())
    }
}

fn record(id: &str, gene: &str, tissue: &str, bait: &str, lfc: f64, pval: f64) -> Record {
    Record::new(id, gene, tissue, bait, lfc, pval).unwrap()
}

fn dataset() -> Dataset {
    Dataset::new(vec![
        record("Q9VKM3-1", "piwi", "Ovary", "D1", 2.0, 0.01),
        record("Q9VKM3-2", "piwi", "Testis", "Prod", 0.5, 0.2),
        record("P08970", "D1", "Embryo", "D1", 3.1, 0.0001),
        record("Q9W1N3", "prod", "Embryo", "Prod", -1.4, 0.03),
        record("Q9VMJ4", "", "Embryo", "D1", 0.2, 0.5),
        record("P48609", "Cdk5", "Ovary", "Prod", 1.2, 0.04),
    ])
}

fn app_with(config: Config) -> (Router, Arc<CountingNetwork>) {
    let network = Arc::new(CountingNetwork { calls: AtomicUsize::new(0) });
    let mut config = config;
    config.string_db.pause_ms = 0;
    let state = AppState::new(dataset(), LoadReport::default(), network.clone(), config).unwrap();
    (build_router(state), network)
}

fn app() -> Router {
    app_with(Config::default()).0
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn genes(body: &Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Gene"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 6);
}

#[tokio::test]
async fn test_rows_default_view() {
    let (status, body) = send(app(), get("/api/rows")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    assert_eq!(body["page_size"], 10);
    assert_eq!(body["page_count"], 1);
    assert_eq!(
        body["message"],
        "Number of unique gene names: 4. Number of unique UNIPROT IDs: 6"
    );

    let first = &body["rows"][0];
    assert_eq!(first["UniProtAccession"], "Q9VKM3");
    assert_eq!(first["link"], "https://www.uniprot.org/uniprotkb/Q9VKM3");
    assert_eq!(first["uniprot_markdown"], "[Q9VKM3](https://www.uniprot.org/uniprotkb/Q9VKM3)");
    assert_eq!(first["lfc_display"], "2.00");
    assert_eq!(first["pval_display"], "1.00e-2");
}

#[tokio::test]
async fn test_rows_filter_sort_and_page() {
    let uri = "/api/rows?filter=%7BLFC%7D%20%3E%201&sort=LFC:desc&page_size=2&page=1";
    let (status, body) = send(app(), get(uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page_count"], 2);
    // LFC desc: D1 3.1, piwi 2.0 | Cdk5 1.2
    assert_eq!(genes(&body), vec!["Cdk5".to_string()]);
}

#[tokio::test]
async fn test_rows_bait_exact_match() {
    let (_, body) = send(app(), get("/api/rows?filter=%7BBait%7D%20D1")).await;
    assert_eq!(body["total"], 3);
    assert!(body["rows"].as_array().unwrap().iter().all(|r| r["Bait"] == "D1"));
}

#[tokio::test]
async fn test_rows_malformed_filter_is_empty_view() {
    let (status, body) = send(app(), get("/api/rows?filter=%7BLFC%7D%20%3E%20high")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["message"], "No genes selected");
    assert!(body["filter_error"].as_str().unwrap().contains("high"));
}

#[tokio::test]
async fn test_rows_bad_sort_column() {
    let (status, body) = send(app(), get("/api/rows?sort=Score:desc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_point_click_pins_rows() {
    let request = post_json(
        "/api/table/event",
        json!({ "trigger": "point_clicked", "tissue": "Ovary", "payload": "Q9VKM3" }),
    );
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], json!({ "source": { "kind": "pinned", "accession": "Q9VKM3" }, "filter": "" }));
    assert_eq!(body["total"], 2);
    assert_eq!(body["uniprot_link"], "https://www.uniprot.org/uniprotkb/Q9VKM3");

    let (_, rows) = send(app(), get("/api/rows?pinned=Q9VKM3")).await;
    assert_eq!(rows["total"], 2);
    assert_eq!(
        rows["message"],
        "Number of unique gene names: 1. Number of unique UNIPROT IDs: 2"
    );
}

#[tokio::test]
async fn test_point_click_with_blank_payload_is_empty() {
    for payload in ["", " "] {
        let request = post_json(
            "/api/table/event",
            json!({ "trigger": "point_clicked", "tissue": "Embryo", "payload": payload }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["message"], "No genes selected");
    }

    let (status, rows) = send(app(), get("/api/rows?pinned=%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows["total"], 0);
    assert_eq!(rows["state"]["source"], json!({ "kind": "pinned", "accession": "" }));
}

#[tokio::test]
async fn test_clear_resets_state() {
    let (status, body) = send(app(), post_json("/api/table/event", json!({ "trigger": "clear_filter" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], json!({ "source": { "kind": "all" }, "filter": "" }));
    assert_eq!(body["total"], 6);
    assert!(body.get("uniprot_link").is_none());
}

#[tokio::test]
async fn test_no_trigger_is_no_content() {
    let (status, body) = send(app(), post_json("/api/table/event", json!({ "trigger": "no_trigger" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_tissues_options() {
    let (status, body) = send(app(), get("/api/tissues")).await;
    assert_eq!(status, StatusCode::OK);

    let tissues = body["tissues"].as_array().unwrap();
    let labels: Vec<&str> = tissues.iter().map(|t| t["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Embryo", "Ovary", "Testis"]);

    assert_eq!(tissues[0]["baits"], json!(["D1", "Prod"]));
    assert_eq!(tissues[0]["default_bait"], "D1");
    assert_eq!(tissues[0]["genes"], json!(["D1", "prod"]));
    assert_eq!(tissues[2]["default_bait"], "Prod");
}

#[tokio::test]
async fn test_volcano_default_bait() {
    let (status, body) = send(app(), get("/api/volcano/Embryo")).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["x"], json!([3.1, 0.2]));
    assert_eq!(data[0]["customdata"], json!(["P08970", "Q9VMJ4"]));
    assert_eq!(data[0]["marker"]["color"], json!(["#446e9b", "#999"]));
    assert_eq!(body["layout"]["height"], 500);
    assert_eq!(body["layout"]["showlegend"], false);
    assert_eq!(body["layout"]["shapes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_volcano_overlay() {
    let (_, body) = send(app(), get("/api/volcano/ovary?bait=D1&genes=piwi&genes=nanos")).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[1]["customdata"], json!(["Q9VKM3"]));
    assert_eq!(data[1]["marker"]["color"], "#d47500");
    assert_eq!(data[1]["marker"]["size"], 20.0);
}

#[tokio::test]
async fn test_volcano_gene_with_comma_is_one_symbol() {
    let (status, body) = send(app(), get("/api/volcano/Ovary?bait=D1&genes=piwi%2Cnanos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_volcano_unknown_tissue() {
    let (status, body) = send(app(), get("/api/volcano/Brain")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Unknown tissue: Brain");
}

#[tokio::test]
async fn test_string_link_for_visible_genes() {
    let (app, network) = app_with(Config::default());
    let request = post_json(
        "/api/string",
        json!({ "source": { "kind": "all" }, "filter": "{Tissue} Embryo" }),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "link");
    assert_eq!(body["url"], NETWORK_URL);
    // "D1" and "prod"; the empty gene name is not submitted
    assert_eq!(body["gene_count"], 2);
    assert_eq!(body["label"], "View PPI network for 2 genes");
    assert_eq!(network.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_string_too_many_genes() {
    let mut config = Config::default();
    config.string_db.gene_limit = 4;
    let (app, network) = app_with(config);

    let (status, body) = send(app, post_json("/api/string", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "too_many");
    assert_eq!(body["gene_count"], 4);
    assert_eq!(body["message"], "Too many genes selected");
    assert_eq!(network.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_index_page() {
    let resp = app().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(html.contains("Multi-tissue proteomics of satellite DNA-binding proteins"));
    assert!(html.contains(r#"data-tissue="Testis""#));
    assert!(html.contains(r#"value="D1" checked"#));
    assert!(html.contains("Generate PPI network for selected genes via STRING-db"));
}
