//! Voting page and ops handlers over an in-memory store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};

use votebox_core::MemoryStore;
use votebox_gateway::{
    app_state::AppState,
    config::{self, FileConfig},
    ops,
    web::{self, VoteForm},
};

fn setup() -> (Arc<MemoryStore>, AppState) {
    let cfg = config::resolve(FileConfig::default(), &|_: &str| None::<String>).unwrap();
    let kv = Arc::new(MemoryStore::new());
    let state = AppState::new(cfg, kv.clone());
    (kv, state)
}

fn form(vote: &str) -> Form<VoteForm> {
    Form(VoteForm {
        vote: Some(vote.to_string()),
    })
}

async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_renders_both_counters_at_zero() {
    let (_, state) = setup();
    state.init_counters().await.unwrap();

    let page = web::index(State(state)).await.unwrap().0;
    assert!(page.contains("<title>Azure Voting App</title>"));
    assert!(page.contains(r#"value="Cats""#));
    assert!(page.contains(r#"value="Dogs""#));
    assert!(page.contains(r#"value="reset""#));
    assert!(page.contains("Cats - 0 | Dogs - 0"));
}

#[tokio::test]
async fn post_increments_then_reset_zeroes() {
    let (_, state) = setup();
    state.init_counters().await.unwrap();

    let page = web::vote(State(state.clone()), form("Cats")).await.unwrap().0;
    assert!(page.contains("Cats - 1 | Dogs - 0"));

    web::vote(State(state.clone()), form("Cats")).await.unwrap();
    let page = web::vote(State(state.clone()), form("Dogs")).await.unwrap().0;
    assert!(page.contains("Cats - 2 | Dogs - 1"));

    let page = web::vote(State(state.clone()), form("reset")).await.unwrap().0;
    assert!(page.contains("Cats - 0 | Dogs - 0"));

    let metrics = state.metrics();
    assert_eq!(metrics.votes.get(&[("option", "Cats")]), 2);
    assert_eq!(metrics.votes.get(&[("option", "Dogs")]), 1);
    assert_eq!(metrics.resets.get(&[]), 1);
    assert_eq!(metrics.tally.get(&[("option", "Cats")]), Some(0));
}

#[tokio::test]
async fn unknown_or_missing_vote_is_bad_request() {
    let (kv, state) = setup();

    let err = web::vote(State(state.clone()), form("Birds")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(!kv.contains_key("Birds"));

    let err = web::vote(State(state), Form(VoteForm { vote: None }))
        .await
        .unwrap_err();
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.starts_with("BAD_REQUEST:"));
}

#[tokio::test]
async fn store_down_is_service_unavailable() {
    let (kv, state) = setup();
    state.init_counters().await.unwrap();
    kv.set_connected(false);

    let err = web::index(State(state.clone())).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

    let err = web::vote(State(state.clone()), form("Dogs")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

    let failures = state
        .metrics()
        .store_ops
        .get(&[("op", "increment"), ("outcome", "NOT_CONNECTED")]);
    assert_eq!(failures, 1);
}

#[tokio::test]
async fn corrupt_counter_is_internal_error() {
    let (kv, state) = setup();
    kv.put_raw("Cats", "NaN");

    let err = web::index(State(state)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(err.into_response()).await;
    assert!(body.starts_with("CORRUPT_STATE:"));
}

#[tokio::test]
async fn initialization_fails_when_store_unreachable() {
    let (kv, state) = setup();
    kv.set_connected(false);

    let err = state.init_counters().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "NOT_CONNECTED");
}

#[tokio::test]
async fn labels_are_html_escaped() {
    let cfg = config::resolve(FileConfig::default(), &|k: &str| match k {
        "VOTE1VALUE" => Some("<b>Cats</b>".to_string()),
        "TITLE" => Some("Q&A".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::new(cfg, Arc::new(MemoryStore::new()));

    let page = web::index(State(state)).await.unwrap().0;
    assert!(page.contains("&lt;b&gt;Cats&lt;/b&gt; - 0"));
    assert!(page.contains("<title>Q&amp;A</title>"));
    assert!(!page.contains("<b>Cats</b>"));
}

#[tokio::test]
async fn readiness_tracks_store_and_draining() {
    let (kv, state) = setup();

    let resp = ops::readyz(State(state.clone())).await;
    assert_eq!(resp.status(), StatusCode::OK);

    kv.set_connected(false);
    let resp = ops::readyz(State(state.clone())).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(resp).await.contains("store_unreachable"));

    kv.set_connected(true);
    state.set_draining();
    let resp = ops::readyz(State(state)).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(resp).await.contains("draining"));
}

#[tokio::test]
async fn metrics_endpoint_renders_store_series() {
    let (_, state) = setup();
    state.init_counters().await.unwrap();
    web::vote(State(state.clone()), form("Dogs")).await.unwrap();

    let resp = ops::metrics(State(state)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = body_text(resp).await;
    assert!(text.contains("votebox_votes_total{option=\"Dogs\"} 1"));
    assert!(text.contains("votebox_store_ops_total{op=\"increment\",outcome=\"ok\"} 1"));
    assert!(text.contains("votebox_tally{option=\"Dogs\"} 1"));
}
