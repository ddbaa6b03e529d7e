//! HttpBackend against an in-process fake of the contract-analysis service.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Form, Multipart};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use legal_lens::config::{ClientConfig, Timeouts};
use legal_lens::net::types::{DocId, FileUpload};
use legal_lens::workspace::Outcome;
use legal_lens::{ApiError, ContractBackend, HttpBackend, Workspace};
use serde_json::{Value, json};

type Reply = (StatusCode, Json<Value>);

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> Result<&'a str, Reply> {
    form.get(name).map(String::as_str).ok_or_else(|| {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": format!("field required: {name}") })))
    })
}

async fn upload_text(Form(form): Form<HashMap<String, String>>) -> Reply {
    match field(&form, "text") {
        Ok("reject me") => (StatusCode::BAD_REQUEST, Json(json!({ "detail": "text rejected" }))),
        Ok(text) => (StatusCode::OK, Json(json!({ "ok": true, "doc_id": format!("T{}", text.len()) }))),
        Err(reply) => reply,
    }
}

async fn upload(mut multipart: Multipart) -> Reply {
    while let Ok(Some(part)) = multipart.next_field().await {
        if part.name() != Some("file") {
            continue;
        }
        let file_name = part.file_name().unwrap_or_default().to_owned();
        let content_type = part.content_type().unwrap_or_default().to_owned();
        let Ok(bytes) = part.bytes().await else {
            break;
        };
        if !file_name.ends_with(".txt") {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Only .txt supported now" })));
        }
        let doc_id = format!("F-{file_name}-{content_type}-{}", bytes.len());
        return (StatusCode::OK, Json(json!({ "ok": true, "doc_id": doc_id })));
    }
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": "file part missing" })))
}

async fn summarize(Form(form): Form<HashMap<String, String>>) -> Reply {
    match field(&form, "doc_id") {
        Ok(doc_id) => (StatusCode::OK, Json(json!({ "summary": format!("- summary of {doc_id}\n- second point") }))),
        Err(reply) => reply,
    }
}

async fn risk(Form(form): Form<HashMap<String, String>>) -> Reply {
    match field(&form, "doc_id") {
        Ok("T4") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "risk model offline" }))),
        Ok(doc_id) => (
            StatusCode::OK,
            Json(json!({ "risks": [{ "type": "termination", "weight": "High", "context": doc_id }] })),
        ),
        Err(reply) => reply,
    }
}

async fn auto_queries(Form(form): Form<HashMap<String, String>>) -> Reply {
    match field(&form, "doc_id") {
        Ok(doc_id) => (StatusCode::OK, Json(json!({ "queries": [format!("What does {doc_id} say?")] }))),
        Err(reply) => reply,
    }
}

async fn qa(Form(form): Form<HashMap<String, String>>) -> Reply {
    let (question, doc_id) = match (field(&form, "question"), field(&form, "doc_id")) {
        (Ok(question), Ok(doc_id)) => (question, doc_id),
        (Err(reply), _) | (_, Err(reply)) => return reply,
    };
    (
        StatusCode::OK,
        Json(json!({ "answers": [
            format!("{question} @ {doc_id}"),
            { "answer": "structured", "score": 0.25, "context": "ctx" }
        ] })),
    )
}

async fn spawn_backend() -> HttpBackend {
    let app = Router::new()
        .route("/upload_text", post(upload_text))
        .route("/upload", post(upload))
        .route("/summarize", post(summarize))
        .route("/risk", post(risk))
        .route("/auto_queries", post(auto_queries))
        .route("/qa", post(qa));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    backend_for(&format!("http://{addr}"))
}

fn backend_for(base_url: &str) -> HttpBackend {
    let config = ClientConfig::new(base_url, Timeouts { request_secs: 5, connect_secs: 2 }).unwrap();
    HttpBackend::new(config).unwrap()
}

// =============================================================================
// endpoints
// =============================================================================

#[tokio::test]
async fn upload_text_posts_form_field() {
    let backend = spawn_backend().await;
    let doc_id = backend.upload_text("hello").await.unwrap();
    assert_eq!(doc_id, DocId::new("T5"));
}

#[tokio::test]
async fn upload_text_error_carries_detail() {
    let backend = spawn_backend().await;
    let err = backend.upload_text("reject me").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
    assert_eq!(err.alert_detail(), "text rejected");
}

#[tokio::test]
async fn upload_file_sends_multipart_part() {
    let backend = spawn_backend().await;
    let file = FileUpload { file_name: "nda.txt".into(), content_type: "text/plain", bytes: b"abc".to_vec() };
    let doc_id = backend.upload_file(file).await.unwrap();
    assert_eq!(doc_id.as_str(), "F-nda.txt-text/plain-3");
}

#[tokio::test]
async fn upload_file_error_field_is_used_as_detail() {
    let backend = spawn_backend().await;
    let file = FileUpload { file_name: "nda.pdf".into(), content_type: "application/pdf", bytes: vec![0x25] };
    let err = backend.upload_file(file).await.unwrap_err();
    assert_eq!(err.alert_detail(), "Only .txt supported now");
}

#[tokio::test]
async fn analysis_endpoints_send_doc_id() {
    let backend = spawn_backend().await;
    let doc_id = DocId::new("D1");

    assert_eq!(backend.summarize(&doc_id).await.unwrap(), "- summary of D1\n- second point");
    let risks = backend.analyze_risks(&doc_id).await.unwrap();
    assert_eq!(risks[0].kind, "termination");
    assert_eq!(risks[0].context, "D1");
    assert_eq!(backend.suggest_questions(&doc_id).await.unwrap(), ["What does D1 say?"]);
}

#[tokio::test]
async fn qa_sends_question_and_doc_id_and_accepts_both_answer_shapes() {
    let backend = spawn_backend().await;
    let answers = backend.answer("Who pays?", &DocId::new("D7")).await.unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].answer, "Who pays? @ D7");
    assert!(answers[0].score.is_none());
    assert_eq!(answers[1].answer, "structured");
    assert_eq!(answers[1].context.as_deref(), Some("ctx"));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_for(&format!("http://{addr}"));
    let err = backend.summarize(&DocId::new("D1")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

// =============================================================================
// workspace over HTTP
// =============================================================================

#[tokio::test]
async fn workspace_populates_state_from_http_backend() {
    let ws = Workspace::new(Arc::new(spawn_backend().await));
    ws.set_paste_text("a contract");

    assert_eq!(ws.submit_text().await, Outcome::Done);
    let state = ws.snapshot();
    assert_eq!(state.doc_id(), Some(&DocId::new("T10")));
    assert_eq!(state.summary(), "- summary of T10\n- second point");
    assert_eq!(state.risks().len(), 1);
    assert_eq!(state.suggestions(), ["What does T10 say?".to_owned()]);

    assert_eq!(ws.ask_suggested(0).await, Outcome::Done);
    assert_eq!(ws.snapshot().answers()[0].answer, "What does T10 say? @ T10");
}

#[tokio::test]
async fn workspace_keeps_summary_when_risk_step_fails() {
    let ws = Workspace::new(Arc::new(spawn_backend().await));
    ws.set_paste_text("abcd");

    assert_eq!(ws.submit_text().await, Outcome::Failed);
    let state = ws.snapshot();
    assert_eq!(state.summary(), "- summary of T4\n- second point");
    assert!(state.suggestions().is_empty());
    assert_eq!(state.alerts().len(), 1);
    assert!(!state.loading());
}
