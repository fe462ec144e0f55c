use super::*;
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::FormField;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Debug)]
pub(crate) struct CapturedRequest {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
pub(crate) enum StubReply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

#[derive(Clone)]
struct StubState {
    tx: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
    reply: StubReply,
}

async fn handle_predict(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(CapturedRequest { content_type, body });
    }

    match state.reply {
        StubReply::Json(status, value) => (status, Json(value)).into_response(),
        StubReply::Text(status, text) => (status, text).into_response(),
    }
}

/// Serves `/api/predict` with a fixed reply and hands back the first request it sees.
pub(crate) async fn spawn_predict_server(
    reply: StubReply,
) -> Result<(String, oneshot::Receiver<CapturedRequest>)> {
    let (tx, rx) = oneshot::channel();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = StubState {
        tx: Arc::new(Mutex::new(Some(tx))),
        reply,
    };
    let app = Router::new()
        .route("/api/predict", post(handle_predict))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

/// A base URL nothing listens on.
pub(crate) fn unreachable_server_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

pub(crate) fn client_for(server_url: String) -> PredictionClient {
    PredictionClient::new(&ClientSettings {
        server_url,
        ..ClientSettings::default()
    })
    .expect("client")
}

fn sample_input() -> InputRecord {
    InputRecord {
        iq: "115".into(),
        cgpa: "9.0".into(),
        prev_sem_result: "8.0".into(),
        academic_performance: "8".into(),
        internship_experience: "Yes".into(),
        extra_curricular_score: "5".into(),
        communication_skills: "7".into(),
        projects_completed: "2".into(),
    }
}

#[tokio::test]
async fn posts_fields_verbatim_as_json_strings() {
    let (server_url, captured_rx) = spawn_predict_server(StubReply::Json(
        StatusCode::OK,
        json!({"placed": false, "salary": 0.0}),
    ))
    .await
    .expect("spawn server");
    let client = client_for(server_url);

    let input = InputRecord::collect(|field| match field {
        FormField::Iq => " 0x7F ".to_string(),
        FormField::Cgpa => "nine".to_string(),
        FormField::InternshipExperience => "yes".to_string(),
        FormField::ProjectsCompleted => String::new(),
        other => format!("{other}-\u{20b9}"),
    });
    client.predict(&input).await.expect("predict");

    let captured = captured_rx.await.expect("captured request");
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    let object = captured.body.as_object().expect("object body");
    assert_eq!(object.len(), 8);
    for field in FormField::ALL {
        assert_eq!(
            object.get(field.id()),
            Some(&Value::String(input.get(field).to_string())),
            "field {field}"
        );
    }
}

#[tokio::test]
async fn decodes_successful_prediction() {
    let (server_url, _captured) = spawn_predict_server(StubReply::Json(
        StatusCode::OK,
        json!({"placed": true, "salary": 1250000.0, "confidence": "High"}),
    ))
    .await
    .expect("spawn server");

    let response = client_for(server_url)
        .predict(&sample_input())
        .await
        .expect("predict");
    assert_eq!(
        response,
        PredictionResponse::placed(1_250_000.0).with_confidence("High")
    );
}

#[tokio::test]
async fn failure_status_carries_error_message() {
    let (server_url, _captured) = spawn_predict_server(StubReply::Json(
        StatusCode::BAD_REQUEST,
        json!({"error": "Invalid IQ value"}),
    ))
    .await
    .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_input())
        .await
        .expect_err("must fail");
    match err {
        PredictError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Invalid IQ value"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn failure_status_with_non_json_body_is_a_transport_failure() {
    let (server_url, _captured) = spawn_predict_server(StubReply::Text(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<html>boom</html>",
    ))
    .await
    .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_input())
        .await
        .expect_err("must fail");
    assert!(matches!(err, PredictError::Transport(_)), "{err}");
}

#[tokio::test]
async fn failure_status_with_json_but_no_error_field_has_no_message() {
    let (server_url, _captured) = spawn_predict_server(StubReply::Json(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"detail": "model not loaded"}),
    ))
    .await
    .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_input())
        .await
        .expect_err("must fail");
    assert!(
        matches!(
            err,
            PredictError::Rejected {
                status: 500,
                message: None
            }
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn failure_status_with_numeric_error_renders_it() {
    let (server_url, _captured) = spawn_predict_server(StubReply::Json(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"error": 123}),
    ))
    .await
    .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_input())
        .await
        .expect_err("must fail");
    match err {
        PredictError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message.as_deref(), Some("123"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_success_body_is_a_transport_failure() {
    let (server_url, _captured) =
        spawn_predict_server(StubReply::Text(StatusCode::OK, "not json"))
            .await
            .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_input())
        .await
        .expect_err("must fail");
    assert!(matches!(err, PredictError::Transport(_)), "{err}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let client = client_for(unreachable_server_url().expect("free port"));

    let err = client
        .predict(&sample_input())
        .await
        .expect_err("must fail");
    assert!(matches!(err, PredictError::Transport(_)), "{err}");
}

#[test]
fn rejects_invalid_endpoint_at_construction() {
    let err = PredictionClient::new(&ClientSettings {
        server_url: "127.0.0.1:5000".into(),
        ..ClientSettings::default()
    })
    .expect_err("must fail");
    assert!(matches!(err, PredictError::Endpoint { .. }), "{err}");
}
