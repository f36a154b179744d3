//! Integration tests against a mock experiment platform API.
//!
//! The mock server captures raw JSON bodies so the tests can assert the
//! exact wire encoding the platform expects, not just that our own types
//! round-trip.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;

use mindiff::{
    estimate, AttributionWindow, Baseline, CalculatorInputs, ClientError, Experiment,
    ExperimentStatus, Metric, MetricAssignmentRequest, MetricKind, MetricListResponse,
    PlatformClient, SampleSizeCalc, Variation,
};

const STAGING_EXPERIMENT_ID: u64 = 1;
const RUNNING_EXPERIMENT_ID: u64 = 2;

#[derive(Clone)]
struct MockPlatform {
    /// Raw assignment bodies received, in arrival order.
    captured_assignments: Arc<Mutex<Vec<serde_json::Value>>>,
}

fn metric_fixtures() -> Vec<Metric> {
    vec![
        Metric {
            metric_id: 31,
            name: "signup_rate".to_string(),
            description: "Signups over exposures".to_string(),
            parameter_type: MetricKind::Conversion,
        },
        Metric {
            metric_id: 32,
            name: "cash_sales".to_string(),
            description: "Cash sales per user".to_string(),
            parameter_type: MetricKind::Revenue,
        },
    ]
}

fn experiment_fixture(experiment_id: u64, status: ExperimentStatus) -> Experiment {
    Experiment {
        experiment_id,
        name: "checkout_test".to_string(),
        status,
        variations: vec![
            Variation {
                name: "control".to_string(),
                allocated_percentage: 60.0,
                is_default: true,
            },
            Variation {
                name: "treatment".to_string(),
                allocated_percentage: 40.0,
                is_default: false,
            },
        ],
    }
}

async fn list_metrics() -> Json<MetricListResponse> {
    Json(MetricListResponse::new(metric_fixtures()))
}

async fn get_experiment(Path(experiment_id): Path<u64>) -> impl IntoResponse {
    match experiment_id {
        STAGING_EXPERIMENT_ID => Json(experiment_fixture(
            STAGING_EXPERIMENT_ID,
            ExperimentStatus::Staging,
        ))
        .into_response(),
        RUNNING_EXPERIMENT_ID => Json(experiment_fixture(
            RUNNING_EXPERIMENT_ID,
            ExperimentStatus::Running,
        ))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn assign_metric(
    State(state): State<MockPlatform>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    state.captured_assignments.lock().unwrap().push(body);
    StatusCode::CREATED
}

async fn spawn_mock_platform() -> (String, MockPlatform) {
    let state = MockPlatform {
        captured_assignments: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/metrics", get(list_metrics))
        .route("/experiments/{id}", get(get_experiment))
        .route("/experiments/{id}/metric-assignments", post(assign_metric))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn connect(url: &str) -> PlatformClient {
    PlatformClient::connect(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_metrics() {
    let (url, _state) = spawn_mock_platform().await;
    let client = connect(&url);

    let metrics = client.fetch_metrics().await.unwrap();

    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].name, "signup_rate");
    assert_eq!(metrics[0].parameter_type, MetricKind::Conversion);
    assert_eq!(metrics[1].name, "cash_sales");
    assert_eq!(metrics[1].parameter_type, MetricKind::Revenue);
}

#[tokio::test]
async fn test_fetch_experiment() {
    let (url, _state) = spawn_mock_platform().await;
    let client = connect(&url);

    let experiment = client
        .fetch_experiment(STAGING_EXPERIMENT_ID)
        .await
        .unwrap();

    assert_eq!(experiment.status, ExperimentStatus::Staging);
    assert_eq!(experiment.min_variation_allocation(), Some(40.0));
}

#[tokio::test]
async fn test_assignment_round_trip_encodes_fields_exactly() {
    let (url, state) = spawn_mock_platform().await;
    let client = connect(&url);

    // "24 hours" selected in the dialog arrives on the wire as "86400".
    let request = MetricAssignmentRequest::new(
        31,
        AttributionWindow::TwentyFourHours,
        true,
        true,
        "0.01",
    );
    client
        .assign_metric(STAGING_EXPERIMENT_ID, &request)
        .await
        .unwrap();

    let captured = state.captured_assignments.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        captured[0],
        serde_json::json!({
            "metricId": 31,
            "attributionWindowSeconds": "86400",
            "changeExpected": true,
            "isPrimary": true,
            "minDifference": "0.01",
        })
    );
}

#[tokio::test]
async fn test_assignment_rejected_for_running_experiment() {
    let (url, state) = spawn_mock_platform().await;
    let client = connect(&url);

    let request =
        MetricAssignmentRequest::new(31, AttributionWindow::OneWeek, false, false, "0.5");
    let result = client.assign_metric(RUNNING_EXPERIMENT_ID, &request).await;

    match result {
        Err(ClientError::NotStaging {
            experiment_id,
            status,
        }) => {
            assert_eq!(experiment_id, RUNNING_EXPERIMENT_ID);
            assert_eq!(status, ExperimentStatus::Running);
        }
        other => panic!("Expected NotStaging error, got {:?}", other),
    }

    // The rejection happens client-side; nothing reaches the platform.
    assert!(state.captured_assignments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_experiment_not_found() {
    let (url, _state) = spawn_mock_platform().await;
    let client = connect(&url);

    let result = client.fetch_experiment(99).await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}

#[test]
fn test_end_to_end_conversion_scenario() {
    // 15,000 users/month at a 27.5% baseline; 100 extra conversions/month
    // make a practical difference.
    let inputs = CalculatorInputs {
        samples_per_month: 15_000.0,
        baseline: Baseline::Conversion { rate: 0.275 },
        extra_per_month: 100.0,
        allocations: vec![50.0, 50.0],
    };
    let result = estimate(&inputs, &SampleSizeCalc::default());

    assert_eq!(result.min_practical_diff, 0.67);

    let samples = result.samples_per_variation.unwrap();
    assert!(samples > 0);
    assert!(result.duration_days.unwrap() > 0);

    // The derived difference feeds the formatter as a rate.
    let formatted = mindiff::format_metric_value(
        result.min_practical_diff / 100.0,
        MetricKind::Conversion,
        true,
        false,
        true,
        false,
    );
    assert_eq!(formatted, "0.67pp");
}
