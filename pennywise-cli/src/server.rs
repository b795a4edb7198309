//! HTTP transport: chat and dashboard data over one shared session.

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pennywise_core::{BudgetLimit, Category, Session, Tier, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Session handle shared by request handlers. Each request holds the lock
/// for its whole read-modify-reply cycle.
pub type SharedSession = Arc<Mutex<Session>>;

pub fn create_router(session: SharedSession) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/chat", post(chat))
        .route("/data", get(data));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(session)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn serve(session: Session, host: &str, port: u16) -> Result<()> {
    let app = create_router(Arc::new(Mutex::new(session)));
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    /// Ledger size after handling the message.
    pub transactions: usize,
    pub status: &'static str,
}

async fn chat(
    State(session): State<SharedSession>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(&e.body_text()))?;
    if req.message.trim().is_empty() {
        return Err(AppError::bad_request("message must not be empty"));
    }

    let mut session = session.lock().await;
    let response = session.respond(&req.message);
    Ok(Json(ChatResponse {
        response,
        transactions: session.ledger().len(),
        status: "success",
    }))
}

#[derive(Debug, Serialize)]
pub struct BudgetView {
    /// `None` for unbounded categories.
    pub budget: Option<Decimal>,
    pub spent: Decimal,
    pub remaining: Option<Decimal>,
    pub percentage: Decimal,
    pub status: Tier,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub transactions: Vec<Transaction>,
    pub spending_by_category: BTreeMap<Category, Decimal>,
    pub budget_status: BTreeMap<Category, BudgetView>,
    pub total_transactions: usize,
    pub total_spent: Decimal,
}

async fn data(State(session): State<SharedSession>) -> Result<Json<DataResponse>, AppError> {
    let session = session.lock().await;
    let ledger = session.ledger();

    let budget_status = session
        .statuses()
        .into_iter()
        .map(|s| {
            let budget = match s.limit {
                BudgetLimit::Bounded(v) => Some(v),
                BudgetLimit::Unbounded => None,
            };
            let view = BudgetView {
                budget,
                spent: s.spent,
                remaining: s.remaining,
                percentage: s.pct_used.round_dp(2),
                status: s.tier,
            };
            (s.category, view)
        })
        .collect();

    Ok(Json(DataResponse {
        transactions: ledger.transactions().to_vec(),
        spending_by_category: ledger.spending_by_category().into_iter().collect(),
        budget_status,
        total_transactions: ledger.len(),
        total_spent: ledger.total_spent(),
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred".to_string(),
            internal: Some(err.into()),
        }
    }
}
