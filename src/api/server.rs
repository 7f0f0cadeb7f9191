//! HTTP server: the `/api/tasks` routes and the bundled web UI.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json},
    routing::get,
};
use std::future::Future;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::templates;
use crate::error::{ApiError, TaskError};
use crate::service::TaskService;
use crate::types::{NewTask, Task, TaskId, TaskInput};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    service: TaskService,
}

impl AppState {
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &TaskService {
        &self.service
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn index() -> Html<&'static str> {
    Html(templates::INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        templates::APP_JS,
    )
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/tasks
async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.service().get_all_tasks()?))
}

/// GET /api/tasks/{id}
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<Task>> {
    let task = state
        .service()
        .get_task_by_id(id)?
        .ok_or(TaskError::NotFound(id))?;
    Ok(Json(task))
}

/// POST /api/tasks
async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Json<Task>> {
    let task = state.service().save_task(NewTask::from(input))?;
    info!(task_id = task.id, "Task created");
    Ok(Json(task))
}

/// PUT /api/tasks/{id}
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Json<Task>> {
    let task = state.service().update_task(id, input)?;
    info!(task_id = id, "Task updated");
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> ApiResult<StatusCode> {
    state.service().delete_task(id)?;
    info!(task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI
        .route("/", get(index))
        .route("/app.js", get(app_js))
        // API
        .route("/api/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `addr` until `shutdown` resolves.
pub async fn serve<F>(service: TaskService, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task API listening on http://{}", bound_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Task API shut down");
    Ok(())
}
