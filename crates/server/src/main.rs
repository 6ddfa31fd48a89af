// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use reflektion_api::{
    ApiError, AssignCoordinatorRequest, AssignDepartmentHeadRequest, AuthenticatedActor,
    ClassRequest, CreateClassRequest, CreateDepartmentHeadRequest, CreateDepartmentRequest,
    CreateDivisionRequest, CreateFacultyRequest, CreateLabRequest, CreateResponse,
    CreateSubjectRequest, DivisionRequest, FacultyClassRequest, FacultyRequest, LabRequest,
    ListClassesResponse, ListDepartmentsResponse, ListLabsRequest, ListLabsResponse,
    PreviewRequest, PreviewResponse, Role, SetHeadManagementRequest, UpdateClassRequest,
    UpdateDepartmentRequest, UpdateFacultyRequest, UpdateLabRequest, WriteResponse,
    assign_coordinator, assign_department_head, assign_faculty_class, authenticate_stub,
    create_class, create_department, create_department_head, create_division, create_faculty,
    create_lab, create_subject, delete_class, delete_division, delete_faculty, delete_lab,
    list_classes, list_departments, list_labs, preview_identifier, remove_coordinator,
    set_head_management, unassign_faculty_class, update_class, update_department,
    update_faculty, update_lab,
};
use reflektion_persistence::Persistence;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Reflektion Server - HTTP server for the Reflektion attendance system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// Every request locks the persistence layer for its whole
/// read-apply-persist cycle.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// A write request body: the acting operator plus the operation's fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    #[serde(flatten)]
    request: T,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses the actor fields of a request and authenticates the actor.
fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = actor_role.parse().map_err(ApiError::from)?;
    let actor: AuthenticatedActor =
        authenticate_stub(actor_id.to_string(), role).map_err(ApiError::from)?;
    Ok(actor)
}

/// Signature shared by every authorized write handler in the API crate.
type WriteHandler<T, R> = fn(&mut Persistence, &T, &AuthenticatedActor) -> Result<R, ApiError>;

/// Authenticates the actor and runs `handler` against the shared persistence.
async fn run_write<T, R>(
    app_state: &AppState,
    envelope: ActorRequest<T>,
    handler: WriteHandler<T, R>,
) -> Result<Json<R>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&envelope.actor_id, &envelope.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: R = handler(&mut persistence, &envelope.request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Departments and heads
// ============================================================================

/// Handler for POST `/departments` endpoint.
async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateDepartmentRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.request.name,
        "Handling create_department request"
    );
    run_write(&app_state, req, create_department).await
}

/// Handler for GET `/departments` endpoint.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListDepartmentsResponse>, HttpError> {
    info!("Handling list_departments request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListDepartmentsResponse = list_departments(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/departments/update` endpoint.
async fn handle_update_department(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<UpdateDepartmentRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        department = req.request.department,
        "Handling update_department request"
    );
    run_write(&app_state, req, update_department).await
}

/// Handler for POST `/department_heads` endpoint.
async fn handle_create_department_head(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateDepartmentHeadRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.request.name,
        "Handling create_department_head request"
    );
    run_write(&app_state, req, create_department_head).await
}

/// Handler for POST `/department_heads/assign` endpoint.
async fn handle_assign_department_head(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<AssignDepartmentHeadRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        head = req.request.head,
        department = req.request.department,
        "Handling assign_department_head request"
    );
    run_write(&app_state, req, assign_department_head).await
}

/// Handler for POST `/department_heads/management` endpoint.
async fn handle_set_head_management(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<SetHeadManagementRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        head = req.request.head,
        enabled = req.request.enabled,
        "Handling set_head_management request"
    );
    run_write(&app_state, req, set_head_management).await
}

// ============================================================================
// Faculty
// ============================================================================

/// Handler for POST `/faculty` endpoint.
async fn handle_create_faculty(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateFacultyRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.request.name,
        "Handling create_faculty request"
    );
    run_write(&app_state, req, create_faculty).await
}

/// Handler for POST `/faculty/update` endpoint.
async fn handle_update_faculty(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<UpdateFacultyRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        faculty = req.request.faculty,
        "Handling update_faculty request"
    );
    run_write(&app_state, req, update_faculty).await
}

/// Handler for POST `/faculty/delete` endpoint.
async fn handle_delete_faculty(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<FacultyRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        faculty = req.request.faculty,
        "Handling delete_faculty request"
    );
    run_write(&app_state, req, delete_faculty).await
}

/// Handler for POST `/faculty/assign_class` endpoint.
async fn handle_assign_faculty_class(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<FacultyClassRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        faculty = req.request.faculty,
        class = req.request.class,
        "Handling assign_faculty_class request"
    );
    run_write(&app_state, req, assign_faculty_class).await
}

/// Handler for POST `/faculty/unassign_class` endpoint.
async fn handle_unassign_faculty_class(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<FacultyClassRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        faculty = req.request.faculty,
        class = req.request.class,
        "Handling unassign_faculty_class request"
    );
    run_write(&app_state, req, unassign_faculty_class).await
}

// ============================================================================
// Classes and divisions
// ============================================================================

/// Handler for POST `/classes` endpoint.
async fn handle_create_class(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateClassRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.request.name,
        year = %req.request.year,
        "Handling create_class request"
    );
    run_write(&app_state, req, create_class).await
}

/// Handler for GET `/classes` endpoint.
///
/// Lists every class with its divisions.
async fn handle_list_classes(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListClassesResponse>, HttpError> {
    info!("Handling list_classes request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListClassesResponse = list_classes(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/classes/update` endpoint.
async fn handle_update_class(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<UpdateClassRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        class = req.request.class,
        "Handling update_class request"
    );
    run_write(&app_state, req, update_class).await
}

/// Handler for POST `/classes/delete` endpoint.
async fn handle_delete_class(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<ClassRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        class = req.request.class,
        "Handling delete_class request"
    );
    run_write(&app_state, req, delete_class).await
}

/// Handler for POST `/divisions` endpoint.
async fn handle_create_division(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateDivisionRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        class = req.request.class,
        name = %req.request.name,
        "Handling create_division request"
    );
    run_write(&app_state, req, create_division).await
}

/// Handler for POST `/divisions/delete` endpoint.
async fn handle_delete_division(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<DivisionRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        division = req.request.division,
        "Handling delete_division request"
    );
    run_write(&app_state, req, delete_division).await
}

// ============================================================================
// Labs
// ============================================================================

/// Handler for POST `/labs` endpoint.
async fn handle_create_lab(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateLabRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        scope = ?req.request.scope,
        start = req.request.start,
        end = req.request.end,
        "Handling create_lab request"
    );
    run_write(&app_state, req, create_lab).await
}

/// Handler for POST `/labs/update` endpoint.
async fn handle_update_lab(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<UpdateLabRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        lab = req.request.lab,
        start = req.request.start,
        end = req.request.end,
        "Handling update_lab request"
    );
    run_write(&app_state, req, update_lab).await
}

/// Handler for POST `/labs/delete` endpoint.
async fn handle_delete_lab(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<LabRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        lab = req.request.lab,
        "Handling delete_lab request"
    );
    run_write(&app_state, req, delete_lab).await
}

/// Handler for GET `/labs` endpoint.
///
/// Accepts an optional `class` or `division` query parameter.
async fn handle_list_labs(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListLabsRequest>,
) -> Result<Json<ListLabsResponse>, HttpError> {
    info!(
        class = ?query.class,
        division = ?query.division,
        "Handling list_labs request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListLabsResponse = list_labs(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Subjects and coordinators
// ============================================================================

/// Handler for POST `/subjects` endpoint.
async fn handle_create_subject(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<CreateSubjectRequest>>,
) -> Result<Json<CreateResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        code = %req.request.code,
        department = req.request.department,
        "Handling create_subject request"
    );
    run_write(&app_state, req, create_subject).await
}

/// Handler for POST `/coordinators/assign` endpoint.
async fn handle_assign_coordinator(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<AssignCoordinatorRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        faculty = req.request.faculty,
        target = %req.request.target,
        "Handling assign_coordinator request"
    );
    run_write(&app_state, req, assign_coordinator).await
}

/// Handler for POST `/coordinators/remove` endpoint.
async fn handle_remove_coordinator(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest<FacultyRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        faculty = req.request.faculty,
        "Handling remove_coordinator request"
    );
    run_write(&app_state, req, remove_coordinator).await
}

// ============================================================================
// Previews
// ============================================================================

/// Handler for POST `/preview/{kind}` endpoint.
///
/// The body carries the fields for that kind of record, e.g.
/// `{"name": "Second Year", "year": "2025-26"}` for `/preview/class`.
async fn handle_preview(
    AxumState(app_state): AxumState<AppState>,
    Path(kind): Path<String>,
    Json(mut body): Json<Map<String, Value>>,
) -> Result<Json<PreviewResponse>, HttpError> {
    info!(kind = %kind, "Handling preview request");

    body.insert(String::from("kind"), Value::String(kind.clone()));
    let request: PreviewRequest =
        serde_json::from_value(Value::Object(body)).map_err(|e| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid preview request for '{kind}': {e}"),
        })?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PreviewResponse = preview_identifier(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/departments", post(handle_create_department))
        .route("/departments", get(handle_list_departments))
        .route("/departments/update", post(handle_update_department))
        .route("/department_heads", post(handle_create_department_head))
        .route(
            "/department_heads/assign",
            post(handle_assign_department_head),
        )
        .route(
            "/department_heads/management",
            post(handle_set_head_management),
        )
        .route("/faculty", post(handle_create_faculty))
        .route("/faculty/update", post(handle_update_faculty))
        .route("/faculty/delete", post(handle_delete_faculty))
        .route("/faculty/assign_class", post(handle_assign_faculty_class))
        .route(
            "/faculty/unassign_class",
            post(handle_unassign_faculty_class),
        )
        .route("/classes", post(handle_create_class))
        .route("/classes", get(handle_list_classes))
        .route("/classes/update", post(handle_update_class))
        .route("/classes/delete", post(handle_delete_class))
        .route("/divisions", post(handle_create_division))
        .route("/divisions/delete", post(handle_delete_division))
        .route("/labs", post(handle_create_lab))
        .route("/labs", get(handle_list_labs))
        .route("/labs/update", post(handle_update_lab))
        .route("/labs/delete", post(handle_delete_lab))
        .route("/subjects", post(handle_create_subject))
        .route("/coordinators/assign", post(handle_assign_coordinator))
        .route("/coordinators/remove", post(handle_remove_coordinator))
        .route("/preview/{kind}", post(handle_preview))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Reflektion Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use reflektion_domain::LabScope;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Wraps a request in the actor envelope.
    fn envelope<T>(role: &str, request: T) -> ActorRequest<T> {
        ActorRequest {
            actor_id: String::from("operator-1"),
            actor_role: role.to_string(),
            request,
        }
    }

    async fn post_json<T: Serialize>(app: &Router, uri: &str, body: &T) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_request(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    async fn create_class_as_head(app: &Router) -> CreateResponse {
        let req: ActorRequest<CreateClassRequest> = envelope(
            "department_head",
            CreateClassRequest {
                name: String::from("Second Year"),
                year: String::from("2025-26"),
            },
        );
        let response: Response = post_json(app, "/classes", &req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_create_department_as_super_admin_succeeds() {
        let app: Router = build_router(create_test_app_state());

        let req: ActorRequest<CreateDepartmentRequest> = envelope(
            "super_admin",
            CreateDepartmentRequest {
                name: String::from("Computer Science"),
            },
        );
        let response: Response = post_json(&app, "/departments", &req).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let created: CreateResponse = read_json(response).await;
        assert_eq!(created.identifier, "COMPUTER_SCIENCE");

        let list_response: Response = get_request(&app, "/departments").await;
        assert_eq!(list_response.status(), HttpStatusCode::OK);
        let listed: ListDepartmentsResponse = read_json(list_response).await;
        assert_eq!(listed.departments.len(), 1);
        assert_eq!(listed.departments[0].id, created.id);
    }

    #[tokio::test]
    async fn test_faculty_role_is_forbidden_from_writes() {
        let app: Router = build_router(create_test_app_state());

        let req: ActorRequest<CreateClassRequest> = envelope(
            "faculty",
            CreateClassRequest {
                name: String::from("Second Year"),
                year: String::from("2025-26"),
            },
        );
        let response: Response = post_json(&app, "/classes", &req).await;

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
        let error_response: ErrorResponse = read_json(response).await;
        assert!(error_response.error);
        assert!(error_response.message.contains("Unauthorized"));

        let listed: ListClassesResponse = read_json(get_request(&app, "/classes").await).await;
        assert!(listed.classes.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_role_is_unauthenticated() {
        let app: Router = build_router(create_test_app_state());

        let req: ActorRequest<CreateDepartmentRequest> = envelope(
            "janitor",
            CreateDepartmentRequest {
                name: String::from("Physics"),
            },
        );
        let response: Response = post_json(&app, "/departments", &req).await;

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_overlapping_lab_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let class: CreateResponse = create_class_as_head(&app).await;
        let scope: LabScope = LabScope::Class(class.id);

        let first: ActorRequest<CreateLabRequest> = envelope(
            "department_head",
            CreateLabRequest {
                scope,
                name: String::from("Batch 1"),
                start: 1,
                end: 30,
            },
        );
        assert_eq!(
            post_json(&app, "/labs", &first).await.status(),
            HttpStatusCode::OK
        );

        let second: ActorRequest<CreateLabRequest> = envelope(
            "department_head",
            CreateLabRequest {
                scope,
                name: String::from("Batch 2"),
                start: 30,
                end: 45,
            },
        );
        let response: Response = post_json(&app, "/labs", &second).await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let error_response: ErrorResponse = read_json(response).await;
        assert!(error_response.message.contains("Batch 1"));

        let uri: String = format!("/labs?class={}", class.id);
        let listed: ListLabsResponse = read_json(get_request(&app, &uri).await).await;
        assert_eq!(listed.labs.len(), 1);
    }

    #[tokio::test]
    async fn test_preview_lab_reports_next_start() {
        let app: Router = build_router(create_test_app_state());
        let class: CreateResponse = create_class_as_head(&app).await;

        let body: Value = serde_json::json!({
            "scope": { "type": "class", "target_id": class.id },
            "name": "Batch 1",
        });
        let response: Response = post_json(&app, "/preview/lab", &body).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let preview: PreviewResponse = read_json(response).await;
        assert!(preview.is_unique);
        assert!(preview.resolved_id.starts_with("LAB_SEC_BA_"));
        assert_eq!(preview.next_available_start, Some(1));
    }

    #[tokio::test]
    async fn test_preview_unknown_kind_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let body: Value = serde_json::json!({ "name": "Anything" });
        let response: Response = post_json(&app, "/preview/building", &body).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_blank_name_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let body: Value = serde_json::json!({ "name": "   " });
        let response: Response = post_json(&app, "/preview/department", &body).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_missing_class_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let req: ActorRequest<ClassRequest> =
            envelope("department_head", ClassRequest { class: 99 });
        let response: Response = post_json(&app, "/classes/delete", &req).await;

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_labs_with_two_filters_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response: Response = get_request(&app, "/labs?class=1&division=2").await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err: HttpError = HttpError::from(ApiError::Conflict {
            message: String::from("please retry"),
        });
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let err: HttpError = HttpError::from(ApiError::Internal {
            message: String::from("boom"),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
