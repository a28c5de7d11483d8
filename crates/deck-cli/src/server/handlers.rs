//! Endpoint handlers. Each takes an [`ApiRequest`] and yields an
//! [`ApiResponse`]; nothing here touches the socket.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use deck_auth::{AuthPolicy, Authenticator};
use deck_config::DeckConfig;
use deck_core::entities::{NewTask, ScoredTask};
use deck_core::enums::{Category, Complexity, Priority};
use deck_core::errors::CoreError;
use deck_core::filter::{CompletionMap, Selection, StatusFilter, TaskFilter};
use deck_core::identity::AuthIdentity;
use deck_core::pipeline::{Page, PageRequest, SortOrder};
use deck_core::responses::{ErrorResponse, LoginResponse, RegisterResponse, TaskListResponse};
use deck_db::DeckService;
use deck_db::repos::tasks::TaskQuery;
use deck_db::updates::task::TaskUpdateBuilder;

use crate::commands::shared::listing::task_page;
use crate::server::error::ApiError;
use crate::server::request::ApiRequest;
use crate::server::routes::{AuthRoute, Route, TaskRoute, route};

/// Shared state for every request.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<DeckService>,
    pub config: DeckConfig,
}

impl ApiState {
    #[must_use]
    pub const fn new(service: Arc<DeckService>, config: DeckConfig) -> Self {
        Self { service, config }
    }

    fn authenticator(&self) -> Authenticator<'_> {
        Authenticator::new(&self.service, AuthPolicy::from(&self.config.auth))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<String>,
    /// Set on 405 responses.
    pub allow: Option<&'static str>,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                body: Some(body),
                allow: None,
            },
            Err(error) => {
                tracing::error!(%error, "response serialization failed");
                Self::from_error(&ApiError::Internal)
            }
        }
    }

    const fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
            allow: None,
        }
    }

    fn from_error(error: &ApiError) -> Self {
        let body = serde_json::to_string(&ErrorResponse {
            error: error.to_string(),
        })
        .unwrap_or_else(|_| r#"{"error":"Internal Server Error"}"#.to_string());
        let allow = match error {
            ApiError::MethodNotAllowed { allow } => Some(*allow),
            _ => None,
        };
        Self {
            status: error.status(),
            body: Some(body),
            allow,
        }
    }
}

/// Route, authenticate when required, and run the endpoint.
pub async fn handle(state: &ApiState, request: &ApiRequest) -> ApiResponse {
    match dispatch(state, request).await {
        Ok(response) => response,
        Err(error) => ApiResponse::from_error(&error),
    }
}

async fn dispatch(state: &ApiState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    match route(request.method, &request.path)? {
        Route::Auth(AuthRoute::Register) => register(state, request).await,
        Route::Auth(AuthRoute::Login) => login(state, request).await,
        Route::Auth(AuthRoute::Logout) => logout(state, request).await,
        Route::Tasks(task_route) => {
            let identity = authenticate(state, request).await?;
            tasks(state, request, task_route, &identity.user_id).await
        }
    }
}

async fn tasks(
    state: &ApiState,
    request: &ApiRequest,
    route: TaskRoute,
    owner: &str,
) -> Result<ApiResponse, ApiError> {
    match route {
        TaskRoute::List => list_tasks(state, request, owner).await,
        TaskRoute::Create => create_task(state, request, owner).await,
        TaskRoute::Stats => {
            let stats = state.service.completion_stats(owner).await?;
            Ok(ApiResponse::json(200, &stats))
        }
        TaskRoute::Get(id) => {
            let task = state.service.get_task(owner, id).await?;
            let priority_score = state.config.scoring.score(&task, Utc::now());
            Ok(ApiResponse::json(
                200,
                &ScoredTask {
                    task,
                    priority_score,
                },
            ))
        }
        TaskRoute::Toggle(id) => {
            let response = state.service.toggle_with_stats(owner, id).await?;
            Ok(ApiResponse::json(200, &response))
        }
        TaskRoute::Complete(id) => {
            let update = TaskUpdateBuilder::new().completed(true).build();
            let task = state.service.update_task(owner, id, update).await?;
            Ok(ApiResponse::json(200, &task))
        }
    }
}

async fn authenticate(state: &ApiState, request: &ApiRequest) -> Result<AuthIdentity, ApiError> {
    let token = request.bearer_token().ok_or_else(ApiError::unauthorized)?;
    Ok(state.authenticator().resolve(token).await?)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

async fn list_tasks(
    state: &ApiState,
    request: &ApiRequest,
    owner: &str,
) -> Result<ApiResponse, ApiError> {
    let filter = TaskFilter {
        status: strict_param::<StatusFilter>(request, "status")?.unwrap_or_default(),
        category: strict_param::<Selection<Category>>(request, "category")?.unwrap_or_default(),
        priority: strict_param::<Selection<Priority>>(request, "priority")?.unwrap_or_default(),
    };
    let order = strict_param::<SortOrder>(request, "order")?.unwrap_or_default();
    let page_size = lenient_param(request, "pageSize").or_else(|| lenient_param(request, "limit"));
    let page_request = PageRequest::new(
        lenient_param(request, "page"),
        page_size,
        &state.config.pagination.limits(),
    );
    let now = Utc::now();

    let response: TaskListResponse = match order {
        SortOrder::Score => {
            let stored = state.service.find_by_owner(owner, &TaskQuery::default()).await?;
            let completed = CompletionMap::from_tasks(&stored);
            task_page(
                &stored,
                &completed,
                &filter,
                page_request,
                order,
                &state.config.scoring,
                now,
            )
        }
        SortOrder::Rank => {
            let total = state.service.count_tasks(owner, &filter).await?;
            let total = usize::try_from(total).unwrap_or(usize::MAX);
            let query = TaskQuery {
                filter,
                rank_ordered: true,
                limit: Some(page_request.page_size),
                offset: page_request.offset(total),
            };
            let rows = state.service.find_by_owner(owner, &query).await?;
            let scored = state.config.scoring.score_all(&rows, now);
            Page::from_slice(scored, total, page_request).into()
        }
    };
    Ok(ApiResponse::json(200, &response))
}

/// JSON body for `POST /api/tasks`. Vocabulary fields are parsed
/// case-insensitively.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreateTaskBody {
    title: String,
    description: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    complexity: Option<String>,
    deadline: Option<DateTime<Utc>>,
    estimated_hours: Option<f64>,
    dependencies: Vec<i64>,
    tags: Vec<String>,
}

impl CreateTaskBody {
    fn into_new_task(self) -> Result<NewTask, ApiError> {
        Ok(NewTask {
            title: self.title,
            description: self.description,
            category: parse_optional::<Category>(self.category.as_deref())?,
            priority: parse_optional::<Priority>(self.priority.as_deref())?,
            complexity: parse_optional::<Complexity>(self.complexity.as_deref())?,
            deadline: self.deadline,
            estimated_hours: self.estimated_hours,
            dependencies: self.dependencies,
            tags: self.tags,
        })
    }
}

async fn create_task(
    state: &ApiState,
    request: &ApiRequest,
    owner: &str,
) -> Result<ApiResponse, ApiError> {
    let draft = parse_body::<CreateTaskBody>(request)?.into_new_task()?;
    let task = state.service.create_task(owner, draft).await?;
    Ok(ApiResponse::json(201, &task))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RegisterBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn register(state: &ApiState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let body: RegisterBody = parse_body(request)?;
    let registration = state
        .authenticator()
        .register(&body.email, &body.password, body.name.as_deref())
        .await?;
    Ok(ApiResponse::json(
        201,
        &RegisterResponse {
            id: registration.user.id,
            email: registration.user.email,
            seeded_tasks: registration.seeded_tasks,
        },
    ))
}

async fn login(state: &ApiState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let body: LoginBody = parse_body(request)?;
    let session = state.authenticator().login(&body.email, &body.password).await?;
    Ok(ApiResponse::json(
        200,
        &LoginResponse {
            token: session.token,
            expires_at: session.expires_at,
        },
    ))
}

async fn logout(state: &ApiState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let token = request.bearer_token().ok_or_else(ApiError::unauthorized)?;
    if !state.authenticator().logout(token).await? {
        return Err(ApiError::unauthorized());
    }
    Ok(ApiResponse::no_content())
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, ApiError> {
    if request.body.trim().is_empty() {
        return Err(ApiError::BadRequest("request body is required".into()));
    }
    serde_json::from_str(&request.body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

/// Unparsable paging values fall back to defaults.
fn lenient_param(request: &ApiRequest, name: &str) -> Option<i64> {
    request.query_param(name).and_then(|raw| raw.parse().ok())
}

/// Unknown vocabulary is rejected.
fn strict_param<T: FromStr<Err = CoreError>>(
    request: &ApiRequest,
    name: &str,
) -> Result<Option<T>, ApiError> {
    parse_optional(request.query_param(name))
}

fn parse_optional<T: FromStr<Err = CoreError>>(raw: Option<&str>) -> Result<Option<T>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    raw.parse().map(Some).map_err(|error| match error {
        CoreError::Validation(message) => ApiError::BadRequest(message),
        other => ApiError::BadRequest(other.to_string()),
    })
}
