/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use contactbook_api::{app::{build_router, AppState}, config::Config};
/// use contactbook_shared::{db::pool::create_pool, store::postgres::PgStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.clone()).await?;
/// let state = AppState::new(Arc::new(PgStore::new(pool)), config);
///
/// let app = build_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use contactbook_shared::{
    auth::context::bearer_token,
    services::{
        auth::{AuthService, TokenSettings},
        contacts::ContactService,
    },
    store::Store,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,

    pub contacts: ContactService,

    /// Backing store, kept for health checks
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services onto one store
    pub fn new<S>(store: Arc<S>, config: Config) -> Self
    where
        S: Store + 'static,
    {
        let tokens = TokenSettings::new(config.jwt.secret.clone(), config.token_lifetime());

        Self {
            auth: AuthService::new(store.clone(), tokens),
            contacts: ContactService::new(store.clone()),
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health              # Health check (public)
/// ├── /auth/                    # Public
/// │   ├── POST /register
/// │   └── POST /login
/// └── /contacts                 # Bearer token required
///     ├── POST   /contacts
///     ├── GET    /contacts
///     ├── GET    /contacts/:id
///     ├── PATCH  /contacts/:id
///     └── DELETE /contacts/:id
/// ```
///
/// Unknown paths get a 404 envelope.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let contact_routes = Router::new()
        .route(
            "/contacts",
            post(routes::contacts::create_contact).get(routes::contacts::list_contacts),
        )
        .route(
            "/contacts/:id",
            get(routes::contacts::get_contact)
                .patch(routes::contacts::update_contact)
                .delete(routes::contacts::delete_contact),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .merge(contact_routes)
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// JWT authentication middleware layer
///
/// Resolves the bearer token to a user and injects the resulting
/// `AuthContext` into request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = bearer_token(token)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let auth_context = state.auth.authenticate(&token).await?;
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
