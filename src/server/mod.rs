//! HTTP surface: landing, blog, detail and submission routes
//!
//! Every page handler builds its response from a fresh read of the content
//! store; shared state is immutable for the lifetime of the process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use tera::Context;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::error::Error;
use crate::helpers::html::{open_graph, strip_html, truncate};
use crate::submission::{self, ContactForm, NewsletterForm, Provider};
use crate::templates::TemplateRenderer;

const NOT_FOUND_PAGE: &str = include_str!("../templates/site/404.html");
const ERROR_PAGE: &str = include_str!("../templates/site/error.html");

/// Shared request state
pub struct AppState {
    pub config: SiteConfig,
    /// Resolved static assets directory
    pub assets_dir: std::path::PathBuf,
    pub store: ContentStore,
    pub templates: TemplateRenderer,
    pub provider: Arc<dyn Provider>,
}

/// Build the site router
pub fn router(state: Arc<AppState>) -> Router {
    let assets_dir = state.assets_dir.clone();

    Router::new()
        .route("/", get(home))
        .route("/blog", get(blog))
        .route("/blog/:slug", get(post_detail))
        .route("/contact", post(contact))
        .route("/newsletter", post(newsletter))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn start(state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr =
        format!("{}:{}", state.config.server.address, state.config.server.port).parse()?;

    let app = router(Arc::new(state));

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Landing page: hero, services, the most recent posts, both forms
async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, Error> {
    let posts = state.store.latest(state.config.landing_posts).await?;

    let mut context = Context::new();
    context.insert("site", &state.config);
    context.insert("posts", &posts);
    context.insert(
        "meta_tags",
        &open_graph(
            &state.config.title,
            &state.config.description,
            &state.config.url,
            None,
            &state.config.title,
        ),
    );

    Ok(Html(state.templates.render("home.html", &context)?))
}

/// Full post listing
async fn blog(State(state): State<Arc<AppState>>) -> Result<Html<String>, Error> {
    let posts = state.store.summaries().await?;

    let mut context = Context::new();
    context.insert("site", &state.config);
    context.insert("posts", &posts);
    context.insert(
        "meta_tags",
        &open_graph(
            &format!("Blog — {}", state.config.title),
            &state.config.description,
            &format!("{}/blog", state.config.url.trim_end_matches('/')),
            None,
            &state.config.title,
        ),
    );

    Ok(Html(state.templates.render("blog.html", &context)?))
}

/// One post, rendered fresh from disk
async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, Error> {
    let detail = state.store.load(&slug).await?;

    let site_url = state.config.url.trim_end_matches('/');
    let cover_url = detail
        .summary
        .cover
        .as_deref()
        .map(|cover| absolute_url(site_url, cover));

    // Meta descriptions are plain text, clamped to what search results show
    let meta_desc = truncate(&strip_html(&detail.summary.desc), 160, None);

    let mut context = Context::new();
    context.insert("site", &state.config);
    context.insert(
        "meta_tags",
        &open_graph(
            &detail.summary.title,
            &meta_desc,
            &absolute_url(site_url, &detail.summary.path),
            cover_url.as_deref(),
            &state.config.title,
        ),
    );
    context.insert("post", &detail);

    Ok(Html(state.templates.render("post.html", &context)?))
}

/// Contact form endpoint
async fn contact(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Result<Json<SubmitResult>, Error> {
    submission::submit_contact(state.provider.as_ref(), &state.config.outreach, &form).await?;
    tracing::info!("contact request forwarded");
    Ok(Json(SubmitResult::success(
        "Thanks — your message is on its way.",
    )))
}

/// Newsletter signup endpoint
async fn newsletter(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewsletterForm>,
) -> Result<Json<SubmitResult>, Error> {
    submission::subscribe(state.provider.as_ref(), &state.config.outreach, &form).await?;
    tracing::info!("newsletter signup forwarded");
    Ok(Json(SubmitResult::success("You're on the list.")))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// Result payload for the form endpoints
#[derive(Debug, Serialize)]
pub struct SubmitResult {
    pub ok: bool,
    pub message: String,
}

impl SubmitResult {
    fn success(message: &str) -> Self {
        Self {
            ok: true,
            message: message.to_string(),
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(what) => {
                tracing::debug!("not found: {what}");
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
            }
            Error::Validation(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(SubmitResult::failure(&reason)),
            )
                .into_response(),
            Error::Provider(reason) => {
                // Logged with detail, surfaced generically
                tracing::error!("provider call failed: {reason}");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(SubmitResult::failure(
                        "Something went wrong on our side. Please try again later.",
                    )),
                )
                    .into_response()
            }
            other => {
                tracing::error!("request failed: {other}");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
            }
        }
    }
}

fn absolute_url(site_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}/{}", site_url, path.trim_start_matches('/'))
    }
}
