use axum::{
    Form, Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{error, info};

use crate::AppState;
use crate::chat::html::SEND_PATH;
use crate::chat::{ChatError, ChatTransport, ChatWidget, HtmlChatView};
use crate::config::AppConfig;
use crate::content::Portfolio;
use crate::page::render_home;
use crate::skills::SkillCategory;

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "content.config.loaded",
        data_file = %config.content.data_file,
        static_dir = %config.server.static_dir,
        "Content configuration loaded"
    );

    let state = AppState::new(Arc::clone(&config))?;
    info!(
        name: "chat.endpoint.configured",
        endpoint = ?config.chat.endpoint,
        "Chat form backend"
    );
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the site router.
pub fn build_router(state: AppState) -> Router {
    // A disabled timeout is a very long one, so the layer stack keeps one type.
    let timeout_duration = if state.config.server.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(state.config.server.request_timeout_secs)
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/skills", get(api_skills))
        .route(SEND_PATH, post(chat_send))
        .nest_service("/static", ServeDir::new(&state.config.server.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| {
                let duration = timeout_duration;
                async move {
                    match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => {
                            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                        }
                    }
                }
            },
        ))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Render the home page.
async fn index_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let portfolio = load_portfolio(&state).await?;
    Ok(Html(render_home(&state.config, &portfolio)))
}

/// GET /api/skills - The skills collection, `[]` when none is configured.
async fn api_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillCategory>>, (StatusCode, String)> {
    let portfolio = load_portfolio(&state).await?;
    Ok(Json(portfolio.skills.unwrap_or_default()))
}

/// Chat form body.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: String,
}

/// POST /chat/send - Send one message and return the new message fragments.
///
/// The page already shows earlier messages, so the response holds only the
/// user message and the reply (or fallback). A blank message yields an empty
/// body.
async fn chat_send(State(state): State<AppState>, Form(form): Form<ChatForm>) -> Html<String> {
    let chat = &state.config.chat;
    let mut widget = ChatWidget::attach((), HtmlChatView::new(&chat.title, &chat.placeholder));
    widget.set_input(&form.message);

    let Some(pending) = widget.begin_send() else {
        return Html(String::new());
    };
    let outcome = match &state.chat {
        Some(transport) => transport.send(pending.request()).await,
        None => Err(ChatError::NotConfigured),
    };
    widget.complete_send(outcome);

    Html(widget.view().messages().concat())
}

async fn load_portfolio(state: &AppState) -> Result<Portfolio, (StatusCode, String)> {
    Portfolio::load(&state.config.content.data_file)
        .await
        .map_err(|e| {
            error!(
                name: "content.load.failed",
                path = %state.config.content.data_file,
                error = %e,
                "Failed to load portfolio data"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}
