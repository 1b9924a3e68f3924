//! Live viewer: an axum server rendering pages from the archive on every request.

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::archive::{Archive, DayIndex, GlobalIndex, Message, is_safe_segment};
use crate::config::ChatTime;
use crate::format::Clock;
use crate::grouping::{DayPager, chat_entries, filter_chats};
use crate::render::{
    ConversationView, LinkStyle, LiveSelection, RenderContext, ViewMode, live_day_page,
    media_items, not_found_page,
};

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub data_dir: PathBuf,
    pub web_root: PathBuf,
    pub bind: String,
    pub offset: UtcOffset,
    pub chat_time: ChatTime,
}

/// Shared state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    archive: Arc<Archive>,
    offset: UtcOffset,
    chat_time: ChatTime,
    now: Option<OffsetDateTime>,
}

impl AppState {
    pub fn new(data_dir: impl Into<PathBuf>, offset: UtcOffset, chat_time: ChatTime) -> Self {
        Self {
            archive: Arc::new(Archive::new(data_dir)),
            offset,
            chat_time,
            now: None,
        }
    }

    /// Pin "now" instead of reading the system clock
    pub fn with_now(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    fn context(&self) -> RenderContext {
        let clock = match self.now {
            Some(now) => Clock::fixed(now, self.offset),
            None => Clock::system(self.offset),
        };
        RenderContext {
            assets: "/assets".to_string(),
            styles: "/styles".to_string(),
            public: "/public".to_string(),
            links: LinkStyle::Live,
            clock,
            chat_time: self.chat_time,
        }
    }
}

/// Handler error rendered as a 500 page
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = format!("{:#}", self.0);
        tracing::error!(error = %detail, "request failed");
        let body = maud::html! {
            (maud::DOCTYPE)
            h1 { "Something went wrong" }
            p { (detail) }
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body.into_string())).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

type HandlerResult<T> = std::result::Result<T, AppError>;

/// Outcome of rendering a viewer page
enum Page {
    Html(String),
    NotFound(String),
}

impl Page {
    fn not_found(state: &AppState, message: impl Into<String>) -> Self {
        let message = message.into();
        Page::NotFound(not_found_page(&state.context(), &message).into_string())
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Html(html) => Html(html).into_response(),
            Page::NotFound(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    q: Option<String>,
    view: Option<String>,
}

/// Which part of a day the request asks for
enum Target {
    Day,
    Conversation(String, ViewMode),
    Media(String, usize),
}

/// Run blocking archive work off the async executor
async fn blocking<T, F>(work: F) -> HandlerResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(work)
        .await
        .context("render task panicked")??;
    Ok(result)
}

fn render_page(state: &AppState, day: &str, query: Option<&str>, target: Target) -> Result<Page> {
    if !is_safe_segment(day) {
        return Ok(Page::not_found(state, format!("No archive for {day}")));
    }
    let archive = &state.archive;
    let pager = DayPager::new(archive.list_days()?);
    if !pager.contains(day) {
        return Ok(Page::not_found(state, format!("No archive for {day}")));
    }

    let global = archive.load_global();
    let day_index = archive.load_day(day);
    let mut entries = chat_entries(&day_index.conversations, &global);
    if let Some(query) = query {
        entries = filter_chats(entries, query);
    }
    let ctx = state.context();

    let (id, view, position) = match target {
        Target::Day => {
            let html = live_day_page(
                &ctx,
                day,
                &pager,
                &entries,
                &global,
                query,
                LiveSelection::Empty,
            );
            return Ok(Page::Html(html.into_string()));
        }
        Target::Conversation(id, view) => (id, view, None),
        Target::Media(id, position) => (id, ViewMode::Gallery, Some(position)),
    };

    let Some((id, summary)) = day_index.conversations.get_key_value(id.as_str()) else {
        return Ok(Page::not_found(
            state,
            format!("No conversation {id} on {day}"),
        ));
    };
    let conversation = ConversationView {
        id,
        name: summary.display_name(id, &global),
        messages: archive.load_messages(day, id),
    };
    let selection = match position {
        Some(position) => {
            if position >= media_items(&conversation.messages).len() {
                return Ok(Page::not_found(
                    state,
                    format!("No media item {position} in this conversation"),
                ));
            }
            LiveSelection::Media {
                conversation: &conversation,
                position,
            }
        }
        None => LiveSelection::Conversation {
            conversation: &conversation,
            view,
        },
    };
    let html = live_day_page(&ctx, day, &pager, &entries, &global, query, selection);
    Ok(Page::Html(html.into_string()))
}

async fn index(State(state): State<AppState>) -> HandlerResult<Response> {
    let archive = state.archive.clone();
    let days = blocking(move || archive.list_days()).await?;
    let response = match DayPager::new(days).latest() {
        Some(latest) => Redirect::temporary(&format!("/day/{latest}")).into_response(),
        None => Page::not_found(&state, "The archive has no days yet").into_response(),
    };
    Ok(response)
}

async fn day_page(
    State(state): State<AppState>,
    Path(day): Path<String>,
    Query(query): Query<PageQuery>,
) -> HandlerResult<Page> {
    blocking(move || render_page(&state, &day, query.q.as_deref(), Target::Day)).await
}

async fn conversation_page(
    State(state): State<AppState>,
    Path((day, conversation)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> HandlerResult<Page> {
    let target = Target::Conversation(
        conversation,
        query.view.as_deref().map(ViewMode::parse).unwrap_or_default(),
    );
    blocking(move || render_page(&state, &day, query.q.as_deref(), target)).await
}

async fn media_page(
    State(state): State<AppState>,
    Path((day, conversation, position)): Path<(String, String, usize)>,
) -> HandlerResult<Page> {
    blocking(move || render_page(&state, &day, None, Target::Media(conversation, position))).await
}

async fn api_days(State(state): State<AppState>) -> HandlerResult<Json<Vec<String>>> {
    let days = blocking(move || state.archive.list_days()).await?;
    Ok(Json(days))
}

async fn api_index(State(state): State<AppState>) -> HandlerResult<Json<GlobalIndex>> {
    let global = blocking(move || Ok(state.archive.load_global())).await?;
    Ok(Json(global))
}

async fn api_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> HandlerResult<Response> {
    let found = blocking(move || {
        if !is_safe_segment(&day) || !state.archive.list_days()?.contains(&day) {
            return Ok(None::<DayIndex>);
        }
        Ok(Some(state.archive.load_day(&day)))
    })
    .await?;
    Ok(match found {
        Some(index) => Json(index).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn api_messages(
    State(state): State<AppState>,
    Path((day, conversation)): Path<(String, String)>,
) -> HandlerResult<Response> {
    if !is_safe_segment(&day) || !is_safe_segment(&conversation) {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    let messages: Vec<Message> =
        blocking(move || Ok(state.archive.load_messages(&day, &conversation))).await?;
    Ok(Json(messages).into_response())
}

async fn fallback(State(state): State<AppState>) -> Page {
    Page::not_found(&state, "Nothing here")
}

/// Build the viewer app; static files come from `web_root`
pub fn router(state: AppState, web_root: impl Into<PathBuf>) -> Router {
    let web_root = web_root.into();
    Router::new()
        .route("/", get(index))
        .route("/day/{day}", get(day_page))
        .route("/day/{day}/{conversation}", get(conversation_page))
        .route("/day/{day}/{conversation}/media/{index}", get(media_page))
        .route("/api/days", get(api_days))
        .route("/api/index", get(api_index))
        .route("/api/days/{day}", get(api_day))
        .route("/api/days/{day}/{conversation}/messages", get(api_messages))
        .nest_service("/assets", ServeDir::new(web_root.join("assets")))
        .nest_service("/styles", ServeDir::new(web_root.join("styles")))
        .nest_service("/public", ServeDir::new(web_root.join("public")))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Serve the live viewer until ctrl-c
pub async fn serve(options: ServeOptions) -> Result<()> {
    let state = AppState::new(&options.data_dir, options.offset, options.chat_time);
    let app = router(state, &options.web_root);

    let listener = tokio::net::TcpListener::bind(&options.bind)
        .await
        .with_context(|| format!("failed to bind {}", options.bind))?;
    let addr = listener.local_addr().context("failed to read local address")?;
    tracing::info!(
        %addr,
        data_dir = %options.data_dir.display(),
        "live viewer listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ArchiveFixture;
    use time::macros::{datetime, offset};

    fn state(fixture: &ArchiveFixture) -> AppState {
        AppState::new(fixture.data_dir(), offset!(UTC), ChatTime::Clock)
            .with_now(datetime!(2024-01-06 12:00 UTC))
    }

    fn body(page: Page) -> (bool, String) {
        match page {
            Page::Html(html) => (true, html),
            Page::NotFound(html) => (false, html),
        }
    }

    #[test]
    fn day_page_lists_conversations() {
        let fixture = ArchiveFixture::sample();
        let (ok, html) = body(render_page(&state(&fixture), "2024-01-05", None, Target::Day).unwrap());
        assert!(ok);
        assert!(html.contains("Weekend Crew"));
        assert!(html.contains("Alice Johnson"));
        assert!(html.contains("Select a conversation"));
        assert!(html.contains(r#"href="/day/2024-01-06""#));
    }

    #[test]
    fn search_filters_chat_list() {
        let fixture = ArchiveFixture::sample();
        let (_, html) =
            body(render_page(&state(&fixture), "2024-01-05", Some("crew"), Target::Day).unwrap());
        assert!(html.contains("Weekend Crew"));
        assert!(!html.contains(r#"href="/day/2024-01-05/alice""#));
    }

    #[test]
    fn unknown_day_and_conversation() {
        let fixture = ArchiveFixture::sample();
        let state = state(&fixture);
        let (ok, _) = body(render_page(&state, "2023-01-01", None, Target::Day).unwrap());
        assert!(!ok);
        let (ok, _) = body(render_page(&state, "..", None, Target::Day).unwrap());
        assert!(!ok);
        let target = Target::Conversation("zed".into(), ViewMode::Messages);
        let (ok, html) = body(render_page(&state, "2024-01-05", None, target).unwrap());
        assert!(!ok);
        assert!(html.contains("No conversation zed on 2024-01-05"));
    }

    #[test]
    fn media_position_out_of_range() {
        let fixture = ArchiveFixture::sample();
        let state = state(&fixture);
        let (ok, html) =
            body(render_page(&state, "2024-01-05", None, Target::Media("alice".into(), 1)).unwrap());
        assert!(ok);
        assert!(html.contains("2 / 2"));
        let (ok, _) =
            body(render_page(&state, "2024-01-05", None, Target::Media("alice".into(), 2)).unwrap());
        assert!(!ok);
    }

    #[test]
    fn group_without_messages_file_renders_empty() {
        let fixture = ArchiveFixture::sample();
        let target = Target::Conversation("crew".into(), ViewMode::Messages);
        let (ok, html) =
            body(render_page(&state(&fixture), "2024-01-05", None, target).unwrap());
        assert!(ok);
        assert!(html.contains("No messages to display"));
    }
}
