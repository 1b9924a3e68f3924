//! Full pages: prerendered day pages, live viewer pages, redirect and 404.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::components::{default_header, empty_state};
use super::{
    ConversationRef, LinkStyle, RenderContext, ViewMode, chat_list, conversation_header,
    gallery_grid, media_items, media_viewer, message_list,
};
use crate::archive::{GlobalIndex, Message};
use crate::grouping::{ChatEntry, DayPager};

const STATIC_SCRIPT: &str = r#"
function showConversation(id) {
    document.getElementById('emptyState').style.display = 'none';
    document.getElementById('defaultHeader').style.display = 'none';
    document.querySelectorAll('.conversation-content').forEach(el => { el.style.display = 'none'; });
    document.querySelectorAll('.chat-item').forEach(el => {
        el.classList.toggle('active', el.getAttribute('data-conversation') === id);
    });
    const conv = document.getElementById('conversation-' + id);
    if (conv) {
        conv.style.display = 'block';
        conv.querySelector('.messages-view').style.display = 'block';
        conv.querySelector('.gallery-view').style.display = 'none';
        conv.querySelector('.gallery-button').classList.remove('active');
        document.getElementById('conversationView').style.display = 'flex';
    }
}

function hideConversation() {
    document.querySelectorAll('.conversation-content').forEach(el => { el.style.display = 'none'; });
    document.querySelectorAll('.chat-item').forEach(el => el.classList.remove('active'));
    document.getElementById('conversationView').style.display = 'flex';
    document.getElementById('defaultHeader').style.display = 'flex';
    document.getElementById('emptyState').style.display = 'flex';
}

function toggleGallery(button) {
    const conv = button.closest('.conversation-content');
    if (!conv) return;
    const gallery = conv.querySelector('.gallery-view');
    const showGallery = gallery.style.display === 'none';
    gallery.style.display = showGallery ? 'block' : 'none';
    conv.querySelector('.messages-view').style.display = showGallery ? 'none' : 'block';
    conv.querySelector('.gallery-button').classList.toggle('active', showGallery);
}

document.addEventListener('DOMContentLoaded', function() {
    document.querySelectorAll('.chat-item').forEach(item => {
        item.addEventListener('click', function() {
            const id = this.getAttribute('data-conversation');
            if (id) showConversation(id);
        });
    });
    const search = document.getElementById('searchInput');
    if (search) {
        search.addEventListener('input', function() {
            const query = this.value.trim().toLowerCase();
            document.querySelectorAll('.chat-item').forEach(item => {
                const name = item.querySelector('.chat-name').textContent.toLowerCase();
                item.style.display = name.includes(query) ? '' : 'none';
            });
        });
    }
    if (location.hash.startsWith('#conversation-')) {
        showConversation(decodeURIComponent(location.hash.slice('#conversation-'.length)));
    }
});
"#;

/// A conversation loaded for display
#[derive(Debug, Clone)]
pub struct ConversationView<'a> {
    pub id: &'a str,
    pub name: String,
    pub messages: Vec<Message>,
}

impl ConversationView<'_> {
    fn reference<'b>(&'b self, day: &'b str, view: ViewMode) -> ConversationRef<'b> {
        ConversationRef {
            day,
            id: self.id,
            name: &self.name,
            view,
        }
    }
}

/// What the right-hand panel of a live page shows
#[derive(Debug, Clone, Copy)]
pub enum LiveSelection<'a> {
    Empty,
    Conversation {
        conversation: &'a ConversationView<'a>,
        view: ViewMode,
    },
    Media {
        conversation: &'a ConversationView<'a>,
        position: usize,
    },
}

fn layout(ctx: &RenderContext, title: &str, script: Option<&str>, body: Markup) -> Markup {
    let extra = match ctx.links {
        LinkStyle::Static => "prerender.css",
        LinkStyle::Live => "live.css",
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @for sheet in ["main.css", "chat.css", "conversation.css", extra] {
                    link rel="stylesheet" href=(ctx.stylesheet(sheet));
                }
                @if let Some(script) = script {
                    script { (PreEscaped(script)) }
                }
            }
            body {
                div #app .app-container { (body) }
            }
        }
    }
}

fn page_title(day: &str) -> String {
    format!("Snapchat - {day}")
}

fn messages_view(ctx: &RenderContext, messages: &[Message], global: &GlobalIndex) -> Markup {
    html! {
        div.messages-container {
            div.messages-inner { (message_list(ctx, messages, global)) }
        }
    }
}

/// One self-contained page per day; every conversation is embedded and
/// toggled client-side
pub fn static_day_page(
    ctx: &RenderContext,
    day: &str,
    pager: &DayPager,
    entries: &[ChatEntry<'_>],
    conversations: &[ConversationView<'_>],
    global: &GlobalIndex,
) -> Markup {
    let body = html! {
        (chat_list(ctx, day, entries, global, None, None))
        div #conversationView .conversation-view-container {
            (default_header(ctx, day, pager))
            (empty_state())
            @for conversation in conversations {
                @let conv_ref = conversation.reference(day, ViewMode::Messages);
                div.conversation-content id=(format!("conversation-{}", conversation.id))
                    style="display: none;" {
                    (conversation_header(ctx, &conv_ref, pager))
                    div.messages-view { (messages_view(ctx, &conversation.messages, global)) }
                    div.gallery-view style="display: none;" {
                        (gallery_grid(ctx, &conv_ref, &media_items(&conversation.messages)))
                    }
                }
            }
        }
    };
    layout(ctx, &page_title(day), Some(STATIC_SCRIPT), body)
}

/// Server-rendered page for the live viewer
pub fn live_day_page(
    ctx: &RenderContext,
    day: &str,
    pager: &DayPager,
    entries: &[ChatEntry<'_>],
    global: &GlobalIndex,
    query: Option<&str>,
    selection: LiveSelection<'_>,
) -> Markup {
    let selected = match selection {
        LiveSelection::Empty => None,
        LiveSelection::Conversation { conversation, .. }
        | LiveSelection::Media { conversation, .. } => Some(conversation.id),
    };
    let panel = match selection {
        LiveSelection::Empty => html! {
            (default_header(ctx, day, pager))
            (empty_state())
        },
        LiveSelection::Conversation { conversation, view } => {
            let conv_ref = conversation.reference(day, view);
            html! {
                div.conversation-content id=(format!("conversation-{}", conversation.id)) {
                    (conversation_header(ctx, &conv_ref, pager))
                    @match view {
                        ViewMode::Messages => {
                            div.messages-view { (messages_view(ctx, &conversation.messages, global)) }
                        }
                        ViewMode::Gallery => {
                            div.gallery-view {
                                (gallery_grid(ctx, &conv_ref, &media_items(&conversation.messages)))
                            }
                        }
                    }
                }
            }
        }
        LiveSelection::Media {
            conversation,
            position,
        } => {
            let conv_ref = conversation.reference(day, ViewMode::Gallery);
            let items = media_items(&conversation.messages);
            html! {
                div.conversation-content id=(format!("conversation-{}", conversation.id)) {
                    (conversation_header(ctx, &conv_ref, pager))
                    div.gallery-view { (gallery_grid(ctx, &conv_ref, &items)) }
                }
                @if let Some(viewer) = media_viewer(ctx, &conv_ref, &items, position, global) {
                    (viewer)
                }
            }
        }
    };
    let body = html! {
        (chat_list(ctx, day, entries, global, query, selected))
        div #conversationView .conversation-view-container { (panel) }
    };
    layout(ctx, &page_title(day), None, body)
}

/// Meta-refresh page pointing at `target`
pub fn redirect_page(target: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(format!("0; url={target}"));
                title { "Redirecting..." }
            }
            body {
                p { "Redirecting to latest day..." }
            }
        }
    }
}

pub fn not_found_page(ctx: &RenderContext, message: &str) -> Markup {
    let body = html! {
        div.empty-state {
            div.empty-state-content {
                h3.empty-state-title { "Not found" }
                p.empty-state-description { (message) }
                a href="/" { "Go to the latest day" }
            }
        }
    };
    layout(ctx, "Not found", None, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ConversationSummary, Timestamp};
    use crate::render::test_support::context;

    fn summary() -> ConversationSummary {
        ConversationSummary {
            participants: vec!["me".into(), "alice".into()],
            latest_timestamp: Timestamp(1_704_470_400_000),
            ..Default::default()
        }
    }

    fn conversation() -> ConversationView<'static> {
        ConversationView {
            id: "alice",
            name: "Alice".into(),
            messages: vec![
                Message {
                    id: Some("m1".into()),
                    from: "alice".into(),
                    kind: Some("chat".into()),
                    media_type: Some("TEXT".into()),
                    text: Some("hello".into()),
                    timestamp: Timestamp(1_704_470_400_000),
                    ..Default::default()
                },
                Message {
                    id: Some("m2".into()),
                    from: "alice".into(),
                    kind: Some("chat".into()),
                    media_type: Some("IMAGE".into()),
                    media: Some("/media/m2.jpg".into()),
                    timestamp: Timestamp(1_704_470_500_000),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn static_page_embeds_hidden_conversations() {
        let ctx = context(LinkStyle::Static);
        let summary = summary();
        let entries = vec![ChatEntry {
            id: "alice",
            summary: &summary,
            name: "Alice".into(),
        }];
        let pager = DayPager::new(vec!["2024-01-05".into()]);
        let html = static_day_page(
            &ctx,
            "2024-01-05",
            &pager,
            &entries,
            &[conversation()],
            &GlobalIndex::default(),
        )
        .into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Snapchat - 2024-01-05</title>"));
        assert!(html.contains(r#"href="/styles/prerender.css""#));
        assert!(html.contains(r#"id="conversation-alice""#));
        assert!(html.contains("function toggleGallery"));
        assert!(html.contains("hello"));
        assert!(html.contains("Today"));
        assert!(html.contains(r#"id="emptyState""#));
        assert!(html.contains(r#"id="defaultHeader""#));
    }

    #[test]
    fn live_page_selection() {
        let ctx = context(LinkStyle::Live);
        let summary = summary();
        let entries = vec![ChatEntry {
            id: "alice",
            summary: &summary,
            name: "Alice".into(),
        }];
        let pager = DayPager::new(vec!["2024-01-05".into()]);
        let global = GlobalIndex::default();
        let conv = conversation();

        let html = live_day_page(
            &ctx,
            "2024-01-05",
            &pager,
            &entries,
            &global,
            None,
            LiveSelection::Empty,
        )
        .into_string();
        assert!(html.contains("Select a conversation"));
        assert!(!html.contains("<script"));

        let html = live_day_page(
            &ctx,
            "2024-01-05",
            &pager,
            &entries,
            &global,
            Some("ali"),
            LiveSelection::Conversation {
                conversation: &conv,
                view: ViewMode::Gallery,
            },
        )
        .into_string();
        assert!(html.contains("gallery-grid"));
        assert!(!html.contains("messages-view"));
        assert!(html.contains(r#"value="ali""#));
        assert!(html.contains("chat-item active"));

        let html = live_day_page(
            &ctx,
            "2024-01-05",
            &pager,
            &entries,
            &global,
            None,
            LiveSelection::Media {
                conversation: &conv,
                position: 0,
            },
        )
        .into_string();
        assert!(html.contains("media-viewer"));
        assert!(html.contains("View in Chat"));
    }

    #[test]
    fn redirect_targets_latest() {
        let html = redirect_page("2024-01-06.html").into_string();
        assert!(html.contains(r#"content="0; url=2024-01-06.html""#));
        assert!(html.contains("Redirecting to latest day..."));
    }
}
