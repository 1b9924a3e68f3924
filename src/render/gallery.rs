//! Media gallery grid and the full-screen media viewer.

use maud::{Markup, PreEscaped, html};

use super::{ConversationRef, LinkStyle, RenderContext, ViewMode};
use crate::archive::{GlobalIndex, Message};
use crate::format::duration;
use crate::icons;

/// Keyboard shortcuts for the viewer; they follow its close/prev/next links
const VIEWER_KEYS: &str = r#"
document.addEventListener('keydown', function(e) {
    const selector = {
        Escape: '.media-viewer-close',
        ArrowLeft: '.media-viewer-prev',
        ArrowRight: '.media-viewer-next',
    }[e.key];
    const link = selector && document.querySelector(selector);
    if (link) {
        window.location.href = link.href;
        return;
    }
    const video = document.querySelector('.media-viewer video');
    if (e.key === ' ' && video) {
        e.preventDefault();
        if (video.paused) video.play(); else video.pause();
    }
});
"#;

/// A message with attached media, as shown in the gallery
#[derive(Debug, Clone, Copy)]
pub struct MediaItem<'a> {
    /// Position of the message in its conversation
    pub index: usize,
    pub message: &'a Message,
}

impl MediaItem<'_> {
    pub fn anchor(&self) -> String {
        self.message.anchor(self.index)
    }

    fn thumbnail(&self) -> Option<&str> {
        match self.message.thumbnail.as_deref() {
            Some(thumb) => Some(thumb),
            None if !self.message.is_video() => self.message.media.as_deref(),
            None => None,
        }
    }
}

/// Messages carrying media, newest first
pub fn media_items(messages: &[Message]) -> Vec<MediaItem<'_>> {
    let mut items: Vec<MediaItem<'_>> = messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.media.as_deref().is_some_and(|p| !p.is_empty()))
        .map(|(index, message)| MediaItem { index, message })
        .collect();
    items.sort_by(|a, b| b.message.timestamp.cmp(&a.message.timestamp));
    items
}

fn thumbnail(ctx: &RenderContext, item: &MediaItem<'_>) -> Markup {
    let is_video = item.message.is_video();
    html! {
        @if let Some(src) = item.thumbnail() {
            img.gallery-thumbnail src=(ctx.public_url(src)) alt="" loading="lazy";
        } @else {
            div.gallery-thumbnail.gallery-placeholder {}
        }
        @if is_video {
            div.video-overlay { (PreEscaped(icons::PLAY)) }
            span.video-duration { (duration(item.message.duration)) }
        }
    }
}

/// Grid of media thumbnails for one conversation
pub fn gallery_grid(
    ctx: &RenderContext,
    conversation: &ConversationRef<'_>,
    items: &[MediaItem<'_>],
) -> Markup {
    if items.is_empty() {
        return html! {
            div.gallery-empty {
                (PreEscaped(icons::EMPTY_GALLERY))
                p { "No media shared in this conversation yet" }
            }
        };
    }
    html! {
        div.gallery-grid {
            @for (position, item) in items.iter().enumerate() {
                @let media = item.message.media.as_deref().unwrap_or_default();
                @match ctx.links {
                    LinkStyle::Static => {
                        a.gallery-item.video[item.message.is_video()]
                            href=(ctx.public_url(media)) target="_blank" {
                            (thumbnail(ctx, item))
                        }
                    }
                    LinkStyle::Live => {
                        a.gallery-item.video[item.message.is_video()]
                            href=(ctx.links.media_href(conversation.day, conversation.id, position)) {
                            (thumbnail(ctx, item))
                        }
                    }
                }
            }
        }
    }
}

/// Full-screen viewer for the item at `position`; `None` when out of range
pub fn media_viewer(
    ctx: &RenderContext,
    conversation: &ConversationRef<'_>,
    items: &[MediaItem<'_>],
    position: usize,
    global: &GlobalIndex,
) -> Option<Markup> {
    let item = items.get(position)?;
    let message = item.message;
    let src = ctx.public_url(message.media.as_deref().unwrap_or_default());
    let links = ctx.links;
    let ConversationRef { day, id, .. } = *conversation;
    let prev = position.checked_sub(1);
    let next = Some(position + 1).filter(|p| *p < items.len());
    let back = links.conversation_href(day, id, ViewMode::Gallery);
    let in_chat = format!(
        "{}#{}",
        links.conversation_href(day, id, ViewMode::Messages),
        item.anchor()
    );

    Some(html! {
        div.media-viewer {
            div.media-viewer-header {
                div.media-viewer-sender { (global.sender_name(message)) }
                div.media-viewer-time { (ctx.clock.military_time(message.timestamp)) }
                a.view-in-chat href=(in_chat) { "View in Chat" }
                a.media-viewer-close href=(back) title="Close" { (PreEscaped(icons::CLOSE)) }
            }
            div.media-viewer-body {
                @if let Some(prev) = prev {
                    a.media-viewer-nav.media-viewer-prev href=(links.media_href(day, id, prev)) {
                        (PreEscaped(icons::VIEWER_PREV))
                    }
                }
                div.media-viewer-content {
                    @if message.is_video() {
                        video controls autoplay src=(src)
                            poster=[message.thumbnail.as_deref().map(|t| ctx.public_url(t))] {}
                    } @else {
                        img src=(src) alt=(message.caption.as_deref().unwrap_or("media"));
                    }
                }
                @if let Some(next) = next {
                    a.media-viewer-nav.media-viewer-next href=(links.media_href(day, id, next)) {
                        (PreEscaped(icons::VIEWER_NEXT))
                    }
                }
            }
            div.media-viewer-footer {
                @if let Some(caption) = message.caption.as_deref().filter(|c| !c.is_empty()) {
                    p.media-caption { (caption) }
                }
                span.media-viewer-counter { (position + 1) " / " (items.len()) }
            }
            script { (PreEscaped(VIEWER_KEYS)) }
        }
    })
}
