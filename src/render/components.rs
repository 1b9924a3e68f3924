//! Building blocks: chat list, message list, headers, navigation.

use maud::{Markup, PreEscaped, html};

use super::{LinkStyle, RenderContext, ViewMode};
use crate::archive::{GlobalIndex, Message, MessageKind, User};
use crate::color::{UserColors, generate_user_color, string_hash, user_color};
use crate::config::ChatTime;
use crate::format::{display_date, initials, should_wrap};
use crate::grouping::{ChatEntry, DayPager, group_by_date};
use crate::icons;

const AVATAR_STYLE: &str = "width: 52px; height: 52px; border-radius: 50%;";
const INITIALS_STYLE: &str = "width: 52px; height: 52px; border-radius: 50%; display: flex; \
     align-items: center; justify-content: center; color: white; font-weight: 600; font-size: 18px;";

/// An open conversation on a given day
#[derive(Debug, Clone, Copy)]
pub struct ConversationRef<'a> {
    pub day: &'a str,
    pub id: &'a str,
    pub name: &'a str,
    pub view: ViewMode,
}

/// Colored circle with initials, or a silhouette when there are none
pub fn default_avatar(name: &str) -> Markup {
    let color = generate_user_color(name);
    let letters = initials(name);
    if letters.is_empty() {
        return html! { (PreEscaped(icons::silhouette(&color))) };
    }
    html! {
        div style=(format!("background: {color}; {INITIALS_STYLE}")) { (letters) }
    }
}

fn user_avatar(ctx: &RenderContext, name: &str, user: Option<&User>) -> Markup {
    match user.and_then(|u| u.avatar.as_deref()) {
        Some(avatar) if !avatar.is_empty() => html! {
            img src=(ctx.public_url(avatar)) alt=(name) style=(AVATAR_STYLE);
        },
        _ => default_avatar(name),
    }
}

fn chat_avatar(ctx: &RenderContext, entry: &ChatEntry<'_>, global: &GlobalIndex) -> Markup {
    let summary = entry.summary;
    if summary.is_group() {
        let sender = summary
            .latest_from
            .as_deref()
            .and_then(|from| global.user(from).map(|user| (from, user)));
        return match sender {
            Some((from, user)) => user_avatar(ctx, global.display_name(from), Some(user)),
            None => default_avatar(&entry.name),
        };
    }
    let other = summary.other_participant(&global.owner).unwrap_or(entry.id);
    user_avatar(ctx, &entry.name, global.user(other))
}

/// One row of the chat list
pub fn chat_item(
    ctx: &RenderContext,
    day: &str,
    entry: &ChatEntry<'_>,
    global: &GlobalIndex,
    selected: bool,
) -> Markup {
    let summary = entry.summary;
    let time = match ctx.chat_time {
        ChatTime::Clock => ctx.clock.military_time(summary.latest_timestamp),
        ChatTime::Relative => ctx.clock.time_ago(summary.latest_timestamp),
    };
    let inner = html! {
        div.user-avatar { (chat_avatar(ctx, entry, global)) }
        div.chat-content {
            div.chat-name { (entry.name) }
            div.chat-status {
                div.chat-status-content {
                    img.status-icon src=(icons::status_icon_url(&ctx.assets, summary)) alt="status";
                    span.status-text { (if summary.is_sender { "Opened" } else { "Received" }) }
                    span.status-separator { "·" }
                    span.status-time { (time) }
                }
            }
        }
    };
    match ctx.links {
        LinkStyle::Static => html! {
            div.chat-item data-conversation=(entry.id) { (inner) }
        },
        LinkStyle::Live => html! {
            a.chat-item.active[selected]
                href=(ctx.links.conversation_href(day, entry.id, ViewMode::Messages)) { (inner) }
        },
    }
}

/// Search bar plus the day's conversations
pub fn chat_list(
    ctx: &RenderContext,
    day: &str,
    entries: &[ChatEntry<'_>],
    global: &GlobalIndex,
    query: Option<&str>,
    selected: Option<&str>,
) -> Markup {
    html! {
        div #chatList .chat-list-container {
            div.search-bar {
                @match ctx.links {
                    LinkStyle::Static => {
                        div.search-input-container {
                            (PreEscaped(icons::SEARCH))
                            input #searchInput .search-input type="text" placeholder="Search";
                        }
                    }
                    LinkStyle::Live => {
                        form.search-input-container method="get" action=(ctx.links.day_href(day)) {
                            (PreEscaped(icons::SEARCH))
                            input #searchInput .search-input type="text" name="q"
                                placeholder="Search" value=(query.unwrap_or_default());
                        }
                    }
                }
            }
            div #chatItemsContainer .chat-items-container {
                @if entries.is_empty() {
                    div.empty-state { "No conversations for this day" }
                } @else {
                    @for entry in entries {
                        (chat_item(ctx, day, entry, global, selected == Some(entry.id)))
                    }
                }
            }
        }
    }
}

/// Bar heights for a voice-note waveform, stable for a given seed
pub fn waveform_heights(seed: &str, bars: usize) -> Vec<u8> {
    let mut state = string_hash(seed) as u32 | 1;
    (0..bars)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            4 + (state % 21) as u8
        })
        .collect()
}

fn waveform(seed: &str, color: &str) -> Markup {
    let heights = waveform_heights(seed, 32);
    let width = heights.len() * 4;
    html! {
        svg.waveform width=(width) height="28" viewBox=(format!("0 0 {width} 28")) {
            @for (i, h) in heights.iter().enumerate() {
                rect x=(i * 4) y=((28 - *h as usize) / 2) width="2" height=(h) rx="1" fill=(color) {}
            }
        }
    }
}

fn message_body(ctx: &RenderContext, index: usize, message: &Message, color: &str) -> Markup {
    match message.kind() {
        MessageKind::Snap => {
            let media_type = message.media_type().unwrap_or("IMAGE");
            let direction = if message.is_sender { "sent" } else { "received" };
            html! {
                div.media-message-box {
                    img.media-message-icon
                        src=(icons::media_icon_url(&ctx.assets, media_type, message.is_sender))
                        alt=(format!("{media_type} {direction}"));
                    span.media-message-text { "Opened" }
                }
            }
        }
        MessageKind::Chat => match message.text.as_deref() {
            Some(text) if message.is_text() && !text.is_empty() => html! {
                div.text-message.wrapped[should_wrap(text)] { (text) }
            },
            _ if message.is_voice_note() => {
                let seed = message.anchor(index);
                html! {
                    div.voice-note {
                        (waveform(&seed, color))
                        @if let Some(media) = message.media.as_deref() {
                            audio controls preload="none" src=(ctx.public_url(media)) {}
                        }
                    }
                }
            }
            _ => html! {
                div.text-message.placeholder {
                    "[" (message.media_type().unwrap_or("UNKNOWN")) "]"
                }
            },
        },
        MessageKind::Other => html! {},
    }
}

/// A single message with its sender header and color bar
pub fn message_item(
    ctx: &RenderContext,
    index: usize,
    message: &Message,
    global: &GlobalIndex,
) -> Markup {
    let color = user_color(&message.from, message.is_sender);
    colored_message(ctx, index, message, global, &color)
}

fn colored_message(
    ctx: &RenderContext,
    index: usize,
    message: &Message,
    global: &GlobalIndex,
    color: &str,
) -> Markup {
    let is_text = message.is_text();
    let type_class = if is_text { "text-type" } else { "media-type" };
    html! {
        div.message-item.text-message[is_text].media-message[!is_text] id=(message.anchor(index)) {
            div.message-header style=(format!("color: {color}")) {
                (global.sender_name(message))
            }
            div class=(format!("message-content {type_class}")) {
                div class=(format!("message-highlight {type_class}"))
                    style=(format!("background-color: {color}")) {}
                (message_body(ctx, index, message, color))
            }
        }
    }
}

/// Messages grouped under date separators
pub fn message_list(ctx: &RenderContext, messages: &[Message], global: &GlobalIndex) -> Markup {
    if messages.is_empty() {
        return html! { div.empty-messages { "No messages to display" } };
    }
    let mut colors = UserColors::new();
    html! {
        @for group in group_by_date(messages, &ctx.clock) {
            div.message-group {
                div.date-separator { (group.label) }
                div.message-group-messages {
                    @for (index, message) in &group.messages {
                        @let color = colors.get(&message.from, message.is_sender);
                        (colored_message(ctx, *index, message, global, &color))
                    }
                }
            }
        }
    }
}

/// Previous / next day arrows around the formatted date
pub fn date_navigator(ctx: &RenderContext, day: &str, pager: &DayPager) -> Markup {
    let (prev, next) = pager.neighbors(day);
    html! {
        div.date-navigator {
            @if let Some(prev) = prev {
                a.date-nav-arrow.date-nav-prev href=(ctx.links.day_href(prev)) {
                    (PreEscaped(icons::ARROW_PREV))
                }
            } @else {
                button.date-nav-arrow.date-nav-prev.disabled disabled {}
            }
            div.date-display { (display_date(day)) }
            @if let Some(next) = next {
                a.date-nav-arrow.date-nav-next href=(ctx.links.day_href(next)) {
                    (PreEscaped(icons::ARROW_NEXT))
                }
            } @else {
                button.date-nav-arrow.date-nav-next.disabled disabled {}
            }
        }
    }
}

/// Header of an open conversation
pub fn conversation_header(
    ctx: &RenderContext,
    conversation: &ConversationRef<'_>,
    pager: &DayPager,
) -> Markup {
    let ConversationRef { day, id, name, view } = *conversation;
    html! {
        div.conversation-header {
            div.header-left {
                @match ctx.links {
                    LinkStyle::Static => {
                        button.back-button onclick="hideConversation()" { (PreEscaped(icons::BACK)) }
                    }
                    LinkStyle::Live => {
                        a.back-button href=(ctx.links.day_href(day)) { (PreEscaped(icons::BACK)) }
                    }
                }
                div.username-badge { span { (name) } }
            }
            div.header-center { (date_navigator(ctx, day, pager)) }
            div.header-right {
                @match ctx.links {
                    LinkStyle::Static => {
                        button.gallery-button title="View Gallery"
                            onclick="toggleGallery(this)" {
                            (PreEscaped(icons::GALLERY))
                        }
                    }
                    LinkStyle::Live => {
                        a.gallery-button.active[view.is_gallery()] title="View Gallery"
                            href=(ctx.links.conversation_href(day, id, view.toggle())) {
                            (PreEscaped(icons::GALLERY))
                        }
                    }
                }
                button.media-button { (PreEscaped(icons::MEDIA)) }
            }
        }
    }
}

/// Header shown while no conversation is open
pub fn default_header(ctx: &RenderContext, day: &str, pager: &DayPager) -> Markup {
    html! {
        div #defaultHeader .conversation-header {
            div.header-left {}
            div.header-center { (date_navigator(ctx, day, pager)) }
            div.header-right {}
        }
    }
}

pub fn empty_state() -> Markup {
    html! {
        div #emptyState .empty-state {
            div.empty-state-content {
                div.empty-state-icon-wrapper { (PreEscaped(icons::EMPTY_CHAT)) }
                h3.empty-state-title { "Select a conversation" }
                p.empty-state-description {
                    "Choose from your existing conversations to view messages"
                }
            }
        }
    }
}
