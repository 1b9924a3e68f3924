//! HTML rendering shared by the prerenderer and the live viewer.
//!
//! Both views build pages from the same maud components; they differ only in
//! how links are produced (see [`LinkStyle`]) and in where assets live.

mod components;
mod gallery;
mod page;

pub use components::{
    ConversationRef, chat_item, chat_list, conversation_header, date_navigator, default_avatar,
    message_item, message_list, waveform_heights,
};
pub use gallery::{MediaItem, gallery_grid, media_items, media_viewer};
pub use page::{
    ConversationView, LiveSelection, live_day_page, not_found_page, redirect_page,
    static_day_page,
};

use crate::config::ChatTime;
use crate::format::Clock;

/// How pages link to days, conversations and media
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Sibling `<day>.html` files; conversations toggled in-page
    Static,
    /// Routes served by the live viewer
    Live,
}

impl LinkStyle {
    pub fn day_href(self, day: &str) -> String {
        match self {
            LinkStyle::Static => format!("{day}.html"),
            LinkStyle::Live => format!("/day/{day}"),
        }
    }

    pub fn conversation_href(self, day: &str, id: &str, view: ViewMode) -> String {
        match (self, view) {
            (LinkStyle::Static, _) => format!("{day}.html#conversation-{id}"),
            (LinkStyle::Live, ViewMode::Messages) => format!("/day/{day}/{id}"),
            (LinkStyle::Live, ViewMode::Gallery) => format!("/day/{day}/{id}?view=gallery"),
        }
    }

    /// Link to one gallery item. Static pages have no viewer, so they point
    /// at the conversation itself.
    pub fn media_href(self, day: &str, id: &str, position: usize) -> String {
        match self {
            LinkStyle::Static => self.conversation_href(day, id, ViewMode::Gallery),
            LinkStyle::Live => format!("/day/{day}/{id}/media/{position}"),
        }
    }
}

/// Which pane of an open conversation is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Messages,
    Gallery,
}

impl ViewMode {
    /// Parse a `view` query value; anything but `gallery` means messages
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("gallery") {
            ViewMode::Gallery
        } else {
            ViewMode::Messages
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Messages => ViewMode::Gallery,
            ViewMode::Gallery => ViewMode::Messages,
        }
    }

    pub fn is_gallery(self) -> bool {
        self == ViewMode::Gallery
    }
}

/// Everything a page needs besides the archive data
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Base URL of the icon set
    pub assets: String,
    /// Base URL of the stylesheets
    pub styles: String,
    /// Prefix for public paths (avatars, media)
    pub public: String,
    pub links: LinkStyle,
    pub clock: Clock,
    pub chat_time: ChatTime,
}

impl RenderContext {
    pub fn public_url(&self, path: &str) -> String {
        format!("{}{}", self.public, path)
    }

    pub fn stylesheet(&self, name: &str) -> String {
        format!("{}/{name}", self.styles)
    }
}
