//! Status icons and inline SVG glyphs.

use crate::archive::ConversationSummary;

/// Chat-list status icon (16x17 set) for a conversation's latest item
pub fn status_icon_url(assets: &str, conversation: &ConversationSummary) -> String {
    let status = if conversation.is_sender {
        "opened"
    } else {
        "received"
    };
    let kind = conversation.latest_kind();
    if kind == "snap" {
        if let Some(media_type) = conversation.latest_media_type.as_deref() {
            let icon = if media_type == "VIDEO" { "video" } else { "snap" };
            return format!("{assets}/icons16x17/{icon}-{status}.svg");
        }
    }
    format!("{assets}/icons16x17/{kind}-{status}.svg")
}

/// Media icon inside a conversation (14x set)
pub fn media_icon_url(assets: &str, media_type: &str, is_sender: bool) -> String {
    let icon = match media_type {
        "VIDEO" | "video" => "video",
        _ => "snap",
    };
    let status = if is_sender { "opened" } else { "received" };
    format!("{assets}/icons14x/{icon}-{status}.svg")
}

pub const BACK: &str = r##"<svg width="14" height="14" viewBox="0 0 14 14" fill="none"><path fill-rule="evenodd" clip-rule="evenodd" d="M10.6862 13.3099C10.9671 13.0286 11.1248 12.6474 11.1248 12.2499C11.1248 11.8524 10.9671 11.4711 10.6862 11.1899L6.49617 6.99988L10.6862 2.80988C10.8294 2.67144 10.9436 2.50587 11.0221 2.32283C11.1006 2.13979 11.1419 1.94294 11.1435 1.74377C11.1452 1.5446 11.1071 1.3471 11.0316 1.16279C10.9561 0.978482 10.8447 0.811057 10.7037 0.670285C10.5628 0.529513 10.3953 0.418213 10.2109 0.342878C10.0266 0.267544 9.82902 0.229684 9.62985 0.231508C9.43068 0.233332 9.23387 0.274803 9.0509 0.353502C8.86793 0.432201 8.70247 0.54655 8.56417 0.68988L3.31417 5.93988C3.03327 6.22113 2.87549 6.60238 2.87549 6.99988C2.87549 7.39738 3.03327 7.77863 3.31417 8.05988L8.56417 13.3099C8.70347 13.4493 8.86887 13.5598 9.05092 13.6353C9.23297 13.7107 9.4281 13.7496 9.62517 13.7496C9.82223 13.7496 10.0174 13.7107 10.1994 13.6353C10.3815 13.5598 10.5469 13.4493 10.6862 13.3099Z" fill="#2C3137"/></svg>"##;

pub const ARROW_PREV: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M15 18l-6-6 6-6"/></svg>"#;

pub const ARROW_NEXT: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 18l6-6-6-6"/></svg>"#;

pub const GALLERY: &str = r##"<svg width="16" height="16" viewBox="0 0 16 16" fill="none"><rect x="1" y="1" width="6" height="6" rx="0.5" stroke="#16191C" stroke-opacity="0.56" stroke-width="1.5"/><rect x="9" y="1" width="6" height="6" rx="0.5" stroke="#16191C" stroke-opacity="0.56" stroke-width="1.5"/><rect x="1" y="9" width="6" height="6" rx="0.5" stroke="#16191C" stroke-opacity="0.56" stroke-width="1.5"/><rect x="9" y="9" width="6" height="6" rx="0.5" stroke="#16191C" stroke-opacity="0.56" stroke-width="1.5"/></svg>"##;

pub const MEDIA: &str = r##"<svg width="16" height="18" viewBox="0 0 16 18" fill="none"><g clip-path="url(#clip0_417_24)"><path d="M7.167 6.08302C7.167 6.41454 7.0353 6.73248 6.80088 6.9669C6.56646 7.20132 6.24852 7.33302 5.917 7.33302C5.58548 7.33302 5.26754 7.20132 5.03312 6.9669C4.7987 6.73248 4.667 6.41454 4.667 6.08302C4.667 5.7515 4.7987 5.43355 5.03312 5.19913C5.26754 4.96471 5.58548 4.83302 5.917 4.83302C6.24852 4.83302 6.56646 4.96471 6.80088 5.19913C7.0353 5.43355 7.167 5.7515 7.167 6.08302Z" fill="#16191C" fill-opacity="0.56"/><path d="M0.5 13.688C0.5 13.74 0.504 13.792 0.513 13.842C0.590779 14.7797 1.01818 15.6538 1.71042 16.291C2.40265 16.9283 3.30913 17.282 4.25 17.282H11.75C12.7446 17.282 13.6984 16.8869 14.4017 16.1837C15.1049 15.4804 15.5 14.5266 15.5 13.532V4.46802C15.5 3.47346 15.1049 2.51963 14.4017 1.81637C13.6984 1.11311 12.7446 0.718018 11.75 0.718018H4.25C3.75746 0.718018 3.26974 0.815047 2.81471 1.00357C2.35967 1.19208 1.94623 1.4684 1.598 1.81672C1.24976 2.16505 0.973561 2.57856 0.785165 3.03365C0.596768 3.48873 0.499869 3.97648 0.5 4.46902V13.688ZM4.25 2.59402H11.75C12.786 2.59402 13.625 3.43402 13.625 4.46902V8.15502C13.1254 7.88242 12.5641 7.74295 11.995 7.75002C11.15 7.75002 10.475 8.18602 9.972 8.64802C9.469 9.11002 9.026 9.70402 8.65 10.218L8.525 10.388C8.181 10.862 7.893 11.256 7.607 11.555C7.268 11.908 7.123 11.917 7.123 11.917C6.955 11.917 6.841 11.837 6.283 11.328C5.804 10.892 5.065 10.25 3.874 10.25C3.316 10.25 2.812 10.364 2.375 10.57V4.46902C2.375 3.43302 3.215 2.59402 4.25 2.59402ZM13.625 11.188C13.625 11.2 13.625 11.199 13.622 11.184C13.617 11.154 13.602 11.062 13.555 10.92C13.4858 10.7056 13.3876 10.5017 13.263 10.314C13.003 9.92702 12.624 9.62502 11.996 9.62502C11.826 9.62502 11.588 9.71002 11.241 10.029C10.893 10.349 10.55 10.796 10.164 11.324L10.038 11.497C9.708 11.949 9.341 12.455 8.961 12.852C8.551 13.28 7.934 13.792 7.123 13.792C6.167 13.792 5.503 13.168 5.124 12.812C5.08924 12.7791 5.05424 12.7464 5.019 12.714C4.583 12.316 4.307 12.125 3.874 12.125C3.324 12.125 2.977 12.326 2.755 12.583C2.531 12.841 2.393 13.208 2.377 13.609C2.417 14.609 3.24 15.406 4.25 15.406H11.75C12.786 15.406 13.625 14.566 13.625 13.531V11.188Z" fill="#16191C" fill-opacity="0.56"/></g><defs><clipPath id="clip0_417_24"><rect width="16" height="18" fill="white"/></clipPath></defs></svg>"##;

pub const SEARCH: &str = r#"<svg class="search-icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z"></path></svg>"#;

pub const EMPTY_CHAT: &str = r#"<svg class="empty-state-icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M8 12h.01M12 12h.01M16 12h.01M21 12c0 4.418-4.03 8-9 8a9.863 9.863 0 01-4.255-.949L3 20l1.395-3.72C3.512 15.042 3 13.574 3 12c0-4.418 4.03-8 9-8s9 3.582 9 8z"></path></svg>"#;

pub const EMPTY_GALLERY: &str = r#"<svg class="gallery-empty-icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M4 16l4.586-4.586a2 2 0 012.828 0L16 16m-2-2l1.586-1.586a2 2 0 012.828 0L20 14m-6-6h.01M6 20h12a2 2 0 002-2V6a2 2 0 00-2-2H6a2 2 0 00-2 2v12a2 2 0 002 2z"></path></svg>"#;

pub const PLAY: &str = r#"<svg class="video-play-icon" fill="currentColor" viewBox="0 0 20 20"><path d="M6.3 2.841A1.5 1.5 0 004 4.11V15.89a1.5 1.5 0 002.3 1.269l9.344-5.89a1.5 1.5 0 000-2.538L6.3 2.84z"/></svg>"#;

pub const CLOSE: &str = r#"<svg width="14" height="14" viewBox="0 0 14 14" fill="none"><path d="M1 1L13 13M1 13L13 1" stroke="white" stroke-width="2" stroke-linecap="round"/></svg>"#;

pub const VIEWER_PREV: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none"><path d="M15 18L9 12L15 6" stroke="white" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;

pub const VIEWER_NEXT: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none"><path d="M9 18L15 12L9 6" stroke="white" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;

/// Silhouette avatar filled with `color`
pub fn silhouette(color: &str) -> String {
    format!(
        r#"<svg viewBox="0 0 54 54" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M27 54.06C33.48 54.06 39.48 51.78 44.16 47.94C43.32 46.68 42.36 45.78 41.34 44.94C38.22 42.48 33.78 41.58 30.72 41.04L30.6 39.84C35.28 37.08 36.42 34.14 38.28 27.96L38.34 27.54C38.34 27.54 39.96 26.88 40.2 23.88C40.56 19.8 38.88 21 38.88 20.7C39.06 18.6 39 15.84 38.4 13.8C37.14 9.42 32.88 5.94 27 5.94C21.12 5.94 16.86 9.36 15.6 13.8C15 15.84 14.94 18.6 15.12 20.76C15.12 21.06 13.5 19.86 13.8 23.94C14.04 26.94 15.66 27.6 15.66 27.6L15.72 28.02C17.58 34.2 18.72 37.14 23.4 39.9L23.28 41.1C20.28 41.64 15.78 42.54 12.66 45C11.64 45.84 10.68 46.74 9.84 48C14.52 51.78 20.52 54.06 27 54.06Z" fill="{color}" stroke="black" stroke-opacity="0.2" stroke-width="0.9"/></svg>"#
    )
}
