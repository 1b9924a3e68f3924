//! Render exported chat archives as browsable HTML: a static per-day
//! prerenderer and a live local viewer sharing the same components.

pub mod archive;
pub mod color;
pub mod config;
pub mod format;
pub mod grouping;
pub mod icons;
pub mod prerender;
pub mod render;
pub mod serve;

#[cfg(test)]
mod test_utils;

pub use archive::{Archive, ConversationSummary, DayIndex, GlobalIndex, Message, Timestamp};
pub use config::{ChatTime, Config};
pub use format::Clock;
pub use prerender::{PrerenderOptions, PrerenderResult, prerender};
pub use serve::{AppState, ServeOptions, router, serve};

pub const APP_NAME: &str = "snapview";
