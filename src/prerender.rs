//! Static prerenderer: one HTML page per archive day plus a redirecting index.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::archive::{Archive, GlobalIndex};
use crate::config::ChatTime;
use crate::format::Clock;
use crate::grouping::{DayPager, chat_entries};
use crate::render::{ConversationView, LinkStyle, RenderContext, redirect_page, static_day_page};

#[derive(Debug, Clone)]
pub struct PrerenderOptions {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub assets_href: String,
    pub styles_href: String,
    pub public_href: String,
    pub chat_time: ChatTime,
    pub clock: Clock,
    /// Also write `<page>.html.gz` next to every page
    pub gzip: bool,
}

#[derive(Debug, Serialize)]
pub struct PrerenderResult {
    pub status: String,
    pub data_dir: String,
    pub out_dir: String,
    pub days: usize,
    pub conversations: usize,
    pub pages: Vec<String>,
    pub index_path: Option<String>,
    pub html_bytes: u64,
    pub gzip_bytes: Option<u64>,
    pub note: String,
}

fn gzip_to_file(input: &Path, output: &Path) -> Result<u64> {
    let mut reader = File::open(input)?;
    let writer = File::create(output)?;
    let mut encoder = GzEncoder::new(writer, Compression::default());
    std::io::copy(&mut reader, &mut encoder)?;
    let file = encoder.finish()?;
    Ok(file.metadata()?.len())
}

struct PageWriter {
    gzip: bool,
    pages: Vec<String>,
    html_bytes: u64,
    gzip_bytes: u64,
}

impl PageWriter {
    fn write(&mut self, path: &Path, html: &str) -> Result<()> {
        let mut file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(html.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        self.html_bytes += html.len() as u64;

        if self.gzip {
            let mut gz_path = path.as_os_str().to_owned();
            gz_path.push(".gz");
            let gz_path = PathBuf::from(gz_path);
            self.gzip_bytes += gzip_to_file(path, &gz_path)
                .with_context(|| format!("failed to gzip {}", path.display()))?;
        }
        self.pages.push(path.display().to_string());
        Ok(())
    }
}

fn render_day(
    ctx: &RenderContext,
    archive: &Archive,
    global: &GlobalIndex,
    pager: &DayPager,
    day: &str,
) -> (String, usize) {
    let day_index = archive.load_day(day);
    let entries = chat_entries(&day_index.conversations, global);
    let conversations: Vec<ConversationView<'_>> = entries
        .iter()
        .map(|entry| ConversationView {
            id: entry.id,
            name: entry.name.clone(),
            messages: archive.load_messages(day, entry.id),
        })
        .collect();
    let html = static_day_page(ctx, day, pager, &entries, &conversations, global).into_string();
    (html, conversations.len())
}

/// Render every archive day into `out_dir`
pub fn prerender(options: PrerenderOptions) -> Result<PrerenderResult> {
    fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("failed to create {}", options.out_dir.display()))?;

    let archive = Archive::new(&options.data_dir);
    let global = archive.load_global();
    let pager = DayPager::new(archive.list_days()?);
    tracing::info!(days = pager.len(), "found days to process");

    let ctx = RenderContext {
        assets: options.assets_href.clone(),
        styles: options.styles_href.clone(),
        public: options.public_href.clone(),
        links: LinkStyle::Static,
        clock: options.clock,
        chat_time: options.chat_time,
    };

    let mut writer = PageWriter {
        gzip: options.gzip,
        pages: Vec::new(),
        html_bytes: 0,
        gzip_bytes: 0,
    };
    let mut conversations = 0;
    for day in pager.days() {
        tracing::info!(%day, "processing");
        let (html, count) = render_day(&ctx, &archive, &global, &pager, day);
        conversations += count;
        let path = options.out_dir.join(format!("{day}.html"));
        writer.write(&path, &html)?;
        tracing::debug!(path = %path.display(), conversations = count, "wrote day page");
    }

    let index_path = match pager.latest() {
        Some(latest) => {
            let path = options.out_dir.join("index.html");
            let html = redirect_page(&LinkStyle::Static.day_href(latest)).into_string();
            writer.write(&path, &html)?;
            Some(path.display().to_string())
        }
        None => {
            tracing::warn!("no days found, skipping index.html");
            None
        }
    };

    let days = pager.len();
    tracing::info!(days, out_dir = %options.out_dir.display(), "prerender complete");

    Ok(PrerenderResult {
        status: "ok".to_string(),
        data_dir: options.data_dir.display().to_string(),
        out_dir: options.out_dir.display().to_string(),
        days,
        conversations,
        pages: writer.pages,
        index_path,
        html_bytes: writer.html_bytes,
        gzip_bytes: options.gzip.then_some(writer.gzip_bytes),
        note: format!(
            "generated {days} day pages in {}",
            options.out_dir.display()
        ),
    })
}
