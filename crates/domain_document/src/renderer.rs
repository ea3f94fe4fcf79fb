//! Document renderer port and the paged text adapter
//!
//! Rendering is the only asynchronous step of finalisation. The text renderer
//! moves layout onto the blocking pool so a large occupant list never stalls
//! the caller's executor.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::document::ReservationDocument;
use crate::error::DocumentError;
use crate::layout::{self, MIN_PAGE_LINES};

/// Media type of the text artifact
pub const TEXT_MEDIA_TYPE: &str = "text/plain; charset=utf-8";

/// Default number of lines per page
pub const DEFAULT_PAGE_LINES: usize = 60;

/// A downloadable document produced by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    pub file_name: String,
    pub media_type: String,
    pub pages: usize,
    pub bytes: Vec<u8>,
}

impl RenderedArtifact {
    /// The artifact as text, `None` for non UTF-8 content
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Turns a composed document into an artifact
///
/// Implementations render all six sections in [`SectionKind::ALL`] order,
/// repeat the footer on every page and fail when a section is missing.
///
/// [`SectionKind::ALL`]: crate::document::SectionKind::ALL
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, document: &ReservationDocument) -> Result<RenderedArtifact, DocumentError>;
}

/// Renders a document as paged UTF-8 text with grid tables
#[derive(Debug, Clone)]
pub struct TextRenderer {
    page_lines: usize,
}

impl TextRenderer {
    /// Creates a renderer; page sizes below the layout minimum are raised to it
    pub fn new(page_lines: usize) -> Self {
        Self {
            page_lines: page_lines.max(MIN_PAGE_LINES),
        }
    }

    pub fn page_lines(&self) -> usize {
        self.page_lines
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LINES)
    }
}

#[async_trait]
impl DocumentRenderer for TextRenderer {
    async fn render(&self, document: &ReservationDocument) -> Result<RenderedArtifact, DocumentError> {
        document.ensure_complete()?;

        let owned = document.clone();
        let page_lines = self.page_lines;
        let paged = tokio::task::spawn_blocking(move || layout::layout(&owned, page_lines))
            .await
            .map_err(|e| DocumentError::render(format!("layout task failed: {}", e)))??;

        let pages = paged.page_count();
        let bytes = paged.into_text().into_bytes();
        debug!(
            reservation_number = %document.reservation_number,
            pages,
            bytes = bytes.len(),
            "Document rendered"
        );

        Ok(RenderedArtifact {
            file_name: document.download_file_name(),
            media_type: TEXT_MEDIA_TYPE.to_string(),
            pages,
            bytes,
        })
    }
}
