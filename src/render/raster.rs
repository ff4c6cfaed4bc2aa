use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    foundation::error::{MergeVizError, MergeVizResult},
    render::FrameRGBA,
};

/// Turns SVG documents into premultiplied RGBA8 pixels.
///
/// Building the font database is the expensive part, so one rasterizer is meant to be reused for
/// every frame of a render.
pub struct Rasterizer {
    opts: usvg::Options<'static>,
}

impl Rasterizer {
    /// A rasterizer that resolves text against the fonts installed on this machine.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_fontdb(Arc::new(db))
    }

    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            opts: usvg::Options {
                fontdb,
                ..Default::default()
            },
        }
    }

    /// Render `svg` at its own pixel size.
    pub fn rasterize(&self, svg: &str) -> MergeVizResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.opts).context("parse frame svg")?;

        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            MergeVizError::evaluation(format!("failed to allocate {width}x{height} pixmap"))
        })?;

        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}
