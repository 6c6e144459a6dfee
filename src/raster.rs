use crate::{
    error::{FavgenError, FavgenResult},
    model::SvgDocument,
};

/// A decoded raster frame, straight-alpha RGBA8, row-major.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

/// Render `doc` into a pixel buffer of exactly `width` x `height`.
///
/// The document's declared size does not need to match: the content is scaled
/// per-axis to fill the requested box. Deterministic for a given document and
/// size. Unparseable markup fails with a `Render` error.
pub fn rasterize(doc: &SvgDocument, width: u32, height: u32) -> FavgenResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(FavgenError::validation(
            "raster width/height must be positive",
        ));
    }

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(doc.markup().as_bytes(), &opts)
        .map_err(|e| FavgenError::render(format!("parse svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FavgenError::render("failed to allocate pixmap"))?;

    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(FavgenError::render("svg has invalid intrinsic size"));
    }
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied pixels; PNG wants straight alpha.
    let mut rgba8 = Vec::with_capacity(width as usize * height as usize * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba8.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(RasterImage {
        width,
        height,
        rgba8,
    })
}
