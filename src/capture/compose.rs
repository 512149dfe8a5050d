//! Compositing of the final capture image
//!
//! The page is rasterized downscaled; the selection's sub-region is scaled
//! back up to its true pixel size, and the annotation surface is drawn on
//! top last so strokes are never occluded by page content.

use std::io::Cursor;

use anyhow::{Context, Result, ensure};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};
use tiny_skia::{IntSize, Pixmap, PixmapPaint, Transform};

use crate::domain::SelectionRect;

/// Convert an image to a Pixmap, apply a drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    img.copy_from_slice(pixmap.data());
}

/// Produce the output raster for a confirmed selection
///
/// `page` is the full-page raster captured at `scale`; the crop source is
/// the selection scaled by the same factor, mapped onto an output of the
/// selection's unscaled dimensions.
pub(crate) fn compose_region(
    page: &RgbaImage,
    rect: &SelectionRect,
    scale: f32,
    annotations: &Pixmap,
) -> Result<RgbaImage> {
    let dims = rect
        .dimensions()
        .context("selection rectangle has no pixel area")?;

    let src = rect.scaled(scale);
    let sx = src.x.floor().max(0.0) as u32;
    let sy = src.y.floor().max(0.0) as u32;
    ensure!(
        sx < page.width() && sy < page.height(),
        "selection ({}, {}) lies outside the {}x{} page raster",
        sx,
        sy,
        page.width(),
        page.height()
    );
    let sw = (src.width.round() as u32).clamp(1, page.width() - sx);
    let sh = (src.height.round() as u32).clamp(1, page.height() - sy);

    // Crop the downscaled page, then upsample to the selection's true size
    let cropped = imageops::crop_imm(page, sx, sy, sw, sh).to_image();
    let mut output = imageops::resize(&cropped, dims.width(), dims.height(), FilterType::Triangle);

    // Annotations always land on top of the page content
    with_pixmap(&mut output, |pixmap| {
        pixmap.draw_pixmap(
            0,
            0,
            annotations.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    });

    Ok(output)
}

/// Encode the composited raster as a JPEG
pub(crate) fn encode_jpeg(img: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        Rgb([p[0], p[1], p[2]])
    });

    let mut bytes = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        Cursor::new(&mut bytes),
        quality,
    ))
    .context("JPEG encoding failed")?;
    Ok(bytes)
}
