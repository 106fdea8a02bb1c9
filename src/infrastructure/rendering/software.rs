use futures::future::{self, LocalBoxFuture};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba as Pixel, RgbaImage};
use std::ops::Range;

use super::scene::{ImageOrigin, SceneImage};
use crate::domain::{
    capture::{
        CrossOriginPolicy, EncodedImage, ImageAccess, ImageFormat, RasterError, Rasterizer, Rect,
        Rgba, SurfaceSpec, TextRun, payload::to_data_url,
    },
    logging::LogComponent,
};
use crate::log_trace;

struct Surface {
    pixels: RgbaImage,
    scale: f64,
    verbose: bool,
}

/// CPU rasterizer over an [`RgbaImage`], encoding with the `image` crate.
///
/// Boxes, borders and images are drawn; there is no font engine, so text
/// runs leave no pixels.
#[derive(Default)]
pub struct SoftwareRasterizer {
    surface: Option<Surface>,
}

impl SoftwareRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a surface is currently allocated.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    fn surface_mut(&mut self) -> Result<&mut Surface, RasterError> {
        self.surface.as_mut().ok_or(RasterError::NotStarted)
    }
}

impl Rasterizer for SoftwareRasterizer {
    type Image = SceneImage;

    fn begin(&mut self, spec: SurfaceSpec) -> Result<(), RasterError> {
        let fill = Pixel(spec.background.to_array());
        self.surface = Some(Surface {
            pixels: RgbaImage::from_pixel(spec.width, spec.height, fill),
            scale: spec.scale,
            verbose: spec.verbose,
        });
        Ok(())
    }

    fn check_image<'a>(
        &'a self,
        image: &'a SceneImage,
        policy: CrossOriginPolicy,
    ) -> LocalBoxFuture<'a, ImageAccess<SceneImage>> {
        let access = if image.bitmap.width() == 0 || image.bitmap.height() == 0 {
            ImageAccess::Unavailable { source: image.source().to_string() }
        } else {
            match &image.origin {
                ImageOrigin::Local => ImageAccess::Readable(image.clone()),
                ImageOrigin::Foreign { cors: true, .. } if policy.use_cors => {
                    ImageAccess::Readable(image.clone())
                }
                ImageOrigin::Foreign { url, .. } => ImageAccess::Tainted { source: url.clone() },
            }
        };
        Box::pin(future::ready(access))
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), RasterError> {
        let surface = self.surface_mut()?;
        fill_device_rect(&mut surface.pixels, rect.scaled(surface.scale), color);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64) -> Result<(), RasterError> {
        let surface = self.surface_mut()?;
        let r = rect.scaled(surface.scale);
        let w = (width * surface.scale).min(r.width / 2.0).min(r.height / 2.0);
        let edges = [
            Rect::new(r.x, r.y, r.width, w),
            Rect::new(r.x, r.bottom() - w, r.width, w),
            Rect::new(r.x, r.y + w, w, r.height - 2.0 * w),
            Rect::new(r.right() - w, r.y + w, w, r.height - 2.0 * w),
        ];
        for edge in edges {
            fill_device_rect(&mut surface.pixels, edge, color);
        }
        Ok(())
    }

    fn fill_text(&mut self, run: &TextRun) -> Result<(), RasterError> {
        if self.surface_mut()?.verbose {
            log_trace!(
                LogComponent::Infrastructure("SoftwareRasterizer"),
                "text run '{}' not rasterized",
                run.text
            );
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &SceneImage, rect: Rect) -> Result<(), RasterError> {
        let surface = self.surface_mut()?;
        let target = rect.scaled(surface.scale);
        let width = target.width.round() as u32;
        let height = target.height.round() as u32;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let bitmap = &*image.bitmap;
        let x = target.x.round() as i64;
        let y = target.y.round() as i64;
        if bitmap.dimensions() == (width, height) {
            imageops::overlay(&mut surface.pixels, bitmap, x, y);
        } else {
            let resized = imageops::resize(bitmap, width, height, FilterType::Nearest);
            imageops::overlay(&mut surface.pixels, &resized, x, y);
        }
        Ok(())
    }

    fn finish(&mut self, format: ImageFormat, quality: f64) -> Result<EncodedImage, RasterError> {
        let Surface { pixels, .. } = self.surface.take().ok_or(RasterError::NotStarted)?;
        let (width, height) = pixels.dimensions();
        let bytes = encode(pixels, format, quality)?;
        Ok(EncodedImage {
            data_url: to_data_url(format, &bytes),
            width,
            height,
            format,
        })
    }

    fn release(&mut self) {
        self.surface = None;
    }
}

fn encode(pixels: RgbaImage, format: ImageFormat, quality: f64) -> Result<Vec<u8>, RasterError> {
    let (width, height) = pixels.dimensions();
    let mut bytes = Vec::new();
    let result = match format {
        ImageFormat::Png => PngEncoder::new(&mut bytes).write_image(
            pixels.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(pixels).to_rgb8();
            let q = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
            JpegEncoder::new_with_quality(&mut bytes, q).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|e| RasterError::Encoding(e.to_string()))?;
    Ok(bytes)
}

fn fill_device_rect(pixels: &mut RgbaImage, rect: Rect, color: Rgba) {
    if color.is_transparent() {
        return;
    }
    let Some((x0, y0, x1, y1)) = rect.pixel_span(pixels.dimensions()) else {
        return;
    };
    let row_len = pixels.width() as usize * 4;
    let columns = x0 as usize * 4..x1 as usize * 4;
    for_each_row(pixels, row_len, y0 as usize..y1 as usize, |row| {
        for px in row[columns.clone()].chunks_exact_mut(4) {
            let blended = color.blend_over([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&blended);
        }
    });
}

#[cfg(not(feature = "parallel"))]
fn for_each_row(buf: &mut [u8], row_len: usize, rows: Range<usize>, f: impl Fn(&mut [u8])) {
    buf[rows.start * row_len..rows.end * row_len]
        .chunks_mut(row_len)
        .for_each(f);
}

#[cfg(feature = "parallel")]
fn for_each_row(
    buf: &mut [u8],
    row_len: usize,
    rows: Range<usize>,
    f: impl Fn(&mut [u8]) + Sync + Send,
) {
    use rayon::prelude::*;
    buf[rows.start * row_len..rows.end * row_len]
        .par_chunks_mut(row_len)
        .for_each(f);
}
