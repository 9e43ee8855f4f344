//! Raster images (logo, signature) as PDF image XObjects.

use crate::errors::{AppError, AppResult};
use image::{DynamicImage, ImageReader};
use pdf_writer::{Filter, Pdf, Ref};
use std::path::Path;

/// A decoded image, already Flate-compressed for embedding.
pub struct PdfImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    /// 8-bit soft mask, present only when the source had transparency.
    alpha: Option<Vec<u8>>,
}

impl PdfImage {
    /// Decode PNG / JPEG by content, not by extension.
    pub fn load(path: &Path) -> AppResult<Self> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| AppError::Receipt(format!("{}: {}", path.display(), e)))?;
        Self::from_dynamic(&img)
    }

    pub fn from_dynamic(img: &DynamicImage) -> AppResult<Self> {
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(AppError::Receipt("empty image".into()));
        }

        let rgba = img.to_rgba8();
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for p in rgba.pixels() {
            let [r, g, b, a] = p.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        let translucent = img.color().has_alpha() && alpha.iter().any(|a| *a != 255);

        Ok(Self {
            width,
            height,
            rgb: super::pdf::deflate(&rgb),
            alpha: translucent.then(|| super::pdf::deflate(&alpha)),
        })
    }

    /// Height / width.
    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }

    pub fn has_mask(&self) -> bool {
        self.alpha.is_some()
    }

    /// Largest (w, h) with this aspect ratio inside `max_w` × `max_h`.
    pub fn fit(&self, max_w: f32, max_h: f32) -> (f32, f32) {
        let mut w = max_w;
        let mut h = w * self.aspect();
        if h > max_h {
            h = max_h;
            w = h / self.aspect();
        }
        (w, h)
    }

    pub(crate) fn write(&self, pdf: &mut Pdf, id: Ref, mask_id: Option<Ref>) {
        {
            let mut x = pdf.image_xobject(id, &self.rgb);
            x.filter(Filter::FlateDecode);
            x.width(self.width as i32);
            x.height(self.height as i32);
            x.color_space().device_rgb();
            x.bits_per_component(8);
            if let Some(m) = mask_id.filter(|_| self.has_mask()) {
                x.s_mask(m);
            }
        }

        if let (Some(m), Some(alpha)) = (mask_id, &self.alpha) {
            let mut s = pdf.image_xobject(m, alpha);
            s.filter(Filter::FlateDecode);
            s.width(self.width as i32);
            s.height(self.height as i32);
            s.color_space().device_gray();
            s.bits_per_component(8);
        }
    }
}
