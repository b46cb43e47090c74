//! Kitty graphics protocol renderer
//!
//! See: https://sw.kovidgoyal.net/kitty/graphics-protocol/
//!
//! Marquee cards reposition every animation frame, so the renderer keys
//! displayed images by a stable card key, skips retransmission when nothing
//! moved, and caches PNG encodings under dimensions quantized to a bucket so
//! small size jitter during scroll does not re-encode.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, GenericImageView};

/// Dimension quantization bucket for encode-cache stability
const BUCKET: u16 = 4;

/// Kitty protocol chunk limit
const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DisplayedAt {
    x: u16,
    y: u16,
    cols: u16,
    rows: u16,
}

struct Encoded {
    png: Vec<u8>,
    cols: u16,
    rows: u16,
}

pub struct KittyRenderer {
    next_id: u32,
    /// Currently displayed images: card key -> (kitty id, position)
    displayed: HashMap<String, (u32, DisplayedAt)>,
    /// Encoded PNGs keyed by (url, quantized cols, quantized rows)
    encoded: HashMap<(String, u16, u16), Encoded>,
    /// Cell dimensions in pixels
    cell_size: (u32, u32),
}

impl KittyRenderer {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            displayed: HashMap::new(),
            encoded: HashMap::new(),
            cell_size: (8, 16),
        }
    }

    fn quantize(cols: u16, rows: u16) -> (u16, u16) {
        let q = |v: u16| (v.div_ceil(BUCKET) * BUCKET).max(BUCKET);
        (q(cols), q(rows))
    }

    /// Display an image at a cell position, or move it if already shown
    ///
    /// Transmits nothing when the key is already displayed at the same spot.
    pub fn display_or_update(
        &mut self,
        key: &str,
        url: &str,
        img: &DynamicImage,
        x: u16,
        y: u16,
        max_cols: u16,
        max_rows: u16,
    ) -> io::Result<()> {
        let target = DisplayedAt {
            x,
            y,
            cols: max_cols,
            rows: max_rows,
        };
        if self
            .displayed
            .get(key)
            .is_some_and(|(_, at)| *at == target)
        {
            return Ok(());
        }

        if let Some((old_id, _)) = self.displayed.remove(key) {
            self.delete_image(old_id)?;
        }

        let (q_cols, q_rows) = Self::quantize(max_cols, max_rows);
        let cache_key = (url.to_string(), q_cols, q_rows);
        if !self.encoded.contains_key(&cache_key) {
            let enc = encode_png_fit(img, q_cols, q_rows, self.cell_size)?;
            self.encoded.insert(cache_key.clone(), enc);
        }
        let encoded = &self.encoded[&cache_key];
        let cols = encoded.cols.min(max_cols);
        let rows = encoded.rows.min(max_rows);

        // Center horizontally within the card extent
        let centered_x = x + (max_cols.saturating_sub(cols)) / 2;

        let id = self.next_id;
        self.next_id += 1;
        Self::transmit(id, &self.encoded[&cache_key].png, centered_x, y, cols, rows)?;

        self.displayed.insert(key.to_string(), (id, target));
        Ok(())
    }

    /// Delete images whose keys were not displayed this frame
    pub fn end_frame(&mut self, active_keys: &[String]) -> io::Result<()> {
        let stale: Vec<(String, u32)> = self
            .displayed
            .iter()
            .filter(|(key, _)| !active_keys.contains(key))
            .map(|(key, (id, _))| (key.clone(), *id))
            .collect();

        for (key, id) in stale {
            self.delete_image(id)?;
            self.displayed.remove(&key);
        }
        Ok(())
    }

    pub fn clear_all(&mut self) -> io::Result<()> {
        if self.displayed.is_empty() {
            return Ok(());
        }

        // a=d (delete), d=A (all images)
        let mut stdout = io::stdout();
        stdout.write_all(b"\x1b_Ga=d,d=A\x1b\\")?;
        stdout.flush()?;

        self.displayed.clear();
        self.encoded.clear();
        Ok(())
    }

    fn delete_image(&self, id: u32) -> io::Result<()> {
        let cmd = format!("\x1b_Ga=d,d=I,i={}\x1b\\", id);
        let mut stdout = io::stdout();
        stdout.write_all(cmd.as_bytes())?;
        stdout.flush()
    }

    /// Send chunked PNG data at a cell position, cursor preserved
    fn transmit(id: u32, png: &[u8], x: u16, y: u16, cols: u16, rows: u16) -> io::Result<()> {
        let mut stdout = io::stdout();

        stdout.write_all(b"\x1b[s")?;
        let pos = format!("\x1b[{};{}H", y + 1, x + 1);
        stdout.write_all(pos.as_bytes())?;

        let total_chunks = png.len().div_ceil(CHUNK_SIZE);
        for (i, chunk) in png.chunks(CHUNK_SIZE).enumerate() {
            let b64 = STANDARD.encode(chunk);
            let more = if i + 1 == total_chunks { 0 } else { 1 };

            // a=T transmit and display, f=100 PNG, t=d direct, q=2 quiet,
            // C=1 do not move the cursor
            let cmd = if i == 0 {
                format!(
                    "\x1b_Ga=T,f=100,t=d,i={},c={},r={},q=2,C=1,m={};{}\x1b\\",
                    id, cols, rows, more, b64
                )
            } else {
                format!("\x1b_Gm={};{}\x1b\\", more, b64)
            };
            stdout.write_all(cmd.as_bytes())?;
        }

        stdout.write_all(b"\x1b[u")?;
        stdout.flush()
    }
}

impl Default for KittyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell extent of an image fit inside `max_cols` x `max_rows`, aspect
/// preserved, never upscaled
fn fit_cells(
    img_size: (u32, u32),
    max_cols: u16,
    max_rows: u16,
    cell_size: (u32, u32),
) -> (u32, u32, u16, u16) {
    let (img_w, img_h) = img_size;
    let (cell_w, cell_h) = cell_size;
    let max_px_w = max_cols as u32 * cell_w;
    let max_px_h = max_rows as u32 * cell_h;

    let scale_w = max_px_w as f32 / img_w as f32;
    let scale_h = max_px_h as f32 / img_h as f32;
    let scale = scale_w.min(scale_h).min(1.0);

    let px_w = ((img_w as f32 * scale) as u32).max(1);
    let px_h = ((img_h as f32 * scale) as u32).max(1);
    let cols = px_w.div_ceil(cell_w) as u16;
    let rows = px_h.div_ceil(cell_h) as u16;

    (px_w, px_h, cols, rows)
}

fn encode_png_fit(
    img: &DynamicImage,
    max_cols: u16,
    max_rows: u16,
    cell_size: (u32, u32),
) -> io::Result<Encoded> {
    let (px_w, px_h, cols, rows) = fit_cells(img.dimensions(), max_cols, max_rows, cell_size);

    // Triangle filter is fast enough for per-scroll re-encodes
    let to_encode: Cow<DynamicImage> = if (px_w, px_h) != img.dimensions() {
        Cow::Owned(img.resize(px_w, px_h, image::imageops::FilterType::Triangle))
    } else {
        Cow::Borrowed(img)
    };

    let mut png = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png);
    to_encode
        .write_with_encoder(encoder)
        .map_err(io::Error::other)?;

    Ok(Encoded { png, cols, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_up_to_bucket() {
        assert_eq!(KittyRenderer::quantize(5, 3), (8, 4));
        assert_eq!(KittyRenderer::quantize(4, 8), (4, 8));
        assert_eq!(KittyRenderer::quantize(0, 1), (4, 4));
    }

    #[test]
    fn test_fit_wide_image_bounded_by_width() {
        // 800x100 into 20x10 cells of 8x16 px: bound is 160 px wide
        let (px_w, px_h, cols, rows) = fit_cells((800, 100), 20, 10, (8, 16));
        assert_eq!((px_w, px_h), (160, 20));
        assert_eq!((cols, rows), (20, 2));
    }

    #[test]
    fn test_fit_never_upscales() {
        let (px_w, px_h, cols, rows) = fit_cells((16, 16), 20, 10, (8, 16));
        assert_eq!((px_w, px_h), (16, 16));
        assert_eq!((cols, rows), (2, 1));
    }
}
