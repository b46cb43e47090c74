//! Unicode halfblock image rendering
//!
//! Each cell shows two vertically stacked pixels: `▀` with the foreground
//! carrying the top pixel and the background the bottom one. Works in any
//! truecolor terminal, no protocol support needed.

use image::DynamicImage;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Pixel extent of an image fit inside `cols` x `rows` cells, aspect
/// preserved (one cell is one pixel wide and two pixels tall)
fn fit_pixels(img_size: (u32, u32), cols: u16, rows: u16) -> (u32, u32) {
    let (img_w, img_h) = img_size;
    let max_w = cols as u32;
    let max_h = rows as u32 * 2;

    let scale_w = max_w as f32 / img_w as f32;
    let scale_h = max_h as f32 / img_h as f32;
    let scale = scale_w.min(scale_h);

    let w = ((img_w as f32 * scale) as u32).max(1);
    let h = ((img_h as f32 * scale) as u32).max(1);
    (w, h)
}

/// Draw an image into `area`, centered horizontally
pub fn draw(frame: &mut Frame, area: Rect, img: &DynamicImage) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let (w, h) = fit_pixels((img.width(), img.height()), area.width, area.height);
    let resized = img.resize_exact(w, h, image::imageops::FilterType::Triangle);
    let rgba = resized.to_rgba8();

    let x_offset = (area.width as u32).saturating_sub(w) / 2;

    for row in 0..h.div_ceil(2) {
        let y = row * 2;
        let mut spans: Vec<Span> = Vec::with_capacity(w as usize + 1);
        if x_offset > 0 {
            spans.push(Span::raw(" ".repeat(x_offset as usize)));
        }

        for x in 0..w {
            let top = rgba.get_pixel(x, y);
            let bottom = if y + 1 < h { rgba.get_pixel(x, y + 1) } else { top };

            spans.push(Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
            ));
        }

        let line_area = Rect {
            x: area.x,
            y: area.y + row as u16,
            width: area.width,
            height: 1,
        };
        if line_area.y < area.y + area.height {
            frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_bounded_by_cell_rows() {
        // 100x100 into a 20x4 cell band: 4 rows hold 8 pixels of height
        assert_eq!(fit_pixels((100, 100), 20, 4), (8, 8));
    }

    #[test]
    fn test_fit_wide_image_bounded_by_width() {
        assert_eq!(fit_pixels((200, 50), 20, 10), (20, 5));
    }
}
