use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vitrine_core::marquee::{ScrollState, Track};

use crate::app::{App, CertCard, Panel, CARD_GAP};
use crate::image_renderer::{halfblocks, ImageRenderer, RenderBackend};
use crate::images::ImageCache;
use crate::theme::GruvboxMaterial;

use super::strip::{marquee_window, window_spans};

pub struct CertWallWidget;

impl CertWallWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        app.areas.cert = area;
        let is_focused = app.focus == Panel::CertWall;

        let border_style = if is_focused {
            Style::default().fg(GruvboxMaterial::ACCENT)
        } else {
            Style::default().fg(GruvboxMaterial::GREY0)
        };

        let title = if app.cert_wall.is_paused() {
            " Certificates (paused) "
        } else {
            " Certificates "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(GruvboxMaterial::BG0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Empty collection renders nothing; that is a no-op, not an error
        if app.cert_wall.track_a.is_empty() || inner.height == 0 {
            return;
        }

        // Split borrows: the wall is read, images are read, the renderer and
        // frame key list are written
        let App {
            cert_wall,
            images,
            image_renderer,
            frame_images,
            ..
        } = app;

        let rows = [
            (&cert_wall.track_a, &cert_wall.state_a),
            (&cert_wall.track_b, &cert_wall.state_b),
        ];
        let row_height = (inner.height / 2).max(1);

        for (row_idx, (track, state)) in rows.iter().enumerate() {
            if track.is_empty() {
                continue;
            }
            let row_y = inner.y + row_idx as u16 * row_height;
            if row_y + row_height > inner.y + inner.height {
                break;
            }
            let row_area = Rect::new(inner.x, row_y, inner.width, row_height);

            Self::render_row(
                frame,
                row_area,
                row_idx,
                track,
                state,
                images,
                image_renderer,
                frame_images,
            );
        }
    }

    /// One wall row: an image band with the label line beneath it
    #[allow(clippy::too_many_arguments)]
    fn render_row(
        frame: &mut Frame,
        area: Rect,
        row_idx: usize,
        track: &Track<CertCard>,
        state: &ScrollState,
        images: &ImageCache,
        renderer: &mut ImageRenderer,
        frame_images: &mut Vec<String>,
    ) {
        let offset = state.offset_cells();
        let width = area.width as usize;
        let band_rows = area.height - 1;

        let line = marquee_window(
            track.rendered().map(|c| (c.label.as_str(), c.width)),
            offset,
            width,
        );
        let label_area = Rect::new(area.x, area.y + band_rows, area.width, 1);
        frame.render_widget(
            Paragraph::new(line).style(
                Style::default()
                    .fg(GruvboxMaterial::YELLOW)
                    .add_modifier(Modifier::BOLD),
            ),
            label_area,
        );

        if band_rows == 0 || !renderer.is_active() {
            return;
        }

        for (i, x, extent) in window_spans(track.rendered().map(|c| c.width), offset, width) {
            let tile = extent.saturating_sub(CARD_GAP);
            // Native protocols cannot clip, so only fully visible tiles draw
            if tile == 0 || x < 0 || x as usize + tile as usize > width {
                continue;
            }
            let card = &track.items()[i % track.len()];
            let Some(img) = images.get(&card.image_url) else {
                continue;
            };

            let tile_x = area.x + x as u16;
            match renderer.backend() {
                RenderBackend::Kitty => {
                    if let Some(kitty) = renderer.kitty() {
                        let key = format!("cert{}:{}", row_idx, i);
                        if let Err(e) = kitty.display_or_update(
                            &key,
                            &card.image_url,
                            img,
                            tile_x,
                            area.y,
                            tile,
                            band_rows,
                        ) {
                            tracing::error!("Failed to display certificate image: {}", e);
                            continue;
                        }
                        frame_images.push(key);
                    }
                }
                RenderBackend::Halfblocks => {
                    let band = Rect::new(tile_x, area.y, tile, band_rows);
                    halfblocks::draw(frame, band, img);
                }
                RenderBackend::Disabled => {}
            }
        }
    }
}
