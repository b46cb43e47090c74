use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vitrine_core::marquee::{ScrollState, Track};

use crate::app::{App, Panel, PlacementCard, ScrollAxis, CARD_GAP};
use crate::image_renderer::{halfblocks, ImageRenderer, RenderBackend};
use crate::images::ImageCache;
use crate::theme::GruvboxMaterial;

use super::strip::{marquee_window, window_spans};

pub struct PlacementBoardWidget;

impl PlacementBoardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let (down_area, up_area) = match app.placement_board.axis {
            // Wide: two side-by-side columns scrolling up/down
            ScrollAxis::Vertical => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                (columns[0], columns[1])
            }
            // Narrow: two stacked rows scrolling left/right
            ScrollAxis::Horizontal => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                (rows[0], rows[1])
            }
        };

        app.areas.down = down_area;
        app.areas.up = up_area;

        let axis = app.placement_board.axis;
        let focus = app.focus;

        let App {
            placement_board,
            images,
            image_renderer,
            frame_images,
            ..
        } = app;

        Self::render_track(
            frame,
            down_area,
            " Placements ↓ ",
            "down",
            &placement_board.track_down,
            &placement_board.state_down,
            axis,
            focus == Panel::PlacementDown,
            images,
            image_renderer,
            frame_images,
        );
        Self::render_track(
            frame,
            up_area,
            " Placements ↑ ",
            "up",
            &placement_board.track_up,
            &placement_board.state_up,
            axis,
            focus == Panel::PlacementUp,
            images,
            image_renderer,
            frame_images,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn render_track(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        key_prefix: &str,
        track: &Track<PlacementCard>,
        state: &ScrollState,
        axis: ScrollAxis,
        is_focused: bool,
        images: &ImageCache,
        renderer: &mut ImageRenderer,
        frame_images: &mut Vec<String>,
    ) {
        let border_style = if is_focused {
            Style::default().fg(GruvboxMaterial::ACCENT)
        } else {
            Style::default().fg(GruvboxMaterial::GREY0)
        };

        let full_title = if state.is_paused() {
            format!("{}(paused) ", title)
        } else {
            title.to_string()
        };

        let block = Block::default()
            .title(full_title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(GruvboxMaterial::BG0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if track.is_empty() || inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = match axis {
            ScrollAxis::Vertical => {
                Self::vertical_rows(track, state.offset_cells(), inner.height as usize)
            }
            ScrollAxis::Horizontal => {
                Self::horizontal_rows(track, state.offset_cells(), inner.width as usize)
            }
        };

        frame.render_widget(Paragraph::new(lines), inner);

        // Photos are drawn only along the vertical axis; horizontal rows are
        // too short for a band
        if axis == ScrollAxis::Vertical {
            Self::render_photos(
                frame,
                inner,
                key_prefix,
                track,
                state.offset_cells(),
                images,
                renderer,
                frame_images,
            );
        }
    }

    /// Visible rows of the doubled card column, cycled past the strip end
    fn vertical_rows(
        track: &Track<PlacementCard>,
        offset: usize,
        height: usize,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(height);
        let mut row = 0usize;

        'fill: loop {
            for card in track.rendered() {
                for line_idx in 0..card.height as usize {
                    if row >= offset + height {
                        break 'fill;
                    }
                    if row >= offset {
                        lines.push(Self::card_line(card, line_idx));
                    }
                    row += 1;
                }
            }
        }

        lines
    }

    /// The four card lines as independent horizontal marquee strips sharing
    /// one offset, so whole cards slide sideways in step
    fn horizontal_rows(
        track: &Track<PlacementCard>,
        offset: usize,
        width: usize,
    ) -> Vec<Line<'static>> {
        (0..4)
            .map(|line_idx| {
                let text = marquee_window(
                    track
                        .rendered()
                        .map(|c| (c.lines[line_idx].as_str(), c.width)),
                    offset,
                    width,
                );
                Line::styled(text, Self::line_style(line_idx))
            })
            .collect()
    }

    /// Photo bands of the cards fully visible in the vertical window
    #[allow(clippy::too_many_arguments)]
    fn render_photos(
        frame: &mut Frame,
        inner: Rect,
        key_prefix: &str,
        track: &Track<PlacementCard>,
        offset: usize,
        images: &ImageCache,
        renderer: &mut ImageRenderer,
        frame_images: &mut Vec<String>,
    ) {
        if !renderer.is_active() {
            return;
        }

        let height = inner.height as usize;
        for (i, y, _extent) in window_spans(track.rendered().map(|c| c.height), offset, height) {
            let card = &track.items()[i % track.len()];
            let band = card.image_rows();
            if band == 0 || y < 0 || y as usize + band as usize > height {
                continue;
            }
            let Some(img) = images.get(&card.image_url) else {
                continue;
            };

            let tile = card.width.saturating_sub(CARD_GAP).min(inner.width);
            let band_area = Rect::new(inner.x, inner.y + y as u16, tile, band);
            match renderer.backend() {
                RenderBackend::Kitty => {
                    if let Some(kitty) = renderer.kitty() {
                        let key = format!("plc:{}:{}", key_prefix, i);
                        if let Err(e) = kitty.display_or_update(
                            &key,
                            &card.image_url,
                            img,
                            band_area.x,
                            band_area.y,
                            band_area.width,
                            band_area.height,
                        ) {
                            tracing::error!("Failed to display placement photo: {}", e);
                            continue;
                        }
                        frame_images.push(key);
                    }
                }
                RenderBackend::Halfblocks => {
                    halfblocks::draw(frame, band_area, img);
                }
                RenderBackend::Disabled => {}
            }
        }
    }

    fn card_line(card: &PlacementCard, line_idx: usize) -> Line<'static> {
        let band = card.image_rows() as usize;
        if line_idx < band {
            // Photo band row; the image is drawn over it separately
            return Line::raw("");
        }
        match card.lines.get(line_idx - band) {
            Some(text) => Line::styled(text.clone(), Self::line_style(line_idx - band)),
            // Gap row below the card
            None => Line::raw(""),
        }
    }

    fn line_style(line_idx: usize) -> Style {
        match line_idx {
            0 => Style::default()
                .fg(GruvboxMaterial::FG0)
                .add_modifier(Modifier::BOLD),
            1 => Style::default().fg(GruvboxMaterial::BLUE),
            2 => Style::default().fg(GruvboxMaterial::GREY2),
            _ => Style::default()
                .fg(GruvboxMaterial::GREEN)
                .add_modifier(Modifier::BOLD),
        }
    }
}
