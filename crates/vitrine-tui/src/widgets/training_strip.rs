use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Panel};
use crate::theme::GruvboxMaterial;

use super::strip::marquee_window;

pub struct TrainingStripWidget;

impl TrainingStripWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        app.areas.training = area;
        let is_focused = app.focus == Panel::TrainingStrip;

        let border_style = if is_focused {
            Style::default().fg(GruvboxMaterial::ACCENT)
        } else {
            Style::default().fg(GruvboxMaterial::GREY0)
        };

        let title = if app.training_strip.state.is_paused() {
            " Trainings (paused) "
        } else {
            " Trainings "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(GruvboxMaterial::BG0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let strip = &app.training_strip;
        if strip.track.is_empty() || inner.height == 0 {
            return;
        }

        let line = marquee_window(
            strip.track.rendered().map(|c| (c.label.as_str(), c.width)),
            strip.state.offset_cells(),
            inner.width as usize,
        );

        let row_area = Rect::new(inner.x, inner.y, inner.width, 1);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(GruvboxMaterial::GREEN)),
            row_area,
        );
    }
}
