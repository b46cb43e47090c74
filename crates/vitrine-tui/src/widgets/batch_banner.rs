use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct BatchBannerWidget;

impl BatchBannerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let mut tagline = vec![Span::styled(
            app.banner.visible().to_string(),
            Style::default()
                .fg(GruvboxMaterial::ORANGE)
                .add_modifier(Modifier::BOLD),
        )];
        if !app.banner.is_complete() {
            tagline.push(Span::styled(
                "▌",
                Style::default().fg(GruvboxMaterial::GREY2),
            ));
        }

        let batch_line = match &app.upcoming {
            Some(course) => Line::from(vec![
                Span::styled(
                    "📅 New batch starting on: ",
                    Style::default().fg(GruvboxMaterial::GREY2),
                ),
                Span::styled(
                    course.start_date_ymd(),
                    Style::default().fg(GruvboxMaterial::AQUA),
                ),
                Span::styled(
                    "   ⏱ Duration: ",
                    Style::default().fg(GruvboxMaterial::GREY2),
                ),
                Span::styled(
                    course.duration.clone(),
                    Style::default().fg(GruvboxMaterial::AQUA),
                ),
            ]),
            None => Line::raw(""),
        };

        let paragraph = Paragraph::new(vec![Line::from(tagline), batch_line])
            .style(Style::default().bg(GruvboxMaterial::BG0));
        frame.render_widget(paragraph, area);
    }
}
