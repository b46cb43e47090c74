use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            Self::contact_line(app)
        };

        let help_hint = " q:quit Tab:panels Space:pause r:refresh ";
        let padding_len = area
            .width
            .saturating_sub(status_text.width() as u16 + help_hint.width() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(GruvboxMaterial::FG0)
                    .bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Footer contact details; absent fields are hidden, not rendered empty
    fn contact_line(app: &App) -> String {
        let Some(contact) = &app.contact else {
            return String::from(" ");
        };

        let mut parts = Vec::new();
        if let Some(mobile) = &contact.mobile {
            parts.push(format!("📞 {}", mobile));
        }
        if let Some(email) = &contact.email {
            parts.push(format!("✉ {}", email));
        }
        if contact.instagram.is_some() {
            parts.push("Instagram ✓".to_string());
        }
        if contact.linkedin.is_some() {
            parts.push("LinkedIn ✓".to_string());
        }

        if parts.is_empty() {
            String::from(" ")
        } else {
            format!(" {}", parts.join("  |  "))
        }
    }
}
