use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::Alert;
use crate::theme;

/// Centered rectangle of at most `w` x `h` inside `area`.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

pub fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let th = theme::current();
    let popup_area = centered(area, 50, 8);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", alert.title))
        .title_style(th.accent)
        .borders(Borders::ALL)
        .border_style(th.accent);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        Line::from(Span::styled("Press Enter or Esc to dismiss", th.dim)),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_delete_confirm(frame: &mut Frame, area: Rect, title: &str) {
    let th = theme::current();
    let popup_area = centered(area, 46, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Delete Task ")
        .title_style(th.reminder)
        .borders(Borders::ALL)
        .border_style(th.reminder);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from("Are you sure you want to delete this task?"),
        Line::from(Span::styled(title.to_string(), Style::default())),
        Line::from(""),
        Line::from(Span::styled("y: Delete   n/Esc: Cancel", th.dim)),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
