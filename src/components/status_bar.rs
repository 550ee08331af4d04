use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::InputMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    /// `message` replaces the key hints when present.
    pub fn render(frame: &mut Frame, area: Rect, mode: InputMode, pending_reminders: usize, message: Option<&str>) {
        let th = theme::current();
        let w = area.width as usize;

        let mode_str = match mode {
            InputMode::Normal => "Planner",
            InputMode::Form => "Planner [Edit]",
            InputMode::ConfirmDelete => "Planner [Delete?]",
        };
        let left = if pending_reminders > 0 {
            format!(" {} \u{1F514}{} ", mode_str, pending_reminders)
        } else {
            format!(" {} ", mode_str)
        };

        let right = match message {
            Some(msg) => format!(" {} ", msg),
            None if w >= 90 => {
                " hl:Day jk:Select [/]:Month t:Today n:New e:Edit Sp:Done b:Remind d:Del ?:Help q:Quit "
                    .to_string()
            }
            None if w >= 55 => " n:New e:Edit Sp:Done b:Remind d:Del q:Quit ".to_string(),
            None => " ?:Help q:Quit ".to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, th.status),
            Span::styled(padding, th.status),
            Span::styled(right, th.status),
        ]);
        frame.render_widget(Paragraph::new(line).style(th.status), area);
    }
}
