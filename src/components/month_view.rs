use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::planner::day;
use crate::theme;

const DAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub struct MonthView;

impl MonthView {
    /// Days carrying tasks get a `*` marker.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        selected_date: NaiveDate,
        today: NaiveDate,
        days_with_tasks: &HashSet<u32>,
    ) {
        let th = theme::current();
        let year = selected_date.year();
        let month = selected_date.month();

        let block = Block::default()
            .title(format!(" {} ", selected_date.format("%B %Y")))
            .title_style(th.header)
            .borders(Borders::ALL)
            .border_style(th.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cell_w = if inner.width >= 35 { 5 } else { 4 };

        let mut lines = vec![Line::from(
            DAY_HEADERS
                .iter()
                .map(|d| Span::styled(format!("{:^w$}", d, w = cell_w), th.header))
                .collect::<Vec<_>>(),
        )];

        let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return;
        };
        let lead = first_day.weekday().num_days_from_sunday() as usize;
        let total = day::days_in_month(year, month) as usize;

        let mut cells: Vec<Span> = (0..lead).map(|_| Span::raw(" ".repeat(cell_w))).collect();
        for d in 1..=total as u32 {
            let date = first_day.with_day(d).unwrap_or(first_day);
            let marker = if days_with_tasks.contains(&d) { "*" } else { " " };
            let text = format!("{:>w$}{}", d, marker, w = cell_w - 1);

            let style = if date == selected_date {
                th.selected.add_modifier(if date == today { Modifier::BOLD } else { Modifier::empty() })
            } else if date == today {
                th.today
            } else {
                Style::default()
            };
            cells.push(Span::styled(text, style));

            if cells.len() == 7 {
                lines.push(Line::from(std::mem::take(&mut cells)));
            }
        }
        if !cells.is_empty() {
            lines.push(Line::from(cells));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
