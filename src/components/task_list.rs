use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::planner::{day, Task};
use crate::theme;

const TIME_COL: usize = 8;

pub struct TaskList;

impl TaskList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        today: NaiveDate,
        tasks: &[Task],
        selected: usize,
    ) {
        let th = theme::current();
        let w = area.width as usize;

        let title = if w >= 34 {
            format!(" {} ", day::relative_label(date, today))
        } else {
            format!(" {} ", date.format("%b %d, %Y"))
        };

        let done = tasks.iter().filter(|t| t.is_completed).count();
        let count_str = match tasks.len() {
            0 => String::new(),
            1 => format!(" 1 task, {} done ", done),
            n => format!(" {} tasks, {} done ", n, done),
        };

        let block = Block::default()
            .title(title)
            .title_style(th.header)
            .title_bottom(Line::from(Span::styled(count_str, th.dim)))
            .borders(Borders::ALL)
            .border_style(th.border);

        if tasks.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("No tasks for {}", day::relative_label(date, today)),
                    th.dim,
                )),
                Line::from(""),
                Line::from(Span::styled("Press n to add one", th.dim)),
            ]);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = tasks.iter().map(|t| format_task(t, inner_w)).collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(th.selected);
        let mut state = ListState::default().with_selected(Some(selected.min(tasks.len() - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn format_task(task: &Task, max_width: usize) -> ListItem<'static> {
    let th = theme::current();

    let time_span = Span::styled(
        format!("{:<width$}", truncate(&task.time, TIME_COL - 1), width = TIME_COL),
        th.dim,
    );

    let (checkbox, checkbox_style) = if task.is_completed {
        ("[x] ", th.done.remove_modifier(Modifier::CROSSED_OUT))
    } else {
        ("[ ] ", Style::default())
    };

    let title_style = if task.is_completed {
        th.done.add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let bell = if task.has_reminder { " \u{1F514}" } else { "" };
    let room = max_width.saturating_sub(TIME_COL + checkbox.len() + bell.len());

    let spans = vec![
        time_span,
        Span::styled(checkbox, checkbox_style),
        Span::styled(truncate(&task.title, room), title_style),
        Span::styled(bell, th.reminder),
    ];

    ListItem::new(Line::from(spans))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Dentist", 10), "Dentist");
        assert_eq!(truncate("Business Deep Work", 10), "Busines...");
        assert_eq!(truncate("café au lait", 6), "caf...");
        assert_eq!(truncate("abc", 2), "ab");
    }
}
