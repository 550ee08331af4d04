use chrono::{NaiveDate, NaiveTime, TimeZone};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::planner::{day, Task, TaskId};
use crate::theme;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Time,
    Date,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Time,
            FormField::Time => FormField::Date,
            FormField::Date => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Date,
            FormField::Time => FormField::Title,
            FormField::Date => FormField::Time,
        }
    }
}

/// Add/edit form. `editing` is `None` when creating a task.
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    pub time: String,
    pub date: String,
    pub active_field: FormField,
    pub editing: Option<TaskId>,
    /// Wall-clock time of the task being edited, used when the time label
    /// does not parse.
    pub original_time: Option<NaiveTime>,
}

impl TaskFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            time: String::new(),
            date: date.format(DATE_FORMAT).to_string(),
            active_field: FormField::Title,
            editing: None,
            original_time: None,
        }
    }

    pub fn edit<Tz: TimeZone>(task: &Task, tz: &Tz) -> Self {
        let local = task.date.with_timezone(tz);
        Self {
            title: task.title.clone(),
            time: task.time.clone(),
            date: local.date_naive().format(DATE_FORMAT).to_string(),
            active_field: FormField::Title,
            editing: Some(task.id),
            original_time: Some(local.time()),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Time of day the task is placed at: the parsed label, else the
    /// edited task's previous time, else midnight.
    pub fn resolved_time(&self) -> NaiveTime {
        day::parse_time_label(&self.time)
            .or(self.original_time)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Save stays disabled until a title is entered.
    pub fn can_submit(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Title => self.title.push(c),
            FormField::Time => self.time.push(c),
            FormField::Date => self.date.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Title => self.title.pop(),
            FormField::Time => self.time.pop(),
            FormField::Date => self.date.pop(),
        };
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
    }
}

pub struct TaskForm;

impl TaskForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &TaskFormState) {
        let th = theme::current();

        let form_w = area.width.clamp(30, 50);
        let form_h = area.height.clamp(8, 10);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w.min(area.width), form_h.min(area.height));

        frame.render_widget(Clear, form_area);

        let heading = if state.is_edit() { " Edit Task " } else { " New Task " };
        let block = Block::default()
            .title(heading)
            .title_style(th.accent)
            .borders(Borders::ALL)
            .border_style(th.accent);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // time
            Constraint::Length(1), // date
            Constraint::Length(1),
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(frame, rows[0], "Title:", &state.title, state.active_field == FormField::Title);
        render_field(frame, rows[1], "Time:", &state.time, state.active_field == FormField::Time);
        render_field(frame, rows[2], "Date:", &state.date, state.active_field == FormField::Date);

        let key = Style::default().add_modifier(Modifier::BOLD);
        let save_key = if state.can_submit() { key } else { th.dim };
        let help = Line::from(vec![
            Span::styled("Tab", key),
            Span::styled(":Next ", th.dim),
            Span::styled("Enter", save_key),
            Span::styled(if state.is_edit() { ":Save " } else { ":Add " }, th.dim),
            Span::styled("Esc", key),
            Span::styled(":Cancel", th.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[4]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let th = theme::current();
    let cursor = if active { "_" } else { "" };
    let style = if active { th.accent } else { Style::default() };

    let spans = vec![
        Span::styled(format!("{:<7}", label), th.dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn new_form_starts_on_selected_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let form = TaskFormState::new(date);
        assert_eq!(form.date, "2024-05-01");
        assert_eq!(form.parsed_date(), Some(date));
        assert!(!form.can_submit());
        assert!(!form.is_edit());
    }

    #[test]
    fn typing_goes_to_active_field() {
        let mut form = TaskFormState::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        for c in "Gym".chars() {
            form.input_char(c);
        }
        form.next_field();
        for c in "7am".chars() {
            form.input_char(c);
        }
        form.backspace();
        form.backspace();

        assert_eq!(form.title, "Gym");
        assert_eq!(form.time, "7");
        assert!(form.can_submit());
        assert_eq!(form.active_field, FormField::Time);
        form.prev_field();
        form.prev_field();
        assert_eq!(form.active_field, FormField::Date);
    }

    #[test]
    fn edit_form_keeps_previous_time_as_fallback() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 14, 15, 0).unwrap();
        let task = Task::new(TaskId(3), "after lunch".into(), "Call".into(), when);

        let form = TaskFormState::edit(&task, &Utc);
        assert_eq!(form.editing, Some(TaskId(3)));
        assert_eq!(form.date, "2024-05-01");
        assert_eq!(form.resolved_time(), NaiveTime::from_hms_opt(14, 15, 0).unwrap());
    }

    #[test]
    fn parsed_label_wins_over_fallback() {
        let mut form = TaskFormState::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(form.resolved_time(), NaiveTime::MIN);
        form.time = "9:00 AM".into();
        assert_eq!(form.resolved_time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn bad_date_does_not_parse() {
        let mut form = TaskFormState::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.date = "2024-13-01".into();
        assert_eq!(form.parsed_date(), None);
    }
}
