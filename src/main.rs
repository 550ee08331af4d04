use std::time::Duration;

use chrono::Local;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc::UnboundedReceiver;

use day_planner::app::{App, InputMode};
use day_planner::components::{popup, MonthView, StatusBar, TaskForm, TaskList};
use day_planner::config::Config;
use day_planner::planner::{FiredReminder, ReminderScheduler, TaskStore};
use day_planner::{logging, theme, tui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    let _log_guard = logging::init(config.log_filter.as_deref());
    theme::init(config.theme.build());
    tracing::info!(
        delay_secs = config.reminder_delay_secs,
        notifications = config.notifications,
        "planner starting"
    );

    let today = Local::now().date_naive();
    let mut store = TaskStore::new().with_reminder_delay(config.reminder_delay());
    if config.sample_tasks {
        store = store.with_sample_tasks(today);
    }
    let (scheduler, fired_rx) = ReminderScheduler::new(config.notifications);
    let mut app = App::new(store, scheduler, today);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, fired_rx).await;
    tui::restore()?;

    tracing::info!("planner exiting");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, mut fired_rx: UnboundedReceiver<FiredReminder>) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        while let Ok(fired) = fired_rx.try_recv() {
            app.on_reminder_fired(fired);
            tui::bell();
        }

        // Yield so reminder timers get polled on the current-thread runtime.
        tokio::task::yield_now().await;

        let Some(key) = tui::next_key_press(Duration::from_millis(100))? else {
            continue;
        };

        app.status_message = None;

        if app.alert.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                app.dismiss_alert();
            }
            continue;
        }

        if app.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.show_help = false;
            }
            continue;
        }

        match app.input_mode {
            InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            InputMode::Form => handle_form_input(app, key.code, key.modifiers),
            InputMode::ConfirmDelete => handle_confirm_input(app, key.code),
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content = layout[0];

    if area.width < 60 {
        TaskList::render(frame, content, app.selected_date, app.today, &app.day_tasks, app.selected_index);
    } else {
        let month_w = if area.width >= 100 { 37 } else { 30 };
        let cols = Layout::horizontal([Constraint::Length(month_w), Constraint::Min(20)]).split(content);
        let month_h = cols[0].height.min(10);
        let month_area = Rect { height: month_h, ..cols[0] };

        MonthView::render(frame, month_area, app.selected_date, app.today, &app.days_with_tasks);
        TaskList::render(frame, cols[1], app.selected_date, app.today, &app.day_tasks, app.selected_index);
    }

    if let Some(ref form) = app.form_state {
        TaskForm::render(frame, area, form);
    }

    if app.input_mode == InputMode::ConfirmDelete {
        popup::render_delete_confirm(frame, area, app.pending_delete_title().unwrap_or_default());
    }

    if let Some(ref alert) = app.alert {
        popup::render_alert(frame, area, alert);
    }

    if app.show_help {
        render_help(frame, area);
    }

    StatusBar::render(
        frame,
        layout[1],
        app.input_mode,
        app.pending_reminders(),
        app.status_message.as_deref(),
    );
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_add_form(),
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => app.open_edit_form(),
        (KeyCode::Char(' '), _) => app.toggle_selected_completion(),
        (KeyCode::Char('b'), _) => app.toggle_selected_reminder(),
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => app.request_delete(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Esc, _) => app.close_form(),
        (KeyCode::Enter, _) => app.submit_form(),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.request_delete(),
        (KeyCode::Tab, _) | (KeyCode::Down, _) => {
            if let Some(form) = app.form_mut() {
                form.next_field();
            }
        }
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
            if let Some(form) = app.form_mut() {
                form.prev_field();
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(form) = app.form_mut() {
                form.backspace();
            }
        }
        (KeyCode::Char(c), _) => {
            if let Some(form) = app.form_mut() {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let th = theme::current();
    let popup_area = popup::centered(area, 52, 22);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(th.accent)
        .borders(Borders::ALL)
        .border_style(th.accent);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let section = |name: &'static str| Line::from(Span::styled(name, th.header));
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), th.accent),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        section("Navigation"),
        entry("h/l", "Previous/next day"),
        entry("j/k", "Select task"),
        entry("[/]", "Previous/next month"),
        entry("t", "Jump to today"),
        Line::from(""),
        section("Tasks"),
        entry("n", "New task"),
        entry("e/Enter", "Edit task"),
        entry("Space", "Toggle done"),
        entry("b", "Toggle reminder"),
        entry("d", "Delete task"),
        Line::from(""),
        section("Form"),
        entry("Tab", "Next field"),
        entry("Enter", "Save (needs a title)"),
        entry("Ctrl-d", "Delete task being edited"),
        entry("Esc", "Cancel"),
        Line::from(""),
        entry("q", "Quit"),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
