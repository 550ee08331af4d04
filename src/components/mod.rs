pub mod month_view;
pub mod popup;
pub mod status_bar;
pub mod task_form;
pub mod task_list;

pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use task_form::{TaskForm, TaskFormState};
pub use task_list::TaskList;
