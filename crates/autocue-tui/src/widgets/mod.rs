mod popup;
mod prompter;
mod status_bar;

pub use popup::PopupWidget;
pub use prompter::PrompterWidget;
pub use status_bar::StatusBarWidget;
