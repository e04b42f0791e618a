mod form;
mod popup;
mod results;
mod item_detail;
mod status_bar;

pub use form::FormWidget;
pub use item_detail::ItemDetailWidget;
pub use popup::PopupWidget;
pub use results::ResultsWidget;
pub use status_bar::StatusBarWidget;
