pub mod app;
pub mod event;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;

/// Load theme by name from config
pub fn load_theme(name: &str) -> Theme {
    Theme::from_name(name)
}
