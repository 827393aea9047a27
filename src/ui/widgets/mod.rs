// src/ui/widgets/mod.rs
//! Custom widgets for the soundboard UI.

pub mod chrome;
pub mod home_menu;
pub mod record_panel;
pub mod sound_list;

// Re-export widget rendering functions
pub use chrome::{render_footer, render_header};
pub use home_menu::render_home_menu;
pub use record_panel::render_record_panel;
pub use sound_list::render_sound_list;
