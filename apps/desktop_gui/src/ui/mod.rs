//! UI layer for desktop GUI: the eframe app shell and its views.

pub mod app;

pub use app::DesktopGuiApp;
