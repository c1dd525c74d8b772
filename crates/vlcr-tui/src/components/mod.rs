pub mod equalizer;
pub mod file_browser;
pub mod header;
pub mod help_overlay;
pub mod playlist_panel;
pub mod side_nav;
pub mod track_sync;
pub mod vlm_console;
