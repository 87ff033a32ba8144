pub mod app;
pub mod list;
pub mod state;
pub mod theme;
pub mod wheel;
