pub mod app;
pub mod config;
pub mod curves;
pub mod display;
pub mod frame_loop;
pub mod input;
pub mod render;
pub mod terminal;
