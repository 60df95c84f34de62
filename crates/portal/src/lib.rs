pub mod config;
pub mod course_label;
pub mod server;
pub mod types;
