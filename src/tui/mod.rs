pub mod browse;
pub mod input;
pub mod render;
