pub mod constants;
pub mod gpu;
pub mod render;
