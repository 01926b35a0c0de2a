pub mod assets;
pub mod commands;
pub mod quad;
pub mod renderer;
