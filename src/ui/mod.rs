/// Gallery widgets
pub mod skeleton;
pub mod tile;
