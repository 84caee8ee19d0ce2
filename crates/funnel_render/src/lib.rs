pub mod apples;
pub mod camera;
pub mod plugin;
pub mod ui;
pub mod walls;
