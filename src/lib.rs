pub mod grid;
pub mod gui;
pub mod logging;
