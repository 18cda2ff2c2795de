pub mod controller;
pub mod host;
pub mod input;
pub mod layout;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod render;
pub mod resources;
pub mod settings;
pub mod settings_store;
pub mod shape;
pub mod toolbar;
pub mod toolbar_icons;

pub use controller::GridFrame;
pub use overlay::OverlayWindow;
