pub mod app;
pub mod event;
pub mod image_renderer;
pub mod images;
pub mod input;
pub mod theme;
pub mod typewriter;
pub mod widgets;

pub use app::App;
pub use theme::GruvboxMaterial;
