mod batch_banner;
mod cert_wall;
mod placement_board;
mod status_bar;
mod strip;
mod training_strip;

pub use batch_banner::BatchBannerWidget;
pub use cert_wall::CertWallWidget;
pub use placement_board::PlacementBoardWidget;
pub use status_bar::StatusBarWidget;
pub use training_strip::TrainingStripWidget;
