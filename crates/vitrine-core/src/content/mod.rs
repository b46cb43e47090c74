mod fetcher;
mod models;

pub use fetcher::{ContentFetcher, ImageResolver};
pub use models::{Certificate, Contact, Course, Placement, Training};
