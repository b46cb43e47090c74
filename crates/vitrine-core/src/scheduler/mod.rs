mod service;

pub use service::{RefreshEvent, RefreshService};
