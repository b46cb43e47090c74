//! Seam-free marquee engine
//!
//! The recurring pattern behind every scrolling widget: split a list across
//! tracks, render each track's content twice so a looping offset can wrap
//! without a visible seam, and advance the offset by a fixed speed each
//! animation tick, pausing on user interaction.

mod seen;
mod state;
mod track;

pub use seen::SeenSet;
pub use state::{ScrollDirection, ScrollState};
pub use track::{split_items, Track};
