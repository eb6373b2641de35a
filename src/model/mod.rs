//! Data models for the syncytia counter.

mod marker;
mod point;
mod segment;
mod store;

pub use marker::{MarkerShape, MarkerSize, MarkerStyle};
pub use point::Point;
pub use segment::Segment;
pub use store::{AnnotationStore, Slot};
