mod direction;
mod overlap;

pub use direction::Direction;
pub use overlap::{contains_point, first_overlap, overlaps};
