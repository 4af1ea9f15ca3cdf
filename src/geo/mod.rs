/// Geographic primitives
///
/// Coordinates, great-circle distance, and the map regions the locator
/// frames around the user and the stores it finds.

pub mod coordinate;
pub mod region;

pub use coordinate::{meters_to_miles, Coordinate, LocationFix, METERS_PER_MILE};
pub use region::{Span, Viewport};
