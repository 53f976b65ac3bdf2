//! Plain-text body export consumed by networked front ends
//!
//! One line per body: `x y theta id`, newline separated and newline
//! terminated. The id is the body's label (empty if it has none) and is
//! passed through uninterpreted.
//!
//! Numbers use Rust's shortest round-trip `Display`, so whole values have no
//! decimal point (`100`, not `100.0`). Consumers should parse them as floats
//! and not rely on the exact text.

use std::fmt;

use super::states::Body;

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub id: String,
}

impl From<&Body> for Coordinate {
    fn from(body: &Body) -> Self {
        Self {
            x: body.position.x,
            y: body.position.y,
            theta: body.angle,
            id: body.label.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.theta, self.id)
    }
}

pub fn coordinates_to_string(coords: &[Coordinate]) -> String {
    coords.iter().map(|c| format!("{c}\n")).collect()
}
