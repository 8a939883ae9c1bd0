use serde::{Deserialize, Serialize};

/// Canvas coordinates of a post
///
/// Missing coordinates deserialize to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Resolve a position sent either nested or as flat `position_x` /
    /// `position_y` keys
    ///
    /// The nested object wins when both are present. A lone flat key leaves
    /// the other axis at zero. `None` when neither form was sent.
    pub(crate) fn from_wire(
        nested: Option<Position>,
        flat_x: Option<f64>,
        flat_y: Option<f64>,
    ) -> Option<Position> {
        match (nested, flat_x, flat_y) {
            (Some(position), _, _) => Some(position),
            (None, None, None) => None,
            (None, x, y) => Some(Position::new(x.unwrap_or(0.0), y.unwrap_or(0.0))),
        }
    }
}
