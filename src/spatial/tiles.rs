//! Tile identities, neighbour directions and adjacency rules
//!
//! Tiles are immutable values owned by a single `TileCatalog`. A rule
//! `(other, direction)` on tile `t` states that `other` may sit at
//! `direction` relative to `t`.

use std::fmt;

/// Index of a tile inside its catalog (catalog order)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub usize);

impl TileId {
    /// Position of the tile in catalog order
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four von Neumann unit offsets
///
/// `y` grows downward, so `North` is `(0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Offset `(-1, 0)`
    West,
    /// Offset `(0, -1)`
    North,
    /// Offset `(0, 1)`
    South,
    /// Offset `(1, 0)`
    East,
}

impl Direction {
    /// All directions in neighbour enumeration order
    pub const ALL: [Self; 4] = [Self::West, Self::North, Self::South, Self::East];

    /// Unit offset `(dx, dy)` for this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::West => (-1, 0),
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
        }
    }

    /// Direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::West => Self::East,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
        }
    }

    /// Slot used for per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::West => 0,
            Self::North => 1,
            Self::South => 2,
            Self::East => 3,
        }
    }

    /// Map a unit offset back to its direction
    pub const fn from_offset(dx: isize, dy: isize) -> Option<Self> {
        match (dx, dy) {
            (-1, 0) => Some(Self::West),
            (0, -1) => Some(Self::North),
            (0, 1) => Some(Self::South),
            (1, 0) => Some(Self::East),
            _ => None,
        }
    }

    /// Step from `(x, y)` in this direction, clipped to a `width × height` grid
    pub const fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let Some(nx) = x.checked_add_signed(dx) else {
            return None;
        };
        let Some(ny) = y.checked_add_signed(dy) else {
            return None;
        };
        if nx < width && ny < height {
            Some((nx, ny))
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::West => "west",
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
        };
        f.write_str(name)
    }
}

/// Permission for `tile` to sit at `direction` relative to the rule's owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdjacencyRule {
    /// Neighbouring tile
    pub tile: TileId,
    /// Where the neighbour sits relative to the owner
    pub direction: Direction,
}

impl AdjacencyRule {
    /// Create a rule
    pub const fn new(tile: TileId, direction: Direction) -> Self {
        Self { tile, direction }
    }
}

/// Immutable tile description
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    name: String,
    frequency: u32,
    rules: Vec<AdjacencyRule>,
}

impl Tile {
    /// Create a tile with the given relative frequency and no rules
    pub fn new(name: impl Into<String>, frequency: u32) -> Self {
        Self {
            name: name.into(),
            frequency,
            rules: Vec::new(),
        }
    }

    /// Add a rule, ignoring duplicates
    #[must_use]
    pub fn with_rule(mut self, rule: AdjacencyRule) -> Self {
        self.push_rule(rule);
        self
    }

    pub(crate) fn push_rule(&mut self, rule: AdjacencyRule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    pub(crate) const fn add_frequency(&mut self, amount: u32) {
        self.frequency = self.frequency.saturating_add(amount);
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative occurrence weight
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Declared adjacency rules
    pub fn rules(&self) -> &[AdjacencyRule] {
        &self.rules
    }

    /// Whether `other` may sit at `direction` relative to this tile
    pub fn permits(&self, other: TileId, direction: Direction) -> bool {
        self.rules.contains(&AdjacencyRule::new(other, direction))
    }
}
