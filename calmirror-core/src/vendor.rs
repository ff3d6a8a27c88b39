//! Vendor identity.
//!
//! A run always involves exactly two vendors, so they are addressed by
//! [`Side`] rather than by label; labels only matter for provenance tags and
//! log output.

use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Destination,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Source => Side::Destination,
            Side::Destination => Side::Source,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// An ordered (from, to) pair of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub from: Side,
    pub to: Side,
}

impl Direction {
    pub const FORWARD: Direction = Direction {
        from: Side::Source,
        to: Side::Destination,
    };

    pub const REVERSE: Direction = Direction {
        from: Side::Destination,
        to: Side::Source,
    };
}

/// One value per side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerSide<T> {
    pub source: T,
    pub destination: T,
}

impl<T> PerSide<T> {
    pub fn new(source: T, destination: T) -> Self {
        PerSide {
            source,
            destination,
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Source => &self.source,
            Side::Destination => &self.destination,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Source => &mut self.source,
            Side::Destination => &mut self.destination,
        }
    }
}

/// The labels of the two vendors taking part in a run (e.g. "work", "personal").
#[derive(Debug, Clone, PartialEq)]
pub struct VendorPair(PerSide<String>);

impl VendorPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        VendorPair(PerSide::new(source.into(), destination.into()))
    }

    pub fn label(&self, side: Side) -> &str {
        &self.0[side]
    }

    /// Directions to run, in order. The reverse direction only exists for
    /// two-way sync.
    pub fn directions(&self, two_way: bool) -> Vec<Direction> {
        if two_way {
            vec![Direction::FORWARD, Direction::REVERSE]
        } else {
            vec![Direction::FORWARD]
        }
    }
}
