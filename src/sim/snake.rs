//! Snake body and movement rules

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parse a direction name; anything unrecognized is `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Ordered body cells, head at the front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnake")]
pub struct Snake {
    pub body: VecDeque<IVec2>,
}

/// Unchecked wire form of `Snake`
#[derive(Deserialize)]
struct RawSnake {
    body: VecDeque<IVec2>,
}

impl TryFrom<RawSnake> for Snake {
    type Error = String;

    fn try_from(raw: RawSnake) -> Result<Self, Self::Error> {
        if raw.body.is_empty() {
            return Err("snake body must hold at least one cell".to_string());
        }
        Ok(Self { body: raw.body })
    }
}

impl Snake {
    /// Straight snake with `head` first and the body trailing opposite `direction`
    pub fn new(head: IVec2, direction: Direction, length: usize) -> Self {
        let back = -direction.delta();
        let body = (0..length as i32).map(|i| head + back * i).collect();
        Self { body }
    }

    /// Starting snake: head on the center cell, body extending left
    pub fn spawn(grid: Grid, length: usize) -> Self {
        Self::new(grid.center(), Direction::Right, length)
    }

    /// Snake from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = IVec2>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    /// Head cell. A snake always holds at least one cell.
    pub fn head(&self) -> IVec2 {
        self.body[0]
    }

    pub fn tail(&self) -> Option<IVec2> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Every cell including head and tail
    pub fn contains(&self, cell: IVec2) -> bool {
        self.body.contains(&cell)
    }

    /// Cells behind the head
    pub fn segments(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.body.iter().skip(1).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.body.iter().copied()
    }

    /// Next head cell when moving in `direction`
    pub fn next_head(&self, direction: Direction) -> IVec2 {
        self.head() + direction.delta()
    }

    /// Push a new head; the tail is kept only when growing
    pub fn advance(&mut self, new_head: IVec2, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}
