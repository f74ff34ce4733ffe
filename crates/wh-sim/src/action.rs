//! The six discrete robot actions.

use std::fmt;

use thiserror::Error;
use wh_core::Direction;

/// One robot's choice for a tick.
///
/// Discriminants match the integer encoding used by action vectors:
/// `0` down, `1` left, `2` up, `3` right, `4` pickup, `5` drop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Action {
    MoveDown  = 0,
    MoveLeft  = 1,
    MoveUp    = 2,
    MoveRight = 3,
    Pickup    = 4,
    Drop      = 5,
}

/// Number of discrete actions per robot.
pub const ACTION_COUNT: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("action index {0} is outside 0..6")]
pub struct InvalidAction(pub usize);

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveUp,
        Action::MoveRight,
        Action::Pickup,
        Action::Drop,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The movement direction, or `None` for pickup / drop.
    #[inline]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveDown  => Some(Direction::Down),
            Action::MoveLeft  => Some(Direction::Left),
            Action::MoveUp    => Some(Direction::Up),
            Action::MoveRight => Some(Direction::Right),
            Action::Pickup | Action::Drop => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::MoveDown  => "move-down",
            Action::MoveLeft  => "move-left",
            Action::MoveUp    => "move-up",
            Action::MoveRight => "move-right",
            Action::Pickup    => "pickup",
            Action::Drop      => "drop",
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = InvalidAction;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Action::ALL.get(n).copied().ok_or(InvalidAction(n))
    }
}

impl TryFrom<u8> for Action {
    type Error = InvalidAction;

    #[inline]
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Action::try_from(n as usize)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
