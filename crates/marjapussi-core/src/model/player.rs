use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// The two partnerships. Partners sit opposite each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    NorthSouth,
    EastWest,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }

    pub const fn partner(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::South,
            PlayerPosition::East => PlayerPosition::West,
            PlayerPosition::South => PlayerPosition::North,
            PlayerPosition::West => PlayerPosition::East,
        }
    }

    pub const fn side(self) -> Side {
        match self {
            PlayerPosition::North | PlayerPosition::South => Side::NorthSouth,
            PlayerPosition::East | PlayerPosition::West => Side::EastWest,
        }
    }

    /// The three other seats in play order, starting after `self`.
    pub fn others(self) -> [PlayerPosition; 3] {
        let first = self.next();
        let second = first.next();
        [first, second, second.next()]
    }
}

impl Side {
    pub const fn members(self) -> [PlayerPosition; 2] {
        match self {
            Side::NorthSouth => [PlayerPosition::North, PlayerPosition::South],
            Side::EastWest => [PlayerPosition::East, PlayerPosition::West],
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::NorthSouth => Side::EastWest,
            Side::EastWest => Side::NorthSouth,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Side};

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
    }

    #[test]
    fn partners_share_a_side() {
        for seat in PlayerPosition::LOOP {
            assert_eq!(seat.partner().partner(), seat);
            assert_eq!(seat.side(), seat.partner().side());
            assert_ne!(seat.side(), seat.next().side());
        }
        assert_eq!(Side::EastWest.opponent(), Side::NorthSouth);
    }

    #[test]
    fn others_excludes_self_in_play_order() {
        assert_eq!(
            PlayerPosition::East.others(),
            [PlayerPosition::South, PlayerPosition::West, PlayerPosition::North]
        );
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
