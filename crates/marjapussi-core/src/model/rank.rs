use core::fmt;
use serde::{Deserialize, Serialize};

/// Card rank. The derived ordering is trick strength, weakest first: the Ace
/// loses to everything of its suit and the Six beats everything. This is not
/// face-value order and must not be derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Ten = 1,
    King = 2,
    Ober = 3,
    Unter = 4,
    Nine = 5,
    Eight = 6,
    Seven = 7,
    Six = 8,
}

impl Rank {
    /// Ascending trick strength.
    pub const ORDERED: [Rank; 9] = [
        Rank::Ace,
        Rank::Ten,
        Rank::King,
        Rank::Ober,
        Rank::Unter,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
    ];

    pub const fn from_strength(strength: u8) -> Option<Self> {
        match strength {
            0 => Some(Rank::Ace),
            1 => Some(Rank::Ten),
            2 => Some(Rank::King),
            3 => Some(Rank::Ober),
            4 => Some(Rank::Unter),
            5 => Some(Rank::Nine),
            6 => Some(Rank::Eight),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Six),
            _ => None,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Rank::Ace),
            'Z' => Some(Rank::Ten),
            'K' => Some(Rank::King),
            'O' => Some(Rank::Ober),
            'U' => Some(Rank::Unter),
            '9' => Some(Rank::Nine),
            '8' => Some(Rank::Eight),
            '7' => Some(Rank::Seven),
            '6' => Some(Rank::Six),
            _ => None,
        }
    }

    pub const fn strength(self) -> u8 {
        self as u8
    }

    pub const fn symbol(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Ten => 'Z',
            Rank::King => 'K',
            Rank::Ober => 'O',
            Rank::Unter => 'U',
            Rank::Nine => '9',
            Rank::Eight => '8',
            Rank::Seven => '7',
            Rank::Six => '6',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn ace_is_weakest_and_six_strongest() {
        assert!(Rank::Ace < Rank::Ten);
        assert!(Rank::Unter < Rank::Nine);
        assert!(Rank::Seven < Rank::Six);
        assert_eq!(Rank::ORDERED.iter().max(), Some(&Rank::Six));
        assert_eq!(Rank::ORDERED.iter().min(), Some(&Rank::Ace));
    }

    #[test]
    fn ordered_matches_symbol_sequence() {
        let symbols: String = Rank::ORDERED.iter().map(|rank| rank.symbol()).collect();
        assert_eq!(symbols, "AZKOU9876");
    }

    #[test]
    fn from_strength_maps() {
        assert_eq!(Rank::from_strength(3), Some(Rank::Ober));
        assert_eq!(Rank::from_strength(9), None);
    }
}
