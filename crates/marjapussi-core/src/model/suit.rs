use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Red = 0,
    Bells = 1,
    Acorns = 2,
    Green = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Red, Suit::Bells, Suit::Acorns, Suit::Green];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Red),
            1 => Some(Suit::Bells),
            2 => Some(Suit::Acorns),
            3 => Some(Suit::Green),
            _ => None,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'r' => Some(Suit::Red),
            's' => Some(Suit::Bells),
            'e' => Some(Suit::Acorns),
            'g' => Some(Suit::Green),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Red => 'r',
            Suit::Bells => 's',
            Suit::Acorns => 'e',
            Suit::Green => 'g',
        }
    }

    /// Traditional German suit name.
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Red => "Rot",
            Suit::Bells => "Schell",
            Suit::Acorns => "Eichel",
            Suit::Green => "Grün",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
