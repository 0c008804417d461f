use marjapussi_core::game::deal::DealSummary;
use marjapussi_core::model::card::Card;
use marjapussi_core::model::player::{PlayerPosition, Side};
use marjapussi_core::model::rank::Rank;
use marjapussi_core::model::suit::Suit;
use serde::Serialize;

pub const LAST_TRICK_BONUS: u32 = 20;

pub const fn card_points(card: Card) -> u32 {
    match card.rank {
        Rank::Ace => 11,
        Rank::Ten => 10,
        Rank::King => 4,
        Rank::Ober => 3,
        Rank::Unter => 2,
        _ => 0,
    }
}

pub const fn pair_bonus(suit: Suit) -> u32 {
    match suit {
        Suit::Red => 100,
        Suit::Bells => 80,
        Suit::Acorns => 60,
        Suit::Green => 40,
    }
}

/// Points per partnership for one finished deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DealScore {
    pub declaring_side: Side,
    pub game_value: u32,
    pub declaring_points: u32,
    pub defending_points: u32,
    pub declarer_won: bool,
    /// Trick and pair points each seat collected itself, by seat index.
    pub seat_points: [u32; 4],
}

impl DealScore {
    pub fn points_for(&self, side: Side) -> u32 {
        if side == self.declaring_side {
            self.declaring_points
        } else {
            self.defending_points
        }
    }

    pub fn points_of(&self, seat: PlayerPosition) -> u32 {
        self.seat_points[seat.index()]
    }
}

pub fn score_deal(summary: &DealSummary) -> DealScore {
    let declaring_side = summary.setup.declarer.side();
    let mut seat_points = [0u32; 4];

    let last = summary.tricks.len().saturating_sub(1);
    for (index, completed) in summary.tricks.iter().enumerate() {
        let mut points: u32 = completed
            .trick
            .plays()
            .iter()
            .map(|play| card_points(play.card))
            .sum();
        if index == last {
            points += LAST_TRICK_BONUS;
        }
        seat_points[completed.winner.index()] += points;
    }

    for &(player, suit) in &summary.announcements {
        seat_points[player.index()] += pair_bonus(suit);
    }

    let declaring: u32 = declaring_side
        .members()
        .iter()
        .map(|seat| seat_points[seat.index()])
        .sum();
    let defending = seat_points.iter().sum::<u32>() - declaring;

    DealScore {
        declaring_side,
        game_value: summary.setup.game_value,
        declaring_points: declaring,
        defending_points: defending,
        declarer_won: declaring >= summary.setup.game_value,
        seat_points,
    }
}
