//! card-id helpers: the convention `deck_index = id / 52`, `type_id = id mod
//! 52`, `suit = type_id / 13`, `rank = type_id mod 13` is observable only to
//! callers -- dealers themselves treat every id as an opaque integer in
//! `[0, n)` and never construct a `Suit`/`Rank`.

pub mod rank;
pub mod suit;

pub use rank::Rank;
pub use suit::Suit;

/// card types in a single standard deck (suit x rank).
pub const NUM_TYPES: usize = 52;
/// `n` for a single-deck dealer.
pub const SINGLE_DECK: usize = 52;
/// `n` for a two-deck dealer, the shuffle-guess game's default.
pub const DOUBLE_DECK: usize = 104;

/// which physical deck `id` came from, for a multi-deck `n`.
pub fn deck_index(id: usize) -> usize {
    id / NUM_TYPES
}

/// the card's type in `[0, 52)`, independent of which deck it came from.
pub fn type_id(id: usize) -> usize {
    id % NUM_TYPES
}

/// the suit of a type id.
pub fn suit(type_id: usize) -> Suit {
    Suit::from((type_id / 13) as u8)
}

/// the rank of a type id.
pub fn rank(type_id: usize) -> Rank {
    Rank::from((type_id % 13) as u8)
}

/// human-readable card name, e.g. `"AS(d0)"`.
pub fn pretty(id: usize) -> String {
    let tid = type_id(id);
    format!("{}{}(d{})", rank(tid), suit(tid), deck_index(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_id_wraps_at_52() {
        assert_eq!(type_id(0), 0);
        assert_eq!(type_id(51), 51);
        assert_eq!(type_id(52), 0);
        assert_eq!(type_id(103), 51);
    }

    #[test]
    fn deck_index_splits_double_deck() {
        assert_eq!(deck_index(0), 0);
        assert_eq!(deck_index(51), 0);
        assert_eq!(deck_index(52), 1);
        assert_eq!(deck_index(103), 1);
    }

    #[test]
    fn suit_and_rank_partition_a_type_id() {
        // type_id 0 -> Club Two, type_id 12 -> Club Ace, type_id 13 -> Diamond Two
        assert_eq!(suit(0), Suit::Club);
        assert_eq!(rank(0), Rank::Two);
        assert_eq!(suit(12), Suit::Club);
        assert_eq!(rank(12), Rank::Ace);
        assert_eq!(suit(13), Suit::Diamond);
        assert_eq!(rank(13), Rank::Two);
    }

    #[test]
    fn pretty_formats_rank_suit_deck() {
        assert_eq!(pretty(0), "2C(d0)");
        assert_eq!(pretty(12 + 52), "AC(d1)");
    }
}
