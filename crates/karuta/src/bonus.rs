//! Bonus card assignment
//!
//! Roughly one card in `every` carries a bonus activity. Cards flagged in
//! the input keep their flag; flagged cards without an activity get one from
//! the pool. If the deck is still short of its target, every `every`-th card
//! (indices `every - 1`, `2 * every - 1`, ...) is flagged in order until the
//! target is met or the candidates run out. Running the pass twice changes
//! nothing the second time.

use crate::record::CardRecord;

/// Position in the cyclic bonus pool
///
/// Threaded by value through both assignment phases so that names continue
/// where the previous phase stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolCursor(usize);

impl PoolCursor {
    /// Cursor at the start of the pool
    pub fn new() -> Self {
        Self(0)
    }

    /// Number of pool slots consumed so far
    pub fn position(self) -> usize {
        self.0
    }

    /// Name at the cursor, wrapping around the pool. Does not advance.
    pub fn peek<'a>(self, pool: &'a [String]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.0 % pool.len()].as_str())
    }

    /// Cursor moved to the next pool slot
    pub fn advance(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Outcome of [`assign_bonus`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusReport {
    /// Desired number of bonus cards
    pub target: usize,
    /// Pre-flagged cards that were given a pool name
    pub named: usize,
    /// Cards newly flagged to approach the target
    pub flagged: usize,
    /// Bonus cards after assignment
    pub total: usize,
}

/// Desired bonus card count for a deck: `len / every`, but at least one
pub fn bonus_target(deck_len: usize, every: usize) -> usize {
    let every = every.max(1);
    (deck_len / every).max(1)
}

/// Flag and name bonus cards in place
///
/// # Arguments
/// * `cards` - The deck in input order
/// * `pool` - Activity names, used cyclically
/// * `every` - Bonus ratio; candidate slots are every `every`-th card
///
/// A deck shorter than `every` has no candidate slot, so it ends up with
/// only the cards it was given as bonus cards.
pub fn assign_bonus(cards: &mut [CardRecord], pool: &[String], every: usize) -> BonusReport {
    if cards.is_empty() {
        return BonusReport::default();
    }

    let every = every.max(1);
    let (named, cursor) = name_flagged_cards(cards, pool, PoolCursor::new());

    let target = bonus_target(cards.len(), every);
    let current = count_bonus(cards);

    let flagged = if current < target {
        let (flagged, _) = flag_candidates(cards, pool, every, target - current, cursor);
        flagged
    } else {
        0
    };

    BonusReport {
        target,
        named,
        flagged,
        total: count_bonus(cards),
    }
}

fn count_bonus(cards: &[CardRecord]) -> usize {
    cards.iter().filter(|card| card.is_bonus_game).count()
}

/// Give every flagged card without an activity the next pool name
fn name_flagged_cards(
    cards: &mut [CardRecord],
    pool: &[String],
    mut cursor: PoolCursor,
) -> (usize, PoolCursor) {
    let mut named = 0;

    for card in cards
        .iter_mut()
        .filter(|card| card.is_bonus_game && card.bonus_game_name.is_empty())
    {
        if let Some(name) = cursor.peek(pool) {
            card.bonus_game_name = name.to_string();
            named += 1;
        }
        cursor = cursor.advance();
    }

    (named, cursor)
}

/// Flag up to `need` unflagged candidate cards
///
/// Each newly flagged card consumes one pool slot, even when it keeps an
/// activity name it already had.
fn flag_candidates(
    cards: &mut [CardRecord],
    pool: &[String],
    every: usize,
    mut need: usize,
    mut cursor: PoolCursor,
) -> (usize, PoolCursor) {
    let mut flagged = 0;

    for card in cards.iter_mut().skip(every - 1).step_by(every) {
        if need == 0 {
            break;
        }
        if card.is_bonus_game {
            continue;
        }

        card.is_bonus_game = true;
        if card.bonus_game_name.is_empty() {
            if let Some(name) = cursor.peek(pool) {
                card.bonus_game_name = name.to_string();
            }
        }
        cursor = cursor.advance();
        flagged += 1;
        need -= 1;
    }

    (flagged, cursor)
}
