//! Shared helpers for integration tests: a toy follow-suit table.
//!
//! Trumps and contracts are left out. The highest card of the led suit
//! takes the trick; seats 0 and 2 play against seats 1 and 3, and a team
//! needs more than 60 of the 120 points to win.

#![allow(dead_code)]

use schafkopf_rl::agent::{LegalityOracle, PlayerAgent};
use schafkopf_rl::core::{AgentRng, Card, PlayerId, PLAYER_COUNT};
use schafkopf_rl::error::Result;

pub const HAND_SIZE: usize = 8;

pub fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

/// Follow the led suit when possible.
pub fn follow_suit(card: Card, hand: &[Card], trick: &[Card]) -> bool {
    match trick.first() {
        None => true,
        Some(lead) => card.suit == lead.suit || !hand.iter().any(|c| c.suit == lead.suit),
    }
}

pub fn any_card(_: Card, _: &[Card], _: &[Card]) -> bool {
    true
}

/// Shuffle the deck and deal eight cards to every seat.
pub fn deal(rng: &mut AgentRng) -> Vec<Vec<Card>> {
    let mut deck: Vec<Card> = Card::deck().collect();
    rng.shuffle(&mut deck);
    deck.chunks(HAND_SIZE).map(<[Card]>::to_vec).collect()
}

#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Card points taken per seat.
    pub points: [u32; PLAYER_COUNT],
    /// Whether each seat's team won.
    pub won: [bool; PLAYER_COUNT],
}

/// Play one full game and report the result to every seat.
pub fn play_game(seats: &mut [&mut dyn PlayerAgent], rng: &mut AgentRng) -> Result<GameOutcome> {
    assert_eq!(seats.len(), PLAYER_COUNT);
    let rules: &dyn LegalityOracle = &follow_suit;

    for seat in seats.iter_mut() {
        seat.notify_new_game();
    }

    let mut hands = deal(rng);
    let mut points = [0u32; PLAYER_COUNT];
    let mut leader = PlayerId::new(0);

    for _ in 0..HAND_SIZE {
        let mut trick: Vec<Card> = Vec::with_capacity(PLAYER_COUNT);
        let mut order: Vec<PlayerId> = Vec::with_capacity(PLAYER_COUNT);
        let mut player = leader;
        for _ in 0..PLAYER_COUNT {
            let seat = player.index();
            let card = seats[seat].play_card(&hands[seat], &trick, rules)?;
            assert!(hands[seat].contains(&card), "{} played {} not in hand", player, card);
            assert!(follow_suit(card, &hands[seat], &trick), "{} reneged with {}", player, card);
            hands[seat].retain(|&c| c != card);
            trick.push(card);
            order.push(player);
            player = player.next();
        }

        let lead = trick[0].suit;
        let (winning_offset, _) = trick
            .iter()
            .enumerate()
            .filter(|(_, c)| c.suit == lead)
            .max_by_key(|(_, c)| c.index())
            .unwrap();
        let taker = order[winning_offset];
        points[taker.index()] += trick.iter().map(|c| c.points()).sum::<u32>();

        for player in PlayerId::all() {
            let relative = ((taker.index() + PLAYER_COUNT - player.index()) % PLAYER_COUNT) as i8;
            seats[player.index()].notify_trick_result(&trick, relative);
        }
        leader = taker;
    }

    let team_points = [points[0] + points[2], points[1] + points[3]];
    let mut won = [false; PLAYER_COUNT];
    for player in PlayerId::all() {
        let seat = player.index();
        won[seat] = team_points[seat % 2] > 60;
        let partner = player.next().next().index();
        seats[seat].notify_game_result(won[seat], points[seat], Some(points[partner]))?;
    }

    Ok(GameOutcome { points, won })
}
