use marjapussi_bot::{Agent, PolicyKind};
use marjapussi_core::game::deal::{DealPhase, DealSetup, DealState};
use marjapussi_core::model::deck::Deck;
use marjapussi_core::model::player::PlayerPosition;

fn seat_agents(deal: &DealState, kinds: [PolicyKind; 2], seed: u64) -> Vec<Agent> {
    PlayerPosition::LOOP
        .into_iter()
        .map(|seat| {
            let kind = kinds[seat.index() % 2];
            Agent::new(
                seat,
                deal.hand(seat).cards(),
                kind.build(seed.wrapping_add(seat.index() as u64)),
            )
        })
        .collect()
}

fn play_out(seed: u64, kinds: [PolicyKind; 2]) -> DealState {
    let setup = DealSetup {
        declarer: PlayerPosition::LOOP[(seed % 4) as usize],
        game_value: 120,
    };
    let mut deal = DealState::deal(&Deck::shuffled_with_seed(seed), setup);
    let mut agents = seat_agents(&deal, kinds, seed);

    while let Some(seat) = deal.player_at_turn() {
        let legal = deal.legal_actions();
        let action = agents[seat.index()].next_action(&legal).unwrap();
        deal.act_action(action).unwrap();
        for agent in &mut agents {
            agent.observe_action(&action).unwrap();
        }
    }
    deal
}

#[test]
fn mixed_tables_finish_every_deal() {
    for seed in 0..25 {
        let deal = play_out(seed, [PolicyKind::Random, PolicyKind::Standing]);
        assert_eq!(deal.phase(), DealPhase::Done);
        assert_eq!(deal.summary().unwrap().tricks.len(), 9);
    }
}

#[test]
fn standing_tables_are_deterministic() {
    let kinds = [PolicyKind::Standing, PolicyKind::Standing];
    let first = play_out(42, kinds);
    let second = play_out(42, kinds);
    assert_eq!(first.history(), second.history());
}
