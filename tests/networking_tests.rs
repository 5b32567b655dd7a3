//! Networking Tests
//!
//! Two peers play on their own replicas and exchange moves as sync messages.
//! Whatever order the messages arrive in, every replica must end up with the
//! same derived state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use senterej_engine::{
    legal_destinations, GameSession, Move, Peer, Player, PlayerInfo, Position, SessionStore,
    Timestamp, Variant,
};
use shared::{dispatch, SyncMessage};

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

/// Random move for the peer's own side on its current view
fn random_move(peer: &Peer, rng: &mut StdRng) -> Option<(Position, Position)> {
    let state = peer.state();
    let moves: Vec<(Position, Position)> = state
        .board
        .pieces_of(peer.player())
        .flat_map(|(from, _)| {
            legal_destinations(&state.board, from, state.variant)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect();
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.random_range(0..moves.len())])
    }
}

/// Both peers play `rounds` Werera moves blind to each other
fn play_blind(seed: u64, rounds: u64) -> (Peer, Peer, Vec<Move>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let session = GameSession::new(
        Variant::Senterej,
        PlayerInfo::new("white"),
        PlayerInfo::new("black"),
    );
    let mut white = Peer::new(Player::White, session.clone());
    let mut black = Peer::new(Player::Black, session);
    let mut published = Vec::new();

    for round in 0..rounds {
        for (offset, peer) in [(0, &mut white), (1, &mut black)] {
            let timestamp: Timestamp = 1_000 + round * 1_000 + offset * 500;
            let Some((from, to)) = random_move(peer, &mut rng) else {
                continue;
            };
            // A peer whose view left Werera may be out of turn; that is fine
            if let Ok(Some(mv)) = peer.submit(from, to, timestamp) {
                published.push(mv);
            }
        }
    }
    (white, black, published)
}

#[test]
fn test_blind_werera_play_converges() {
    for seed in 0..16 {
        let (mut white, mut black, published) = play_blind(seed, 6);
        let mut rng = StdRng::seed_from_u64(seed + 100);

        let mut to_white = published.clone();
        let mut to_black = published.clone();
        to_white.shuffle(&mut rng);
        to_black.shuffle(&mut rng);
        for mv in to_white {
            white.receive(mv);
        }
        for mv in to_black {
            black.receive(mv);
        }

        assert_eq!(white.session().log(), black.session().log(), "seed {seed}");
        assert_eq!(white.state(), black.state(), "seed {seed}");
    }
}

#[test]
fn test_redelivery_does_not_change_state() {
    let (mut white, _, published) = play_blind(3, 4);
    let before = {
        for mv in &published {
            white.receive(mv.clone());
        }
        white.state()
    };
    for mv in published.into_iter().rev() {
        assert!(!white.receive(mv));
    }
    assert_eq!(white.state(), before);
}

#[test]
fn test_stores_sync_over_json() {
    let mut alice = SessionStore::default();
    let mut bekele = SessionStore::default();
    let id = alice.open_session(Variant::Senterej, PlayerInfo::new("Alice"));

    // Announce, then let the guest join on both sides
    let opened = SyncMessage::SessionOpened {
        session: alice.get(id).unwrap().clone(),
    };
    let wire = opened.to_json().unwrap();
    dispatch(&mut bekele, SyncMessage::from_json(&wire).unwrap()).unwrap();

    let guest = PlayerInfo::new("Bekele");
    let joined = SyncMessage::PlayerJoined {
        session_id: id,
        player: guest,
    };
    dispatch(&mut alice, joined.clone()).unwrap();
    dispatch(&mut bekele, joined).unwrap();

    let w = alice.submit_move(id, Player::White, pos(6, 4), pos(5, 4), 10).unwrap();
    let b = bekele.submit_move(id, Player::Black, pos(1, 3), pos(2, 3), 11).unwrap();

    for (store, mv) in [(&mut alice, b.mv), (&mut bekele, w.mv)] {
        let msg = SyncMessage::MovePublished { session_id: id, mv };
        let text = msg.to_json().unwrap();
        assert_eq!(dispatch(store, SyncMessage::from_json(&text).unwrap()).unwrap(), None);
    }

    assert_eq!(
        alice.current_game_state(id).unwrap(),
        bekele.current_game_state(id).unwrap()
    );
    assert_eq!(alice.current_game_state(id).unwrap().move_count, 2);
}

#[test]
fn test_rejection_message_for_out_of_turn_move() {
    let mut store = SessionStore::default();
    let id = store.create_session(
        Variant::Standard,
        PlayerInfo::new("a"),
        PlayerInfo::new("b"),
    );

    let err = store
        .submit_move(id, Player::Black, pos(1, 0), pos(2, 0), 1)
        .unwrap_err();
    match SyncMessage::rejection(id, &err) {
        SyncMessage::MoveRejected { reason, .. } => assert_eq!(reason, "not-your-turn"),
        other => panic!("Unexpected message {other:?}"),
    }
}
