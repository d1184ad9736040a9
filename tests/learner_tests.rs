//! Integration tests for replay storage and TD learning.

mod common;

use common::cards;
use schafkopf_rl::core::AgentRng;
use schafkopf_rl::nn::{
    encode_action, encode_state, ActionValueApproximator, ConstantValues, LinearApproximator,
    StateVector,
};
use schafkopf_rl::training::{Learner, LearnerConfig, ReplayBuffer, Transition};

fn tagged(tag: usize) -> Transition {
    let state = encode_state(&cards(&["hz"]), &[]);
    Transition::terminal(state, encode_action(cards(&["hz"])[0]), tag as f32)
}

// =============================================================================
// Replay Buffer
// =============================================================================

#[test]
fn test_buffer_keeps_most_recent() {
    let mut buffer = ReplayBuffer::new(50);
    for i in 0..120 {
        buffer.push(tagged(i));
    }

    assert_eq!(buffer.len(), 50);
    let kept: Vec<f32> = buffer.iter().map(Transition::reward).collect();
    let expected: Vec<f32> = (70..120).map(|i| i as f32).collect();
    assert_eq!(kept, expected);
}

#[test]
fn test_sampling_draws_from_stored_only() {
    let mut buffer = ReplayBuffer::new(10);
    for i in 0..25 {
        buffer.push(tagged(i));
    }

    let mut rng = AgentRng::new(5);
    let batch = buffer.sample(200, &mut rng);
    assert_eq!(batch.len(), 200);
    assert!(batch.iter().all(|t| (15.0..25.0).contains(&t.reward())));
}

#[test]
fn test_sampling_is_seeded() {
    let mut buffer = ReplayBuffer::new(100);
    for i in 0..100 {
        buffer.push(tagged(i));
    }

    let a = buffer.sample(32, &mut AgentRng::new(9));
    let b = buffer.sample(32, &mut AgentRng::new(9));
    assert_eq!(a, b);
}

// =============================================================================
// Learner
// =============================================================================

#[test]
fn test_default_cadence_scenario() {
    let mut learner = Learner::new(
        ConstantValues::zeros(),
        ConstantValues::zeros(),
        LearnerConfig::default(),
        AgentRng::new(1),
    )
    .unwrap();

    let mut trained = 0;
    for i in 0..15 {
        trained += learner.observe(tagged(i)).unwrap().is_some() as usize;
    }
    assert_eq!(trained, 0);

    // 16th transition reaches the cadence with only 16 stored.
    trained += learner.observe(tagged(15)).unwrap().is_some() as usize;
    assert_eq!(trained, 0);

    for i in 16..32 {
        trained += learner.observe(tagged(i)).unwrap().is_some() as usize;
    }
    assert_eq!(trained, 1);
    assert_eq!(learner.online().fit_calls(), 1);
    assert_eq!(learner.buffer().len(), 32);
}

#[test]
fn test_terminal_value_converges_to_reward() {
    let config = LearnerConfig {
        batch_size: 4,
        retrain_every: 1,
        buffer_capacity: 4,
        ..LearnerConfig::default()
    };
    let mut learner = Learner::new(
        LinearApproximator::zeros().with_learning_rate(0.05),
        LinearApproximator::zeros(),
        config,
        AgentRng::new(2),
    )
    .unwrap();

    let hand = cards(&["s7", "s8"]);
    let state = encode_state(&hand, &[]);
    let action = encode_action(hand[0]);

    let mut losses = Vec::new();
    for _ in 0..300 {
        if let Some(report) = learner.observe(Transition::terminal(state, action, 1.0)).unwrap() {
            losses.push(report.loss);
        }
    }

    let value = learner.online().predict_one(state).unwrap()[hand[0].index()];
    assert!((value - 1.0).abs() < 0.01, "Q = {}", value);
    assert!(losses.last().unwrap() < losses.first().unwrap());
}

#[test]
fn test_reward_propagates_through_bootstrap() {
    let config = LearnerConfig {
        gamma: 0.6,
        batch_size: 2,
        retrain_every: 1,
        buffer_capacity: 2,
    };
    let mut learner = Learner::new(
        LinearApproximator::zeros().with_learning_rate(0.05),
        LinearApproximator::zeros(),
        config,
        AgentRng::new(3),
    )
    .unwrap();

    // Disjoint feature sets: first decision from {s7, s8}, last from {es} on {ez}.
    let first_hand = cards(&["s7", "s8"]);
    let first = encode_state(&first_hand, &[]);
    let last_hand = cards(&["es"]);
    let last = encode_state(&last_hand, &cards(&["ez"]));

    let step = Transition::step(first, encode_action(first_hand[0]), last);
    let end = Transition::terminal(last, encode_action(last_hand[0]), 1.0);

    for round in 0..1000 {
        learner.observe(step).unwrap();
        learner.observe(end).unwrap();
        if round % 10 == 9 {
            learner.sync_target().unwrap();
        }
    }

    let end_value = learner.online().predict_one(last).unwrap()[last_hand[0].index()];
    let step_value = learner.online().predict_one(first).unwrap()[first_hand[0].index()];
    assert!((end_value - 1.0).abs() < 0.05, "Q(last) = {}", end_value);
    assert!((step_value - 0.6).abs() < 0.05, "Q(first) = {}", step_value);
}

#[test]
fn test_empty_table_vector_is_terminal_successor() {
    let t = tagged(1);
    assert_eq!(t.next_state(), StateVector::EMPTY);
    assert_eq!(StateVector::EMPTY.count_set(), 0);
}
