//! Fixed-capacity experience replay.

use std::collections::VecDeque;

use crate::core::AgentRng;

use super::transition::Transition;

/// Buffer of past transitions.
///
/// Uses a FIFO strategy: when full, the oldest transition is evicted.
/// Not synchronized; owned by a single learner.
#[derive(Clone, Debug)]
pub struct ReplayBuffer {
    transitions: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    /// Create a new buffer holding at most `capacity` transitions.
    pub fn new(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn push(&mut self, transition: Transition) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Draw `n` transitions uniformly at random, with replacement.
    ///
    /// Callers are expected to check `len() >= n` first; an empty buffer
    /// yields an empty batch.
    pub fn sample(&self, n: usize, rng: &mut AgentRng) -> Vec<Transition> {
        if self.transitions.is_empty() {
            return Vec::new();
        }
        (0..n)
            .map(|_| self.transitions[rng.gen_range_usize(0..self.transitions.len())])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}

impl Default for ReplayBuffer {
    fn default() -> Self {
        Self::new(2000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;
    use crate::nn::{encode_action, encode_state};

    /// Transition whose reward tags its insertion order.
    fn tagged(tag: usize) -> Transition {
        let card = Card::from_index(tag % 32).unwrap();
        Transition::terminal(encode_state(&[card], &[]), encode_action(card), tag as f32)
    }

    fn tags(buffer: &ReplayBuffer) -> Vec<usize> {
        buffer.iter().map(|t| t.reward() as usize).collect()
    }

    #[test]
    fn test_push_within_capacity() {
        let mut buffer = ReplayBuffer::new(5);
        for i in 0..3 {
            buffer.push(tagged(i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.capacity(), 5);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_fifo_eviction() {
        let mut buffer = ReplayBuffer::new(3);
        for i in [1, 3, 5, 7, 9] {
            buffer.push(tagged(i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(tags(&buffer), vec![5, 7, 9]);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(ReplayBuffer::default().capacity(), 2000);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut buffer = ReplayBuffer::new(0);
        buffer.push(tagged(1));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sample_with_replacement() {
        let mut buffer = ReplayBuffer::new(10);
        buffer.push(tagged(1));
        buffer.push(tagged(3));

        let mut rng = AgentRng::new(42);
        let batch = buffer.sample(32, &mut rng);
        assert_eq!(batch.len(), 32);
        assert!(batch.iter().all(|t| t.reward() == 1.0 || t.reward() == 3.0));
    }

    #[test]
    fn test_sample_covers_contents() {
        let mut buffer = ReplayBuffer::new(4);
        for i in [1, 3, 5, 7] {
            buffer.push(tagged(i));
        }

        let mut rng = AgentRng::new(9);
        let batch = buffer.sample(400, &mut rng);
        for tag in [1.0, 3.0, 5.0, 7.0] {
            assert!(batch.iter().any(|t| t.reward() == tag));
        }
    }

    #[test]
    fn test_sample_is_seeded() {
        let mut buffer = ReplayBuffer::new(10);
        for i in 0..10 {
            buffer.push(tagged(i));
        }
        let a = buffer.sample(8, &mut AgentRng::new(5));
        let b = buffer.sample(8, &mut AgentRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_empty() {
        let buffer = ReplayBuffer::new(10);
        assert!(buffer.sample(4, &mut AgentRng::new(1)).is_empty());
    }
}
