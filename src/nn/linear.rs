//! Linear action-value approximator.
//!
//! `Q(s)[a] = b[a] + Σ w[a][i] · s[i]`, trained by plain gradient descent
//! on squared error. States are sparse one-hot flags, so both passes only
//! touch the rows of set slots.
//!
//! This is the in-crate default backend. Anything deeper plugs in through
//! [`ActionValueApproximator`].

use crate::core::AgentRng;
use crate::error::{AgentError, Result};

use super::encoder::{ActionValues, StateVector, ACTION_SIZE, STATE_SIZE};
use super::traits::{ActionValueApproximator, ParameterTensor, Parameters};

/// Linear Q-function over the 128 state flags.
#[derive(Clone, Debug)]
pub struct LinearApproximator {
    /// `[ACTION_SIZE, STATE_SIZE]`, row-major.
    weights: Vec<f32>,
    bias: Vec<f32>,
    learning_rate: f32,
}

impl LinearApproximator {
    /// Create an approximator with small random weights.
    ///
    /// # Arguments
    /// - `seed`: Seed for weight initialization
    pub fn new(seed: u64) -> Self {
        Self::with_init_scale(seed, 0.01)
    }

    /// Create an approximator with weights uniform in `[-scale, scale)`.
    pub fn with_init_scale(seed: u64, scale: f32) -> Self {
        let mut rng = AgentRng::new(seed).for_context("linear-init");
        let weights = (0..ACTION_SIZE * STATE_SIZE)
            .map(|_| rng.gen_symmetric(scale))
            .collect();
        Self {
            weights,
            bias: vec![0.0; ACTION_SIZE],
            learning_rate: 0.01,
        }
    }

    /// All weights zero: every action valued 0 in every state.
    pub fn zeros() -> Self {
        Self::with_init_scale(0, 0.0)
    }

    /// Set the gradient step size (default: 0.01).
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn values_for(&self, state: StateVector) -> ActionValues {
        let mut values: ActionValues = [0.0; ACTION_SIZE];
        values.copy_from_slice(&self.bias);
        for slot in state.set_slots() {
            for (action, value) in values.iter_mut().enumerate() {
                *value += self.weights[action * STATE_SIZE + slot];
            }
        }
        values
    }
}

impl ActionValueApproximator for LinearApproximator {
    fn predict(&self, states: &[StateVector]) -> Result<Vec<ActionValues>> {
        Ok(states.iter().map(|&s| self.values_for(s)).collect())
    }

    /// One full-batch gradient step on the squared error summed over
    /// actions and averaged over the batch. Returns the loss measured
    /// before the step.
    fn fit(&mut self, states: &[StateVector], labels: &[ActionValues]) -> Result<f32> {
        if states.len() != labels.len() {
            return Err(AgentError::Approximator(format!(
                "fit got {} states but {} label rows",
                states.len(),
                labels.len()
            )));
        }
        if states.is_empty() {
            return Ok(0.0);
        }

        let batch = states.len() as f32;
        let mut weight_grad = vec![0.0f32; self.weights.len()];
        let mut bias_grad = [0.0f32; ACTION_SIZE];
        let mut loss = 0.0f32;

        for (&state, label) in states.iter().zip(labels) {
            let predicted = self.values_for(state);
            for action in 0..ACTION_SIZE {
                let error = predicted[action] - label[action];
                if error == 0.0 {
                    continue;
                }
                loss += error * error;
                let grad = 2.0 * error / batch;
                bias_grad[action] += grad;
                for slot in state.set_slots() {
                    weight_grad[action * STATE_SIZE + slot] += grad;
                }
            }
        }

        for (w, g) in self.weights.iter_mut().zip(&weight_grad) {
            *w -= self.learning_rate * g;
        }
        for (b, g) in self.bias.iter_mut().zip(&bias_grad) {
            *b -= self.learning_rate * g;
        }

        Ok(loss / batch)
    }

    fn parameters(&self) -> Result<Parameters> {
        Ok(Parameters::new(vec![
            ParameterTensor::new(self.weights.clone(), vec![ACTION_SIZE, STATE_SIZE]),
            ParameterTensor::new(self.bias.clone(), vec![ACTION_SIZE]),
        ]))
    }

    fn set_parameters(&mut self, parameters: &Parameters) -> Result<()> {
        self.parameters()?.check_compatible(parameters)?;
        self.weights.copy_from_slice(&parameters.tensors[0].data);
        self.bias.copy_from_slice(&parameters.tensors[1].data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;
    use crate::nn::encoder::encode_state;

    fn sample_state() -> StateVector {
        let hand: Vec<Card> = ["hz", "es", "g7"].iter().map(|c| c.parse().unwrap()).collect();
        encode_state(&hand, &["so".parse().unwrap()])
    }

    #[test]
    fn test_zeros_predicts_zero() {
        let approx = LinearApproximator::zeros();
        let values = approx.predict_one(sample_state()).unwrap();
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_init_is_seeded() {
        let a = LinearApproximator::new(3);
        let b = LinearApproximator::new(3);
        let c = LinearApproximator::new(4);
        assert_eq!(a.parameters().unwrap(), b.parameters().unwrap());
        assert_ne!(a.parameters().unwrap(), c.parameters().unwrap());
    }

    #[test]
    fn test_fit_moves_towards_label() {
        let mut approx = LinearApproximator::zeros().with_learning_rate(0.05);
        let state = sample_state();
        let mut label = [0.0; ACTION_SIZE];
        label[7] = 1.0;

        let first = approx.fit(&[state], &[label]).unwrap();
        let mut last = first;
        for _ in 0..50 {
            last = approx.fit(&[state], &[label]).unwrap();
        }

        assert!((first - 1.0).abs() < 1e-6);
        assert!(last < first);
        let values = approx.predict_one(state).unwrap();
        assert!(values[7] > 0.5);
        // Columns whose label equals the prediction get no signal.
        assert_eq!(values[0], 0.0);
    }

    #[test]
    fn test_fit_rejects_mismatched_batch() {
        let mut approx = LinearApproximator::zeros();
        let result = approx.fit(&[StateVector::EMPTY, StateVector::EMPTY], &[[0.0; ACTION_SIZE]]);
        assert!(matches!(result, Err(AgentError::Approximator(_))));
    }

    #[test]
    fn test_fit_empty_batch_is_noop() {
        let mut approx = LinearApproximator::new(1);
        let before = approx.parameters().unwrap();
        assert_eq!(approx.fit(&[], &[]).unwrap(), 0.0);
        assert_eq!(approx.parameters().unwrap(), before);
    }

    #[test]
    fn test_snapshot_copies_behavior() {
        let source = LinearApproximator::new(11);
        let mut dest = LinearApproximator::new(12);
        dest.set_parameters(&source.parameters().unwrap()).unwrap();

        let state = sample_state();
        assert_eq!(
            source.predict_one(state).unwrap(),
            dest.predict_one(state).unwrap()
        );
    }

    #[test]
    fn test_snapshot_shapes() {
        let params = LinearApproximator::zeros().parameters().unwrap();
        assert_eq!(params.shapes(), vec![vec![ACTION_SIZE, STATE_SIZE], vec![ACTION_SIZE]]);
    }
}
