//! On-disk parameter checkpoints.
//!
//! A checkpoint stores the online parameters together with the card
//! ordering they were trained against. Loading refuses a file whose
//! ordering differs from this build, since every weight row is tied to a
//! card index.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Card;
use crate::error::{AgentError, Result};

use super::traits::{ParameterTensor, Parameters};

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serialized checkpoint contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub format_version: u32,

    /// Card codes in index order at save time.
    pub card_order: Vec<String>,

    pub parameters: Parameters,
}

impl Checkpoint {
    /// Wrap parameters with the current version and card ordering.
    pub fn new(parameters: Parameters) -> Self {
        Self {
            format_version: CHECKPOINT_VERSION,
            card_order: current_card_order(),
            parameters,
        }
    }

    /// Check version, card ordering, and tensor lengths.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != CHECKPOINT_VERSION {
            return Err(AgentError::CheckpointFormat {
                expected: CHECKPOINT_VERSION,
                found: self.format_version,
            });
        }
        if self.card_order != current_card_order() {
            return Err(AgentError::CardOrderMismatch);
        }
        self.parameters
            .tensors
            .iter()
            .try_for_each(ParameterTensor::check_len)
    }

    /// Write to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read and validate a checkpoint from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let checkpoint: Checkpoint = bincode::deserialize_from(reader)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

fn current_card_order() -> Vec<String> {
    Card::deck().map(Card::code).collect()
}
