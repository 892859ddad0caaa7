pub mod aggregate;
pub mod duplicate;
pub mod error;
pub mod fairness;
pub mod seeds;
pub mod types;

// Re-export the scheduling primitives (no engine- or storage-specific code)
pub use aggregate::*;
pub use duplicate::*;
pub use error::*;
pub use fairness::*;
pub use seeds::*;
pub use types::*;

use async_trait::async_trait;
use std::path::PathBuf;

// =============================================================================
// Simulation engine trait — implemented by whatever actually plays the trials
// =============================================================================

/// Everything an engine needs to play one duplicate seating.
///
/// The request is passed by value, so every seating owns its own copy of the
/// seed sequence and no two invocations can observe each other's mutations.
#[derive(Debug, Clone)]
pub struct TrialRequest {
    /// Batch the match belongs to
    pub batch_id: String,
    /// Rotation index of the seating (0 = selection order)
    pub rotation: usize,
    /// Namespace for every artifact this seating produces
    pub trial_group: TrialGroupId,
    /// Participant handles in seat order
    pub handles: Vec<ParticipantHandle>,
    /// Seeds to play, one trial per seed
    pub seeds: SeedSequence,
    /// Directory where the engine must leave `summary.json` and `errors.json`
    pub output_dir: PathBuf,
}

/// Trait that all simulation back-ends must implement.
///
/// The scheduler treats the engine as a black box: it hands over a
/// [`TrialRequest`] and, once the call returns `Ok`, expects the outcome
/// artifacts to exist under `request.output_dir`.
#[async_trait]
pub trait SimulationEngine: Send + Sync {
    /// Play every seed of the request with the given seat order.
    ///
    /// # Arguments
    /// * `request` - Seat order, seeds and output location for one seating
    ///
    /// # Returns
    /// `Ok(())` once the artifacts are written, or the reason the run failed
    async fn run_trials(&self, request: TrialRequest) -> Result<(), EngineError>;

    /// Returns the engine's name for logging
    fn name(&self) -> &str {
        "external"
    }
}
