#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Training harness for network-driven Pac-Man policies.
//!
//! A generation of [`Network`]s is scored by playing one headless training
//! game per network, either in order ([`SequentialEvaluator`]) or on a rayon
//! pool ([`ParallelEvaluator`]). The fittest networks seed the next
//! generation and the best one is written to disk as a [`SavedPolicy`].

mod evaluate;
mod evolution;
mod network;
mod store;

pub use evaluate::{
    evaluate, EvaluationError, EvaluationSettings, Evaluator, ParallelEvaluator,
    SequentialEvaluator,
};
pub use evolution::{Champion, EvolutionSettings, GenerationReport, Population, Trainer};
pub use network::{encode, Network, NetworkPolicy, INPUTS, OUTPUTS};
pub use store::{PolicyStoreError, SavedPolicy};
