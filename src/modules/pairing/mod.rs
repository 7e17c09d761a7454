/// Pairing engine module
///
/// Reconciles arbitrary user-supplied scan filenames into front/back card
/// pairs using two ordered heuristics:
/// - Strategy A: filename role suffixes (`_front`/`_back`, `_f`/`_b`, `_1`/`_2`)
/// - Strategy B: adjacent sequence numbers within a shared filename stem
///
/// Uploads left unresolved by both strategies are marked orphaned and wait
/// for manual resolution. Pairs are append-only; re-pairing creates new rows.
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::engine::PairingEngine;
pub use application::manual::ManualPairingService;
pub use domain::{
    entities::{CardPair, PairingReport},
    repository::CardPairRepository,
    value_objects::{PairStatus, PairingMethod},
};
pub use infrastructure::CardPairRepositoryImpl;
