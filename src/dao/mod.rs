/// High-score repository with degraded-mode handling.
pub mod high_scores;
/// Persisted record definitions.
pub mod models;
/// Backends for the high-score list.
pub mod score_store;
/// Storage error types.
pub mod storage;
