//! Integration Tests Module
//!
//! Exercises the public library API end to end: generation lifecycle,
//! structured-data validation, collection invariants, durable persistence and
//! the application state wiring. No network calls are made; a scripted
//! provider stands in for the remote model.

// Shared mock provider and fixtures
mod support;

// Submit / validate / commit lifecycle and stale responses
mod generation_test;

// History cap, saved toggle, edit propagation, clearing
mod collections_test;

// Durable store behaviour across reopen and corruption
mod persistence_test;

// AppState initialization, generation and account wiring
mod state_test;
