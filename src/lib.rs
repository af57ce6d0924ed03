//! End-to-end test package for the UFLA-RISC workspace.
//!
//! No library surface: the cross-crate tests live in `tests/`.
