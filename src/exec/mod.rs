// src/exec/mod.rs

//! Build execution layer.
//!
//! The runtime never compiles anything itself: it hands a [`BuildRequest`]
//! to a [`CompileBackend`], which reports back with a
//! `RuntimeEvent::BuildFinished`.
//!
//! - [`RealCompileBackend`] runs [`crate::pipeline::build`] on Tokio's
//!   blocking pool.
//! - Tests provide their own backend that scripts outcomes.
//!
//! [`BuildRequest`]: crate::engine::BuildRequest

pub mod backend;

pub use backend::{CompileBackend, RealCompileBackend};
