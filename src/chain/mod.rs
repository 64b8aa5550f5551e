// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Edit-chain execution engine.
//!
//! A [`Workspace`] owns a set of [`Project`]s, each holding one source image
//! and an ordered sequence of [`Step`]s. Execution walks the sequence
//! strictly one step at a time: a step moves `pending → processing →
//! {success | error}`, publishing progress to a [`ProgressSink`] between
//! cooperative yield points, and the actual outcome of each step is decided
//! by the injected [`StepRunner`] — the engine itself never guesses.
//!
//! Failures are local: an errored step is recorded and the walk continues.
//! The only recovery path is user-triggered re-execution.
//!
//! [`ProgressSink`]: crate::traits::ProgressSink
//! [`StepRunner`]: crate::traits::StepRunner

mod module;
mod progress;
mod project;
mod runner;
mod step;
mod workspace;


pub use module::{builtin_modules, EditModule};
pub use progress::StepProgress;
pub use project::{Project, ProjectStatus};
pub use runner::GenerationRunner;
pub use step::{Step, StepStatus};
pub use workspace::Workspace;
