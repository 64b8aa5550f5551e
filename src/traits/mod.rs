// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod progress;
mod runner;

pub use progress::{NullProgressSink, ProgressSink};
pub use runner::{RunnerError, StepRunner};
