// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! REST surface.
//!
//! Every endpoint answers with the uniform envelope `{success:true, data}` or
//! `{success:false, error}`; the health probe is the one exception and
//! answers a plain status document. Handlers translate HTTP to service calls
//! and convert every failure into an [`ApiError`](crate::errors::ApiError)
//! at the boundary.

mod envelope;
mod query;
mod router;
mod server;
mod state;

#[cfg(test)]
mod integration_tests;

pub use router::dispatch;
pub use server::serve;
pub use state::AppState;
