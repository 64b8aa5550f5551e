// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured log message types.
//!
//! Diagnostic and operational events are expressed as small structs with a
//! `Display` implementation rather than as inline format strings. This keeps
//! the wording in one place per event and makes the fields available to
//! `tracing` as structured attributes at the call site.
//!
//! Messages are organized by subsystem:
//! * `messages::chain` - step execution lifecycle events
//! * `messages::http` - request handling events
//! * `messages::store` - persistence and seeding events

pub mod messages;
