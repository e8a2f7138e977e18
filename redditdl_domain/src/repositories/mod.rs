// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Capability-trait ports (spec.md's "repositories" layer): the core
//! depends only on these traits, never on a concrete infrastructure type.

pub mod content_handler;
pub mod event_bus;
pub mod exporter;
pub mod scraper;
pub mod state_store;

pub use content_handler::ContentHandler;
pub use event_bus::EventBus;
pub use exporter::{ExportResult, Exporter, FormatInfo};
pub use scraper::Scraper;
pub use state_store::StateStore;
