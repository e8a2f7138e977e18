// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # redditdl
//!
//! The application layer and infrastructure adapters for the
//! acquisition/filter/processing/organization/export pipeline defined in
//! `redditdl_domain`. `application` composes domain services into the
//! `Run` use case; `infrastructure` adapts external systems (an in-memory
//! or live Reddit scraper, content handlers, exporters, a SQLite or
//! in-memory state store, a Tokio-backed event bus) to the domain's
//! capability-trait ports.
//!
//! `redditdl_bootstrap` sits above this crate and owns CLI parsing,
//! signal handling, and process lifecycle; this crate never depends on
//! it.

pub mod application;
pub mod infrastructure;
