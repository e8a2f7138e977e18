// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: use cases orchestrate domain services against
//! infrastructure adapters, resolved through `redditdl_domain`'s ports.

pub mod services;
pub mod stages;
pub mod use_cases;
