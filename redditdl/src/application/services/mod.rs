// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod acquisition_engine;
pub mod auditor;
pub mod content_dispatch;
pub mod filter;
pub mod filter_chain;
pub mod filters;
pub mod pipeline_executor;
pub mod recovery;

pub use acquisition_engine::{AcquisitionEngine, AcquisitionPolicy, TargetProcessingResult};
pub use auditor::Auditor;
pub use content_dispatch::{DispatchOutcome, HandlerRegistry};
pub use filter_chain::{FilterChain, FilterOutcome};
pub use pipeline_executor::PipelineExecutor;
pub use recovery::{RecoveryManager, RecoveryOutcome, RecoveryStrategy};
