// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod acquisition_stage;
pub mod export_stage;
pub mod filter_stage;
pub mod organization_stage;
pub mod processing_stage;

pub use acquisition_stage::AcquisitionStage;
pub use export_stage::ExportStage;
pub use filter_stage::FilterStage;
pub use organization_stage::OrganizationStage;
pub use processing_stage::ProcessingStage;
