// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain entities: the mutable, identity-bearing objects the pipeline
//! threads through its stages.

pub mod context;
pub mod execution_metrics;
pub mod handler_result;
pub mod plugin_descriptor;
pub mod post_record;
pub mod security_event;
pub mod session_snapshot;
pub mod stage_result;

pub use context::Context;
pub use execution_metrics::ExecutionMetrics;
pub use handler_result::HandlerResult;
pub use plugin_descriptor::{PluginDescriptor, PluginRiskLevel};
pub use post_record::{Award, PollData, PollOption, PostFlags, PostRecord, ProcessingAnnotations};
pub use security_event::{DetectorVerdict, SecurityEvent, SecuritySeverity};
pub use session_snapshot::{SessionSnapshot, SessionStatus};
pub use stage_result::StageResult;

/// Shared `Duration <-> milliseconds` serde adapter: `std::time::Duration`
/// has no native serde support, and every timed entity in this module
/// needs the same millisecond encoding.
pub(crate) mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u128(d.as_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
