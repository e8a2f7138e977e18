// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod date;
pub mod domain;
pub mod keyword;
pub mod media_type;
pub mod nsfw;
pub mod score;

pub use date::DateFilter;
pub use domain::DomainFilter;
pub use keyword::KeywordFilter;
pub use media_type::MediaTypeFilter;
pub use nsfw::NsfwFilter;
pub use score::ScoreFilter;
