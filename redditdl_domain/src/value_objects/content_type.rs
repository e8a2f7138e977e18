// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-type classification tag (spec.md §4.4).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Image,
    Video,
    Gallery,
    Text,
    Poll,
    Crosspost,
    External,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Gallery => "gallery",
            ContentType::Text => "text",
            ContentType::Poll => "poll",
            ContentType::Crosspost => "crosspost",
            ContentType::External => "external",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Known media-hosting domains used by the content-type classifier
/// (spec.md §4.4 step 2). Kept as a domain constant because the detector
/// is deterministic, priority-ordered logic that belongs with the type it
/// classifies.
pub const KNOWN_MEDIA_DOMAINS: &[&str] = &[
    "i.redd.it",
    "v.redd.it",
    "i.imgur.com",
    "imgur.com",
    "gfycat.com",
    "redgifs.com",
];

/// File extensions recognized for image/video dispatch (spec.md §4.4).
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".mov", ".avi", ".mkv"];
