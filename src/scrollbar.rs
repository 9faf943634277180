//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
//! Scrollbar geometry. Interaction lives in the container code; this module only does the math.
use crate::geometry::vec2;
use crate::{Recti, Vec2i};
use std::cmp::{max, min};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScrollAxis {
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    pub const BOTH: [ScrollAxis; 2] = [ScrollAxis::Vertical, ScrollAxis::Horizontal];

    /// Id seed of the scrollbar control for this axis, unique within its container.
    pub fn id_label(self) -> &'static str {
        match self {
            ScrollAxis::Vertical => "!scrollbary",
            ScrollAxis::Horizontal => "!scrollbarx",
        }
    }

    pub fn of(self, v: Vec2i) -> i32 {
        match self {
            ScrollAxis::Vertical => v.y,
            ScrollAxis::Horizontal => v.x,
        }
    }

    pub fn with(self, v: Vec2i, value: i32) -> Vec2i {
        match self {
            ScrollAxis::Vertical => vec2(v.x, value),
            ScrollAxis::Horizontal => vec2(value, v.y),
        }
    }

    pub fn len(self, r: Recti) -> i32 {
        match self {
            ScrollAxis::Vertical => r.height,
            ScrollAxis::Horizontal => r.width,
        }
    }
}

pub(crate) fn max_scroll(content_len: i32, view_len: i32) -> i32 { max(0, content_len - view_len) }

/// Keeps a scroll offset inside `[0, content - view]` on both axes.
pub(crate) fn clamp_scroll(scroll: Vec2i, content: Vec2i, view: Recti) -> Vec2i {
    ScrollAxis::BOTH.iter().fold(scroll, |s, axis| {
        let limit = max_scroll(axis.of(content), axis.len(view));
        axis.with(s, min(max(axis.of(s), 0), limit))
    })
}

/// Track running along the right (vertical) or bottom (horizontal) edge of `body`.
pub(crate) fn track_rect(axis: ScrollAxis, body: Recti, size: i32) -> Recti {
    let mut track = body;
    match axis {
        ScrollAxis::Vertical => {
            track.x = body.x + body.width;
            track.width = size;
        }
        ScrollAxis::Horizontal => {
            track.y = body.y + body.height;
            track.height = size;
        }
    }
    track
}

/// Converts a mouse drag along the track into a content offset.
pub(crate) fn drag_to_scroll(axis: ScrollAxis, mouse_delta: Vec2i, content_len: i32, track: Recti) -> i32 {
    let track_len = axis.len(track);
    if track_len <= 0 {
        return 0;
    }
    axis.of(mouse_delta).saturating_mul(content_len) / track_len
}

/// Thumb sized proportionally to the visible fraction, never shorter than `thumb_size`.
pub(crate) fn thumb_rect(axis: ScrollAxis, track: Recti, view_len: i32, content_len: i32, scroll: i32, thumb_size: i32) -> Recti {
    let track_len = axis.len(track);
    if track_len <= 0 || content_len <= 0 {
        return track;
    }
    let thumb_len = min(max(thumb_size, track_len.saturating_mul(view_len) / content_len), track_len);
    let limit = max_scroll(content_len, view_len);
    let offset = if limit > 0 { min(max(scroll, 0), limit) * (track_len - thumb_len) / limit } else { 0 };
    let mut thumb = track;
    match axis {
        ScrollAxis::Vertical => {
            thumb.height = thumb_len;
            thumb.y += offset;
        }
        ScrollAxis::Horizontal => {
            thumb.width = thumb_len;
            thumb.x += offset;
        }
    }
    thumb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect;

    #[test]
    fn thumb_reaches_the_track_end_at_max_scroll() {
        let track = track_rect(ScrollAxis::Vertical, rect(0, 0, 100, 100), 12);
        assert_eq!((track.x, track.width, track.height), (100, 12, 100));
        let top = thumb_rect(ScrollAxis::Vertical, track, 100, 400, 0, 8);
        assert_eq!((top.y, top.height), (0, 25));
        let bottom = thumb_rect(ScrollAxis::Vertical, track, 100, 400, 300, 8);
        assert_eq!(bottom.y + bottom.height, 100);
    }

    #[test]
    fn thumb_respects_minimum_size() {
        let track = track_rect(ScrollAxis::Horizontal, rect(0, 0, 100, 50), 12);
        let thumb = thumb_rect(ScrollAxis::Horizontal, track, 100, 100_000, 0, 8);
        assert_eq!(thumb.width, 8);
        assert_eq!(thumb.y, 50);
    }

    #[test]
    fn clamp_keeps_offsets_in_range() {
        let s = clamp_scroll(vec2(-5, 900), vec2(50, 300), rect(0, 0, 100, 100));
        assert_eq!((s.x, s.y), (0, 200));
    }

    #[test]
    fn drag_scales_by_content() {
        let track = rect(0, 0, 12, 100);
        assert_eq!(drag_to_scroll(ScrollAxis::Vertical, vec2(0, 10), 400, track), 40);
        assert_eq!(drag_to_scroll(ScrollAxis::Vertical, vec2(0, 10), 400, rect(0, 0, 12, 0)), 0);
    }
}
