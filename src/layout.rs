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
use crate::error::{StackKind, UsageError};
use crate::geometry::{rect, vec2};
use crate::stack::FixedStack;
use rs_math3d::{Recti, Vec2i};
use std::cmp::max;

/// Describes how a layout dimension should be resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum SizePolicy {
    /// `0`: the style's default cell size.
    #[default]
    Auto,
    /// Positive: exactly this many pixels.
    Fixed(i32),
    /// Negative. Widths share whatever the fixed columns leave; heights fit a line of content.
    Remainder,
}

impl SizePolicy {
    pub fn from_extent(v: i32) -> Self {
        match v {
            0 => Self::Auto,
            v if v < 0 => Self::Remainder,
            v => Self::Fixed(v),
        }
    }
}

/// Style values the layout reads. Sampled on every call so mid-frame style edits apply to later cells.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LayoutMetrics {
    pub size: Vec2i,
    pub padding: i32,
    pub spacing: i32,
    pub line_height: i32,
}

impl LayoutMetrics {
    fn default_width(&self) -> i32 { self.size.x + self.padding * 2 }
    fn default_height(&self) -> i32 { self.size.y + self.padding * 2 }
    fn content_height(&self) -> i32 { self.line_height + self.padding * 2 }
}

#[derive(Clone, Debug)]
struct Layout {
    body: Recti,
    position: Vec2i,
    max: Option<Vec2i>,
    next_row: i32,
    indent: i32,
    widths: Vec<SizePolicy>,
    height: SizePolicy,
    item_index: usize,
}

impl Layout {
    fn start_row(&mut self) {
        self.item_index = 0;
        self.position = vec2(self.indent, self.next_row);
    }

    fn resolve_width(&self, policy: SizePolicy, m: &LayoutMetrics) -> i32 {
        match policy {
            SizePolicy::Auto => m.default_width(),
            SizePolicy::Fixed(w) => w,
            SizePolicy::Remainder => {
                let fixed: i32 = self
                    .widths
                    .iter()
                    .map(|p| match p {
                        SizePolicy::Auto => m.default_width(),
                        SizePolicy::Fixed(w) => *w,
                        SizePolicy::Remainder => 0,
                    })
                    .sum();
                let shares = self.widths.iter().filter(|p| **p == SizePolicy::Remainder).count() as i32;
                let free = max(0, self.body.width - self.indent - fixed);
                if shares == 0 {
                    // a one-shot override on a row without relative columns fills the rest of the row
                    return max(0, self.body.width - self.position.x);
                }
                let rank = self.widths[..self.item_index].iter().filter(|p| **p == SizePolicy::Remainder).count() as i32;
                // the last relative column absorbs the rounding leftover
                if rank == shares - 1 { free - (free / shares) * (shares - 1) } else { free / shares }
            }
        }
    }

    fn resolve_height(&self, policy: SizePolicy, m: &LayoutMetrics) -> i32 {
        match policy {
            SizePolicy::Auto => m.default_height(),
            SizePolicy::Fixed(h) => h,
            SizePolicy::Remainder => m.content_height(),
        }
    }

    fn grow(&mut self, r: Recti) {
        let corner = vec2(r.x + r.width, r.y + r.height);
        self.max = Some(match self.max {
            None => corner,
            Some(m) => vec2(max(m.x, corner.x), max(m.y, corner.y)),
        });
    }
}

/// Row/column cursor shared by every open container of the frame.
pub(crate) struct LayoutManager {
    stack: FixedStack<Layout>,
    next_rect: Option<(Recti, bool)>,
    width_override: Option<i32>,
    height_override: Option<i32>,
}

impl LayoutManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: FixedStack::new(StackKind::Layout, capacity),
            next_rect: None,
            width_override: None,
            height_override: None,
        }
    }

    pub fn depth(&self) -> usize { self.stack.len() }

    fn top_mut(&mut self) -> Result<&mut Layout, UsageError> { self.stack.last_mut().ok_or(UsageError::NoContainer) }

    /// Opens a scope over `body`, shifted by the owning container's scroll offset.
    pub fn push_layout(&mut self, body: Recti, scroll: Vec2i) -> Result<(), UsageError> {
        let mut layout = Layout {
            body: rect(body.x - scroll.x, body.y - scroll.y, body.width, body.height),
            position: vec2(0, 0),
            max: None,
            next_row: 0,
            indent: 0,
            widths: vec![SizePolicy::Auto],
            height: SizePolicy::Auto,
            item_index: 0,
        };
        layout.start_row();
        self.stack.push(layout)
    }

    /// Closes the innermost scope and returns the extent its cells covered.
    pub fn pop_layout(&mut self) -> Result<Vec2i, UsageError> {
        let layout = self.stack.pop()?;
        Ok(match layout.max {
            Some(m) => vec2(m.x - layout.body.x, m.y - layout.body.y),
            None => vec2(0, 0),
        })
    }

    pub fn row(&mut self, widths: &[i32], height: i32) -> Result<(), UsageError> {
        let layout = self.top_mut()?;
        layout.widths.clear();
        layout.widths.extend(widths.iter().map(|w| SizePolicy::from_extent(*w)));
        layout.height = SizePolicy::from_extent(height);
        layout.start_row();
        Ok(())
    }

    /// Starts a row of `items` cells reusing the previous widths; missing entries repeat the last one.
    pub fn row_items(&mut self, items: usize, height: i32) -> Result<(), UsageError> {
        let layout = self.top_mut()?;
        let fill = layout.widths.last().copied().unwrap_or_default();
        layout.widths.resize(items, fill);
        layout.height = SizePolicy::from_extent(height);
        layout.start_row();
        Ok(())
    }

    pub fn set_width(&mut self, width: i32) { self.width_override = Some(width); }

    pub fn set_height(&mut self, height: i32) { self.height_override = Some(height); }

    pub fn set_next(&mut self, r: Recti, relative: bool) { self.next_rect = Some((r, relative)); }

    pub fn adjust_indent(&mut self, delta: i32) -> Result<(), UsageError> {
        self.top_mut()?.indent += delta;
        Ok(())
    }

    pub fn next(&mut self, m: &LayoutMetrics) -> Result<Recti, UsageError> {
        let width_override = self.width_override.take();
        let height_override = self.height_override.take();
        let next_rect = self.next_rect.take();
        let layout = self.stack.last_mut().ok_or(UsageError::NoContainer)?;

        let mut res = match next_rect {
            Some((r, false)) => return Ok(r),
            Some((r, true)) => r,
            None => {
                if layout.item_index == layout.widths.len() {
                    layout.start_row();
                }
                let width = width_override
                    .map(SizePolicy::from_extent)
                    .unwrap_or_else(|| layout.widths.get(layout.item_index).copied().unwrap_or_default());
                let height = height_override.map(SizePolicy::from_extent).unwrap_or(layout.height);
                let r = rect(
                    layout.position.x,
                    layout.position.y,
                    layout.resolve_width(width, m),
                    layout.resolve_height(height, m),
                );
                if layout.item_index < layout.widths.len() {
                    layout.item_index += 1;
                }
                layout.position.x += r.width;
                layout.next_row = max(layout.next_row, r.y + r.height + m.spacing);
                r
            }
        };

        res.x += layout.body.x;
        res.y += layout.body.y;
        layout.grow(res);
        Ok(res)
    }

    /// Opens a nested scope whose body is the parent's next cell.
    pub fn begin_column(&mut self, m: &LayoutMetrics) -> Result<(), UsageError> {
        let body = self.next(m)?;
        self.push_layout(body, vec2(0, 0))
    }

    /// Closes a column and folds the space it consumed into the parent's cursor and extent.
    pub fn end_column(&mut self) -> Result<(), UsageError> {
        if self.stack.len() < 2 {
            return Err(UsageError::StackUnderflow { stack: StackKind::Layout });
        }
        let finished = self.stack.pop()?;
        let parent = self.top_mut()?;
        parent.position.x = max(parent.position.x, finished.position.x + finished.body.x - parent.body.x);
        parent.next_row = max(parent.next_row, finished.next_row + finished.body.y - parent.body.y);
        if let Some(m) = finished.max {
            parent.grow(rect(m.x, m.y, 0, 0));
        }
        Ok(())
    }
}
