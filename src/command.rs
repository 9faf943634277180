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
//! Frame command recording and traversal.
//!
//! Commands are appended in call order. Each root container brackets its commands with a head
//! and a tail jump; [`crate::Context::end`] rewires those jumps so that walking the buffer visits
//! containers back to front without moving any command.
use crate::error::UsageError;
use crate::geometry::{expand_rect, intersect_rects, rect, Color, UNCLIPPED_RECT};
use crate::stack::FixedStack;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Built-in glyphs the renderer is expected to draw.
pub enum Icon {
    /// Window close cross.
    Close,
    /// Checkbox tick.
    Check,
    /// Collapsed tree node arrow.
    Collapsed,
    /// Expanded tree node arrow.
    Expanded,
}

#[derive(Copy, Clone, Debug)]
pub(crate) enum Command {
    Jump { dst: usize },
    Clip { rect: Recti },
    Rect { rect: Recti, color: Color },
    Text { font: FontId, pos: Vec2i, color: Color, start: usize, len: usize },
    Icon { icon: Icon, rect: Recti, color: Color },
}

#[derive(Copy, Clone, Debug)]
/// Read-only view of one draw command.
pub enum CommandRef<'a> {
    /// Sets the renderer's scissor rectangle for the commands that follow.
    Clip {
        /// Scissor rectangle.
        rect: Recti,
    },
    /// Fills a solid rectangle.
    Rect {
        /// Area to fill, already clipped.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Draws a run of text with its top-left corner at `pos`.
    Text {
        /// Font to render with.
        font: FontId,
        /// Top-left corner of the text.
        pos: Vec2i,
        /// Text color.
        color: Color,
        /// UTF-8 text.
        text: &'a str,
    },
    /// Draws an icon centered in `rect`.
    Icon {
        /// Which glyph to draw.
        icon: Icon,
        /// Cell the icon is centered in.
        rect: Recti,
        /// Icon color.
        color: Color,
    },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Traversal position inside a [`CommandBuffer`]. Start each walk from [`CommandCursor::default`].
pub struct CommandCursor {
    index: usize,
}

/// Jump targets that have not been linked yet end any traversal that reaches them.
const UNLINKED: usize = usize::MAX;

/// Bounded per-frame command storage. Text payloads live in one shared string.
pub struct CommandBuffer {
    commands: Vec<Command>,
    text: String,
    capacity: usize,
    text_capacity: usize,
}

impl CommandBuffer {
    pub(crate) fn new(capacity: usize, text_capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            text: String::with_capacity(text_capacity),
            capacity,
            text_capacity,
        }
    }

    /// Number of recorded commands, jumps included.
    pub fn len(&self) -> usize { self.commands.len() }

    /// Returns `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    pub(crate) fn clear(&mut self) {
        self.commands.clear();
        self.text.clear();
    }

    pub(crate) fn push(&mut self, cmd: Command) -> Result<usize, UsageError> {
        if self.commands.len() >= self.capacity {
            return Err(UsageError::CommandBufferFull { capacity: self.capacity });
        }
        self.commands.push(cmd);
        Ok(self.commands.len() - 1)
    }

    /// Records an unlinked jump and returns its index.
    pub(crate) fn push_jump(&mut self) -> Result<usize, UsageError> { self.push(Command::Jump { dst: UNLINKED }) }

    pub(crate) fn set_jump(&mut self, at: usize, target: usize) {
        if let Some(Command::Jump { dst }) = self.commands.get_mut(at) {
            *dst = target;
        }
    }

    pub(crate) fn push_text(&mut self, font: FontId, pos: Vec2i, color: Color, text: &str) -> Result<usize, UsageError> {
        if self.text.len() + text.len() > self.text_capacity {
            return Err(UsageError::TextBufferFull { capacity: self.text_capacity });
        }
        let start = self.text.len();
        let index = self.push(Command::Text { font, pos, color, start, len: text.len() })?;
        self.text.push_str(text);
        Ok(index)
    }

    fn view<'a>(&'a self, cmd: &Command) -> Option<CommandRef<'a>> {
        Some(match *cmd {
            Command::Jump { .. } => return None,
            Command::Clip { rect } => CommandRef::Clip { rect },
            Command::Rect { rect, color } => CommandRef::Rect { rect, color },
            Command::Text { font, pos, color, start, len } => CommandRef::Text { font, pos, color, text: &self.text[start..start + len] },
            Command::Icon { icon, rect, color } => CommandRef::Icon { icon, rect, color },
        })
    }

    /// Returns the command at `cursor` and advances it, following jumps. `None` once the chain ends.
    pub fn next_command(&self, cursor: &mut CommandCursor) -> Option<CommandRef<'_>> {
        while let Some(cmd) = self.commands.get(cursor.index) {
            if let Command::Jump { dst } = *cmd {
                cursor.index = dst;
                continue;
            }
            cursor.index += 1;
            return self.view(cmd);
        }
        None
    }

    /// Iterates the buffer in paint order.
    pub fn iter(&self) -> Commands<'_> { Commands { buffer: self, cursor: CommandCursor::default() } }
}

/// Iterator over a [`CommandBuffer`] in paint order.
pub struct Commands<'a> {
    buffer: &'a CommandBuffer,
    cursor: CommandCursor,
}

impl<'a> Iterator for Commands<'a> {
    type Item = CommandRef<'a>;
    fn next(&mut self) -> Option<Self::Item> { self.buffer.next_command(&mut self.cursor) }
}

impl<'a> IntoIterator for &'a CommandBuffer {
    type Item = CommandRef<'a>;
    type IntoIter = Commands<'a>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// How much of `r` survives clipping against `cr`.
pub(crate) fn check_clip(r: Recti, cr: Recti) -> Clip {
    if r.x > cr.x + cr.width || r.x + r.width < cr.x || r.y > cr.y + cr.height || r.y + r.height < cr.y {
        return Clip::All;
    }
    if r.x >= cr.x && r.x + r.width <= cr.x + cr.width && r.y >= cr.y && r.y + r.height <= cr.y + cr.height {
        return Clip::None;
    }
    Clip::Part
}

/// Borrowed view of the pieces of the context needed to emit clipped draw commands.
pub(crate) struct DrawCtx<'a, M: TextMetrics> {
    commands: &'a mut CommandBuffer,
    clip_stack: &'a mut FixedStack<Recti>,
    style: &'a Style,
    metrics: &'a M,
}

impl<'a, M: TextMetrics> DrawCtx<'a, M> {
    pub(crate) fn new(commands: &'a mut CommandBuffer, clip_stack: &'a mut FixedStack<Recti>, style: &'a Style, metrics: &'a M) -> Self {
        Self { commands, clip_stack, style, metrics }
    }

    pub(crate) fn current_clip_rect(&self) -> Recti { self.clip_stack.last().copied().unwrap_or(UNCLIPPED_RECT) }

    /// Narrows the clip to its intersection with `r` and records the result for the renderer.
    pub(crate) fn push_clip_rect(&mut self, r: Recti) -> Result<(), UsageError> {
        let clip = intersect_rects(r, self.current_clip_rect());
        self.clip_stack.push(clip)?;
        self.set_clip(clip)
    }

    /// Drops the innermost clip and records the one it uncovers.
    pub(crate) fn pop_clip_rect(&mut self) -> Result<(), UsageError> {
        self.clip_stack.pop()?;
        self.set_clip(self.current_clip_rect())
    }

    fn set_clip(&mut self, rect: Recti) -> Result<(), UsageError> { self.commands.push(Command::Clip { rect }).map(|_| ()) }

    pub(crate) fn check_clip(&self, r: Recti) -> Clip { check_clip(r, self.current_clip_rect()) }

    pub(crate) fn draw_rect(&mut self, r: Recti, color: Color) -> Result<(), UsageError> {
        let r = intersect_rects(r, self.current_clip_rect());
        if r.width > 0 && r.height > 0 {
            self.commands.push(Command::Rect { rect: r, color })?;
        }
        Ok(())
    }

    pub(crate) fn draw_box(&mut self, r: Recti, color: Color) -> Result<(), UsageError> {
        self.draw_rect(rect(r.x + 1, r.y, r.width - 2, 1), color)?;
        self.draw_rect(rect(r.x + 1, r.y + r.height - 1, r.width - 2, 1), color)?;
        self.draw_rect(rect(r.x, r.y, 1, r.height), color)?;
        self.draw_rect(rect(r.x + r.width - 1, r.y, 1, r.height), color)
    }

    /// Text is dropped when it lies wholly outside the clip; otherwise the renderer's scissor,
    /// kept current by the clip commands, trims it.
    pub(crate) fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) -> Result<(), UsageError> {
        let r = rect(pos.x, pos.y, self.metrics.text_width(font, text), self.metrics.text_height(font));
        if self.check_clip(r) == Clip::All {
            return Ok(());
        }
        self.commands.push_text(font, pos, color, text).map(|_| ())
    }

    pub(crate) fn draw_icon(&mut self, icon: Icon, r: Recti, color: Color) -> Result<(), UsageError> {
        if self.check_clip(r) == Clip::All {
            return Ok(());
        }
        self.commands.push(Command::Icon { icon, rect: r, color }).map(|_| ())
    }

    pub(crate) fn draw_frame(&mut self, r: Recti, colorid: ControlColor) -> Result<(), UsageError> {
        self.draw_rect(r, self.style.color(colorid))?;
        if matches!(colorid, ControlColor::ScrollBase | ControlColor::ScrollThumb | ControlColor::TitleBG) {
            return Ok(());
        }
        let border = self.style.color(ControlColor::Border);
        if border.a != 0 {
            self.draw_box(expand_rect(r, 1), border)?;
        }
        Ok(())
    }

    pub(crate) fn draw_widget_frame(&mut self, focused: bool, hovered: bool, r: Recti, colorid: ControlColor, opt: WidgetOption) -> Result<(), UsageError> {
        if opt.has_no_frame() {
            return Ok(());
        }
        let colorid = if focused {
            colorid.focus()
        } else if hovered {
            colorid.hover()
        } else {
            colorid
        };
        self.draw_frame(r, colorid)
    }

    pub(crate) fn draw_control_text(&mut self, text: &str, r: Recti, colorid: ControlColor, opt: WidgetOption) -> Result<(), UsageError> {
        let font = self.style.font;
        let width = self.metrics.text_width(font, text);
        let padding = self.style.padding;
        self.push_clip_rect(r)?;
        let y = r.y + (r.height - self.metrics.text_height(font)) / 2;
        let x = if opt.is_aligned_center() {
            r.x + (r.width - width) / 2
        } else if opt.is_aligned_right() {
            r.x + r.width - width - padding
        } else {
            r.x + padding
        };
        let color = self.style.color(colorid);
        self.draw_text(font, text, vec2(x, y), color)?;
        self.pop_clip_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackKind;

    fn collect(buf: &CommandBuffer) -> Vec<String> {
        buf.iter()
            .map(|c| match c {
                CommandRef::Clip { rect } => format!("clip {} {}", rect.width, rect.height),
                CommandRef::Rect { rect, .. } => format!("rect {} {}", rect.x, rect.y),
                CommandRef::Text { text, .. } => format!("text {text}"),
                CommandRef::Icon { icon, .. } => format!("icon {icon:?}"),
            })
            .collect()
    }

    #[test]
    fn jumps_are_followed_and_never_yielded() {
        let mut buf = CommandBuffer::new(16, 64);
        let head = buf.push_jump().unwrap();
        buf.push(Command::Rect { rect: rect(1, 1, 1, 1), color: Color::default() }).unwrap();
        let skip = buf.push_jump().unwrap();
        buf.push(Command::Rect { rect: rect(2, 2, 1, 1), color: Color::default() }).unwrap();
        buf.push_text(FontId::default(), vec2(0, 0), Color::default(), "hi").unwrap();
        buf.set_jump(head, skip + 1);
        buf.set_jump(skip, buf.len());
        assert_eq!(collect(&buf), vec!["rect 2 2", "text hi"]);
    }

    #[test]
    fn unlinked_jump_ends_traversal() {
        let mut buf = CommandBuffer::new(4, 8);
        buf.push_jump().unwrap();
        buf.push(Command::Rect { rect: rect(0, 0, 1, 1), color: Color::default() }).unwrap();
        assert!(buf.next_command(&mut CommandCursor::default()).is_none());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn capacity_limits_are_reported() {
        let mut buf = CommandBuffer::new(1, 3);
        assert_eq!(buf.push_text(FontId::default(), vec2(0, 0), Color::default(), "abcd"), Err(UsageError::TextBufferFull { capacity: 3 }));
        buf.push_jump().unwrap();
        assert_eq!(buf.push_jump(), Err(UsageError::CommandBufferFull { capacity: 1 }));
    }

    #[test]
    fn clip_push_and_pop_are_recorded() {
        let mut buf = CommandBuffer::new(32, 256);
        let mut clips = FixedStack::new(StackKind::Clip, 4);
        let style = Style::default();
        let metrics = MonospaceMetrics::default();
        let mut d = DrawCtx::new(&mut buf, &mut clips, &style, &metrics);
        d.push_clip_rect(rect(0, 0, 100, 100)).unwrap();
        d.push_clip_rect(rect(50, 50, 100, 100)).unwrap();
        d.pop_clip_rect().unwrap();
        d.draw_text(FontId::default(), "inside", vec2(10, 10), Color::default()).unwrap();
        d.draw_text(FontId::default(), "edge", vec2(90, 10), Color::default()).unwrap();
        d.draw_text(FontId::default(), "gone", vec2(200, 10), Color::default()).unwrap();
        d.draw_rect(rect(-10, -10, 20, 20), Color::default()).unwrap();
        d.pop_clip_rect().unwrap();
        assert_eq!(
            collect(&buf),
            vec!["clip 100 100", "clip 50 50", "clip 100 100", "text inside", "text edge", "rect 0 0", "clip 33554432 33554432"]
        );
    }

    #[test]
    fn frame_border_skipped_for_scroll_and_title() {
        let mut buf = CommandBuffer::new(32, 0);
        let mut clips = FixedStack::new(StackKind::Clip, 4);
        let style = Style::default();
        let metrics = MonospaceMetrics::default();
        let mut d = DrawCtx::new(&mut buf, &mut clips, &style, &metrics);
        d.draw_frame(rect(0, 0, 10, 10), ControlColor::ScrollThumb).unwrap();
        assert_eq!(buf.len(), 1);
        let mut d = DrawCtx::new(&mut buf, &mut clips, &style, &metrics);
        d.draw_frame(rect(0, 0, 10, 10), ControlColor::Button).unwrap();
        assert_eq!(buf.len(), 6);
    }
}
