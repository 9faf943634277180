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
use crate::*;
use std::cmp::min;

/// Fixed-capacity UTF-8 text edited by [`Context::textbox`].
///
/// A buffer of `size` bytes holds at most `size - 1` bytes of text. Anything that does not fit is
/// cut at the last character boundary that does, so the contents are always valid UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    size: usize,
}

impl Default for TextBuffer {
    fn default() -> Self { Self::with_size(1) }
}

impl TextBuffer {
    /// Creates an empty buffer of `size` bytes.
    pub fn new(size: usize) -> Result<Self, ValidationError> {
        if size == 0 {
            tracing::warn!("text buffer of size 0 rejected");
            return Err(ValidationError::ZeroBufferSize);
        }
        Ok(Self::with_size(size))
    }

    pub(crate) fn with_size(size: usize) -> Self { Self { text: String::with_capacity(size.saturating_sub(1)), size: size.max(1) } }

    /// Maximum number of bytes of text.
    pub fn capacity(&self) -> usize { self.size - 1 }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize { self.text.len() }

    /// Returns `true` when the buffer holds no text.
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Current contents.
    pub fn as_str(&self) -> &str { &self.text }

    /// Empties the buffer.
    pub fn clear(&mut self) { self.text.clear() }

    /// Replaces the contents with `text`, truncated to fit.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.push_str(text);
    }

    /// Replaces the contents with `bytes`; invalid sequences become U+FFFD before truncation.
    pub fn set_bytes(&mut self, bytes: &[u8]) { self.set_text(&String::from_utf8_lossy(bytes)); }

    /// Appends as much of `text` as fits and returns the number of bytes appended.
    pub fn push_str(&mut self, text: &str) -> usize {
        let room = self.capacity() - self.text.len();
        let mut end = min(room, text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&text[..end]);
        end
    }

    /// Removes the last character.
    pub fn pop_char(&mut self) -> Option<char> { self.text.pop() }
}

impl<M: TextMetrics> Context<M> {
    /// Textbox at an explicit rectangle with an explicit id.
    ///
    /// Keeps focus until Enter is pressed or the mouse is pressed elsewhere. While focused, typed
    /// text is appended and Backspace removes the last character.
    #[inline(never)]
    pub fn textbox_raw(&mut self, buf: &mut TextBuffer, id: Id, r: Recti, opt: WidgetOption) -> ResourceState {
        let control = self.update_control(id, r, opt | WidgetOption::HOLD_FOCUS);
        let mut res = ResourceState::NONE;

        if control.focused {
            if buf.push_str(self.input.text_input()) > 0 {
                res |= ResourceState::CHANGE;
            }
            let keys = self.input.key_pressed();
            if keys.is_backspace() && buf.pop_char().is_some() {
                res |= ResourceState::CHANGE;
            }
            if keys.is_return() {
                self.set_focus(None);
                res |= ResourceState::SUBMIT;
            }
        }

        self.draw_control_frame(id, r, ControlColor::Base, opt);
        if self.focus == Some(id) {
            let font = self.style.font;
            let color = self.style.color(ControlColor::Text);
            let text_w = self.metrics.text_width(font, buf.as_str());
            let text_h = self.metrics.text_height(font);
            // once the text outgrows the box, keep its tail in view
            let ofx = r.width - self.style.padding - text_w - 1;
            let text_x = r.x + min(ofx, self.style.padding);
            let text_y = r.y + (r.height - text_h) / 2;
            self.push_clip_rect(r);
            self.draw_text(font, buf.as_str(), vec2(text_x, text_y), color);
            self.draw_rect(rect(text_x + text_w, text_y, 1, text_h), color);
            self.pop_clip_rect();
        } else {
            self.draw_control_text(buf.as_str(), r, ControlColor::Text, opt);
        }
        res
    }

    /// Textbox in the next layout cell, identified by the buffer's address.
    pub fn textbox_ex(&mut self, buf: &mut TextBuffer, opt: WidgetOption) -> ResourceState {
        let id = self.get_id_from_ptr(&*buf);
        let r = self.layout_next();
        self.textbox_raw(buf, id, r, opt)
    }

    /// Textbox with default options.
    pub fn textbox(&mut self, buf: &mut TextBuffer) -> ResourceState { self.textbox_ex(buf, WidgetOption::NONE) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::{click, frame, TestContext};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn focused_box(ctx: &mut TestContext, buf: &mut TextBuffer) {
        click(ctx, vec2(100, 39), |ctx| {
            ctx.layout_row(&[-1], 0);
            ctx.textbox(buf)
        });
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(TextBuffer::new(0), Err(ValidationError::ZeroBufferSize));
        assert_eq!(TextBuffer::default().capacity(), 0);
    }

    #[test]
    fn truncates_on_char_boundary() {
        let mut buf = TextBuffer::new(5).unwrap();
        buf.set_text("aé€x");
        // 'a' (1) + 'é' (2) fit in 4 bytes, '€' (3) does not
        assert_eq!(buf.as_str(), "aé");
        assert_eq!(buf.push_str("bc"), 1);
        assert_eq!(buf.as_str(), "aéb");
        assert_eq!(buf.push_str("z"), 0);
    }

    #[test]
    fn lossy_bytes() {
        let mut buf = TextBuffer::new(16).unwrap();
        buf.set_bytes(b"ok\xfe!");
        assert_eq!(buf.as_str(), "ok\u{fffd}!");
    }

    #[test]
    fn random_truncation_is_a_stable_prefix() {
        let alphabet = ['a', 'Z', '7', 'é', 'ß', '€', '漢', '🙂'];
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.random_range(0..40);
            let s: String = (0..len).map(|_| alphabet[rng.random_range(0..alphabet.len())]).collect();
            let size = rng.random_range(1..32);
            let mut buf = TextBuffer::new(size).unwrap();
            buf.set_text(&s);
            let first = buf.as_str().to_owned();
            assert!(first.len() <= size - 1);
            assert!(s.starts_with(&first));
            if s.len() > first.len() {
                let next = s[first.len()..].chars().next().unwrap();
                assert!(first.len() + next.len_utf8() > size - 1);
            }
            buf.set_text(&s);
            assert_eq!(buf.as_str(), first);
        }
    }

    #[test]
    fn typing_edits_and_enter_submits() {
        let mut ctx = TestContext::new(MonospaceMetrics::default());
        let mut buf = TextBuffer::new(8).unwrap();
        focused_box(&mut ctx, &mut buf);
        let id = ctx.focus_id();
        assert!(id.is_some());

        ctx.input_text("hello world");
        let res = frame(&mut ctx, |ctx| {
            ctx.layout_row(&[-1], 0);
            ctx.textbox(&mut buf)
        });
        assert!(res.is_changed());
        assert_eq!(buf.as_str(), "hello w");
        assert_eq!(ctx.focus_id(), id);

        ctx.input_keydown(Key::BACKSPACE);
        let res = frame(&mut ctx, |ctx| {
            ctx.layout_row(&[-1], 0);
            ctx.textbox(&mut buf)
        });
        ctx.input_keyup(Key::BACKSPACE);
        assert_eq!(res, ResourceState::CHANGE);
        assert_eq!(buf.as_str(), "hello ");

        ctx.input_keydown(Key::RETURN);
        let res = frame(&mut ctx, |ctx| {
            ctx.layout_row(&[-1], 0);
            ctx.textbox(&mut buf)
        });
        assert!(res.is_submitted());
        assert!(!res.is_changed());
        assert_eq!(ctx.focus_id(), None);
    }

    #[test]
    fn unfocused_box_ignores_typing() {
        let mut ctx = TestContext::new(MonospaceMetrics::default());
        let mut buf = TextBuffer::new(8).unwrap();
        ctx.input_text("abc");
        let res = frame(&mut ctx, |ctx| ctx.textbox(&mut buf));
        assert!(res.is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn press_elsewhere_drops_focus() {
        let mut ctx = TestContext::new(MonospaceMetrics::default());
        let mut buf = TextBuffer::new(8).unwrap();
        focused_box(&mut ctx, &mut buf);
        assert!(ctx.focus_id().is_some());
        ctx.input_mousedown(100, 250, MouseButton::LEFT);
        frame(&mut ctx, |ctx| {
            ctx.layout_row(&[-1], 0);
            ctx.textbox(&mut buf)
        });
        assert_eq!(ctx.focus_id(), None);
    }
}
