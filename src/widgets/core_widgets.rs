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

impl<M: TextMetrics> Context<M> {
    /// Single line of text in the next cell.
    pub fn label(&mut self, text: &str) {
        let r = self.layout_next();
        self.draw_control_text(text, r, ControlColor::Text, WidgetOption::NONE);
    }

    /// Paragraph wrapped at word boundaries to the width of the current row. Newlines force a
    /// break; a word longer than the row keeps a line of its own.
    #[inline(never)]
    pub fn text(&mut self, text: &str) {
        let font = self.style.font;
        let color = self.style.color(ControlColor::Text);
        let line_height = self.metrics.text_height(font);
        let space = self.metrics.text_width(font, " ");

        self.layout_begin_column();
        self.layout_row(&[-1], line_height);
        for paragraph in text.split('\n') {
            let mut r = self.layout_next();
            let (mut line_start, mut line_end, mut width) = (0, 0, 0);
            let mut offset = 0;
            for word in paragraph.split(' ') {
                let word_width = self.metrics.text_width(font, word);
                if offset == line_start {
                    width = word_width;
                } else if width + space + word_width > r.width {
                    self.draw_text(font, &paragraph[line_start..line_end], vec2(r.x, r.y), color);
                    r = self.layout_next();
                    line_start = offset;
                    width = word_width;
                } else {
                    width += space + word_width;
                }
                offset += word.len();
                line_end = offset;
                offset += 1;
            }
            self.draw_text(font, &paragraph[line_start..line_end], vec2(r.x, r.y), color);
        }
        self.layout_end_column();
    }

    /// Button with an optional icon. Submits when the left button is released over it after
    /// being pressed on it.
    #[inline(never)]
    pub fn button_ex(&mut self, label: &str, icon: Option<Icon>, opt: WidgetOption) -> ResourceState {
        let id = match (label.is_empty(), icon) {
            (true, Some(icon)) => self.get_id(format!("!icon {icon:?}")),
            _ => self.get_id(label),
        };
        let r = self.layout_next();
        let control = self.update_control(id, r, opt);
        let res = if control.released { ResourceState::SUBMIT } else { ResourceState::NONE };

        self.draw_control_frame(id, r, ControlColor::Button, opt);
        if !label.is_empty() {
            self.draw_control_text(label, r, ControlColor::Text, opt);
        }
        if let Some(icon) = icon {
            let color = self.style.color(ControlColor::Text);
            self.draw_icon(icon, r, color);
        }
        res
    }

    /// Centered text button.
    pub fn button(&mut self, label: &str) -> ResourceState { self.button_ex(label, None, WidgetOption::ALIGN_CENTER) }

    /// Check box bound to `state`, identified by its address. Toggles on release and reports
    /// `CHANGE` on that frame.
    pub fn checkbox(&mut self, label: &str, state: &mut bool) -> ResourceState {
        let id = self.get_id_from_ptr(&*state);
        let r = self.layout_next();
        let check = rect(r.x, r.y, r.height, r.height);
        let control = self.update_control(id, r, WidgetOption::NONE);

        let mut res = ResourceState::NONE;
        if control.released {
            *state = !*state;
            res |= ResourceState::CHANGE;
        }

        self.draw_control_frame(id, check, ControlColor::Base, WidgetOption::NONE);
        if *state {
            let color = self.style.color(ControlColor::Text);
            self.draw_icon(Icon::Check, check, color);
        }
        let text_rect = rect(r.x + check.width, r.y, r.width - check.width, r.height);
        self.draw_control_text(label, text_rect, ControlColor::Text, WidgetOption::NONE);
        res
    }
}
