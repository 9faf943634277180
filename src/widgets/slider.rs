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

fn format_real(value: Real, precision: usize) -> String { format!("{value:.precision$}") }

fn quantize(value: Real, low: Real, step: Real) -> Real {
    if step > 0.0 { low + ((value - low) / step).round() * step } else { value }
}

impl<M: TextMetrics> Context<M> {
    fn begin_number_edit(&mut self, id: Id, value: Real, precision: usize) {
        self.number_edit = Some(id);
        self.number_edit_buf.set_text(&format_real(value, precision));
        tracing::trace!(?id, "number edit started");
    }

    /// Text entry mode shared by sliders and number fields. Shift+click enters it, as does Enter
    /// while the control has focus; Enter or losing focus commits the parsed value. Returns `None`
    /// when the control is not being edited.
    fn number_textbox(&mut self, value: &mut Real, r: Recti, id: Id, precision: usize) -> Option<ResourceState> {
        if self.input.mouse_pressed().is_left() && self.input.key_down().is_shift() && self.hover == Some(id) {
            self.begin_number_edit(id, *value, precision);
        }
        if self.number_edit != Some(id) {
            if self.focus == Some(id) && self.input.key_pressed().is_return() {
                // the Enter that opened the editor must not also commit it
                self.begin_number_edit(id, *value, precision);
            }
            return None;
        }

        let mut buf = std::mem::take(&mut self.number_edit_buf);
        let mut res = self.textbox_raw(&mut buf, id, r, WidgetOption::NONE);
        if res.is_submitted() || self.focus != Some(id) {
            // unparsable text leaves the value alone
            if let Ok(parsed) = buf.as_str().trim().parse::<Real>() {
                if parsed != *value {
                    *value = parsed;
                    res |= ResourceState::CHANGE;
                }
            }
            self.number_edit = None;
        }
        self.number_edit_buf = buf;
        Some(res)
    }

    /// Horizontal slider bound to `value`, identified by its address.
    ///
    /// Dragging maps the pointer across the track onto `[low, high]`, snapped to multiples of
    /// `step` from `low` when `step > 0`. The value is clamped into range every frame, so an
    /// out-of-range value reports `CHANGE` on its first frame. `precision` is the number of
    /// decimals shown.
    #[inline(never)]
    pub fn slider_ex(&mut self, value: &mut Real, low: Real, high: Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let last = *value;
        let id = self.get_id_from_ptr(&*value);
        let base = self.layout_next();
        if let Some(res) = self.number_textbox(value, base, id, precision) {
            return res;
        }

        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let control = self.update_control(id, base, opt);
        let mut res = ResourceState::NONE;
        let mut v = *value;
        if control.active {
            res |= ResourceState::ACTIVE;
            if base.width > 0 {
                let offset = (self.input.mouse_pos().x - base.x) as Real;
                v = quantize(low + offset * (high - low) / base.width as Real, low, step);
            }
        }
        v = clamp(v, low, high);
        *value = v;
        if v != last {
            res |= ResourceState::CHANGE;
        }

        self.draw_control_frame(id, base, ControlColor::Base, opt);
        let thumb_w = self.style.thumb_size;
        let span = high - low;
        let t = if span > 0.0 { (v - low) / span } else { 0.0 };
        let thumb_x = ((base.width - thumb_w) as Real * t) as i32;
        let thumb = rect(base.x + thumb_x, base.y, thumb_w, base.height);
        self.draw_control_frame(id, thumb, ControlColor::Button, opt);
        self.draw_control_text(&format_real(v, precision), base, ControlColor::Text, opt);
        res
    }

    /// Slider with two decimals and no snapping.
    pub fn slider(&mut self, value: &mut Real, low: Real, high: Real) -> ResourceState {
        self.slider_ex(value, low, high, 0.0, 2, WidgetOption::ALIGN_CENTER)
    }

    /// Number field bound to `value`. Dragging horizontally adds `step` per pixel. The field keeps
    /// focus after a click, and a double click, shift+click or Enter switches it to text entry.
    #[inline(never)]
    pub fn number_ex(&mut self, value: &mut Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let last = *value;
        let id = self.get_id_from_ptr(&*value);
        let base = self.layout_next();
        if let Some(res) = self.number_textbox(value, base, id, precision) {
            return res;
        }

        let control = self.update_control(id, base, opt | WidgetOption::HOLD_FOCUS);
        let mut res = ResourceState::NONE;
        if control.active {
            res |= ResourceState::ACTIVE;
            // motion that arrives with the press is not a drag
            if !control.pressed {
                *value += self.input.mouse_delta().x as Real * step;
            }
        }
        if *value != last {
            res |= ResourceState::CHANGE;
        }
        if control.double_clicked {
            self.begin_number_edit(id, *value, precision);
        }

        self.draw_control_frame(id, base, ControlColor::Base, opt);
        self.draw_control_text(&format_real(*value, precision), base, ControlColor::Text, opt);
        res
    }

    /// Number field with two decimals.
    pub fn number(&mut self, value: &mut Real, step: Real) -> ResourceState { self.number_ex(value, step, 2, WidgetOption::ALIGN_CENTER) }
}
