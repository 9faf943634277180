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
use crate::error::OrFatal;
use crate::*;

impl<M: TextMetrics> Context<M> {
    /// Shared body of headers and tree nodes. Returns the node's id and whether it is expanded
    /// after this frame's input.
    ///
    /// A node only takes a pool slot once it has been toggled; until then its state is the default
    /// given by `WidgetOption::EXPANDED`.
    fn node_header(&mut self, label: &str, is_treenode: bool, opt: WidgetOption) -> (Id, bool) {
        let id = self.get_id(label);
        let slot = self.treenode_pool.get(id);
        if let Some(slot) = slot {
            self.treenode_pool.update(slot, self.frame);
        }
        let mut expanded = slot.map_or(opt.is_expanded(), |s| self.treenode_expanded[s]);

        self.layout_row(&[-1], 0);
        let mut r = self.layout_next();
        let control = self.update_control(id, r, WidgetOption::NONE);
        if control.released {
            expanded = !expanded;
            let slot = match slot {
                Some(slot) => slot,
                None => self.treenode_pool.init(id, self.frame).or_fatal(),
            };
            self.treenode_expanded[slot] = expanded;
            tracing::debug!(node = label, expanded, "tree node toggled");
        }

        if is_treenode {
            if self.hover == Some(id) {
                self.draw_frame(r, ControlColor::ButtonHover);
            }
        } else {
            self.draw_control_frame(id, r, ControlColor::Button, WidgetOption::NONE);
        }
        let icon = if expanded { Icon::Expanded } else { Icon::Collapsed };
        let color = self.style.color(ControlColor::Text);
        self.draw_icon(icon, rect(r.x, r.y, r.height, r.height), color);
        let shift = r.height - self.style.padding;
        r.x += shift;
        r.width -= shift;
        self.draw_control_text(label, r, ControlColor::Text, WidgetOption::NONE);
        (id, expanded)
    }

    /// Collapsible section header. Returns `ACTIVE` while expanded.
    pub fn header_ex(&mut self, label: &str, opt: WidgetOption) -> ResourceState {
        if self.node_header(label, false, opt).1 { ResourceState::ACTIVE } else { ResourceState::NONE }
    }

    /// Collapsed-by-default header.
    pub fn header(&mut self, label: &str) -> ResourceState { self.header_ex(label, WidgetOption::NONE) }

    /// Runs `f` below the header `label` while it is expanded.
    pub fn header_section<F: FnOnce(&mut Self)>(&mut self, label: &str, opt: WidgetOption, f: F) -> ResourceState {
        let res = self.header_ex(label, opt);
        if res.is_active() {
            f(self);
        }
        res
    }

    /// Opens a tree node. When it returns `ACTIVE` the children that follow are indented and
    /// scoped under the node's id, and the caller must finish with [`Context::end_treenode`].
    pub fn begin_treenode_ex(&mut self, label: &str, opt: WidgetOption) -> ResourceState {
        let (id, expanded) = self.node_header(label, true, opt);
        if !expanded {
            return ResourceState::NONE;
        }
        self.layout.adjust_indent(self.style.indent).or_fatal();
        self.ids.push_id(id).or_fatal();
        ResourceState::ACTIVE
    }

    /// Collapsed-by-default tree node.
    pub fn begin_treenode(&mut self, label: &str) -> ResourceState { self.begin_treenode_ex(label, WidgetOption::NONE) }

    /// Closes an expanded tree node.
    pub fn end_treenode(&mut self) {
        self.layout.adjust_indent(-self.style.indent).or_fatal();
        self.pop_id();
    }

    /// Runs `f` for the children of the tree node `label` while it is expanded.
    pub fn treenode<F: FnOnce(&mut Self)>(&mut self, label: &str, opt: WidgetOption, f: F) -> ResourceState {
        let res = self.begin_treenode_ex(label, opt);
        if res.is_active() {
            f(self);
            self.end_treenode();
        }
        res
    }
}
