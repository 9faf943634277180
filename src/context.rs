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
use crate::command::{check_clip, DrawCtx};
use crate::container::{ContainerScope, ScopeKind};
use crate::error::{fatal, OrFatal, PoolKind, StackKind, UsageError};
use crate::id::IdStack;
use crate::layout::{LayoutManager, LayoutMetrics};
use crate::pool::Pool;
use crate::scrollbar::clamp_scroll;
use crate::stack::FixedStack;
use crate::*;

/// Owns all UI state of one surface: input, retained container data, per-frame stacks and the
/// command buffer of the last finished frame.
///
/// A frame is the span between [`Context::begin`] and [`Context::end`]. Widget and container calls
/// are only valid inside a frame; commands may be read once the frame has ended.
pub struct Context<M: TextMetrics> {
    pub(crate) metrics: M,
    pub(crate) style: Style,
    pub(crate) config: ContextConfig,
    pub(crate) input: Input,

    pub(crate) hover: Option<Id>,
    pub(crate) focus: Option<Id>,
    pub(crate) updated_focus: bool,
    pub(crate) last_click: Option<(Id, usize)>,
    pub(crate) frame: usize,
    pub(crate) in_frame: bool,
    pub(crate) last_zindex: i32,
    pub(crate) hover_root: Option<ContainerHandle>,
    pub(crate) next_hover_root: Option<ContainerHandle>,
    pub(crate) scroll_target: Option<ContainerHandle>,
    pub(crate) number_edit: Option<Id>,
    pub(crate) number_edit_buf: TextBuffer,

    pub(crate) commands: CommandBuffer,
    pub(crate) root_list: FixedStack<ContainerHandle>,
    pub(crate) container_stack: FixedStack<ContainerScope>,
    pub(crate) clip_stack: FixedStack<Recti>,
    pub(crate) ids: IdStack,
    pub(crate) layout: LayoutManager,

    pub(crate) container_pool: Pool,
    pub(crate) containers: Vec<Container>,
    pub(crate) treenode_pool: Pool,
    pub(crate) treenode_expanded: Vec<bool>,
}

/// Room for a formatted number while it is being edited as text.
pub(crate) const NUMBER_EDIT_SIZE: usize = 128;

impl<M: TextMetrics> Context<M> {
    /// Creates a context with the default capacities.
    pub fn new(metrics: M) -> Self { Self::with_config(metrics, ContextConfig::default()) }

    /// Creates a context with explicit capacities.
    pub fn with_config(metrics: M, config: ContextConfig) -> Self {
        Self {
            metrics,
            style: Style::default(),
            config,
            input: Input::default(),
            hover: None,
            focus: None,
            updated_focus: false,
            last_click: None,
            frame: 0,
            in_frame: false,
            last_zindex: 0,
            hover_root: None,
            next_hover_root: None,
            scroll_target: None,
            number_edit: None,
            number_edit_buf: TextBuffer::with_size(NUMBER_EDIT_SIZE),
            commands: CommandBuffer::new(config.command_capacity, config.text_capacity),
            root_list: FixedStack::new(StackKind::Root, config.root_list_capacity),
            container_stack: FixedStack::new(StackKind::Container, config.container_stack_capacity),
            clip_stack: FixedStack::new(StackKind::Clip, config.clip_stack_capacity),
            ids: IdStack::new(config.id_stack_capacity),
            layout: LayoutManager::new(config.layout_stack_capacity),
            container_pool: Pool::new(PoolKind::Container, config.container_pool_size),
            containers: vec![Container::default(); config.container_pool_size],
            treenode_pool: Pool::new(PoolKind::TreeNode, config.treenode_pool_size),
            treenode_expanded: vec![false; config.treenode_pool_size],
        }
    }

    /// Current style.
    pub fn style(&self) -> &Style { &self.style }

    /// Mutable access to the style. Changes affect commands emitted afterwards.
    pub fn style_mut(&mut self) -> &mut Style { &mut self.style }

    /// Replaces the style.
    pub fn set_style(&mut self, style: Style) { self.style = style; }

    /// Host supplied text metrics.
    pub fn metrics(&self) -> &M { &self.metrics }

    /// Capacities this context was built with.
    pub fn config(&self) -> &ContextConfig { &self.config }

    /// Input accumulated for the current frame.
    pub fn input(&self) -> &Input { &self.input }

    /// Number of frames started so far.
    pub fn frame(&self) -> usize { self.frame }

    /// Control currently under the pointer.
    pub fn hover_id(&self) -> Option<Id> { self.hover }

    /// Control that owns focus.
    pub fn focus_id(&self) -> Option<Id> { self.focus }

    /// Gives focus to `id` (or clears it) and keeps it for the rest of the frame.
    pub fn set_focus(&mut self, id: Option<Id>) {
        self.focus = id;
        self.updated_focus = true;
    }

    /// Root container the pointer was over during the previous frame.
    pub fn hover_root(&self) -> Option<ContainerHandle> { self.hover_root }

    /// Updates the pointer position.
    pub fn input_mousemove(&mut self, x: i32, y: i32) { self.input.mousemove(x, y); }

    /// Records a button press at `(x, y)`.
    pub fn input_mousedown(&mut self, x: i32, y: i32, btn: MouseButton) { self.input.mousedown(x, y, btn); }

    /// Records a button release at `(x, y)`.
    pub fn input_mouseup(&mut self, x: i32, y: i32, btn: MouseButton) { self.input.mouseup(x, y, btn); }

    /// Accumulates wheel movement.
    pub fn input_scroll(&mut self, x: i32, y: i32) { self.input.scroll(x, y); }

    /// Records a key press.
    pub fn input_keydown(&mut self, key: Key) { self.input.keydown(key); }

    /// Records a key release.
    pub fn input_keyup(&mut self, key: Key) { self.input.keyup(key); }

    /// Appends typed text.
    pub fn input_text(&mut self, text: &str) { self.input.text(text); }

    /// Appends typed text given as raw bytes. Invalid UTF-8 sequences become U+FFFD.
    pub fn input_text_bytes(&mut self, bytes: &[u8]) { self.input.text(&String::from_utf8_lossy(bytes)); }

    pub(crate) fn ensure_frame(&self) {
        if !self.in_frame {
            fatal(UsageError::FrameNotStarted);
        }
    }

    /// Starts a frame.
    #[inline(never)]
    pub fn begin(&mut self) {
        if self.in_frame {
            fatal(UsageError::FrameAlreadyStarted);
        }
        self.commands.clear();
        for h in self.root_list.as_slice() {
            let c = &mut self.containers[h.0];
            c.head = None;
            c.tail = None;
            c.run_head = None;
        }
        self.root_list.clear();
        self.scroll_target = None;
        self.hover_root = self.next_hover_root.take();
        self.input.prelude();
        self.frame += 1;
        self.in_frame = true;
        // index 0 always holds the jump to the first root container
        self.commands.push_jump().or_fatal();
        self.clip_stack.push(UNCLIPPED_RECT).or_fatal();
        tracing::trace!(frame = self.frame, "frame begin");
    }

    /// Finishes the frame: closes stray containers, applies wheel scroll and focus rules, raises the
    /// clicked window and links the command buffer in paint order.
    #[inline(never)]
    pub fn end(&mut self) {
        if !self.in_frame {
            fatal(UsageError::FrameNotStarted);
        }
        self.close_open_scopes();
        self.ids.stack().expect_depth(0).or_fatal();
        if self.layout.depth() != 0 {
            fatal(UsageError::UnbalancedStack { stack: StackKind::Layout, depth: self.layout.depth() });
        }
        self.clip_stack.expect_depth(1).or_fatal();
        self.clip_stack.pop().or_fatal();

        if let Some(h) = self.scroll_target {
            let delta = self.input.scroll_delta();
            let pad2 = self.style.padding * 2;
            let c = &mut self.containers[h.0];
            let wanted = vec2(c.scroll.x + delta.x, c.scroll.y + delta.y);
            c.scroll = clamp_scroll(wanted, vec2(c.content_size.x + pad2, c.content_size.y + pad2), c.body);
        }

        if !self.updated_focus {
            self.focus = None;
        }
        self.updated_focus = false;

        if !self.input.mouse_pressed().is_none() {
            if let Some(h) = self.next_hover_root {
                let z = self.containers[h.0].zindex;
                if z < self.last_zindex && z >= 0 {
                    self.bring_to_front(h);
                }
            }
        }

        self.input.epilogue();

        let containers = &self.containers;
        self.root_list.as_mut_slice().sort_by_key(|h| containers[h.0].paint_order());
        let mut from = 0;
        for h in self.root_list.as_slice() {
            let c = &self.containers[h.0];
            if let (Some(head), Some(tail)) = (c.head, c.tail) {
                self.commands.set_jump(from, head + 1);
                from = tail;
            }
        }
        let len = self.commands.len();
        self.commands.set_jump(from, len);

        self.in_frame = false;
        tracing::trace!(frame = self.frame, commands = len, roots = self.root_list.len(), "frame end");
    }

    fn close_open_scopes(&mut self) {
        while let Some(scope) = self.container_stack.last().copied() {
            tracing::warn!(kind = ?scope.kind, "container still open at end of frame, closing it");
            match scope.kind {
                ScopeKind::Window | ScopeKind::Skipped => self.end_window(),
                ScopeKind::Panel => self.end_panel(),
            }
        }
    }

    /// Runs `f` between [`Context::begin`] and [`Context::end`].
    pub fn frame_with<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.begin();
        f(self);
        self.end();
    }

    /// Hashes `data` under the current id scope.
    pub fn get_id(&mut self, data: impl AsRef<[u8]>) -> Id { self.ids.get_id(data.as_ref()) }

    /// Id derived from the address of `value` under the current id scope.
    pub fn get_id_from_ptr<T: ?Sized>(&mut self, value: &T) -> Id { self.ids.get_id_from_ptr(value) }

    /// Most recently produced id.
    pub fn last_id(&self) -> Option<Id> { self.ids.last_id() }

    /// Opens an id scope named by `data`.
    pub fn push_id(&mut self, data: impl AsRef<[u8]>) {
        let id = self.get_id(data);
        self.ids.push_id(id).or_fatal();
    }

    /// Closes the innermost id scope.
    pub fn pop_id(&mut self) { self.ids.pop_id().or_fatal(); }

    pub(crate) fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            size: self.style.size,
            padding: self.style.padding,
            spacing: self.style.spacing,
            line_height: self.metrics.text_height(self.style.font),
        }
    }

    /// Declares the next row: one entry per column and a height.
    ///
    /// Widths: positive is pixels, `0` is the style default, negative shares the space left by
    /// the other columns. Height: positive is pixels, `0` is the style default, negative fits one
    /// line of text.
    pub fn layout_row(&mut self, widths: &[i32], height: i32) { self.layout.row(widths, height).or_fatal() }

    /// Declares a row of `items` cells reusing the previous row's widths.
    pub fn layout_row_items(&mut self, items: usize, height: i32) { self.layout.row_items(items, height).or_fatal() }

    /// Overrides the width of the next cell only.
    pub fn layout_width(&mut self, width: i32) { self.layout.set_width(width); }

    /// Overrides the height of the next cell only.
    pub fn layout_height(&mut self, height: i32) { self.layout.set_height(height); }

    /// Places the next cell at `r`, relative to the current layout body or absolute.
    pub fn layout_set_next(&mut self, r: Recti, relative: bool) { self.layout.set_next(r, relative); }

    /// Allocates the next cell.
    pub fn layout_next(&mut self) -> Recti {
        let m = self.layout_metrics();
        self.layout.next(&m).or_fatal()
    }

    /// Opens a nested column inside the next cell.
    pub fn layout_begin_column(&mut self) {
        let m = self.layout_metrics();
        self.layout.begin_column(&m).or_fatal()
    }

    /// Closes the innermost column.
    pub fn layout_end_column(&mut self) { self.layout.end_column().or_fatal() }

    /// Runs `f` inside a nested column.
    pub fn column<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.layout_begin_column();
        f(self);
        self.layout_end_column();
    }

    /// Commands only reach the renderer through an open window's run, so drawing needs one.
    pub(crate) fn draw(&mut self) -> DrawCtx<'_, M> {
        if !self.container_stack.as_slice().iter().any(|s| s.kind == ScopeKind::Window) {
            fatal(UsageError::NoContainer);
        }
        DrawCtx::new(&mut self.commands, &mut self.clip_stack, &self.style, &self.metrics)
    }

    /// Narrows the clip rectangle to its intersection with `r`.
    pub fn push_clip_rect(&mut self, r: Recti) { self.draw().push_clip_rect(r).or_fatal() }

    /// Restores the previous clip rectangle.
    pub fn pop_clip_rect(&mut self) {
        if self.clip_stack.len() <= 1 {
            fatal(UsageError::StackUnderflow { stack: StackKind::Clip });
        }
        self.draw().pop_clip_rect().or_fatal()
    }

    /// Current clip rectangle.
    pub fn get_clip_rect(&self) -> Recti { self.clip_stack.last().copied().unwrap_or(UNCLIPPED_RECT) }

    /// Classifies `r` against the current clip rectangle.
    pub fn check_clip(&self, r: Recti) -> Clip { check_clip(r, self.get_clip_rect()) }

    /// Fills `r`, clipped.
    pub fn draw_rect(&mut self, r: Recti, color: Color) { self.draw().draw_rect(r, color).or_fatal() }

    /// Outlines `r` with one pixel lines.
    pub fn draw_box(&mut self, r: Recti, color: Color) { self.draw().draw_box(r, color).or_fatal() }

    /// Draws `text` with its top-left corner at `pos`.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) { self.draw().draw_text(font, text, pos, color).or_fatal() }

    /// Draws `icon` centered in `r`.
    pub fn draw_icon(&mut self, icon: Icon, r: Recti, color: Color) { self.draw().draw_icon(icon, r, color).or_fatal() }

    /// Fills `r` with a palette color and a border where the palette asks for one.
    pub fn draw_frame(&mut self, r: Recti, colorid: ControlColor) { self.draw().draw_frame(r, colorid).or_fatal() }

    /// Draws a widget background, shaded by the hover/focus state of `id`.
    pub fn draw_control_frame(&mut self, id: Id, r: Recti, colorid: ControlColor, opt: WidgetOption) {
        let focused = self.focus == Some(id);
        let hovered = self.hover == Some(id);
        self.draw().draw_widget_frame(focused, hovered, r, colorid, opt).or_fatal()
    }

    /// Draws `text` aligned inside `r` and clipped to it.
    pub fn draw_control_text(&mut self, text: &str, r: Recti, colorid: ControlColor, opt: WidgetOption) {
        self.draw().draw_control_text(text, r, colorid, opt).or_fatal()
    }

    /// Returns `true` when the pointer is over `r`, inside the clip, and within the hovered root.
    pub fn mouse_over(&self, r: Recti) -> bool {
        let mouse = self.input.mouse_pos();
        rect_contains(r, mouse) && rect_contains(self.get_clip_rect(), mouse) && self.in_hover_root()
    }

    /// Runs the hover/focus state machine for the control `id` occupying `r`.
    #[inline(never)]
    pub fn update_control(&mut self, id: Id, r: Recti, opt: WidgetOption) -> ControlState {
        let was_focused = self.focus == Some(id);
        let mouseover = self.mouse_over(r);

        if was_focused {
            self.updated_focus = true;
        }
        if opt.is_not_interactive() {
            return ControlState::default();
        }

        let pressed = self.input.mouse_pressed();
        let down = self.input.mouse_down();
        // a held button keeps hover where the press landed; a fresh press claims it here
        if mouseover && (down.is_none() || !pressed.is_none()) {
            self.hover = Some(id);
        }

        if self.focus == Some(id) {
            if !pressed.is_none() && !mouseover {
                self.set_focus(None);
            }
            if down.is_none() && !opt.is_holding_focus() {
                self.set_focus(None);
            }
        }

        let mut double_clicked = false;
        let mut pressed_here = false;
        if self.hover == Some(id) {
            if !pressed.is_none() {
                self.set_focus(Some(id));
                pressed_here = true;
                double_clicked = match self.last_click {
                    Some((last, frame)) => last == id && self.frame - frame <= self.config.double_click_frames,
                    None => false,
                };
                self.last_click = if double_clicked { None } else { Some((id, self.frame)) };
            } else if !mouseover {
                self.hover = None;
            }
        }

        let focused = self.focus == Some(id);
        ControlState {
            hovered: self.hover == Some(id),
            focused,
            pressed: focused && pressed.is_left(),
            active: focused && down.is_left(),
            released: (was_focused || pressed_here) && mouseover && self.input.mouse_released().is_left(),
            double_clicked: double_clicked && pressed.is_left(),
        }
    }

    /// Command buffer of the last finished frame.
    pub fn commands(&self) -> &CommandBuffer { &self.commands }

    /// Returns the next command in paint order, or `None` when the frame's commands are exhausted.
    pub fn next_command(&self, cursor: &mut CommandCursor) -> Option<CommandRef<'_>> { self.commands.next_command(cursor) }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    pub(crate) fn context() -> Context<MonospaceMetrics> { Context::new(MonospaceMetrics::default()) }

    pub(crate) fn texts<M: TextMetrics>(ctx: &Context<M>) -> Vec<String> {
        ctx.commands()
            .iter()
            .filter_map(|c| match c {
                CommandRef::Text { text, .. } => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn assert_stacks_empty<M: TextMetrics>(ctx: &Context<M>) {
        assert!(ctx.container_stack.is_empty());
        assert!(ctx.clip_stack.is_empty());
        assert_eq!(ctx.ids.len(), 0);
        assert_eq!(ctx.layout.depth(), 0);
    }

    #[test]
    fn empty_frame_yields_no_commands() {
        let mut ctx = context();
        ctx.begin();
        ctx.end();
        assert_eq!(ctx.commands().len(), 1);
        assert!(ctx.next_command(&mut CommandCursor::default()).is_none());
        assert_eq!(ctx.frame(), 1);
        assert_stacks_empty(&ctx);
    }

    #[test]
    #[should_panic(expected = "frame already in progress")]
    fn begin_twice_is_a_usage_error() {
        let mut ctx = context();
        ctx.begin();
        ctx.begin();
    }

    #[test]
    #[should_panic(expected = "no frame in progress")]
    fn end_without_begin_is_a_usage_error() {
        let mut ctx = context();
        ctx.end();
    }

    #[test]
    #[should_panic(expected = "no container is open")]
    fn widget_outside_a_container_is_a_usage_error() {
        let mut ctx = context();
        ctx.begin();
        ctx.layout_next();
    }

    #[test]
    #[should_panic(expected = "id stack left unbalanced")]
    fn unbalanced_id_stack_is_detected() {
        let mut ctx = context();
        ctx.begin();
        ctx.push_id("scope");
        ctx.end();
    }

    #[test]
    #[should_panic(expected = "clip stack underflow")]
    fn popping_the_frame_clip_is_rejected() {
        let mut ctx = context();
        ctx.begin();
        ctx.pop_clip_rect();
    }

    #[test]
    fn clip_rect_narrows_and_restores() {
        let mut ctx = context();
        ctx.begin();
        assert!(ctx.begin_window("W", rect(0, 0, 200, 200), ContainerOption::NONE).unwrap());
        ctx.push_clip_rect(rect(0, 0, 50, 50));
        ctx.push_clip_rect(rect(25, 25, 50, 50));
        let c = ctx.get_clip_rect();
        assert_eq!((c.x, c.y, c.width, c.height), (25, 25, 25, 25));
        assert_eq!(ctx.check_clip(rect(30, 30, 5, 5)), Clip::None);
        assert_eq!(ctx.check_clip(rect(40, 40, 20, 20)), Clip::Part);
        assert_eq!(ctx.check_clip(rect(100, 100, 5, 5)), Clip::All);
        ctx.pop_clip_rect();
        ctx.pop_clip_rect();
        ctx.end_window();
        ctx.end();
    }

    fn xywh(r: Recti) -> (i32, i32, i32, i32) { (r.x, r.y, r.width, r.height) }

    #[test]
    fn clip_changes_are_replayed_in_order() {
        let mut ctx = context();
        let mut body = None;
        ctx.frame_with(|ctx| {
            ctx.window("W", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                body = Some(xywh(ctx.get_clip_rect()));
                ctx.push_clip_rect(rect(10, 30, 20, 20));
                ctx.draw_rect(rect(0, 0, 500, 500), Color::default());
                ctx.pop_clip_rect();
            })
            .unwrap();
        });
        let pushed = (10, 30, 20, 20);

        // replaying the clip commands leaves the pushed clip active for the fill
        let mut current = xywh(UNCLIPPED_RECT);
        let mut fills = Vec::new();
        let mut replay = Vec::new();
        for cmd in ctx.commands() {
            match cmd {
                CommandRef::Clip { rect } => {
                    current = xywh(rect);
                    replay.push(current);
                }
                CommandRef::Rect { rect, .. } if xywh(rect) == pushed => fills.push(current),
                _ => {}
            }
        }
        assert_eq!(fills, vec![pushed]);

        let at = replay.iter().position(|r| *r == pushed).unwrap();
        assert_eq!(Some(replay[at + 1]), body);
        assert_eq!(replay.last().copied(), Some(xywh(UNCLIPPED_RECT)));
    }

    #[test]
    #[should_panic(expected = "no container is open")]
    fn drawing_outside_a_window_is_a_usage_error() {
        let mut ctx = context();
        ctx.begin();
        ctx.draw_rect(rect(0, 0, 10, 10), Color::default());
    }

    #[test]
    #[should_panic(expected = "no container is open")]
    fn clipping_outside_a_window_is_a_usage_error() {
        let mut ctx = context();
        ctx.begin();
        ctx.push_clip_rect(rect(0, 0, 10, 10));
    }

    #[test]
    fn ids_differ_by_scope() {
        let mut ctx = context();
        let top = ctx.get_id("button");
        ctx.push_id("row 1");
        let scoped = ctx.get_id("button");
        ctx.pop_id();
        assert_ne!(top, scoped);
        assert_eq!(ctx.last_id(), Some(scoped));
        assert_eq!(ctx.get_id("button"), top);
    }

    #[test]
    fn lossy_text_input() {
        let mut ctx = context();
        ctx.input_text_bytes(b"a\xffb");
        assert_eq!(ctx.input().text_input(), "a\u{fffd}b");
    }

    #[test]
    fn focus_is_dropped_unless_refreshed() {
        let mut ctx = context();
        let id = ctx.get_id("x");
        ctx.begin();
        ctx.set_focus(Some(id));
        ctx.end();
        assert_eq!(ctx.focus_id(), Some(id));
        ctx.begin();
        ctx.end();
        assert_eq!(ctx.focus_id(), None);
    }

    fn depths<M: TextMetrics>(ctx: &Context<M>) -> (usize, usize, usize, usize) {
        (ctx.container_stack.len(), ctx.clip_stack.len(), ctx.ids.len(), ctx.layout.depth())
    }

    /// Emits a random tree of paired scopes and checks that each pair restores every stack.
    fn random_scopes(ctx: &mut Context<MonospaceMetrics>, rng: &mut StdRng, depth: u32) {
        for i in 0..rng.random_range(1..3) {
            let before = depths(ctx);
            let name = format!("scope {depth}.{i}");
            match rng.random_range(0..5) {
                0 => {
                    ctx.push_id(&name);
                    ctx.label(&name);
                    if depth > 0 {
                        random_scopes(ctx, rng, depth - 1);
                    }
                    ctx.pop_id();
                }
                1 => {
                    let (x, y) = (rng.random_range(0..200), rng.random_range(0..200));
                    ctx.push_clip_rect(rect(x, y, 80, 80));
                    if depth > 0 {
                        random_scopes(ctx, rng, depth - 1);
                    }
                    ctx.pop_clip_rect();
                }
                2 => ctx.column(|ctx| {
                    if depth > 0 {
                        random_scopes(ctx, rng, depth - 1);
                    }
                }),
                3 => ctx.panel(&name, ContainerOption::NONE, |ctx| {
                    if depth > 0 {
                        random_scopes(ctx, rng, depth - 1);
                    }
                }),
                _ => {
                    ctx.window(&name, rect(300, 300, 120, 120), ContainerOption::NONE, |ctx| {
                        if depth > 0 {
                            random_scopes(ctx, rng, depth - 1);
                        }
                    })
                    .unwrap();
                }
            }
            assert_eq!(depths(ctx), before);
        }
    }

    #[test]
    fn random_scope_sequences_stay_balanced() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            ctx.begin();
            let before = depths(&ctx);
            ctx.window("Root", rect(0, 0, 400, 400), ContainerOption::NONE, |ctx| random_scopes(ctx, &mut rng, 3)).unwrap();
            assert_eq!(depths(&ctx), before);
            ctx.end();
            assert_stacks_empty(&ctx);
        }
    }
}
