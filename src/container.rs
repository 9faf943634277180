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
use crate::error::{fatal, OrFatal, StackKind, UsageError};
use crate::id::Id;
use crate::scrollbar::{drag_to_scroll, max_scroll, thumb_rect, track_rect, ScrollAxis};
use crate::*;
use std::cmp::max;

/// Retained state of a window, popup or panel. Lives in the context's container pool and survives
/// across frames for as long as it keeps being referenced.
#[derive(Copy, Clone, Debug, Default)]
pub struct Container {
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    /// Head jump of the run being recorded; differs from `head` when reopened in the same frame.
    pub(crate) run_head: Option<usize>,
    /// Outer rectangle, title bar and frame included.
    pub rect: Recti,
    /// Area left for content once the title bar and scrollbars are taken out.
    pub body: Recti,
    /// Extent of the content laid out during the previous frame.
    pub content_size: Vec2i,
    /// Scroll offset of the content.
    pub scroll: Vec2i,
    /// Paint order among root containers; higher is drawn later.
    pub zindex: i32,
    /// Whether the container is shown.
    pub open: bool,
    pub(crate) popup: bool,
}

impl Container {
    /// Popups always paint above windows; within each group the z-index decides.
    pub(crate) fn paint_order(&self) -> (bool, i32) { (self.popup, self.zindex) }

    /// Returns `true` for containers opened as popups.
    pub fn is_popup(&self) -> bool { self.popup }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Stable reference to a pooled [`Container`]. Valid until the container is evicted from the pool.
pub struct ContainerHandle(pub(crate) usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    Window,
    Panel,
    /// A closed window: only its id scope is open.
    Skipped,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct ContainerScope {
    pub handle: Option<ContainerHandle>,
    pub kind: ScopeKind,
}

fn validate_container(widget: &'static str, title: &str, r: Recti) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle { widget });
    }
    if r.width < 0 || r.height < 0 {
        return Err(ValidationError::NegativeSize { widget, width: r.width, height: r.height });
    }
    Ok(())
}

const MIN_WINDOW_WIDTH: i32 = 96;
const MIN_WINDOW_HEIGHT: i32 = 64;

impl<M: TextMetrics> Context<M> {
    /// Read access to a container.
    pub fn container(&self, h: ContainerHandle) -> &Container { &self.containers[h.0] }

    /// Write access to a container, e.g. to move or reopen a window.
    pub fn container_mut(&mut self, h: ContainerHandle) -> &mut Container { &mut self.containers[h.0] }

    /// Innermost open container.
    pub fn current_container(&self) -> Option<ContainerHandle> { self.container_stack.last().and_then(|s| s.handle) }

    /// Looks up the container named `name` in the current id scope, creating it if needed.
    pub fn get_container(&mut self, name: &str) -> ContainerHandle {
        self.ensure_frame();
        let id = self.get_id(name);
        self.claim_container(id)
    }

    /// Raises a root container above every other one.
    pub fn bring_to_front(&mut self, h: ContainerHandle) {
        self.last_zindex += 1;
        self.containers[h.0].zindex = self.last_zindex;
        tracing::debug!(slot = h.0, zindex = self.last_zindex, "container brought to front");
    }

    /// Pooled container for `id`. Closed containers that were never opened are not created.
    fn container_by_id(&mut self, id: Id, opt: ContainerOption) -> Option<ContainerHandle> {
        if let Some(slot) = self.container_pool.get(id) {
            if self.containers[slot].open || !opt.is_closed() {
                self.container_pool.update(slot, self.frame);
            }
            return Some(ContainerHandle(slot));
        }
        if opt.is_closed() {
            return None;
        }
        Some(self.init_container(id))
    }

    fn claim_container(&mut self, id: Id) -> ContainerHandle {
        match self.container_pool.get(id) {
            Some(slot) => {
                self.container_pool.update(slot, self.frame);
                ContainerHandle(slot)
            }
            None => self.init_container(id),
        }
    }

    fn init_container(&mut self, id: Id) -> ContainerHandle {
        let h = ContainerHandle(self.container_pool.init(id, self.frame).or_fatal());
        for slot in [&mut self.hover_root, &mut self.next_hover_root, &mut self.scroll_target] {
            if *slot == Some(h) {
                *slot = None;
            }
        }
        self.containers[h.0] = Container { open: true, ..Container::default() };
        self.bring_to_front(h);
        h
    }

    pub(crate) fn in_hover_root(&self) -> bool {
        for scope in self.container_stack.as_slice().iter().rev() {
            if scope.handle.is_some() && scope.handle == self.hover_root {
                return true;
            }
            // only root containers are hover candidates, stop at the first one
            if scope.kind == ScopeKind::Window {
                break;
            }
        }
        false
    }

    fn begin_root_container(&mut self, h: ContainerHandle) {
        self.container_stack.push(ContainerScope { handle: Some(h), kind: ScopeKind::Window }).or_fatal();
        let reopened = self.root_list.as_slice().contains(&h);
        if !reopened {
            self.root_list.push(h).or_fatal();
        }
        let head = self.commands.push_jump().or_fatal();
        let c = &mut self.containers[h.0];
        match (reopened, c.tail) {
            // chain the new run after the previous one so the container keeps a single slice
            (true, Some(prev_tail)) => self.commands.set_jump(prev_tail, head + 1),
            _ => c.head = Some(head),
        }
        c.run_head = Some(head);
        c.tail = None;
        let (outer, order) = (c.rect, c.paint_order());
        if rect_contains(outer, self.input.mouse_pos()) && self.next_hover_root.is_none_or(|n| order > self.containers[n.0].paint_order()) {
            self.next_hover_root = Some(h);
        }
        // root containers start from an unclipped state, not from their parent's clip
        self.clip_stack.push(UNCLIPPED_RECT).or_fatal();
        tracing::trace!(slot = h.0, head, reopened, "root container begin");
    }

    fn end_root_container(&mut self, h: ContainerHandle) {
        let tail = self.commands.push_jump().or_fatal();
        let c = &mut self.containers[h.0];
        c.tail = Some(tail);
        if let Some(head) = c.run_head.take() {
            self.commands.set_jump(head, tail + 1);
        }
        self.clip_stack.pop().or_fatal();
        self.pop_container();
    }

    fn pop_container(&mut self) {
        let scope = self.container_stack.pop().or_fatal();
        let content = self.layout.pop_layout().or_fatal();
        if let Some(h) = scope.handle {
            self.containers[h.0].content_size = content;
        }
        self.ids.pop_id().or_fatal();
    }

    fn push_container_body(&mut self, h: ContainerHandle, body: Recti, opt: ContainerOption) {
        let mut body = body;
        if !opt.has_no_scroll() {
            self.scrollbars(h, &mut body);
        }
        let scroll = self.containers[h.0].scroll;
        self.layout.push_layout(expand_rect(body, -self.style.padding), scroll).or_fatal();
        self.containers[h.0].body = body;
    }

    fn scrollbars(&mut self, h: ContainerHandle, body: &mut Recti) {
        let size = self.style.scrollbar_size;
        let pad2 = self.style.padding * 2;
        let c = self.containers[h.0];
        let content = vec2(c.content_size.x + pad2, c.content_size.y + pad2);
        // the tracks are carved out of the body but stay inside its clip
        self.push_clip_rect(*body);
        if content.y > c.body.height {
            body.width -= size;
        }
        if content.x > c.body.width {
            body.height -= size;
        }
        for axis in ScrollAxis::BOTH {
            self.scrollbar(h, *body, content, axis);
        }
        self.pop_clip_rect();
    }

    fn scrollbar(&mut self, h: ContainerHandle, body: Recti, content: Vec2i, axis: ScrollAxis) {
        let content_len = axis.of(content);
        let view_len = axis.len(body);
        let limit = max_scroll(content_len, view_len);
        let scroll = self.containers[h.0].scroll;
        if limit == 0 || view_len <= 0 {
            self.containers[h.0].scroll = axis.with(scroll, 0);
            return;
        }

        let id = self.get_id(axis.id_label());
        let track = track_rect(axis, body, self.style.scrollbar_size);
        let control = self.update_control(id, track, WidgetOption::NONE);
        let mut offset = axis.of(scroll);
        if control.active {
            offset += drag_to_scroll(axis, self.input.mouse_delta(), content_len, track);
        }
        offset = clamp(offset, 0, limit);
        self.containers[h.0].scroll = axis.with(scroll, offset);

        self.draw_frame(track, ControlColor::ScrollBase);
        let thumb = thumb_rect(axis, track, view_len, content_len, offset, self.style.thumb_size);
        self.draw_frame(thumb, ControlColor::ScrollThumb);

        if self.mouse_over(body) {
            self.scroll_target = Some(h);
        }
    }

    /// Opens a window named `title`.
    ///
    /// `r` only seeds the rectangle the first time the window is seen; afterwards the retained
    /// geometry wins. Returns `Ok(true)` when the window is open and its content should be
    /// submitted. On any `Ok` the caller must close the scope with [`Context::end_window`], even
    /// when the window is closed. On `Err` nothing was opened.
    #[inline(never)]
    pub fn begin_window(&mut self, title: &str, r: Recti, opt: ContainerOption) -> Result<bool, ValidationError> {
        validate_container(if opt.is_popup() { "popup" } else { "window" }, title, r).inspect_err(|err| tracing::warn!(%err, "window rejected"))?;
        self.ensure_frame();
        let id = self.get_id(title);
        let handle = self.container_by_id(id, opt);
        self.ids.push_id(id).or_fatal();
        let h = match handle {
            Some(h) if self.containers[h.0].open => h,
            _ => {
                self.container_stack.push(ContainerScope { handle, kind: ScopeKind::Skipped }).or_fatal();
                return Ok(false);
            }
        };

        {
            let c = &mut self.containers[h.0];
            c.popup = opt.is_popup();
            if c.rect.width == 0 {
                c.rect = r;
            }
        }
        self.begin_root_container(h);
        let outer = self.containers[h.0].rect;
        let mut body = outer;
        let chrome = opt.chrome_option();

        if !opt.has_no_frame() {
            self.draw_frame(outer, ControlColor::WindowBG);
        }

        if !opt.has_no_title() {
            let mut title_rect = outer;
            title_rect.height = self.style.title_height;
            self.draw_frame(title_rect, ControlColor::TitleBG);

            let title_id = self.get_id("!title");
            let control = self.update_control(title_id, title_rect, chrome);
            self.draw_control_text(title, title_rect, ControlColor::TitleText, WidgetOption::NONE);
            if control.active {
                let delta = self.input.mouse_delta();
                let c = &mut self.containers[h.0];
                c.rect.x += delta.x;
                c.rect.y += delta.y;
            }
            body.y += title_rect.height;
            body.height -= title_rect.height;

            if !opt.has_no_close() {
                let close_id = self.get_id("!close");
                let close_rect = rect(title_rect.x + title_rect.width - title_rect.height, title_rect.y, title_rect.height, title_rect.height);
                let color = self.style.color(ControlColor::TitleText);
                self.draw_icon(Icon::Close, close_rect, color);
                let control = self.update_control(close_id, close_rect, chrome);
                if control.released {
                    self.containers[h.0].open = false;
                    tracing::debug!(window = title, "window closed");
                }
            }
        }

        self.push_container_body(h, body, opt);

        if !opt.is_fixed() {
            let size = self.style.title_height;
            let resize_id = self.get_id("!resize");
            let handle_rect = rect(outer.x + outer.width - size, outer.y + outer.height - size, size, size);
            let control = self.update_control(resize_id, handle_rect, chrome);
            if control.active {
                let delta = self.input.mouse_delta();
                let c = &mut self.containers[h.0];
                c.rect.width = max(MIN_WINDOW_WIDTH, c.rect.width + delta.x);
                c.rect.height = max(MIN_WINDOW_HEIGHT, c.rect.height + delta.y);
            }
        }

        if opt.is_auto_sizing() {
            let pad2 = self.style.padding * 2;
            let c = &mut self.containers[h.0];
            c.rect.width = c.content_size.x + (c.rect.width - (c.body.width - pad2));
            c.rect.height = c.content_size.y + (c.rect.height - (c.body.height - pad2));
        }

        if opt.is_popup() && !self.input.mouse_pressed().is_none() && self.hover_root != Some(h) {
            self.containers[h.0].open = false;
            tracing::debug!(popup = title, "popup dismissed by outside click");
        }

        let body = self.containers[h.0].body;
        self.push_clip_rect(body);
        Ok(true)
    }

    /// Closes the scope opened by [`Context::begin_window`].
    pub fn end_window(&mut self) { self.end_window_scope("window") }

    fn end_window_scope(&mut self, expected: &'static str) {
        let scope = match self.container_stack.last().copied() {
            Some(scope) => scope,
            None => fatal(UsageError::StackUnderflow { stack: StackKind::Container }),
        };
        match (scope.kind, scope.handle) {
            (ScopeKind::Window, Some(h)) => {
                self.pop_clip_rect();
                self.end_root_container(h);
            }
            (ScopeKind::Skipped, _) => {
                self.container_stack.pop().or_fatal();
                self.ids.pop_id().or_fatal();
            }
            _ => fatal(UsageError::MismatchedEnd { expected }),
        }
    }

    /// Opens a window, runs `f` for its content when it is open, then closes it.
    pub fn window<F: FnOnce(&mut Self)>(&mut self, title: &str, r: Recti, opt: ContainerOption, f: F) -> Result<bool, ValidationError> {
        let open = self.begin_window(title, r, opt)?;
        if open {
            f(self);
        }
        self.end_window();
        Ok(open)
    }

    /// Shows the popup `name` at the pointer and raises it.
    pub fn open_popup(&mut self, name: &str) {
        let h = self.get_container(name);
        self.hover_root = Some(h);
        self.next_hover_root = Some(h);
        let mouse = self.input.mouse_pos();
        let c = &mut self.containers[h.0];
        c.rect = rect(mouse.x, mouse.y, 1, 1);
        c.open = true;
        c.popup = true;
        self.bring_to_front(h);
        tracing::debug!(popup = name, x = mouse.x, y = mouse.y, "popup opened");
    }

    /// Opens the popup scope `name`. Same pairing rules as [`Context::begin_window`], closed with
    /// [`Context::end_popup`].
    pub fn begin_popup(&mut self, name: &str) -> Result<bool, ValidationError> {
        let opt = ContainerOption::POPUP
            | ContainerOption::AUTO_SIZE
            | ContainerOption::NO_RESIZE
            | ContainerOption::NO_SCROLL
            | ContainerOption::NO_TITLE
            | ContainerOption::CLOSED;
        self.begin_window(name, rect(0, 0, 0, 0), opt)
    }

    /// Closes the scope opened by [`Context::begin_popup`].
    pub fn end_popup(&mut self) { self.end_window_scope("popup") }

    /// Runs `f` inside the popup `name` when it is open.
    pub fn popup<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) -> Result<bool, ValidationError> {
        let open = self.begin_popup(name)?;
        if open {
            f(self);
        }
        self.end_popup();
        Ok(open)
    }

    /// Opens a scrollable, clipped region occupying the next layout cell.
    #[inline(never)]
    pub fn begin_panel(&mut self, name: &str, opt: ContainerOption) {
        self.ensure_frame();
        let id = self.get_id(name);
        self.ids.push_id(id).or_fatal();
        let h = self.claim_container(id);
        let r = self.layout_next();
        self.containers[h.0].rect = r;
        if !opt.has_no_frame() {
            self.draw_frame(r, ControlColor::PanelBG);
        }
        self.container_stack.push(ContainerScope { handle: Some(h), kind: ScopeKind::Panel }).or_fatal();
        self.push_container_body(h, r, opt);
        let body = self.containers[h.0].body;
        self.push_clip_rect(body);
    }

    /// Closes the scope opened by [`Context::begin_panel`].
    pub fn end_panel(&mut self) {
        match self.container_stack.last() {
            Some(scope) if scope.kind == ScopeKind::Panel => {}
            Some(_) => fatal(UsageError::MismatchedEnd { expected: "panel" }),
            None => fatal(UsageError::StackUnderflow { stack: StackKind::Container }),
        }
        self.pop_clip_rect();
        self.pop_container();
    }

    /// Runs `f` inside the panel `name`.
    pub fn panel<F: FnOnce(&mut Self)>(&mut self, name: &str, opt: ContainerOption, f: F) {
        self.begin_panel(name, opt);
        f(self);
        self.end_panel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::{assert_stacks_empty, context, texts};

    fn labelled_window<M: TextMetrics>(ctx: &mut Context<M>, title: &str, r: Recti, text: &str) {
        ctx.window(title, r, ContainerOption::NONE, |ctx| ctx.label(text)).unwrap();
    }

    #[test]
    fn window_scope_leaves_stacks_balanced() {
        let mut ctx = context();
        ctx.begin();
        assert!(ctx.begin_window("Main", rect(10, 10, 200, 150), ContainerOption::NONE).unwrap());
        assert!(ctx.current_container().is_some());
        ctx.layout_row(&[-1], 0);
        ctx.label("hello");
        ctx.end_window();
        ctx.end();
        assert_stacks_empty(&ctx);
        assert_eq!(ctx.root_list.len(), 1);
        assert_eq!(texts(&ctx), vec!["Main", "hello"]);
    }

    #[test]
    fn empty_title_is_rejected_without_side_effects() {
        let mut ctx = context();
        ctx.begin();
        let before = ctx.commands().len();
        assert_eq!(ctx.begin_window("", rect(0, 0, 10, 10), ContainerOption::NONE), Err(ValidationError::EmptyTitle { widget: "window" }));
        assert_eq!(
            ctx.begin_window("W", rect(0, 0, -1, 10), ContainerOption::NONE),
            Err(ValidationError::NegativeSize { widget: "window", width: -1, height: 10 })
        );
        assert!(ctx.container_stack.is_empty());
        assert_eq!(ctx.ids.len(), 0);
        assert_eq!(ctx.commands().len(), before);
        ctx.end();
    }

    #[test]
    fn paint_order_follows_zindex_not_submission() {
        let mut ctx = context();
        let a = rect(0, 0, 100, 100);
        let b = rect(200, 0, 100, 100);
        ctx.frame_with(|ctx| {
            labelled_window(ctx, "A", a, "in a");
            labelled_window(ctx, "B", b, "in b");
        });
        assert_eq!(texts(&ctx), vec!["A", "in a", "B", "in b"]);

        // submission order alone does not change painting
        ctx.frame_with(|ctx| {
            labelled_window(ctx, "B", b, "in b");
            labelled_window(ctx, "A", a, "in a");
        });
        assert_eq!(texts(&ctx), vec!["A", "in a", "B", "in b"]);

        ctx.begin();
        let h = ctx.get_container("A");
        ctx.bring_to_front(h);
        labelled_window(&mut ctx, "B", b, "in b");
        labelled_window(&mut ctx, "A", a, "in a");
        ctx.end();
        assert_eq!(texts(&ctx), vec!["B", "in b", "A", "in a"]);
    }

    #[test]
    fn every_root_is_traversed_exactly_once() {
        let mut ctx = context();
        ctx.frame_with(|ctx| {
            for i in 0..5 {
                let title = format!("w{i}");
                labelled_window(ctx, &title, rect(i * 10, i * 10, 100, 100), &format!("body {i}"));
            }
        });
        let seen = texts(&ctx);
        assert_eq!(seen.len(), 10);
        for i in 0..5 {
            assert_eq!(seen.iter().filter(|t| **t == format!("body {i}")).count(), 1);
        }
    }

    #[test]
    fn nested_window_commands_are_not_clipped_by_parent() {
        let mut ctx = context();
        ctx.frame_with(|ctx| {
            ctx.window("Outer", rect(0, 0, 100, 100), ContainerOption::NONE, |ctx| {
                labelled_window(ctx, "Inner", rect(300, 300, 100, 100), "deep");
            })
            .unwrap();
        });
        assert!(texts(&ctx).contains(&"deep".to_string()));
        assert_stacks_empty(&ctx);
    }

    #[test]
    fn hover_follows_the_topmost_window_and_clicks_raise() {
        let mut ctx = context();
        let ids = std::cell::Cell::new((None, None));
        let run = |ctx: &mut Context<MonospaceMetrics>| {
            ctx.frame_with(|ctx| {
                ctx.window("A", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                    ctx.layout_row(&[-1], 150);
                    ctx.button("a");
                    ids.set((ctx.last_id(), ids.get().1));
                })
                .unwrap();
                ctx.window("B", rect(100, 100, 200, 200), ContainerOption::NONE, |ctx| {
                    ctx.layout_row(&[-1], 150);
                    ctx.button("b");
                    ids.set((ids.get().0, ctx.last_id()));
                })
                .unwrap();
            })
        };

        ctx.input_mousemove(150, 150);
        run(&mut ctx);
        run(&mut ctx);
        let (id_a, id_b) = ids.get();
        assert_eq!(ctx.hover_id(), id_b);

        ctx.input_mousedown(50, 50, MouseButton::LEFT);
        run(&mut ctx);
        ctx.input_mouseup(50, 50, MouseButton::LEFT);
        run(&mut ctx);
        let a = ctx.container_pool.get(ctx.ids.get_id(b"A")).unwrap();
        let b = ctx.container_pool.get(ctx.ids.get_id(b"B")).unwrap();
        assert!(ctx.containers[a].zindex > ctx.containers[b].zindex);

        ctx.input_mousemove(150, 150);
        run(&mut ctx);
        run(&mut ctx);
        assert_eq!(ctx.hover_id(), id_a);
    }

    #[test]
    fn closed_window_keeps_scope_balanced() {
        let mut ctx = context();
        ctx.frame_with(|ctx| {
            let h = ctx.get_container("Tools");
            ctx.container_mut(h).open = false;
            assert_eq!(ctx.begin_window("Tools", rect(0, 0, 100, 100), ContainerOption::NONE), Ok(false));
            ctx.end_window();
        });
        assert_stacks_empty(&ctx);
        assert!(ctx.root_list.is_empty());
        assert!(ctx.next_command(&mut CommandCursor::default()).is_none());
    }

    #[test]
    fn close_button_acts_on_release() {
        let mut ctx = context();
        let r = rect(0, 0, 200, 150);
        let frame = |ctx: &mut Context<MonospaceMetrics>| {
            let mut open = false;
            ctx.frame_with(|ctx| open = ctx.window("W", r, ContainerOption::NONE, |_| {}).unwrap());
            open
        };
        ctx.input_mousemove(188, 12);
        assert!(frame(&mut ctx));
        assert!(frame(&mut ctx));
        ctx.input_mousedown(188, 12, MouseButton::LEFT);
        assert!(frame(&mut ctx));
        let h = ContainerHandle(ctx.container_pool.get(ctx.ids.get_id(b"W")).unwrap());
        assert!(ctx.container(h).open);
        ctx.input_mouseup(188, 12, MouseButton::LEFT);
        assert!(frame(&mut ctx));
        assert!(!ctx.container(h).open);
        assert!(!frame(&mut ctx));
    }

    #[test]
    fn title_drag_moves_the_window() {
        let mut ctx = context();
        let frame = |ctx: &mut Context<MonospaceMetrics>| {
            ctx.frame_with(|ctx| {
                ctx.window("Drag", rect(10, 10, 200, 150), ContainerOption::NONE, |_| {}).unwrap();
            })
        };
        ctx.input_mousemove(50, 20);
        frame(&mut ctx);
        frame(&mut ctx);
        ctx.input_mousedown(50, 20, MouseButton::LEFT);
        frame(&mut ctx);
        ctx.input_mousemove(80, 40);
        frame(&mut ctx);
        let h = ContainerHandle(ctx.container_pool.get(ctx.ids.get_id(b"Drag")).unwrap());
        let r = ctx.container(h).rect;
        assert_eq!((r.x, r.y, r.width, r.height), (40, 30, 200, 150));
    }

    #[test]
    fn resize_handle_respects_minimum_size() {
        let mut ctx = context();
        let frame = |ctx: &mut Context<MonospaceMetrics>| {
            ctx.frame_with(|ctx| {
                ctx.window("Grow", rect(0, 0, 200, 150), ContainerOption::NONE, |_| {}).unwrap();
            })
        };
        ctx.input_mousemove(190, 140);
        frame(&mut ctx);
        frame(&mut ctx);
        ctx.input_mousedown(190, 140, MouseButton::LEFT);
        frame(&mut ctx);
        ctx.input_mousemove(0, 0);
        frame(&mut ctx);
        let h = ContainerHandle(ctx.container_pool.get(ctx.ids.get_id(b"Grow")).unwrap());
        let r = ctx.container(h).rect;
        assert_eq!((r.width, r.height), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn wheel_scroll_is_clamped_to_content() {
        let mut ctx = context();
        let frame = |ctx: &mut Context<MonospaceMetrics>| {
            ctx.frame_with(|ctx| {
                ctx.window("List", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                    ctx.layout_row(&[-1], 0);
                    for i in 0..50 {
                        ctx.label(&format!("row {i}"));
                    }
                })
                .unwrap();
            })
        };
        ctx.input_mousemove(100, 100);
        frame(&mut ctx);
        frame(&mut ctx);
        ctx.input_scroll(0, 100_000);
        frame(&mut ctx);
        let h = ContainerHandle(ctx.container_pool.get(ctx.ids.get_id(b"List")).unwrap());
        let c = *ctx.container(h);
        let limit = c.content_size.y + ctx.style().padding * 2 - c.body.height;
        assert!(limit > 0);
        assert_eq!(c.scroll.y, limit);

        ctx.input_scroll(0, -1_000_000);
        frame(&mut ctx);
        assert_eq!(ctx.container(h).scroll.y, 0);
    }

    #[test]
    fn popup_closes_on_outside_press() {
        let mut ctx = context();
        let frame = |ctx: &mut Context<MonospaceMetrics>, open: bool| {
            let mut shown = false;
            ctx.frame_with(|ctx| {
                ctx.window("W", rect(0, 0, 300, 300), ContainerOption::NONE, |ctx| {
                    if open {
                        ctx.open_popup("menu");
                    }
                    shown = ctx
                        .popup("menu", |ctx| {
                            ctx.layout_row(&[100], 0);
                            ctx.label("item");
                        })
                        .unwrap();
                })
                .unwrap();
            });
            shown
        };
        ctx.input_mousemove(50, 50);
        assert!(frame(&mut ctx, true));
        assert!(frame(&mut ctx, false));
        assert_eq!(texts(&ctx).last().map(String::as_str), Some("item"));

        ctx.input_mousemove(250, 250);
        assert!(frame(&mut ctx, false));
        ctx.input_mousedown(250, 250, MouseButton::LEFT);
        frame(&mut ctx, false);
        ctx.input_mouseup(250, 250, MouseButton::LEFT);
        assert!(!frame(&mut ctx, false));
        assert_stacks_empty(&ctx);
    }

    #[test]
    fn panel_clips_and_scrolls_its_content() {
        let mut ctx = context();
        let mut panel = None;
        for _ in 0..2 {
            ctx.frame_with(|ctx| {
                ctx.window("Host", rect(0, 0, 300, 300), ContainerOption::NONE, |ctx| {
                    ctx.layout_row(&[-1], 100);
                    ctx.panel("inner", ContainerOption::NONE, |ctx| {
                        panel = ctx.current_container();
                        ctx.layout_row(&[-1], 0);
                        for i in 0..20 {
                            ctx.label(&format!("line {i}"));
                        }
                    });
                })
                .unwrap();
            });
        }
        let c = *ctx.container(panel.unwrap());
        assert!(c.content_size.y > c.body.height);
        // vertical scrollbar takes its width out of the body
        assert_eq!(c.body.width, c.rect.width - ctx.style().scrollbar_size);
        assert_stacks_empty(&ctx);
    }

    #[test]
    fn auto_size_fits_content() {
        let mut ctx = context();
        for _ in 0..2 {
            ctx.frame_with(|ctx| {
                ctx.window("Fit", rect(0, 0, 50, 50), ContainerOption::AUTO_SIZE | ContainerOption::NO_RESIZE | ContainerOption::NO_SCROLL, |ctx| {
                    ctx.layout_row(&[120], 30);
                    ctx.label("x");
                })
                .unwrap();
            });
        }
        let h = ContainerHandle(ctx.container_pool.get(ctx.ids.get_id(b"Fit")).unwrap());
        let c = *ctx.container(h);
        let pad = ctx.style().padding;
        assert_eq!(c.rect.width, 120 + pad * 2);
        assert_eq!(c.rect.height, 30 + pad * 2 + ctx.style().title_height);
    }

    #[test]
    fn unclosed_window_is_closed_at_end() {
        let mut ctx = context();
        ctx.begin();
        ctx.begin_window("Left open", rect(0, 0, 100, 100), ContainerOption::NONE).unwrap();
        ctx.end();
        assert_stacks_empty(&ctx);
        assert_eq!(texts(&ctx), vec!["Left open"]);
    }

    #[test]
    fn window_reopened_in_one_frame_keeps_both_runs() {
        let mut ctx = context();
        ctx.frame_with(|ctx| {
            labelled_window(ctx, "W", rect(0, 0, 100, 100), "first");
            labelled_window(ctx, "Other", rect(200, 0, 100, 100), "elsewhere");
            labelled_window(ctx, "W", rect(0, 0, 100, 100), "second");
        });
        assert_eq!(ctx.root_list.len(), 2);
        assert_eq!(texts(&ctx), vec!["W", "first", "W", "second", "Other", "elsewhere"]);
        assert_stacks_empty(&ctx);
    }

    #[test]
    #[should_panic(expected = "end_panel does not match")]
    fn mismatched_end_is_a_usage_error() {
        let mut ctx = context();
        ctx.begin();
        ctx.begin_window("W", rect(0, 0, 100, 100), ContainerOption::NONE).unwrap();
        ctx.end_panel();
    }

    #[test]
    fn least_recently_used_container_is_evicted() {
        let config = ContextConfig { container_pool_size: 3, ..ContextConfig::default() };
        let mut ctx = Context::with_config(MonospaceMetrics::default(), config);
        for i in 0..4 {
            ctx.frame_with(|ctx| labelled_window(ctx, &format!("w{i}"), rect(0, 0, 100, 100), "x"));
        }
        assert!(ctx.container_pool.get(ctx.ids.get_id(b"w0")).is_none());
        for i in 1..4 {
            assert!(ctx.container_pool.get(ctx.ids.get_id(format!("w{i}").as_bytes())).is_some());
        }
    }

    #[test]
    fn container_used_every_frame_is_never_evicted() {
        let config = ContextConfig { container_pool_size: 3, ..ContextConfig::default() };
        let mut ctx = Context::with_config(MonospaceMetrics::default(), config);
        for i in 0..20 {
            ctx.frame_with(|ctx| {
                labelled_window(ctx, "keep", rect(0, 0, 100, 100), "k");
                labelled_window(ctx, &format!("churn {i}"), rect(0, 0, 100, 100), "c");
            });
        }
        assert!(ctx.container_pool.get(ctx.ids.get_id(b"keep")).is_some());
    }

    #[test]
    #[should_panic(expected = "container pool exhausted")]
    fn too_many_live_containers_exhaust_the_pool() {
        let config = ContextConfig { container_pool_size: 2, ..ContextConfig::default() };
        let mut ctx = Context::with_config(MonospaceMetrics::default(), config);
        ctx.frame_with(|ctx| {
            for i in 0..3 {
                labelled_window(ctx, &format!("w{i}"), rect(0, 0, 100, 100), "x");
            }
        });
    }

    #[test]
    #[should_panic(expected = "command buffer full")]
    fn command_overflow_is_a_usage_error() {
        let config = ContextConfig { command_capacity: 8, ..ContextConfig::default() };
        let mut ctx = Context::with_config(MonospaceMetrics::default(), config);
        ctx.frame_with(|ctx| labelled_window(ctx, "W", rect(0, 0, 100, 100), "x"));
    }
}
