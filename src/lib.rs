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
#![deny(missing_docs)]
//! `microui-engine` is the frame-state core of an immediate-mode GUI in the spirit of
//! [rxi/microui](https://github.com/rxi/microui).
//!
//! Each frame the host feeds raw input into a [`Context`], calls [`Context::begin`], describes its
//! windows and widgets, then calls [`Context::end`]. The context keeps a small amount of retained
//! state (container geometry, focus and hover ids, expanded tree nodes) and produces a flat,
//! z-ordered command stream that any renderer can walk with [`Context::next_command`].
//! Text measurement is delegated to a host supplied [`TextMetrics`] implementation; the crate never
//! rasterizes anything itself.

mod command;
mod container;
mod context;
mod error;
mod geometry;
mod id;
mod layout;
mod pool;
mod scrollbar;
mod stack;
mod widgets;

pub use command::{CommandBuffer, CommandCursor, CommandRef, Commands, Icon};
pub use container::{Container, ContainerHandle};
pub use context::Context;
pub use error::{PoolKind, StackKind, UsageError, ValidationError};
pub use geometry::*;
pub use id::Id;
pub use rs_math3d::{Recti, Vec2i};
pub use widgets::*;

use bitflags::*;

/// Floating-point type used by widgets and layout calculations.
pub type Real = f32;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u32)]
/// Describes whether a rectangle is clipped by the current scissor.
pub enum Clip {
    /// Rectangle is fully visible.
    None = 0,
    /// Rectangle is partially visible.
    Part = 1,
    /// Rectangle is fully clipped away.
    All = 2,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Default text color.
    Text = 0,
    /// Outline/border color.
    Border = 1,
    /// Window background color.
    WindowBG = 2,
    /// Window title background color.
    TitleBG = 3,
    /// Window title text color.
    TitleText = 4,
    /// Panel background color.
    PanelBG = 5,
    /// Default button color.
    Button = 6,
    /// Button color while the pointer hovers the widget.
    ButtonHover = 7,
    /// Button color while the widget is focused.
    ButtonFocus = 8,
    /// Default base color.
    Base = 9,
    /// Base color while the pointer hovers the widget.
    BaseHover = 10,
    /// Base color for focused widgets.
    BaseFocus = 11,
    /// Base frame of scrollbars.
    ScrollBase = 12,
    /// Thumb of scrollbars.
    ScrollThumb = 13,
}

/// Number of entries in [`Style::colors`].
pub const COLOR_COUNT: usize = 14;

impl ControlColor {
    /// Returns the hover variant of a base or button color.
    pub fn hover(self) -> Self {
        match self {
            Self::Base => Self::BaseHover,
            Self::Button => Self::ButtonHover,
            _ => self,
        }
    }

    /// Returns the focused variant of a base or button color.
    pub fn focus(self) -> Self {
        match self {
            Self::Base | Self::BaseHover => Self::BaseFocus,
            Self::Button | Self::ButtonHover => Self::ButtonFocus,
            _ => self,
        }
    }

    /// Palette slot of this color.
    pub fn index(self) -> usize { self as usize }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// State bits returned by widgets to describe their interaction outcome.
    pub struct ResourceState : u32 {
        /// Indicates that the widget's data changed.
        const CHANGE = 4;
        /// Indicates that the widget was submitted (e.g. button clicked).
        const SUBMIT = 2;
        /// Indicates that the widget is currently active.
        const ACTIVE = 1;
        /// Indicates no interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Returns `true` if the widget changed its bound value.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the widget signaled submission.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if the widget is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Returns `true` if the state contains no flags.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Options that control how a container behaves.
    pub struct ContainerOption : u32 {
        /// Container starts closed and is only shown once opened.
        const CLOSED = 2048;
        /// Container is a popup: sorted above windows and dismissed by an outside click.
        const POPUP = 1024;
        /// Automatically adapts the container size to its content.
        const AUTO_SIZE = 512;
        /// Hides the title bar.
        const NO_TITLE = 128;
        /// Hides the close button.
        const NO_CLOSE = 64;
        /// Disables scrollbars and wheel scrolling.
        const NO_SCROLL = 32;
        /// Prevents the user from resizing the window.
        const NO_RESIZE = 16;
        /// Hides the outer frame.
        const NO_FRAME = 8;
        /// Title bar, close button and resize handle ignore the mouse.
        const NO_INTERACT = 4;
        /// No special options.
        const NONE = 0;
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Widget specific options that influence layout and interactivity.
    pub struct WidgetOption : u32 {
        /// Tree node or header starts expanded.
        const EXPANDED = 4096;
        /// Keeps keyboard focus while the widget is held.
        const HOLD_FOCUS = 256;
        /// Draws the widget without its frame/background.
        const NO_FRAME = 8;
        /// Disables interaction for the widget.
        const NO_INTERACT = 4;
        /// Aligns the widget to the right side of the cell.
        const ALIGN_RIGHT = 2;
        /// Centers the widget inside the cell.
        const ALIGN_CENTER = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl ContainerOption {
    /// Returns `true` if the container starts closed.
    pub fn is_closed(&self) -> bool { self.intersects(Self::CLOSED) }
    /// Returns `true` if the container is a popup.
    pub fn is_popup(&self) -> bool { self.intersects(Self::POPUP) }
    /// Returns `true` if the container sizes itself to its content.
    pub fn is_auto_sizing(&self) -> bool { self.intersects(Self::AUTO_SIZE) }
    /// Returns `true` if the title bar should be hidden.
    pub fn has_no_title(&self) -> bool { self.intersects(Self::NO_TITLE) }
    /// Returns `true` if the close button should be hidden.
    pub fn has_no_close(&self) -> bool { self.intersects(Self::NO_CLOSE) }
    /// Returns `true` if the container never scrolls.
    pub fn has_no_scroll(&self) -> bool { self.intersects(Self::NO_SCROLL) }
    /// Returns `true` if the container is fixed size.
    pub fn is_fixed(&self) -> bool { self.intersects(Self::NO_RESIZE) }
    /// Returns `true` if the outer frame should be hidden.
    pub fn has_no_frame(&self) -> bool { self.intersects(Self::NO_FRAME) }

    /// Options applied to the container's own chrome controls.
    pub(crate) fn chrome_option(&self) -> WidgetOption {
        if self.intersects(Self::NO_INTERACT) { WidgetOption::NO_INTERACT } else { WidgetOption::NONE }
    }
}

impl WidgetOption {
    /// Returns `true` if the tree node starts expanded.
    pub fn is_expanded(&self) -> bool { self.intersects(Self::EXPANDED) }
    /// Returns `true` if the widget should keep focus while held.
    pub fn is_holding_focus(&self) -> bool { self.intersects(Self::HOLD_FOCUS) }
    /// Returns `true` if the widget shouldn't draw its frame.
    pub fn has_no_frame(&self) -> bool { self.intersects(Self::NO_FRAME) }
    /// Returns `true` if the widget is non-interactive.
    pub fn is_not_interactive(&self) -> bool { self.intersects(Self::NO_INTERACT) }
    /// Returns `true` if the widget prefers right alignment.
    pub fn is_aligned_right(&self) -> bool { self.intersects(Self::ALIGN_RIGHT) }
    /// Returns `true` if the widget prefers centered alignment.
    pub fn is_aligned_center(&self) -> bool { self.intersects(Self::ALIGN_CENTER) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Keys the core reacts to: modifiers plus the editing keys used by text boxes.
    pub struct Key : u32 {
        /// Return/Enter key.
        const RETURN = 16;
        /// Backspace key.
        const BACKSPACE = 8;
        /// Alt key.
        const ALT = 4;
        /// Control key.
        const CTRL = 2;
        /// Shift key.
        const SHIFT = 1;
        /// No keys.
        const NONE = 0;
    }
}

impl Key {
    /// Returns `true` if no keys are set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Return/Enter is set.
    pub fn is_return(&self) -> bool { self.intersects(Self::RETURN) }
    /// Returns `true` if Backspace is set.
    pub fn is_backspace(&self) -> bool { self.intersects(Self::BACKSPACE) }
    /// Returns `true` if Alt is set.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is set.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is set.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

#[derive(Clone, Debug, Default)]
/// Raw input collected between two frames.
///
/// Position updates overwrite, button and key events accumulate into bit masks and text is
/// appended. The per-frame edges (`pressed`, `released`, scroll and text) are cleared by
/// [`Context::end`].
pub struct Input {
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    scroll_delta: Vec2i,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
    mouse_released: MouseButton,
    key_down: Key,
    key_pressed: Key,
    input_text: String,
}

impl Input {
    /// Current pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }
    /// Pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }
    /// Scroll wheel movement accumulated this frame.
    pub fn scroll_delta(&self) -> Vec2i { self.scroll_delta }
    /// Buttons currently held.
    pub fn mouse_down(&self) -> MouseButton { self.mouse_down }
    /// Buttons that went down this frame.
    pub fn mouse_pressed(&self) -> MouseButton { self.mouse_pressed }
    /// Buttons that went up this frame.
    pub fn mouse_released(&self) -> MouseButton { self.mouse_released }
    /// Keys currently held.
    pub fn key_down(&self) -> Key { self.key_down }
    /// Keys that went down this frame.
    pub fn key_pressed(&self) -> Key { self.key_pressed }
    /// UTF-8 text entered this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    pub(crate) fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    pub(crate) fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    pub(crate) fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
        self.mouse_released |= btn;
    }

    pub(crate) fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    pub(crate) fn keydown(&mut self, key: Key) {
        self.key_pressed |= key;
        self.key_down |= key;
    }

    pub(crate) fn keyup(&mut self, key: Key) { self.key_down &= !key; }

    pub(crate) fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.key_pressed = Key::NONE;
        self.input_text.clear();
        self.mouse_pressed = MouseButton::NONE;
        self.mouse_released = MouseButton::NONE;
        self.scroll_delta = vec2(0, 0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Interaction summary produced by [`Context::update_control`].
pub struct ControlState {
    /// The pointer hovers the control.
    pub hovered: bool,
    /// The control owns focus.
    pub focused: bool,
    /// The left button went down on the control this frame.
    pub pressed: bool,
    /// The left button is held with the control focused.
    pub active: bool,
    /// The left button was released over the control after pressing it.
    pub released: bool,
    /// The press this frame completed a double click on the control.
    pub double_clicked: bool,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Opaque font handle resolved by the host's [`TextMetrics`].
pub struct FontId(pub usize);

/// Text measurement supplied by the host.
///
/// Implementations must be pure: the same inputs always yield the same sizes within a frame.
pub trait TextMetrics {
    /// Width in pixels of `text` rendered with `font`.
    fn text_width(&self, font: FontId, text: &str) -> i32;
    /// Line height in pixels of `font`.
    fn text_height(&self, font: FontId) -> i32;
}

#[derive(Copy, Clone, Debug)]
/// Fixed advance metrics, handy for tests and tools that do not render glyphs.
pub struct MonospaceMetrics {
    /// Advance of every character.
    pub char_width: i32,
    /// Height of every line.
    pub line_height: i32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self { Self { char_width: 8, line_height: 10 } }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, _font: FontId, text: &str) -> i32 { text.chars().count() as i32 * self.char_width }
    fn text_height(&self, _font: FontId) -> i32 { self.line_height }
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive widget appearance.
pub struct Style {
    /// Font used for all text rendering.
    pub font: FontId,
    /// Default cell size used when a row asks for the default width or height.
    pub size: Vec2i,
    /// Inner padding applied to most widgets.
    pub padding: i32,
    /// Vertical spacing between layout rows.
    pub spacing: i32,
    /// Indentation applied to tree node content.
    pub indent: i32,
    /// Height of window title bars.
    pub title_height: i32,
    /// Width of scrollbars.
    pub scrollbar_size: i32,
    /// Size of slider thumbs.
    pub thumb_size: i32,
    /// Palette indexed by [`ControlColor`].
    pub colors: [Color; COLOR_COUNT],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId::default(),
            size: vec2(68, 10),
            padding: 5,
            spacing: 4,
            indent: 24,
            title_height: 24,
            scrollbar_size: 12,
            thumb_size: 8,
            colors: [
                color(230, 230, 230, 255),
                color(25, 25, 25, 255),
                color(50, 50, 50, 255),
                color(25, 25, 25, 255),
                color(240, 240, 240, 255),
                color(0, 0, 0, 0),
                color(75, 75, 75, 255),
                color(95, 95, 95, 255),
                color(115, 115, 115, 255),
                color(30, 30, 30, 255),
                color(35, 35, 35, 255),
                color(40, 40, 40, 255),
                color(43, 43, 43, 255),
                color(30, 30, 30, 255),
            ],
        }
    }
}

impl Style {
    /// Palette entry for `c`.
    pub fn color(&self, c: ControlColor) -> Color { self.colors[c.index()] }

    /// Replaces the palette entry at `index`, rejecting indices past the palette.
    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), ValidationError> {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                Ok(())
            }
            None => {
                let err = ValidationError::ColorIndexOutOfRange { index, max: COLOR_COUNT - 1 };
                tracing::warn!(%err, "style color rejected");
                Err(err)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Capacities of the context's fixed-size stores.
///
/// Exceeding any of these during a frame is a programming error and halts with a [`UsageError`].
pub struct ContextConfig {
    /// Maximum number of commands recorded per frame.
    pub command_capacity: usize,
    /// Maximum bytes of text recorded per frame.
    pub text_capacity: usize,
    /// Number of root containers that can be open in one frame.
    pub root_list_capacity: usize,
    /// Depth of the container stack.
    pub container_stack_capacity: usize,
    /// Depth of the clip stack, including the frame sentinel.
    pub clip_stack_capacity: usize,
    /// Depth of the id stack.
    pub id_stack_capacity: usize,
    /// Depth of the layout stack.
    pub layout_stack_capacity: usize,
    /// Slots in the container pool.
    pub container_pool_size: usize,
    /// Slots in the tree node pool.
    pub treenode_pool_size: usize,
    /// Two presses on the same control at most this many frames apart form a double click.
    pub double_click_frames: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            command_capacity: 4096,
            text_capacity: 64 * 1024,
            root_list_capacity: 32,
            container_stack_capacity: 32,
            clip_stack_capacity: 32,
            id_stack_capacity: 32,
            layout_stack_capacity: 16,
            container_pool_size: 48,
            treenode_pool_size: 48,
            double_click_frames: 20,
        }
    }
}

/// Clamps `x` into `[a, b]`.
pub fn clamp<T: PartialOrd>(x: T, a: T, b: T) -> T {
    if x < a {
        a
    } else if x > b {
        b
    } else {
        x
    }
}
