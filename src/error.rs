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
use std::fmt;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Names one of the context's fixed-capacity stacks.
pub enum StackKind {
    /// Open containers (windows, panels, popups).
    Container,
    /// Clip rectangles.
    Clip,
    /// Id scopes.
    Id,
    /// Layout scopes (container bodies and columns).
    Layout,
    /// Root containers opened this frame.
    Root,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Container => "container",
            Self::Clip => "clip",
            Self::Id => "id",
            Self::Layout => "layout",
            Self::Root => "root list",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Names one of the retained-state pools.
pub enum PoolKind {
    /// Window, panel and popup state.
    Container,
    /// Tree node and header expansion state.
    TreeNode,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::TreeNode => f.write_str("tree node"),
        }
    }
}

/// A broken calling contract. These are programming errors: the context logs them and halts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A push went past the stack's capacity.
    #[error("{stack} stack overflow (capacity {capacity})")]
    StackOverflow {
        /// Stack that overflowed.
        stack: StackKind,
        /// Its capacity.
        capacity: usize,
    },
    /// A pop found the stack empty.
    #[error("{stack} stack underflow")]
    StackUnderflow {
        /// Stack that underflowed.
        stack: StackKind,
    },
    /// A stack still held entries when the frame ended.
    #[error("{stack} stack left unbalanced at end of frame (depth {depth})")]
    UnbalancedStack {
        /// Stack left non-empty.
        stack: StackKind,
        /// Entries remaining.
        depth: usize,
    },
    /// Every pool slot was referenced during the current frame.
    #[error("{pool} pool exhausted: every slot is in use this frame")]
    PoolExhausted {
        /// Pool that ran out.
        pool: PoolKind,
    },
    /// The frame recorded more commands than configured.
    #[error("command buffer full (capacity {capacity} commands)")]
    CommandBufferFull {
        /// Command capacity.
        capacity: usize,
    },
    /// The frame recorded more text than configured.
    #[error("command text storage full (capacity {capacity} bytes)")]
    TextBufferFull {
        /// Text capacity in bytes.
        capacity: usize,
    },
    /// A frame-scoped call was made outside `begin`/`end`.
    #[error("no frame in progress: call begin() first")]
    FrameNotStarted,
    /// `begin` was called twice without `end`.
    #[error("frame already in progress: end() was not called")]
    FrameAlreadyStarted,
    /// A widget or layout call was made with no open container.
    #[error("no container is open")]
    NoContainer,
    /// An `end_*` call does not match the innermost open scope.
    #[error("end_{expected} does not match the innermost open scope")]
    MismatchedEnd {
        /// Kind of scope the caller tried to close.
        expected: &'static str,
    },
}

/// Rejected caller input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A window or popup was given an empty title.
    #[error("{widget} title must not be empty")]
    EmptyTitle {
        /// Kind of container being opened.
        widget: &'static str,
    },
    /// A container was given a negative initial size.
    #[error("{widget} size must not be negative, got {width}x{height}")]
    NegativeSize {
        /// Kind of container being opened.
        widget: &'static str,
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// A text buffer was created with no room for its terminator.
    #[error("text buffer size must be at least 1 byte")]
    ZeroBufferSize,
    /// A palette index past the last color.
    #[error("color index {index} out of range (max {max})")]
    ColorIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Highest valid index.
        max: usize,
    },
}

/// Logs a contract violation and halts.
#[cold]
#[track_caller]
pub(crate) fn fatal(err: UsageError) -> ! {
    tracing::error!(error = %err, "ui contract violation");
    panic!("{err}")
}

/// Escalates a building-block failure to a halt at the context boundary.
pub(crate) trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, UsageError> {
    #[track_caller]
    fn or_fatal(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => fatal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_resource() {
        let e = UsageError::StackOverflow { stack: StackKind::Clip, capacity: 32 };
        assert_eq!(e.to_string(), "clip stack overflow (capacity 32)");
        let e = UsageError::PoolExhausted { pool: PoolKind::TreeNode };
        assert!(e.to_string().starts_with("tree node pool exhausted"));
        let e = ValidationError::EmptyTitle { widget: "window" };
        assert_eq!(e.to_string(), "window title must not be empty");
    }

    #[test]
    #[should_panic(expected = "no container is open")]
    fn or_fatal_panics_with_message() {
        let r: Result<(), UsageError> = Err(UsageError::NoContainer);
        r.or_fatal();
    }
}
