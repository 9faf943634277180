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

/// Bounded LIFO used for every per-frame stack of the context.
///
/// Pushing past capacity or popping an empty stack is reported as a [`UsageError`] rather than
/// growing or silently ignoring the call.
#[derive(Clone, Debug)]
pub(crate) struct FixedStack<T> {
    items: Vec<T>,
    capacity: usize,
    kind: StackKind,
}

impl<T> FixedStack<T> {
    pub fn new(kind: StackKind, capacity: usize) -> Self { Self { items: Vec::with_capacity(capacity), capacity, kind } }

    pub fn push(&mut self, item: T) -> Result<(), UsageError> {
        if self.items.len() >= self.capacity {
            return Err(UsageError::StackOverflow { stack: self.kind, capacity: self.capacity });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, UsageError> { self.items.pop().ok_or(UsageError::StackUnderflow { stack: self.kind }) }

    pub fn last(&self) -> Option<&T> { self.items.last() }

    pub fn last_mut(&mut self) -> Option<&mut T> { self.items.last_mut() }

    pub fn len(&self) -> usize { self.items.len() }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn clear(&mut self) { self.items.clear() }

    pub fn as_slice(&self) -> &[T] { &self.items }

    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }

    /// Fails with [`UsageError::UnbalancedStack`] unless exactly `depth` entries remain.
    pub fn expect_depth(&self, depth: usize) -> Result<(), UsageError> {
        if self.items.len() == depth {
            Ok(())
        } else {
            Err(UsageError::UnbalancedStack { stack: self.kind, depth: self.items.len() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_capacity_is_rejected() {
        let mut s = FixedStack::new(StackKind::Id, 2);
        s.push(1).unwrap();
        s.push(2).unwrap();
        assert_eq!(s.push(3), Err(UsageError::StackOverflow { stack: StackKind::Id, capacity: 2 }));
        assert_eq!(s.len(), 2);
        assert_eq!(s.last(), Some(&2));
    }

    #[test]
    fn pop_on_empty_is_rejected() {
        let mut s: FixedStack<u8> = FixedStack::new(StackKind::Layout, 4);
        assert_eq!(s.pop(), Err(UsageError::StackUnderflow { stack: StackKind::Layout }));
        s.push(7).unwrap();
        assert_eq!(s.pop(), Ok(7));
        assert!(s.is_empty());
    }

    #[test]
    fn depth_check_reports_leftovers() {
        let mut s = FixedStack::new(StackKind::Clip, 4);
        s.push('a').unwrap();
        s.push('b').unwrap();
        assert_eq!(s.expect_depth(1), Err(UsageError::UnbalancedStack { stack: StackKind::Clip, depth: 2 }));
        s.pop().unwrap();
        assert_eq!(s.expect_depth(1), Ok(()));
    }
}
