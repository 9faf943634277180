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
use crate::error::{PoolKind, UsageError};
use crate::id::Id;

#[derive(Copy, Clone, Default, Debug)]
struct PoolItem {
    id: Option<Id>,
    last_used: usize,
}

/// Fixed set of slots mapping ids to retained state, recycled least-recently-used first.
///
/// The pool only tracks ownership; callers keep the per-slot payload in a parallel array indexed
/// by the slot number.
pub(crate) struct Pool {
    items: Vec<PoolItem>,
    kind: PoolKind,
}

impl Pool {
    pub fn new(kind: PoolKind, size: usize) -> Self { Self { items: vec![PoolItem::default(); size], kind } }

    /// Slot currently owned by `id`, if any.
    pub fn get(&self, id: Id) -> Option<usize> { self.items.iter().position(|item| item.id == Some(id)) }

    /// Marks `slot` as referenced during `frame`.
    pub fn update(&mut self, slot: usize, frame: usize) { self.items[slot].last_used = frame; }

    /// Claims the least recently used slot for `id`.
    ///
    /// Only slots untouched during `frame` are eligible, so state referenced this frame is never
    /// evicted. Ties go to the lowest slot.
    pub fn init(&mut self, id: Id, frame: usize) -> Result<usize, UsageError> {
        let mut victim = None;
        let mut oldest = frame;
        for (i, item) in self.items.iter().enumerate() {
            if item.last_used < oldest {
                oldest = item.last_used;
                victim = Some(i);
            }
        }
        let slot = victim.ok_or(UsageError::PoolExhausted { pool: self.kind })?;
        if let Some(evicted) = self.items[slot].id {
            tracing::debug!(pool = %self.kind, slot, evicted = evicted.raw(), "recycling pool slot");
        }
        self.items[slot] = PoolItem { id: Some(id), last_used: frame };
        tracing::debug!(pool = %self.kind, slot, id = id.raw(), frame, "pool slot claimed");
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdStack;

    fn ids(n: usize) -> Vec<Id> {
        let mut stack = IdStack::new(1);
        (0..n).map(|i| stack.get_id(&i.to_le_bytes())).collect()
    }

    #[test]
    fn init_then_get() {
        let ids = ids(2);
        let mut pool = Pool::new(PoolKind::Container, 4);
        let slot = pool.init(ids[0], 1).unwrap();
        assert_eq!(pool.get(ids[0]), Some(slot));
        assert_eq!(pool.get(ids[1]), None);
    }

    #[test]
    fn evicts_least_recently_used() {
        let ids = ids(4);
        let mut pool = Pool::new(PoolKind::Container, 3);
        for (frame, id) in ids.iter().take(3).enumerate() {
            pool.init(*id, frame + 1).unwrap();
        }
        // id 0 was last used in frame 1, the oldest
        let slot = pool.init(ids[3], 4).unwrap();
        assert_eq!(pool.get(ids[0]), None);
        assert_eq!(pool.get(ids[3]), Some(slot));
        assert!(pool.get(ids[1]).is_some());
        assert!(pool.get(ids[2]).is_some());
    }

    #[test]
    fn refreshed_slot_survives_churn() {
        let churn = ids(40);
        let mut stack = IdStack::new(1);
        let keep = stack.get_id(b"keep");
        let mut pool = Pool::new(PoolKind::Container, 4);
        let keep_slot = pool.init(keep, 1).unwrap();
        for (i, id) in churn.iter().enumerate() {
            let frame = i + 2;
            pool.update(keep_slot, frame);
            pool.init(*id, frame).unwrap();
            assert_eq!(pool.get(keep), Some(keep_slot));
        }
    }

    #[test]
    fn exhausted_when_all_used_this_frame() {
        let ids = ids(3);
        let mut pool = Pool::new(PoolKind::TreeNode, 2);
        pool.init(ids[0], 5).unwrap();
        pool.init(ids[1], 5).unwrap();
        assert_eq!(pool.init(ids[2], 5), Err(UsageError::PoolExhausted { pool: PoolKind::TreeNode }));
    }
}
