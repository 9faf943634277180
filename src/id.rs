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
use crate::stack::FixedStack;

const HASH_INITIAL: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Stable 32-bit widget identity: FNV-1a of the caller's bytes, seeded by the enclosing id scope.
pub struct Id(u32);

impl Id {
    /// Returns the raw hash value.
    pub fn raw(self) -> u32 { self.0 }
}

/// Id scopes of the current frame plus the most recently produced id.
pub(crate) struct IdStack {
    stack: FixedStack<Id>,
    last_id: Option<Id>,
}

impl IdStack {
    pub fn new(capacity: usize) -> Self { Self { stack: FixedStack::new(StackKind::Id, capacity), last_id: None } }

    #[cfg(test)]
    pub fn len(&self) -> usize { self.stack.len() }

    pub fn last_id(&self) -> Option<Id> { self.last_id }

    pub fn stack(&self) -> &FixedStack<Id> { &self.stack }

    fn hash_step(h: u32, b: u8) -> u32 { (h ^ b as u32).wrapping_mul(FNV_PRIME) }

    fn seed(&self) -> Id { self.stack.last().copied().unwrap_or(Id(HASH_INITIAL)) }

    /// Hashes `bytes` under the current scope and records the result as the last id.
    pub fn get_id(&mut self, bytes: &[u8]) -> Id {
        let id = Id(bytes.iter().fold(self.seed().0, |h, b| Self::hash_step(h, *b)));
        self.last_id = Some(id);
        id
    }

    /// Id derived from the address of `value`. Stable as long as the value does not move.
    pub fn get_id_from_ptr<T: ?Sized>(&mut self, value: &T) -> Id {
        let ptr = value as *const T as *const u8 as usize;
        self.get_id(&ptr.to_le_bytes())
    }

    pub fn push_id(&mut self, id: Id) -> Result<(), UsageError> { self.stack.push(id) }

    pub fn pop_id(&mut self) -> Result<Id, UsageError> { self.stack.pop() }

}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{HashMap, HashSet};

    #[test]
    fn empty_input_yields_fnv_offset_basis() {
        let mut ids = IdStack::new(4);
        assert_eq!(ids.get_id(b"").raw(), HASH_INITIAL);
    }

    #[test]
    fn matches_reference_fnv1a() {
        let mut ids = IdStack::new(4);
        // FNV-1a 32 of "a"
        assert_eq!(ids.get_id(b"a").raw(), 0xe40c292c);
        assert_eq!(ids.last_id(), Some(Id(0xe40c292c)));
    }

    #[test]
    fn scope_changes_the_hash() {
        let mut ids = IdStack::new(4);
        let plain = ids.get_id(b"OK");
        let scope = ids.get_id(b"Window");
        ids.push_id(scope).unwrap();
        let scoped = ids.get_id(b"OK");
        assert_ne!(plain, scoped);
        ids.pop_id().unwrap();
        assert_eq!(ids.get_id(b"OK"), plain);
    }

    #[test]
    fn same_scope_and_bytes_are_stable() {
        let mut ids = IdStack::new(4);
        let a = ids.get_id(b"slider");
        let b = ids.get_id(b"slider");
        assert_eq!(a, b);
    }

    #[test]
    fn pointer_ids_follow_address() {
        let mut ids = IdStack::new(4);
        let values = [0.0f32, 0.0f32];
        let a = ids.get_id_from_ptr(&values[0]);
        let b = ids.get_id_from_ptr(&values[1]);
        assert_ne!(a, b);
        assert_eq!(a, ids.get_id_from_ptr(&values[0]));
    }

    #[test]
    fn label_corpus_has_no_collisions() {
        let mut labels = HashSet::new();
        for word in ["OK", "Cancel", "Apply", "Close", "!title", "!close", "!resize", "!scrollbarv", "!scrollbarh"] {
            labels.insert(word.to_string());
        }
        for i in 0..500 {
            labels.insert(format!("button {i}"));
            labels.insert(format!("Item #{i}"));
        }
        let printable: Vec<char> = (0x20u8..0x7f).map(char::from).collect();
        let mut rng = StdRng::seed_from_u64(0x1d5);
        while labels.len() < 2000 {
            let len = rng.random_range(1..16);
            labels.insert((0..len).map(|_| printable[rng.random_range(0..printable.len())]).collect());
        }

        let mut ids = IdStack::new(4);
        let mut seen: HashMap<Id, &str> = HashMap::new();
        for label in &labels {
            let id = ids.get_id(label.as_bytes());
            if let Some(other) = seen.insert(id, label) {
                panic!("{label:?} and {other:?} hash to {:#x}", id.raw());
            }
        }
    }
}
