use std::collections::HashMap;

/// Buffers handed out by `get_state`, kept alive until released.
///
/// Each buffer is indexed by its start address so its length can be recovered later, the way a
/// guest allocator remembers the size behind every pointer it returned.
#[derive(Debug, Default)]
pub(super) struct Arena {
    buffers: HashMap<usize, Box<[u8]>>,
}

impl Arena {
    /// Takes ownership of `bytes` and returns a pointer to them that stays valid until
    /// [`Arena::clear`].
    pub(super) fn alloc(&mut self, bytes: Vec<u8>) -> *mut u8 {
        let mut buffer = bytes.into_boxed_slice();
        let ptr = buffer.as_mut_ptr();
        // Zero-length buffers all share the dangling address. Replacing one with another loses
        // nothing.
        let _prev = self.buffers.insert(ptr as usize, buffer);
        ptr
    }

    pub(super) fn get(&self, ptr: *const u8) -> Option<&[u8]> {
        self.buffers.get(&(ptr as usize)).map(|buffer| &buffer[..])
    }

    /// Frees the buffer at `ptr`, handing its contents back.
    pub(super) fn take(&mut self, ptr: *const u8) -> Option<Vec<u8>> {
        self.buffers.remove(&(ptr as usize)).map(Vec::from)
    }

    pub(super) fn len(&self) -> usize {
        self.buffers.len()
    }

    pub(super) fn clear(&mut self) {
        self.buffers.clear();
    }
}
