use global_state::host::StateHost;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A call as seen by a [`RecordingHost`], with the slices it was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Seen {
    Set {
        key: (*const u8, usize),
        value: (*const u8, usize),
    },
    Get {
        key: (*const u8, usize),
    },
}

/// Keeps values in a map and records where every slice it was handed points.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    values: HashMap<Vec<u8>, Vec<u8>>,
    seen: Rc<RefCell<Vec<Seen>>>,
}

impl RecordingHost {
    /// A host and a handle to what it sees.
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<Seen>>>) {
        let host = Self::default();
        let seen = Rc::clone(&host.seen);
        (host, seen)
    }
}

impl StateHost for RecordingHost {
    fn set_state(&mut self, key: &[u8], value: &[u8]) {
        self.seen.borrow_mut().push(Seen::Set {
            key: (key.as_ptr(), key.len()),
            value: (value.as_ptr(), value.len()),
        });
        let _prev = self.values.insert(key.to_vec(), value.to_vec());
    }

    fn get_state(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.seen.borrow_mut().push(Seen::Get {
            key: (key.as_ptr(), key.len()),
        });
        self.values.get(key).cloned()
    }
}
