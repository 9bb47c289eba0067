//! Revision walking over a repository's commit ancestry

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::Result;
use crate::storage::ObjectId;

/// A lazy producer of commit ids reachable from a set of seeds.
///
/// `next` returns `Ok(None)` once the walk is exhausted. Walkers may instead
/// report exhaustion as an error of kind `TraversalExhausted`; callers treat
/// both the same way.
pub trait RevWalk {
    /// Add a starting point for the walk.
    fn push(&mut self, id: &ObjectId) -> Result<()>;

    /// Produce the next reachable commit id.
    fn next(&mut self) -> Result<Option<ObjectId>>;
}

/// Breadth-first walk over an in-memory `commit -> parents` map.
///
/// Every reachable commit is yielded exactly once. Commits missing from the
/// map are yielded but treated as roots.
pub struct StateRevWalk {
    parents: HashMap<ObjectId, Vec<ObjectId>>,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl StateRevWalk {
    pub fn new(parents: HashMap<ObjectId, Vec<ObjectId>>) -> Self {
        StateRevWalk {
            parents,
            queue: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    fn enqueue(&mut self, id: &ObjectId) {
        if self.seen.insert(id.clone()) {
            self.queue.push_back(id.clone());
        }
    }
}

impl RevWalk for StateRevWalk {
    fn push(&mut self, id: &ObjectId) -> Result<()> {
        self.enqueue(id);
        Ok(())
    }

    fn next(&mut self) -> Result<Option<ObjectId>> {
        let Some(id) = self.queue.pop_front() else {
            return Ok(None);
        };
        let parents = self.parents.get(&id).cloned().unwrap_or_default();
        for parent in &parents {
            self.enqueue(parent);
        }
        Ok(Some(id))
    }
}
