//! Indexed binary min-heap over A* node ids.
//!
//! Each node id appears at most once. `decrease` re-keys a queued node in
//! place instead of pushing a duplicate entry.

/// Priority of an open node. Ordered lexicographically; smaller pops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct OpenKey {
    /// `g + h`.
    pub(super) total: u32,
    /// `h`, so ties on total prefer nodes closer to the goal.
    pub(super) to_goal: u32,
    /// Discovery order, the final tie-break.
    pub(super) order: usize,
}

#[derive(Debug, Default)]
pub(super) struct OpenSet {
    /// Heap of `(key, node id)`.
    heap: Vec<(OpenKey, usize)>,
    /// Heap slot of each node id, `None` when not queued.
    slots: Vec<Option<usize>>,
}

impl OpenSet {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
        }
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }

    pub(super) fn contains(&self, node: usize) -> bool {
        self.slots.get(node).is_some_and(Option::is_some)
    }

    /// Queue a node that is not already queued.
    pub(super) fn push(&mut self, node: usize, key: OpenKey) {
        debug_assert!(!self.contains(node));
        if self.slots.len() <= node {
            self.slots.resize(node + 1, None);
        }
        let pos = self.heap.len();
        self.heap.push((key, node));
        self.slots[node] = Some(pos);
        self.sift_up(pos);
    }

    /// Lower the key of a queued node. Keys that are not smaller are ignored.
    pub(super) fn decrease(&mut self, node: usize, key: OpenKey) {
        let Some(pos) = self.slots.get(node).copied().flatten() else {
            return;
        };
        if key < self.heap[pos].0 {
            self.heap[pos].0 = key;
            self.sift_up(pos);
        }
    }

    /// Remove and return the node with the smallest key.
    pub(super) fn pop(&mut self) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (_, node) = self.heap.pop()?;
        self.slots[node] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(node)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].1] = Some(a);
        self.slots[self.heap[b].1] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < len && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
