use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// Handle for one pending "run before next repaint" request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct FrameRequestId(pub u64);

/// The host's per-frame callback primitive.
///
/// Implementations deliver each granted request at most once, by calling back into the owner
/// with the id returned here. A cancelled id must never be delivered.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;

    fn cancel_frame(&mut self, id: FrameRequestId);
}

#[derive(Debug, Default)]
struct ManualQueue {
    next_id: u64,
    pending: VecDeque<FrameRequestId>,
    requested: u64,
    cancelled: u64,
}

/// Scheduler for headless hosts and tests: requests queue up until the driver pops them.
///
/// Clones share one queue, so a driver can keep a handle while the loop owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending request, removed from the queue.
    pub fn pop_due(&self) -> Option<FrameRequestId> {
        self.queue.borrow_mut().pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    pub fn requested_count(&self) -> u64 {
        self.queue.borrow().requested
    }

    pub fn cancelled_count(&self) -> u64 {
        self.queue.borrow().cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        let mut q = self.queue.borrow_mut();
        let id = FrameRequestId(q.next_id);
        q.next_id += 1;
        q.requested += 1;
        q.pending.push_back(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let mut q = self.queue.borrow_mut();
        let before = q.pending.len();
        q.pending.retain(|p| *p != id);
        if q.pending.len() != before {
            q.cancelled += 1;
        }
    }
}
