use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
	#[default]
	Idle,
	Running,
	Stopped,
}

#[derive(Debug, Default)]
struct Inner {
	phase: Cell<Phase>,
	pending: Cell<Option<i32>>,
}

/// Run switch shared by the `requestAnimationFrame` callback and the canvas cleanup.
///
/// A loop is started at most once and, once stopped, never runs again.
#[derive(Clone, Debug, Default)]
pub struct FrameLoop(Rc<Inner>);

impl FrameLoop {
	/// Claim the loop. True only for the first call on an idle loop.
	pub fn start(&self) -> bool {
		if self.0.phase.get() != Phase::Idle {
			return false;
		}
		self.0.phase.set(Phase::Running);
		true
	}

	pub fn is_running(&self) -> bool {
		self.0.phase.get() == Phase::Running
	}

	/// Remember the id of the frame most recently requested.
	pub fn set_pending(&self, id: i32) {
		self.0.pending.set(Some(id));
	}

	/// Stop for good and hand back the frame request that still needs cancelling.
	pub fn stop(&self) -> Option<i32> {
		self.0.phase.set(Phase::Stopped);
		self.0.pending.take()
	}
}
