//! Layout-change notifications from the host view.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use todomark_primitives::{BufferId, Snapshot};

/// The view laid out a (possibly new) snapshot.
#[derive(Debug, Clone)]
pub struct LayoutChanged {
	pub snapshot: Arc<Snapshot>,
}

impl LayoutChanged {
	pub fn new(snapshot: Arc<Snapshot>) -> Self {
		Self { snapshot }
	}

	pub fn buffer(&self) -> BufferId {
		self.snapshot.buffer()
	}
}

pub type LayoutHandler = Rc<dyn Fn(&LayoutChanged)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The part of a host text view the margin depends on.
pub trait TextView {
	fn subscribe_layout(&self, handler: LayoutHandler) -> SubscriptionId;

	/// Removes a handler. Returns false if `id` was not subscribed.
	fn unsubscribe_layout(&self, id: SubscriptionId) -> bool;
}

/// A minimal [`TextView`]: a list of layout handlers and a way to fire them.
#[derive(Default)]
pub struct LayoutEvents {
	next_id: Cell<u64>,
	handlers: RefCell<Vec<(SubscriptionId, LayoutHandler)>>,
}

impl LayoutEvents {
	pub fn new() -> Self {
		Self::default()
	}

	/// Delivers `event` to every handler subscribed when the call starts.
	///
	/// Handlers may subscribe or unsubscribe while being called. Returns the
	/// number of handlers invoked.
	pub fn emit(&self, event: &LayoutChanged) -> usize {
		let handlers: Vec<LayoutHandler> = self
			.handlers
			.borrow()
			.iter()
			.map(|(_, handler)| Rc::clone(handler))
			.collect();
		for handler in &handlers {
			handler(event);
		}
		handlers.len()
	}

	pub fn subscriber_count(&self) -> usize {
		self.handlers.borrow().len()
	}
}

impl TextView for LayoutEvents {
	fn subscribe_layout(&self, handler: LayoutHandler) -> SubscriptionId {
		let id = SubscriptionId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.handlers.borrow_mut().push((id, handler));
		id
	}

	fn unsubscribe_layout(&self, id: SubscriptionId) -> bool {
		let mut handlers = self.handlers.borrow_mut();
		let before = handlers.len();
		handlers.retain(|(existing, _)| *existing != id);
		handlers.len() != before
	}
}

impl fmt::Debug for LayoutEvents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LayoutEvents")
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}
