//! Non-blocking busy flags.
//!
//! A [`BusyFlag`] turns away nested work instead of waiting for it: while a
//! [`BusyGuard`] is alive, [`BusyFlag::try_enter`] returns `None`.
//! [`BusyKeys`] does the same per key, so work for one buffer never turns
//! away work for another. Both are per instance and `!Sync`; they only guard
//! against re-entrancy on one thread.

use std::cell::{Cell, RefCell};
use std::hash::Hash;

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
	#[default]
	Idle,
	Busy,
}

#[derive(Debug, Default)]
pub struct BusyFlag {
	phase: Cell<Phase>,
}

impl BusyFlag {
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks the flag busy until the returned guard is dropped.
	///
	/// Returns `None` if it is already busy.
	pub fn try_enter(&self) -> Option<BusyGuard<'_>> {
		match self.phase.get() {
			Phase::Busy => None,
			Phase::Idle => {
				self.phase.set(Phase::Busy);
				Some(BusyGuard { flag: self })
			}
		}
	}

	pub fn is_busy(&self) -> bool {
		self.phase.get() == Phase::Busy
	}
}

/// Resets its [`BusyFlag`] to idle on drop, including during unwinding.
#[derive(Debug)]
pub struct BusyGuard<'a> {
	flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		self.flag.phase.set(Phase::Idle);
	}
}

/// A set of independent busy flags keyed by `K`.
#[derive(Debug)]
pub struct BusyKeys<K> {
	keys: RefCell<FxHashSet<K>>,
}

impl<K: Copy + Eq + Hash> BusyKeys<K> {
	pub fn new() -> Self {
		Self {
			keys: RefCell::new(FxHashSet::default()),
		}
	}

	/// Marks `key` busy until the returned guard is dropped.
	///
	/// Returns `None` if `key` is already busy.
	pub fn try_enter(&self, key: K) -> Option<BusyKeyGuard<'_, K>> {
		if !self.keys.borrow_mut().insert(key) {
			return None;
		}
		Some(BusyKeyGuard { owner: self, key })
	}

	pub fn is_busy(&self, key: K) -> bool {
		self.keys.borrow().contains(&key)
	}
}

impl<K: Copy + Eq + Hash> Default for BusyKeys<K> {
	fn default() -> Self {
		Self::new()
	}
}

/// Clears its key in the owning [`BusyKeys`] on drop.
#[derive(Debug)]
pub struct BusyKeyGuard<'a, K: Copy + Eq + Hash> {
	owner: &'a BusyKeys<K>,
	key: K,
}

impl<K: Copy + Eq + Hash> Drop for BusyKeyGuard<'_, K> {
	fn drop(&mut self) {
		self.owner.keys.borrow_mut().remove(&self.key);
	}
}
