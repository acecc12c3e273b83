//! Classifier aggregation.
//!
//! An aggregator composes the classifiers of all registered providers into a
//! single [`AggregateClassifier`] per buffer, so every consumer of a buffer
//! shares one pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use todomark_primitives::{BufferId, SnapshotSpan};

use crate::classifier::{ClassifiedSpan, Classifier};
use crate::guard::BusyKeys;
use crate::provider::ClassifierProvider;

/// Hands out the combined classifier for a buffer.
pub trait ClassifierAggregator {
	/// Returns the classifier for `buffer`, or `None` if none is available.
	fn classifier(&self, buffer: BufferId) -> Option<Rc<dyn Classifier>>;

	/// Drops everything cached for `buffer`. Call when the buffer is closed.
	fn release(&self, buffer: BufferId);
}

/// Classifier merging the output of several member classifiers.
pub struct AggregateClassifier {
	members: Vec<Rc<dyn Classifier>>,
}

impl AggregateClassifier {
	pub fn new(members: Vec<Rc<dyn Classifier>>) -> Self {
		Self { members }
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}

impl Classifier for AggregateClassifier {
	fn classify(&self, span: &SnapshotSpan) -> Vec<ClassifiedSpan> {
		let mut spans: Vec<_> = self
			.members
			.iter()
			.flat_map(|member| member.classify(span))
			.collect();
		spans.sort_by_key(|s| s.span.start());
		spans
	}
}

/// Aggregator over a list of [`ClassifierProvider`]s.
///
/// The aggregate for a buffer is built on first request and cached until
/// [`release`](ClassifierAggregator::release). Requests made while the same
/// buffer is still being resolved (a provider asking back for its upstream)
/// get a fresh, uncached aggregate of whichever providers still answer.
#[derive(Default)]
pub struct Aggregator {
	providers: Vec<Rc<dyn ClassifierProvider>>,
	cache: RefCell<FxHashMap<BufferId, Rc<AggregateClassifier>>>,
	resolving: BusyKeys<BufferId>,
}

impl Aggregator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`register`](Self::register).
	pub fn with_provider(mut self, provider: Rc<dyn ClassifierProvider>) -> Self {
		self.register(provider);
		self
	}

	/// Adds a provider.
	///
	/// Every cached buffer is released from the existing providers as well,
	/// so classifiers layered on the old aggregate are rebuilt on top of the
	/// new one at the next request.
	pub fn register(&mut self, provider: Rc<dyn ClassifierProvider>) {
		let evicted: Vec<BufferId> = self.cache.get_mut().drain().map(|(buffer, _)| buffer).collect();
		for buffer in evicted {
			for existing in &self.providers {
				existing.release(buffer);
			}
		}
		self.providers.push(provider);
	}

	pub fn provider_count(&self) -> usize {
		self.providers.len()
	}

	/// True if an aggregate for `buffer` is cached.
	pub fn is_cached(&self, buffer: BufferId) -> bool {
		self.cache.borrow().contains_key(&buffer)
	}

	fn build(&self, buffer: BufferId) -> Rc<AggregateClassifier> {
		let members = self
			.providers
			.iter()
			.filter_map(|provider| provider.classifier(buffer, self))
			.collect();
		Rc::new(AggregateClassifier::new(members))
	}
}

impl ClassifierAggregator for Aggregator {
	fn classifier(&self, buffer: BufferId) -> Option<Rc<dyn Classifier>> {
		if let Some(cached) = self.cache.borrow().get(&buffer) {
			return Some(Rc::clone(cached) as Rc<dyn Classifier>);
		}

		let Some(resolving) = self.resolving.try_enter(buffer) else {
			tracing::trace!(%buffer, "Building uncached aggregate for nested request");
			return Some(self.build(buffer));
		};
		let aggregate = self.build(buffer);
		drop(resolving);

		tracing::debug!(%buffer, members = aggregate.len(), "Built classifier aggregate");
		self.cache
			.borrow_mut()
			.insert(buffer, Rc::clone(&aggregate));
		Some(aggregate)
	}

	fn release(&self, buffer: BufferId) {
		self.cache.borrow_mut().remove(&buffer);
		for provider in &self.providers {
			provider.release(buffer);
		}
	}
}
