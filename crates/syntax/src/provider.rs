//! Per-buffer classifier providers.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use todomark_config::ClassifierOptions;
use todomark_primitives::BufferId;

use crate::aggregator::ClassifierAggregator;
use crate::classifier::Classifier;
use crate::guard::BusyKeys;
use crate::todo::TodoClassifier;

/// Contributes a classifier for a buffer to an aggregator.
pub trait ClassifierProvider {
	/// Returns this provider's classifier for `buffer`, or `None` if it does
	/// not take part right now.
	///
	/// `aggregator` is the aggregator asking; providers that layer on top of
	/// other classifiers may query it.
	fn classifier(
		&self,
		buffer: BufferId,
		aggregator: &dyn ClassifierAggregator,
	) -> Option<Rc<dyn Classifier>>;

	/// Drops any state kept for `buffer`.
	fn release(&self, _buffer: BufferId) {}
}

/// Provider handing the same classifier to every buffer.
///
/// Hosts use it to plug their syntax classifier into an aggregator.
pub struct StaticProvider {
	classifier: Rc<dyn Classifier>,
}

impl StaticProvider {
	pub fn new(classifier: Rc<dyn Classifier>) -> Self {
		Self { classifier }
	}
}

impl ClassifierProvider for StaticProvider {
	fn classifier(&self, _buffer: BufferId, _aggregator: &dyn ClassifierAggregator) -> Option<Rc<dyn Classifier>> {
		Some(Rc::clone(&self.classifier))
	}
}

/// Provides one [`TodoClassifier`] per buffer.
///
/// The todo classifier's upstream is the aggregator's own classifier for the
/// buffer. Building that upstream asks this provider again; the nested request
/// for the same buffer is refused while the outer one is resolving, so the
/// todo classifier never ends up in its own upstream. Other buffers resolve
/// normally in the meantime.
pub struct TodoClassifierProvider {
	options: ClassifierOptions,
	resolving: BusyKeys<BufferId>,
	classifiers: RefCell<FxHashMap<BufferId, Rc<TodoClassifier>>>,
}

impl TodoClassifierProvider {
	pub fn new(options: ClassifierOptions) -> Self {
		Self {
			options,
			resolving: BusyKeys::new(),
			classifiers: RefCell::new(FxHashMap::default()),
		}
	}

	/// The classifier already created for `buffer`, if any.
	pub fn cached(&self, buffer: BufferId) -> Option<Rc<TodoClassifier>> {
		self.classifiers.borrow().get(&buffer).cloned()
	}

	/// Number of buffers with a live classifier.
	pub fn cached_len(&self) -> usize {
		self.classifiers.borrow().len()
	}

	fn resolve(&self, buffer: BufferId, aggregator: &dyn ClassifierAggregator) -> Option<Rc<TodoClassifier>> {
		if let Some(existing) = self.cached(buffer) {
			return Some(existing);
		}

		let upstream = aggregator.classifier(buffer)?;
		let classifier = Rc::new(TodoClassifier::new(upstream, self.options));
		self.classifiers
			.borrow_mut()
			.insert(buffer, Rc::clone(&classifier));
		tracing::debug!(%buffer, scope = %self.options.scope, "Created todo classifier");
		Some(classifier)
	}
}

impl Default for TodoClassifierProvider {
	fn default() -> Self {
		Self::new(ClassifierOptions::default())
	}
}

impl ClassifierProvider for TodoClassifierProvider {
	fn classifier(&self, buffer: BufferId, aggregator: &dyn ClassifierAggregator) -> Option<Rc<dyn Classifier>> {
		let Some(_resolving) = self.resolving.try_enter(buffer) else {
			tracing::trace!(%buffer, "Refusing nested todo classifier request");
			return None;
		};
		self.resolve(buffer, aggregator)
			.map(|classifier| classifier as Rc<dyn Classifier>)
	}

	fn release(&self, buffer: BufferId) {
		if self.classifiers.borrow_mut().remove(&buffer).is_some() {
			tracing::debug!(%buffer, "Released todo classifier");
		}
	}
}
