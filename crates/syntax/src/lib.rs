//! Comment classification and the todo-comment classifier.
//!
//! # Architecture
//!
//! * [`kind`]: the closed set of classification kinds and their base types
//! * [`format`]: display format registered for the todo-comment kind
//! * [`classifier`]: the [`Classifier`] trait and [`ClassifiedSpan`]
//! * [`marker`]: locating the `TODO` token in span text
//! * [`todo`]: [`TodoClassifier`], which layers todo-comment spans over an upstream classifier
//! * [`provider`]: per-buffer classifier providers, including [`TodoClassifierProvider`]
//! * [`aggregator`]: composes providers into one classifier per buffer
//!
//! Classification is synchronous and single-threaded. Recursion through the
//! host's own pipeline is cut off by [`guard::BusyFlag`]s rather than locks.

pub mod aggregator;
pub mod classifier;
pub mod format;
pub mod guard;
pub mod kind;
pub mod marker;
pub mod provider;
pub mod todo;

pub use aggregator::{AggregateClassifier, Aggregator, ClassifierAggregator};
pub use classifier::{ClassifiedSpan, Classifier};
pub use format::{ClassificationFormat, TODO_COMMENT_FORMAT};
pub use guard::{BusyFlag, BusyGuard, BusyKeyGuard, BusyKeys};
pub use kind::ClassificationKind;
pub use marker::{TODO_TOKEN, TODO_TOKEN_LEN};
pub use provider::{ClassifierProvider, StaticProvider, TodoClassifierProvider};
pub use todo::TodoClassifier;
pub use todomark_config::{ClassifierOptions, MatchScope};
