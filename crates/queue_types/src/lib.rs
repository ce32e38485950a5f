//! Error kinds reported by chunk queue building blocks.

use thiserror::Error;

/// Failures of a chunk queue push or waiter registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ChunkQueueError {
	/// A blocking waiter (semaphore) is already registered with the queue.
	#[error("a blocking waiter is already registered with this queue")]
	SemaphoreAlreadySet,
	/// The queue is at capacity.
	#[error("queue capacity exceeded")]
	QueueOverflow,
}

#[cfg(test)]
mod tests {
	use super::ChunkQueueError;

	#[test]
	fn messages_describe_the_failure() {
		assert_eq!(
			ChunkQueueError::SemaphoreAlreadySet.to_string(),
			"a blocking waiter is already registered with this queue"
		);
		assert_eq!(ChunkQueueError::QueueOverflow.to_string(), "queue capacity exceeded");
	}

	#[test]
	fn is_a_std_error() {
		let error: Box<dyn std::error::Error + Send + Sync> = Box::new(ChunkQueueError::QueueOverflow);
		assert!(error.source().is_none());
		assert!(error.downcast_ref::<ChunkQueueError>().is_some());
	}
}
