//! Rate-limited dispatcher — bounded-concurrency execution of deferred sends.
//!
//! Operations are closures producing futures, so nothing starts before its
//! turn. They run in fixed-size chunks: up to `max_in_flight` futures are
//! polled together and the whole chunk settles before the next one begins.
//! Results always come back in input order.
//!
//! Siblings in a chunk are never cancelled when one of them fails. What the
//! caller sees on failure depends on the entry point:
//! - [`Dispatcher::try_dispatch`] stops after the failing chunk and returns the
//!   first error. Sends already completed in earlier chunks are not undone.
//! - [`Dispatcher::dispatch_settled`] runs everything and returns every result.

use std::future::Future;

use futures::future::join_all;

/// Fixed-window batch executor.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    max_in_flight: usize,
}

impl Dispatcher {
    /// `max_in_flight` of 0 is treated as 1.
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Run every operation and return all outcomes in input order.
    pub async fn dispatch_settled<I, F, Fut, T, E>(&self, ops: I) -> Vec<Result<T, E>>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut ops = ops.into_iter();
        let mut results = Vec::new();

        loop {
            let chunk: Vec<_> = ops.by_ref().take(self.max_in_flight).map(|op| op()).collect();
            if chunk.is_empty() {
                break;
            }
            results.extend(join_all(chunk).await);
        }

        results
    }

    /// Run operations chunk by chunk, aborting the batch after the first chunk
    /// that contains a failure. Returns the first error in input order.
    pub async fn try_dispatch<I, F, Fut, T, E>(&self, ops: I) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut ops = ops.into_iter();
        let mut results = Vec::new();

        loop {
            let chunk: Vec<_> = ops.by_ref().take(self.max_in_flight).map(|op| op()).collect();
            if chunk.is_empty() {
                break;
            }
            for outcome in join_all(chunk).await {
                results.push(outcome?);
            }
        }

        Ok(results)
    }
}
