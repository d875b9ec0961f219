//! Bounded-concurrency batch execution for queue insertions
//!
//! A page can discover dozens of sibling links; inserting them one by one
//! serializes on the queue, while firing them all at once can overwhelm the
//! underlying storage. This module runs deferred operations in fixed-size
//! batches with a strict barrier between batches.

use futures::future::join_all;
use std::future::Future;

/// Default number of operations in flight per batch
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Runs deferred operations with at most `batch_size` in flight
///
/// Operations are started in input order. A new batch starts only after the
/// previous batch of up to `batch_size` operations has fully settled; there
/// is no rolling window.
///
/// Failure policy: every operation in a batch runs to completion. The first
/// failure in input order is returned and later batches are not started;
/// results of the failing batch's siblings are dropped, but their side
/// effects have already happened.
pub async fn resolve_in_batches<F, T, E>(ops: Vec<F>, batch_size: usize) -> Result<Vec<T>, E>
where
    F: Future<Output = Result<T, E>>,
{
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(ops.len());
    let mut batch = Vec::with_capacity(batch_size);

    for op in ops {
        batch.push(op);
        if batch.len() == batch_size {
            for result in join_all(batch.drain(..)).await {
                results.push(result?);
            }
        }
    }

    for result in join_all(batch).await {
        results.push(result?);
    }

    Ok(results)
}
