//! Quicksort with Lomuto partitioning (pivot = last element of the range).

use crate::context::RunContext;
use crate::core::error::SortError;
use crate::core::types::Comparison;

pub async fn sort(ctx: &mut RunContext) -> Result<(), SortError> {
    if ctx.len() < 2 {
        return Ok(());
    }
    // Inclusive ranges, popped LIFO. The right half is pushed first so the
    // left half is fully sorted before it, as in the recursive formulation.
    let mut pending = vec![(0, ctx.len() - 1)];
    while let Some((left, right)) = pending.pop() {
        if left >= right {
            continue;
        }
        let pivot = partition(ctx, left, right).await?;
        pending.push((pivot + 1, right));
        if pivot > left {
            pending.push((left, pivot - 1));
        }
    }
    Ok(())
}

/// Partition `[left, right]` around the value at `right`; returns the pivot's
/// resting index.
async fn partition(ctx: &mut RunContext, left: usize, right: usize) -> Result<usize, SortError> {
    let mut store = left;
    for j in left..right {
        if ctx.compare(j, right, Comparison::Less).await? {
            ctx.swap(store, j).await?;
            store += 1;
        }
    }
    ctx.swap(store, right).await?;
    Ok(store)
}
