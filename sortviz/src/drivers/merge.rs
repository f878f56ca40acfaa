//! Top-down merge sort driven from an explicit task stack.

use crate::context::RunContext;
use crate::core::error::SortError;
use crate::core::types::Comparison;

/// Pending work over inclusive ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

pub async fn sort(ctx: &mut RunContext) -> Result<(), SortError> {
    if ctx.len() < 2 {
        return Ok(());
    }
    let mut pending = vec![Task::Sort {
        left: 0,
        right: ctx.len() - 1,
    }];
    while let Some(task) = pending.pop() {
        match task {
            Task::Sort { left, right } => {
                if left >= right {
                    continue;
                }
                let mid = (left + right) / 2;
                // LIFO: left half, then right half, then their merge.
                pending.push(Task::Merge { left, mid, right });
                pending.push(Task::Sort {
                    left: mid + 1,
                    right,
                });
                pending.push(Task::Sort { left, right: mid });
            }
            Task::Merge { left, mid, right } => merge(ctx, left, mid, right).await?,
        }
    }
    Ok(())
}

async fn merge(ctx: &mut RunContext, left: usize, mid: usize, right: usize) -> Result<(), SortError> {
    let lower = ctx.entries(left..=mid)?;
    let upper = ctx.entries(mid + 1..=right)?;
    let (mut a, mut b, mut k) = (0, 0, left);

    while a < lower.len() && b < upper.len() {
        let take_lower = ctx
            .compare_held(
                left + a,
                mid + 1 + b,
                lower[a].value,
                upper[b].value,
                Comparison::LessOrEqual,
            )
            .await?;
        let next = if take_lower {
            a += 1;
            lower[a - 1]
        } else {
            b += 1;
            upper[b - 1]
        };
        ctx.set_at(k, next).await?;
        k += 1;
    }

    // Drain whichever buffer is left; no comparisons to show.
    for entry in lower[a..].iter().chain(&upper[b..]) {
        ctx.set_at(k, *entry).await?;
        k += 1;
    }
    Ok(())
}
