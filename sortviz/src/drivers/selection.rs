//! Selection sort with narrated minimum tracking.

use crate::context::RunContext;
use crate::core::error::SortError;
use crate::core::types::Comparison;

pub async fn sort(ctx: &mut RunContext) -> Result<(), SortError> {
    let len = ctx.len();
    for i in 0..len.saturating_sub(1) {
        ctx.snapshot([i], format!("Finding minimum element from index {i}"), "")
            .await?;

        let mut min = i;
        for j in i + 1..len {
            // Strict `<` keeps the lowest index among equal minima.
            if ctx.compare(j, min, Comparison::Less).await? {
                min = j;
                ctx.snapshot([min], format!("Found new minimum element at index {min}"), "")
                    .await?;
            }
        }

        if min != i {
            ctx.swap(i, min).await?;
        } else {
            ctx.snapshot([], format!("No swap needed for index {i}"), "")
                .await?;
        }
    }
    Ok(())
}
