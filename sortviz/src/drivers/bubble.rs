//! Bubble sort: N full passes, no early exit.

use crate::context::RunContext;
use crate::core::error::SortError;
use crate::core::types::Comparison;

pub async fn sort(ctx: &mut RunContext) -> Result<(), SortError> {
    let len = ctx.len();
    for pass in 0..len {
        for j in 0..len - pass - 1 {
            if ctx.compare(j, j + 1, Comparison::Greater).await? {
                ctx.swap(j, j + 1).await?;
            }
        }
    }
    Ok(())
}
