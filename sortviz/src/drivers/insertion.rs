//! Insertion sort: lift a key, shift greater neighbors right, drop it in.

use crate::context::RunContext;
use crate::core::error::SortError;

pub async fn sort(ctx: &mut RunContext) -> Result<(), SortError> {
    for i in 1..ctx.len() {
        let key = ctx.entry(i)?;
        let mut j = i;
        while j > 0 && ctx.shift_if_greater(j - 1, key.value).await? {
            j -= 1;
        }
        ctx.insert(i, j, key).await?;
    }
    Ok(())
}
