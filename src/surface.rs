/// First capability the surface offers, or an error naming what was missing.
/// Adapters may report empty lists for a surface they cannot present to.
pub fn first_supported<T: Copy>(options: &[T], what: &str) -> anyhow::Result<T> {
    options
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Surface reports no {what}"))
}
