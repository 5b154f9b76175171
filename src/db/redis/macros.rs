/// Read-through caching over an optional Redis cache.
///
/// Looks the key up first and returns the cached value on a hit. On a miss,
/// when no cache is configured, or when the cache read fails, the block is
/// awaited, its value queued for storage in the background, and returned.
/// Errors from the block propagate with `?`.
///
/// # Arguments
/// * `$cache`: an `Option<&Cache>`.
/// * `$key`: the `CacheKey` to read and write.
/// * `$ttl`: time-to-live for stored values in seconds.
/// * `$block`: a future producing `AppResult<T>` on a miss.
///
/// # Example
/// ```rust,ignore
/// let show: Option<Show> = cached!(self.cache.as_ref(), CacheKey::Show(id), 3600, async move {
///     fetch_show(id).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let cache: Option<&$crate::db::Cache> = $cache;
        let key: $crate::db::CacheKey = $key;

        let hit = match cache {
            Some(c) => match c.get_from_cache(&key).await {
                Ok(hit) => hit,
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                    None
                }
            },
            None => None,
        };

        match hit {
            Some(value) => {
                tracing::debug!(key = %key, "Cache hit");
                Ok(value)
            }
            None => match $block.await {
                Ok(value) => {
                    if let Some(c) = cache {
                        c.set_in_background(&key, &value, $ttl);
                    }
                    Ok(value)
                }
                Err(e) => Err(e),
            },
        }
    }};
}
