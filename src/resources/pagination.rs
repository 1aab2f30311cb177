//! Cursor pagination over listing endpoints.

use futures_util::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;

use crate::config::defaults;
use crate::engine::{ApiError, Jitter, RequestEngine, RequestSpec};
use crate::time::Sleeper;
use crate::transport::HttpClient;

use super::models::PaginatedResponse;

/// Streams every item of a listing, following cursors page by page.
///
/// Pages are requested with `limit` set to [`defaults::PAGE_SIZE`] and the
/// current cursor; the walk stops after the first page whose `meta.cursor` is
/// missing or empty. A failed page is yielded as the stream's last item.
///
/// Pages are fetched lazily: nothing is requested until the stream is polled,
/// and the next page is only requested once the current one is drained.
pub fn paginate<'a, T, H, S, J>(
    engine: &'a RequestEngine<H, S, J>,
    spec: RequestSpec,
) -> impl Stream<Item = Result<T, ApiError>>
where
    T: DeserializeOwned,
    H: HttpClient,
    S: Sleeper,
    J: Jitter,
{
    let spec = spec.query("limit", defaults::PAGE_SIZE);

    // `None` once the last page has been fetched; `Some(None)` before the first.
    let start: Option<Option<String>> = Some(None);

    stream::try_unfold(start, move |next| {
        let spec = spec.clone();
        async move {
            let Some(cursor) = next else {
                return Ok(None);
            };

            let page_spec = spec.query("cursor", cursor);
            let page: PaginatedResponse<T> = engine.execute(&page_spec).await?;

            tracing::debug!(
                request = %page_spec,
                items = page.data.len(),
                has_more = page.meta.next_cursor().is_some(),
                "Fetched page"
            );

            let following = page.meta.next_cursor().map(|c| Some(c.to_string()));
            let items = stream::iter(page.data.into_iter().map(Ok::<T, ApiError>));
            Ok::<_, ApiError>(Some((items, following)))
        }
    })
    .try_flatten()
}
