use std::future::Future;

use crate::{error::Result, types::Paging};

/// Reads a whole offset-paginated collection.
///
/// Pages of `page_size` are requested starting at offset 0; each next offset is
/// the number of raw entries received so far, `null` entries included.
/// `normalize` receives every page as it arrives together with that page's
/// offset, and its output is appended in order. It may skip entries, since
/// offsets never depend on its output. The loop ends once the received count
/// reaches the total reported by the last page. A page without a total counts
/// its own length as the total, which stops after that page. An empty page
/// also ends the loop.
///
/// # Example
///
/// ```
/// let tracks = collect_pages(
///     50,
///     |offset, limit| client.playlist_tracks_page(id, offset, limit),
///     |items, offset| {
///         normalize::tracks_page(items, PageContext { playlist_id: Some(id), offset })
///     },
/// )
/// .await?;
/// ```
pub async fn collect_pages<T, U, F, Fut, N>(
    page_size: usize,
    mut fetch: F,
    mut normalize: N,
) -> Result<Vec<U>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Paging<T>>>,
    N: FnMut(&[Option<T>], usize) -> Vec<U>,
{
    let mut collected: Vec<U> = Vec::new();
    let mut received = 0;

    loop {
        let offset = received;
        let page = fetch(offset, page_size).await?;
        let len = page.items.len();
        let total = page.total.unwrap_or(len);

        received += len;
        collected.extend(normalize(&page.items, offset));

        if len == 0 || received >= total {
            break;
        }
    }

    Ok(collected)
}
