#[cfg(feature = "aws")]
pub mod dynamo;
pub mod memory;

#[cfg(feature = "aws")]
pub use dynamo::DynamoTable;
pub use memory::MemoryTable;

use crate::utils::error::Result;
use std::future::Future;

/// Follows a cursor until the source reports no further page.
///
/// `fetch_page` receives the cursor returned by the previous call (`None`
/// for the first page) and yields that page's items plus the next cursor.
pub async fn collect_pages<K, T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<K>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<K>)>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let (page, next) = fetch_page(cursor.take()).await?;
        pages += 1;
        items.extend(page);

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::debug!("Collected {} items across {} pages", items.len(), pages);
    Ok(items)
}
