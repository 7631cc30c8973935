use mongodb::{
    bson::{ doc, Document },
    Collection,
    Cursor,
};

// `page` is 1-based. Every collection this service owns sorts on
// `created_at`, so the sort key is fixed here.
pub async fn find_with_pagination<T>(
    collection: &Collection<T>,
    filter: Document,
    ascending: bool,
    limit: u32,
    page: u32,
) -> mongodb::error::Result<Cursor<T>>
where
    T: Unpin + Send + Sync,
{
    let limit = limit.max(1) as i64;

    let sort_order = match ascending {
        true => 1,
        false => -1,
    };

    let skip = limit * (page.saturating_sub(1) as i64);

    collection
        .find(filter)
        .sort(doc! { "created_at": sort_order })
        .limit(limit)
        .skip(skip as u64)
        .await
}
