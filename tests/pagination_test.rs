use std::cell::RefCell;

use spotiweb::{
    error::{ApiError, Error},
    management::pagination::collect_pages,
    types::Paging,
};

// Helper function to serve a slice of `source` the way an offset API would
fn page(source: &[u32], offset: usize, limit: usize, with_total: bool) -> Paging<u32> {
    let end = (offset + limit).min(source.len());
    let start = offset.min(end);
    Paging {
        items: source[start..end].iter().copied().map(Some).collect(),
        total: with_total.then_some(source.len()),
    }
}

fn flat(items: &[Option<u32>]) -> Vec<u32> {
    items.iter().flatten().copied().collect()
}

#[tokio::test]
async fn test_collects_every_page_in_order() {
    let source: Vec<u32> = (0..23).collect();
    let requests = RefCell::new(Vec::new());

    let collected = collect_pages(
        10,
        |offset, limit| {
            requests.borrow_mut().push((offset, limit));
            let page = page(&source, offset, limit, true);
            async move { Ok(page) }
        },
        |items, offset| {
            items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (offset + i, v)))
                .collect()
        },
    )
    .await
    .unwrap();

    // Exactly total items, in source order, each tagged with its absolute index
    assert_eq!(collected.len(), 23);
    assert!(collected.iter().all(|(index, value)| *index == *value as usize));

    // Offsets follow the number of items received so far
    assert_eq!(*requests.borrow(), vec![(0, 10), (10, 10), (20, 10)]);
}

#[tokio::test]
async fn test_null_entries_still_advance_the_offset() {
    let requests = RefCell::new(Vec::new());

    let collected = collect_pages(
        3,
        |offset, _| {
            requests.borrow_mut().push(offset);
            let items = match offset {
                0 => vec![Some(1), None, Some(3)],
                _ => vec![None, Some(5)],
            };
            async move {
                Ok(Paging {
                    items,
                    total: Some(5),
                })
            }
        },
        |items, _| flat(items),
    )
    .await
    .unwrap();

    assert_eq!(collected, vec![1, 3, 5]);
    assert_eq!(*requests.borrow(), vec![0, 3]);
}

#[tokio::test]
async fn test_missing_total_reads_one_page() {
    let source: Vec<u32> = (0..120).collect();
    let calls = RefCell::new(0);

    let collected = collect_pages(
        50,
        |offset, limit| {
            *calls.borrow_mut() += 1;
            let page = page(&source, offset, limit, false);
            async move { Ok(page) }
        },
        |items, _| flat(items),
    )
    .await
    .unwrap();

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(collected.len(), 50);
}

#[tokio::test]
async fn test_empty_page_stops() {
    let calls = RefCell::new(0);

    // The API claims more items than it ever delivers
    let collected = collect_pages(
        10,
        |_, _| {
            *calls.borrow_mut() += 1;
            let items = if *calls.borrow() == 1 {
                vec![Some(1), Some(2), Some(3)]
            } else {
                vec![]
            };
            async move {
                Ok(Paging {
                    items,
                    total: Some(40),
                })
            }
        },
        |items, _| flat(items),
    )
    .await
    .unwrap();

    assert_eq!(collected, vec![1, 2, 3]);
    assert_eq!(*calls.borrow(), 2);
}

#[tokio::test]
async fn test_empty_collection() {
    let collected = collect_pages(
        10,
        |_, _| async {
            Ok(Paging {
                items: vec![],
                total: Some(0),
            })
        },
        |items, _| flat(items),
    )
    .await
    .unwrap();

    assert!(collected.is_empty());
}

#[tokio::test]
async fn test_page_error_is_returned() {
    let result = collect_pages(
        10,
        |offset, _| async move {
            if offset == 0 {
                Ok(Paging {
                    items: vec![Some(1); 10],
                    total: Some(30),
                })
            } else {
                Err(Error::Vendor {
                    operation: "getPlaylistTracks",
                    source: ApiError::EmptyBody,
                })
            }
        },
        |items, _| flat(items),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::Vendor {
            operation: "getPlaylistTracks",
            ..
        })
    ));
}
