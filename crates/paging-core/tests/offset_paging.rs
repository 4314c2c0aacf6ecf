//! Offset engine behaviour against the in-memory row store.

use paging_core::{
    CancellationToken, OffsetPageRequest, OffsetPaging, PagingError, PagingResult,
};
use paging_test::{MockCall, MockMutation, MockRow, MockRowStore};

fn names(rows: &[MockRow]) -> Vec<String> {
    rows.iter().map(|row| row.name.clone()).collect()
}

fn users(range: std::ops::RangeInclusive<i64>) -> Vec<String> {
    range.map(|i| format!("User #{i}")).collect()
}

#[tokio::test]
async fn test_select_pages() -> PagingResult<()> {
    // (total rows, page number, page size, expected names, expected total pages)
    let cases = [
        (10, 1, 2, users(1..=2), 5),
        (3, 2, 1, users(2..=2), 3),
        (2, 1, 5, users(1..=2), 1),
        (1, 1, 1, users(1..=1), 1),
        (7, 3, 2, users(5..=6), 4),
        (7, 4, 2, users(7..=7), 4),
    ];

    let cancel = CancellationToken::new();
    for (total, number, size, expected, total_pages) in cases {
        let engine = OffsetPaging::new(MockRowStore::with_rows(total));
        let page = engine
            .select(OffsetPageRequest::new(number, size), &cancel)
            .await?;

        assert_eq!(names(&page.content), expected, "page({number}, {size}) on total {total}");
        assert_eq!(page.number, number);
        assert_eq!(page.size, expected.len() as i64);
        assert_eq!(page.total_elements, total);
        assert_eq!(page.total_pages, total_pages);
    }

    Ok(())
}

#[tokio::test]
async fn test_last_partial_page() -> PagingResult<()> {
    let engine = OffsetPaging::new(MockRowStore::with_rows(7));
    let page = engine
        .select(OffsetPageRequest::new(4, 2), &CancellationToken::new())
        .await?;

    let ids: Vec<i64> = page.content.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![7]);
    assert_eq!(page.size, 1);
    assert_eq!(page.total_pages, 4);
    assert!(page.is_last());

    Ok(())
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() -> PagingResult<()> {
    let engine = OffsetPaging::new(MockRowStore::with_rows(7));
    let page = engine
        .select(OffsetPageRequest::new(10, 2), &CancellationToken::new())
        .await?;

    assert!(page.content.is_empty());
    assert_eq!(page.size, 0);
    assert_eq!(page.number, 10);
    assert_eq!(page.total_pages, 4);

    Ok(())
}

#[tokio::test]
async fn test_huge_page_number_is_empty() -> PagingResult<()> {
    let store = MockRowStore::with_rows(7);
    let engine = OffsetPaging::new(store.clone());
    let page = engine
        .select(OffsetPageRequest::new(i64::MAX / 2, 10), &CancellationToken::new())
        .await?;

    assert!(page.content.is_empty());
    assert_eq!(page.size, 0);
    assert_eq!(page.total_elements, 7);
    assert_eq!(page.total_pages, 1);
    assert_eq!(
        store.calls().last(),
        Some(&MockCall::SelectPage {
            limit: 10,
            offset: i64::MAX
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_huge_page_size_serves_everything() -> PagingResult<()> {
    let engine = OffsetPaging::new(MockRowStore::with_rows(7));
    let cancel = CancellationToken::new();

    let page = engine
        .select(OffsetPageRequest::new(1, i64::MAX), &cancel)
        .await?;
    assert_eq!(names(&page.content), users(1..=7));
    assert_eq!(page.total_pages, 1);

    let page = engine
        .select(OffsetPageRequest::new(2, i64::MAX), &cancel)
        .await?;
    assert!(page.content.is_empty());

    assert_eq!(engine.select_all(i64::MAX, &cancel).await?.len(), 7);

    Ok(())
}

#[tokio::test]
async fn test_empty_store() -> PagingResult<()> {
    let engine = OffsetPaging::new(MockRowStore::new());
    let page = engine
        .select(OffsetPageRequest::new(1, 10), &CancellationToken::new())
        .await?;

    assert!(page.content.is_empty());
    assert_eq!(page.size, 0);
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.total_pages, 0);

    Ok(())
}

#[tokio::test]
async fn test_counts_then_selects() -> PagingResult<()> {
    let store = MockRowStore::with_rows(10);
    let engine = OffsetPaging::new(store.clone());
    engine
        .select(OffsetPageRequest::new(3, 4), &CancellationToken::new())
        .await?;

    assert_eq!(
        store.calls(),
        vec![
            MockCall::Count,
            MockCall::SelectPage {
                limit: 4,
                offset: 8
            }
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_invalid_arguments_do_not_reach_the_store() {
    let store = MockRowStore::with_rows(3);
    let engine = OffsetPaging::new(store.clone());
    let cancel = CancellationToken::new();

    let error = engine
        .select(OffsetPageRequest::new(1, 0), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(error, PagingError::InvalidPageSize(0)));

    let error = engine
        .select(OffsetPageRequest::new(0, 5), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(error, PagingError::InvalidPageNumber(0)));

    let error = engine.select_all(-1, &cancel).await.unwrap_err();
    assert!(matches!(error, PagingError::InvalidPageSize(-1)));

    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let store = MockRowStore::with_rows(3).with_failure_on_call(2);
    let engine = OffsetPaging::new(store);

    let error = engine
        .select(OffsetPageRequest::new(1, 2), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(error, PagingError::Store { transient: false, .. }));
}

#[tokio::test]
async fn test_select_all_drains_every_row() -> PagingResult<()> {
    // (rows, page size) pairs, including uneven and single-page sizes.
    let cases = [(7, 1), (10, 3), (100, 10), (1234, 100), (5, 5), (5, 50), (0, 3)];

    let cancel = CancellationToken::new();
    for (total, page_size) in cases {
        let store = MockRowStore::with_rows(total);
        let engine = OffsetPaging::new(store.clone());

        let rows = engine.select_all(page_size, &cancel).await?;
        assert_eq!(rows, store.rows(), "page({page_size}), all {total}");
    }

    Ok(())
}

#[tokio::test]
async fn test_select_all_fetches_each_page_once() -> PagingResult<()> {
    let store = MockRowStore::with_rows(10);
    let engine = OffsetPaging::new(store.clone());
    engine.select_all(3, &CancellationToken::new()).await?;

    let offsets: Vec<i64> = store
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            MockCall::SelectPage { offset, .. } => Some(offset),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, vec![0, 3, 6, 9]);

    Ok(())
}

#[tokio::test]
async fn test_select_all_on_empty_store_stops_after_one_page() -> PagingResult<()> {
    let store = MockRowStore::new();
    let engine = OffsetPaging::new(store.clone());

    let rows = engine.select_all(10, &CancellationToken::new()).await?;
    assert!(rows.is_empty());
    assert_eq!(store.call_count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_select_all_aborts_without_partial_content() {
    // Calls 1-2 serve page 1, calls 3-4 serve page 2.
    let store = MockRowStore::with_rows(6).with_failure_on_call(4);
    let engine = OffsetPaging::new(store);

    let result = engine.select_all(2, &CancellationToken::new()).await;
    assert!(matches!(result, Err(PagingError::Store { .. })));
}

#[tokio::test]
async fn test_select_all_terminates_when_store_shrinks() -> PagingResult<()> {
    // After page 2 is served, six rows disappear: page 3 sees two pages in total.
    let store = MockRowStore::with_rows(10)
        .with_mutation_after_call(4, MockMutation::DeleteLast(6));
    let engine = OffsetPaging::new(store);

    let rows = engine.select_all(2, &CancellationToken::new()).await?;
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    Ok(())
}

#[tokio::test]
async fn test_select_all_follows_a_growing_store() -> PagingResult<()> {
    // Two rows appear after the first page; the next count reports them.
    let store =
        MockRowStore::with_rows(4).with_mutation_after_call(2, MockMutation::Insert(2));
    let engine = OffsetPaging::new(store);

    let rows = engine.select_all(2, &CancellationToken::new()).await?;
    assert_eq!(rows.len(), 6);

    Ok(())
}
