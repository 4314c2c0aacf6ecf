//! Behaviour shared by both strategies: drains, cancellation and deadlines.

use std::time::Duration;

use paging_core::{
    CancellationToken, CursorPageRequest, CursorPaging, DrainPages, OffsetPageRequest,
    OffsetPaging, PagingConfig, PagingError, PagingResult, Strategy,
};
use paging_test::{MockRow, MockRowStore};

async fn drain<D: DrainPages>(engine: &D, page_size: i64) -> PagingResult<Vec<D::Row>> {
    engine.select_all(page_size, &CancellationToken::new()).await
}

#[tokio::test]
async fn test_strategies_agree_on_frozen_data() -> PagingResult<()> {
    for (total, page_size) in [(1, 7), (10, 3), (100, 10), (1234, 100), (0, 5)] {
        let store = MockRowStore::with_rows(total);
        let offset = OffsetPaging::new(store.clone());
        let cursor = CursorPaging::new(store.clone());

        assert_eq!(offset.strategy(), Strategy::Offset);
        assert_eq!(cursor.strategy(), Strategy::Cursor);

        let by_offset: Vec<MockRow> = drain(&offset, page_size).await?;
        let by_cursor: Vec<MockRow> = drain(&cursor, page_size).await?;
        assert_eq!(by_offset, by_cursor, "page({page_size}), all {total}");
        assert_eq!(by_offset.len(), total as usize);
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_drains_share_a_store() -> PagingResult<()> {
    // Latency makes the two drains interleave their round trips.
    let store = MockRowStore::with_rows(50).with_latency(Duration::from_millis(5));
    let offset = OffsetPaging::new(store.clone());
    let cursor = CursorPaging::new(store.clone());
    let cancel = CancellationToken::new();

    let (by_offset, by_cursor) = tokio::join!(
        offset.select_all(3, &cancel),
        cursor.select_all(7, &cancel)
    );

    assert_eq!(by_offset?, store.rows());
    assert_eq!(by_cursor?, store.rows());
    assert_eq!(store.len(), 50);

    Ok(())
}

#[tokio::test]
async fn test_two_round_trips_per_page() -> PagingResult<()> {
    // 10 rows in pages of 4: three pages for both strategies.
    let store = MockRowStore::with_rows(10);

    OffsetPaging::new(store.clone())
        .select_all(4, &CancellationToken::new())
        .await?;
    assert_eq!(store.call_count(), 6);

    store.clear_calls();
    CursorPaging::new(store.clone())
        .select_all(4, &CancellationToken::new())
        .await?;
    assert_eq!(store.call_count(), 6);

    Ok(())
}

#[tokio::test]
async fn test_cancelled_token_fails_without_store_access() {
    let store = MockRowStore::with_rows(5);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = OffsetPaging::new(store.clone())
        .select(OffsetPageRequest::new(1, 2), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(error, PagingError::Cancelled));

    let error = CursorPaging::new(store.clone())
        .select_all(2, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(error, PagingError::Cancelled));

    assert_eq!(store.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_interrupts_a_round_trip() {
    let store = MockRowStore::with_rows(5).with_latency(Duration::from_secs(60));
    let engine = CursorPaging::new(store.clone());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let error = engine.select_all(2, &cancel).await.unwrap_err();
    assert!(matches!(error, PagingError::Cancelled));
    assert!(error.is_transient());
    assert_eq!(store.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_round_trip_times_out() {
    let store = MockRowStore::with_rows(5).with_latency(Duration::from_secs(30));
    let config = PagingConfig::default().with_statement_timeout_secs(5);
    let engine = OffsetPaging::with_config(store, config);

    let error = engine
        .select(OffsetPageRequest::new(1, 2), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(error, PagingError::Timeout(d) if d == Duration::from_secs(5)));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_applies_per_round_trip() -> PagingResult<()> {
    // Each call takes 3s: the page takes 6s in total but no single round trip
    // exceeds the 5s deadline.
    let store = MockRowStore::with_rows(5).with_latency(Duration::from_secs(3));
    let config = PagingConfig::default().with_statement_timeout_secs(5);
    let engine = CursorPaging::with_config(store, config);

    let page = engine
        .select(&CursorPageRequest::new(2), &CancellationToken::new())
        .await?;
    assert_eq!(page.size, 2);

    Ok(())
}
