// crates/unifi-network-core/tests/pagination.rs
// ============================================================================
// Test Module: Pagination
// Coverage: Sequential aggregation, offset advancement, lazy iteration,
//           limit validation, and concurrent fetching.
// ============================================================================
//! ## Overview
//! Integration tests for the executor's three collection-traversal shapes,
//! using integer items so page contents are easy to verify.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::collections::HashMap;

use support::TestResult;
use support::ensure;
use support::fail;
use support::mocks::CountingSleeper;
use support::mocks::PagedTransport;
use support::mocks::RecordingTelemetry;
use support::mocks::ScriptedTransport;
use support::mocks::json_response;
use support::mocks::page_body;
use unifi_network_core::ApiClientError;
use unifi_network_core::Executor;
use unifi_network_core::PageBounds;
use unifi_network_core::PagedQuery;
use unifi_network_core::RetryPolicy;

// ========================================================================
// SECTION: Fixtures
// ========================================================================

/// Builds a scripted 200 response for one page of consecutive integers.
fn page_of(
    offset: u64,
    limit: u64,
    total_count: u64,
    range: std::ops::Range<i64>,
) -> Result<unifi_network_core::RawResponse, unifi_network_core::TransportFailure> {
    let items: Vec<i64> = range.collect();
    Ok(json_response(200, &page_body(offset, limit, total_count, &items)))
}

/// Extracts the offset query parameter of a recorded request.
fn offset_of(request: &unifi_network_core::ApiRequest) -> Option<String> {
    request
        .query
        .iter()
        .find(|(key, _)| key == "offset")
        .map(|(_, value)| value.clone())
}

// ========================================================================
// SECTION: Sequential Traversal
// ========================================================================

/// Tests every page is fetched and concatenated in order.
#[test]
fn aggregates_pages_in_order() -> TestResult {
    let transport = ScriptedTransport::new(vec![
        page_of(0, 25, 60, 0 .. 25),
        page_of(25, 25, 60, 25 .. 50),
        page_of(50, 25, 60, 50 .. 60),
    ]);
    let telemetry = RecordingTelemetry::default();
    let executor = Executor::new(&transport).with_telemetry(&telemetry);
    let query = PagedQuery::new("/sites/s1/devices", PageBounds::standard());

    let items: Vec<i64> = executor.fetch_all(&query)?;
    let expected: Vec<i64> = (0 .. 60).collect();
    ensure(items == expected, "expected all items in offset order")?;
    ensure(transport.sent() == 3, "expected three page fetches")?;

    let events = telemetry.pages();
    ensure(events.len() == 3, "expected one event per page")?;
    ensure(events[0].path == "/sites/s1/devices", "expected endpoint path in events")?;
    ensure(events[2].offset == 50, "expected last event at offset 50")?;
    Ok(())
}

/// Tests the offset advances by the actual item count of each page.
#[test]
fn advances_offset_by_actual_count() -> TestResult {
    // The first page comes back short of the requested limit; the next
    // request must pick up exactly where the data ended.
    let transport = ScriptedTransport::new(vec![
        page_of(0, 25, 40, 0 .. 10),
        page_of(10, 25, 40, 10 .. 35),
        page_of(35, 25, 40, 35 .. 40),
    ]);
    let executor = Executor::new(&transport);
    let query = PagedQuery::new("/sites/s1/clients", PageBounds::standard());

    let items: Vec<i64> = executor.fetch_all(&query)?;
    ensure(items.len() == 40, "expected all forty items")?;

    let offsets: Vec<Option<String>> = transport.requests().iter().map(offset_of).collect();
    ensure(
        offsets
            == [
                Some("0".to_owned()),
                Some("10".to_owned()),
                Some("35".to_owned()),
            ],
        "expected offsets to track actual counts",
    )?;
    Ok(())
}

/// Tests an empty page ends traversal immediately.
#[test]
fn stops_on_empty_page() -> TestResult {
    // totalCount may overstate the collection; an empty page is final.
    let transport = ScriptedTransport::new(vec![page_of(0, 25, 100, 0 .. 0)]);
    let executor = Executor::new(&transport);
    let query = PagedQuery::new("/sites", PageBounds::standard());

    let items: Vec<i64> = executor.fetch_all(&query)?;
    ensure(items.is_empty(), "expected no items")?;
    ensure(transport.sent() == 1, "expected a single fetch")?;
    Ok(())
}

/// Tests a non-zero start offset is honored.
#[test]
fn starts_at_requested_offset() -> TestResult {
    let transport = ScriptedTransport::new(vec![page_of(50, 25, 60, 50 .. 60)]);
    let executor = Executor::new(&transport);
    let query =
        PagedQuery::new("/sites/s1/devices", PageBounds::standard()).with_start_offset(50);

    let items: Vec<i64> = executor.fetch_all(&query)?;
    ensure(items.len() == 10, "expected the final ten items")?;
    ensure(
        offset_of(&transport.requests()[0]) == Some("50".to_owned()),
        "expected the first request at offset 50",
    )?;
    Ok(())
}

// ========================================================================
// SECTION: Lazy Iteration
// ========================================================================

/// Tests pages are fetched only as the caller consumes items.
#[test]
fn lazy_iterator_fetches_on_demand() -> TestResult {
    let transport = ScriptedTransport::new(vec![
        page_of(0, 2, 4, 0 .. 2),
        page_of(2, 2, 4, 2 .. 4),
    ]);
    let executor = Executor::new(&transport);
    let query = PagedQuery::new("/sites", PageBounds::standard()).with_limit(2)?;

    let mut iter = executor.pages::<i64>(query);
    ensure(iter.next().transpose()? == Some(0), "expected first item")?;
    ensure(transport.sent() == 1, "expected only the first page so far")?;
    ensure(iter.next().transpose()? == Some(1), "expected second item")?;
    ensure(transport.sent() == 1, "expected no fetch while the buffer holds items")?;
    ensure(iter.next().transpose()? == Some(2), "expected third item")?;
    ensure(transport.sent() == 2, "expected the second page now")?;
    ensure(iter.next().transpose()? == Some(3), "expected fourth item")?;
    ensure(iter.next().is_none(), "expected exhaustion")?;
    ensure(transport.sent() == 2, "expected no fetch past the reported total")?;
    Ok(())
}

/// Tests a failing fetch surfaces as an error item and ends iteration.
#[test]
fn lazy_iterator_ends_after_error() -> TestResult {
    let transport = ScriptedTransport::new(vec![
        page_of(0, 2, 4, 0 .. 2),
        Ok(json_response(500, &serde_json::json!({"message": "boom"}))),
    ]);
    let sleeper = CountingSleeper::default();
    let executor = Executor::new(&transport)
        .with_policy(RetryPolicy::none())
        .with_sleeper(&sleeper);
    let query = PagedQuery::new("/sites", PageBounds::standard()).with_limit(2)?;

    let mut iter = executor.pages::<i64>(query);
    ensure(iter.next().transpose()? == Some(0), "expected first item")?;
    ensure(iter.next().transpose()? == Some(1), "expected second item")?;
    match iter.next() {
        Some(Err(ApiClientError::RetryExhausted {
            attempts: 1, ..
        })) => {}
        other => return fail(format!("expected a surfaced failure, got {other:?}")),
    }
    ensure(iter.next().is_none(), "expected no items after a failure")?;
    Ok(())
}

// ========================================================================
// SECTION: Limit Validation
// ========================================================================

/// Tests page limits are validated against the endpoint's bounds.
#[test]
fn rejects_out_of_bounds_limits() -> TestResult {
    let standard = PagedQuery::new("/sites", PageBounds::standard());
    match standard.clone().with_limit(0) {
        Err(ApiClientError::InvalidRequest {
            ..
        }) => {}
        other => return fail(format!("expected zero limit rejection, got {other:?}")),
    }
    match standard.with_limit(201) {
        Err(ApiClientError::InvalidRequest {
            ..
        }) => {}
        other => return fail(format!("expected over-limit rejection, got {other:?}")),
    }

    let vouchers = PagedQuery::new("/sites/s1/hotspot/vouchers", PageBounds::vouchers());
    ensure(vouchers.clone().with_limit(1000).is_ok(), "expected voucher cap of 1000")?;
    match vouchers.with_limit(1001) {
        Err(ApiClientError::InvalidRequest {
            ..
        }) => Ok(()),
        other => fail(format!("expected voucher over-limit rejection, got {other:?}")),
    }
}

// ========================================================================
// SECTION: Concurrent Fetching
// ========================================================================

/// Builds an offset-keyed transport over a collection of consecutive
/// integers.
fn paged_collection(total: i64, limit: u64) -> PagedTransport {
    let mut pages = HashMap::new();
    let mut offset = 0i64;
    while offset < total {
        let end = (offset + i64::try_from(limit).unwrap()).min(total);
        let items: Vec<i64> = (offset .. end).collect();
        let offset_u64 = u64::try_from(offset).unwrap();
        pages.insert(
            offset_u64,
            json_response(
                200,
                &page_body(offset_u64, limit, u64::try_from(total).unwrap(), &items),
            ),
        );
        offset = end;
    }
    PagedTransport::new(pages)
}

/// Tests concurrent fetching returns items in offset order.
#[test]
fn concurrent_fetch_preserves_order() -> TestResult {
    let transport = paged_collection(50, 10);
    let executor = Executor::new(&transport);
    let query = PagedQuery::new("/sites/s1/clients", PageBounds::standard()).with_limit(10)?;

    let items: Vec<i64> = executor.fetch_all_concurrent(&query, 4)?;
    let expected: Vec<i64> = (0 .. 50).collect();
    ensure(items == expected, "expected offset-ordered concatenation")?;
    ensure(transport.sent() == 5, "expected one fetch per page")?;
    Ok(())
}

/// Tests a single-page collection never spawns workers.
#[test]
fn concurrent_fetch_short_circuits_single_page() -> TestResult {
    let transport = paged_collection(5, 10);
    let executor = Executor::new(&transport);
    let query = PagedQuery::new("/sites", PageBounds::standard()).with_limit(10)?;

    let items: Vec<i64> = executor.fetch_all_concurrent(&query, 4)?;
    ensure(items.len() == 5, "expected the lone page's items")?;
    ensure(transport.sent() == 1, "expected a single fetch")?;
    Ok(())
}

/// Tests a worker failure propagates and abandons remaining work.
#[test]
fn concurrent_fetch_propagates_failure() -> TestResult {
    // Page at offset 20 is missing, so its fetch fails at the transport.
    let mut pages = HashMap::new();
    for offset in [0u64, 10, 30, 40] {
        let start = i64::try_from(offset).unwrap();
        let items: Vec<i64> = (start .. start + 10).collect();
        pages.insert(offset, json_response(200, &page_body(offset, 10, 50, &items)));
    }
    let transport = PagedTransport::new(pages);
    let sleeper = CountingSleeper::default();
    let executor = Executor::new(&transport)
        .with_policy(RetryPolicy::none())
        .with_sleeper(&sleeper);
    let query = PagedQuery::new("/sites/s1/clients", PageBounds::standard()).with_limit(10)?;

    match executor.fetch_all_concurrent::<i64>(&query, 2) {
        Err(ApiClientError::RetryExhausted {
            last, ..
        }) => ensure(
            matches!(*last, ApiClientError::Transport { .. }),
            "expected the missing page's transport failure",
        ),
        other => fail(format!("expected a propagated failure, got {other:?}")),
    }
}
