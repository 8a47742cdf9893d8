// crates/unifi-network-core/src/executor.rs
// ============================================================================
// Module: Request Executor
// Description: Retry loop, sequential and concurrent pagination, lazy page
//              iteration.
// Purpose: Drive requests through the transport with retries, and walk
//          paginated collections to completion.
// Dependencies: crate::{envelope, error, page, retry, telemetry, transport}
// ============================================================================

//! ## Overview
//! The executor owns the request lifecycle above the transport seam. A
//! single [`Executor::execute`] call re-sends idempotent requests on
//! transport and 5xx failures until the retry budget is spent; 4xx
//! responses and non-idempotent failures surface immediately.
//!
//! Collection traversal comes in three shapes: [`Executor::fetch_all`]
//! aggregates every page sequentially, [`Executor::pages`] yields items
//! lazily one page ahead of the caller, and
//! [`Executor::fetch_all_concurrent`] fans remaining pages out across a
//! bounded worker pool once the first page has revealed the collection
//! size. All three advance offsets by the actual item count of each page,
//! so a short page never skips items.
//!
//! Cancellation is checked between page fetches; an in-flight request is
//! allowed to complete.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::thread;

use serde::de::DeserializeOwned;

use crate::envelope::PageEnvelope;
use crate::envelope::decode_error;
use crate::envelope::decode_page;
use crate::error::ApiClientError;
use crate::error::RetryClass;
use crate::page::PagedQuery;
use crate::retry::Idempotency;
use crate::retry::RetryPolicy;
use crate::retry::Sleeper;
use crate::retry::ThreadSleeper;
use crate::telemetry::NoopTelemetry;
use crate::telemetry::PageFetchEvent;
use crate::telemetry::RetryAttemptEvent;
use crate::telemetry::TelemetrySink;
use crate::transport::ApiRequest;
use crate::transport::CancelToken;
use crate::transport::RawResponse;
use crate::transport::Transport;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default worker count for concurrent page fetching.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Shared production sleeper.
static THREAD_SLEEPER: ThreadSleeper = ThreadSleeper;

/// Shared discard-everything sink.
static NOOP_TELEMETRY: NoopTelemetry = NoopTelemetry;

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Drives requests through a transport with retries and pagination.
///
/// # Invariants
/// - `execute` performs at most `policy.max_attempts` sends per call.
/// - Non-idempotent requests are sent at most once per call.
pub struct Executor<'a> {
    /// HTTP capability used for every send.
    transport: &'a dyn Transport,
    /// Attempt budget and backoff schedule.
    policy: RetryPolicy,
    /// Clock seam for retry delays.
    sleeper: &'a dyn Sleeper,
    /// Observation sink for retries and page fetches.
    telemetry: &'a dyn TelemetrySink,
    /// Cooperative cancellation signal.
    cancel: CancelToken,
}

impl<'a> Executor<'a> {
    /// Builds an executor with the default policy, a real sleeper, and no
    /// telemetry.
    #[must_use]
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            sleeper: &THREAD_SLEEPER,
            telemetry: &NOOP_TELEMETRY,
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the sleeper used for retry delays.
    #[must_use]
    pub const fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Attaches a telemetry sink.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the cancellation token this executor observes.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // ========================================================================
    // SECTION: Single Requests
    // ========================================================================

    /// Sends a request, retrying retryable failures per policy.
    ///
    /// Non-idempotent requests are sent exactly once; their failures
    /// surface without consuming the retry budget.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, or
    /// [`ApiClientError::RetryExhausted`] wrapping the last retryable
    /// failure once the attempt budget is spent.
    pub fn execute(
        &self,
        request: &ApiRequest,
        idempotency: Idempotency,
    ) -> Result<RawResponse, ApiClientError> {
        let max_attempts = match idempotency {
            Idempotency::Idempotent => self.policy.max_attempts.get(),
            Idempotency::NonIdempotent => 1,
        };

        let mut attempt = 1u32;
        loop {
            if self.cancel.is_cancelled() {
                return Err(ApiClientError::Cancelled);
            }

            let error = match self.transport.send(request) {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => decode_error(response.status, &response.body),
                Err(failure) => ApiClientError::from(failure),
            };

            if error.retry_class() == RetryClass::Fatal {
                return Err(error);
            }
            if idempotency == Idempotency::NonIdempotent {
                return Err(error);
            }
            if attempt >= max_attempts {
                return Err(ApiClientError::RetryExhausted {
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            let delay = self.policy.backoff.delay_for(attempt - 1);
            self.telemetry.retry_attempt(RetryAttemptEvent {
                request: format!("{} {}", request.method, request.path),
                attempt,
                max_attempts,
                error_kind: error.kind_label(),
                delay,
            });
            self.sleeper.sleep(delay);
            attempt += 1;
        }
    }

    // ========================================================================
    // SECTION: Page Fetching
    // ========================================================================

    /// Fetches and decodes a single page of a paged query.
    ///
    /// # Errors
    ///
    /// Returns any execution failure, or [`ApiClientError::Decode`] when
    /// the 2xx body is not a valid pagination envelope.
    pub fn fetch_page<T>(
        &self,
        query: &PagedQuery,
        offset: u64,
    ) -> Result<PageEnvelope<T>, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let request = query.page_request(offset);
        let response = self.execute(&request, Idempotency::Idempotent)?;
        let envelope = decode_page(&response.body)?;
        self.telemetry.page_fetched(PageFetchEvent {
            path: query.path().to_owned(),
            offset: envelope.offset,
            count: envelope.count,
            total_count: envelope.total_count,
        });
        Ok(envelope)
    }

    /// Fetches every page sequentially and returns the concatenated items.
    ///
    /// The offset advances by each page's actual item count, and traversal
    /// stops when a page is empty or the accumulated offset reaches the
    /// server's reported total.
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered; items from earlier pages are
    /// discarded.
    pub fn fetch_all<T>(&self, query: &PagedQuery) -> Result<Vec<T>, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut offset = query.start_offset();
        loop {
            let page: PageEnvelope<T> = self.fetch_page(query, offset)?;
            let count = page.count;
            let total = page.total_count;
            items.extend(page.data);
            if count == 0 {
                break;
            }
            offset += count;
            if offset >= total {
                break;
            }
        }
        Ok(items)
    }

    /// Returns a lazy iterator over every item of a paged query.
    ///
    /// Pages are fetched on demand as the caller drains the previous one;
    /// failures surface as `Err` items and end the iteration.
    #[must_use]
    pub fn pages<T>(&self, query: PagedQuery) -> PageIter<'_, 'a, T>
    where
        T: DeserializeOwned,
    {
        let offset = query.start_offset();
        PageIter {
            executor: self,
            query,
            buffer: VecDeque::new(),
            offset,
            total: None,
            finished: false,
        }
    }

    /// Fetches every page using a bounded worker pool.
    ///
    /// The first page is fetched alone to learn the collection size; the
    /// remaining offsets are computed at limit stride and distributed to at
    /// most `workers` threads. Items are returned in offset order, so the
    /// result matches [`Executor::fetch_all`] when the collection is
    /// stable.
    ///
    /// # Errors
    ///
    /// Returns the first failure observed by any worker; remaining work is
    /// abandoned.
    pub fn fetch_all_concurrent<T>(
        &self,
        query: &PagedQuery,
        workers: usize,
    ) -> Result<Vec<T>, ApiClientError>
    where
        T: DeserializeOwned + Send,
    {
        let first: PageEnvelope<T> = self.fetch_page(query, query.start_offset())?;
        let limit = query.effective_limit();
        let total = first.total_count;
        let mut next_offset = query.start_offset() + first.count;
        if first.count == 0 || next_offset >= total || limit == 0 {
            return Ok(first.data);
        }

        // Remaining pages at limit stride; short pages past the first are
        // rare and detected by the count check below.
        let mut offsets = VecDeque::new();
        while next_offset < total {
            offsets.push_back(next_offset);
            next_offset += limit;
        }

        let worker_count = workers.clamp(1, offsets.len());
        let queue = Mutex::new(offsets);
        let pages: Mutex<Vec<(u64, Vec<T>)>> = Mutex::new(Vec::new());
        let failure: Mutex<Option<ApiClientError>> = Mutex::new(None);

        thread::scope(|scope| {
            for _ in 0 .. worker_count {
                scope.spawn(|| {
                    loop {
                        if lock(&failure).is_some() || self.cancel.is_cancelled() {
                            return;
                        }
                        let Some(offset) = lock(&queue).pop_front() else {
                            return;
                        };
                        match self.fetch_page::<T>(query, offset) {
                            Ok(page) => {
                                lock(&pages).push((offset, page.data));
                            }
                            Err(error) => {
                                let mut slot = lock(&failure);
                                if slot.is_none() {
                                    *slot = Some(error);
                                }
                                return;
                            }
                        }
                    }
                });
            }
        });

        if let Some(error) = lock(&failure).take() {
            return Err(error);
        }
        if self.cancel.is_cancelled() {
            return Err(ApiClientError::Cancelled);
        }

        let mut fetched = pages.into_inner().unwrap_or_else(PoisonError::into_inner);
        fetched.sort_by_key(|(offset, _)| *offset);
        let mut items = first.data;
        for (_, data) in fetched {
            items.extend(data);
        }
        Ok(items)
    }
}

/// Locks a mutex, recovering the guard if a worker panicked while holding
/// it.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// SECTION: Lazy Page Iteration
// ============================================================================

/// Lazy item iterator over a paged query.
///
/// # Invariants
/// - At most one page beyond what the caller has consumed is ever resident.
/// - After yielding an `Err`, the iterator is exhausted.
pub struct PageIter<'e, 'a, T> {
    /// Executor performing the fetches.
    executor: &'e Executor<'a>,
    /// The query being traversed.
    query: PagedQuery,
    /// Items of the current page not yet handed out.
    buffer: VecDeque<T>,
    /// Offset of the next page to fetch.
    offset: u64,
    /// Server-reported total from the most recent page.
    total: Option<u64>,
    /// Whether traversal has ended, successfully or not.
    finished: bool,
}

impl<T> Iterator for PageIter<'_, '_, T>
where
    T: DeserializeOwned,
{
    type Item = Result<T, ApiClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if let Some(total) = self.total
                && self.offset >= total
            {
                self.finished = true;
                return None;
            }

            let page: PageEnvelope<T> = match self.executor.fetch_page(&self.query, self.offset) {
                Ok(page) => page,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            };
            if page.count == 0 {
                self.finished = true;
                return None;
            }
            self.offset += page.count;
            self.total = Some(page.total_count);
            self.buffer = page.data.into();
        }
    }
}
