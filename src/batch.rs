//! Lazy, cancellable batch alignment.
//!
//! [`Aligner::align_batch`] returns an [`AlignmentStream`], a
//! [`futures::Stream`] that computes pairs on tokio's blocking pool only as
//! the consumer polls. Results come back
//! in input order. A batch ends in one of three ways: it runs out of pairs,
//! its [`CancellationToken`] fires, or its wall-clock budget runs out. The
//! last two are reported as a terminal [`BatchEvent`] and stop any pair
//! still being computed.

use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use canonical::TokenizedText;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use matcher::Interrupt;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::aligner::Aligner;
use crate::error::AlignError;
use crate::result::AlignmentResult;

/// One side of a pair: raw text, or text tokenized ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    Raw(String),
    Tokenized(Arc<TokenizedText>),
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Raw(value.to_string())
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        TextInput::Raw(value)
    }
}

impl From<Arc<TokenizedText>> for TextInput {
    fn from(value: Arc<TokenizedText>) -> Self {
        TextInput::Tokenized(value)
    }
}

impl From<TokenizedText> for TextInput {
    fn from(value: TokenizedText) -> Self {
        TextInput::Tokenized(Arc::new(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPair {
    pub a: TextInput,
    pub b: TextInput,
}

impl BatchPair {
    pub fn new(a: impl Into<TextInput>, b: impl Into<TextInput>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// Cancellation, deadline and parallelism for one streamed batch.
#[derive(Debug, Clone)]
pub struct BatchControl {
    pub cancel: CancellationToken,
    /// Budget for the whole batch, measured from stream creation.
    pub timeout: Option<Duration>,
    /// Pairs computed ahead of the consumer. With 1, a pair is computed only
    /// once the consumer asks for it.
    pub concurrency: usize,
}

impl Default for BatchControl {
    fn default() -> Self {
        Self {
            cancel: CancellationToken::new(),
            timeout: None,
            concurrency: 1,
        }
    }
}

impl BatchControl {
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        if self.concurrency == 0 {
            return Err(AlignError::InvalidConfig(
                "batch concurrency must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// What a stream yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Item {
        index: usize,
        result: Result<AlignmentResult, AlignError>,
    },
    /// The cancellation token fired. No further items follow.
    Cancelled,
    /// The batch budget ran out. No further items follow.
    TimedOut,
}

/// How a batch stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Completed,
    Cancelled,
    TimedOut,
}

/// A drained stream: every emitted slot in input order plus the reason it
/// stopped. `items.len()` is less than the batch size unless `termination`
/// is [`Termination::Completed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub items: Vec<Result<AlignmentResult, AlignError>>,
    pub termination: Termination,
}

/// Stops in-flight matchers on cancellation or when the deadline passes.
struct BatchInterrupt {
    stop: CancellationToken,
    deadline: Option<Instant>,
}

impl Interrupt for BatchInterrupt {
    fn should_stop(&self) -> bool {
        self.stop.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

type Joined = Result<Result<AlignmentResult, AlignError>, JoinError>;

enum Step {
    Next(Option<(usize, Joined)>),
    Cancelled,
    TimedOut,
}

/// State behind an [`AlignmentStream`]: ordered workers plus the signals
/// that can end the batch early.
struct BatchDriver {
    workers: BoxStream<'static, (usize, Joined)>,
    cancel: CancellationToken,
    // Child of `cancel`; also fired on timeout and drop to stop workers.
    stop: CancellationToken,
    deadline: Option<Instant>,
    total: usize,
    emitted: Arc<AtomicUsize>,
    finished: bool,
}

impl BatchDriver {
    async fn step(&mut self) -> Option<BatchEvent> {
        if self.finished {
            return None;
        }
        if self.cancel.is_cancelled() {
            return self.finish(Termination::Cancelled);
        }
        if self.deadline_passed() {
            return self.finish(Termination::TimedOut);
        }

        let deadline = self.deadline;
        let step = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Step::Cancelled,
            _ = wait_for(deadline) => Step::TimedOut,
            next = self.workers.next() => Step::Next(next),
        };

        match step {
            Step::Cancelled => self.finish(Termination::Cancelled),
            Step::TimedOut => self.finish(Termination::TimedOut),
            Step::Next(None) => self.finish(Termination::Completed),
            // A worker that saw the stop signal before the select did.
            Step::Next(Some((_, Ok(Err(AlignError::Interrupted))))) if self.cancel.is_cancelled() => {
                self.finish(Termination::Cancelled)
            }
            Step::Next(Some((_, Ok(Err(AlignError::Interrupted))))) if self.deadline_passed() => {
                self.finish(Termination::TimedOut)
            }
            Step::Next(Some((index, joined))) => {
                let result = joined.unwrap_or_else(|err| Err(AlignError::Worker(err.to_string())));
                self.emitted.fetch_add(1, Ordering::Relaxed);
                Some(BatchEvent::Item { index, result })
            }
        }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Stop workers and log how the batch ended. A completed batch has no
    /// terminal event.
    fn finish(&mut self, termination: Termination) -> Option<BatchEvent> {
        self.finished = true;
        self.stop.cancel();
        self.workers = stream::empty().boxed();
        info!(
            termination = ?termination,
            emitted = self.emitted.load(Ordering::Relaxed),
            total = self.total,
            "batch_finished"
        );
        match termination {
            Termination::Completed => None,
            Termination::Cancelled => Some(BatchEvent::Cancelled),
            Termination::TimedOut => Some(BatchEvent::TimedOut),
        }
    }
}

/// Finite, non-restartable [`Stream`] of batch results.
///
/// Items arrive in input order, at most `concurrency` pairs ahead of the
/// consumer. Must be polled from within a tokio runtime. Dropping the stream
/// stops any pair still in flight.
pub struct AlignmentStream {
    events: BoxStream<'static, BatchEvent>,
    stop: CancellationToken,
    total: usize,
    emitted: Arc<AtomicUsize>,
}

impl AlignmentStream {
    fn new(aligner: Aligner, pairs: Vec<BatchPair>, control: BatchControl) -> Self {
        let stop = control.cancel.child_token();
        let deadline = control.timeout.map(|t| Instant::now() + t);
        let total = pairs.len();
        let emitted = Arc::new(AtomicUsize::new(0));

        let worker_stop = stop.clone();
        let workers = stream::iter(pairs.into_iter().enumerate().map(move |(index, pair)| {
            let aligner = aligner.clone();
            let interrupt = BatchInterrupt {
                stop: worker_stop.clone(),
                deadline,
            };
            async move {
                let joined = tokio::task::spawn_blocking(move || {
                    aligner.run_pair(Some(index), &pair.a, &pair.b, &interrupt)
                })
                .await;
                (index, joined)
            }
        }))
        .buffered(control.concurrency)
        .boxed();

        let driver = BatchDriver {
            workers,
            cancel: control.cancel,
            stop: stop.clone(),
            deadline,
            total,
            emitted: Arc::clone(&emitted),
            finished: false,
        };
        let events = stream::unfold(driver, |mut driver| async move {
            let event = driver.step().await?;
            Some((event, driver))
        })
        .fuse()
        .boxed();

        Self {
            events,
            stop,
            total,
            emitted,
        }
    }

    /// Number of pairs the batch was created with.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Items emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Drain the stream into its items and the reason it stopped.
    pub async fn into_outcome(mut self) -> BatchOutcome {
        let mut items = Vec::with_capacity(self.total);
        let mut termination = Termination::Completed;
        while let Some(event) = self.next().await {
            match event {
                BatchEvent::Item { result, .. } => items.push(result),
                BatchEvent::Cancelled => termination = Termination::Cancelled,
                BatchEvent::TimedOut => termination = Termination::TimedOut,
            }
        }
        BatchOutcome { items, termination }
    }
}

impl Stream for AlignmentStream {
    type Item = BatchEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<BatchEvent>> {
        self.events.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Up to every remaining item plus one terminal event.
        (0, Some(self.total - self.emitted() + 1))
    }
}

impl fmt::Debug for AlignmentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignmentStream")
            .field("total", &self.total)
            .field("emitted", &self.emitted())
            .finish()
    }
}

impl Drop for AlignmentStream {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending::<()>().await,
    }
}

impl Aligner {
    /// Stream the alignment of `pairs` under `control`.
    ///
    /// Nothing is computed until the stream is polled.
    pub fn align_batch(
        &self,
        pairs: Vec<BatchPair>,
        control: BatchControl,
    ) -> Result<AlignmentStream, AlignError> {
        control.validate()?;
        Ok(AlignmentStream::new(self.clone(), pairs, control))
    }

    /// Stream one fixed document (side A) against many candidates (side B).
    ///
    /// The document is tokenized once up front and shared by every pair.
    pub fn stream_one_to_many<I, S>(
        &self,
        document: impl Into<String>,
        candidates: I,
        control: BatchControl,
    ) -> Result<AlignmentStream, AlignError>
    where
        I: IntoIterator<Item = S>,
        S: Into<TextInput>,
    {
        let document = Arc::new(self.tokenize(document)?);
        let pairs = candidates
            .into_iter()
            .map(|candidate| BatchPair {
                a: TextInput::Tokenized(Arc::clone(&document)),
                b: candidate.into(),
            })
            .collect();
        self.align_batch(pairs, control)
    }
}
