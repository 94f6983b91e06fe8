//! Background executor for palette extraction and theme derivation.
//!
//! Requests are queued on an unbounded channel and drained by one worker,
//! which admits at most `max_concurrent` of them at a time through a
//! semaphore. Each admitted request extracts a palette (or takes it from the
//! cache), derives the theme, and publishes the result both to the request's
//! own [ThemeTicket] and to every [subscriber](ThemeExecutor::subscribe).
//!
//! A timed-out extraction is reported as failed right away, but its slot stays
//! taken until the extraction itself has finished.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tinta_theme::palette::Palette;
use tinta_theme::theme::{Theme, ThemeDeriver};
use tokio::sync::{broadcast, mpsc, oneshot, Semaphore};
use tokio::task::JoinHandle;

use crate::cache::PaletteCache;
use crate::events::{create_theme_event_channel, ThemeEvent};
use crate::extract::{ExtractError, PaletteExtractor};
use crate::gallery::ThemeRequest;

/// Default extraction timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Scheduling limits for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Maximum number of extractions running at once, clamped to
    /// `1..=Semaphore::MAX_PERMITS`.
    pub max_concurrent: usize,
    /// Time allowed for one extraction.
    pub timeout: Duration,
    /// Palettes kept in the cache; `0` disables caching.
    pub cache_capacity: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            max_concurrent: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(4),
            timeout: DEFAULT_TIMEOUT,
            cache_capacity: crate::cache::DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Task for theme generation.
struct ThemeTask {
    request: ThemeRequest,
    reply: Option<oneshot::Sender<ThemeEvent>>,
}

/// The pending result of one [ThemeExecutor::request].
///
/// Dropping the ticket before the executor starts on the request cancels it.
#[derive(Debug)]
pub struct ThemeTicket {
    request: ThemeRequest,
    rx: oneshot::Receiver<ThemeEvent>,
}

impl ThemeTicket {
    /// The request this ticket belongs to.
    pub fn request(&self) -> &ThemeRequest {
        &self.request
    }

    /// Wait for the result.
    ///
    /// If the executor shuts down first, a failure event is returned.
    pub async fn resolve(self) -> ThemeEvent {
        match self.rx.await {
            Ok(event) => event,
            Err(_) => ThemeEvent::ThemeFailed {
                key: self.request.key,
                generation: self.request.generation,
                error: ExtractError::ExecutorClosed.to_string(),
            },
        }
    }
}

/// State shared by every in-flight task.
struct Worker {
    extractor: Arc<dyn PaletteExtractor>,
    deriver: ThemeDeriver,
    cache: Option<Arc<PaletteCache>>,
    timeout: Duration,
    event_tx: broadcast::Sender<ThemeEvent>,
}

/// Executor for background theme generation.
pub struct ThemeExecutor {
    task_tx: mpsc::UnboundedSender<ThemeTask>,
    event_tx: broadcast::Sender<ThemeEvent>,
    cache: Option<Arc<PaletteCache>>,
    semaphore: Arc<Semaphore>,
}

impl ThemeExecutor {
    /// Create a new executor.
    ///
    /// Must be called from within a tokio runtime; the worker is spawned
    /// immediately.
    pub fn new(
        extractor: Arc<dyn PaletteExtractor>,
        deriver: ThemeDeriver,
        options: ExecutorOptions,
    ) -> Self {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let event_tx = create_theme_event_channel();
        let cache = (options.cache_capacity > 0)
            .then(|| Arc::new(PaletteCache::new(options.cache_capacity)));
        let permits = options.max_concurrent.clamp(1, Semaphore::MAX_PERMITS);
        let semaphore = Arc::new(Semaphore::new(permits));

        let worker = Arc::new(Worker {
            extractor,
            deriver,
            cache: cache.clone(),
            timeout: options.timeout,
            event_tx: event_tx.clone(),
        });

        log::debug!("Starting theme executor with {} concurrent extractions", permits);
        tokio::spawn(Self::worker_task(task_rx, worker, semaphore.clone()));

        Self {
            task_tx,
            event_tx,
            cache,
            semaphore,
        }
    }

    /// Queue a request and return a ticket for its result.
    pub fn request(&self, request: ThemeRequest) -> Result<ThemeTicket, ExtractError> {
        let (reply, rx) = oneshot::channel();
        self.queue(ThemeTask {
            request: request.clone(),
            reply: Some(reply),
        })?;
        Ok(ThemeTicket { request, rx })
    }

    /// Queue a request whose result is only published to subscribers.
    pub fn submit(&self, request: ThemeRequest) -> Result<(), ExtractError> {
        self.queue(ThemeTask {
            request,
            reply: None,
        })
    }

    /// Queue every request and wait for all results, in request order.
    pub async fn theme_all(
        &self,
        requests: impl IntoIterator<Item = ThemeRequest>,
    ) -> Result<Vec<ThemeEvent>, ExtractError> {
        let tickets = requests
            .into_iter()
            .map(|request| self.request(request))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(join_all(tickets.into_iter().map(ThemeTicket::resolve)).await)
    }

    /// Subscribe to theme events.
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeEvent> {
        self.event_tx.subscribe()
    }

    /// The palette cache, if enabled.
    pub fn cache(&self) -> Option<&Arc<PaletteCache>> {
        self.cache.as_ref()
    }

    /// Extraction slots currently free.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    fn queue(&self, task: ThemeTask) -> Result<(), ExtractError> {
        self.task_tx
            .send(task)
            .map_err(|_| ExtractError::ExecutorClosed)
    }

    /// Background worker task that admits requests under the semaphore.
    async fn worker_task(
        mut task_rx: mpsc::UnboundedReceiver<ThemeTask>,
        worker: Arc<Worker>,
        semaphore: Arc<Semaphore>,
    ) {
        while let Some(task) = task_rx.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let worker = worker.clone();
            tokio::spawn(async move {
                let _permit = permit;
                worker.run(task).await;
            });
        }
        log::debug!("Theme executor worker stopped");
    }
}

/// An extraction that outlived its timeout.
type Straggler = JoinHandle<Result<Palette, ExtractError>>;

impl Worker {
    async fn run(&self, task: ThemeTask) {
        let ThemeTask { request, reply } = task;
        if reply.as_ref().is_some_and(|reply| reply.is_closed()) {
            log::debug!("Skipping {}: result no longer awaited", request.key);
            return;
        }

        let (result, straggler) = self.theme_for(&request).await;
        let event = match result {
            Ok(theme) => {
                log::info!("Theme ready for {}", request.key);
                ThemeEvent::ThemeReady {
                    key: request.key.clone(),
                    generation: request.generation,
                    theme,
                }
            },
            Err(e) => ThemeEvent::ThemeFailed {
                key: request.key.clone(),
                generation: request.generation,
                error: e.to_string(),
            },
        };

        let _ = self.event_tx.send(event.clone());
        if let Some(reply) = reply {
            let _ = reply.send(event);
        }

        // The caller holds the permit until this returns.
        if let Some(straggler) = straggler {
            log::debug!("Waiting for timed-out extraction of {} to finish", request.key);
            let _ = straggler.await;
        }
    }

    async fn theme_for(
        &self,
        request: &ThemeRequest,
    ) -> (Result<Theme, ExtractError>, Option<Straggler>) {
        let image = request.image();
        let cache = self.cache.as_ref();
        if request.fresh {
            if let Some(cache) = cache {
                cache.invalidate(image);
            }
        }

        let cached = cache.and_then(|cache| cache.get(image));
        let palette = match cached {
            Some(palette) => {
                log::debug!("Palette cache hit: {:?}", image);
                palette
            },
            None => {
                let extractor = self.extractor.clone();
                let path = image.to_path_buf();
                let mut handle = tokio::spawn(async move { extractor.extract(&path).await });

                let palette = match tokio::time::timeout(self.timeout, &mut handle).await {
                    Ok(joined) => joined.map_err(ExtractError::from).and_then(|result| result),
                    Err(_) => return (Err(ExtractError::TimedOut(self.timeout)), Some(handle)),
                };
                let palette = match palette {
                    Ok(palette) => palette,
                    Err(e) => return (Err(e), None),
                };
                if let Some(cache) = cache {
                    cache.put(image.to_path_buf(), palette);
                }
                palette
            },
        };

        (self.deriver.derive(&palette).map_err(ExtractError::from), None)
    }
}
