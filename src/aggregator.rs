use crate::error::{HarvestError, PageError};
use crate::fetchers::Fetcher;
use crate::nlp::{self, PosTagger};
use crate::parsers;
use crate::results::{HarvestResults, PageKeywords};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Tuning for the worker pool
#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Number of pages processed concurrently
    pub max_concurrency: usize,
    /// Keywords kept per URL in the summary map
    pub keywords_per_url: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            keywords_per_url: 5,
        }
    }
}

/// What a worker reports for one URL
type PageOutcome = (String, Result<PageKeywords, PageError>);

/// Fetches, extracts and tags every URL on a bounded worker pool and merges
/// the keywords into frequency and per-URL tables.
///
/// Workers pull URLs from a shared queue and send one outcome per URL back
/// over a channel; this task is the only writer of the tables. Failed URLs
/// are logged and contribute nothing.
pub async fn process_urls(
    urls: Vec<String>,
    fetcher: Arc<dyn Fetcher>,
    tagger: Arc<dyn PosTagger>,
    options: AggregateOptions,
) -> Result<HarvestResults, HarvestError> {
    if urls.is_empty() {
        return Err(HarvestError::NoUrls);
    }

    let total = urls.len();
    let num_workers = options.max_concurrency.clamp(1, total);
    ::log::info!(
        "Processing {} URLs with {} workers ({} fetcher, {} tagger)",
        total,
        num_workers,
        fetcher.name(),
        tagger.name()
    );

    // Queue every URL up front; workers stop once it is drained
    let (queue_tx, queue_rx) = mpsc::channel::<String>(total);
    for url in urls {
        if queue_tx.send(url).await.is_err() {
            break;
        }
    }
    drop(queue_tx);

    let queue_rx = Arc::new(Mutex::new(queue_rx));
    let (result_tx, mut result_rx) = mpsc::channel::<PageOutcome>(total);

    for worker_id in 0..num_workers {
        spawn_worker(
            worker_id,
            Arc::clone(&queue_rx),
            result_tx.clone(),
            Arc::clone(&fetcher),
            Arc::clone(&tagger),
        );
    }

    // The channel closes once every worker has dropped its sender
    drop(result_tx);

    let mut results = HarvestResults {
        urls_processed: total,
        ..HarvestResults::default()
    };

    while let Some((url, outcome)) = result_rx.recv().await {
        match outcome {
            Ok(page) => {
                ::log::debug!("{} yielded {} keywords", page.url, page.keywords.len());
                results.record(&page, options.keywords_per_url);
            }
            Err(e) => {
                ::log::warn!("Skipping {}: {}", url, e);
                results.urls_skipped += 1;
            }
        }
    }

    ::log::info!(
        "Processed {} URLs: {} contributed keywords, {} skipped, {} distinct keywords",
        total,
        results.url_keywords.len(),
        results.urls_skipped,
        results.frequencies.len()
    );

    Ok(results)
}

/// Spawns a worker that handles URLs until the queue is empty
fn spawn_worker(
    worker_id: usize,
    queue_rx: Arc<Mutex<mpsc::Receiver<String>>>,
    result_tx: mpsc::Sender<PageOutcome>,
    fetcher: Arc<dyn Fetcher>,
    tagger: Arc<dyn PosTagger>,
) {
    ::log::trace!("Spawning worker {}", worker_id);

    tokio::spawn(async move {
        while let Some(url) = get_next_url(worker_id, &queue_rx).await {
            let outcome = process_page(&url, fetcher.as_ref(), &tagger).await;

            if let Err(e) = result_tx.send((url, outcome)).await {
                ::log::error!("Worker {} failed to send result: {}", worker_id, e);
                break;
            }
        }

        ::log::debug!("Worker {} completed - no more URLs to process", worker_id);
    });
}

/// Gets the next URL to process from the queue
async fn get_next_url(
    worker_id: usize,
    queue_rx: &Arc<Mutex<mpsc::Receiver<String>>>,
) -> Option<String> {
    let url = queue_rx.lock().await.recv().await;
    if let Some(url) = &url {
        ::log::trace!("Worker {} processing: {}", worker_id, url);
    }
    url
}

/// Fetch → extract → tag for one URL
async fn process_page(
    url: &str,
    fetcher: &dyn Fetcher,
    tagger: &Arc<dyn PosTagger>,
) -> Result<PageKeywords, PageError> {
    let html = fetcher.fetch(url).await?;
    let text = parsers::extract(&html).ok_or(PageError::NoContent)?;

    // Tagging is CPU bound; keep it off the async workers
    let tagger = Arc::clone(tagger);
    let keywords = tokio::task::spawn_blocking(move || nlp::extract_features(tagger.as_ref(), &text))
        .await
        .map_err(|e| PageError::Tagger(e.to_string()))?;

    if keywords.is_empty() {
        return Err(PageError::NoKeywords);
    }

    Ok(PageKeywords {
        url: url.to_string(),
        keywords,
    })
}
