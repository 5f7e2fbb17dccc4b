use std::{collections::BTreeMap, future::Future, sync::Arc, time::Duration};

use reqwest::{redirect, Client, Method, Proxy};
use tokio::sync::Semaphore;
use tokio::time::sleep;

use crate::{
    config::ProbeTarget,
    core::{
        error::OspreyError,
        governor::{Governor, GovernorConfig},
    },
    modules::recon::ProbeOutcome,
};

const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];
const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_MS: u64 = 800;

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Already lowercased for the substring heuristics.
    pub body: String,
}

// Every probe gets its own transient client (own proxy, own timeout); the
// governor is the only state shared between concurrent probes.
#[derive(Clone)]
pub struct Engine {
    governor: Arc<Governor>,
    user_agent: String,
    timeout: Duration,
    workers: usize,
}

impl Engine {
    pub fn new(cfg: &GovernorConfig, user_agent: String, governor: Arc<Governor>) -> Self {
        Self {
            governor,
            user_agent,
            timeout: Duration::from_secs(cfg.timeout_secs),
            workers: cfg.workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn governor(&self) -> &Governor {
        &self.governor
    }

    pub fn transient_client(&self) -> Result<Client, OspreyError> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .redirect(redirect::Policy::limited(4));
        if let Some(proxy_url) = self.governor.next_proxy() {
            builder = builder.proxy(Proxy::all(&proxy_url)?);
        }
        Ok(builder.build()?)
    }

    /// HEAD first (cheaper, many platforms honor it), GET when the HEAD
    /// exchange fails outright.
    pub async fn probe(&self, url: &str) -> Result<RawResponse, OspreyError> {
        let client = self.transient_client()?;
        match self.fetch(&client, Method::HEAD, url).await {
            Ok(raw) => Ok(raw),
            Err(err) => {
                tracing::debug!(%url, %err, "HEAD failed, retrying as GET");
                self.fetch(&client, Method::GET, url).await
            }
        }
    }

    pub async fn probe_get(&self, url: &str) -> Result<RawResponse, OspreyError> {
        let client = self.transient_client()?;
        self.fetch(&client, Method::GET, url).await
    }

    // Transport-level backoff, separate from the governor's pacing.
    async fn fetch(
        &self,
        client: &Client,
        method: Method,
        url: &str,
    ) -> Result<RawResponse, OspreyError> {
        let mut delay = Duration::from_millis(BACKOFF_BASE_MS);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match client.request(method.clone(), url).send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if RETRY_STATUSES.contains(&status) && attempt < MAX_ATTEMPTS {
                        tracing::debug!(%url, status, attempt, "retryable status, backing off");
                        sleep(delay).await;
                        delay *= 2;
                        continue;
                    }
                    let body = resp.text().await.unwrap_or_default().to_lowercase();
                    return Ok(RawResponse { status, body });
                }
                Err(err) => {
                    if attempt < MAX_ATTEMPTS {
                        tracing::debug!(%url, %err, attempt, "transport error, backing off");
                        sleep(delay).await;
                        delay *= 2;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }
    }
}

/// Run every target through `probe_fn`, at most `workers` in flight, and
/// merge the outcomes by target name. The returned map always holds
/// exactly one entry per submitted name: a probe that errors or whose
/// task dies becomes an `unknown` outcome at this boundary, so no failure
/// escapes to the caller or aborts sibling probes.
pub async fn run_all<F, Fut>(
    targets: Vec<ProbeTarget>,
    workers: usize,
    probe_fn: F,
) -> BTreeMap<String, ProbeOutcome>
where
    F: Fn(ProbeTarget) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ProbeOutcome, OspreyError>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let probe_fn = Arc::new(probe_fn);

    let mut handles = Vec::with_capacity(targets.len());
    for target in targets {
        let semaphore = Arc::clone(&semaphore);
        let probe_fn = Arc::clone(&probe_fn);
        let name = target.name.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| OspreyError::Dispatch(e.to_string()))?;
            probe_fn(target).await
        });
        handles.push((name, handle));
    }

    let mut merged = BTreeMap::new();
    for (name, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => ProbeOutcome::unknown(format!("error: {err}")),
            Err(err) => ProbeOutcome::unknown(format!("error: {err}")),
        };
        merged.insert(name, outcome);
    }
    merged
}
