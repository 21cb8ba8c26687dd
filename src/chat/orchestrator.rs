use super::transcript::{Payload, Transcript, TranscriptEntry};
use crate::api::{ApiClient, ScrapeReply};
use crate::error::RequestFailure;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Provisional line shown after the user's entry while a scrape is in flight.
pub const WORKING_INDICATOR: &str = "Analisando o site... pode demorar 20-30 segundos...";

/// Anything that can answer a scrape request.
pub trait Scraper: Send + Sync {
    fn scrape(&self, url: &str)
    -> impl Future<Output = Result<ScrapeReply, RequestFailure>> + Send;
}

impl Scraper for ApiClient {
    fn scrape(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ScrapeReply, RequestFailure>> + Send {
        ApiClient::scrape(self, url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending { url: String },
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    EmptyUrl,
    InvalidUrl,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Self::Busy => "Já existe uma análise em andamento.",
            Self::EmptyUrl => "Informe uma URL para analisar.",
            Self::InvalidUrl => "URL inválida: use um endereço http:// ou https://.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Answered,
    Failed { message: String },
    Rejected(Rejection),
}

#[derive(Debug, Default)]
struct State {
    transcript: Transcript,
    phase: Option<String>,
    input: String,
}

/// Drives the URL-analysis conversation, one request at a time.
///
/// State sits behind a mutex that is only held between awaits, so two
/// submissions polled on the same task see each other: the second one finds
/// the first pending and is dropped.
pub struct Orchestrator<S> {
    scraper: S,
    state: Mutex<State>,
}

impl<S: Scraper> Orchestrator<S> {
    pub fn new(scraper: S) -> Self {
        Self {
            scraper,
            state: Mutex::new(State::default()),
        }
    }

    /// Start the transcript with a system greeting.
    pub fn with_greeting(scraper: S, greeting: &str) -> Self {
        let orchestrator = Self::new(scraper);
        orchestrator
            .state()
            .transcript
            .push(TranscriptEntry::greeting(greeting));
        orchestrator
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> Phase {
        match &self.state().phase {
            Some(url) => Phase::Pending { url: url.clone() },
            None => Phase::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state().phase.is_some()
    }

    /// Indicator to render below the transcript, if a request is in flight.
    pub fn working_indicator(&self) -> Option<&'static str> {
        self.is_pending().then_some(WORKING_INDICATOR)
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.state().transcript.clone()
    }

    pub fn transcript_len(&self) -> usize {
        self.state().transcript.len()
    }

    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    pub fn set_input(&self, value: &str) {
        self.state().input = value.to_string();
    }

    /// Submit whatever is in the input buffer.
    pub async fn submit_input(&self) -> SubmitOutcome {
        let url = self.input();
        self.submit(&url).await
    }

    /// Ask the service to analyse `url` and record the exchange.
    pub async fn submit(&self, url: &str) -> SubmitOutcome {
        let url = url.trim();
        {
            let mut state = self.state();
            if let Err(rejection) = check_submission(state.phase.as_deref(), url) {
                debug!(?rejection, "submission ignored");
                return SubmitOutcome::Rejected(rejection);
            }
            state.transcript.push(TranscriptEntry::request(url));
            state.input.clear();
            state.phase = Some(url.to_string());
        }

        info!(url, "analysis requested");
        let result = self.scraper.scrape(url).await;

        let mut state = self.state();
        state.phase = None;
        match result {
            Ok(reply) => {
                let payload = match reply {
                    ScrapeReply::Dossier(dossier) => Payload::Dossier(dossier),
                    ScrapeReply::Text(text) => Payload::Text(text),
                };
                state.transcript.push(TranscriptEntry::answer(url, payload));
                SubmitOutcome::Answered
            }
            Err(failure) => {
                let message = failure.display_message();
                info!(url, error = %message, "analysis failed");
                state
                    .transcript
                    .push(TranscriptEntry::failure(url, message.clone()));
                SubmitOutcome::Failed { message }
            }
        }
    }
}

fn check_submission(pending: Option<&str>, url: &str) -> Result<(), Rejection> {
    if pending.is_some() {
        return Err(Rejection::Busy);
    }
    if url.is_empty() {
        return Err(Rejection::EmptyUrl);
    }
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(Rejection::InvalidUrl),
    }
}
