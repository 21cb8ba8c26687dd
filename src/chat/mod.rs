pub mod orchestrator;
pub mod transcript;

pub use orchestrator::{
    Orchestrator, Phase, Rejection, Scraper, SubmitOutcome, WORKING_INDICATOR,
};
pub use transcript::{Origin, Payload, Transcript, TranscriptEntry, USER_ENTRY_PREFIX};
