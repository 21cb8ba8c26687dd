use crate::dossier::Dossier;

/// Prefix of the entry recorded when the user submits a URL.
pub const USER_ENTRY_PREFIX: &str = "Analisar: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Dossier(Dossier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub origin: Origin,
    pub payload: Payload,
    pub is_error: bool,
    /// URL of the exchange this entry belongs to; `None` for the greeting.
    pub url: Option<String>,
}

impl TranscriptEntry {
    pub(crate) fn greeting(text: &str) -> Self {
        Self {
            origin: Origin::System,
            payload: Payload::Text(text.to_string()),
            is_error: false,
            url: None,
        }
    }

    pub(crate) fn request(url: &str) -> Self {
        Self {
            origin: Origin::User,
            payload: Payload::Text(format!("{USER_ENTRY_PREFIX}{url}")),
            is_error: false,
            url: Some(url.to_string()),
        }
    }

    pub(crate) fn answer(url: &str, payload: Payload) -> Self {
        Self {
            origin: Origin::System,
            payload,
            is_error: false,
            url: Some(url.to_string()),
        }
    }

    pub(crate) fn failure(url: &str, message: String) -> Self {
        Self {
            origin: Origin::System,
            payload: Payload::Text(message),
            is_error: true,
            url: Some(url.to_string()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            Payload::Dossier(_) => None,
        }
    }

    pub fn dossier(&self) -> Option<&Dossier> {
        match &self.payload {
            Payload::Dossier(dossier) => Some(dossier),
            Payload::Text(_) => None,
        }
    }
}

/// Ordered, append-only log of one conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
