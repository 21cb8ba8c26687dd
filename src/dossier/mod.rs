//! The analysis result for one submitted URL.
//!
//! The client treats the dossier as opaque JSON and only answers presence
//! questions about it. The service nests the home-page findings under
//! `dossie_pagina_principal`; lookups try that object first and then the top
//! level, accepting both the service's field names and English aliases.

use serde_json::{Map, Value};

const MAIN_PAGE_KEY: &str = "dossie_pagina_principal";
const SUBPAGES_KEY: &str = "analise_profunda_subpaginas";

const URL_KEYS: &[&str] = &["url"];
const TITLE_KEYS: &[&str] = &["titulo", "title"];
const META_DESCRIPTION_KEYS: &[&str] = &["descricao_meta", "meta_description"];
const TECHNOLOGY_KEYS: &[&str] = &["tecnologias_detetadas", "technologies"];
const EMAIL_KEYS: &[&str] = &["emails_encontrados", "emails"];
const SOCIAL_KEYS: &[&str] = &["links_sociais", "social_links"];
const CTA_KEYS: &[&str] = &["ctas_encontrados", "ctas"];
const AI_ANALYSIS_KEYS: &[&str] = &["analise_ia", "ai_analysis"];
const SUMMARY_KEYS: &[&str] = &["general_summary", "summary"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dossier {
    fields: Map<String, Value>,
}

/// Which sections a dossier actually carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DossierSummary {
    pub has_title: bool,
    pub has_meta_description: bool,
    pub technology_count: usize,
    pub contact_count: usize,
    pub cta_count: usize,
    pub has_ai_summary: bool,
    pub subpage_count: usize,
}

impl From<Map<String, Value>> for Dossier {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl Dossier {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Whether the service's nested home-page section is present.
    pub fn has_main_page(&self) -> bool {
        self.main_page().is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.text(URL_KEYS)
    }

    pub fn title(&self) -> Option<&str> {
        self.text(TITLE_KEYS)
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.text(META_DESCRIPTION_KEYS)
    }

    pub fn technologies(&self) -> Vec<&str> {
        self.list(TECHNOLOGY_KEYS)
    }

    /// Emails and social links together.
    pub fn contacts(&self) -> Vec<&str> {
        let mut contacts = self.list(EMAIL_KEYS);
        contacts.extend(self.list(SOCIAL_KEYS));
        contacts
    }

    pub fn calls_to_action(&self) -> Vec<&str> {
        self.list(CTA_KEYS)
    }

    pub fn ai_summary(&self) -> Option<&str> {
        let analysis = self.lookup(AI_ANALYSIS_KEYS)?.as_object()?;
        SUMMARY_KEYS
            .iter()
            .filter_map(|key| analysis.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    pub fn subpage_count(&self) -> usize {
        self.fields
            .get(SUBPAGES_KEY)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn summary(&self) -> DossierSummary {
        DossierSummary {
            has_title: self.title().is_some(),
            has_meta_description: self.meta_description().is_some(),
            technology_count: self.technologies().len(),
            contact_count: self.contacts().len(),
            cta_count: self.calls_to_action().len(),
            has_ai_summary: self.ai_summary().is_some(),
            subpage_count: self.subpage_count(),
        }
    }

    fn main_page(&self) -> Option<&Map<String, Value>> {
        self.fields.get(MAIN_PAGE_KEY).and_then(Value::as_object)
    }

    fn lookup(&self, keys: &[&str]) -> Option<&Value> {
        let scopes = self.main_page().into_iter().chain(std::iter::once(&self.fields));
        for scope in scopes {
            if let Some(value) = keys
                .iter()
                .filter_map(|key| scope.get(*key))
                .find(|value| !value.is_null())
            {
                return Some(value);
            }
        }
        None
    }

    fn text(&self, keys: &[&str]) -> Option<&str> {
        self.lookup(keys)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn list(&self, keys: &[&str]) -> Vec<&str> {
        self.lookup(keys)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
