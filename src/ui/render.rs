//! Plain-text rendering of transcript entries for the terminal.

use super::style;
use crate::chat::{Origin, Payload, TranscriptEntry};
use crate::dossier::Dossier;

const NOT_AVAILABLE: &str = "N/A";

/// Render one entry; failures read "Erro ao analisar {url}: {message}".
pub fn render_entry(entry: &TranscriptEntry) -> String {
    match (&entry.origin, &entry.payload) {
        (Origin::User, Payload::Text(text)) => format!("> {text}"),
        (Origin::System, Payload::Text(text)) if entry.is_error => {
            let line = match &entry.url {
                Some(url) => format!("Erro ao analisar {url}: {text}"),
                None => text.clone(),
            };
            style::error(line)
        }
        (_, Payload::Text(text)) => text.clone(),
        (_, Payload::Dossier(dossier)) => render_dossier(dossier),
    }
}

pub fn render_dossier(dossier: &Dossier) -> String {
    if dossier.as_map().is_empty() {
        return "Ocorreu um erro ao processar os resultados.".to_string();
    }

    let mut out = Vec::new();
    out.push(style::header(dossier.title().unwrap_or(NOT_AVAILABLE)));
    if let Some(url) = dossier.url() {
        out.push(style::url(url));
    }
    out.push(format!(
        "{} {}",
        style::cyan("Descrição:"),
        dossier.meta_description().unwrap_or(NOT_AVAILABLE)
    ));

    push_list(&mut out, "Tecnologias:", &dossier.technologies());
    push_list(&mut out, "Contactos:", &dossier.contacts());
    push_list(&mut out, "Chamadas para ação:", &dossier.calls_to_action());

    out.push(format!(
        "{} {}",
        style::cyan("Resumo (IA):"),
        dossier.ai_summary().unwrap_or(NOT_AVAILABLE)
    ));

    let subpages = dossier.subpage_count();
    if subpages > 0 {
        out.push(style::dim(format!("{subpages} sub-páginas analisadas")));
    }

    out.join("\n")
}

fn push_list(out: &mut Vec<String>, label: &str, items: &[&str]) {
    if items.is_empty() {
        return;
    }
    out.push(style::cyan(label));
    out.extend(items.iter().map(|item| format!("  - {item}")));
}
