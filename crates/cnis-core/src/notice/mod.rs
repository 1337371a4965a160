//! INSS notice (despacho) body processing.
//!
//! Notices arrive as e-mail bodies, plain text or HTML. This module turns a
//! decoded body into its metadata lines, the dispatch text and the protocol
//! number it refers to. Fetching and storing messages happens elsewhere.

mod cleaner;
mod html;
mod protocol;

pub use cleaner::{CleanedNotice, NoticeCleaner};
pub use html::{looks_like_html, strip_html};
pub use protocol::{extract_protocol, extract_service};

use serde::Serialize;

use crate::models::config::NoticeConfig;

/// A processed notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Notice {
    #[serde(rename = "protocolo")]
    pub protocol: Option<String>,
    #[serde(rename = "servico")]
    pub service: Option<String>,
    #[serde(rename = "metadados")]
    pub metadata: Vec<String>,
    #[serde(rename = "despacho")]
    pub dispatch: Vec<String>,
    #[serde(rename = "conteudo")]
    pub content: String,
}

/// Clean a notice body and look up its protocol and service.
///
/// The protocol is taken from the subject when it carries one, otherwise
/// from the cleaned content. The service is read from the raw body because
/// cleaning drops the `Serviço:` line.
pub fn process_notice(subject: Option<&str>, body: &str, config: &NoticeConfig) -> Notice {
    let cleaned = NoticeCleaner::new(config.clone()).clean(body);
    let content = cleaned.text();

    let protocol = subject
        .and_then(extract_protocol)
        .or_else(|| extract_protocol(&content));

    let service = if looks_like_html(body) {
        extract_service(&strip_html(body, config.min_html_fragment_length).join("\n"))
    } else {
        extract_service(body)
    };

    Notice {
        protocol,
        service,
        metadata: cleaned.metadata,
        dispatch: cleaned.dispatch,
        content,
    }
}
