//! Parsed inbound messages and composed outbound messages.
//!
//! The ingestion transport (webhook verification, raw MIME parsing) is an
//! external collaborator: by the time a message reaches this domain it is
//! already parsed into `InboundEmail`. `OutboundEmail` is the fully formed
//! message handed to the mail transport.

use serde::{Deserialize, Serialize};

use crate::common::utils::addresses;

/// Body content of a parsed inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailContent {
    /// Multipart message: text and HTML parts decoded independently,
    /// either may be absent.
    Multipart {
        text: Option<String>,
        html: Option<String>,
    },
    /// Single-part message: one content type, one body.
    Single { content_type: String, body: String },
}

impl EmailContent {
    /// The plain-text content, empty string when absent.
    pub fn text_part(&self) -> &str {
        match self {
            Self::Multipart { text, .. } => text.as_deref().unwrap_or(""),
            Self::Single { content_type, body } if content_type.starts_with("text/plain") => body,
            Self::Single { .. } => "",
        }
    }

    /// The HTML content, empty string when absent.
    pub fn html_part(&self) -> &str {
        match self {
            Self::Multipart { html, .. } => html.as_deref().unwrap_or(""),
            Self::Single { content_type, body } if content_type.starts_with("text/html") => body,
            Self::Single { .. } => "",
        }
    }
}

/// A parsed inbound message as delivered by the ingestion transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEmail {
    pub from: Vec<String>,
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
    /// RFC5322 Message-ID of the original, when the sending client set one.
    pub message_id: Option<String>,
    /// The original References header, verbatim.
    pub references: Option<String>,
    pub content: EmailContent,
}

impl InboundEmail {
    /// The sender address: first From header, display name stripped,
    /// lowercased.
    pub fn sender(&self) -> Option<String> {
        self.from.first().map(|from| addresses::bare_address(from))
    }
}

/// A fully composed outbound message, ready for the mail transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub in_reply_to: Option<String>,
    pub references: Option<String>,
    pub text_body: String,
    pub html_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_parts() {
        let content = EmailContent::Multipart {
            text: Some("plain".to_string()),
            html: None,
        };

        assert_eq!(content.text_part(), "plain");
        assert_eq!(content.html_part(), "");
    }

    #[test]
    fn test_single_part_follows_content_type() {
        let text = EmailContent::Single {
            content_type: "text/plain; charset=utf-8".to_string(),
            body: "plain".to_string(),
        };
        assert_eq!(text.text_part(), "plain");
        assert_eq!(text.html_part(), "");

        let html = EmailContent::Single {
            content_type: "text/html".to_string(),
            body: "<p>hi</p>".to_string(),
        };
        assert_eq!(html.text_part(), "");
        assert_eq!(html.html_part(), "<p>hi</p>");
    }

    #[test]
    fn test_sender_strips_display_name() {
        let message = InboundEmail {
            from: vec!["Alice Example <Alice@X.com>".to_string()],
            to: vec![],
            cc: vec![],
            bcc: vec![],
            subject: String::new(),
            message_id: None,
            references: None,
            content: EmailContent::Multipart {
                text: None,
                html: None,
            },
        };

        assert_eq!(message.sender(), Some("alice@x.com".to_string()));
    }
}
