use colored::Colorize;
use std::fmt;

use docseq_domain::Document;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => format!("SUCCESS: {text}").bright_green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("ERROR: {text}").bright_red().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Error | MessageKind::Warning => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// One-line summary used by `list`.
pub fn document_row(document: &Document) -> String {
    format!(
        "{:<10} {:<9} {} {:>12.2}  {}  {}",
        document.document_number,
        document.financial_year.as_deref().unwrap_or("-"),
        document.date,
        document.amount,
        document.id,
        document.description,
    )
}

pub fn document_details(document: &Document) {
    section(format!("Document {}", document.document_number));
    info(format!("Id:             {}", document.id));
    info(format!("Kind:           {}", document.kind));
    info(format!("Date:           {}", document.date));
    info(format!(
        "Financial year: {}",
        document.financial_year.as_deref().unwrap_or("(global)")
    ));
    info(format!("Amount:         {:.2}", document.amount));
    if !document.description.is_empty() {
        info(format!("Description:    {}", document.description));
    }
    info(format!("Created:        {}", document.created_at.to_rfc3339()));
    info(format!("Updated:        {}", document.updated_at.to_rfc3339()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use docseq_domain::{Category, DocumentDraft, DocumentKind, SequenceScope};

    #[test]
    fn row_shows_number_year_and_id() {
        colored::control::set_override(false);
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let kind = DocumentKind::Transaction(Category::Income);
        let scope = SequenceScope::for_document(kind, date);
        let number = docseq_domain::DocumentNumber {
            prefix: scope.prefix.clone(),
            fiscal_year: scope.fiscal_year.clone(),
            sequence: 1,
            formatted: "INC-001".into(),
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let document = Document::new(
            DocumentDraft::new(kind, date).with_amount(12.5),
            &number,
            now,
        );
        let row = document_row(&document);
        assert!(row.starts_with("INC-001"));
        assert!(row.contains("2024-2025"));
        assert!(row.contains("12.50"));
        assert!(row.contains(&document.id.to_string()));
    }
}
