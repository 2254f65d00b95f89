//! HTML Templates
//!
//! Markup fragments written into page regions. User-supplied text is
//! escaped; markup returned by the navigation endpoint is not rendered here.

use std::fmt::Write;

use crate::domain::{AppointmentRecord, ServiceRecord};

/// Visual style of an alert or toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Danger => "danger",
        }
    }
}

/// Escape text for use inside element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn spinner() -> String {
    concat!(
        r#"<div class="text-center my-3 ajax-spinner">"#,
        r#"<div class="spinner-border text-primary" role="status">"#,
        r#"<span class="visually-hidden">Loading...</span>"#,
        "</div></div>"
    )
    .to_string()
}

pub fn alert(message: &str, kind: NoticeKind) -> String {
    format!(
        concat!(
            r#"<div class="alert alert-{kind} alert-dismissible fade show" role="alert">"#,
            "{message}",
            r#"<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>"#,
            "</div>"
        ),
        kind = kind.as_str(),
        message = escape(message),
    )
}

pub fn toast(id: &str, message: &str, kind: NoticeKind) -> String {
    format!(
        concat!(
            r#"<div id="{id}" class="toast align-items-center text-bg-{kind} border-0" role="alert" aria-live="assertive" aria-atomic="true">"#,
            r#"<div class="d-flex"><div class="toast-body">{message}</div>"#,
            r#"<button type="button" class="btn-close btn-close-white me-2 m-auto" data-bs-dismiss="toast" aria-label="Close"></button>"#,
            "</div></div>"
        ),
        id = escape(id),
        kind = kind.as_str(),
        message = escape(message),
    )
}

pub fn search_results(services: &[ServiceRecord]) -> String {
    services.iter().fold(String::new(), |mut out, s| {
        let _ = write!(out, r#"<div class="list-group-item">{}</div>"#, escape(&s.name));
        out
    })
}

pub fn service_cards(services: &[ServiceRecord]) -> String {
    services.iter().fold(String::new(), |mut out, s| {
        let _ = write!(
            out,
            concat!(
                r#"<div class="col-md-4 mb-3"><div class="card h-100 text-center"><div class="card-body">"#,
                r#"<i class="{icon} fa-2x mb-2"></i>"#,
                r#"<h5 class="card-title">{name}</h5>"#,
                r#"<p class="card-text">{description}</p>"#,
                "</div></div></div>"
            ),
            icon = escape(&s.icon),
            name = escape(&s.name),
            description = escape(&s.description),
        );
        out
    })
}

/// Table rows numbered from 1 in ledger order.
pub fn appointment_rows(appointments: &[AppointmentRecord]) -> String {
    appointments
        .iter()
        .enumerate()
        .fold(String::new(), |mut out, (idx, a)| {
            let _ = write!(out, r#"<tr><th scope="row">{}</th>"#, idx + 1);
            for value in a.columns() {
                let _ = write!(out, "<td>{}</td>", escape(value));
            }
            out.push_str("</tr>");
            out
        })
}
