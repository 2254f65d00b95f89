//! Appointment Booking Tests
//!
//! Form submission through the event routing layer.

use pretty_assertions::assert_eq;

use vetcare_connect::domain::{AppointmentRecord, Page};
use vetcare_connect::infrastructure::page::HeadlessPage;
use vetcare_connect::presentation::ClientEvent;
use vetcare_connect::startup::Dispatch;

use crate::common::*;

fn fill(client: &TestClient, values: &[(&str, &str)]) {
    for (name, value) in values {
        client.clinic.handle(ClientEvent::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

#[tokio::test]
async fn test_first_booking_scenario() {
    let client = TestClient::new(ScriptedFetcher::new());
    client.clinic.ready();
    assert_eq!(client.html(TABLE), "");

    fill(&client, &BOOKING);
    let dispatch = client.clinic.handle(ClientEvent::FormSubmitted);
    assert!(matches!(dispatch, Dispatch::Done));

    assert_eq!(client.clinic.ledger().len(), 1);
    assert_eq!(
        client.html(TABLE),
        concat!(
            r#"<tr><th scope="row">1</th><td>A</td><td>a@x.com</td>"#,
            "<td>Rex</td><td>Vaccination</td><td>2025-01-01</td></tr>"
        )
    );
    assert!(client.html("#form-message").contains("Appointment booked successfully!"));
    assert!(client.html("#toast-container").contains("Appointment saved locally!"));
    assert!(client
        .page
        .form_fields(FORM)
        .unwrap()
        .values()
        .all(String::is_empty));
}

#[tokio::test]
async fn test_rows_match_submissions_in_order() {
    let client = TestClient::new(ScriptedFetcher::new());
    client.clinic.ready();

    let pets = ["Rex", "Milo", "Luna", "Bella"];
    for (i, pet) in pets.iter().enumerate() {
        let name = format!("Owner {}", i + 1);
        fill(&client, &[("name", name.as_str()), ("pet", *pet)]);
        client.clinic.handle(ClientEvent::FormSubmitted);
        assert_eq!(client.clinic.ledger().len(), i + 1);
    }

    let ledger = client.clinic.ledger().list();
    let stored: Vec<_> = ledger.iter().map(|r| r.pet.as_str()).collect();
    assert_eq!(stored, pets);

    let rows = client.html(TABLE);
    let mut last = 0;
    for (i, pet) in pets.iter().enumerate() {
        let row = format!(
            r#"<tr><th scope="row">{}</th><td>Owner {}</td><td></td><td>{}</td>"#,
            i + 1,
            i + 1,
            pet
        );
        let at = rows.find(&row).unwrap();
        assert!(at >= last);
        last = at;
    }
}

#[tokio::test]
async fn test_table_restored_after_reload() {
    let client = TestClient::new(ScriptedFetcher::new());
    fill(&client, &BOOKING);
    client.clinic.handle(ClientEvent::FormSubmitted);

    let reloaded = client.reload();
    reloaded.clinic.ready();
    assert!(reloaded.html(TABLE).contains("<td>Rex</td>"));
    assert_eq!(reloaded.clinic.ledger().len(), 1);
}

#[tokio::test]
async fn test_user_input_is_escaped_in_table() {
    let client = TestClient::new(ScriptedFetcher::new());
    fill(&client, &[("name", "<script>x</script>")]);
    client.clinic.handle(ClientEvent::FormSubmitted);

    let rows = client.html(TABLE);
    assert!(!rows.contains("<script>"));
    assert!(rows.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_theme_toggle_survives_broken_form() {
    // Page without the booking form: submission fails on every attempt
    let page = HeadlessPage::with_regions(["#toast-container", "#form-message", TABLE]);
    let client = TestClient::with_page(page);
    client.clinic.ready();

    client.clinic.handle(ClientEvent::FormSubmitted);
    assert!(client.clinic.ledger().is_empty());

    client.clinic.handle(ClientEvent::ThemeToggled);
    assert!(client.page.has_root_class("dark"));
    assert!(client.html("#toast-container").contains("Switched to Dark Mode"));
}

#[tokio::test]
async fn test_ready_without_optional_regions() {
    let client = TestClient::with_page(HeadlessPage::new());
    client.clinic.ready();

    // Toast container is created on demand; nothing else is required
    assert!(client.page.has_region("#toast-container"));
    assert!(!client.page.has_region(TABLE));
}

#[tokio::test]
async fn test_ready_restores_saved_draft() {
    let client = TestClient::new(ScriptedFetcher::new());
    let draft: vetcare_connect::domain::FormData = [("name", "Dana"), ("pet", "Milo")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    client
        .clinic
        .store()
        .write_json(
            vetcare_connect::infrastructure::storage::keys::LAST_FORM_DATA,
            &draft,
            vetcare_connect::infrastructure::storage::Persistence::DurableOnly,
        )
        .unwrap();

    client.clinic.ready();
    let fields = client.page.form_fields(FORM).unwrap();
    assert_eq!(fields["name"], "Dana");
    assert_eq!(fields["pet"], "Milo");
    assert_eq!(fields["email"], "");
    assert_eq!(AppointmentRecord::from_form(&fields).pet, "Milo");
}
