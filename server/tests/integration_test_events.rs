mod common;

use axum::http::StatusCode;
use common::{body_text, location, TestApp};
use ticketbooth_server::config::BookingsOnDelete;

const VALID_FORM: &str = "event_name=Concert&event_description=Live+music&event_date=2025-06-01\
                          &venue=Hall&tickets_available=100&ticket_price=19.99";

#[tokio::test]
async fn test_create_event_starts_as_draft() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;

    let response = app.post_form("/create-event", VALID_FORM, Some(&cookie)).await;
    assert_eq!(location(&response), Some("/organiser"));

    let (name, published, price): (String, bool, String) =
        sqlx::query_as("SELECT name, is_published, ticket_price FROM events")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(name, "Concert");
    assert!(!published);
    assert_eq!(price, "19.99");

    let page = body_text(app.get("/organiser", Some(&cookie)).await).await;
    assert!(page.contains("Concert"));
    assert!(page.contains("Draft events"));

    // drafts never reach attendees
    let page = body_text(app.get("/attendee", None).await).await;
    assert!(!page.contains("Concert"));
}

#[tokio::test]
async fn test_create_event_rejects_incomplete_forms() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;

    for form in [
        "event_name=&event_description=x&event_date=2025-06-01&tickets_available=1&ticket_price=1",
        "event_name=A&event_description=&event_date=2025-06-01&tickets_available=1&ticket_price=1",
        "event_name=A&event_description=x&event_date=&tickets_available=1&ticket_price=1",
        "event_name=A&event_description=x&event_date=2025-06-01&tickets_available=-1&ticket_price=1",
        "event_name=A&event_description=x&event_date=2025-06-01&tickets_available=ten&ticket_price=1",
        "event_name=A&event_description=x&event_date=2025-06-01&tickets_available=1&ticket_price=free",
        "event_name=A&event_description=x&event_date=2025-06-01&tickets_available=1",
    ] {
        let response = app.post_form("/create-event", form, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{form}");
        let body = body_text(response).await;
        assert_eq!(body, "All fields are required and must have valid values.");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_edit_event() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.draft_event(&cookie, "Concert", 10).await;

    let response = app.get(&format!("/edit-event/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("value=\"Concert\""));

    let response = app
        .post_form(
            &format!("/edit-event/{id}"),
            "event_name=Encore&event_description=More&event_date=2025-07-04\
             &tickets_available=40&ticket_price=30",
            Some(&cookie),
        )
        .await;
    assert_eq!(location(&response), Some("/organiser"));

    let (name, tickets, venue): (String, i64, Option<String>) =
        sqlx::query_as("SELECT name, tickets_available, venue FROM events WHERE id = ?")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(name, "Encore");
    assert_eq!(tickets, 40);
    assert_eq!(venue.as_deref(), Some("Hall"));
}

#[tokio::test]
async fn test_edit_missing_event_is_not_found() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;

    let response = app.get("/edit-event/404", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_form("/edit-event/404", VALID_FORM, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_page_lists_bookings() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.published_event(&cookie, "Concert", 10).await;
    app.purchase(id, "Alice", "3").await;
    app.purchase(id, "Bob", "2").await;

    let page = body_text(app.get(&format!("/edit-event/{id}"), Some(&cookie)).await).await;
    assert!(page.contains("5 tickets sold"));
    assert!(page.contains("Alice"));
    assert!(page.contains("Bob"));
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    app.published_event(&cookie, "First", 5).await;
    let second = app.published_event(&cookie, "Second", 5).await;

    // most recently published first
    let page = body_text(app.get("/attendee", None).await).await;
    let first_at = page.find("First").unwrap();
    let second_at = page.find("Second").unwrap();
    assert!(second_at < first_at);
    assert!(page.contains("Jun 1, 2025"));

    let response = app
        .post_form(&format!("/unpublish-event/{second}"), "", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/organiser"));
    let page = body_text(app.get("/attendee", None).await).await;
    assert!(!page.contains("Second"));
    assert!(page.contains("First"));

    // republishing moves it back to the top
    app.post_form(&format!("/publish-event/{second}"), "", Some(&cookie))
        .await;
    let page = body_text(app.get("/attendee", None).await).await;
    assert!(page.find("Second").unwrap() < page.find("First").unwrap());

    for uri in ["/publish-event/999", "/unpublish-event/999", "/delete-event/999"] {
        let response = app.post_form(uri, "", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_delete_event() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.draft_event(&cookie, "Concert", 5).await;

    let response = app
        .post_form(&format!("/delete-event/{id}"), "", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/organiser"));
    assert_eq!(app.tickets_available(id).await, None);
}

#[tokio::test]
async fn test_delete_published_ignores_drafts() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let draft = app.draft_event(&cookie, "Draft", 5).await;
    let live = app.published_event(&cookie, "Live", 5).await;

    let response = app
        .post_form(&format!("/delete-published-event/{draft}"), "", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/organiser"));
    assert_eq!(app.tickets_available(draft).await, Some(5));

    let response = app
        .post_form("/delete-published-event/999", "", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/organiser"));

    app.post_form(&format!("/delete-published-event/{live}"), "", Some(&cookie))
        .await;
    assert_eq!(app.tickets_available(live).await, None);
}

#[tokio::test]
async fn test_bookings_are_retained_by_default() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.published_event(&cookie, "Concert", 5).await;
    app.purchase(id, "Alice", "2").await;

    app.post_form(&format!("/delete-event/{id}"), "", Some(&cookie))
        .await;
    assert_eq!(app.tickets_available(id).await, None);
    assert_eq!(app.tickets_booked(id).await, 2);
}

#[tokio::test]
async fn test_cascade_removes_bookings() {
    let app =
        TestApp::with_config(|config| config.bookings_on_delete = BookingsOnDelete::Cascade).await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.published_event(&cookie, "Concert", 5).await;
    app.purchase(id, "Alice", "2").await;

    app.post_form(&format!("/delete-event/{id}"), "", Some(&cookie))
        .await;
    assert_eq!(app.tickets_available(id).await, None);
    assert_eq!(app.tickets_booked(id).await, 0);
}

#[tokio::test]
async fn test_restrict_refuses_booked_events() {
    let app =
        TestApp::with_config(|config| config.bookings_on_delete = BookingsOnDelete::Restrict).await;
    let cookie = app.organiser("host", "pw").await;
    let booked = app.published_event(&cookie, "Booked", 5).await;
    let empty = app.published_event(&cookie, "Empty", 5).await;
    app.purchase(booked, "Alice", "2").await;

    let response = app
        .post_form(&format!("/delete-event/{booked}"), "", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.tickets_available(booked).await, Some(3));

    let response = app
        .post_form(&format!("/delete-event/{empty}"), "", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/organiser"));
    assert_eq!(app.tickets_available(empty).await, None);
}

#[tokio::test]
async fn test_created_event_is_readable_right_after_redirect() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;

    for i in 0..30 {
        let form = format!(
            "event_name=Show{i}&event_description=x&event_date=2025-06-01\
             &tickets_available=5&ticket_price=10"
        );
        let response = app.post_form("/create-event", &form, Some(&cookie)).await;
        assert_eq!(location(&response), Some("/organiser"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE name = ?")
            .bind(format!("Show{i}"))
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(count, 1, "Show{i}");
    }

    let page = body_text(app.get("/organiser", Some(&cookie)).await).await;
    assert!(page.contains("Show29"));
}

#[tokio::test]
async fn test_edit_is_readable_right_after_redirect() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.draft_event(&cookie, "Concert", 10).await;

    for tickets in 1..=20 {
        let form = format!(
            "event_name=Concert&event_description=x&event_date=2025-06-01\
             &tickets_available={tickets}&ticket_price=10"
        );
        let response = app
            .post_form(&format!("/edit-event/{id}"), &form, Some(&cookie))
            .await;
        assert_eq!(location(&response), Some("/organiser"));
        assert_eq!(app.tickets_available(id).await, Some(tickets));
    }
}

#[tokio::test]
async fn test_publish_with_id_in_form_body() {
    let app = TestApp::new().await;
    let cookie = app.organiser("host", "pw").await;
    let id = app.draft_event(&cookie, "Concert", 5).await;

    let response = app
        .post_form("/organiser/publish", &format!("id={id}"), Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/organiser"));

    let page = body_text(app.get("/attendee", None).await).await;
    assert!(page.contains("Concert"));

    let response = app
        .post_form("/organiser/publish", "id=999", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_form("/organiser/publish", "id=abc", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
