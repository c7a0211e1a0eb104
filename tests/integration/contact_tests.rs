/*!
 * Contact submission flow against an in-memory database
 */

use parksite::contact::{DisabledNotifier, LogNotifier};
use parksite::database::NotificationStatus;
use parksite::locale::Locale;
use serde_json::json;
use std::sync::Arc;

use crate::common;

fn body(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

#[tokio::test]
async fn test_submit_withValidForm_shouldStoreAndAnswerOk() {
    common::init_logging();
    let service = common::contact_service(Arc::new(DisabledNotifier));

    let result = service
        .submit_json(
            &body(json!({
                "name": "  Rina  ",
                "email": "rina@example.co.id",
                "phone": "+62 812 0000",
                "buildingSize": "2 ha",
                "serviceType": "land",
                "message": ""
            })),
            Locale::En,
        )
        .await;

    assert_eq!(result.status, 200);
    assert_eq!(result.body["success"], json!(true));

    let id = result.id().unwrap();
    let record = service.repository().get_submission(id).await.unwrap().unwrap();
    assert_eq!(record.name, "Rina");
    assert_eq!(record.locale, "en");
    assert_eq!(record.building_size.as_deref(), Some("2 ha"));
    assert_eq!(record.message, None);
    assert_eq!(record.notification_status, NotificationStatus::Skipped);
}

#[tokio::test]
async fn test_submit_withEnabledNotifier_shouldMarkSent() {
    let service = common::contact_service(Arc::new(LogNotifier::new("no-reply@localhost", "sales@example.com")));

    let result = service
        .submit_json(
            &body(json!({"name": "Andi", "email": "andi@example.com", "phone": "0813"})),
            Locale::Id,
        )
        .await;

    let record = service
        .repository()
        .get_submission(result.id().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.notification_status, NotificationStatus::Sent);
    assert!(record.notified_at.is_some());
}

#[tokio::test]
async fn test_submit_withMissingRequiredField_shouldRejectWithoutStoring() {
    let service = common::contact_service(Arc::new(DisabledNotifier));

    for (payload, field) in [
        (json!({"email": "a@b.co", "phone": "1"}), "name"),
        (json!({"name": "A", "phone": "1"}), "email"),
        (json!({"name": "A", "email": "a@b.co", "phone": "   "}), "phone"),
    ] {
        let result = service.submit_json(&body(payload), Locale::En).await;
        assert_eq!(result.status, 400);
        assert_eq!(result.body["success"], json!(false));
        assert!(result.body["error"].as_str().unwrap().contains(field));
    }

    assert_eq!(service.repository().count_submissions().await.unwrap(), 0);
}

#[tokio::test]
async fn test_submit_withMalformedEmailOrBody_shouldAnswerBadRequest() {
    let service = common::contact_service(Arc::new(DisabledNotifier));

    let bad_email = service
        .submit_json(&body(json!({"name": "A", "email": "not-an-email", "phone": "1"})), Locale::En)
        .await;
    assert_eq!(bad_email.status, 400);

    let bad_json = service.submit_json(b"{\"name\": ", Locale::En).await;
    assert_eq!(bad_json.status, 400);

    let not_object = service.submit_json(b"[1, 2]", Locale::En).await;
    assert_eq!(not_object.status, 400);

    assert_eq!(service.repository().count_submissions().await.unwrap(), 0);
}

#[tokio::test]
async fn test_submit_withBrokenDatabase_shouldHideDetails() {
    let service = common::contact_service(Arc::new(DisabledNotifier));
    service
        .repository()
        .connection()
        .execute(|conn| {
            conn.execute_batch("DROP TABLE contact_submissions")?;
            Ok(())
        })
        .unwrap();

    let result = service
        .submit_json(
            &body(json!({"name": "A", "email": "a@example.com", "phone": "1"})),
            Locale::En,
        )
        .await;

    assert_eq!(result.status, 500);
    assert_eq!(result.body["success"], json!(false));
    assert!(!result.body["error"].as_str().unwrap().contains("contact_submissions"));
}

#[tokio::test]
async fn test_recentSubmissions_shouldListNewestFirst() {
    let service = common::contact_service(Arc::new(DisabledNotifier));

    for name in ["First", "Second", "Third"] {
        let result = service
            .submit_json(
                &body(json!({"name": name, "email": "x@example.com", "phone": "1"})),
                Locale::Zh,
            )
            .await;
        assert!(result.is_success());
    }

    let recent = service.repository().recent_submissions(2).await.unwrap();
    let names: Vec<&str> = recent.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Third", "Second"]);
    assert_eq!(service.repository().count_submissions().await.unwrap(), 3);
}
