use registration_portal::entities::user_registrations;
use reqwest::multipart::Form;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::Value;

use crate::helpers::{screenshot, spawn_app};

fn registration(email: &str) -> Form {
    Form::new()
        .text("firstName", "Ada")
        .text("lastName", "Lovelace")
        .text("email", email.to_string())
        .text("theme", "Fintech")
        .text("skills", "Rust, SQL")
}

#[tokio::test]
async fn submit_uploads_screenshots_and_persists_urls() {
    let app = spawn_app().await;

    let response = app
        .post_registration(
            registration("ada@example.com")
                .part("linkedinScreenshot", screenshot("post.png"))
                .part("paymentProof", screenshot("receipt.png")),
        )
        .await;

    assert_eq!(201, response.status().as_u16());
    let saved = user_registrations::Entity::find()
        .one(&app.db)
        .await
        .unwrap()
        .expect("No registration was saved.");
    assert_eq!(saved.preferred_theme.as_deref(), Some("Fintech"));
    assert_eq!(saved.technical_skills.as_deref(), Some("Rust, SQL"));
    let linkedin = saved.linkedin_post_screenshot_url.expect("missing LinkedIn URL");
    let payment = saved.payment_screenshot_url.expect("missing payment URL");
    assert!(linkedin.starts_with(&app.address) && linkedin.ends_with("post.png"));
    assert!(payment.ends_with("receipt.png"));
    assert_eq!(app.stored_files(), 2);
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_second_record() {
    let app = spawn_app().await;
    app.post_registration(registration("ada@example.com")).await;

    let response = app.post_registration(registration("ada@example.com")).await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email already registered");

    let stored = user_registrations::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(stored, 1);
    let count: Value = app.get("/registrations/count").await.json().await.unwrap();
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn update_replaces_only_the_supplied_screenshot() {
    let app = spawn_app().await;
    let created: Value = app
        .post_registration(
            registration("ada@example.com")
                .part("linkedin", screenshot("first-post.png"))
                .part("payment", screenshot("receipt.png")),
        )
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/registrations/{}", created["id"].as_str().unwrap());

    let updated: Value = app
        .client
        .put(format!("{}{}", app.address, path))
        .multipart(
            Form::new()
                .text("organization", "Analytical Engines")
                .part("linkedin_screenshot", screenshot("second-post.png")),
        )
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .unwrap();

    assert_eq!(updated["organization"], "Analytical Engines");
    assert!(
        updated["linkedin_post_screenshot_url"]
            .as_str()
            .unwrap()
            .ends_with("second-post.png")
    );
    assert_eq!(updated["payment_screenshot_url"], created["payment_screenshot_url"]);
    assert_eq!(app.stored_files(), 2);
}

#[tokio::test]
async fn delete_removes_record_and_screenshots() {
    let app = spawn_app().await;
    let created: Value = app
        .post_registration(
            registration("ada@example.com").part("payment_screenshot", screenshot("receipt.png")),
        )
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/registrations/{}", created["id"].as_str().unwrap());
    assert_eq!(app.stored_files(), 1);

    let response = app.delete(&path).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.stored_files(), 0);
    assert_eq!(404, app.get(&path).await.status().as_u16());
    assert_eq!(404, app.delete(&path).await.status().as_u16());
}

#[tokio::test]
async fn stored_screenshot_urls_can_be_fetched() {
    let app = spawn_app().await;
    let created: Value = app
        .post_registration(registration("ada@example.com").part("payment", screenshot("r.png")))
        .await
        .json()
        .await
        .unwrap();
    let url = created["payment_screenshot_url"].as_str().unwrap();

    let response = app
        .client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let body = response.bytes().await.unwrap();
    assert_eq!(&body[..], b"\x89PNG fake screenshot");
}
