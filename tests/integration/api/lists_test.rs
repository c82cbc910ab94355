//! List API integration tests
//!
//! Ownership, sharing, cascades and entry editing through `/lists`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use listshare::shared::model::{List, MessageResponse, UserProfile};

use crate::common::{assert_error, TestApp, TestUser};

async fn create_list(app: &TestApp, owner: &TestUser, name: &str, shared_with: &[&TestUser]) -> List {
    let ids: Vec<Uuid> = shared_with.iter().map(|user| user.id).collect();
    let response = app
        .post("/lists/create", owner)
        .json(&json!({ "name": name, "shared_with": ids }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}

async fn profile(app: &TestApp, viewer: &TestUser, user: &TestUser) -> UserProfile {
    app.get(&format!("/users/{}", user.id), viewer).await.json()
}

#[tokio::test]
async fn test_create_sets_admin_members_and_back_references() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;

    let list = create_list(&app, &owner, "Groceries", &[&friend, &owner, &friend]).await;

    assert_eq!(list.admin, owner.id);
    assert_eq!(list.shared_with, vec![friend.id]);
    assert!(!list.is_completed);
    assert_eq!(profile(&app, &owner, &owner).await.lists, vec![list.id]);
    assert_eq!(profile(&app, &owner, &friend).await.lists, vec![list.id]);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;

    let response = app.post("/lists/create", &owner).json(&json!({ "name": "   " })).await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .post("/lists/create", &owner)
        .json(&json!({ "name": "Groceries", "shared_with": [Uuid::new_v4()] }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lists_are_only_visible_to_participants() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let stranger = app.signup("Stranger").await;
    let list = create_list(&app, &owner, "Groceries", &[&friend]).await;

    let seen: List = app.get(&format!("/lists/{}", list.id), &friend).await.json();
    assert_eq!(seen.id, list.id);

    let response = app.get(&format!("/lists/{}", list.id), &stranger).await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let visible: Vec<List> = app.get("/lists", &stranger).await.json();
    assert!(visible.is_empty());

    let response = app.get("/lists/not-a-uuid", &owner).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_modify_updates_fields_but_refuses_membership() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let list = create_list(&app, &owner, "Groceries", &[&friend]).await;

    let modified: List = app
        .put(&format!("/lists/modify/{}", list.id), &owner)
        .json(&json!({ "name": "Weekend", "is_completed": true }))
        .await
        .json();
    assert_eq!(modified.name, "Weekend");
    assert!(modified.is_completed);
    assert_eq!(modified.shared_with, vec![friend.id]);

    let response = app
        .put(&format!("/lists/modify/{}", list.id), &owner)
        .json(&json!({ "name": "Sneaky", "shared_with": [] }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app
        .put(&format!("/lists/modify/{}", list.id), &owner)
        .json(&json!({ "name": "Sneaky", "shared_with": null }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let stored: List = app.get(&format!("/lists/{}", list.id), &owner).await.json();
    assert_eq!(stored.name, "Weekend");
    assert_eq!(stored.shared_with, vec![friend.id]);
}

#[tokio::test]
async fn test_modify_items_keeps_ids_unique() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let list = create_list(&app, &owner, "Groceries", &[]).await;
    let milk = Uuid::new_v4();

    let modified: List = app
        .put(&format!("/lists/modify/{}", list.id), &owner)
        .json(&json!({ "items": [
            { "id": milk, "name": "Milk" },
            { "id": milk, "name": "Eggs" }
        ] }))
        .await
        .json();
    assert_eq!(modified.items.len(), 1);
    assert_eq!(modified.items[0].name, "Milk");

    let emptied: List = app
        .delete(&format!("/lists/removeItem/{}", list.id), &owner)
        .json(&json!({ "items": [milk] }))
        .await
        .json();
    assert!(emptied.items.is_empty());
}

#[tokio::test]
async fn test_add_user_is_idempotent() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let list = create_list(&app, &owner, "Groceries", &[]).await;

    for _ in 0..2 {
        let list: List = app
            .put(&format!("/lists/addUser/{}", list.id), &owner)
            .json(&json!({ "users": [friend.id, owner.id] }))
            .await
            .json();
        assert_eq!(list.shared_with, vec![friend.id]);
    }
    assert_eq!(profile(&app, &owner, &friend).await.lists, vec![list.id]);

    let response = app
        .put(&format!("/lists/addUser/{}", list.id), &owner)
        .json(&json!({ "users": [Uuid::new_v4()] }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = app
        .put(&format!("/lists/addUser/{}", list.id), &owner)
        .json(&json!({ "users": [] }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_member_then_admin_then_last() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let first = app.signup("First").await;
    let second = app.signup("Second").await;
    let list = create_list(&app, &owner, "Trip", &[&first, &second]).await;

    let message: MessageResponse = app
        .put(&format!("/lists/removeUser/{}", list.id), &owner)
        .json(&json!({ "user": second.id }))
        .await
        .json();
    assert_eq!(message.message, "Second was removed from the list");
    assert!(profile(&app, &owner, &second).await.lists.is_empty());

    app.put(&format!("/lists/removeUser/{}", list.id), &owner)
        .json(&json!({ "user": owner.id }))
        .await;
    let promoted: List = app.get(&format!("/lists/{}", list.id), &first).await.json();
    assert_eq!(promoted.admin, first.id);
    assert!(promoted.shared_with.is_empty());
    assert!(profile(&app, &first, &owner).await.lists.is_empty());

    let message: MessageResponse = app
        .put(&format!("/lists/removeUser/{}", list.id), &first)
        .json(&json!({ "user": first.id }))
        .await
        .json();
    assert_eq!(message.message, "list deleted successfully");
    assert!(profile(&app, &first, &first).await.lists.is_empty());

    let response = app.get(&format!("/lists/{}", list.id), &first).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_non_participant_is_not_found() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let stranger = app.signup("Stranger").await;
    let list = create_list(&app, &owner, "Groceries", &[]).await;

    let response = app
        .put(&format!("/lists/removeUser/{}", list.id), &owner)
        .json(&json!({ "user": stranger.id }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_prunes_every_participant() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let list = create_list(&app, &owner, "Groceries", &[&friend]).await;

    let response = app.delete(&format!("/lists/delete/{}", list.id), &friend).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    assert!(profile(&app, &owner, &owner).await.lists.is_empty());
    assert!(profile(&app, &owner, &friend).await.lists.is_empty());

    let response = app.delete(&format!("/lists/delete/{}", list.id), &owner).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_and_remove_items() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let list = create_list(&app, &owner, "Groceries", &[]).await;
    let milk = Uuid::new_v4();

    let list_after: List = app
        .put(&format!("/lists/addItem/{}", list.id), &owner)
        .json(&json!({ "items": [
            { "id": milk, "name": "Milk" },
            { "id": milk, "name": "Milk again" },
            { "name": "Bread", "checked": true }
        ] }))
        .await
        .json();
    assert_eq!(list_after.items.len(), 2);
    assert_eq!(list_after.items[0].name, "Milk");
    assert!(list_after.items[1].checked);

    let list_after: List = app
        .put(&format!("/lists/addItem/{}", list.id), &owner)
        .json(&json!({ "items": [{ "id": milk, "name": "Milk" }] }))
        .await
        .json();
    assert_eq!(list_after.items.len(), 2);

    let response = app
        .put(&format!("/lists/addItem/{}", list.id), &owner)
        .json(&json!({ "items": [{ "name": "" }] }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .delete(&format!("/lists/removeItem/{}", list.id), &owner)
        .json(&json!({ "items": [milk], "name": "Renamed" }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let list_after: List = app
        .delete(&format!("/lists/removeItem/{}", list.id), &owner)
        .json(&json!({ "items": [milk] }))
        .await
        .json();
    assert_eq!(list_after.items.len(), 1);
    assert_eq!(list_after.items[0].name, "Bread");
}
