//! Group API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use listshare::shared::model::{DeleteAllResponse, Group, MessageResponse, UserProfile};

use crate::common::{assert_error, TestApp, TestUser};

async fn create_group(app: &TestApp, owner: &TestUser, name: &str, members: &[&TestUser]) -> Group {
    let ids: Vec<_> = members.iter().map(|user| user.id).collect();
    let response = app
        .post("/groups", owner)
        .json(&json!({ "name": name, "shared_with": ids }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}

async fn groups_of(app: &TestApp, user: &TestUser) -> Vec<uuid::Uuid> {
    let profile: UserProfile = app.get(&format!("/users/{}", user.id), user).await.json();
    profile.groups
}

#[tokio::test]
async fn test_create_group_requires_a_member() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;

    let response = app.post("/groups", &owner).json(&json!({ "name": "Solo" })).await;
    let message = assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(message, "A group needs at least one member");

    let response = app
        .post("/groups", &owner)
        .json(&json!({ "name": "Solo", "shared_with": [owner.id] }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_group_links_everyone() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;

    let response = app
        .post("/groups", &owner)
        .json(&json!({ "group_name": "Flatmates", "group_members": [friend.id] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let group: Group = response.json();

    assert_eq!(group.name, "Flatmates");
    assert_eq!(group.admin, owner.id);
    assert_eq!(group.shared_with, vec![friend.id]);
    assert_eq!(groups_of(&app, &owner).await, vec![group.id]);
    assert_eq!(groups_of(&app, &friend).await, vec![group.id]);

    let visible: Vec<Group> = app.get("/groups", &friend).await.json();
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn test_rename_group_but_not_its_members() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let group = create_group(&app, &owner, "Flatmates", &[&friend]).await;

    let renamed: Group = app
        .put(&format!("/groups/{}", group.id), &friend)
        .json(&json!({ "name": "Housemates" }))
        .await
        .json();
    assert_eq!(renamed.name, "Housemates");

    let response = app
        .put(&format!("/groups/{}", group.id), &owner)
        .json(&json!({ "admin": friend.id }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app
        .put(&format!("/groups/{}", group.id), &owner)
        .json(&json!({ "name": "Sneaky", "group_members": null }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let stored: Group = app.get(&format!("/groups/{}", group.id), &owner).await.json();
    assert_eq!(stored.admin, owner.id);
}

#[tokio::test]
async fn test_group_hidden_from_outsiders() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let stranger = app.signup("Stranger").await;
    let group = create_group(&app, &owner, "Flatmates", &[&friend]).await;

    let response = app.get(&format!("/groups/{}", group.id), &stranger).await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = app
        .put(&format!("/groups/addUser/{}", group.id), &stranger)
        .json(&json!({ "users": [stranger.id] }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_members_come_and_go_until_the_group_dissolves() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let late = app.signup("Late").await;
    let group = create_group(&app, &owner, "Flatmates", &[&friend]).await;

    let grown: Group = app
        .put(&format!("/groups/addUser/{}", group.id), &owner)
        .json(&json!({ "users": [late.id, friend.id] }))
        .await
        .json();
    assert_eq!(grown.shared_with, vec![friend.id, late.id]);
    assert_eq!(groups_of(&app, &late).await, vec![group.id]);

    let message: MessageResponse = app
        .put(&format!("/groups/removeUser/{}", group.id), &owner)
        .json(&json!({ "user": late.id }))
        .await
        .json();
    assert_eq!(message.message, "Late was removed from the group");

    app.put(&format!("/groups/removeUser/{}", group.id), &friend)
        .json(&json!({ "user": owner.id }))
        .await;
    let promoted: Group = app.get(&format!("/groups/{}", group.id), &friend).await.json();
    assert_eq!(promoted.admin, friend.id);
    assert!(groups_of(&app, &owner).await.is_empty());

    let message: MessageResponse = app
        .put(&format!("/groups/removeUser/{}", group.id), &friend)
        .json(&json!({ "user": friend.id }))
        .await
        .json();
    assert_eq!(message.message, "group deleted successfully");
    assert!(groups_of(&app, &friend).await.is_empty());
}

#[tokio::test]
async fn test_delete_group_prunes_members() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    let group = create_group(&app, &owner, "Flatmates", &[&friend]).await;

    let response = app.delete(&format!("/groups/{}", group.id), &owner).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.get(&format!("/groups/{}", group.id), &owner).await;
    assert_error(&response, StatusCode::NOT_FOUND);
    assert!(groups_of(&app, &owner).await.is_empty());
    assert!(groups_of(&app, &friend).await.is_empty());
}

#[tokio::test]
async fn test_delete_all_groups() {
    let app = TestApp::new();
    let owner = app.signup("Owner").await;
    let friend = app.signup("Friend").await;
    create_group(&app, &owner, "One", &[&friend]).await;
    create_group(&app, &friend, "Two", &[&owner]).await;

    let response: DeleteAllResponse = app.delete("/groups/delete_all", &owner).await.json();
    assert_eq!(response.deleted, 2);

    let visible: Vec<Group> = app.get("/groups", &owner).await.json();
    assert!(visible.is_empty());
    assert!(groups_of(&app, &owner).await.is_empty());
    assert!(groups_of(&app, &friend).await.is_empty());
}
