use super::test_util;
use crate::api::test_util::deserialize_body;
use crate::{SharedData, app_router, dto, persistence};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(db: PgPool) -> Router {
    app_router(Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db),
    }))
}

async fn create_user(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());

    let created_user: dto::InsertedUser = deserialize_body(response.into_body()).await;
    created_user.id
}

async fn send_task_body(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn list_tasks(app: &Router, user_id: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{user_id}/tasks"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn greets_at_the_root_route() {
    test_util::prepare_db_and_test(|db| async move {
        let app = test_app(db);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(StatusCode::OK, response.status());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn runs_a_task_through_its_full_lifecycle() {
    test_util::prepare_db_and_test(|db| async move {
        let app = test_app(db);
        let user_id = create_user(&app).await;

        // A new user starts with no tasks
        let empty_list_response = list_tasks(&app, &user_id).await;
        assert_eq!(StatusCode::OK, empty_list_response.status());
        let empty_list: dto::TaskListResponse =
            deserialize_body(empty_list_response.into_body()).await;
        assert!(empty_list.user_tasks.is_empty());

        // Add a task
        let add_response = send_task_body(
            &app,
            "POST",
            &format!("/{user_id}/tasks"),
            json!({"name": "buy milk"}),
        )
        .await;
        assert_eq!(StatusCode::OK, add_response.status());
        let created_task: dto::TaskEntry = deserialize_body(add_response.into_body()).await;
        assert_eq!("buy milk", created_task.name);

        // The task shows up in the list
        let list_response = list_tasks(&app, &user_id).await;
        let task_list: dto::TaskListResponse = deserialize_body(list_response.into_body()).await;
        assert_eq!(1, task_list.user_tasks.len());
        assert_eq!(created_task, task_list.user_tasks[0]);

        // Rename it
        let edit_response = send_task_body(
            &app,
            "PUT",
            &format!("/{user_id}/tasks/{}", created_task.task_id),
            json!({"name": "buy bread"}),
        )
        .await;
        assert_eq!(StatusCode::OK, edit_response.status());
        let updated_task: dto::TaskEntry = deserialize_body(edit_response.into_body()).await;
        assert_eq!(created_task.task_id, updated_task.task_id);
        assert_eq!("buy bread", updated_task.name);

        // Remove it
        let delete_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{user_id}/tasks/{}", created_task.task_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::NO_CONTENT, delete_response.status());

        // The list is empty again, and a second delete reports the task missing
        let final_list_response = list_tasks(&app, &user_id).await;
        let final_list: dto::TaskListResponse =
            deserialize_body(final_list_response.into_body()).await;
        assert!(final_list.user_tasks.is_empty());

        let second_delete_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{user_id}/tasks/{}", created_task.task_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, second_delete_response.status());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn every_task_operation_rejects_unknown_users() {
    test_util::prepare_db_and_test(|db| async move {
        let app = test_app(db);

        let list_response = list_tasks(&app, "nobody-home").await;
        assert_eq!(StatusCode::BAD_REQUEST, list_response.status());

        let add_response = send_task_body(
            &app,
            "POST",
            "/nobody-home/tasks",
            json!({"name": "buy milk"}),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, add_response.status());

        let edit_response = send_task_body(
            &app,
            "PUT",
            "/nobody-home/tasks/some-task",
            json!({"name": "buy milk"}),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, edit_response.status());

        let delete_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/nobody-home/tasks/some-task")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, delete_response.status());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn rejects_invalid_task_definitions_without_mutating() {
    test_util::prepare_db_and_test(|db| async move {
        let app = test_app(db);
        let user_id = create_user(&app).await;

        let empty_name_response = send_task_body(
            &app,
            "POST",
            &format!("/{user_id}/tasks"),
            json!({"name": ""}),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, empty_name_response.status());
        let error_body: serde_json::Value =
            deserialize_body(empty_name_response.into_body()).await;
        assert_eq!("invalid_task", error_body["error_code"]);

        let missing_name_response =
            send_task_body(&app, "POST", &format!("/{user_id}/tasks"), json!({})).await;
        assert_eq!(StatusCode::BAD_REQUEST, missing_name_response.status());

        let malformed_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/{user_id}/tasks"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, malformed_response.status());
        let parse_error_body: serde_json::Value =
            deserialize_body(malformed_response.into_body()).await;
        assert_eq!("parse_error", parse_error_body["error_code"]);

        // None of the rejected requests touched the stored list
        let list_response = list_tasks(&app, &user_id).await;
        let task_list: dto::TaskListResponse = deserialize_body(list_response.into_body()).await;
        assert!(task_list.user_tasks.is_empty());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn edit_rejects_unknown_tasks_without_mutating() {
    test_util::prepare_db_and_test(|db| async move {
        let app = test_app(db);
        let user_id = create_user(&app).await;

        let add_response = send_task_body(
            &app,
            "POST",
            &format!("/{user_id}/tasks"),
            json!({"name": "buy milk"}),
        )
        .await;
        let created_task: dto::TaskEntry = deserialize_body(add_response.into_body()).await;

        let edit_response = send_task_body(
            &app,
            "PUT",
            &format!("/{user_id}/tasks/not-a-real-task"),
            json!({"name": "buy bread"}),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, edit_response.status());
        let error_body: serde_json::Value = deserialize_body(edit_response.into_body()).await;
        assert_eq!("task_not_found", error_body["error_code"]);

        let list_response = list_tasks(&app, &user_id).await;
        let task_list: dto::TaskListResponse = deserialize_body(list_response.into_body()).await;
        assert_eq!(vec![created_task], task_list.user_tasks);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn users_get_distinct_ids_and_task_lists() {
    test_util::prepare_db_and_test(|db| async move {
        let app = test_app(db);
        let first_user = create_user(&app).await;
        let second_user = create_user(&app).await;
        assert_ne!(first_user, second_user);

        let add_response = send_task_body(
            &app,
            "POST",
            &format!("/{first_user}/tasks"),
            json!({"name": "buy milk"}),
        )
        .await;
        assert_eq!(StatusCode::OK, add_response.status());

        // The second user's list stays empty
        let second_list_response = list_tasks(&app, &second_user).await;
        let second_list: dto::TaskListResponse =
            deserialize_body(second_list_response.into_body()).await;
        assert!(second_list.user_tasks.is_empty());
    });
}
