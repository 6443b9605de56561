use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use hrms::api::AppState;
use hrms::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const PASSWORD: &str = "Secret#123";

async fn spawn_app() -> Router {
    spawn_app_with_state().await.0
}

async fn spawn_app_with_state() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = hrms::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    (hrms::api::router(state.clone()), state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

async fn register(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/authentication/register",
        None,
        Some(json!({
            "full_name": name,
            "email": email,
            "password": PASSWORD,
            "confirm_password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"].clone()
}

async fn login(app: &Router, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/authentication/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"].clone()
}

/// Registers the first account (Admin) and returns its access token.
async fn admin_token(app: &Router) -> String {
    register(app, "Alice Admin", "alice@example.com").await;
    let login = login(app, "alice@example.com", PASSWORD).await;
    login["token"].as_str().unwrap().to_string()
}

async fn create(app: &Router, token: &str, path: &str, body: Value) {
    let (status, body) = send(app, "POST", path, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["flag"], true, "insert into {path}: {body}");
}

async fn first_id(app: &Router, token: &str, path: &str) -> i64 {
    let (_, body) = send(app, "GET", path, Some(token), None).await;
    body["data"][0]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check_is_public() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/health-check", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_entity_routes_require_token() {
    let app = spawn_app().await;

    let (status, _) = send(&app, "GET", "/api/branch", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/branch", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_first_registration_is_admin_second_is_user() {
    let app = spawn_app().await;

    let created = register(&app, "Alice Admin", "alice@example.com").await;
    assert_eq!(created["flag"], true);
    assert_eq!(created["message"], "Account Created!");
    register(&app, "Bob Builder", "bob@example.com").await;

    let token = login(&app, "alice@example.com", PASSWORD).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = send(&app, "GET", "/api/authentication/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "alice@example.com");
    assert_eq!(users[0]["role"], "Admin");
    assert_eq!(users[1]["email"], "bob@example.com");
    assert_eq!(users[1]["role"], "User");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = spawn_app().await;

    register(&app, "Alice Admin", "alice@example.com").await;
    let again = register(&app, "Alice Again", "ALICE@example.com").await;

    assert_eq!(again["flag"], false);
    assert_eq!(again["message"], "User registered already");
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    let app = spawn_app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/authentication/register",
        None,
        Some(json!({
            "full_name": "Alice Admin",
            "email": "alice@example.com",
            "password": "password",
            "confirm_password": "password",
        })),
    )
    .await;

    assert_eq!(body["data"]["flag"], false);
    assert!(
        body["data"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Validation failed")
    );
}

#[tokio::test]
async fn test_wrong_password_issues_no_tokens() {
    let app = spawn_app().await;
    register(&app, "Alice Admin", "alice@example.com").await;

    let response = login(&app, "alice@example.com", "Wrong#1234").await;
    assert_eq!(response["flag"], false);
    assert_eq!(response["message"], "Email/Password not valid");
    assert!(response.get("token").is_none());
    assert!(response.get("refresh_token").is_none());

    let response = login(&app, "nobody@example.com", PASSWORD).await;
    assert_eq!(response["flag"], false);
    assert_eq!(response["message"], "User not found");
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    let (app, state) = spawn_app_with_state().await;
    register(&app, "Alice Admin", "alice@example.com").await;

    let signed_in = login(&app, "alice@example.com", PASSWORD).await;
    assert_eq!(signed_in["message"], "Login successfully");
    let refresh = signed_in["refresh_token"].as_str().unwrap().to_string();

    let accounts = state.store.account_repo();
    assert_eq!(
        accounts.refresh_token_of(1).await.unwrap().as_deref(),
        Some(refresh.as_str())
    );

    // Unknown token fails and leaves the stored one usable
    let (_, body) = send(
        &app,
        "POST",
        "/api/authentication/refresh-token",
        None,
        Some(json!({ "token": "bm90LWEtcmVhbC10b2tlbg==" })),
    )
    .await;
    assert_eq!(body["data"]["flag"], false);
    assert_eq!(body["data"]["message"], "Refresh token is required");
    assert!(body["data"].get("token").is_none());
    assert_eq!(
        accounts.refresh_token_of(1).await.unwrap().as_deref(),
        Some(refresh.as_str())
    );

    let (_, body) = send(
        &app,
        "POST",
        "/api/authentication/refresh-token",
        None,
        Some(json!({ "token": refresh })),
    )
    .await;
    assert_eq!(body["data"]["flag"], true);
    assert_eq!(body["data"]["message"], "Token refreshed successfully");
    let rotated = body["data"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(rotated, refresh);
    assert_eq!(
        accounts.refresh_token_of(1).await.unwrap().as_deref(),
        Some(rotated.as_str())
    );

    // The previous token was overwritten
    let (_, body) = send(
        &app,
        "POST",
        "/api/authentication/refresh-token",
        None,
        Some(json!({ "token": refresh })),
    )
    .await;
    assert_eq!(body["data"]["flag"], false);

    let new_token = body_token(&app, &rotated).await;
    let (status, _) = send(&app, "GET", "/api/country", Some(&new_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

async fn body_token(app: &Router, refresh: &str) -> String {
    let (_, body) = send(
        app,
        "POST",
        "/api/authentication/refresh-token",
        None,
        Some(json!({ "token": refresh })),
    )
    .await;
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_user_management_requires_admin() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    register(&app, "Bob Builder", "bob@example.com").await;
    let user = login(&app, "bob@example.com", PASSWORD).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = send(&app, "GET", "/api/authentication/users", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/api/authentication/roles", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let roles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["Admin", "User"]);

    // Entity routes only need a valid token
    let (status, _) = send(&app, "GET", "/api/country", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_and_delete_user() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    register(&app, "Bob Builder", "bob@example.com").await;

    let (_, body) = send(
        &app,
        "PUT",
        "/api/authentication/update-user",
        Some(&admin),
        Some(json!({ "user_id": 2, "name": "Bob Builder", "email": "bob@example.com", "role": "Admin" })),
    )
    .await;
    assert_eq!(body["data"]["flag"], true);
    assert_eq!(body["data"]["message"], "User role updated successfully");

    let (_, body) = send(
        &app,
        "PUT",
        "/api/authentication/update-user",
        Some(&admin),
        Some(json!({ "user_id": 2, "role": "Auditor" })),
    )
    .await;
    assert_eq!(body["data"]["flag"], false);
    assert_eq!(body["data"]["message"], "Role 'Auditor' not found");

    let (_, body) = send(
        &app,
        "DELETE",
        "/api/authentication/delete-user/2",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["flag"], true);

    let (_, body) = send(
        &app,
        "DELETE",
        "/api/authentication/delete-user/2",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["flag"], false);

    let response = login(&app, "bob@example.com", PASSWORD).await;
    assert_eq!(response["message"], "User not found");
}

#[tokio::test]
async fn test_profile_is_private() {
    let app = spawn_app().await;
    admin_token(&app).await;
    register(&app, "Bob Builder", "bob@example.com").await;
    register(&app, "Carol Clerk", "carol@example.com").await;
    let bob = login(&app, "bob@example.com", PASSWORD).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = send(
        &app,
        "GET",
        "/api/authentication/user-profile/2",
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["full_name"], "Bob Builder");
    assert_eq!(body["data"]["role"], "User");

    let (status, _) = send(
        &app,
        "GET",
        "/api/authentication/user-profile/3",
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(
        &app,
        "PUT",
        "/api/authentication/update-profile",
        Some(&bob),
        Some(json!({ "id": 2, "full_name": "Robert Builder" })),
    )
    .await;
    assert_eq!(body["data"]["flag"], true);
    assert_eq!(body["data"]["message"], "User profile updated successfully");
}

#[tokio::test]
async fn test_catalog_crud_flow() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    create(&app, &token, "/api/generaldepartment", json!({ "name": "Operations" })).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/generaldepartment",
        Some(&token),
        Some(json!({ "name": "OPERATIONS" })),
    )
    .await;
    assert_eq!(body["data"]["flag"], false);
    assert_eq!(body["data"]["message"], "General department already added");

    let id = first_id(&app, &token, "/api/generaldepartment").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/generaldepartment/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Operations");

    let (_, body) = send(
        &app,
        "PUT",
        "/api/generaldepartment",
        Some(&token),
        Some(json!({ "id": id, "name": "Field Operations" })),
    )
    .await;
    assert_eq!(body["data"]["flag"], true);
    assert_eq!(body["data"]["message"], "Process completed");

    let (_, body) = send(&app, "GET", "/api/generaldepartment", Some(&token), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Field Operations");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/generaldepartment",
        Some(&token),
        Some(json!({ "id": 999, "name": "Nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["flag"], false);
    assert_eq!(body["data"]["message"], "Sorry General department not found");

    let (status, body) = send(&app, "GET", "/api/generaldepartment/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &app,
        "DELETE",
        "/api/generaldepartment/999",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["flag"], false);
    assert_eq!(body["data"]["message"], "Sorry General department not found");

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("/api/generaldepartment/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["flag"], true);

    let (_, body) = send(&app, "GET", "/api/generaldepartment", Some(&token), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

/// Builds general department -> department -> branch and country -> city,
/// then one employee on top. Returns the employee id.
async fn seed_employee(app: &Router, token: &str) -> i64 {
    create(app, token, "/api/generaldepartment", json!({ "name": "Operations" })).await;
    let gd = first_id(app, token, "/api/generaldepartment").await;
    create(
        app,
        token,
        "/api/department",
        json!({ "name": "Logistics", "general_department_id": gd }),
    )
    .await;
    let department = first_id(app, token, "/api/department").await;
    create(
        app,
        token,
        "/api/branch",
        json!({ "name": "North Yard", "department_id": department }),
    )
    .await;
    let branch = first_id(app, token, "/api/branch").await;

    create(app, token, "/api/country", json!({ "name": "Kuwait" })).await;
    let country = first_id(app, token, "/api/country").await;
    create(
        app,
        token,
        "/api/city",
        json!({ "name": "Hawalli", "country_id": country }),
    )
    .await;
    let city = first_id(app, token, "/api/city").await;

    create(
        app,
        token,
        "/api/employee",
        json!({
            "name": "Jane Doe",
            "civil_id": "290010112345",
            "file_number": "F-001",
            "job_name": "Dispatcher",
            "address": "Block 4, Street 12",
            "telephone_number": "+965 5555 0101",
            "photo": "https://example.com/jane.png",
            "branch_id": branch,
            "city_id": city,
        }),
    )
    .await;
    first_id(app, token, "/api/employee").await
}

#[tokio::test]
async fn test_employee_reads_include_hierarchy() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let employee = seed_employee(&app, &token).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/employee/{employee}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["name"], "Jane Doe");
    assert_eq!(data["branch"]["name"], "North Yard");
    assert_eq!(data["branch"]["department"]["name"], "Logistics");
    assert_eq!(
        data["branch"]["department"]["general_department"]["name"],
        "Operations"
    );
    assert_eq!(data["city"]["name"], "Hawalli");
    assert_eq!(data["city"]["country"]["name"], "Kuwait");

    let (_, body) = send(
        &app,
        "POST",
        "/api/employee",
        Some(&token),
        Some(json!({
            "name": "jane doe",
            "civil_id": "1",
            "file_number": "2",
            "job_name": "3",
            "address": "4",
            "telephone_number": "5",
            "photo": "6",
            "branch_id": data["branch"]["id"],
            "city_id": data["city"]["id"],
        })),
    )
    .await;
    assert_eq!(body["data"]["message"], "Employee already added");
}

#[tokio::test]
async fn test_leave_day_counts() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let employee = seed_employee(&app, &token).await;

    create(&app, &token, "/api/vacationtype", json!({ "name": "Annual" })).await;
    let vacation_type = first_id(&app, &token, "/api/vacationtype").await;
    create(&app, &token, "/api/overtimetype", json!({ "name": "Weekend" })).await;
    let overtime_type = first_id(&app, &token, "/api/overtimetype").await;

    // Friday through Monday
    create(
        &app,
        &token,
        "/api/vacation",
        json!({
            "employee_id": employee,
            "start_date": "2024-03-15",
            "end_date": "2024-03-18",
            "vacation_type_id": vacation_type,
        }),
    )
    .await;
    create(
        &app,
        &token,
        "/api/overtime",
        json!({
            "employee_id": employee,
            "start_date": "2024-03-15",
            "end_date": "2024-03-18",
            "overtime_type_id": overtime_type,
        }),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/vacation", Some(&token), None).await;
    let vacation = &body["data"][0];
    assert_eq!(vacation["number_of_days"], 2);
    assert_eq!(vacation["employee_full_name"], "Jane Doe");
    assert_eq!(vacation["vacation_type"], "Annual");

    let (_, body) = send(&app, "GET", "/api/overtime", Some(&token), None).await;
    assert_eq!(body["data"][0]["number_of_days"], 4);
    assert_eq!(body["data"][0]["overtime_type"], "Weekend");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/vacation/employee/{employee}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/api/vacation/employee/999", Some(&token), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_medical_leave_lifecycle() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let employee = seed_employee(&app, &token).await;

    create(
        &app,
        &token,
        "/api/health",
        json!({
            "employee_id": employee,
            "date": "2024-03-20",
            "medical_diagnose": "Influenza",
            "medical_recommendation": "Three days of rest",
        }),
    )
    .await;
    let id = first_id(&app, &token, "/api/health").await;

    let (_, body) = send(
        &app,
        "PUT",
        "/api/health",
        Some(&token),
        Some(json!({
            "id": id,
            "employee_id": employee,
            "date": "2024-03-21",
            "medical_diagnose": "Influenza",
            "medical_recommendation": "Five days of rest",
        })),
    )
    .await;
    assert_eq!(body["data"]["flag"], true);

    let (_, body) = send(&app, "GET", &format!("/api/health/{id}"), Some(&token), None).await;
    assert_eq!(body["data"]["date"], "2024-03-21");
    assert_eq!(body["data"]["medical_recommendation"], "Five days of rest");
    assert_eq!(body["data"]["employee_full_name"], "Jane Doe");

    let (_, body) = send(&app, "DELETE", &format!("/api/health/{id}"), Some(&token), None).await;
    assert_eq!(body["data"]["flag"], true);

    let (status, _) = send(&app, "GET", &format!("/api/health/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Metrics not enabled"));
}
