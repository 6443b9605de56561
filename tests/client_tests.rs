use hrms::client::{HrClient, UserSession};
use hrms::config::Config;
use hrms::entities::countries;
use hrms::models::{Login, ManageUser, Register};

const PASSWORD: &str = "Secret#123";

/// Serves the API on an ephemeral port and returns a client bound to it.
async fn spawn_server() -> HrClient {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = hrms::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = hrms::api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HrClient::new(&format!("http://{addr}")).unwrap()
}

async fn signed_in_client() -> HrClient {
    let client = spawn_server().await;

    let created = client
        .accounts
        .register(&Register {
            full_name: "Alice Admin".to_string(),
            email: "alice@example.com".to_string(),
            password: PASSWORD.to_string(),
            confirm_password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert!(created.flag, "{}", created.message);

    let login = client
        .accounts
        .sign_in(&Login {
            email: "alice@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert!(login.flag, "{}", login.message);

    client
}

fn country(id: i32, name: &str) -> countries::Model {
    countries::Model {
        id,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_sign_in_stores_session() {
    let client = spawn_server().await;
    assert!(client.http.session().await.is_none());

    let client_with_session = signed_in_client().await;
    let session = client_with_session.http.session().await.unwrap();
    assert!(!session.token.is_empty());
    assert!(!session.refresh_token.is_empty());

    let users = client_with_session.accounts.users().await.unwrap();
    assert_eq!(
        users,
        vec![ManageUser {
            user_id: 1,
            name: "Alice Admin".to_string(),
            email: "alice@example.com".to_string(),
            role: "Admin".to_string(),
        }]
    );

    client_with_session.accounts.sign_out().await;
    assert!(client_with_session.http.session().await.is_none());
    assert!(client_with_session.countries.get_all().await.is_err());
}

#[tokio::test]
async fn test_wrong_password_keeps_no_session() {
    let client = spawn_server().await;
    client
        .accounts
        .register(&Register {
            full_name: "Alice Admin".to_string(),
            email: "alice@example.com".to_string(),
            password: PASSWORD.to_string(),
            confirm_password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

    let login = client
        .accounts
        .sign_in(&Login {
            email: "alice@example.com".to_string(),
            password: "Wrong#1234".to_string(),
        })
        .await
        .unwrap();

    assert!(!login.flag);
    assert_eq!(login.token, None);
    assert!(client.http.session().await.is_none());
}

#[tokio::test]
async fn test_crud_client_round() {
    let client = signed_in_client().await;

    let inserted = client.countries.insert(&country(0, "Kuwait")).await.unwrap();
    assert!(inserted.flag);

    let duplicate = client.countries.insert(&country(0, "KUWAIT")).await.unwrap();
    assert!(!duplicate.flag);
    assert_eq!(duplicate.message, "Country already added");

    let all = client.countries.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    let id = all[0].id;

    let updated = client.countries.update(&country(id, "Oman")).await.unwrap();
    assert!(updated.flag);
    assert_eq!(client.countries.get_by_id(id).await.unwrap().name, "Oman");

    let missing = client.countries.update(&country(999, "Qatar")).await.unwrap();
    assert!(!missing.flag);
    assert_eq!(missing.message, "Sorry Country not found");

    assert!(client.countries.get_by_id(999).await.is_err());

    let deleted = client.countries.delete_by_id(id).await.unwrap();
    assert!(deleted.flag);
    let deleted_again = client.countries.delete_by_id(id).await.unwrap();
    assert!(!deleted_again.flag);
    assert_eq!(deleted_again.message, "Sorry Country not found");
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_and_retried() {
    let client = signed_in_client().await;
    let original = client.http.session().await.unwrap();

    client
        .http
        .set_session(Some(UserSession {
            token: "stale.access.token".to_string(),
            refresh_token: original.refresh_token.clone(),
        }))
        .await;

    let all = client.countries.get_all().await.unwrap();
    assert!(all.is_empty());

    let renewed = client.http.session().await.unwrap();
    assert_ne!(renewed.token, "stale.access.token");
    assert_ne!(renewed.refresh_token, original.refresh_token);
}

#[tokio::test]
async fn test_concurrent_refreshes_keep_the_session() {
    let client = signed_in_client().await;

    let (a, b) = tokio::join!(
        client.http.refresh_session(),
        client.http.refresh_session()
    );
    assert!(a.unwrap());
    assert!(b.unwrap());

    let session = client.http.session().await;
    assert!(session.is_some());

    // The surviving session is the one the server still honours
    assert!(client.countries.get_all().await.is_ok());
    assert!(client.http.refresh_session().await.unwrap());
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let client = signed_in_client().await;
    let original = client.http.session().await.unwrap();

    client
        .http
        .set_session(Some(UserSession {
            token: original.token,
            refresh_token: "bm90LWEtcmVhbC10b2tlbg==".to_string(),
        }))
        .await;

    assert!(!client.http.refresh_session().await.unwrap());
    assert!(client.http.session().await.is_none());
}
