//! Integration tests for the placeholder API client using wiremock
//!
//! These tests verify the HTTP client behavior against mocked endpoints,
//! ensuring proper handling of various response codes and edge cases.

use placedash::api::{FetchError, PlaceholderClient};
use placedash::resource::{Fetcher, Payload, QueryKey};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "username": format!("user{}", id),
        "email": format!("user{}@example.com", id),
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

fn post_json(id: u64, user_id: u64) -> Value {
    json!({ "id": id, "userId": user_id, "title": format!("post {}", id), "body": "body" })
}

fn comment_json(id: u64, post_id: u64) -> Value {
    json!({
        "id": id,
        "postId": post_id,
        "name": format!("comment {}", id),
        "email": "someone@example.com",
        "body": "text"
    })
}

fn client_for(server: &MockServer) -> PlaceholderClient {
    PlaceholderClient::new(&server.uri()).expect("mock server URI should be valid")
}

/// Test module for collection and record fetches
mod fetch_tests {
    use super::*;

    /// Test collection fetch parses every record
    #[tokio::test]
    async fn test_users_collection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([user_json(1, "Leanne Graham"), user_json(2, "Ervin Howell")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let users = client.users().await.expect("users should parse");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Leanne Graham");
        assert_eq!(users[1].company.catch_phrase, "Multi-layered client-server neural-net");
    }

    /// Test foreign-key filters are sent as query parameters
    #[tokio::test]
    async fn test_filtered_collections() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("userId", "3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([post_json(21, 3), post_json(22, 3)])),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/comments"))
            .and(query_param("postId", "21"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([comment_json(101, 21)])))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let posts = client.posts(Some(3)).await.expect("posts should parse");
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.user_id == 3));

        let comments = client.comments(Some(21)).await.expect("comments should parse");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, 21);
    }

    /// Test single-record fetch by id
    #[tokio::test]
    async fn test_single_record() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json(7, 1)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let post = client.post(7).await.expect("post should parse");

        assert_eq!(post.id, 7);
        assert_eq!(post.user_id, 1);
    }

    /// Test the Fetcher seam returns the payload shape matching the key
    #[tokio::test]
    async fn test_fetcher_payload_shapes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "Leanne Graham")))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/comments"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([comment_json(1, 1), comment_json(2, 1), comment_json(3, 2)])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);

        let user = client.fetch(&QueryKey::user(1)).await.expect("user should fetch");
        assert!(matches!(user, Payload::User(ref u) if u.id == 1));

        let comments = client
            .fetch(&QueryKey::comments())
            .await
            .expect("comments should fetch");
        assert!(comments.is_collection());
        assert_eq!(comments.len(), 3);
    }

    /// Test base URL with a path prefix keeps the prefix
    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(1, 1)])))
            .mount(&server)
            .await;

        let client = PlaceholderClient::new(&format!("{}/api", server.uri())).unwrap();
        let posts = client.posts(None).await.expect("posts should parse");
        assert_eq!(posts.len(), 1);
    }
}

/// Test module for the error taxonomy
mod error_tests {
    use super::*;

    /// Test 404 for a non-existent record surfaces as an HTTP error
    #[tokio::test]
    async fn test_404_is_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/9999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.post(9999).await.unwrap_err();

        assert_eq!(err, FetchError::Http { status: 404 });
        assert!(err.is_not_found());
    }

    /// Test a malformed body on an error status stays an HTTP error
    #[tokio::test]
    async fn test_500_with_malformed_body_is_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.users().await.unwrap_err();

        assert_eq!(err, FetchError::Http { status: 500 });
    }

    /// Test a 2xx body that does not match the record shape is a parse failure
    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": "one", "title": 5 }])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.posts(None).await.unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }

    /// Test a record where a collection was expected is a parse failure
    #[tokio::test]
    async fn test_object_instead_of_array_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(1, 1)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.comments(None).await.unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }

    /// Test no retry happens after a failure
    #[tokio::test]
    async fn test_single_attempt_per_call() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch(&QueryKey::users()).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        // MockServer verifies the expected call count on drop
    }

    /// Test transport failure maps to a network error
    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = PlaceholderClient::new(&uri).unwrap();
        let err = client.users().await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert_eq!(err.status(), None);
    }
}
