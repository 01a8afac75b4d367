//! API Integration Tests
//!
//! Each test starts the full Axum app on an in-memory store, so no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use feed_core::traits::ReactionRepository;
use feed_core::EntityId;
use integration_tests::{
    assert_error_code, assert_json, assert_status, fixtures::*, TestServer, TestUser,
};
use reqwest::StatusCode;

async fn create_post(server: &TestServer, author: &TestUser, description: &str) -> PostResponse {
    let response = server
        .post_auth(
            "/api/v1/posts",
            &author.token,
            &PostRequest::new("A post", description),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

fn reaction_path(post: &PostResponse) -> String {
    format!("/api/v1/posts/{}/reaction", post.id)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_missing_credentials() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/posts", &PostRequest::new("t", "d"))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_auth("/api/v1/posts", "not-a-token", &PostRequest::new("t", "d"))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(code, "UNAUTHENTICATED");
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_post() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();

    let post = create_post(&server, &author, "hello world").await;
    assert_eq!(post.author_id, author.user.id.to_string());
    assert_eq!(post.author_username, author.user.username);
    assert_eq!((post.likes, post.dislikes, post.views, post.comments), (0, 0, 0, 0));

    let path = format!("/api/v1/posts/{}", post.id);
    let fetched: PostResponse = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(fetched.views, 1);
    let fetched: PostResponse = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(fetched.views, 2);
    assert_eq!(fetched.description, "hello world");
}

#[tokio::test]
async fn test_post_validation() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();

    let response = server
        .post_auth("/api/v1/posts", &author.token, &PostRequest::new("", "body"))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_and_malformed_post_ids() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/posts/999").await.unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(code, "UNKNOWN_POST");

    let response = server.get("/api/v1/posts/abc").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_posts_and_my_posts() {
    let server = TestServer::start().await.unwrap();
    let ada = server.seed_user("ada").await.unwrap();
    let charles = server.seed_user("charles").await.unwrap();
    let first = create_post(&server, &ada, "first").await;
    let second = create_post(&server, &charles, "second").await;

    let all: Vec<PostResponse> =
        assert_json(server.get("/api/v1/posts").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

    let mine: Vec<PostResponse> = assert_json(
        server.get_auth("/api/v1/posts/@me", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, first.id);
}

#[tokio::test]
async fn test_update_and_delete_require_author() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let other = server.seed_user("other").await.unwrap();
    let post = create_post(&server, &author, "original").await;
    let path = format!("/api/v1/posts/{}", post.id);

    let response = server
        .patch_auth(&path, &other.token, &PostRequest::new("Hijack", "text"))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::FORBIDDEN)
        .await
        .unwrap();
    assert_eq!(code, "NOT_POST_AUTHOR");

    let response = server
        .patch_auth(&path, &author.token, &PostRequest::new("Edited", "text"))
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Edited");

    let response = server.delete_auth(&path, &other.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();
    let post = create_post(&server, &author, "react").await;
    let path = reaction_path(&post);

    let response = server
        .put_auth(&path, &reader.token, &ReactionRequest::like())
        .await
        .unwrap();
    let liked: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.post_id, post.id);
    assert_eq!(liked.transition, "created");
    assert_eq!((liked.likes, liked.dislikes), (1, 0));

    let response = server
        .put_auth(&path, &reader.token, &ReactionRequest::like())
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT)
        .await
        .unwrap();
    assert_eq!(code, "DUPLICATE_REACTION");

    let response = server
        .put_auth(&path, &reader.token, &ReactionRequest::dislike())
        .await
        .unwrap();
    let flipped: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(flipped.transition, "changed");
    assert_eq!(flipped.kind, "dislike");
    assert_eq!(flipped.previous_kind.as_deref(), Some("like"));
    assert_eq!((flipped.likes, flipped.dislikes), (0, 1));

    let fetched: PostResponse = assert_json(
        server
            .get(&format!("/api/v1/posts/{}", post.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!((fetched.likes, fetched.dislikes), (0, 1));
}

#[tokio::test]
async fn test_self_reaction_forbidden() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let post = create_post(&server, &author, "mine").await;

    let response = server
        .put_auth(&reaction_path(&post), &author.token, &ReactionRequest::like())
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::FORBIDDEN)
        .await
        .unwrap();
    assert_eq!(code, "SELF_REACTION_FORBIDDEN");
}

#[tokio::test]
async fn test_unknown_reaction_kind() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();
    let post = create_post(&server, &author, "kinds").await;

    let response = server
        .put_auth(
            &reaction_path(&post),
            &reader.token,
            &serde_json::json!({ "kind": "love" }),
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "INVALID_BODY");
}

#[tokio::test]
async fn test_concurrent_reactions_leave_one_row() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();
    let post = create_post(&server, &author, "race").await;
    let path = reaction_path(&post);

    let requests = (0..10).map(|i| {
        let body = if i % 2 == 0 {
            ReactionRequest::like()
        } else {
            ReactionRequest::dislike()
        };
        let path = path.clone();
        let token = reader.token.clone();
        let server = &server;
        async move { server.put_auth(&path, &token, &body).await }
    });
    let responses = futures::future::join_all(requests).await;
    assert!(responses
        .iter()
        .any(|r| r.as_ref().is_ok_and(|r| r.status() == StatusCode::OK)));

    let post_id: EntityId = post.id.parse().unwrap();
    let rows = ReactionRepository::find_by_post(&server.store, post_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let counts = server.store.reaction_rows(post_id);
    let fetched: PostResponse = assert_json(
        server
            .get(&format!("/api/v1/posts/{}", post.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!((fetched.likes, fetched.dislikes), (counts.likes, counts.dislikes));
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread_and_count() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();
    let post = create_post(&server, &author, "discuss").await;
    let comments_path = format!("/api/v1/posts/{}/comments", post.id);

    let response = server
        .post_auth(&comments_path, &reader.token, &CommentRequest::new("first"))
        .await
        .unwrap();
    let first: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first.post_id, post.id);
    assert_eq!(first.author_username, reader.user.username);

    let response = server
        .post_auth(&comments_path, &author.token, &CommentRequest::new("second"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let responses_path = format!("/api/v1/comments/{}/responses", first.id);
    for i in 0..3 {
        let response = server
            .post_auth(
                &responses_path,
                &author.token,
                &CommentRequest::new(&format!("reply {i}")),
            )
            .await
            .unwrap();
        let reply: ReplyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(reply.comment_id, first.id);
    }

    let count: CommentCountResponse = assert_json(
        server
            .get(&format!("{comments_path}/count"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(count.comments, 5);

    let thread: Vec<CommentResponse> =
        assert_json(server.get(&comments_path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].text, "first");
    assert_eq!(thread[0].responses.len(), 3);
    assert!(thread[1].responses.is_empty());
}

#[tokio::test]
async fn test_reply_to_unknown_comment() {
    let server = TestServer::start().await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/comments/999/responses",
            &reader.token,
            &CommentRequest::new("hello"),
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_count_comments_unknown_post() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/posts/999/comments/count").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Recommendation Tests
// ============================================================================

#[tokio::test]
async fn test_recommendations_ranked_by_similarity() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let target = create_post(&server, &author, "rust ownership borrowing lifetimes").await;
    let closest = create_post(&server, &author, "rust ownership borrowing").await;
    let close = create_post(&server, &author, "rust ownership").await;
    create_post(&server, &author, "gardening tomatoes compost").await;
    create_post(&server, &author, "baking sourdough bread").await;

    let response = server
        .get(&format!("/api/v1/posts/{}/recommendations", target.id))
        .await
        .unwrap();
    let related: RecommendationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(related.strategy, "similarity");
    assert_eq!(related.posts.len(), 3);
    assert_eq!(related.posts[0].id, closest.id);
    assert_eq!(related.posts[1].id, close.id);
    assert!(related.posts.iter().all(|p| p.id != target.id));
}

#[tokio::test]
async fn test_recommendations_for_lone_post() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let post = create_post(&server, &author, "alone").await;

    let response = server
        .get(&format!("/api/v1/posts/{}/recommendations", post.id))
        .await
        .unwrap();
    let related: RecommendationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(related.strategy, "random");
    assert!(related.posts.is_empty());
}

#[tokio::test]
async fn test_recommendations_unknown_post() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/posts/999/recommendations").await.unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

// ============================================================================
// Subscription Tests
// ============================================================================

async fn subscribe(server: &TestServer, subscriber: &TestUser, to: &TestUser) -> SubscriptionResponse {
    let response = server
        .post_auth(
            "/api/v1/subscriptions",
            &subscriber.token,
            &SubscribeRequest::to(to.user.id),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_subscription_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();

    let subscription = subscribe(&server, &reader, &author).await;
    assert_eq!(subscription.subscriber_username, reader.user.username);
    assert_eq!(subscription.subscribed_to_id, author.user.id.to_string());

    let response = server
        .get_auth(
            &format!("/api/v1/users/{}/subscribers", author.user.id),
            &reader.token,
        )
        .await
        .unwrap();
    let subscribers: Vec<SubscriptionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].subscriber_id, reader.user.id.to_string());

    // Only the subscriber may delete it
    let path = format!("/api/v1/subscriptions/{}", subscription.id);
    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let code = assert_error_code(response, StatusCode::FORBIDDEN)
        .await
        .unwrap();
    assert_eq!(code, "NOT_SUBSCRIPTION_OWNER");

    let response = server.delete_auth(&path, &reader.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/users/{}/subscriptions", reader.user.id),
            &reader.token,
        )
        .await
        .unwrap();
    let following: Vec<SubscriptionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(following.is_empty());
}

#[tokio::test]
async fn test_duplicate_and_self_subscription() {
    let server = TestServer::start().await.unwrap();
    let author = server.seed_user("author").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();
    subscribe(&server, &reader, &author).await;

    let response = server
        .post_auth(
            "/api/v1/subscriptions",
            &reader.token,
            &SubscribeRequest::to(author.user.id),
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT)
        .await
        .unwrap();
    assert_eq!(code, "DUPLICATE_SUBSCRIPTION");

    let response = server
        .post_auth(
            "/api/v1/subscriptions",
            &reader.token,
            &SubscribeRequest::to(reader.user.id),
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "SELF_SUBSCRIPTION");
}

#[tokio::test]
async fn test_subscribed_feed() {
    let server = TestServer::start().await.unwrap();
    let followed = server.seed_user("followed").await.unwrap();
    let other = server.seed_user("other").await.unwrap();
    let reader = server.seed_user("reader").await.unwrap();

    let response = server
        .get_auth("/api/v1/posts/subscribed", &reader.token)
        .await
        .unwrap();
    let feed: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(feed.is_empty());

    let older = create_post(&server, &followed, "first from followed").await;
    create_post(&server, &other, "not followed").await;
    let newer = create_post(&server, &followed, "second from followed").await;
    subscribe(&server, &reader, &followed).await;

    let response = server
        .get_auth("/api/v1/posts/subscribed", &reader.token)
        .await
        .unwrap();
    let feed: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = feed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
}
