use super::*;
use crate::platform::mock::MockPlatform;

fn gateway(mock: &Arc<MockPlatform>) -> ContentGateway {
    let config = PlatformConfig::new("https://cloud.example.test/v1", "proj", "db", "posts", "images");
    ContentGateway::new(mock.clone() as Arc<dyn DatabaseApi>, mock.clone() as Arc<dyn StorageApi>, config)
}

fn new_post(slug: &str) -> NewPost {
    NewPost {
        slug: slug.into(),
        title: "Intro To AI".into(),
        content: "<p>hello</p>".into(),
        featured_image: "f1".into(),
        status: PostStatus::Active,
        user_id: "u1".into(),
    }
}

// =============================================================================
// Posts
// =============================================================================

#[tokio::test]
async fn create_post_uses_slug_as_document_id() {
    let mock = Arc::new(MockPlatform::new());
    let content = gateway(&mock);

    let post = content.create_post(new_post("intro-to-ai")).await.unwrap();
    assert_eq!(post.id, "intro-to-ai");
    assert_eq!(post.user_id.as_deref(), Some("u1"));
    assert_eq!(post.featured_image.as_deref(), Some("f1"));
}

#[tokio::test]
async fn create_post_propagates_failure() {
    let mock = Arc::new(MockPlatform::new());
    mock.fail("create_document");
    let content = gateway(&mock);

    let err = content.create_post(new_post("x")).await.unwrap_err();
    assert!(matches!(err, ContentError::OperationFailed { op: "create_post", .. }));
}

#[tokio::test]
async fn update_post_leaves_unset_fields() {
    let mock = Arc::new(MockPlatform::new());
    mock.seed_post("p1", "Old", "u1", "f-old");
    let content = gateway(&mock);

    let patch = PostPatch { title: Some("New".into()), ..PostPatch::default() };
    let post = content.update_post("p1", patch).await.unwrap();
    assert_eq!(post.title, "New");
    assert_eq!(post.featured_image.as_deref(), Some("f-old"));
}

#[tokio::test]
async fn update_missing_post_is_operation_failed() {
    let mock = Arc::new(MockPlatform::new());
    let content = gateway(&mock);

    let err = content.update_post("nope", PostPatch::default()).await.unwrap_err();
    assert!(matches!(err, ContentError::OperationFailed { op: "update_post", ref source } if source.is_not_found()));
}

#[tokio::test]
async fn delete_post_reports_bool() {
    let mock = Arc::new(MockPlatform::new());
    mock.seed_post("p1", "T", "u1", "f1");
    let content = gateway(&mock);

    assert!(content.delete_post("p1").await);
    assert!(!content.delete_post("p1").await);
}

#[tokio::test]
async fn get_post_none_when_missing_or_failing() {
    let mock = Arc::new(MockPlatform::new());
    mock.seed_post("p1", "T", "u1", "f1");
    let content = gateway(&mock);

    assert!(content.get_post("p1").await.is_some());
    assert!(content.get_post("p2").await.is_none());
    mock.fail("get_document");
    assert!(content.get_post("p1").await.is_none());
}

#[tokio::test]
async fn list_posts_default_queries_filter_inactive() {
    let mock = Arc::new(MockPlatform::new());
    mock.seed_post("a", "A", "u1", "f1");
    mock.seed_post("b", "B", "u1", "f2");
    mock.state().posts[1].status = PostStatus::Inactive;
    mock.seed_post("c", "C", "u2", "f3");
    let content = gateway(&mock);

    let ids: Vec<String> = content
        .list_posts(&default_post_queries())
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, ["a", "c"]);

    assert_eq!(content.list_posts(&[]).await.len(), 3);
}

#[tokio::test]
async fn list_posts_empty_on_failure() {
    let mock = Arc::new(MockPlatform::new());
    mock.seed_post("a", "A", "u1", "f1");
    mock.fail("list_documents");
    let content = gateway(&mock);

    assert!(content.list_posts(&default_post_queries()).await.is_empty());
}

// =============================================================================
// Files
// =============================================================================

#[tokio::test]
async fn upload_then_delete_file() {
    let mock = Arc::new(MockPlatform::new());
    let content = gateway(&mock);

    let file = content
        .upload_file(FileUpload::new("cover.png", vec![1, 2, 3]))
        .await
        .unwrap();
    assert_eq!(file.id.len(), 20);
    assert_eq!(file.size, 3);
    assert!(content.delete_file(&file.id).await);
    assert!(!content.delete_file(&file.id).await);
}

#[tokio::test]
async fn upload_failure_propagates() {
    let mock = Arc::new(MockPlatform::new());
    mock.fail("create_file");
    let content = gateway(&mock);

    let err = content
        .upload_file(FileUpload::new("cover.png", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::OperationFailed { op: "upload_file", .. }));
}

#[test]
fn preview_url_needs_no_remote_call() {
    let mock = Arc::new(MockPlatform::new());
    let content = gateway(&mock);

    let url = content.file_preview_url("f1");
    assert_eq!(url, "https://cloud.example.test/v1/storage/buckets/images/files/f1/preview?project=proj");
    assert!(mock.calls().is_empty());
}
