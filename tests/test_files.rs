use plainhttp::files::{FileError, FileStore};
use plainhttp::http::request::{Method, Request, RequestBuilder};
use plainhttp::http::response::StatusCode;
use plainhttp::router::Router;

fn request(method: Method, path: &str, body: &[u8]) -> Request {
    RequestBuilder::new()
        .method(method)
        .path(path)
        .body(body.to_vec())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_store_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.write("a.bin", b"\x00\x01\xfe\xff").await.unwrap();

    assert_eq!(store.read("a.bin").await.unwrap(), b"\x00\x01\xfe\xff".to_vec());
}

#[tokio::test]
async fn test_store_write_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.write("t.txt", b"long original contents").await.unwrap();
    store.write("t.txt", b"short").await.unwrap();

    assert_eq!(store.read("t.txt").await.unwrap(), b"short".to_vec());
}

#[tokio::test]
async fn test_store_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    assert!(matches!(store.read("missing").await, Err(FileError::NotFound(_))));
}

#[tokio::test]
async fn test_store_write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    assert!(matches!(
        store.write("no/such/dir.txt", b"x").await,
        Err(FileError::Io { .. })
    ));
}

#[tokio::test]
async fn test_post_then_get_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::standard(FileStore::new(dir.path()));
    let body: Vec<u8> = vec![b'r', 0, b'e', 0x80, 0xff, 0, b'\n', 0x7f];

    let created = router
        .dispatch(&request(Method::POST, "/files/report.txt", &body))
        .await;
    assert_eq!(created.status, StatusCode::Created);
    assert!(created.body.is_empty());
    assert_eq!(created.header("Content-Length"), Some("0"));

    let fetched = router
        .dispatch(&request(Method::GET, "/files/report.txt", b""))
        .await;
    assert_eq!(fetched.status, StatusCode::Ok);
    assert_eq!(fetched.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(fetched.header("Content-Length"), Some(body.len().to_string().as_str()));
    assert_eq!(fetched.body, body);

    assert_eq!(std::fs::read(dir.path().join("report.txt")).unwrap(), body);
}

#[tokio::test]
async fn test_get_missing_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::standard(FileStore::new(dir.path()));

    let response = router
        .dispatch(&request(Method::GET, "/files/does-not-exist", b""))
        .await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_get_directory_is_404() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let router = Router::standard(FileStore::new(dir.path()));

    let response = router.dispatch(&request(Method::GET, "/files/sub", b"")).await;

    assert_eq!(response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_post_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::standard(FileStore::new(dir.path().join("missing-base")));

    let response = router
        .dispatch(&request(Method::POST, "/files/x.txt", b"data"))
        .await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_traversal_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base");
    std::fs::create_dir(&base).unwrap();
    std::fs::write(dir.path().join("secret"), b"outside").unwrap();
    let router = Router::standard(FileStore::new(&base));

    for path in ["/files/../secret", "/files/", "/files//etc/passwd", "/files/./x"] {
        let get = router.dispatch(&request(Method::GET, path, b"")).await;
        assert_eq!(get.status, StatusCode::BadRequest, "GET {path}");

        let post = router.dispatch(&request(Method::POST, path, b"pwned")).await;
        assert_eq!(post.status, StatusCode::BadRequest, "POST {path}");
    }

    assert_eq!(std::fs::read(dir.path().join("secret")).unwrap(), b"outside".to_vec());
}

#[tokio::test]
async fn test_bad_name_wins_over_unsupported_method() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::standard(FileStore::new(dir.path()));

    for method in [Method::DELETE, Method::PUT, Method::Extension("BREW".into())] {
        let response = router.dispatch(&request(method, "/files/../x", b"")).await;

        assert_eq!(response.status, StatusCode::BadRequest);
        assert_eq!(response.header("Allow"), None);
    }
}

#[tokio::test]
async fn test_nested_names_stay_inside_base() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("reports")).unwrap();
    let router = Router::standard(FileStore::new(dir.path()));

    let created = router
        .dispatch(&request(Method::POST, "/files/reports/q1.csv", b"a,b\n"))
        .await;
    assert_eq!(created.status, StatusCode::Created);
    assert_eq!(
        std::fs::read(dir.path().join("reports/q1.csv")).unwrap(),
        b"a,b\n".to_vec()
    );
}

#[tokio::test]
async fn test_other_methods_are_405() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::standard(FileStore::new(dir.path()));

    for method in [Method::PUT, Method::DELETE, Method::HEAD, Method::PATCH] {
        let response = router.dispatch(&request(method, "/files/a", b"")).await;

        assert_eq!(response.status, StatusCode::MethodNotAllowed);
        assert_eq!(response.header("Allow"), Some("GET, POST"));
        assert!(response.body.is_empty());
    }
}
