// tests/github_client_test.rs
//
// Drives GitHubClient against a local HTTP server that answers canned JSON.
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use release_drafter::domain::{Release, RepositoryCoordinate};
use release_drafter::platform::{GitHubClient, HostingPlatform};
use release_drafter::DrafterError;

#[derive(Debug, Clone)]
struct Request {
    method: String,
    target: String,
    /// Raw header block, lowercased
    headers: String,
    body: String,
}

struct Reply {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl Reply {
    fn json(status: u16, body: Value) -> Self {
        Reply {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    fn to_http(&self) -> String {
        let mut head = format!(
            "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
            self.status,
            self.body.len()
        );
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        format!("{}\r\n{}", head, self.body)
    }
}

struct FakeApi {
    base: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl FakeApi {
    async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let Some(request) = read_request(&mut socket).await else {
                    continue;
                };
                let reply = handler(&request);
                seen.lock().unwrap().push(request);
                let _ = socket.write_all(reply.to_http().as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        FakeApi {
            base: format!("http://{}", addr),
            requests,
        }
    }

    fn client(&self) -> GitHubClient {
        // A proxy from the environment must not intercept loopback traffic
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        GitHubClient::new(&self.base, Some("secret-token"), "release-drafter-test").unwrap()
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.target).collect()
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    Some(Request {
        method: request_line.next()?.to_string(),
        target: request_line.next()?.to_string(),
        headers: head.to_lowercase(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    })
}

fn repo() -> RepositoryCoordinate {
    RepositoryCoordinate::new("o", "r")
}

fn commits(range: std::ops::Range<usize>) -> Vec<Value> {
    range
        .map(|i| {
            json!({
                "sha": format!("s{:03}", i),
                "html_url": format!("https://example.com/commit/s{:03}", i),
                "commit": { "message": format!("change {}", i) }
            })
        })
        .collect()
}

#[tokio::test]
async fn test_compare_merges_pages_in_order() {
    let api = FakeApi::start(|request| {
        let page = if request.target.ends_with("&page=2") {
            commits(100..150)
        } else {
            commits(0..100)
        };
        Reply::json(200, json!({ "total_commits": 150, "commits": page }))
    })
    .await;

    let comparison = api
        .client()
        .compare_commits(&repo(), "aaa", "main")
        .await
        .unwrap();

    assert_eq!(
        api.targets(),
        vec![
            "/repos/o/r/compare/aaa...main?per_page=100&page=1",
            "/repos/o/r/compare/aaa...main?per_page=100&page=2",
        ]
    );
    assert_eq!(comparison.total_commits, 150);
    assert_eq!(comparison.commits.len(), 150);
    let shas: Vec<&str> = comparison.commits.iter().map(|c| c.sha.as_str()).collect();
    assert_eq!(shas.first(), Some(&"s000"));
    assert_eq!(shas[99], "s099");
    assert_eq!(shas[100], "s100");
    assert_eq!(shas.last(), Some(&"s149"));
}

#[tokio::test]
async fn test_compare_stops_on_empty_page() {
    // The total claims more commits than the platform ever returns
    let api = FakeApi::start(|request| {
        let page = if request.target.ends_with("&page=1") {
            commits(0..100)
        } else {
            Vec::new()
        };
        Reply::json(200, json!({ "total_commits": 250, "commits": page }))
    })
    .await;

    let comparison = api
        .client()
        .compare_commits(&repo(), "aaa", "main")
        .await
        .unwrap();

    assert_eq!(api.requests().len(), 2);
    assert_eq!(comparison.commits.len(), 100);
}

#[tokio::test]
async fn test_compare_single_page_makes_one_request() {
    let api = FakeApi::start(|_| {
        Reply::json(200, json!({ "total_commits": 2, "commits": commits(0..2) }))
    })
    .await;

    let comparison = api
        .client()
        .compare_commits(&repo(), "aaa", "v1.1.0")
        .await
        .unwrap();

    assert_eq!(
        api.targets(),
        vec!["/repos/o/r/compare/aaa...v1.1.0?per_page=100&page=1"]
    );
    assert_eq!(comparison.commits[1].commit.message, "change 1");
}

#[tokio::test]
async fn test_missing_latest_release_is_not_found() {
    let api = FakeApi::start(|_| Reply::json(404, json!({ "message": "Not Found" }))).await;

    let err = api.client().get_latest_release(&repo()).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Not Found"));
    assert_eq!(api.targets(), vec!["/repos/o/r/releases/latest"]);
}

#[tokio::test]
async fn test_exhausted_rate_limit_is_rate_limited() {
    let api = FakeApi::start(|_| {
        Reply::json(403, json!({ "message": "API rate limit exceeded" }))
            .with_header("x-ratelimit-remaining", "0")
    })
    .await;

    let err = api.client().get_latest_release(&repo()).await.unwrap_err();
    assert!(matches!(err, DrafterError::RateLimited(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_forbidden_with_quota_left_is_platform_error() {
    let api = FakeApi::start(|_| {
        Reply::json(403, json!({ "message": "Resource not accessible by integration" }))
            .with_header("x-ratelimit-remaining", "4999")
    })
    .await;

    let err = api.client().get_latest_release(&repo()).await.unwrap_err();
    assert!(matches!(err, DrafterError::Platform { status: 403, .. }));
}

#[tokio::test]
async fn test_unknown_compare_base_is_not_a_conflict() {
    let api = FakeApi::start(|_| {
        Reply::json(422, json!({ "message": "No commit found for SHA: deadbeef" }))
    })
    .await;

    let err = api
        .client()
        .compare_commits(&repo(), "deadbeef", "main")
        .await
        .unwrap_err();
    assert!(matches!(err, DrafterError::Platform { status: 422, .. }));
    assert!(err.to_string().contains("No commit found"));
}

#[tokio::test]
async fn test_create_release_posts_tag_name_and_body() {
    let api = FakeApi::start(|_| {
        Reply::json(
            201,
            json!({ "id": 17, "html_url": "https://example.com/o/r/releases/tag/v1" }),
        )
    })
    .await;

    let published = api
        .client()
        .create_release(&repo(), &Release::for_tag("v1", "b"))
        .await
        .unwrap();

    assert_eq!(published.id, 17);
    assert_eq!(published.html_url, "https://example.com/o/r/releases/tag/v1");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].target, "/repos/o/r/releases");
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "tag_name": "v1", "name": "v1", "body": "b" }));
}

#[tokio::test]
async fn test_duplicate_release_is_conflict() {
    let api = FakeApi::start(|_| {
        Reply::json(
            422,
            json!({
                "message": "Validation Failed",
                "errors": [{ "resource": "Release", "code": "already_exists", "field": "tag_name" }]
            }),
        )
    })
    .await;

    let err = api
        .client()
        .create_release(&repo(), &Release::for_tag("v1", "b"))
        .await
        .unwrap_err();
    assert!(matches!(err, DrafterError::Conflict(_)));
}

#[tokio::test]
async fn test_requests_carry_api_headers() {
    let api = FakeApi::start(|_| {
        Reply::json(
            200,
            json!({ "ref": "refs/tags/v1.0.0", "object": { "sha": "abc1234", "type": "commit" } }),
        )
    })
    .await;

    let git_ref = api
        .client()
        .get_ref(&repo(), "tags/v1.0.0")
        .await
        .unwrap();
    assert_eq!(git_ref.object.sha, "abc1234");
    assert_eq!(git_ref.object.kind, "commit");

    let request = &api.requests()[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/repos/o/r/git/ref/tags/v1.0.0");
    assert!(request.headers.contains("authorization: bearer secret-token"));
    assert!(request.headers.contains("accept: application/vnd.github+json"));
    assert!(request.headers.contains("x-github-api-version: 2022-11-28"));
    assert!(request.headers.contains("user-agent: release-drafter-test"));
}
