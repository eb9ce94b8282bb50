mod common;

use anyhow::Result;
use reqwest::StatusCode;

// The JWT middleware rejects before any service or database work, so these
// assertions hold whether or not a database is reachable.

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for (method, path) in [
        ("POST", "/api/posts"),
        ("POST", "/api/drafts"),
        ("GET", "/api/notifications"),
        ("PUT", "/api/comments/00000000-0000-0000-0000-000000000000/like"),
    ] {
        let url = format!("{}{}", server.base_url, path);
        let req = match method {
            "POST" => client.post(&url),
            "PUT" => client.put(&url),
            _ => client.get(&url),
        };
        let res = req.send().await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should be rejected without a token",
            method,
            path
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_bearer_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/notifications", server.base_url);

    // Wrong scheme
    let res = client
        .get(&url)
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let res = client
        .get(&url)
        .header("authorization", "Bearer not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
