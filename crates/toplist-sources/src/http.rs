use reqwest::Client;

/// Create a reqwest Client with a browser-like User-Agent. Both the source
/// site and the Trakt API sit behind Cloudflare and reject the default
/// reqwest agent string.
pub fn create_http_client() -> Client {
    Client::builder()
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .build()
        .unwrap_or_else(|_| Client::new())
}
