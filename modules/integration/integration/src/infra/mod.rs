pub mod auth;
pub mod gateways;

use url::Url;

/// `host[:port]` of a URL, as used in error descriptions.
#[must_use]
pub fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    }
}
