use reqwest::Url;

use crate::error::CoreError;

/// Validate `base` as an HTTP(S) address and append the service `path`.
///
/// A trailing slash on `base` and a missing leading slash on `path` are both
/// tolerated, so `http://host:9650/` + `ext/info` and `http://host:9650` +
/// `/ext/info` resolve to the same endpoint.
pub(super) fn endpoint_url(base: &str, path: &str) -> Result<Url, CoreError> {
    let parsed = Url::parse(base).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "invalid base URI `{base}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CoreError::InvalidConfig(format!(
                "unsupported URI scheme `{other}`; expected http or https"
            )));
        }
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(CoreError::InvalidConfig(format!(
            "base URI `{base}` must not carry a query or fragment"
        )));
    }

    let joined = format!(
        "{}/{}",
        parsed.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map_err(|e| CoreError::InvalidConfig(format!("invalid endpoint path `{path}`: {e}")))
}
