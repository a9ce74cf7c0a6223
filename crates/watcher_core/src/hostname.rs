use url::Url;

/// Best-effort hostname of `url`; `None` when the URL does not parse or has
/// no host component.
pub fn hostname_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(ToOwned::to_owned)
}
