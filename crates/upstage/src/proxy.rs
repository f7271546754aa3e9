//! Outbound proxy selection from the conventional environment variables.

/// Checked in priority order; the first non-empty value wins.
const PROXY_ENV_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// Returns the proxy URL configured in the process environment, if any.
pub(crate) fn proxy_url_from_env() -> Option<String> {
    select_proxy_url(|name| std::env::var(name).ok())
}

fn select_proxy_url(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    PROXY_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn lowercase_http_proxy_is_used_when_it_is_the_only_one_set() {
        let vars = env(&[("http_proxy", "http://proxy.local:3128")]);
        let url = select_proxy_url(|name| vars.get(name).cloned());
        assert_eq!(url.as_deref(), Some("http://proxy.local:3128"));
    }

    #[test]
    fn https_proxy_wins_over_lowercase_http_proxy() {
        let vars = env(&[
            ("HTTPS_PROXY", "http://secure.local:3128"),
            ("http_proxy", "http://plain.local:3128"),
        ]);
        let url = select_proxy_url(|name| vars.get(name).cloned());
        assert_eq!(url.as_deref(), Some("http://secure.local:3128"));
    }

    #[test]
    fn empty_values_are_skipped() {
        let vars = env(&[
            ("HTTPS_PROXY", ""),
            ("HTTP_PROXY", "http://fallback.local:3128"),
        ]);
        let url = select_proxy_url(|name| vars.get(name).cloned());
        assert_eq!(url.as_deref(), Some("http://fallback.local:3128"));
    }

    #[test]
    fn no_variables_means_no_proxy() {
        let url = select_proxy_url(|_| None);
        assert_eq!(url, None);
    }
}
