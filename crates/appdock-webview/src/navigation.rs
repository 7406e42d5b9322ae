//! Navigation policy for the shell and for app surfaces.

/// Scheme of the bundled shell content.
pub const SHELL_SCHEME: &str = "appdock";

/// Prefixes the shell may navigate to, besides an optional dev server.
pub const SHELL_NAV_PREFIXES: &[&str] = &[
    "appdock://",
    // WebView2 rewrites custom protocols: appdock://localhost/… → http://appdock.localhost/…
    "http://appdock.localhost",
    "about:blank",
];

/// Check whether the shell webview may load `url`.
pub fn is_shell_navigation_allowed(url: &str, dev_url: Option<&str>) -> bool {
    if SHELL_NAV_PREFIXES.iter().any(|p| url.starts_with(p)) {
        return true;
    }
    dev_url.is_some_and(|dev| !dev.is_empty() && url.starts_with(dev))
}

/// App surfaces may browse the web but never reach local or script URLs.
pub fn is_app_navigation_allowed(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://") || url == "about:blank"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_allows_bundled_content() {
        assert!(is_shell_navigation_allowed("appdock://localhost/index.html", None));
        assert!(is_shell_navigation_allowed("http://appdock.localhost/index.html", None));
        assert!(is_shell_navigation_allowed("about:blank", None));
    }

    #[test]
    fn shell_allows_dev_server_only_when_configured() {
        let dev = Some("http://localhost:5173");
        assert!(is_shell_navigation_allowed("http://localhost:5173/", dev));
        assert!(!is_shell_navigation_allowed("http://localhost:5173/", None));
        assert!(!is_shell_navigation_allowed("https://evil.com", dev));
        assert!(!is_shell_navigation_allowed("https://evil.com", Some("")));
    }

    #[test]
    fn shell_blocks_everything_else() {
        assert!(!is_shell_navigation_allowed("https://mail.example.com", None));
        assert!(!is_shell_navigation_allowed("file:///etc/passwd", None));
        assert!(!is_shell_navigation_allowed("javascript:alert(1)", None));
    }

    #[test]
    fn apps_browse_http_only() {
        assert!(is_app_navigation_allowed("https://mail.example.com/inbox"));
        assert!(is_app_navigation_allowed("http://intranet.local"));
        assert!(is_app_navigation_allowed("about:blank"));
        assert!(!is_app_navigation_allowed("file:///Users/me/.ssh/id_rsa"));
        assert!(!is_app_navigation_allowed("javascript:void(0)"));
        assert!(!is_app_navigation_allowed("data:text/html,<h1>x</h1>"));
        assert!(!is_app_navigation_allowed("appdock://localhost/index.html"));
    }
}
