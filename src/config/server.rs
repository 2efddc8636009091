/// Server binding configuration.
/// 
/// Defaults can be overridden with the `JANGGI_HOST` and `JANGGI_PORT`
/// environment variables.
use log::warn;

/// Default interface the HTTP server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port the HTTP server listens on.
pub const DEFAULT_PORT: u16 = 8080;

/// Resolve the bind address from the environment, falling back to defaults.
pub fn bind_address() -> (String, u16) {
    let host = std::env::var("JANGGI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var("JANGGI_PORT") {
        Ok(raw) => parse_port(&raw).unwrap_or_else(|| {
            warn!("[Config] Ignoring invalid JANGGI_PORT={:?}, using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };
    (host, port)
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("9000"), Some(9000));
        assert_eq!(parse_port(" 8081 "), Some(8081));
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("http"), None);
        assert_eq!(parse_port("70000"), None);
    }
}
