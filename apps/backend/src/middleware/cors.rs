use actix_cors::Cors;
use actix_web::http::header;

/// CORS for the feedback pages and admin console.
///
/// Origins come from configuration; entries that are empty, `null`, or not
/// http(s) are skipped.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::RETRY_AFTER,
        ])
        .max_age(3600);

    for origin in usable_origins(allowed_origins) {
        cors = cors.allowed_origin(origin);
    }

    cors
}

fn usable_origins(origins: &[String]) -> impl Iterator<Item = &str> {
    origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        let origins = vec![
            "http://localhost:8080".to_string(),
            " https://feedback.example.org ".to_string(),
            "null".to_string(),
            "".to_string(),
            "ftp://files.example.org".to_string(),
        ];
        let kept: Vec<&str> = usable_origins(&origins).collect();
        assert_eq!(kept, vec!["http://localhost:8080", "https://feedback.example.org"]);
    }
}
