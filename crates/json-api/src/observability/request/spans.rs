//! HTTP span helpers.

use uuid::Uuid;

/// Collections whose next path segment is a free-form slug.
const SLUG_COLLECTIONS: [&str; 1] = ["products"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous: Option<&str> = None;

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if previous.is_some_and(|previous| SLUG_COLLECTIONS.contains(&previous)) {
            normalised.push_str("{slug}");
        } else {
            normalised.push_str(segment);
        }

        previous = Some(segment);
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_and_slugs_are_collapsed() {
        let uuid = Uuid::nil();

        assert_eq!(
            normalise_path_for_span_name(&format!("/orders/{uuid}/payment")),
            "/orders/{uuid}/payment"
        );
        assert_eq!(
            normalise_path_for_span_name("/products/linen-shirt/reviews"),
            "/products/{slug}/reviews"
        );
        assert_eq!(normalise_path_for_span_name("/products"), "/products");
    }

    #[test]
    fn span_name_joins_method_and_path() {
        let names = request_span_name("GET", "/cart");

        assert_eq!(names.otel_span_name, "GET /cart");
    }
}
