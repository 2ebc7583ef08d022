//! Image URL resolution against the backend origin

use serde_json::Value;

use super::decode_field;

/// Resolves stored image references to fully qualified URLs
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResolver {
    origin: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(origin: &str, placeholder: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Resolve a single reference
    ///
    /// Rules apply in order and the first match wins: empty → placeholder,
    /// `http…` → unchanged, `/uploads…` → origin + path, anything else →
    /// `<origin>/uploads/<path>`.
    pub fn resolve(&self, path: Option<&str>) -> String {
        let path = match path.map(str::trim) {
            None | Some("") => return self.placeholder.clone(),
            Some(path) => path,
        };

        if path.starts_with("http") {
            path.to_string()
        } else if path.starts_with("/uploads") {
            format!("{}{}", self.origin, path)
        } else {
            format!("{}/uploads/{}", self.origin, path)
        }
    }

    /// Resolve a JSON value; anything but a string yields the placeholder
    pub fn resolve_value(&self, value: &Value) -> String {
        self.resolve(value.as_str())
    }

    /// Resolve a listing's `images` field, falling back to its legacy `img`
    ///
    /// `images` may be an array, a JSON-encoded array or a single path. The
    /// result always holds at least one URL.
    pub fn resolve_images(&self, images: &Value, img: &Value) -> Vec<String> {
        let mut resolved: Vec<String> = match &*decode_field(images) {
            Value::Array(items) => items.iter().map(|item| self.resolve_value(item)).collect(),
            Value::String(path) if !path.trim().is_empty() => {
                vec![self.resolve(Some(path.as_str()))]
            }
            _ => Vec::new(),
        };

        if resolved.is_empty() {
            if let Some(path) = img.as_str().filter(|path| !path.trim().is_empty()) {
                resolved.push(self.resolve(Some(path)));
            }
        }

        if resolved.is_empty() {
            resolved.push(self.placeholder.clone());
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "https://www.hlopg.com";

    fn resolver() -> ImageResolver {
        ImageResolver::new("https://www.hlopg.com/", "/assets/pg1.jpg")
    }

    #[test]
    fn test_missing_paths_use_placeholder() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(None), "/assets/pg1.jpg");
        assert_eq!(resolver.resolve(Some("")), "/assets/pg1.jpg");
        assert_eq!(resolver.resolve(Some("   ")), "/assets/pg1.jpg");
        assert_eq!(resolver.resolve_value(&json!(42)), "/assets/pg1.jpg");
        assert_eq!(resolver.resolve_value(&Value::Null), "/assets/pg1.jpg");
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(resolver().resolve(Some("http://x/y.jpg")), "http://x/y.jpg");
        assert_eq!(
            resolver().resolve(Some("https://cdn.example.com/uploads/a.jpg")),
            "https://cdn.example.com/uploads/a.jpg"
        );
    }

    #[test]
    fn test_relative_paths_resolve_against_origin() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(Some("/uploads/a.jpg")),
            format!("{ORIGIN}/uploads/a.jpg")
        );
        assert_eq!(
            resolver.resolve(Some("a.jpg")),
            format!("{ORIGIN}/uploads/a.jpg")
        );
    }

    #[test]
    fn test_images_field_shapes() {
        let resolver = resolver();

        assert_eq!(
            resolver.resolve_images(&json!("[\"a.jpg\"]"), &Value::Null),
            vec![format!("{ORIGIN}/uploads/a.jpg")]
        );
        assert_eq!(
            resolver.resolve_images(&json!(["a.jpg", "", "http://x/b.png"]), &Value::Null),
            vec![
                format!("{ORIGIN}/uploads/a.jpg"),
                "/assets/pg1.jpg".to_string(),
                "http://x/b.png".to_string()
            ]
        );
        assert_eq!(
            resolver.resolve_images(&json!("/uploads/c.jpg"), &Value::Null),
            vec![format!("{ORIGIN}/uploads/c.jpg")]
        );
    }

    #[test]
    fn test_images_fall_back_to_img_then_placeholder() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve_images(&json!([]), &json!("legacy.jpg")),
            vec![format!("{ORIGIN}/uploads/legacy.jpg")]
        );
        assert_eq!(
            resolver.resolve_images(&json!({"oops": true}), &Value::Null),
            vec!["/assets/pg1.jpg".to_string()]
        );
    }
}
