use serde::{Deserialize, Serialize};

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Chemical element used as a visual/thematic parameter for the prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AtomKind {
    Hydrogen,
    Helium,
    Lithium,
    Carbon,
    Oxygen,
}

impl AtomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomKind::Hydrogen => "hydrogen",
            AtomKind::Helium => "helium",
            AtomKind::Lithium => "lithium",
            AtomKind::Carbon => "carbon",
            AtomKind::Oxygen => "oxygen",
        }
    }
}

impl std::fmt::Display for AtomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub subject: String,
    pub atom: AtomKind,
    pub wavelength: f32,
    pub amplitude: f32,
    pub init_image: Option<String>,
    pub model_id: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ImageGenerationResponse {
    /// Normalized image reference: an absolute URL or a `data:` URI.
    pub image: String,
    pub model: String,
}

/// Normalize an image reference for display or upload. URLs and `data:`
/// references pass through; anything else is treated as a raw base64 payload
/// and wrapped into a PNG data URI.
pub fn normalize_image_ref(reference: &str) -> String {
    if reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("data:")
    {
        reference.to_string()
    } else {
        format!("{}{}", DATA_URI_PREFIX, reference)
    }
}

/// The base64 payload of an inline data reference, if `image` is one.
pub fn inline_base64(image: &str) -> Option<&str> {
    let rest = image.strip_prefix("data:")?;
    let comma = rest.find(',')?;
    Some(&rest[comma + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_urls() {
        assert_eq!(normalize_image_ref("https://x/y.png"), "https://x/y.png");
        assert_eq!(normalize_image_ref("http://x/y.png"), "http://x/y.png");
    }

    #[test]
    fn test_normalize_wraps_raw_base64() {
        assert_eq!(
            normalize_image_ref("aGVsbG8="),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_normalize_keeps_data_uris() {
        let uri = "data:image/png;base64,aGVsbG8=";
        assert_eq!(normalize_image_ref(uri), uri);
    }

    #[test]
    fn test_inline_base64() {
        assert_eq!(
            inline_base64("data:image/png;base64,aGVsbG8="),
            Some("aGVsbG8=")
        );
        assert_eq!(inline_base64("https://x/y.png"), None);
    }

    #[test]
    fn test_atom_kind_names() {
        assert_eq!(AtomKind::Hydrogen.as_str(), "hydrogen");
        assert_eq!(AtomKind::Oxygen.to_string(), "oxygen");
    }
}
