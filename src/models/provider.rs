use serde_json::Value;

/// The generation API answers with one of several loosely related JSON
/// shapes. `from_value` resolves a body into exactly one variant; callers
/// match on the variant instead of probing optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// Single `image` field.
    Image(String),
    /// `images` array of references.
    Images(Vec<String>),
    /// `output` array of references.
    Output(Vec<String>),
    /// `artifacts` array with embedded base64 payloads.
    Artifacts(Vec<String>),
    /// `data` array whose entries hold base64 payloads or URLs.
    Data(Vec<String>),
    /// Job accepted but still running; poll `fetch_url` for the result.
    Processing {
        fetch_url: Option<String>,
        request_id: Option<Value>,
    },
    /// Provider-reported failure.
    Error {
        message: String,
        detail: Option<String>,
    },
    Unknown,
}

impl ProviderResponse {
    /// Ordered matcher over the known response shapes. Error shapes win over
    /// everything, image-bearing shapes win over a processing status, and
    /// only present, non-empty references count as matches.
    pub fn from_value(value: &Value) -> Self {
        if let Some(error) = error_shape(value) {
            return error;
        }
        if let Some(image) = non_empty_str(value.get("image")) {
            return ProviderResponse::Image(image);
        }
        if let Some(images) = ref_list(value.get("images")) {
            return ProviderResponse::Images(images);
        }
        if let Some(output) = ref_list(value.get("output")) {
            return ProviderResponse::Output(output);
        }
        if let Some(artifacts) = artifact_list(value.get("artifacts")) {
            return ProviderResponse::Artifacts(artifacts);
        }
        if let Some(data) = data_list(value.get("data")) {
            return ProviderResponse::Data(data);
        }
        if status_of(value) == Some("processing") {
            return ProviderResponse::Processing {
                fetch_url: non_empty_str(value.get("fetch_result")),
                request_id: value.get("id").filter(|v| !v.is_null()).cloned(),
            };
        }
        ProviderResponse::Unknown
    }

    /// First extractable image reference, if this shape carries one.
    pub fn image_ref(&self) -> Option<&str> {
        match self {
            ProviderResponse::Image(image) => Some(image),
            ProviderResponse::Images(list)
            | ProviderResponse::Output(list)
            | ProviderResponse::Artifacts(list)
            | ProviderResponse::Data(list) => list.first().map(String::as_str),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, ProviderResponse::Processing { .. })
    }
}

fn status_of(value: &Value) -> Option<&str> {
    value.get("status").and_then(Value::as_str)
}

fn error_shape(value: &Value) -> Option<ProviderResponse> {
    let status = status_of(value).unwrap_or("");
    let error_field = value.get("error").filter(|v| !v.is_null());
    if status != "error" && status != "failed" && error_field.is_none() {
        return None;
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error_field.and_then(Value::as_str))
        .or_else(|| {
            error_field
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .unwrap_or("provider reported a failure")
        .to_string();

    let detail = error_field
        .and_then(|e| e.get("log"))
        .and_then(Value::as_str)
        .or_else(|| value.get("logs").and_then(Value::as_str))
        .map(String::from);

    Some(ProviderResponse::Error { message, detail })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn ref_list(value: Option<&Value>) -> Option<Vec<String>> {
    let entries = value?.as_array()?;
    let first = entries.first()?.as_str().filter(|s| !s.is_empty())?;
    let mut list = vec![first.to_string()];
    list.extend(
        entries
            .iter()
            .skip(1)
            .filter_map(Value::as_str)
            .map(String::from),
    );
    Some(list)
}

fn artifact_list(value: Option<&Value>) -> Option<Vec<String>> {
    let entries = value?.as_array()?;
    entries
        .first()?
        .get("base64")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?;
    Some(
        entries
            .iter()
            .filter_map(|e| e.get("base64").and_then(Value::as_str))
            .map(String::from)
            .collect(),
    )
}

fn data_list(value: Option<&Value>) -> Option<Vec<String>> {
    let entries = value?.as_array()?;
    data_entry_ref(entries.first()?)?;
    Some(entries.iter().filter_map(data_entry_ref).collect())
}

fn data_entry_ref(entry: &Value) -> Option<String> {
    for field in ["base64", "b64_json", "url"] {
        if let Some(s) = entry.get(field).and_then(Value::as_str) {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_image_wins_over_images_array() {
        let body = json!({"image": "one.png", "images": ["two.png"]});
        let parsed = ProviderResponse::from_value(&body);
        assert_eq!(parsed.image_ref(), Some("one.png"));
        assert!(matches!(parsed, ProviderResponse::Image(_)));
    }

    #[test]
    fn test_empty_image_field_falls_through() {
        let body = json!({"image": "", "images": ["two.png"]});
        let parsed = ProviderResponse::from_value(&body);
        assert_eq!(parsed.image_ref(), Some("two.png"));
        assert!(matches!(parsed, ProviderResponse::Images(_)));
    }

    #[test]
    fn test_output_array() {
        let body = json!({"output": ["https://cdn/out.png"]});
        assert_eq!(
            ProviderResponse::from_value(&body).image_ref(),
            Some("https://cdn/out.png")
        );
    }

    #[test]
    fn test_artifacts_base64() {
        let body = json!({"artifacts": [{"base64": "aGVsbG8=", "seed": 42}]});
        let parsed = ProviderResponse::from_value(&body);
        assert_eq!(parsed.image_ref(), Some("aGVsbG8="));
        assert!(matches!(parsed, ProviderResponse::Artifacts(_)));
    }

    #[test]
    fn test_data_entries_url_and_base64() {
        let body = json!({"data": [{"url": "https://cdn/a.png"}]});
        assert_eq!(
            ProviderResponse::from_value(&body).image_ref(),
            Some("https://cdn/a.png")
        );

        let body = json!({"data": [{"b64_json": "aGVsbG8="}]});
        assert_eq!(
            ProviderResponse::from_value(&body).image_ref(),
            Some("aGVsbG8=")
        );
    }

    #[test]
    fn test_processing_with_fetch_url() {
        let body = json!({"status": "processing", "fetch_result": "https://p/poll", "id": "r1"});
        let parsed = ProviderResponse::from_value(&body);
        assert!(parsed.is_processing());
        match parsed {
            ProviderResponse::Processing {
                fetch_url,
                request_id,
            } => {
                assert_eq!(fetch_url.as_deref(), Some("https://p/poll"));
                assert_eq!(request_id, Some(json!("r1")));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_image_wins_over_processing_status() {
        let body = json!({"status": "processing", "image": "done.png"});
        assert_eq!(
            ProviderResponse::from_value(&body).image_ref(),
            Some("done.png")
        );
    }

    #[test]
    fn test_error_status_with_message() {
        let body = json!({"status": "error", "message": "invalid key"});
        match ProviderResponse::from_value(&body) {
            ProviderResponse::Error { message, detail } => {
                assert_eq!(message, "invalid key");
                assert_eq!(detail, None);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_error_field_with_nested_log() {
        let body = json!({"error": {"message": "out of credits", "log": "billing: quota=0"}});
        match ProviderResponse::from_value(&body) {
            ProviderResponse::Error { message, detail } => {
                assert_eq!(message, "out of credits");
                assert_eq!(detail.as_deref(), Some("billing: quota=0"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_error_wins_over_image() {
        let body = json!({"status": "failed", "message": "nsfw", "image": "x.png"});
        assert!(matches!(
            ProviderResponse::from_value(&body),
            ProviderResponse::Error { .. }
        ));
    }

    #[test]
    fn test_unrecognized_body_is_unknown() {
        let body = json!({"status": "done", "eta": 3});
        let parsed = ProviderResponse::from_value(&body);
        assert_eq!(parsed, ProviderResponse::Unknown);
        assert_eq!(parsed.image_ref(), None);
        assert!(!parsed.is_processing());
    }
}
