use std::collections::BTreeMap;

/// Callback arguments keyed by parameter name.
///
/// Older protocol revisions send plain strings. Later ones send a structured
/// value such as `{"value": "Lisa", "grammar_entry": "Lisa"}`; [`Args::text`]
/// reads both forms.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Args(BTreeMap<String, serde_json::Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// The string value of `key`, unwrapping structured values.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(value_text)
    }

    /// The first argument, in key order, that carries a string value.
    pub fn first_text(&self) -> Option<&str> {
        self.0.values().find_map(value_text)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn value_text(value: &serde_json::Value) -> Option<&str> {
    match value {
        serde_json::Value::String(s) => Some(s.as_str()),
        serde_json::Value::Object(fields) => fields
            .get("value")
            .or_else(|| fields.get("grammar_entry"))
            .and_then(serde_json::Value::as_str),
        _ => None,
    }
}

impl std::fmt::Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value_text(value) {
                Some(text) => write!(f, "{key}={text}")?,
                None => write!(f, "{key}={value}")?,
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_reads_plain_and_structured_values() {
        let args = Args::new()
            .with("plain", "Lisa")
            .with("structured", json!({"value": "John", "sort": "contact"}))
            .with("entry_only", json!({"grammar_entry": "Mary"}))
            .with("number", 3);

        assert_eq!(args.text("plain"), Some("Lisa"));
        assert_eq!(args.text("structured"), Some("John"));
        assert_eq!(args.text("entry_only"), Some("Mary"));
        assert_eq!(args.text("number"), None);
        assert_eq!(args.text("missing"), None);
    }

    #[test]
    fn display_lists_arguments_in_key_order() {
        let args = Args::new().with("b", "two").with("a", "one");
        assert_eq!(args.to_string(), "{a=one, b=two}");
    }
}
