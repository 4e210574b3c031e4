use std::collections::BTreeMap;

/// A small named-field record returned by queries and entity recognizers.
///
/// A field may be present with an absent value, e.g. the phone number of a
/// contact that has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Entity(BTreeMap<String, Option<String>>);

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), Some(value.to_string()));
        self
    }

    pub fn with_optional(mut self, key: &str, value: Option<&str>) -> Self {
        self.0.insert(key.to_string(), value.map(str::to_string));
        self
    }

    /// The value of `key`; `None` when the field is missing or absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_kept_as_fields() {
        let entity = Entity::new().with_optional("grammar_entry", None);
        assert!(entity.contains("grammar_entry"));
        assert_eq!(entity.field("grammar_entry"), None);
        assert_eq!(serde_json::to_string(&entity).unwrap(), r#"{"grammar_entry":null}"#);
    }
}
