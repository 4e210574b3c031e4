mod args;
mod entity;

pub use args::Args;
pub use entity::Entity;

/// The four synchronous callbacks the dialogue manager may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    Action,
    WhQuery,
    Validity,
    EntityRecognition,
}

impl CallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackKind::Action => "action",
            CallbackKind::WhQuery => "wh_query",
            CallbackKind::Validity => "validity",
            CallbackKind::EntityRecognition => "entity_recognition",
        }
    }
}

impl std::fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A callback invocation. The caller blocks until exactly one reply is produced.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CallbackRequest {
    kind: CallbackKind,

    /// Namespace (application/device domain) the callback belongs to
    domain_id: String,

    /// Operation name, e.g. "phone_number_of_contact"
    name: String,

    #[serde(default)]
    args: Args,
}

impl CallbackRequest {
    pub fn new(kind: CallbackKind, domain_id: &str, name: &str, args: Args) -> Self {
        Self {
            kind,
            domain_id: domain_id.to_string(),
            name: name.to_string(),
            args,
        }
    }

    pub fn action(domain_id: &str, name: &str, args: Args) -> Self {
        Self::new(CallbackKind::Action, domain_id, name, args)
    }

    pub fn wh_query(domain_id: &str, name: &str, args: Args) -> Self {
        Self::new(CallbackKind::WhQuery, domain_id, name, args)
    }

    pub fn validity(domain_id: &str, name: &str, args: Args) -> Self {
        Self::new(CallbackKind::Validity, domain_id, name, args)
    }

    pub fn entity_recognition(domain_id: &str, name: &str, args: Args) -> Self {
        Self::new(CallbackKind::EntityRecognition, domain_id, name, args)
    }

    pub fn kind(&self) -> CallbackKind {
        self.kind
    }

    pub fn domain_id(&self) -> &str {
        &self.domain_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &Args {
        &self.args
    }
}

/// The typed reply to a [`CallbackRequest`], one variant per [`CallbackKind`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallbackReply {
    Action { succeeded: bool },
    WhQuery { entities: Vec<Entity> },
    Validity { is_valid: bool },
    EntityRecognition { entities: Vec<Entity> },
}

impl CallbackReply {
    /// The most conservative reply for `kind`: failure, invalid, or no entities.
    pub fn fail_closed(kind: CallbackKind) -> Self {
        match kind {
            CallbackKind::Action => CallbackReply::Action { succeeded: false },
            CallbackKind::WhQuery => CallbackReply::WhQuery { entities: vec![] },
            CallbackKind::Validity => CallbackReply::Validity { is_valid: false },
            CallbackKind::EntityRecognition => CallbackReply::EntityRecognition { entities: vec![] },
        }
    }

    pub fn kind(&self) -> CallbackKind {
        match self {
            CallbackReply::Action { .. } => CallbackKind::Action,
            CallbackReply::WhQuery { .. } => CallbackKind::WhQuery,
            CallbackReply::Validity { .. } => CallbackKind::Validity,
            CallbackReply::EntityRecognition { .. } => CallbackKind::EntityRecognition,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        match self {
            CallbackReply::WhQuery { entities } | CallbackReply::EntityRecognition { entities } => {
                entities
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_closed_matches_kind() {
        for kind in [
            CallbackKind::Action,
            CallbackKind::WhQuery,
            CallbackKind::Validity,
            CallbackKind::EntityRecognition,
        ] {
            assert_eq!(CallbackReply::fail_closed(kind).kind(), kind);
        }
        assert_eq!(
            CallbackReply::fail_closed(CallbackKind::Validity),
            CallbackReply::Validity { is_valid: false }
        );
        assert!(CallbackReply::fail_closed(CallbackKind::WhQuery).entities().is_empty());
    }

    #[test]
    fn request_accepts_missing_args() {
        let json = r#"{"kind":"validity","domain_id":"phone","name":"PhoneNumberAvailable"}"#;
        let request: CallbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind(), CallbackKind::Validity);
        assert!(request.args().is_empty());
    }
}
