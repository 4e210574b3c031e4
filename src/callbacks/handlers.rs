use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::contacts::{ContactDirectory, EntityResolver};
use crate::types::{Args, Entity};
use crate::ui::{UiProjector, UiUpdate};

pub const CALL_ACTION: &str = "call";
pub const PHONE_NUMBER_OF_CONTACT: &str = "phone_number_of_contact";
pub const CALLER_NUMBER_AVAILABLE: &str = "CallerNumberAvailable";
pub const PHONE_NUMBER_AVAILABLE: &str = "PhoneNumberAvailable";
pub const CONTACT_RECOGNIZER: &str = "ContactRecognizer";

pub const ARG_PHONE_NUMBER_TO_CALL: &str = "phone_number_to_call";
pub const ARG_SELECTED_CONTACT_OF_PHONE_NUMBER: &str = "selected_contact_of_phone_number";
pub const ARG_SELECTED_CONTACT_TO_CALL: &str = "selected_contact_to_call";
pub const ARG_SEARCH_STRING: &str = "search_string";

/// One callback invocation as seen by a handler.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub domain_id: &'a str,
    pub name: &'a str,
    pub args: &'a Args,
}

pub trait ActionHandler: Send + Sync {
    /// Executes the action, reporting whether it succeeded.
    fn perform(&self, call: &Invocation<'_>) -> bool;
}

pub trait QueryHandler: Send + Sync {
    fn answer(&self, call: &Invocation<'_>) -> Vec<Entity>;
}

pub trait ValidityHandler: Send + Sync {
    fn is_valid(&self, call: &Invocation<'_>) -> bool;
}

pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, call: &Invocation<'_>) -> Vec<Entity>;
}

// --- Fallbacks ---

/// Reports success for actions nobody handles. Placeholder behavior of the
/// demo domain.
#[derive(Debug, Default)]
pub struct Acknowledge;

impl ActionHandler for Acknowledge {
    fn perform(&self, call: &Invocation<'_>) -> bool {
        tracing::info!(domain = call.domain_id, action = call.name, "no handler registered, acknowledging");
        true
    }
}

/// Fails unknown actions closed.
#[derive(Debug, Default)]
pub struct Reject;

impl ActionHandler for Reject {
    fn perform(&self, call: &Invocation<'_>) -> bool {
        tracing::warn!(domain = call.domain_id, action = call.name, "no handler registered, rejecting");
        false
    }
}

#[derive(Debug, Default)]
pub struct NoAnswer;

impl QueryHandler for NoAnswer {
    fn answer(&self, call: &Invocation<'_>) -> Vec<Entity> {
        tracing::debug!(domain = call.domain_id, query = call.name, "no handler registered");
        vec![]
    }
}

/// Every unrecognized validity check passes.
#[derive(Debug, Default)]
pub struct Permit;

impl ValidityHandler for Permit {
    fn is_valid(&self, call: &Invocation<'_>) -> bool {
        tracing::debug!(domain = call.domain_id, validity = call.name, "no handler registered, permitting");
        true
    }
}

#[derive(Debug, Default)]
pub struct NoEntities;

impl EntityRecognizer for NoEntities {
    fn recognize(&self, call: &Invocation<'_>) -> Vec<Entity> {
        tracing::debug!(domain = call.domain_id, recognizer = call.name, "no handler registered");
        vec![]
    }
}

// --- Phone domain ---

#[derive(Debug, thiserror::Error)]
pub enum DialError {
    #[error("invalid phone number: {0:?}")]
    InvalidNumber(String),
}

/// Platform dialer the `call` action hands numbers to.
#[cfg_attr(test, automock)]
pub trait Dialer: Send + Sync {
    fn dial(&self, number: &str) -> Result<(), DialError>;
}

/// Dialer that asks the UI to open its dial screen.
pub struct ProjectorDialer {
    projector: Arc<dyn UiProjector>,
}

impl ProjectorDialer {
    pub fn new(projector: Arc<dyn UiProjector>) -> Self {
        Self { projector }
    }
}

impl Dialer for ProjectorDialer {
    fn dial(&self, number: &str) -> Result<(), DialError> {
        let valid = number.chars().any(|c| c.is_ascii_digit())
            && number
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '));
        if !valid {
            return Err(DialError::InvalidNumber(number.to_string()));
        }
        self.projector.project(UiUpdate::DialRequested(number.to_string()));
        Ok(())
    }
}

/// `call`: dials `phone_number_to_call`.
pub struct CallContact {
    dialer: Arc<dyn Dialer>,
}

impl CallContact {
    pub fn new(dialer: Arc<dyn Dialer>) -> Self {
        Self { dialer }
    }
}

impl ActionHandler for CallContact {
    fn perform(&self, call: &Invocation<'_>) -> bool {
        let Some(number) = call.args.text(ARG_PHONE_NUMBER_TO_CALL) else {
            tracing::warn!(action = call.name, "missing argument {}", ARG_PHONE_NUMBER_TO_CALL);
            return false;
        };
        match self.dialer.dial(number) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(action = call.name, "failed to dial: {}", e);
                false
            }
        }
    }
}

/// `phone_number_of_contact`: one entity carrying the number, absent if the
/// contact has none.
pub struct PhoneNumberOfContact {
    directory: Arc<ContactDirectory>,
}

impl PhoneNumberOfContact {
    pub fn new(directory: Arc<ContactDirectory>) -> Self {
        Self { directory }
    }
}

impl QueryHandler for PhoneNumberOfContact {
    fn answer(&self, call: &Invocation<'_>) -> Vec<Entity> {
        let Some(contact) = call.args.text(ARG_SELECTED_CONTACT_OF_PHONE_NUMBER) else {
            tracing::warn!(query = call.name, "missing argument {}", ARG_SELECTED_CONTACT_OF_PHONE_NUMBER);
            return vec![];
        };
        let number = self.directory.lookup(contact);
        tracing::debug!(contact, number = ?number, "resolved phone number");
        vec![Entity::new().with_optional("grammar_entry", number)]
    }
}

/// `CallerNumberAvailable` / `PhoneNumberAvailable`: whether the named
/// contact has a reachable number.
pub struct ContactNumberAvailable {
    directory: Arc<ContactDirectory>,
}

impl ContactNumberAvailable {
    pub fn new(directory: Arc<ContactDirectory>) -> Self {
        Self { directory }
    }
}

fn contact_argument<'a>(args: &'a Args) -> Option<&'a str> {
    args.text(ARG_SELECTED_CONTACT_OF_PHONE_NUMBER)
        .or_else(|| args.text(ARG_SELECTED_CONTACT_TO_CALL))
        .or_else(|| args.first_text())
}

impl ValidityHandler for ContactNumberAvailable {
    fn is_valid(&self, call: &Invocation<'_>) -> bool {
        match contact_argument(call.args) {
            Some(contact) => self.directory.has_reachable_number(contact),
            None => {
                tracing::warn!(validity = call.name, "no contact argument");
                false
            }
        }
    }
}

/// `ContactRecognizer`: contacts named in `search_string`.
pub struct ContactRecognizer {
    resolver: EntityResolver,
}

impl ContactRecognizer {
    pub fn new(resolver: EntityResolver) -> Self {
        Self { resolver }
    }
}

impl EntityRecognizer for ContactRecognizer {
    fn recognize(&self, call: &Invocation<'_>) -> Vec<Entity> {
        match call.args.text(ARG_SEARCH_STRING) {
            Some(search) => self.resolver.recognize(search),
            None => {
                tracing::warn!(recognizer = call.name, "missing argument {}", ARG_SEARCH_STRING);
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::RecordingProjector;

    fn invocation<'a>(name: &'a str, args: &'a Args) -> Invocation<'a> {
        Invocation {
            domain_id: "phone",
            name,
            args,
        }
    }

    #[test]
    fn call_contact_dials_number() {
        let mut dialer = MockDialer::new();
        dialer
            .expect_dial()
            .withf(|n| n == "0709876543")
            .times(1)
            .returning(|_| Ok(()));
        let handler = CallContact::new(Arc::new(dialer));

        let args = Args::new().with(ARG_PHONE_NUMBER_TO_CALL, "0709876543");
        assert!(handler.perform(&invocation(CALL_ACTION, &args)));
    }

    #[test]
    fn call_contact_fails_without_number() {
        let mut dialer = MockDialer::new();
        dialer.expect_dial().never();
        let handler = CallContact::new(Arc::new(dialer));
        assert!(!handler.perform(&invocation(CALL_ACTION, &Args::new())));
    }

    #[test]
    fn call_contact_reports_dialer_failure() {
        let mut dialer = MockDialer::new();
        dialer
            .expect_dial()
            .returning(|n| Err(DialError::InvalidNumber(n.to_string())));
        let handler = CallContact::new(Arc::new(dialer));
        let args = Args::new().with(ARG_PHONE_NUMBER_TO_CALL, "abc");
        assert!(!handler.perform(&invocation(CALL_ACTION, &args)));
    }

    #[test]
    fn projector_dialer_validates_numbers() {
        let projector = Arc::new(RecordingProjector::default());
        let dialer = ProjectorDialer::new(projector.clone());

        assert!(dialer.dial("+46 70-123 45 67").is_ok());
        assert!(matches!(dialer.dial("call me"), Err(DialError::InvalidNumber(_))));
        assert!(matches!(dialer.dial(""), Err(DialError::InvalidNumber(_))));
        assert_eq!(
            projector.updates(),
            vec![UiUpdate::DialRequested("+46 70-123 45 67".into())]
        );
    }

    #[test]
    fn phone_number_of_unreachable_contact_is_absent_entity() {
        let handler = PhoneNumberOfContact::new(Arc::new(ContactDirectory::example()));
        let args = Args::new().with(ARG_SELECTED_CONTACT_OF_PHONE_NUMBER, "Andy");
        let entities = handler.answer(&invocation(PHONE_NUMBER_OF_CONTACT, &args));
        assert_eq!(entities, vec![Entity::new().with_optional("grammar_entry", None)]);
    }

    #[test]
    fn number_available_reads_alternative_arguments() {
        let handler = ContactNumberAvailable::new(Arc::new(ContactDirectory::example()));
        let to_call = Args::new().with(ARG_SELECTED_CONTACT_TO_CALL, "Mary");
        assert!(handler.is_valid(&invocation(CALLER_NUMBER_AVAILABLE, &to_call)));

        let other = Args::new().with("selected_contact", "Andy");
        assert!(!handler.is_valid(&invocation(CALLER_NUMBER_AVAILABLE, &other)));

        assert!(!handler.is_valid(&invocation(CALLER_NUMBER_AVAILABLE, &Args::new())));
    }

    #[test]
    fn contact_recognizer_requires_search_string() {
        let directory = Arc::new(ContactDirectory::example());
        let handler = ContactRecognizer::new(EntityResolver::new(directory));
        assert!(handler
            .recognize(&invocation(CONTACT_RECOGNIZER, &Args::new()))
            .is_empty());
        let args = Args::new().with(ARG_SEARCH_STRING, "phone john");
        assert_eq!(
            handler.recognize(&invocation(CONTACT_RECOGNIZER, &args)).len(),
            1
        );
    }
}
