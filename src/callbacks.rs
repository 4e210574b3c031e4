//! Answers the synchronous callbacks the dialogue manager issues.
//!
//! Each callback kind has its own registry of named handlers plus an explicit
//! fallback for names nobody registered. Every entry point produces exactly
//! one reply and never fails; lookup misses yield the most conservative
//! answer the handler defines.

mod handlers;
mod registry;

use std::sync::Arc;

pub use handlers::*;
pub use registry::Registry;

use crate::contacts::{ContactDirectory, EntityResolver};
use crate::types::{Args, CallbackKind, CallbackReply, CallbackRequest, Entity};
use crate::ui::{UiProjector, UiUpdate};

/// What happens to actions no handler is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownActionPolicy {
    /// Report success. Placeholder behavior of the demo domain.
    Acknowledge,
    /// Report failure.
    #[default]
    Reject,
}

impl std::str::FromStr for UnknownActionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "acknowledge" | "ack" => Ok(UnknownActionPolicy::Acknowledge),
            "reject" => Ok(UnknownActionPolicy::Reject),
            other => Err(format!("unknown action policy: {other}")),
        }
    }
}

impl UnknownActionPolicy {
    fn handler(self) -> Arc<dyn ActionHandler> {
        match self {
            UnknownActionPolicy::Acknowledge => Arc::new(Acknowledge),
            UnknownActionPolicy::Reject => Arc::new(Reject),
        }
    }
}

pub struct CallbackRouter {
    actions: Registry<dyn ActionHandler>,
    queries: Registry<dyn QueryHandler>,
    validities: Registry<dyn ValidityHandler>,
    recognizers: Registry<dyn EntityRecognizer>,
    projector: Arc<dyn UiProjector>,
}

impl CallbackRouter {
    /// A router without domain handlers: unknown actions follow `policy`,
    /// unknown queries and recognizers answer nothing, unknown validity
    /// checks pass.
    pub fn new(projector: Arc<dyn UiProjector>, policy: UnknownActionPolicy) -> Self {
        Self {
            actions: Registry::new(policy.handler()),
            queries: Registry::new(Arc::new(NoAnswer)),
            validities: Registry::new(Arc::new(Permit)),
            recognizers: Registry::new(Arc::new(NoEntities)),
            projector,
        }
    }

    /// The phone domain: calling, phone-number queries and contact recognition
    /// against `directory`.
    pub fn phone_domain(
        projector: Arc<dyn UiProjector>,
        policy: UnknownActionPolicy,
        directory: Arc<ContactDirectory>,
        dialer: Arc<dyn Dialer>,
    ) -> Self {
        let available: Arc<dyn ValidityHandler> =
            Arc::new(ContactNumberAvailable::new(directory.clone()));

        Self::new(projector, policy)
            .with_action(CALL_ACTION, Arc::new(CallContact::new(dialer)))
            .with_query(
                PHONE_NUMBER_OF_CONTACT,
                Arc::new(PhoneNumberOfContact::new(directory.clone())),
            )
            .with_validity(CALLER_NUMBER_AVAILABLE, available.clone())
            .with_validity(PHONE_NUMBER_AVAILABLE, available)
            .with_recognizer(
                CONTACT_RECOGNIZER,
                Arc::new(ContactRecognizer::new(EntityResolver::new(directory))),
            )
    }

    pub fn with_action(mut self, name: &str, handler: Arc<dyn ActionHandler>) -> Self {
        self.actions.register(name, handler);
        self
    }

    pub fn with_query(mut self, name: &str, handler: Arc<dyn QueryHandler>) -> Self {
        self.queries.register(name, handler);
        self
    }

    pub fn with_validity(mut self, name: &str, handler: Arc<dyn ValidityHandler>) -> Self {
        self.validities.register(name, handler);
        self
    }

    pub fn with_recognizer(mut self, name: &str, handler: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizers.register(name, handler);
        self
    }

    pub fn on_action(&self, domain_id: &str, name: &str, args: &Args) -> bool {
        self.summarize(CallbackKind::Action, domain_id, name, args);
        let call = Invocation { domain_id, name, args };
        let (handler, _) = self.actions.resolve(name);
        handler.perform(&call)
    }

    pub fn on_wh_query(&self, domain_id: &str, name: &str, args: &Args) -> Vec<Entity> {
        self.summarize(CallbackKind::WhQuery, domain_id, name, args);
        let call = Invocation { domain_id, name, args };
        let (handler, _) = self.queries.resolve(name);
        handler.answer(&call)
    }

    pub fn on_validity(&self, domain_id: &str, name: &str, args: &Args) -> bool {
        self.summarize(CallbackKind::Validity, domain_id, name, args);
        let call = Invocation { domain_id, name, args };
        let (handler, _) = self.validities.resolve(name);
        handler.is_valid(&call)
    }

    pub fn on_entity_recognizer(&self, domain_id: &str, name: &str, args: &Args) -> Vec<Entity> {
        self.summarize(CallbackKind::EntityRecognition, domain_id, name, args);
        let call = Invocation { domain_id, name, args };
        let (handler, _) = self.recognizers.resolve(name);
        handler.recognize(&call)
    }

    /// Routes `request` to its entry point and wraps the answer in the reply
    /// of the same kind.
    pub fn dispatch(&self, request: &CallbackRequest) -> CallbackReply {
        let (domain_id, name, args) = (request.domain_id(), request.name(), request.args());
        let reply = match request.kind() {
            CallbackKind::Action => CallbackReply::Action {
                succeeded: self.on_action(domain_id, name, args),
            },
            CallbackKind::WhQuery => CallbackReply::WhQuery {
                entities: self.on_wh_query(domain_id, name, args),
            },
            CallbackKind::Validity => CallbackReply::Validity {
                is_valid: self.on_validity(domain_id, name, args),
            },
            CallbackKind::EntityRecognition => CallbackReply::EntityRecognition {
                entities: self.on_entity_recognizer(domain_id, name, args),
            },
        };
        tracing::debug!(kind = %request.kind(), domain = domain_id, name, ?reply, "callback answered");
        reply
    }

    fn summarize(&self, kind: CallbackKind, domain_id: &str, name: &str, args: &Args) {
        tracing::info!(%kind, domain = domain_id, name, %args, "callback");
        self.projector
            .project(UiUpdate::CallbackSummary(summary_line(kind, domain_id, name, args)));
    }
}

fn summary_line(kind: CallbackKind, domain_id: &str, name: &str, args: &Args) -> String {
    format!("{kind} {domain_id}/{name}: {args}")
}

/// Human-readable one-line summary of `request`.
pub fn summary(request: &CallbackRequest) -> String {
    summary_line(request.kind(), request.domain_id(), request.name(), request.args())
}

impl std::fmt::Debug for CallbackRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRouter")
            .field("actions", &self.actions)
            .field("queries", &self.queries)
            .field("validities", &self.validities)
            .field("recognizers", &self.recognizers)
            .finish()
    }
}
