use crate::api::{IdentityService, Registration, ResourceIdentity};
use crate::error::Error;
use crate::format::Format;

/// Ordered, first-match-wins router over the configured formats.
///
/// The order is a priority list, fixed at construction: each lookup or
/// registration goes to the first format whose predicate accepts it. The
/// typical configuration puts the patient-ICN format first so ICN detection
/// always pre-empts token decoding, followed by the encoded-token
/// generations newest to oldest, with the UUID delegate as the final
/// fallback for legacy IDs.
pub struct Dispatcher {
    formats: Vec<Format>,
}

impl Dispatcher {
    pub fn new(formats: Vec<Format>) -> Dispatcher {
        tracing::info!(
            formats = %formats.iter().map(Format::name).collect::<Vec<_>>().join(", "),
            "configured identity formats"
        );
        Dispatcher { formats }
    }

    fn register_one(&self, identity: &ResourceIdentity) -> Result<Registration, Error> {
        self.formats
            .iter()
            .find(|format| format.accepts_registration(identity))
            .ok_or_else(|| Error::RegistrationFailed(format!("{identity:?}")))?
            .register(identity)
    }
}

impl IdentityService for Dispatcher {
    fn lookup(&self, id: &str) -> Result<Vec<ResourceIdentity>, Error> {
        self.formats
            .iter()
            .find(|format| format.accepts_lookup(id))
            .ok_or_else(|| Error::BadId(id.to_string()))?
            .lookup(id)
    }

    fn register(&self, identities: &[ResourceIdentity]) -> Result<Vec<Registration>, Error> {
        identities
            .iter()
            .map(|identity| self.register_one(identity))
            .collect()
    }
}
