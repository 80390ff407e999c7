use serde::{Deserialize, Serialize};

use crate::Error;

/// A private identity tuple: the system that owns the record, the resource
/// type within that system, and the system-local identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIdentity {
    pub system: String,
    pub resource: String,
    pub identifier: String,
}

impl ResourceIdentity {
    pub fn new(
        system: impl Into<String>,
        resource: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        ResourceIdentity {
            system: system.into(),
            resource: resource.into(),
            identifier: identifier.into(),
        }
    }
}

/// The result of registering an identity: the publishable public ID and the
/// private identities it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub public_id: String,
    pub identities: Vec<ResourceIdentity>,
}

/// Two-way translation between public identifiers and private identities.
///
/// Implemented by the [`Dispatcher`](crate::Dispatcher) and by external
/// registry delegates. `Send + Sync` so one instance can serve concurrent
/// workers.
pub trait IdentityService: Send + Sync {
    /// Resolve a public identifier to the private identities behind it.
    fn lookup(&self, id: &str) -> Result<Vec<ResourceIdentity>, Error>;

    /// Produce one registration per input identity, in input order.
    fn register(&self, identities: &[ResourceIdentity]) -> Result<Vec<Registration>, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ResourceIdentity {
        ResourceIdentity::new("s1", "r1", "i1")
    }

    #[test]
    fn resource_identity_round_trips_through_json() {
        let json = serde_json::to_string(&identity()).unwrap();
        assert_eq!(json, r#"{"system":"s1","resource":"r1","identifier":"i1"}"#);
        let twin: ResourceIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(twin, identity());
    }

    #[test]
    fn registration_round_trips_through_json() {
        let registration = Registration {
            public_id: "u1".to_string(),
            identities: vec![identity()],
        };
        let json = serde_json::to_string(&registration).unwrap();
        assert_eq!(
            json,
            r#"{"publicId":"u1","identities":[{"system":"s1","resource":"r1","identifier":"i1"}]}"#
        );
        let twin: Registration = serde_json::from_str(&json).unwrap();
        assert_eq!(twin, registration);
    }
}
