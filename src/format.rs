use std::sync::Arc;

use regex::Regex;
use uuid::Uuid;

use crate::api::{IdentityService, Registration, ResourceIdentity};
use crate::config::ConfigError;
use crate::encoder::TokenEncoder;
use crate::error::Error;

/// Marker prefix of V2 tokens. IDs starting with it are decoded by the
/// configured V2 encoder.
pub const V2_PREFIX: &str = "I2-";

/// Marker prefix of V3 tokens.
pub const V3_PREFIX: &str = "I3-";

/// The default patient ICN shape: ten digits, a literal `V`, six digits.
pub const DEFAULT_ICN_PATTERN: &str = "[0-9]{10}V[0-9]{6}";

const PATIENT_SYSTEM: &str = "MVI";
const PATIENT_RESOURCE: &str = "PATIENT";

/// One codec in the dispatch chain: a predicate deciding whether an ID or an
/// identity belongs to it, plus the matching lookup/registration behavior.
/// The set of formats is closed, so dispatch is an exhaustive match.
pub enum Format {
    /// Patient ICNs pass through untouched in both directions; patient
    /// identifiers must remain stable across every consuming system.
    PatientIcn { pattern: Regex },
    /// Prefix-tagged encrypted tokens (the `I2-`/`I3-` generations).
    EncodedToken {
        prefix: String,
        encoder: TokenEncoder,
    },
    /// Legacy UUIDs, resolved by an external registry. Lookup only; nothing
    /// new is ever registered through this path.
    UuidDelegate { delegate: Arc<dyn IdentityService> },
}

impl Format {
    /// A pass-through format for IDs matching the given pattern. The pattern
    /// must match the entire ID, so it is anchored here.
    pub fn patient_icn(pattern: &str) -> Result<Format, ConfigError> {
        let pattern = Regex::new(&format!("\\A(?:{pattern})\\z"))?;
        Ok(Format::PatientIcn { pattern })
    }

    /// A two-way format for prefix-tagged tokens produced by the given
    /// encoder.
    pub fn encoded_token(prefix: impl Into<String>, encoder: TokenEncoder) -> Format {
        Format::EncodedToken {
            prefix: prefix.into(),
            encoder,
        }
    }

    /// A lookup-only format that forwards UUID-shaped IDs to an external
    /// registry.
    pub fn uuid_delegate(delegate: Arc<dyn IdentityService>) -> Format {
        Format::UuidDelegate { delegate }
    }

    pub(crate) fn name(&self) -> String {
        match self {
            Format::PatientIcn { .. } => "patient-icn".to_string(),
            Format::EncodedToken { prefix, .. } => format!("encoded-token {prefix}"),
            Format::UuidDelegate { .. } => "uuid-delegate".to_string(),
        }
    }

    pub(crate) fn accepts_lookup(&self, id: &str) -> bool {
        match self {
            Format::PatientIcn { pattern } => pattern.is_match(id),
            Format::EncodedToken { prefix, .. } => id.starts_with(prefix.as_str()),
            Format::UuidDelegate { .. } => is_canonical_uuid(id),
        }
    }

    pub(crate) fn lookup(&self, id: &str) -> Result<Vec<ResourceIdentity>, Error> {
        match self {
            Format::PatientIcn { .. } => Ok(vec![patient_identity(id)]),
            Format::EncodedToken { prefix, encoder } => {
                Ok(vec![encoder.decode(&id[prefix.len()..])?])
            }
            Format::UuidDelegate { delegate } => delegate.lookup(id),
        }
    }

    pub(crate) fn accepts_registration(&self, identity: &ResourceIdentity) -> bool {
        match self {
            Format::PatientIcn { .. } => identity.resource.eq_ignore_ascii_case(PATIENT_RESOURCE),
            Format::EncodedToken { .. } => true,
            Format::UuidDelegate { .. } => false,
        }
    }

    pub(crate) fn register(&self, identity: &ResourceIdentity) -> Result<Registration, Error> {
        match self {
            // the public ID *is* the ICN; the registered identity is
            // normalized to the patient system and resource
            Format::PatientIcn { .. } => Ok(Registration {
                public_id: identity.identifier.clone(),
                identities: vec![patient_identity(&identity.identifier)],
            }),
            Format::EncodedToken { prefix, encoder } => Ok(Registration {
                public_id: format!("{prefix}{}", encoder.encode(identity)?),
                identities: vec![identity.clone()],
            }),
            Format::UuidDelegate { .. } => {
                Err(Error::RegistrationFailed(format!("{identity:?}")))
            }
        }
    }
}

/// Canonical hyphenated form only; the 32-character compact form is not a
/// legacy registry ID.
fn is_canonical_uuid(id: &str) -> bool {
    id.len() == 36 && Uuid::try_parse(id).is_ok()
}

fn patient_identity(icn: &str) -> ResourceIdentity {
    ResourceIdentity::new(PATIENT_SYSTEM, PATIENT_RESOURCE, icn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::Codebook;

    fn encoded(prefix: &str) -> Format {
        Format::encoded_token(
            prefix,
            TokenEncoder::v2("magic-ids", Codebook::empty()).unwrap(),
        )
    }

    struct NeverCalled;

    impl IdentityService for NeverCalled {
        fn lookup(&self, _id: &str) -> Result<Vec<ResourceIdentity>, Error> {
            panic!("delegate must not be called");
        }

        fn register(&self, _: &[ResourceIdentity]) -> Result<Vec<Registration>, Error> {
            panic!("delegate must not be called");
        }
    }

    #[test]
    fn icn_lookup_matches_the_whole_id_only() {
        let format = Format::patient_icn(DEFAULT_ICN_PATTERN).unwrap();
        assert!(format.accepts_lookup("1011537977V693883"));
        assert!(!format.accepts_lookup("1011537977V69388"));
        assert!(!format.accepts_lookup("1011537977V6938831"));
        assert!(!format.accepts_lookup("x1011537977V693883"));
        assert!(!format.accepts_lookup("123"));
    }

    #[test]
    fn icn_lookup_returns_the_id_untouched() {
        let format = Format::patient_icn(DEFAULT_ICN_PATTERN).unwrap();
        assert_eq!(
            format.lookup("1011537977V693883").unwrap(),
            vec![ResourceIdentity::new(
                "MVI",
                "PATIENT",
                "1011537977V693883"
            )]
        );
    }

    #[test]
    fn icn_registration_accepts_patients_case_insensitively() {
        let format = Format::patient_icn(DEFAULT_ICN_PATTERN).unwrap();
        for resource in ["patient", "PATIENT", "Patient"] {
            assert!(format.accepts_registration(&ResourceIdentity::new("MVI", resource, "123")));
        }
        assert!(!format.accepts_registration(&ResourceIdentity::new("MVI", "OBSERVATION", "123")));
    }

    #[test]
    fn icn_registration_normalizes_the_identity() {
        let format = Format::patient_icn(DEFAULT_ICN_PATTERN).unwrap();
        let registration = format
            .register(&ResourceIdentity::new("ELSEWHERE", "Patient", "123"))
            .unwrap();
        assert_eq!(registration.public_id, "123");
        assert_eq!(
            registration.identities,
            vec![ResourceIdentity::new("MVI", "PATIENT", "123")]
        );
    }

    #[test]
    fn token_lookup_requires_the_exact_prefix() {
        let format = encoded(V2_PREFIX);
        assert!(format.accepts_lookup("I2-ANYTHING"));
        assert!(!format.accepts_lookup("i2-ANYTHING"));
        assert!(!format.accepts_lookup("I2ANYTHING"));
        assert!(!format.accepts_lookup("I3-ANYTHING"));
        assert!(!format.accepts_lookup("ANYTHING"));
    }

    #[test]
    fn token_format_round_trips_through_the_prefix() {
        let format = encoded(V2_PREFIX);
        let identity = ResourceIdentity::new("WHATEVER", "ANYTHING", "123");
        assert!(format.accepts_registration(&identity));
        let registration = format.register(&identity).unwrap();
        assert!(registration.public_id.starts_with(V2_PREFIX));
        assert_eq!(registration.identities, vec![identity.clone()]);
        assert!(format.accepts_lookup(&registration.public_id));
        assert_eq!(
            format.lookup(&registration.public_id).unwrap(),
            vec![identity]
        );
    }

    #[test]
    fn uuid_lookup_accepts_canonical_uuids_only() {
        let format = Format::uuid_delegate(Arc::new(NeverCalled));
        assert!(format.accepts_lookup("b5f5682c-df90-11e9-8a34-2a2ae2dbcce4"));
        assert!(format.accepts_lookup("B5F5682C-DF90-11E9-8A34-2A2AE2DBCCE4"));
        assert!(!format.accepts_lookup("b5f5682cdf9011e98a342a2ae2dbcce4"));
        assert!(!format.accepts_lookup("urn:uuid:b5f5682c-df90-11e9-8a34-2a2ae2dbcce4"));
        assert!(!format.accepts_lookup("b5f5682c-df90-11e9-8a34-2a2ae2dbcce"));
        assert!(!format.accepts_lookup("12345"));
    }

    #[test]
    fn uuid_format_never_registers() {
        let format = Format::uuid_delegate(Arc::new(NeverCalled));
        let identity = ResourceIdentity::new("CDW", "ANYTHING", "1");
        assert!(!format.accepts_registration(&identity));
        assert!(matches!(
            format.register(&identity),
            Err(Error::RegistrationFailed(_))
        ));
    }
}
