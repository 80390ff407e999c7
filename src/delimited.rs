//! The unencrypted string form of a resource identity:
//! `<system>:<resource>:<identifier>`, with system and resource run through
//! the codebook. The identifier is never shortened and may itself contain the
//! delimiter; it is everything after the second one.

use crate::api::ResourceIdentity;
use crate::codebook::Codebook;
use crate::error::Error;

const DELIMITER: char = ':';

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Render the identity as a delimited string, shortening system and resource
/// through the codebook. All three fields must be non-blank.
pub(crate) fn join(codebook: &Codebook, identity: &ResourceIdentity) -> Result<String, Error> {
    if is_blank(&identity.system) || is_blank(&identity.resource) || is_blank(&identity.identifier)
    {
        return Err(Error::IncompleteResourceIdentity(format!("{identity:?}")));
    }
    Ok(format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        codebook.shorten(&identity.system),
        codebook.shorten(&identity.resource),
        identity.identifier
    ))
}

/// Parse a delimited string back into an identity, restoring system and
/// resource through the codebook.
///
/// This is the first check performed after decryption: ciphertext that was
/// tampered with but still decrypts without a cipher error fails here.
pub(crate) fn parse(codebook: &Codebook, delimited: &str) -> Result<ResourceIdentity, Error> {
    let unknown = || Error::UnknownRepresentation(delimited.to_string());
    let first = delimited.find(DELIMITER).ok_or_else(unknown)?;
    if first + 2 >= delimited.len() {
        return Err(unknown());
    }
    let second = delimited[first + 1..]
        .find(DELIMITER)
        .map(|offset| first + 1 + offset)
        .ok_or_else(unknown)?;
    if second + 1 >= delimited.len() {
        return Err(unknown());
    }
    let system = &delimited[..first];
    let resource = &delimited[first + 1..second];
    let identifier = &delimited[second + 1..];
    if is_blank(system) || is_blank(resource) || is_blank(identifier) {
        return Err(unknown());
    }
    Ok(ResourceIdentity::new(
        codebook.restore(system),
        codebook.restore(resource),
        identifier,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::Mapping;

    fn codebook() -> Codebook {
        Codebook::new([
            Mapping::new("WHATEVER", "W"),
            Mapping::new("ANYTHING", "A"),
        ])
        .unwrap()
    }

    #[test]
    fn join_shortens_mapped_values() {
        let delimited = join(
            &codebook(),
            &ResourceIdentity::new("WHATEVER", "ANYTHING", "ABC:123"),
        )
        .unwrap();
        assert_eq!(delimited, "W:A:ABC:123");
    }

    #[test]
    fn join_passes_unmapped_values_through() {
        let delimited = join(
            &codebook(),
            &ResourceIdentity::new("NOT_WHATEVER", "NOT_ANYTHING", "ABC:123"),
        )
        .unwrap();
        assert_eq!(delimited, "NOT_WHATEVER:NOT_ANYTHING:ABC:123");
    }

    #[test]
    fn join_rejects_blank_fields() {
        for identity in [
            ResourceIdentity::new("", "ANYTHING", "ABC:123"),
            ResourceIdentity::new("WHATEVER", "", "ABC:123"),
            ResourceIdentity::new("WHATEVER", "ANYTHING", ""),
            ResourceIdentity::new("WHATEVER", "ANYTHING", "  "),
        ] {
            let result = join(&codebook(), &identity);
            assert!(matches!(
                result,
                Err(Error::IncompleteResourceIdentity(_))
            ));
        }
    }

    #[test]
    fn parse_restores_mapped_values() {
        let identity = parse(&codebook(), "W:A:ABC:123").unwrap();
        assert_eq!(
            identity,
            ResourceIdentity::new("WHATEVER", "ANYTHING", "ABC:123")
        );
    }

    #[test]
    fn parse_keeps_delimiters_inside_the_identifier() {
        let identity = parse(&codebook(), "W:A:a:b:c").unwrap();
        assert_eq!(identity.identifier, "a:b:c");
    }

    #[test]
    fn parse_rejects_malformed_representations() {
        for bad in [
            "WHATEVER",
            "WHATEVER:",
            "WHATEVER:ANYTHING",
            "WHATEVER:ANYTHING:",
            "::",
            " : : ",
            "",
        ] {
            let result = parse(&codebook(), bad);
            assert!(
                matches!(result, Err(Error::UnknownRepresentation(_))),
                "expected UnknownRepresentation for {bad:?}"
            );
        }
    }
}
