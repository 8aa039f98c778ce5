//! URN/LID handling.
//!
//! PDS identifiers are colon-delimited logical identifiers (LIDs), optionally
//! suffixed with a version: `urn:nasa:pds:context:target:planet.mars::1.1`.
//! The registry's single-product endpoints resolve the latest version when
//! given the bare LID, so callers strip the version suffix before building
//! request paths.

/// Strip the `::<version>` suffix from a PDS identifier.
///
/// Returns the prefix up to (not including) the first `::`; identifiers
/// without a version pass through unchanged. Idempotent and total.
pub fn clean_urn(urn: &str) -> &str {
    match urn.split_once("::") {
        Some((lid, _version)) => lid,
        None => urn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_version_suffix() {
        assert_eq!(
            clean_urn("urn:nasa:pds:context:instrument:pse.a12a::1.1"),
            "urn:nasa:pds:context:instrument:pse.a12a"
        );
    }

    #[test]
    fn unversioned_urn_unchanged() {
        assert_eq!(
            clean_urn("urn:nasa:pds:context:target:planet.mars"),
            "urn:nasa:pds:context:target:planet.mars"
        );
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "urn:nasa:pds:cassini_iss_saturn:data_raw::1.0",
            "urn:nasa:pds:cassini_iss_saturn:data_raw",
            "",
            "::",
            "a::b::c",
        ];
        for input in inputs {
            assert_eq!(clean_urn(clean_urn(input)), clean_urn(input));
        }
    }

    #[test]
    fn empty_string_passes_through() {
        assert_eq!(clean_urn(""), "");
    }

    #[test]
    fn takes_prefix_before_first_separator() {
        assert_eq!(clean_urn("a::b::c"), "a");
    }
}
