use crate::error::AssignError;
use std::net::IpAddr;

/// Checks that `address` is an IPv4 or IPv6 literal. The string itself is what gets published, so
/// it is returned untouched rather than re-rendered from the parsed value.
pub fn validate(address: &str) -> Result<&str, AssignError> {
    match address.parse::<IpAddr>() {
        Ok(_) => Ok(address),
        Err(_) => Err(AssignError::InvalidAddress(address.to_string())),
    }
}

/// Validates every entry in order, failing on the first malformed one.
pub fn validate_all<S: AsRef<str>>(addresses: &[S]) -> Result<(), AssignError> {
    for address in addresses {
        validate(address.as_ref())?;
    }
    Ok(())
}

/// Splits a comma-joined address list such as `spec.loadBalancerIP` or the `--ip` flag.
///
/// An empty input means "no addresses". Pieces are neither trimmed nor deduplicated, so
/// `"10.0.0.1, 10.0.0.2"` is rejected because of the space.
pub fn split_list(list: &str) -> Result<Vec<String>, AssignError> {
    if list.is_empty() {
        return Ok(Vec::new());
    }

    list.split(',')
        .map(|piece| validate(piece).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_v4_and_v6_literals() {
        for address in ["10.0.0.1", "192.168.122.250", "::1", "fd00::10", "::ffff:10.0.0.1"] {
            assert_eq!(validate(address).unwrap(), address);
        }
    }

    #[test]
    fn rejects_malformed_literals() {
        for address in ["", "10.0.0", "10.0.0.256", "example.com", " 10.0.0.1", "10.0.0.1/24", "fd00::g"] {
            match validate(address) {
                Err(AssignError::InvalidAddress(bad)) => assert_eq!(bad, address),
                other => panic!("expected {address:?} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_all_reports_first_offender() {
        let err = validate_all(&["10.0.0.1", "nope", "also-bad"]).unwrap_err();
        assert!(matches!(err, AssignError::InvalidAddress(bad) if bad == "nope"));
    }

    #[test]
    fn split_keeps_order_and_duplicates() {
        assert_eq!(
            split_list("10.0.0.2,fd00::1,10.0.0.2").unwrap(),
            vec!["10.0.0.2", "fd00::1", "10.0.0.2"]
        );
    }

    #[test]
    fn split_of_empty_list_is_empty() {
        assert!(split_list("").unwrap().is_empty());
    }

    #[test]
    fn split_rejects_empty_pieces_and_padding() {
        assert!(matches!(split_list("10.0.0.1,"), Err(AssignError::InvalidAddress(bad)) if bad.is_empty()));
        assert!(matches!(split_list("10.0.0.1, 10.0.0.2"), Err(AssignError::InvalidAddress(bad)) if bad == " 10.0.0.2"));
    }
}
