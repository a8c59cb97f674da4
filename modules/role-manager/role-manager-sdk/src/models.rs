//! Domain qualifier handling.
//!
//! The enforcer may scope a role query to a domain (tenant). Backends that
//! are bound to a single tenant accept only the unscoped form, `None`.

use crate::error::RoleManagerError;

/// Reject any domain qualifier.
///
/// # Errors
///
/// `DomainNotSupported` if `domain` is `Some`, including `Some("")`.
pub fn ensure_no_domain(domain: Option<&str>) -> Result<(), RoleManagerError> {
    match domain {
        None => Ok(()),
        Some(_) => Err(RoleManagerError::DomainNotSupported),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn absent_domain_is_accepted() {
        assert!(ensure_no_domain(None).is_ok());
    }

    #[test]
    fn any_domain_is_rejected() {
        for domain in ["", "tenant-a", "*"] {
            assert!(matches!(
                ensure_no_domain(Some(domain)),
                Err(RoleManagerError::DomainNotSupported)
            ));
        }
    }
}
