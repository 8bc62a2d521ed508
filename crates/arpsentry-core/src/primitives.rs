//! # Innate Primitives
//!
//! Hardcoded runtime constants for the arpsentry engine.
//!
//! The engine starts with zero facts but fixed limits. These are compiled
//! into the binary and immutable at runtime.

/// Hard cap on candidates enumerated by a single pattern query.
///
/// An open-ended fact base combined with unconstrained pattern search is a
/// resource-exhaustion risk on the lookup hot path, which is triggered by
/// untrusted network input. On reaching the cap, enumeration stops, a
/// warning is emitted, and the partial candidate set is used.
pub const MAX_SOLUTIONS: usize = 1000;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for a system identifier.
///
/// Statements with longer fields are rejected rather than truncated:
/// truncation could alias two distinct systems.
pub const MAX_SYSTEM_LENGTH: usize = 64;

/// Maximum length for a media (hardware) address string.
pub const MAX_MEDIA_ADDR_LENGTH: usize = 64;

/// Maximum length for a network address string.
pub const MAX_NETWORK_ADDR_LENGTH: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_cap_is_one_thousand() {
        // The enumeration cap carried over from the original engine
        assert_eq!(MAX_SOLUTIONS, 1000);
    }

    #[test]
    fn address_limits_are_nonzero() {
        assert!(MAX_SYSTEM_LENGTH > 0);
        assert!(MAX_MEDIA_ADDR_LENGTH > 0);
        assert!(MAX_NETWORK_ADDR_LENGTH > 0);
    }
}
