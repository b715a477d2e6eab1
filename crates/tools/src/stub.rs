//! Shared helper for the deterministic advisory stubs.

/// Hash an input string into a small number for deterministic but varied
/// stub output. Same approach for every advisory tool so identical queries
/// always produce identical answers.
pub(crate) fn fingerprint(input: &str) -> u32 {
    input
        .trim()
        .to_lowercase()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint("data engineer"), fingerprint("data engineer"));
    }

    #[test]
    fn fingerprint_normalizes_case_and_whitespace() {
        assert_eq!(fingerprint("  Data Engineer "), fingerprint("data engineer"));
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(fingerprint("data engineer"), fingerprint("nurse"));
    }
}
