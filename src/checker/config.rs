//! Checker configuration.
//!
//! This module provides configuration options for the compliance pass,
//! selecting which rule families run and whether top-level types fan out
//! across worker threads.

/// Configuration for a compliance pass
///
/// Compliance resolution and the attribute-placement diagnostics always run;
/// they are what the other components gate on. The switches below control the
/// substantive rule families, which are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckerConfig {
    /// Enable identifier checks (underscore spelling, case-insensitive
    /// collision detection across containers and inherited members)
    pub check_identifiers: bool,

    /// Enable signature checks (return, parameter, field/property/event
    /// types, vararg methods, volatile fields, generic constraints,
    /// explicitly non-compliant interface/abstract members)
    pub check_signatures: bool,

    /// Enable overload-shape collision checks (ref/out-only, rank-only and
    /// unnamed-array-only differences across the container hierarchy)
    pub check_overloads: bool,

    /// Enable base type and inherited interface compliance checks
    pub check_hierarchy: bool,

    /// Enable attribute checks (attribute constructor shapes, array-valued
    /// attribute arguments)
    pub check_attribute_usage: bool,

    /// Enable the assembly/module declaration consistency checks that run
    /// once at the end of a full pass
    pub check_consistency: bool,

    /// Fan top-level types out across worker threads. Output order is
    /// deterministic either way once the sink is sorted.
    pub parallel: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            check_identifiers: true,
            check_signatures: true,
            check_overloads: true,
            check_hierarchy: true,
            check_attribute_usage: true,
            check_consistency: true,
            parallel: true,
        }
    }
}

impl CheckerConfig {
    /// All rule families enabled, single-threaded traversal.
    ///
    /// Useful when the caller already runs passes on its own worker pool and
    /// wants to avoid nested parallelism.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Everything off. The pass still resolves compliance state and reports
    /// attribute-placement diagnostics, which have no switch.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            check_identifiers: false,
            check_signatures: false,
            check_overloads: false,
            check_hierarchy: false,
            check_attribute_usage: false,
            check_consistency: false,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = CheckerConfig::default();
        assert!(config.check_identifiers);
        assert!(config.check_signatures);
        assert!(config.check_overloads);
        assert!(config.check_hierarchy);
        assert!(config.check_attribute_usage);
        assert!(config.check_consistency);
        assert!(config.parallel);
    }

    #[test]
    fn test_sequential_only_disables_fanout() {
        let config = CheckerConfig::sequential();
        assert!(!config.parallel);
        assert!(config.check_overloads);
    }
}
