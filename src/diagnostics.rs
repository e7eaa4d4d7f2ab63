//! Diagnostic catalog and collection for the compliance pass.
//!
//! This module provides the stable rule catalog ([`ClsRule`]), individual
//! findings ([`ClsDiagnostic`]) and the thread-safe container the pass
//! appends into ([`DiagnosticSink`]).
//!
//! # Architecture
//!
//! Every finding the pass can produce is a warning: the pass never rejects a
//! program and never mutates the symbol graph. The sink uses `boxcar::Vec`
//! for lock-free concurrent append, allowing the parallel type fan-out to
//! report findings without synchronization overhead. Because append order
//! then depends on thread scheduling, consumers read results through
//! [`DiagnosticSink::into_sorted`], which orders findings by source position
//! (no-location assembly findings first), declaration order and rule code -
//! deterministic for a given graph regardless of scheduling.
//!
//! # Key Components
//!
//! - [`ClsRule`] - Stable rule catalog; part of the external contract
//! - [`ClsDiagnostic`] - One finding with its formatted message
//! - [`DiagnosticSink`] - Thread-safe, append-only container
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use clscope::diagnostics::{ClsRule, DiagnosticSink};
//!
//! let sink = DiagnosticSink::new();
//! // ... the checker appends findings ...
//! for finding in sink.into_sorted() {
//!     println!("CS{:04}: {}", finding.rule.code(), finding.message);
//! }
//! ```
//!
//! # Thread Safety
//!
//! [`DiagnosticSink`] is [`Send`] and [`Sync`]; multiple worker threads append
//! findings simultaneously without coordination.

use std::fmt;

use strum::{AsRefStr, EnumIter};

use crate::symbols::{SourceSpan, SymbolId};

/// The stable catalog of compliance rules.
///
/// Rule identities and their numeric codes are part of the external contract:
/// build systems key suppressions on them. Every rule carries warning
/// severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, AsRefStr)]
pub enum ClsRule {
    /// A symbol declares `CLSCompliant(true)` while the assembly carries no
    /// compliance declaration at all.
    AssemblyNotCls,
    /// A symbol declares `CLSCompliant(false)` while the assembly carries no
    /// compliance declaration at all; the declaration is meaningless.
    AssemblyNotCls2,
    /// A symbol not visible outside the assembly declares the attribute.
    MeaninglessOnPrivateType,
    /// A symbol declares `true` inside a container explicitly declared
    /// `false`.
    IllegalTrueInFalse,
    /// The attribute was applied to a parameter.
    MeaninglessOnParam,
    /// The attribute was applied to a return value.
    MeaninglessOnReturn,
    /// A compliant type derives from a non-compliant base type.
    BadBase,
    /// A compliant interface inherits a non-compliant interface.
    BadInterface,
    /// A compliant interface declares an explicitly non-compliant member.
    BadInterfaceMember,
    /// An explicitly non-compliant member is abstract.
    NoAbstractMembers,
    /// A compliant field is volatile.
    VolatileField,
    /// A generic constraint names a non-compliant type.
    BadTypeVar,
    /// A method takes a variable argument list.
    NoVarArgs,
    /// A field, property or event has a non-compliant type.
    BadFieldPropType,
    /// A method or delegate returns a non-compliant type.
    BadReturnType,
    /// A parameter has a non-compliant type.
    BadArgType,
    /// An identifier begins with an underscore.
    BadIdentifier,
    /// Two sibling identifiers differ only by case.
    BadIdentifierCase,
    /// A module-level compliance declaration is present.
    NotOnModules,
    /// A module-level compliance declaration differs from the assembly's.
    NotOnModules2,
    /// The assembly declares `true` but an added module is unmarked.
    ModuleMissingCls,
    /// Overloads differ only by ref/out or by array rank.
    OverloadRefOut,
    /// Overloads differ only by unnamed array types.
    OverloadUnnamed,
    /// An attribute type has no accessible constructor restricted to
    /// compliant attribute-argument types.
    BadAttributeType,
    /// An attribute application passes an array value.
    ArrayArgumentToAttribute,
}

impl ClsRule {
    /// The stable numeric code of the rule.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            ClsRule::NoVarArgs => 3000,
            ClsRule::BadArgType => 3001,
            ClsRule::BadReturnType => 3002,
            ClsRule::BadFieldPropType => 3003,
            ClsRule::BadIdentifierCase => 3005,
            ClsRule::OverloadRefOut => 3006,
            ClsRule::OverloadUnnamed => 3007,
            ClsRule::BadIdentifier => 3008,
            ClsRule::BadBase => 3009,
            ClsRule::BadInterfaceMember => 3010,
            ClsRule::NoAbstractMembers => 3011,
            ClsRule::NotOnModules => 3012,
            ClsRule::ModuleMissingCls => 3013,
            ClsRule::AssemblyNotCls => 3014,
            ClsRule::BadAttributeType => 3015,
            ClsRule::ArrayArgumentToAttribute => 3016,
            ClsRule::NotOnModules2 => 3017,
            ClsRule::IllegalTrueInFalse => 3018,
            ClsRule::MeaninglessOnPrivateType => 3019,
            ClsRule::AssemblyNotCls2 => 3021,
            ClsRule::MeaninglessOnParam => 3022,
            ClsRule::MeaninglessOnReturn => 3023,
            ClsRule::BadTypeVar => 3024,
            ClsRule::VolatileField => 3026,
            ClsRule::BadInterface => 3027,
        }
    }

    /// Formats the user-facing message for this rule.
    ///
    /// `args` carry the fully-qualified source-level display names of the
    /// offending symbols, in catalog order.
    #[must_use]
    pub fn message(self, args: &[&str]) -> String {
        let arg = |index: usize| args.get(index).copied().unwrap_or("?");
        match self {
            ClsRule::AssemblyNotCls => format!(
                "'{}' cannot be marked as CLS-compliant because the assembly does not have a CLSCompliant attribute",
                arg(0)
            ),
            ClsRule::AssemblyNotCls2 => format!(
                "'{}' does not need a CLSCompliant attribute because the assembly does not have a CLSCompliant attribute",
                arg(0)
            ),
            ClsRule::MeaninglessOnPrivateType => format!(
                "CLS compliance checking will not be performed on '{}' because it is not visible from outside this assembly",
                arg(0)
            ),
            ClsRule::IllegalTrueInFalse => format!(
                "'{}' cannot be marked as CLS-compliant because it is a member of non-CLS-compliant type '{}'",
                arg(0),
                arg(1)
            ),
            ClsRule::MeaninglessOnParam => {
                "CLSCompliant attribute has no meaning when applied to parameters. Try putting it on the method instead".to_string()
            }
            ClsRule::MeaninglessOnReturn => {
                "CLSCompliant attribute has no meaning when applied to return types".to_string()
            }
            ClsRule::BadBase => format!(
                "'{}': base type '{}' is not CLS-compliant",
                arg(0),
                arg(1)
            ),
            ClsRule::BadInterface => format!(
                "'{}' is not CLS-compliant because base interface '{}' is not CLS-compliant",
                arg(0),
                arg(1)
            ),
            ClsRule::BadInterfaceMember => format!(
                "'{}': CLS-compliant interfaces must have only CLS-compliant members",
                arg(0)
            ),
            ClsRule::NoAbstractMembers => format!(
                "'{}': only CLS-compliant members can be abstract",
                arg(0)
            ),
            ClsRule::VolatileField => {
                format!("CLS-compliant field '{}' cannot be volatile", arg(0))
            }
            ClsRule::BadTypeVar => {
                format!("Constraint type '{}' is not CLS-compliant", arg(0))
            }
            ClsRule::NoVarArgs => {
                "Methods with variable arguments are not CLS-compliant".to_string()
            }
            ClsRule::BadFieldPropType => {
                format!("Type of '{}' is not CLS-compliant", arg(0))
            }
            ClsRule::BadReturnType => {
                format!("Return type of '{}' is not CLS-compliant", arg(0))
            }
            ClsRule::BadArgType => {
                format!("Argument type '{}' is not CLS-compliant", arg(0))
            }
            ClsRule::BadIdentifier => {
                format!("Identifier '{}' is not CLS-compliant", arg(0))
            }
            ClsRule::BadIdentifierCase => format!(
                "Identifier '{}' differing only in case is not CLS-compliant",
                arg(0)
            ),
            ClsRule::NotOnModules => {
                "You must specify the CLSCompliant attribute on the assembly, not the module, to enable CLS compliance checking".to_string()
            }
            ClsRule::NotOnModules2 => {
                "You cannot specify the CLSCompliant attribute on a module that differs from the CLSCompliant attribute on the assembly".to_string()
            }
            ClsRule::ModuleMissingCls => {
                "Added modules must be marked with the CLSCompliant attribute to match the assembly".to_string()
            }
            ClsRule::OverloadRefOut => format!(
                "Overloaded method '{}' differing only in ref or out, or in array rank, is not CLS-compliant",
                arg(0)
            ),
            ClsRule::OverloadUnnamed => format!(
                "Overloaded method '{}' differing only by unnamed array types is not CLS-compliant",
                arg(0)
            ),
            ClsRule::BadAttributeType => format!(
                "'{}' has no accessible constructors which use only CLS-compliant types",
                arg(0)
            ),
            ClsRule::ArrayArgumentToAttribute => {
                "Arrays as attribute arguments is not CLS-compliant".to_string()
            }
        }
    }
}

impl fmt::Display for ClsRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// One compliance finding.
///
/// Produced during traversal, never mutated. Findings sort by source
/// position first (no-location assembly findings ahead of everything), then
/// by the reported symbol's declaration order, then by rule code.
#[derive(Debug, Clone)]
pub struct ClsDiagnostic {
    /// The violated rule.
    pub rule: ClsRule,
    /// The primary offending symbol.
    pub symbol: SymbolId,
    /// The formatted, user-facing message.
    pub message: String,
    /// Source range of the finding; `None` for assembly-level findings.
    pub span: Option<SourceSpan>,
    /// Declaration index of the reported symbol, the deterministic tie-break
    /// when several symbols share a source position.
    pub decl_index: u32,
}

impl ClsDiagnostic {
    fn sort_key(&self) -> (Option<SourceSpan>, u32, u16) {
        (self.span, self.decl_index, self.rule.code())
    }
}

impl fmt::Display for ClsDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning CS{:04}: {}", self.rule.code(), self.message)
    }
}

/// Thread-safe, append-only container for compliance findings.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append; multiple
/// worker threads report findings simultaneously. The sink is externally
/// owned: the checker borrows it for the duration of a pass and the caller
/// keeps the accumulated findings afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use clscope::diagnostics::DiagnosticSink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(DiagnosticSink::new());
/// let clone = Arc::clone(&sink);
/// std::thread::spawn(move || {
///     // worker threads append through a shared reference
///     let _ = clone.len();
/// });
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: boxcar::Vec<ClsDiagnostic>,
}

impl DiagnosticSink {
    /// Creates a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Appends a finding.
    pub fn push(&self, diagnostic: ClsDiagnostic) {
        self.entries.push(diagnostic);
    }

    /// Number of findings collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.count()
    }

    /// True when no findings have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.count() == 0
    }

    /// Iterates over findings in append order.
    ///
    /// Append order depends on thread scheduling in parallel runs; use
    /// [`DiagnosticSink::into_sorted`] for deterministic output.
    pub fn iter(&self) -> impl Iterator<Item = &ClsDiagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Consumes the sink and returns findings in deterministic order:
    /// no-location findings first, then by source position, declaration
    /// order and rule code.
    #[must_use]
    pub fn into_sorted(self) -> Vec<ClsDiagnostic> {
        let mut entries: Vec<ClsDiagnostic> = self.entries.into_iter().collect();
        entries.sort_by_key(ClsDiagnostic::sort_key);
        entries
    }

    /// Clones the current findings into a deterministic ordering without
    /// consuming the sink.
    #[must_use]
    pub fn sorted(&self) -> Vec<ClsDiagnostic> {
        let mut entries: Vec<ClsDiagnostic> = self.iter().cloned().collect();
        entries.sort_by_key(ClsDiagnostic::sort_key);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rule_codes_unique_and_stable() {
        let codes: Vec<u16> = ClsRule::iter().map(ClsRule::code).collect();
        let mut deduped = codes.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(codes.len(), deduped.len());
        assert_eq!(ClsRule::BadIdentifier.code(), 3008);
        assert_eq!(ClsRule::BadInterface.code(), 3027);
    }

    #[test]
    fn test_message_formatting() {
        let message = ClsRule::BadBase.message(&["A", "Bad"]);
        assert_eq!(message, "'A': base type 'Bad' is not CLS-compliant");

        let message = ClsRule::NoVarArgs.message(&[]);
        assert!(message.contains("variable arguments"));
    }

    #[test]
    fn test_sink_concurrent_append() {
        let sink = Arc::new(DiagnosticSink::new());
        let mut handles = vec![];

        for i in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                sink.push(ClsDiagnostic {
                    rule: ClsRule::BadIdentifier,
                    symbol: crate::symbols::SymbolGraph::ASSEMBLY,
                    message: format!("thread {i}"),
                    span: None,
                    decl_index: i,
                });
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(sink.len(), 8);
    }

    #[test]
    fn test_sorted_order() {
        let sink = DiagnosticSink::new();
        let at = |unit, start, decl| ClsDiagnostic {
            rule: ClsRule::BadIdentifier,
            symbol: crate::symbols::SymbolGraph::ASSEMBLY,
            message: String::new(),
            span: Some(SourceSpan::new(unit, start, start + 1)),
            decl_index: decl,
        };

        sink.push(at(1, 5, 9));
        sink.push(at(0, 50, 3));
        sink.push(ClsDiagnostic {
            rule: ClsRule::ModuleMissingCls,
            symbol: crate::symbols::SymbolGraph::ASSEMBLY,
            message: String::new(),
            span: None,
            decl_index: 100,
        });
        sink.push(at(0, 10, 1));

        let sorted = sink.into_sorted();
        assert!(sorted[0].span.is_none());
        assert_eq!(sorted[1].span.unwrap().start, 10);
        assert_eq!(sorted[2].span.unwrap().start, 50);
        assert_eq!(sorted[3].span.unwrap().unit, 1);
    }
}
