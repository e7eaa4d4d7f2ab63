//! Declared attributes with already-resolved constant arguments.
//!
//! The front end folds attribute arguments to constants before graph
//! construction; the checker never evaluates expressions. The only attribute
//! the pass understands semantically is `CLSCompliant`; every other
//! application matters solely for the array-argument rule and, for attribute
//! *types*, the constructor-shape rule.

use crate::symbols::{SourceSpan, SymbolId, TypeShape};

/// Where an attribute application was attached in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeTarget {
    /// The symbol the attribute is syntactically attached to.
    #[default]
    Default,
    /// An `assembly:`-targeted application.
    Assembly,
    /// A `module:`-targeted application.
    Module,
    /// A `param:`-targeted application.
    Parameter,
    /// A `return:`-targeted application.
    Return,
}

/// Identity of the applied attribute class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeClass {
    /// The interop opt-in marker attribute (`CLSCompliant`).
    ClsCompliant,
    /// An attribute type defined in the graph.
    Defined(SymbolId),
    /// An attribute whose class could not be resolved; already reported as a
    /// binding error by the front end.
    Unresolved,
}

/// A resolved constant attribute argument.
#[derive(Debug, Clone)]
pub enum AttributeValue {
    /// Boolean constant.
    Bool(bool),
    /// Character constant.
    Char(char),
    /// Integral constant (any width, sign-extended).
    Int(i64),
    /// Floating-point constant.
    Float(f64),
    /// String constant.
    Str(String),
    /// A `typeof`-style type handle.
    Type(TypeShape),
    /// Enum constant with its underlying integral value.
    Enum(i64),
    /// Null constant.
    Null,
    /// An array literal.
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Whether this value is or contains an array literal.
    #[must_use]
    pub fn contains_array(&self) -> bool {
        match self {
            AttributeValue::Array(_) => true,
            _ => false,
        }
    }
}

/// One attribute application with resolved constant arguments.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    /// The applied attribute class.
    pub class: AttributeClass,
    /// Source target of the application.
    pub target: AttributeTarget,
    /// Positional constructor arguments.
    pub positional: Vec<AttributeValue>,
    /// Named property/field arguments.
    pub named: Vec<(String, AttributeValue)>,
    /// Source range of the application site, if known.
    pub span: Option<SourceSpan>,
}

impl AttributeSpec {
    /// Creates an application of `class` with no arguments on the default
    /// target.
    #[must_use]
    pub fn new(class: AttributeClass) -> Self {
        Self {
            class,
            target: AttributeTarget::Default,
            positional: Vec::new(),
            named: Vec::new(),
            span: None,
        }
    }

    /// Creates a `CLSCompliant(value)` application on the default target.
    #[must_use]
    pub fn cls_compliant(value: bool) -> Self {
        Self {
            class: AttributeClass::ClsCompliant,
            target: AttributeTarget::Default,
            positional: vec![AttributeValue::Bool(value)],
            named: Vec::new(),
            span: None,
        }
    }

    /// Sets the application target.
    #[must_use]
    pub fn with_target(mut self, target: AttributeTarget) -> Self {
        self.target = target;
        self
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn with_arg(mut self, value: AttributeValue) -> Self {
        self.positional.push(value);
        self
    }

    /// Appends a named argument.
    #[must_use]
    pub fn with_named_arg(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.named.push((name.into(), value));
        self
    }

    /// Attaches a source range to the application site.
    #[must_use]
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// The declared compliance value when this is a `CLSCompliant`
    /// application with a boolean argument.
    #[must_use]
    pub fn cls_compliance(&self) -> Option<bool> {
        if self.class != AttributeClass::ClsCompliant {
            return None;
        }
        match self.positional.first() {
            Some(AttributeValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Whether any positional or named argument passes an array value.
    #[must_use]
    pub fn has_array_argument(&self) -> bool {
        self.positional.iter().any(AttributeValue::contains_array)
            || self.named.iter().any(|(_, v)| v.contains_array())
    }
}
