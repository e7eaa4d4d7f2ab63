//! Symbol nodes and their kind-specific payloads.

use bitflags::bitflags;

use crate::symbols::{Accessibility, AttributeSpec, AttributeTarget, SymbolId, TypeShape};

/// Discriminates the node kinds a symbol graph can contain.
///
/// The hierarchy is assembly → module → namespace → type → member →
/// parameter/type-parameter/accessor. Nested types hang off their enclosing
/// type like members do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// The single root of a graph.
    Assembly,
    /// A physical module of the assembly. The first module is the primary one.
    Module,
    /// A namespace; the global namespace has an empty name.
    Namespace,
    /// A reference type definition.
    Class,
    /// A value type definition.
    Struct,
    /// An interface definition.
    Interface,
    /// An enumeration definition.
    Enum,
    /// A delegate definition. Its invoke signature is a synthesized
    /// `Invoke` method child.
    Delegate,
    /// An ordinary method, operator or finalizer.
    Method,
    /// An instance or static constructor.
    Constructor,
    /// A property without parameters.
    Property,
    /// A parameterized property.
    Indexer,
    /// An event.
    Event,
    /// A field.
    Field,
    /// A parameter of a method, constructor, indexer or delegate signature.
    Parameter,
    /// A generic type parameter of a type or method.
    TypeParameter,
    /// A synthesized accessor of a property, indexer or event.
    Accessor,
}

impl SymbolKind {
    /// Returns true for type definitions (class, struct, interface, enum, delegate).
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Interface
                | SymbolKind::Enum
                | SymbolKind::Delegate
        )
    }

    /// Returns true for member definitions (method, constructor, property,
    /// indexer, event, field).
    #[must_use]
    pub fn is_member(self) -> bool {
        matches!(
            self,
            SymbolKind::Method
                | SymbolKind::Constructor
                | SymbolKind::Property
                | SymbolKind::Indexer
                | SymbolKind::Event
                | SymbolKind::Field
        )
    }

    /// Returns true for symbols that can contain further declarations.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(
            self,
            SymbolKind::Assembly | SymbolKind::Module | SymbolKind::Namespace
        ) || self.is_type()
    }
}

bitflags! {
    /// Modifier bits attached to member symbols.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u16 {
        /// The member is abstract.
        const ABSTRACT = 0x0001;
        /// The member is static.
        const STATIC = 0x0002;
        /// The member is virtual.
        const VIRTUAL = 0x0004;
        /// The member overrides a base member of the same name and signature.
        const OVERRIDE = 0x0008;
        /// The member is sealed.
        const SEALED = 0x0010;
        /// The field is volatile.
        const VOLATILE = 0x0020;
        /// The method takes a variable argument list.
        const VARARG = 0x0040;
        /// The member is an explicit interface implementation.
        const EXPLICIT_IMPL = 0x0080;
    }
}

/// By-reference passing mode of a parameter.
///
/// For overload-shape comparison all three by-reference modes collapse to a
/// single bit; the distinction only matters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    /// Pass by value.
    #[default]
    None,
    /// `ref` parameter.
    Ref,
    /// `out` parameter.
    Out,
    /// `in` (read-only reference) parameter.
    In,
}

impl RefKind {
    /// Collapses the passing mode to a single by-reference bit.
    #[must_use]
    pub fn is_by_ref(self) -> bool {
        !matches!(self, RefKind::None)
    }
}

/// The accessor roles a property, indexer or event can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// Property/indexer getter.
    Get,
    /// Property/indexer setter.
    Set,
    /// Event subscribe accessor.
    Add,
    /// Event unsubscribe accessor.
    Remove,
}

impl AccessorKind {
    /// Static lookup table from accessor role to its synthesized metadata
    /// name prefix. Keeping this in one place keeps the identifier
    /// validator's collision set exhaustive and testable in isolation.
    #[must_use]
    pub fn name_prefix(self) -> &'static str {
        match self {
            AccessorKind::Get => "get_",
            AccessorKind::Set => "set_",
            AccessorKind::Add => "add_",
            AccessorKind::Remove => "remove_",
        }
    }

    /// The synthesized metadata name for an accessor of `owner`.
    #[must_use]
    pub fn synthesized_name(self, owner: &str) -> String {
        format!("{}{}", self.name_prefix(), owner)
    }

    /// Short suffix used in display names (`C.P.get`).
    #[must_use]
    pub fn display_suffix(self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Add => "add",
            AccessorKind::Remove => "remove",
        }
    }
}

/// Half-open source range of a declaration.
///
/// `unit` identifies the source unit (file) the declaration came from; the
/// checker treats it as an opaque ordering key. Assembly-level findings carry
/// no span at all and sort ahead of every located finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceSpan {
    /// Source unit (file) index.
    pub unit: u32,
    /// Start offset within the unit.
    pub start: u32,
    /// End offset within the unit.
    pub end: u32,
}

impl SourceSpan {
    /// Creates a span within `unit` covering `start..end`.
    #[must_use]
    pub fn new(unit: u32, start: u32, end: u32) -> Self {
        Self { unit, start, end }
    }
}

/// Payload of a type definition symbol.
#[derive(Debug, Clone, Default)]
pub struct TypeData {
    /// Base type shape, if any. Interfaces and `System.Object`-rooted types
    /// built without an explicit base leave this empty.
    pub base: Option<TypeShape>,
    /// Declared interface list. For interface symbols these are the inherited
    /// interfaces; for classes and structs the implemented ones.
    pub interfaces: Vec<TypeShape>,
    /// True when the type derives from the runtime attribute root and can be
    /// applied as an attribute.
    pub is_attribute_type: bool,
}

/// Payload of a member symbol.
#[derive(Debug, Clone, Default)]
pub struct MemberData {
    /// Return type for methods and synthesized invoke signatures, value type
    /// for fields, properties, indexers and events. Constructors carry none.
    pub shape: Option<TypeShape>,
}

/// Payload of a parameter symbol.
#[derive(Debug, Clone)]
pub struct ParameterData {
    /// The parameter's type.
    pub shape: TypeShape,
    /// Passing mode.
    pub ref_kind: RefKind,
}

/// Payload of a generic type parameter symbol.
#[derive(Debug, Clone, Default)]
pub struct TypeParameterData {
    /// Constraint type shapes declared on the parameter.
    pub constraints: Vec<TypeShape>,
}

/// Payload of a synthesized accessor symbol.
#[derive(Debug, Clone)]
pub struct AccessorData {
    /// The accessor's role on its owning property, indexer or event.
    pub kind: AccessorKind,
}

/// Kind-specific payload of a [`Symbol`].
///
/// Modeled as a closed sum so that a new symbol shape is a compile-time
/// exhaustiveness failure in every checker that matches on it.
#[derive(Debug, Clone)]
pub enum SymbolData {
    /// Assemblies, modules and namespaces carry no payload.
    None,
    /// Payload for type definitions.
    Type(TypeData),
    /// Payload for members.
    Member(MemberData),
    /// Payload for parameters.
    Parameter(ParameterData),
    /// Payload for generic type parameters.
    TypeParameter(TypeParameterData),
    /// Payload for accessors.
    Accessor(AccessorData),
}

/// A node in the immutable symbol graph.
///
/// Symbols are created exclusively through [`crate::symbols::GraphBuilder`]
/// and never change once [`crate::symbols::GraphBuilder::finish`] has run.
/// Names are stored in de-escaped source form: any Unicode escape sequences
/// are resolved by the front end before graph construction.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// De-escaped source-level name. Synthesized accessors carry their
    /// metadata name (`get_X`, `add_X`, ...); constructors are named `.ctor`.
    pub name: String,
    /// Node kind.
    pub kind: SymbolKind,
    /// Containing symbol; `None` only for the assembly root.
    pub parent: Option<SymbolId>,
    /// Child symbols in declaration order.
    pub children: Vec<SymbolId>,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Declared attributes with resolved constant arguments.
    pub attributes: Vec<AttributeSpec>,
    /// Source range of the declaration, if known.
    pub span: Option<SourceSpan>,
    /// Monotonically increasing declaration index, used as the deterministic
    /// tie-break when several symbols share a source position.
    pub decl_index: u32,
    /// Modifier bits.
    pub flags: MemberFlags,
    /// Kind-specific payload.
    pub data: SymbolData,
}

impl Symbol {
    /// The symbol's own `CLSCompliant` declaration, if it carries one on a
    /// non-`param:`/`return:` target.
    #[must_use]
    pub fn declared_compliance(&self) -> Option<bool> {
        self.attributes.iter().find_map(|attr| {
            if matches!(
                attr.target,
                AttributeTarget::Parameter | AttributeTarget::Return
            ) {
                None
            } else {
                attr.cls_compliance()
            }
        })
    }

    /// True when the symbol itself declares `[CLSCompliant(false)]`.
    #[must_use]
    pub fn is_declared_non_compliant(&self) -> bool {
        self.declared_compliance() == Some(false)
    }

    /// Type payload accessor; `None` for non-type symbols.
    #[must_use]
    pub fn type_data(&self) -> Option<&TypeData> {
        match &self.data {
            SymbolData::Type(data) => Some(data),
            _ => None,
        }
    }

    /// Member payload accessor; `None` for non-member symbols.
    #[must_use]
    pub fn member_data(&self) -> Option<&MemberData> {
        match &self.data {
            SymbolData::Member(data) => Some(data),
            _ => None,
        }
    }

    /// Parameter payload accessor; `None` for non-parameter symbols.
    #[must_use]
    pub fn parameter_data(&self) -> Option<&ParameterData> {
        match &self.data {
            SymbolData::Parameter(data) => Some(data),
            _ => None,
        }
    }

    /// Type-parameter payload accessor; `None` for other symbols.
    #[must_use]
    pub fn type_parameter_data(&self) -> Option<&TypeParameterData> {
        match &self.data {
            SymbolData::TypeParameter(data) => Some(data),
            _ => None,
        }
    }

    /// Accessor payload accessor; `None` for other symbols.
    #[must_use]
    pub fn accessor_data(&self) -> Option<&AccessorData> {
        match &self.data {
            SymbolData::Accessor(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_name_table() {
        assert_eq!(AccessorKind::Get.synthesized_name("P"), "get_P");
        assert_eq!(AccessorKind::Set.synthesized_name("P"), "set_P");
        assert_eq!(AccessorKind::Add.synthesized_name("E"), "add_E");
        assert_eq!(AccessorKind::Remove.synthesized_name("E"), "remove_E");
    }

    #[test]
    fn test_ref_kind_collapse() {
        assert!(!RefKind::None.is_by_ref());
        assert!(RefKind::Ref.is_by_ref());
        assert!(RefKind::Out.is_by_ref());
        assert!(RefKind::In.is_by_ref());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(SymbolKind::Class.is_type());
        assert!(SymbolKind::Delegate.is_type());
        assert!(!SymbolKind::Method.is_type());
        assert!(SymbolKind::Field.is_member());
        assert!(SymbolKind::Namespace.is_container());
        assert!(SymbolKind::Struct.is_container());
        assert!(!SymbolKind::Parameter.is_container());
    }

    #[test]
    fn test_span_ordering() {
        let a = SourceSpan::new(0, 10, 12);
        let b = SourceSpan::new(0, 20, 22);
        let c = SourceSpan::new(1, 0, 2);
        assert!(a < b);
        assert!(b < c);
    }
}
