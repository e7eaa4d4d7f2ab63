//! Fluent construction API for symbol graphs.
//!
//! A front end (or a test) assembles the immutable [`SymbolGraph`] through
//! these builders: a [`GraphBuilder`] owns the arena under construction and
//! the assembly/module/namespace skeleton, while [`TypeBuilder`] and the
//! member builders describe declarations and are committed with
//! [`TypeBuilder::build`]. Builders default to `public` accessibility; call
//! the restricting methods to narrow.
//!
//! # Examples
//!
//! ```rust
//! use clscope::symbols::{GraphBuilder, TypeBuilder, TypeShape, SpecialType};
//!
//! let mut graph = GraphBuilder::new("app");
//! graph.assembly_compliance(true);
//!
//! TypeBuilder::class("Person")
//!     .namespace("App.Models")
//!     .property("Name", TypeShape::Special(SpecialType::String), |p| p)
//!     .method("Touch", |m| m.parameter("count", TypeShape::Special(SpecialType::I4)))
//!     .build(&mut graph)?;
//!
//! let graph = graph.finish();
//! # Ok::<(), clscope::Error>(())
//! ```

use crate::symbols::{
    Accessibility, AccessorData, AccessorKind, AttributeSpec, MemberData, MemberFlags,
    ParameterData, SourceSpan, Symbol, SymbolData, SymbolGraph, SymbolId, SymbolKind, TypeData,
    TypeParameterData, TypeShape,
};
use crate::Result;

/// Owns the arena under construction.
///
/// Creating a `GraphBuilder` allocates the assembly root, the primary module
/// and the global namespace; types are attached through [`TypeBuilder`] and
/// additional modules through [`GraphBuilder::add_module`].
#[derive(Debug)]
pub struct GraphBuilder {
    symbols: Vec<Symbol>,
    primary_module: SymbolId,
    global_namespace: SymbolId,
    next_decl: u32,
}

impl GraphBuilder {
    /// Starts a graph for an assembly called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut builder = Self {
            symbols: Vec::new(),
            primary_module: SymbolId(0),
            global_namespace: SymbolId(0),
            next_decl: 0,
        };
        let assembly = builder.alloc(Symbol {
            name: name.to_string(),
            kind: SymbolKind::Assembly,
            parent: None,
            children: Vec::new(),
            accessibility: Accessibility::Public,
            attributes: Vec::new(),
            span: None,
            decl_index: 0,
            flags: MemberFlags::empty(),
            data: SymbolData::None,
        });
        builder.primary_module = builder.alloc(Symbol {
            name: format!("{name}.dll"),
            kind: SymbolKind::Module,
            parent: Some(assembly),
            children: Vec::new(),
            accessibility: Accessibility::Public,
            attributes: Vec::new(),
            span: None,
            decl_index: 0,
            flags: MemberFlags::empty(),
            data: SymbolData::None,
        });
        builder.global_namespace = builder.alloc(Symbol {
            name: String::new(),
            kind: SymbolKind::Namespace,
            parent: Some(builder.primary_module),
            children: Vec::new(),
            accessibility: Accessibility::Public,
            attributes: Vec::new(),
            span: None,
            decl_index: 0,
            flags: MemberFlags::empty(),
            data: SymbolData::None,
        });
        builder
    }

    fn alloc(&mut self, mut symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        symbol.decl_index = self.next_decl;
        self.next_decl += 1;
        if let Some(parent) = symbol.parent {
            self.symbols[parent.index()].children.push(id);
        }
        self.symbols.push(symbol);
        id
    }

    /// Declares `CLSCompliant(value)` at assembly level.
    pub fn assembly_compliance(&mut self, value: bool) -> &mut Self {
        let spec = AttributeSpec::cls_compliant(value)
            .with_target(crate::symbols::AttributeTarget::Assembly);
        self.symbols[SymbolGraph::ASSEMBLY.index()].attributes.push(spec);
        self
    }

    /// Declares `CLSCompliant(value)` at module level on the primary module.
    pub fn module_compliance(&mut self, value: bool) -> &mut Self {
        let spec = AttributeSpec::cls_compliant(value)
            .with_target(crate::symbols::AttributeTarget::Module);
        let module = self.primary_module;
        self.symbols[module.index()].attributes.push(spec);
        self
    }

    /// Adds another module to the assembly and returns its id. Added modules
    /// participate only in the assembly/module consistency checks.
    pub fn add_module(&mut self, name: &str) -> SymbolId {
        self.alloc(Symbol {
            name: name.to_string(),
            kind: SymbolKind::Module,
            parent: Some(SymbolGraph::ASSEMBLY),
            children: Vec::new(),
            accessibility: Accessibility::Public,
            attributes: Vec::new(),
            span: None,
            decl_index: 0,
            flags: MemberFlags::empty(),
            data: SymbolData::None,
        })
    }

    /// Attaches a pre-built attribute application to an existing symbol.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SymbolNotFound`] when `id` does not belong to
    /// this builder.
    pub fn attach_attribute(&mut self, id: SymbolId, spec: AttributeSpec) -> Result<()> {
        let symbol = self
            .symbols
            .get_mut(id.index())
            .ok_or(crate::Error::SymbolNotFound(id))?;
        symbol.attributes.push(spec);
        Ok(())
    }

    /// Resolves (creating as needed) the namespace at the dotted `path`.
    /// An empty path is the global namespace.
    pub fn namespace(&mut self, path: &str) -> SymbolId {
        let mut current = self.global_namespace;
        if path.is_empty() {
            return current;
        }
        for segment in path.split('.') {
            let existing = self.symbols[current.index()]
                .children
                .iter()
                .copied()
                .find(|c| {
                    let child = &self.symbols[c.index()];
                    child.kind == SymbolKind::Namespace && child.name == segment
                });
            current = match existing {
                Some(id) => id,
                None => self.alloc(Symbol {
                    name: segment.to_string(),
                    kind: SymbolKind::Namespace,
                    parent: Some(current),
                    children: Vec::new(),
                    accessibility: Accessibility::Public,
                    attributes: Vec::new(),
                    span: None,
                    decl_index: 0,
                    flags: MemberFlags::empty(),
                    data: SymbolData::None,
                }),
            };
        }
        current
    }

    /// Finds a direct child of an already-built symbol by name, such as a
    /// nested type or a member, for constructing shapes that refer to it.
    #[must_use]
    pub fn find_child(&self, owner: SymbolId, name: &str) -> Option<SymbolId> {
        self.symbols
            .get(owner.index())?
            .children
            .iter()
            .copied()
            .find(|child| self.symbols[child.index()].name == name)
    }

    /// Finds a generic type parameter of an already-built symbol by name,
    /// for constructing [`TypeShape::TypeParameterRef`] shapes that refer to
    /// it.
    #[must_use]
    pub fn find_type_parameter(&self, owner: SymbolId, name: &str) -> Option<SymbolId> {
        self.symbols
            .get(owner.index())?
            .children
            .iter()
            .copied()
            .find(|child| {
                let symbol = &self.symbols[child.index()];
                symbol.kind == SymbolKind::TypeParameter && symbol.name == name
            })
    }

    /// Seals the graph. After this no further symbols can be added.
    #[must_use]
    pub fn finish(self) -> SymbolGraph {
        SymbolGraph {
            symbols: self.symbols,
        }
    }
}

/// Specification of one parameter, for signatures that need per-parameter
/// attributes or passing modes beyond the [`MethodBuilder`] shorthands.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    name: String,
    shape: TypeShape,
    ref_kind: crate::symbols::RefKind,
    attributes: Vec<AttributeSpec>,
    span: Option<SourceSpan>,
}

impl ParamSpec {
    /// A by-value parameter `name` of type `shape`.
    #[must_use]
    pub fn new(name: &str, shape: TypeShape) -> Self {
        Self {
            name: name.to_string(),
            shape,
            ref_kind: crate::symbols::RefKind::None,
            attributes: Vec::new(),
            span: None,
        }
    }

    /// Marks the parameter `ref`.
    #[must_use]
    pub fn by_ref(mut self) -> Self {
        self.ref_kind = crate::symbols::RefKind::Ref;
        self
    }

    /// Marks the parameter `out`.
    #[must_use]
    pub fn out(mut self) -> Self {
        self.ref_kind = crate::symbols::RefKind::Out;
        self
    }

    /// Attaches an attribute application to the parameter.
    #[must_use]
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Attaches a source range.
    #[must_use]
    pub fn span(mut self, unit: u32, start: u32, end: u32) -> Self {
        self.span = Some(SourceSpan::new(unit, start, end));
        self
    }
}

/// Builder for methods and constructors, handed to the closures of
/// [`TypeBuilder::method`] and [`TypeBuilder::constructor`].
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    is_ctor: bool,
    accessibility: Accessibility,
    flags: MemberFlags,
    attributes: Vec<AttributeSpec>,
    span: Option<SourceSpan>,
    returns: Option<TypeShape>,
    params: Vec<ParamSpec>,
    type_params: Vec<(String, Vec<TypeShape>)>,
}

impl MethodBuilder {
    fn method(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_ctor: false,
            accessibility: Accessibility::Public,
            flags: MemberFlags::empty(),
            attributes: Vec::new(),
            span: None,
            returns: Some(TypeShape::Special(crate::symbols::SpecialType::Void)),
            params: Vec::new(),
            type_params: Vec::new(),
        }
    }

    fn ctor() -> Self {
        Self {
            name: ".ctor".to_string(),
            is_ctor: true,
            accessibility: Accessibility::Public,
            flags: MemberFlags::empty(),
            attributes: Vec::new(),
            span: None,
            returns: None,
            params: Vec::new(),
            type_params: Vec::new(),
        }
    }

    /// Makes the member public (the default).
    #[must_use]
    pub fn public(mut self) -> Self {
        self.accessibility = Accessibility::Public;
        self
    }

    /// Makes the member private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.accessibility = Accessibility::Private;
        self
    }

    /// Makes the member assembly-internal.
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.accessibility = Accessibility::Assembly;
        self
    }

    /// Makes the member protected.
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.accessibility = Accessibility::Family;
        self
    }

    /// Sets the return type. Methods default to `void`.
    #[must_use]
    pub fn returns(mut self, shape: TypeShape) -> Self {
        self.returns = Some(shape);
        self
    }

    /// Appends a by-value parameter.
    #[must_use]
    pub fn parameter(mut self, name: &str, shape: TypeShape) -> Self {
        self.params.push(ParamSpec::new(name, shape));
        self
    }

    /// Appends a `ref` parameter.
    #[must_use]
    pub fn parameter_ref(mut self, name: &str, shape: TypeShape) -> Self {
        self.params.push(ParamSpec::new(name, shape).by_ref());
        self
    }

    /// Appends an `out` parameter.
    #[must_use]
    pub fn parameter_out(mut self, name: &str, shape: TypeShape) -> Self {
        self.params.push(ParamSpec::new(name, shape).out());
        self
    }

    /// Appends a fully specified parameter.
    #[must_use]
    pub fn parameter_spec(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Marks the method as taking a variable argument list.
    #[must_use]
    pub fn vararg(mut self) -> Self {
        self.flags |= MemberFlags::VARARG;
        self
    }

    /// Marks the method abstract.
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.flags |= MemberFlags::ABSTRACT;
        self
    }

    /// Marks the method virtual.
    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.flags |= MemberFlags::VIRTUAL;
        self
    }

    /// Marks the method as overriding a base member.
    #[must_use]
    pub fn override_(mut self) -> Self {
        self.flags |= MemberFlags::OVERRIDE;
        self
    }

    /// Marks the method static.
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    /// Marks the method as an explicit interface implementation.
    #[must_use]
    pub fn explicit_impl(mut self) -> Self {
        self.flags |= MemberFlags::EXPLICIT_IMPL;
        self
    }

    /// Declares `CLSCompliant(value)` on the method.
    #[must_use]
    pub fn compliant(mut self, value: bool) -> Self {
        self.attributes.push(AttributeSpec::cls_compliant(value));
        self
    }

    /// Attaches an attribute application.
    #[must_use]
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Attaches a `return:`-targeted attribute application.
    #[must_use]
    pub fn return_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes
            .push(spec.with_target(crate::symbols::AttributeTarget::Return));
        self
    }

    /// Declares an unconstrained generic method parameter.
    #[must_use]
    pub fn type_param(mut self, name: &str) -> Self {
        self.type_params.push((name.to_string(), Vec::new()));
        self
    }

    /// Declares a generic method parameter with constraint shapes.
    #[must_use]
    pub fn type_param_bounded(mut self, name: &str, constraints: Vec<TypeShape>) -> Self {
        self.type_params.push((name.to_string(), constraints));
        self
    }

    /// Attaches a source range.
    #[must_use]
    pub fn span(mut self, unit: u32, start: u32, end: u32) -> Self {
        self.span = Some(SourceSpan::new(unit, start, end));
        self
    }

    fn build(self, gb: &mut GraphBuilder, parent: SymbolId) -> SymbolId {
        let id = gb.alloc(Symbol {
            name: self.name,
            kind: if self.is_ctor {
                SymbolKind::Constructor
            } else {
                SymbolKind::Method
            },
            parent: Some(parent),
            children: Vec::new(),
            accessibility: self.accessibility,
            attributes: self.attributes,
            span: self.span,
            decl_index: 0,
            flags: self.flags,
            data: SymbolData::Member(MemberData {
                shape: self.returns,
            }),
        });
        for (name, constraints) in self.type_params {
            gb.alloc(Symbol {
                name,
                kind: SymbolKind::TypeParameter,
                parent: Some(id),
                children: Vec::new(),
                accessibility: Accessibility::Public,
                attributes: Vec::new(),
                span: None,
                decl_index: 0,
                flags: MemberFlags::empty(),
                data: SymbolData::TypeParameter(TypeParameterData { constraints }),
            });
        }
        for param in self.params {
            gb.alloc(Symbol {
                name: param.name,
                kind: SymbolKind::Parameter,
                parent: Some(id),
                children: Vec::new(),
                accessibility: Accessibility::Public,
                attributes: param.attributes,
                span: param.span,
                decl_index: 0,
                flags: MemberFlags::empty(),
                data: SymbolData::Parameter(ParameterData {
                    shape: param.shape,
                    ref_kind: param.ref_kind,
                }),
            });
        }
        id
    }
}

/// Builder for fields.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    shape: TypeShape,
    accessibility: Accessibility,
    flags: MemberFlags,
    attributes: Vec<AttributeSpec>,
    span: Option<SourceSpan>,
}

impl FieldBuilder {
    fn new(name: &str, shape: TypeShape) -> Self {
        Self {
            name: name.to_string(),
            shape,
            accessibility: Accessibility::Public,
            flags: MemberFlags::empty(),
            attributes: Vec::new(),
            span: None,
        }
    }

    /// Makes the field public (the default).
    #[must_use]
    pub fn public(mut self) -> Self {
        self.accessibility = Accessibility::Public;
        self
    }

    /// Makes the field private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.accessibility = Accessibility::Private;
        self
    }

    /// Makes the field assembly-internal.
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.accessibility = Accessibility::Assembly;
        self
    }

    /// Makes the field protected.
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.accessibility = Accessibility::Family;
        self
    }

    /// Marks the field volatile.
    #[must_use]
    pub fn volatile_(mut self) -> Self {
        self.flags |= MemberFlags::VOLATILE;
        self
    }

    /// Marks the field static.
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    /// Declares `CLSCompliant(value)` on the field.
    #[must_use]
    pub fn compliant(mut self, value: bool) -> Self {
        self.attributes.push(AttributeSpec::cls_compliant(value));
        self
    }

    /// Attaches an attribute application.
    #[must_use]
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Attaches a source range.
    #[must_use]
    pub fn span(mut self, unit: u32, start: u32, end: u32) -> Self {
        self.span = Some(SourceSpan::new(unit, start, end));
        self
    }

    fn build(self, gb: &mut GraphBuilder, parent: SymbolId) -> SymbolId {
        gb.alloc(Symbol {
            name: self.name,
            kind: SymbolKind::Field,
            parent: Some(parent),
            children: Vec::new(),
            accessibility: self.accessibility,
            attributes: self.attributes,
            span: self.span,
            decl_index: 0,
            flags: self.flags,
            data: SymbolData::Member(MemberData {
                shape: Some(self.shape),
            }),
        })
    }
}

/// Builder for properties, indexers and events.
///
/// Properties without an explicit [`PropertyBuilder::getter`] or
/// [`PropertyBuilder::setter`] call receive both accessors; events always
/// receive their add/remove pair.
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    kind: SymbolKind,
    name: String,
    shape: TypeShape,
    accessibility: Accessibility,
    flags: MemberFlags,
    attributes: Vec<AttributeSpec>,
    span: Option<SourceSpan>,
    getter: bool,
    setter: bool,
    params: Vec<ParamSpec>,
}

impl PropertyBuilder {
    fn new(kind: SymbolKind, name: &str, shape: TypeShape) -> Self {
        Self {
            kind,
            name: name.to_string(),
            shape,
            accessibility: Accessibility::Public,
            flags: MemberFlags::empty(),
            attributes: Vec::new(),
            span: None,
            getter: false,
            setter: false,
            params: Vec::new(),
        }
    }

    /// Makes the member public (the default).
    #[must_use]
    pub fn public(mut self) -> Self {
        self.accessibility = Accessibility::Public;
        self
    }

    /// Makes the member private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.accessibility = Accessibility::Private;
        self
    }

    /// Makes the member assembly-internal.
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.accessibility = Accessibility::Assembly;
        self
    }

    /// Makes the member protected.
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.accessibility = Accessibility::Family;
        self
    }

    /// Adds a getter accessor.
    #[must_use]
    pub fn getter(mut self) -> Self {
        self.getter = true;
        self
    }

    /// Adds a setter accessor.
    #[must_use]
    pub fn setter(mut self) -> Self {
        self.setter = true;
        self
    }

    /// Appends an indexer parameter.
    #[must_use]
    pub fn parameter(mut self, name: &str, shape: TypeShape) -> Self {
        self.params.push(ParamSpec::new(name, shape));
        self
    }

    /// Marks the member abstract.
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.flags |= MemberFlags::ABSTRACT;
        self
    }

    /// Marks the member static.
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    /// Declares `CLSCompliant(value)` on the member.
    #[must_use]
    pub fn compliant(mut self, value: bool) -> Self {
        self.attributes.push(AttributeSpec::cls_compliant(value));
        self
    }

    /// Attaches an attribute application.
    #[must_use]
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Attaches a source range.
    #[must_use]
    pub fn span(mut self, unit: u32, start: u32, end: u32) -> Self {
        self.span = Some(SourceSpan::new(unit, start, end));
        self
    }

    fn build(self, gb: &mut GraphBuilder, parent: SymbolId) -> SymbolId {
        let accessors: Vec<AccessorKind> = match self.kind {
            SymbolKind::Event => vec![AccessorKind::Add, AccessorKind::Remove],
            _ => {
                let (getter, setter) = if self.getter || self.setter {
                    (self.getter, self.setter)
                } else {
                    (true, true)
                };
                let mut kinds = Vec::new();
                if getter {
                    kinds.push(AccessorKind::Get);
                }
                if setter {
                    kinds.push(AccessorKind::Set);
                }
                kinds
            }
        };

        let owner_name = self.name.clone();
        let id = gb.alloc(Symbol {
            name: self.name,
            kind: self.kind,
            parent: Some(parent),
            children: Vec::new(),
            accessibility: self.accessibility,
            attributes: self.attributes,
            span: self.span,
            decl_index: 0,
            flags: self.flags,
            data: SymbolData::Member(MemberData {
                shape: Some(self.shape),
            }),
        });
        for param in self.params {
            gb.alloc(Symbol {
                name: param.name,
                kind: SymbolKind::Parameter,
                parent: Some(id),
                children: Vec::new(),
                accessibility: Accessibility::Public,
                attributes: param.attributes,
                span: param.span,
                decl_index: 0,
                flags: MemberFlags::empty(),
                data: SymbolData::Parameter(ParameterData {
                    shape: param.shape,
                    ref_kind: param.ref_kind,
                }),
            });
        }
        for kind in accessors {
            gb.alloc(Symbol {
                name: kind.synthesized_name(&owner_name),
                kind: SymbolKind::Accessor,
                parent: Some(id),
                children: Vec::new(),
                accessibility: self.accessibility,
                attributes: Vec::new(),
                span: None,
                decl_index: 0,
                flags: self.flags,
                data: SymbolData::Accessor(AccessorData { kind }),
            });
        }
        id
    }
}

#[derive(Debug, Clone)]
enum MemberEntry {
    Method(MethodBuilder),
    Field(FieldBuilder),
    Property(PropertyBuilder),
}

/// Fluent builder for type definitions.
///
/// A `TypeBuilder` collects the declaration and commits it (members, type
/// parameters and nested types included) with [`TypeBuilder::build`].
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    kind: SymbolKind,
    name: String,
    namespace: Option<String>,
    accessibility: Accessibility,
    attributes: Vec<AttributeSpec>,
    span: Option<SourceSpan>,
    flags: MemberFlags,
    base: Option<TypeShape>,
    interfaces: Vec<TypeShape>,
    is_attribute_type: bool,
    type_params: Vec<(String, Vec<TypeShape>)>,
    members: Vec<MemberEntry>,
    nested: Vec<TypeBuilder>,
    delegate_signature: Option<MethodBuilder>,
}

impl TypeBuilder {
    fn new(kind: SymbolKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            namespace: None,
            accessibility: Accessibility::Public,
            attributes: Vec::new(),
            span: None,
            flags: MemberFlags::empty(),
            base: None,
            interfaces: Vec::new(),
            is_attribute_type: false,
            type_params: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            delegate_signature: None,
        }
    }

    /// Starts a class declaration.
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::new(SymbolKind::Class, name)
    }

    /// Starts a struct declaration.
    #[must_use]
    pub fn struct_(name: &str) -> Self {
        Self::new(SymbolKind::Struct, name)
    }

    /// Starts an interface declaration.
    #[must_use]
    pub fn interface(name: &str) -> Self {
        Self::new(SymbolKind::Interface, name)
    }

    /// Starts an enum declaration.
    #[must_use]
    pub fn enum_(name: &str) -> Self {
        Self::new(SymbolKind::Enum, name)
    }

    /// Starts a delegate declaration; configure its invoke signature with
    /// [`TypeBuilder::signature`].
    #[must_use]
    pub fn delegate(name: &str) -> Self {
        Self::new(SymbolKind::Delegate, name)
    }

    /// Makes the type public (the default).
    #[must_use]
    pub fn public(mut self) -> Self {
        self.accessibility = Accessibility::Public;
        self
    }

    /// Makes the type assembly-internal.
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.accessibility = Accessibility::Assembly;
        self
    }

    /// Makes the type private (valid for nested types).
    #[must_use]
    pub fn private(mut self) -> Self {
        self.accessibility = Accessibility::Private;
        self
    }

    /// Makes the type protected (valid for nested types).
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.accessibility = Accessibility::Family;
        self
    }

    /// Makes the type protected-internal (valid for nested types).
    #[must_use]
    pub fn protected_internal(mut self) -> Self {
        self.accessibility = Accessibility::FamilyOrAssembly;
        self
    }

    /// Places the type in the namespace at `path` (dotted). Defaults to the
    /// global namespace. Rejected on nested types.
    #[must_use]
    pub fn namespace(mut self, path: &str) -> Self {
        self.namespace = Some(path.to_string());
        self
    }

    /// Declares `CLSCompliant(value)` on the type.
    #[must_use]
    pub fn compliant(mut self, value: bool) -> Self {
        self.attributes.push(AttributeSpec::cls_compliant(value));
        self
    }

    /// Attaches an attribute application.
    #[must_use]
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Sets the base type shape.
    #[must_use]
    pub fn base(mut self, shape: TypeShape) -> Self {
        self.base = Some(shape);
        self
    }

    /// Appends a declared interface. For interface declarations this is an
    /// inherited interface; for classes and structs an implemented one.
    #[must_use]
    pub fn implements(mut self, shape: TypeShape) -> Self {
        self.interfaces.push(shape);
        self
    }

    /// Marks the type as an applicable attribute class.
    #[must_use]
    pub fn attribute_type(mut self) -> Self {
        self.is_attribute_type = true;
        self
    }

    /// Marks the type abstract.
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.flags |= MemberFlags::ABSTRACT;
        self
    }

    /// Declares an unconstrained generic type parameter.
    #[must_use]
    pub fn type_param(mut self, name: &str) -> Self {
        self.type_params.push((name.to_string(), Vec::new()));
        self
    }

    /// Declares a generic type parameter with constraint shapes.
    #[must_use]
    pub fn type_param_bounded(mut self, name: &str, constraints: Vec<TypeShape>) -> Self {
        self.type_params.push((name.to_string(), constraints));
        self
    }

    /// Adds a method; the closure configures the [`MethodBuilder`].
    #[must_use]
    pub fn method<F>(mut self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.members
            .push(MemberEntry::Method(configure(MethodBuilder::method(name))));
        self
    }

    /// Adds a constructor; the closure configures the [`MethodBuilder`].
    #[must_use]
    pub fn constructor<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.members
            .push(MemberEntry::Method(configure(MethodBuilder::ctor())));
        self
    }

    /// Adds a public field of `shape`.
    #[must_use]
    pub fn field(mut self, name: &str, shape: TypeShape) -> Self {
        self.members
            .push(MemberEntry::Field(FieldBuilder::new(name, shape)));
        self
    }

    /// Adds a field; the closure configures the [`FieldBuilder`].
    #[must_use]
    pub fn field_with<F>(mut self, name: &str, shape: TypeShape, configure: F) -> Self
    where
        F: FnOnce(FieldBuilder) -> FieldBuilder,
    {
        self.members
            .push(MemberEntry::Field(configure(FieldBuilder::new(name, shape))));
        self
    }

    /// Adds a property; the closure configures the [`PropertyBuilder`].
    #[must_use]
    pub fn property<F>(mut self, name: &str, shape: TypeShape, configure: F) -> Self
    where
        F: FnOnce(PropertyBuilder) -> PropertyBuilder,
    {
        self.members.push(MemberEntry::Property(configure(
            PropertyBuilder::new(SymbolKind::Property, name, shape),
        )));
        self
    }

    /// Adds an indexer; the closure configures parameters and accessors.
    #[must_use]
    pub fn indexer<F>(mut self, shape: TypeShape, configure: F) -> Self
    where
        F: FnOnce(PropertyBuilder) -> PropertyBuilder,
    {
        self.members.push(MemberEntry::Property(configure(
            PropertyBuilder::new(SymbolKind::Indexer, "Item", shape),
        )));
        self
    }

    /// Adds an event of delegate type `shape` with its add/remove pair.
    #[must_use]
    pub fn event(mut self, name: &str, shape: TypeShape) -> Self {
        self.members.push(MemberEntry::Property(PropertyBuilder::new(
            SymbolKind::Event,
            name,
            shape,
        )));
        self
    }

    /// Adds an event; the closure configures the [`PropertyBuilder`].
    #[must_use]
    pub fn event_with<F>(mut self, name: &str, shape: TypeShape, configure: F) -> Self
    where
        F: FnOnce(PropertyBuilder) -> PropertyBuilder,
    {
        self.members.push(MemberEntry::Property(configure(
            PropertyBuilder::new(SymbolKind::Event, name, shape),
        )));
        self
    }

    /// Adds a nested type declaration.
    #[must_use]
    pub fn nested(mut self, builder: TypeBuilder) -> Self {
        self.nested.push(builder);
        self
    }

    /// Configures a delegate's invoke signature. Only valid on delegates.
    #[must_use]
    pub fn signature<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.delegate_signature = Some(configure(MethodBuilder::method("Invoke")));
        self
    }

    /// Attaches a source range.
    #[must_use]
    pub fn span(mut self, unit: u32, start: u32, end: u32) -> Self {
        self.span = Some(SourceSpan::new(unit, start, end));
        self
    }

    /// Commits the declaration (members, type parameters, accessors and
    /// nested types included) into `graph` and returns the type's id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Graph`] when the declaration is inconsistent,
    /// such as a nested type carrying a namespace path or a delegate
    /// signature on a non-delegate.
    pub fn build(self, graph: &mut GraphBuilder) -> Result<SymbolId> {
        let parent = graph.namespace(self.namespace.as_deref().unwrap_or(""));
        self.build_at(graph, parent)
    }

    fn build_at(self, gb: &mut GraphBuilder, parent: SymbolId) -> Result<SymbolId> {
        if self.delegate_signature.is_some() && self.kind != SymbolKind::Delegate {
            return Err(graph_error!(
                "invoke signature declared on non-delegate type '{}'",
                self.name
            ));
        }
        if gb.symbols[parent.index()].kind.is_type() && self.namespace.is_some() {
            return Err(graph_error!(
                "nested type '{}' cannot declare a namespace",
                self.name
            ));
        }

        let id = gb.alloc(Symbol {
            name: self.name,
            kind: self.kind,
            parent: Some(parent),
            children: Vec::new(),
            accessibility: self.accessibility,
            attributes: self.attributes,
            span: self.span,
            decl_index: 0,
            flags: self.flags,
            data: SymbolData::Type(TypeData {
                base: self.base,
                interfaces: self.interfaces,
                is_attribute_type: self.is_attribute_type,
            }),
        });

        for (name, constraints) in self.type_params {
            gb.alloc(Symbol {
                name,
                kind: SymbolKind::TypeParameter,
                parent: Some(id),
                children: Vec::new(),
                accessibility: Accessibility::Public,
                attributes: Vec::new(),
                span: None,
                decl_index: 0,
                flags: MemberFlags::empty(),
                data: SymbolData::TypeParameter(TypeParameterData { constraints }),
            });
        }

        if self.kind == SymbolKind::Delegate {
            let signature = self
                .delegate_signature
                .unwrap_or_else(|| MethodBuilder::method("Invoke"));
            signature.build(gb, id);
        }

        for member in self.members {
            match member {
                MemberEntry::Method(m) => {
                    m.build(gb, id);
                }
                MemberEntry::Field(f) => {
                    f.build(gb, id);
                }
                MemberEntry::Property(p) => {
                    p.build(gb, id);
                }
            }
        }

        for nested in self.nested {
            nested.build_at(gb, id)?;
        }

        Ok(id)
    }
}
