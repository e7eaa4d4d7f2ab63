//! Recursive type-shape descriptions used for compliance classification.
//!
//! A [`TypeShape`] describes a type *reference* - what a signature, base list
//! or constraint names - rather than a type definition. It is a closed tagged
//! variant so that adding a new shape is a compile-time exhaustiveness failure
//! in the classifier and the overload comparer instead of a silent
//! fallthrough. Shapes implement `Eq + Hash` and serve directly as memo keys.
//!
//! Non-semantic type decorations (`modopt`-style attached contexts) are
//! stripped by the front end and never reach a shape; they must not affect
//! compliance classification.

use crate::symbols::{SymbolGraph, SymbolId};

/// Built-in element types, in the runtime's element-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    /// No value.
    Void,
    /// True/false value.
    Boolean,
    /// Unicode 16-bit character.
    Char,
    /// Signed 8-bit integer.
    I1,
    /// Unsigned 8-bit integer.
    U1,
    /// Signed 16-bit integer.
    I2,
    /// Unsigned 16-bit integer.
    U2,
    /// Signed 32-bit integer.
    I4,
    /// Unsigned 32-bit integer.
    U4,
    /// Signed 64-bit integer.
    I8,
    /// Unsigned 64-bit integer.
    U8,
    /// 32-bit floating point.
    R4,
    /// 64-bit floating point.
    R8,
    /// Native sized signed integer.
    I,
    /// Native sized unsigned integer.
    U,
    /// 128-bit decimal.
    Decimal,
    /// Immutable string of Unicode characters.
    String,
    /// Base class for all reference types.
    Object,
    /// The runtime type-handle class.
    Type,
    /// Type-safe pointer coupled with its runtime type.
    TypedReference,
}

impl SpecialType {
    /// Whether the built-in type is part of the interop subset.
    ///
    /// The signed byte, the unsigned wide integers, the native unsigned
    /// integer and the typed reference are outside it; everything else,
    /// including the unsigned byte, is in.
    #[must_use]
    pub fn is_cls_compliant(self) -> bool {
        !matches!(
            self,
            SpecialType::I1
                | SpecialType::U2
                | SpecialType::U4
                | SpecialType::U8
                | SpecialType::U
                | SpecialType::TypedReference
        )
    }

    /// Whether the built-in type is a legal attribute-argument type under the
    /// interop rules: bool, char, the compliant fixed-width numerics, string
    /// and the runtime type handle. Enums are handled by the caller.
    #[must_use]
    pub fn is_attribute_argument_type(self) -> bool {
        matches!(
            self,
            SpecialType::Boolean
                | SpecialType::Char
                | SpecialType::U1
                | SpecialType::I2
                | SpecialType::I4
                | SpecialType::I8
                | SpecialType::R4
                | SpecialType::R8
                | SpecialType::String
                | SpecialType::Type
        )
    }

    /// Source-level keyword or well-known name used in display output.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SpecialType::Void => "void",
            SpecialType::Boolean => "bool",
            SpecialType::Char => "char",
            SpecialType::I1 => "sbyte",
            SpecialType::U1 => "byte",
            SpecialType::I2 => "short",
            SpecialType::U2 => "ushort",
            SpecialType::I4 => "int",
            SpecialType::U4 => "uint",
            SpecialType::I8 => "long",
            SpecialType::U8 => "ulong",
            SpecialType::R4 => "float",
            SpecialType::R8 => "double",
            SpecialType::I => "System.IntPtr",
            SpecialType::U => "System.UIntPtr",
            SpecialType::Decimal => "decimal",
            SpecialType::String => "string",
            SpecialType::Object => "object",
            SpecialType::Type => "System.Type",
            SpecialType::TypedReference => "System.TypedReference",
        }
    }
}

/// A recursive description of a type reference.
///
/// Used only for compliance classification and overload-shape comparison,
/// never for semantic identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A built-in element type.
    Special(SpecialType),
    /// A named type definition, possibly a generic instantiation.
    Named {
        /// The referenced definition in the graph.
        definition: SymbolId,
        /// Type arguments; empty for non-generic references.
        args: Vec<TypeShape>,
    },
    /// An array with the given rank.
    Array {
        /// Element shape.
        element: Box<TypeShape>,
        /// Number of dimensions; 1 for a vector.
        rank: u32,
    },
    /// An unmanaged pointer.
    Pointer(Box<TypeShape>),
    /// An unmanaged function pointer.
    FunctionPointer,
    /// A reference to a generic type parameter in scope.
    TypeParameterRef(SymbolId),
    /// The dynamically-typed object reference.
    Dynamic,
    /// A reference the front end failed to bind; every check skips it
    /// silently to avoid double-reporting.
    Unresolved,
}

impl TypeShape {
    /// Shorthand for a named, non-generic reference.
    #[must_use]
    pub fn named(definition: SymbolId) -> Self {
        TypeShape::Named {
            definition,
            args: Vec::new(),
        }
    }

    /// Shorthand for a generic instantiation.
    #[must_use]
    pub fn generic(definition: SymbolId, args: Vec<TypeShape>) -> Self {
        TypeShape::Named { definition, args }
    }

    /// Shorthand for a single-dimensional array of `element`.
    #[must_use]
    pub fn array(element: TypeShape) -> Self {
        TypeShape::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Shorthand for a multi-dimensional array of `element`.
    #[must_use]
    pub fn array_of_rank(element: TypeShape, rank: u32) -> Self {
        TypeShape::Array {
            element: Box::new(element),
            rank,
        }
    }

    /// Whether the shape is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, TypeShape::Array { .. })
    }

    /// Renders the shape the way the source language writes it.
    ///
    /// Array suffixes read outermost-first; ranks above one render with the
    /// wildcard placeholder (`[*,*]` for rank 2), matching how multi-rank
    /// arrays appear in diagnostics.
    #[must_use]
    pub fn display(&self, graph: &SymbolGraph) -> String {
        match self {
            TypeShape::Special(special) => special.display_name().to_string(),
            TypeShape::Named { definition, args } => {
                let name = graph
                    .get(*definition)
                    .map_or_else(|| "?".to_string(), |_| graph.qualified_name(*definition));
                if args.is_empty() {
                    name
                } else {
                    let rendered: Vec<String> = args.iter().map(|a| a.display(graph)).collect();
                    // The qualified name of a generic definition already carries
                    // its `<T>` suffix; instantiations replace it.
                    let base = name.split('<').next().unwrap_or(&name).to_string();
                    format!("{}<{}>", base, rendered.join(", "))
                }
            }
            TypeShape::Array { .. } => {
                let mut suffixes = String::new();
                let mut cursor = self;
                while let TypeShape::Array { element, rank } = cursor {
                    suffixes.push('[');
                    for i in 0..*rank {
                        if *rank > 1 {
                            if i > 0 {
                                suffixes.push(',');
                            }
                            suffixes.push('*');
                        }
                    }
                    suffixes.push(']');
                    cursor = element;
                }
                format!("{}{}", cursor.display(graph), suffixes)
            }
            TypeShape::Pointer(pointee) => format!("{}*", pointee.display(graph)),
            TypeShape::FunctionPointer => "fnptr".to_string(),
            TypeShape::TypeParameterRef(definition) => graph
                .get(*definition)
                .map_or_else(|| "?".to_string(), |s| s.name.clone()),
            TypeShape::Dynamic => "dynamic".to_string(),
            TypeShape::Unresolved => "?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{GraphBuilder, TypeBuilder};

    #[test]
    fn test_special_compliance() {
        assert!(!SpecialType::I1.is_cls_compliant());
        assert!(SpecialType::U1.is_cls_compliant());
        assert!(!SpecialType::U2.is_cls_compliant());
        assert!(!SpecialType::U4.is_cls_compliant());
        assert!(!SpecialType::U8.is_cls_compliant());
        assert!(!SpecialType::U.is_cls_compliant());
        assert!(SpecialType::I.is_cls_compliant());
        assert!(!SpecialType::TypedReference.is_cls_compliant());
        assert!(SpecialType::Decimal.is_cls_compliant());
    }

    #[test]
    fn test_attribute_argument_types() {
        assert!(SpecialType::Boolean.is_attribute_argument_type());
        assert!(SpecialType::U1.is_attribute_argument_type());
        assert!(SpecialType::Type.is_attribute_argument_type());
        assert!(!SpecialType::I1.is_attribute_argument_type());
        assert!(!SpecialType::Decimal.is_attribute_argument_type());
        assert!(!SpecialType::Object.is_attribute_argument_type());
        assert!(!SpecialType::I.is_attribute_argument_type());
    }

    #[test]
    fn test_display_array_suffix_order() {
        let mut builder = GraphBuilder::new("shapes");
        TypeBuilder::class("C").public().build(&mut builder).unwrap();
        let graph = builder.finish();

        let int = TypeShape::Special(SpecialType::I4);
        assert_eq!(int.display(&graph), "int");
        assert_eq!(TypeShape::array(int.clone()).display(&graph), "int[]");
        assert_eq!(
            TypeShape::array_of_rank(int.clone(), 2).display(&graph),
            "int[*,*]"
        );

        // Jagged rank-1 of rank-2: suffixes render outermost-first.
        let jagged = TypeShape::array(TypeShape::array_of_rank(int, 2));
        assert_eq!(jagged.display(&graph), "int[][*,*]");
    }
}
