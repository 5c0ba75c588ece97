//! Schema-level AST: the unit, its imports, and type/datatype declarations.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::position::Span;
use crate::syntax::alias::derive_default_alias;
use crate::syntax::datatype::BuiltinType;
use crate::syntax::expression::Expr;
use crate::syntax::name::Name;

/// One parsed `.yammm` file. Owns the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SchemaUnit {
    /// Value of the `schema "..."` header; empty when the header is missing.
    pub name: String,
    pub header_span: Span,
    pub doc: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl SchemaUnit {
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Type(ty) => Some(ty),
            Declaration::Datatype(_) => None,
        })
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &DatatypeDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Datatype(dt) => Some(dt),
            Declaration::Type(_) => None,
        })
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types().find(|ty| ty.name == name)
    }

    pub fn find_datatype(&self, name: &str) -> Option<&DatatypeDecl> {
        self.datatypes().find(|dt| dt.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDecl {
    pub path: String,
    pub alias: Option<Name>,
    pub span: Span,
}

impl ImportDecl {
    /// The explicit alias, or the one derived from the path.
    pub fn effective_alias(&self) -> String {
        match &self.alias {
            Some(alias) => alias.text.clone(),
            None => derive_default_alias(&self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    Type(TypeDecl),
    Datatype(DatatypeDecl),
}

impl Declaration {
    pub fn name(&self) -> &Name {
        match self {
            Declaration::Type(ty) => &ty.name,
            Declaration::Datatype(dt) => &dt.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::Type(ty) => ty.span,
            Declaration::Datatype(dt) => dt.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum TypeModifier {
    #[default]
    None,
    Abstract,
    Part,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDecl {
    pub doc: Option<String>,
    pub name: Name,
    pub modifier: TypeModifier,
    pub extends: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl TypeDecl {
    pub fn is_abstract(&self) -> bool {
        self.modifier == TypeModifier::Abstract
    }

    pub fn is_part(&self) -> bool {
        self.modifier == TypeModifier::Part
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(p) => Some(p),
            _ => None,
        })
    }

    pub fn associations(&self) -> impl Iterator<Item = &Association> {
        self.members.iter().filter_map(|m| match m {
            Member::Association(a) => Some(a),
            _ => None,
        })
    }

    pub fn compositions(&self) -> impl Iterator<Item = &Composition> {
        self.members.iter().filter_map(|m| match m {
            Member::Composition(c) => Some(c),
            _ => None,
        })
    }

    pub fn invariants(&self) -> impl Iterator<Item = &Invariant> {
        self.members.iter().filter_map(|m| match m {
            Member::Invariant(i) => Some(i),
            _ => None,
        })
    }
}

/// `type Age = Integer[0, 150]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatatypeDecl {
    pub doc: Option<String>,
    pub name: Name,
    pub datatype: BuiltinType,
    pub span: Span,
}

/// A possibly alias-qualified type name: `Part` or `parts.Part`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub qualifier: Option<Name>,
    pub name: Name,
    pub span: Span,
}

impl TypeRef {
    pub fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}.{}", q, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The type of a property or list element: a built-in with parameters, or a
/// reference to a named datatype.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DataTypeRef {
    Builtin(BuiltinType),
    Alias(TypeRef),
}

impl DataTypeRef {
    pub fn span(&self) -> Span {
        match self {
            DataTypeRef::Builtin(b) => b.span,
            DataTypeRef::Alias(r) => r.span,
        }
    }
}

impl fmt::Display for DataTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTypeRef::Builtin(b) => write!(f, "{}", b),
            DataTypeRef::Alias(r) => write!(f, "{}", r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Member {
    Property(Property),
    Association(Association),
    Composition(Composition),
    Invariant(Invariant),
}

impl Member {
    pub fn span(&self) -> Span {
        match self {
            Member::Property(p) => p.span,
            Member::Association(a) => a.span,
            Member::Composition(c) => c.span,
            Member::Invariant(i) => i.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum PropertyModifier {
    #[default]
    None,
    Primary,
    Required,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub doc: Option<String>,
    pub name: Name,
    pub datatype: DataTypeRef,
    pub modifier: PropertyModifier,
    pub span: Span,
}

impl Property {
    pub fn is_primary(&self) -> bool {
        self.modifier == PropertyModifier::Primary
    }

    /// Primary keys are implicitly required.
    pub fn is_required(&self) -> bool {
        self.modifier != PropertyModifier::None
    }
}

/// Edge multiplicity. An omitted `(...)` decodes to `OptionalOne`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Multiplicity {
    #[default]
    OptionalOne,
    RequiredOne,
    OptionalMany,
    RequiredMany,
}

impl Multiplicity {
    pub fn is_required(self) -> bool {
        matches!(self, Multiplicity::RequiredOne | Multiplicity::RequiredMany)
    }

    pub fn is_many(self) -> bool {
        matches!(self, Multiplicity::OptionalMany | Multiplicity::RequiredMany)
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Multiplicity::OptionalOne => "(_:one)",
            Multiplicity::RequiredOne => "(one:one)",
            Multiplicity::OptionalMany => "(_:many)",
            Multiplicity::RequiredMany => "(one:many)",
        };
        f.write_str(s)
    }
}

/// `/ name (mult)` after a relation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseEdge {
    pub name: Name,
    pub multiplicity: Multiplicity,
    pub span: Span,
}

/// Edge attributes of an association: `{}` or a list of properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationBody {
    pub properties: Vec<Property>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Association {
    pub doc: Option<String>,
    pub name: Name,
    pub multiplicity: Multiplicity,
    pub target: TypeRef,
    pub reverse: Option<ReverseEdge>,
    pub body: Option<RelationBody>,
    pub span: Span,
}

/// Owning relation. Same shape as an association without edge attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub doc: Option<String>,
    pub name: Name,
    pub multiplicity: Multiplicity,
    pub target: TypeRef,
    pub reverse: Option<ReverseEdge>,
    pub span: Span,
}

/// `! "message" constraint`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invariant {
    pub message: String,
    pub constraint: Expr,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicity_flags() {
        assert!(!Multiplicity::default().is_required());
        assert!(!Multiplicity::default().is_many());
        assert!(Multiplicity::RequiredOne.is_required());
        assert!(Multiplicity::OptionalMany.is_many());
        assert!(Multiplicity::RequiredMany.is_required() && Multiplicity::RequiredMany.is_many());
    }

    #[test]
    fn effective_alias_prefers_explicit() {
        let import = ImportDecl {
            path: "./lib/my-parts.yammm".into(),
            alias: None,
            span: Span::default(),
        };
        assert_eq!(import.effective_alias(), "my_parts");

        let aliased = ImportDecl {
            alias: Some(Name::new("p", Span::default())),
            ..import
        };
        assert_eq!(aliased.effective_alias(), "p");
    }

    #[test]
    fn type_ref_display() {
        let r = TypeRef {
            qualifier: Some(Name::new("parts", Span::default())),
            name: Name::new("Wheel", Span::default()),
            span: Span::default(),
        };
        assert_eq!(r.to_string(), "parts.Wheel");
        assert!(r.is_qualified());
    }
}
