use crate::syntax::{
    datatype::{Builtin, BuiltinType},
    expression::Expr,
    name::Name,
    schema::{
        Association, Composition, DataTypeRef, DatatypeDecl, Declaration, ImportDecl, Invariant,
        Member, Property, RelationBody, ReverseEdge, SchemaUnit, TypeDecl, TypeRef,
    },
};

/// Read-only schema visitor.
///
/// Every `visit_*` method defaults to the matching `walk_*` function, which
/// recurses into child nodes. Override a method to intercept a node and call
/// `walk_*` from the override to keep descending.
pub trait Visitor<'ast> {
    fn visit_unit(&mut self, unit: &'ast SchemaUnit) {
        walk_unit(self, unit);
    }

    fn visit_import(&mut self, _import: &'ast ImportDecl) {}

    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_type_decl(&mut self, decl: &'ast TypeDecl) {
        walk_type_decl(self, decl);
    }

    fn visit_datatype_decl(&mut self, decl: &'ast DatatypeDecl) {
        walk_datatype_decl(self, decl);
    }

    fn visit_member(&mut self, member: &'ast Member) {
        walk_member(self, member);
    }

    fn visit_property(&mut self, property: &'ast Property) {
        walk_property(self, property);
    }

    fn visit_association(&mut self, assoc: &'ast Association) {
        walk_association(self, assoc);
    }

    fn visit_composition(&mut self, comp: &'ast Composition) {
        walk_composition(self, comp);
    }

    fn visit_invariant(&mut self, invariant: &'ast Invariant) {
        walk_invariant(self, invariant);
    }

    fn visit_datatype_ref(&mut self, datatype: &'ast DataTypeRef) {
        walk_datatype_ref(self, datatype);
    }

    fn visit_builtin(&mut self, builtin: &'ast BuiltinType) {
        walk_builtin(self, builtin);
    }

    fn visit_type_ref(&mut self, _type_ref: &'ast TypeRef) {}

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_name(&mut self, _name: &'ast Name) {}
}

// ---------------------------------------------------------------------------
// walk_* functions destructure exhaustively, so a new field or variant fails
// to compile here until the traversal is updated.
// ---------------------------------------------------------------------------

pub fn walk_unit<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, unit: &'ast SchemaUnit) {
    let SchemaUnit {
        name: _,
        header_span: _,
        doc: _,
        imports,
        declarations,
        span: _,
    } = unit;
    for import in imports {
        visitor.visit_import(import);
    }
    for decl in declarations {
        visitor.visit_declaration(decl);
    }
}

pub fn walk_declaration<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast Declaration) {
    match decl {
        Declaration::Type(ty) => visitor.visit_type_decl(ty),
        Declaration::Datatype(dt) => visitor.visit_datatype_decl(dt),
    }
}

pub fn walk_type_decl<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast TypeDecl) {
    let TypeDecl {
        doc: _,
        name,
        modifier: _,
        extends,
        members,
        span: _,
    } = decl;
    visitor.visit_name(name);
    for parent in extends {
        visitor.visit_type_ref(parent);
    }
    for member in members {
        visitor.visit_member(member);
    }
}

pub fn walk_datatype_decl<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    decl: &'ast DatatypeDecl,
) {
    let DatatypeDecl {
        doc: _,
        name,
        datatype,
        span: _,
    } = decl;
    visitor.visit_name(name);
    visitor.visit_builtin(datatype);
}

pub fn walk_member<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, member: &'ast Member) {
    match member {
        Member::Property(p) => visitor.visit_property(p),
        Member::Association(a) => visitor.visit_association(a),
        Member::Composition(c) => visitor.visit_composition(c),
        Member::Invariant(i) => visitor.visit_invariant(i),
    }
}

pub fn walk_property<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, property: &'ast Property) {
    let Property {
        doc: _,
        name,
        datatype,
        modifier: _,
        span: _,
    } = property;
    visitor.visit_name(name);
    visitor.visit_datatype_ref(datatype);
}

pub fn walk_association<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    assoc: &'ast Association,
) {
    let Association {
        doc: _,
        name,
        multiplicity: _,
        target,
        reverse,
        body,
        span: _,
    } = assoc;
    visitor.visit_name(name);
    visitor.visit_type_ref(target);
    if let Some(reverse) = reverse {
        walk_reverse_edge(visitor, reverse);
    }
    if let Some(RelationBody {
        properties,
        span: _,
    }) = body
    {
        for property in properties {
            visitor.visit_property(property);
        }
    }
}

pub fn walk_composition<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    comp: &'ast Composition,
) {
    let Composition {
        doc: _,
        name,
        multiplicity: _,
        target,
        reverse,
        span: _,
    } = comp;
    visitor.visit_name(name);
    visitor.visit_type_ref(target);
    if let Some(reverse) = reverse {
        walk_reverse_edge(visitor, reverse);
    }
}

fn walk_reverse_edge<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, edge: &'ast ReverseEdge) {
    let ReverseEdge {
        name,
        multiplicity: _,
        span: _,
    } = edge;
    visitor.visit_name(name);
}

pub fn walk_invariant<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    invariant: &'ast Invariant,
) {
    let Invariant {
        message: _,
        constraint,
        span: _,
    } = invariant;
    visitor.visit_expr(constraint);
}

pub fn walk_datatype_ref<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    datatype: &'ast DataTypeRef,
) {
    match datatype {
        DataTypeRef::Builtin(builtin) => visitor.visit_builtin(builtin),
        DataTypeRef::Alias(type_ref) => visitor.visit_type_ref(type_ref),
    }
}

pub fn walk_builtin<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, builtin: &'ast BuiltinType) {
    if let Builtin::List { element, .. } = &builtin.builtin {
        visitor.visit_datatype_ref(element);
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Literal { .. }
        | Expr::Variable { .. }
        | Expr::Name { .. }
        | Expr::RelationName { .. }
        | Expr::DatatypeKeyword { .. } => {}
        Expr::List { elements, span: _ } => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
        Expr::Unary {
            op: _,
            operand,
            span: _,
        } => visitor.visit_expr(operand),
        Expr::Binary {
            op: _,
            left,
            right,
            span: _,
        } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Member {
            object,
            member,
            span: _,
        } => {
            visitor.visit_expr(object);
            visitor.visit_name(member);
        }
        Expr::Index {
            object,
            indices,
            span: _,
        } => {
            visitor.visit_expr(object);
            for index in indices {
                visitor.visit_expr(index);
            }
        }
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
            span: _,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(then_branch);
            visitor.visit_expr(else_branch);
        }
        Expr::Pipeline {
            subject,
            function,
            args,
            params,
            body,
            span: _,
        } => {
            visitor.visit_expr(subject);
            visitor.visit_name(function);
            for arg in args.iter().flatten() {
                visitor.visit_expr(arg);
            }
            for param in params.iter().flatten() {
                visitor.visit_name(param);
            }
            if let Some(body) = body {
                visitor.visit_expr(body);
            }
        }
    }
}

/// Every type reference in a unit, in source order: `extends` parents,
/// relation targets and named datatypes of properties.
pub fn collect_type_refs(unit: &SchemaUnit) -> Vec<&TypeRef> {
    struct Collector<'ast> {
        refs: Vec<&'ast TypeRef>,
    }

    impl<'ast> Visitor<'ast> for Collector<'ast> {
        fn visit_type_ref(&mut self, type_ref: &'ast TypeRef) {
            self.refs.push(type_ref);
        }
    }

    let mut collector = Collector { refs: Vec::new() };
    collector.visit_unit(unit);
    collector.refs
}

/// Number of invariant expression nodes in a unit.
pub fn count_expr_nodes(unit: &SchemaUnit) -> usize {
    struct Counter(usize);

    impl<'ast> Visitor<'ast> for Counter {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            self.0 += 1;
            walk_expr(self, expr);
        }
    }

    let mut counter = Counter(0);
    counter.visit_unit(unit);
    counter.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::entry::parse_str;

    fn unit(text: &str) -> SchemaUnit {
        let (_, output) = parse_str("t.yammm", text).unwrap();
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
        output.unit
    }

    #[test]
    fn collects_type_refs_in_source_order() {
        let unit = unit(
            "schema \"S\"\nimport \"lib/parts\"\ntype A extends parts.Base, Root {\n  tags List<Tag>\n  --> owner (one) Person / owns (many)\n  *-> wheels (many) parts.Wheel\n}\n",
        );
        let refs: Vec<String> = collect_type_refs(&unit).iter().map(|r| r.to_string()).collect();
        assert_eq!(refs, ["parts.Base", "Root", "Tag", "Person", "parts.Wheel"]);
    }

    #[test]
    fn counts_nested_expression_nodes() {
        let unit = unit("schema \"S\"\ntype A {\n  ! \"m\" a.b -> all |$x| { $x > 1 }\n}\n");
        // pipeline, member, name, binary, variable, literal
        assert_eq!(count_expr_nodes(&unit), 6);
    }
}
