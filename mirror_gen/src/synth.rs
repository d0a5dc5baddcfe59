/* Accessor synthesis - plan reader/writer routes for every field */

use crate::analyzer::analyze;
use crate::errors::AnalyzeError;
use mirror_types::{
    AccessPath, AccessorPlan, AccessorTable, FieldDescriptor, OwnerSemantics, TypeDecl,
};
use tracing::debug;

/// Builds the accessor table for an owner from its field descriptors.
///
/// Value-semantics owners route both closures through a lease of the whole
/// owner so that writes land in the original storage rather than a copy.
/// Reference-semantics owners capture a shared reference directly.
pub fn synthesize(
    owner: &str,
    descriptors: &[FieldDescriptor],
    semantics: OwnerSemantics,
) -> AccessorTable {
    let path = AccessPath::for_semantics(semantics);

    let plans = descriptors
        .iter()
        .map(|descriptor| AccessorPlan {
            name: descriptor.name.clone(),
            access: descriptor.access.clone(),
            reader: path,
            writer: (!descriptor.is_readonly).then_some(path),
        })
        .collect::<Vec<_>>();

    debug!(
        owner,
        ?semantics,
        fields = plans.len(),
        "synthesized accessor table"
    );

    AccessorTable {
        owner: owner.to_string(),
        semantics,
        plans,
    }
}

/// Analyzes a declaration and synthesizes its table in one step.
pub fn synthesize_type(decl: &TypeDecl) -> Result<AccessorTable, AnalyzeError> {
    let descriptors = analyze(&decl.members)?;
    Ok(synthesize(&decl.name, &descriptors, decl.kind.semantics()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_types::{BindingKeyword, DeclKind, MemberDecl, VariableDecl};

    fn product(kind: DeclKind) -> TypeDecl {
        TypeDecl {
            name: "Product".into(),
            kind,
            members: vec![
                MemberDecl::Variable(VariableDecl::stored(
                    BindingKeyword::Let,
                    "model_name",
                    Some("String"),
                )),
                MemberDecl::Variable(VariableDecl::stored(
                    BindingKeyword::Var,
                    "price",
                    Some("i64"),
                )),
                MemberDecl::Function {
                    name: "introduce".into(),
                },
            ],
        }
    }

    #[test]
    fn value_owner_routes_through_lease() {
        let table = synthesize_type(&product(DeclKind::Struct)).unwrap();
        assert_eq!(table.semantics, OwnerSemantics::Value);
        assert_eq!(
            table.enumerate().collect::<Vec<_>>(),
            vec!["model_name", "price"]
        );

        let name = table.lookup("model_name").unwrap();
        assert_eq!(name.reader, AccessPath::Lease);
        assert!(name.is_readonly());

        let price = table.lookup("price").unwrap();
        assert_eq!(price.writer, Some(AccessPath::Lease));
    }

    #[test]
    fn reference_owner_routes_through_shared_reference() {
        let table = synthesize_type(&product(DeclKind::Class)).unwrap();
        assert_eq!(table.semantics, OwnerSemantics::Reference);
        for plan in &table.plans {
            assert_eq!(plan.reader, AccessPath::Shared);
        }
        assert_eq!(
            table.lookup("price").unwrap().writer,
            Some(AccessPath::Shared)
        );
    }

    #[test]
    fn writer_absent_exactly_when_readonly() {
        let descriptors = analyze(&product(DeclKind::Struct).members).unwrap();
        let table = synthesize("Product", &descriptors, OwnerSemantics::Value);
        for (descriptor, plan) in descriptors.iter().zip(&table.plans) {
            assert_eq!(descriptor.is_readonly, plan.writer.is_none());
        }
        assert!(table.lookup("introduce").is_none());
    }
}
