/* Field analysis - classify each field member of a declaration list */

use crate::errors::AnalyzeError;
use mirror_types::{
    BindingKeyword, BindingPattern, FieldAccess, FieldDescriptor, MemberDecl, PatternBinding,
    VariableDecl,
};
use tracing::{debug, trace};

/// Walks a member list once and returns one descriptor per field member,
/// preserving declaration order. Functions, nested types and enum cases are
/// skipped.
pub fn analyze(members: &[MemberDecl]) -> Result<Vec<FieldDescriptor>, AnalyzeError> {
    let mut descriptors = Vec::with_capacity(members.len());

    for member in members {
        let MemberDecl::Variable(var) = member else {
            trace!(member = %member.label(), "skipping non-field member");
            continue;
        };
        let descriptor = analyze_variable(var, member)?;
        trace!(
            field = %descriptor.name,
            readonly = descriptor.is_readonly,
            "analyzed field"
        );
        descriptors.push(descriptor);
    }

    debug!(
        members = members.len(),
        fields = descriptors.len(),
        "field analysis complete"
    );
    Ok(descriptors)
}

fn analyze_variable(
    var: &VariableDecl,
    member: &MemberDecl,
) -> Result<FieldDescriptor, AnalyzeError> {
    let binding = match var.bindings.as_slice() {
        [binding] => binding,
        [] => {
            return Err(AnalyzeError::UnsupportedDeclarationKind {
                member: member.label(),
                reason: "expected exactly one binding, found none",
            })
        }
        _ => {
            return Err(AnalyzeError::UnsupportedDeclarationKind {
                member: member.label(),
                reason: "expected exactly one binding per declaration",
            })
        }
    };

    let BindingPattern::Identifier { name } = &binding.pattern else {
        return Err(AnalyzeError::UnsupportedDeclarationKind {
            member: member.label(),
            reason: "binding pattern is not a simple name",
        });
    };

    let access = match &binding.accessor_block {
        None => FieldAccess::Stored {
            type_annotation: binding.type_annotation.clone(),
        },
        Some(block) => FieldAccess::Computed {
            getter: block.getter().and_then(|g| g.implementation.clone()),
            setter: block.setter().and_then(|s| s.implementation.clone()),
        },
    };

    Ok(FieldDescriptor {
        name: name.clone(),
        is_readonly: is_readonly_field(var.keyword, binding),
        access,
    })
}

/// Readonly policy, applied in order:
/// `let` bindings are readonly; plain storage is read-write; an accessor
/// block is read-write only when it defines a setter.
pub fn is_readonly_field(keyword: BindingKeyword, binding: &PatternBinding) -> bool {
    if keyword == BindingKeyword::Let {
        return true;
    }

    match &binding.accessor_block {
        None => false,
        Some(block) => !block.has_setter(),
    }
}
