//! Schema validation boundary.
//!
//! Externally edited documents pass through a validator before the
//! model accepts them. The full schema lives with a collaborator; the
//! model consumes it behind the [`Validator`] trait and ships a basic
//! structural check for the constraints it depends on itself.

use thiserror::Error;

use crate::{
    hint::{HintKind, RawHint},
    identifier::Identifier,
};

/// A rejected document, with the validator's message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Document validation, consumed as a black box.
pub trait Validator {
    fn validate(&self, nodes: &[RawHint]) -> Result<(), ValidationError>;
}

/// Structural checks the model itself relies on: reference shape per
/// hint kind, applied recursively.
#[derive(Copy, Clone, Debug, Default)]
pub struct BasicSchema;

impl Validator for BasicSchema {
    fn validate(&self, nodes: &[RawHint]) -> Result<(), ValidationError> {
        for node in nodes {
            check(node)?;
        }
        Ok(())
    }
}

fn check(node: &RawHint) -> Result<(), ValidationError> {
    match (&node.kind, &node.reference) {
        (HintKind::Anchor, Some(_)) => {
            return Err(ValidationError::new("anchor hints take no reference"));
        }
        (HintKind::Interpolate, Some(Identifier::List(items))) if items.len() != 2 => {
            return Err(ValidationError::new(format!(
                "interpolation needs two reference points, found {}",
                items.len()
            )));
        }
        (HintKind::Interpolate, Some(reference)) if reference.is_scalar() => {
            return Err(ValidationError::new(
                "interpolation needs two reference points, found one",
            ));
        }
        _ => {}
    }
    for child in &node.children {
        check(child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_with_reference_rejected() {
        let nodes = vec![RawHint::new(HintKind::Anchor, 1u16).with_reference(2u16)];
        assert!(BasicSchema.validate(&nodes).is_err());
    }

    #[test]
    fn test_interpolate_arity() {
        let one_ref = vec![RawHint::new(HintKind::Interpolate, 5u16).with_reference(2u16)];
        assert!(BasicSchema.validate(&one_ref).is_err());

        let two_refs = vec![RawHint::new(HintKind::Interpolate, 5u16)
            .with_reference(Identifier::list([Identifier::Index(2), Identifier::Index(8)]))];
        assert!(BasicSchema.validate(&two_refs).is_ok());
    }

    #[test]
    fn test_nested_children_checked() {
        let nodes = vec![RawHint::new(HintKind::Anchor, 1u16)
            .with_child(RawHint::new(HintKind::Anchor, 2u16).with_reference(1u16))];
        assert!(BasicSchema.validate(&nodes).is_err());
    }
}
