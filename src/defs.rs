//! Serde-friendly type descriptions.
//!
//! These shapes exist so a type spec can be shipped as data (for example a
//! JSON file next to a P4 table definition) and compiled into core types.
//! They deliberately carry no cached widths; conversion rebuilds the tree
//! through the ordinary constructors, so every invariant check still runs.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::BufError;
use crate::type_spec::{StructSpec, TupleSpec, TypeSpec};

/// Declarative mirror of [TypeSpec]. Struct members are `[name, spec]`
/// pairs so declaration order survives serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSpecDef {
    Bit(usize),
    Struct(Vec<(SmolStr, TypeSpecDef)>),
    Tuple(Vec<TypeSpecDef>),
}

impl TryFrom<TypeSpecDef> for TypeSpec {
    type Error = BufError;

    /// Fails on duplicate struct member names, like direct construction.
    fn try_from(def: TypeSpecDef) -> Result<Self, BufError> {
        Ok(match def {
            TypeSpecDef::Bit(width) => TypeSpec::Bit(width),
            TypeSpecDef::Struct(members) => {
                let mut spec = StructSpec::new();
                for (name, child) in members {
                    spec.add(name, TypeSpec::try_from(child)?)?;
                }
                TypeSpec::Struct(spec)
            }
            TypeSpecDef::Tuple(members) => {
                let mut spec = TupleSpec::new();
                for child in members {
                    spec.add(TypeSpec::try_from(child)?);
                }
                TypeSpec::Tuple(spec)
            }
        })
    }
}

impl From<&TypeSpec> for TypeSpecDef {
    fn from(spec: &TypeSpec) -> Self {
        match spec {
            TypeSpec::Bit(width) => TypeSpecDef::Bit(*width),
            TypeSpec::Struct(spec) => TypeSpecDef::Struct(
                spec.members()
                    .map(|(name, child)| (SmolStr::from(name), TypeSpecDef::from(child)))
                    .collect(),
            ),
            TypeSpec::Tuple(spec) => {
                TypeSpecDef::Tuple(spec.members().map(TypeSpecDef::from).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_preserves_order() {
        let json = r#"{"struct": [
            ["s0", {"struct": [["a", {"bit": 1}], ["b", {"bit": 2}]]}],
            ["c", {"bit": 3}],
            ["d", {"bit": 4}]
        ]}"#;

        let def: TypeSpecDef = serde_json::from_str(json).unwrap();
        let spec = TypeSpec::try_from(def).unwrap();
        assert_eq!(spec.bitwidth(), 10);
        assert_eq!(spec.view("s0").unwrap().bitwidth(), 3);

        let back = serde_json::to_string(&TypeSpecDef::from(&spec)).unwrap();
        let reparsed: TypeSpecDef = serde_json::from_str(&back).unwrap();
        assert_eq!(TypeSpec::try_from(reparsed).unwrap(), spec);
    }

    #[test]
    fn test_duplicate_member_in_def_is_rejected() {
        let json = r#"{"struct": [["a", {"bit": 1}], ["a", {"bit": 2}]]}"#;
        let def: TypeSpecDef = serde_json::from_str(json).unwrap();
        assert_eq!(
            TypeSpec::try_from(def).unwrap_err(),
            BufError::DuplicateMember("a".into())
        );
    }

    #[test]
    fn test_tuple_def_converts() {
        let json = r#"{"tuple": [{"bit": 3}, {"bit": 5}]}"#;
        let def: TypeSpecDef = serde_json::from_str(json).unwrap();
        let spec = TypeSpec::try_from(def).unwrap();
        assert_eq!(spec.bitwidth(), 8);
        assert_eq!(spec.view_index(1).unwrap().bitwidth(), 5);
    }
}
