//! Flag bundles attached to metadata nodes.
//!
//! Every bundle embeds [`CommonFlags`], whose `has_annotations` bit is derived
//! from the class pool and recomputed in place by the flag fixer. That bit is
//! a [`Cell`] so the fixer can update it while the graph is only borrowed
//! shared, which is what the visitor protocol hands out. All other flags are
//! decoded once and never change.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// Flags every node kind carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonFlags {
    has_annotations: Cell<bool>,
}

impl CommonFlags {
    /// Create flags with the given decoded `has_annotations` value.
    pub fn new(has_annotations: bool) -> Self {
        CommonFlags {
            has_annotations: Cell::new(has_annotations),
        }
    }

    pub fn has_annotations(&self) -> bool {
        self.has_annotations.get()
    }

    pub fn set_has_annotations(&self, value: bool) {
        self.has_annotations.set(value);
    }
}

/// Flags of a class root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFlags {
    pub common: CommonFlags,
    /// The class is an `annotation class`.
    #[serde(default)]
    pub is_annotation_class: bool,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub is_enum_class: bool,
    #[serde(default)]
    pub is_companion_object: bool,
    #[serde(default)]
    pub is_data: bool,
}

/// Flags of a constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorFlags {
    pub common: CommonFlags,
    #[serde(default)]
    pub is_primary: bool,
}

/// Flags of a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFlags {
    pub common: CommonFlags,
    #[serde(default)]
    pub is_suspend: bool,
    #[serde(default)]
    pub is_inline: bool,
    #[serde(default)]
    pub is_operator: bool,
}

/// Flags of a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFlags {
    pub common: CommonFlags,
    #[serde(default)]
    pub is_var: bool,
    #[serde(default)]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_delegated: bool,
}

/// Flags of a property getter or setter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessorFlags {
    pub common: CommonFlags,
    /// The accessor is the compiler-generated default.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_inline: bool,
}

/// Flags of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFlags {
    pub common: CommonFlags,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_suspend: bool,
}

/// Flags of a type parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterFlags {
    pub common: CommonFlags,
    #[serde(default)]
    pub is_reified: bool,
}

/// Flags of a type alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasFlags {
    pub common: CommonFlags,
}

/// Flags of a value parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueParameterFlags {
    pub common: CommonFlags,
    #[serde(default)]
    pub declares_default_value: bool,
    #[serde(default)]
    pub is_crossinline: bool,
    #[serde(default)]
    pub is_noinline: bool,
}
