//! Compile-only test to verify public API surface.
//!
//! This file serves as a compile-time contract for the public API.
//! If this file fails to compile, the public API has regressed.
//!
//! Run with: cargo test -- api_surface

// Allow unused imports - this test is about compile-time verification, not runtime usage
#![allow(unused_imports)]

// ============================================================================
// Class-file model
// ============================================================================

use kmeta::classfile::{
    access, attributes_accept, AllFieldVisitor, AllMemberVisitor, AllMethodVisitor, AndMatcher,
    Annotation, Attribute, AttributeOwner, AttributeVisitor, Class, ClassId, ClassKind,
    ClassNameFilter, ClassPool, ClassPoolError, ClassPoolResult, ClassVisitor, FixedStringMatcher,
    MatcherError, Member, MemberId, MemberKind, MemberRef, MemberVisitor, NotMatcher, OrMatcher,
    RegexMatcher, Retention, StringMatcher, SubclassFilter, KOTLIN_METADATA_TYPE,
};

// ============================================================================
// Metadata model
// ============================================================================

use kmeta::metadata::{
    ClassFlags, ClassMetadata, ClassReference, CommonFlags, ConstructorFlags, ConstructorMetadata,
    DeclarationContainer, FileFacadeMetadata, FunctionFlags, FunctionMetadata, JvmFieldSignature,
    JvmMethodSignature, KotlinAnnotation, KotlinMetadata, MetadataKind, MultiFileFacadeMetadata,
    MultiFilePartMetadata, PropertyAccessorFlags, PropertyFlags, PropertyMetadata,
    RequirementLevel, SyntheticClassKind, SyntheticClassMetadata, TypeAliasFlags,
    TypeAliasMetadata, TypeFlags, TypeMetadata, TypeParameterFlags, TypeParameterMetadata,
    ValueParameterFlags, ValueParameterMetadata, Variance, VersionRequirement,
};

// ============================================================================
// Visitor protocol
// ============================================================================

use kmeta::visitor::{
    walk_class, walk_constructor, walk_declaration_container, walk_function, walk_metadata,
    walk_property, walk_type, walk_type_alias, walk_type_parameter, walk_value_parameter,
    AnnotationOwner, FunctionOwner, KotlinMetadataVisitor, MetadataContext, MetadataNode,
    MetadataNodeCounter, NodeKind, NodeKindFilter, PropertyOwner, TypeOwner, TypeParameterOwner,
    ValueParameterOwner, VersionRequirementOwner,
};

// ============================================================================
// Fixer and asserter
// ============================================================================

use kmeta::fixer::{fix_all, fix_flags, KotlinAnnotationCounter, KotlinAnnotationFlagFixer};

use kmeta::asserter::constraint::{
    AnnotationIntegrity, ClassIntegrity, ConstructorIntegrity, DeclarationContainerIntegrity,
    FunctionIntegrity, MultiFileFacadeIntegrity, MultiFilePartIntegrity, PropertyIntegrity,
    TypeIntegrity,
};
use kmeta::asserter::{
    run_constraint, AssertUtil, AsserterConfig, ConfigError, ConfigSource, ConstraintKind,
    KotlinMetadataAsserter, Reporter, TracingReporter, Violation, ViolationKind, Violations,
    CONSTRAINTS_ENV_VAR,
};

// Crate-root re-exports
use kmeta::{
    KotlinAnnotationFlagFixer as RootFixer, KotlinMetadataAsserter as RootAsserter,
    KotlinMetadataVisitor as RootVisitor,
};

// ============================================================================
// Test
// ============================================================================

#[test]
fn api_surface_compiles() {
    // This test exists only to verify imports compile.
    // If you're here because this test broke, you may have
    // accidentally removed a public re-export.
    let _ = std::any::type_name::<ClassPool>();
    let _ = std::any::type_name::<KotlinMetadata>();
    let _ = std::any::type_name::<KotlinAnnotationFlagFixer>();
    let _ = std::any::type_name::<KotlinMetadataAsserter>();
    let _ = std::any::type_name::<Violations>();
    let _ = std::any::type_name::<NodeKindFilter<MetadataNodeCounter>>();
}

#[test]
fn constraint_names_are_stable() {
    // Constraint names are part of the configuration contract
    let names: Vec<&str> = ConstraintKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "declaration_container_integrity",
            "class_integrity",
            "function_integrity",
            "constructor_integrity",
            "property_integrity",
            "type_integrity",
            "multi_file_facade_integrity",
            "multi_file_part_integrity",
            "annotation_integrity",
        ]
    );
    assert_eq!(CONSTRAINTS_ENV_VAR, "KMETA_CONSTRAINTS");
}
