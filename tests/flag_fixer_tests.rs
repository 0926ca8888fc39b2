//! Integration tests for the annotation flag fixer.
//!
//! Every flag is compared against the annotations actually present in the
//! class pool, for graphs whose linked elements carry zero, one and several
//! annotations.

mod common;

use common::{annotation_flags, annotations, sample_class, Fixture};
use kmeta::classfile::{access, Attribute};
use kmeta::fixer::{fix_flags, KotlinAnnotationFlagFixer};
use kmeta::metadata::KotlinMetadata;

fn fix(fixture: &Fixture) -> usize {
    fix_flags(&fixture.pool, fixture.class_id, &fixture.metadata)
}

#[test]
fn test_flags_match_ground_truth() {
    for count in [0, 1, 3] {
        let fixture = sample_class(count);
        fix(&fixture);

        let expected = count > 0;
        let class = fixture.class();
        let property = &class.container.properties[0];
        let run = &class.container.functions[0];
        let ext = &class.container.functions[1];
        let constructor = &class.constructors[0];

        assert_eq!(class.flags.common.has_annotations(), expected, "class, count {count}");
        assert_eq!(property.flags.common.has_annotations(), expected, "property, count {count}");
        assert_eq!(property.getter_flags.common.has_annotations(), expected, "getter, count {count}");
        assert_eq!(property.setter_flags.common.has_annotations(), expected, "setter, count {count}");
        assert_eq!(
            property.setter_parameters[0].flags.common.has_annotations(),
            expected,
            "setter parameter, count {count}"
        );
        assert_eq!(run.flags.common.has_annotations(), expected, "run, count {count}");
        assert_eq!(
            run.value_parameters[0].flags.common.has_annotations(),
            expected,
            "run parameter, count {count}"
        );
        assert_eq!(run.return_type.flags.common.has_annotations(), expected, "return type, count {count}");
        // ext carries parameter annotations only
        assert_eq!(ext.flags.common.has_annotations(), expected, "ext, count {count}");
        assert_eq!(
            ext.receiver_type.as_ref().unwrap().flags.common.has_annotations(),
            expected,
            "receiver type, count {count}"
        );
        assert_eq!(constructor.flags.common.has_annotations(), expected, "constructor, count {count}");
        assert_eq!(
            constructor.value_parameters[0].flags.common.has_annotations(),
            expected,
            "constructor parameter, count {count}"
        );
        assert_eq!(
            class.type_parameters[0].flags.common.has_annotations(),
            expected,
            "type parameter, count {count}"
        );

        // never annotated in the fixture
        assert!(!property.ty.flags.common.has_annotations());
        assert!(!class.supertypes[0].flags.common.has_annotations());
    }
}

#[test]
fn test_stale_true_flags_are_cleared() {
    let fixture = sample_class(0);
    let class = fixture.class();
    class.flags.common.set_has_annotations(true);
    class.container.functions[0].flags.common.set_has_annotations(true);
    class.supertypes[0].flags.common.set_has_annotations(true);
    class.container.properties[0]
        .getter_flags
        .common
        .set_has_annotations(true);

    fix(&fixture);

    assert!(annotation_flags(&fixture).iter().all(|(_, flag)| !flag));
}

#[test]
fn test_fixer_is_idempotent() {
    for count in [0, 1, 3] {
        let fixture = sample_class(count);

        fix(&fixture);
        let first = annotation_flags(&fixture);
        fix(&fixture);
        let second = annotation_flags(&fixture);

        assert_eq!(first, second, "count {count}");
    }
}

#[test]
fn test_kotlin_metadata_annotation_is_not_counted() {
    // The class carries only kotlin.Metadata.
    let fixture = sample_class(0);
    fixture.class().flags.common.set_has_annotations(true);

    fix(&fixture);

    assert!(!fixture.class().flags.common.has_annotations());
}

#[test]
fn test_annotation_class_constructor_is_never_annotated() {
    let mut fixture = sample_class(2);
    fixture.pool.class_mut(fixture.class_id).unwrap().access_flags |=
        access::ANNOTATION | access::INTERFACE;
    if let KotlinMetadata::Class(class) = &mut fixture.metadata {
        class.flags.is_annotation_class = true;
    }

    fix(&fixture);

    let constructor = &fixture.class().constructors[0];
    assert!(!constructor.flags.common.has_annotations());
    // Parameters of an annotation class constructor keep their decoded flag.
    assert!(constructor.value_parameters[0].flags.common.has_annotations());
}

#[test]
fn test_value_parameter_is_never_promoted() {
    let fixture = sample_class(2);
    let run = &fixture.class().container.functions[0];
    run.value_parameters[0].flags.common.set_has_annotations(false);

    fix(&fixture);

    assert!(!run.value_parameters[0].flags.common.has_annotations());
}

#[test]
fn test_parameter_annotations_are_read_at_the_parameter_index() {
    let mut fixture = sample_class(0);
    let run = fixture.class().container.functions[0].referenced_method.unwrap();
    // Only the second parameter is annotated; the fixture parameter has index 0.
    fixture
        .pool
        .add_member_attribute(
            run,
            Attribute::visible_parameter_annotations(vec![vec![], annotations(1)]),
        )
        .unwrap();

    fix(&fixture);

    let parameter = &fixture.class().container.functions[0].value_parameters[0];
    assert!(!parameter.flags.common.has_annotations());
}

#[test]
fn test_parameter_annotations_mark_the_function_annotated() {
    let mut fixture = sample_class(0);
    let run = fixture.class().container.functions[0].referenced_method.unwrap();
    fixture
        .pool
        .add_member_attribute(run, Attribute::visible_parameter_annotations(vec![annotations(1)]))
        .unwrap();

    fix(&fixture);

    let function = &fixture.class().container.functions[0];
    assert!(function.flags.common.has_annotations());
    assert!(function.value_parameters[0].flags.common.has_annotations());
}

#[test]
fn test_removed_member_counts_as_unannotated() {
    let mut fixture = sample_class(1);
    let getter = fixture.class().container.properties[0]
        .referenced_getter_method
        .unwrap();
    fixture.pool.replace_member(getter).unwrap();

    fix(&fixture);

    let property = &fixture.class().container.properties[0];
    assert!(!property.getter_flags.common.has_annotations());
    assert!(property.setter_flags.common.has_annotations());
}

#[test]
fn test_fixer_reports_written_flags() {
    let fixture = sample_class(1);
    let mut fixer = KotlinAnnotationFlagFixer::new();

    fixture.metadata.accept(&fixture.context(), &mut fixer);

    // Flags recomputed from ground truth plus value parameters re-checked.
    assert!(fixer.flags_written() > 0);
    assert_eq!(fixer.flags_written(), fix(&fixture));
}
