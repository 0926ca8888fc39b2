//! Shared fixtures for integration tests.
//!
//! Builds a class pool and a matching, fully resolved metadata graph for one
//! Kotlin class. Every JVM element the graph links to carries the requested
//! number of annotations.

#![allow(dead_code)]

use kmeta::classfile::{Annotation, Attribute, ClassId, ClassPool, MemberRef, KOTLIN_METADATA_TYPE};
use kmeta::metadata::{
    ClassMetadata, ConstructorMetadata, DeclarationContainer, FunctionMetadata,
    JvmFieldSignature, JvmMethodSignature, KotlinAnnotation, KotlinMetadata, PropertyFlags,
    PropertyMetadata, TypeMetadata, TypeParameterMetadata, ValueParameterMetadata,
};
use kmeta::visitor::{
    walk_metadata, FunctionOwner, KotlinMetadataVisitor, MetadataContext, PropertyOwner, TypeOwner,
    TypeParameterOwner, ValueParameterOwner,
};

pub const SAMPLE_CLASS: &str = "com/example/Sample";

/// A pool plus the metadata of one class in it.
pub struct Fixture {
    pub pool: ClassPool,
    pub class_id: ClassId,
    pub metadata: KotlinMetadata,
}

impl Fixture {
    pub fn context(&self) -> MetadataContext<'_> {
        MetadataContext::new(
            &self.pool,
            self.pool.class(self.class_id).unwrap(),
            &self.metadata,
        )
    }

    pub fn class(&self) -> &ClassMetadata {
        self.metadata.as_class().unwrap()
    }
}

/// `count` distinct annotations.
pub fn annotations(count: usize) -> Vec<Annotation> {
    (0..count)
        .map(|i| Annotation::new(format!("Lcom/example/Ann{i};")))
        .collect()
}

fn annotated_method(
    pool: &mut ClassPool,
    class: ClassId,
    name: &str,
    descriptor: &str,
    count: usize,
) -> MemberRef {
    let method = pool.add_method(class, name, descriptor).unwrap();
    if count > 0 {
        pool.add_member_attribute(method, Attribute::visible_annotations(annotations(count)))
            .unwrap();
    }
    method
}

fn annotated_parameter(pool: &mut ClassPool, method: MemberRef, count: usize) {
    if count > 0 {
        pool.add_member_attribute(
            method,
            Attribute::invisible_parameter_annotations(vec![annotations(count)]),
        )
        .unwrap();
    }
}

/// A class with a property, two functions (one with a receiver), a
/// constructor and a type parameter. Every linked element carries `count`
/// annotations, and every value parameter is decoded as annotated.
pub fn sample_class(count: usize) -> Fixture {
    let mut pool = ClassPool::new();

    let int = pool.add_library_class("kotlin/Int").unwrap();
    let string = pool.add_library_class("kotlin/String").unwrap();
    let unit = pool.add_library_class("kotlin/Unit").unwrap();
    let any = pool.add_library_class("kotlin/Any").unwrap();
    let annotation_classes: Vec<ClassId> = (0..count)
        .map(|i| pool.add_library_class(format!("com/example/Ann{i}")).unwrap())
        .collect();

    let id = pool.add_program_class(SAMPLE_CLASS).unwrap();
    let mut class_annotations = vec![Annotation::new(KOTLIN_METADATA_TYPE)];
    class_annotations.extend(annotations(count));
    pool.add_class_attribute(id, Attribute::visible_annotations(class_annotations))
        .unwrap();

    let field = pool.add_field(id, "count", "I").unwrap();
    let getter = annotated_method(&mut pool, id, "getCount", "()I", count);
    let setter = annotated_method(&mut pool, id, "setCount", "(I)V", count);
    annotated_parameter(&mut pool, setter, count);
    let synthetic = annotated_method(&mut pool, id, "getCount$annotations", "()V", count);
    let run = annotated_method(&mut pool, id, "run", "(Ljava/lang/String;)V", count);
    annotated_parameter(&mut pool, run, count);
    let ext = annotated_method(&mut pool, id, "ext", "(Ljava/lang/String;)V", 0);
    annotated_parameter(&mut pool, ext, count);
    let init = annotated_method(&mut pool, id, "<init>", "(I)V", count);
    annotated_parameter(&mut pool, init, count);

    let int_type = || TypeMetadata::class("kotlin/Int", Some(int));
    let string_type = || TypeMetadata::class("kotlin/String", Some(string));
    let unit_type = || TypeMetadata::class("kotlin/Unit", Some(unit));
    let kotlin_annotations = || -> Vec<KotlinAnnotation> {
        annotation_classes
            .iter()
            .enumerate()
            .map(|(i, class)| KotlinAnnotation::new(format!("com/example/Ann{i}"), Some(*class)))
            .collect()
    };
    let decoded_annotated = |index: usize, name: &str, ty: TypeMetadata| {
        let parameter = ValueParameterMetadata::new(index, name, ty);
        parameter.flags.common.set_has_annotations(true);
        parameter
    };

    let property = PropertyMetadata {
        name: "count".to_string(),
        flags: PropertyFlags {
            is_var: true,
            has_getter: true,
            has_setter: true,
            ..Default::default()
        },
        backing_field_signature: Some(JvmFieldSignature::new("count", "I")),
        referenced_backing_field: Some(field),
        getter_signature: Some(JvmMethodSignature::new("getCount", "()I")),
        referenced_getter_method: Some(getter),
        setter_signature: Some(JvmMethodSignature::new("setCount", "(I)V")),
        referenced_setter_method: Some(setter),
        synthetic_method_for_annotations: Some(JvmMethodSignature::new(
            "getCount$annotations",
            "()V",
        )),
        referenced_synthetic_method_for_annotations: Some(synthetic),
        ty: int_type(),
        setter_parameters: vec![decoded_annotated(0, "value", int_type())],
        ..Default::default()
    };

    let mut annotated_return = unit_type();
    annotated_return.annotations = kotlin_annotations();
    let run_function = FunctionMetadata {
        name: "run".to_string(),
        jvm_signature: Some(JvmMethodSignature::new("run", "(Ljava/lang/String;)V")),
        referenced_method: Some(run),
        value_parameters: vec![decoded_annotated(0, "input", string_type())],
        return_type: annotated_return,
        ..Default::default()
    };
    let ext_function = FunctionMetadata {
        name: "ext".to_string(),
        jvm_signature: Some(JvmMethodSignature::new("ext", "(Ljava/lang/String;)V")),
        referenced_method: Some(ext),
        receiver_type: Some(string_type()),
        return_type: unit_type(),
        ..Default::default()
    };

    let constructor = ConstructorMetadata {
        jvm_signature: Some(JvmMethodSignature::new("<init>", "(I)V")),
        referenced_method: Some(init),
        value_parameters: vec![decoded_annotated(0, "count", int_type())],
        ..Default::default()
    };

    let metadata = KotlinMetadata::Class(ClassMetadata {
        class_name: SAMPLE_CLASS.to_string(),
        referenced_class: Some(id),
        container: DeclarationContainer {
            owner_class_name: Some(SAMPLE_CLASS.to_string()),
            referenced_owner_class: Some(id),
            properties: vec![property],
            functions: vec![run_function, ext_function],
            ..Default::default()
        },
        supertypes: vec![TypeMetadata::class("kotlin/Any", Some(any))],
        type_parameters: vec![TypeParameterMetadata {
            name: "T".to_string(),
            annotations: kotlin_annotations(),
            ..Default::default()
        }],
        constructors: vec![constructor],
        ..Default::default()
    });

    Fixture {
        pool,
        class_id: id,
        metadata,
    }
}

/// Every `has_annotations` flag in the graph, in walk order.
pub fn annotation_flags(fixture: &Fixture) -> Vec<(String, bool)> {
    let mut recorder = FlagRecorder::default();
    walk_metadata(&fixture.context(), &mut recorder);
    recorder.flags
}

#[derive(Default)]
struct FlagRecorder {
    flags: Vec<(String, bool)>,
}

impl FlagRecorder {
    fn record(&mut self, label: String, has_annotations: bool) {
        self.flags.push((label, has_annotations));
    }
}

impl KotlinMetadataVisitor for FlagRecorder {
    fn visit_class(&mut self, _ctx: &MetadataContext<'_>, class: &ClassMetadata) {
        self.record(
            format!("class {}", class.class_name),
            class.flags.common.has_annotations(),
        );
    }

    fn visit_property(
        &mut self,
        _ctx: &MetadataContext<'_>,
        _owner: PropertyOwner<'_>,
        property: &PropertyMetadata,
    ) {
        let name = &property.name;
        self.record(format!("property {name}"), property.flags.common.has_annotations());
        self.record(format!("getter {name}"), property.getter_flags.common.has_annotations());
        self.record(format!("setter {name}"), property.setter_flags.common.has_annotations());
    }

    fn visit_function(
        &mut self,
        _ctx: &MetadataContext<'_>,
        _owner: FunctionOwner<'_>,
        function: &FunctionMetadata,
    ) {
        self.record(
            format!("function {}", function.name),
            function.flags.common.has_annotations(),
        );
    }

    fn visit_constructor(
        &mut self,
        _ctx: &MetadataContext<'_>,
        _class: &ClassMetadata,
        constructor: &ConstructorMetadata,
    ) {
        self.record("constructor".to_string(), constructor.flags.common.has_annotations());
    }

    fn visit_type(&mut self, _ctx: &MetadataContext<'_>, _owner: TypeOwner<'_>, ty: &TypeMetadata) {
        let name = ty.class_name.as_deref().unwrap_or("?");
        self.record(format!("type {name}"), ty.flags.common.has_annotations());
    }

    fn visit_type_parameter(
        &mut self,
        _ctx: &MetadataContext<'_>,
        _owner: TypeParameterOwner<'_>,
        parameter: &TypeParameterMetadata,
    ) {
        self.record(
            format!("type parameter {}", parameter.name),
            parameter.flags.common.has_annotations(),
        );
    }

    fn visit_value_parameter(
        &mut self,
        _ctx: &MetadataContext<'_>,
        _owner: ValueParameterOwner<'_>,
        parameter: &ValueParameterMetadata,
    ) {
        self.record(
            format!("value parameter {}", parameter.name),
            parameter.flags.common.has_annotations(),
        );
    }
}
