use crate::asserter::util::AssertUtil;
use crate::asserter::violation::Reporter;
use crate::metadata::{KotlinAnnotation, TypeMetadata};
use crate::visitor::{AnnotationOwner, KotlinMetadataVisitor, MetadataContext, TypeOwner};

/// A type naming a class must have resolved it.
#[derive(Debug)]
pub struct TypeIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> TypeIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        TypeIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for TypeIntegrity<R> {
    fn visit_type(&mut self, ctx: &MetadataContext<'_>, _owner: TypeOwner<'_>, ty: &TypeMetadata) {
        if let Some(class_name) = &ty.class_name {
            AssertUtil::new(format!("type {class_name}"), ctx, &mut self.reporter)
                .report_if_null_reference(ty.referenced_class, "referenced class");
        }
    }
}

/// An annotation must have resolved its annotation class.
#[derive(Debug)]
pub struct AnnotationIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> AnnotationIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        AnnotationIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for AnnotationIntegrity<R> {
    fn visit_annotation(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: AnnotationOwner<'_>,
        annotation: &KotlinAnnotation,
    ) {
        AssertUtil::new(format!("annotation {}", annotation.class_name), ctx, &mut self.reporter)
            .report_if_null_reference(annotation.referenced_annotation_class, "annotation class");
    }
}
