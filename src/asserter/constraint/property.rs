use crate::asserter::util::AssertUtil;
use crate::asserter::violation::Reporter;
use crate::metadata::PropertyMetadata;
use crate::visitor::{KotlinMetadataVisitor, MetadataContext, PropertyOwner};

/// Every JVM element a property names must be resolved and still declared by
/// its claimed owner: the backing field, the getter and setter when the
/// property has them, and the synthetic `$annotations` method.
#[derive(Debug)]
pub struct PropertyIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> PropertyIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        PropertyIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for PropertyIntegrity<R> {
    fn visit_property(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: PropertyOwner<'_>,
        property: &PropertyMetadata,
    ) {
        let mut util = AssertUtil::new(format!("property {}", property.name), ctx, &mut self.reporter);

        if property.backing_field_signature.is_some() {
            util.report_if_null_reference(property.referenced_backing_field, "backing field");
            if let Some(field) = property.referenced_backing_field {
                util.report_if_field_dangling(field, "backing field");
            }
        }

        if property.flags.has_getter && property.getter_signature.is_some() {
            util.report_if_null_reference(property.referenced_getter_method, "getter");
            if let Some(method) = property.referenced_getter_method {
                util.report_if_method_dangling(method, "getter");
            }
        }

        if property.flags.has_setter && property.setter_signature.is_some() {
            util.report_if_null_reference(property.referenced_setter_method, "setter");
            if let Some(method) = property.referenced_setter_method {
                util.report_if_method_dangling(method, "setter");
            }
        }

        if property.synthetic_method_for_annotations.is_some() {
            util.report_if_null_reference(
                property.referenced_synthetic_method_for_annotations,
                "synthetic annotations method",
            );
            if let Some(method) = property.referenced_synthetic_method_for_annotations {
                util.report_if_method_dangling(method, "synthetic annotations method");
            }
        }
    }
}
