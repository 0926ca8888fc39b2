use crate::asserter::util::AssertUtil;
use crate::asserter::violation::Reporter;
use crate::metadata::{ClassMetadata, ConstructorMetadata, FunctionMetadata};
use crate::visitor::{FunctionOwner, KotlinMetadataVisitor, MetadataContext};

/// A function with a JVM signature must reference a method that its claimed
/// owner still declares.
#[derive(Debug)]
pub struct FunctionIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> FunctionIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        FunctionIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for FunctionIntegrity<R> {
    fn visit_function(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: FunctionOwner<'_>,
        function: &FunctionMetadata,
    ) {
        if function.jvm_signature.is_none() {
            return;
        }

        let mut util = AssertUtil::new(format!("function {}", function.name), ctx, &mut self.reporter);
        util.report_if_null_reference(function.referenced_method, "referenced method");
        if let Some(method) = function.referenced_method {
            util.report_if_method_dangling(method, "referenced method");
        }
    }
}

/// Same as [`FunctionIntegrity`], for constructors.
///
/// Constructors of annotation classes are not checked; they have no
/// constructor method to reference.
#[derive(Debug)]
pub struct ConstructorIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> ConstructorIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        ConstructorIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for ConstructorIntegrity<R> {
    fn visit_constructor(
        &mut self,
        ctx: &MetadataContext<'_>,
        class: &ClassMetadata,
        constructor: &ConstructorMetadata,
    ) {
        if class.flags.is_annotation_class || constructor.jvm_signature.is_none() {
            return;
        }

        let mut util = AssertUtil::new("constructor", ctx, &mut self.reporter);
        util.report_if_null_reference(constructor.referenced_method, "referenced method");
        if let Some(method) = constructor.referenced_method {
            util.report_if_method_dangling(method, "referenced method");
        }
    }
}
