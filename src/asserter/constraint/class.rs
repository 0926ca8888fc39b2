use crate::asserter::util::AssertUtil;
use crate::asserter::violation::Reporter;
use crate::metadata::ClassMetadata;
use crate::visitor::{KotlinMetadataVisitor, MetadataContext};

/// A class must resolve itself, its companion object, its nested classes and
/// its sealed subclasses.
#[derive(Debug)]
pub struct ClassIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> ClassIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        ClassIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for ClassIntegrity<R> {
    fn visit_class(&mut self, ctx: &MetadataContext<'_>, class: &ClassMetadata) {
        let mut util = AssertUtil::new(format!("class {}", class.class_name), ctx, &mut self.reporter);

        util.report_if_null_reference(class.referenced_class, "referenced class");

        if let Some(companion) = &class.companion_object {
            util.report_if_null_reference(
                companion.referenced_class,
                &format!("companion object {}", companion.name),
            );
        }
        for nested in &class.nested_classes {
            util.report_if_null_reference(
                nested.referenced_class,
                &format!("nested class {}", nested.name),
            );
        }
        for subclass in &class.sealed_subclasses {
            util.report_if_null_reference(
                subclass.referenced_class,
                &format!("sealed subclass {}", subclass.name),
            );
        }
    }
}
