use crate::asserter::util::AssertUtil;
use crate::asserter::violation::Reporter;
use crate::metadata::DeclarationContainer;
use crate::visitor::{KotlinMetadataVisitor, MetadataContext};

/// A container that names its owner class must have resolved it.
///
/// Applies to every root carrying a container: classes, file facades and
/// multi-file parts.
#[derive(Debug)]
pub struct DeclarationContainerIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> DeclarationContainerIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        DeclarationContainerIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for DeclarationContainerIntegrity<R> {
    fn visit_declaration_container(
        &mut self,
        ctx: &MetadataContext<'_>,
        container: &DeclarationContainer,
    ) {
        if container.owner_class_name.is_some() {
            AssertUtil::new("declaration container", ctx, &mut self.reporter)
                .report_if_null_reference(container.referenced_owner_class, "referenced owner class");
        }
    }
}
