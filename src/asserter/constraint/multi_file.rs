use crate::asserter::util::AssertUtil;
use crate::asserter::violation::Reporter;
use crate::metadata::{MultiFileFacadeMetadata, MultiFilePartMetadata};
use crate::visitor::{KotlinMetadataVisitor, MetadataContext};

/// A multi-file facade must resolve every part class it lists.
#[derive(Debug)]
pub struct MultiFileFacadeIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> MultiFileFacadeIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        MultiFileFacadeIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for MultiFileFacadeIntegrity<R> {
    fn visit_multi_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &MultiFileFacadeMetadata) {
        let mut util = AssertUtil::new("multi-file facade", ctx, &mut self.reporter);
        for part in &facade.part_classes {
            util.report_if_null_reference(part.referenced_class, &format!("part class {}", part.name));
        }
    }
}

/// A multi-file part must resolve its facade class.
#[derive(Debug)]
pub struct MultiFilePartIntegrity<R> {
    reporter: R,
}

impl<R: Reporter> MultiFilePartIntegrity<R> {
    pub fn new(reporter: R) -> Self {
        MultiFilePartIntegrity { reporter }
    }

    pub fn into_inner(self) -> R {
        self.reporter
    }
}

impl<R: Reporter> KotlinMetadataVisitor for MultiFilePartIntegrity<R> {
    fn visit_multi_file_part(&mut self, ctx: &MetadataContext<'_>, part: &MultiFilePartMetadata) {
        AssertUtil::new("multi-file part", ctx, &mut self.reporter)
            .report_if_null_reference(part.referenced_facade_class, "facade class");
    }
}
