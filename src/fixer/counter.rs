//! Annotation counting over class-file attributes.

use kmeta_classfile::{
    Annotation, Attribute, AttributeOwner, AttributeVisitor, Class, ClassVisitor, Member,
    MemberVisitor,
};

/// Counts the annotations of one class or member.
///
/// The total covers every runtime visible and invisible annotation on the
/// element and its formal parameters, except `kotlin.Metadata`. Parameter
/// annotations are additionally tracked per formal-parameter index.
///
/// Reset before each element:
///
/// ```ignore
/// member.attributes_accept(class, counter.reset());
/// let annotated = counter.count() > 0;
/// ```
#[derive(Debug, Clone, Default)]
pub struct KotlinAnnotationCounter {
    count: usize,
    parameter_counts: Vec<usize>,
}

impl KotlinAnnotationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counts.
    pub fn reset(&mut self) -> &mut Self {
        self.count = 0;
        self.parameter_counts.clear();
        self
    }

    /// Number of annotations on the element, parameters included.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of annotations on formal parameter `index`. Zero for indices
    /// the element has no annotation data for.
    pub fn parameter_annotation_count(&self, index: usize) -> usize {
        self.parameter_counts.get(index).copied().unwrap_or(0)
    }
}

impl AttributeVisitor for KotlinAnnotationCounter {
    fn visit_annotations_attribute(
        &mut self,
        _owner: AttributeOwner<'_>,
        _attribute: &Attribute,
        annotations: &[Annotation],
    ) {
        self.count += annotations
            .iter()
            .filter(|annotation| !annotation.is_kotlin_metadata())
            .count();
    }

    fn visit_parameter_annotations_attribute(
        &mut self,
        _owner: AttributeOwner<'_>,
        _attribute: &Attribute,
        parameters: &[Vec<Annotation>],
    ) {
        if self.parameter_counts.len() < parameters.len() {
            self.parameter_counts.resize(parameters.len(), 0);
        }
        for (index, annotations) in parameters.iter().enumerate() {
            let counted = annotations
                .iter()
                .filter(|annotation| !annotation.is_kotlin_metadata())
                .count();
            self.parameter_counts[index] += counted;
            self.count += counted;
        }
    }

    fn visit_other_attribute(&mut self, _owner: AttributeOwner<'_>, _attribute: &Attribute) {}
}

impl ClassVisitor for KotlinAnnotationCounter {
    fn visit_any_class(&mut self, class: &Class) {
        class.attributes_accept(self);
    }
}

impl MemberVisitor for KotlinAnnotationCounter {
    fn visit_any_member(&mut self, class: &Class, member: &Member) {
        member.attributes_accept(class, self);
    }
}
