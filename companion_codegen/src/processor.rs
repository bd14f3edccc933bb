use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    AnnotationKind, Element, ElementsByAnnotation, HelloWorldProcessingStep, ProcessingEnv,
    ProcessingStep, SymEncProcessingStep,
};

/// Runs the registered steps over each round delivered by the host.
#[derive(Default)]
pub struct Processor {
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor with every step this crate provides.
    pub fn standard() -> Self {
        Self::new()
            .with_step(HelloWorldProcessingStep::default())
            .with_step(SymEncProcessingStep::default())
    }

    pub fn with_step(mut self, step: impl ProcessingStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Every annotation claimed by a registered step, in registration order.
    pub fn supported_annotations(&self) -> Vec<AnnotationKind> {
        let mut seen = HashSet::new();

        self.steps
            .iter()
            .flat_map(|step| step.annotations().iter().copied())
            .filter(|kind| seen.insert(*kind))
            .collect()
    }

    /// Run one round. Steps only run when the round holds an element for one of their
    /// annotations. Returns the elements deferred by any step.
    pub fn process_round<'e>(
        &self,
        elements_by_annotation: &'e ElementsByAnnotation,
        env: &mut ProcessingEnv<'_>,
    ) -> Vec<&'e Element> {
        let mut deferred = Vec::new();

        for step in &self.steps {
            let annotations = step.annotations();

            if !annotations
                .iter()
                .any(|kind| elements_by_annotation.contains_key(*kind))
            {
                trace!(?annotations, "no elements for step");
                continue;
            }

            for element in step.process(elements_by_annotation, env) {
                if !deferred
                    .iter()
                    .any(|existing: &&Element| std::ptr::eq(*existing, element))
                {
                    deferred.push(element);
                }
            }
        }

        debug!(
            elements = elements_by_annotation.len(),
            deferred = deferred.len(),
            "processed round"
        );

        deferred
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use proc_macro2::Span;
    use quote::quote;
    use syn::parse_quote;

    use super::*;
    use crate::{AnnotationMirror, CollectingMessager, MemoryFiler, ModulePath};

    /// Defers every element it sees, counting its invocations.
    #[derive(Default)]
    struct DeferringStep {
        calls: std::rc::Rc<Cell<usize>>,
    }

    impl ProcessingStep for DeferringStep {
        fn annotations(&self) -> &'static [AnnotationKind] {
            &[AnnotationKind::HelloWorld]
        }

        fn process<'e>(
            &self,
            elements_by_annotation: &'e ElementsByAnnotation,
            _env: &mut ProcessingEnv<'_>,
        ) -> Vec<&'e Element> {
            self.calls.set(self.calls.get() + 1);
            elements_by_annotation
                .get(AnnotationKind::HelloWorld)
                .collect()
        }
    }

    fn annotated(kind: AnnotationKind, item: syn::Item, args: proc_macro2::TokenStream) -> Element {
        Element::from_item(&item, ModulePath::default())
            .unwrap()
            .with_annotation(AnnotationMirror::parse_args(kind, Span::call_site(), args).unwrap())
    }

    #[test]
    fn standard_annotations() {
        assert_eq!(
            Processor::standard().supported_annotations(),
            [AnnotationKind::HelloWorld, AnnotationKind::SymEncrypt]
        );
    }

    #[test]
    fn supported_annotations_are_unique() {
        let processor = Processor::new()
            .with_step(DeferringStep::default())
            .with_step(HelloWorldProcessingStep::default());

        assert_eq!(
            processor.supported_annotations(),
            [AnnotationKind::HelloWorld]
        );
    }

    #[test]
    fn round_runs_matching_steps() {
        let elements = ElementsByAnnotation::from_iter([
            (
                AnnotationKind::HelloWorld,
                annotated(
                    AnnotationKind::HelloWorld,
                    parse_quote!(struct Foo;),
                    quote!("abc"),
                ),
            ),
            (
                AnnotationKind::SymEncrypt,
                annotated(AnnotationKind::SymEncrypt, parse_quote!(struct Bar;), quote!()),
            ),
        ]);

        let mut messager = CollectingMessager::default();
        let mut filer = MemoryFiler::default();

        let deferred = Processor::standard()
            .process_round(&elements, &mut ProcessingEnv::new(&mut messager, &mut filer));

        assert!(deferred.is_empty());
        assert!(messager.diagnostics().is_empty());

        let names = filer
            .units()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["self::HelloWorld", "self::BarSymEnc"]);
    }

    #[test]
    fn steps_without_elements_are_skipped() {
        let step = DeferringStep::default();
        let calls = step.calls.clone();

        let elements = ElementsByAnnotation::from_iter([(
            AnnotationKind::SymEncrypt,
            annotated(AnnotationKind::SymEncrypt, parse_quote!(struct Bar;), quote!()),
        )]);

        let mut messager = CollectingMessager::default();
        let mut filer = MemoryFiler::default();

        Processor::new()
            .with_step(step)
            .process_round(&elements, &mut ProcessingEnv::new(&mut messager, &mut filer));

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn deferred_elements_are_unioned() {
        let elements = ElementsByAnnotation::from_iter([(
            AnnotationKind::HelloWorld,
            annotated(
                AnnotationKind::HelloWorld,
                parse_quote!(struct Foo;),
                quote!("abc"),
            ),
        )]);

        let mut messager = CollectingMessager::default();
        let mut filer = MemoryFiler::default();

        let deferred = Processor::new()
            .with_step(DeferringStep::default())
            .with_step(DeferringStep::default())
            .process_round(&elements, &mut ProcessingEnv::new(&mut messager, &mut filer));

        assert_eq!(deferred.len(), 1);
        assert_eq!(deferred[0].simple_name(), "Foo");
    }
}
