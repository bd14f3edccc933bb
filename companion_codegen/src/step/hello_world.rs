use tracing::{debug, debug_span, warn};

use super::{ElementsByAnnotation, ProcessingEnv, ProcessingStep};
use crate::{
    AnnotationKind, Diagnostic, Element, HelloWorldGenerator, HelloWorldPara,
    SourceFileGenerator, types_in,
};

/// Emits one `HelloWorld` unit for every value of every `hello_world` annotation.
#[derive(Clone, Debug, Default)]
pub struct HelloWorldProcessingStep {
    generator: SourceFileGenerator<HelloWorldGenerator>,
}

impl HelloWorldProcessingStep {
    pub fn new(generator: SourceFileGenerator<HelloWorldGenerator>) -> Self {
        Self { generator }
    }
}

impl ProcessingStep for HelloWorldProcessingStep {
    fn annotations(&self) -> &'static [AnnotationKind] {
        &[AnnotationKind::HelloWorld]
    }

    fn process<'e>(
        &self,
        elements_by_annotation: &'e ElementsByAnnotation,
        env: &mut ProcessingEnv<'_>,
    ) -> Vec<&'e Element> {
        for element in types_in(elements_by_annotation.get(AnnotationKind::HelloWorld)) {
            let _span = debug_span!("hello_world", element = %element.ident()).entered();

            let Some(mirror) = element.get_annotation_mirror(AnnotationKind::HelloWorld) else {
                debug!("no annotation mirror, skipping");
                continue;
            };

            for entry in mirror.entries() {
                let Some(para) = entry.value().as_str() else {
                    env.messager.print_message(Diagnostic::error(
                        format!("`{}` expects a string literal", entry.name()),
                        Some(entry.value().span()),
                    ));
                    continue;
                };

                let para = match HelloWorldPara::builder()
                    .set_type_element(element)
                    .set_para(para.value())
                    .build()
                {
                    Ok(para) => para,
                    Err(e) => {
                        env.messager
                            .print_message(Diagnostic::error(e.to_string(), Some(element.span())));
                        continue;
                    }
                };

                if let Err(e) = self.generator.generate(para, env.filer) {
                    warn!(error = %e, "generation failed");
                    e.print_message_to(env.messager);
                }
            }
        }

        Vec::new()
    }
}
