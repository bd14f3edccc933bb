use tracing::{debug, debug_span, warn};

use super::{ElementsByAnnotation, ExtractError, ProcessingEnv, ProcessingStep};
use crate::{
    AnnotationKind, Diagnostic, Element, EntryError, SourceFileGenerator, SymEncEntry,
    SymEncGenerator, SymEncPara, SymEncValidator, types_in,
};

/// Validates every `sym_encrypt` element, and emits a cipher companion for those which pass.
#[derive(Clone, Default)]
pub struct SymEncProcessingStep {
    validator: SymEncValidator,
    generator: SourceFileGenerator<SymEncGenerator>,
}

impl SymEncProcessingStep {
    pub fn new(generator: SourceFileGenerator<SymEncGenerator>) -> Self {
        Self {
            validator: SymEncValidator,
            generator,
        }
    }

    /// Build the parameter model for a validated element. Members the validator warned about
    /// are skipped.
    fn extract<'e>(&self, element: &'e Element) -> Result<SymEncPara<'e>, ExtractError> {
        let mut builder = SymEncPara::builder_with_defaults().set_type_element(element);

        if let Some(mirror) = element.get_annotation_mirror(AnnotationKind::SymEncrypt) {
            for entry in mirror.entries() {
                builder = match SymEncEntry::from_entry(entry) {
                    Ok(entry) => entry.apply(builder)?,
                    Err(EntryError::Unknown(name)) => {
                        debug!(%name, "skipping unrecognised member");
                        builder
                    }
                    Err(e) => return Err(e.into()),
                };
            }
        }

        Ok(builder.build()?)
    }
}

impl ProcessingStep for SymEncProcessingStep {
    fn annotations(&self) -> &'static [AnnotationKind] {
        &[AnnotationKind::SymEncrypt]
    }

    fn process<'e>(
        &self,
        elements_by_annotation: &'e ElementsByAnnotation,
        env: &mut ProcessingEnv<'_>,
    ) -> Vec<&'e Element> {
        for element in types_in(elements_by_annotation.get(AnnotationKind::SymEncrypt)) {
            let _span = debug_span!("sym_encrypt", element = %element.ident()).entered();

            let report = self.validator.validate_annotation_parameter(element);
            if !report.print_messages_to(env.messager) {
                debug!("validation failed, skipping generation");
                continue;
            }

            let para = match self.extract(element) {
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

        Vec::new()
    }
}

#[cfg(test)]
mod test {
    use proc_macro2::{Span, TokenStream};
    use proptest::prelude::*;
    use quote::{ToTokens, quote};
    use syn::{Item, parse_quote};

    use super::*;
    use crate::{AnnotationMirror, CollectingMessager, Kind, MemoryFiler, ModulePath};

    fn annotated(item: Item, args: TokenStream) -> Element {
        Element::from_item(&item, ModulePath::default())
            .unwrap()
            .with_annotation(
                AnnotationMirror::parse_args(AnnotationKind::SymEncrypt, Span::call_site(), args)
                    .unwrap(),
            )
    }

    fn run(elements: ElementsByAnnotation) -> (MemoryFiler, CollectingMessager) {
        let mut filer = MemoryFiler::default();
        let mut messager = CollectingMessager::default();

        let deferred = SymEncProcessingStep::default()
            .process(&elements, &mut ProcessingEnv::new(&mut messager, &mut filer));
        assert!(deferred.is_empty());

        (filer, messager)
    }

    fn single(item: Item, args: TokenStream) -> (MemoryFiler, CollectingMessager) {
        run(ElementsByAnnotation::from_iter([(
            AnnotationKind::SymEncrypt,
            annotated(item, args),
        )]))
    }

    fn rendered(filer: &MemoryFiler) -> String {
        filer.units()[0].1.to_token_stream().to_string()
    }

    fn errors(messager: &CollectingMessager) -> Vec<&str> {
        messager
            .diagnostics()
            .iter()
            .filter(|diagnostic| diagnostic.kind == Kind::Error)
            .map(|diagnostic| diagnostic.message.as_str())
            .collect()
    }

    #[test]
    fn defaults() {
        let (filer, messager) = single(parse_quote!(struct Foo;), quote!());

        assert!(messager.diagnostics().is_empty());
        assert_eq!(filer.len(), 1);
        assert_eq!(filer.units()[0].0.to_string(), "self::FooSymEnc");
        assert!(rendered(&filer).contains("\"AES/CBC/PKCS5PADDING\""));
    }

    #[test]
    fn custom_configuration() {
        let (filer, messager) = single(
            parse_quote!(struct Foo;),
            quote!(block_mode = "GCM", padding_mode = "NoPadding", key_size = 256),
        );

        assert!(messager.diagnostics().is_empty());

        let rendered = rendered(&filer);
        assert!(rendered.contains("\"AES/GCM/NOPADDING\""));
        assert!(rendered.contains("pub const KEY_SIZE : u32 = 256"));
    }

    #[test]
    fn invalid_element_emits_nothing() {
        let (filer, messager) = single(parse_quote!(enum Foo {}), quote!());

        assert!(filer.is_empty());
        assert_eq!(
            errors(&messager),
            ["annotation applies only to structs, found enum"]
        );
        assert!(messager.diagnostics()[0].span.is_some());
    }

    #[test]
    fn invalid_configuration_emits_nothing() {
        let (filer, messager) = single(parse_quote!(struct Foo;), quote!(key_size = 17));

        assert!(filer.is_empty());
        assert_eq!(
            errors(&messager),
            ["unsupported AES key size 17, expected one of: 128, 192, 256"]
        );
    }

    #[test]
    fn unknown_member_is_ignored() {
        let (filer, messager) = single(parse_quote!(struct Foo;), quote!(cipher = "AES"));

        assert_eq!(filer.len(), 1);
        assert_eq!(messager.diagnostics().len(), 1);
        assert_eq!(messager.diagnostics()[0].kind, Kind::Warning);
    }

    #[test]
    fn failure_is_isolated() {
        let (filer, messager) = run(ElementsByAnnotation::from_iter([
            (
                AnnotationKind::SymEncrypt,
                annotated(parse_quote!(struct Foo<T>(T);), quote!()),
            ),
            (
                AnnotationKind::SymEncrypt,
                annotated(parse_quote!(struct Bar;), quote!(algorithm = "DESede", key_size = 168)),
            ),
        ]));

        assert_eq!(errors(&messager).len(), 1);
        assert_eq!(filer.len(), 1);
        assert_eq!(filer.units()[0].0.to_string(), "self::BarSymEnc");
        assert!(rendered(&filer).contains("\"DESede/CBC/PKCS5PADDING\""));
    }

    #[test]
    fn duplicate_companion_is_reported() {
        let (filer, messager) = run(ElementsByAnnotation::from_iter([
            (
                AnnotationKind::SymEncrypt,
                annotated(parse_quote!(struct Foo;), quote!()),
            ),
            (
                AnnotationKind::SymEncrypt,
                annotated(parse_quote!(struct Foo;), quote!()),
            ),
        ]));

        assert_eq!(filer.len(), 1);
        assert_eq!(
            errors(&messager),
            [
                "could not generate `self::FooSymEnc`: a unit named `self::FooSymEnc` has \
                 already been written"
            ]
        );
    }

    #[test]
    fn extract_skips_unknown_members() {
        let element = annotated(
            parse_quote!(struct Foo;),
            quote!(mode = "x", algorithm = "DES", key_size = 56),
        );

        let para = SymEncProcessingStep::default().extract(&element).unwrap();

        assert_eq!(para.algorithm(), "DES");
        assert_eq!(para.key_size(), 56);
        assert_eq!(para.padding_mode(), "PKCS5PADDING");
    }

    #[test]
    fn extract_without_annotation() {
        let element =
            Element::from_item(&parse_quote!(struct Foo;), ModulePath::default()).unwrap();

        let para = SymEncProcessingStep::default().extract(&element).unwrap();

        assert_eq!(para.algorithm(), "AES");
        assert_eq!(para.key_size(), 128);
    }

    #[test]
    fn extract_type_error() {
        let element = annotated(parse_quote!(struct Foo;), quote!(key_size = "big"));

        assert!(matches!(
            SymEncProcessingStep::default().extract(&element),
            Err(ExtractError::Entry(EntryError::Type { .. }))
        ));
    }

    fn aes_key_size() -> impl Strategy<Value = u32> {
        prop::sample::select(vec![128u32, 192, 256])
    }

    fn block_mode() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["ECB", "CBC", "CFB", "OFB"])
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(key_size in aes_key_size(), mode in block_mode()) {
            let args = quote!(block_mode = #mode, key_size = #key_size);

            let (first, _) = single(parse_quote!(struct Foo;), args.clone());
            let (second, _) = single(parse_quote!(struct Foo;), args);

            prop_assert_eq!(rendered(&first), rendered(&second));
        }

        #[test]
        fn explicit_defaults_match_implicit(mode in block_mode()) {
            let (implicit, _) = single(parse_quote!(struct Foo;), quote!(block_mode = #mode));
            let (explicit, _) = single(
                parse_quote!(struct Foo;),
                quote!(algorithm = "AES", block_mode = #mode, key_size = 128),
            );

            prop_assert_eq!(rendered(&implicit), rendered(&explicit));
        }

        #[test]
        fn unsupported_key_size_is_rejected(key_size in 1u32..1024) {
            prop_assume!(![128, 192, 256].contains(&key_size));

            let (filer, messager) =
                single(parse_quote!(struct Foo;), quote!(key_size = #key_size));

            prop_assert!(filer.is_empty());
            prop_assert!(messager.has_errors());
        }
    }
}
