mod render;

use companion_codegen::{
    AnnotationKind, AnnotationMirror, CollectingMessager, Element, ElementsByAnnotation,
    MemoryFiler, ModulePath, ProcessingEnv, Processor,
};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Error, Item};
use tracing::debug_span;

use self::render::render;

/// Emit a `HelloWorld` type next to the annotated type, whose `hello_world` function prints
/// `Hello World <value>`.
///
/// ```ignore
/// #[hello_world("abc")]
/// struct Foo;
///
/// HelloWorld::hello_world();
/// ```
#[proc_macro_attribute]
pub fn hello_world(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    expand(AnnotationKind::HelloWorld, attr.into(), item.into()).into()
}

/// Emit a `<Name>SymEnc` companion describing the symmetric cipher configured for the annotated
/// struct.
///
/// Accepts `algorithm`, `block_mode`, `padding_mode` and `key_size`, defaulting to
/// `AES/CBC/PKCS5PADDING` with a 128-bit key.
///
/// ```ignore
/// #[sym_encrypt(block_mode = "GCM", padding_mode = "NOPADDING", key_size = 256)]
/// struct Secret;
///
/// assert_eq!(SecretSymEnc::TRANSFORMATION, "AES/GCM/NOPADDING");
/// ```
#[proc_macro_attribute]
pub fn sym_encrypt(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    expand(AnnotationKind::SymEncrypt, attr.into(), item.into()).into()
}

/// Run the processor over the annotated item. The item is always passed through untouched, so
/// a failure never hides the user's declaration.
fn expand(kind: AnnotationKind, attr: TokenStream, item: TokenStream) -> TokenStream {
    let _span = debug_span!("expand", annotation = %kind).entered();

    let parsed = match syn::parse2::<Item>(item.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            let error = e.into_compile_error();
            return quote!(#item #error);
        }
    };

    let output = match expand_inner(kind, attr, &parsed) {
        Ok(ts) => ts,
        Err(e) => e.into_compile_error(),
    };

    quote! {
        #parsed
        #output
    }
}

/// Build a round holding just the annotated item, and process it.
fn expand_inner(
    kind: AnnotationKind,
    attr: TokenStream,
    item: &Item,
) -> Result<TokenStream, Error> {
    let mirror = AnnotationMirror::parse_args(kind, Span::call_site(), attr)?;
    let element = Element::from_item(item, ModulePath::default())?.with_annotation(mirror);

    if !element.kind().is_type() {
        return Err(Error::new(
            element.span(),
            format!(
                "`{kind}` can only be applied to type declarations, found {}",
                element.kind()
            ),
        ));
    }

    let elements = ElementsByAnnotation::from_iter([(kind, element)]);

    let mut messager = CollectingMessager::default();
    let mut filer = MemoryFiler::default();

    Processor::standard()
        .process_round(&elements, &mut ProcessingEnv::new(&mut messager, &mut filer));

    Ok(render(filer, messager))
}
