use companion_codegen::{CollectingMessager, Diagnostic, Kind, MemoryFiler};
use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use tracing::info;

/// Render everything written during a round: the generated units in the order they were
/// written, followed by the diagnostics.
pub fn render(filer: MemoryFiler, messager: CollectingMessager) -> TokenStream {
    let units = filer.into_units().into_iter().map(|(_, unit)| unit);
    let diagnostics = messager
        .into_diagnostics()
        .into_iter()
        .filter_map(render_diagnostic);

    quote! {
        #(#units)*
        #(#diagnostics)*
    }
}

/// Errors become `compile_error!` invocations. Stable `rustc` has no way to raise a warning from
/// a macro, so warnings are raised as the use of a deprecated item carrying the message.
fn render_diagnostic(diagnostic: Diagnostic) -> Option<TokenStream> {
    let span = diagnostic.span.unwrap_or_else(Span::call_site);
    let message = diagnostic.message;

    match diagnostic.kind {
        Kind::Error => Some(quote_spanned! {span=>
            ::core::compile_error!(#message);
        }),
        Kind::Warning => Some(quote_spanned! {span=>
            const _: () = {
                #[deprecated(note = #message)]
                struct CompanionWarning;

                let _ = CompanionWarning;
            };
        }),
        Kind::Note => {
            info!(%message, "note");
            None
        }
    }
}
