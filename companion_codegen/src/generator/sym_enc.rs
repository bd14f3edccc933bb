use std::str::FromStr;

use proc_macro2::Span;
use syn::{LitInt, LitStr, Path, parse_quote};

use super::{GeneratedTypeName, GenerationFailure, TypeBuilder, UnitEmitter};
use crate::{Algorithm, BlockMode, PaddingMode, SymEncPara};

/// Emits a `<Name>SymEnc` companion describing the cipher configured for the annotated struct,
/// and links the two through the runtime's `SymEncCompanion` trait.
#[derive(Clone)]
pub struct SymEncGenerator {
    /// Path the runtime crate is reachable at from the generated code.
    crate_path: Path,
}

impl SymEncGenerator {
    pub fn new(crate_path: Path) -> Self {
        Self { crate_path }
    }

    pub fn crate_path(&self) -> &Path {
        &self.crate_path
    }
}

impl Default for SymEncGenerator {
    fn default() -> Self {
        Self::new(parse_quote!(::companion))
    }
}

fn parse_member<T: FromStr>(member: &'static str, value: &str) -> Result<T, GenerationFailure> {
    T::from_str(value).map_err(|_| GenerationFailure::Unsupported {
        member,
        value: value.to_string(),
    })
}

impl UnitEmitter<SymEncPara<'_>> for SymEncGenerator {
    fn name_generated_type(
        &self,
        input: &SymEncPara<'_>,
    ) -> Result<GeneratedTypeName, GenerationFailure> {
        GeneratedTypeName::peer(
            input.type_element().module(),
            &format!("{}SymEnc", input.class_name()),
        )
    }

    fn element_for_error_reporting(&self, input: &SymEncPara<'_>) -> Option<Span> {
        Some(input.type_element().span())
    }

    fn write(
        &self,
        generated_type_name: &GeneratedTypeName,
        input: &SymEncPara<'_>,
    ) -> Result<Option<TypeBuilder>, GenerationFailure> {
        let crate_path = &self.crate_path;
        let ident = &generated_type_name.ident;
        let target = input.type_element().ident();

        // Normalise to the canonical spelling of each member.
        let algorithm = parse_member::<Algorithm>("algorithm", input.algorithm())?;
        let block_mode = parse_member::<BlockMode>("block_mode", input.block_mode())?;
        let padding_mode = parse_member::<PaddingMode>("padding_mode", input.padding_mode())?;

        let span = Span::call_site();
        let algorithm_lit = LitStr::new(algorithm.into(), span);
        let block_mode_lit = LitStr::new(block_mode.into(), span);
        let padding_mode_lit = LitStr::new(padding_mode.into(), span);
        let transformation =
            LitStr::new(&format!("{algorithm}/{block_mode}/{padding_mode}"), span);
        let key_size = LitInt::new(&input.key_size().to_string(), span);

        let description = format!(
            "Symmetric encryption companion for [`{}`], using {} with a {}-bit key.",
            input.class_name(),
            transformation.value(),
            input.key_size(),
        );

        Ok(Some(
            TypeBuilder::unit_struct(parse_quote!(pub), ident.clone())
                .add_doc(description)
                .add_attribute(parse_quote! {
                    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
                })
                .add_member(parse_quote! {
                    pub const ALGORITHM: &'static str = #algorithm_lit;
                })
                .add_member(parse_quote! {
                    pub const BLOCK_MODE: &'static str = #block_mode_lit;
                })
                .add_member(parse_quote! {
                    pub const PADDING_MODE: &'static str = #padding_mode_lit;
                })
                .add_member(parse_quote! {
                    /// Key size, in bits.
                    pub const KEY_SIZE: u32 = #key_size;
                })
                .add_member(parse_quote! {
                    /// `algorithm/mode/padding`, as accepted by most cipher factories.
                    pub const TRANSFORMATION: &'static str = #transformation;
                })
                .add_member(parse_quote! {
                    pub const fn cipher_spec() -> #crate_path::CipherSpec {
                        #crate_path::CipherSpec::new(
                            Self::ALGORITHM,
                            Self::BLOCK_MODE,
                            Self::PADDING_MODE,
                            Self::KEY_SIZE,
                        )
                    }
                })
                .add_item(parse_quote! {
                    #[automatically_derived]
                    impl #crate_path::SymEncCompanion for #target {
                        type Companion = #ident;

                        const CIPHER: #crate_path::CipherSpec = #ident::cipher_spec();
                    }
                }),
        ))
    }
}
