use heck::ToSnakeCase;
use proc_macro2::Span;
use quote::format_ident;
use syn::{LitStr, parse_quote};

use super::{GeneratedTypeName, GenerationFailure, TypeBuilder, UnitEmitter};
use crate::HelloWorldPara;

/// Simple name of every hello world unit.
const GENERATED_NAME: &str = "HelloWorld";

/// Emits a `HelloWorld` type alongside the annotated element, with a single function printing
/// the annotation's value.
#[derive(Clone, Copy, Debug, Default)]
pub struct HelloWorldGenerator;

impl UnitEmitter<HelloWorldPara<'_>> for HelloWorldGenerator {
    fn name_generated_type(
        &self,
        input: &HelloWorldPara<'_>,
    ) -> Result<GeneratedTypeName, GenerationFailure> {
        GeneratedTypeName::peer(input.type_element().module(), GENERATED_NAME)
    }

    fn element_for_error_reporting(&self, _input: &HelloWorldPara<'_>) -> Option<Span> {
        None
    }

    fn write(
        &self,
        generated_type_name: &GeneratedTypeName,
        input: &HelloWorldPara<'_>,
    ) -> Result<Option<TypeBuilder>, GenerationFailure> {
        let ident = &generated_type_name.ident;
        let function = format_ident!("{}", ident.to_string().to_snake_case());

        // The message is assembled here, so the generated code prints it verbatim.
        let message = LitStr::new(&format!("Hello World {}", input.para()), Span::call_site());

        Ok(Some(
            TypeBuilder::unit_struct(parse_quote!(pub), ident.clone())
                .add_doc(format!("Generated from `{}`.", input.class_name()))
                .add_member(parse_quote! {
                    pub fn #function() {
                        ::std::println!("{}", #message);
                    }
                }),
        ))
    }
}
