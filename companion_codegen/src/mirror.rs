use proc_macro2::{Span, TokenStream};
use strum::{Display, EnumString, IntoStaticStr};
use syn::{
    Error, Expr, ExprLit, Ident, Lit, LitBool, LitInt, LitStr, Token,
    parse::{Parse, ParseStream, Parser},
    punctuated::Punctuated,
    spanned::Spanned,
};

/// Annotations the pipeline knows how to process, named by their attribute.
#[derive(Clone, Copy, Debug, Display, EnumString, IntoStaticStr, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum AnnotationKind {
    HelloWorld,
    SymEncrypt,
}

/// Value of a single annotation entry.
#[derive(Clone)]
pub enum AnnotationValue {
    Str(LitStr),
    Int(LitInt),
    Bool(LitBool),
    /// Anything that isn't a plain literal.
    Other(Expr),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&LitStr> {
        match self {
            AnnotationValue::Str(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&LitInt> {
        match self {
            AnnotationValue::Int(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            AnnotationValue::Str(lit) => lit.span(),
            AnnotationValue::Int(lit) => lit.span(),
            AnnotationValue::Bool(lit) => lit.span,
            AnnotationValue::Other(expr) => expr.span(),
        }
    }
}

impl From<Expr> for AnnotationValue {
    fn from(expr: Expr) -> Self {
        match expr {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => AnnotationValue::Str(lit),
            Expr::Lit(ExprLit {
                lit: Lit::Int(lit), ..
            }) => AnnotationValue::Int(lit),
            Expr::Lit(ExprLit {
                lit: Lit::Bool(lit),
                ..
            }) => AnnotationValue::Bool(lit),
            expr => AnnotationValue::Other(expr),
        }
    }
}

/// A single `name = value` pair of an annotation. Positional values are named `value`.
#[derive(Clone)]
pub struct AnnotationEntry {
    name: Ident,
    value: AnnotationValue,
}

impl AnnotationEntry {
    pub fn new(name: Ident, value: AnnotationValue) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }
}

impl Parse for AnnotationEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident) && input.peek2(Token![=]) {
            let name = input.parse()?;
            input.parse::<Token![=]>()?;

            return Ok(Self {
                name,
                value: input.parse::<Expr>()?.into(),
            });
        }

        let value = input.parse::<Expr>()?;

        Ok(Self {
            name: Ident::new("value", value.span()),
            value: value.into(),
        })
    }
}

/// Structured view of one annotation instance, with its entries in source order.
#[derive(Clone)]
pub struct AnnotationMirror {
    kind: AnnotationKind,
    span: Span,
    entries: Vec<AnnotationEntry>,
}

impl AnnotationMirror {
    pub fn new(kind: AnnotationKind, span: Span, entries: Vec<AnnotationEntry>) -> Self {
        Self {
            kind,
            span,
            entries,
        }
    }

    /// Parse the argument list of an annotation (the tokens between the parentheses).
    pub fn parse_args(kind: AnnotationKind, span: Span, args: TokenStream) -> Result<Self, Error> {
        let entries = Punctuated::<AnnotationEntry, Token![,]>::parse_terminated.parse2(args)?;

        Ok(Self::new(kind, span, entries.into_iter().collect()))
    }

    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    /// Location of the annotation itself.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn entries(&self) -> &[AnnotationEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use quote::quote;

    use super::*;

    fn mirror(args: TokenStream) -> AnnotationMirror {
        AnnotationMirror::parse_args(AnnotationKind::SymEncrypt, Span::call_site(), args).unwrap()
    }

    #[test]
    fn empty_args() {
        assert!(mirror(quote!()).entries().is_empty());
    }

    #[test]
    fn positional_value() {
        let mirror = mirror(quote!("abc"));

        assert_eq!(mirror.entries().len(), 1);
        assert_eq!(mirror.entries()[0].name(), "value");
        assert_eq!(mirror.entries()[0].value().as_str().unwrap().value(), "abc");
    }

    #[test]
    fn named_values_keep_order() {
        let mirror = mirror(quote!(key_size = 256, algorithm = "AES", enabled = true));

        let names = mirror
            .entries()
            .iter()
            .map(|entry| entry.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["key_size", "algorithm", "enabled"]);

        assert_eq!(
            mirror.entries()[0]
                .value()
                .as_int()
                .unwrap()
                .base10_parse::<u32>()
                .unwrap(),
            256
        );
        assert!(matches!(
            mirror.entries()[2].value(),
            AnnotationValue::Bool(_)
        ));
    }

    #[test]
    fn non_literal_value() {
        let mirror = mirror(quote!(key_size = SOME_CONST));

        assert!(matches!(
            mirror.entries()[0].value(),
            AnnotationValue::Other(_)
        ));
    }

    #[test]
    fn trailing_comma() {
        assert_eq!(mirror(quote!("a", "b",)).entries().len(), 2);
    }

    #[test]
    fn error_on_malformed_args() {
        assert!(
            AnnotationMirror::parse_args(
                AnnotationKind::HelloWorld,
                Span::call_site(),
                quote!(= "abc")
            )
            .is_err()
        );
    }

    #[test]
    fn annotation_kind_names() {
        assert_eq!(AnnotationKind::HelloWorld.to_string(), "hello_world");
        assert_eq!(
            AnnotationKind::from_str("sym_encrypt").unwrap(),
            AnnotationKind::SymEncrypt
        );
    }
}
