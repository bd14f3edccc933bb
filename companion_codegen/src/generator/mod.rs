mod hello_world;
mod sym_enc;

use std::fmt;

use proc_macro2::Span;
use syn::{Attribute, Ident, ImplItem, Item, ItemImpl, ItemStruct, Visibility, parse_quote};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{Diagnostic, Filer, FilerError, Messager, ModulePath};

pub use self::{hello_world::HelloWorldGenerator, sym_enc::SymEncGenerator};

/// Fully qualified name of a generated type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratedTypeName {
    pub module: ModulePath,
    pub ident: Ident,
}

impl GeneratedTypeName {
    pub fn new(module: ModulePath, ident: Ident) -> Self {
        Self { module, ident }
    }

    /// A type living alongside `module`'s other items.
    pub fn peer(module: &ModulePath, simple_name: &str) -> Result<Self, GenerationFailure> {
        let ident = syn::parse_str::<Ident>(simple_name)
            .map_err(|_| GenerationFailure::InvalidName(simple_name.to_string()))?;

        Ok(Self::new(module.clone(), ident))
    }
}

impl fmt::Display for GeneratedTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.ident)
    }
}

/// Reasons a unit couldn't be emitted.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("`{0}` is not a valid type name")]
    InvalidName(String),

    #[error("unsupported {member} `{value}`")]
    Unsupported { member: &'static str, value: String },

    #[error(transparent)]
    Filer(#[from] FilerError),
}

/// Raised when a generator is unable to emit a unit. The step that invoked the generator reports
/// it through the host's diagnostics, rather than letting it escape the round.
#[derive(Debug, Error)]
#[error("could not generate {}: {failure}", describe(.type_name))]
pub struct SourceFileGenerationError {
    type_name: Option<GeneratedTypeName>,
    failure: GenerationFailure,
    span: Option<Span>,
}

impl SourceFileGenerationError {
    pub fn new(
        type_name: Option<GeneratedTypeName>,
        failure: GenerationFailure,
        span: Option<Span>,
    ) -> Self {
        Self {
            type_name,
            failure,
            span,
        }
    }

    pub fn type_name(&self) -> Option<&GeneratedTypeName> {
        self.type_name.as_ref()
    }

    pub fn failure(&self) -> &GenerationFailure {
        &self.failure
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn print_message_to(&self, messager: &mut dyn Messager) {
        messager.print_message(Diagnostic::error(self.to_string(), self.span));
    }
}

fn describe(type_name: &Option<GeneratedTypeName>) -> String {
    match type_name {
        Some(name) => format!("`{name}`"),
        None => "source file".to_string(),
    }
}

/// Abstract syntax of a single generated unit: one primary struct, its inherent impl, and any
/// trailing items.
pub struct TypeBuilder {
    item: ItemStruct,
    methods: Vec<ImplItem>,
    trailing: Vec<Item>,
}

impl TypeBuilder {
    /// Start a unit struct named `ident`.
    pub fn unit_struct(visibility: Visibility, ident: Ident) -> Self {
        Self {
            item: parse_quote!(#visibility struct #ident;),
            methods: Vec::new(),
            trailing: Vec::new(),
        }
    }

    pub fn ident(&self) -> &Ident {
        &self.item.ident
    }

    pub fn add_doc(mut self, line: impl AsRef<str>) -> Self {
        let line = format!(" {}", line.as_ref());
        self.item.attrs.push(parse_quote!(#[doc = #line]));
        self
    }

    pub fn add_attribute(mut self, attribute: Attribute) -> Self {
        self.item.attrs.push(attribute);
        self
    }

    /// Add an associated item (method or constant) to the inherent impl.
    pub fn add_member(mut self, member: ImplItem) -> Self {
        self.methods.push(member);
        self
    }

    pub fn add_item(mut self, item: Item) -> Self {
        self.trailing.push(item);
        self
    }

    /// Finalise the unit.
    pub fn build(self) -> syn::File {
        let ident = self.item.ident.clone();
        let mut items = vec![Item::Struct(self.item)];

        if !self.methods.is_empty() {
            let mut inherent: ItemImpl = parse_quote! {
                #[automatically_derived]
                impl #ident {}
            };
            inherent.items = self.methods;

            items.push(Item::Impl(inherent));
        }

        items.extend(self.trailing);

        syn::File {
            shebang: None,
            attrs: Vec::new(),
            items,
        }
    }
}

/// One kind of generated unit, driven by [`SourceFileGenerator`].
pub trait UnitEmitter<I> {
    /// Choose where the unit produced for `input` lives.
    fn name_generated_type(&self, input: &I) -> Result<GeneratedTypeName, GenerationFailure>;

    /// Location to attach to any generation failure.
    fn element_for_error_reporting(&self, input: &I) -> Option<Span>;

    /// Produce the unit for `input`. `Ok(None)` means there is nothing to emit.
    fn write(
        &self,
        generated_type_name: &GeneratedTypeName,
        input: &I,
    ) -> Result<Option<TypeBuilder>, GenerationFailure>;
}

/// Drives a [`UnitEmitter`]: name the unit, build it, and hand the finished unit to the
/// [`Filer`].
#[derive(Clone, Debug, Default)]
pub struct SourceFileGenerator<E> {
    emitter: E,
}

impl<E> SourceFileGenerator<E> {
    pub fn new(emitter: E) -> Self {
        Self { emitter }
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn generate<I>(
        &self,
        input: I,
        filer: &mut dyn Filer,
    ) -> Result<(), SourceFileGenerationError>
    where
        E: UnitEmitter<I>,
    {
        let span = self.emitter.element_for_error_reporting(&input);

        let name = self
            .emitter
            .name_generated_type(&input)
            .map_err(|failure| SourceFileGenerationError::new(None, failure, span))?;

        let Some(builder) = self
            .emitter
            .write(&name, &input)
            .map_err(|failure| SourceFileGenerationError::new(Some(name.clone()), failure, span))?
        else {
            trace!(%name, "nothing to emit");
            return Ok(());
        };

        filer.write_source(&name, builder.build()).map_err(|e| {
            SourceFileGenerationError::new(Some(name.clone()), GenerationFailure::from(e), span)
        })?;

        debug!(%name, "emitted unit");

        Ok(())
    }
}
