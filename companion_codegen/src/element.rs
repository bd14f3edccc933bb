use std::fmt;

use proc_macro2::{Ident, Span};
use strum::Display;
use syn::{Error, Generics, Item, Visibility, ext::IdentExt};

use crate::{AnnotationKind, AnnotationMirror};

/// Kind of declaration an annotation was placed on.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    Struct,
    Enum,
    Trait,
    Union,
    Function,
    Other,
}

impl ElementKind {
    /// Whether this kind declares a type.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            ElementKind::Struct | ElementKind::Enum | ElementKind::Trait | ElementKind::Union
        )
    }
}

/// Module segments locating an element. The empty path is the module the host is expanding in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "self");
        }

        write!(f, "{}", self.0.join("::"))
    }
}

/// A declaration in user source, as delivered by the host for one round.
#[derive(Clone)]
pub struct Element {
    kind: ElementKind,
    ident: Ident,
    visibility: Visibility,
    generics: Generics,
    module: ModulePath,
    annotation_mirrors: Vec<AnnotationMirror>,
}

impl Element {
    /// Capture the parts of `item` the pipeline relies on. Items without a name (`impl` blocks,
    /// `use` declarations, etc) cannot be annotated and are rejected.
    pub fn from_item(item: &Item, module: ModulePath) -> Result<Self, Error> {
        let (kind, ident, visibility, generics) = match item {
            Item::Struct(item) => (
                ElementKind::Struct,
                &item.ident,
                &item.vis,
                item.generics.clone(),
            ),
            Item::Enum(item) => (
                ElementKind::Enum,
                &item.ident,
                &item.vis,
                item.generics.clone(),
            ),
            Item::Trait(item) => (
                ElementKind::Trait,
                &item.ident,
                &item.vis,
                item.generics.clone(),
            ),
            Item::Union(item) => (
                ElementKind::Union,
                &item.ident,
                &item.vis,
                item.generics.clone(),
            ),
            Item::Fn(item) => (
                ElementKind::Function,
                &item.sig.ident,
                &item.vis,
                item.sig.generics.clone(),
            ),
            Item::Type(item) => (
                ElementKind::Other,
                &item.ident,
                &item.vis,
                item.generics.clone(),
            ),
            Item::Const(item) => (
                ElementKind::Other,
                &item.ident,
                &item.vis,
                Generics::default(),
            ),
            Item::Static(item) => (
                ElementKind::Other,
                &item.ident,
                &item.vis,
                Generics::default(),
            ),
            Item::Mod(item) => (
                ElementKind::Other,
                &item.ident,
                &item.vis,
                Generics::default(),
            ),
            item => {
                return Err(Error::new_spanned(
                    item,
                    "annotations can only be placed on named items",
                ));
            }
        };

        Ok(Self {
            kind,
            ident: ident.clone(),
            visibility: visibility.clone(),
            generics,
            module,
            annotation_mirrors: Vec::new(),
        })
    }

    /// Attach an annotation mirror to the element.
    pub fn with_annotation(mut self, mirror: AnnotationMirror) -> Self {
        self.annotation_mirrors.push(mirror);
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Simple name of the element, without any raw identifier prefix.
    pub fn simple_name(&self) -> String {
        self.ident.unraw().to_string()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    pub fn module(&self) -> &ModulePath {
        &self.module
    }

    pub fn span(&self) -> Span {
        self.ident.span()
    }

    pub fn annotation_mirrors(&self) -> &[AnnotationMirror] {
        &self.annotation_mirrors
    }

    /// Locate the mirror for `kind`, if the element carries it.
    pub fn get_annotation_mirror(&self, kind: AnnotationKind) -> Option<&AnnotationMirror> {
        self.annotation_mirrors
            .iter()
            .find(|mirror| mirror.kind() == kind)
    }
}

/// Filter `elements` down to type declarations.
pub fn types_in<'e>(
    elements: impl IntoIterator<Item = &'e Element>,
) -> impl Iterator<Item = &'e Element> {
    elements
        .into_iter()
        .filter(|element| element.kind().is_type())
}
