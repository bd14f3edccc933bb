use thiserror::Error;

use crate::{Algorithm, BlockMode, Element, PaddingMode};

pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Aes;
pub const DEFAULT_BLOCK_MODE: BlockMode = BlockMode::Cbc;
pub const DEFAULT_PADDING_MODE: PaddingMode = PaddingMode::Pkcs5Padding;
/// Key size (in bits) used when an annotation doesn't specify one.
pub const DEFAULT_KEY_SIZE: u32 = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("required field `{0}` was not set")]
    MissingField(&'static str),
}

/// Everything required to generate a hello world unit for one annotation value.
#[derive(Clone)]
pub struct HelloWorldPara<'e> {
    type_element: &'e Element,
    class_name: String,
    para: String,
}

impl<'e> HelloWorldPara<'e> {
    pub fn builder() -> HelloWorldParaBuilder<'e> {
        HelloWorldParaBuilder::default()
    }

    pub fn type_element(&self) -> &'e Element {
        self.type_element
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn para(&self) -> &str {
        &self.para
    }
}

#[derive(Default)]
pub struct HelloWorldParaBuilder<'e> {
    type_element: Option<&'e Element>,
    class_name: Option<String>,
    para: Option<String>,
}

impl<'e> HelloWorldParaBuilder<'e> {
    pub fn set_type_element(mut self, type_element: &'e Element) -> Self {
        self.type_element = Some(type_element);
        self
    }

    /// Override the class name, which otherwise defaults to the element's simple name.
    pub fn set_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn set_para(mut self, para: impl Into<String>) -> Self {
        self.para = Some(para.into());
        self
    }

    pub fn build(self) -> Result<HelloWorldPara<'e>, BuildError> {
        let type_element = self
            .type_element
            .ok_or(BuildError::MissingField("type_element"))?;

        Ok(HelloWorldPara {
            type_element,
            class_name: self
                .class_name
                .unwrap_or_else(|| type_element.simple_name()),
            para: self.para.ok_or(BuildError::MissingField("para"))?,
        })
    }
}

/// Everything required to generate a symmetric encryption companion for one element.
#[derive(Clone)]
pub struct SymEncPara<'e> {
    type_element: &'e Element,
    class_name: String,
    algorithm: String,
    block_mode: String,
    padding_mode: String,
    key_size: u32,
}

impl<'e> SymEncPara<'e> {
    pub fn builder() -> SymEncParaBuilder<'e> {
        SymEncParaBuilder::default()
    }

    /// Builder with the algorithm, modes and key size set to their defaults, ready for any
    /// overrides from the annotation.
    pub fn builder_with_defaults() -> SymEncParaBuilder<'e> {
        Self::builder()
            .set_algorithm(DEFAULT_ALGORITHM.to_string())
            .set_block_mode(DEFAULT_BLOCK_MODE.to_string())
            .set_padding_mode(DEFAULT_PADDING_MODE.to_string())
            .set_key_size(DEFAULT_KEY_SIZE)
    }

    pub fn type_element(&self) -> &'e Element {
        self.type_element
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn block_mode(&self) -> &str {
        &self.block_mode
    }

    pub fn padding_mode(&self) -> &str {
        &self.padding_mode
    }

    pub fn key_size(&self) -> u32 {
        self.key_size
    }
}

#[derive(Default)]
pub struct SymEncParaBuilder<'e> {
    type_element: Option<&'e Element>,
    class_name: Option<String>,
    algorithm: Option<String>,
    block_mode: Option<String>,
    padding_mode: Option<String>,
    key_size: Option<u32>,
}

impl<'e> SymEncParaBuilder<'e> {
    pub fn set_type_element(mut self, type_element: &'e Element) -> Self {
        self.type_element = Some(type_element);
        self
    }

    /// Override the class name, which otherwise defaults to the element's simple name.
    pub fn set_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn set_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn set_block_mode(mut self, block_mode: impl Into<String>) -> Self {
        self.block_mode = Some(block_mode.into());
        self
    }

    pub fn set_padding_mode(mut self, padding_mode: impl Into<String>) -> Self {
        self.padding_mode = Some(padding_mode.into());
        self
    }

    pub fn set_key_size(mut self, key_size: u32) -> Self {
        self.key_size = Some(key_size);
        self
    }

    pub fn build(self) -> Result<SymEncPara<'e>, BuildError> {
        let type_element = self
            .type_element
            .ok_or(BuildError::MissingField("type_element"))?;

        Ok(SymEncPara {
            type_element,
            class_name: self
                .class_name
                .unwrap_or_else(|| type_element.simple_name()),
            algorithm: self
                .algorithm
                .ok_or(BuildError::MissingField("algorithm"))?,
            block_mode: self
                .block_mode
                .ok_or(BuildError::MissingField("block_mode"))?,
            padding_mode: self
                .padding_mode
                .ok_or(BuildError::MissingField("padding_mode"))?,
            key_size: self.key_size.ok_or(BuildError::MissingField("key_size"))?,
        })
    }
}

#[cfg(test)]
mod test {
    use syn::parse_quote;

    use super::*;
    use crate::ModulePath;

    fn element() -> Element {
        Element::from_item(&parse_quote!(struct Foo;), ModulePath::default()).unwrap()
    }

    #[test]
    fn hello_world_para() {
        let element = element();
        let para = HelloWorldPara::builder()
            .set_type_element(&element)
            .set_para("abc")
            .build()
            .unwrap();

        assert_eq!(para.class_name(), "Foo");
        assert_eq!(para.para(), "abc");
    }

    #[test]
    fn hello_world_missing_para() {
        let element = element();
        let result = HelloWorldPara::builder().set_type_element(&element).build();

        assert_eq!(result.err(), Some(BuildError::MissingField("para")));
    }

    #[test]
    fn hello_world_missing_element() {
        let result = HelloWorldPara::builder().set_para("abc").build();

        assert_eq!(result.err(), Some(BuildError::MissingField("type_element")));
    }

    #[test]
    fn sym_enc_defaults() {
        let element = element();
        let para = SymEncPara::builder_with_defaults()
            .set_type_element(&element)
            .build()
            .unwrap();

        assert_eq!(para.class_name(), "Foo");
        assert_eq!(para.algorithm(), "AES");
        assert_eq!(para.block_mode(), "CBC");
        assert_eq!(para.padding_mode(), "PKCS5PADDING");
        assert_eq!(para.key_size(), DEFAULT_KEY_SIZE);
    }

    #[test]
    fn sym_enc_override_defaults() {
        let element = element();
        let para = SymEncPara::builder_with_defaults()
            .set_type_element(&element)
            .set_class_name("Renamed")
            .set_block_mode("GCM")
            .set_padding_mode("NOPADDING")
            .set_key_size(256)
            .build()
            .unwrap();

        assert_eq!(para.class_name(), "Renamed");
        assert_eq!(para.algorithm(), "AES");
        assert_eq!(para.block_mode(), "GCM");
        assert_eq!(para.key_size(), 256);
    }

    #[test]
    fn sym_enc_without_defaults() {
        let element = element();
        let result = SymEncPara::builder()
            .set_type_element(&element)
            .set_algorithm("AES")
            .build();

        assert_eq!(result.err(), Some(BuildError::MissingField("block_mode")));
    }
}
