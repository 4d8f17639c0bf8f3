// Form nodes
// The tree the mapper transfers values into and out of

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::property_path::{PathError, PropertyAccess, PropertyPath};
use crate::value::Value;

/// Form configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid form config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Whether a node takes part in data transfer or only groups other nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Mapped on its own, as a whole
    Real,
    /// Purely structural; its children are mapped as if they were its siblings
    VirtualGroup,
}

/// What the mapper needs from a node in a form tree.
pub trait FormNode: Sized {
    type Path: PropertyAccess;

    fn name(&self) -> &str;

    /// Where the node's value lives in the backing data. `None` means unmapped.
    fn property_path(&self) -> Option<&Self::Path>;

    fn is_mapped(&self) -> bool;

    /// Whether object values are shared with the backing data instead of copied.
    fn by_reference(&self) -> bool;

    fn data(&self) -> &Value;

    fn set_data(&mut self, data: Value);

    /// False when the last inbound value transformation failed.
    fn is_synchronized(&self) -> bool;

    fn is_disabled(&self) -> bool;

    fn kind(&self) -> NodeKind;

    fn children(&self) -> &[Self];

    fn children_mut(&mut self) -> &mut [Self];
}

/// Per-node configuration
///
/// Every field has a default, so a config can be loaded from partial JSON:
///
/// ```
/// use form_path_mapper::form::FormConfig;
///
/// let config = FormConfig::from_json_str(r#"{"by_reference": false}"#).unwrap();
/// assert!(config.mapped);
/// assert!(!config.by_reference);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Path expression; mapped forms fall back to their name when absent
    pub property_path: Option<String>,
    pub mapped: bool,
    pub by_reference: bool,
    pub disabled: bool,
    #[serde(rename = "virtual")]
    pub virtual_group: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            property_path: None,
            mapped: true,
            by_reference: true,
            disabled: false,
            virtual_group: false,
        }
    }
}

impl FormConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn unmapped() -> Self {
        FormConfig {
            mapped: false,
            ..Default::default()
        }
    }

    pub fn virtual_group() -> Self {
        FormConfig {
            virtual_group: true,
            ..Default::default()
        }
    }

    pub fn with_property_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    pub fn with_by_reference(mut self, by_reference: bool) -> Self {
        self.by_reference = by_reference;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Default form node implementation
#[derive(Debug, Clone)]
pub struct Form {
    name: String,
    config: FormConfig,
    property_path: Option<PropertyPath>,
    data: Value,
    synchronized: bool,
    children: Vec<Form>,
}

impl Form {
    /// Create a form, parsing its property path from the config or, for
    /// mapped forms, from its name.
    pub fn new(name: impl Into<String>, config: FormConfig) -> Result<Self, ConfigError> {
        let name = name.into();
        let property_path = match config.property_path.as_deref() {
            Some(path) => Some(PropertyPath::parse(path)?),
            None if name.is_empty() || !config.mapped => None,
            None => Some(PropertyPath::parse(&name)?),
        };

        Ok(Form {
            name,
            config,
            property_path,
            data: Value::Null,
            synchronized: true,
            children: Vec::new(),
        })
    }

    /// A mapped form whose path is its name.
    pub fn field(name: impl Into<String>) -> Result<Self, ConfigError> {
        Form::new(name, FormConfig::default())
    }

    pub fn from_json(name: impl Into<String>, config: &str) -> Result<Self, ConfigError> {
        Form::new(name, FormConfig::from_json_str(config)?)
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn add(&mut self, child: Form) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn with_child(mut self, child: Form) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn child(&self, name: &str) -> Option<&Form> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Form> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn set_synchronized(&mut self, synchronized: bool) {
        self.synchronized = synchronized;
    }

    /// Record that transforming submitted input into this form's value failed.
    pub fn mark_unsynchronized(&mut self) {
        self.synchronized = false;
    }
}

impl FormNode for Form {
    type Path = PropertyPath;

    fn name(&self) -> &str {
        &self.name
    }

    fn property_path(&self) -> Option<&PropertyPath> {
        self.property_path.as_ref()
    }

    fn is_mapped(&self) -> bool {
        self.config.mapped
    }

    fn by_reference(&self) -> bool {
        self.config.by_reference
    }

    fn data(&self) -> &Value {
        &self.data
    }

    fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    fn kind(&self) -> NodeKind {
        if self.config.virtual_group {
            NodeKind::VirtualGroup
        } else {
            NodeKind::Real
        }
    }

    fn children(&self) -> &[Form] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Form] {
        &mut self.children
    }
}
