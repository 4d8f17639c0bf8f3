// form-path-mapper - Bidirectional data mapping for form trees
// Licensed under the MIT License

//! # form-path-mapper
//!
//! Moves values between a tree of form nodes and the data they edit.
//!
//! Before a form is displayed, [`PropertyPathMapper::map_data_to_forms`]
//! copies every mapped node's value out of the backing data. After the form
//! is submitted, [`PropertyPathMapper::map_forms_to_data`] writes the edited
//! values back, in place. Each node finds its value through its own
//! property path.
//!
//! ## Modules
//!
//! - `value` - Backing data model (keyed containers and shared objects)
//! - `property_path` - Path parsing, reading and writing
//! - `form` - Form node trait and a default tree implementation
//! - `traversal` - Depth-first iteration that inlines virtual groups
//! - `mapper` - The data mapper itself
//!
//! ## Example
//!
//! ```
//! use form_path_mapper::{value, DataMapper, Form, FormNode, PropertyPathMapper, Value};
//!
//! let mut data = Value::object("Person", value!({"name": "Alice"}));
//! let mut forms = vec![Form::field("name").unwrap()];
//!
//! let mapper = PropertyPathMapper::new();
//! mapper.map_data_to_forms(&data, &mut forms).unwrap();
//! assert_eq!(forms[0].data(), &Value::from("Alice"));
//!
//! forms[0].set_data(Value::from("Bob"));
//! mapper.map_forms_to_data(&forms, &mut data).unwrap();
//! assert_eq!(data.as_object().unwrap().property("name"), Some(Value::from("Bob")));
//! ```

#[macro_use]
pub mod value;
pub mod property_path;
pub mod form;
pub mod traversal;
pub mod mapper;

pub use form::{ConfigError, Form, FormConfig, FormNode, NodeKind};
pub use mapper::{DataMapper, MapperError, PropertyPathMapper};
pub use property_path::{PathError, PathSegment, PropertyAccess, PropertyPath};
pub use traversal::{flatten, flatten_mut, VirtualFlatten, VirtualFlattenMut};
pub use value::{ObjectRef, Value};
