// Property path data mapper
// Transfers values between backing data and the real nodes of a form tree

use thiserror::Error;
use tracing::{debug, trace};

use crate::form::FormNode;
use crate::property_path::{PathError, PropertyAccess};
use crate::traversal::{flatten, flatten_mut};
use crate::value::Value;

/// Mapper errors
#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Expected argument of type \"{expected}\", \"{found}\" given")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Moves data between a form tree and the value it edits.
pub trait DataMapper<N: FormNode> {
    /// Populate every real node reachable from `forms` from `data`.
    fn map_data_to_forms(&self, data: &Value, forms: &mut [N]) -> Result<(), MapperError>;

    /// Populate a single node from `data`.
    fn map_data_to_form(&self, data: &Value, form: &mut N) -> Result<(), MapperError>;

    /// Write every writable real node reachable from `forms` into `data`.
    fn map_forms_to_data(&self, forms: &[N], data: &mut Value) -> Result<(), MapperError>;

    /// Write a single node into `data`.
    fn map_form_to_data(&self, form: &N, data: &mut Value) -> Result<(), MapperError>;
}

/// Maps each node through its own property path.
///
/// Holds no state; one instance can serve any number of trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyPathMapper;

impl PropertyPathMapper {
    pub fn new() -> Self {
        PropertyPathMapper
    }

    fn read_into<N: FormNode>(&self, data: &Value, form: &mut N) -> Result<(), MapperError> {
        if data.is_empty() {
            return Ok(());
        }

        let path = match form.property_path() {
            Some(path) if form.is_mapped() => path,
            _ => {
                trace!(form = form.name(), "form is not mapped, skipping read");
                return Ok(());
            }
        };

        let mut value = path.read(data)?;
        if !form.by_reference() {
            if let Value::Object(obj) = &value {
                value = Value::Object(obj.duplicate());
            }
        }

        trace!(form = form.name(), kind = value.kind_name(), "mapped data to form");
        form.set_data(value);
        Ok(())
    }

    fn write_from<N: FormNode>(&self, form: &N, data: &mut Value) -> Result<(), MapperError> {
        let path = match form.property_path() {
            Some(path) if form.is_mapped() => path,
            _ => {
                trace!(form = form.name(), "form is not mapped, skipping write-back");
                return Ok(());
            }
        };

        // A failed transformation or a disabled form must never overwrite the data
        if !form.is_synchronized() {
            debug!(form = form.name(), "form is not synchronized, skipping write-back");
            return Ok(());
        }
        if form.is_disabled() {
            debug!(form = form.name(), "form is disabled, skipping write-back");
            return Ok(());
        }

        let is_reference = form.data().identical(&path.read(data)?);

        // Only objects share state through the reference; containers are always rewritten
        if data.is_object() && is_reference && form.by_reference() {
            trace!(form = form.name(), "value is shared by reference, skipping write");
            return Ok(());
        }

        path.write(data, form.data().clone())?;
        trace!(form = form.name(), "mapped form to data");
        Ok(())
    }
}

impl<N: FormNode> DataMapper<N> for PropertyPathMapper {
    fn map_data_to_forms(&self, data: &Value, forms: &mut [N]) -> Result<(), MapperError> {
        if !data.is_empty() && !data.is_keyed_container() && !data.is_object() {
            return Err(MapperError::UnexpectedShape {
                expected: "object, map, list or empty",
                found: data.kind_name(),
            });
        }

        if data.is_empty() {
            trace!("data is empty, leaving forms at their defaults");
            return Ok(());
        }

        for form in flatten_mut(forms) {
            self.read_into(data, form)?;
        }
        Ok(())
    }

    fn map_data_to_form(&self, data: &Value, form: &mut N) -> Result<(), MapperError> {
        self.read_into(data, form)
    }

    fn map_forms_to_data(&self, forms: &[N], data: &mut Value) -> Result<(), MapperError> {
        for form in flatten(forms) {
            self.write_from(form, data)?;
        }
        Ok(())
    }

    fn map_form_to_data(&self, form: &N, data: &mut Value) -> Result<(), MapperError> {
        self.write_from(form, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Form, FormConfig};

    fn person() -> Value {
        Value::object("Person", value!({"name": "Alice", "age": 30}))
    }

    #[test]
    fn test_read_populates_forms() {
        let mut forms = vec![Form::field("name").unwrap(), Form::field("age").unwrap()];

        PropertyPathMapper.map_data_to_forms(&person(), &mut forms).unwrap();

        assert_eq!(forms[0].data(), &Value::from("Alice"));
        assert_eq!(forms[1].data(), &Value::from(30));
    }

    #[test]
    fn test_read_rejects_scalar_data() {
        let mut forms = vec![Form::field("name").unwrap().with_data(Value::from("default"))];

        let err = PropertyPathMapper
            .map_data_to_forms(&Value::from("Alice"), &mut forms)
            .unwrap_err();

        assert!(matches!(
            err,
            MapperError::UnexpectedShape { found: "string", .. }
        ));
        assert_eq!(forms[0].data(), &Value::from("default"));
    }

    #[test]
    fn test_single_form_read_skips_empty_data() {
        let mut form = Form::field("name").unwrap().with_data(Value::from("default"));
        PropertyPathMapper.map_data_to_form(&Value::Null, &mut form).unwrap();
        assert_eq!(form.data(), &Value::from("default"));
    }

    #[test]
    fn test_write_updates_data() {
        let mut data = person();
        let form = Form::field("name").unwrap().with_data(Value::from("Bob"));

        PropertyPathMapper.map_form_to_data(&form, &mut data).unwrap();

        assert_eq!(
            data.as_object().and_then(|o| o.property("name")),
            Some(Value::from("Bob"))
        );
    }

    #[test]
    fn test_write_suppressed_for_disabled_form() {
        let mut data = person();
        let form = Form::new("name", FormConfig::default().with_disabled(true))
            .unwrap()
            .with_data(Value::from("Bob"));

        PropertyPathMapper.map_form_to_data(&form, &mut data).unwrap();

        assert_eq!(
            data.as_object().and_then(|o| o.property("name")),
            Some(Value::from("Alice"))
        );
    }

    #[test]
    fn test_path_errors_pass_through() {
        let mut forms = vec![Form::field("email").unwrap()];
        let err = PropertyPathMapper
            .map_data_to_forms(&person(), &mut forms)
            .unwrap_err();
        assert!(matches!(
            err,
            MapperError::Path(PathError::NoSuchProperty { .. })
        ));
    }
}
