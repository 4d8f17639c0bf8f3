// Round trip of an object through a small form tree
//
// Shows both mapping directions, a virtual group, a by-value field and a
// field whose submitted input failed to transform.

use form_path_mapper::{value, DataMapper, Form, FormConfig, FormNode, PropertyPathMapper, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Property Path Mapper Demo ===\n");

    let address = Value::object("Address", value!({"city": "New York", "zip": "10001"}));
    let mut person = Value::object("Person", value!({"name": "Alice", "age": 30}));
    if let Some(obj) = person.as_object() {
        obj.set_property("address", address.clone());
    }

    let mut forms = vec![
        Form::field("name")?,
        Form::field("age")?,
        Form::new("details", FormConfig::virtual_group())?
            .with_child(Form::new(
                "address",
                FormConfig::default().with_by_reference(false),
            )?),
    ];

    let mapper = PropertyPathMapper::new();
    mapper.map_data_to_forms(&person, &mut forms)?;

    println!("--- After mapping data to forms ---");
    print_forms(&forms);

    forms[0].set_data(Value::from("Alicia"));
    forms[1].set_data(Value::from("thirty-one"));
    forms[1].mark_unsynchronized();
    if let Some(address) = forms[2].child_mut("address") {
        if let Some(obj) = address.data().as_object() {
            obj.set_property("city", Value::from("Boston"));
        }
    }

    mapper.map_forms_to_data(&forms, &mut person)?;

    println!("\n--- After mapping forms to data ---");
    println!("  person           => {}", person);
    println!("  original address => {}", address);

    Ok(())
}

fn print_forms(forms: &[Form]) {
    for form in form_path_mapper::flatten(forms) {
        println!("  {:<8} => {}", form.name(), form.data());
    }
}
