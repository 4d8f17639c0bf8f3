// Flattening traversal
// Walks a form list depth first, inlining virtual groups

use std::iter::FusedIterator;
use std::slice;

use crate::form::{FormNode, NodeKind};

/// Iterator over the real nodes of a form list.
///
/// Virtual groups are never yielded; their children are visited in their
/// place, recursively. Real nodes are yielded without descending into their
/// children, since they are mapped as a whole.
pub struct VirtualFlatten<'a, N> {
    stack: Vec<slice::Iter<'a, N>>,
}

/// Mutable counterpart of [`VirtualFlatten`].
pub struct VirtualFlattenMut<'a, N> {
    stack: Vec<slice::IterMut<'a, N>>,
}

pub fn flatten<N: FormNode>(forms: &[N]) -> VirtualFlatten<'_, N> {
    VirtualFlatten {
        stack: vec![forms.iter()],
    }
}

pub fn flatten_mut<N: FormNode>(forms: &mut [N]) -> VirtualFlattenMut<'_, N> {
    VirtualFlattenMut {
        stack: vec![forms.iter_mut()],
    }
}

impl<'a, N: FormNode> Iterator for VirtualFlatten<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        loop {
            let node = match self.stack.last_mut()?.next() {
                Some(node) => node,
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            match node.kind() {
                NodeKind::VirtualGroup => self.stack.push(node.children().iter()),
                NodeKind::Real => return Some(node),
            }
        }
    }
}

impl<'a, N: FormNode> FusedIterator for VirtualFlatten<'a, N> {}

impl<'a, N: FormNode> Iterator for VirtualFlattenMut<'a, N> {
    type Item = &'a mut N;

    fn next(&mut self) -> Option<&'a mut N> {
        loop {
            let node = match self.stack.last_mut()?.next() {
                Some(node) => node,
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            match node.kind() {
                NodeKind::VirtualGroup => self.stack.push(node.children_mut().iter_mut()),
                NodeKind::Real => return Some(node),
            }
        }
    }
}

impl<'a, N: FormNode> FusedIterator for VirtualFlattenMut<'a, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Form, FormConfig};
    use crate::value::Value;

    fn field(name: &str) -> Form {
        Form::field(name).unwrap()
    }

    fn group(name: &str, children: Vec<Form>) -> Form {
        children
            .into_iter()
            .fold(Form::new(name, FormConfig::virtual_group()).unwrap(), Form::with_child)
    }

    fn names<'a>(iter: impl Iterator<Item = &'a Form>) -> Vec<&'a str> {
        iter.map(|f| f.name()).collect()
    }

    #[test]
    fn test_flat_list_keeps_order() {
        let forms = vec![field("a"), field("b"), field("c")];
        assert_eq!(names(flatten(&forms)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_virtual_groups_are_inlined() {
        let forms = vec![
            field("a"),
            group(
                "g1",
                vec![field("b"), group("g2", vec![field("c"), field("d")]), field("e")],
            ),
            field("f"),
        ];
        assert_eq!(names(flatten(&forms)), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_empty_groups_yield_nothing() {
        let forms = vec![group("g", vec![]), group("h", vec![group("i", vec![])])];
        assert_eq!(flatten(&forms).count(), 0);
        assert_eq!(flatten::<Form>(&[]).count(), 0);
    }

    #[test]
    fn test_real_compound_nodes_are_not_descended() {
        let address = field("address").with_child(field("street"));
        let forms = vec![address, field("name")];
        assert_eq!(names(flatten(&forms)), vec!["address", "name"]);
    }

    #[test]
    fn test_traversal_is_single_pass() {
        let forms = vec![group("g", vec![field("a")])];
        let mut iter = flatten(&forms);
        assert_eq!(iter.next().map(|f| f.name()), Some("a"));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_flatten_mut_reaches_nested_nodes() {
        let mut forms = vec![group("g", vec![field("a"), group("h", vec![field("b")])])];

        for (i, form) in flatten_mut(&mut forms).enumerate() {
            form.set_data(Value::from(i));
        }

        let data: Vec<Value> = flatten(&forms).map(|f| f.data().clone()).collect();
        assert_eq!(data, vec![Value::from(0usize), Value::from(1usize)]);
        // Groups keep their own value untouched
        assert_eq!(forms[0].data(), &Value::Null);
    }
}
