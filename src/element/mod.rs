mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect IDs of all elements carrying the given class, in tree order.
/// The root itself is included when it matches.
pub fn query_class(root: &Element, class: &str) -> Vec<String> {
    let mut result = Vec::new();
    query_class_recursive(root, class, &mut result);
    result
}

fn query_class_recursive(element: &Element, class: &str, result: &mut Vec<String>) {
    if element.has_class(class) {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            query_class_recursive(child, class, result);
        }
    }
}

/// Apply a mutation to every element carrying the given class.
pub fn for_each_class_mut(root: &mut Element, class: &str, f: &mut impl FnMut(&mut Element)) {
    if root.has_class(class) {
        f(root);
    }
    if let Content::Children(children) = &mut root.content {
        for child in children {
            for_each_class_mut(child, class, f);
        }
    }
}
