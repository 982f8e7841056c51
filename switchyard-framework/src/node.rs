use rustc_hash::FxHashMap;

use crate::{method::Method, middleware::Endpoint};

/// A single vertex of the routing trie.
pub(crate) struct Node<E> {
    pub(crate) children: FxHashMap<String, Node<E>>,
    pub(crate) param: Option<ParamEdge<E>>,
    pub(crate) is_end: bool,
    pub(crate) handlers: FxHashMap<Method, Endpoint<E>>,
}

/// The edge matching any single segment. The name it binds is part of the
/// edge and never changes once the edge exists.
pub(crate) struct ParamEdge<E> {
    pub(crate) name: String,
    pub(crate) node: Box<Node<E>>,
}

impl<E> Node<E> {
    pub(crate) fn new() -> Self {
        Node {
            children: FxHashMap::default(),
            param: None,
            is_end: false,
            handlers: FxHashMap::default(),
        }
    }

    pub(crate) fn child(&self, segment: &str) -> Option<&Node<E>> {
        self.children.get(segment)
    }

    pub(crate) fn param(&self) -> Option<&ParamEdge<E>> {
        self.param.as_ref()
    }

    pub(crate) fn child_or_insert(&mut self, segment: &str) -> &mut Node<E> {
        self.children
            .entry(segment.to_string())
            .or_insert_with(Node::new)
    }

    /// Descend through the parameter edge, creating it with `name` if absent.
    /// An existing edge must already be bound to `name`.
    pub(crate) fn param_child_or_insert(&mut self, name: &str) -> &mut Node<E> {
        let edge = self.param.get_or_insert_with(|| ParamEdge {
            name: name.to_string(),
            node: Box::new(Node::new()),
        });
        debug_assert_eq!(edge.name, name);

        edge.node.as_mut()
    }

    /// Name already bound to the parameter edge, if one exists.
    pub(crate) fn param_name(&self) -> Option<&str> {
        self.param.as_ref().map(|edge| edge.name.as_str())
    }
}
