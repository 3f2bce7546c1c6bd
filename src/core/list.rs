//! Ordered results of a query
//!
//! Every query operation returns a fresh [`NodeList`]. Most mf2 properties
//! hold a single value, so the list forwards the [`Node`] accessors to its
//! first element; on an empty list those accessors fail with
//! [`Mf2Error::EmptyResult`] instead of guessing.

use crate::core::jf2::{Jf2, Jf2Options};
use crate::core::node::Node;
use crate::error::{Mf2Error, Result};
use std::ops::Index;

/// An ordered collection of nodes produced by a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeList<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> NodeList<'a> {
    pub fn new(nodes: Vec<Node<'a>>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Node<'a>> {
        self.nodes.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<'a>> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// The head of the list, the element every forwarding accessor reads
    pub fn first(&self) -> Result<Node<'a>> {
        self.head("first")
    }

    fn head(&self, operation: &str) -> Result<Node<'a>> {
        self.nodes
            .first()
            .copied()
            .ok_or_else(|| Mf2Error::empty_result(operation))
    }

    /// Keep the microformats carrying `type_name`, in their original order
    ///
    /// Plain and rich-text entries have no types and never match.
    pub fn by_type(&self, type_name: &str) -> NodeList<'a> {
        self.nodes
            .iter()
            .filter(|node| node.has_type(type_name))
            .copied()
            .collect()
    }

    pub fn value(&self) -> Result<&'a str> {
        self.head("value")?.value()
    }

    pub fn html(&self) -> Result<&'a str> {
        self.head("html")?.html()
    }

    pub fn types(&self) -> Result<&'a [String]> {
        self.head("types")?.types()
    }

    pub fn prop(&self, name: &str) -> Result<NodeList<'a>> {
        self.head("prop")?.prop(name)
    }

    pub fn children(&self) -> Result<NodeList<'a>> {
        self.head("children")?.children()
    }

    pub fn to_jf2(&self) -> Result<Jf2> {
        self.head("to_jf2")?.to_jf2()
    }

    pub fn to_jf2_with(&self, options: &Jf2Options) -> Result<Jf2> {
        self.head("to_jf2")?.to_jf2_with(options)
    }

    /// Convert every element; fails on the first non-microformat
    pub fn to_jf2_all(&self) -> Result<Vec<Jf2>> {
        self.to_jf2_all_with(&Jf2Options::default())
    }

    pub fn to_jf2_all_with(&self, options: &Jf2Options) -> Result<Vec<Jf2>> {
        self.nodes
            .iter()
            .map(|node| node.to_jf2_with(options))
            .collect()
    }
}

impl<'a> Index<usize> for NodeList<'a> {
    type Output = Node<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<'a> FromIterator<Node<'a>> for NodeList<'a> {
    fn from_iter<I: IntoIterator<Item = Node<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = Node<'a>;
    type IntoIter = std::vec::IntoIter<Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'l, 'a> IntoIterator for &'l NodeList<'a> {
    type Item = &'l Node<'a>;
    type IntoIter = std::slice::Iter<'l, Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
