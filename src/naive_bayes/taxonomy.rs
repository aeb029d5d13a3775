//! The set of candidate classes of the hierarchical classifier.
//!
//! Classes are dot-separated paths (`"1.2.3"`) stored in a trie.
//! Each node of the trie is one path;
//! a node is a candidate class iff it is `registered`.
use serde::{
    Serialize,
    Deserialize,
};

use std::collections::BTreeMap;
use std::fmt;

use crate::common::constants::LABEL_SEPARATOR;
use crate::common::label_path;
use super::model::TaxonomyPolicy;


const ROOT: usize = 0;


#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaxonomyNode {
    path: String,
    parent: Option<usize>,
    children: BTreeMap<String, usize>,
    registered: bool,
    tree_size: usize,
    usefulness: f64,
}


impl TaxonomyNode {
    fn new(path: String, parent: Option<usize>) -> Self {
        Self {
            path,
            parent,
            children: BTreeMap::new(),
            registered: false,
            tree_size: 1,
            usefulness: 1.0,
        }
    }
}


/// The registered classes and their usefulness weights.
///
/// Classes are visited in depth-first pre-order with
/// siblings sorted by their last segment.
/// Ties in the classification are broken by this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTaxonomy {
    policy: TaxonomyPolicy,
    nodes: Vec<TaxonomyNode>,
    n_registered: usize,
}


impl ClassTaxonomy {
    /// Construct an empty taxonomy.
    pub fn new(policy: TaxonomyPolicy) -> Self {
        Self {
            policy,
            nodes: vec![TaxonomyNode::new(String::new(), None)],
            n_registered: 0,
        }
    }


    /// Returns the registration policy.
    #[inline]
    pub fn policy(&self) -> TaxonomyPolicy {
        self.policy
    }


    /// Returns the number of registered classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_registered
    }


    /// Returns `true` if no class is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_registered == 0
    }


    /// Returns `true` if `path` is a registered class.
    pub fn contains(&self, path: &str) -> bool {
        self.find(path)
            .is_some_and(|node| self.nodes[node].registered)
    }


    /// Register a class path according to the policy.
    ///
    /// - `FullHierarchy` registers `path` and all of its prefixes.
    /// - `MandatoryLeaf` registers `path` only if no registered class
    ///   lies strictly below it, and then unregisters
    ///   every strict ancestor of `path`.
    ///
    /// Registering a class that already exists does nothing.
    /// Call [`ClassTaxonomy::compute_usefulness`] again
    /// after the last registration.
    pub fn register(&mut self, path: &str) {
        if path.is_empty() || self.contains(path) {
            return;
        }

        let node = self.insert_path(path);
        match self.policy {
            TaxonomyPolicy::FullHierarchy => {
                let mut cursor = Some(node);
                while let Some(n) = cursor.filter(|&n| n != ROOT) {
                    self.mark(n, true);
                    cursor = self.nodes[n].parent;
                }
            },
            TaxonomyPolicy::MandatoryLeaf => {
                if self.has_registered_descendant(node) {
                    return;
                }
                self.mark(node, true);
                let mut cursor = self.nodes[node].parent;
                while let Some(n) = cursor.filter(|&n| n != ROOT) {
                    self.mark(n, false);
                    cursor = self.nodes[n].parent;
                }
            },
        }
    }


    /// Compute the usefulness of every registered class.
    ///
    /// The tree size of a class is `1` plus the number of
    /// registered classes strictly below it. With `M` the largest
    /// tree size, the usefulness of a class of tree size `s` is
    /// ```txt
    /// 1 - log2(s) / log2(M + 1)
    /// ```
    /// which always lies in `(0, 1]`.
    pub fn compute_usefulness(&mut self) {
        let n_nodes = self.nodes.len();
        let mut below = vec![0_usize; n_nodes];

        // A parent is always created before its children.
        for node in (1..n_nodes).rev() {
            let own = below[node] + self.nodes[node].registered as usize;
            if let Some(parent) = self.nodes[node].parent {
                below[parent] += own;
            }
        }

        let mut max_size = 0;
        for (node, b) in self.nodes.iter_mut().zip(below) {
            node.tree_size = 1 + b;
            if node.registered {
                max_size = max_size.max(node.tree_size);
            }
        }

        let denom = ((max_size + 1) as f64).log2();
        for node in self.nodes.iter_mut().filter(|n| n.registered) {
            node.usefulness = 1.0 - (node.tree_size as f64).log2() / denom;
        }
    }


    /// Returns the usefulness of a registered class.
    pub fn usefulness_of(&self, path: &str) -> Option<f64> {
        self.find(path)
            .map(|node| &self.nodes[node])
            .filter(|node| node.registered)
            .map(|node| node.usefulness)
    }


    /// Returns the tree size of a registered class.
    pub fn tree_size_of(&self, path: &str) -> Option<usize> {
        self.find(path)
            .map(|node| &self.nodes[node])
            .filter(|node| node.registered)
            .map(|node| node.tree_size)
    }


    /// Returns `true` if `a` is an ancestor of `b` or `a == b`,
    /// comparing whole segments.
    #[inline]
    pub fn is_ancestor_or_equal(a: &str, b: &str) -> bool {
        label_path::is_ancestor_or_equal(a, b)
    }


    /// Returns an iterator over the registered classes
    /// and their usefulness, in depth-first pre-order.
    pub fn classes(&self) -> Classes<'_> {
        let stack = self.nodes[ROOT].children.values()
            .rev()
            .copied()
            .collect();
        Classes { taxonomy: self, stack }
    }


    fn find(&self, path: &str) -> Option<usize> {
        path.split(LABEL_SEPARATOR)
            .try_fold(ROOT, |node, segment| {
                self.nodes[node].children.get(segment).copied()
            })
    }


    fn insert_path(&mut self, path: &str) -> usize {
        let mut node = ROOT;
        let mut end = 0;
        for segment in path.split(LABEL_SEPARATOR) {
            end += segment.len();
            node = match self.nodes[node].children.get(segment) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    let prefix = path[..end].to_string();
                    self.nodes.push(TaxonomyNode::new(prefix, Some(node)));
                    self.nodes[node].children.insert(segment.to_string(), child);
                    child
                },
            };
            end += LABEL_SEPARATOR.len_utf8();
        }
        node
    }


    fn mark(&mut self, node: usize, registered: bool) {
        let n = &mut self.nodes[node];
        if n.registered != registered {
            n.registered = registered;
            if registered {
                self.n_registered += 1;
            } else {
                self.n_registered -= 1;
            }
        }
    }


    fn has_registered_descendant(&self, node: usize) -> bool {
        let mut stack = self.nodes[node].children.values()
            .copied()
            .collect::<Vec<_>>();
        while let Some(n) = stack.pop() {
            if self.nodes[n].registered {
                return true;
            }
            stack.extend(self.nodes[n].children.values().copied());
        }
        false
    }
}


/// Iterator over the registered classes of a [`ClassTaxonomy`].
pub struct Classes<'a> {
    taxonomy: &'a ClassTaxonomy,
    stack: Vec<usize>,
}


impl<'a> Iterator for Classes<'a> {
    type Item = (&'a str, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let taxonomy = self.taxonomy;
        while let Some(n) = self.stack.pop() {
            let node = &taxonomy.nodes[n];
            self.stack.extend(node.children.values().rev().copied());
            if node.registered {
                return Some((node.path.as_str(), node.usefulness));
            }
        }
        None
    }
}


impl fmt::Display for ClassTaxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, usefulness) in self.classes() {
            writeln!(f, "{path}\t{usefulness}")?;
        }
        Ok(())
    }
}
