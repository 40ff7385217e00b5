// Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Renaming the nodes of a graph.
//!
//! If several nodes receive the same name they are merged: the merged node
//! has the union of the attributes (later nodes overwrite earlier ones) and
//! the union of the edges. Edges that become parallel are merged as well in
//! a simple graph, and in a multigraph if they have the same key.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{relabel, Graph};
//!
//! let mut g = Graph::new();
//! g.add_path(vec!["a", "b", "c"]).unwrap();
//! let h = relabel::relabel_nodes(&g, |n| n.to_uppercase());
//! assert!(h.has_edge(&"A".to_string(), &"B".to_string()));
//!
//! let h = relabel::convert_node_labels_to_integers(&g, 10, relabel::Ordering::Default, None);
//! assert!(h.has_edge(&11, &12));
//! ```

use crate::attributes::Value;
use crate::error::{Error, Result};
use crate::graph::BaseGraph;
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use std::collections::HashMap;

use tracing::debug;

/// Order of the nodes for [`convert_node_labels_to_integers`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Ordering {
    /// Insertion order.
    #[default]
    Default,
    /// Ascending order of the node labels.
    Sorted,
    /// Ascending order of the degrees, ties in insertion order.
    IncreasingDegree,
    /// Descending order of the degrees, ties in insertion order.
    DecreasingDegree,
}

/// Return a copy of `g` with each node `n` renamed to `f(n)`.
///
/// All attributes are copied.
pub fn relabel_nodes<N, N2, D, M, F>(g: &BaseGraph<N, D, M>, f: F) -> BaseGraph<N2, D, M>
where
    N: NodeKey,
    N2: NodeKey,
    D: EdgeType,
    M: Multiplicity,
    F: FnMut(&N) -> N2,
{
    g.relabeled(f, true)
}

/// Rename the nodes of `g` according to `mapping`.
///
/// Nodes not in `mapping` keep their name. All renamings take effect at
/// the same time, so a mapping may swap the names of two nodes. The
/// attribute maps are kept, so subgraphs sharing attributes with `g` see
/// changes made through the renamed graph.
///
/// Fails with [`Error::NotFound`] if a key of `mapping` is not in the
/// graph and with [`Error::PreconditionViolation`] if `g` is frozen.
pub fn relabel_nodes_in_place<N, D, M>(g: &mut BaseGraph<N, D, M>, mapping: &HashMap<N, N>) -> Result<()>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if g.is_frozen() {
        return Err(Error::frozen());
    }
    if let Some(n) = mapping.keys().find(|n| !g.has_node(n)) {
        return Err(Error::node_not_found(n));
    }
    debug!(renamed = mapping.len(), nodes = g.number_of_nodes(), "relabel nodes in place");
    let h = g.relabeled(|n| mapping.get(n).unwrap_or(n).clone(), false);
    *g = h;
    Ok(())
}

/// Return a copy of `g` whose nodes are the integers `first_label,
/// first_label + 1, ...` assigned in the given order.
///
/// If `label_attribute` is given, the old name of each node is stored in
/// this node attribute.
pub fn convert_node_labels_to_integers<N, D, M>(
    g: &BaseGraph<N, D, M>,
    first_label: usize,
    ordering: Ordering,
    label_attribute: Option<&str>,
) -> BaseGraph<usize, D, M>
where
    N: NodeKey + Ord + Into<Value>,
    D: EdgeType,
    M: Multiplicity,
{
    let mut nodes: Vec<&N> = g.nodes().collect();
    match ordering {
        Ordering::Default => (),
        Ordering::Sorted => nodes.sort(),
        Ordering::IncreasingDegree => nodes.sort_by_key(|n| g.degree(n).unwrap_or(0)),
        Ordering::DecreasingDegree => nodes.sort_by_key(|n| std::cmp::Reverse(g.degree(n).unwrap_or(0))),
    }
    let mapping: HashMap<&N, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, first_label + i)).collect();
    let h = g.relabeled(|n| mapping[n], true);
    if let Some(name) = label_attribute {
        for (n, i) in mapping {
            if let Some(attrs) = h.node_attrs(&i) {
                attrs.borrow_mut().insert(name.to_string(), n.clone().into());
            }
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attrs;
    use crate::classes;
    use crate::{DiGraph, Graph, MultiGraph};
    use serde_json::json;

    #[test]
    fn test_relabel_copy() {
        let mut g = Graph::new();
        g.add_node_with(1, attrs(json!({"color": "red"}))).unwrap();
        g.add_edge_with(1, 2, attrs(json!({"weight": 3}))).unwrap();
        let h = relabel_nodes(&g, |n| n * 10);
        assert_eq!(h.nodes().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(h.node_attrs(&10).unwrap().get("color"), Some(json!("red")));
        assert_eq!(h.get_edge_data(&20, &10).unwrap().get("weight"), Some(json!(3)));

        // independent attributes
        h.node_attrs(&10).unwrap().borrow_mut().clear();
        assert_eq!(g.node_attrs(&1).unwrap().get("color"), Some(json!("red")));
    }

    #[test]
    fn test_merge() {
        let g: Graph<usize> = classes::path_graph(4);
        let h = relabel_nodes(&g, |&n| n / 2);
        assert_eq!(h.number_of_nodes(), 2);
        // 0-1 and 2-3 become self-loops, 1-2 becomes 0-1
        assert_eq!(h.number_of_edges(), 3);
        assert_eq!(h.number_of_selfloops(), 2);

        // keys 0 and 1 between 0 and 1, key 0 between 2 and 1
        let mut g = MultiGraph::new();
        g.add_edges_from(vec![(0, 1), (0, 1), (2, 1)]).unwrap();
        let h = relabel_nodes(&g, |&n| if n == 2 { 0 } else { n });
        assert_eq!(h.number_of_edges(), 2);
        assert_eq!(h.number_of_edges_between(&0, &1), 2);
    }

    #[test]
    fn test_in_place() {
        let mut g: DiGraph<usize> = classes::path_graph(3);
        g.node_attrs(&0).unwrap().borrow_mut().insert("x".into(), json!(1));
        let sub = g.subgraph(&[0, 1]);

        let mapping: HashMap<usize, usize> = vec![(0, 1), (1, 0)].into_iter().collect();
        relabel_nodes_in_place(&mut g, &mapping).unwrap();
        assert!(g.has_edge(&1, &0));
        assert!(g.has_edge(&0, &2));
        assert!(!g.has_edge(&0, &1));
        assert_eq!(g.node_attrs(&1).unwrap().get("x"), Some(json!(1)));

        // attributes are still shared with the subgraph
        g.node_attrs(&1).unwrap().borrow_mut().insert("y".into(), json!(2));
        assert_eq!(sub.node_attrs(&0).unwrap().get("y"), Some(json!(2)));

        let mapping: HashMap<usize, usize> = vec![(7, 8)].into_iter().collect();
        assert!(matches!(relabel_nodes_in_place(&mut g, &mapping), Err(Error::NotFound(_))));

        g.freeze();
        let mapping: HashMap<usize, usize> = HashMap::new();
        assert!(matches!(
            relabel_nodes_in_place(&mut g, &mapping),
            Err(Error::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_convert_to_integers() {
        let mut g = Graph::new();
        g.add_edges_from(vec![("c", "a"), ("c", "b"), ("d", "c")]).unwrap();

        let h = convert_node_labels_to_integers(&g, 0, Ordering::Sorted, Some("label"));
        assert_eq!(h.node_attrs(&0).unwrap().get("label"), Some(json!("a")));
        assert!(h.has_edge(&2, &3));

        let h = convert_node_labels_to_integers(&g, 1, Ordering::DecreasingDegree, None);
        assert_eq!(h.degree(&1), Ok(3));

        let h = convert_node_labels_to_integers(&g, 0, Ordering::IncreasingDegree, Some("label"));
        assert_eq!(h.node_attrs(&0).unwrap().get("label"), Some(json!("a")));
        assert_eq!(h.node_attrs(&3).unwrap().get("label"), Some(json!("c")));
    }
}
