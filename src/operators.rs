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

//! Binary operations on graphs.
//!
//! All operations return new graphs. The results of [`union`],
//! [`disjoint_union`] and [`compose`] carry copies of the attributes of
//! both operands (the second graph wins on conflicts). The results of
//! [`intersection`], [`difference`] and [`symmetric_difference`] carry no
//! attributes. In multigraphs edges are identified by their end points and
//! keys.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{operators, Graph};
//!
//! let mut g = Graph::new();
//! g.add_path(vec![1, 2, 3]).unwrap();
//! let mut h = Graph::new();
//! h.add_path(vec![3, 4]).unwrap();
//!
//! let c = operators::compose(&g, &h);
//! assert_eq!(c.number_of_edges(), 3);
//! assert!(operators::union(&g, &h).is_err());
//! ```

use crate::attributes::{Attrs, EdgeKey};
use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::traits::{EdgeType, Indexable, Multiplicity, NodeKey};

use std::collections::HashMap;

use tracing::debug;

/// Add copies of all nodes, edges and attributes of `g` to `r`.
///
/// Existing nodes and edges get their attributes updated.
fn absorb<N, D, M>(r: &mut BaseGraph<N, D, M>, g: &BaseGraph<N, D, M>)
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    r.graph_attrs().update(&g.graph_attrs().borrow());
    let mut map = HashMap::new();
    for (n, attrs) in g.nodes_with_data() {
        map.insert(n, r.merge_node(n.clone(), attrs.deep_copy()));
    }
    for (u, v, key, attrs) in keyed_edges(g) {
        r.merge_edge(map[u], map[v], key.clone(), attrs.deep_copy());
    }
}

/// All edges of `g` with their keys.
fn keyed_edges<N, D, M>(g: &BaseGraph<N, D, M>) -> impl Iterator<Item = (&N, &N, &EdgeKey, &Attrs)> + '_
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    g.edge_triples().map(move |(u, v, e)| {
        let data = g.edge_data(e);
        (g.id2node(u), g.id2node(v), &data.key, &data.attrs)
    })
}

/// Return `true` if `g` has the edge `(u, v)` (with the given key in a
/// multigraph).
fn has_keyed_edge<N, D, M>(g: &BaseGraph<N, D, M>, u: &N, v: &N, key: &EdgeKey) -> bool
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    match (g.node_id(u), g.node_id(v)) {
        (Some(uid), Some(vid)) if M::is_multi() => g.edge_with_key(uid, vid, key).is_some(),
        (Some(uid), Some(vid)) => g.neighbor_ids(uid).any(|w| w == vid),
        _ => false,
    }
}

fn check_same_nodes<N, D, M>(g: &BaseGraph<N, D, M>, h: &BaseGraph<N, D, M>) -> Result<()>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if g.number_of_nodes() != h.number_of_nodes() || g.nodes().any(|n| !h.has_node(n)) {
        return Err(Error::PreconditionViolation("node sets of graphs are not equal".to_string()));
    }
    Ok(())
}

/// A graph with the nodes of `g` and no edges or attributes.
fn bare_nodes<N, D, M>(g: &BaseGraph<N, D, M>) -> (BaseGraph<N, D, M>, Vec<Option<NodeId>>)
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut r = BaseGraph::new();
    let mut map = vec![None; g.node_bound()];
    for u in g.node_ids() {
        map[u.index()] = Some(r.ensure_node(g.id2node(u).clone()));
    }
    (r, map)
}

/// Return the union of two graphs with disjoint node sets.
///
/// Fails with [`Error::PreconditionViolation`] if the node sets intersect,
/// see [`disjoint_union`] and [`compose`] for alternatives.
pub fn union<N, D, M>(g: &BaseGraph<N, D, M>, h: &BaseGraph<N, D, M>) -> Result<BaseGraph<N, D, M>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if let Some(n) = g.nodes().find(|n| h.has_node(n)) {
        return Err(Error::PreconditionViolation(format!(
            "node sets of graphs are not disjoint, both contain {:?}",
            n
        )));
    }
    Ok(compose(g, h))
}

/// Return the union of two graphs with the nodes renamed to consecutive
/// integers.
///
/// The nodes of `g` become `0, ..., n_g - 1`, the nodes of `h` become
/// `n_g, ..., n_g + n_h - 1`, both in insertion order.
pub fn disjoint_union<N, D, M>(g: &BaseGraph<N, D, M>, h: &BaseGraph<N, D, M>) -> BaseGraph<usize, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let number = |g: &BaseGraph<N, D, M>, first: usize| {
        let labels: HashMap<&N, usize> = g.nodes().enumerate().map(|(i, n)| (n, first + i)).collect();
        g.relabeled(|n| labels[n], true)
    };
    let r1 = number(g, 0);
    let r2 = number(h, g.number_of_nodes());
    compose(&r1, &r2)
}

/// Return the graph with the nodes and edges of both graphs.
///
/// Attributes of `h` take precedence over those of `g`.
pub fn compose<N, D, M>(g: &BaseGraph<N, D, M>, h: &BaseGraph<N, D, M>) -> BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    debug!(
        nodes = g.number_of_nodes() + h.number_of_nodes(),
        edges = g.number_of_edges() + h.number_of_edges(),
        "compose graphs"
    );
    let mut r = BaseGraph::new();
    absorb(&mut r, g);
    absorb(&mut r, h);
    r
}

/// Return the graph with the edges contained in both graphs.
///
/// Both graphs must have the same node set.
pub fn intersection<N, D, M>(g: &BaseGraph<N, D, M>, h: &BaseGraph<N, D, M>) -> Result<BaseGraph<N, D, M>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    check_same_nodes(g, h)?;
    let (mut r, map) = bare_nodes(g);
    for (u, v, e) in g.edge_triples() {
        let key = &g.edge_data(e).key;
        if has_keyed_edge(h, g.id2node(u), g.id2node(v), key) {
            insert(&mut r, &map, u, v, key);
        }
    }
    Ok(r)
}

/// Return the graph with the edges of `g` that are not in `h`.
///
/// Both graphs must have the same node set.
pub fn difference<N, D, M>(g: &BaseGraph<N, D, M>, h: &BaseGraph<N, D, M>) -> Result<BaseGraph<N, D, M>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    check_same_nodes(g, h)?;
    let (mut r, map) = bare_nodes(g);
    for (u, v, e) in g.edge_triples() {
        let key = &g.edge_data(e).key;
        if !has_keyed_edge(h, g.id2node(u), g.id2node(v), key) {
            insert(&mut r, &map, u, v, key);
        }
    }
    Ok(r)
}

/// Return the graph with the edges that are in exactly one of the graphs.
///
/// Both graphs must have the same node set.
pub fn symmetric_difference<N, D, M>(
    g: &BaseGraph<N, D, M>,
    h: &BaseGraph<N, D, M>,
) -> Result<BaseGraph<N, D, M>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut r = difference(g, h)?;
    for (u, v, key, _) in keyed_edges(h) {
        if !has_keyed_edge(g, u, v, key) {
            let uid = r.ensure_node(u.clone());
            let vid = r.ensure_node(v.clone());
            r.merge_edge(uid, vid, key.clone(), Attrs::default());
        }
    }
    Ok(r)
}

fn insert<N, D, M>(r: &mut BaseGraph<N, D, M>, map: &[Option<NodeId>], u: NodeId, v: NodeId, key: &EdgeKey)
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if let (Some(ru), Some(rv)) = (map[u.index()], map[v.index()]) {
        r.merge_edge(ru, rv, key.clone(), Attrs::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attrs;
    use crate::{DiGraph, Graph, MultiGraph};
    use serde_json::json;

    fn square() -> Graph<usize> {
        let mut g = Graph::new();
        g.add_cycle(vec![0, 1, 2, 3]).unwrap();
        g
    }

    fn diagonal() -> Graph<usize> {
        let mut h = Graph::new();
        h.add_nodes_from(0..4).unwrap();
        h.add_edges_from(vec![(0, 1), (0, 2)]).unwrap();
        h
    }

    #[test]
    fn test_union() {
        let mut g = Graph::new();
        g.set_name("g");
        g.add_node_with(1, attrs(json!({"color": "red"}))).unwrap();
        g.add_edge(1, 2).unwrap();
        let mut h = Graph::new();
        h.set_name("h");
        h.add_edge(3, 4).unwrap();

        let r = union(&g, &h).unwrap();
        assert_eq!(r.number_of_nodes(), 4);
        assert_eq!(r.number_of_edges(), 2);
        assert_eq!(r.name(), "h");
        assert_eq!(r.node_attrs(&1).unwrap().get("color"), Some(json!("red")));

        // attributes are copied
        r.node_attrs(&1).unwrap().borrow_mut().clear();
        assert_eq!(g.node_attrs(&1).unwrap().get("color"), Some(json!("red")));

        h.add_node(1).unwrap();
        assert!(matches!(union(&g, &h), Err(Error::PreconditionViolation(_))));
    }

    #[test]
    fn test_disjoint_union() {
        let g = square();
        let r = disjoint_union(&g, &g);
        assert_eq!(r.number_of_nodes(), 8);
        assert_eq!(r.number_of_edges(), 8);
        assert!(r.has_edge(&4, &7));
        assert!(!r.has_edge(&3, &4));
    }

    #[test]
    fn test_compose() {
        let mut g = DiGraph::new();
        g.add_edge_with(1, 2, attrs(json!({"weight": 1, "color": "red"}))).unwrap();
        let mut h = DiGraph::new();
        h.add_edge_with(1, 2, attrs(json!({"weight": 2}))).unwrap();
        h.add_edge(2, 1).unwrap();

        let r = compose(&g, &h);
        assert_eq!(r.number_of_edges(), 2);
        let data = r.get_edge_data(&1, &2).unwrap();
        assert_eq!(data.get("weight"), Some(json!(2)));
        assert_eq!(data.get("color"), Some(json!("red")));
    }

    #[test]
    fn test_set_operations() {
        let g = square();
        let h = diagonal();

        let r = intersection(&g, &h).unwrap();
        assert_eq!(r.number_of_nodes(), 4);
        assert_eq!(r.edges().collect::<Vec<_>>(), vec![(&0, &1)]);

        let r = difference(&g, &h).unwrap();
        assert_eq!(r.number_of_edges(), 3);
        assert!(!r.has_edge(&0, &1));
        assert!(r.has_edge(&3, &0));

        let r = symmetric_difference(&g, &h).unwrap();
        assert_eq!(r.number_of_edges(), 4);
        assert!(r.has_edge(&2, &0));
        assert!(!r.has_edge(&0, &1));

        let mut small = Graph::new();
        small.add_edge(0, 1).unwrap();
        assert!(matches!(intersection(&g, &small), Err(Error::PreconditionViolation(_))));
        assert!(matches!(difference(&g, &small), Err(Error::PreconditionViolation(_))));
        assert!(matches!(symmetric_difference(&g, &small), Err(Error::PreconditionViolation(_))));
    }

    #[test]
    fn test_multigraph_keys() {
        let mut g = MultiGraph::new();
        g.add_edges_from(vec![(0, 1), (0, 1)]).unwrap();
        let mut h = MultiGraph::new();
        h.add_edges_from(vec![(0, 1)]).unwrap();

        assert_eq!(intersection(&g, &h).unwrap().number_of_edges(), 1);
        let d = difference(&g, &h).unwrap();
        assert_eq!(d.edge_keys(&0, &1), vec![&EdgeKey::Int(1)]);
        assert_eq!(compose(&g, &h).number_of_edges(), 2);
    }
}
