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

//! Conversion of graphs from and to plain data.
//!
//! Three adjacency shapes are supported:
//!
//! 1. *dict of dicts*: each node with its neighbors and the attributes of
//!    the connecting edge ([`to_dict_of_dicts`], for multigraphs
//!    [`to_dict_of_multidicts`] with one entry per edge key),
//! 2. *dict of lists*: each node with the list of its neighbors, parallel
//!    edges repeat the neighbor ([`to_dict_of_lists`]),
//! 3. *edge list*: all edges with their attributes ([`to_edgelist`]).
//!
//! The exported shapes list nodes and neighbors in the iteration order of
//! the graph. The import functions accept any iterable of the right shape,
//! in particular hash maps. For undirected graphs each edge appears in the
//! adjacency of both end points; on import it is added only once.
//!
//! All attributes are copied.
//!
//! Finally, [`GraphData`] is a complete portable snapshot of a graph. With
//! the `serialize` feature it implements `Serialize` and `Deserialize` and
//! all graph types are (de)serialized through it.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{convert, DiGraph, Graph};
//! use std::collections::HashMap;
//!
//! let mut adj = HashMap::new();
//! adj.insert(1, vec![2, 3]);
//! adj.insert(2, vec![1]);
//! adj.insert(3, vec![1]);
//!
//! let g: Graph<i32> = convert::from_dict_of_lists(adj.clone());
//! assert_eq!(g.number_of_edges(), 2);
//!
//! let d: DiGraph<i32> = convert::from_dict_of_lists(adj);
//! assert_eq!(d.number_of_edges(), 4);
//! ```

use crate::attributes::{AttrMap, Attrs, EdgeKey};
use crate::error::{Error, Result};
use crate::graph::BaseGraph;
use crate::traits::{EdgeType, Multi, Multiplicity, NodeKey, Simple};

use std::collections::HashSet;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Nodes with their neighbors and the attributes of the connecting edges.
pub type DictOfDicts<N> = Vec<(N, Vec<(N, AttrMap)>)>;

/// Nodes with their neighbors and the keys and attributes of all
/// connecting edges.
pub type DictOfMultiDicts<N> = Vec<(N, Vec<(N, Vec<(EdgeKey, AttrMap)>)>)>;

/// Nodes with the list of their neighbors.
pub type DictOfLists<N> = Vec<(N, Vec<N>)>;

/// Edges with their attributes.
pub type EdgeList<N> = Vec<(N, N, AttrMap)>;

/// Return the adjacency of a simple graph as dict of dicts.
pub fn to_dict_of_dicts<N, D>(g: &BaseGraph<N, D, Simple>) -> DictOfDicts<N>
where
    N: NodeKey,
    D: EdgeType,
{
    g.node_ids()
        .map(|u| {
            let nbrs = g
                .out_adj(u)
                .iter()
                .filter_map(|(&v, es)| {
                    es.first()
                        .map(|&e| (g.id2node(v).clone(), g.edge_data(e).attrs.borrow().clone()))
                })
                .collect();
            (g.id2node(u).clone(), nbrs)
        })
        .collect()
}

/// Build a simple graph from a dict of dicts.
///
/// If an edge is given several times, the attributes are merged.
pub fn from_dict_of_dicts<N, D, I, J>(data: I) -> BaseGraph<N, D, Simple>
where
    N: NodeKey,
    D: EdgeType,
    I: IntoIterator<Item = (N, J)>,
    J: IntoIterator<Item = (N, AttrMap)>,
{
    let mut g = BaseGraph::new();
    for (u, nbrs) in data {
        g.ensure_node(u.clone());
        for (v, attrs) in nbrs {
            g.put_edge(u.clone(), v, attrs);
        }
    }
    g
}

/// Return the adjacency of a multigraph as dict of dicts of keyed edges.
pub fn to_dict_of_multidicts<N, D>(g: &BaseGraph<N, D, Multi>) -> DictOfMultiDicts<N>
where
    N: NodeKey,
    D: EdgeType,
{
    g.node_ids()
        .map(|u| {
            let nbrs = g
                .out_adj(u)
                .iter()
                .map(|(&v, es)| {
                    let keyed = es
                        .iter()
                        .map(|&e| {
                            let data = g.edge_data(e);
                            (data.key.clone(), data.attrs.borrow().clone())
                        })
                        .collect();
                    (g.id2node(v).clone(), keyed)
                })
                .collect();
            (g.id2node(u).clone(), nbrs)
        })
        .collect()
}

/// Build a multigraph from a dict of dicts of keyed edges.
///
/// Edges with the same end points and key are added once, their
/// attributes are merged.
pub fn from_dict_of_multidicts<N, D, I, J, K>(data: I) -> BaseGraph<N, D, Multi>
where
    N: NodeKey,
    D: EdgeType,
    I: IntoIterator<Item = (N, J)>,
    J: IntoIterator<Item = (N, K)>,
    K: IntoIterator<Item = (EdgeKey, AttrMap)>,
{
    let mut g = BaseGraph::new();
    for (u, nbrs) in data {
        let uid = g.ensure_node(u);
        for (v, keyed) in nbrs {
            let vid = g.ensure_node(v);
            for (key, attrs) in keyed {
                g.merge_edge(uid, vid, key, Attrs::new(attrs));
            }
        }
    }
    g
}

/// Return the adjacency of a graph as dict of lists.
///
/// A neighbor is repeated once for each parallel edge.
pub fn to_dict_of_lists<N, D, M>(g: &BaseGraph<N, D, M>) -> DictOfLists<N>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    g.node_ids()
        .map(|u| {
            let nbrs = g
                .out_adj(u)
                .iter()
                .flat_map(|(&v, es)| std::iter::repeat(g.id2node(v).clone()).take(es.len()))
                .collect();
            (g.id2node(u).clone(), nbrs)
        })
        .collect()
}

/// Build a graph from a dict of lists.
///
/// For undirected multigraphs the neighbors of a node whose list has
/// already been processed are skipped, so that each parallel edge listed
/// at both end points is added once.
pub fn from_dict_of_lists<N, D, M, I, J>(data: I) -> BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
    I: IntoIterator<Item = (N, J)>,
    J: IntoIterator<Item = N>,
{
    let mut g = BaseGraph::new();
    let skip_seen = M::is_multi() && !D::is_directed();
    let mut seen = HashSet::new();
    for (u, nbrs) in data {
        g.ensure_node(u.clone());
        for v in nbrs {
            if skip_seen && seen.contains(&v) {
                continue;
            }
            g.put_edge(u.clone(), v, AttrMap::new());
        }
        if skip_seen {
            seen.insert(u);
        }
    }
    g
}

/// Return all edges with their attributes.
pub fn to_edgelist<N, D, M>(g: &BaseGraph<N, D, M>) -> EdgeList<N>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    g.edges_with_data()
        .map(|(u, v, attrs)| (u.clone(), v.clone(), attrs.borrow().clone()))
        .collect()
}

/// Build a graph from a list of edges.
///
/// In a multigraph every entry adds a new edge.
pub fn from_edgelist<N, D, M, I>(edges: I) -> BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
    I: IntoIterator<Item = (N, N, AttrMap)>,
{
    let mut g = BaseGraph::new();
    for (u, v, attrs) in edges {
        g.put_edge(u, v, attrs);
    }
    g
}

/// A portable snapshot of a graph.
///
/// Contains the kind of the graph, the graph attributes, all nodes with
/// their attributes and all edges with key and attributes (the key is
/// always `0` for simple graphs). The frozen flag is not part of the
/// snapshot.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GraphData<N> {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: AttrMap,
    pub nodes: Vec<(N, AttrMap)>,
    pub edges: Vec<(N, N, EdgeKey, AttrMap)>,
}

/// Return a snapshot of `g`.
pub fn to_graph_data<N, D, M>(g: &BaseGraph<N, D, M>) -> GraphData<N>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    GraphData {
        directed: D::is_directed(),
        multigraph: M::is_multi(),
        graph: g.graph_attrs().borrow().clone(),
        nodes: g
            .nodes_with_data()
            .map(|(n, attrs)| (n.clone(), attrs.borrow().clone()))
            .collect(),
        edges: g
            .edge_triples()
            .map(|(u, v, e)| {
                let data = g.edge_data(e);
                (
                    g.id2node(u).clone(),
                    g.id2node(v).clone(),
                    data.key.clone(),
                    data.attrs.borrow().clone(),
                )
            })
            .collect(),
    }
}

/// Build a graph from a snapshot.
///
/// Fails with [`Error::PreconditionViolation`] if the kind of the snapshot
/// does not match the kind of the graph.
pub fn from_graph_data<N, D, M>(data: GraphData<N>) -> Result<BaseGraph<N, D, M>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if data.directed != D::is_directed() || data.multigraph != M::is_multi() {
        return Err(Error::PreconditionViolation(format!(
            "graph data (directed: {}, multigraph: {}) does not match graph type (directed: {}, multigraph: {})",
            data.directed,
            data.multigraph,
            D::is_directed(),
            M::is_multi()
        )));
    }
    let mut g = BaseGraph::with_attrs(data.graph);
    for (n, attrs) in data.nodes {
        g.merge_node(n, Attrs::new(attrs));
    }
    for (u, v, key, attrs) in data.edges {
        let uid = g.ensure_node(u);
        let vid = g.ensure_node(v);
        g.merge_edge(uid, vid, key, Attrs::new(attrs));
    }
    Ok(g)
}

#[cfg(feature = "serialize")]
impl<N, D, M> serde::Serialize for BaseGraph<N, D, M>
where
    N: NodeKey + serde::Serialize,
    D: EdgeType,
    M: Multiplicity,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&to_graph_data(self), serializer)
    }
}

#[cfg(feature = "serialize")]
impl<'de, N, D, M> serde::Deserialize<'de> for BaseGraph<N, D, M>
where
    N: NodeKey + serde::Deserialize<'de>,
    D: EdgeType,
    M: Multiplicity,
{
    fn deserialize<De>(deserializer: De) -> std::result::Result<Self, De::Error>
    where
        De: serde::Deserializer<'de>,
    {
        let data = <GraphData<N> as serde::Deserialize>::deserialize(deserializer)?;
        from_graph_data(data).map_err(serde::de::Error::custom)
    }
}
