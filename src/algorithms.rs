// Copyright (c) 2015-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! General functions working on graphs.

use crate::attributes::{AttrMap, Attrs, Value};
use crate::error::Result;
use crate::graph::BaseGraph;
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use std::collections::{HashMap, HashSet};

/// Returns the density of `g`.
///
/// The density is the number of edges divided by the maximal number of
/// edges of a simple graph without loops on the same nodes. Graphs with
/// less than two nodes have density 0.
///
/// # Example
///
/// ```
/// use rs_netgraph::{algorithms::density, classes, DiGraph, Graph};
///
/// let g: Graph<usize> = classes::complete_graph(5);
/// assert_eq!(density(&g), 1.0);
/// let g: DiGraph<usize> = classes::cycle_graph(5);
/// assert_eq!(density(&g), 0.25);
/// ```
pub fn density<N, D, M>(g: &BaseGraph<N, D, M>) -> f64
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let n = g.number_of_nodes() as f64;
    let m = g.number_of_edges() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    if D::is_directed() {
        m / (n * (n - 1.0))
    } else {
        2.0 * m / (n * (n - 1.0))
    }
}

/// Returns the number of nodes of each degree.
///
/// The element at index `d` is the number of nodes of degree `d`, the
/// last element is the number of nodes of maximal degree.
pub fn degree_histogram<N, D, M>(g: &BaseGraph<N, D, M>) -> Vec<usize>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut hist = vec![];
    for (_, d) in g.degrees() {
        if d >= hist.len() {
            hist.resize(d + 1, 0);
        }
        hist[d] += 1;
    }
    hist
}

/// Returns a graph with the nodes of `g` but without edges.
///
/// If `with_data` is true, the graph and node attributes are copied.
pub fn create_empty_copy<N, D, M>(g: &BaseGraph<N, D, M>, with_data: bool) -> BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut h = BaseGraph::new();
    if with_data {
        h.graph_attrs().update(&g.graph_attrs().borrow());
    }
    for (n, attrs) in g.nodes_with_data() {
        let attrs = if with_data { attrs.deep_copy() } else { Attrs::default() };
        h.insert_node(n.clone(), attrs);
    }
    h
}

fn type_name<D: EdgeType, M: Multiplicity>() -> &'static str {
    match (D::is_directed(), M::is_multi()) {
        (false, false) => "Graph",
        (true, false) => "DiGraph",
        (false, true) => "MultiGraph",
        (true, true) => "MultiDiGraph",
    }
}

/// Returns a short summary of the graph or of a single node.
///
/// # Example
///
/// ```
/// use rs_netgraph::{algorithms::info, Graph};
///
/// let mut g = Graph::new();
/// g.set_name("triangle");
/// g.add_cycle(vec![1, 2, 3]).unwrap();
/// assert_eq!(
///     info(&g, None).unwrap(),
///     "Name: triangle\nType: Graph\nNumber of nodes: 3\nNumber of edges: 3\nAverage degree:   2.0000"
/// );
/// assert_eq!(
///     info(&g, Some(&2)).unwrap(),
///     "Node 2 has the following properties:\nDegree: 2\nNeighbors: 1 3"
/// );
/// ```
pub fn info<N, D, M>(g: &BaseGraph<N, D, M>, n: Option<&N>) -> Result<String>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let s = match n {
        None => {
            let nnodes = g.number_of_nodes();
            let nedges = g.number_of_edges();
            let avg = if nnodes == 0 { 0.0 } else { nedges as f64 / nnodes as f64 };
            let mut s = format!(
                "Name: {}\nType: {}\nNumber of nodes: {}\nNumber of edges: {}\n",
                g.name(),
                type_name::<D, M>(),
                nnodes,
                nedges
            );
            if D::is_directed() {
                s.push_str(&format!("Average in degree: {:8.4}\n", avg));
                s.push_str(&format!("Average out degree: {:8.4}", avg));
            } else {
                s.push_str(&format!("Average degree: {:8.4}", 2.0 * avg));
            }
            s
        }
        Some(n) => {
            let id = g.require(n)?;
            let nbrs: Vec<String> = g.neighbor_ids(id).map(|v| format!("{:?}", g.id2node(v))).collect();
            format!(
                "Node {:?} has the following properties:\nDegree: {}\nNeighbors: {}",
                n,
                g.degree_of(id),
                nbrs.join(" ")
            )
        }
    };
    Ok(s)
}

/// Sets the node attribute `name` to the given values.
///
/// Values for nodes not in the graph are ignored.
pub fn set_node_attributes<N, D, M>(g: &BaseGraph<N, D, M>, name: &str, values: &HashMap<N, Value>)
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    for (n, value) in values {
        if let Some(attrs) = g.node_attrs(n) {
            attrs.borrow_mut().insert(name.to_string(), value.clone());
        }
    }
}

/// Returns the values of the node attribute `name` of all nodes having it.
pub fn get_node_attributes<N, D, M>(g: &BaseGraph<N, D, M>, name: &str) -> HashMap<N, Value>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    g.nodes_with_data()
        .filter_map(|(n, attrs)| attrs.get(name).map(|v| (n.clone(), v)))
        .collect()
}

/// Sets the edge attribute `name` to the given values.
///
/// In a multigraph the value is assigned to all parallel edges. Values for
/// edges not in the graph are ignored.
pub fn set_edge_attributes<N, D, M>(g: &BaseGraph<N, D, M>, name: &str, values: &HashMap<(N, N), Value>)
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    for ((u, v), value) in values {
        let es = match (g.node_id(u), g.node_id(v)) {
            (Some(uid), Some(vid)) => g.out_adj(uid).get(&vid),
            _ => None,
        };
        for &e in es.into_iter().flatten() {
            g.edge_data(e).attrs.borrow_mut().insert(name.to_string(), value.clone());
        }
    }
}

/// Returns the values of the edge attribute `name` of all edges having it.
///
/// The edges are oriented as reported by `edges()`. For parallel edges the
/// value of the last one having the attribute is returned.
pub fn get_edge_attributes<N, D, M>(g: &BaseGraph<N, D, M>, name: &str) -> HashMap<(N, N), Value>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    g.edges_with_data()
        .filter_map(|(u, v, attrs)| attrs.get(name).map(|x| ((u.clone(), v.clone()), x)))
        .collect()
}

/// Returns the complement of `g`.
///
/// The complement has the same nodes and an edge between two distinct
/// nodes if and only if they are not adjacent in `g`. Loops and
/// multiplicities of `g` are ignored, no attributes are copied.
///
/// # Example
///
/// ```
/// use rs_netgraph::{algorithms::complement, classes, Graph};
///
/// let g: Graph<usize> = classes::cycle_graph(5);
/// let h = complement(&g);
///
/// assert_eq!(h.number_of_nodes(), 5);
/// assert_eq!(h.number_of_edges(), 5);
/// assert_eq!(h.edges().collect::<Vec<_>>(), vec![(&0, &2), (&0, &3), (&1, &3), (&1, &4), (&2, &4)]);
/// ```
pub fn complement<N, D, M>(g: &BaseGraph<N, D, M>) -> BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut h = create_empty_copy(g, false);
    let ids: Vec<_> = g.node_ids().collect();
    let mut seen = HashSet::new();
    for &u in &ids {
        let adjacent: HashSet<_> = g.neighbor_ids(u).collect();
        for &v in &ids {
            if u == v || adjacent.contains(&v) || (!D::is_directed() && seen.contains(&v)) {
                continue;
            }
            h.put_edge(g.id2node(u).clone(), g.id2node(v).clone(), AttrMap::new());
        }
        seen.insert(u);
    }
    h
}
