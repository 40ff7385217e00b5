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

//! Triangles and clustering coefficients of undirected graphs.
//!
//! Self-loops are ignored by all functions of this module.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, cluster, Graph};
//!
//! let g: Graph<usize> = classes::complete_graph(5);
//! assert_eq!(cluster::triangles(&g, &0).unwrap(), 6);
//! assert_eq!(cluster::transitivity(&g), 1.0);
//! assert_eq!(cluster::average_clustering(&g, None, None, true).unwrap(), 1.0);
//! ```

use crate::attributes::weight_of;
use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::traits::{EdgeType, Multiplicity, NodeKey, Simple, Undirected};

use std::collections::{BTreeSet, HashMap};

/// Neighbors of `u` without `u` itself.
fn nbrs<N, M>(g: &BaseGraph<N, Undirected, M>, u: NodeId) -> BTreeSet<NodeId>
where
    N: NodeKey,
    M: Multiplicity,
{
    g.neighbor_ids(u).filter(|&v| v != u).collect()
}

/// Number of neighbors and twice the number of triangles at `u`.
fn triangles_and_degree<N, M>(g: &BaseGraph<N, Undirected, M>, u: NodeId) -> (usize, usize)
where
    N: NodeKey,
    M: Multiplicity,
{
    let vs = nbrs(g, u);
    let ntri = vs.iter().map(|&w| nbrs(g, w).intersection(&vs).count()).sum();
    (vs.len(), ntri)
}

/// Handles of `nbunch`, all nodes if `None`.
fn selected<N, D, M>(g: &BaseGraph<N, D, M>, nbunch: Option<&[N]>) -> Vec<NodeId>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    match nbunch {
        Some(nbunch) => g.nbunch_ids(nbunch),
        None => g.node_ids().collect(),
    }
}

/// Return the number of triangles containing the node `n`.
pub fn triangles<N, M>(g: &BaseGraph<N, Undirected, M>, n: &N) -> Result<usize>
where
    N: NodeKey,
    M: Multiplicity,
{
    let u = g.require(n)?;
    Ok(triangles_and_degree(g, u).1 / 2)
}

/// Return the number of triangles for each node of `nbunch` (all nodes if
/// `None`).
pub fn triangles_of<N, M>(g: &BaseGraph<N, Undirected, M>, nbunch: Option<&[N]>) -> HashMap<N, usize>
where
    N: NodeKey,
    M: Multiplicity,
{
    selected(g, nbunch)
        .into_iter()
        .map(|u| (g.id2node(u).clone(), triangles_and_degree(g, u).1 / 2))
        .collect()
}

/// Number of neighbors and twice the weighted number of triangles at `u`.
///
/// The weight of a triangle is the geometric mean of its edge weights,
/// normalized by the largest weight in the graph.
fn weighted_triangles_and_degree<N>(
    g: &BaseGraph<N, Undirected, Simple>,
    u: NodeId,
    weight: &str,
    max_weight: f64,
) -> Result<(usize, f64)>
where
    N: NodeKey,
{
    let wt = |a: NodeId, b: NodeId| -> Result<f64> {
        let es = &g.out_adj(a)[&b];
        Ok(weight_of(&g.edge_data(es[0]).attrs.borrow(), weight)? / max_weight)
    };
    let inbrs = nbrs(g, u);
    let mut seen = BTreeSet::new();
    let mut tri = 0.0;
    for &j in &inbrs {
        seen.insert(j);
        let wij = wt(u, j)?;
        for &k in nbrs(g, j).intersection(&inbrs) {
            if !seen.contains(&k) {
                tri += (wij * wt(j, k)? * wt(k, u)?).cbrt();
            }
        }
    }
    Ok((inbrs.len(), 2.0 * tri))
}

fn max_weight<N>(g: &BaseGraph<N, Undirected, Simple>, weight: &str) -> Result<f64>
where
    N: NodeKey,
{
    let mut w = None;
    for (_, _, attrs) in g.edges_with_data() {
        let x = weight_of(&attrs.borrow(), weight)?;
        w = Some(w.map_or(x, |w: f64| w.max(x)));
    }
    Ok(w.unwrap_or(1.0))
}

fn clustering_at<N>(g: &BaseGraph<N, Undirected, Simple>, u: NodeId, weight: Option<(&str, f64)>) -> Result<f64>
where
    N: NodeKey,
{
    let (d, t) = match weight {
        None => {
            let (d, t) = triangles_and_degree(g, u);
            (d, t as f64)
        }
        Some((weight, max_weight)) => weighted_triangles_and_degree(g, u, weight, max_weight)?,
    };
    Ok(if t == 0.0 { 0.0 } else { t / (d * (d - 1)) as f64 })
}

/// Return the clustering coefficient of the node `n`.
///
/// The clustering coefficient is the fraction of pairs of neighbors of `n`
/// that are adjacent. If `weight` is given, each triangle contributes the
/// geometric mean of its edge weights normalized by the largest edge weight
/// in the graph.
pub fn clustering<N>(g: &BaseGraph<N, Undirected, Simple>, n: &N, weight: Option<&str>) -> Result<f64>
where
    N: NodeKey,
{
    let u = g.require(n)?;
    let weight = match weight {
        Some(w) => Some((w, max_weight(g, w)?)),
        None => None,
    };
    clustering_at(g, u, weight)
}

/// Return the clustering coefficients of the nodes of `nbunch` (all nodes
/// if `None`).
pub fn clustering_of<N>(
    g: &BaseGraph<N, Undirected, Simple>,
    nbunch: Option<&[N]>,
    weight: Option<&str>,
) -> Result<HashMap<N, f64>>
where
    N: NodeKey,
{
    let weight = match weight {
        Some(w) => Some((w, max_weight(g, w)?)),
        None => None,
    };
    let mut result = HashMap::new();
    for u in selected(g, nbunch) {
        result.insert(g.id2node(u).clone(), clustering_at(g, u, weight)?);
    }
    Ok(result)
}

/// Return the average clustering coefficient of the nodes of `nbunch`
/// (all nodes if `None`).
///
/// If `count_zeros` is false, nodes with coefficient 0 are not counted.
/// Fails with [`Error::PreconditionViolation`] if no node remains.
pub fn average_clustering<N>(
    g: &BaseGraph<N, Undirected, Simple>,
    nbunch: Option<&[N]>,
    weight: Option<&str>,
    count_zeros: bool,
) -> Result<f64>
where
    N: NodeKey,
{
    let c: Vec<f64> = clustering_of(g, nbunch, weight)?
        .into_values()
        .filter(|&c| count_zeros || c > 0.0)
        .collect();
    if c.is_empty() {
        return Err(Error::PreconditionViolation(
            "average clustering of an empty node set".to_string(),
        ));
    }
    Ok(c.iter().sum::<f64>() / c.len() as f64)
}

/// Return the transitivity of the graph.
///
/// This is the fraction of all possible triangles that are present,
/// `3 * triangles / triads`. A graph without triangles has transitivity 0.
pub fn transitivity<N, M>(g: &BaseGraph<N, Undirected, M>) -> f64
where
    N: NodeKey,
    M: Multiplicity,
{
    let mut triangles = 0;
    let mut contri = 0;
    for u in g.node_ids() {
        let (d, t) = triangles_and_degree(g, u);
        triangles += t;
        contri += d * d.saturating_sub(1);
    }
    if triangles == 0 {
        0.0
    } else {
        triangles as f64 / contri as f64
    }
}

/// Return the squares clustering coefficient of the nodes of `nbunch` (all
/// nodes if `None`).
///
/// This is the number of squares through a node divided by the number of
/// possible squares.
pub fn square_clustering<N>(g: &BaseGraph<N, Undirected, Simple>, nbunch: Option<&[N]>) -> HashMap<N, f64>
where
    N: NodeKey,
{
    let mut result = HashMap::new();
    for v in selected(g, nbunch) {
        let vnbrs: Vec<NodeId> = g.neighbor_ids(v).collect();
        let mut squares_total = 0.0;
        let mut potential = 0.0;
        for (i, &u) in vnbrs.iter().enumerate() {
            let unbrs: BTreeSet<NodeId> = g.neighbor_ids(u).collect();
            for &w in &vnbrs[i + 1..] {
                let squares = g.neighbor_ids(w).filter(|x| *x != v && unbrs.contains(x)).count();
                squares_total += squares as f64;
                let mut degm = squares + 1;
                if unbrs.contains(&w) {
                    degm += 1;
                }
                let du = g.out_adj(u).len() as f64;
                let dw = g.out_adj(w).len() as f64;
                potential += (du - degm as f64) * (dw - degm as f64) + squares as f64;
            }
        }
        let c = if potential > 0.0 {
            squares_total / potential
        } else {
            squares_total
        };
        result.insert(g.id2node(v).clone(), c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attrs;
    use crate::classes;
    use crate::{Graph, MultiGraph};
    use serde_json::json;

    #[test]
    fn test_complete() {
        let g: Graph<usize> = classes::complete_graph(5);
        let t = triangles_of(&g, None);
        assert_eq!(t.len(), 5);
        assert!(t.values().all(|&t| t == 6));
        assert_eq!(transitivity(&g), 1.0);
        assert!(clustering_of(&g, None, None).unwrap().values().all(|&c| c == 1.0));
        assert!(square_clustering(&g, None).values().all(|&c| c == 1.0));
    }

    #[test]
    fn test_path() {
        let g: Graph<usize> = classes::path_graph(4);
        assert_eq!(triangles(&g, &1), Ok(0));
        assert_eq!(transitivity(&g), 0.0);
        assert_eq!(clustering(&g, &1, None), Ok(0.0));
        assert_eq!(average_clustering(&g, None, None, true), Ok(0.0));
        assert!(matches!(
            average_clustering(&g, None, None, false),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(triangles(&g, &9).is_err());
    }

    #[test]
    fn test_triangle_with_tail() {
        let mut g = Graph::new();
        g.add_edges_from(vec![(0, 1), (1, 2), (2, 0), (2, 3), (3, 3)]).unwrap();
        assert_eq!(triangles(&g, &2), Ok(1));
        assert_eq!(triangles_of(&g, Some(&[0, 3, 7][..])).len(), 2);
        assert_eq!(clustering(&g, &0, None), Ok(1.0));
        assert!((clustering(&g, &2, None).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(clustering(&g, &3, None), Ok(0.0));
        // 3 closed triads out of 5
        assert!((transitivity(&g) - 0.6).abs() < 1e-12);
        let avg = average_clustering(&g, None, None, false).unwrap();
        assert!((avg - (1.0 + 1.0 + 1.0 / 3.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted() {
        let mut g = Graph::new();
        g.add_edge_with(0, 1, attrs(json!({"weight": 1}))).unwrap();
        g.add_edge_with(1, 2, attrs(json!({"weight": 8}))).unwrap();
        g.add_edge_with(2, 0, attrs(json!({"weight": 1}))).unwrap();
        // geometric mean of 1/8, 1 and 1/8
        let c = clustering(&g, &0, Some("weight")).unwrap();
        assert!((c - 0.25).abs() < 1e-12);
        let c = clustering(&g, &0, Some("missing")).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_clustering_with_pendants() {
        let mut g = Graph::new();
        g.add_edges_from(vec![(0, 1), (1, 2), (2, 3), (3, 0), (1, 4), (1, 5), (1, 8), (3, 6), (3, 7)])
            .unwrap();
        let c = square_clustering(&g, Some(&[0][..]));
        assert_eq!(c.len(), 1);
        assert!((c[&0] - 1.0 / 7.0).abs() < 1e-12);

        let c = square_clustering(&g, None);
        assert!((c[&2] - 1.0 / 7.0).abs() < 1e-12);
        assert_eq!(c[&1], 1.0);
        assert_eq!(c[&4], 0.0);
        assert_eq!(c[&7], 0.0);
    }

    #[test]
    fn test_square_clustering_bipartite() {
        let g: Graph<usize> = classes::star_graph(4);
        let c = square_clustering(&g, None);
        assert_eq!(c.len(), 5);
        assert!(c.values().all(|&c| c == 0.0));

        let g: Graph<usize> = classes::complete_bipartite_graph(2, 3);
        let c = square_clustering(&g, None);
        assert_eq!(c.len(), 5);
        assert!(c.values().all(|&c| c == 1.0));

        let g: Graph<usize> = classes::cycle_graph(4);
        assert!(square_clustering(&g, None).values().all(|&c| c == 1.0));
    }

    #[test]
    fn test_multigraph_triangles() {
        let mut g = MultiGraph::new();
        g.add_edges_from(vec![(0, 1), (0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(triangles(&g, &0), Ok(1));
        assert_eq!(transitivity(&g), 1.0);
    }
}
