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

//! Quick necessary conditions for graph isomorphism.
//!
//! Each test compares sorted sequences of node invariants of both graphs.
//! A result of `false` proves that the graphs are not isomorphic, `true`
//! is inconclusive.
//!
//! | function | invariants |
//! |----------|------------|
//! | [`faster_could_be_isomorphic`] | degree |
//! | [`fast_could_be_isomorphic`] | degree, triangles |
//! | [`could_be_isomorphic`] | degree, triangles, maximal cliques |
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, isomorphism, Graph};
//!
//! // both graphs are 2-regular on six nodes
//! let c6: Graph<usize> = classes::cycle_graph(6);
//! let mut two_triangles = Graph::new();
//! two_triangles.add_cycle(vec![0, 1, 2]).unwrap();
//! two_triangles.add_cycle(vec![3, 4, 5]).unwrap();
//!
//! assert!(isomorphism::faster_could_be_isomorphic(&c6, &two_triangles));
//! assert!(!isomorphism::fast_could_be_isomorphic(&c6, &two_triangles));
//! ```

use crate::clique::number_of_cliques;
use crate::cluster::triangles_of;
use crate::graph::BaseGraph;
use crate::traits::{EdgeType, Multiplicity, NodeKey, Undirected};

use std::collections::HashMap;

fn degree_sequence<N, D, M>(g: &BaseGraph<N, D, M>) -> Vec<usize>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut degrees: Vec<usize> = g.degrees().map(|(_, d)| d).collect();
    degrees.sort_unstable();
    degrees
}

/// Return `false` if the sorted degree sequences differ.
pub fn faster_could_be_isomorphic<N1, N2, D, M>(g1: &BaseGraph<N1, D, M>, g2: &BaseGraph<N2, D, M>) -> bool
where
    N1: NodeKey,
    N2: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    g1.number_of_nodes() == g2.number_of_nodes() && degree_sequence(g1) == degree_sequence(g2)
}

/// Sorted invariant tuples `(degree, triangles[, cliques])` of all nodes.
fn invariants<N, M>(g: &BaseGraph<N, Undirected, M>, with_cliques: bool) -> Vec<(usize, usize, usize)>
where
    N: NodeKey,
    M: Multiplicity,
{
    let triangles = triangles_of(g, None);
    let cliques = if with_cliques {
        number_of_cliques(g, None, None)
    } else {
        HashMap::new()
    };
    let mut props: Vec<_> = g
        .degrees()
        .map(|(u, d)| (d, triangles[u], cliques.get(u).copied().unwrap_or(0)))
        .collect();
    props.sort_unstable();
    props
}

/// Return `false` if the sorted sequences of degrees and triangle counts
/// differ.
pub fn fast_could_be_isomorphic<N1, N2, M>(
    g1: &BaseGraph<N1, Undirected, M>,
    g2: &BaseGraph<N2, Undirected, M>,
) -> bool
where
    N1: NodeKey,
    N2: NodeKey,
    M: Multiplicity,
{
    g1.number_of_nodes() == g2.number_of_nodes() && invariants(g1, false) == invariants(g2, false)
}

/// Return `false` if the sorted sequences of degrees, triangle counts and
/// numbers of maximal cliques differ.
pub fn could_be_isomorphic<N1, N2, M>(g1: &BaseGraph<N1, Undirected, M>, g2: &BaseGraph<N2, Undirected, M>) -> bool
where
    N1: NodeKey,
    N2: NodeKey,
    M: Multiplicity,
{
    g1.number_of_nodes() == g2.number_of_nodes() && invariants(g1, true) == invariants(g2, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes;
    use crate::relabel::relabel_nodes;
    use crate::{DiGraph, Graph};

    #[test]
    fn test_relabeled() {
        let g: Graph<usize> = classes::petersen_graph();
        let h = relabel_nodes(&g, |u| format!("n{}", (u * 3) % 10));
        assert!(faster_could_be_isomorphic(&g, &h));
        assert!(fast_could_be_isomorphic(&g, &h));
        assert!(could_be_isomorphic(&g, &h));
    }

    #[test]
    fn test_different() {
        let g: Graph<usize> = classes::path_graph(4);
        let h: Graph<usize> = classes::star_graph(3);
        assert_eq!(h.number_of_nodes(), 4);
        assert!(!faster_could_be_isomorphic(&g, &h));
        assert!(!could_be_isomorphic(&g, &h));

        let h: Graph<usize> = classes::path_graph(5);
        assert!(!faster_could_be_isomorphic(&g, &h));
    }

    #[test]
    fn test_triangles() {
        let mut g1 = Graph::new();
        g1.add_cycle(vec![0, 1, 2, 3, 4, 5]).unwrap();
        g1.add_edge(0, 3).unwrap();
        let mut g2 = Graph::new();
        g2.add_cycle(vec![0, 1, 2, 3, 4, 5]).unwrap();
        g2.add_edge(0, 3).unwrap();
        assert!(could_be_isomorphic(&g1, &g2));

        // same degrees, but a triangle
        let mut g3 = Graph::new();
        g3.add_cycle(vec![0, 1, 2, 3, 4, 5]).unwrap();
        g3.add_edge(0, 2).unwrap();
        assert!(faster_could_be_isomorphic(&g1, &g3));
        assert!(!fast_could_be_isomorphic(&g1, &g3));
        assert!(!could_be_isomorphic(&g1, &g3));
    }

    #[test]
    fn test_directed_degrees() {
        let g: DiGraph<usize> = classes::cycle_graph(3);
        let mut h = DiGraph::new();
        h.add_edges_from(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        // in + out degree is 2 everywhere in both graphs
        assert!(faster_could_be_isomorphic(&g, &h));
    }
}
