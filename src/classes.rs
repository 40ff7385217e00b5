// Copyright (c) 2016-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Some common graph classes.
//!
//! All graphs use the nodes `0, 1, 2, ...`, inserted in this order. The
//! graph variant is chosen by the caller:
//!
//! ```
//! use rs_netgraph::{classes, DiGraph, Graph};
//!
//! let g: Graph<usize> = classes::cycle_graph(4);
//! assert_eq!(g.number_of_edges(), 4);
//!
//! let d: DiGraph<usize> = classes::cycle_graph(4);
//! assert!(d.has_edge(&3, &0));
//! assert!(!d.has_edge(&0, &3));
//! ```

use crate::attributes::AttrMap;
use crate::graph::BaseGraph;
use crate::traits::{EdgeType, Multiplicity};

fn with_nodes<D, M>(n: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = BaseGraph::new();
    for u in 0..n {
        g.ensure_node(u);
    }
    g
}

/// Returns the graph with `n` nodes and no edges.
pub fn empty_graph<D, M>(n: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    with_nodes(n)
}

/// Returns a path on `n` nodes.
///
/// The path is directed from `0` to `n-1` if the graph is directed.
pub fn path_graph<D, M>(n: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = with_nodes(n);
    for u in 1..n {
        g.put_edge(u - 1, u, AttrMap::new());
    }
    g
}

/// Returns a cycle of length `n`.
pub fn cycle_graph<D, M>(n: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = path_graph(n);
    if n > 1 {
        g.put_edge(n - 1, 0, AttrMap::new());
    }
    g
}

/// Returns the complete graph on `n` nodes.
///
/// A directed complete graph contains both orientations of every edge.
pub fn complete_graph<D, M>(n: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = with_nodes(n);
    for u in 0..n {
        for v in u + 1..n {
            g.put_edge(u, v, AttrMap::new());
            if D::is_directed() {
                g.put_edge(v, u, AttrMap::new());
            }
        }
    }
    g
}

/// Returns a complete bipartite graph on `n+m` nodes.
///
/// The edges run between the first n nodes and the last m nodes. If the
/// graph is directed, the edges run in this direction.
pub fn complete_bipartite_graph<D, M>(n: usize, m: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = with_nodes(n + m);
    for u in 0..n {
        for v in n..n + m {
            g.put_edge(u, v, AttrMap::new());
        }
    }
    g
}

/// Returns a star graph with `n` rays.
///
/// The center is node `0`. This is equivalent to
/// `complete_bipartite_graph(1, n)`.
pub fn star_graph<D, M>(n: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    complete_bipartite_graph(1, n)
}

/// Returns a hypercube of dimension `d`.
pub fn hypercube_graph<D, M>(d: u32) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let n = 2usize.pow(d);
    let mut g = with_nodes(n);
    for i in 0..n {
        for bit in 0..d {
            if i & (1 << bit) == 0 {
                g.put_edge(i, i | (1 << bit), AttrMap::new());
            }
        }
    }
    g
}

/// Return a grid graph with `n` columns and `m` rows.
///
/// The nodes are numbered from left to right and from bottom to top. The
/// following is a grid graph with 5 columns and 4 rows.
///
///   15 - 16 - 17 - 18 - 19
///    |    |    |    |    |
///   10 - 11 - 12 - 13 - 14
///    |    |    |    |    |
///    5 -- 6 -- 7 -- 8 -- 9
///    |    |    |    |    |
///    0 -- 1 -- 2 -- 3 -- 4
///
/// ```
/// use rs_netgraph::{classes, Graph};
///
/// let g: Graph<usize> = classes::grid_graph(5, 4);
/// assert_eq!(g.number_of_nodes(), 20);
/// assert_eq!(g.number_of_edges(), 5*3 + 4*4);
///
/// assert_eq!(g.degrees().filter(|&(_, d)| d == 2).count(), 4);
/// assert_eq!(g.degrees().filter(|&(_, d)| d == 3).count(), 10);
/// assert_eq!(g.degrees().filter(|&(_, d)| d == 4).count(), 6);
/// ```
pub fn grid_graph<D, M>(n: usize, m: usize) -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = with_nodes(n * m);
    for y in 0..m {
        for x in 0..n {
            if x + 1 < n {
                g.put_edge(y * n + x, y * n + x + 1, AttrMap::new());
            }
            if y + 1 < m {
                g.put_edge(y * n + x, y * n + x + n, AttrMap::new());
            }
        }
    }
    g
}

/// Returns the Petersen graph.
pub fn petersen_graph<D, M>() -> BaseGraph<usize, D, M>
where
    D: EdgeType,
    M: Multiplicity,
{
    let mut g = with_nodes(10);
    for i in 0..5 {
        g.put_edge(i, (i + 1) % 5, AttrMap::new());
        g.put_edge(i + 5, (i + 2) % 5 + 5, AttrMap::new());
        g.put_edge(i, i + 5, AttrMap::new());
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiGraph, Graph};
    use std::cmp::{max, min};

    #[test]
    fn test_path() {
        let g: Graph<usize> = path_graph(6);
        assert_eq!(g.number_of_nodes(), 6);
        assert_eq!(g.number_of_edges(), 5);
        for (&u, &v) in g.edges() {
            assert_eq!(min(u, v) + 1, max(u, v));
        }
        assert_eq!(g.degrees().filter(|&(_, d)| d == 1).count(), 2);
        assert_eq!(g.degrees().filter(|&(_, d)| d == 2).count(), 4);
    }

    #[test]
    fn test_cycle() {
        let g: Graph<usize> = cycle_graph(42);
        assert_eq!(g.number_of_nodes(), 42);
        assert_eq!(g.number_of_edges(), 42);
        for (&u, &v) in g.edges() {
            assert!((min(u, v) + 1 == max(u, v)) || (min(u, v) == 0 && max(u, v) == 41));
        }
        assert!(g.degrees().all(|(_, d)| d == 2));
    }

    #[test]
    fn test_complete() {
        let n = 12;
        let g: Graph<usize> = complete_graph(n);
        assert_eq!(g.number_of_nodes(), n);
        assert_eq!(g.number_of_edges(), n * (n - 1) / 2);
        assert!(g.degrees().all(|(_, d)| d == n - 1));

        let d: DiGraph<usize> = complete_graph(n);
        assert_eq!(d.number_of_edges(), n * (n - 1));
    }

    #[test]
    fn test_complete_bipartite() {
        let (n, m) = (13, 7);
        let g: Graph<usize> = complete_bipartite_graph(n, m);
        assert_eq!(g.number_of_nodes(), n + m);
        assert_eq!(g.number_of_edges(), n * m);
        for (&u, &v) in g.edges() {
            assert!(min(u, v) < n);
            assert!(max(u, v) >= n);
        }
        assert!(g.degrees().all(|(&u, d)| d == if u < n { m } else { n }));
    }

    #[test]
    fn test_star() {
        let n = 17;
        let g: Graph<usize> = star_graph(n);
        assert_eq!(g.number_of_nodes(), n + 1);
        assert_eq!(g.number_of_edges(), n);
        assert_eq!(g.degree(&0), Ok(n));
        assert!(g.degrees().skip(1).all(|(_, d)| d == 1));
    }

    #[test]
    fn test_hypercube() {
        let g: Graph<usize> = hypercube_graph(3);
        assert_eq!(g.number_of_nodes(), 8);
        assert_eq!(g.number_of_edges(), 12);

        let mut edges: Vec<_> = g.edges().map(|(&u, &v)| (min(u, v), max(u, v))).collect();
        edges.sort();

        assert_eq!(
            edges,
            vec![
                (0, 1),
                (0, 2),
                (0, 4),
                (1, 3),
                (1, 5),
                (2, 3),
                (2, 6),
                (3, 7),
                (4, 5),
                (4, 6),
                (5, 7),
                (6, 7),
            ]
        );
    }

    #[test]
    fn test_petersen() {
        let g: Graph<usize> = petersen_graph();
        assert_eq!(g.number_of_edges(), 15);
        assert!(g.degrees().all(|(_, d)| d == 3));
    }
}
