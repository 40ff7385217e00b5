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

#![forbid(unsafe_code)]

//! A library for attributed graphs and classical graph algorithms.
//!
//! The central data structure is [`BaseGraph`], available in four
//! flavours: [`Graph`], [`DiGraph`], [`MultiGraph`] and [`MultiDiGraph`].
//! Nodes are arbitrary hashable values, graphs, nodes and edges carry
//! attribute maps.
//!
//! The algorithms are free functions taking a graph by reference.
//!
//! ```
//! use rs_netgraph::{centrality, classes, clique, shortestpath, Graph};
//!
//! let g: Graph<usize> = classes::path_graph(5);
//! assert_eq!(shortestpath::bidirectional_shortest_path(&g, &0, &4).unwrap(), vec![0, 1, 2, 3, 4]);
//!
//! let k5: Graph<usize> = classes::complete_graph(5);
//! let bc = centrality::betweenness_centrality(&k5, &Default::default()).unwrap();
//! assert!(bc.values().all(|&b| b == 0.0));
//! assert_eq!(clique::graph_clique_number(&k5, None), 5);
//! ```

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod traits;
pub use self::traits::{Directed, Multi, Simple, Undirected};

pub mod attributes;
pub use self::attributes::{AttrMap, Attrs, EdgeKey};

pub mod graph;
pub use self::graph::{BaseGraph, DiGraph, Graph, MultiDiGraph, MultiGraph, NodeId};

pub mod convert;
pub mod operators;
pub mod relabel;

/// Graph classes
pub mod classes;

// # Algorithms

pub mod algorithms;
pub mod centrality;
pub mod clique;
pub mod cluster;
pub mod dag;
pub mod graphical;
pub mod isomorphism;
pub mod search;
pub mod shortestpath;
