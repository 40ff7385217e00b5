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

//! Shortest path algorithms.
//!
//! - [`unweighted`]: breadth-first search, the length of a path is its
//!   number of edges,
//! - [`dijkstra`]: Dijkstra's algorithm for non-negative edge weights,
//! - [`generic`]: dispatches to one of the above depending on whether a
//!   weight attribute is given.
//!
//! In directed graphs paths follow the direction of the edges.

pub mod dijkstra;
pub use self::dijkstra::{
    all_pairs_dijkstra_path, all_pairs_dijkstra_path_length, dijkstra_path, dijkstra_path_length,
    single_source_dijkstra, single_source_dijkstra_path, single_source_dijkstra_path_length,
};

pub mod unweighted;
pub use self::unweighted::{
    all_pairs_shortest_path, all_pairs_shortest_path_length, bidirectional_shortest_path, predecessor,
    single_source_shortest_path, single_source_shortest_path_length,
};

pub mod generic;
pub use self::generic::{has_path, shortest_path, shortest_path_length, ShortestPaths};
