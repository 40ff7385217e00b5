/*
 * Copyright (c) 2017-2023 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Traits describing node keys and graph capabilities.
//!
//! There is only one graph data structure, [`BaseGraph`][crate::graph::BaseGraph].
//! Its behaviour is selected by two orthogonal capabilities, each given by a
//! zero-sized marker type:
//!
//! 1. The *edge type*: [`Undirected`] edges have no designated source or
//!    sink, [`Directed`] edges go from a source to a sink and the graph
//!    additionally maintains the predecessor relation.
//! 2. The *multiplicity*: a [`Simple`] graph has at most one edge between
//!    each (ordered) pair of nodes, a [`Multi`] graph allows parallel edges
//!    distinguished by an [`EdgeKey`][crate::attributes::EdgeKey].
//!
//! Operations that only make sense for one capability are implemented for
//! the corresponding marker only, e.g. `predecessors` exists on directed
//! graphs only.

use std::fmt::Debug;
use std::hash::Hash;

/// The contract for node identifiers.
///
/// Any cloneable type with equality and hashing can be used as node.
/// `Debug` is required to report missing nodes in errors.
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Debug {}

/// An item that has an index.
pub trait Indexable {
    fn index(&self) -> usize;
}

/// The edge type capability of a graph.
pub trait EdgeType: Clone + Copy + Default + Debug + 'static {
    /// Return `true` if edges are directed.
    fn is_directed() -> bool;
}

/// The multiplicity capability of a graph.
pub trait Multiplicity: Clone + Copy + Default + Debug + 'static {
    /// Return `true` if parallel edges are allowed.
    fn is_multi() -> bool;
}

/// Marker for undirected graphs.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Undirected;

/// Marker for directed graphs.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Directed;

/// Marker for graphs without parallel edges.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Simple;

/// Marker for graphs with parallel edges.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Multi;

impl EdgeType for Undirected {
    fn is_directed() -> bool {
        false
    }
}

impl EdgeType for Directed {
    fn is_directed() -> bool {
        true
    }
}

impl Multiplicity for Simple {
    fn is_multi() -> bool {
        false
    }
}

impl Multiplicity for Multi {
    fn is_multi() -> bool {
        true
    }
}
