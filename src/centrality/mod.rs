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

//! Centrality measures.

pub mod betweenness;
pub use self::betweenness::{
    betweenness_centrality, edge_betweenness_centrality, BetweennessParams, EdgeBetweennessParams,
};

pub mod eigenvector;
pub use self::eigenvector::{eigenvector_centrality, EigenvectorParams};
