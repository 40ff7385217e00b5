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

//! Test whether a degree sequence is graphical.
//!
//! A sequence of integers is *graphical* if it is the degree sequence of
//! some simple graph.
//!
//! Both tests first apply some quick checks: all degrees must be in
//! `0..n`, their sum must be even and the sequence is accepted right away
//! if it satisfies the condition of Zverovich and Zverovich,
//! `4 * dmin * n >= (dmax + dmin + 1)^2` (over the non-zero degrees).
//!
//! # Example
//!
//! ```
//! use rs_netgraph::graphical::{is_graphical, GraphicalMethod};
//!
//! assert!(is_graphical(vec![2, 2, 2, 2], GraphicalMethod::ErdosGallai));
//! assert!(!is_graphical(vec![3, 3, 3, 1], GraphicalMethod::HavelHakimi));
//! assert!(!is_graphical(vec![1, 1, 1], GraphicalMethod::default()));
//! ```

use num_traits::PrimInt;

use tracing::trace;

/// Algorithm used by [`is_graphical`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GraphicalMethod {
    /// The theorem of Erdős and Gallai, linear in the length of the sequence.
    #[default]
    ErdosGallai,
    /// The theorem of Havel and Hakimi, linear in the sum of the sequence.
    HavelHakimi,
}

/// Summary of a degree sequence passing the basic tests.
struct Degrees {
    dmax: usize,
    dmin: usize,
    /// Number of non-zero degrees.
    n: usize,
    /// `num_degs[d]` is the number of entries equal to `d`.
    num_degs: Vec<usize>,
}

/// Return `None` if the sequence is definitely not graphical.
fn basic_tests<I, T>(seq: I) -> Option<Degrees>
where
    I: IntoIterator<Item = T>,
    T: PrimInt,
{
    let seq = seq.into_iter().map(|d| d.to_i64()).collect::<Option<Vec<i64>>>()?;
    let p = seq.len();
    let mut num_degs = vec![0; p];
    let (mut dmax, mut dmin, mut dsum, mut n) = (0, p, 0, 0usize);
    for d in seq {
        if d < 0 || d >= p as i64 {
            return None;
        }
        let d = d as usize;
        if d > 0 {
            dmax = dmax.max(d);
            dmin = dmin.min(d);
            dsum += d;
            n += 1;
            num_degs[d] += 1;
        }
    }
    if dsum % 2 != 0 || dsum > n * n.saturating_sub(1) {
        return None;
    }
    Some(Degrees { dmax, dmin, n, num_degs })
}

/// The sufficient condition of Zverovich and Zverovich.
fn zz_condition(deg: &Degrees) -> bool {
    deg.n == 0 || 4 * deg.dmin * deg.n >= (deg.dmax + deg.dmin + 1).pow(2)
}

/// Return `true` if `seq` is the degree sequence of a simple graph.
pub fn is_graphical<I, T>(seq: I, method: GraphicalMethod) -> bool
where
    I: IntoIterator<Item = T>,
    T: PrimInt,
{
    match method {
        GraphicalMethod::ErdosGallai => is_valid_degree_sequence_erdos_gallai(seq),
        GraphicalMethod::HavelHakimi => is_valid_degree_sequence_havel_hakimi(seq),
    }
}

/// Test a degree sequence with the theorem of Havel and Hakimi.
///
/// The node with the largest degree `d` is connected to the `d` nodes with
/// the next largest degrees. The sequence is graphical if this can be
/// repeated until all degrees are zero.
pub fn is_valid_degree_sequence_havel_hakimi<I, T>(seq: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: PrimInt,
{
    let deg = match basic_tests(seq) {
        Some(deg) => deg,
        None => return false,
    };
    if zz_condition(&deg) {
        return true;
    }

    let Degrees {
        mut dmax,
        mut n,
        mut num_degs,
        ..
    } = deg;
    let mut modstubs = vec![0; dmax + 1];
    while n > 0 {
        while num_degs[dmax] == 0 {
            dmax -= 1;
        }
        if dmax > n - 1 {
            return false;
        }
        trace!(dmax, n, "havel-hakimi step");
        // remove the node of largest degree
        num_degs[dmax] -= 1;
        n -= 1;
        // reduce the next dmax largest degrees
        let mut mslen = 0;
        let mut k = dmax;
        for _ in 0..dmax {
            while num_degs[k] == 0 {
                k -= 1;
            }
            num_degs[k] -= 1;
            n -= 1;
            if k > 1 {
                modstubs[mslen] = k - 1;
                mslen += 1;
            }
        }
        for &stub in &modstubs[..mslen] {
            num_degs[stub] += 1;
            n += 1;
        }
    }
    true
}

/// Test a degree sequence with the theorem of Erdős and Gallai.
///
/// The sorted sequence `d_1 >= ... >= d_n` with even sum is graphical if
/// and only if for each `k` with `d_k >= k`
/// `sum_{i <= k} d_i <= k (k - 1) + sum_{i > k} min(d_i, k)`.
/// Only the last index of each run of equal degrees has to be checked.
pub fn is_valid_degree_sequence_erdos_gallai<I, T>(seq: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: PrimInt,
{
    let deg = match basic_tests(seq) {
        Some(deg) => deg,
        None => return false,
    };
    if zz_condition(&deg) {
        return true;
    }

    let Degrees { dmax, dmin, n, num_degs } = deg;
    let (mut k, mut sum_deg, mut sum_nj, mut sum_jnj) = (0, 0, 0, 0);
    for dk in (dmin..=dmax).rev() {
        if dk < k + 1 {
            return true;
        }
        if num_degs[dk] > 0 {
            let run_size = num_degs[dk].min(dk - k);
            sum_deg += run_size * dk;
            for v in 0..run_size {
                sum_nj += num_degs[k + v];
                sum_jnj += (k + v) * num_degs[k + v];
            }
            k += run_size;
            if sum_deg + k * sum_nj > k * (n - 1) + sum_jnj {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(seq: &[i32]) -> (bool, bool) {
        (
            is_graphical(seq.iter().copied(), GraphicalMethod::ErdosGallai),
            is_graphical(seq.iter().copied(), GraphicalMethod::HavelHakimi),
        )
    }

    #[test]
    fn test_small() {
        assert_eq!(both(&[2, 2, 2, 2]), (true, true));
        assert_eq!(both(&[3, 3, 3, 1]), (false, false));
        assert_eq!(both(&[]), (true, true));
        assert_eq!(both(&[0, 0, 0]), (true, true));
        assert_eq!(both(&[1, 1]), (true, true));
    }

    #[test]
    fn test_odd_sum() {
        assert_eq!(both(&[1, 1, 1]), (false, false));
        assert_eq!(both(&[3, 2, 2, 2, 2]), (false, false));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(both(&[-1, 1]), (false, false));
        assert_eq!(both(&[2, 2]), (false, false));
    }

    #[test]
    fn test_methods_agree() {
        let seqs: Vec<Vec<i32>> = vec![
            vec![4, 3, 3, 3, 3, 2],
            vec![5, 5, 4, 3, 2, 1, 1, 1],
            vec![4, 4, 4, 1, 1, 0],
            vec![6, 6, 5, 4, 3, 2, 2, 2],
            vec![3, 3, 1, 1, 1, 1],
            vec![4, 4, 2, 1, 1],
            vec![5, 3, 3, 3, 3, 3],
        ];
        for seq in seqs {
            let (eg, hh) = both(&seq);
            assert_eq!(eg, hh, "methods disagree on {:?}", seq);
        }
        assert_eq!(both(&[4, 4, 4, 1, 1, 0]), (false, false));
        assert_eq!(both(&[3, 3, 1, 1, 1, 1]), (true, true));
    }

    #[test]
    fn test_degree_sequence_of_graph() {
        use crate::classes;
        use crate::Graph;

        let g: Graph<usize> = classes::petersen_graph();
        let seq: Vec<usize> = g.degrees().map(|(_, d)| d).collect();
        assert!(is_graphical(seq.iter().copied(), GraphicalMethod::ErdosGallai));
        assert!(is_graphical(seq, GraphicalMethod::HavelHakimi));
    }
}
