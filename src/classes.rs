// Copyright (c) 2016-2021 Frank Fischer <frank-fischer@shadow-soft.de>
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

use crate::builder::{Buildable, Builder};

/// Returns a directed path with `m` arcs.
///
/// The arcs run from each node to its successor.
pub fn path<G>(m: usize) -> G
where
    G: Buildable,
{
    let mut b = G::Builder::with_capacities(m + 1, m);
    let nodes = b.add_nodes(m + 1);
    for (u, v) in nodes.iter().zip(nodes.iter().skip(1)) {
        b.add_arc(*u, *v);
    }
    b.into_graph()
}

/// Returns a directed cycle with length `n`.
pub fn cycle<G>(n: usize) -> G
where
    G: Buildable,
{
    let mut b = G::Builder::with_capacities(n, n);
    let nodes = b.add_nodes(n);
    for (u, v) in nodes.iter().zip(nodes.iter().cycle().skip(1)) {
        b.add_arc(*u, *v);
    }
    b.into_graph()
}

/// Returns a complete bipartite graph on `n+m` nodes.
///
/// The arcs run from the first n nodes to the last m nodes.
pub fn complete_bipartite<G>(n: usize, m: usize) -> G
where
    G: Buildable,
{
    let mut b = G::Builder::with_capacities(n + m, n * m);
    let nodes = b.add_nodes(n + m);
    for &u in &nodes[..n] {
        for &v in &nodes[n..] {
            b.add_arc(u, v);
        }
    }
    b.into_graph()
}

/// Returns a star graph with `n` rays.
///
/// The center node will be the first node, the source of all arcs.
/// This is equivalent to `complete_bipartite(1,n)`.
pub fn star<G>(n: usize) -> G
where
    G: Buildable,
{
    complete_bipartite::<G>(1, n)
}

#[cfg(test)]
mod tests {

    use super::{complete_bipartite, cycle, path, star};
    use crate::traits::*;
    use crate::Net;
    use std::cmp::{max, min};

    #[test]
    fn test_path() {
        let g = path::<Net>(5);
        assert_eq!(g.num_nodes(), 6);
        assert_eq!(g.num_arcs(), 5);
        for a in g.arcs() {
            assert_eq!(g.src(a).index() + 1, g.snk(a).index());
        }
        let mut outdegs = vec![0; g.num_nodes()];
        let mut indegs = vec![0; g.num_nodes()];
        for a in g.arcs() {
            outdegs[g.src(a).index()] += 1;
            indegs[g.snk(a).index()] += 1;
        }
        assert_eq!(outdegs.iter().filter(|x| **x == 0).count(), 1);
        assert_eq!(indegs.iter().filter(|x| **x == 0).count(), 1);
    }

    #[test]
    fn test_cycle() {
        let g = cycle::<Net>(42);
        assert_eq!(g.num_nodes(), 42);
        assert_eq!(g.num_arcs(), 42);
        for a in g.arcs() {
            let (u, v) = (g.src(a).index(), g.snk(a).index());
            assert!((u + 1) % g.num_nodes() == v);
        }
        for u in g.nodes() {
            assert_eq!(g.outarcs(u).count(), 1);
            assert_eq!(g.inarcs(u).count(), 1);
        }
    }

    #[test]
    fn test_complete_bipartite() {
        let n = 13;
        let m = 7;
        let g = complete_bipartite::<Net>(n, m);
        assert_eq!(g.num_nodes(), n + m);
        assert_eq!(g.num_arcs(), n * m);
        for a in g.arcs() {
            let (u, v) = (g.src(a).index(), g.snk(a).index());
            assert!(min(u, v) < n);
            assert!(max(u, v) >= n);
        }
        for u in g.nodes() {
            if u.index() < n {
                assert_eq!(g.outarcs(u).count(), m);
                assert_eq!(g.inarcs(u).count(), 0);
            } else {
                assert_eq!(g.outarcs(u).count(), 0);
                assert_eq!(g.inarcs(u).count(), n);
            }
        }
    }

    #[test]
    fn test_star() {
        let n = 17;
        let g: Net = star(n);
        assert_eq!(g.num_nodes(), n + 1);
        assert_eq!(g.num_arcs(), n);
        for a in g.arcs() {
            assert_eq!(g.src(a).index(), 0);
        }
    }
}
