/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The spanning tree structure of the network simplex method.
//!
//! The basis of the simplex method is a spanning tree of the graph
//! augmented by an artificial root node and one artificial arc per
//! node. The tree is stored in flat index arrays: besides the parent
//! and the predecessor arc of each node, a cyclic preorder list
//! (`thread`/`rev_thread`), the subtree sizes and the last preorder
//! successor of each subtree are maintained. This allows each pivot to
//! update the tree in time proportional to the size of the subtree that
//! is moved.

use crate::num::traits::{Bounded, NumAssign, Signed};

/// Sentinel index for "no node" (the parent of the root).
const NONE: usize = usize::MAX;

/// A non-basic arc at its upper bound.
pub(crate) const STATE_UPPER: i8 = -1;
/// A basic arc.
pub(crate) const STATE_TREE: i8 = 0;
/// A non-basic arc at its lower bound.
pub(crate) const STATE_LOWER: i8 = 1;

/// Predecessor arc points from the node towards its parent.
const DIR_UP: i8 = 1;
/// Predecessor arc points from the parent towards the node.
const DIR_DOWN: i8 = -1;

/// The basis tree over the augmented graph.
///
/// All problem data refers to the shifted problem: lower bounds have
/// been removed, so every arc has the residual capacity `cap` and the
/// flow is relative to the lower bound.
pub(crate) struct SpanningTree<F> {
    /// Number of arcs eligible for pricing (original arcs and, for the
    /// inequality forms, the zero-cost slack arcs).
    pub search_arc_num: usize,
    /// Total number of arcs including the artificial ones.
    pub all_arc_num: usize,

    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub cost: Vec<F>,
    pub cap: Vec<F>,
    pub flow: Vec<F>,
    pub pi: Vec<F>,
    pub state: Vec<i8>,

    parent: Vec<usize>,
    pred: Vec<usize>,
    pred_dir: Vec<i8>,
    thread: Vec<usize>,
    rev_thread: Vec<usize>,
    succ_num: Vec<usize>,
    last_succ: Vec<usize>,
    dirty_revs: Vec<usize>,

    inf: F,

    // Data of the current pivot iteration.
    in_arc: usize,
    join: usize,
    u_in: usize,
    v_in: usize,
    u_out: usize,
    v_out: usize,
    delta: F,
}

impl<F> SpanningTree<F>
where
    F: Bounded + NumAssign + Signed + Ord + Copy,
{
    /// Build the initial basis for the shifted problem.
    ///
    /// The `source`/`target`/`cap`/`cost` vectors contain the original
    /// arcs and are extended by the artificial arcs. Which artificial
    /// arcs are created depends on the sign of the supply sum: for a
    /// zero sum each node is connected to the root by a single tree
    /// arc; otherwise the imbalance is absorbed by additional
    /// searchable zero-cost slack arcs, while only arcs that must not
    /// carry flow in a feasible solution obtain the artificial cost.
    pub fn new(
        mut source: Vec<usize>,
        mut target: Vec<usize>,
        mut cap: Vec<F>,
        mut cost: Vec<F>,
        supply: &[F],
        sum_supply: F,
        art_cost: F,
    ) -> Self {
        let node_num = supply.len();
        let arc_num = source.len();
        let root = node_num;
        let all_node_num = node_num + 1;
        let max_arc_num = arc_num + 2 * node_num;
        let inf = F::max_value();

        source.resize(max_arc_num, 0);
        target.resize(max_arc_num, 0);
        cap.resize(max_arc_num, inf);
        cost.resize(max_arc_num, F::zero());
        let mut flow = vec![F::zero(); max_arc_num];
        let mut state = vec![STATE_LOWER; max_arc_num];
        let mut pi = vec![F::zero(); all_node_num];

        let mut parent = vec![NONE; all_node_num];
        let mut pred = vec![NONE; all_node_num];
        let mut pred_dir = vec![DIR_UP; all_node_num];
        let mut thread = vec![0; all_node_num];
        let mut rev_thread = vec![0; all_node_num];
        let mut succ_num = vec![0; all_node_num];
        let mut last_succ = vec![0; all_node_num];

        // The artificial node is the root of the basis tree.
        parent[root] = NONE;
        pred[root] = NONE;
        thread[root] = 0;
        rev_thread[0] = root;
        succ_num[root] = node_num + 1;
        last_succ[root] = node_num - 1;
        pi[root] = F::zero();

        let search_arc_num;
        let all_arc_num;

        if sum_supply == F::zero() {
            // Balanced supplies. Every node is attached to the root by
            // one artificial tree arc, the artificial arcs are not
            // searchable.
            search_arc_num = arc_num;
            all_arc_num = arc_num + node_num;
            for u in 0..node_num {
                let e = arc_num + u;
                parent[u] = root;
                pred[u] = e;
                thread[u] = u + 1;
                rev_thread[u + 1] = u;
                succ_num[u] = 1;
                last_succ[u] = u;
                cap[e] = inf;
                state[e] = STATE_TREE;
                if supply[u] >= F::zero() {
                    pred_dir[u] = DIR_UP;
                    pi[u] = F::zero();
                    source[e] = u;
                    target[e] = root;
                    flow[e] = supply[u];
                    cost[e] = F::zero();
                } else {
                    pred_dir[u] = DIR_DOWN;
                    pi[u] = art_cost;
                    source[e] = root;
                    target[e] = u;
                    flow[e] = -supply[u];
                    cost[e] = art_cost;
                }
            }
        } else if sum_supply > F::zero() {
            // LEQ supply constraints. A zero-cost slack arc towards
            // the root lets every node leave part of its supply
            // unsent; demand nodes additionally get a costly tree arc.
            search_arc_num = arc_num + node_num;
            let mut f = arc_num + node_num;
            for u in 0..node_num {
                let e = arc_num + u;
                parent[u] = root;
                thread[u] = u + 1;
                rev_thread[u + 1] = u;
                succ_num[u] = 1;
                last_succ[u] = u;
                if supply[u] >= F::zero() {
                    pred_dir[u] = DIR_UP;
                    pi[u] = F::zero();
                    pred[u] = e;
                    source[e] = u;
                    target[e] = root;
                    cap[e] = inf;
                    flow[e] = supply[u];
                    state[e] = STATE_TREE;
                    cost[e] = F::zero();
                } else {
                    pred_dir[u] = DIR_DOWN;
                    pi[u] = art_cost;
                    pred[u] = f;
                    source[f] = root;
                    target[f] = u;
                    cap[f] = inf;
                    flow[f] = -supply[u];
                    state[f] = STATE_TREE;
                    cost[f] = art_cost;
                    source[e] = u;
                    target[e] = root;
                    cap[e] = inf;
                    flow[e] = F::zero();
                    state[e] = STATE_LOWER;
                    cost[e] = F::zero();
                    f += 1;
                }
            }
            all_arc_num = f;
        } else {
            // GEQ supply constraints, the mirror image of the LEQ
            // case: slack arcs leave the root, supply nodes get the
            // costly tree arc.
            search_arc_num = arc_num + node_num;
            let mut f = arc_num + node_num;
            for u in 0..node_num {
                let e = arc_num + u;
                parent[u] = root;
                thread[u] = u + 1;
                rev_thread[u + 1] = u;
                succ_num[u] = 1;
                last_succ[u] = u;
                if supply[u] <= F::zero() {
                    pred_dir[u] = DIR_DOWN;
                    pi[u] = F::zero();
                    pred[u] = e;
                    source[e] = root;
                    target[e] = u;
                    cap[e] = inf;
                    flow[e] = -supply[u];
                    state[e] = STATE_TREE;
                    cost[e] = F::zero();
                } else {
                    pred_dir[u] = DIR_UP;
                    pi[u] = -art_cost;
                    pred[u] = f;
                    source[f] = u;
                    target[f] = root;
                    cap[f] = inf;
                    flow[f] = supply[u];
                    state[f] = STATE_TREE;
                    cost[f] = art_cost;
                    source[e] = root;
                    target[e] = u;
                    cap[e] = inf;
                    flow[e] = F::zero();
                    state[e] = STATE_LOWER;
                    cost[e] = F::zero();
                    f += 1;
                }
            }
            all_arc_num = f;
        }

        SpanningTree {
            search_arc_num,
            all_arc_num,
            source,
            target,
            cost,
            cap,
            flow,
            pi,
            state,
            parent,
            pred,
            pred_dir,
            thread,
            rev_thread,
            succ_num,
            last_succ,
            dirty_revs: Vec::new(),
            inf,
            in_arc: 0,
            join: 0,
            u_in: 0,
            v_in: 0,
            u_out: 0,
            v_out: 0,
            delta: F::zero(),
        }
    }

    /// The signed violation of a non-basic arc.
    ///
    /// The value is negative iff pushing flow along the arc (backwards
    /// for an arc at its upper bound) reduces the total cost.
    #[inline]
    pub fn red_cost(&self, e: usize) -> F {
        let c = self.cost[e] + self.pi[self.source[e]] - self.pi[self.target[e]];
        match self.state[e] {
            STATE_UPPER => -c,
            STATE_TREE => F::zero(),
            _ => c,
        }
    }

    /// Perform one pivot with the given entering arc.
    ///
    /// Returns `false` iff the cycle closed by the entering arc has
    /// unlimited residual capacity, i.e. the problem is unbounded.
    pub fn pivot(&mut self, in_arc: usize) -> bool {
        self.in_arc = in_arc;
        self.find_join();
        let change = self.find_leaving();
        if self.delta >= self.inf {
            return false;
        }
        self.change_flow(change);
        if change {
            self.update_tree();
            self.update_potential();
        }
        true
    }

    // Find the common ancestor of the end nodes of the entering arc.
    //
    // The subtree sizes strictly decrease along every root-leaf path,
    // so the node with the smaller subtree can always safely ascend.
    fn find_join(&mut self) {
        let mut u = self.source[self.in_arc];
        let mut v = self.target[self.in_arc];
        while u != v {
            if self.succ_num[u] < self.succ_num[v] {
                u = self.parent[u];
            } else {
                v = self.parent[v];
            }
        }
        self.join = u;
    }

    // Find the leaving arc of the cycle.
    //
    // The cycle is traversed in the direction of the entering arc (in
    // reverse direction if the arc is at its upper bound). Ties are
    // broken deterministically: on the branch of the first node a
    // strictly smaller residual wins, on the branch of the second node
    // an equal residual wins as well. Returns `false` iff the entering
    // arc itself restricts the augmentation, i.e. it merely switches
    // its bound.
    fn find_leaving(&mut self) -> bool {
        let (first, second) = if self.state[self.in_arc] == STATE_LOWER {
            (self.source[self.in_arc], self.target[self.in_arc])
        } else {
            (self.target[self.in_arc], self.source[self.in_arc])
        };

        self.delta = self.cap[self.in_arc];
        let mut result = 0;

        let mut u = first;
        while u != self.join {
            let e = self.pred[u];
            let d = if self.pred_dir[u] == DIR_UP {
                self.flow[e]
            } else if self.cap[e] >= self.inf {
                self.inf
            } else {
                self.cap[e] - self.flow[e]
            };
            if d < self.delta {
                self.delta = d;
                self.u_out = u;
                result = 1;
            }
            u = self.parent[u];
        }

        let mut u = second;
        while u != self.join {
            let e = self.pred[u];
            let d = if self.pred_dir[u] == DIR_DOWN {
                self.flow[e]
            } else if self.cap[e] >= self.inf {
                self.inf
            } else {
                self.cap[e] - self.flow[e]
            };
            if d <= self.delta {
                self.delta = d;
                self.u_out = u;
                result = 2;
            }
            u = self.parent[u];
        }

        if result == 1 {
            self.u_in = first;
            self.v_in = second;
        } else {
            self.u_in = second;
            self.v_in = first;
        }
        result != 0
    }

    // Augment the flow along the cycle and update the arc states.
    fn change_flow(&mut self, change: bool) {
        if self.delta > F::zero() {
            let val = if self.state[self.in_arc] == STATE_UPPER {
                -self.delta
            } else {
                self.delta
            };
            self.flow[self.in_arc] += val;
            let mut u = self.source[self.in_arc];
            while u != self.join {
                let e = self.pred[u];
                if self.pred_dir[u] == DIR_UP {
                    self.flow[e] -= val;
                } else {
                    self.flow[e] += val;
                }
                u = self.parent[u];
            }
            let mut u = self.target[self.in_arc];
            while u != self.join {
                let e = self.pred[u];
                if self.pred_dir[u] == DIR_UP {
                    self.flow[e] += val;
                } else {
                    self.flow[e] -= val;
                }
                u = self.parent[u];
            }
        }

        if change {
            self.state[self.in_arc] = STATE_TREE;
            let out = self.pred[self.u_out];
            self.state[out] = if self.flow[out] == F::zero() {
                STATE_LOWER
            } else {
                STATE_UPPER
            };
        } else {
            self.state[self.in_arc] = -self.state[self.in_arc];
        }
    }

    // Replace the leaving arc by the entering arc in the basis tree.
    //
    // The subtree that was attached by the leaving arc is rerooted at
    // `u_in` and reattached below `v_in`. All index arrays are repaired
    // along the stem between `u_in` and `u_out` only.
    fn update_tree(&mut self) {
        let old_rev_thread = self.rev_thread[self.u_out];
        let old_succ_num = self.succ_num[self.u_out];
        let old_last_succ = self.last_succ[self.u_out];
        self.v_out = self.parent[self.u_out];

        if self.u_in == self.u_out {
            // The entering arc replaces the predecessor of u_in.
            self.parent[self.u_in] = self.v_in;
            self.pred[self.u_in] = self.in_arc;
            self.pred_dir[self.u_in] = if self.u_in == self.source[self.in_arc] {
                DIR_UP
            } else {
                DIR_DOWN
            };

            if self.thread[self.v_in] != self.u_out {
                // Move the subtree of u_out directly behind v_in in
                // the preorder list.
                let mut after = self.thread[old_last_succ];
                self.thread[old_rev_thread] = after;
                self.rev_thread[after] = old_rev_thread;
                after = self.thread[self.v_in];
                self.thread[self.v_in] = self.u_out;
                self.rev_thread[self.u_out] = self.v_in;
                self.thread[old_last_succ] = after;
                self.rev_thread[after] = old_last_succ;
            }
        } else {
            // Handle the case when old_rev_thread equals to v_in
            // (it also means that join and v_out coincide).
            let thread_continue = if old_rev_thread == self.v_in {
                self.thread[old_last_succ]
            } else {
                self.thread[self.v_in]
            };

            // Update thread and parent along the stem nodes (i.e. the
            // nodes between u_in and u_out, whose parent have to be
            // changed).
            let mut stem = self.u_in;
            let mut par_stem = self.v_in;
            let mut last = self.last_succ[self.u_in];
            let mut after = self.thread[last];
            self.thread[self.v_in] = self.u_in;
            self.dirty_revs.clear();
            self.dirty_revs.push(self.v_in);
            while stem != self.u_out {
                // Insert the next stem node into the thread list.
                let next_stem = self.parent[stem];
                self.thread[last] = next_stem;
                self.dirty_revs.push(last);

                // Remove the subtree of stem from the thread list.
                let before = self.rev_thread[stem];
                self.thread[before] = after;
                self.rev_thread[after] = before;

                // Change the parent node and shift the stem nodes.
                self.parent[stem] = par_stem;
                par_stem = stem;
                stem = next_stem;

                last = if self.last_succ[stem] == self.last_succ[par_stem] {
                    self.rev_thread[par_stem]
                } else {
                    self.last_succ[stem]
                };
                after = self.thread[last];
            }
            self.parent[self.u_out] = par_stem;
            self.thread[last] = thread_continue;
            self.rev_thread[thread_continue] = last;
            self.last_succ[self.u_out] = last;

            // Remove the subtree of u_out from the thread list except
            // for the case when old_rev_thread equals to v_in.
            if old_rev_thread != self.v_in {
                self.thread[old_rev_thread] = after;
                self.rev_thread[after] = old_rev_thread;
            }

            // Update rev_thread using the new thread values.
            for i in 0..self.dirty_revs.len() {
                let u = self.dirty_revs[i];
                self.rev_thread[self.thread[u]] = u;
            }

            // Update pred, pred_dir, last_succ and succ_num for the
            // stem nodes from u_out to u_in.
            let mut tmp_sc = 0;
            let tmp_ls = self.last_succ[self.u_out];
            let mut u = self.u_out;
            let mut p = self.parent[u];
            while u != self.u_in {
                self.pred[u] = self.pred[p];
                self.pred_dir[u] = -self.pred_dir[p];
                tmp_sc += self.succ_num[u] - self.succ_num[p];
                self.succ_num[u] = tmp_sc;
                self.last_succ[p] = tmp_ls;
                u = p;
                p = self.parent[u];
            }
            self.pred[self.u_in] = self.in_arc;
            self.pred_dir[self.u_in] = if self.u_in == self.source[self.in_arc] {
                DIR_UP
            } else {
                DIR_DOWN
            };
            self.succ_num[self.u_in] = old_succ_num;
        }

        // Update last_succ from v_in towards the root.
        let up_limit_out = if self.last_succ[self.join] == self.v_in {
            self.join
        } else {
            NONE
        };
        let last_succ_out = self.last_succ[self.u_out];
        let mut u = self.v_in;
        while u != NONE && self.last_succ[u] == self.v_in {
            self.last_succ[u] = last_succ_out;
            u = self.parent[u];
        }

        // Update last_succ from v_out towards the root.
        if self.join != old_rev_thread && self.v_in != old_rev_thread {
            let mut u = self.v_out;
            while u != up_limit_out && self.last_succ[u] == old_last_succ {
                self.last_succ[u] = old_rev_thread;
                u = self.parent[u];
            }
        } else if last_succ_out != old_last_succ {
            let mut u = self.v_out;
            while u != up_limit_out && self.last_succ[u] == old_last_succ {
                self.last_succ[u] = last_succ_out;
                u = self.parent[u];
            }
        }

        // Update succ_num from v_in to join.
        let mut u = self.v_in;
        while u != self.join {
            self.succ_num[u] += old_succ_num;
            u = self.parent[u];
        }
        // Update succ_num from v_out to join.
        let mut u = self.v_out;
        while u != self.join {
            self.succ_num[u] -= old_succ_num;
            u = self.parent[u];
        }
    }

    // Update the potentials of the nodes in the reattached subtree.
    fn update_potential(&mut self) {
        let sigma = self.pi[self.v_in] - self.pi[self.u_in]
            - if self.pred_dir[self.u_in] == DIR_UP {
                self.cost[self.in_arc]
            } else {
                -self.cost[self.in_arc]
            };
        let end = self.thread[self.last_succ[self.u_in]];
        let mut u = self.u_in;
        while u != end {
            self.pi[u] += sigma;
            u = self.thread[u];
        }
    }

    /// Return `true` iff no artificial arc carries flow.
    pub fn is_feasible(&self) -> bool {
        self.flow[self.search_arc_num..self.all_arc_num]
            .iter()
            .all(|f| f.is_zero())
    }
}
