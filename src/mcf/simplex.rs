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

//! A primal network simplex implementation.
//!
//! The solver minimizes the total cost `sum(cost[a] * flow[a])` over
//! all flows satisfying the arc bounds `lower[a] <= flow[a] <=
//! upper[a]` and the node balance constraints selected by the
//! [`ProblemForm`](crate::mcf::ProblemForm). Along with the optimal
//! flow the solver computes optimal node potentials certifying
//! optimality by complementary slackness.
//!
//! # Example
//!
//! ```
//! use netsimplex::classes::path;
//! use netsimplex::mcf::{NetworkSimplex, SolutionState};
//! use netsimplex::traits::*;
//! use netsimplex::Net;
//!
//! // A path of two arcs sending 5 units from the first to the last node.
//! let g: Net = path(2);
//! let s = g.id2node(0);
//! let t = g.id2node(2);
//!
//! let mut spx = NetworkSimplex::<_, i64>::new(&g);
//! spx.set_st_supply(s, t, 5);
//! assert_eq!(spx.run(), SolutionState::Optimal);
//! assert_eq!(spx.value(), 10);
//! ```

use super::pivot::{EnteringArcSearch, PivotRule};
use super::tree::SpanningTree;
use super::{ProblemForm, SolutionState};
use crate::traits::{GraphType, IndexDigraph};
use log::debug;
use num_traits::{Bounded, FromPrimitive, NumAssign, NumCast, Signed};

/// A primal network simplex algorithm.
///
/// The solver is parameterized by the graph type `G` and the number
/// type `F` used for flows, costs and supplies. The number type is
/// assumed to be an exact signed integer type; all computations are
/// carried out without rounding.
///
/// The problem is configured with the chainable setter methods. All
/// settings keep their values across multiple calls of [`run`], only
/// [`reset`] restores the defaults: zero lower bounds, uncapacitated
/// arcs, unit costs, zero supplies and the equality problem form.
///
/// [`run`]: NetworkSimplex::run
/// [`reset`]: NetworkSimplex::reset
pub struct NetworkSimplex<'a, G, F> {
    graph: &'a G,

    source: Vec<usize>,
    target: Vec<usize>,

    lower: Vec<F>,
    upper: Vec<F>,
    cost: Vec<F>,
    supply: Vec<F>,

    form: ProblemForm,

    /// The pivot rule used by `run`.
    pub pivot_rule: PivotRule,

    /// The artificial cost value.
    ///
    /// Should be larger than the absolute value of any cycle cost of
    /// the graph. If `None` (the default) the artificial cost is set
    /// to `(max(cost) + 1) * n`, which is large enough.
    pub artificial_cost: Option<F>,

    flow: Vec<F>,
    potential: Vec<F>,

    niter: usize,
    solution_state: SolutionState,
}

impl<'a, G, F> NetworkSimplex<'a, G, F>
where
    G: IndexDigraph<'a>,
    F: Bounded + NumAssign + NumCast + FromPrimitive + Signed + Ord + Copy,
{
    pub fn new(g: &'a G) -> Self {
        let n = g.num_nodes();
        let m = g.num_arcs();
        let mut spx = NetworkSimplex {
            graph: g,
            source: Vec::with_capacity(m),
            target: Vec::with_capacity(m),
            lower: vec![F::zero(); m],
            upper: vec![F::max_value(); m],
            cost: vec![F::one(); m],
            supply: vec![F::zero(); n],
            form: ProblemForm::Eq,
            pivot_rule: PivotRule::default(),
            artificial_cost: None,
            flow: Vec::new(),
            potential: Vec::new(),
            niter: 0,
            solution_state: SolutionState::Unknown,
        };
        for aid in 0..m {
            let a = g.id2arc(aid);
            spx.source.push(g.node_id(g.src(a)));
            spx.target.push(g.node_id(g.snk(a)));
        }
        spx
    }

    pub fn as_graph(&self) -> &'a G {
        self.graph
    }

    /// Set the lower bound of a single arc.
    pub fn set_lower(&mut self, a: <G as GraphType<'a>>::Arc, lb: F) -> &mut Self {
        self.lower[self.graph.arc_id(a)] = lb;
        self
    }

    /// Set the lower bounds of all arcs.
    ///
    /// Unset lower bounds are zero. An arc whose lower bound exceeds
    /// its upper bound renders the problem infeasible.
    pub fn set_lowers<L>(&mut self, lower: L) -> &mut Self
    where
        L: Fn(<G as GraphType<'a>>::Arc) -> F,
    {
        for aid in 0..self.graph.num_arcs() {
            self.lower[aid] = (lower)(self.graph.id2arc(aid));
        }
        self
    }

    /// Set the upper bound of a single arc.
    pub fn set_upper(&mut self, a: <G as GraphType<'a>>::Arc, ub: F) -> &mut Self {
        self.upper[self.graph.arc_id(a)] = ub;
        self
    }

    /// Set the upper bounds of all arcs.
    ///
    /// Unset upper bounds are `F::max_value()`, which is treated as
    /// "uncapacitated".
    pub fn set_uppers<U>(&mut self, upper: U) -> &mut Self
    where
        U: Fn(<G as GraphType<'a>>::Arc) -> F,
    {
        for aid in 0..self.graph.num_arcs() {
            self.upper[aid] = (upper)(self.graph.id2arc(aid));
        }
        self
    }

    /// Set the upper bounds of all arcs.
    ///
    /// This is an alias for [`set_uppers`](NetworkSimplex::set_uppers).
    pub fn set_capacities<U>(&mut self, upper: U) -> &mut Self
    where
        U: Fn(<G as GraphType<'a>>::Arc) -> F,
    {
        self.set_uppers(upper)
    }

    /// Set the lower and upper bounds of all arcs.
    pub fn set_bounds<L, U>(&mut self, lower: L, upper: U) -> &mut Self
    where
        L: Fn(<G as GraphType<'a>>::Arc) -> F,
        U: Fn(<G as GraphType<'a>>::Arc) -> F,
    {
        self.set_lowers(lower).set_uppers(upper)
    }

    /// Set the cost of a single arc.
    pub fn set_cost(&mut self, a: <G as GraphType<'a>>::Arc, cost: F) -> &mut Self {
        self.cost[self.graph.arc_id(a)] = cost;
        self
    }

    /// Set the costs of all arcs.
    ///
    /// Unset costs are one.
    pub fn set_costs<C>(&mut self, cost: C) -> &mut Self
    where
        C: Fn(<G as GraphType<'a>>::Arc) -> F,
    {
        for aid in 0..self.graph.num_arcs() {
            self.cost[aid] = (cost)(self.graph.id2arc(aid));
        }
        self
    }

    /// Set the supply of a single node.
    pub fn set_supply(&mut self, u: <G as GraphType<'a>>::Node, supply: F) -> &mut Self {
        self.supply[self.graph.node_id(u)] = supply;
        self
    }

    /// Set the supplies of all nodes.
    ///
    /// Positive values are supplies, negative values demands. Unset
    /// supplies are zero.
    pub fn set_supplies<B>(&mut self, supply: B) -> &mut Self
    where
        B: Fn(<G as GraphType<'a>>::Node) -> F,
    {
        for uid in 0..self.graph.num_nodes() {
            self.supply[uid] = (supply)(self.graph.id2node(uid));
        }
        self
    }

    /// Set a single source and a single target node.
    ///
    /// This replaces all node supplies: `s` obtains the supply `k`,
    /// `t` the demand `k` and every other node a zero supply.
    pub fn set_st_supply(&mut self, s: <G as GraphType<'a>>::Node, t: <G as GraphType<'a>>::Node, k: F) -> &mut Self {
        for b in self.supply.iter_mut() {
            *b = F::zero();
        }
        self.supply[self.graph.node_id(s)] += k;
        self.supply[self.graph.node_id(t)] -= k;
        self
    }

    /// Set the form of the node balance constraints.
    ///
    /// The default is [`ProblemForm::Eq`].
    pub fn set_problem_form(&mut self, form: ProblemForm) -> &mut Self {
        self.form = form;
        self
    }

    /// Set the pivot rule used by [`run`](NetworkSimplex::run).
    pub fn set_pivot_rule(&mut self, rule: PivotRule) -> &mut Self {
        self.pivot_rule = rule;
        self
    }

    /// Restore all parameter defaults.
    ///
    /// Only the graph binding survives: the lower bounds become zero,
    /// the arcs uncapacitated, the costs one, the supplies zero and
    /// the problem form [`ProblemForm::Eq`].
    pub fn reset(&mut self) -> &mut Self {
        for lb in self.lower.iter_mut() {
            *lb = F::zero();
        }
        for ub in self.upper.iter_mut() {
            *ub = F::max_value();
        }
        for c in self.cost.iter_mut() {
            *c = F::one();
        }
        for b in self.supply.iter_mut() {
            *b = F::zero();
        }
        self.form = ProblemForm::Eq;
        self.pivot_rule = PivotRule::default();
        self.artificial_cost = None;
        self.niter = 0;
        self.solution_state = SolutionState::Unknown;
        self
    }

    /// Solve the min-cost-flow problem with the configured pivot rule.
    pub fn run(&mut self) -> SolutionState {
        let rule = self.pivot_rule;
        self.run_with(rule)
    }

    /// Solve the min-cost-flow problem with the given pivot rule.
    pub fn run_with(&mut self, rule: PivotRule) -> SolutionState {
        self.niter = 0;
        self.solution_state = self.start(rule);
        self.solution_state
    }

    /// Return the solution state of the latest computation.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// Return the number of simplex iterations of the latest `run`.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// The flow of an arc in the latest solution.
    pub fn flow(&self, a: <G as GraphType<'a>>::Arc) -> F {
        self.flow[self.graph.arc_id(a)]
    }

    /// The potential of a node in the latest solution.
    pub fn potential(&self, u: <G as GraphType<'a>>::Node) -> F {
        self.potential[self.graph.node_id(u)]
    }

    /// The flows of all arcs indexed by their arc ids.
    ///
    /// The map is only meaningful after an optimal `run`.
    pub fn flow_map(&self) -> &[F] {
        &self.flow
    }

    /// The potentials of all nodes indexed by their node ids.
    ///
    /// The map is only meaningful after an optimal `run`.
    pub fn potential_map(&self) -> &[F] {
        &self.potential
    }

    /// Take the flow map out of the solver.
    pub fn take_flow_map(&mut self) -> Vec<F> {
        std::mem::take(&mut self.flow)
    }

    /// Take the potential map out of the solver.
    pub fn take_potential_map(&mut self) -> Vec<F> {
        std::mem::take(&mut self.potential)
    }

    /// Return the total cost of the latest computed flow.
    ///
    /// The products and the sum are computed in the accumulator type
    /// `C`, which the caller chooses large enough to avoid overflow.
    pub fn total_cost<C>(&self) -> C
    where
        C: NumAssign + NumCast + Copy,
    {
        let mut total = C::zero();
        for e in 0..self.flow.len() {
            total += C::from(self.cost[e]).unwrap() * C::from(self.flow[e]).unwrap();
        }
        total
    }

    /// Return the total cost of the latest computed flow.
    ///
    /// This is `total_cost` computed in the flow type itself.
    pub fn value(&self) -> F {
        self.total_cost()
    }

    fn start(&mut self, rule: PivotRule) -> SolutionState {
        let n = self.graph.num_nodes();
        let m = self.graph.num_arcs();
        let inf = F::max_value();

        // An empty problem has an empty optimal solution.
        if n == 0 {
            self.flow.clear();
            self.potential.clear();
            return SolutionState::Optimal;
        }

        // Check the supply sum required by the problem form.
        let mut sum_supply = F::zero();
        for &b in &self.supply {
            sum_supply += b;
        }
        let sum_ok = match self.form {
            ProblemForm::Eq => sum_supply == F::zero(),
            ProblemForm::Geq => sum_supply <= F::zero(),
            ProblemForm::Leq => sum_supply >= F::zero(),
        };
        if !sum_ok {
            return SolutionState::Infeasible;
        }

        // Remove the lower bounds and compute the residual capacities.
        let mut cap = vec![F::zero(); m];
        let mut supply = self.supply.clone();
        for e in 0..m {
            let c = self.lower[e];
            let u = self.upper[e];
            let bound = if c >= F::zero() { inf } else { inf + c };
            cap[e] = if u < bound { u - c } else { inf };
            if cap[e] < F::zero() {
                // lower > upper
                return SolutionState::Infeasible;
            }
            supply[self.source[e]] -= c;
            supply[self.target[e]] += c;
        }

        // The artificial cost must dominate the cost of every cycle.
        let art_cost = self.artificial_cost.unwrap_or_else(|| {
            let mut c_max = F::zero();
            for &c in &self.cost {
                if c > c_max {
                    c_max = c;
                }
            }
            (c_max + F::one()) * F::from_usize(n).unwrap()
        });

        let mut tree = SpanningTree::new(
            self.source.clone(),
            self.target.clone(),
            cap,
            self.cost.clone(),
            &supply,
            sum_supply,
            art_cost,
        );
        debug!(
            "initial basis: {} nodes, {} arcs ({} searchable)",
            n, tree.all_arc_num, tree.search_arc_num
        );

        let mut search = EnteringArcSearch::new(rule, tree.search_arc_num);
        while let Some(e) = search.find(&tree) {
            self.niter += 1;
            if !tree.pivot(e) {
                debug!("unbounded after {} iterations", self.niter);
                return SolutionState::Unbounded;
            }
        }
        debug!("finished after {} iterations", self.niter);

        // Any remaining flow on an artificial arc certifies
        // infeasibility of the original problem.
        if !tree.is_feasible() {
            return SolutionState::Infeasible;
        }

        // Add the lower bounds back to the solution.
        self.flow.clear();
        self.flow.extend_from_slice(&tree.flow[..m]);
        for e in 0..m {
            self.flow[e] += self.lower[e];
        }
        self.potential.clear();
        self.potential.extend_from_slice(&tree.pi[..n]);

        // With a zero supply sum no slack arcs exist, so shift the
        // potentials to meet the sign convention of the inequality
        // forms.
        if sum_supply.is_zero() {
            match self.form {
                ProblemForm::Geq => {
                    let max_pot = *self.potential.iter().max().unwrap();
                    if max_pot > F::zero() {
                        for p in self.potential.iter_mut() {
                            *p -= max_pot;
                        }
                    }
                }
                ProblemForm::Leq => {
                    let min_pot = *self.potential.iter().min().unwrap();
                    if min_pot < F::zero() {
                        for p in self.potential.iter_mut() {
                            *p -= min_pot;
                        }
                    }
                }
                ProblemForm::Eq => (),
            }
        }

        SolutionState::Optimal
    }
}

/// Solve a min-cost-flow problem with a network simplex algorithm.
///
/// The function returns the objective value and the optimal flow.
pub fn network_simplex<'a, G, F, Bs, Ls, Us, Cs>(
    g: &'a G,
    supplies: Bs,
    lower: Ls,
    upper: Us,
    costs: Cs,
) -> Option<(F, Vec<(G::Arc, F)>)>
where
    G: IndexDigraph<'a>,
    F: Bounded + NumAssign + NumCast + FromPrimitive + Signed + Ord + Copy,
    Bs: Fn(G::Node) -> F,
    Ls: Fn(G::Arc) -> F,
    Us: Fn(G::Arc) -> F,
    Cs: Fn(G::Arc) -> F,
{
    let mut spx = NetworkSimplex::new(g);
    spx.set_supplies(supplies).set_lowers(lower).set_uppers(upper).set_costs(costs);
    if spx.run() == SolutionState::Optimal {
        Some((spx.value(), g.arcs().map(|a| (a, spx.flow(a))).collect()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{NetworkSimplex, SolutionState};
    use crate::classes::{cycle, path};
    use crate::mcf::ProblemForm;
    use crate::traits::*;
    use crate::{Buildable, Builder, FullDigraph, Net};

    #[test]
    fn test_chain() {
        let g: Net = path(2);
        let costs = [1i64, 2];

        let mut spx = NetworkSimplex::new(&g);
        spx.set_costs(|a| costs[g.arc_id(a)]);
        spx.set_st_supply(g.id2node(0), g.id2node(2), 5);
        assert_eq!(spx.run(), SolutionState::Optimal);
        assert_eq!(spx.value(), 15);
        assert_eq!(spx.flow_map(), &[5, 5]);
        assert!(spx.num_iterations() > 0);

        // The potentials decrease by the arc cost along the chain.
        let pi = spx.potential_map();
        assert_eq!(pi[0] - pi[1], -costs[0]);
        assert_eq!(pi[1] - pi[2], -costs[1]);
    }

    #[test]
    fn test_negative_cycle_capacitated() {
        let g: Net = cycle(3);

        let mut spx = NetworkSimplex::<_, i64>::new(&g);
        spx.set_costs(|_| -1).set_uppers(|_| 2);
        assert_eq!(spx.run(), SolutionState::Optimal);
        assert_eq!(spx.value(), -6);
        assert_eq!(spx.flow_map(), &[2, 2, 2]);
    }

    #[test]
    fn test_unbounded() {
        let g: Net = cycle(3);

        let mut spx = NetworkSimplex::<_, i64>::new(&g);
        spx.set_costs(|_| -1);
        assert_eq!(spx.run(), SolutionState::Unbounded);
    }

    #[test]
    fn test_lower_above_upper() {
        let g: Net = path(1);

        let mut spx = NetworkSimplex::<_, i64>::new(&g);
        spx.set_lowers(|_| 3).set_uppers(|_| 2);
        assert_eq!(spx.run(), SolutionState::Infeasible);
    }

    #[test]
    fn test_empty_graph() {
        let g = Net::new();

        let mut spx = NetworkSimplex::<_, i64>::new(&g);
        assert_eq!(spx.run(), SolutionState::Optimal);
        assert_eq!(spx.value(), 0);
    }

    #[test]
    fn test_no_arcs() {
        let g = Net::new_with(|b| {
            b.add_nodes(2);
        });

        let mut spx = NetworkSimplex::<_, i64>::new(&g);
        spx.set_supply(g.id2node(0), 1).set_supply(g.id2node(1), -1);
        assert_eq!(spx.run(), SolutionState::Infeasible);

        // Without the possibility to route anything the GEQ form is
        // satisfied by all-zero balances if no node demands outflow.
        spx.reset().set_supply(g.id2node(0), -1).set_problem_form(ProblemForm::Geq);
        assert_eq!(spx.run(), SolutionState::Optimal);
        assert_eq!(spx.value(), 0);
    }

    #[test]
    fn test_self_loops() {
        // The complete digraph contains a loop at every node. A cheap
        // loop saturates its capacity, the others stay empty.
        let g = FullDigraph::<u32>::new(2);

        let mut spx = NetworkSimplex::<_, i64>::new(&g);
        spx.set_uppers(|_| 3).set_costs(|a| if g.arc_id(a) == 0 { -5 } else { 1 });
        assert_eq!(spx.run(), SolutionState::Optimal);
        assert_eq!(spx.value(), -15);
        assert_eq!(spx.flow_map(), &[3, 0, 0, 0]);
    }

    #[test]
    fn test_total_cost_accumulator() {
        let g: Net = path(1);

        let mut spx = NetworkSimplex::new(&g);
        spx.set_costs(|_| 1_000_000i64);
        spx.set_st_supply(g.id2node(0), g.id2node(1), 1_000_000);
        assert_eq!(spx.run(), SolutionState::Optimal);
        assert_eq!(spx.total_cost::<i128>(), 1_000_000_000_000i128);
    }

    #[test]
    fn test_convenience_function() {
        let g: Net = path(2);
        let supplies = [3i64, 0, -3];

        let result = super::network_simplex(
            &g,
            |u| supplies[g.node_id(u)],
            |_| 0,
            |_| i64::max_value(),
            |_| 2,
        );
        let (value, flows) = result.unwrap();
        assert_eq!(value, 12);
        assert!(flows.iter().all(|&(_, f)| f == 3));
    }
}
