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

use netsimplex::mcf::{NetworkSimplex, PivotRule, ProblemForm, SolutionState};
use netsimplex::traits::*;
use netsimplex::{Buildable, Builder, FullDigraph, FullGraph, Net};

const NODE_NUM: usize = 12;

// The test network: (source, target, cost, capacity, second lower bound).
// The first lower bound is zero on all arcs.
const ARCS: [(usize, usize, i64, i64, i64); 21] = [
    (0, 1, 70, 11, 8),
    (0, 2, 150, 3, 1),
    (0, 3, 80, 15, 2),
    (1, 7, 80, 12, 0),
    (2, 4, 140, 5, 3),
    (3, 5, 60, 10, 1),
    (3, 6, 80, 2, 0),
    (3, 7, 110, 3, 0),
    (4, 6, 60, 14, 0),
    (4, 10, 120, 12, 0),
    (5, 2, 0, 3, 0),
    (5, 8, 140, 4, 0),
    (5, 9, 90, 8, 0),
    (6, 0, 30, 5, 0),
    (7, 11, 60, 16, 4),
    (8, 11, 50, 6, 0),
    (9, 11, 70, 13, 5),
    (9, 1, 100, 7, 0),
    (9, 6, 60, 10, 0),
    (10, 9, 20, 14, 6),
    (11, 10, 30, 10, 0),
];

const SUP1: [i64; NODE_NUM] = [20, -4, 0, 0, 9, -6, 0, 0, 3, -2, 0, -20];
const SUP2: [i64; NODE_NUM] = [27, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, -27];
const SUP3: [i64; NODE_NUM] = [0; NODE_NUM];
const SUP4: [i64; NODE_NUM] = [20, -8, 0, 0, 6, -5, 0, 0, 0, -7, -10, -30];
const SUP5: [i64; NODE_NUM] = [30, -3, 0, 0, 11, -6, 0, 3, 0, -2, 0, -20];

fn build() -> Net {
    Net::new_with(|b| {
        let nodes = b.add_nodes(NODE_NUM);
        for &(u, v, _, _, _) in ARCS.iter() {
            b.add_arc(nodes[u], nodes[v]);
        }
    })
}

fn costs() -> Vec<i64> {
    ARCS.iter().map(|a| a.2).collect()
}

fn caps() -> Vec<i64> {
    ARCS.iter().map(|a| a.3).collect()
}

fn low2() -> Vec<i64> {
    ARCS.iter().map(|a| a.4).collect()
}

// Check the feasibility of a flow (the primal solution).
fn check_flow(lower: &[i64], upper: &[i64], supply: &[i64], flow: &[i64], form: ProblemForm) -> bool {
    for e in 0..ARCS.len() {
        if flow[e] < lower[e] || flow[e] > upper[e] {
            return false;
        }
    }

    for u in 0..NODE_NUM {
        let mut sum = 0;
        for (e, &(s, t, _, _, _)) in ARCS.iter().enumerate() {
            if s == u {
                sum += flow[e];
            }
            if t == u {
                sum -= flow[e];
            }
        }
        let ok = match form {
            ProblemForm::Eq => sum == supply[u],
            ProblemForm::Geq => sum >= supply[u],
            ProblemForm::Leq => sum <= supply[u],
        };
        if !ok {
            return false;
        }
    }

    true
}

// Check the feasibility of node potentials (the dual solution) using
// the complementary slackness optimality conditions.
fn check_potential(
    lower: &[i64],
    upper: &[i64],
    cost: &[i64],
    supply: &[i64],
    flow: &[i64],
    pi: &[i64],
) -> bool {
    for (e, &(s, t, _, _, _)) in ARCS.iter().enumerate() {
        let red_cost = cost[e] + pi[s] - pi[t];
        let ok = red_cost == 0
            || (red_cost > 0 && flow[e] == lower[e])
            || (red_cost < 0 && flow[e] == upper[e]);
        if !ok {
            return false;
        }
    }

    for u in 0..NODE_NUM {
        let mut sum = 0;
        for (e, &(s, t, _, _, _)) in ARCS.iter().enumerate() {
            if s == u {
                sum += flow[e];
            }
            if t == u {
                sum -= flow[e];
            }
        }
        if !(sum == supply[u] || pi[u] == 0) {
            return false;
        }
    }

    true
}

// Check an optimal run against the expected objective and the primal
// and dual feasibility conditions.
fn check_optimal(
    mcf: &NetworkSimplex<Net, i64>,
    total: i64,
    lower: &[i64],
    upper: &[i64],
    cost: &[i64],
    supply: &[i64],
    form: ProblemForm,
    test_id: &str,
) {
    assert_eq!(mcf.total_cost::<i64>(), total, "The flow is not optimal {}", test_id);
    assert!(
        check_flow(lower, upper, supply, mcf.flow_map(), form),
        "The flow is not feasible {}",
        test_id
    );
    assert!(
        check_potential(lower, upper, cost, supply, mcf.flow_map(), mcf.potential_map()),
        "Wrong potentials {}",
        test_id
    );
}

#[test]
fn test_eq_form() {
    let g = build();
    let c = costs();
    let u = caps();
    let l1 = vec![0i64; ARCS.len()];
    let l2 = low2();
    let cu = vec![i64::max_value(); ARCS.len()];
    let cc = vec![1i64; ARCS.len()];

    let mut mcf = NetworkSimplex::new(&g);

    mcf.set_uppers(|a| u[g.arc_id(a)]).set_costs(|a| c[g.arc_id(a)]);

    mcf.set_supplies(|v| SUP1[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A1");
    check_optimal(&mcf, 5240, &l1, &u, &c, &SUP1, ProblemForm::Eq, "#A1");

    mcf.set_st_supply(g.id2node(0), g.id2node(11), 27);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A2");
    check_optimal(&mcf, 7620, &l1, &u, &c, &SUP2, ProblemForm::Eq, "#A2");

    mcf.set_lowers(|a| l2[g.arc_id(a)]);

    mcf.set_supplies(|v| SUP1[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A3");
    check_optimal(&mcf, 5970, &l2, &u, &c, &SUP1, ProblemForm::Eq, "#A3");

    mcf.set_st_supply(g.id2node(0), g.id2node(11), 27);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A4");
    check_optimal(&mcf, 8010, &l2, &u, &c, &SUP2, ProblemForm::Eq, "#A4");

    // Unit costs and uncapacitated arcs are the defaults after reset.
    mcf.reset();
    mcf.set_supplies(|v| SUP1[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A5");
    check_optimal(&mcf, 74, &l1, &cu, &cc, &SUP1, ProblemForm::Eq, "#A5");

    mcf.set_lowers(|a| l2[g.arc_id(a)]).set_st_supply(g.id2node(0), g.id2node(11), 27);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A6");
    check_optimal(&mcf, 94, &l2, &cu, &cc, &SUP2, ProblemForm::Eq, "#A6");

    // Without supplies the zero flow is optimal.
    mcf.reset();
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A7");
    check_optimal(&mcf, 0, &l1, &cu, &cc, &SUP3, ProblemForm::Eq, "#A7");

    // The second lower bounds cannot be met by a circulation.
    mcf.set_bounds(|a| l2[g.arc_id(a)], |a| u[g.arc_id(a)]);
    assert_eq!(mcf.run(), SolutionState::Infeasible, "Wrong result #A8");
}

#[test]
fn test_geq_form() {
    let g = build();
    let c = costs();
    let u = caps();
    let l1 = vec![0i64; ARCS.len()];
    let l2 = low2();

    let mut mcf = NetworkSimplex::new(&g);

    mcf.set_problem_form(ProblemForm::Geq);
    mcf.set_uppers(|a| u[g.arc_id(a)])
        .set_costs(|a| c[g.arc_id(a)])
        .set_supplies(|v| SUP4[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A9");
    check_optimal(&mcf, 3530, &l1, &u, &c, &SUP4, ProblemForm::Geq, "#A9");

    mcf.set_lowers(|a| l2[g.arc_id(a)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A10");
    check_optimal(&mcf, 4540, &l2, &u, &c, &SUP4, ProblemForm::Geq, "#A10");

    // The supplies exceed the demands.
    mcf.set_problem_form(ProblemForm::CARRY_SUPPLIES);
    mcf.set_supplies(|v| SUP5[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Infeasible, "Wrong result #A11");
}

#[test]
fn test_leq_form() {
    let g = build();
    let c = costs();
    let u = caps();
    let l1 = vec![0i64; ARCS.len()];
    let l2 = low2();

    let mut mcf = NetworkSimplex::new(&g);

    mcf.set_problem_form(ProblemForm::Leq);
    mcf.set_uppers(|a| u[g.arc_id(a)])
        .set_costs(|a| c[g.arc_id(a)])
        .set_supplies(|v| SUP5[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A12");
    check_optimal(&mcf, 5080, &l1, &u, &c, &SUP5, ProblemForm::Leq, "#A12");

    mcf.set_lowers(|a| l2[g.arc_id(a)]);
    assert_eq!(mcf.run(), SolutionState::Optimal, "Wrong result #A13");
    check_optimal(&mcf, 5930, &l2, &u, &c, &SUP5, ProblemForm::Leq, "#A13");

    // The demands exceed the supplies.
    mcf.set_problem_form(ProblemForm::SATISFY_DEMANDS);
    mcf.set_supplies(|v| SUP4[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Infeasible, "Wrong result #A14");
}

#[test]
fn test_pivot_rules() {
    let g = build();
    let c = costs();
    let u = caps();
    let l2 = low2();

    let mut mcf = NetworkSimplex::new(&g);
    mcf.set_supplies(|v| SUP1[g.node_id(v)])
        .set_costs(|a| c[g.arc_id(a)])
        .set_capacities(|a| u[g.arc_id(a)])
        .set_lowers(|a| l2[g.arc_id(a)]);

    for &rule in &[
        PivotRule::FirstEligible,
        PivotRule::BestEligible,
        PivotRule::BlockSearch,
        PivotRule::CandidateList,
        PivotRule::AlteringList,
    ] {
        assert_eq!(mcf.run_with(rule), SolutionState::Optimal, "Wrong result {:?}", rule);
        check_optimal(&mcf, 5970, &l2, &u, &c, &SUP1, ProblemForm::Eq, "#B");
    }
}

#[test]
fn test_reset_roundtrip() {
    let g = build();
    let c = costs();
    let u = caps();
    let l2 = low2();

    let mut mcf = NetworkSimplex::new(&g);

    mcf.set_uppers(|a| u[g.arc_id(a)])
        .set_costs(|a| c[g.arc_id(a)])
        .set_lowers(|a| l2[g.arc_id(a)])
        .set_supplies(|v| SUP1[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal);
    let value = mcf.value();
    let flow = mcf.flow_map().to_vec();
    let potential = mcf.potential_map().to_vec();

    // Rebinding the identical maps after a reset reproduces the
    // identical solution.
    mcf.reset();
    mcf.set_uppers(|a| u[g.arc_id(a)])
        .set_costs(|a| c[g.arc_id(a)])
        .set_lowers(|a| l2[g.arc_id(a)])
        .set_supplies(|v| SUP1[g.node_id(v)]);
    assert_eq!(mcf.run(), SolutionState::Optimal);

    assert_eq!(mcf.value(), value);
    assert_eq!(mcf.flow_map(), &flow[..]);
    assert_eq!(mcf.potential_map(), &potential[..]);
}

#[test]
fn test_full_digraph_backend() {
    // The same instance once on the static complete digraph and once
    // on a vector graph with the identical arc order.
    let n = 4;
    let fd = FullDigraph::<u32>::new(n);
    let net = Net::new_with(|b| {
        let nodes = b.add_nodes(n);
        for s in 0..n {
            for t in 0..n {
                b.add_arc(nodes[s], nodes[t]);
            }
        }
    });

    let cost = |aid: usize| -> i64 {
        let (s, t) = (aid / n, aid % n);
        ((3 * s + 5 * t) % 7 + 1) as i64
    };
    let supply = |uid: usize| -> i64 {
        match uid {
            0 => 4,
            3 => -4,
            _ => 0,
        }
    };

    let mut spx1 = NetworkSimplex::new(&fd);
    spx1.set_uppers(|_| 10)
        .set_costs(|a| cost(fd.arc_id(a)))
        .set_supplies(|v| supply(fd.node_id(v)));
    assert_eq!(spx1.run(), SolutionState::Optimal);

    let mut spx2 = NetworkSimplex::new(&net);
    spx2.set_uppers(|_| 10)
        .set_costs(|a| cost(net.arc_id(a)))
        .set_supplies(|v| supply(net.node_id(v)));
    assert_eq!(spx2.run(), SolutionState::Optimal);

    assert_eq!(spx1.value(), spx2.value());
    assert_eq!(spx1.flow_map(), spx2.flow_map());
}

#[test]
fn test_full_graph_backend() {
    // On the complete undirected graph with unit costs the demand is
    // routed over the direct arc.
    let n = 5;
    let fg = FullGraph::<u32>::new(n);

    let mut spx = NetworkSimplex::<_, i64>::new(&fg);
    spx.set_st_supply(fg.node(0), fg.node(4), 3);
    assert_eq!(spx.run(), SolutionState::Optimal);
    assert_eq!(spx.value(), 3);

    let direct = fg.arc(fg.node(0), fg.node(4)).unwrap();
    assert_eq!(spx.flow(direct), 3);
    for a in fg.arcs() {
        if a != direct {
            assert_eq!(spx.flow(a), 0);
        }
    }
}
