use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{LpModel, ModelError, Sense};
use crate::solution::{SolveStatus, Solution};

/// Tolerance for the supply/demand balance check.
const BALANCE_TOLERANCE: f64 = 1e-9;

/// A directed arc with a capacity and a per-unit cost.
///
/// Flows are non-negative; a network needing flow in both directions between
/// two nodes models it with two opposite arcs. Parallel arcs between the
/// same pair are allowed and each carries its own capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arc {
    pub from: String,
    pub to: String,
    pub capacity: f64,
    pub cost: f64,
}

impl Arc {
    pub fn new(from: impl Into<String>, to: impl Into<String>, capacity: f64, cost: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity,
            cost,
        }
    }
}

/// A directed flow network with per-node supplies (positive) and demands
/// (negative).
///
/// Constructed once from static input, translated into an [`LpModel`] whose
/// optimum is a minimum-cost flow, and discarded. Translation is stateless
/// and repeatable.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowNetwork {
    nodes: Vec<String>,
    arcs: Vec<Arc>,
    supply: HashMap<String, f64>,
}

/// Per-arc flows read back from an optimal solution.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowPlan {
    /// Flow on each arc, in the order the arcs were declared
    pub arc_flows: Vec<f64>,
    /// Flow between endpoint pairs; parallel arcs are summed
    pub flows: HashMap<(String, String), f64>,
    /// Minimum total transportation cost
    pub total_cost: f64,
}

impl FlowNetwork {
    /// Builds a network, validating its structure: arc endpoints and supply
    /// keys must name declared nodes, node ids must be unique, capacities
    /// must be non-negative. Nodes without a supply entry default to 0.
    pub fn new(
        nodes: Vec<String>,
        arcs: Vec<Arc>,
        supply: HashMap<String, f64>,
    ) -> Result<Self, ModelError> {
        let mut declared = HashSet::new();
        for node in &nodes {
            if !declared.insert(node.as_str()) {
                return Err(ModelError::DuplicateNode(node.clone()));
            }
        }
        for arc in &arcs {
            if !declared.contains(arc.from.as_str()) {
                return Err(ModelError::UnknownNode(arc.from.clone()));
            }
            if !declared.contains(arc.to.as_str()) {
                return Err(ModelError::UnknownNode(arc.to.clone()));
            }
            if arc.capacity < 0.0 {
                return Err(ModelError::NegativeCapacity {
                    from: arc.from.clone(),
                    to: arc.to.clone(),
                    capacity: arc.capacity,
                });
            }
        }
        for node in supply.keys() {
            if !declared.contains(node.as_str()) {
                return Err(ModelError::UnknownNode(node.clone()));
            }
        }
        Ok(Self {
            nodes,
            arcs,
            supply,
        })
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    fn supply_of(&self, node: &str) -> f64 {
        self.supply.get(node).copied().unwrap_or(0.0)
    }

    /// Translates the network into a minimum-cost-flow LP.
    ///
    /// One decision variable per arc, in arc order. Per arc, a capacity row
    /// `f_j <= capacity_j`; per node, the conservation equality
    /// `outflow - inflow = supply` encoded as a pair of opposing `<=` rows.
    /// A node touching no arcs keeps its (zero-coefficient) row pair, so a
    /// nonzero supply there surfaces as solver infeasibility instead of
    /// being dropped. The model minimizes directly, so the objective of an
    /// optimal solution is the true cost with no sign correction.
    ///
    /// Fails with [`ModelError::SupplyImbalance`] before building anything
    /// when the supplies do not sum to zero.
    pub fn translate(&self) -> Result<LpModel, ModelError> {
        let imbalance: f64 = self.nodes.iter().map(|n| self.supply_of(n)).sum();
        if imbalance.abs() > BALANCE_TOLERANCE {
            return Err(ModelError::SupplyImbalance(imbalance));
        }

        let n = self.arcs.len();
        let mut a = Vec::with_capacity(n + 2 * self.nodes.len());
        let mut b = Vec::with_capacity(n + 2 * self.nodes.len());

        for (j, arc) in self.arcs.iter().enumerate() {
            let mut row = vec![0.0; n];
            row[j] = 1.0;
            a.push(row);
            b.push(arc.capacity);
        }

        for node in &self.nodes {
            let mut row = vec![0.0; n];
            for (j, arc) in self.arcs.iter().enumerate() {
                if arc.from == *node {
                    row[j] += 1.0;
                }
                if arc.to == *node {
                    row[j] -= 1.0;
                }
            }
            let negated: Vec<f64> = row.iter().map(|v| -v).collect();
            let target = self.supply_of(node);
            a.push(row);
            b.push(target);
            a.push(negated);
            b.push(-target);
        }

        let costs = self.arcs.iter().map(|arc| arc.cost).collect();
        LpModel::new(a, b, costs, Sense::Minimize)
    }

    /// Reads an optimal solution back into per-arc flows.
    ///
    /// Fails fast on any non-optimal status; an infeasible or unbounded
    /// outcome has no flow to read.
    pub fn interpret(&self, solution: &Solution) -> Result<FlowPlan, ModelError> {
        if solution.status != SolveStatus::Optimal {
            return Err(ModelError::NotOptimal(solution.status));
        }
        if solution.values.len() != self.arcs.len() {
            return Err(ModelError::SolutionWidth {
                expected: self.arcs.len(),
                found: solution.values.len(),
            });
        }

        let arc_flows = solution.values.clone();
        let mut flows: HashMap<(String, String), f64> = HashMap::new();
        for (arc, &flow) in self.arcs.iter().zip(&arc_flows) {
            *flows
                .entry((arc.from.clone(), arc.to.clone()))
                .or_insert(0.0) += flow;
        }

        Ok(FlowPlan {
            arc_flows,
            flows,
            total_cost: solution.objective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    fn two_node_network() -> FlowNetwork {
        // A ships 3 units to B over a single arc of capacity 5 at cost 2
        let supply = HashMap::from([("A".to_string(), 3.0), ("B".to_string(), -3.0)]);
        FlowNetwork::new(
            names(&["A", "B"]),
            vec![Arc::new("A", "B", 5.0, 2.0)],
            supply,
        )
        .unwrap()
    }

    #[test]
    fn test_translates_the_two_node_network() {
        let model = two_node_network().translate().unwrap();

        // 1 capacity row + an inequality pair per node
        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.num_constraints(), 5);
        assert_eq!(model.sense(), Sense::Minimize);
        assert_eq!(model.c(), &[2.0]);

        let rows: Vec<_> = model.rows().collect();
        assert_eq!(rows[0], (&[1.0][..], 5.0)); // f <= 5
        assert_eq!(rows[1], (&[1.0][..], 3.0)); // out - in <= 3   (node A)
        assert_eq!(rows[2], (&[-1.0][..], -3.0)); // in - out <= -3
        assert_eq!(rows[3], (&[-1.0][..], -3.0)); // out - in <= -3 (node B)
        assert_eq!(rows[4], (&[1.0][..], 3.0)); // in - out <= 3
    }

    #[test]
    fn test_imbalanced_supplies_fail_before_translation() {
        let supply = HashMap::from([("A".to_string(), 3.0), ("B".to_string(), -2.0)]);
        let network = FlowNetwork::new(
            names(&["A", "B"]),
            vec![Arc::new("A", "B", 5.0, 2.0)],
            supply,
        )
        .unwrap();

        let err = network.translate().unwrap_err();
        assert_eq!(err, ModelError::SupplyImbalance(1.0));
    }

    #[test]
    fn test_isolated_node_with_supply_keeps_its_constraint() {
        // C touches no arc, so its conservation rows are all-zero with a
        // nonzero rhs pair; any solver then reports infeasibility.
        let supply = HashMap::from([
            ("A".to_string(), 1.0),
            ("B".to_string(), -3.0),
            ("C".to_string(), 2.0),
        ]);
        let network = FlowNetwork::new(
            names(&["A", "B", "C"]),
            vec![Arc::new("A", "B", 5.0, 1.0)],
            supply,
        )
        .unwrap();

        let model = network.translate().unwrap();
        let rows: Vec<_> = model.rows().collect();
        assert_eq!(rows[5], (&[0.0][..], 2.0)); // node C pair
        assert_eq!(rows[6], (&[0.0][..], -2.0)); // 0 <= -2 is unsatisfiable
    }

    #[test]
    fn test_rejects_arc_to_undeclared_node() {
        let err = FlowNetwork::new(
            names(&["A"]),
            vec![Arc::new("A", "B", 1.0, 1.0)],
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(err, ModelError::UnknownNode("B".to_string()));
    }

    #[test]
    fn test_rejects_supply_for_undeclared_node() {
        let supply = HashMap::from([("Z".to_string(), 1.0)]);
        let err = FlowNetwork::new(names(&["A"]), vec![], supply).unwrap_err();
        assert_eq!(err, ModelError::UnknownNode("Z".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_node() {
        let err = FlowNetwork::new(names(&["A", "A"]), vec![], HashMap::new()).unwrap_err();
        assert_eq!(err, ModelError::DuplicateNode("A".to_string()));
    }

    #[test]
    fn test_rejects_negative_capacity() {
        let err = FlowNetwork::new(
            names(&["A", "B"]),
            vec![Arc::new("A", "B", -1.0, 1.0)],
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::NegativeCapacity {
                from: "A".to_string(),
                to: "B".to_string(),
                capacity: -1.0
            }
        );
    }

    #[test]
    fn test_interprets_an_optimal_solution() {
        let network = two_node_network();
        let plan = network
            .interpret(&Solution::optimal(vec![3.0], 6.0))
            .unwrap();

        assert_eq!(plan.arc_flows, vec![3.0]);
        assert_eq!(plan.total_cost, 6.0);
        assert_eq!(
            plan.flows.get(&("A".to_string(), "B".to_string())),
            Some(&3.0)
        );
    }

    #[test]
    fn test_interpret_sums_parallel_arcs() {
        let supply = HashMap::from([("A".to_string(), 4.0), ("B".to_string(), -4.0)]);
        let network = FlowNetwork::new(
            names(&["A", "B"]),
            vec![Arc::new("A", "B", 3.0, 1.0), Arc::new("A", "B", 3.0, 2.0)],
            supply,
        )
        .unwrap();

        let plan = network
            .interpret(&Solution::optimal(vec![3.0, 1.0], 5.0))
            .unwrap();

        assert_eq!(plan.arc_flows, vec![3.0, 1.0]);
        assert_eq!(
            plan.flows.get(&("A".to_string(), "B".to_string())),
            Some(&4.0)
        );
    }

    #[test]
    fn test_interpret_fails_fast_on_non_optimal_status() {
        let network = two_node_network();
        let err = network.interpret(&Solution::infeasible()).unwrap_err();
        assert_eq!(err, ModelError::NotOptimal(SolveStatus::Infeasible));
    }

    #[test]
    fn test_interpret_rejects_wrong_solution_width() {
        let network = two_node_network();
        let err = network
            .interpret(&Solution::optimal(vec![3.0, 1.0], 6.0))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::SolutionWidth {
                expected: 1,
                found: 2
            }
        );
    }
}
