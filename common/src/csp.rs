//! The constraint network handed to the propagation engine: variables with
//! declared and working domains, table constraints, and the network owning
//! both.

use crate::error::{ModelError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Index of a variable inside its [`Network`].
pub type VarId = usize;

/// One joint assignment to a constraint's scope, positionally aligned with it.
pub type Tuple = Vec<Value>;

/// A value a cell variable can take. Unrevealed cells choose between `Empty`
/// and `Mine`; revealed cells are pinned to their hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    Empty,
    Mine,
    Hint(u8),
}

impl Value {
    pub fn is_mine(self) -> bool {
        self == Value::Mine
    }

    /// Display character for a solved board.
    pub fn symbol(self) -> char {
        match self {
            Value::Empty => ' ',
            Value::Mine => '*',
            Value::Hint(n) if n < 10 => char::from(b'0' + n),
            Value::Hint(_) => '#',
        }
    }
}

/// A declared domain plus the working subset used while the model is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    declared: Vec<Value>,
    current: Vec<Value>,
}

impl Domain {
    /// `values` must not be empty; only the model builder declares domains.
    pub(crate) fn new(values: Vec<Value>) -> Self {
        debug_assert!(!values.is_empty(), "declared domains are never empty");
        Domain {
            current: values.clone(),
            declared: values,
        }
    }

    pub fn declared(&self) -> &[Value] {
        &self.declared
    }

    pub fn current(&self) -> &[Value] {
        &self.current
    }

    pub fn contains(&self, value: Value) -> bool {
        self.current.contains(&value)
    }

    /// Removes `value` from the working domain. Returns whether it was present.
    pub fn prune(&mut self, value: Value) -> bool {
        let before = self.current.len();
        self.current.retain(|&v| v != value);
        self.current.len() != before
    }

    pub fn restore(&mut self) {
        self.current = self.declared.clone();
    }

    pub fn is_restored(&self) -> bool {
        self.current == self.declared
    }

    /// Declared domain non-empty, working domain a subset of it.
    pub fn is_well_formed(&self) -> bool {
        !self.declared.is_empty() && self.current.iter().all(|v| self.declared.contains(v))
    }
}

/// A single board cell's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    coord: Vec<usize>,
    domain: Domain,
}

impl Variable {
    pub(crate) fn new(coord: &[usize], domain: Vec<Value>) -> Self {
        Variable {
            name: format!("V({})", coord.iter().join(",")),
            coord: coord.to_vec(),
            domain: Domain::new(domain),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coord(&self) -> &[usize] {
        &self.coord
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn current_domain(&self) -> &[Value] {
        self.domain.current()
    }

    pub fn prune_value(&mut self, value: Value) -> bool {
        self.domain.prune(value)
    }

    pub fn restore_current_domain(&mut self) {
        self.domain.restore();
    }
}

/// A table constraint anchored on a revealed cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    name: String,
    anchor: Vec<usize>,
    hint: u8,
    scope: Vec<VarId>,
    tuples: Vec<Tuple>,
}

impl Constraint {
    pub fn new(anchor: &[usize], hint: u8, scope: Vec<VarId>) -> Self {
        Constraint {
            name: format!("C({})", anchor.iter().join(",")),
            anchor: anchor.to_vec(),
            hint,
            scope,
            tuples: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchor(&self) -> &[usize] {
        &self.anchor
    }

    /// Number of mines required among the scope.
    pub fn hint(&self) -> u8 {
        self.hint
    }

    pub fn scope(&self) -> &[VarId] {
        &self.scope
    }

    pub fn satisfying_tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// Appends tuples to the table, skipping any already present.
    pub fn add_satisfying_tuples(&mut self, tuples: impl IntoIterator<Item = Tuple>) -> Result<()> {
        let tuples: Vec<Tuple> = tuples.into_iter().collect();
        if let Some(bad) = tuples.iter().find(|t| t.len() != self.scope.len()) {
            return Err(self.arity_error(bad.len()));
        }

        // Rows are compared by reference so the table is never copied.
        let fresh: Vec<bool> = {
            let mut seen: HashSet<&[Value]> = self.tuples.iter().map(Vec::as_slice).collect();
            tuples.iter().map(|t| seen.insert(t.as_slice())).collect()
        };
        self.tuples.extend(
            tuples
                .into_iter()
                .zip(fresh)
                .filter_map(|(tuple, fresh)| fresh.then_some(tuple)),
        );
        Ok(())
    }

    fn arity_error(&self, found: usize) -> ModelError {
        ModelError::TupleArity {
            constraint: self.name.clone(),
            expected: self.scope.len(),
            found,
        }
    }

    pub fn is_satisfied_by(&self, assignment: &[Value]) -> bool {
        self.tuples.iter().any(|tuple| tuple.as_slice() == assignment)
    }
}

/// The complete model: every variable and every constraint over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl Network {
    pub fn new(name: impl Into<String>, variables: Vec<Variable>) -> Self {
        Network {
            name: name.into(),
            variables,
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub(crate) fn variables_mut(&mut self) -> &mut [Variable] {
        &mut self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Every constraint whose scope mentions `var`.
    pub fn constraints_on(&self, var: VarId) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| c.scope.contains(&var))
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<()> {
        if let Some(&variable) = constraint
            .scope
            .iter()
            .find(|&&id| id >= self.variables.len())
        {
            return Err(ModelError::UnknownVariable {
                constraint: constraint.name,
                variable,
            });
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Serializes the network for an engine living on the other side of a
    /// process or language boundary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// Decodes a network and rejects it unless it upholds the same
    /// invariants as one assembled through [`Network::add_constraint`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let network: Network = bcs::from_bytes(bytes)?;
        network.validate()?;
        Ok(network)
    }

    /// Checks every domain, scope and tuple against the variable list.
    pub fn validate(&self) -> Result<()> {
        if let Some(variable) = self.variables.iter().find(|v| !v.domain.is_well_formed()) {
            return Err(ModelError::InvalidDomain(variable.name.clone()));
        }
        for constraint in &self.constraints {
            if let Some(&variable) = constraint
                .scope
                .iter()
                .find(|&&id| id >= self.variables.len())
            {
                return Err(ModelError::UnknownVariable {
                    constraint: constraint.name.clone(),
                    variable,
                });
            }
            if let Some(bad) = constraint
                .tuples
                .iter()
                .find(|t| t.len() != constraint.scope.len())
            {
                return Err(constraint.arity_error(bad.len()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_and_restore() {
        let mut variable = Variable::new(&[2, 3], vec![Value::Empty, Value::Mine]);
        assert_eq!(variable.name(), "V(2,3)");

        assert!(variable.prune_value(Value::Mine));
        assert!(!variable.prune_value(Value::Mine));
        assert_eq!(variable.current_domain(), &[Value::Empty]);
        assert_eq!(variable.domain().declared(), &[Value::Empty, Value::Mine]);

        variable.restore_current_domain();
        assert!(variable.domain().is_restored());
    }

    #[test]
    fn test_tuple_arity_is_checked() {
        let mut constraint = Constraint::new(&[0, 0], 1, vec![0, 1]);
        let result = constraint.add_satisfying_tuples([vec![Value::Mine]]);
        assert!(matches!(
            result,
            Err(ModelError::TupleArity { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_tuples_are_dropped() {
        let mut constraint = Constraint::new(&[0, 0], 1, vec![0, 1]);
        let tuples = vec![
            vec![Value::Mine, Value::Empty],
            vec![Value::Empty, Value::Mine],
            vec![Value::Mine, Value::Empty],
        ];
        constraint.add_satisfying_tuples(tuples).unwrap();
        assert_eq!(constraint.satisfying_tuples().len(), 2);
        assert!(constraint.is_satisfied_by(&[Value::Empty, Value::Mine]));
        assert!(!constraint.is_satisfied_by(&[Value::Mine, Value::Mine]));
    }

    #[test]
    fn test_duplicates_against_existing_rows() {
        // Later batches skip rows already in the table and keep their order
        let mut constraint = Constraint::new(&[0, 0], 1, vec![0, 1, 2]);
        let first = vec![Value::Mine, Value::Empty, Value::Empty];
        let second = vec![Value::Empty, Value::Mine, Value::Empty];
        let third = vec![Value::Empty, Value::Empty, Value::Mine];
        constraint.add_satisfying_tuples([first.clone()]).unwrap();
        constraint
            .add_satisfying_tuples([third.clone(), first.clone(), second.clone(), third.clone()])
            .unwrap();
        assert_eq!(constraint.satisfying_tuples(), &[first, third, second]);
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let mut network = Network::new("test", vec![Variable::new(&[0, 0], vec![Value::Hint(1)])]);
        let result = network.add_constraint(Constraint::new(&[0, 0], 1, vec![3]));
        assert!(matches!(
            result,
            Err(ModelError::UnknownVariable { variable: 3, .. })
        ));
        assert!(network.constraints().is_empty());
    }

    fn one_cell_network() -> Network {
        let variables = vec![
            Variable::new(&[0, 0], vec![Value::Hint(1)]),
            Variable::new(&[0, 1], vec![Value::Empty, Value::Mine]),
        ];
        let mut network = Network::new("Minesweeper-2d", variables);
        let mut constraint = Constraint::new(&[0, 0], 1, vec![1]);
        constraint.add_satisfying_tuples([vec![Value::Mine]]).unwrap();
        network.add_constraint(constraint).unwrap();
        network
    }

    /// Encodes `network` without any checks and decodes it through the
    /// validating path.
    fn tampered(network: &Network) -> Result<Network> {
        Network::from_bytes(&bcs::to_bytes(network).unwrap())
    }

    #[test]
    fn test_bytes_round_trip() {
        let network = one_cell_network();
        let bytes = network.to_bytes().unwrap();
        assert_eq!(Network::from_bytes(&bytes).unwrap(), network);
    }

    #[test]
    fn test_decoding_rejects_unknown_scope_ids() {
        // A scope id patched past the end of the variable list
        let mut network = one_cell_network();
        network.constraints[0].scope = vec![7];
        assert!(matches!(
            tampered(&network),
            Err(ModelError::UnknownVariable { variable: 7, .. })
        ));
    }

    #[test]
    fn test_decoding_rejects_misaligned_tuples() {
        // A row wider than the scope it belongs to
        let mut network = one_cell_network();
        network.constraints[0].tuples = vec![vec![Value::Mine, Value::Empty]];
        assert!(matches!(
            tampered(&network),
            Err(ModelError::TupleArity { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_decoding_rejects_bad_domains() {
        // Working values outside the declared domain
        let mut network = one_cell_network();
        network.variables[0].domain.current = vec![Value::Mine];
        assert!(matches!(
            tampered(&network),
            Err(ModelError::InvalidDomain(name)) if name == "V(0,0)"
        ));

        // An empty declared domain
        let mut network = one_cell_network();
        network.variables[1].domain = Domain {
            declared: Vec::new(),
            current: Vec::new(),
        };
        assert!(matches!(
            tampered(&network),
            Err(ModelError::InvalidDomain(name)) if name == "V(0,1)"
        ));
    }

    #[test]
    fn test_pruned_domain_is_still_well_formed() {
        let mut network = one_cell_network();
        network.variables[1].prune_value(Value::Mine);
        assert!(network.validate().is_ok());
        assert_eq!(tampered(&network).unwrap(), network);
    }

    #[test]
    fn test_constraints_on() {
        let variables = (0..3)
            .map(|j| Variable::new(&[0, j], vec![Value::Empty, Value::Mine]))
            .collect();
        let mut network = Network::new("test", variables);
        network.add_constraint(Constraint::new(&[0, 0], 0, vec![0, 1])).unwrap();
        network.add_constraint(Constraint::new(&[0, 2], 0, vec![1, 2])).unwrap();

        assert_eq!(network.constraints_on(1).count(), 2);
        assert_eq!(network.constraints_on(2).count(), 1);
        assert!(network.constraint("C(0,2)").is_some());
    }

    #[test]
    fn test_value_symbols() {
        assert_eq!(Value::Mine.symbol(), '*');
        assert_eq!(Value::Empty.symbol(), ' ');
        assert_eq!(Value::Hint(3).symbol(), '3');
    }
}
