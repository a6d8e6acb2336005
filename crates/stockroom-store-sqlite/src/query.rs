//! Conditional query construction.
//!
//! [`WhereClause`] collects ordered `(column, operator, value)` triples and
//! renders them into numbered placeholders conjoined with `AND`. SQL text
//! never sees a caller-supplied value, and filter composition is testable
//! without touching a database.

use rusqlite::types::Value;

#[derive(Debug, Default)]
pub struct WhereClause {
  clauses: Vec<(&'static str, &'static str)>,
  params:  Vec<Value>,
}

impl WhereClause {
  pub fn new() -> Self { Self::default() }

  /// Append `column operator ?n`; placeholder numbers follow insertion
  /// order.
  pub fn push(
    &mut self,
    column: &'static str,
    operator: &'static str,
    value: impl Into<Value>,
  ) {
    self.clauses.push((column, operator));
    self.params.push(value.into());
  }

  /// Render the conjoined predicate, e.g.
  /// `owner_id = ?1 AND category = ?2`.
  pub fn sql(&self) -> String {
    self
      .clauses
      .iter()
      .enumerate()
      .map(|(i, (column, operator))| format!("{column} {operator} ?{}", i + 1))
      .collect::<Vec<_>>()
      .join(" AND ")
  }

  /// The parameter values, in placeholder order.
  pub fn into_params(self) -> Vec<Value> { self.params }
}
