/// Static skeleton of a report statement.
///
/// Templates are authored in code and never built from request data.
/// Clauses are emitted in this order: `select`, `WHERE` (fixed conditions
/// first, then compiled fragments), `GROUP BY`, `HAVING`, `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    /// `SELECT ... FROM ... JOIN ...` text
    pub select: &'static str,
    /// Row predicates that apply to every request; they bind no values
    pub fixed_conditions: &'static [&'static str],
    /// Empty for non-aggregate reports
    pub group_by: &'static [&'static str],
    /// Full `ORDER BY` expression list, without the keyword; may be empty
    pub order_by: &'static str,
}
