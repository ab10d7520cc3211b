//! Query builder for SELECT generation with parameterization.

use crate::dialect::Dialect;
use crate::validate::{ValidationError, assert_valid_sql_identifier, is_valid_sql_identifier};

/// SQL comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal: `=`
    Eq,
    /// Not equal: `!=`
    Ne,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Gte,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Lte,
    /// In array: `IN` or `= ANY`
    In,
}

impl Operator {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Eq | Self::In => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

/// Logical operators for compound filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// All conditions must match: `AND`
    And,
    /// At least one condition must match: `OR`
    Or,
}

/// A filter expression that can be simple or compound.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// A simple field comparison.
    Simple(Filter),
    /// A compound filter with logical operator.
    Compound(CompoundFilter),
}

/// A compound filter combining multiple expressions with a logical operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFilter {
    /// How the members are joined.
    pub op: LogicalOp,
    /// Member expressions.
    pub filters: Vec<FilterExpr>,
}

impl CompoundFilter {
    /// Create an AND compound filter.
    #[must_use]
    pub fn and(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::And,
            filters,
        }
    }

    /// Create an OR compound filter.
    #[must_use]
    pub fn or(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::Or,
            filters,
        }
    }
}

/// SQL parameter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Boolean, bound natively or as `0`/`1`.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// Text.
    String(String),
    /// List of values, used by `IN`.
    Array(Vec<Value>),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Sort field with direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Column name.
    pub field: String,
    /// Direction.
    pub dir: SortDir,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    /// Parse a sort string like `"date DESC, headline"` or `"-date,headline"`.
    ///
    /// Fields prefixed with `-` or followed by `DESC` are sorted descending,
    /// plain fields or fields followed by `ASC` ascending. Empty segments are
    /// skipped.
    ///
    /// # Security Note
    ///
    /// If `allowed` is empty, every valid identifier is accepted. For user
    /// input, always provide an explicit whitelist.
    pub fn parse_sort_string(sort: &str, allowed: &[&str]) -> Result<Vec<Self>, ValidationError> {
        let mut result = Vec::new();

        for part in sort.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let mut words = part.split_whitespace();
            let head = words.next().unwrap_or_default();
            let (field, mut dir) = match head.strip_prefix('-') {
                Some(stripped) => (stripped, SortDir::Desc),
                None => (head, SortDir::Asc),
            };

            if let Some(word) = words.next() {
                dir = match word.to_ascii_uppercase().as_str() {
                    "ASC" => SortDir::Asc,
                    "DESC" => SortDir::Desc,
                    _ => return Err(ValidationError::InvalidSortDirection(word.to_string())),
                };
            }
            if let Some(extra) = words.next() {
                return Err(ValidationError::InvalidSortDirection(extra.to_string()));
            }

            if !is_valid_sql_identifier(field) {
                return Err(ValidationError::InvalidIdentifier(field.to_string()));
            }
            if !allowed.is_empty() && !allowed.contains(&field) {
                return Err(ValidationError::SortFieldNotAllowed {
                    field: field.to_string(),
                    allowed: allowed.iter().map(|s| (*s).to_string()).collect(),
                });
            }

            result.push(Self::new(field, dir));
        }

        Ok(result)
    }
}

/// Filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Column name.
    pub field: String,
    /// Comparison.
    pub op: Operator,
    /// Bound value.
    pub value: Value,
}

impl Filter {
    /// Create a filter condition.
    ///
    /// # Panics
    ///
    /// Panics if the field name is not a valid SQL identifier.
    pub fn new(field: impl Into<String>, op: Operator, value: Value) -> Self {
        let field = field.into();
        assert_valid_sql_identifier(&field, "filter field");
        Self { field, op, value }
    }
}

/// Query result with SQL string and parameters.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "QueryResult must be used to execute the query"]
pub struct QueryResult {
    /// SQL text with numbered placeholders.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: Vec<Value>,
}

/// What the SELECT returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// `SELECT *`
    #[default]
    All,
    /// `SELECT COUNT(*) AS count`
    Count,
}

// ═══════════════════════════════════════════════════════════════════════════
// FILTER RENDERING
// ═══════════════════════════════════════════════════════════════════════════

/// Build a filter expression (simple or compound).
fn build_filter_expr_impl<D: Dialect>(
    dialect: &D,
    expr: &FilterExpr,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    match expr {
        FilterExpr::Simple(filter) => build_condition_impl(dialect, filter, start_idx),
        FilterExpr::Compound(compound) => build_compound_filter_impl(dialect, compound, start_idx),
    }
}

/// Build a compound filter (AND, OR).
fn build_compound_filter_impl<D: Dialect>(
    dialect: &D,
    compound: &CompoundFilter,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    let mut idx = start_idx;
    let mut all_params = Vec::new();
    let mut conditions = Vec::new();

    for filter_expr in &compound.filters {
        let (condition, params, new_idx) = build_filter_expr_impl(dialect, filter_expr, idx);
        conditions.push(condition);
        all_params.extend(params);
        idx = new_idx;
    }

    let sql = match (conditions.len(), compound.op) {
        // Identity elements: an empty AND matches everything, an empty OR nothing
        (0, LogicalOp::And) => "1=1".to_string(),
        (0, LogicalOp::Or) => "1=0".to_string(),
        (1, _) => conditions.pop().unwrap_or_default(),
        (_, LogicalOp::And) => format!("({})", conditions.join(" AND ")),
        (_, LogicalOp::Or) => format!("({})", conditions.join(" OR ")),
    };

    (sql, all_params, idx)
}

/// Build a single filter condition.
fn build_condition_impl<D: Dialect>(
    dialect: &D,
    filter: &Filter,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    let field = &filter.field;
    let idx = start_idx;

    match (filter.op, &filter.value) {
        // NULL handling
        (Operator::Eq, Value::Null) => (format!("{field} IS NULL"), vec![], idx),
        (Operator::Ne, Value::Null) => (format!("{field} IS NOT NULL"), vec![], idx),

        (Operator::In, Value::Array(values)) => {
            let (sql, params) = dialect.in_clause(field, values, idx);
            let new_idx = idx + params.len();
            (sql, params, new_idx)
        },
        (Operator::In, value) => {
            let (sql, params) = dialect.in_clause(field, std::slice::from_ref(value), idx);
            let new_idx = idx + params.len();
            (sql, params, new_idx)
        },

        (op, value) => {
            let sql = format!("{} {} {}", field, op.as_sql(), dialect.param(idx));
            (sql, vec![value.clone()], idx + 1)
        },
    }
}

/// SQL SELECT builder with dialect support.
#[derive(Debug)]
pub struct QueryBuilder<D: Dialect> {
    dialect: D,
    table: String,
    projection: Projection,
    filters: Vec<FilterExpr>,
    sorts: Vec<SortField>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl<D: Dialect> QueryBuilder<D> {
    /// Create a new query builder for the given table.
    ///
    /// # Panics
    ///
    /// Panics if the table name is not a valid SQL identifier.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        let table = table.into();
        assert_valid_sql_identifier(&table, "table");
        Self {
            dialect,
            table,
            projection: Projection::All,
            filters: Vec::new(),
            sorts: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Select `COUNT(*) AS count` instead of rows.
    pub fn count(mut self) -> Self {
        self.projection = Projection::Count;
        self
    }

    /// Add a filter condition.
    ///
    /// # Panics
    ///
    /// Panics if the field name is not a valid SQL identifier.
    pub fn filter(mut self, field: impl Into<String>, op: Operator, value: Value) -> Self {
        self.filters
            .push(FilterExpr::Simple(Filter::new(field, op, value)));
        self
    }

    /// Add a filter expression. Top-level expressions are joined with `AND`.
    pub fn filter_expr(mut self, expr: FilterExpr) -> Self {
        self.filters.push(expr);
        self
    }

    /// Add a sort field.
    ///
    /// # Panics
    ///
    /// Panics if the field name is not a valid SQL identifier.
    pub fn sort(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        let field = field.into();
        assert_valid_sql_identifier(&field, "sort field");
        self.sorts.push(SortField::new(field, dir));
        self
    }

    /// Add multiple sort fields.
    ///
    /// # Panics
    ///
    /// Panics if any field name is not a valid SQL identifier.
    pub fn sorts(mut self, sorts: &[SortField]) -> Self {
        for sort in sorts {
            assert_valid_sql_identifier(&sort.field, "sort field");
        }
        self.sorts.extend(sorts.iter().cloned());
        self
    }

    /// Set a limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set an offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build the SQL query and parameters.
    pub fn build(self) -> QueryResult {
        let mut sql = String::new();
        let mut params = Vec::new();
        let mut param_idx = 1usize;

        let select_str = match self.projection {
            Projection::All => "*",
            Projection::Count => "COUNT(*) AS count",
        };
        sql.push_str(&format!("SELECT {} FROM {}", select_str, self.table));

        if !self.filters.is_empty() {
            let mut all_conditions = Vec::with_capacity(self.filters.len());
            for expr in &self.filters {
                let (condition, new_params, new_idx) =
                    build_filter_expr_impl(&self.dialect, expr, param_idx);
                all_conditions.push(condition);
                params.extend(new_params);
                param_idx = new_idx;
            }
            sql.push_str(" WHERE ");
            sql.push_str(&all_conditions.join(" AND "));
        }

        if !self.sorts.is_empty() {
            let sort_parts: Vec<String> = self
                .sorts
                .iter()
                .map(|s| {
                    let dir = match s.dir {
                        SortDir::Asc => "ASC",
                        SortDir::Desc => "DESC",
                    };
                    format!("{} {}", s.field, dir)
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&sort_parts.join(", "));
        }

        match (self.limit, self.offset) {
            (Some(limit), _) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(_)) => {
                if let Some(unbounded) = self.dialect.unbounded_limit() {
                    sql.push_str(&format!(" LIMIT {unbounded}"));
                }
            },
            (None, None) => {},
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        QueryResult { sql, params }
    }
}

/// Helper function to create a simple filter expression.
///
/// # Panics
///
/// Panics if the field name is not a valid SQL identifier.
pub fn simple(field: impl Into<String>, op: Operator, value: Value) -> FilterExpr {
    FilterExpr::Simple(Filter::new(field, op, value))
}

/// Helper function to create an AND compound filter.
#[must_use]
pub fn and(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::and(filters))
}

/// Helper function to create an OR compound filter.
#[must_use]
pub fn or(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::or(filters))
}
