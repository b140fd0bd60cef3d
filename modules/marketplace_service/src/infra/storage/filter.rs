//! Listing predicates
//!
//! Turns a sparse [`JobFilter`] / [`WorkerFilter`] into an ordered list of
//! clauses with positionally bound parameters. Clause `i` always uses `$i`,
//! in filter field order. Values only ever travel as parameters.
//!
//! A [`FilterPredicate`] renders two ways with the same clause order: a SQL
//! fragment for logs and inspection, and a SeaORM [`Condition`] for
//! execution.

use std::fmt;

use crate::contract::{DateFilterPolicy, JobFilter, MarketplaceError, WorkerFilter};
use chrono::NaiveDate;
use sea_orm::sea_query::{Alias, BinOper, Expr, Func, SimpleExpr};
use sea_orm::{Condition, Value};

/// Fully qualified column a clause applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: &'static str,
    pub column: &'static str,
}

impl ColumnRef {
    const fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }

    fn expr(self) -> Expr {
        Expr::col((Alias::new(self.table), Alias::new(self.column)))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

pub mod columns {
    use super::ColumnRef;

    pub const JOB_TITLE: ColumnRef = ColumnRef::new("jobs", "title");
    pub const JOB_SECTOR: ColumnRef = ColumnRef::new("jobs", "sector");
    pub const JOB_WAGE: ColumnRef = ColumnRef::new("jobs", "wage");
    pub const JOB_REQUIRED_GENDER: ColumnRef = ColumnRef::new("jobs", "required_gender");
    pub const JOB_START_DATE: ColumnRef = ColumnRef::new("jobs", "start_date");
    pub const JOB_END_DATE: ColumnRef = ColumnRef::new("jobs", "end_date");

    pub const WORKER_NAME: ColumnRef = ColumnRef::new("workers", "name");
    pub const WORKER_SECTOR: ColumnRef = ColumnRef::new("workers", "sector");
    pub const WORKER_RATING: ColumnRef = ColumnRef::new("workers", "rating");
    pub const WORKER_GENDER: ColumnRef = ColumnRef::new("workers", "gender");

    pub const ADDRESS_CITY: ColumnRef = ColumnRef::new("addresses", "city");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `LOWER(col) LIKE LOWER($n) ESCAPE '\'` with a `%value%` parameter;
    /// `%`, `_` and `\` in the value match literally
    ContainsIgnoreCase,
    /// `col >= $n`
    AtLeast,
    /// `col <= $n`
    AtMost,
    /// `col = $n`
    Equals,
}

/// One predicate; `position` is the 1-based index of its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub column: ColumnRef,
    pub comparison: Comparison,
    pub position: usize,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (col, n) = (self.column, self.position);
        match self.comparison {
            Comparison::ContainsIgnoreCase => {
                write!(f, "LOWER({col}) LIKE LOWER(${n}) ESCAPE '{LIKE_ESCAPE}'")
            }
            Comparison::AtLeast => write!(f, "{col} >= ${n}"),
            Comparison::AtMost => write!(f, "{col} <= ${n}"),
            Comparison::Equals => write!(f, "{col} = ${n}"),
        }
    }
}

/// Ordered clauses plus their bound parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPredicate {
    clauses: Vec<Clause>,
    params: Vec<Value>,
}

impl FilterPredicate {
    fn push(&mut self, column: ColumnRef, comparison: Comparison, value: Value) {
        self.params.push(value);
        self.clauses.push(Clause {
            column,
            comparison,
            position: self.params.len(),
        });
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// No clauses means "match every row"
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses joined with `AND`, or `None` when there is nothing to filter
    pub fn where_sql(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let rendered: Vec<String> = self.clauses.iter().map(ToString::to_string).collect();
        Some(rendered.join(" AND "))
    }

    /// Executable form; an empty predicate yields an empty `Condition::all()`
    pub fn to_condition(&self) -> Condition {
        self.clauses
            .iter()
            .zip(&self.params)
            .fold(Condition::all(), |cond, (clause, value)| {
                cond.add(clause_expr(clause, value.clone()))
            })
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.where_sql() {
            Some(sql) => f.write_str(&sql),
            None => f.write_str("<all rows>"),
        }
    }
}

fn clause_expr(clause: &Clause, value: Value) -> SimpleExpr {
    let col = clause.column.expr();
    match clause.comparison {
        Comparison::ContainsIgnoreCase => {
            let pattern = SimpleExpr::from(Func::lower(Expr::val(value)))
                .binary(BinOper::Escape, SimpleExpr::Constant(LIKE_ESCAPE.into()));
            Expr::expr(Func::lower(col)).binary(BinOper::Like, pattern)
        }
        Comparison::AtLeast => col.gte(value),
        Comparison::AtMost => col.lte(value),
        Comparison::Equals => col.eq(value),
    }
}

/// Builds listing predicates under the configured date handling
#[derive(Debug, Clone)]
pub struct FilterQueryBuilder {
    policy: DateFilterPolicy,
    date_format: String,
}

impl Default for FilterQueryBuilder {
    fn default() -> Self {
        Self::new(DateFilterPolicy::default(), "%Y-%m-%d")
    }
}

impl FilterQueryBuilder {
    pub fn new(policy: DateFilterPolicy, date_format: impl Into<String>) -> Self {
        Self {
            policy,
            date_format: date_format.into(),
        }
    }

    pub fn policy(&self) -> DateFilterPolicy {
        self.policy
    }

    pub fn job_predicate(&self, filter: &JobFilter) -> Result<FilterPredicate, MarketplaceError> {
        use columns::*;

        let mut p = FilterPredicate::default();
        push_contains(&mut p, JOB_TITLE, filter.title.as_deref());
        push_contains(&mut p, JOB_SECTOR, filter.sector.as_deref());
        push_contains(&mut p, ADDRESS_CITY, filter.city.as_deref());
        if let Some(min) = filter.wage_min.filter(|v| *v != 0) {
            p.push(JOB_WAGE, Comparison::AtLeast, Value::from(min));
        }
        push_gender(&mut p, JOB_REQUIRED_GENDER, filter.gender.as_deref());
        if let Some(date) = self.parse_date("starts_from", filter.starts_from.as_deref())? {
            p.push(JOB_START_DATE, Comparison::AtLeast, Value::from(date));
        }
        if let Some(date) = self.parse_date("ends_by", filter.ends_by.as_deref())? {
            p.push(JOB_END_DATE, Comparison::AtMost, Value::from(date));
        }

        tracing::debug!(predicate = %p, params = p.params().len(), "Built job filter");
        Ok(p)
    }

    pub fn worker_predicate(
        &self,
        filter: &WorkerFilter,
    ) -> Result<FilterPredicate, MarketplaceError> {
        use columns::*;

        let mut p = FilterPredicate::default();
        push_contains(&mut p, WORKER_NAME, filter.name.as_deref());
        push_contains(&mut p, WORKER_SECTOR, filter.sector.as_deref());
        push_contains(&mut p, ADDRESS_CITY, filter.city.as_deref());
        if let Some(min) = filter.rating_min.filter(|v| *v != 0.0) {
            p.push(WORKER_RATING, Comparison::AtLeast, Value::from(min));
        }
        push_gender(&mut p, WORKER_GENDER, filter.gender.as_deref());

        tracing::debug!(predicate = %p, params = p.params().len(), "Built worker filter");
        Ok(p)
    }

    fn parse_date(
        &self,
        field: &'static str,
        raw: Option<&str>,
    ) -> Result<Option<NaiveDate>, MarketplaceError> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        match NaiveDate::parse_from_str(raw, &self.date_format) {
            Ok(date) => Ok(Some(date)),
            Err(e) => match self.policy {
                DateFilterPolicy::Strict => Err(MarketplaceError::validation(
                    field,
                    format!("'{raw}' does not match {}: {e}", self.date_format),
                )),
                DateFilterPolicy::Lenient => {
                    tracing::warn!(field, value = raw, "Ignoring unparseable date bound");
                    Ok(None)
                }
            },
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

const LIKE_ESCAPE: char = '\\';

fn like_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

fn push_contains(p: &mut FilterPredicate, column: ColumnRef, raw: Option<&str>) {
    if let Some(text) = non_blank(raw) {
        p.push(
            column,
            Comparison::ContainsIgnoreCase,
            Value::from(format!("%{}%", like_escape(text))),
        );
    }
}

fn push_gender(p: &mut FilterPredicate, column: ColumnRef, raw: Option<&str>) {
    if let Some(code) = non_blank(raw) {
        p.push(column, Comparison::Equals, Value::from(code.to_lowercase()));
    }
}
