//! Request policies.
//!
//! Each policy reads its own query parameters and contributes one piece of
//! the compiled query. Filters produce predicates and are AND-ed by the
//! chain; sorting and paging are single-purpose and always present.

use crate::{
    config::QueryConfig,
    error::FieldIssues,
    model::{entity::EntityModel, names_match},
    query::{
        CompiledOrder, OrderDirection, Predicate, QueryError, QueryParams,
        compile::{compile_field_predicate, compile_id_set_predicate, compile_search_predicate},
        compile_ordering,
    },
    traits::FieldValues,
};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// QueryPolicy
///
/// One predicate-producing rule applied to a request's query parameters.
/// A policy with nothing to contribute returns `Predicate::True`.
///

pub trait QueryPolicy {
    fn predicate(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<Predicate, QueryError>;

    /// `predicate` plus the fields this policy skipped without failing the
    /// request, keyed by field name.
    fn compile(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<(Predicate, FieldIssues), QueryError> {
        self.predicate(model, params).map(|predicate| (predicate, FieldIssues::new()))
    }
}

///
/// QueryFilter
///
/// Exact-match family: every parameter whose key names an allowed field is
/// compiled strictly. Repeated values for one field are OR-ed, fields are
/// AND-ed, and every failure is collected into one field-keyed error.
/// Blank values count as absent.
///

#[derive(Clone, Debug, Default)]
pub struct QueryFilter {
    allowed: Option<Vec<String>>,
    reserved: Vec<String>,
}

impl QueryFilter {
    /// Allow every declared scalar field.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Allow only the named fields.
    #[must_use]
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(fields.into_iter().map(Into::into).collect()),
            reserved: Vec::new(),
        }
    }

    /// Ignore the parameter keys the other policies in `config` consume.
    #[must_use]
    pub fn reserving(mut self, config: &QueryConfig) -> Self {
        self.reserved = [
            &config.search_key,
            &config.ids_key,
            &config.sort_key,
            &config.order_key,
            &config.page_key,
            &config.limit_key,
        ]
        .into_iter()
        .cloned()
        .collect();

        self
    }

    fn admits(&self, model: &EntityModel, key: &str) -> bool {
        if self.reserved.iter().any(|reserved| names_match(reserved, key)) {
            return false;
        }

        match &self.allowed {
            Some(allowed) => allowed.iter().any(|field| names_match(field, key)),
            None => model.field(key).is_some_and(|field| field.kind.is_scalar()),
        }
    }
}

impl QueryPolicy for QueryFilter {
    fn predicate(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<Predicate, QueryError> {
        // declared name → OR-ed alternatives, in declared-name order
        let mut by_field: BTreeMap<String, Vec<Predicate>> = BTreeMap::new();
        let mut issues = FieldIssues::new();

        for (key, value) in params.iter() {
            if value.trim().is_empty() || !self.admits(model, key) {
                continue;
            }

            let name = model.field(key).map_or(key, |field| field.name);
            match compile_field_predicate(model, key, value) {
                Ok(predicate) => by_field.entry(name.to_string()).or_default().push(predicate),
                Err(err) => issues.push(name, err),
            }
        }

        if !issues.is_empty() {
            return Err(QueryError::InvalidFilter(issues));
        }

        Ok(Predicate::all_of(by_field.into_values().map(Predicate::any_of)))
    }
}

///
/// SearchFilter
///
/// Free-text search across several fields (OR). Fields that cannot take the
/// term are skipped; they never fail the request.
///

#[derive(Clone, Debug)]
pub struct SearchFilter {
    key: String,
    fields: Vec<String>,
}

impl SearchFilter {
    /// Search the model's declared text fields.
    #[must_use]
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            key: config.search_key.clone(),
            fields: Vec::new(),
        }
    }

    /// Search exactly these fields, in this order.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl QueryPolicy for SearchFilter {
    fn predicate(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<Predicate, QueryError> {
        self.compile(model, params).map(|(predicate, _)| predicate)
    }

    fn compile(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<(Predicate, FieldIssues), QueryError> {
        let Some(term) = params.first(&self.key) else {
            return Ok((Predicate::True, FieldIssues::new()));
        };

        let search = if self.fields.is_empty() {
            let text_fields: Vec<_> = model.text_fields().map(|field| field.name).collect();
            compile_search_predicate(model, &text_fields, term)
        } else {
            compile_search_predicate(model, &self.fields, term)
        };

        Ok((search.predicate, search.skipped))
    }
}

///
/// IdRangeFilter
///
/// Primary-key membership from the id list parameter.
///

#[derive(Clone, Debug)]
pub struct IdRangeFilter {
    key: String,
}

impl IdRangeFilter {
    #[must_use]
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            key: config.ids_key.clone(),
        }
    }
}

impl QueryPolicy for IdRangeFilter {
    fn predicate(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<Predicate, QueryError> {
        compile_id_set_predicate(model, model.primary_key, params.get_all(&self.key))
    }
}

///
/// SortFilter
///
/// Reads `sort=Name,-CNPJ` style field lists plus a uniform `order=desc`.
/// Per-field direction comes from a `-` prefix or a `:asc`/`:desc` suffix;
/// other fields take the uniform direction (ascending when absent).
///

#[derive(Clone, Debug)]
pub struct SortFilter {
    sort_key: String,
    order_key: String,
    allowed: Option<Vec<String>>,
}

impl SortFilter {
    #[must_use]
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            sort_key: config.sort_key.clone(),
            order_key: config.order_key.clone(),
            allowed: None,
        }
    }

    /// Restrict sortable fields to this allow-list.
    #[must_use]
    pub fn allowing<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn compile(&self, model: &EntityModel, params: &QueryParams) -> CompiledOrder {
        let uniform = match params.first(&self.order_key) {
            Some(term) => OrderDirection::parse(term).unwrap_or_else(|| {
                tracing::debug!(entity = model.entity_name, term, "sort direction ignored");
                OrderDirection::Asc
            }),
            None => OrderDirection::Asc,
        };

        let specs: Vec<(&str, OrderDirection)> = params
            .get_all(&self.sort_key)
            .flat_map(|value| value.split(','))
            .filter_map(|token| parse_sort_token(token, uniform))
            .filter(|(name, _)| self.is_allowed(name))
            .collect();

        compile_ordering(model, &specs)
    }

    fn is_allowed(&self, name: &str) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.iter().any(|field| names_match(field, name)),
            None => true,
        }
    }
}

fn parse_sort_token(token: &str, uniform: OrderDirection) -> Option<(&str, OrderDirection)> {
    let token = token.trim();

    let (name, direction) = if let Some(name) = token.strip_prefix('-') {
        (name, OrderDirection::Desc)
    } else if let Some((name, direction)) = token.split_once(':') {
        (name, OrderDirection::parse(direction).unwrap_or(uniform))
    } else {
        (token, uniform)
    };

    let name = name.trim();
    (!name.is_empty()).then_some((name, direction))
}

///
/// PageSpec
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PageSpec {
    pub offset: usize,
    pub limit: usize,
}

///
/// PageFilter
///
/// `page` (1-based) and `limit` to an offset window. Unparsable or zero
/// values fall back to the first page and the default size; the size is
/// clamped to the configured maximum.
///

#[derive(Clone, Debug)]
pub struct PageFilter {
    page_key: String,
    limit_key: String,
    default_size: u32,
    max_size: u32,
}

impl PageFilter {
    #[must_use]
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            page_key: config.page_key.clone(),
            limit_key: config.limit_key.clone(),
            default_size: config.default_page_size,
            max_size: config.max_page_size,
        }
    }

    /// `None` when the request names neither paging parameter.
    #[must_use]
    pub fn compile(&self, params: &QueryParams) -> Option<PageSpec> {
        let page = params.first(&self.page_key);
        let limit = params.first(&self.limit_key);
        if page.is_none() && limit.is_none() {
            return None;
        }

        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(self.default_size)
            .min(self.max_size);

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let page = usize::try_from(page).unwrap_or(usize::MAX);

        Some(PageSpec {
            offset: (page - 1).saturating_mul(limit),
            limit,
        })
    }
}

fn parse_positive(term: Option<&str>) -> Option<u32> {
    term?.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

///
/// FilterChain
///
/// Ordered set of predicate policies plus the sort and page policies.
///

pub struct FilterChain {
    policies: Vec<Box<dyn QueryPolicy>>,
    sort: SortFilter,
    page: PageFilter,
}

impl FilterChain {
    /// Empty chain: no filters, sorting and paging read from `config`.
    #[must_use]
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            policies: Vec::new(),
            sort: SortFilter::new(config),
            page: PageFilter::new(config),
        }
    }

    /// Field filters over every scalar field, text search over text fields,
    /// and primary-key id lists.
    #[must_use]
    pub fn standard(config: &QueryConfig) -> Self {
        Self::new(config)
            .with_policy(QueryFilter::all().reserving(config))
            .with_policy(SearchFilter::new(config))
            .with_policy(IdRangeFilter::new(config))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl QueryPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortFilter) -> Self {
        self.sort = sort;
        self
    }

    /// Compile every policy for one request.
    ///
    /// `InvalidFilter` errors from several policies merge into one.
    pub fn compile(
        &self,
        model: &EntityModel,
        params: &QueryParams,
    ) -> Result<CompiledQuery, QueryError> {
        let mut predicates = Vec::with_capacity(self.policies.len());
        let mut issues = FieldIssues::new();
        let mut skipped = FieldIssues::new();

        for policy in &self.policies {
            match policy.compile(model, params) {
                Ok((predicate, more)) => {
                    predicates.push(predicate);
                    skipped.extend(more);
                }
                Err(QueryError::InvalidFilter(more)) => issues.extend(more),
                Err(err) => return Err(err),
            }
        }

        if !issues.is_empty() {
            return Err(QueryError::InvalidFilter(issues));
        }

        let query = CompiledQuery {
            predicate: Predicate::all_of(predicates),
            order: self.sort.compile(model, params),
            page: self.page.compile(params),
            skipped,
        };
        tracing::debug!(
            entity = model.entity_name,
            predicate = %query.predicate,
            order = ?query.order.spec().fields,
            page = ?query.page,
            skipped = %query.skipped,
            "query compiled"
        );

        Ok(query)
    }
}

///
/// CompiledQuery
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledQuery {
    pub predicate: Predicate,
    pub order: CompiledOrder,
    pub page: Option<PageSpec>,
    /// Fields a policy left out of the predicate, with the reason; the
    /// request still succeeds.
    pub skipped: FieldIssues,
}

impl CompiledQuery {
    #[must_use]
    pub fn matches<R: FieldValues + ?Sized>(&self, row: &R) -> bool {
        self.predicate.eval(row)
    }

    /// Filter, sort, then page `rows`.
    #[must_use]
    pub fn apply<R: FieldValues>(&self, rows: Vec<R>) -> Vec<R> {
        let mut rows: Vec<R> = rows.into_iter().filter(|row| self.matches(row)).collect();
        self.order.sort(&mut rows);

        match self.page {
            Some(page) => rows.into_iter().skip(page.offset).take(page.limit).collect(),
            None => rows,
        }
    }
}
