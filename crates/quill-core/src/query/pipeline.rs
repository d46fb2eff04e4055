//! Search → filter → paginate pipeline over a document collection.

use std::marker::PhantomData;

use super::params::{ParamValue, QueryParams};
use super::predicate::{CmpOp, Condition, Document, DocumentQuery, FieldValue, Window};
use crate::error::{DomainError, RepoError};
use crate::ports::QueryableRepository;

/// Query features derived from request parameters.
///
/// Every stage consumes the current state and returns a new one, so a
/// half-built pipeline can be cloned and reused without sharing a mutable
/// query. The window set by [`paginate`](Self::paginate) never reaches
/// [`count_matching`](Self::count_matching), which only sees the predicate.
///
/// ```ignore
/// let features = QueryFeatures::<Post>::new(params).search().filter()?.paginate(15)?;
/// let filtered = features.count_matching(&*repo).await?;
/// let page = features.execute(&*repo).await?;
/// ```
pub struct QueryFeatures<T> {
    params: QueryParams,
    query: DocumentQuery,
    _document: PhantomData<fn() -> T>,
}

impl<T> Clone for QueryFeatures<T> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            query: self.query.clone(),
            _document: PhantomData,
        }
    }
}

impl<T: Document> QueryFeatures<T> {
    pub fn new(params: QueryParams) -> Self {
        Self {
            params,
            query: DocumentQuery::default(),
            _document: PhantomData,
        }
    }

    /// Restrict to documents whose search field contains the keyword.
    pub fn search(self) -> Self {
        let Some(keyword) = self.params.keyword().map(str::to_string) else {
            return self;
        };

        self.with_condition(Condition::Contains {
            field: T::SEARCH_FIELD.to_string(),
            needle: keyword,
        })
    }

    /// Add equality and range conditions from the non-reserved parameters.
    pub fn filter(self) -> Result<Self, DomainError> {
        let conditions = self
            .params
            .filterable()
            .map(|(key, value)| Self::conditions_for(key, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(conditions
            .into_iter()
            .flatten()
            .fold(self, Self::with_condition))
    }

    /// Window the results to the requested page.
    pub fn paginate(mut self, page_size: u64) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::validation("Page size must be at least 1"));
        }

        let skip = (self.params.page() - 1).saturating_mul(page_size);
        self.query.window = Some(Window {
            skip,
            limit: page_size,
        });
        Ok(self)
    }

    pub fn query(&self) -> &DocumentQuery {
        &self.query
    }

    pub fn current_page(&self) -> u64 {
        self.params.page()
    }

    /// Count documents matching search and filter, ignoring pagination.
    pub async fn count_matching<R>(&self, repo: &R) -> Result<u64, RepoError>
    where
        R: QueryableRepository<T> + ?Sized,
    {
        repo.count_matching(&self.query.predicate).await
    }

    pub async fn execute<R>(&self, repo: &R) -> Result<Vec<T>, RepoError>
    where
        R: QueryableRepository<T> + ?Sized,
    {
        repo.find_matching(&self.query).await
    }

    fn with_condition(mut self, condition: Condition) -> Self {
        self.query.predicate = self.query.predicate.and(condition);
        self
    }

    fn conditions_for(key: &str, value: &ParamValue) -> Result<Vec<Condition>, DomainError> {
        let (field, op) = split_operator(key)?;
        let kind = T::field_kind(field)
            .ok_or_else(|| DomainError::validation(format!("Unknown filter field '{field}'")))?;
        if op != CmpOp::Eq && T::is_list(field) {
            return Err(DomainError::validation(format!(
                "Filter field '{field}' only supports equality"
            )));
        }

        let parse = |raw: &str| {
            FieldValue::parse(kind, raw).ok_or_else(|| {
                DomainError::validation(format!("Invalid value '{raw}' for filter field '{field}'"))
            })
        };

        let conditions = match (value, op) {
            (ParamValue::Many(raws), CmpOp::Eq) => vec![Condition::AnyOf {
                field: field.to_string(),
                values: raws.iter().map(|r| parse(r.as_str())).collect::<Result<_, _>>()?,
            }],
            (ParamValue::Many(raws), op) => raws
                .iter()
                .map(|raw| {
                    Ok(Condition::Compare {
                        field: field.to_string(),
                        op,
                        value: parse(raw.as_str())?,
                    })
                })
                .collect::<Result<_, DomainError>>()?,
            (ParamValue::Single(raw), op) => vec![Condition::Compare {
                field: field.to_string(),
                op,
                value: parse(raw.as_str())?,
            }],
        };

        Ok(conditions)
    }
}

/// Split `field[op]` into its parts; a plain key means equality.
fn split_operator(key: &str) -> Result<(&str, CmpOp), DomainError> {
    let Some(inner) = key.strip_suffix(']') else {
        return Ok((key, CmpOp::Eq));
    };
    let (field, suffix) = inner
        .split_once('[')
        .ok_or_else(|| DomainError::validation(format!("Malformed filter key '{key}'")))?;
    let op = CmpOp::from_suffix(suffix)
        .ok_or_else(|| DomainError::validation(format!("Unsupported filter operator '{suffix}'")))?;
    Ok((field, op))
}
