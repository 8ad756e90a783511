//! SQL query builder for patient search.

use chrono::NaiveDate;

use crate::tenant::TenantContext;
use crate::types::{PatientColumn, PatientPredicate, PatientSearchCriteria};

/// Columns selected for a patient row, in decoding order.
pub const PATIENT_COLUMNS: &str = "id, hospital_id, patient_hn, \
     first_name_th, middle_name_th, last_name_th, \
     first_name_en, middle_name_en, last_name_en, \
     date_of_birth, national_id, passport_id, phone_number, email, gender";

/// How positional parameters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?1`, `?2`, ... (SQLite)
    Numbered,
    /// `$1`, `$2`, ... (PostgreSQL)
    Dollar,
}

impl PlaceholderStyle {
    fn render(self, index: usize) -> String {
        match self {
            PlaceholderStyle::Numbered => format!("?{index}"),
            PlaceholderStyle::Dollar => format!("${index}"),
        }
    }
}

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<SqlParam>,
    style: PlaceholderStyle,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// Text parameter.
    Text(String),
    /// Integer parameter.
    Integer(i64),
    /// Calendar date parameter.
    Date(NaiveDate),
}

impl SqlParam {
    /// Creates a text parameter.
    pub fn text(s: impl Into<String>) -> Self {
        SqlParam::Text(s.into())
    }
}

impl SqlFragment {
    /// Creates an empty fragment.
    pub fn new(style: PlaceholderStyle) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            style,
        }
    }

    /// Adds a parameter and returns its placeholder.
    pub fn add_param(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        self.style.render(self.params.len())
    }

    /// Returns true if this fragment has no SQL.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Escapes `LIKE` wildcards so the value matches literally.
///
/// The escape character is a backslash; queries pair this with `ESCAPE '\'`.
///
/// ```
/// use hospital_persistence::search::escape_like;
///
/// assert_eq!(escape_like("50%_off"), "50\\%\\_off");
/// assert_eq!(escape_like("plain"), "plain");
/// ```
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A tenant-scoped patient query.
///
/// The tenant condition is always the first condition and is taken from the
/// [`TenantContext`]; predicates are ANDed after it.
///
/// ```
/// use hospital_persistence::search::{PatientQuery, PlaceholderStyle, SqlParam};
/// use hospital_persistence::tenant::{TenantContext, TenantId};
/// use hospital_persistence::types::PatientSearchCriteria;
///
/// let tenant = TenantContext::new(TenantId::new(2));
/// let criteria = PatientSearchCriteria {
///     national_id: Some("N1".to_string()),
///     ..Default::default()
/// };
///
/// let query = PatientQuery::new(&tenant, &criteria).build(PlaceholderStyle::Dollar);
/// assert!(query.sql.contains("WHERE hospital_id = $1 AND national_id = $2"));
/// assert_eq!(query.params, vec![SqlParam::Integer(2), SqlParam::text("N1")]);
/// ```
#[derive(Debug, Clone)]
pub struct PatientQuery {
    tenant: TenantContext,
    predicates: Vec<PatientPredicate>,
}

impl PatientQuery {
    /// Creates a query from a tenant scope and search criteria.
    pub fn new(tenant: &TenantContext, criteria: &PatientSearchCriteria) -> Self {
        Self::from_predicates(tenant, criteria.predicates())
    }

    /// Creates a query from already folded predicates.
    pub fn from_predicates(tenant: &TenantContext, predicates: Vec<PatientPredicate>) -> Self {
        Self {
            tenant: tenant.clone(),
            predicates,
        }
    }

    /// Returns the predicates applied after the tenant condition.
    pub fn predicates(&self) -> &[PatientPredicate] {
        &self.predicates
    }

    /// Renders the complete `SELECT` statement.
    pub fn build(&self, style: PlaceholderStyle) -> SqlFragment {
        let mut fragment = SqlFragment::new(style);

        let tenant = fragment.add_param(SqlParam::Integer(self.tenant.tenant_id().as_i64()));
        let mut conditions = vec![format!("{} = {}", PatientColumn::HospitalId.as_str(), tenant)];

        for predicate in &self.predicates {
            conditions.push(Self::build_condition(&mut fragment, predicate));
        }

        fragment.sql = format!(
            "SELECT {} FROM patients WHERE {} ORDER BY id",
            PATIENT_COLUMNS,
            conditions.join(" AND ")
        );
        fragment
    }

    fn build_condition(fragment: &mut SqlFragment, predicate: &PatientPredicate) -> String {
        match predicate {
            PatientPredicate::Equals(column, value) => {
                let p = fragment.add_param(SqlParam::text(value));
                format!("{} = {}", column.as_str(), p)
            }
            PatientPredicate::Contains(column, value) => Self::contains(fragment, *column, value),
            PatientPredicate::EitherContains(pair) => {
                let thai = Self::contains(fragment, pair.part.thai_column(), &pair.thai);
                let english = Self::contains(fragment, pair.part.english_column(), &pair.english);
                format!("({thai} OR {english})")
            }
            PatientPredicate::BornOn(date) => {
                let p = fragment.add_param(SqlParam::Date(*date));
                format!("{} = {}", PatientColumn::DateOfBirth.as_str(), p)
            }
        }
    }

    fn contains(fragment: &mut SqlFragment, column: PatientColumn, value: &str) -> String {
        let p = fragment.add_param(SqlParam::Text(format!("%{}%", escape_like(value))));
        format!("{} LIKE {} ESCAPE '\\'", column.as_str(), p)
    }
}
