//! Pre-numbered statements with bound parameters.

use crate::client::GenericClient;
use crate::error::FolioResult;
use crate::row::FromRow;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A SQL string with pre-numbered placeholders (`$1, $2, ...`) plus bound parameters.
///
/// The fragment builders emit numbered placeholders, so accessors assemble the
/// full statement text themselves and bind values here in the same order.
#[must_use]
pub struct Query {
    sql: String,
    params: Vec<Arc<dyn ToSql + Sync + Send>>,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    tag: Option<String>,
}

/// Build a query from a pre-numbered SQL string.
pub fn query(sql: impl Into<String>) -> Query {
    Query::new(sql)
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            tag: None,
        }
    }

    /// Name the statement in SQL debug logs (`projects.create`, ...).
    ///
    /// # Example
    /// ```ignore
    /// let project: Option<Project> = folio::query("SELECT ... FROM projects WHERE id = $1")
    ///     .tag("projects.get_by_id")
    ///     .bind(1_i32)
    ///     .fetch_opt_as(&conn)
    ///     .await?;
    /// ```
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Bind a parameter value.
    ///
    /// This does not modify the SQL string; the string must already contain
    /// the matching placeholder.
    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Arc::new(value));
        self
    }

    /// Bind every value of an iterator, in order.
    pub fn bind_all<T>(mut self, values: impl IntoIterator<Item = T>) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        for value in values {
            self.params.push(Arc::new(value));
        }
        self
    }

    /// Access the SQL string.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }

    #[cfg(feature = "tracing")]
    fn trace(&self) {
        const MAX_SQL_LENGTH: usize = 200;

        let tag = self.tag.as_deref().unwrap_or("-");
        let sql = match self.sql.char_indices().nth(MAX_SQL_LENGTH) {
            Some((end, _)) => format!("{}...", &self.sql[..end]),
            None => self.sql.clone(),
        };
        tracing::debug!(
            target: "folio.sql",
            tag,
            param_count = self.params.len(),
            sql = %sql,
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn trace(&self) {}

    /// Execute the query and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> FolioResult<Vec<Row>> {
        self.trace();
        let params = self.params_ref();
        conn.query(&self.sql, &params).await
    }

    /// Execute the query and return all rows mapped to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> FolioResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return the first row mapped to `T`, if any.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> FolioResult<Option<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.first().map(T::from_row).transpose()
    }

    /// Execute the query and return the first row mapped to `T`.
    ///
    /// Returns [`FolioError::NotFound`](crate::FolioError::NotFound) if no rows are returned.
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> FolioResult<T> {
        self.fetch_opt_as(conn)
            .await?
            .ok_or_else(|| crate::FolioError::not_found("Expected one row, got none"))
    }

    /// Execute the query and return affected row count.
    pub async fn execute(&self, conn: &impl GenericClient) -> FolioResult<u64> {
        self.trace();
        let params = self.params_ref();
        conn.execute(&self.sql, &params).await
    }
}
