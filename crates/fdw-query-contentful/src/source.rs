//! Contentful foreign data sources
//!
//! - [`ContentfulManagementSource`]: read/write access to content types,
//!   entries or assets through the Content Management API
//! - [`ContentfulSource`]: read-only listing of content types

use crate::client::{paginate, CmaClient, ManagementApi, CDA_API_HOST};
use crate::codec::{decode, encode, parse_version};
use crate::config::ContentfulOptions;
use crate::kind::EntityKind;
use crate::planner::plan_query;
use async_trait::async_trait;
use fdw_query::{
    Capability, DataError, DataRow, ForeignDataSource, Modifiable, Qual, Result, RowStream,
    TableOptions,
};
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info};

/// Column reported to the host as the row identifier
pub const ROWID_COLUMN: &str = "id";

/// Read/write data source for one entity kind of a Contentful space
pub struct ContentfulManagementSource<C = CmaClient> {
    client: C,
    kind: EntityKind,
    content_type: Option<String>,
    page_size: u64,
}

impl ContentfulManagementSource<CmaClient> {
    /// Create a data source from the options of a foreign table
    pub fn new(options: TableOptions) -> Result<Self> {
        debug!("options: {}", options.describe());

        let parsed = ContentfulOptions::from_table_options(&options)?;
        let client = parsed.client()?;

        Ok(Self::with_client(client, &parsed))
    }
}

impl<C: ManagementApi> ContentfulManagementSource<C> {
    /// Create a data source around an existing API client
    pub fn with_client(client: C, options: &ContentfulOptions) -> Self {
        Self {
            client,
            kind: options.kind,
            content_type: options.content_type.clone(),
            page_size: options.page_size,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Content type sent along with entry writes
    fn entry_content_type(&self) -> Option<&str> {
        match self.kind {
            EntityKind::Entry => self.content_type.as_deref(),
            _ => None,
        }
    }
}

#[async_trait]
impl<C: ManagementApi + 'static> ForeignDataSource for ContentfulManagementSource<C> {
    fn source_type(&self) -> &'static str {
        "contentful_management"
    }

    fn capabilities(&self) -> Vec<Capability> {
        vec![
            Capability::Scan,
            Capability::Insert,
            Capability::Update,
            Capability::Delete,
        ]
    }

    fn rowid_column(&self) -> &str {
        ROWID_COLUMN
    }

    async fn scan<'a>(&'a self, quals: &[Qual], columns: &[String]) -> Result<RowStream<'a>> {
        scan_documents(
            &self.client,
            self.kind,
            self.content_type.as_deref(),
            self.page_size,
            quals,
            columns,
        )
    }

    fn as_modifiable(&self) -> Option<&dyn Modifiable> {
        Some(self)
    }
}

#[async_trait]
impl<C: ManagementApi + 'static> Modifiable for ContentfulManagementSource<C> {
    async fn insert(&self, mut values: DataRow) -> Result<DataRow> {
        debug!("Insert Request - new values: {:?}", values);

        let entity_id = values.shift_remove(ROWID_COLUMN).and_then(|id| row_id(&id));
        // New entities start unpublished
        values.shift_remove("published");
        let payload = encode(self.kind, &values)?;
        debug!("Insert payload ({}): {}", self.kind, payload);

        let response = self
            .client
            .create(
                self.kind,
                entity_id.as_deref(),
                &payload,
                self.entry_content_type(),
            )
            .await?;

        decode(self.kind, &response)
    }

    async fn update(&self, rowid: &str, mut new_values: DataRow) -> Result<DataRow> {
        debug!("Update Request - new values: {:?}", new_values);

        if rowid.is_empty() {
            return Err(DataError::MissingRowId("update".to_string()));
        }

        let version = new_values
            .shift_remove("version")
            .filter(|v| !v.is_null())
            .ok_or(DataError::MissingConcurrencyToken)?;
        let version = parse_version(&version)?;
        let published = new_values
            .shift_remove("published")
            .map(|flag| is_truthy(&flag))
            .unwrap_or(false);

        let payload = encode(self.kind, &new_values)?;
        debug!("Update payload ({} {} @ {}): {}", self.kind, rowid, version, payload);

        let response = self
            .client
            .update(
                self.kind,
                rowid,
                &payload,
                version,
                self.entry_content_type(),
            )
            .await?;

        if published {
            // The update consumed `version`; the entity now sits at version + 1
            info!("Publishing {} {}", self.kind, rowid);
            self.client.publish(self.kind, rowid, version + 1).await?;
        }

        decode(self.kind, &response)
    }

    async fn delete(&self, rowid: &str) -> Result<DataRow> {
        debug!("Delete Request - rowid: {}", rowid);

        if rowid.is_empty() {
            return Err(DataError::MissingRowId("delete".to_string()));
        }

        self.client.delete(self.kind, rowid).await?;

        Ok(DataRow::new())
    }
}

/// Read-only data source listing the content types of a space
pub struct ContentfulSource<C = CmaClient> {
    client: C,
    page_size: u64,
}

impl ContentfulSource<CmaClient> {
    /// Create a data source from table options; `type` is ignored
    pub fn new(options: TableOptions) -> Result<Self> {
        debug!("options: {}", options.describe());

        let parsed = ContentfulOptions::for_kind(&options, EntityKind::ContentType, CDA_API_HOST)?;
        let client = parsed.client()?;

        Ok(Self::with_client(client, parsed.page_size))
    }
}

impl<C: ManagementApi> ContentfulSource<C> {
    pub fn with_client(client: C, page_size: u64) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl<C: ManagementApi + 'static> ForeignDataSource for ContentfulSource<C> {
    fn source_type(&self) -> &'static str {
        "contentful"
    }

    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::Scan]
    }

    fn rowid_column(&self) -> &str {
        ROWID_COLUMN
    }

    async fn scan<'a>(&'a self, quals: &[Qual], columns: &[String]) -> Result<RowStream<'a>> {
        scan_documents(
            &self.client,
            EntityKind::ContentType,
            None,
            self.page_size,
            quals,
            columns,
        )
    }
}

fn scan_documents<'a, C: ManagementApi>(
    client: &'a C,
    kind: EntityKind,
    content_type: Option<&str>,
    page_size: u64,
    quals: &[Qual],
    columns: &[String],
) -> Result<RowStream<'a>> {
    debug!("Query Columns: {:?}", columns);
    debug!("Query Filters: {:?}", quals);

    let query = plan_query(kind, content_type, quals)?;

    Ok(paginate(client, kind, query, page_size)
        .map(move |document| document.and_then(|doc| decode(kind, &doc)))
        .boxed())
}

/// Row id supplied with an inserted row, if any
fn row_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Host boolean rendering: `t`, `true`, `1`, ...
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "t" | "true" | "y" | "yes" | "on" | "1"
        ),
        _ => false,
    }
}
