use crate::error::Result;
use crate::types::*;
use async_trait::async_trait;
use downcast_rs::{impl_downcast, Downcast};

/// Core trait that every foreign data source implements
///
/// A data source is configured once from its table options and then driven
/// by the host for the lifetime of one statement.
#[async_trait]
pub trait ForeignDataSource: Send + Sync + Downcast {
    /// Get the wrapper name of this data source
    fn source_type(&self) -> &'static str;

    /// Get all capabilities supported by this source
    fn capabilities(&self) -> Vec<Capability>;

    /// Check if a specific capability is supported
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Column that uniquely identifies a row for UPDATE and DELETE
    fn rowid_column(&self) -> &str;

    /// Produce the rows matching `quals`
    ///
    /// `columns` lists the columns the host asked for. Sources may emit
    /// additional columns; the host reconciles by name. Rows are produced
    /// lazily as the stream is polled; calling `scan` again restarts from
    /// the beginning.
    async fn scan<'a>(&'a self, quals: &[Qual], columns: &[String]) -> Result<RowStream<'a>>;

    /// Write access, for sources that implement `Modifiable`
    fn as_modifiable(&self) -> Option<&dyn Modifiable> {
        None
    }
}

impl_downcast!(ForeignDataSource);

/// Optional trait for sources that accept writes
#[async_trait]
pub trait Modifiable: ForeignDataSource {
    /// Insert a new row and return it as stored remotely
    async fn insert(&self, values: DataRow) -> Result<DataRow>;

    /// Update the row identified by `rowid` and return it as stored remotely
    async fn update(&self, rowid: &str, new_values: DataRow) -> Result<DataRow>;

    /// Delete the row identified by `rowid`
    ///
    /// Returns an empty row on success.
    async fn delete(&self, rowid: &str) -> Result<DataRow>;
}
