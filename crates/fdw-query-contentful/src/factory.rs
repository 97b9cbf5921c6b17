use crate::source::{ContentfulManagementSource, ContentfulSource};
use fdw_query::{DataSourceFactory, ForeignDataSource, Result, TableOptions, WrapperRegistry};
use std::sync::Arc;

/// Factory for the read/write `contentful_management` wrapper
pub struct ContentfulManagementFactory;

impl DataSourceFactory for ContentfulManagementFactory {
    fn wrapper_name(&self) -> &'static str {
        "contentful_management"
    }

    fn create_source(&self, options: TableOptions) -> Result<Arc<dyn ForeignDataSource>> {
        Ok(Arc::new(ContentfulManagementSource::new(options)?))
    }
}

/// Factory for the read-only `contentful` wrapper
pub struct ContentfulFactory;

impl DataSourceFactory for ContentfulFactory {
    fn wrapper_name(&self) -> &'static str {
        "contentful"
    }

    fn create_source(&self, options: TableOptions) -> Result<Arc<dyn ForeignDataSource>> {
        Ok(Arc::new(ContentfulSource::new(options)?))
    }
}

/// Register both Contentful wrappers
pub async fn register(registry: &WrapperRegistry) -> Result<()> {
    registry
        .register_factory(Arc::new(ContentfulManagementFactory))
        .await?;
    registry.register_factory(Arc::new(ContentfulFactory)).await
}
