//! # fdw-query
//!
//! Host-facing abstractions for foreign data wrappers.
//!
//! A relational host discovers a wrapper by name, hands it the options
//! declared on a foreign table, and then drives it:
//!
//! - **ForeignDataSource**: core trait, predicate scans and the rowid column
//! - **Modifiable**: optional trait for INSERT / UPDATE / DELETE
//! - **WrapperRegistry**: maps wrapper names to `DataSourceFactory` instances
//!
//! ## Example
//!
//! ```rust
//! use fdw_query::{TableOptions, WrapperRegistry};
//!
//! # async fn example() -> fdw_query::Result<()> {
//! let registry = WrapperRegistry::new();
//!
//! let options = TableOptions::new("contentful_management")
//!     .with_option("space", "cfexampleapi")
//!     .with_option("api_key", "token")
//!     .with_option("type", "Asset");
//!
//! // Requires a registered factory, see `fdw-query-contentful`
//! // let source = registry.create_source(options).await?;
//! # let _ = (registry, options);
//! # Ok(())
//! # }
//! ```
//!
//! ## Backend Implementation
//!
//! 1. Create a struct that implements `ForeignDataSource`
//! 2. Implement `Modifiable` if the backend accepts writes
//! 3. Create a `DataSourceFactory` implementation
//! 4. Register the factory with `WrapperRegistry`

pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use error::{DataError, Result};
pub use registry::{DataSourceFactory, TableOptions, WrapperRegistry};
pub use traits::{ForeignDataSource, Modifiable};
pub use types::{Capability, DataRow, Qual, RowStream};
