//! Contentful implementation of the fdw-query data source traits
//!
//! Exposes content types, entries and assets of a Contentful space as rows,
//! and pushes INSERT / UPDATE / DELETE back through the Content Management
//! API.
//!
//! ## Table options
//!
//! | option         | required          | meaning                                   |
//! |----------------|-------------------|-------------------------------------------|
//! | `space`        | yes               | space identifier                          |
//! | `api_key`      | yes               | management (or delivery) access token     |
//! | `type`         | yes (management)  | `ContentType`, `Entry` or `Asset`         |
//! | `content_type` | when `type=Entry` | content type the table is scoped to       |
//! | `api_url`      | no                | API host or base URL                      |
//! | `page_size`    | no                | documents fetched per request (1..=1000)  |
//! | `timeout_secs` | no                | HTTP timeout                              |
//!
//! ## Example
//!
//! ```rust,no_run
//! use fdw_query::{ForeignDataSource, Qual, TableOptions};
//! use fdw_query_contentful::ContentfulManagementSource;
//! use futures::TryStreamExt;
//!
//! # async fn example() -> fdw_query::Result<()> {
//! let source = ContentfulManagementSource::new(
//!     TableOptions::new("contentful_management")
//!         .with_option("space", "cfexampleapi")
//!         .with_option("api_key", "CFPAT-...")
//!         .with_option("type", "Entry")
//!         .with_option("content_type", "blogPost"),
//! )?;
//!
//! let mut rows = source.scan(&[Qual::new("title", "=", "Hello")], &[]).await?;
//! while let Some(row) = rows.try_next().await? {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod factory;
pub mod kind;
pub mod operators;
pub mod path;
pub mod planner;
pub mod source;

pub use client::{CmaClient, ManagementApi, Page};
pub use config::ContentfulOptions;
pub use factory::{register, ContentfulFactory, ContentfulManagementFactory};
pub use kind::EntityKind;
pub use planner::{plan_query, RemoteQuery};
pub use source::{ContentfulManagementSource, ContentfulSource, ROWID_COLUMN};
