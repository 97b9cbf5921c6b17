use super::table::{parse_key_value, row_from_pairs, TableArgs};
use clap::Args;
use colored::Colorize;
use fdw_query::{DataRow, Modifiable};
use std::sync::Arc;

fn writable(source: &Arc<dyn fdw_query::ForeignDataSource>) -> anyhow::Result<&dyn Modifiable> {
    source.as_modifiable().ok_or_else(|| {
        anyhow::anyhow!(
            "Wrapper {} is read-only, use contentful_management",
            source.source_type()
        )
    })
}

fn print_row(row: &DataRow) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(row)?);
    Ok(())
}

#[derive(Args)]
pub struct InsertCommand {
    #[command(flatten)]
    pub table: TableArgs,

    /// Column values as key=value; values are parsed as JSON when possible
    #[arg(long = "set", value_parser = parse_key_value, required = true)]
    pub values: Vec<(String, String)>,
}

impl InsertCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let source = self.table.open().await?;
            let row = writable(&source)?.insert(row_from_pairs(&self.values)).await?;

            println!("{}", "Inserted".bright_green());
            print_row(&row)
        })
    }
}

#[derive(Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub table: TableArgs,

    /// Id of the row to update
    pub id: String,

    /// Column values as key=value; must include version=<n>, may include published=t
    #[arg(long = "set", value_parser = parse_key_value, required = true)]
    pub values: Vec<(String, String)>,
}

impl UpdateCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let source = self.table.open().await?;
            let row = writable(&source)?
                .update(&self.id, row_from_pairs(&self.values))
                .await?;

            println!("{}", "Updated".bright_green());
            print_row(&row)
        })
    }
}

#[derive(Args)]
pub struct DeleteCommand {
    #[command(flatten)]
    pub table: TableArgs,

    /// Id of the row to delete
    pub id: String,
}

impl DeleteCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let source = self.table.open().await?;
            writable(&source)?.delete(&self.id).await?;

            println!("{} {}", "Deleted".bright_green(), self.id);
            Ok::<(), anyhow::Error>(())
        })
    }
}
