use super::table::{parse_qual, TableArgs};
use clap::Args;
use colored::Colorize;
use fdw_query::Qual;
use futures::TryStreamExt;
use tracing::debug;

/// Output format for scanned rows
#[derive(Debug, Clone, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `column: value` block per row
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub table: TableArgs,

    /// Filter pushed down to the remote API, e.g. --where "title=Hello"
    #[arg(long = "where", value_parser = parse_qual)]
    pub quals: Vec<Qual>,

    /// Columns to request (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,
}

impl ScanCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let source = self.table.open().await?;
            debug!("Scanning {} with {} filters", source.source_type(), self.quals.len());

            let mut rows = source.scan(&self.quals, &self.columns).await?;
            let mut count = 0usize;

            while let Some(row) = rows.try_next().await? {
                count += 1;
                match self.output_format {
                    OutputFormat::Json => println!("{}", serde_json::to_string(&row)?),
                    OutputFormat::Text => {
                        println!("{}", format!("-[ RECORD {} ]-", count).bright_black());
                        for (column, value) in &row {
                            println!("{:<20} | {}", column.bold(), value);
                        }
                    }
                }
            }

            if matches!(self.output_format, OutputFormat::Text) {
                println!("({} rows)", count);
            }

            Ok::<(), anyhow::Error>(())
        })
    }
}
