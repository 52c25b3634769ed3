//! CSV output

use crate::banks::{BankRecord, TableSchema, format_real};
use crate::error::{EtlError, EtlResult};
use crate::etl::Loader;
use std::path::{Path, PathBuf};

/// Write bank records to a CSV file with a header row and no index column
pub struct CsvWriter {
    path: PathBuf,
    schema: TableSchema,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>, schema: TableSchema) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            schema,
        }
    }

    /// Replace the file with the given records
    pub fn write(&self, records: &[BankRecord]) -> EtlResult<()> {
        let file = std::fs::File::create(&self.path).map_err(|e| EtlError::io(&self.path, e))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(self.schema.column_names())?;
        for record in records {
            writer.write_record(self.fields(record))?;
        }

        writer.flush().map_err(|e| EtlError::io(&self.path, e))?;
        Ok(())
    }

    fn fields(&self, record: &BankRecord) -> Vec<String> {
        let mut fields = vec![
            record.rank.clone(),
            record.name.clone(),
            format_real(record.market_cap_usd),
        ];
        fields.extend(
            self.schema
                .currencies
                .iter()
                .map(|&c| record.market_cap(c).map(format_real).unwrap_or_default()),
        );
        fields
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for CsvWriter {
    type Item = BankRecord;

    async fn load(&self, items: &[Self::Item]) -> EtlResult<usize> {
        self.write(items)?;
        log::debug!("Wrote {} row(s) to {}", items.len(), self.path.display());
        Ok(items.len())
    }
}
