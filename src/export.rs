//! CSV export of generated records.

use anyhow::Context;
use earthseries_core::config::GeneratorConfig;
use earthseries_core::profile::VariableKind;
use earthseries_core::record::YearRecord;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn default_path(kind: VariableKind, config: &GeneratorConfig) -> PathBuf {
    PathBuf::from(format!(
        "earth_{}_data_{}_{}.csv",
        kind.key(),
        config.start_year,
        config.end_year
    ))
}

/// Write `records` with a header row of [`YearRecord::COLUMNS`].
pub fn write_csv<W: Write>(writer: W, records: &[YearRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, records: &[YearRecord]) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, records).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use earthseries_core::builder::SeriesBuilder;

    fn records() -> Vec<YearRecord> {
        let config = GeneratorConfig {
            start_year: 2000,
            end_year: 2004,
            ..GeneratorConfig::default()
        };
        SeriesBuilder::new(VariableKind::Co2, config)
            .unwrap()
            .generate(1)
    }

    #[test]
    fn test_default_path_names_variable_and_years() {
        let path = default_path(VariableKind::SeaLevel, &GeneratorConfig::default());
        assert_eq!(path, PathBuf::from("earth_sea_level_data_1850_2025.csv"));
    }

    #[test]
    fn test_header_lists_columns_in_order() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &records()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), YearRecord::COLUMNS.join(","));
        assert_eq!(lines.count(), 5);
    }

    #[test]
    fn test_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let records = records();
        write_csv_file(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read: Vec<YearRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(read.len(), records.len());
        assert_eq!(read[0].year, 2000);
        assert_eq!(read[4].year, 2004);
    }
}
