use std::path::Path;

use anyhow::Context;
use url::Url;

use crate::domain::profile::ProfileRecord;

/// Profile URLs come from the first column of each uploaded row. Rows
/// that do not parse as a URL (header lines included) are logged and
/// dropped.
pub fn read_profile_urls(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open profile list {}", path.display()))?;

    let mut urls = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(first_column) = row.get(0) else {
            continue;
        };
        let candidate = first_column.trim();
        if candidate.is_empty() {
            continue;
        }
        match Url::parse(candidate) {
            Ok(_) => urls.push(candidate.to_string()),
            Err(e) => log::warn!("Skipping row with invalid url {:?}: {}", candidate, e),
        }
    }
    Ok(urls)
}

pub fn write_records(path: &Path, records: &[ProfileRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn read_records(path: &Path) -> anyhow::Result<Vec<ProfileRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<ProfileRecord>, _>>()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dossier-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn reads_first_column_urls_and_skips_invalid_rows() {
        let path = temp_path("profiles.csv");
        std::fs::write(
            &path,
            "url\nhttps://example.com/in/jane,extra-column\nnot-a-url\n\nhttps://example.com/in/omar\n",
        )
        .unwrap();

        let urls = read_profile_urls(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            urls,
            vec![
                "https://example.com/in/jane".to_string(),
                "https://example.com/in/omar".to_string(),
            ]
        );
    }

    #[test]
    fn output_columns_keep_the_expected_order() {
        let path = temp_path("scraped.csv");
        let record = ProfileRecord::not_available("https://example.com/in/jane");
        write_records(&path, &[record]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let header = raw.lines().next().unwrap();
        assert_eq!(
            header,
            "url,name,profiletitle,about,currentcompany,currentjobtitle,currentjobduration,currentjobdescription,lastcompany,lastjobtitle,lastjobduration,lastjobdescription"
        );
    }
}
