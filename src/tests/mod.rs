#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::fs;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    use crate::config::ScanConfig;
    use crate::names::{NameSource, UcdLoader};
    use crate::report::{OutputFormat, Reporter};
    use crate::scan::{CodepointRange, DuplicateName, Scanner};

    const UNICODE_DATA: &str = "\
0000;<control>;Cc;0;BN;;;;;N;NULL;;;;
0001;<control>;Cc;0;BN;;;;;N;START OF HEADING;;;;
001F;<control>;Cc;0;S;;;;;N;INFORMATION SEPARATOR ONE;;;;
0020;SPACE;Zs;0;WS;;;;;N;;;;;
0021;EXCLAMATION MARK;Po;0;ON;;;;;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
007F;<control>;Cc;0;BN;;;;;N;DELETE;;;;
2603;SNOWMAN;So;0;ON;;;;;N;;;;;
AC00;<Hangul Syllable, First>;Lo;0;L;;;;;N;;;;;
D7A3;<Hangul Syllable, Last>;Lo;0;L;;;;;N;;;;;
D800;<Non Private Use High Surrogate, First>;Cs;0;L;;;;;N;;;;;
DB7F;<Non Private Use High Surrogate, Last>;Cs;0;L;;;;;N;;;;;
1F402;OX;So;0;ON;;;;;N;;;;;
E01EF;VARIATION SELECTOR-256;Mn;0;NSM;;;;;N;;;;;
";

    // Helper function to write a test dataset into a fresh directory
    fn create_test_dataset() -> Result<(TempDir, PathBuf)> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("UnicodeData.txt");
        fs::write(&path, UNICODE_DATA)?;
        Ok((temp_dir, path))
    }

    fn scan_file(path: &Path, config: &ScanConfig) -> Result<String> {
        let (table, dataset) = UcdLoader::new(path, config.unicode_version.clone()).load()?;
        let result = Scanner::new(&table, config.scan_options()).run(config.range())?;
        Reporter::new(&table, &dataset)
            .with_single_word_below(config.single_word_below)
            .render(&result, config.format)
    }

    #[test]
    fn test_scan_dataset_from_default_start() -> Result<()> {
        let (_temp_dir, path) = create_test_dataset()?;
        let (table, _) = UcdLoader::new(&path, "test").load()?;

        let result = Scanner::with_defaults(&table).scan(ScanConfig::default().range());

        // U+0020 onwards: the leading controls fall outside the default range
        assert_eq!(result.first_named, Some(0x20));
        assert_eq!(result.last_named, Some(0xE01EF));
        assert_eq!(result.first_unnamed, Some(0x22));
        assert_eq!(result.unique_named_count, 6);
        assert_eq!(result.single_word_chars, vec![0x20, 0x2603, 0x1F402]);
        assert_eq!(
            result.duplicate_names,
            vec![
                DuplicateName { name: "<Hangul Syllable>".to_string(), count: 0xD7A3 - 0xAC00 + 1 },
                DuplicateName { name: "<Non Private Use High Surrogate>".to_string(), count: 0xDB7F - 0xD800 + 1 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_scan_dataset_full_range() -> Result<()> {
        let (_temp_dir, path) = create_test_dataset()?;
        let (table, _) = UcdLoader::new(&path, "test").load()?;

        let result = Scanner::with_defaults(&table).scan(CodepointRange::full());

        assert_eq!(result.first_unnamed, Some(0x02));
        assert_eq!(result.duplicate_names[0], DuplicateName { name: "<control>".to_string(), count: 4 });
        assert_eq!(result.duplicate_names.len(), 3);
        Ok(())
    }

    #[test]
    fn test_text_report_end_to_end() -> Result<()> {
        let (_temp_dir, path) = create_test_dataset()?;
        let config = ScanConfig {
            unicode_version: "15.0.0".to_string(),
            single_word_below: Some(0x2FFF),
            ..ScanConfig::default()
        };

        let report = scan_file(&path, &config)?;

        assert!(report.contains("unicode version = 15.0.0\n"));
        assert!(report.contains("     6\tcharacters with unique names\n"));
        assert!(report.contains("first:\tU+0020\t' '\tSPACE\n"));
        assert!(report.contains(" last:\tU+E01EF\t'\\u{e01ef}'\tVARIATION SELECTOR-256\n"));
        assert!(report.contains("first character with no name: \tU+0022\n"));
        assert!(report.ends_with("U+0020\t \tSPACE\nU+2603\t☃\tSNOWMAN\n"));
        Ok(())
    }

    #[test]
    fn test_parallel_report_matches_sequential() -> Result<()> {
        let (_temp_dir, path) = create_test_dataset()?;
        let (table, _) = UcdLoader::new(&path, "test").load()?;
        let sequential = ScanConfig::default();
        let parallel = ScanConfig {
            parallel: true,
            parallel_threads: Some(3),
            shard_size: 0x1234,
            ..ScanConfig::default()
        };

        let expected = Scanner::new(&table, sequential.scan_options()).run(sequential.range())?;
        let actual = Scanner::new(&table, parallel.scan_options()).run(parallel.range())?;

        assert_eq!(actual, expected);
        Ok(())
    }

    #[test]
    fn test_json_report_end_to_end() -> Result<()> {
        let (_temp_dir, path) = create_test_dataset()?;
        let config = ScanConfig {
            unicode_version: "15.0.0".to_string(),
            format: OutputFormat::Json,
            ..ScanConfig::default()
        };

        let report = scan_file(&path, &config)?;
        let value: serde_json::Value = serde_json::from_str(&report)?;

        assert_eq!(value["dataset"]["version"], "15.0.0");
        assert_eq!(value["result"]["first_unnamed"], 0x22);
        assert_eq!(value["result"]["range"]["first"], 0x20);
        assert!(value["dataset"]["sha256"].is_string());
        assert!(value.get("single_word_below").is_none());
        Ok(())
    }

    #[test]
    fn test_surrogate_range_is_named() -> Result<()> {
        let (_temp_dir, path) = create_test_dataset()?;
        let (table, _) = UcdLoader::new(&path, "test").load()?;

        assert_eq!(table.name(0xD800), Some("<Non Private Use High Surrogate>"));
        assert_eq!(table.name(0xDB80), None);
        Ok(())
    }
}
