//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CHART_INI: &str = r#"
[data]
base_path = ./market-data

[chart]
symbols = AAA,BBB
period = 6mo
interval = 1h
indicators = MACD,RSI,VWAP
show_volume = no
max_panels = 4
"#;

    #[test]
    fn from_string_reads_sections() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();

        assert_eq!(
            adapter.get_string("data", "base_path"),
            Some("./market-data".to_string())
        );
        assert_eq!(
            adapter.get_string("chart", "symbols"),
            Some("AAA,BBB".to_string())
        );
    }

    #[test]
    fn get_bool_parses_word_forms() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();

        assert!(!adapter.get_bool("chart", "show_volume", true));
        assert!(adapter.get_bool("chart", "missing", true));
    }

    #[test]
    fn get_int_with_default() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();

        assert_eq!(adapter.get_int("chart", "max_panels", 2), 4);
        assert_eq!(adapter.get_int("chart", "missing", 2), 2);
    }

    #[test]
    fn missing_key_is_none() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();
        assert_eq!(adapter.get_string("chart", "nope"), None);
    }

    #[test]
    fn from_file_loads_ini() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CHART_INI).unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("chart", "period"),
            Some("6mo".to_string())
        );
    }

    #[test]
    fn from_file_missing_path_errors() {
        assert!(FileConfigAdapter::from_file("/nonexistent/marketdash.ini").is_err());
    }
}
