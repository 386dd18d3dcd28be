use serde::Deserialize;
use std::path::Path;

/// One configured monitoring server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ServerEntry {
    url: String,
}

/// Ordered server registry, in the order the file lists them.
#[derive(Debug, Clone)]
pub struct Config {
    pub servers: Vec<ServerDef>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("reading config {}: {}", path.display(), e))?;
        Self::parse(&data)
    }

    /// Parses a YAML (or JSON) mapping of `name: {url: ...}`.
    pub fn parse(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        // serde_yaml::Mapping keeps insertion order, a HashMap would not
        let mapping: serde_yaml::Mapping =
            serde_yaml::from_str(data).map_err(|e| format!("parsing config: {}", e))?;

        let mut servers = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| format!("server name {:?} is not a string", key))?
                .to_string();
            let entry: ServerEntry = serde_yaml::from_value(value)
                .map_err(|e| format!("server {:?}: {}", name, e))?;
            if entry.url.trim().is_empty() {
                return Err(format!("server {:?} has an empty url", name).into());
            }
            servers.push(ServerDef {
                name,
                url: entry.url,
            });
        }

        if servers.is_empty() {
            return Err("at least one server must be configured".into());
        }

        Ok(Config { servers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_json_and_keeps_order() {
        let cfg = Config::parse(
            r#"{
                "zurich": {"url": "http://z.example.com"},
                "amsterdam": {"url": "http://a.example.com"},
                "madrid": {"url": "http://m.example.com", "comment": "ignored"}
            }"#,
        )
        .unwrap();
        let names: Vec<&str> = cfg.servers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zurich", "amsterdam", "madrid"]);
        assert_eq!(cfg.servers[1].url, "http://a.example.com");
    }

    #[test]
    fn parses_yaml() {
        let cfg = Config::parse("london:\n  url: http://lon:8080\nparis:\n  url: http://par:8080\n")
            .unwrap();
        assert_eq!(
            cfg.servers,
            vec![
                ServerDef {
                    name: "london".into(),
                    url: "http://lon:8080".into()
                },
                ServerDef {
                    name: "paris".into(),
                    url: "http://par:8080".into()
                },
            ]
        );
    }

    #[test]
    fn rejects_missing_url() {
        let err = Config::parse(r#"{"lon": {"address": "x"}}"#).unwrap_err();
        assert!(err.to_string().contains("lon"), "{}", err);
    }

    #[test]
    fn rejects_empty_url() {
        let err = Config::parse(r#"{"lon": {"url": "  "}}"#).unwrap_err();
        assert!(err.to_string().contains("empty url"), "{}", err);
    }

    #[test]
    fn rejects_empty_mapping() {
        assert!(Config::parse("{}").is_err());
    }

    #[test]
    fn rejects_non_mapping() {
        assert!(Config::parse("- a\n- b\n").is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"lon": {{"url": "http://lon"}}}}"#).unwrap();
        let cfg = Config::load(f.path()).unwrap();
        assert_eq!(cfg.servers.len(), 1);
        assert_eq!(cfg.servers[0].name, "lon");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("reading config"), "{}", err);
    }
}
