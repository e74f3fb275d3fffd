use db::feed_cache::DEFAULT_MAX_ENTRIES;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub web: Web,
    pub database: Database,
    pub redis: Redis,
    #[serde(default)]
    pub feed: Feed,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Web {
    #[serde(default = "host_default")]
    pub host: String,
    #[serde(default = "port_default")]
    pub port: u16,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Database {
    pub uri: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Redis {
    pub uri: String,
}

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Feed {
    /// Upper bound on the size of every user's cached feed.
    pub max_entries: usize,
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Fan-outs reaching more followers than this are logged as warnings.
    pub fanout_warn_threshold: usize,
}

impl Default for Feed {
    fn default() -> Self {
        Feed {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_page_size: 10,
            max_page_size: 50,
            fanout_warn_threshold: 10_000,
        }
    }
}

fn host_default() -> String {
    String::from("0.0.0.0")
}

fn port_default() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [web]
            port = 8080

            [database]
            uri = "postgres://localhost/feedwire"

            [redis]
            uri = "redis://localhost"
            "#,
        )
        .unwrap();

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.feed, Feed::default());
        assert_eq!(config.feed.max_entries, 100);
    }

    #[test]
    fn partial_feed_section_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [web]
            [database]
            uri = "postgres://localhost/feedwire"
            [redis]
            uri = "redis://localhost"
            [feed]
            max_page_size = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.web.port, 3000);
        assert_eq!(config.feed.max_page_size, 20);
        assert_eq!(config.feed.default_page_size, 10);
    }
}
