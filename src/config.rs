use crate::schema::Mapping;

/**
Settings shared by every step of a run.

There's nothing to read from the environment here; the defaults are the
values the demo always runs with.
*/
#[derive(Debug, Clone)]
pub struct Config {
    /// The address of the search service.
    pub url: String,
    /// Whether to discover other nodes in the cluster.
    ///
    /// Only `false` is supported: the client always talks to the single node at `url`.
    pub sniff: bool,
    /// Ping the service while connecting.
    pub healthcheck: bool,
    pub index: String,
    /// The category inserted records are tagged with.
    pub doc_type: String,
    /// The application name records are written and queried for.
    pub app: String,
    pub seed_count: usize,
    /// Wait for each seeded record to become searchable before moving on.
    pub refresh_on_seed: bool,
    pub mapping: Mapping,
}

impl Default for Config {
    fn default() -> Self {
        let doc_type = "log".to_owned();

        Config {
            url: "http://localhost:9200".to_owned(),
            sniff: false,
            healthcheck: true,
            index: "applications".to_owned(),
            mapping: Mapping::logs(&doc_type),
            doc_type,
            app: "myApp".to_owned(),
            seed_count: 10,
            refresh_on_seed: true,
        }
    }
}
