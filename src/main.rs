/**
A small demo of logging to Elasticsearch.

On the first run against a node this creates an `applications` index and
seeds it with a handful of records for `myApp`. Every run then searches
for those records and prints them, oldest first.
*/

mod client;
mod config;
mod error;
mod index;
mod logger;
mod schema;
mod searcher;
mod seeder;
mod service;

#[cfg(test)]
mod memory;

use log::{
    info,
    LevelFilter,
};

use crate::{
    config::Config,
    error::Error,
    index::{
        Initializer,
        Outcome,
    },
    searcher::Searcher,
};

async fn run(config: &Config) -> Result<(), Error> {
    let client = client::connect(config).await?;

    match Initializer::new(&client, config).ensure().await? {
        Outcome::Created { seeded } => info!("seeded `{}` with {} records", config.index, seeded),
        Outcome::Existed => (),
    }

    let records = Searcher::new(&client, config).find().await?;

    searcher::print(&records, std::io::stdout().lock())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logger::init(LevelFilter::Warn);

    let config = Config::default();

    if let Err(e) = run(&config).await {
        eprintln!("error: {}", e);

        std::process::exit(1);
    }
}
