use std::io::Write;

use failure::err_msg;
use log::{
    debug,
    info,
};
use serde_json::{
    json,
    Value,
};

use crate::{
    config::Config,
    error::Error,
    schema::LogRecord,
    service::SearchService,
};

/**
Finds the records logged by the configured application.

Only the first page of results is read, so at most the service's default
number of hits come back.
*/
pub struct Searcher<'a, S> {
    service: &'a S,
    config: &'a Config,
}

impl<'a, S> Searcher<'a, S>
where
    S: SearchService,
{
    pub fn new(service: &'a S, config: &'a Config) -> Self {
        Searcher {
            service,
            config,
        }
    }

    /**
    The search body: an exact match on `app`, oldest records first.
    */
    pub fn query(&self) -> Value {
        json!({
            "query": {
                "term": {
                    "app": self.config.app,
                }
            },
            "sort": [
                { "time": { "order": "asc" } }
            ]
        })
    }

    pub async fn find(&self) -> Result<Vec<LogRecord>, Error> {
        let index = &self.config.index;

        let hits = self.service
            .search(index, &self.query())
            .await
            .map_err(|cause| Error::Search {
                index: index.clone(),
                cause,
            })?;

        info!("found {} hits in `{}`", hits.len(), index);

        hits.into_iter()
            .enumerate()
            .map(|(position, hit)| {
                debug!("decoding hit {} (`{}`)", position, hit.id.as_deref().unwrap_or("-"));

                let source = hit.source.ok_or_else(|| Error::Decode {
                    position,
                    cause: err_msg("hit has no `_source`"),
                })?;

                serde_json::from_value(source).map_err(|e| Error::Decode {
                    position,
                    cause: e.into(),
                })
            })
            .collect()
    }
}

/**
Write a header followed by a line per record.
*/
pub fn print(records: &[LogRecord], mut out: impl Write) -> Result<(), Error> {
    writeln!(out, "Logs found:").map_err(Error::Output)?;

    for record in records {
        writeln!(out, "time: {} message: {}", record.time.to_rfc3339(), record.message).map_err(Error::Output)?;
    }

    Ok(())
}
