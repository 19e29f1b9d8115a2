use log::debug;

use crate::{
    config::Config,
    error::Error,
    schema::LogRecord,
    service::SearchService,
};

/**
Writes a batch of synthetic records for the configured application.

Records are written one at a time, each stamped just before it's sent.
The first failed write stops the batch; records that were already written
stay where they are.
*/
pub struct Seeder<'a, S> {
    service: &'a S,
    config: &'a Config,
}

impl<'a, S> Seeder<'a, S>
where
    S: SearchService,
{
    pub fn new(service: &'a S, config: &'a Config) -> Self {
        Seeder {
            service,
            config,
        }
    }

    /**
    Seed the index, returning the number of records written.
    */
    pub async fn seed(&self) -> Result<usize, Error> {
        let index = &self.config.index;

        for i in 0..self.config.seed_count {
            let attempt = i + 1;

            let record = LogRecord::now(&self.config.app, format!("message {}", i));
            let doc = serde_json::to_value(&record).map_err(|e| Error::Insert {
                attempt,
                cause: e.into(),
            })?;

            self.service
                .index_document(index, &doc, self.config.refresh_on_seed)
                .await
                .map_err(|cause| Error::Insert {
                    attempt,
                    cause,
                })?;

            debug!("inserted `{}` as a `{}` into `{}`", record.message, self.config.doc_type, index);
        }

        Ok(self.config.seed_count)
    }
}
