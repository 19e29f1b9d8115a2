use log::info;

use crate::{
    config::Config,
    error::Error,
    seeder::Seeder,
    service::SearchService,
};

/**
What `Initializer::ensure` found or did.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The index was already there. It's left alone, even if it's empty.
    Existed,
    /// The index was created by this call and then seeded.
    Created {
        seeded: usize,
    },
}

/**
Makes sure the configured index exists.

An index is only ever seeded by the call that creates it. An existing
index keeps its mapping and its documents.
*/
pub struct Initializer<'a, S> {
    service: &'a S,
    config: &'a Config,
}

impl<'a, S> Initializer<'a, S>
where
    S: SearchService,
{
    pub fn new(service: &'a S, config: &'a Config) -> Self {
        Initializer {
            service,
            config,
        }
    }

    pub async fn ensure(&self) -> Result<Outcome, Error> {
        let index = &self.config.index;

        let exists = self.service
            .index_exists(index)
            .await
            .map_err(|cause| Error::Exists {
                index: index.clone(),
                cause,
            })?;

        if exists {
            info!("index `{}` already exists", index);

            return Ok(Outcome::Existed);
        }

        let created = self.service
            .create_index(index, &self.config.mapping.to_body())
            .await
            .map_err(|cause| Error::CreateIndex {
                index: index.clone(),
                cause,
            })?;

        if !created.acknowledged {
            return Err(Error::NotAcknowledged {
                index: index.clone(),
            });
        }

        info!("created index `{}`", index);

        let seeded = Seeder::new(self.service, self.config).seed().await?;

        Ok(Outcome::Created {
            seeded,
        })
    }
}
