use elasticsearch::{
    http::{
        transport::{
            SingleNodeConnectionPool,
            TransportBuilder,
        },
        StatusCode,
        Url,
    },
    indices::{
        IndicesCreateParts,
        IndicesExistsParts,
    },
    params::Refresh,
    Elasticsearch,
    IndexParts,
    SearchParts,
};

use failure::err_msg;
use log::{
    debug,
    info,
};
use serde_json::Value;

use crate::{
    config::Config,
    error::Error,
    service::{
        self,
        CreateIndexResponse,
        Hit,
        SearchResponse,
        SearchService,
    },
};

/**
A handle to an Elasticsearch node.

The handle is cheap to clone, and is reused for every request in a run.
*/
#[derive(Clone)]
pub struct Client {
    inner: Elasticsearch,
}

/**
Connect to the node at `config.url`.

Other nodes in the cluster are never discovered; every request goes to
the configured address. If `config.healthcheck` is set the node is pinged
before the client is handed back.
*/
pub async fn connect(config: &Config) -> Result<Client, Error> {
    let fail = |cause: service::Error| Error::Connection {
        url: config.url.clone(),
        cause,
    };

    if config.sniff {
        return Err(fail(err_msg("node discovery isn't supported")));
    }

    let url = Url::parse(&config.url).map_err(|e| fail(e.into()))?;

    let pool = SingleNodeConnectionPool::new(url);
    let transport = TransportBuilder::new(pool)
        .disable_proxy()
        .build()
        .map_err(|e| fail(e.into()))?;

    let client = Client {
        inner: Elasticsearch::new(transport),
    };

    healthcheck(&client, config).await?;

    info!("connected to `{}`", config.url);

    Ok(client)
}

/**
Ping the service if `config.healthcheck` is set.
*/
pub async fn healthcheck<S>(service: &S, config: &Config) -> Result<(), Error>
where
    S: SearchService,
{
    if !config.healthcheck {
        return Ok(());
    }

    service.ping().await.map_err(|cause| Error::Connection {
        url: config.url.clone(),
        cause,
    })
}

impl SearchService for Client {
    async fn ping(&self) -> Result<(), service::Error> {
        self.inner
            .ping()
            .send()
            .await?
            .error_for_status_code()?;

        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, service::Error> {
        let response = self.inner
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        let status = response.status_code();

        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        if status.is_success() {
            return Ok(true);
        }

        response.error_for_status_code()?;

        Err(err_msg(format!("unexpected status {} checking index `{}`", status, index)))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<CreateIndexResponse, service::Error> {
        let response = self.inner
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await?
            .error_for_status_code()?;

        let created = response.json::<CreateIndexResponse>().await?;

        Ok(created)
    }

    async fn index_document(&self, index: &str, doc: &Value, refresh: bool) -> Result<(), service::Error> {
        let mut request = self.inner
            .index(IndexParts::Index(index))
            .body(doc);

        if refresh {
            request = request.refresh(Refresh::WaitFor);
        }

        let response = request
            .send()
            .await?
            .error_for_status_code()?;

        debug!("indexed document into `{}` ({})", index, response.status_code());

        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Vec<Hit>, service::Error> {
        let response: SearchResponse = self.inner
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await?
            .error_for_status_code()?
            .json()
            .await?;

        Ok(response.hits.hits)
    }
}
