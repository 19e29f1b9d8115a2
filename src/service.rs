use serde_derive::Deserialize;
use serde_json::Value;

pub type Error = failure::Error;

/**
The capabilities this program needs from a search service.

Requests and documents are passed as JSON bodies, the same way they go
over the wire. Implementations report transport failures and non-success
responses as errors; callers decide what step they belong to.
*/
pub trait SearchService {
    /**
    Check that the service is reachable.
    */
    async fn ping(&self) -> Result<(), Error>;

    async fn index_exists(&self, index: &str) -> Result<bool, Error>;

    /**
    Create an index with the given settings and mappings body.

    A successful return only means the request was accepted. Check
    `acknowledged` before relying on the index.
    */
    async fn create_index(&self, index: &str, body: &Value) -> Result<CreateIndexResponse, Error>;

    /**
    Add a single document to an index.

    If `refresh` is set the call doesn't return until the document is visible to searches.
    */
    async fn index_document(&self, index: &str, doc: &Value, refresh: bool) -> Result<(), Error>;

    /**
    Run a search request body against an index, returning the hits in the order the service gave them.
    */
    async fn search(&self, index: &str, body: &Value) -> Result<Vec<Hit>, Error>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIndexResponse {
    #[serde(default)]
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: Hits,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hits {
    pub hits: Vec<Hit>,
}
