use failure::Fail;

/**
The ways a run can fail.

Each variant names the step that failed and carries whatever the service
client reported. Nothing is retried: the first error ends the run.
*/
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "failed to connect to `{}`: {}", url, cause)]
    Connection {
        url: String,
        cause: failure::Error,
    },
    #[fail(display = "failed to check whether index `{}` exists: {}", index, cause)]
    Exists {
        index: String,
        cause: failure::Error,
    },
    #[fail(display = "failed to create index `{}`: {}", index, cause)]
    CreateIndex {
        index: String,
        cause: failure::Error,
    },
    /**
    The creation request went through, but the service didn't acknowledge it.

    The index may or may not exist afterwards.
    */
    #[fail(display = "creating index `{}` was not acknowledged; check that the timeout value is correct (the index may still have been created)", index)]
    NotAcknowledged {
        index: String,
    },
    #[fail(display = "failed to insert record {}: {}", attempt, cause)]
    Insert {
        /// The 1-based position of the failed insert.
        attempt: usize,
        cause: failure::Error,
    },
    #[fail(display = "failed to search index `{}`: {}", index, cause)]
    Search {
        index: String,
        cause: failure::Error,
    },
    #[fail(display = "failed to decode hit {} as a log record: {}", position, cause)]
    Decode {
        /// The 0-based position of the hit in the search results.
        position: usize,
        cause: failure::Error,
    },
    #[fail(display = "failed to write results: {}", _0)]
    Output(#[cause] std::io::Error),
}
