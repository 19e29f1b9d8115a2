/*!
An in-memory `SearchService` for exercising the steps of a run.

It understands just enough of the request bodies the steps send: a single
`term` query and a sort on one date field. Failures can be injected to
check how each step reacts to them.
*/

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::Mutex,
};

use chrono::{
    DateTime,
    Utc,
};
use failure::err_msg;
use serde_json::Value;

use crate::service::{
    CreateIndexResponse,
    Error,
    Hit,
    SearchService,
};

/// The number of hits returned when a search doesn't ask for a size.
const DEFAULT_WINDOW: usize = 10;

pub struct MemoryService {
    state: Mutex<State>,
}

struct State {
    indexes: HashMap<String, MemoryIndex>,
    reachable: bool,
    acknowledge: bool,
    fail_create: bool,
    inserts: usize,
    fail_insert_at: Option<usize>,
    fail_search: bool,
}

#[derive(Clone)]
pub struct MemoryIndex {
    pub body: Value,
    pub docs: Vec<Value>,
    pub refreshes: usize,
}

impl MemoryService {
    pub fn new() -> Self {
        MemoryService {
            state: Mutex::new(State {
                indexes: HashMap::new(),
                reachable: true,
                acknowledge: true,
                fail_create: false,
                inserts: 0,
                fail_insert_at: None,
                fail_search: false,
            }),
        }
    }

    pub fn unreachable(self) -> Self {
        self.state.lock().expect("poisoned state").reachable = false;
        self
    }

    /**
    Create indexes without acknowledging them.
    */
    pub fn unacknowledged(self) -> Self {
        self.state.lock().expect("poisoned state").acknowledge = false;
        self
    }

    /**
    Reject index creation outright.
    */
    pub fn fail_create(self) -> Self {
        self.state.lock().expect("poisoned state").fail_create = true;
        self
    }

    /**
    Fail the `attempt`th document insert (1-based).
    */
    pub fn fail_insert_at(self, attempt: usize) -> Self {
        self.state.lock().expect("poisoned state").fail_insert_at = Some(attempt);
        self
    }

    pub fn fail_search(self) -> Self {
        self.state.lock().expect("poisoned state").fail_search = true;
        self
    }

    pub fn with_index(self, index: &str, body: Value) -> Self {
        self.state.lock().expect("poisoned state").indexes.insert(index.to_owned(), MemoryIndex {
            body,
            docs: Vec::new(),
            refreshes: 0,
        });
        self
    }

    /**
    Put a document straight into an index, bypassing failure injection.
    */
    pub fn put(&self, index: &str, doc: Value) {
        self.state
            .lock()
            .expect("poisoned state")
            .indexes
            .get_mut(index)
            .expect("missing index")
            .docs
            .push(doc);
    }

    pub fn index(&self, index: &str) -> Option<MemoryIndex> {
        self.state.lock().expect("poisoned state").indexes.get(index).cloned()
    }
}

impl SearchService for MemoryService {
    async fn ping(&self) -> Result<(), Error> {
        if self.state.lock().expect("poisoned state").reachable {
            Ok(())
        } else {
            Err(err_msg("connection refused"))
        }
    }

    async fn index_exists(&self, index: &str) -> Result<bool, Error> {
        let state = self.state.lock().expect("poisoned state");

        if !state.reachable {
            return Err(err_msg("connection refused"));
        }

        Ok(state.indexes.contains_key(index))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<CreateIndexResponse, Error> {
        let mut state = self.state.lock().expect("poisoned state");

        if state.fail_create {
            return Err(err_msg("illegal_argument_exception: failed to parse mapping"));
        }

        if state.indexes.contains_key(index) {
            return Err(err_msg(format!("resource_already_exists_exception: index [{}] already exists", index)));
        }

        // An unacknowledged index still gets created
        state.indexes.insert(index.to_owned(), MemoryIndex {
            body: body.clone(),
            docs: Vec::new(),
            refreshes: 0,
        });

        Ok(CreateIndexResponse {
            acknowledged: state.acknowledge,
        })
    }

    async fn index_document(&self, index: &str, doc: &Value, refresh: bool) -> Result<(), Error> {
        let mut state = self.state.lock().expect("poisoned state");

        state.inserts += 1;
        if state.fail_insert_at == Some(state.inserts) {
            return Err(err_msg("es_rejected_execution_exception"));
        }

        let index = state
            .indexes
            .get_mut(index)
            .ok_or_else(|| err_msg(format!("index_not_found_exception: no such index [{}]", index)))?;

        index.docs.push(doc.clone());
        if refresh {
            index.refreshes += 1;
        }

        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Vec<Hit>, Error> {
        let state = self.state.lock().expect("poisoned state");

        if state.fail_search {
            return Err(err_msg("search_phase_execution_exception"));
        }

        let index = state
            .indexes
            .get(index)
            .ok_or_else(|| err_msg(format!("index_not_found_exception: no such index [{}]", index)))?;

        let mut docs: Vec<(usize, &Value)> = index
            .docs
            .iter()
            .enumerate()
            .filter(|(_, doc)| matches_term(&body["query"], doc))
            .collect();

        if let Some(field) = ascending_sort_field(&body["sort"]) {
            // A stable sort keeps insertion order for equal timestamps
            docs.sort_by(|(_, a), (_, b)| compare_dates(&a[field.as_str()], &b[field.as_str()]));
        }

        Ok(docs
            .into_iter()
            .take(DEFAULT_WINDOW)
            .map(|(id, doc)| Hit {
                id: Some(id.to_string()),
                source: Some(doc.clone()),
            })
            .collect())
    }
}

fn matches_term(query: &Value, doc: &Value) -> bool {
    let term = match query.get("term").and_then(Value::as_object) {
        Some(term) => term,
        None => return true,
    };

    term.iter().all(|(field, expected)| {
        let expected = expected.get("value").unwrap_or(expected);

        doc.get(field) == Some(expected)
    })
}

fn ascending_sort_field(sort: &Value) -> Option<String> {
    let sort = sort.as_array()?.first()?.as_object()?;
    let (field, order) = sort.iter().next()?;

    match order["order"].as_str() {
        Some("asc") | None => Some(field.to_owned()),
        Some(_) => None,
    }
}

fn compare_dates(a: &Value, b: &Value) -> Ordering {
    let parse = |v: &Value| v.as_str().and_then(|v| v.parse::<DateTime<Utc>>().ok());

    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
