use chrono::{
    DateTime,
    Utc,
};

use serde_derive::{
    Deserialize,
    Serialize,
};
use serde_json::{
    json,
    Map,
    Value,
};

/**
A single log event for an application.

This is the shape records are written in, and the shape every search hit
is expected to decode back into.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub app: String,
    pub message: String,
    pub time: DateTime<Utc>,
}

impl LogRecord {
    pub fn now(app: impl Into<String>, message: impl Into<String>) -> Self {
        LogRecord {
            app: app.into(),
            message: message.into(),
            time: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match *self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub indexed: bool,
}

impl FieldDef {
    fn new(name: &str, kind: FieldKind, indexed: bool) -> Self {
        FieldDef {
            name: name.to_owned(),
            kind,
            indexed,
        }
    }
}

/**
The mapping an index is created with.

Fields are kept in declaration order. The document category doesn't have
a place in typeless mappings, so it's carried in the mapping's `_meta`.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub doc_type: String,
    pub fields: Vec<FieldDef>,
}

impl Mapping {
    /**
    The mapping for `LogRecord`s.
    */
    pub fn logs(doc_type: &str) -> Self {
        Mapping {
            doc_type: doc_type.to_owned(),
            fields: vec![
                FieldDef::new("app", FieldKind::Text, false),
                FieldDef::new("message", FieldKind::Text, false),
                FieldDef::new("time", FieldKind::Date, true),
            ],
        }
    }

    /**
    Render the body of an index creation request.
    */
    pub fn to_body(&self) -> Value {
        let mut properties = Map::new();

        for field in &self.fields {
            let mut def = Map::new();
            def.insert("type".to_owned(), Value::from(field.kind.name()));

            // Indexing is the service's default, so it's only spelled out when disabled
            if !field.indexed {
                def.insert("index".to_owned(), Value::Bool(false));
            }

            properties.insert(field.name.clone(), Value::Object(def));
        }

        json!({
            "mappings": {
                "_meta": {
                    "doc_type": self.doc_type,
                },
                "properties": properties,
            }
        })
    }
}
