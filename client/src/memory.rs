// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! An in-memory appliance implementing [`Client`]

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::{Client, ClientError, Object, location};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Create,
    Read,
    Update,
    Delete,
}

/// A request seen by a [`MemoryClient`]
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub mkey: Option<String>,
    pub body: Option<Object>,
}

type Key = (String, Option<String>);

/// An appliance keeping objects in memory.
///
/// Table paths must be registered with the name of their key field so that created
/// entries can be keyed. Updates replace the top-level fields present in the body, and
/// rename the entry when they change its key field.
#[derive(Debug)]
pub struct MemoryClient {
    version: Mutex<String>,
    tables: BTreeMap<String, String>,
    objects: Mutex<BTreeMap<Key, Object>>,
    requests: Mutex<Vec<Request>>,
}

impl MemoryClient {
    #[must_use]
    pub fn new(version: &str) -> Self {
        Self {
            version: Mutex::new(version.to_owned()),
            tables: BTreeMap::new(),
            objects: Mutex::new(BTreeMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Register a table path and the field keying its entries
    #[must_use]
    pub fn with_table(mut self, path: &str, mkey_field: &str) -> Self {
        self.tables.insert(path.to_owned(), mkey_field.to_owned());
        self
    }

    pub fn set_version(&self, version: &str) {
        *self.version.lock() = version.to_owned();
    }

    /// Store an object as the appliance would report it
    pub fn insert(&self, path: &str, mkey: Option<&str>, object: Object) {
        self.objects
            .lock()
            .insert((path.to_owned(), mkey.map(str::to_owned)), object);
    }

    #[must_use]
    pub fn get(&self, path: &str, mkey: Option<&str>) -> Option<Object> {
        self.objects
            .lock()
            .get(&(path.to_owned(), mkey.map(str::to_owned)))
            .cloned()
    }

    /// All requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// The body of the most recent request with the given method
    #[must_use]
    pub fn last_body(&self, method: Method) -> Option<Object> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == method)
            .and_then(|r| r.body.clone())
    }

    fn record(&self, method: Method, path: &str, mkey: Option<&str>, body: Option<&Object>) {
        debug!("{method:?} {}", location(path, mkey));
        self.requests.lock().push(Request {
            method,
            path: path.to_owned(),
            mkey: mkey.map(str::to_owned),
            body: body.cloned(),
        });
    }
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl Client for MemoryClient {
    async fn device_version(&self) -> Result<String, ClientError> {
        Ok(self.version.lock().clone())
    }

    async fn create(&self, path: &str, body: &Object) -> Result<Object, ClientError> {
        self.record(Method::Create, path, None, Some(body));
        let mkey_field = self.tables.get(path).ok_or_else(|| ClientError::Api {
            status: 405,
            message: format!("{path} is not a table"),
        })?;
        let mkey = body
            .get(mkey_field)
            .and_then(key_text)
            .ok_or_else(|| ClientError::Api {
                status: 400,
                message: format!("missing key field '{mkey_field}'"),
            })?;

        let mut objects = self.objects.lock();
        let key = (path.to_owned(), Some(mkey.clone()));
        if objects.contains_key(&key) {
            return Err(ClientError::Api {
                status: 500,
                message: format!("entry {} already exists", location(path, Some(&mkey))),
            });
        }
        objects.insert(key, body.clone());

        let mut response = Object::new();
        response.insert("mkey".to_owned(), Value::String(mkey));
        Ok(response)
    }

    async fn read(&self, path: &str, mkey: Option<&str>) -> Result<Object, ClientError> {
        self.record(Method::Read, path, mkey, None);
        self.get(path, mkey)
            .ok_or_else(|| ClientError::NotFound(location(path, mkey)))
    }

    async fn update(
        &self,
        path: &str,
        mkey: Option<&str>,
        body: &Object,
    ) -> Result<Object, ClientError> {
        self.record(Method::Update, path, mkey, Some(body));
        let mut objects = self.objects.lock();
        let key = (path.to_owned(), mkey.map(str::to_owned));
        // singletons always exist
        if mkey.is_none() {
            objects.entry(key.clone()).or_default();
        }
        if !objects.contains_key(&key) {
            return Err(ClientError::NotFound(location(path, mkey)));
        }

        // changing the key field of a table entry renames it, never onto another entry
        let renamed = self
            .tables
            .get(path)
            .and_then(|field| body.get(field))
            .and_then(key_text)
            .filter(|new| mkey.is_some_and(|old| old != new.as_str()));
        if let Some(new) = renamed.as_deref()
            && objects.contains_key(&(path.to_owned(), Some(new.to_owned())))
        {
            return Err(ClientError::Api {
                status: 500,
                message: format!("entry {} already exists", location(path, Some(new))),
            });
        }

        let Some(mut object) = objects.remove(&key) else {
            return Err(ClientError::NotFound(location(path, mkey)));
        };
        for (field, value) in body {
            object.insert(field.clone(), value.clone());
        }
        let key = renamed.clone().map_or(key, |new| (path.to_owned(), Some(new)));
        objects.insert(key, object);

        let mut response = Object::new();
        if let Some(mkey) = renamed.as_deref().or(mkey) {
            response.insert("mkey".to_owned(), Value::String(mkey.to_owned()));
        }
        Ok(response)
    }

    async fn delete(&self, path: &str, mkey: &str) -> Result<(), ClientError> {
        self.record(Method::Delete, path, Some(mkey), None);
        self.objects
            .lock()
            .remove(&(path.to_owned(), Some(mkey.to_owned())))
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound(location(path, Some(mkey))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    fn client() -> MemoryClient {
        MemoryClient::new("v7.0.4").with_table("web-proxy/isolator-server", "name")
    }

    #[tokio::test]
    async fn test_table_lifecycle() {
        let client = client();
        let path = "web-proxy/isolator-server";

        let response = client
            .create(path, &obj(json!({"name": "iso1", "port": 8080})))
            .await
            .unwrap();
        assert_eq!(response.get("mkey"), Some(&json!("iso1")));

        let err = client
            .create(path, &obj(json!({"name": "iso1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));

        client
            .update(path, Some("iso1"), &obj(json!({"port": 8443})))
            .await
            .unwrap();
        assert_eq!(
            client.read(path, Some("iso1")).await.unwrap(),
            obj(json!({"name": "iso1", "port": 8443}))
        );
        assert_eq!(
            client.last_body(Method::Update),
            Some(obj(json!({"port": 8443})))
        );

        client.delete(path, "iso1").await.unwrap();
        assert!(client.read(path, Some("iso1")).await.unwrap_err().is_not_found());
        assert!(client.delete(path, "iso1").await.unwrap_err().is_not_found());
        assert_eq!(client.requests().len(), 7);
    }

    #[tokio::test]
    async fn test_singleton_update() {
        let client = client();
        assert!(client.read("router/bgp", None).await.is_err());
        client
            .update("router/bgp", None, &obj(json!({"as": 65001})))
            .await
            .unwrap();
        client
            .update("router/bgp", None, &obj(json!({"router-id": "1.1.1.1"})))
            .await
            .unwrap();
        assert_eq!(
            client.get("router/bgp", None),
            Some(obj(json!({"as": 65001, "router-id": "1.1.1.1"})))
        );
        assert!(
            client
                .create("router/bgp", &obj(json!({"as": 1})))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_rename() {
        let client = client();
        let path = "web-proxy/isolator-server";
        client.insert(path, Some("iso1"), obj(json!({"name": "iso1", "port": 80})));
        let response = client
            .update(path, Some("iso1"), &obj(json!({"name": "iso2"})))
            .await
            .unwrap();
        assert_eq!(response.get("mkey"), Some(&json!("iso2")));
        assert_eq!(client.get(path, Some("iso1")), None);
        assert_eq!(
            client.get(path, Some("iso2")),
            Some(obj(json!({"name": "iso2", "port": 80})))
        );
    }

    #[tokio::test]
    async fn test_rename_onto_existing_entry() {
        let client = client();
        let path = "web-proxy/isolator-server";
        client.insert(path, Some("iso1"), obj(json!({"name": "iso1", "port": 80})));
        client.insert(path, Some("iso2"), obj(json!({"name": "iso2", "port": 81})));
        let err = client
            .update(path, Some("iso1"), &obj(json!({"name": "iso2", "port": 90})))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
        assert_eq!(
            client.get(path, Some("iso1")),
            Some(obj(json!({"name": "iso1", "port": 80})))
        );
        assert_eq!(
            client.get(path, Some("iso2")),
            Some(obj(json!({"name": "iso2", "port": 81})))
        );
    }

    #[tokio::test]
    async fn test_version() {
        let client = client();
        assert_eq!(client.device_version().await.unwrap(), "v7.0.4");
        client.set_version("v6.4.9");
        assert_eq!(client.device_version().await.unwrap(), "v6.4.9");
    }

    #[tokio::test]
    async fn test_create_requires_key() {
        let err = client()
            .create("web-proxy/isolator-server", &obj(json!({"port": 1})))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
    }
}
