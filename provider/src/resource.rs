// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Resource handlers

use client::{Client, Object, location};
use convert::{ExpandMode, TranslationContext, expand, flatten};
use schema::ResourceSchema;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::ProviderError;

/// Meta argument asking singletons to be cleared on destroy
pub const FORCE_DESTROY: &str = "force_destroy";

/// What is kept about a managed object between runs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub id: String,
    pub attributes: Object,
}

impl State {
    #[must_use]
    pub fn force_destroy(&self) -> bool {
        self.attributes
            .get(FORCE_DESTROY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// The handlers of one managed resource type
#[derive(Debug)]
pub struct Resource {
    schema: &'static ResourceSchema,
}

// split the meta arguments off a configuration
fn split_meta(config: &Object) -> (Object, Option<Value>) {
    let mut config = config.clone();
    let force_destroy = config.remove(FORCE_DESTROY);
    config.remove("id");
    (config, force_destroy)
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Resource {
    #[must_use]
    pub const fn new(schema: &'static ResourceSchema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.schema.type_name
    }

    // singletons are addressed by path alone
    fn mkey<'a>(&self, id: &'a str) -> Option<&'a str> {
        self.schema.mkey.map(|_| id)
    }

    fn configured_key(&self, config: &Object) -> Option<String> {
        self.schema
            .mkey
            .and_then(|field| config.get(field))
            .and_then(key_text)
    }

    fn body(&self, config: &Object, ctx: &TranslationContext) -> Result<Object, ProviderError> {
        self.schema.validate_config(config)?;
        Ok(expand(self.schema, config, ctx, ExpandMode::Apply)?)
    }

    /// Bring a new object under management and return its state as read back.
    /// Singletons cannot be created: their configuration is applied instead.
    pub async fn create(
        &self,
        client: &dyn Client,
        ctx: &TranslationContext,
        config: &Object,
    ) -> Result<State, ProviderError> {
        let (config, force_destroy) = split_meta(config);
        let body = self.body(&config, ctx)?;

        let id = if self.schema.is_singleton() {
            client.update(self.schema.path, None, &body).await?;
            self.schema.type_name.to_owned()
        } else {
            let response = client.create(self.schema.path, &body).await?;
            response
                .get("mkey")
                .and_then(key_text)
                .or_else(|| self.configured_key(&config))
                .ok_or_else(|| ProviderError::MissingKey(self.schema.type_name.to_owned()))?
        };
        info!("created {}", location(self.schema.path, self.mkey(&id)));

        self.read_back(client, ctx, &id, &config, force_destroy).await
    }

    /// Refresh the state of an object. `Ok(None)` means the object is gone from the
    /// appliance and should be dropped from state.
    pub async fn read(
        &self,
        client: &dyn Client,
        ctx: &TranslationContext,
        id: &str,
        prior: Option<&Object>,
    ) -> Result<Option<State>, ProviderError> {
        let wire = match client.read(self.schema.path, self.mkey(id)).await {
            Ok(wire) => wire,
            Err(e) if e.is_not_found() => {
                warn!("{} {id} not found, removing from state", self.schema.type_name);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let mut attributes = flatten(self.schema, &wire, prior, ctx)?;
        if let Some(force_destroy) = prior.and_then(|p| p.get(FORCE_DESTROY)) {
            attributes.insert(FORCE_DESTROY.to_owned(), force_destroy.clone());
        }
        Ok(Some(State {
            id: id.to_owned(),
            attributes,
        }))
    }

    /// Apply a changed configuration to an existing object. Renaming a table entry
    /// moves the state to the new key.
    pub async fn update(
        &self,
        client: &dyn Client,
        ctx: &TranslationContext,
        id: &str,
        config: &Object,
    ) -> Result<State, ProviderError> {
        let (config, force_destroy) = split_meta(config);
        let body = self.body(&config, ctx)?;
        client.update(self.schema.path, self.mkey(id), &body).await?;
        debug!("updated {}", location(self.schema.path, self.mkey(id)));

        let id = self
            .configured_key(&config)
            .unwrap_or_else(|| id.to_owned());
        self.read_back(client, ctx, &id, &config, force_destroy).await
    }

    /// Stop managing an object. Table entries are deleted. Singletons cannot be
    /// deleted: with `force_destroy` their child tables are emptied, otherwise they
    /// are left untouched.
    pub async fn delete(
        &self,
        client: &dyn Client,
        ctx: &TranslationContext,
        state: &State,
    ) -> Result<(), ProviderError> {
        if self.schema.is_singleton() {
            if state.force_destroy() {
                let body = expand(self.schema, &state.attributes, ctx, ExpandMode::Clear)?;
                client.update(self.schema.path, None, &body).await?;
                info!("cleared {}", self.schema.path);
            } else {
                debug!("{} left on the appliance", self.schema.path);
            }
            return Ok(());
        }

        match client.delete(self.schema.path, &state.id).await {
            Ok(()) => {
                info!("deleted {}", location(self.schema.path, Some(&state.id)));
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("{} already gone", location(self.schema.path, Some(&state.id)));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn read_back(
        &self,
        client: &dyn Client,
        ctx: &TranslationContext,
        id: &str,
        config: &Object,
        force_destroy: Option<Value>,
    ) -> Result<State, ProviderError> {
        let mut prior = config.clone();
        if let Some(force_destroy) = force_destroy {
            prior.insert(FORCE_DESTROY.to_owned(), force_destroy);
        }
        self.read(client, ctx, id, Some(&prior))
            .await?
            .ok_or_else(|| ProviderError::Vanished(location(self.schema.path, self.mkey(id))))
    }
}

/// A read-only lookup of one table entry by key
#[derive(Debug)]
pub struct DataSource {
    schema: &'static ResourceSchema,
}

impl DataSource {
    #[must_use]
    pub const fn new(schema: &'static ResourceSchema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Look an entry up. Unlike resources, a missing entry is an error.
    pub async fn read(
        &self,
        client: &dyn Client,
        ctx: &TranslationContext,
        key: &str,
    ) -> Result<State, ProviderError> {
        let Some(mkey) = self.schema.mkey.filter(|_| !key.is_empty()) else {
            return Err(ProviderError::MissingKey(self.schema.type_name.to_owned()));
        };
        if let Some(field) = self.schema.field(mkey) {
            field.validate(mkey, &Value::String(key.to_owned()))?;
        }
        let wire = client.read(self.schema.path, Some(key)).await?;
        Ok(State {
            id: key.to_owned(),
            attributes: flatten(self.schema, &wire, None, ctx)?,
        })
    }
}
