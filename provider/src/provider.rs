// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! A configured provider: an appliance client plus what was learnt about the appliance

use std::sync::Arc;

use client::{Client, Object};
use convert::TranslationContext;
use tracing::info;
use version::DeviceVersion;

use crate::config::ProviderConfig;
use crate::errors::ProviderError;
use crate::resource::{DataSource, Resource, State};
use crate::resources;

pub struct Provider {
    config: ProviderConfig,
    client: Arc<dyn Client>,
    ctx: TranslationContext,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("config", &self.config)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl Provider {
    /// Validate the configuration and settle the firmware version of the appliance.
    /// A version set in the configuration wins over the one the appliance reports;
    /// either way it is resolved once here and used for every later translation.
    pub async fn configure(
        config: ProviderConfig,
        client: Arc<dyn Client>,
    ) -> Result<Self, ProviderError> {
        config.validate()?;
        let reported = match &config.device_version {
            Some(version) => version.clone(),
            None => client.device_version().await?,
        };
        let version: DeviceVersion = reported.parse()?;
        info!("managing {} running {version}", config.hostname);
        Ok(Self {
            config,
            client,
            ctx: TranslationContext::new(version),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[must_use]
    pub fn context(&self) -> &TranslationContext {
        &self.ctx
    }

    #[must_use]
    pub fn client(&self) -> &dyn Client {
        self.client.as_ref()
    }

    /// Look up a resource type
    #[allow(clippy::unused_self)]
    pub fn resource(&self, type_name: &str) -> Result<&'static Resource, ProviderError> {
        resources::resource(type_name)
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_owned()))
    }

    /// Look up a data source type
    #[allow(clippy::unused_self)]
    pub fn data_source(&self, type_name: &str) -> Result<&'static DataSource, ProviderError> {
        resources::data_source(type_name)
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_owned()))
    }

    pub async fn create(&self, type_name: &str, config: &Object) -> Result<State, ProviderError> {
        self.resource(type_name)?
            .create(self.client(), &self.ctx, config)
            .await
    }

    pub async fn read(
        &self,
        type_name: &str,
        state: &State,
    ) -> Result<Option<State>, ProviderError> {
        self.resource(type_name)?
            .read(self.client(), &self.ctx, &state.id, Some(&state.attributes))
            .await
    }

    pub async fn update(
        &self,
        type_name: &str,
        state: &State,
        config: &Object,
    ) -> Result<State, ProviderError> {
        self.resource(type_name)?
            .update(self.client(), &self.ctx, &state.id, config)
            .await
    }

    pub async fn delete(&self, type_name: &str, state: &State) -> Result<(), ProviderError> {
        self.resource(type_name)?
            .delete(self.client(), &self.ctx, state)
            .await
    }

    pub async fn lookup(&self, type_name: &str, key: &str) -> Result<State, ProviderError> {
        self.data_source(type_name)?
            .read(self.client(), &self.ctx, key)
            .await
    }
}
