// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The managed resource types

pub mod router_bgp;
pub mod router_bgp_neighbor;
pub mod web_proxy_isolator_server;

use crate::resource::{DataSource, Resource};

/// Every resource type, by type name
pub static RESOURCES: &[Resource] = &[
    Resource::new(&router_bgp::SCHEMA),
    Resource::new(&router_bgp_neighbor::SCHEMA),
    Resource::new(&web_proxy_isolator_server::SCHEMA),
];

/// Every data source type, by type name
pub static DATA_SOURCES: &[DataSource] =
    &[DataSource::new(&router_bgp_neighbor::DATA_SOURCE_SCHEMA)];

#[must_use]
pub fn resource(type_name: &str) -> Option<&'static Resource> {
    RESOURCES.iter().find(|r| r.type_name() == type_name)
}

#[must_use]
pub fn data_source(type_name: &str) -> Option<&'static DataSource> {
    DATA_SOURCES
        .iter()
        .find(|d| d.schema().type_name == type_name)
}
