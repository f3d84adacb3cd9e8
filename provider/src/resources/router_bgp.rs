// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Global BGP settings (`router/bgp`). A singleton: there is exactly one per VDOM.

use schema::{Access, FieldDescriptor, FieldKind, ResourceSchema};

use super::router_bgp_neighbor;

const NETWORK_ID: FieldKind = FieldKind::Integer {
    min: Some(0),
    max: Some(4_294_967_295),
};
const ROUTE_MAP: FieldKind = FieldKind::String { max_len: Some(35) };

const NETWORK: &[FieldDescriptor] = &[
    FieldDescriptor::new("id", NETWORK_ID, Access::Required),
    FieldDescriptor::new("prefix", FieldKind::Cidr { ipv6: false }, Access::OptionalComputed),
    FieldDescriptor::new("backdoor", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "network_import_check",
        FieldKind::Enum(&["global", "enable", "disable"]),
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("route_map", ROUTE_MAP, Access::Optional),
];

const NETWORK6: &[FieldDescriptor] = &[
    FieldDescriptor::new("id", NETWORK_ID, Access::Required),
    FieldDescriptor::new("prefix6", FieldKind::Cidr { ipv6: true }, Access::OptionalComputed),
    FieldDescriptor::new("backdoor", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new("route_map", ROUTE_MAP, Access::Optional),
];

const DISTANCE: FieldKind = FieldKind::Integer {
    min: Some(1),
    max: Some(255),
};

pub const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        "as",
        FieldKind::Integer {
            min: Some(0),
            max: Some(4_294_967_295),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "router_id",
        FieldKind::String { max_len: Some(15) },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "keepalive_timer",
        FieldKind::SentinelTimer { min: 0, max: 65535 },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "holdtime_timer",
        FieldKind::SentinelTimer { min: 3, max: 65535 },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("always_compare_med", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "bestpath_as_path_ignore",
        FieldKind::Toggle,
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "cluster_id",
        FieldKind::String { max_len: Some(15) },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("ebgp_multipath", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new("ibgp_multipath", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "log_neighbour_changes",
        FieldKind::Toggle,
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("graceful_restart", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "graceful_restart_time",
        FieldKind::Integer {
            min: Some(1),
            max: Some(3600),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("distance_external", DISTANCE, Access::OptionalComputed),
    FieldDescriptor::new("distance_internal", DISTANCE, Access::OptionalComputed),
    FieldDescriptor::new("distance_local", DISTANCE, Access::OptionalComputed),
    FieldDescriptor::new(
        "scan_time",
        FieldKind::Integer {
            min: Some(5),
            max: Some(60),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "neighbor",
        FieldKind::Table(router_bgp_neighbor::FIELDS),
        Access::Optional,
    ),
    FieldDescriptor::new("network", FieldKind::Table(NETWORK), Access::Optional),
    FieldDescriptor::new("network6", FieldKind::Table(NETWORK6), Access::Optional),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_router_bgp",
    path: "router/bgp",
    mkey: None,
    fields: FIELDS,
};
