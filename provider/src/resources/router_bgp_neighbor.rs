// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! BGP neighbors, managed one by one (`router.bgp/neighbor`) or inline in `router/bgp`

use schema::{Access, FieldDescriptor, FieldKind, ResourceSchema};

const ROUTE_MAP: FieldKind = FieldKind::String { max_len: Some(35) };
const INTERFACE: FieldKind = FieldKind::String { max_len: Some(15) };
const TIMER: FieldKind = FieldKind::SentinelTimer { min: 0, max: 65535 };

/// Route maps of a conditional advertisement were a single name before 7.0.4
pub const CONDITION_ROUTEMAP_SINCE: &[(&str, &[&str])] = &[(">=", &["7.0.4"])];

const CONDITIONAL_ADVERTISE: &[FieldDescriptor] = &[
    FieldDescriptor::new("advertise_routemap", ROUTE_MAP, Access::Required),
    FieldDescriptor::new(
        "condition_routemap",
        FieldKind::VersionedNames {
            constraints: CONDITION_ROUTEMAP_SINCE,
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "condition_type",
        FieldKind::Enum(&["exist", "non-exist"]),
        Access::OptionalComputed,
    ),
];

/// The fields of a neighbor
pub const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("ip", FieldKind::String { max_len: Some(45) }, Access::Required),
    FieldDescriptor::new(
        "remote_as",
        FieldKind::Integer {
            min: Some(1),
            max: Some(4_294_967_295),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "description",
        FieldKind::String { max_len: Some(63) },
        Access::Optional,
    ),
    FieldDescriptor::new("activate", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new("activate6", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "advertisement_interval",
        FieldKind::Integer {
            min: Some(0),
            max: Some(600),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("bfd", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "capability_graceful_restart",
        FieldKind::Toggle,
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("connect_timer", TIMER, Access::OptionalComputed),
    FieldDescriptor::new(
        "ebgp_enforce_multihop",
        FieldKind::Toggle,
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "ebgp_multihop_ttl",
        FieldKind::Integer {
            min: Some(1),
            max: Some(255),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("keep_alive_timer", TIMER, Access::OptionalComputed),
    FieldDescriptor::new(
        "holdtime_timer",
        FieldKind::SentinelTimer { min: 3, max: 65535 },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("interface", INTERFACE, Access::Optional),
    FieldDescriptor::new("passive", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new("route_map_in", ROUTE_MAP, Access::Optional),
    FieldDescriptor::new("route_map_out", ROUTE_MAP, Access::Optional),
    FieldDescriptor::new("shutdown", FieldKind::Toggle, Access::OptionalComputed),
    FieldDescriptor::new(
        "soft_reconfiguration",
        FieldKind::Toggle,
        Access::OptionalComputed,
    ),
    FieldDescriptor::new("update_source", INTERFACE, Access::Optional),
    FieldDescriptor::new("weight", TIMER, Access::OptionalComputed),
    FieldDescriptor::new(
        "conditional_advertise",
        FieldKind::Table(CONDITIONAL_ADVERTISE),
        Access::Optional,
    ),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_router_bgp_neighbor",
    path: "router.bgp/neighbor",
    mkey: Some("ip"),
    fields: FIELDS,
};

static DATA_SOURCE_FIELDS: [FieldDescriptor; FIELDS.len()] = {
    let mut fields = [FIELDS[0]; FIELDS.len()];
    let mut n = 0;
    while n < FIELDS.len() {
        fields[n] = FIELDS[n].for_lookup();
        n += 1;
    }
    fields
};

pub static DATA_SOURCE_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_router_bgp_neighbor",
    path: "router.bgp/neighbor",
    mkey: Some("ip"),
    fields: &DATA_SOURCE_FIELDS,
};
