// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Isolator servers for explicit web proxies (`web-proxy/isolator-server`)

use schema::{Access, FieldDescriptor, FieldKind, ResourceSchema};

pub const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("name", FieldKind::String { max_len: Some(63) }, Access::Required),
    FieldDescriptor::new(
        "addr_type",
        FieldKind::Enum(&["ip", "ipv6", "fqdn"]),
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "ip",
        FieldKind::String { max_len: Some(15) },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "ip6",
        FieldKind::String { max_len: Some(45) },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "fqdn",
        FieldKind::String { max_len: Some(255) },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "port",
        FieldKind::Integer {
            min: Some(1),
            max: Some(65535),
        },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "interface_select_method",
        FieldKind::Enum(&["auto", "sdwan", "specify"]),
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "interface",
        FieldKind::String { max_len: Some(15) },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "vrf_select",
        FieldKind::SentinelTimer { min: 0, max: 511 },
        Access::OptionalComputed,
    ),
    FieldDescriptor::new(
        "comment",
        FieldKind::String {
            max_len: Some(1023),
        },
        Access::Optional,
    ),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_web_proxy_isolator_server",
    path: "web-proxy/isolator-server",
    mkey: Some("name"),
    fields: FIELDS,
};
