// crates/unifi-network-filter/src/schema.rs
// ============================================================================
// Module: Field Schema Registry
// Description: Per-resource tables of filterable fields and allowed functions.
// Purpose: Provide immutable, process-wide schemas the validator checks
//          expressions against.
// Dependencies: crate::expr, crate::literal
// ============================================================================

//! ## Overview
//! Each listing resource exposes a fixed set of filterable fields. A field
//! declares its literal type and the set of filter functions the server
//! accepts for it. Schemas are defined once at startup, never mutated at
//! request time, and safe to share across threads.
//!
//! Resource dispatch is an explicit enumerated tag mapped to a static table,
//! not runtime type inspection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Deserialize;
use serde::Serialize;

use crate::expr::FilterFunction;
use crate::literal::LiteralKind;

// ============================================================================
// SECTION: Function Sets
// ============================================================================

/// Functions accepted on identity-like fields (UUIDs, enums).
const EQUALITY: &[FilterFunction] = &[
    FilterFunction::Eq,
    FilterFunction::Ne,
    FilterFunction::In,
    FilterFunction::NotIn,
];

/// Functions accepted on ordered fields (numbers, timestamps).
const ORDERED: &[FilterFunction] = &[
    FilterFunction::Eq,
    FilterFunction::Ne,
    FilterFunction::Gt,
    FilterFunction::Ge,
    FilterFunction::Lt,
    FilterFunction::Le,
    FilterFunction::In,
    FilterFunction::NotIn,
];

/// Functions accepted on required text fields.
const TEXT: &[FilterFunction] = &[
    FilterFunction::Eq,
    FilterFunction::Ne,
    FilterFunction::Like,
    FilterFunction::In,
    FilterFunction::NotIn,
];

/// Functions accepted on optional text fields.
const NULLABLE_TEXT: &[FilterFunction] = &[
    FilterFunction::Eq,
    FilterFunction::Ne,
    FilterFunction::Like,
    FilterFunction::In,
    FilterFunction::NotIn,
    FilterFunction::IsNull,
    FilterFunction::IsNotNull,
];

/// Functions accepted on optional ordered fields.
const NULLABLE_ORDERED: &[FilterFunction] = &[
    FilterFunction::Eq,
    FilterFunction::Ne,
    FilterFunction::Gt,
    FilterFunction::Ge,
    FilterFunction::Lt,
    FilterFunction::Le,
    FilterFunction::In,
    FilterFunction::NotIn,
    FilterFunction::IsNull,
    FilterFunction::IsNotNull,
];

/// Functions accepted on boolean fields.
const BOOLEAN: &[FilterFunction] = &[FilterFunction::Eq, FilterFunction::Ne];

/// Functions accepted on optional boolean fields.
const NULLABLE_BOOLEAN: &[FilterFunction] = &[
    FilterFunction::Eq,
    FilterFunction::Ne,
    FilterFunction::IsNull,
    FilterFunction::IsNotNull,
];

// ============================================================================
// SECTION: Resource Kinds
// ============================================================================

/// The listing resources that accept filter expressions.
///
/// # Invariants
/// - Variants are stable for schema lookup and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Managed network deployments.
    Site,
    /// Adopted devices on a site.
    Device,
    /// Connected clients on a site.
    Client,
    /// Hotspot vouchers on a site.
    Voucher,
}

impl ResourceKind {
    /// Returns a stable label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Device => "device",
            Self::Client => "client",
            Self::Voucher => "voucher",
        }
    }

    /// Returns the filter schema for this resource.
    #[must_use]
    pub fn schema(self) -> &'static ResourceSchema {
        match self {
            Self::Site => &SITE_SCHEMA,
            Self::Device => &DEVICE_SCHEMA,
            Self::Client => &CLIENT_SCHEMA,
            Self::Voucher => &VOUCHER_SCHEMA,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Schema Types
// ============================================================================

/// Filter rules for a single field.
///
/// # Invariants
/// - The function set never changes after schema construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Literal type the field compares against.
    kind: LiteralKind,
    /// Functions the server accepts for the field.
    functions: &'static [FilterFunction],
}

impl FieldRule {
    /// Builds a field rule.
    #[must_use]
    pub const fn new(kind: LiteralKind, functions: &'static [FilterFunction]) -> Self {
        Self {
            kind,
            functions,
        }
    }

    /// Returns the field's literal type.
    #[must_use]
    pub const fn kind(self) -> LiteralKind {
        self.kind
    }

    /// Returns whether the field accepts the given function.
    #[must_use]
    pub fn allows(self, function: FilterFunction) -> bool {
        self.functions.contains(&function)
    }
}

/// Immutable filter schema for one resource kind.
///
/// # Invariants
/// - Defined once per resource at startup; never mutated at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Resource this schema describes.
    resource: ResourceKind,
    /// Mapping from dotted field path to its filter rule.
    fields: BTreeMap<&'static str, FieldRule>,
}

impl ResourceSchema {
    /// Builds a schema from a field table.
    fn new(resource: ResourceKind, entries: &[(&'static str, FieldRule)]) -> Self {
        Self {
            resource,
            fields: entries.iter().copied().collect(),
        }
    }

    /// Returns the resource this schema describes.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        self.resource
    }

    /// Looks up the rule for a dotted field path.
    #[must_use]
    pub fn rule(&self, path: &str) -> Option<FieldRule> {
        self.fields.get(path).copied()
    }

    /// Returns the dotted paths of all filterable fields in order.
    pub fn field_paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }
}

// ============================================================================
// SECTION: Static Tables
// ============================================================================

/// Filter schema for sites.
static SITE_SCHEMA: LazyLock<ResourceSchema> = LazyLock::new(|| {
    ResourceSchema::new(ResourceKind::Site, &[
        ("id", FieldRule::new(LiteralKind::Uuid, EQUALITY)),
        ("internalReference", FieldRule::new(LiteralKind::String, NULLABLE_TEXT)),
        ("name", FieldRule::new(LiteralKind::String, TEXT)),
    ])
});

/// Filter schema for adopted devices.
static DEVICE_SCHEMA: LazyLock<ResourceSchema> = LazyLock::new(|| {
    ResourceSchema::new(ResourceKind::Device, &[
        ("adoptedAt", FieldRule::new(LiteralKind::Timestamp, NULLABLE_ORDERED)),
        ("firmwareUpdatable", FieldRule::new(LiteralKind::Boolean, NULLABLE_BOOLEAN)),
        ("firmwareVersion", FieldRule::new(LiteralKind::String, NULLABLE_TEXT)),
        ("id", FieldRule::new(LiteralKind::Uuid, EQUALITY)),
        ("ipAddress", FieldRule::new(LiteralKind::String, NULLABLE_TEXT)),
        ("macAddress", FieldRule::new(LiteralKind::String, TEXT)),
        ("model", FieldRule::new(LiteralKind::String, TEXT)),
        ("name", FieldRule::new(LiteralKind::String, TEXT)),
        ("provisionedAt", FieldRule::new(LiteralKind::Timestamp, NULLABLE_ORDERED)),
        ("state", FieldRule::new(LiteralKind::String, EQUALITY)),
        ("uplink.deviceId", FieldRule::new(LiteralKind::Uuid, EQUALITY)),
    ])
});

/// Filter schema for connected clients.
static CLIENT_SCHEMA: LazyLock<ResourceSchema> = LazyLock::new(|| {
    ResourceSchema::new(ResourceKind::Client, &[
        ("access.authorized", FieldRule::new(LiteralKind::Boolean, NULLABLE_BOOLEAN)),
        ("access.type", FieldRule::new(LiteralKind::String, EQUALITY)),
        ("connectedAt", FieldRule::new(LiteralKind::Timestamp, ORDERED)),
        ("id", FieldRule::new(LiteralKind::Uuid, EQUALITY)),
        ("ipAddress", FieldRule::new(LiteralKind::String, NULLABLE_TEXT)),
        ("macAddress", FieldRule::new(LiteralKind::String, TEXT)),
        ("name", FieldRule::new(LiteralKind::String, NULLABLE_TEXT)),
        ("type", FieldRule::new(LiteralKind::String, EQUALITY)),
        ("uplinkDeviceId", FieldRule::new(LiteralKind::Uuid, EQUALITY)),
    ])
});

/// Filter schema for hotspot vouchers.
static VOUCHER_SCHEMA: LazyLock<ResourceSchema> = LazyLock::new(|| {
    ResourceSchema::new(ResourceKind::Voucher, &[
        ("activatedAt", FieldRule::new(LiteralKind::Timestamp, NULLABLE_ORDERED)),
        ("authorizedGuestCount", FieldRule::new(LiteralKind::Number, ORDERED)),
        ("authorizedGuestLimit", FieldRule::new(LiteralKind::Number, ORDERED)),
        ("code", FieldRule::new(LiteralKind::Number, ORDERED)),
        ("createdAt", FieldRule::new(LiteralKind::Timestamp, ORDERED)),
        ("dataUsageLimitMBytes", FieldRule::new(LiteralKind::Number, NULLABLE_ORDERED)),
        ("expired", FieldRule::new(LiteralKind::Boolean, BOOLEAN)),
        ("expiresAt", FieldRule::new(LiteralKind::Timestamp, NULLABLE_ORDERED)),
        ("id", FieldRule::new(LiteralKind::Uuid, EQUALITY)),
        ("name", FieldRule::new(LiteralKind::String, TEXT)),
        ("rxRateLimitKbps", FieldRule::new(LiteralKind::Number, NULLABLE_ORDERED)),
        ("timeLimitMinutes", FieldRule::new(LiteralKind::Number, ORDERED)),
        ("txRateLimitKbps", FieldRule::new(LiteralKind::Number, NULLABLE_ORDERED)),
    ])
});
