//! Table layouts for the UUID-keyed, tenant-scoped schema.
//!
//! `TABLES` is ordered so that every foreign key points at a table created
//! earlier in the list. Dropping walks the list backwards.

/// One managed table.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    /// Column and constraint definitions, without the audit columns.
    pub body: &'static str,
    /// Adds `created_at`, `updated_at`, `created_by`, `updated_by`.
    pub audited: bool,
}

impl TableDef {
    pub fn is_tenant_scoped(&self) -> bool {
        self.name != "tenants"
    }

    pub fn create_sql(&self, if_not_exists: bool) -> String {
        let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
        let audit = if self.audited {
            ",\n    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),\n    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),\n    created_by UUID,\n    updated_by UUID"
        } else {
            ",\n    created_at TIMESTAMPTZ NOT NULL DEFAULT now()"
        };
        format!(
            "CREATE TABLE {guard}{} (\n    {}{audit}\n)",
            self.name,
            self.body.trim()
        )
    }

    /// Index on `tenant_id`, the column every scoped query filters on.
    pub fn tenant_index_sql(&self) -> Option<String> {
        self.is_tenant_scoped().then(|| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{0}_tenant_id ON {0} (tenant_id)",
                self.name
            )
        })
    }

    /// Tables named in `REFERENCES` clauses.
    pub fn referenced_tables(&self) -> Vec<&'static str> {
        self.body
            .split("REFERENCES ")
            .skip(1)
            .filter_map(|rest| rest.split(|c: char| c == '(' || c.is_whitespace()).next())
            .collect()
    }
}

pub const TABLES: &[TableDef] = &[
    TableDef {
        name: "tenants",
        body: "
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE",
        audited: true,
    },
    TableDef {
        name: "users",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    name TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_system_admin BOOLEAN NOT NULL DEFAULT FALSE",
        audited: true,
    },
    TableDef {
        name: "permissions",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name TEXT NOT NULL,
    description TEXT,
    UNIQUE (name, tenant_id)",
        audited: true,
    },
    TableDef {
        name: "roles",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name TEXT NOT NULL,
    description TEXT,
    UNIQUE (name, tenant_id)",
        audited: true,
    },
    TableDef {
        name: "role_permissions",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    role_id UUID NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    permission_id UUID NOT NULL REFERENCES permissions(id) ON DELETE CASCADE,
    UNIQUE (role_id, permission_id)",
        audited: true,
    },
    TableDef {
        name: "user_roles",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role_id UUID NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    UNIQUE (user_id, role_id)",
        audited: true,
    },
    TableDef {
        name: "tenant_settings",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    setting_key TEXT NOT NULL,
    setting_value TEXT NOT NULL,
    UNIQUE (tenant_id, setting_key)",
        audited: true,
    },
    TableDef {
        name: "members",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    id_number TEXT,
    date_of_birth DATE,
    email TEXT,
    phone TEXT,
    address TEXT,
    status TEXT NOT NULL DEFAULT 'Active',
    join_date DATE NOT NULL DEFAULT CURRENT_DATE",
        audited: true,
    },
    TableDef {
        name: "beneficiaries",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    member_id UUID NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    full_name TEXT NOT NULL,
    relationship TEXT NOT NULL,
    id_number TEXT,
    phone TEXT,
    share_percentage DOUBLE PRECISION NOT NULL DEFAULT 100
        CHECK (share_percentage >= 0 AND share_percentage <= 100)",
        audited: true,
    },
    TableDef {
        name: "dependents",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    member_id UUID NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    full_name TEXT NOT NULL,
    relationship TEXT NOT NULL,
    date_of_birth DATE,
    id_number TEXT",
        audited: true,
    },
    TableDef {
        name: "banking_details",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    member_id UUID NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    bank_name TEXT NOT NULL,
    account_holder TEXT NOT NULL,
    account_number TEXT NOT NULL,
    branch_code TEXT,
    account_type TEXT",
        audited: true,
    },
    TableDef {
        name: "policies",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name TEXT NOT NULL,
    description TEXT,
    coverage_amount DOUBLE PRECISION NOT NULL,
    premium_amount DOUBLE PRECISION NOT NULL,
    status TEXT NOT NULL DEFAULT 'Active'",
        audited: true,
    },
    TableDef {
        name: "policy_enrollments",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    member_id UUID NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    policy_id UUID NOT NULL REFERENCES policies(id),
    enrollment_date DATE NOT NULL DEFAULT CURRENT_DATE,
    status TEXT NOT NULL DEFAULT 'Active',
    UNIQUE (member_id, policy_id)",
        audited: true,
    },
    TableDef {
        name: "claims",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    policy_id UUID NOT NULL REFERENCES policies(id),
    member_id UUID NOT NULL REFERENCES members(id),
    claim_number TEXT NOT NULL,
    deceased_name TEXT NOT NULL,
    date_of_death DATE,
    amount DOUBLE PRECISION NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'Submitted',
    UNIQUE (tenant_id, claim_number)",
        audited: true,
    },
    TableDef {
        name: "assets",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name TEXT NOT NULL,
    asset_type TEXT NOT NULL,
    serial_number TEXT,
    location TEXT,
    purchase_date DATE,
    status TEXT NOT NULL DEFAULT 'Available'
        CHECK (status IN ('Available', 'CheckedOut', 'UnderMaintenance', 'Retired'))",
        audited: true,
    },
    TableDef {
        name: "asset_checkouts",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    checked_out_to TEXT NOT NULL,
    checked_out_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    expected_return_at TIMESTAMPTZ,
    returned_at TIMESTAMPTZ,
    notes TEXT",
        audited: true,
    },
    TableDef {
        name: "asset_inspection_logs",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    inspected_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    inspector TEXT NOT NULL,
    condition TEXT NOT NULL,
    notes TEXT",
        audited: true,
    },
    TableDef {
        name: "resources",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name TEXT NOT NULL,
    resource_type TEXT NOT NULL,
    capacity INTEGER,
    is_active BOOLEAN NOT NULL DEFAULT TRUE",
        audited: true,
    },
    TableDef {
        name: "resource_bookings",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    resource_id UUID NOT NULL REFERENCES resources(id) ON DELETE CASCADE,
    booked_by TEXT NOT NULL,
    start_time TIMESTAMPTZ NOT NULL,
    end_time TIMESTAMPTZ NOT NULL,
    purpose TEXT,
    status TEXT NOT NULL DEFAULT 'Confirmed',
    CHECK (start_time < end_time)",
        audited: true,
    },
    TableDef {
        name: "funeral_events",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    claim_id UUID NOT NULL REFERENCES claims(id),
    title TEXT NOT NULL,
    event_date TIMESTAMPTZ NOT NULL,
    location TEXT,
    status TEXT NOT NULL DEFAULT 'Scheduled',
    asset_ids JSONB NOT NULL DEFAULT '[]',
    driver_ids JSONB NOT NULL DEFAULT '[]',
    decorator_ids JSONB NOT NULL DEFAULT '[]',
    notes TEXT",
        audited: true,
    },
    TableDef {
        name: "onboarding_field_configurations",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    field_key TEXT NOT NULL,
    label TEXT NOT NULL,
    field_type TEXT NOT NULL,
    placeholder TEXT,
    options JSONB,
    is_required BOOLEAN NOT NULL DEFAULT FALSE,
    is_enabled BOOLEAN NOT NULL DEFAULT TRUE,
    display_order INTEGER NOT NULL DEFAULT 0,
    UNIQUE (tenant_id, field_key)",
        audited: true,
    },
    TableDef {
        name: "member_onboarding_values",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    member_id UUID NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    field_key TEXT NOT NULL,
    value JSONB NOT NULL,
    UNIQUE (member_id, field_key)",
        audited: true,
    },
    TableDef {
        name: "dashboard_widget_settings",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    widget_key TEXT NOT NULL,
    title TEXT NOT NULL,
    is_visible BOOLEAN NOT NULL DEFAULT TRUE,
    display_order INTEGER NOT NULL DEFAULT 0,
    allowed_roles TEXT,
    UNIQUE (tenant_id, widget_key)",
        audited: true,
    },
    TableDef {
        name: "member_profile_completions",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    member_id UUID NOT NULL UNIQUE REFERENCES members(id) ON DELETE CASCADE,
    required_fields INTEGER NOT NULL,
    completed_fields INTEGER NOT NULL,
    completion_percentage DOUBLE PRECISION NOT NULL,
    is_complete BOOLEAN NOT NULL",
        audited: true,
    },
    TableDef {
        name: "audit_events",
        body: "
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    user_id UUID,
    action TEXT NOT NULL,
    resource_type TEXT NOT NULL,
    resource_id UUID,
    details JSONB",
        audited: false,
    },
];

/// Integer-keyed tables from the pre-UUID schema. Dropped before the
/// managed tables are recreated; absent ones are skipped.
pub const LEGACY_TABLES: &[&str] = &[
    "Tenants",
    "Users",
    "Roles",
    "Permissions",
    "UserRoles",
    "RolePermissions",
    "Members",
    "Beneficiaries",
    "Dependents",
    "MemberBankingDetails",
    "Policies",
    "PolicyEnrollments",
    "Claims",
    "Assets",
    "AssetCheckouts",
    "AssetInspectionLogs",
    "Resources",
    "ResourceBookings",
    "FuneralEvents",
    "OnboardingFieldConfigurations",
    "DashboardWidgetSettings",
    "MemberProfileCompletions",
];

pub fn table_names() -> Vec<&'static str> {
    TABLES.iter().map(|t| t.name).collect()
}

/// Drop order: managed tables children-first, then the legacy names.
pub fn drop_order() -> Vec<&'static str> {
    TABLES
        .iter()
        .rev()
        .map(|t| t.name)
        .chain(LEGACY_TABLES.iter().copied())
        .collect()
}
