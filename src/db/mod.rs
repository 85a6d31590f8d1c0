//! Tenant-scoped queries, one module per table. Every function that reads or
//! writes business rows takes the tenant id and filters on it.

pub mod asset_inspections;
pub mod assets;
pub mod audit;
pub mod banking_details;
pub mod beneficiaries;
pub mod claims;
pub mod dependents;
pub mod funeral_events;
pub mod members;
pub mod onboarding_fields;
pub mod onboarding_values;
pub mod permissions;
pub mod policies;
pub mod policy_enrollments;
pub mod profile_completions;
pub mod resource_bookings;
pub mod resources;
pub mod role_permissions;
pub mod roles;
pub mod tenant_settings;
pub mod tenants;
pub mod user_roles;
pub mod users;
pub mod widgets;
