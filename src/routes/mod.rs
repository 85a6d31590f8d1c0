pub mod assets;
pub mod audit;
pub mod auth;
pub mod funeral_events;
pub mod members;
pub mod onboarding;
pub mod policies;
pub mod rbac;
pub mod resources;
pub mod tenants;
pub mod users;
pub mod widgets;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/Auth/Auth_Register", post(auth::register))
        .route("/api/Auth/Auth_Login", post(auth::login))
        .route("/api/Auth/Auth_Me", get(auth::me))
        // Tenants
        .route("/api/Tenant/Tenant_List", get(tenants::list))
        .route("/api/Tenant/Tenant_Create", post(tenants::create))
        .route("/api/Tenant/Tenant_Current", get(tenants::current))
        .route("/api/Tenant/Tenant_Get/{id}", get(tenants::get))
        .route("/api/Tenant/Tenant_Update/{id}", put(tenants::update))
        .route("/api/TenantSetting/TenantSetting_List", get(tenants::list_settings))
        .route("/api/TenantSetting/TenantSetting_Upsert", put(tenants::upsert_setting))
        .route(
            "/api/TenantSetting/TenantSetting_Delete/{key}",
            delete(tenants::delete_setting),
        )
        // Users
        .route("/api/User/User_List", get(users::list))
        .route("/api/User/User_Create", post(users::create))
        .route("/api/User/User_Get/{id}", get(users::get))
        .route("/api/User/User_Update/{id}", put(users::update))
        .route("/api/User/User_Delete/{id}", delete(users::delete))
        .route("/api/User/User_ResetPassword/{id}", post(users::reset_password))
        // Roles and permissions
        .route("/api/Role/Role_List", get(rbac::list_roles))
        .route("/api/Role/Role_Create", post(rbac::create_role))
        .route("/api/Role/Role_Get/{id}", get(rbac::get_role))
        .route("/api/Role/Role_Update/{id}", put(rbac::update_role))
        .route("/api/Role/Role_Delete/{id}", delete(rbac::delete_role))
        .route("/api/Permission/Permission_List", get(rbac::list_permissions))
        .route("/api/Permission/Permission_Create", post(rbac::create_permission))
        .route("/api/Permission/Permission_Get/{id}", get(rbac::get_permission))
        .route("/api/Permission/Permission_Update/{id}", put(rbac::update_permission))
        .route("/api/Permission/Permission_Delete/{id}", delete(rbac::delete_permission))
        .route("/api/RolePermission/RolePermission_Grant", post(rbac::grant_permission))
        .route(
            "/api/RolePermission/RolePermission_ListByRole/{role_id}",
            get(rbac::list_role_permissions),
        )
        .route(
            "/api/RolePermission/RolePermission_Revoke/{id}",
            delete(rbac::revoke_permission),
        )
        .route("/api/UserRole/UserRole_Assign", post(rbac::assign_role))
        .route(
            "/api/UserRole/UserRole_ListByUser/{user_id}",
            get(rbac::list_user_roles),
        )
        .route("/api/UserRole/UserRole_Remove/{id}", delete(rbac::remove_role))
        // Members
        .route("/api/Member/Member_List", get(members::list))
        .route("/api/Member/Member_Create", post(members::create))
        .route("/api/Member/Member_Get/{id}", get(members::get))
        .route("/api/Member/Member_Update/{id}", put(members::update))
        .route("/api/Member/Member_Delete/{id}", delete(members::delete))
        .route(
            "/api/Beneficiary/Beneficiary_ListByMember/{member_id}",
            get(members::list_beneficiaries),
        )
        .route("/api/Beneficiary/Beneficiary_Create", post(members::create_beneficiary))
        .route("/api/Beneficiary/Beneficiary_Get/{id}", get(members::get_beneficiary))
        .route("/api/Beneficiary/Beneficiary_Update/{id}", put(members::update_beneficiary))
        .route(
            "/api/Beneficiary/Beneficiary_Delete/{id}",
            delete(members::delete_beneficiary),
        )
        .route(
            "/api/Dependent/Dependent_ListByMember/{member_id}",
            get(members::list_dependents),
        )
        .route("/api/Dependent/Dependent_Create", post(members::create_dependent))
        .route("/api/Dependent/Dependent_Get/{id}", get(members::get_dependent))
        .route("/api/Dependent/Dependent_Update/{id}", put(members::update_dependent))
        .route("/api/Dependent/Dependent_Delete/{id}", delete(members::delete_dependent))
        .route(
            "/api/BankingDetail/BankingDetail_ListByMember/{member_id}",
            get(members::list_banking_details),
        )
        .route(
            "/api/BankingDetail/BankingDetail_Create",
            post(members::create_banking_detail),
        )
        .route(
            "/api/BankingDetail/BankingDetail_Get/{id}",
            get(members::get_banking_detail),
        )
        .route(
            "/api/BankingDetail/BankingDetail_Update/{id}",
            put(members::update_banking_detail),
        )
        .route(
            "/api/BankingDetail/BankingDetail_Delete/{id}",
            delete(members::delete_banking_detail),
        )
        // Policies and claims
        .route("/api/Policy/Policy_List", get(policies::list))
        .route("/api/Policy/Policy_Create", post(policies::create))
        .route("/api/Policy/Policy_Get/{id}", get(policies::get))
        .route("/api/Policy/Policy_Update/{id}", put(policies::update))
        .route("/api/Policy/Policy_Delete/{id}", delete(policies::delete))
        .route("/api/PolicyEnrollment/PolicyEnrollment_List", get(policies::list_enrollments))
        .route(
            "/api/PolicyEnrollment/PolicyEnrollment_Create",
            post(policies::create_enrollment),
        )
        .route(
            "/api/PolicyEnrollment/PolicyEnrollment_Get/{id}",
            get(policies::get_enrollment),
        )
        .route(
            "/api/PolicyEnrollment/PolicyEnrollment_Update/{id}",
            put(policies::update_enrollment),
        )
        .route(
            "/api/PolicyEnrollment/PolicyEnrollment_Delete/{id}",
            delete(policies::delete_enrollment),
        )
        .route("/api/Claim/Claim_List", get(policies::list_claims))
        .route("/api/Claim/Claim_Create", post(policies::create_claim))
        .route("/api/Claim/Claim_Get/{id}", get(policies::get_claim))
        .route("/api/Claim/Claim_Update/{id}", put(policies::update_claim))
        .route("/api/Claim/Claim_Delete/{id}", delete(policies::delete_claim))
        // Assets
        .route("/api/Asset/Asset_List", get(assets::list))
        .route("/api/Asset/Asset_Create", post(assets::create))
        .route("/api/Asset/Asset_Get/{id}", get(assets::get))
        .route("/api/Asset/Asset_Update/{id}", put(assets::update))
        .route("/api/Asset/Asset_Delete/{id}", delete(assets::delete))
        .route("/api/Asset/Asset_Checkout/{id}", post(assets::check_out))
        .route("/api/Asset/Asset_Return/{id}", post(assets::return_asset))
        .route("/api/Asset/Asset_ListCheckouts/{id}", get(assets::list_checkouts))
        .route(
            "/api/AssetInspectionLog/AssetInspectionLog_Create",
            post(assets::create_inspection),
        )
        .route(
            "/api/AssetInspectionLog/AssetInspectionLog_ListByAsset/{asset_id}",
            get(assets::list_inspections),
        )
        .route(
            "/api/AssetInspectionLog/AssetInspectionLog_Get/{id}",
            get(assets::get_inspection),
        )
        .route(
            "/api/AssetInspectionLog/AssetInspectionLog_Delete/{id}",
            delete(assets::delete_inspection),
        )
        // Resources
        .route("/api/Resource/Resource_List", get(resources::list))
        .route("/api/Resource/Resource_Create", post(resources::create))
        .route("/api/Resource/Resource_Get/{id}", get(resources::get))
        .route("/api/Resource/Resource_Update/{id}", put(resources::update))
        .route("/api/Resource/Resource_Delete/{id}", delete(resources::delete))
        .route("/api/ResourceBooking/ResourceBooking_List", get(resources::list_bookings))
        .route(
            "/api/ResourceBooking/ResourceBooking_Create",
            post(resources::create_booking),
        )
        .route(
            "/api/ResourceBooking/ResourceBooking_Get/{id}",
            get(resources::get_booking),
        )
        .route(
            "/api/ResourceBooking/ResourceBooking_Update/{id}",
            put(resources::update_booking),
        )
        .route(
            "/api/ResourceBooking/ResourceBooking_Delete/{id}",
            delete(resources::delete_booking),
        )
        // Funeral events
        .route("/api/FuneralEvent/FuneralEvent_List", get(funeral_events::list))
        .route(
            "/api/FuneralEvent/FuneralEvent_ListByClaim/{claim_id}",
            get(funeral_events::list_by_claim),
        )
        .route("/api/FuneralEvent/FuneralEvent_Create", post(funeral_events::create))
        .route("/api/FuneralEvent/FuneralEvent_Get/{id}", get(funeral_events::get))
        .route("/api/FuneralEvent/FuneralEvent_Update/{id}", put(funeral_events::update))
        .route("/api/FuneralEvent/FuneralEvent_Delete/{id}", delete(funeral_events::delete))
        // Onboarding
        .route(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_List",
            get(onboarding::list_fields),
        )
        .route(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_GetForm",
            get(onboarding::get_form),
        )
        .route(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Create",
            post(onboarding::create_field),
        )
        .route(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Get/{id}",
            get(onboarding::get_field),
        )
        .route(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Update/{id}",
            put(onboarding::update_field),
        )
        .route(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Delete/{id}",
            delete(onboarding::delete_field),
        )
        .route(
            "/api/Onboarding/Onboarding_SaveMemberData/{member_id}",
            put(onboarding::save_member_data),
        )
        .route(
            "/api/Onboarding/Onboarding_GetMemberData/{member_id}",
            get(onboarding::get_member_data),
        )
        .route(
            "/api/MemberProfileCompletion/MemberProfileCompletion_List",
            get(onboarding::list_completions),
        )
        .route(
            "/api/MemberProfileCompletion/MemberProfileCompletion_Get/{member_id}",
            get(onboarding::get_completion),
        )
        // Dashboard widgets
        .route(
            "/api/DashboardWidgetSetting/DashboardWidgetSetting_List",
            get(widgets::list),
        )
        .route(
            "/api/DashboardWidgetSetting/DashboardWidgetSetting_GetVisible",
            get(widgets::get_visible),
        )
        .route(
            "/api/DashboardWidgetSetting/DashboardWidgetSetting_Create",
            post(widgets::create),
        )
        .route(
            "/api/DashboardWidgetSetting/DashboardWidgetSetting_Get/{id}",
            get(widgets::get),
        )
        .route(
            "/api/DashboardWidgetSetting/DashboardWidgetSetting_Update/{id}",
            put(widgets::update),
        )
        .route(
            "/api/DashboardWidgetSetting/DashboardWidgetSetting_Delete/{id}",
            delete(widgets::delete),
        )
        // Audit
        .route("/api/AuditEvent/AuditEvent_List", get(audit::list))
}
