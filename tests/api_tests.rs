mod common;

use parlour::assets::AssetStatus;
use parlour::models::AssetInput;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

fn keys(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["widgetKey"].as_str().unwrap().to_string())
        .collect()
}

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Registration & Auth ─────────────────────────────────────────

#[tokio::test]
async fn register_bootstrap_user() {
    let app = common::spawn_app().await;

    let (body, status) = app.register(common::ADMIN_EMAIL, common::PASSWORD, "Admin").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accessToken"].is_string());
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["user"]["isSystemAdmin"], true);
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(body["roles"], json!(["Admin"]));

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_second_user() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.register("other@test.com", common::PASSWORD, "Other").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("disabled"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = common::spawn_app().await;

    let (_, status) = app.register(common::ADMIN_EMAIL, "short", "Admin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_valid_credentials() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.login("ADMIN@test.com", common::PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accessToken"].is_string());
    assert_eq!(body["expiresIn"], 3600);

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_invalid_credentials() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (_, status) = app.login(common::ADMIN_EMAIL, "wrongpassword").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, status) = app.login("nobody@test.com", common::PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_rate_limited_after_repeated_failures() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    for _ in 0..5 {
        let (_, status) = app.login(common::ADMIN_EMAIL, "wrongpassword").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused inside the window
    let (_, status) = app.login(common::ADMIN_EMAIL, common::PASSWORD).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    common::cleanup(app).await;
}

#[tokio::test]
async fn me_returns_caller() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (body, status) = app.get_auth("/api/Auth/Auth_Me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], common::ADMIN_EMAIL);
    assert_eq!(body["tenantId"], body["user"]["tenantId"]);
    assert_eq!(body["roles"], json!(["Admin"]));

    common::cleanup(app).await;
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/api/Member/Member_List"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (_, status) = app.get_auth("/api/Member/Member_List", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Tenants ─────────────────────────────────────────────────────

#[tokio::test]
async fn tenant_create_seeds_admin_role_and_user() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;

    let (tenant_id, tenant_token) = app.create_tenant(&sys, "Second Parlour", "owner@second.com").await;

    let (tenant, status) = app.get_auth("/api/Tenant/Tenant_Current", &tenant_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tenant["id"], tenant_id.as_str());
    assert_eq!(tenant["slug"], "second-parlour");

    let (roles, _) = app.get_auth("/api/Role/Role_List", &tenant_token).await;
    let names: Vec<&str> = roles
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Admin"]);

    // Tenant admins are not system admins
    let (_, status) = app.get_auth("/api/Tenant/Tenant_List", &tenant_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (list, status) = app.get_auth("/api/Tenant/Tenant_List", &sys).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    common::cleanup(app).await;
}

#[tokio::test]
async fn tenant_create_rejects_duplicate_slug() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;

    app.create_tenant(&sys, "Second Parlour", "owner@second.com").await;
    let (_, status) = app
        .post_auth(
            "/api/Tenant/Tenant_Create",
            &sys,
            &json!({ "name": "Second Parlour" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

#[tokio::test]
async fn tenant_settings_upsert_and_delete() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let body = json!({ "settingKey": "currency", "settingValue": "ZAR" });
    let (first, status) = app.put_auth("/api/TenantSetting/TenantSetting_Upsert", &token, &body).await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({ "settingKey": "currency", "settingValue": "USD" });
    let (second, _) = app.put_auth("/api/TenantSetting/TenantSetting_Upsert", &token, &body).await;
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["settingValue"], "USD");

    let (_, status) = app
        .delete_auth("/api/TenantSetting/TenantSetting_Delete/currency", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app
        .delete_auth("/api/TenantSetting/TenantSetting_Delete/currency", &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Tenant isolation ────────────────────────────────────────────

#[tokio::test]
async fn records_are_invisible_across_tenants() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;
    let (tenant_b, token_b) = app.create_tenant(&sys, "Tenant B", "owner@b.com").await;

    let member_b = app.create_member(&token_b, "Lerato", "Dlamini").await;
    let member_b_id = member_b["id"].as_str().unwrap();
    let member_a = app.create_member(&sys, "Johan", "Botha").await;

    // Tenant A (the bootstrap tenant) never sees B's member
    let (list_a, _) = app.get_auth("/api/Member/Member_List", &sys).await;
    assert_eq!(ids(&list_a), vec![member_a["id"].as_str().unwrap().to_string()]);

    let (_, status) = app
        .get_auth(&format!("/api/Member/Member_Get/{member_b_id}"), &sys)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Tenant B only sees its own
    let (list_b, _) = app.get_auth("/api/Member/Member_List", &token_b).await;
    assert_eq!(ids(&list_b), vec![member_b_id.to_string()]);

    // Children of B's member are unreachable from A
    let (_, status) = app
        .get_auth(&format!("/api/Beneficiary/Beneficiary_ListByMember/{member_b_id}"), &sys)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A's claim is invisible to B
    let claim = app.create_claim(&sys, "CLM-001").await;
    let (claims_b, _) = app.get_auth("/api/Claim/Claim_List", &token_b).await;
    assert!(claims_b.as_array().unwrap().is_empty());
    let (_, status) = app
        .get_auth(&format!("/api/Claim/Claim_Get/{}", claim["id"].as_str().unwrap()), &token_b)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // System admin may switch tenant explicitly
    let (switched, status) = app
        .get_as_tenant("/api/Member/Member_List", &sys, &tenant_b)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&switched), vec![member_b_id.to_string()]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn tenant_header_is_checked() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;
    let (_, token_b) = app.create_tenant(&sys, "Tenant B", "owner@b.com").await;

    let (me, _) = app.get_auth("/api/Auth/Auth_Me", &sys).await;
    let tenant_a = me["tenantId"].as_str().unwrap().to_string();

    let (_, status) = app
        .get_as_tenant("/api/Member/Member_List", &token_b, &tenant_a)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, status) = app
        .get_as_tenant("/api/Member/Member_List", &sys, "not-a-uuid")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn tenant_header_must_name_existing_tenant() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;
    let (tenant_b, _) = app.create_tenant(&sys, "Tenant B", "owner@b.com").await;

    let missing = uuid::Uuid::now_v7().to_string();
    let (body, status) = app
        .get_as_tenant("/api/Member/Member_List", &sys, &missing)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tenant not found");

    let (_, status) = app
        .get_as_tenant("/api/DashboardWidgetSetting/DashboardWidgetSetting_List", &sys, &missing)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (list, status) = app
        .get_as_tenant("/api/Member/Member_List", &sys, &tenant_b)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    common::cleanup(app).await;
}

#[tokio::test]
async fn update_missing_or_foreign_record_is_not_found() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;
    let (_, token_b) = app.create_tenant(&sys, "Tenant B", "owner@b.com").await;

    let member_b = app.create_member(&token_b, "Lerato", "Dlamini").await;
    let member_b_id = member_b["id"].as_str().unwrap();
    let body = json!({ "firstName": "Hijacked", "lastName": "Member" });

    let missing = uuid::Uuid::now_v7();
    let (_, status) = app
        .put_auth(&format!("/api/Member/Member_Update/{missing}"), &sys, &body)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, status) = app
        .put_auth(&format!("/api/Member/Member_Update/{member_b_id}"), &sys, &body)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (unchanged, _) = app
        .get_auth(&format!("/api/Member/Member_Get/{member_b_id}"), &token_b)
        .await;
    assert_eq!(unchanged["firstName"], "Lerato");

    let (_, status) = app
        .delete_auth(&format!("/api/Member/Member_Delete/{member_b_id}"), &sys)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn delete_twice_returns_not_found() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (policy, _) = app
        .post_auth(
            "/api/Policy/Policy_Create",
            &token,
            &json!({ "name": "Basic", "coverageAmount": 10000.0, "premiumAmount": 99.0 }),
        )
        .await;
    let path = format!("/api/Policy/Policy_Delete/{}", policy["id"].as_str().unwrap());

    let (_, status) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn deleting_referenced_policy_conflicts() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let claim = app.create_claim(&token, "CLM-100").await;
    let (_, status) = app
        .delete_auth(
            &format!("/api/Policy/Policy_Delete/{}", claim["policyId"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

// ── Members & children ──────────────────────────────────────────

#[tokio::test]
async fn member_children_follow_parent() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let member = app.create_member(&token, "Naledi", "Mokoena").await;
    let member_id = member["id"].as_str().unwrap();
    assert_eq!(member["status"], "Active");

    let (ben, status) = app
        .post_auth(
            "/api/Beneficiary/Beneficiary_Create",
            &token,
            &json!({ "memberId": member_id, "fullName": "Kabelo Mokoena", "relationship": "Son", "sharePercentage": 50.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{ben}");

    let (_, status) = app
        .post_auth(
            "/api/Beneficiary/Beneficiary_Create",
            &token,
            &json!({ "memberId": member_id, "fullName": "Too Much", "relationship": "Son", "sharePercentage": 150.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = app
        .post_auth(
            "/api/BankingDetail/BankingDetail_Create",
            &token,
            &json!({ "memberId": member_id, "bankName": "FNB", "accountHolder": "N Mokoena", "accountNumber": "62001234567" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .post_auth(
            "/api/Dependent/Dependent_Create",
            &token,
            &json!({ "memberId": uuid::Uuid::now_v7(), "fullName": "Ghost", "relationship": "Child" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (list, _) = app
        .get_auth(&format!("/api/Beneficiary/Beneficiary_ListByMember/{member_id}"), &token)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Children go with the member
    let (_, status) = app
        .delete_auth(&format!("/api/Member/Member_Delete/{member_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app
        .get_auth(&format!("/api/Beneficiary/Beneficiary_Get/{}", ben["id"].as_str().unwrap()), &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn enrollment_is_unique_per_member_and_policy() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let member = app.create_member(&token, "Ayanda", "Zulu").await;
    let (policy, _) = app
        .post_auth(
            "/api/Policy/Policy_Create",
            &token,
            &json!({ "name": "Gold", "coverageAmount": 50000.0, "premiumAmount": 400.0 }),
        )
        .await;
    let body = json!({ "memberId": member["id"], "policyId": policy["id"] });

    let (_, status) = app.post_auth("/api/PolicyEnrollment/PolicyEnrollment_Create", &token, &body).await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.post_auth("/api/PolicyEnrollment/PolicyEnrollment_Create", &token, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (list, _) = app
        .get_auth(
            &format!("/api/PolicyEnrollment/PolicyEnrollment_List?memberId={}", member["id"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

// ── Users & RBAC ────────────────────────────────────────────────

#[tokio::test]
async fn non_admin_user_cannot_manage_users() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (role, _) = app
        .post_auth("/api/Role/Role_Create", &token, &json!({ "name": "Clerk" }))
        .await;

    let (user, status) = app
        .post_auth(
            "/api/User/User_Create",
            &token,
            &json!({ "email": "clerk@test.com", "password": common::PASSWORD, "name": "Clerk", "roleIds": [role["id"]] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{user}");

    let (login, _) = app.login("clerk@test.com", common::PASSWORD).await;
    assert_eq!(login["roles"], json!(["Clerk"]));
    let clerk = login["accessToken"].as_str().unwrap();

    let (_, status) = app.get_auth("/api/User/User_List", clerk).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Day-to-day records stay open to every tenant user
    let (_, status) = app.get_auth("/api/Member/Member_List", clerk).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .post_auth(
            "/api/User/User_Create",
            &token,
            &json!({ "email": "CLERK@test.com", "password": common::PASSWORD, "name": "Dup" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

#[tokio::test]
async fn tenant_admin_cannot_modify_system_admin() {
    let app = common::spawn_app().await;
    let sys = app.bootstrap().await;

    let (me, _) = app.get_auth("/api/Auth/Auth_Me", &sys).await;
    let sys_id = me["user"]["id"].as_str().unwrap().to_string();

    let (roles, _) = app.get_auth("/api/Role/Role_List", &sys).await;
    let admin_role = roles
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "Admin")
        .unwrap()["id"]
        .clone();

    let (deputy, status) = app
        .post_auth(
            "/api/User/User_Create",
            &sys,
            &json!({ "email": "deputy@test.com", "password": common::PASSWORD, "name": "Deputy", "roleIds": [admin_role] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{deputy}");
    let (login, _) = app.login("deputy@test.com", common::PASSWORD).await;
    let deputy_token = login["accessToken"].as_str().unwrap().to_string();

    let (_, status) = app
        .post_auth(
            &format!("/api/User/User_ResetPassword/{sys_id}"),
            &deputy_token,
            &json!({ "password": "taken-over-123" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, status) = app
        .put_auth(
            &format!("/api/User/User_Update/{sys_id}"),
            &deputy_token,
            &json!({ "email": "deputy-owned@test.com", "name": "Owned", "isActive": false }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, status) = app
        .delete_auth(&format!("/api/User/User_Delete/{sys_id}"), &deputy_token)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The account is untouched
    let (_, status) = app.login(common::ADMIN_EMAIL, common::PASSWORD).await;
    assert_eq!(status, StatusCode::OK);

    // The system admin still manages the deputy
    let (_, status) = app
        .post_auth(
            &format!("/api/User/User_ResetPassword/{}", deputy["id"].as_str().unwrap()),
            &sys,
            &json!({ "password": "fresh-password-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn grant_and_revoke_permission() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (role, _) = app
        .post_auth("/api/Role/Role_Create", &token, &json!({ "name": "Manager" }))
        .await;
    let (perm, _) = app
        .post_auth(
            "/api/Permission/Permission_Create",
            &token,
            &json!({ "name": "claims.approve", "description": "Approve claims" }),
        )
        .await;
    let body = json!({ "roleId": role["id"], "permissionId": perm["id"] });

    let (grant, status) = app.post_auth("/api/RolePermission/RolePermission_Grant", &token, &body).await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.post_auth("/api/RolePermission/RolePermission_Grant", &token, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (list, _) = app
        .get_auth(
            &format!("/api/RolePermission/RolePermission_ListByRole/{}", role["id"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let path = format!("/api/RolePermission/RolePermission_Revoke/{}", grant["id"].as_str().unwrap());
    let (_, status) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Dashboard widgets ───────────────────────────────────────────

#[tokio::test]
async fn visible_widgets_respect_roles() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    for body in [
        json!({ "widgetKey": "members", "title": "Members", "displayOrder": 2 }),
        json!({ "widgetKey": "claims", "title": "Claims", "displayOrder": 1, "allowedRoles": "Admin, Manager" }),
        json!({ "widgetKey": "finance", "title": "Finance", "displayOrder": 3, "allowedRoles": "Finance" }),
        json!({ "widgetKey": "hidden", "title": "Hidden", "isVisible": false }),
        json!({ "widgetKey": "blank", "title": "Blank", "displayOrder": 4, "allowedRoles": "  " }),
    ] {
        let (_, status) = app
            .post_auth("/api/DashboardWidgetSetting/DashboardWidgetSetting_Create", &token, &body)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let base = "/api/DashboardWidgetSetting/DashboardWidgetSetting_GetVisible";

    let (own, _) = app.get_auth(base, &token).await;
    assert_eq!(keys(&own), vec!["claims", "members", "blank"]);

    let (manager, _) = app.get_auth(&format!("{base}?roles=Manager"), &token).await;
    assert_eq!(keys(&manager), vec!["claims", "members", "blank"]);

    let (clerk, _) = app.get_auth(&format!("{base}?roles=Clerk"), &token).await;
    assert_eq!(keys(&clerk), vec!["members", "blank"]);

    let (finance, _) = app.get_auth(&format!("{base}?roles=Clerk,%20Finance"), &token).await;
    assert_eq!(keys(&finance), vec!["members", "finance", "blank"]);

    common::cleanup(app).await;
}

// ── Onboarding ──────────────────────────────────────────────────

async fn configure_onboarding(app: &common::TestApp, token: &str) {
    for body in [
        json!({ "fieldKey": "employer", "label": "Employer", "fieldType": "text", "isRequired": true, "displayOrder": 1 }),
        json!({ "fieldKey": "contactEmail", "label": "Email", "fieldType": "email", "isRequired": true, "displayOrder": 2 }),
        json!({ "fieldKey": "province", "label": "Province", "fieldType": "select", "options": ["Gauteng", "Limpopo"], "displayOrder": 3 }),
        json!({ "fieldKey": "legacy", "label": "Legacy", "fieldType": "text", "isRequired": true, "isEnabled": false }),
    ] {
        let (resp, status) = app
            .post_auth(
                "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Create",
                token,
                &body,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{resp}");
    }
}

#[tokio::test]
async fn onboarding_field_definitions_are_validated() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;
    let path = "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Create";

    let (_, status) = app
        .post_auth(path, &token, &json!({ "fieldKey": "1bad", "label": "Bad", "fieldType": "text" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = app
        .post_auth(path, &token, &json!({ "fieldKey": "colour", "label": "Colour", "fieldType": "select" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = app
        .post_auth(path, &token, &json!({ "fieldKey": "shoe", "label": "Shoe", "fieldType": "shoe" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    configure_onboarding(&app, &token).await;
    let (form, _) = app
        .get_auth("/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_GetForm", &token)
        .await;
    let form_keys: Vec<&str> = form
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["fieldKey"].as_str().unwrap())
        .collect();
    assert_eq!(form_keys, vec!["employer", "contactEmail", "province"]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn onboarding_save_updates_completion() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;
    configure_onboarding(&app, &token).await;

    let member = app.create_member(&token, "Zanele", "Khumalo").await;
    let member_id = member["id"].as_str().unwrap();
    let save = format!("/api/Onboarding/Onboarding_SaveMemberData/{member_id}");
    let get = format!("/api/Onboarding/Onboarding_GetMemberData/{member_id}");

    let (body, status) = app
        .put_auth(&save, &token, &json!({ "values": { "employer": "Acme", "province": "Gauteng" } }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["completion"]["requiredFields"], 2);
    assert_eq!(body["completion"]["completedFields"], 1);
    assert_eq!(body["completion"]["completionPercentage"], 50.0);
    assert_eq!(body["completion"]["isComplete"], false);

    let (body, _) = app
        .put_auth(&save, &token, &json!({ "values": { "contactEmail": "z@k.co.za" } }))
        .await;
    assert_eq!(body["completion"]["completionPercentage"], 100.0);
    assert_eq!(body["completion"]["isComplete"], true);

    // null clears a stored value
    let (body, _) = app
        .put_auth(&save, &token, &json!({ "values": { "employer": null } }))
        .await;
    assert_eq!(body["completion"]["completedFields"], 1);

    let (stored, status) = app.get_auth(&get, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["values"], json!({ "contactEmail": "z@k.co.za", "province": "Gauteng" }));

    let (completion, status) = app
        .get_auth(&format!("/api/MemberProfileCompletion/MemberProfileCompletion_Get/{member_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completion["completionPercentage"], 50.0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn onboarding_rejects_bad_values() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;
    configure_onboarding(&app, &token).await;

    let member = app.create_member(&token, "Zanele", "Khumalo").await;
    let save = format!("/api/Onboarding/Onboarding_SaveMemberData/{}", member["id"].as_str().unwrap());

    let (body, status) = app
        .put_auth(
            &save,
            &token,
            &json!({ "values": { "contactEmail": "not-an-email", "province": "Mars" } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("contactEmail"));
    assert!(error.contains("province"));

    // Disabled and unknown fields are rejected
    let (_, status) = app
        .put_auth(&save, &token, &json!({ "values": { "legacy": "x" } }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored
    let (_, status) = app
        .get_auth(
            &format!("/api/MemberProfileCompletion/MemberProfileCompletion_Get/{}", member["id"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let missing = uuid::Uuid::now_v7();
    let (_, status) = app
        .put_auth(
            &format!("/api/Onboarding/Onboarding_SaveMemberData/{missing}"),
            &token,
            &json!({ "values": {} }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn onboarding_without_required_fields_is_complete() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let member = app.create_member(&token, "Sello", "Moloi").await;
    let (body, status) = app
        .put_auth(
            &format!("/api/Onboarding/Onboarding_SaveMemberData/{}", member["id"].as_str().unwrap()),
            &token,
            &json!({ "values": {} }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completion"]["requiredFields"], 0);
    assert_eq!(body["completion"]["completionPercentage"], 100.0);
    assert_eq!(body["completion"]["isComplete"], true);

    common::cleanup(app).await;
}

#[tokio::test]
async fn member_data_reports_completion_before_first_save() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let member = app.create_member(&token, "Lindiwe", "Dube").await;
    let get = format!("/api/Onboarding/Onboarding_GetMemberData/{}", member["id"].as_str().unwrap());

    let (body, status) = app.get_auth(&get, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["values"], json!({}));
    assert_eq!(body["completion"]["completionPercentage"], 100.0);
    assert_eq!(body["completion"]["isComplete"], true);

    configure_onboarding(&app, &token).await;
    let (body, _) = app.get_auth(&get, &token).await;
    assert_eq!(body["completion"]["requiredFields"], 2);
    assert_eq!(body["completion"]["completedFields"], 0);
    assert_eq!(body["completion"]["completionPercentage"], 0.0);
    assert_eq!(body["completion"]["isComplete"], false);

    common::cleanup(app).await;
}

#[tokio::test]
async fn field_changes_refresh_stored_completion() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;
    configure_onboarding(&app, &token).await;

    let member = app.create_member(&token, "Thabo", "Nkosi").await;
    let member_id = member["id"].as_str().unwrap();
    let (body, _) = app
        .put_auth(
            &format!("/api/Onboarding/Onboarding_SaveMemberData/{member_id}"),
            &token,
            &json!({ "values": { "employer": "Acme", "contactEmail": "t@n.co.za" } }),
        )
        .await;
    assert_eq!(body["completion"]["isComplete"], true);

    let completion_path = format!("/api/MemberProfileCompletion/MemberProfileCompletion_Get/{member_id}");
    let field = |required: bool| {
        json!({ "fieldKey": "idNumber", "label": "ID number", "fieldType": "text", "isRequired": required })
    };

    // A new required field leaves the member short
    let (created, status) = app
        .post_auth(
            "/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Create",
            &token,
            &field(true),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let field_id = created["id"].as_str().unwrap();

    let (completion, _) = app.get_auth(&completion_path, &token).await;
    assert_eq!(completion["requiredFields"], 3);
    assert_eq!(completion["completedFields"], 2);
    assert_eq!(completion["completionPercentage"], 66.67);
    assert_eq!(completion["isComplete"], false);

    let update = format!("/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Update/{field_id}");
    let (_, status) = app.put_auth(&update, &token, &field(false)).await;
    assert_eq!(status, StatusCode::OK);
    let (completion, _) = app.get_auth(&completion_path, &token).await;
    assert_eq!(completion["requiredFields"], 2);
    assert_eq!(completion["isComplete"], true);

    let (_, status) = app.put_auth(&update, &token, &field(true)).await;
    assert_eq!(status, StatusCode::OK);
    let (completion, _) = app.get_auth(&completion_path, &token).await;
    assert_eq!(completion["isComplete"], false);

    let (_, status) = app
        .delete_auth(
            &format!("/api/OnboardingFieldConfiguration/OnboardingFieldConfiguration_Delete/{field_id}"),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (completion, _) = app.get_auth(&completion_path, &token).await;
    assert_eq!(completion["requiredFields"], 2);
    assert_eq!(completion["completionPercentage"], 100.0);
    assert_eq!(completion["isComplete"], true);

    common::cleanup(app).await;
}

// ── Assets ──────────────────────────────────────────────────────

#[tokio::test]
async fn asset_checkout_and_return() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (asset, status) = app
        .post_auth(
            "/api/Asset/Asset_Create",
            &token,
            &json!({ "name": "Hearse 1", "assetType": "Vehicle" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(asset["status"], "Available");
    let id = asset["id"].as_str().unwrap();

    let checkout = json!({ "checkedOutTo": "Driver Sam" });
    let (row, status) = app
        .post_auth(&format!("/api/Asset/Asset_Checkout/{id}"), &token, &checkout)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(row["returnedAt"].is_null());

    let (_, status) = app
        .post_auth(&format!("/api/Asset/Asset_Checkout/{id}"), &token, &checkout)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (current, _) = app.get_auth(&format!("/api/Asset/Asset_Get/{id}"), &token).await;
    assert_eq!(current["status"], "CheckedOut");

    // Plain updates cannot leave CheckedOut
    let (_, status) = app
        .put_auth(
            &format!("/api/Asset/Asset_Update/{id}"),
            &token,
            &json!({ "name": "Hearse 1", "assetType": "Vehicle", "status": "Available" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (returned, status) = app
        .post_auth(&format!("/api/Asset/Asset_Return/{id}"), &token, &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(returned["returnedAt"].is_string());

    let (_, status) = app
        .post_auth(&format!("/api/Asset/Asset_Return/{id}"), &token, &json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (history, _) = app
        .get_auth(&format!("/api/Asset/Asset_ListCheckouts/{id}"), &token)
        .await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (_, status) = app
        .post_auth(
            &format!("/api/Asset/Asset_Checkout/{}", uuid::Uuid::now_v7()),
            &token,
            &checkout,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn asset_update_does_not_overwrite_concurrent_checkout() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (asset, status) = app
        .post_auth(
            "/api/Asset/Asset_Create",
            &token,
            &json!({ "name": "Hearse 2", "assetType": "Vehicle" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id: uuid::Uuid = asset["id"].as_str().unwrap().parse().unwrap();
    let tenant_id: uuid::Uuid = asset["tenantId"].as_str().unwrap().parse().unwrap();
    let actor: uuid::Uuid = asset["createdBy"].as_str().unwrap().parse().unwrap();

    let (_, status) = app
        .post_auth(
            &format!("/api/Asset/Asset_Checkout/{id}"),
            &token,
            &json!({ "checkedOutTo": "Driver Sam" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // An update validated while the asset was still Available
    let input = AssetInput {
        name: "Hearse 2".to_string(),
        asset_type: "Vehicle".to_string(),
        serial_number: None,
        location: Some("Depot".to_string()),
        purchase_date: None,
        status: None,
    };
    let stale = parlour::db::assets::update(
        &app.pool,
        id,
        tenant_id,
        actor,
        &input,
        AssetStatus::Available,
        AssetStatus::Available,
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let (current, _) = app.get_auth(&format!("/api/Asset/Asset_Get/{id}"), &token).await;
    assert_eq!(current["status"], "CheckedOut");
    assert!(current["location"].is_null());

    let fresh = parlour::db::assets::update(
        &app.pool,
        id,
        tenant_id,
        actor,
        &input,
        AssetStatus::CheckedOut,
        AssetStatus::CheckedOut,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(fresh.location.as_deref(), Some("Depot"));
    assert_eq!(fresh.status, "CheckedOut");

    common::cleanup(app).await;
}

#[tokio::test]
async fn retired_asset_is_terminal() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (asset, _) = app
        .post_auth(
            "/api/Asset/Asset_Create",
            &token,
            &json!({ "name": "Tent", "assetType": "Marquee" }),
        )
        .await;
    let id = asset["id"].as_str().unwrap();
    let update = |status: &str| json!({ "name": "Tent", "assetType": "Marquee", "status": status });

    let (_, status) = app
        .put_auth(&format!("/api/Asset/Asset_Update/{id}"), &token, &update("UnderMaintenance"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .post_auth(&format!("/api/Asset/Asset_Checkout/{id}"), &token, &json!({ "checkedOutTo": "Crew" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, status) = app
        .put_auth(&format!("/api/Asset/Asset_Update/{id}"), &token, &update("Retired"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .put_auth(&format!("/api/Asset/Asset_Update/{id}"), &token, &update("Available"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, status) = app
        .put_auth(&format!("/api/Asset/Asset_Update/{id}"), &token, &update("Sold"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (retired, _) = app.get_auth("/api/Asset/Asset_List?status=Retired", &token).await;
    assert_eq!(ids(&retired), vec![id.to_string()]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn inspection_log_belongs_to_asset() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (asset, _) = app
        .post_auth(
            "/api/Asset/Asset_Create",
            &token,
            &json!({ "name": "Lowering device", "assetType": "Equipment" }),
        )
        .await;

    let (log, status) = app
        .post_auth(
            "/api/AssetInspectionLog/AssetInspectionLog_Create",
            &token,
            &json!({ "assetId": asset["id"], "inspector": "Thandi", "condition": "Good" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(log["inspectedAt"].is_string());

    let (list, _) = app
        .get_auth(
            &format!("/api/AssetInspectionLog/AssetInspectionLog_ListByAsset/{}", asset["id"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

// ── Bookings & events ───────────────────────────────────────────

#[tokio::test]
async fn booking_must_start_before_it_ends() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (resource, _) = app
        .post_auth(
            "/api/Resource/Resource_Create",
            &token,
            &json!({ "name": "Chapel", "resourceType": "Venue", "capacity": 120 }),
        )
        .await;

    let (_, status) = app
        .post_auth(
            "/api/ResourceBooking/ResourceBooking_Create",
            &token,
            &json!({
                "resourceId": resource["id"],
                "bookedBy": "Family Nkosi",
                "startTime": "2026-03-01T12:00:00Z",
                "endTime": "2026-03-01T10:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (booking, status) = app
        .post_auth(
            "/api/ResourceBooking/ResourceBooking_Create",
            &token,
            &json!({
                "resourceId": resource["id"],
                "bookedBy": "Family Nkosi",
                "startTime": "2026-03-01T10:00:00Z",
                "endTime": "2026-03-01T12:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "Confirmed");

    let (list, _) = app
        .get_auth(
            &format!("/api/ResourceBooking/ResourceBooking_List?resourceId={}", resource["id"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn funeral_event_requires_claim() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (_, status) = app
        .post_auth(
            "/api/FuneralEvent/FuneralEvent_Create",
            &token,
            &json!({
                "claimId": uuid::Uuid::now_v7(),
                "title": "Service",
                "eventDate": "2026-04-10T09:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let claim = app.create_claim(&token, "CLM-200").await;
    let driver = uuid::Uuid::now_v7();
    let (event, status) = app
        .post_auth(
            "/api/FuneralEvent/FuneralEvent_Create",
            &token,
            &json!({
                "claimId": claim["id"],
                "title": "Service",
                "eventDate": "2026-04-10T09:00:00Z",
                "driverIds": [driver]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{event}");
    assert_eq!(event["assetIds"], json!([]));
    assert_eq!(event["driverIds"], json!([driver.to_string()]));
    assert_eq!(event["status"], "Scheduled");

    let (list, _) = app
        .get_auth(
            &format!("/api/FuneralEvent/FuneralEvent_ListByClaim/{}", claim["id"].as_str().unwrap()),
            &token,
        )
        .await;
    assert_eq!(ids(&list), vec![event["id"].as_str().unwrap().to_string()]);

    // A claim with events cannot be deleted
    let (_, status) = app
        .delete_auth(&format!("/api/Claim/Claim_Delete/{}", claim["id"].as_str().unwrap()), &token)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

// ── Audit ───────────────────────────────────────────────────────

#[tokio::test]
async fn mutations_are_audited() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let member = app.create_member(&token, "Audit", "Trail").await;

    let (events, status) = app.get_auth("/api/AuditEvent/AuditEvent_List?limit=10", &token).await;
    assert_eq!(status, StatusCode::OK);
    let latest = &events.as_array().unwrap()[0];
    assert_eq!(latest["action"], "member.created");
    assert_eq!(latest["resourceId"], member["id"]);

    common::cleanup(app).await;
}
