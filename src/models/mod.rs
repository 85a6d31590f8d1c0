pub mod asset;
pub mod audit_event;
pub mod dashboard_widget;
pub mod funeral_event;
pub mod member;
pub mod onboarding;
pub mod policy;
pub mod rbac;
pub mod resource;
pub mod tenant;
pub mod user;

pub use asset::{Asset, AssetCheckout, AssetInput, AssetInspectionLog, CheckoutInput, InspectionInput};
pub use audit_event::AuditEvent;
pub use dashboard_widget::{DashboardWidgetSetting, WidgetSettingInput};
pub use funeral_event::{FuneralEvent, FuneralEventInput};
pub use member::{
    BankingDetail, BankingDetailInput, Beneficiary, BeneficiaryInput, Dependent, DependentInput,
    Member, MemberInput,
};
pub use onboarding::{
    FieldConfigurationInput, MemberOnboardingValue, MemberProfileCompletion,
    OnboardingFieldConfiguration,
};
pub use policy::{Claim, ClaimInput, Policy, PolicyEnrollment, PolicyEnrollmentInput, PolicyInput};
pub use rbac::{NamedInput, Permission, Role, RolePermission, RolePermissionInput, UserRole, UserRoleInput};
pub use resource::{Resource, ResourceBooking, ResourceBookingInput, ResourceInput};
pub use tenant::{Tenant, TenantInput, TenantSetting, TenantSettingInput};
pub use user::{CreateUserInput, UpdateUserInput, User};
