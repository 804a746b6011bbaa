use crate::api::designation::DesignationResponse;
use crate::api::session::SessionResponse;
use crate::attendance::breaks::BreakDetail;
use crate::attendance::report::{
    DailyEntry, DailyReport, EmployeeHistory, HistoryEmployee, HistoryRecord, PresentEntry,
};
use crate::attendance::status::AttendanceStatus;
use crate::auth::handlers::TokenResponse;
use crate::model::break_entry::BreakType;
use crate::model::designation::DesignationRole;
use crate::model::employee::Employee;
use crate::models::{AdminLoginReq, LoginReq, StartBreakReq};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Employee Attendance Tracker

Employees clock in and out with a personal **secret key**; administrators read
daily attendance, break totals and presence history.

### Attendance day
A new attendance day starts at the configured rollover hour (08:00 by default)
in the configured zone, not at midnight.

### Status
- **On Time**: time-in within the tolerance (±15 minutes by default) of the expected time-in
- **Late**: outside the tolerance
- **Leave**: no time-in for the day

### Security
Clock endpoints take the secret key; report endpoints require an Admin/HR
**JWT Bearer** token from `/auth/token`.
"#,
    ),
    paths(
        crate::api::session::login,
        crate::api::session::logout,

        crate::api::breaks::start_break,
        crate::api::breaks::end_break,

        crate::api::attendance::today,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::present,

        crate::api::designation::list_designations,

        crate::auth::handlers::issue_token
    ),
    components(
        schemas(
            LoginReq,
            StartBreakReq,
            AdminLoginReq,
            TokenResponse,
            SessionResponse,
            BreakType,
            BreakDetail,
            AttendanceStatus,
            DailyEntry,
            DailyReport,
            HistoryEmployee,
            HistoryRecord,
            EmployeeHistory,
            PresentEntry,
            DesignationRole,
            DesignationResponse,
            Employee
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Time-in / time-out"),
        (name = "Breaks", description = "Breaks inside a session"),
        (name = "Reports", description = "Admin attendance reports"),
        (name = "Designations", description = "Designation roles"),
        (name = "Auth", description = "Admin tokens"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/login",
            "/logout",
            "/breaks/start",
            "/breaks/end",
            "/api/attendance/today",
            "/api/attendance/{employee_id}",
            "/api/attendance/{employee_id}/present",
            "/api/designations",
            "/auth/token",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
