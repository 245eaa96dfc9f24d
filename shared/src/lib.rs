use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire-level DTOs shared between the backend and any client.
///
/// Dates are strings on the wire: instants are RFC 3339, calendar days are
/// ISO `YYYY-MM-DD`. Enum-like fields (plan, method, category, status, role,
/// language, theme) travel as lowercase strings; the backend parses them into
/// typed domain models and rejects unknown values at the mapping boundary.

/// A login identity. Only the built-in administrator exists by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// "admin" | "staff" | "mentor"
    pub role: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    /// Weak reference to a Mentor; cleared (not cascaded) when the mentor is deleted.
    pub mentor_id: Option<String>,
    pub price_total: f64,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub paid_amount: f64,
    /// Keys are ISO dates (YYYY-MM-DD); a missing key reads as absent.
    pub attendance: BTreeMap<String, bool>,
    /// 0-100
    pub grade: Option<u8>,
    /// "active" | "completed" | "dropped"
    pub status: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSession {
    pub id: String,
    /// ISO date (YYYY-MM-DD) the visit is booked under
    pub date: String,
    pub person_name: String,
    /// RFC 3339 timestamp
    pub check_in_at: String,
    /// RFC 3339 timestamp; absent while the session is open
    pub check_out_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    /// Weak reference to a Student; guests have no student_id.
    pub student_id: Option<String>,
    pub person_name: String,
    /// "daily" | "weekly" | "monthly"
    pub plan: String,
    pub total_price: f64,
    pub paid_amount: f64,
    /// "cash" | "bank"
    pub method: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    /// "rent" | "salary" | "utilities" | "marketing" | "supplies" | "other"
    pub category: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Flat-rate subscription price list, one entry per plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPrices {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// "ar" | "en"
    pub lang: String,
    pub hourly_rate: f64,
    /// "light" | "dark"
    pub theme: String,
    /// ISO 4217 currency code, e.g. "ILS"
    pub currency: String,
    pub sub_prices: SubPrices,
}

// ---------------------------------------------------------------------------
// Mentors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMentorRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Partial patch; only provided fields are touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMentorRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorResponse {
    pub mentor: Mentor,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorListResponse {
    pub mentors: Vec<Mentor>,
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: Student,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

/// Outcome of a bulk student upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStudentsResponse {
    pub imported_count: usize,
    /// Rows dropped for having a blank name.
    pub skipped_count: usize,
    pub success_message: String,
}

/// Money position of one student across enrollments and subscriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentBalanceResponse {
    pub student_id: String,
    pub total_due: f64,
    pub total_paid: f64,
    /// Signed; negative means overpaid.
    pub remaining: f64,
    /// `remaining` rendered in the configured currency, for display.
    pub formatted_remaining: String,
}

// ---------------------------------------------------------------------------
// Courses & enrollments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub mentor_id: Option<String>,
    pub price_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub mentor_id: Option<String>,
    /// Set to detach the course from its mentor.
    #[serde(default)]
    pub clear_mentor: bool,
    pub price_total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResponse {
    pub course: Course,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub student_id: String,
    pub course_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub created: Vec<Enrollment>,
    /// Courses the student was already enrolled in.
    pub skipped_course_ids: Vec<String>,
    pub success_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEnrollmentRequest {
    pub grade: Option<u8>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentListResponse {
    pub enrollments: Vec<Enrollment>,
}

/// An enrollment joined with its course, as rendered by the student detail
/// view. The course is absent when the reference dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Option<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentEnrollmentsResponse {
    pub items: Vec<EnrollmentWithCourse>,
}

/// Signed payment delta; negative amounts are corrections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub paid_amount: f64,
    /// Priced total minus paid after the delta was applied.
    pub remaining: f64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleAttendanceRequest {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub enrollment: Enrollment,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub person_name: String,
    /// ISO date; defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: WorkspaceSession,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutResponse {
    pub session: WorkspaceSession,
    /// Billed cost at the configured hourly rate.
    pub cost: f64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDayResponse {
    pub date: String,
    pub sessions: Vec<WorkspaceSession>,
    /// Sum of session costs for the day (open sessions bill zero).
    pub day_total: f64,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub student_id: Option<String>,
    /// Required for guests; for students, defaults to the student's name.
    pub person_name: Option<String>,
    pub plan: String,
    /// Defaults to the configured price for the plan.
    pub total_price: Option<f64>,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub subscription: Subscription,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<Subscription>,
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: String,
    pub amount: f64,
    pub category: String,
    /// ISO date; defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

// ---------------------------------------------------------------------------
// Settings & auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub lang: Option<String>,
    pub hourly_rate: Option<f64>,
    pub theme: Option<String>,
    pub currency: Option<String>,
    pub sub_prices: Option<SubPrices>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: Option<User>,
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Aggregated money picture, optionally scoped to a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub course_revenue: f64,
    pub subscription_revenue: f64,
    pub workspace_revenue: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Percent; 0 when there is no revenue.
    pub profit_margin: f64,
    /// Priced totals minus realized payments; workspace sessions excluded.
    pub total_debt: f64,
}

/// One entry in the payment-alerts list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutstandingStudent {
    pub student: Student,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub summary: FinancialSummary,
    pub student_count: usize,
    pub mentor_count: usize,
    pub course_count: usize,
    pub open_session_count: usize,
    pub outstanding: Vec<OutstandingStudent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Echo of the requested bounds, ISO dates.
    pub start: Option<String>,
    pub end: Option<String>,
    pub summary: FinancialSummary,
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSnapshotResponse {
    pub success_message: String,
}
