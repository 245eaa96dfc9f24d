//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod people {
    /// Input for creating a new mentor.
    #[derive(Debug, Clone)]
    pub struct CreateMentorCommand {
        pub name: String,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub notes: Option<String>,
    }

    /// Partial patch for a mentor; only `Some` fields are touched.
    #[derive(Debug, Clone, Default)]
    pub struct MentorPatch {
        pub name: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub notes: Option<String>,
    }

    /// Input for creating a new student.
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub name: String,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub notes: Option<String>,
    }

    /// Partial patch for a student; only `Some` fields are touched.
    #[derive(Debug, Clone, Default)]
    pub struct StudentPatch {
        pub name: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub notes: Option<String>,
    }

    /// One row of a bulk student upload.
    #[derive(Debug, Clone)]
    pub struct StudentRow {
        pub name: String,
        pub phone: Option<String>,
    }

    /// Outcome of a bulk student upload.
    #[derive(Debug, Clone)]
    pub struct ImportStudentsResult {
        pub imported_count: usize,
        /// Rows dropped for having a blank name.
        pub skipped_count: usize,
    }
}

pub mod courses {
    use crate::backend::domain::models::{Course, Enrollment, EnrollmentStatus};

    /// Input for creating a new course.
    #[derive(Debug, Clone)]
    pub struct CreateCourseCommand {
        pub title: String,
        pub mentor_id: Option<String>,
        pub price_total: f64,
    }

    /// Partial patch for a course. `mentor_id` distinguishes "leave alone"
    /// (`None`) from "set" (`Some(Some(id))`) and "detach" (`Some(None)`).
    #[derive(Debug, Clone, Default)]
    pub struct CoursePatch {
        pub title: Option<String>,
        pub mentor_id: Option<Option<String>>,
        pub price_total: Option<f64>,
    }

    /// Input for enrolling one student into a set of courses.
    #[derive(Debug, Clone)]
    pub struct EnrollCommand {
        pub student_id: String,
        pub course_ids: Vec<String>,
    }

    /// Result of an enroll operation. Pairs that already existed are skipped,
    /// never duplicated.
    #[derive(Debug, Clone)]
    pub struct EnrollOutcome {
        pub created: Vec<Enrollment>,
        pub skipped_course_ids: Vec<String>,
    }

    /// Partial patch for an enrollment; only `Some` fields are touched.
    #[derive(Debug, Clone, Default)]
    pub struct EnrollmentPatch {
        pub grade: Option<u8>,
        pub status: Option<EnrollmentStatus>,
    }

    /// Result of applying a payment delta to an enrollment.
    #[derive(Debug, Clone)]
    pub struct CoursePaymentOutcome {
        pub enrollment: Enrollment,
        /// Course price minus paid amount after the delta.
        pub remaining: f64,
    }

    /// An enrollment joined with its course, as used by detail views.
    #[derive(Debug, Clone)]
    pub struct EnrollmentWithCourse {
        pub enrollment: Enrollment,
        pub course: Option<Course>,
    }
}

pub mod workspace {
    use chrono::NaiveDate;

    use crate::backend::domain::models::WorkspaceSession;

    /// Input for opening a workspace session.
    #[derive(Debug, Clone)]
    pub struct CheckInCommand {
        pub person_name: String,
        /// Day to book the visit under; defaults to today.
        pub date: Option<NaiveDate>,
    }

    /// Result of closing a workspace session.
    #[derive(Debug, Clone)]
    pub struct CheckOutOutcome {
        pub session: WorkspaceSession,
        /// Billed cost at the current hourly rate.
        pub cost: f64,
    }

    /// One day of workspace activity.
    #[derive(Debug, Clone)]
    pub struct WorkspaceDay {
        pub date: NaiveDate,
        pub sessions: Vec<WorkspaceSession>,
        pub day_total: f64,
    }
}

pub mod subscriptions {
    use crate::backend::domain::models::{PaymentMethod, Subscription, SubscriptionPlan};

    /// Input for selling a subscription to a student or a guest.
    #[derive(Debug, Clone)]
    pub struct CreateSubscriptionCommand {
        pub student_id: Option<String>,
        /// Required for guests; defaults to the student's name otherwise.
        pub person_name: Option<String>,
        pub plan: SubscriptionPlan,
        /// Defaults to the configured price for the plan.
        pub total_price: Option<f64>,
        pub method: PaymentMethod,
    }

    /// Result of applying a payment delta to a subscription.
    #[derive(Debug, Clone)]
    pub struct SubscriptionPaymentOutcome {
        pub subscription: Subscription,
        /// Total price minus paid amount after the delta.
        pub remaining: f64,
    }
}

pub mod expenses {
    use chrono::NaiveDate;

    use crate::backend::domain::models::ExpenseCategory;

    /// Input for recording an operating expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub title: String,
        pub amount: f64,
        pub category: ExpenseCategory,
        /// Day the expense is booked under; defaults to today.
        pub date: Option<NaiveDate>,
    }
}

pub mod settings {
    use crate::backend::domain::models::{Lang, SubPrices, Theme};

    /// Partial patch for the settings singleton; only `Some` fields are
    /// touched. `sub_prices` replaces the whole price list.
    #[derive(Debug, Clone, Default)]
    pub struct SettingsPatch {
        pub lang: Option<Lang>,
        pub hourly_rate: Option<f64>,
        pub theme: Option<Theme>,
        pub currency: Option<String>,
        pub sub_prices: Option<SubPrices>,
    }
}

pub mod reports {
    use chrono::NaiveDate;

    use crate::backend::domain::models::Student;

    /// Inclusive calendar-day bounds; absent bounds do not constrain.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct DateRange {
        pub start: Option<NaiveDate>,
        pub end: Option<NaiveDate>,
    }

    impl DateRange {
        pub fn unbounded() -> Self {
            Self::default()
        }
    }

    /// Money position of one student across enrollments and subscriptions.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct StudentBalance {
        pub total_due: f64,
        pub total_paid: f64,
        /// Signed; negative means overpaid.
        pub remaining: f64,
    }

    /// Aggregated money picture over a (possibly unbounded) date range.
    #[derive(Debug, Clone, PartialEq)]
    pub struct FinancialSummary {
        pub course_revenue: f64,
        pub subscription_revenue: f64,
        pub workspace_revenue: f64,
        pub total_revenue: f64,
        pub total_expenses: f64,
        pub net_profit: f64,
        /// Percent; 0 when there is no revenue.
        pub profit_margin: f64,
        /// Priced totals minus realized payments. Workspace sessions are
        /// pay-as-you-go and contribute nothing here.
        pub total_debt: f64,
    }

    /// Everything the dashboard renders in one read.
    #[derive(Debug, Clone)]
    pub struct DashboardSnapshot {
        pub summary: FinancialSummary,
        pub student_count: usize,
        pub mentor_count: usize,
        pub course_count: usize,
        pub open_session_count: usize,
        pub outstanding: Vec<(Student, f64)>,
    }
}
