//! Mappers for courses and enrollments.

use crate::backend::domain::commands::courses::{
    CoursePatch, CreateCourseCommand, EnrollCommand, EnrollmentPatch,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::{Course as DomainCourse, Enrollment as DomainEnrollment};

pub struct CourseMapper;

impl CourseMapper {
    pub fn to_dto(domain: DomainCourse) -> shared::Course {
        shared::Course {
            id: domain.id,
            title: domain.title,
            mentor_id: domain.mentor_id,
            price_total: domain.price_total,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: shared::CreateCourseRequest) -> CreateCourseCommand {
        CreateCourseCommand {
            title: request.title,
            mentor_id: request.mentor_id,
            price_total: request.price_total,
        }
    }

    pub fn to_patch(request: shared::UpdateCourseRequest) -> CoursePatch {
        // `clear_mentor` wins over a simultaneously provided mentor_id.
        let mentor_id = if request.clear_mentor {
            Some(None)
        } else {
            request.mentor_id.map(Some)
        };
        CoursePatch {
            title: request.title,
            mentor_id,
            price_total: request.price_total,
        }
    }
}

pub struct EnrollmentMapper;

impl EnrollmentMapper {
    pub fn to_dto(domain: DomainEnrollment) -> shared::Enrollment {
        shared::Enrollment {
            id: domain.id,
            course_id: domain.course_id,
            student_id: domain.student_id,
            paid_amount: domain.paid_amount,
            attendance: domain
                .attendance
                .into_iter()
                .map(|(date, present)| (date.format("%Y-%m-%d").to_string(), present))
                .collect(),
            grade: domain.grade,
            status: domain.status.to_string(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_enroll_command(request: shared::EnrollRequest) -> EnrollCommand {
        EnrollCommand {
            student_id: request.student_id,
            course_ids: request.course_ids,
        }
    }

    pub fn to_patch(request: shared::UpdateEnrollmentRequest) -> DomainResult<EnrollmentPatch> {
        let status = request
            .status
            .map(|s| s.parse().map_err(DomainError::Validation))
            .transpose()?;
        Ok(EnrollmentPatch {
            grade: request.grade,
            status,
        })
    }
}
