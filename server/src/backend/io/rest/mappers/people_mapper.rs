//! Mappers for mentors and students.

use crate::backend::domain::commands::people::{
    CreateMentorCommand, CreateStudentCommand, MentorPatch, StudentPatch,
};
use crate::backend::domain::models::{Mentor as DomainMentor, Student as DomainStudent};

pub struct MentorMapper;

impl MentorMapper {
    pub fn to_dto(domain: DomainMentor) -> shared::Mentor {
        shared::Mentor {
            id: domain.id,
            name: domain.name,
            phone: domain.phone,
            email: domain.email,
            notes: domain.notes,
        }
    }

    pub fn to_create_command(request: shared::CreateMentorRequest) -> CreateMentorCommand {
        CreateMentorCommand {
            name: request.name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
        }
    }

    pub fn to_patch(request: shared::UpdateMentorRequest) -> MentorPatch {
        MentorPatch {
            name: request.name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
        }
    }
}

pub struct StudentMapper;

impl StudentMapper {
    pub fn to_dto(domain: DomainStudent) -> shared::Student {
        shared::Student {
            id: domain.id,
            name: domain.name,
            phone: domain.phone,
            email: domain.email,
            notes: domain.notes,
        }
    }

    pub fn to_create_command(request: shared::CreateStudentRequest) -> CreateStudentCommand {
        CreateStudentCommand {
            name: request.name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
        }
    }

    pub fn to_patch(request: shared::UpdateStudentRequest) -> StudentPatch {
        StudentPatch {
            name: request.name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
        }
    }
}
