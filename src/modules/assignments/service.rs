use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::modules::courses::service::CourseService;
use crate::modules::lessons::service::LessonService;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

use super::model::{
    Assignment, CreateAssignmentRequest, GradeSubmissionRequest, SubmitAssignmentRequest,
    Submission, SubmissionWithStudent,
};

/// Assignment row joined with its course's owner, for visibility checks.
#[derive(sqlx::FromRow)]
struct AssignmentWithOwner {
    #[sqlx(flatten)]
    assignment: Assignment,
    instructor_id: Uuid,
}

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.table = "assignments"))]
    pub async fn create_assignment(
        db: &PgPool,
        caller_id: Uuid,
        dto: CreateAssignmentRequest,
    ) -> Result<Assignment, AppError> {
        let course = CourseService::find_course(db, dto.course_id).await?;

        if course.instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected assignment creation by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only add assignments to your own courses"
            )));
        }

        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (course_id, title, description, due_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, course_id, title, description, due_at, created_at",
        )
        .bind(dto.course_id)
        .bind(dto.title.trim())
        .bind(dto.description.trim())
        .bind(dto.due_at)
        .fetch_one(db)
        .await?;

        info!(assignment.id = %assignment.id, "Assignment created");

        Ok(assignment)
    }

    #[instrument(skip(db), fields(assignment.id = %assignment_id, db.table = "assignments"))]
    pub async fn get_assignment(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: UserRole,
        assignment_id: Uuid,
    ) -> Result<Assignment, AppError> {
        let row = Self::find_assignment_with_owner(db, assignment_id).await?;
        Self::check_course_access(db, caller_id, caller_role, &row).await?;

        Ok(row.assignment)
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.table = "assignments"))]
    pub async fn get_course_assignments(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: UserRole,
        course_id: Uuid,
    ) -> Result<Vec<Assignment>, AppError> {
        let course = CourseService::find_course(db, course_id).await?;

        match caller_role {
            UserRole::Student => {
                if !LessonService::is_enrolled(db, caller_id, course_id).await? {
                    return Err(AppError::forbidden(anyhow::anyhow!(
                        "You must be enrolled in this course to view assignments"
                    )));
                }
            }
            UserRole::Instructor => {
                if course.instructor_id != caller_id {
                    return Err(AppError::forbidden(anyhow::anyhow!("Access denied")));
                }
            }
        }

        let assignments = sqlx::query_as::<_, Assignment>(
            "SELECT id, course_id, title, description, due_at, created_at
             FROM assignments WHERE course_id = $1
             ORDER BY created_at ASC",
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(assignments)
    }

    #[instrument(skip(db, dto), fields(assignment.id = %assignment_id, student.id = %student_id, db.table = "submissions"))]
    pub async fn submit(
        db: &PgPool,
        student_id: Uuid,
        assignment_id: Uuid,
        dto: SubmitAssignmentRequest,
    ) -> Result<Submission, AppError> {
        let row = Self::find_assignment_with_owner(db, assignment_id).await?;

        if !LessonService::is_enrolled(db, student_id, row.assignment.course_id).await? {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You must be enrolled in this course"
            )));
        }

        // One submission per student per assignment; the unique constraint
        // settles concurrent duplicates.
        let submission = sqlx::query_as::<_, Submission>(
            "INSERT INTO submissions (assignment_id, student_id, content)
             VALUES ($1, $2, $3)
             RETURNING id, assignment_id, student_id, content, submitted_at, grade",
        )
        .bind(assignment_id)
        .bind(student_id)
        .bind(dto.content.trim())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "You have already submitted this assignment"
                ));
            }
            error!(error = %e, "Database error creating submission");
            AppError::from(e)
        })?;

        info!(submission.id = %submission.id, "Assignment submitted");

        Ok(submission)
    }

    #[instrument(skip(db), fields(assignment.id = %assignment_id, db.table = "submissions"))]
    pub async fn get_submissions(
        db: &PgPool,
        caller_id: Uuid,
        assignment_id: Uuid,
    ) -> Result<Vec<SubmissionWithStudent>, AppError> {
        let row = Self::find_assignment_with_owner(db, assignment_id).await?;

        if row.instructor_id != caller_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only view submissions for your own assignments"
            )));
        }

        let submissions = sqlx::query_as::<_, SubmissionWithStudent>(
            "SELECT s.id, s.assignment_id, s.student_id, s.content, s.submitted_at, s.grade,
                    u.full_name AS student_name, u.email AS student_email
             FROM submissions s
             JOIN users u ON u.id = s.student_id
             WHERE s.assignment_id = $1
             ORDER BY s.submitted_at ASC",
        )
        .bind(assignment_id)
        .fetch_all(db)
        .await?;

        Ok(submissions)
    }

    #[instrument(skip(db), fields(assignment.id = %assignment_id, student.id = %student_id, db.table = "submissions"))]
    pub async fn get_my_submission(
        db: &PgPool,
        student_id: Uuid,
        assignment_id: Uuid,
    ) -> Result<Submission, AppError> {
        Self::find_assignment_with_owner(db, assignment_id).await?;

        sqlx::query_as::<_, Submission>(
            "SELECT id, assignment_id, student_id, content, submitted_at, grade
             FROM submissions WHERE assignment_id = $1 AND student_id = $2",
        )
        .bind(assignment_id)
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("No submission found for this assignment"))
        })
    }

    /// Grading overwrites any previous grade; `grade` is a scalar, not an
    /// event log.
    #[instrument(skip(db, dto), fields(submission.id = %submission_id, db.table = "submissions"))]
    pub async fn grade_submission(
        db: &PgPool,
        caller_id: Uuid,
        submission_id: Uuid,
        dto: GradeSubmissionRequest,
    ) -> Result<Submission, AppError> {
        let instructor_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT c.instructor_id
             FROM submissions s
             JOIN assignments a ON a.id = s.assignment_id
             JOIN courses c ON c.id = a.course_id
             WHERE s.id = $1",
        )
        .bind(submission_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Submission not found")))?;

        if instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected grading by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only grade submissions for your own courses"
            )));
        }

        let submission = sqlx::query_as::<_, Submission>(
            "UPDATE submissions SET grade = $1 WHERE id = $2
             RETURNING id, assignment_id, student_id, content, submitted_at, grade",
        )
        .bind(dto.grade)
        .bind(submission_id)
        .fetch_one(db)
        .await?;

        info!(grade = dto.grade, "Submission graded");

        Ok(submission)
    }

    async fn find_assignment_with_owner(
        db: &PgPool,
        assignment_id: Uuid,
    ) -> Result<AssignmentWithOwner, AppError> {
        sqlx::query_as::<_, AssignmentWithOwner>(
            "SELECT a.id, a.course_id, a.title, a.description, a.due_at, a.created_at,
                    c.instructor_id
             FROM assignments a
             JOIN courses c ON c.id = a.course_id
             WHERE a.id = $1",
        )
        .bind(assignment_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))
    }

    async fn check_course_access(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: UserRole,
        row: &AssignmentWithOwner,
    ) -> Result<(), AppError> {
        match caller_role {
            UserRole::Student => {
                if !LessonService::is_enrolled(db, caller_id, row.assignment.course_id).await? {
                    return Err(AppError::forbidden(anyhow::anyhow!(
                        "You must be enrolled in this course to view assignments"
                    )));
                }
            }
            UserRole::Instructor => {
                if row.instructor_id != caller_id {
                    return Err(AppError::forbidden(anyhow::anyhow!("Access denied")));
                }
            }
        }

        Ok(())
    }
}
