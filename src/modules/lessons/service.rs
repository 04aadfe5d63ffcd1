use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::modules::courses::service::CourseService;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

use super::model::{CreateLessonRequest, Lesson, LessonDetail, Progress, UpdateLessonRequest};

/// Lesson row joined with its course's title and owner, enough to decide
/// visibility without a second round-trip.
#[derive(sqlx::FromRow)]
struct LessonWithCourse {
    id: Uuid,
    course_id: Uuid,
    title: String,
    content: String,
    order_index: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    course_title: String,
    instructor_id: Uuid,
}

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.table = "lessons"))]
    pub async fn create_lesson(
        db: &PgPool,
        caller_id: Uuid,
        dto: CreateLessonRequest,
    ) -> Result<Lesson, AppError> {
        let course = CourseService::find_course(db, dto.course_id).await?;

        if course.instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected lesson creation by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only add lessons to your own courses"
            )));
        }

        let lesson = sqlx::query_as::<_, Lesson>(
            "INSERT INTO lessons (course_id, title, content, order_index)
             VALUES ($1, $2, $3, $4)
             RETURNING id, course_id, title, content, order_index, created_at",
        )
        .bind(dto.course_id)
        .bind(dto.title.trim())
        .bind(dto.content.trim())
        .bind(dto.order_index)
        .fetch_one(db)
        .await?;

        info!(lesson.id = %lesson.id, "Lesson created");

        Ok(lesson)
    }

    /// Students must be enrolled in the lesson's course, instructors must
    /// own it. Students additionally get their completion flag.
    #[instrument(skip(db), fields(lesson.id = %lesson_id, db.table = "lessons"))]
    pub async fn get_lesson(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: UserRole,
        lesson_id: Uuid,
    ) -> Result<LessonDetail, AppError> {
        let row = Self::find_lesson_with_course(db, lesson_id).await?;

        let completed = match caller_role {
            UserRole::Student => {
                let enrolled = Self::is_enrolled(db, caller_id, row.course_id).await?;
                if !enrolled {
                    return Err(AppError::forbidden(anyhow::anyhow!(
                        "You must be enrolled in this course to view lessons"
                    )));
                }

                let completed = sqlx::query_scalar::<_, bool>(
                    "SELECT completed FROM progress WHERE student_id = $1 AND lesson_id = $2",
                )
                .bind(caller_id)
                .bind(lesson_id)
                .fetch_optional(db)
                .await?;

                Some(completed.unwrap_or(false))
            }
            UserRole::Instructor => {
                if row.instructor_id != caller_id {
                    return Err(AppError::forbidden(anyhow::anyhow!("Access denied")));
                }
                None
            }
        };

        Ok(LessonDetail {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            content: row.content,
            order_index: row.order_index,
            created_at: row.created_at,
            course_title: row.course_title,
            completed,
        })
    }

    /// Idempotent completion: a single upsert keyed on the unique
    /// (student, lesson) pair, so concurrent calls cannot race a
    /// check-then-insert window. `completed_at` keeps the first completion
    /// time on repeats.
    #[instrument(skip(db), fields(lesson.id = %lesson_id, student.id = %student_id, db.table = "progress"))]
    pub async fn mark_complete(
        db: &PgPool,
        student_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<Progress, AppError> {
        let row = Self::find_lesson_with_course(db, lesson_id).await?;

        if !Self::is_enrolled(db, student_id, row.course_id).await? {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You must be enrolled in this course"
            )));
        }

        let progress = sqlx::query_as::<_, Progress>(
            "INSERT INTO progress (student_id, lesson_id, completed, completed_at)
             VALUES ($1, $2, TRUE, now())
             ON CONFLICT ON CONSTRAINT unique_progress
             DO UPDATE SET completed = TRUE,
                           completed_at = COALESCE(progress.completed_at, now())
             RETURNING id, student_id, lesson_id, completed, completed_at",
        )
        .bind(student_id)
        .bind(lesson_id)
        .fetch_one(db)
        .await?;

        info!("Lesson marked complete");

        Ok(progress)
    }

    #[instrument(skip(db, dto), fields(lesson.id = %lesson_id, db.table = "lessons"))]
    pub async fn update_lesson(
        db: &PgPool,
        caller_id: Uuid,
        lesson_id: Uuid,
        dto: UpdateLessonRequest,
    ) -> Result<Lesson, AppError> {
        let row = Self::find_lesson_with_course(db, lesson_id).await?;

        if row.instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected lesson update by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only edit lessons in your own courses"
            )));
        }

        let lesson = sqlx::query_as::<_, Lesson>(
            "UPDATE lessons
             SET title = COALESCE($1, title),
                 content = COALESCE($2, content),
                 order_index = COALESCE($3, order_index)
             WHERE id = $4
             RETURNING id, course_id, title, content, order_index, created_at",
        )
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.content.as_deref().map(str::trim))
        .bind(dto.order_index)
        .bind(lesson_id)
        .fetch_one(db)
        .await?;

        info!("Lesson updated");

        Ok(lesson)
    }

    #[instrument(skip(db), fields(lesson.id = %lesson_id, db.table = "lessons"))]
    pub async fn delete_lesson(
        db: &PgPool,
        caller_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<(), AppError> {
        let row = Self::find_lesson_with_course(db, lesson_id).await?;

        if row.instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected lesson deletion by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only delete lessons in your own courses"
            )));
        }

        sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(db)
            .await?;

        info!("Lesson deleted");

        Ok(())
    }

    async fn find_lesson_with_course(
        db: &PgPool,
        lesson_id: Uuid,
    ) -> Result<LessonWithCourse, AppError> {
        sqlx::query_as::<_, LessonWithCourse>(
            "SELECT l.id, l.course_id, l.title, l.content, l.order_index, l.created_at,
                    c.title AS course_title, c.instructor_id
             FROM lessons l
             JOIN courses c ON c.id = l.course_id
             WHERE l.id = $1",
        )
        .bind(lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))
    }

    pub(crate) async fn is_enrolled(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, AppError> {
        let enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;

        Ok(enrolled)
    }
}
