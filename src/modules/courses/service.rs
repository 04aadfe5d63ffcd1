use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::modules::lessons::model::Lesson;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

use super::model::{
    Course, CourseDetail, CourseSummary, CreateCourseRequest, Enrollment, MyCourse,
    UpdateCourseRequest,
};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(course.title = %dto.title, db.table = "courses"))]
    pub async fn create_course(
        db: &PgPool,
        instructor_id: Uuid,
        dto: CreateCourseRequest,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (instructor_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING id, instructor_id, title, description, created_at",
        )
        .bind(instructor_id)
        .bind(dto.title.trim())
        .bind(dto.description.trim())
        .fetch_one(db)
        .await?;

        info!(course.id = %course.id, "Course created");

        Ok(course)
    }

    /// Catalogue listing. `is_enrolled` is computed against the caller's id
    /// for every role; instructors can never hold enrollment rows, so for
    /// them it is always false.
    #[instrument(skip(db), fields(db.table = "courses"))]
    pub async fn get_all_courses(db: &PgPool, caller_id: Uuid) -> Result<Vec<CourseSummary>, AppError> {
        let courses = sqlx::query_as::<_, CourseSummary>(
            "SELECT c.id, c.instructor_id, c.title, c.description, c.created_at,
                    u.full_name AS instructor_name,
                    (SELECT COUNT(*) FROM lessons l WHERE l.course_id = c.id) AS lesson_count,
                    EXISTS(SELECT 1 FROM enrollments e
                           WHERE e.course_id = c.id AND e.student_id = $1) AS is_enrolled
             FROM courses c
             JOIN users u ON u.id = c.instructor_id
             ORDER BY c.created_at DESC",
        )
        .bind(caller_id)
        .fetch_all(db)
        .await?;

        debug!(returned = courses.len(), "Courses fetched");

        Ok(courses)
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.table = "courses"))]
    pub async fn get_course(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: UserRole,
        course_id: Uuid,
    ) -> Result<CourseDetail, AppError> {
        #[derive(sqlx::FromRow)]
        struct CourseHeader {
            id: Uuid,
            instructor_id: Uuid,
            title: String,
            description: String,
            created_at: chrono::DateTime<chrono::Utc>,
            instructor_name: String,
            is_enrolled: bool,
        }

        let header = sqlx::query_as::<_, CourseHeader>(
            "SELECT c.id, c.instructor_id, c.title, c.description, c.created_at,
                    u.full_name AS instructor_name,
                    CASE WHEN $2 THEN c.instructor_id = $1
                         ELSE EXISTS(SELECT 1 FROM enrollments e
                                     WHERE e.course_id = c.id AND e.student_id = $1)
                    END AS is_enrolled
             FROM courses c
             JOIN users u ON u.id = c.instructor_id
             WHERE c.id = $3",
        )
        .bind(caller_id)
        .bind(caller_role == UserRole::Instructor)
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        let lessons = sqlx::query_as::<_, Lesson>(
            "SELECT id, course_id, title, content, order_index, created_at
             FROM lessons WHERE course_id = $1
             ORDER BY order_index ASC",
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(CourseDetail {
            id: header.id,
            instructor_id: header.instructor_id,
            title: header.title,
            description: header.description,
            created_at: header.created_at,
            instructor_name: header.instructor_name,
            is_enrolled: header.is_enrolled,
            lessons,
        })
    }

    #[instrument(skip(db, dto), fields(course.id = %course_id, db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        caller_id: Uuid,
        course_id: Uuid,
        dto: UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        let course = Self::find_course(db, course_id).await?;

        if course.instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected course update by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only edit your own courses"
            )));
        }

        let course = sqlx::query_as::<_, Course>(
            "UPDATE courses
             SET title = COALESCE($1, title), description = COALESCE($2, description)
             WHERE id = $3
             RETURNING id, instructor_id, title, description, created_at",
        )
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.description.as_deref().map(str::trim))
        .bind(course_id)
        .fetch_one(db)
        .await?;

        info!("Course updated");

        Ok(course)
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.table = "courses"))]
    pub async fn delete_course(
        db: &PgPool,
        caller_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let course = Self::find_course(db, course_id).await?;

        if course.instructor_id != caller_id {
            warn!(caller.id = %caller_id, "Rejected course deletion by non-owner");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only delete your own courses"
            )));
        }

        // Lessons, enrollments, and assignments go with the course via
        // ON DELETE CASCADE.
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(db)
            .await?;

        info!("Course deleted");

        Ok(())
    }

    #[instrument(skip(db), fields(course.id = %course_id, student.id = %student_id, db.table = "enrollments"))]
    pub async fn enroll(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, AppError> {
        Self::find_course(db, course_id).await?;

        // The unique constraint on (student_id, course_id) is the real
        // guarantee; concurrent duplicate enrollments lose here with a 409.
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (student_id, course_id)
             VALUES ($1, $2)
             RETURNING id, student_id, course_id, enrolled_at",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!("Already enrolled in this course"));
            }
            error!(error = %e, "Database error creating enrollment");
            AppError::from(e)
        })?;

        info!("Student enrolled");

        Ok(enrollment)
    }

    #[instrument(skip(db), fields(caller.id = %caller_id))]
    pub async fn get_my_courses(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: UserRole,
    ) -> Result<Vec<MyCourse>, AppError> {
        let courses = match caller_role {
            UserRole::Student => {
                sqlx::query_as::<_, MyCourse>(
                    "SELECT c.id, c.instructor_id, c.title, c.description, c.created_at,
                            u.full_name AS instructor_name,
                            (SELECT COUNT(*) FROM lessons l WHERE l.course_id = c.id) AS lesson_count,
                            e.enrolled_at AS enrolled_at,
                            CAST(NULL AS BIGINT) AS student_count
                     FROM enrollments e
                     JOIN courses c ON c.id = e.course_id
                     JOIN users u ON u.id = c.instructor_id
                     WHERE e.student_id = $1
                     ORDER BY e.enrolled_at DESC",
                )
                .bind(caller_id)
                .fetch_all(db)
                .await?
            }
            UserRole::Instructor => {
                sqlx::query_as::<_, MyCourse>(
                    "SELECT c.id, c.instructor_id, c.title, c.description, c.created_at,
                            u.full_name AS instructor_name,
                            (SELECT COUNT(*) FROM lessons l WHERE l.course_id = c.id) AS lesson_count,
                            CAST(NULL AS TIMESTAMPTZ) AS enrolled_at,
                            (SELECT COUNT(*) FROM enrollments e WHERE e.course_id = c.id) AS student_count
                     FROM courses c
                     JOIN users u ON u.id = c.instructor_id
                     WHERE c.instructor_id = $1
                     ORDER BY c.created_at DESC",
                )
                .bind(caller_id)
                .fetch_all(db)
                .await?
            }
        };

        debug!(returned = courses.len(), role = %caller_role, "My-courses fetched");

        Ok(courses)
    }

    pub(crate) async fn find_course(db: &PgPool, course_id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, instructor_id, title, description, created_at
             FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }
}
