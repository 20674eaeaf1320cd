//! Public lookups: seat search by roll number and the teacher directory.

use sqlx::PgPool;

use crate::models::directory::{StudentSeat, Teacher};

const SEAT_COLUMNS: &str = "roll_number, name, department, building, room_number, \
    seat_number, exam_date, exam_time, directions";

const TEACHER_COLUMNS: &str =
    "id, teacher_id, name, department, designation, email, phone, office_room";

pub struct DirectoryRepo;

impl DirectoryRepo {
    /// Exact, case-insensitive roll number match.
    pub async fn find_seat(
        pool: &PgPool,
        roll_number: &str,
    ) -> Result<Option<StudentSeat>, sqlx::Error> {
        let query = format!(
            "SELECT {SEAT_COLUMNS} FROM students WHERE lower(roll_number) = lower($1) LIMIT 1"
        );
        sqlx::query_as::<_, StudentSeat>(&query)
            .bind(roll_number)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring search on teacher id, name and department.
    /// An empty query lists everyone (up to `limit`).
    pub async fn search_teachers(
        pool: &PgPool,
        q: &str,
        limit: i64,
    ) -> Result<Vec<Teacher>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(q));
        let query = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers \
             WHERE teacher_id ILIKE $1 OR name ILIKE $1 OR COALESCE(department, '') ILIKE $1 \
             ORDER BY name ASC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
