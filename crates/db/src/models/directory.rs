//! Public lookup projections of `students` and `teachers`.

use chrono::NaiveDate;
use seatfinder_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// What the public search page shows for a roll number.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSeat {
    pub roll_number: String,
    pub name: String,
    pub department: Option<String>,
    pub building: Option<String>,
    pub room_number: Option<String>,
    pub seat_number: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub exam_time: Option<String>,
    pub directions: Option<String>,
}

/// Teacher directory entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub teacher_id: String,
    pub name: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub office_room: Option<String>,
}
