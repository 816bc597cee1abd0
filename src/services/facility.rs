use sqlx::PgPool;

use crate::models::{EquipmentRow, NewEquipmentForm, NewRoomForm, Room, UpdateRoomForm};

/// Admin CRUD over rooms and equipment.
#[derive(Clone)]
pub struct FacilityService {
    db: PgPool,
}

impl FacilityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn rooms(&self) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "SELECT id, name, capacity, room_type FROM rooms ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
    }

    pub async fn create_room(&self, form: &NewRoomForm) -> Result<Room, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (name, capacity, room_type)
             VALUES ($1, $2, $3)
             RETURNING id, name, capacity, room_type",
        )
        .bind(&form.name)
        .bind(form.capacity)
        .bind(&form.room_type)
        .fetch_one(&self.db)
        .await
    }

    /// Returns false when the room does not exist.
    pub async fn update_room(
        &self,
        room_id: i32,
        form: &UpdateRoomForm,
    ) -> Result<bool, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE rooms SET name = $1, capacity = $2, room_type = $3 WHERE id = $4",
        )
        .bind(&form.name)
        .bind(form.capacity)
        .bind(&form.room_type)
        .bind(room_id)
        .execute(&self.db)
        .await?;

        Ok(updated.rows_affected() > 0)
    }

    pub async fn equipment(&self) -> Result<Vec<EquipmentRow>, sqlx::Error> {
        sqlx::query_as::<_, EquipmentRow>(
            "SELECT e.id, e.name, r.name AS room_name, e.status, e.last_maintenance_date,
                    e.maintenance_notes
             FROM equipment e
             LEFT JOIN rooms r ON e.room_id = r.id
             ORDER BY e.status DESC, e.name",
        )
        .fetch_all(&self.db)
        .await
    }

    pub async fn add_equipment(&self, form: &NewEquipmentForm) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO equipment (name, room_id) VALUES ($1, $2)")
            .bind(&form.name)
            .bind(form.room_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Status/notes update stamps the maintenance date.
    pub async fn update_equipment_status(
        &self,
        equipment_id: i32,
        status: &str,
        notes: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE equipment
             SET status = $1, maintenance_notes = $2, last_maintenance_date = CURRENT_DATE
             WHERE id = $3",
        )
        .bind(status)
        .bind(notes)
        .bind(equipment_id)
        .execute(&self.db)
        .await?;

        Ok(updated.rows_affected() > 0)
    }
}
