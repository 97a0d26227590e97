use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    Business, Service, ServicePatch, ServiceWithStaff, StaffLink, StaffPatch, StaffProfile, User,
};
const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn fmt_dt(dt: &NaiveDateTime) -> String {
    dt.format(DT_FORMAT).to_string()
}

fn parse_dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DT_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

// ── Businesses ──

pub fn create_business(conn: &Connection, business: &Business) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO businesses (id, name, timezone, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            business.id,
            business.name,
            business.timezone,
            fmt_dt(&business.created_at),
        ],
    )?;
    Ok(())
}

/// Single-tenant lookup: the first business row ever created wins.
pub fn find_first_business(conn: &Connection) -> anyhow::Result<Option<Business>> {
    let result = conn.query_row(
        "SELECT id, name, timezone, created_at FROM businesses ORDER BY rowid ASC LIMIT 1",
        [],
        |row| Ok(parse_business_row(row)),
    );

    match result {
        Ok(business) => Ok(Some(business?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_businesses(conn: &Connection) -> anyhow::Result<Vec<Business>> {
    let mut stmt =
        conn.prepare("SELECT id, name, timezone, created_at FROM businesses ORDER BY rowid ASC")?;
    let rows = stmt.query_map([], |row| Ok(parse_business_row(row)))?;

    let mut businesses = vec![];
    for row in rows {
        businesses.push(row??);
    }
    Ok(businesses)
}

fn parse_business_row(row: &rusqlite::Row) -> anyhow::Result<Business> {
    let created_at_str: String = row.get(3)?;
    Ok(Business {
        id: row.get(0)?,
        name: row.get(1)?,
        timezone: row.get(2)?,
        created_at: parse_dt(&created_at_str),
    })
}

// ── Users + staff profiles ──

/// Inserts a user and its staff profile as one unit; neither row exists if
/// either insert fails.
pub fn create_user_with_staff(
    conn: &mut Connection,
    user: &User,
    staff: &StaffProfile,
) -> anyhow::Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO users (id, business_id, email, name, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id,
            user.business_id,
            user.email,
            user.name,
            user.role.as_str(),
            fmt_dt(&user.created_at),
        ],
    )?;

    tx.execute(
        "INSERT INTO staff_profiles (id, business_id, user_id, display_name, phone, is_active, sort_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            staff.id,
            staff.business_id,
            staff.user_id,
            staff.display_name,
            staff.phone,
            staff.is_active as i32,
            staff.sort_order,
            fmt_dt(&staff.created_at),
        ],
    )?;

    tx.commit()?;
    Ok(())
}

pub fn list_staff(conn: &Connection, business_id: &str) -> anyhow::Result<Vec<StaffProfile>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, user_id, display_name, phone, is_active, sort_order, created_at
         FROM staff_profiles WHERE business_id = ?1 ORDER BY sort_order ASC, rowid ASC",
    )?;
    let rows = stmt.query_map(params![business_id], |row| Ok(parse_staff_row(row)))?;

    let mut staff = vec![];
    for row in rows {
        staff.push(row??);
    }
    Ok(staff)
}

pub fn get_staff(conn: &Connection, id: &str) -> anyhow::Result<Option<StaffProfile>> {
    let result = conn.query_row(
        "SELECT id, business_id, user_id, display_name, phone, is_active, sort_order, created_at
         FROM staff_profiles WHERE id = ?1",
        params![id],
        |row| Ok(parse_staff_row(row)),
    );

    match result {
        Ok(staff) => Ok(Some(staff?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Applies a sparse patch: only fields present in the patch are written.
/// Returns the updated row, or None when no staff profile has this id.
pub fn update_staff(
    conn: &Connection,
    id: &str,
    patch: &StaffPatch,
) -> anyhow::Result<Option<StaffProfile>> {
    let mut sets: Vec<&str> = vec![];
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(display_name) = &patch.display_name {
        sets.push("display_name = ?");
        params_vec.push(Box::new(display_name.clone()));
    }
    if let Some(phone) = &patch.phone {
        // Some(None) is an explicit null: clear the number.
        sets.push("phone = ?");
        params_vec.push(Box::new(phone.clone()));
    }
    if let Some(is_active) = patch.is_active {
        sets.push("is_active = ?");
        params_vec.push(Box::new(is_active as i32));
    }
    if let Some(sort_order) = patch.sort_order {
        sets.push("sort_order = ?");
        params_vec.push(Box::new(sort_order));
    }

    if !sets.is_empty() {
        let sql = format!("UPDATE staff_profiles SET {} WHERE id = ?", sets.join(", "));
        params_vec.push(Box::new(id.to_string()));

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();
        let count = conn.execute(&sql, params_refs.as_slice())?;
        if count == 0 {
            return Ok(None);
        }
    }

    get_staff(conn, id)
}

fn parse_staff_row(row: &rusqlite::Row) -> anyhow::Result<StaffProfile> {
    let created_at_str: String = row.get(7)?;
    Ok(StaffProfile {
        id: row.get(0)?,
        business_id: row.get(1)?,
        user_id: row.get(2)?,
        display_name: row.get(3)?,
        phone: row.get(4)?,
        is_active: row.get::<_, i32>(5)? != 0,
        sort_order: row.get(6)?,
        created_at: parse_dt(&created_at_str),
    })
}

// ── Services ──

const SERVICE_COLS: &str = "id, business_id, name, description, duration_min, price_cents, \
     deposit_cents, buffer_before_min, buffer_after_min, is_active, is_public, created_at";

/// Inserts a service together with its initial staff links as one unit.
pub fn create_service_with_links(
    conn: &mut Connection,
    service: &Service,
    staff_ids: &[String],
) -> anyhow::Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        &format!("INSERT INTO services ({SERVICE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"),
        params![
            service.id,
            service.business_id,
            service.name,
            service.description,
            service.duration_min,
            service.price_cents,
            service.deposit_cents,
            service.buffer_before_min,
            service.buffer_after_min,
            service.is_active as i32,
            service.is_public as i32,
            fmt_dt(&service.created_at),
        ],
    )?;

    for staff_id in staff_ids {
        tx.execute(
            "INSERT INTO service_staff (business_id, service_id, staff_id) VALUES (?1, ?2, ?3)",
            params![service.business_id, service.id, staff_id],
        )?;
    }

    tx.commit()?;
    Ok(())
}

pub fn list_services_with_staff(
    conn: &Connection,
    business_id: &str,
) -> anyhow::Result<Vec<ServiceWithStaff>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SERVICE_COLS} FROM services WHERE business_id = ?1
         ORDER BY created_at DESC, rowid DESC"
    ))?;
    let rows = stmt.query_map(params![business_id], |row| Ok(parse_service_row(row)))?;

    let mut services = vec![];
    for row in rows {
        let service = row??;
        let staff_links = get_staff_links(conn, business_id, &service.id)?;
        services.push(ServiceWithStaff {
            service,
            staff_links,
        });
    }
    Ok(services)
}

pub fn get_service_with_staff(
    conn: &Connection,
    business_id: &str,
    id: &str,
) -> anyhow::Result<Option<ServiceWithStaff>> {
    let result = conn.query_row(
        &format!("SELECT {SERVICE_COLS} FROM services WHERE business_id = ?1 AND id = ?2"),
        params![business_id, id],
        |row| Ok(parse_service_row(row)),
    );

    let service = match result {
        Ok(service) => service?,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let staff_links = get_staff_links(conn, business_id, id)?;
    Ok(Some(ServiceWithStaff {
        service,
        staff_links,
    }))
}

fn get_staff_links(
    conn: &Connection,
    business_id: &str,
    service_id: &str,
) -> anyhow::Result<Vec<StaffLink>> {
    let mut stmt = conn.prepare(
        "SELECT ss.business_id, ss.service_id, ss.staff_id,
                sp.id, sp.business_id, sp.user_id, sp.display_name, sp.phone, sp.is_active, sp.sort_order, sp.created_at
         FROM service_staff ss
         JOIN staff_profiles sp ON sp.id = ss.staff_id
         WHERE ss.business_id = ?1 AND ss.service_id = ?2
         ORDER BY sp.sort_order ASC, sp.rowid ASC",
    )?;

    let rows = stmt.query_map(params![business_id, service_id], |row| {
        let created_at_str: String = row.get(10)?;
        Ok(StaffLink {
            business_id: row.get(0)?,
            service_id: row.get(1)?,
            staff_id: row.get(2)?,
            staff: StaffProfile {
                id: row.get(3)?,
                business_id: row.get(4)?,
                user_id: row.get(5)?,
                display_name: row.get(6)?,
                phone: row.get(7)?,
                is_active: row.get::<_, i32>(8)? != 0,
                sort_order: row.get(9)?,
                created_at: parse_dt(&created_at_str),
            },
        })
    })?;

    let mut links = vec![];
    for row in rows {
        links.push(row?);
    }
    Ok(links)
}

/// Applies a service patch: sparse field update plus, when `staff_ids` is
/// present, a full replacement of the junction rows (empty list clears
/// them). Both run in one transaction so readers never see the field patch
/// without the matching link set. Returns false when the service does not
/// exist.
///
/// Concurrent patches to the same service are not serialized beyond this
/// transaction; the last delete+insert pair wins.
pub fn update_service(
    conn: &mut Connection,
    business_id: &str,
    id: &str,
    patch: &ServicePatch,
) -> anyhow::Result<bool> {
    let tx = conn.transaction()?;

    let exists: bool = tx.query_row(
        "SELECT COUNT(*) > 0 FROM services WHERE business_id = ?1 AND id = ?2",
        params![business_id, id],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(false);
    }

    let mut sets: Vec<&str> = vec![];
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(name) = &patch.name {
        sets.push("name = ?");
        params_vec.push(Box::new(name.clone()));
    }
    if let Some(description) = &patch.description {
        sets.push("description = ?");
        params_vec.push(Box::new(description.clone()));
    }
    if let Some(duration_min) = patch.duration_min {
        sets.push("duration_min = ?");
        params_vec.push(Box::new(duration_min));
    }
    if let Some(price_cents) = patch.price_cents {
        sets.push("price_cents = ?");
        params_vec.push(Box::new(price_cents));
    }
    if let Some(deposit_cents) = patch.deposit_cents {
        sets.push("deposit_cents = ?");
        params_vec.push(Box::new(deposit_cents));
    }
    if let Some(buffer_before_min) = patch.buffer_before_min {
        sets.push("buffer_before_min = ?");
        params_vec.push(Box::new(buffer_before_min));
    }
    if let Some(buffer_after_min) = patch.buffer_after_min {
        sets.push("buffer_after_min = ?");
        params_vec.push(Box::new(buffer_after_min));
    }
    if let Some(is_active) = patch.is_active {
        sets.push("is_active = ?");
        params_vec.push(Box::new(is_active as i32));
    }
    if let Some(is_public) = patch.is_public {
        sets.push("is_public = ?");
        params_vec.push(Box::new(is_public as i32));
    }

    if !sets.is_empty() {
        let sql = format!("UPDATE services SET {} WHERE id = ?", sets.join(", "));
        params_vec.push(Box::new(id.to_string()));

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();
        tx.execute(&sql, params_refs.as_slice())?;
    }

    if let Some(staff_ids) = &patch.staff_ids {
        tx.execute(
            "DELETE FROM service_staff WHERE business_id = ?1 AND service_id = ?2",
            params![business_id, id],
        )?;
        for staff_id in staff_ids {
            tx.execute(
                "INSERT INTO service_staff (business_id, service_id, staff_id) VALUES (?1, ?2, ?3)",
                params![business_id, id, staff_id],
            )?;
        }
    }

    tx.commit()?;
    Ok(true)
}

fn parse_service_row(row: &rusqlite::Row) -> anyhow::Result<Service> {
    let created_at_str: String = row.get(11)?;
    Ok(Service {
        id: row.get(0)?,
        business_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        duration_min: row.get(4)?,
        price_cents: row.get(5)?,
        deposit_cents: row.get(6)?,
        buffer_before_min: row.get(7)?,
        buffer_after_min: row.get(8)?,
        is_active: row.get::<_, i32>(9)? != 0,
        is_public: row.get::<_, i32>(10)? != 0,
        created_at: parse_dt(&created_at_str),
    })
}
