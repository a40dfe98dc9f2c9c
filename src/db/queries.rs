use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::models::{BookingRecord, LeadRecord};

const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Leads ──

pub fn insert_lead(conn: &Connection, lead: &LeadRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO leads (id, session_id, name, email, phone, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            lead.id,
            lead.session_id,
            lead.name,
            lead.email,
            lead.phone,
            lead.created_at.format(DT_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_leads(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<LeadRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, name, email, phone, created_at
         FROM leads ORDER BY created_at DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], parse_lead_row)?;
    rows.collect()
}

fn parse_lead_row(row: &Row) -> rusqlite::Result<LeadRecord> {
    let created_at_str: String = row.get(5)?;
    Ok(LeadRecord {
        id: row.get(0)?,
        session_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        created_at: parse_dt(&created_at_str),
    })
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &BookingRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, session_id, date, time, timezone, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            booking.id,
            booking.session_id,
            booking.date,
            booking.time,
            booking.timezone,
            booking.created_at.format(DT_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_bookings(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<BookingRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, date, time, timezone, created_at
         FROM bookings ORDER BY created_at DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        let created_at_str: String = row.get(5)?;
        Ok(BookingRecord {
            id: row.get(0)?,
            session_id: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            timezone: row.get(4)?,
            created_at: parse_dt(&created_at_str),
        })
    })?;
    rows.collect()
}

// ── Dashboard counters ──

pub struct DashboardStats {
    pub lead_count: i64,
    pub booking_count: i64,
}

pub fn get_dashboard_stats(conn: &Connection) -> rusqlite::Result<DashboardStats> {
    let lead_count: i64 = conn.query_row("SELECT COUNT(*) FROM leads", [], |row| row.get(0))?;
    let booking_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    Ok(DashboardStats {
        lead_count,
        booking_count,
    })
}

fn parse_dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DT_FORMAT).unwrap_or_else(|_| chrono::Utc::now().naive_utc())
}
