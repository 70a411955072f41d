//! SQL schema for the Kennsla SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id    INTEGER PRIMARY KEY,
    ssn   TEXT NOT NULL UNIQUE,   -- exactly 10 digits
    name  TEXT NOT NULL,
    email TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS course_templates (
    course_code TEXT PRIMARY KEY,  -- e.g. 'T-514-VEFT'
    name        TEXT NOT NULL,     -- Icelandic (default-locale) name
    name_en     TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS course_instances (
    id          INTEGER PRIMARY KEY,
    course_code TEXT NOT NULL REFERENCES course_templates(course_code),
    semester    TEXT NOT NULL      -- term code, e.g. '20163'
);

-- One row per (course instance, person); role changes are in-place updates.
CREATE TABLE IF NOT EXISTS teacher_registrations (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    course_instance_id INTEGER NOT NULL REFERENCES course_instances(id),
    ssn                TEXT NOT NULL REFERENCES persons(ssn),
    teacher_type       TEXT NOT NULL,   -- 'main_teacher' | 'assistant_teacher'
    created_at         TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    UNIQUE (course_instance_id, ssn)
);

-- Backstop for the engine rule: at most one main teacher per instance.
CREATE UNIQUE INDEX IF NOT EXISTS registrations_one_main_idx
    ON teacher_registrations(course_instance_id)
    WHERE teacher_type = 'main_teacher';

CREATE INDEX IF NOT EXISTS instances_semester_idx
    ON course_instances(semester);
CREATE INDEX IF NOT EXISTS registrations_instance_idx
    ON teacher_registrations(course_instance_id);

PRAGMA user_version = 1;
";
