// Storage layer: trait-per-aggregate seams with sqlx/Postgres
// implementations. Handlers and the matching engine only ever see the
// traits, so tests swap in in-memory doubles.

pub mod jobs;
pub mod matches;
pub mod resumes;
