// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use slotbook_domain::{Project, ProjectId};

use crate::data_models::ProjectRow;
use crate::diesel_schema::projects;
use crate::error::PersistenceError;

/// Loads a project by ID.
///
/// # Errors
///
/// Returns `ProjectNotFound` if no row exists, or `CorruptRow` if the
/// stored row fails domain parsing.
pub fn get_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
) -> Result<Project, PersistenceError> {
    let row: ProjectRow = projects::table
        .filter(projects::project_id.eq(project_id.value()))
        .first::<ProjectRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ProjectNotFound(project_id.value()))?;

    row.into_domain()
}

/// Lists all projects, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails domain parsing.
pub fn list_projects(conn: &mut SqliteConnection) -> Result<Vec<Project>, PersistenceError> {
    let rows: Vec<ProjectRow> = projects::table
        .order(projects::project_id.asc())
        .load::<ProjectRow>(conn)?;

    rows.into_iter().map(ProjectRow::into_domain).collect()
}
