//! Export download and handle resolution.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::info;

use letterboxd_ics_core::Error;

use crate::auth::{self, Credentials};
use crate::session::Session;

/// Export endpoint; answers with a ZIP archive of the account's data.
pub const EXPORT_URL: &str = "https://letterboxd.com/data/export/";

/// Name of the diary table inside the export archive.
pub const DIARY_MEMBER: &str = "diary.csv";

/// Where the diary table was materialized for this render pass.
#[derive(Debug)]
pub enum ExportHandle {
    /// A user-supplied CSV file; no authentication or network involved.
    Csv(PathBuf),
    /// A freshly downloaded export archive holding [`DIARY_MEMBER`].
    /// The temp file is removed when the handle drops.
    Archive(tempfile::TempPath),
}

/// Retrieves the diary source for one render pass.
#[derive(Debug, Default)]
pub struct ExportFetcher {
    file: Option<PathBuf>,
}

impl ExportFetcher {
    /// A set `file` bypasses login and download entirely.
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }

    pub fn fetch(
        &self,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<ExportHandle, Error> {
        if let Some(path) = &self.file {
            return Ok(ExportHandle::Csv(path.clone()));
        }

        auth::login(session, credentials)?;

        info!(url = EXPORT_URL, "getting export file");
        let response = session.get(EXPORT_URL).map_err(|e| Error::Transport {
            detail: e.to_string(),
        })?;

        if response.status != 200 {
            return Err(Error::ExportHttp {
                status: response.status,
            });
        }

        let content_type = response.header("Content-Type").unwrap_or_default();
        if !content_type.contains("application/zip") {
            return Err(Error::ExportNotZip);
        }

        info!("creating local export archive");
        let mut archive =
            NamedTempFile::with_prefix("letterboxd-export").map_err(|e| Error::Transport {
                detail: format!("cannot persist export archive: {e}"),
            })?;
        archive.write_all(&response.body).map_err(|e| Error::Transport {
            detail: format!("cannot persist export archive: {e}"),
        })?;

        Ok(ExportHandle::Archive(archive.into_temp_path()))
    }
}
