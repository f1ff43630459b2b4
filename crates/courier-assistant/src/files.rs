use std::sync::Arc;

use async_trait::async_trait;

use crate::connector::{Connector, RequestOptions, send_as};
use crate::error::Result;
use crate::types::{File, FileList};

/// Capability to list files uploaded to the remote service
#[async_trait]
pub trait FileLister: Send + Sync {
    async fn list_files(&self) -> Result<Vec<File>>;
}

/// File listing backed by the outbound connector
pub struct FileService {
    connector: Arc<dyn Connector>,
}

impl FileService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl FileLister for FileService {
    /// One GET to the file listing endpoint, returning the envelope's
    /// `data` verbatim in remote order
    async fn list_files(&self) -> Result<Vec<File>> {
        let list: FileList = send_as(self.connector.as_ref(), RequestOptions::get("/files")).await?;
        Ok(list.data)
    }
}
