// Site - owns the transport that pages are synced through
use crate::application::page_transport::{PageTransport, SyncError};
use crate::domain::error::PageError;
use crate::domain::page::Page;
use std::sync::Arc;

#[derive(Clone)]
pub struct Site {
    transport: Arc<dyn PageTransport>,
}

impl Site {
    pub fn new(transport: Arc<dyn PageTransport>) -> Self {
        Self { transport }
    }

    pub fn page(&self, route: &str) -> Result<Page, PageError> {
        Page::new(route)
    }

    pub async fn sync(&self, page: &Page) -> Result<(), SyncError> {
        tracing::debug!("Syncing page {} ({} cards)", page.route, page.cards().count());
        self.transport.sync(page).await
    }
}
