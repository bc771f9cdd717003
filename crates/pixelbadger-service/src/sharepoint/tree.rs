//! Directory-tree rendering of a SharePoint drive.
//!
//! Output grammar, one line per entry, each terminated by `\n`:
//!
//! ```text
//! / [d:root] 2 items
//!   Reports/ [d:folder_001] 1 items 03-05 14:07
//!     q1.pdf [f:doc_001] 2K pdf 03-01 09:30
//!   notes.txt [f:doc_002] 500B txt 02-28 18:00
//! ```

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use pixelbadger_core::error::AppError;
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::DriveListing;
use pixelbadger_core::types::{CredentialContext, DriveItem, ItemKind};

use super::format::{file_extension, format_date, format_size};

/// Spaces per indentation level.
const INDENT_WIDTH: usize = 2;

/// Renders the folder hierarchy under a drive path as indented text.
///
/// The formatter itself holds no per-call state, so one instance can serve
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct TreeFormatter {
    /// Remote folder listing.
    listing: Arc<dyn DriveListing>,
}

impl TreeFormatter {
    /// Creates a new tree formatter.
    pub fn new(listing: Arc<dyn DriveListing>) -> Self {
        Self { listing }
    }

    /// Renders the tree under `root_path` of the site's default drive.
    ///
    /// Any listing failure aborts the whole rendering and is returned
    /// unchanged. Once `cancel` fires, the pending listing is abandoned and
    /// the call fails with a cancellation error.
    pub async fn format_tree(
        &self,
        site_id: &str,
        root_path: &str,
        credentials: &CredentialContext,
        cancel: &CancellationToken,
    ) -> AppResult<String> {
        let mut walk = TreeWalk::new(self.listing.as_ref(), site_id, credentials, cancel);
        walk.run(root_path).await?;

        info!(
            site_id,
            root_path,
            folders = walk.folder_counter,
            files = walk.file_counter,
            "Rendered drive tree"
        );
        Ok(walk.output)
    }
}

/// Total sibling order: folders first, then name (byte-wise), then item id,
/// modification time and size so that no two distinct items tie.
fn sibling_order(a: &DriveItem, b: &DriveItem) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| a.last_modified_at.cmp(&b.last_modified_at))
        .then_with(|| a.size().cmp(&b.size()))
}

fn sorted(mut items: Vec<DriveItem>) -> Vec<DriveItem> {
    items.sort_by(sibling_order);
    items
}

/// State of a single `format_tree` call.
struct TreeWalk<'a> {
    listing: &'a dyn DriveListing,
    site_id: &'a str,
    credentials: &'a CredentialContext,
    cancel: &'a CancellationToken,
    folder_counter: u64,
    file_counter: u64,
    output: String,
}

impl<'a> TreeWalk<'a> {
    fn new(
        listing: &'a dyn DriveListing,
        site_id: &'a str,
        credentials: &'a CredentialContext,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            listing,
            site_id,
            credentials,
            cancel,
            folder_counter: 0,
            file_counter: 0,
            output: String::new(),
        }
    }

    async fn list(&self, path: &str) -> AppResult<Vec<DriveItem>> {
        if self.cancel.is_cancelled() {
            return Err(cancelled(path));
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(cancelled(path)),
            result = self.listing.list_children(self.site_id, path, self.credentials) => result,
        }
    }

    /// Depth-first, pre-order walk driven by an explicit stack.
    async fn run(&mut self, root_path: &str) -> AppResult<()> {
        let root_items = self.list(root_path).await?;
        let _ = writeln!(self.output, "/ [d:root] {} items", root_items.len());

        // Siblings are pushed in reverse so the first in order is popped first.
        let mut stack: Vec<(DriveItem, usize)> = sorted(root_items)
            .into_iter()
            .rev()
            .map(|item| (item, 1))
            .collect();

        while let Some((item, level)) = stack.pop() {
            if let Some(children) = self.visit(&item, level).await? {
                stack.extend(sorted(children).into_iter().rev().map(|c| (c, level + 1)));
            }
        }

        Ok(())
    }

    /// Emits the line for `item`; for a folder, returns its listed children.
    async fn visit(&mut self, item: &DriveItem, level: usize) -> AppResult<Option<Vec<DriveItem>>> {
        let indent = " ".repeat(level * INDENT_WIDTH);
        let modified = format_date(&item.last_modified_at);

        match &item.kind {
            ItemKind::Folder { .. } => {
                self.folder_counter += 1;
                let id = self.folder_counter;

                let child_path = item.child_path();
                let children = self.list(&child_path).await?;
                debug!(path = %child_path, count = children.len(), "Listed folder");

                let _ = writeln!(
                    self.output,
                    "{indent}{}/ [d:folder_{id:03}] {} items {modified}",
                    item.name,
                    children.len()
                );
                Ok(Some(children))
            }
            ItemKind::File { size, .. } => {
                self.file_counter += 1;
                let id = self.file_counter;

                let _ = writeln!(
                    self.output,
                    "{indent}{} [f:doc_{id:03}] {} {} {modified}",
                    item.name,
                    format_size(*size),
                    file_extension(&item.name)
                );
                Ok(None)
            }
        }
    }
}

fn cancelled(path: &str) -> AppError {
    AppError::cancelled(format!("Tree rendering cancelled while listing '{path}'"))
}
