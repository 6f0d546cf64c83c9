use crate::error::AdminError;
use crate::resource::AdminResource;
use crate::validate::Validate;

/// The uniform table-plus-modal controller every reference-data screen
/// follows: load the full collection, save through POST or PUT, then
/// re-fetch rather than patching the local copy. Last write wins.
pub struct AdminScreen<R: AdminResource> {
    resource: R,
    items: Vec<R::Item>,
}

impl<R: AdminResource> AdminScreen<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub async fn load(&mut self) -> Result<(), AdminError> {
        self.items = self.resource.list().await?;
        Ok(())
    }

    /// `id` present means the modal was opened for edit (full replace via
    /// PUT); absent means create. Validation rejects the draft before any
    /// request goes out.
    pub async fn save(&mut self, id: Option<i64>, draft: &R::Draft) -> Result<(), AdminError> {
        draft.validate()?;
        match id {
            Some(id) => {
                self.resource.update(id, draft).await?;
            }
            None => {
                self.resource.create(draft).await?;
            }
        }
        self.load().await
    }

    /// Confirmed delete: DELETE then re-fetch, so the table reflects what
    /// the server kept rather than an assumption.
    pub async fn remove(&mut self, id: i64) -> Result<(), AdminError> {
        self.resource.delete(id).await?;
        self.load().await
    }
}
