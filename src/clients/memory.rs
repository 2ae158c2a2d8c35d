use crate::framework::config::DEFAULT_IDENTITY;
use crate::framework::{ApiClient, CreateResponse, Operation, RemoteError, Request, Response};
use crate::server::StoreHandle;
use serde_json::Value;
use tracing::{debug, instrument};

/// An [`ApiClient`] backed by the in-memory [`ResourceStore`](crate::server::ResourceStore).
///
/// The operation performed by [`execute`](ApiClient::execute) is the one the current
/// response is prepared for; the current request must support it too. The collection and id
/// are taken from the request target (`scheme://host/<collection>[/<id>]`).
pub struct MemoryClient {
    store: StoreHandle,
    identity: String,
    request: Request,
    response: Response,
}

impl MemoryClient {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            identity: DEFAULT_IDENTITY.to_string(),
            request: Request::any(),
            response: Response::empty(Operation::Read),
        }
    }

    /// Sets the property the store writes assigned ids into.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    /// Splits the request target into collection path and numeric id.
    fn locate(&self) -> Result<(String, Option<u64>), RemoteError> {
        let target = self
            .request
            .target()
            .ok_or_else(|| RemoteError::Rejected("request has no target".to_string()))?;
        let mut segments: Vec<&str> = target
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let Some(id) = self.request.id() else {
            return Ok((segments.join("/"), None));
        };
        segments.pop();
        let collection = segments.join("/");
        let parsed = match id {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        match parsed {
            Some(id) => Ok((collection, Some(id))),
            None => Err(RemoteError::NotFound(format!("{collection}/{id}"))),
        }
    }

    fn require_id(collection: &str, id: Option<u64>) -> Result<u64, RemoteError> {
        id.ok_or_else(|| RemoteError::Rejected(format!("{collection}: request has no id")))
    }
}

impl ApiClient for MemoryClient {
    fn request(&self) -> &Request {
        &self.request
    }

    fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    fn set_request(&mut self, request: Request) {
        self.request = request;
    }

    fn response(&self) -> &Response {
        &self.response
    }

    fn set_response(&mut self, response: Response) {
        self.response = response;
    }

    #[instrument(skip(self), fields(operation = %self.response.operation()))]
    fn execute(&mut self) -> Result<(), RemoteError> {
        let operation = self.response.operation();
        if !self.request.supports(operation) {
            return Err(RemoteError::Rejected(format!(
                "request cannot serve {operation}"
            )));
        }
        let (collection, id) = self.locate()?;
        debug!(resource = %collection, ?id, "Sending request");

        self.response = match operation {
            Operation::Create => {
                let record =
                    self.store
                        .create(&collection, &self.identity, self.request.data().clone())?;
                let id = record.get(&self.identity).cloned().ok_or_else(|| {
                    RemoteError::Decode(format!(
                        "{collection}: created record has no {}",
                        self.identity
                    ))
                })?;
                Response::Create(CreateResponse { id, data: record })
            }
            Operation::Read => {
                let id = Self::require_id(&collection, id)?;
                Response::read(self.store.read(&collection, id)?)
            }
            Operation::Update => {
                let id = Self::require_id(&collection, id)?;
                let record = self.store.update(
                    &collection,
                    &self.identity,
                    id,
                    self.request.data().clone(),
                )?;
                Response::updated().with_data(record)
            }
            Operation::Delete => {
                let id = Self::require_id(&collection, id)?;
                self.store.delete(&collection, id)?;
                Response::deleted()
            }
            Operation::Index => Response::index(self.store.index(&collection)?),
        };
        Ok(())
    }
}
