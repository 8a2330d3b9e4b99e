use sqlx::PgConnection;

/// A handle to an active connection against the document store.
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// ExternalConnectivity provides access to services external to the application,
/// i.e. the document store. It is injected into every port invocation so tests
/// can substitute [test_util::FakeExternalConnectivity].
pub trait ExternalConnectivity: Sync {
    type Handle: ConnectionHandle;

    /// Acquires a connection to the document store.
    async fn database_cxn(&mut self) -> Result<Self::Handle, anyhow::Error>;
}
