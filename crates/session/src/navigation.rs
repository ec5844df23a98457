//! Navigation capability for forced logout

/// Capability to send the user back to the login surface
///
/// Implementations must perform a hard navigation (full page load or the
/// host platform's equivalent) rather than a client-side route transition,
/// so that residual in-memory state is discarded along with the session.
pub trait Navigator: Send + Sync {
    /// Navigate to the login surface
    fn redirect_to_login(&self);
}
