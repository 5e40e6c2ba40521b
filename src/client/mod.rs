//! Client side of the quiz app: the session context, the authorization gate
//! in front of every protected call, and the typed API client.

pub mod api;
pub mod gate;
pub mod session;
pub mod storage;
pub mod views;

pub use api::{AverageScore, ClientError, QuizApiClient, ReqwestTransport, Transport};
pub use gate::{Gate, GateError};
pub use session::{Credential, Session, SessionClaim};
pub use storage::{FileStore, MemoryStore, SessionStore, StorageError};
