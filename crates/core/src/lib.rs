pub mod email;
pub mod error;
pub mod response;
pub mod transport;

pub use email::OutboundEmail;
pub use error::{CONNECTION_RESET_SIGNATURE, TransportError};
pub use response::{ResponseMetadata, SUCCESS_STATUS_CODE, SendResponse};
pub use transport::{DynRawTransport, RawTransport};
