//! Link-based sharing: a whole document embedded in a URL.
//!
//! This path never touches the share store. A document is turned into a
//! URL-safe token with [`encode`], placed in the `markdown` query parameter
//! of the frontend URL, and recovered with [`decode_lenient`] when the page
//! loads.
//!
//! ```
//! let token = margin_link::encode("# Hëllo");
//! assert_eq!(margin_link::decode(&token).unwrap(), "# Hëllo");
//! ```

pub mod codec;
pub mod error;
pub mod query;

pub use codec::{decode, decode_lenient, encode};
pub use error::LinkError;
pub use query::{markdown_from_query, share_link, MARKDOWN_PARAMS};
