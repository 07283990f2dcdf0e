mod credentials;
mod record;
mod zone;

pub use credentials::*;
pub use record::*;
pub use zone::*;
