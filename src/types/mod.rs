//! Bind-side data types.

mod bind_type;
mod bindings;
mod value;

pub use bind_type::{BindDirection, BindType};
pub use bindings::{BindKey, Bindings};
pub use value::BindValue;
