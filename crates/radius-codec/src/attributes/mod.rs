mod attribute;
mod types;
mod vsa;

pub use attribute::Attribute;
pub use types::AttributeType;
pub use vsa::VendorSpecific;
