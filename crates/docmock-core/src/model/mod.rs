pub mod reference;
pub mod value;

pub use reference::{CollectionReference, DocumentReference};
pub use value::{Fields, Value, ValueClass};
