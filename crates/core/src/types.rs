/// Backend primary keys for issues and stand-by records are numeric.
pub type DbId = i64;
