/// Stable identifier assigned by the remote service to every record.
pub type RecordId = i64;

/// Name of a projected row field, as it appears on the wire.
pub type FieldName = String;
